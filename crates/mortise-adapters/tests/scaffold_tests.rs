//! End-to-end orchestrator runs against the in-memory file system with the
//! built-in template bodies.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use mortise_adapters::{BuiltinTemplates, FsOp, MemoryFileSystem};
use mortise_core::{
    application::ApplicationError,
    domain::{BatchSpec, DomainError},
    prelude::*,
};

const ROOT: &str = "/out";
const API: &str = "/out/src/Acme.Api";

fn service(fs: &MemoryFileSystem) -> ScaffoldService {
    let layout = SolutionLayout::new(ROOT, "Acme");
    ScaffoldService::new(
        Arc::new(fs.clone()),
        Box::new(BuiltinTemplates::new()),
        PathResolver::new(layout),
    )
}

fn widget() -> Entity {
    Entity::new("Widget")
        .with_property(EntityProperty::primary_key("Id", "Guid"))
        .with_property(EntityProperty::new("Title", "string").filterable().sortable())
}

fn model_with(features: Vec<Feature>) -> ApiModel {
    let entity = features
        .into_iter()
        .fold(widget(), |entity, feature| entity.with_feature(feature));
    ApiModel::new("Acme").with_entity(entity)
}

fn read(fs: &MemoryFileSystem, path: impl AsRef<Path>) -> String {
    fs.read_file(path.as_ref())
        .unwrap_or_else(|| panic!("{} was not written", path.as_ref().display()))
}

fn entity_path() -> PathBuf {
    PathBuf::from(format!("{API}/Domain/Widgets/Widget.cs"))
}

fn controller_path() -> PathBuf {
    PathBuf::from(format!("{API}/Controllers/v1/WidgetsController.cs"))
}

fn position(report: &ScaffoldReport, path: &Path, created: bool) -> usize {
    report
        .changes()
        .iter()
        .position(|c| c.path() == path && c.is_created() == created)
        .unwrap_or_else(|| panic!("no change for {}", path.display()))
}

#[test]
fn widget_get_record_runs_in_dependency_order() {
    let fs = MemoryFileSystem::new();
    let model = model_with(vec![Feature::GetRecord(FeatureAccess::public())]);

    let report = service(&fs).scaffold(&model).unwrap();

    let entity = position(&report, &entity_path(), true);
    let read_dto = position(
        &report,
        Path::new(&format!("{API}/Domain/Widgets/Dtos/WidgetDto.cs")),
        true,
    );
    let validator = position(
        &report,
        Path::new(&format!(
            "{API}/Domain/Widgets/Validators/WidgetForManipulationValidator.cs"
        )),
        true,
    );
    let controller = position(&report, &controller_path(), true);
    let endpoint = position(&report, &controller_path(), false);
    assert!(entity < read_dto && read_dto < validator && validator < controller);
    assert!(controller < endpoint);

    let controller_patches: Vec<_> = report
        .patched()
        .filter(|c| c.path() == controller_path())
        .collect();
    assert_eq!(controller_patches.len(), 1);
    assert!(matches!(
        controller_patches[0],
        FileChange::Patched { inserted: 1, .. }
    ));

    let text = read(&fs, controller_path());
    assert!(text.contains(r#"[HttpGet("{id}", Name = "GetWidget")]"#));
    assert!(text.contains("var query = new GetWidget.WidgetQuery(id);"));
    let marker = text
        .lines()
        .position(|l| l.contains("endpoint marker - do not delete this comment"))
        .unwrap();
    let endpoint_line = text.lines().position(|l| l.contains("GetWidget")).unwrap();
    assert!(marker < endpoint_line);
    assert_eq!(report.warnings().count(), 0);
}

#[test]
fn second_run_fails_on_the_entity_file_without_patching() {
    let fs = MemoryFileSystem::new();
    let model = model_with(vec![Feature::GetRecord(FeatureAccess::public())]);
    let service = service(&fs);

    service.scaffold(&model).unwrap();
    let controller_before = read(&fs, controller_path());
    let files_before = fs.list_files();
    fs.clear_journal();

    let err = service.scaffold(&model).unwrap_err();

    assert_eq!(
        err,
        MortiseError::Application(ApplicationError::FileAlreadyExists {
            path: entity_path()
        })
    );
    assert_eq!(read(&fs, controller_path()), controller_before);
    assert_eq!(fs.list_files(), files_before);
    assert!(fs.journal().is_empty());
}

#[test]
fn public_features_render_no_authorization() {
    let fs = MemoryFileSystem::new();
    let model = model_with(vec![
        Feature::AddRecord(FeatureAccess::public()),
        Feature::GetRecord(FeatureAccess::public()),
        Feature::GetList(FeatureAccess::public()),
        Feature::UpdateRecord(FeatureAccess::public()),
        Feature::PatchRecord(FeatureAccess::public()),
        Feature::DeleteRecord(FeatureAccess::public()),
    ]);

    service(&fs).scaffold(&model).unwrap();

    for path in fs.list_files() {
        let text = read(&fs, &path);
        for needle in ["Authorize", "Unauthorized", "Forbidden", "Policy"] {
            assert!(
                !text.contains(needle),
                "{} unexpectedly contains {needle}",
                path.display()
            );
        }
    }
}

#[test]
fn protected_features_get_policies_and_auth_tests() {
    let fs = MemoryFileSystem::new();
    let model = model_with(vec![
        Feature::GetRecord(FeatureAccess::protected()),
        Feature::DeleteRecord(FeatureAccess::protected().with_permission("CanRemoveWidgets")),
    ]);

    service(&fs).scaffold(&model).unwrap();

    let controller = read(&fs, controller_path());
    assert!(controller.contains(r#"[Authorize(Policy = "CanGetWidget")]"#));
    assert!(controller.contains(r#"[Authorize(Policy = "CanRemoveWidgets")]"#));

    let functional = read(
        &fs,
        "/out/tests/Acme.FunctionalTests/FunctionalTests/Widgets/GetWidgetTests.cs",
    );
    assert!(functional.contains("HttpStatusCode.Unauthorized"));
    assert!(functional.contains("GetWidget_returns_forbidden_without_CanGetWidget"));
}

#[test]
fn features_on_one_entity_share_a_controller() {
    let fs = MemoryFileSystem::new();
    let model = model_with(vec![
        Feature::GetRecord(FeatureAccess::public()),
        Feature::GetList(FeatureAccess::public()),
        Feature::AddRecord(FeatureAccess::public()),
    ]);

    let report = service(&fs).scaffold(&model).unwrap();

    let creates = report
        .created()
        .filter(|p| *p == controller_path())
        .count();
    let patches = report
        .patched()
        .filter(|c| c.path() == controller_path())
        .count();
    assert_eq!((creates, patches), (1, 3));

    let text = read(&fs, controller_path());
    for route in ["GetWidget", "GetWidgets", "AddWidget"] {
        assert!(text.contains(&format!("Name = \"{route}\"")), "missing {route}");
    }
    assert_eq!(text.matches("public sealed class WidgetsController").count(), 1);
}

#[test]
fn route_registry_is_created_once_and_patched_per_entity() {
    let fs = MemoryFileSystem::new();
    let model = ApiModel::new("Acme")
        .with_entity(widget())
        .with_entity(Entity::new("Gadget").with_property(EntityProperty::primary_key("Id", "int")));

    service(&fs).scaffold(&model).unwrap();

    let routes = read(&fs, "/out/tests/Acme.FunctionalTests/TestUtilities/ApiRoutes.cs");
    assert_eq!(routes.matches("public class ApiRoutes").count(), 1);
    assert!(routes.contains("public static class Widgets"));
    assert!(routes.contains("public static class Gadgets"));
    assert!(routes.contains(r#"GetRecord = Base + "/gadgets/{id}";"#));
}

#[test]
fn rich_model_renders_every_template_completely() {
    let fs = MemoryFileSystem::new();
    let book = Entity::new("Book")
        .with_property(EntityProperty::primary_key("Id", "Guid"))
        .with_property(EntityProperty::new("Title", "string").filterable())
        .with_property(EntityProperty::new("AuthorId", "Guid").with_foreign_entity("Author"))
        .with_feature(Feature::AddRecord(FeatureAccess::protected()))
        .with_feature(Feature::GetRecord(FeatureAccess::protected()))
        .with_feature(Feature::GetList(FeatureAccess::public()))
        .with_feature(Feature::UpdateRecord(FeatureAccess::protected()))
        .with_feature(Feature::PatchRecord(FeatureAccess::public()))
        .with_feature(Feature::DeleteRecord(FeatureAccess::protected()))
        .with_feature(Feature::AddListByFk(BatchSpec::new("Author", "AuthorId")))
        .with_feature(Feature::AdHoc(mortise_core::domain::AdHocSpec {
            name: "ArchiveBooks".into(),
            access: FeatureAccess::public(),
        }));
    let model = ApiModel::new("Acme")
        .with_entity(book)
        .with_consumer(Consumer::new("AddToBook", "BookPublished", "Books").with_db());

    let report = service(&fs).scaffold(&model).unwrap();

    assert_eq!(report.warnings().count(), 0);
    for path in fs.list_files() {
        let text = read(&fs, &path);
        assert!(!text.contains("{{"), "{} has an unrendered placeholder", path.display());
    }

    let entity = read(&fs, format!("{API}/Domain/Books/Book.cs"));
    assert!(entity.contains("    [Key]\n    public Guid Id { get; set; }"));
    assert!(entity.contains("[Sieve(CanFilter = true, CanSort = false)]"));
    assert!(entity.contains(r#"[ForeignKey("Author")]"#));
    assert!(entity.contains("public Author Author { get; set; }"));

    let batch = read(&fs, format!("{API}/Domain/Books/Features/AddBookList.cs"));
    assert!(batch.contains("Guid AuthorId"));
    assert!(batch.contains("_db.Authors.AnyAsync"));

    assert!(fs.read_file(Path::new(&format!("{API}/Domain/Books/Features/ArchiveBooks.cs"))).is_some());
    assert!(
        fs.read_file(Path::new(
            "/out/tests/Acme.IntegrationTests/FeatureTests/Books/ArchiveBooksTests.cs"
        ))
        .is_none()
    );

    let read_dto = read(&fs, format!("{API}/Domain/Books/Dtos/BookDto.cs"));
    let manipulation = read(&fs, format!("{API}/Domain/Books/Dtos/BookForManipulationDto.cs"));
    assert!(read_dto.contains("public Guid Id { get; set; }"));
    assert!(!manipulation.contains("public Guid Id { get; set; }"));
    assert!(manipulation.contains("public string Title { get; set; }"));
}

#[test]
fn unrecognized_features_only_get_shared_steps() {
    let fs = MemoryFileSystem::new();
    let model: ApiModel = serde_json::from_str(
        r#"{
            "projectBaseName": "Acme",
            "entities": [{
                "name": "Widget",
                "properties": [{ "name": "Id", "type": "Guid", "isPrimaryKey": true }],
                "features": [{ "type": "Frobnicate" }]
            }]
        }"#,
    )
    .unwrap();

    let report = service(&fs).scaffold(&model).unwrap();

    assert!(fs.read_file(&entity_path()).is_some());
    // The controller is shared by every feature kind.
    let controller = read(&fs, controller_path());
    assert!(controller.contains("class WidgetsController"));
    assert!(!controller.contains("[Http"));
    assert!(report.created().any(|p| p == controller_path()));
    assert!(report.created().all(|p| !p.starts_with(format!("{API}/Domain/Widgets/Features"))));
    assert!(report.patched().all(|c| c.path() != controller_path()));
}

#[test]
fn ad_hoc_features_get_the_controller_and_their_command() {
    let fs = MemoryFileSystem::new();
    let model = model_with(vec![Feature::AdHoc(mortise_core::domain::AdHocSpec {
        name: "PublishWidget".into(),
        access: FeatureAccess::public(),
    })]);

    let report = service(&fs).scaffold(&model).unwrap();

    let command = PathBuf::from(format!("{API}/Domain/Widgets/Features/PublishWidget.cs"));
    assert!(read(&fs, &command).contains("PublishWidgetCommand"));
    assert!(position(&report, &controller_path(), true) < position(&report, &command, true));
    assert!(!read(&fs, controller_path()).contains("[Http"));
    assert!(report.patched().all(|c| c.path() != controller_path()));
}

#[test]
fn swagger_comments_document_each_endpoint() {
    let features = vec![
        Feature::GetRecord(FeatureAccess::protected()),
        Feature::AddRecord(FeatureAccess::public()),
    ];

    let fs = MemoryFileSystem::new();
    service(&fs).scaffold(&model_with(features.clone())).unwrap();
    assert!(!read(&fs, controller_path()).contains("<summary>"));

    let fs = MemoryFileSystem::new();
    let model = model_with(features).with_swagger_comments(true);
    service(&fs).scaffold(&model).unwrap();
    let controller = read(&fs, controller_path());

    assert_eq!(controller.matches("/// <summary>").count(), 2);
    assert!(controller.contains("/// Gets a single Widget by ID."));
    assert!(controller.contains(r#"/// <response code="201">Widget created.</response>"#));
    // Only the protected action documents 401.
    assert_eq!(controller.matches(r#"<response code="401">"#).count(), 1);
    let docs = controller.find("Gets a single Widget").unwrap();
    let policy = controller.find("[Authorize(").unwrap();
    assert!(docs < policy);
}

#[test]
fn batch_feature_without_parent_aborts_with_missing_field() {
    let fs = MemoryFileSystem::new();
    let model: ApiModel = serde_json::from_str(
        r#"{
            "projectBaseName": "Acme",
            "entities": [{
                "name": "Widget",
                "properties": [{ "name": "Id", "type": "Guid", "isPrimaryKey": true }],
                "features": [{ "type": "AddListByFk", "batchPropertyName": "GadgetId" }]
            }]
        }"#,
    )
    .unwrap();

    let err = service(&fs).scaffold(&model).unwrap_err();
    assert!(matches!(
        err,
        MortiseError::Domain(DomainError::MissingField { field: "parentEntity", .. })
    ));
    // Steps before the feature stay on disk.
    assert!(fs.read_file(&entity_path()).is_some());
}

#[test]
fn add_feature_reuses_the_controller() {
    let fs = MemoryFileSystem::new();
    let model = model_with(vec![Feature::GetRecord(FeatureAccess::public())]);
    let service = service(&fs);
    service.scaffold(&model).unwrap();

    let report = service
        .add_feature(&model, "Widget", &Feature::DeleteRecord(FeatureAccess::public()))
        .unwrap();

    assert!(report.created().all(|p| p != controller_path()));
    let text = read(&fs, controller_path());
    assert!(text.contains(r#"Name = "GetWidget""#));
    assert!(text.contains(r#"Name = "DeleteWidget""#));
    assert!(
        fs.read_file(Path::new(&format!("{API}/Domain/Widgets/Features/DeleteWidget.cs")))
            .is_some()
    );
}

#[test]
fn add_feature_to_unknown_entity_fails() {
    let fs = MemoryFileSystem::new();
    let err = service(&fs)
        .add_feature(
            &model_with(vec![]),
            "Gizmo",
            &Feature::GetRecord(FeatureAccess::public()),
        )
        .unwrap_err();
    assert_eq!(
        err,
        MortiseError::Domain(DomainError::UnknownEntity {
            name: "Gizmo".into()
        })
    );
}

#[test]
fn add_properties_patches_entity_and_dtos() {
    let fs = MemoryFileSystem::new();
    let model = model_with(vec![]);
    let service = service(&fs);
    service.scaffold(&model).unwrap();
    let creation_before = read(&fs, format!("{API}/Domain/Widgets/Dtos/WidgetForCreationDto.cs"));

    let report = service
        .add_properties(
            &model,
            "Widget",
            &[
                EntityProperty::new("Rating", "int"),
                EntityProperty::new("Secret", "string").read_only(),
            ],
        )
        .unwrap();

    assert_eq!(report.patched().count(), 3);
    let entity = read(&fs, entity_path());
    let marker = entity
        .lines()
        .position(|l| l.contains("add-on property marker"))
        .unwrap();
    let lines: Vec<_> = entity.lines().collect();
    assert_eq!(lines[marker + 1], "    public int Rating { get; set; }");

    let read_dto = read(&fs, format!("{API}/Domain/Widgets/Dtos/WidgetDto.cs"));
    assert!(read_dto.contains("public string Secret { get; set; }"));
    let manipulation = read(&fs, format!("{API}/Domain/Widgets/Dtos/WidgetForManipulationDto.cs"));
    assert!(manipulation.contains("public int Rating { get; set; }"));
    assert!(!manipulation.contains("Secret"));
    assert_eq!(
        read(&fs, format!("{API}/Domain/Widgets/Dtos/WidgetForCreationDto.cs")),
        creation_before
    );
}

#[test]
fn add_properties_before_scaffolding_touches_nothing() {
    let fs = MemoryFileSystem::new();
    let err = service(&fs)
        .add_properties(
            &model_with(vec![]),
            "Widget",
            &[EntityProperty::new("Rating", "int")],
        )
        .unwrap_err();

    assert!(matches!(
        err,
        MortiseError::Application(ApplicationError::DirectoryNotFound { .. })
    ));
    assert!(fs.list_files().is_empty());
}

#[test]
fn patching_swaps_through_a_temp_file() {
    let fs = MemoryFileSystem::new();
    let model = model_with(vec![]);
    let service = service(&fs);
    service.scaffold(&model).unwrap();
    fs.clear_journal();

    service
        .add_properties(&model, "Widget", &[EntityProperty::new("Rating", "int")])
        .unwrap();

    let journal = fs.journal();
    let entity = entity_path();
    let read_at = journal.iter().position(|op| *op == FsOp::Read(entity.clone())).unwrap();
    let Some(FsOp::Create(temp)) = journal.get(read_at + 1).cloned() else {
        panic!("expected a temp file after reading, got {journal:?}");
    };
    assert_eq!(temp.parent(), entity.parent());
    assert_eq!(journal[read_at + 2], FsOp::Remove(entity.clone()));
    assert_eq!(
        journal[read_at + 3],
        FsOp::Rename {
            from: temp,
            to: entity
        }
    );
}

#[test]
fn failed_temp_write_leaves_patch_target_untouched() {
    let seeded = MemoryFileSystem::new();
    let model = model_with(vec![]);
    service(&seeded).scaffold(&model).unwrap();
    let before = read(&seeded, entity_path());

    let fs = seeded.fail_creates_ending_with(".tmp");
    let err = service(&fs)
        .add_properties(&model, "Widget", &[EntityProperty::new("Rating", "int")])
        .unwrap_err();

    assert!(matches!(
        err,
        MortiseError::Application(ApplicationError::Filesystem { .. })
    ));
    assert_eq!(read(&fs, entity_path()), before);
}

#[test]
fn add_consumers_registers_each_consumer_once() {
    let fs = MemoryFileSystem::new();
    let service = service(&fs);
    let fixture = "/out/tests/Acme.IntegrationTests/TestFixture.cs";

    service
        .add_consumers(
            "AppDbContext",
            &[Consumer::new("AddToBook", "BookPublished", "Books").with_db()],
        )
        .unwrap();
    service
        .add_consumers(
            "AppDbContext",
            &[
                Consumer::new("NotifyReaders", "BookPublished", "Books"),
                Consumer::new("TrackSale", "BookSold", "Sales"),
            ],
        )
        .unwrap();

    let text = read(&fs, fixture);
    assert_eq!(text.matches("using Acme.Api.Domain.Books.Features;").count(), 1);
    assert_eq!(text.matches("using Acme.Api.Domain.Sales.Features;").count(), 1);
    for consumer in ["AddToBook", "NotifyReaders", "TrackSale"] {
        assert!(text.contains(&format!("cfg.AddConsumer<{consumer}>();")));
    }

    let lines: Vec<_> = text.lines().collect();
    let messaging = lines.iter().position(|l| *l == "using MassTransit;").unwrap();
    assert!(lines[messaging + 1].starts_with("using Acme.Api.Domain."));
    let registration = lines
        .iter()
        .position(|l| l.contains("Consumer Registration -- Do Not Delete Comment"))
        .unwrap();
    assert!(lines[registration + 1].contains("cfg.AddConsumer<"));

    let consumer = read(&fs, format!("{API}/Domain/Books/Features/AddToBook.cs"));
    assert!(consumer.contains("using Acme.Api.Databases;"));
    assert!(consumer.contains("private readonly AppDbContext _db;"));
    let plain = read(&fs, format!("{API}/Domain/Sales/Features/TrackSale.cs"));
    assert!(!plain.contains("_db"));
}
