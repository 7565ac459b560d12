//! Scaffold Service - main application orchestrator.
//!
//! Walks the model and, for every artifact, either renders and creates a
//! file or renders and patches one. Ordering is fixed:
//!
//! 1. entity → DTOs → validators → mapping profile
//! 2. route registration (routes file created if absent, then patched)
//! 3. per feature: controller (created if absent, for every feature kind)
//!    → command/query → endpoint patched into the controller → integration
//!    and functional tests. Ad-hoc features stop after their command;
//!    unrecognized ones after the controller.
//! 4. test fakes
//!
//! Every step completes before the next starts, because later steps patch
//! files that earlier steps create. The first error aborts the run; files
//! already written stay on disk and nothing is rolled back.

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::{
    application::{
        FileWriter, MarkerPatcher, ScaffoldReport, TemplateRenderer,
        error::ApplicationError,
        ports::{FileSystem, Patcher, TemplateProvider},
    },
    domain::{
        ApiModel, Consumer, DtoKind, Entity, EntityProperty, Feature, FeatureKind, MarkerRule,
        MarkerToken, PathCategory, PathResolver,
        artifacts::{
            Artifact, ConsumerPlan, EntityPlan, FeaturePlan, dto_property_nodes,
            entity_property_nodes, fixture_file,
        },
        naming::dto_name,
    },
    error::MortiseResult,
};

/// Main scaffolding service.
pub struct ScaffoldService {
    fs: Arc<dyn FileSystem>,
    renderer: TemplateRenderer,
    writer: FileWriter,
    patcher: Box<dyn Patcher>,
    resolver: PathResolver,
}

impl ScaffoldService {
    /// Create a service over the given adapters.
    ///
    /// Patching uses [`MarkerPatcher`] on the same file system; see
    /// [`Self::with_patcher`] to substitute another strategy.
    pub fn new(
        fs: Arc<dyn FileSystem>,
        templates: Box<dyn TemplateProvider>,
        resolver: PathResolver,
    ) -> Self {
        Self {
            renderer: TemplateRenderer::new(Arc::from(templates)),
            writer: FileWriter::new(Arc::clone(&fs)),
            patcher: Box::new(MarkerPatcher::new(Arc::clone(&fs))),
            fs,
            resolver,
        }
    }

    pub fn with_patcher(mut self, patcher: Box<dyn Patcher>) -> Self {
        self.patcher = patcher;
        self
    }

    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    /// Generate every file for every entity, then register the model's
    /// consumers.
    ///
    /// # Errors
    ///
    /// The first failure aborts the run:
    /// - `FileAlreadyExists` when any create-mode target is already present
    ///   (including on a second run against the same tree)
    /// - `MissingField` / `MissingParameter` for incomplete model elements or
    ///   template bodies
    #[instrument(
        skip_all,
        fields(
            project = %model.project_base_name,
            entities = model.entities.len(),
            root = %self.resolver.layout().root.display()
        )
    )]
    pub fn scaffold(&self, model: &ApiModel) -> MortiseResult<ScaffoldReport> {
        info!("Scaffolding {} entities", model.entities.len());
        let mut report = ScaffoldReport::new();

        for entity in &model.entities {
            self.scaffold_entity(model, entity, &mut report)?;
        }

        if !model.consumers.is_empty() {
            self.register_consumers(&model.db_context_name, &model.consumers, &mut report)?;
        }

        info!(files = report.len(), "Scaffold completed successfully");
        Ok(report)
    }

    /// Add one feature to an entity that was scaffolded earlier.
    #[instrument(skip_all, fields(entity = %entity_name))]
    pub fn add_feature(
        &self,
        model: &ApiModel,
        entity_name: &str,
        feature: &Feature,
    ) -> MortiseResult<ScaffoldReport> {
        let entity = model.entity(entity_name)?;
        let plan = self.entity_plan(model, entity)?;
        let mut report = ScaffoldReport::new();
        self.scaffold_feature(&plan, feature, &mut report)?;
        Ok(report)
    }

    /// Append properties to an existing entity and its read and
    /// manipulation DTOs.
    ///
    /// Only the entity's name and plural are taken from the model; the
    /// properties to add are passed explicitly.
    ///
    /// # Errors
    ///
    /// `FileNotFound` / `DirectoryNotFound` when the entity was never
    /// scaffolded. Nothing is patched in that case.
    #[instrument(skip_all, fields(entity = %entity_name, properties = properties.len()))]
    pub fn add_properties(
        &self,
        model: &ApiModel,
        entity_name: &str,
        properties: &[EntityProperty],
    ) -> MortiseResult<ScaffoldReport> {
        let entity = model.entity(entity_name)?;
        let mut report = ScaffoldReport::new();
        if properties.is_empty() {
            return Ok(report);
        }

        let plural = entity.plural();
        let name = &entity.name;
        let targets = [
            (
                self.resolver.resolve(PathCategory::Entity, &plural, name),
                entity_property_nodes(properties),
                "\n\n",
            ),
            (
                self.resolver
                    .resolve(PathCategory::Dto, &plural, &dto_name(name, DtoKind::Read)),
                dto_property_nodes(properties, DtoKind::Read),
                "\n",
            ),
            (
                self.resolver.resolve(
                    PathCategory::Dto,
                    &plural,
                    &dto_name(name, DtoKind::Manipulation),
                ),
                dto_property_nodes(properties, DtoKind::Manipulation),
                "\n",
            ),
        ];

        // Render everything first so a template error cannot leave the
        // entity patched but its DTOs not.
        let mut rendered = Vec::with_capacity(targets.len());
        for (path, nodes, separator) in &targets {
            if nodes.is_empty() {
                continue;
            }
            rendered.push((path, self.renderer.render_all(nodes, separator)?));
        }

        for (path, text) in rendered {
            let rule = MarkerRule::after_token(MarkerToken::PropertyAddOn, insertion(text));
            self.patch(path.full_path(), vec![rule], &mut report)?;
        }
        Ok(report)
    }

    /// Create consumer classes and register them in the integration-test
    /// fixture.
    #[instrument(skip_all, fields(consumers = consumers.len()))]
    pub fn add_consumers(
        &self,
        db_context: &str,
        consumers: &[Consumer],
    ) -> MortiseResult<ScaffoldReport> {
        let mut report = ScaffoldReport::new();
        self.register_consumers(db_context, consumers, &mut report)?;
        Ok(report)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn entity_plan<'a>(
        &'a self,
        model: &ApiModel,
        entity: &'a Entity,
    ) -> MortiseResult<EntityPlan<'a>> {
        let plan = EntityPlan::new(&self.resolver, &model.db_context_name, entity)?;
        Ok(plan.with_swagger_comments(model.add_swagger_comments))
    }

    fn scaffold_entity(
        &self,
        model: &ApiModel,
        entity: &Entity,
        report: &mut ScaffoldReport,
    ) -> MortiseResult<()> {
        info!(entity = %entity.name, features = entity.features.len(), "Scaffolding entity");
        let plan = self.entity_plan(model, entity)?;

        self.create(&plan.entity_file(), report)?;
        for artifact in plan.dto_files() {
            self.create(&artifact, report)?;
        }
        for artifact in plan.validator_files() {
            self.create(&artifact, report)?;
        }
        self.create(&plan.profile_file(), report)?;

        self.register_routes(&plan, report)?;

        for feature in &entity.features {
            self.scaffold_feature(&plan, feature, report)?;
        }

        for artifact in plan.fake_files() {
            self.create(&artifact, report)?;
        }
        Ok(())
    }

    fn register_routes(&self, plan: &EntityPlan<'_>, report: &mut ScaffoldReport) -> MortiseResult<()> {
        let routes = plan.routes_file();
        self.create_if_absent(&routes, report)?;

        let block = self.renderer.render(&plan.routes_block())?;
        let rule = MarkerRule::after_token(MarkerToken::ApiRoutes, insertion(block));
        self.patch(routes.path.full_path(), vec![rule], report)
    }

    fn scaffold_feature(
        &self,
        plan: &EntityPlan<'_>,
        feature: &Feature,
        report: &mut ScaffoldReport,
    ) -> MortiseResult<()> {
        // Shared by every feature kind, unrecognized ones included.
        let controller = plan.controller_file();
        self.create_if_absent(&controller, report)?;

        let Some(feature_plan) = FeaturePlan::new(plan, feature)? else {
            debug!(entity = %plan.entity().name, "Unrecognized feature type; shared steps only");
            return Ok(());
        };
        debug!(feature = %feature_plan.class_name(), kind = %feature_plan.kind(), "Scaffolding feature");

        self.create(&feature_plan.request_file(), report)?;
        if feature_plan.kind() == FeatureKind::AdHoc {
            return Ok(());
        }

        if let Some(endpoint) = feature_plan.endpoint() {
            let text = self.renderer.render(&endpoint)?;
            let rule = MarkerRule::after_token(MarkerToken::ControllerEndpoint, insertion(text));
            self.patch(controller.path.full_path(), vec![rule], report)?;
        }

        self.create(&feature_plan.integration_test_file(), report)?;
        self.create(&feature_plan.functional_test_file(), report)
    }

    fn register_consumers(
        &self,
        db_context: &str,
        consumers: &[Consumer],
        report: &mut ScaffoldReport,
    ) -> MortiseResult<()> {
        if consumers.is_empty() {
            return Ok(());
        }

        let plans: Vec<_> = consumers
            .iter()
            .map(|c| ConsumerPlan::new(&self.resolver, db_context, c))
            .collect();

        for plan in &plans {
            self.create(&plan.consumer_file(), report)?;
        }

        let fixture = fixture_file(&self.resolver, db_context);
        self.create_if_absent(&fixture, report)?;
        let existing = self.read_to_string(fixture.path.full_path())?;

        let registrations: Vec<_> = plans.iter().map(ConsumerPlan::registration).collect();
        let mut rules = vec![MarkerRule::after_token(
            MarkerToken::ConsumerRegistration,
            insertion(self.renderer.render_all(&registrations, "\n")?),
        )];

        // One `using` per namespace the fixture does not mention yet.
        let mut namespaces: Vec<String> = Vec::new();
        let mut usings = Vec::new();
        for plan in &plans {
            let namespace = plan.namespace();
            if existing.contains(&format!("using {namespace};")) || namespaces.contains(&namespace) {
                continue;
            }
            usings.push(plan.using_directive());
            namespaces.push(namespace);
        }
        if !usings.is_empty() {
            rules.push(MarkerRule::after_token(
                MarkerToken::MessagingUsing,
                insertion(self.renderer.render_all(&usings, "\n")?),
            ));
        }

        self.patch(fixture.path.full_path(), rules, report)
    }

    /// Render and create; fails if the file exists.
    fn create(&self, artifact: &Artifact, report: &mut ScaffoldReport) -> MortiseResult<()> {
        let text = self.renderer.render(&artifact.tree)?;
        let path = artifact.path.full_path();
        self.writer.create(path, &text)?;
        report.record_created(path);
        Ok(())
    }

    /// Render and create unless the file is already there.
    fn create_if_absent(&self, artifact: &Artifact, report: &mut ScaffoldReport) -> MortiseResult<()> {
        let path = artifact.path.full_path();
        let text = self.renderer.render(&artifact.tree)?;
        if self.writer.create_if_absent(path, &text)? {
            report.record_created(path);
        } else {
            debug!(path = %path.display(), "Reusing existing file");
        }
        Ok(())
    }

    fn patch(
        &self,
        path: &Path,
        rules: Vec<MarkerRule>,
        report: &mut ScaffoldReport,
    ) -> MortiseResult<()> {
        let outcome = self.patcher.patch(path, &rules)?;
        report.record_patch(outcome);
        Ok(())
    }

    fn read_to_string(&self, path: &Path) -> MortiseResult<String> {
        let mut content = String::new();
        self.fs
            .open_read(path)?
            .read_to_string(&mut content)
            .map_err(|e| ApplicationError::filesystem(path, e))?;
        Ok(content)
    }
}

/// Insertions become whole lines; the patcher supplies the terminator.
fn insertion(text: String) -> String {
    text.trim_end_matches(['\n', '\r']).to_string()
}

impl std::fmt::Debug for ScaffoldService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScaffoldService")
            .field("resolver", &self.resolver)
            .finish_non_exhaustive()
    }
}
