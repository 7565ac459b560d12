//! Per-feature artifacts: controller, command or query, endpoint, tests.

use crate::domain::entities::Feature;
use crate::domain::error::DomainError;
use crate::domain::naming::{
    feature_class_name, lowercase_first_letter, pluralize, request_record_name,
    route_name, test_class_name,
};
use crate::domain::template::{RenderContext, TemplateId, TemplateNode};
use crate::domain::value_objects::{FeatureKind, PathCategory};

use super::{Artifact, EntityPlan};

/// Names and parameters for one feature of one entity.
#[derive(Debug, Clone)]
pub struct FeaturePlan<'p, 'a> {
    entity: &'p EntityPlan<'a>,
    feature: &'p Feature,
    kind: FeatureKind,
    class: String,
    params: RenderContext,
}

impl<'p, 'a> FeaturePlan<'p, 'a> {
    /// `Ok(None)` for [`Feature::Unrecognized`], which has nothing to render.
    ///
    /// # Errors
    ///
    /// `DomainError::MissingField` when an `AddListByFk` feature lacks its
    /// parent entity, batch property name, or a resolvable batch type.
    pub fn new(
        entity: &'p EntityPlan<'a>,
        feature: &'p Feature,
    ) -> Result<Option<Self>, DomainError> {
        let Some(kind) = feature.kind() else {
            return Ok(None);
        };

        let model = entity.entity();
        let subject = match feature {
            Feature::AdHoc(spec) => spec.name.as_str(),
            _ => model.name.as_str(),
        };
        let class = feature_class_name(kind, subject);

        let mut params = RenderContext::new()
            .with("FEATURE", class.as_str())
            .with("RECORD", request_record_name(kind, subject))
            .with("ROUTE_NAME", route_name(kind, subject, entity.plural()))
            .with("ROUTE_CONST", route_constant(kind))
            .with("HTTP_METHOD", http_method(kind))
            .with(
                "PERMISSION",
                feature.permission_name(model).unwrap_or_default(),
            );

        if let Feature::AddListByFk(spec) = feature {
            let parent = spec.parent(model)?;
            let property = spec.property_name(model)?;
            params.set("PARENT_ENTITY", parent);
            params.set("PARENT_PLURAL", pluralize(parent));
            params.set("BATCH_PROPERTY_NAME", property);
            params.set("BATCH_PROPERTY_TYPE", spec.property_type(model)?);
            params.set("BATCH_PARAM", lowercase_first_letter(property));
        }

        Ok(Some(Self {
            entity,
            feature,
            kind,
            class,
            params,
        }))
    }

    pub fn kind(&self) -> FeatureKind {
        self.kind
    }

    pub fn class_name(&self) -> &str {
        &self.class
    }

    fn artifact(&self, category: PathCategory, class_name: &str, tree: TemplateNode) -> Artifact {
        self.entity
            .artifact(category, class_name, tree.with_params(&self.params))
    }

    /// The command or query class handling this feature.
    pub fn request_file(&self) -> Artifact {
        let id = match self.kind {
            FeatureKind::GetRecord => TemplateId::QueryGetRecord,
            FeatureKind::GetList => TemplateId::QueryGetList,
            FeatureKind::AddRecord => TemplateId::CommandAddRecord,
            FeatureKind::AddListByFk => TemplateId::CommandAddList,
            FeatureKind::UpdateRecord => TemplateId::CommandUpdateRecord,
            FeatureKind::PatchRecord => TemplateId::CommandPatchRecord,
            FeatureKind::DeleteRecord => TemplateId::CommandDeleteRecord,
            FeatureKind::AdHoc => TemplateId::AdHocFeature,
        };
        self.artifact(PathCategory::Feature, &self.class, TemplateNode::new(id))
    }

    /// Controller action for this feature. `None` for ad-hoc commands.
    ///
    /// Authorization attributes are a child that only exists when the
    /// feature is protected.
    pub fn endpoint(&self) -> Option<TemplateNode> {
        let id = match self.kind {
            FeatureKind::GetRecord => TemplateId::EndpointGetRecord,
            FeatureKind::GetList => TemplateId::EndpointGetList,
            FeatureKind::AddRecord => TemplateId::EndpointAddRecord,
            FeatureKind::AddListByFk => TemplateId::EndpointAddList,
            FeatureKind::UpdateRecord => TemplateId::EndpointUpdateRecord,
            FeatureKind::PatchRecord => TemplateId::EndpointPatchRecord,
            FeatureKind::DeleteRecord => TemplateId::EndpointDeleteRecord,
            FeatureKind::AdHoc => return None,
        };

        let protected = self.feature.is_protected();
        let permission = self.params.get("PERMISSION").unwrap_or_default().to_string();
        let node = TemplateNode::new(id)
            .when(self.entity.swagger_comments(), "DOCS", || self.docs(protected))
            .when(protected, "AUTH", || {
                TemplateNode::new(TemplateId::AuthAttributes).param("PERMISSION", permission)
            })
            .with_params(&self.params)
            .with_params(self.entity.shared());
        Some(node)
    }

    /// Doc comment for the controller action; protected actions also
    /// document 401 and 403.
    fn docs(&self, protected: bool) -> TemplateNode {
        let entity = &self.entity.entity().name;
        let plural = self.entity.plural();
        let (summary, status, status_text) = match self.kind {
            FeatureKind::AddRecord => (
                format!("Creates a new {entity} record."),
                "201",
                format!("{entity} created."),
            ),
            FeatureKind::AddListByFk => (
                format!("Creates one or more {entity} records."),
                "201",
                format!("{entity} List created."),
            ),
            FeatureKind::GetRecord => (
                format!("Gets a single {entity} by ID."),
                "200",
                format!("{entity} record returned successfully."),
            ),
            FeatureKind::GetList => (
                format!("Gets a list of all {plural}."),
                "200",
                format!("{entity} list returned successfully."),
            ),
            FeatureKind::UpdateRecord => (
                format!("Updates an entire existing {entity}."),
                "204",
                format!("{entity} updated."),
            ),
            FeatureKind::PatchRecord => (
                format!("Updates specific properties on an existing {entity}."),
                "204",
                format!("{entity} updated."),
            ),
            FeatureKind::DeleteRecord => (
                format!("Deletes an existing {entity} record."),
                "204",
                format!("{entity} deleted."),
            ),
            FeatureKind::AdHoc => (
                format!("Runs {}.", self.class),
                "200",
                "Request handled.".to_string(),
            ),
        };

        TemplateNode::new(TemplateId::EndpointDocs)
            .param("DOC_SUMMARY", summary)
            .param("DOC_STATUS", status)
            .param("DOC_STATUS_TEXT", status_text)
            .when(protected, "DOC_AUTH", || {
                TemplateNode::new(TemplateId::EndpointDocsAuth)
            })
    }

    /// Handler-level test run against the test database.
    pub fn integration_test_file(&self) -> Artifact {
        let class = test_class_name(&self.class);
        let tree =
            TemplateNode::new(TemplateId::IntegrationTest).param("TEST_CLASS", class.as_str());
        self.artifact(PathCategory::IntegrationTest, &class, tree)
    }

    /// HTTP-level test; protected features also get unauthorized and
    /// forbidden cases.
    pub fn functional_test_file(&self) -> Artifact {
        let class = test_class_name(&self.class);
        let params = &self.params;
        let shared = self.entity.shared();
        let tree = TemplateNode::new(TemplateId::FunctionalTest)
            .param("TEST_CLASS", class.as_str())
            .when(self.feature.is_protected(), "AUTH_TESTS", || {
                TemplateNode::new(TemplateId::FunctionalAuthTests)
                    .with_params(params)
                    .with_params(shared)
            });
        self.artifact(PathCategory::FunctionalTest, &class, tree)
    }
}

/// Member of the entity's route class the functional test calls.
fn route_constant(kind: FeatureKind) -> &'static str {
    match kind {
        FeatureKind::GetRecord => "GetRecord",
        FeatureKind::GetList => "GetList",
        FeatureKind::AddRecord => "Create",
        FeatureKind::AddListByFk => "CreateBatch",
        FeatureKind::UpdateRecord => "Put",
        FeatureKind::PatchRecord => "Patch",
        FeatureKind::DeleteRecord => "Delete",
        FeatureKind::AdHoc => "",
    }
}

fn http_method(kind: FeatureKind) -> &'static str {
    match kind {
        FeatureKind::GetRecord | FeatureKind::GetList => "Get",
        FeatureKind::AddRecord | FeatureKind::AddListByFk | FeatureKind::AdHoc => "Post",
        FeatureKind::UpdateRecord => "Put",
        FeatureKind::PatchRecord => "Patch",
        FeatureKind::DeleteRecord => "Delete",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{AdHocSpec, BatchSpec, Entity, EntityProperty, FeatureAccess};
    use crate::domain::paths::{PathResolver, SolutionLayout};
    use std::path::Path;

    fn resolver() -> PathResolver {
        PathResolver::new(SolutionLayout::new("/out", "Acme"))
    }

    fn widget() -> Entity {
        Entity::new("Widget").with_property(EntityProperty::primary_key("Id", "Guid"))
    }

    #[test]
    fn unrecognized_feature_has_no_plan() {
        let r = resolver();
        let entity = widget();
        let plan = EntityPlan::new(&r, "AppDbContext", &entity).unwrap();
        assert!(FeaturePlan::new(&plan, &Feature::Unrecognized).unwrap().is_none());
    }

    #[test]
    fn get_record_names_and_paths() {
        let r = resolver();
        let entity = widget();
        let plan = EntityPlan::new(&r, "AppDbContext", &entity).unwrap();
        let feature = Feature::GetRecord(FeatureAccess::public());
        let fp = FeaturePlan::new(&plan, &feature).unwrap().unwrap();

        assert_eq!(fp.class_name(), "GetWidget");
        assert_eq!(
            fp.request_file().path.full_path(),
            Path::new("/out/src/Acme.Api/Domain/Widgets/Features/GetWidget.cs")
        );
        let endpoint = fp.endpoint().unwrap();
        assert_eq!(endpoint.params().get("ROUTE_NAME"), Some("GetWidget"));
        assert_eq!(endpoint.render_order(), vec![TemplateId::EndpointGetRecord]);
    }

    #[test]
    fn protected_endpoint_nests_auth_attributes() {
        let r = resolver();
        let entity = widget();
        let plan = EntityPlan::new(&r, "AppDbContext", &entity).unwrap();
        let feature = Feature::DeleteRecord(FeatureAccess::protected());
        let fp = FeaturePlan::new(&plan, &feature).unwrap().unwrap();

        let endpoint = fp.endpoint().unwrap();
        assert_eq!(
            endpoint.render_order(),
            vec![TemplateId::AuthAttributes, TemplateId::EndpointDeleteRecord]
        );
        assert_eq!(
            fp.functional_test_file().tree.render_order(),
            vec![TemplateId::FunctionalAuthTests, TemplateId::FunctionalTest]
        );
    }

    #[test]
    fn swagger_comments_are_opt_in() {
        let r = resolver();
        let entity = widget();
        let feature = Feature::GetList(FeatureAccess::protected());

        let plain = EntityPlan::new(&r, "AppDbContext", &entity).unwrap();
        let fp = FeaturePlan::new(&plain, &feature).unwrap().unwrap();
        assert!(!fp.endpoint().unwrap().render_order().contains(&TemplateId::EndpointDocs));

        let documented = plain.clone().with_swagger_comments(true);
        let fp = FeaturePlan::new(&documented, &feature).unwrap().unwrap();
        let endpoint = fp.endpoint().unwrap();
        assert_eq!(
            endpoint.render_order(),
            vec![
                TemplateId::EndpointDocsAuth,
                TemplateId::EndpointDocs,
                TemplateId::AuthAttributes,
                TemplateId::EndpointGetList,
            ]
        );
    }

    #[test]
    fn batch_feature_without_parent_fails() {
        let r = resolver();
        let entity = widget();
        let plan = EntityPlan::new(&r, "AppDbContext", &entity).unwrap();
        let feature = Feature::AddListByFk(BatchSpec::new("", "RecipeId"));
        assert!(matches!(
            FeaturePlan::new(&plan, &feature),
            Err(DomainError::MissingField { field: "parentEntity", .. })
        ));
    }

    #[test]
    fn ad_hoc_has_no_endpoint() {
        let r = resolver();
        let entity = widget();
        let plan = EntityPlan::new(&r, "AppDbContext", &entity).unwrap();
        let feature = Feature::AdHoc(AdHocSpec {
            name: "PublishWidget".into(),
            access: FeatureAccess::public(),
        });
        let fp = FeaturePlan::new(&plan, &feature).unwrap().unwrap();
        assert!(fp.endpoint().is_none());
        assert_eq!(fp.request_file().path.class_name(), "PublishWidget");
        assert_eq!(fp.request_file().tree.params().get("RECORD"), Some("PublishWidgetCommand"));
    }
}
