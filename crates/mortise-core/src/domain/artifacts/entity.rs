//! Per-entity artifacts: entity class, DTOs, validators, mapping profile,
//! route registration and test fakes.

use crate::domain::entities::{Entity, EntityProperty};
use crate::domain::error::DomainError;
use crate::domain::naming::{
    controller_name, dto_name, fake_name, lowercase_first_letter, profile_name, validator_name,
};
use crate::domain::paths::PathResolver;
use crate::domain::template::{RenderContext, TemplateId, TemplateNode};
use crate::domain::value_objects::{DtoKind, PathCategory, ValidatorKind};

use super::Artifact;

/// Everything derived from one entity, computed once per run.
#[derive(Debug, Clone)]
pub struct EntityPlan<'a> {
    resolver: &'a PathResolver,
    entity: &'a Entity,
    plural: String,
    shared: RenderContext,
    swagger_comments: bool,
}

impl<'a> EntityPlan<'a> {
    /// # Errors
    ///
    /// `DomainError::MissingField` if the entity has no primary key.
    pub fn new(
        resolver: &'a PathResolver,
        db_context: &str,
        entity: &'a Entity,
    ) -> Result<Self, DomainError> {
        let pk = entity.primary_key()?;
        let plural = entity.plural();
        let name = entity.name.as_str();

        let shared = RenderContext::new()
            .with("PROJECT", resolver.layout().project_base_name.as_str())
            .with("DB_CONTEXT", db_context)
            .with("DB_NAMESPACE", resolver.namespace(PathCategory::DbContext, ""))
            .with("ENTITY", name)
            .with("ENTITY_PLURAL", plural.as_str())
            .with("ENTITY_LOWER", lowercase_first_letter(name))
            .with("LAMBDA", entity.lambda())
            .with("ROUTE", plural.to_lowercase())
            .with("PK_NAME", pk.member_name())
            .with("PK_TYPE", pk.ty.as_str())
            .with("PK_PARAM", lowercase_first_letter(&pk.name))
            .with("ENTITY_NAMESPACE", resolver.namespace(PathCategory::Entity, &plural))
            .with("DTO_NAMESPACE", resolver.namespace(PathCategory::Dto, &plural))
            .with("FEATURE_NAMESPACE", resolver.namespace(PathCategory::Feature, &plural))
            .with("FAKES_NAMESPACE", resolver.namespace(PathCategory::TestFakes, name))
            .with("ROUTES_NAMESPACE", resolver.namespace(PathCategory::TestRoutes, ""))
            .with("READ_DTO", dto_name(name, DtoKind::Read))
            .with("CREATION_DTO", dto_name(name, DtoKind::Creation))
            .with("UPDATE_DTO", dto_name(name, DtoKind::Update))
            .with("MANIPULATION_DTO", dto_name(name, DtoKind::Manipulation));

        Ok(Self {
            resolver,
            entity,
            plural,
            shared,
            swagger_comments: false,
        })
    }

    /// Emit XML doc comments above controller actions.
    pub fn with_swagger_comments(mut self, enabled: bool) -> Self {
        self.swagger_comments = enabled;
        self
    }

    pub fn swagger_comments(&self) -> bool {
        self.swagger_comments
    }

    pub fn entity(&self) -> &'a Entity {
        self.entity
    }

    pub fn plural(&self) -> &str {
        &self.plural
    }

    pub fn resolver(&self) -> &'a PathResolver {
        self.resolver
    }

    /// Parameters every tree for this entity receives.
    pub fn shared(&self) -> &RenderContext {
        &self.shared
    }

    /// Grouping key the resolver expects for `category`.
    pub(crate) fn item(&self, category: PathCategory) -> &str {
        match category {
            PathCategory::TestFakes => &self.entity.name,
            _ => &self.plural,
        }
    }

    pub(crate) fn artifact(
        &self,
        category: PathCategory,
        class_name: &str,
        tree: TemplateNode,
    ) -> Artifact {
        let path = self
            .resolver
            .resolve(category, self.item(category), class_name);
        let tree = tree
            .param("NAMESPACE", path.module_id())
            .with_params(&self.shared);
        Artifact::new(path, tree)
    }

    // ── Files ─────────────────────────────────────────────────────────────

    pub fn entity_file(&self) -> Artifact {
        let tree = TemplateNode::new(TemplateId::Entity).list(
            "PROPERTIES",
            entity_property_nodes(&self.entity.properties),
            "\n\n",
        );
        self.artifact(PathCategory::Entity, &self.entity.name, tree)
    }

    /// Read, manipulation, creation and update DTOs, in that order.
    pub fn dto_files(&self) -> Vec<Artifact> {
        let name = &self.entity.name;
        let base = dto_name(name, DtoKind::Manipulation);

        DtoKind::ALL
            .iter()
            .map(|&kind| {
                let class = dto_name(name, kind);
                let tree = match kind {
                    DtoKind::Read | DtoKind::Manipulation => {
                        let id = if kind == DtoKind::Read {
                            TemplateId::ReadDto
                        } else {
                            TemplateId::ManipulationDto
                        };
                        TemplateNode::new(id).list(
                            "PROPERTIES",
                            dto_property_nodes(&self.entity.properties, kind),
                            "\n",
                        )
                    }
                    DtoKind::Creation | DtoKind::Update => {
                        TemplateNode::new(TemplateId::DerivedDto).param("BASE_DTO", base.as_str())
                    }
                };
                self.artifact(PathCategory::Dto, &class, tree.param("DTO", class.as_str()))
            })
            .collect()
    }

    /// Manipulation validator first; the creation and update validators
    /// derive from it.
    pub fn validator_files(&self) -> Vec<Artifact> {
        let name = &self.entity.name;
        let base = validator_name(name, ValidatorKind::Manipulation);

        ValidatorKind::ALL
            .iter()
            .map(|&kind| {
                let class = validator_name(name, kind);
                let tree = match kind {
                    ValidatorKind::Manipulation => {
                        TemplateNode::new(TemplateId::ManipulationValidator)
                    }
                    _ => TemplateNode::new(TemplateId::DerivedValidator)
                        .param("BASE_VALIDATOR", base.as_str()),
                };
                let tree = tree
                    .param("VALIDATOR", class.as_str())
                    .param("DTO", dto_name(name, kind.dto()));
                self.artifact(PathCategory::Validator, &class, tree)
            })
            .collect()
    }

    pub fn profile_file(&self) -> Artifact {
        let class = profile_name(&self.entity.name);
        let tree = TemplateNode::new(TemplateId::Profile).param("PROFILE", class.as_str());
        self.artifact(PathCategory::Profile, &class, tree)
    }

    /// Controller for the entity. Every feature lands in the same file.
    pub fn controller_file(&self) -> Artifact {
        let class = controller_name(&self.plural);
        let tree = TemplateNode::new(TemplateId::Controller).param("CONTROLLER", class.as_str());
        self.artifact(PathCategory::Controller, &class, tree)
    }

    /// Shared functional-test route registry; created once per solution.
    pub fn routes_file(&self) -> Artifact {
        self.artifact(
            PathCategory::TestRoutes,
            "ApiRoutes",
            TemplateNode::new(TemplateId::ApiRoutes),
        )
    }

    /// Route constants for this entity, patched into [`Self::routes_file`].
    pub fn routes_block(&self) -> TemplateNode {
        TemplateNode::new(TemplateId::EntityRoutes).with_params(&self.shared)
    }

    /// Faker builders for the entity and its creation and update DTOs.
    pub fn fake_files(&self) -> Vec<Artifact> {
        let name = &self.entity.name;
        let entity_ns = self.resolver.namespace(PathCategory::Entity, &self.plural);
        let dto_ns = self.resolver.namespace(PathCategory::Dto, &self.plural);

        let targets = [
            (format!("Fake{name}"), name.clone(), entity_ns),
            (
                fake_name(name, DtoKind::Creation),
                dto_name(name, DtoKind::Creation),
                dto_ns.clone(),
            ),
            (
                fake_name(name, DtoKind::Update),
                dto_name(name, DtoKind::Update),
                dto_ns,
            ),
        ];

        targets
            .into_iter()
            .map(|(fake, target, namespace)| {
                let tree = TemplateNode::new(TemplateId::Fake)
                    .param("FAKE", fake.as_str())
                    .param("TARGET", target)
                    .param("TARGET_NAMESPACE", namespace);
                self.artifact(PathCategory::TestFakes, &fake, tree)
            })
            .collect()
    }
}

/// Entity members for `properties`; also the insertion text when
/// properties are added to an existing entity.
pub fn entity_property_nodes(properties: &[EntityProperty]) -> Vec<TemplateNode> {
    properties.iter().map(entity_property_node).collect()
}

/// Foreign keys render both the scalar key and the navigation member.
fn entity_property_node(property: &EntityProperty) -> TemplateNode {
    let node = match &property.foreign_entity_name {
        Some(foreign) => TemplateNode::new(TemplateId::EntityForeignKeyProperty)
            .param("FOREIGN_ENTITY", foreign.as_str()),
        None => TemplateNode::new(TemplateId::EntityProperty),
    };
    node.param("ATTRIBUTES", property_attributes(property))
        .param("TYPE", property.ty.as_str())
        .param("NAME", property.member_name())
}

fn property_attributes(property: &EntityProperty) -> String {
    let mut lines = String::new();
    if property.is_primary_key {
        lines.push_str("    [Key]\n");
    }
    if property.can_filter || property.can_sort {
        lines.push_str(&format!(
            "    [Sieve(CanFilter = {}, CanSort = {})]\n",
            property.can_filter, property.can_sort
        ));
    }
    lines
}

/// Read DTOs carry every property; writable DTOs only manipulable ones.
pub fn dto_property_nodes(properties: &[EntityProperty], kind: DtoKind) -> Vec<TemplateNode> {
    properties
        .iter()
        .filter(|p| kind == DtoKind::Read || p.is_manipulable())
        .map(|p| {
            TemplateNode::new(TemplateId::DtoProperty)
                .param("TYPE", p.ty.as_str())
                .param("NAME", p.member_name())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::paths::SolutionLayout;
    use crate::domain::template::Slot;
    use std::path::Path;

    fn widget() -> Entity {
        Entity::new("Widget")
            .with_property(EntityProperty::primary_key("Id", "Guid"))
            .with_property(EntityProperty::new("Title", "string").filterable())
            .with_property(EntityProperty::new("CategoryId", "Guid").with_foreign_entity("Category"))
    }

    fn resolver() -> PathResolver {
        PathResolver::new(SolutionLayout::new("/out", "Acme"))
    }

    #[test]
    fn controller_is_named_after_the_plural() {
        let r = resolver();
        let entity = widget();
        let plan = EntityPlan::new(&r, "AppDbContext", &entity).unwrap();
        assert_eq!(
            plan.controller_file().path.full_path(),
            Path::new("/out/src/Acme.Api/Controllers/v1/WidgetsController.cs")
        );
    }

    #[test]
    fn requires_a_primary_key() {
        let r = resolver();
        let entity = Entity::new("Widget");
        assert!(EntityPlan::new(&r, "AppDbContext", &entity).is_err());
    }

    #[test]
    fn entity_tree_includes_navigation_for_foreign_keys() {
        let r = resolver();
        let entity = widget();
        let plan = EntityPlan::new(&r, "AppDbContext", &entity).unwrap();
        let file = plan.entity_file();

        assert_eq!(
            file.path.full_path(),
            Path::new("/out/src/Acme.Api/Domain/Widgets/Widget.cs")
        );
        assert_eq!(
            file.tree.render_order(),
            vec![
                TemplateId::EntityProperty,
                TemplateId::EntityProperty,
                TemplateId::EntityForeignKeyProperty,
                TemplateId::Entity,
            ]
        );
        assert_eq!(file.tree.params().get("NAMESPACE"), Some("Acme.Api.Domain.Widgets"));
    }

    #[test]
    fn dtos_come_in_dependency_order() {
        let r = resolver();
        let entity = widget();
        let plan = EntityPlan::new(&r, "AppDbContext", &entity).unwrap();
        let names: Vec<_> = plan
            .dto_files()
            .iter()
            .map(|a| a.path.class_name().to_string())
            .collect();
        assert_eq!(
            names,
            [
                "WidgetDto",
                "WidgetForManipulationDto",
                "WidgetForCreationDto",
                "WidgetForUpdateDto"
            ]
        );
    }

    #[test]
    fn writable_dtos_skip_the_primary_key() {
        let r = resolver();
        let entity = widget();
        let plan = EntityPlan::new(&r, "AppDbContext", &entity).unwrap();
        let dtos = plan.dto_files();

        let count = |artifact: &Artifact| match &artifact.tree.slots()[0].1 {
            Slot::List { nodes, .. } => nodes.len(),
            _ => 0,
        };
        assert_eq!(count(&dtos[0]), 3);
        assert_eq!(count(&dtos[1]), 2);
    }

    #[test]
    fn fakes_live_under_the_entity_name() {
        let r = resolver();
        let entity = widget();
        let plan = EntityPlan::new(&r, "AppDbContext", &entity).unwrap();
        let fakes = plan.fake_files();
        assert_eq!(fakes.len(), 3);
        assert_eq!(
            fakes[1].path.full_path(),
            Path::new("/out/tests/Acme.SharedTestHelpers/Fakes/Widget/FakeWidgetForCreationDto.cs")
        );
    }

    #[test]
    fn primary_key_gets_key_attribute() {
        let attrs = property_attributes(&EntityProperty::primary_key("Id", "Guid"));
        assert_eq!(attrs, "    [Key]\n");
        let attrs = property_attributes(&EntityProperty::new("Title", "string"));
        assert!(attrs.is_empty());
    }
}
