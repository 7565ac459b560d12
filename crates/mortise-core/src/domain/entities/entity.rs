//! Entities and their properties.

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;
use crate::domain::naming::{lambda_variable, pluralize, uppercase_first_letter};

use super::feature::Feature;

/// A domain entity: one table, one set of DTOs, one controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub name: String,
    /// Overrides the derived plural.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plural: Option<String>,
    /// Overrides the derived lambda variable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lambda: Option<String>,
    #[serde(default)]
    pub properties: Vec<EntityProperty>,
    #[serde(default)]
    pub features: Vec<Feature>,
}

impl Entity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            plural: None,
            lambda: None,
            properties: Vec::new(),
            features: Vec::new(),
        }
    }

    pub fn with_property(mut self, property: EntityProperty) -> Self {
        self.properties.push(property);
        self
    }

    pub fn with_feature(mut self, feature: Feature) -> Self {
        self.features.push(feature);
        self
    }

    pub fn plural(&self) -> String {
        self.plural
            .clone()
            .unwrap_or_else(|| pluralize(&self.name))
    }

    pub fn lambda(&self) -> String {
        self.lambda
            .clone()
            .unwrap_or_else(|| lambda_variable(&self.name))
    }

    /// The property marked as primary key.
    ///
    /// # Errors
    ///
    /// `DomainError::MissingField` when no property is marked.
    pub fn primary_key(&self) -> Result<&EntityProperty, DomainError> {
        self.properties
            .iter()
            .find(|p| p.is_primary_key)
            .ok_or_else(|| DomainError::MissingField {
                element: format!("entity '{}'", self.name),
                field: "primary key",
            })
    }

    pub fn property(&self, name: &str) -> Option<&EntityProperty> {
        self.properties
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }
}

/// One column of an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityProperty {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub is_primary_key: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign_entity_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign_entity_plural: Option<String>,
    #[serde(default)]
    pub can_filter: bool,
    #[serde(default)]
    pub can_sort: bool,
    #[serde(default = "default_true")]
    pub can_manipulate: bool,
}

fn default_true() -> bool {
    true
}

impl EntityProperty {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            is_primary_key: false,
            foreign_entity_name: None,
            foreign_entity_plural: None,
            can_filter: false,
            can_sort: false,
            can_manipulate: true,
        }
    }

    /// A primary key is never written through a DTO.
    pub fn primary_key(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            is_primary_key: true,
            can_manipulate: false,
            ..Self::new(name, ty)
        }
    }

    pub fn with_foreign_entity(mut self, entity_name: impl Into<String>) -> Self {
        self.foreign_entity_name = Some(entity_name.into());
        self
    }

    pub fn filterable(mut self) -> Self {
        self.can_filter = true;
        self
    }

    pub fn sortable(mut self) -> Self {
        self.can_sort = true;
        self
    }

    /// Exclude from the creation and update DTOs.
    pub fn read_only(mut self) -> Self {
        self.can_manipulate = false;
        self
    }

    /// Member name as it appears in generated code.
    pub fn member_name(&self) -> String {
        uppercase_first_letter(&self.name)
    }

    pub fn is_foreign_key(&self) -> bool {
        self.foreign_entity_name.is_some()
    }

    pub fn foreign_entity_plural(&self) -> Option<String> {
        self.foreign_entity_plural
            .clone()
            .or_else(|| self.foreign_entity_name.as_deref().map(pluralize))
    }

    /// Whether the property appears in the writable DTOs.
    pub fn is_manipulable(&self) -> bool {
        self.can_manipulate && !self.is_primary_key
    }
}
