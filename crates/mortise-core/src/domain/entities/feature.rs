//! Features: the endpoints generated for an entity.
//!
//! `Feature` is a closed sum type. Only the variants that need extra fields
//! carry them, so a render branch can never read a field its feature lacks.

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;
use crate::domain::naming::default_permission_name;
use crate::domain::value_objects::FeatureKind;

use super::entity::Entity;

/// Authorization settings shared by every feature.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureAccess {
    #[serde(default)]
    pub is_protected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission_name: Option<String>,
}

impl FeatureAccess {
    pub fn public() -> Self {
        Self::default()
    }

    pub fn protected() -> Self {
        Self {
            is_protected: true,
            permission_name: None,
        }
    }

    pub fn with_permission(mut self, name: impl Into<String>) -> Self {
        self.permission_name = Some(name.into());
        self
    }
}

/// Batch insert of children under a parent entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSpec {
    #[serde(flatten)]
    pub access: FeatureAccess,
    #[serde(default)]
    pub parent_entity: String,
    #[serde(default)]
    pub batch_property_name: String,
    /// Falls back to the type of the entity's own `batch_property_name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_property_type: Option<String>,
}

impl BatchSpec {
    pub fn new(parent_entity: impl Into<String>, batch_property_name: impl Into<String>) -> Self {
        Self {
            access: FeatureAccess::default(),
            parent_entity: parent_entity.into(),
            batch_property_name: batch_property_name.into(),
            batch_property_type: None,
        }
    }

    /// Parent entity name.
    ///
    /// # Errors
    ///
    /// `DomainError::MissingField` when the model left it blank.
    pub fn parent(&self, entity: &Entity) -> Result<&str, DomainError> {
        if self.parent_entity.trim().is_empty() {
            return Err(missing(entity, "parentEntity"));
        }
        Ok(&self.parent_entity)
    }

    pub fn property_name(&self, entity: &Entity) -> Result<&str, DomainError> {
        if self.batch_property_name.trim().is_empty() {
            return Err(missing(entity, "batchPropertyName"));
        }
        Ok(&self.batch_property_name)
    }

    /// Explicit type, else the type of the matching property on `entity`.
    pub fn property_type(&self, entity: &Entity) -> Result<String, DomainError> {
        if let Some(ty) = self.batch_property_type.as_ref().filter(|t| !t.trim().is_empty()) {
            return Ok(ty.clone());
        }
        let name = self.property_name(entity)?;
        entity
            .property(name)
            .map(|p| p.ty.clone())
            .ok_or_else(|| missing(entity, "batchPropertyType"))
    }
}

fn missing(entity: &Entity, field: &'static str) -> DomainError {
    DomainError::MissingField {
        element: format!("AddListByFk feature on '{}'", entity.name),
        field,
    }
}

/// A custom command with no generated behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdHocSpec {
    pub name: String,
    #[serde(flatten)]
    pub access: FeatureAccess,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Feature {
    AddRecord(FeatureAccess),
    GetRecord(FeatureAccess),
    GetList(FeatureAccess),
    UpdateRecord(FeatureAccess),
    PatchRecord(FeatureAccess),
    DeleteRecord(FeatureAccess),
    AddListByFk(BatchSpec),
    AdHoc(AdHocSpec),
    /// Any `type` this version does not know.
    #[serde(other)]
    Unrecognized,
}

impl Feature {
    pub fn kind(&self) -> Option<FeatureKind> {
        Some(match self {
            Self::AddRecord(_) => FeatureKind::AddRecord,
            Self::GetRecord(_) => FeatureKind::GetRecord,
            Self::GetList(_) => FeatureKind::GetList,
            Self::UpdateRecord(_) => FeatureKind::UpdateRecord,
            Self::PatchRecord(_) => FeatureKind::PatchRecord,
            Self::DeleteRecord(_) => FeatureKind::DeleteRecord,
            Self::AddListByFk(_) => FeatureKind::AddListByFk,
            Self::AdHoc(_) => FeatureKind::AdHoc,
            Self::Unrecognized => return None,
        })
    }

    pub fn access(&self) -> Option<&FeatureAccess> {
        match self {
            Self::AddRecord(a)
            | Self::GetRecord(a)
            | Self::GetList(a)
            | Self::UpdateRecord(a)
            | Self::PatchRecord(a)
            | Self::DeleteRecord(a) => Some(a),
            Self::AddListByFk(spec) => Some(&spec.access),
            Self::AdHoc(spec) => Some(&spec.access),
            Self::Unrecognized => None,
        }
    }

    pub fn is_protected(&self) -> bool {
        self.access().is_some_and(|a| a.is_protected)
    }

    /// Configured permission, else `Can{Route}` for this entity.
    pub fn permission_name(&self, entity: &Entity) -> Option<String> {
        let kind = self.kind()?;
        let access = self.access()?;
        Some(
            access
                .permission_name
                .clone()
                .unwrap_or_else(|| default_permission_name(kind, &entity.name, &entity.plural())),
        )
    }
}
