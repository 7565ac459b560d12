//! The input model of one scaffold run.

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

use super::{consumer::Consumer, entity::Entity};

fn default_db_context() -> String {
    "AppDbContext".into()
}

/// Everything the generator needs to know about the target API.
///
/// Loading and deserializing this model is the caller's job; the core
/// assumes the graph is structurally valid and only checks the fields a
/// render branch actually reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiModel {
    pub project_base_name: String,
    #[serde(default = "default_db_context")]
    pub db_context_name: String,
    #[serde(default)]
    pub entities: Vec<Entity>,
    #[serde(default)]
    pub consumers: Vec<Consumer>,
    /// XML doc comments on generated controller actions.
    #[serde(default)]
    pub add_swagger_comments: bool,
}

impl ApiModel {
    pub fn new(project_base_name: impl Into<String>) -> Self {
        Self {
            project_base_name: project_base_name.into(),
            db_context_name: default_db_context(),
            entities: Vec::new(),
            consumers: Vec::new(),
            add_swagger_comments: false,
        }
    }

    pub fn with_swagger_comments(mut self, enabled: bool) -> Self {
        self.add_swagger_comments = enabled;
        self
    }

    pub fn with_entity(mut self, entity: Entity) -> Self {
        self.entities.push(entity);
        self
    }

    pub fn with_consumer(mut self, consumer: Consumer) -> Self {
        self.consumers.push(consumer);
        self
    }

    /// Look up an entity by exact name.
    pub fn entity(&self, name: &str) -> Result<&Entity, DomainError> {
        self.entities
            .iter()
            .find(|e| e.name == name)
            .ok_or_else(|| DomainError::UnknownEntity { name: name.into() })
    }
}
