//! Composition trees for every generated file.
//!
//! Each plan turns one model element into [`Artifact`]s (a path plus the
//! tree that renders its content) and into bare [`TemplateNode`]s for text
//! that gets patched into an existing file. Nothing here touches I/O.

pub mod consumer;
pub mod entity;
pub mod feature;

use crate::domain::paths::ClassPath;
use crate::domain::template::TemplateNode;

pub use consumer::{fixture_file, ConsumerPlan};
pub use entity::{dto_property_nodes, entity_property_nodes, EntityPlan};
pub use feature::FeaturePlan;

/// One file to create.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub path: ClassPath,
    pub tree: TemplateNode,
}

impl Artifact {
    pub fn new(path: ClassPath, tree: TemplateNode) -> Self {
        Self { path, tree }
    }
}
