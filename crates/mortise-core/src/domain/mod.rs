// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Mortise.
//!
//! This module contains pure logic with no I/O. Everything that touches the
//! file system or loads template bodies goes through the ports defined in
//! the application layer.
//!
//! - `entities`: the input model (entities, properties, features, consumers)
//! - `naming`: deterministic identifier derivation
//! - `paths`: `ClassPath` and the `PathResolver`
//! - `template`: composition tree and placeholder substitution
//! - `marker`: anchor tokens and patch rules
//! - `artifacts`: per-artifact composition trees built from the model
pub mod artifacts;
pub mod entities;
pub mod error;
pub mod marker;
pub mod naming;
pub mod paths;
pub mod template;
pub mod value_objects;

pub use entities::{
    consumer::Consumer,
    entity::{Entity, EntityProperty},
    feature::{AdHocSpec, BatchSpec, Feature, FeatureAccess},
    model::ApiModel,
};

pub use error::DomainError;

pub use marker::{Insertion, MarkerRule, MarkerToken};
pub use paths::{
    ClassPath, DotNetModules, ModuleConvention, PathResolver, RustModules, SolutionLayout,
};
pub use template::{RenderContext, Slot, TemplateId, TemplateNode};
pub use value_objects::{DtoKind, FeatureKind, PathCategory, ValidatorKind};
