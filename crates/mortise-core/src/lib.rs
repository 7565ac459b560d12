//! Mortise Core - template composition and incremental file patching.
//!
//! This crate provides the domain and application layers for the Mortise
//! web API scaffolder, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           mortise-cli (CLI)             │
//! │   (loads the model, drives services)    │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  ScaffoldService → TemplateRenderer     │
//! │                  → FileWriter           │
//! │                  → MarkerPatcher        │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │  FileSystem, TemplateProvider, Patcher  │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    mortise-adapters (Infrastructure)    │
//! │ LocalFileSystem, MemoryFileSystem,      │
//! │ BuiltinTemplates, DirectoryTemplates    │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ ApiModel, naming, PathResolver,         │
//! │ TemplateNode, MarkerRule, artifacts     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use mortise_core::prelude::*;
//!
//! # fn demo(fs: Arc<dyn FileSystem>, templates: Box<dyn TemplateProvider>, model: ApiModel)
//! # -> MortiseResult<()> {
//! let layout = SolutionLayout::new("./out", model.project_base_name.clone());
//! let service = ScaffoldService::new(fs, templates, PathResolver::new(layout));
//! let report = service.scaffold(&model)?;
//! println!("{} files touched", report.len());
//! # Ok(())
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        FileChange, FileWriter, MarkerPatcher, PatchOutcome, ScaffoldReport, ScaffoldService,
        TemplateRenderer,
        ports::{FileSystem, Patcher, TemplateProvider},
    };
    pub use crate::domain::{
        ApiModel, ClassPath, Consumer, Entity, EntityProperty, Feature, FeatureAccess,
        MarkerRule, PathCategory, PathResolver, RenderContext, SolutionLayout, TemplateId,
        TemplateNode,
    };
    pub use crate::error::{MortiseError, MortiseResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
