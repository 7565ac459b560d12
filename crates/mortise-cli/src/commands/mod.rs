//! Command handlers.
//!
//! Each handler translates CLI arguments into core calls and displays the
//! result. No business logic lives here.

use std::sync::Arc;

use tracing::info;

use mortise_adapters::{BuiltinTemplates, DirectoryTemplates, LocalFileSystem};
use mortise_core::prelude::{
    ApiModel, MortiseError, PathResolver, ScaffoldService, SolutionLayout, TemplateProvider,
};

use crate::{cli::ProjectArgs, config::AppConfig, error::CliResult, model::load_model};

pub mod add_consumer;
pub mod add_feature;
pub mod add_property;
pub mod completions;
pub mod config;
pub mod init;
pub mod scaffold;

/// Load the model and wire a service over the local file system.
fn open_project(project: &ProjectArgs, config: &AppConfig) -> CliResult<(ApiModel, ScaffoldService)> {
    let model = load_model(&project.model, config)?;

    let layout = SolutionLayout::new(project.root.clone(), model.project_base_name.clone())
        .with_dirs(&config.project.src_dir, &config.project.test_dir);

    let templates: Box<dyn TemplateProvider> =
        match project.templates.as_ref().or(config.templates.dir.as_ref()) {
            Some(dir) => {
                let loaded = DirectoryTemplates::load(dir).map_err(MortiseError::from)?;
                info!(
                    dir = %dir.display(),
                    overrides = loaded.overridden().count(),
                    "Using template overrides"
                );
                Box::new(loaded)
            }
            None => Box::new(BuiltinTemplates::new()),
        };

    let service = ScaffoldService::new(
        Arc::new(LocalFileSystem::new()),
        templates,
        PathResolver::new(layout),
    );
    Ok((model, service))
}
