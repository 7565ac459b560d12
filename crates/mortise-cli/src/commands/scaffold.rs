//! `mortise scaffold` — generate a solution from a model file.

use tracing::instrument;

use crate::{cli::ScaffoldArgs, config::AppConfig, error::CliResult, output::OutputManager};

#[instrument(skip_all, fields(model = %args.project.model.display()))]
pub fn execute(args: ScaffoldArgs, config: AppConfig, output: &OutputManager) -> CliResult<()> {
    let (model, service) = super::open_project(&args.project, &config)?;

    output.header(&format!(
        "Scaffolding {} ({} entities) into {}",
        model.project_base_name,
        model.entities.len(),
        args.project.root.display(),
    ))?;

    let report = service.scaffold(&model)?;
    output.report("scaffold", &report)?;
    Ok(())
}
