//! `mortise add-property` — extend an entity and its DTOs.

use tracing::instrument;

use crate::{cli::AddPropertyArgs, config::AppConfig, error::CliResult, output::OutputManager};

#[instrument(skip_all, fields(entity = %args.entity, properties = args.properties.len()))]
pub fn execute(args: AddPropertyArgs, config: AppConfig, output: &OutputManager) -> CliResult<()> {
    let (model, service) = super::open_project(&args.project, &config)?;

    let report = service.add_properties(&model, &args.entity, &args.properties)?;
    output.report("add-property", &report)?;
    Ok(())
}
