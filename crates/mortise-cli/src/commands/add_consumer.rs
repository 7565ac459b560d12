//! `mortise add-consumer` — create consumers and register them in the
//! integration-test fixture.

use tracing::instrument;

use crate::{cli::AddConsumerArgs, config::AppConfig, error::CliResult, output::OutputManager};

#[instrument(skip_all, fields(model = %args.project.model.display()))]
pub fn execute(args: AddConsumerArgs, config: AppConfig, output: &OutputManager) -> CliResult<()> {
    let (model, service) = super::open_project(&args.project, &config)?;

    if model.consumers.is_empty() {
        output.warning("The model declares no consumers; nothing to do")?;
    }

    let report = service.add_consumers(&model.db_context_name, &model.consumers)?;
    output.report("add-consumer", &report)?;
    Ok(())
}
