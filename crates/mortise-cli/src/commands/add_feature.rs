//! `mortise add-feature` — add one endpoint to a scaffolded entity.

use tracing::instrument;

use mortise_core::domain::{AdHocSpec, BatchSpec, Feature, FeatureAccess};

use crate::{
    cli::{AddFeatureArgs, FeatureKindArg},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all, fields(entity = %args.entity, kind = ?args.kind))]
pub fn execute(args: AddFeatureArgs, config: AppConfig, output: &OutputManager) -> CliResult<()> {
    let feature = build_feature(&args)?;
    let (model, service) = super::open_project(&args.project, &config)?;

    let report = service.add_feature(&model, &args.entity, &feature)?;
    output.report("add-feature", &report)?;
    Ok(())
}

/// Batch fields left out on the command line stay blank so the core
/// reports exactly which one is missing.
fn build_feature(args: &AddFeatureArgs) -> CliResult<Feature> {
    let mut access = if args.protected {
        FeatureAccess::protected()
    } else {
        FeatureAccess::public()
    };
    if let Some(permission) = &args.permission {
        access = access.with_permission(permission);
    }

    Ok(match args.kind {
        FeatureKindArg::AddRecord => Feature::AddRecord(access),
        FeatureKindArg::GetRecord => Feature::GetRecord(access),
        FeatureKindArg::GetList => Feature::GetList(access),
        FeatureKindArg::UpdateRecord => Feature::UpdateRecord(access),
        FeatureKindArg::PatchRecord => Feature::PatchRecord(access),
        FeatureKindArg::DeleteRecord => Feature::DeleteRecord(access),
        FeatureKindArg::AddListByFk => {
            let mut spec = BatchSpec::new(
                args.parent_entity.clone().unwrap_or_default(),
                args.batch_property.clone().unwrap_or_default(),
            );
            spec.access = access;
            spec.batch_property_type = args.batch_property_type.clone();
            Feature::AddListByFk(spec)
        }
        FeatureKindArg::AdHoc => {
            let name = args.name.clone().ok_or_else(|| CliError::InvalidInput {
                message: "ad-hoc features need --name".into(),
            })?;
            Feature::AdHoc(AdHocSpec { name, access })
        }
    })
}
