//! Loading the JSON model file.

use std::io::ErrorKind;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::{debug, instrument};

use mortise_core::prelude::ApiModel;

use crate::{
    config::AppConfig,
    error::{CliError, CliResult},
};

/// Read `path` and deserialize it, filling `projectBaseName` and
/// `dbContextName` from the config when the file leaves them out.
#[instrument(skip(config), fields(path = %path.display()))]
pub fn load_model(path: &Path, config: &AppConfig) -> CliResult<ApiModel> {
    let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => CliError::ModelNotFound {
            path: path.to_path_buf(),
        },
        _ => CliError::IoError {
            message: format!("Failed to read model '{}'", path.display()),
            source: e,
        },
    })?;

    let invalid = |source| CliError::InvalidModel {
        path: path.to_path_buf(),
        source,
    };

    let mut value: Value = serde_json::from_str(&text).map_err(invalid)?;
    if let Value::Object(fields) = &mut value {
        fill_missing(fields, "projectBaseName", config.project.base_name.as_deref());
        fill_missing(fields, "dbContextName", config.project.db_context.as_deref());
    }

    let model: ApiModel = serde_json::from_value(value).map_err(invalid)?;
    if model.project_base_name.trim().is_empty() {
        return Err(CliError::InvalidInput {
            message: "projectBaseName is empty; set it in the model or in project.base_name"
                .into(),
        });
    }

    debug!(
        project = %model.project_base_name,
        entities = model.entities.len(),
        consumers = model.consumers.len(),
        "Model loaded"
    );
    Ok(model)
}

fn fill_missing(fields: &mut Map<String, Value>, key: &str, fallback: Option<&str>) {
    let Some(fallback) = fallback else {
        return;
    };
    let absent = match fields.get(key) {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    };
    if absent {
        fields.insert(key.to_string(), Value::String(fallback.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn model_file(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    fn config_with(base_name: Option<&str>, db_context: Option<&str>) -> AppConfig {
        let mut config = AppConfig::default();
        config.project.base_name = base_name.map(str::to_string);
        config.project.db_context = db_context.map(str::to_string);
        config
    }

    #[test]
    fn model_values_win_over_config() {
        let file = model_file(r#"{"projectBaseName": "Acme", "dbContextName": "ShopDbContext"}"#);
        let model = load_model(file.path(), &config_with(Some("Other"), Some("OtherDb"))).unwrap();
        assert_eq!(model.project_base_name, "Acme");
        assert_eq!(model.db_context_name, "ShopDbContext");
    }

    #[test]
    fn config_fills_missing_fields() {
        let file = model_file(r#"{"entities": []}"#);
        let model = load_model(file.path(), &config_with(Some("Acme"), Some("ShopDbContext"))).unwrap();
        assert_eq!(model.project_base_name, "Acme");
        assert_eq!(model.db_context_name, "ShopDbContext");
    }

    #[test]
    fn db_context_falls_back_to_model_default() {
        let file = model_file(r#"{"projectBaseName": "Acme"}"#);
        let model = load_model(file.path(), &AppConfig::default()).unwrap();
        assert_eq!(model.db_context_name, "AppDbContext");
    }

    #[test]
    fn missing_base_name_is_invalid() {
        let file = model_file(r#"{"projectBaseName": "  "}"#);
        assert!(matches!(
            load_model(file.path(), &AppConfig::default()),
            Err(CliError::InvalidInput { .. })
        ));

        let file = model_file(r#"{"entities": []}"#);
        assert!(matches!(
            load_model(file.path(), &AppConfig::default()),
            Err(CliError::InvalidModel { .. })
        ));
    }

    #[test]
    fn malformed_json_and_missing_file() {
        let file = model_file("{ not json");
        assert!(matches!(
            load_model(file.path(), &AppConfig::default()),
            Err(CliError::InvalidModel { .. })
        ));
        assert!(matches!(
            load_model(Path::new("/no/such/model.json"), &AppConfig::default()),
            Err(CliError::ModelNotFound { .. })
        ));
    }
}
