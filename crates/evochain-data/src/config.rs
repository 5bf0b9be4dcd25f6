use crate::loader::{DataLoadError, deserialize_file};
use evochain_core::config::EngineConfig;
use std::path::Path;

/// Read an [`EngineConfig`] from a RON, JSON, or TOML file. Omitted fields
/// take their defaults; values that fail validation are a load error.
pub fn load_engine_config(path: &Path) -> Result<EngineConfig, DataLoadError> {
    let config: EngineConfig = deserialize_file(path)?;
    config
        .validate()
        .map_err(|e| DataLoadError::InvalidConfig {
            file: path.to_path_buf(),
            detail: e.to_string(),
        })?;
    Ok(config)
}
