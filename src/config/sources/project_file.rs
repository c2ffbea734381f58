//! Project config file source: <dir>/.shellcomp.toml

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use std::path::Path;

pub const PROJECT_CONFIG_FILE: &str = ".shellcomp.toml";

/// Add the project config file to builder when present.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    project_root: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let path = project_root.join(PROJECT_CONFIG_FILE);
    if path.exists() {
        return Ok(builder.add_source(File::from(path).required(false)));
    }
    Ok(builder)
}
