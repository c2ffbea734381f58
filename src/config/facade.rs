//! Config loading entry points.

use super::merge::merge_policy;
use super::sources::{environment, global_file, project_file};
use super::ShellcompConfig;
use config::{ConfigError, File};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Assembles [`ShellcompConfig`] from its layered sources.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for `project_root`.
    ///
    /// Precedence (lowest to highest): defaults, global file, project file,
    /// `SHELLCOMP__*` environment variables.
    pub fn load(project_root: &Path) -> Result<ShellcompConfig, ConfigError> {
        Self::load_with(project_root, None)
    }

    /// Like [`load`](Self::load), with an explicit file layered above the
    /// project file. The explicit file must exist.
    pub fn load_with(
        project_root: &Path,
        explicit: Option<&Path>,
    ) -> Result<ShellcompConfig, ConfigError> {
        let mut builder = merge_policy::builder_with_defaults()?;
        builder = global_file::add_to_builder(builder)?;
        builder = project_file::add_to_builder(builder, project_root)?;
        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path).required(true));
        }
        builder = environment::add_to_builder(builder);

        let mut config: ShellcompConfig = builder.build()?.try_deserialize()?;
        config.completion.manifest = config
            .completion
            .manifest
            .map(|manifest| Self::anchor(project_root, manifest));
        debug!(
            project_root = %project_root.display(),
            manifest = ?config.completion.manifest,
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Load a single file on top of the defaults, without other sources.
    pub fn load_from_file(path: &Path) -> Result<ShellcompConfig, ConfigError> {
        merge_policy::builder_with_defaults()?
            .add_source(File::from(path).required(true))
            .build()?
            .try_deserialize()
    }

    /// Global config file location, whether or not it exists.
    pub fn xdg_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }

    /// Relative manifest paths are taken relative to the project root.
    fn anchor(project_root: &Path, manifest: PathBuf) -> PathBuf {
        if manifest.is_relative() {
            project_root.join(manifest)
        } else {
            manifest
        }
    }
}
