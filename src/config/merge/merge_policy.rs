//! Merge rules: defaults, override order, conflict handling.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
///
/// Later sources override earlier ones key by key, so a project file that only
/// sets `layout.ellipsis` keeps every other value from the global file.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("completion.include_descriptions", true)?
        .set_default("layout.reserved_columns", 4)?
        .set_default("layout.min_description_width", 8)?
        .set_default("layout.ellipsis", "…")?
        .set_default("logging.level", "off")?
        .set_default("logging.output", "stderr")
}
