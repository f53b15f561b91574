//! `ugat.toml` configuration.
//!
//! ```toml
//! [parser]
//! max_depth = 256
//!
//! [output]
//! format = "json"
//! ```

use std::path::Path;

use serde::Deserialize;
use ugat_core::ParseOptions;

use crate::OutputFormat;

/// Looked up in the working directory when `--config` is not given.
pub(crate) const DEFAULT_CONFIG_FILE: &str = "ugat.toml";

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Config {
    pub parser: ParseOptions,
    pub output: OutputConfig,
}

/// `[output]` section.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct OutputConfig {
    pub format: Option<OutputFormat>,
}

/// Read and parse a config TOML file from `path`.
///
/// Returns a human-readable error string on failure.
pub(crate) fn read_config(path: &Path) -> Result<Config, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("could not read '{}': {}", path.display(), e))?;
    parse_config(&content).map_err(|e| format!("could not parse '{}': {}", path.display(), e))
}

fn parse_config(content: &str) -> Result<Config, toml::de::Error> {
    let config: Config = toml::from_str(content)?;
    Ok(config)
}

/// An explicit path must exist; the default file is optional.
pub(crate) fn load(explicit: Option<&Path>) -> Result<Config, String> {
    match explicit {
        Some(path) => read_config(path),
        None => {
            let path = Path::new(DEFAULT_CONFIG_FILE);
            if path.exists() {
                log::debug!("using {}", path.display());
                read_config(path)
            } else {
                Ok(Config::default())
            }
        }
    }
}
