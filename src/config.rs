//! Optional TOML configuration for the CLI
//!
//! ```toml
//! network = "data/network.gml"
//! max_depth = 3
//!
//! [source_codes]
//! eng = ["northeuralex-eng"]
//! ```

use anyhow::Context;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Network description used when neither `--network` nor the environment names one.
    pub network: Option<PathBuf>,
    pub max_depth: Option<usize>,
    /// ISO code to source code overrides, consulted before the built-in table.
    pub source_codes: HashMap<String, Vec<String>>,
}

impl Config {
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Config::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Config =
            toml::from_str(&text).with_context(|| format!("invalid config {}", path.display()))?;
        tracing::debug!(
            "Loaded config from {} ({} source code overrides)",
            path.display(),
            config.source_codes.len()
        );
        Ok(config)
    }
}
