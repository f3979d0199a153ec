//! `litgraph.toml` configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use litgraph_text::{LoadOptions, DEFAULT_MAX_LEN};

/// Name of the configuration file searched for by [`LitgraphConfig::find_and_load`].
pub const CONFIG_FILE: &str = "litgraph.toml";

/// The top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LitgraphConfig {
    /// Codec limits.
    #[serde(default)]
    pub codec: CodecConfig,
    /// Document loading limits.
    #[serde(default)]
    pub load: LoadConfig,
}

/// Codec section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CodecConfig {
    /// Most bytes scanned for one string literal.
    #[serde(default = "default_max_literal_len")]
    pub max_literal_len: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_literal_len: default_max_literal_len(),
        }
    }
}

fn default_max_literal_len() -> usize {
    DEFAULT_MAX_LEN
}

/// Load section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoadConfig {
    /// Stop reading a document after this many records.
    #[serde(default)]
    pub max_records: Option<usize>,
}

impl LitgraphConfig {
    /// Search upward from `start_dir` for `litgraph.toml`, returning the
    /// parsed file and the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(CONFIG_FILE);
            if candidate.is_file() {
                return Ok(Some((Self::load(&candidate)?, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Parse one configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn parse(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            max_literal_len: self.codec.max_literal_len,
            max_records: self.load.max_records.unwrap_or(usize::MAX),
        }
    }
}
