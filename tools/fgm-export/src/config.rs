//! Decode options and their TOML file
//!
//! ```toml
//! nesting_limit = 100
//! case_sensitive_keys = false
//! buffer_view_lookup = "referenced"   # or "accessor-index"
//! ```

use anyhow::{Context, Result, ensure};
use serde::Deserialize;
use std::path::Path;

use crate::json::{DEFAULT_NESTING_LIMIT, MAX_NESTING_LIMIT};

/// How an accessor finds its bufferView
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum BufferViewLookup {
    /// The accessor's own `bufferView` field, falling back to the accessor
    /// index when the field is absent
    #[default]
    Referenced,
    /// `bufferViews[accessor index]`, ignoring the accessor's `bufferView`.
    /// Only correct for files that lay out one view per accessor in the same
    /// order.
    AccessorIndex,
}

/// Knobs for one decode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DecodeOptions {
    /// Maximum depth of nested JSON arrays/objects (at most [`MAX_NESTING_LIMIT`])
    pub nesting_limit: usize,
    /// Match glTF keys exactly instead of ASCII case-insensitively
    pub case_sensitive_keys: bool,
    pub buffer_view_lookup: BufferViewLookup,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            nesting_limit: DEFAULT_NESTING_LIMIT,
            case_sensitive_keys: false,
            buffer_view_lookup: BufferViewLookup::default(),
        }
    }
}

impl DecodeOptions {
    pub fn from_toml(text: &str) -> Result<Self> {
        let options: Self = toml::from_str(text).context("Invalid decode options")?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.nesting_limit <= MAX_NESTING_LIMIT,
            "nesting_limit {} exceeds the maximum of {}",
            self.nesting_limit,
            MAX_NESTING_LIMIT
        );
        Ok(())
    }
}

/// Load decode options from a TOML file
pub fn load_options(path: &Path) -> Result<DecodeOptions> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {:?}", path))?;
    DecodeOptions::from_toml(&text).with_context(|| format!("Failed to parse config: {:?}", path))
}
