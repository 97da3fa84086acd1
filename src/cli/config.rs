//! TOML configuration file support.
//!
//! Settings that would otherwise be passed as flags on every run:
//!
//! ```toml
//! # amiante.toml
//! [conversion]
//! input_dir = "exports"
//! output_dir = "json"
//! sources = ["Table_Z_Amiante.xml", "Table_Z_Amiante_prelevements.xml"]
//! merged_outputs = ["amiante_auto.json"]
//! synthesis_json = "synthese.json"
//! synthesis_html = "synthese.html"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Root configuration structure for amiante.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Conversion-specific settings.
    #[serde(default)]
    pub conversion: ConversionSection,
}

/// Configuration for a conversion run.
#[derive(Debug, Default, Deserialize)]
pub struct ConversionSection {
    /// Directory holding the XML export tables.
    pub input_dir: Option<PathBuf>,

    /// Directory receiving the JSON documents.
    pub output_dir: Option<PathBuf>,

    /// Export table file names to convert.
    pub sources: Option<Vec<String>>,

    /// File names receiving the merged material table.
    pub merged_outputs: Option<Vec<String>>,

    /// Write the survey synthesis (default: true).
    pub synthesis: Option<bool>,

    /// File name of the survey synthesis document.
    pub synthesis_json: Option<String>,

    /// File name of the HTML survey synthesis.
    pub synthesis_html: Option<String>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }
}
