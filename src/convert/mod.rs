//! Export directory to JSON conversion
//!
//! A run reads every configured export table, writes one JSON document per
//! table next to it (same base name, `.json` extension), then joins the
//! materials, samples and general tables into the merged row table and writes
//! it to each merged output file. Last comes the survey synthesis, as JSON and
//! as HTML. Every output is fully overwritten.
//!
//! A table that does not exist is not an error: it is recorded as missing and
//! the run continues. Any other I/O failure aborts the run.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::decode::decode_source;
use crate::extract::extract_source;
use crate::join::build_rows;
use crate::model::{FieldMap, ParsedSource, SourceKind};
use crate::sources;
use crate::synthesis::{build_synthesis, records_from_json, render_html, SynthesisTables};

mod error;

pub use error::ConversionError;

/// Configuration for a conversion run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionConfig {
    /// Directory holding the export tables
    pub input_dir: PathBuf,

    /// Directory receiving the JSON documents; created when absent
    pub output_dir: PathBuf,

    /// Export table file names, converted in this order
    pub sources: Vec<String>,

    /// File names receiving the merged row table
    pub merged_outputs: Vec<String>,

    /// File name of the survey synthesis document; `None` skips it
    pub synthesis_json: Option<String>,

    /// File name of the HTML survey synthesis; `None` skips it
    pub synthesis_html: Option<String>,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self::in_dir(".")
    }
}

impl ConversionConfig {
    /// Read from and write to the same directory, with the standard tables
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            input_dir: dir.clone(),
            output_dir: dir,
            sources: sources::ALL_SOURCES.iter().map(|s| s.to_string()).collect(),
            merged_outputs: sources::MERGED_OUTPUTS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            synthesis_json: Some(sources::SYNTHESIS_JSON.to_string()),
            synthesis_html: Some(sources::SYNTHESIS_HTML.to_string()),
        }
    }
}

/// What an output file holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrittenKind {
    /// Document of one export table
    Source(SourceKind),
    /// Merged row table
    Merged,
    /// Survey synthesis, JSON or HTML
    Synthesis,
}

/// One output file written during a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    /// Path of the written file
    pub path: PathBuf,
    /// Content kind
    pub kind: WrittenKind,
    /// Items, fields, rows or zones written
    pub count: usize,
}

impl WrittenFile {
    /// Unit of [`WrittenFile::count`]
    pub fn unit(&self) -> &'static str {
        match self.kind {
            WrittenKind::Source(kind) => kind.count_unit(),
            WrittenKind::Merged => "rows",
            WrittenKind::Synthesis => "zones",
        }
    }
}

/// Statistics from a conversion run
#[derive(Debug, Clone, Default)]
pub struct ConversionStats {
    /// Every file written, in write order
    pub written: Vec<WrittenFile>,
    /// Export tables that did not exist
    pub missing_sources: Vec<String>,
    /// Rows in the merged table
    pub row_count: usize,
    /// Zones in the survey synthesis
    pub zone_count: usize,
}

/// Runs conversions according to a [`ConversionConfig`]
#[derive(Debug, Clone, Default)]
pub struct Converter {
    config: ConversionConfig,
}

impl Converter {
    /// Converter for the current directory with the standard tables
    pub fn new() -> Self {
        Self::default()
    }

    /// Converter with a custom configuration
    pub fn with_config(config: ConversionConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    /// Read and extract one export table from the input directory.
    ///
    /// A file that does not exist yields [`ParsedSource::Missing`].
    pub fn read_source(&self, name: &str) -> Result<ParsedSource, ConversionError> {
        let path = self.config.input_dir.join(name);
        let text = match fs::read(&path) {
            Ok(bytes) => decode_source(&bytes),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!("Source {} not found", path.display());
                String::new()
            }
            Err(err) => return Err(ConversionError::io(path)(err)),
        };

        Ok(extract_source(name, &text))
    }

    /// Records of a table that was not converted in this run.
    ///
    /// A JSON document of the table in the input directory (same base name)
    /// is preferred over the export itself.
    pub fn load_records(&self, name: &str) -> Result<Vec<FieldMap>, ConversionError> {
        let json_path = self.config.input_dir.join(sources::json_name(name));
        match fs::read_to_string(&json_path) {
            Ok(json) => match records_from_json(&json) {
                Ok(records) => {
                    debug!("Read {} records from {}", records.len(), json_path.display());
                    return Ok(records);
                }
                Err(err) => warn!("Ignoring unreadable {}: {}", json_path.display(), err),
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(err) => warn!("Ignoring unreadable {}: {}", json_path.display(), err),
        }

        Ok(self.read_source(name)?.records().to_vec())
    }

    /// Run the conversion
    pub fn run(&self) -> Result<ConversionStats, ConversionError> {
        self.run_with_progress(|_| {})
    }

    /// Run the conversion, reporting each file as soon as it is written
    pub fn run_with_progress<F>(&self, mut progress: F) -> Result<ConversionStats, ConversionError>
    where
        F: FnMut(&WrittenFile),
    {
        info!("Input directory:  {}", self.config.input_dir.display());
        info!("Output directory: {}", self.config.output_dir.display());

        fs::create_dir_all(&self.config.output_dir)
            .map_err(ConversionError::io(&self.config.output_dir))?;

        let mut stats = ConversionStats::default();
        let mut parsed: BTreeMap<String, ParsedSource> = BTreeMap::new();

        for name in &self.config.sources {
            let source = self.read_source(name)?;
            if source.is_missing() {
                stats.missing_sources.push(name.clone());
            }

            let path = self.config.output_dir.join(sources::json_name(name));
            write_document(&path, &source.to_json()?)?;

            let written = WrittenFile {
                path,
                kind: WrittenKind::Source(source.kind()),
                count: source.count(),
            };
            progress(&written);
            stats.written.push(written);

            parsed.insert(name.clone(), source);
        }

        let joined = |name: &str| {
            parsed
                .get(name)
                .cloned()
                .unwrap_or_else(|| ParsedSource::missing(name))
        };
        let payload = build_rows(
            &joined(sources::MATERIALS),
            &joined(sources::SAMPLES),
            &joined(sources::GENERAL),
        );
        stats.row_count = payload.rows.len();

        // Serialized once so every merged output is byte-identical
        let json = payload.to_json()?;
        for name in &self.config.merged_outputs {
            let path = self.config.output_dir.join(name);
            write_document(&path, &json)?;

            let written = WrittenFile {
                path,
                kind: WrittenKind::Merged,
                count: stats.row_count,
            };
            progress(&written);
            stats.written.push(written);
        }

        if self.config.synthesis_json.is_some() || self.config.synthesis_html.is_some() {
            let records = |name: &str| match parsed.get(name) {
                Some(source) => Ok(source.records().to_vec()),
                None => self.load_records(name),
            };
            let tables = SynthesisTables {
                materials: records(sources::MATERIALS)?,
                samples: records(sources::SAMPLES)?,
                analyses: records(sources::ANALYSES)?,
                photos: records(sources::PHOTOS)?,
                documents: records(sources::DOCUMENTS)?,
                deviations: records(sources::DEVIATIONS)?,
            };
            let synthesis = build_synthesis(&tables);
            stats.zone_count = synthesis.zones.len();

            let outputs = [
                (self.config.synthesis_json.as_ref(), synthesis.to_json()?),
                (self.config.synthesis_html.as_ref(), render_html(&synthesis)),
            ];
            for (name, content) in outputs {
                let Some(name) = name else { continue };
                let path = self.config.output_dir.join(name);
                write_document(&path, &content)?;

                let written = WrittenFile {
                    path,
                    kind: WrittenKind::Synthesis,
                    count: stats.zone_count,
                };
                progress(&written);
                stats.written.push(written);
            }
        }

        info!(
            "Conversion complete: {} documents, {} rows, {} zones, {} sources missing",
            stats.written.len(),
            stats.row_count,
            stats.zone_count,
            stats.missing_sources.len()
        );

        Ok(stats)
    }
}

fn write_document(path: &Path, content: &str) -> Result<(), ConversionError> {
    debug!("Writing {} ({} bytes)", path.display(), content.len());
    fs::write(path, content).map_err(ConversionError::io(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const MATERIALS_XML: &str = "<LiItem_table_Z_Amiante><Num_Materiau>M1</Num_Materiau></LiItem_table_Z_Amiante>";

    #[test]
    fn test_default_config_uses_current_directory() {
        let config = ConversionConfig::default();
        assert_eq!(config.input_dir, PathBuf::from("."));
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert_eq!(config.sources.len(), 6);
        assert_eq!(
            config.merged_outputs,
            vec!["amiante_auto.json", "generate_amiante_json.json"]
        );
        assert_eq!(config.synthesis_json.as_deref(), Some("synthese_amiante.json"));
        assert_eq!(config.synthesis_html.as_deref(), Some("synthese_amiante.html"));
    }

    #[test]
    fn test_read_source_missing_file() {
        let dir = tempdir().unwrap();
        let converter = Converter::with_config(ConversionConfig::in_dir(dir.path()));

        let parsed = converter.read_source(sources::ANALYSES).unwrap();
        assert_eq!(parsed, ParsedSource::missing(sources::ANALYSES));
    }

    #[test]
    fn test_read_source_empty_file_is_missing() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(sources::DOCUMENTS), "").unwrap();
        let converter = Converter::with_config(ConversionConfig::in_dir(dir.path()));

        assert!(converter.read_source(sources::DOCUMENTS).unwrap().is_missing());
    }

    #[test]
    fn test_progress_reports_every_written_file() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(sources::MATERIALS), MATERIALS_XML).unwrap();
        let converter = Converter::with_config(ConversionConfig::in_dir(dir.path()));

        let mut reported = Vec::new();
        let stats = converter
            .run_with_progress(|written| reported.push((written.unit(), written.count)))
            .unwrap();

        assert_eq!(reported.len(), 10);
        assert_eq!(reported[0], ("items", 1));
        assert_eq!(reported[1], ("entries", 0));
        assert_eq!(reported[6], ("rows", 1));
        assert_eq!(reported[7], ("rows", 1));
        assert_eq!(reported[8], ("zones", 1));
        assert_eq!(reported[9], ("zones", 1));
        assert_eq!(stats.row_count, 1);
        assert_eq!(stats.zone_count, 1);
        assert_eq!(stats.missing_sources.len(), 5);
    }

    #[test]
    fn test_unconfigured_joined_source_counts_as_missing() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(sources::MATERIALS), MATERIALS_XML).unwrap();
        let mut config = ConversionConfig::in_dir(dir.path());
        config.sources = vec![sources::MATERIALS.to_string()];

        let stats = Converter::with_config(config).run().unwrap();
        assert_eq!(stats.row_count, 1);
        assert_eq!(stats.written.len(), 5);
        assert!(!dir.path().join("Table_Z_Amiante_General.json").exists());
    }

    #[test]
    fn test_output_directory_is_created() {
        let dir = tempdir().unwrap();
        let mut config = ConversionConfig::in_dir(dir.path());
        config.output_dir = dir.path().join("out").join("json");

        Converter::with_config(config).run().unwrap();
        assert!(dir.path().join("out/json/amiante_auto.json").exists());
    }

    #[test]
    fn test_load_records_prefers_json_document() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("Table_General_Photo.json"),
            r#"[{"Photo": "P1", "Chemin_acces": "from-json.jpg"}]"#,
        )
        .unwrap();
        fs::write(
            dir.path().join(sources::PHOTOS),
            "<LiItem_photo><Photo>P1</Photo><Chemin_acces>from-xml.jpg</Chemin_acces></LiItem_photo>",
        )
        .unwrap();
        let converter = Converter::with_config(ConversionConfig::in_dir(dir.path()));

        let records = converter.load_records(sources::PHOTOS).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["Chemin_acces"], "from-json.jpg");
    }

    #[test]
    fn test_load_records_falls_back_to_export() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("Table_General_Photo.json"), "{broken").unwrap();
        fs::write(
            dir.path().join(sources::PHOTOS),
            "<LiItem_photo><Photo>P1</Photo><Chemin_acces>from-xml.jpg</Chemin_acces></LiItem_photo>",
        )
        .unwrap();
        let converter = Converter::with_config(ConversionConfig::in_dir(dir.path()));

        let records = converter.load_records(sources::PHOTOS).unwrap();
        assert_eq!(records[0]["Chemin_acces"], "from-xml.jpg");

        fs::remove_file(dir.path().join(sources::PHOTOS)).unwrap();
        assert!(converter.load_records(sources::PHOTOS).unwrap().is_empty());
    }

    #[test]
    fn test_synthesis_outputs_can_be_disabled() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(sources::MATERIALS), MATERIALS_XML).unwrap();
        let mut config = ConversionConfig::in_dir(dir.path());
        config.synthesis_html = None;

        let stats = Converter::with_config(config.clone()).run().unwrap();
        assert_eq!(stats.written.len(), 9);
        assert!(dir.path().join(sources::SYNTHESIS_JSON).exists());
        assert!(!dir.path().join(sources::SYNTHESIS_HTML).exists());

        config.synthesis_json = None;
        let stats = Converter::with_config(config).run().unwrap();
        assert_eq!(stats.written.len(), 8);
        assert_eq!(stats.zone_count, 0);
    }
}
