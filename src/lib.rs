//! # amiante-json - LICIEL Asbestos Survey Exports to JSON
//!
//! `amiante_json` turns the tag-delimited XML tables exported by asbestos
//! survey software (materials, samples, general report data, analyses,
//! handed-over documents, deviations from the standard) into JSON documents,
//! plus one denormalized table joining every material to its samples and to
//! the report header.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use amiante_json::convert::{ConversionConfig, Converter};
//!
//! let converter = Converter::with_config(ConversionConfig::in_dir("exports"));
//! let stats = converter.run()?;
//! println!("{} rows written", stats.row_count);
//! # Ok::<(), amiante_json::convert::ConversionError>(())
//! ```
//!
//! Given the six export tables in `exports/`, this produces:
//!
//! ```text
//! exports/
//! ├── Table_Z_Amiante.json                 # one document per source table
//! ├── Table_Z_Amiante_prelevements.json
//! ├── ...
//! ├── amiante_auto.json                    # merged material rows
//! ├── generate_amiante_json.json           # identical copy
//! ├── synthese_amiante.json                # survey synthesis
//! └── synthese_amiante.html
//! ```
//!
//! ## Extraction Model
//!
//! The exports are not guaranteed to be well-formed XML, so they are scanned
//! for tag pairs rather than parsed. A table whose text contains a tag named
//! `LiItem_*` is a collection of records (one per item block); any other table
//! is a single flat record. Every value is whitespace-collapsed and trimmed.
//!
//! ## Architecture
//!
//! - [`decode`]: raw bytes to text, honoring BOMs and the XML declaration
//! - [`extract`]: tag-block extraction into [`model::ParsedSource`]
//! - [`model`]: field mappings, parsed sources and their JSON documents
//! - [`join`]: material/sample/report denormalization into output rows
//! - [`synthesis`]: the survey synthesis (zones, rooms, counts, documents,
//!   deviations) as JSON and HTML
//! - [`convert`]: the end-to-end run over a directory of exports
//! - [`sources`]: the fixed export and output file names

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod convert;
pub mod decode;
pub mod extract;
pub mod join;
pub mod model;
pub mod sources;
pub mod synthesis;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::convert::{
        ConversionConfig, ConversionError, ConversionStats, Converter, WrittenFile, WrittenKind,
    };
    pub use crate::decode::decode_source;
    pub use crate::extract::{collapse_whitespace, extract_fields, extract_source};
    pub use crate::join::{build_rows, is_effectively_absent, MergedPayload, OutputRow};
    pub use crate::model::{DocumentError, FieldMap, ParsedSource, SourceKind};
    pub use crate::synthesis::{build_synthesis, render_html, Synthesis, SynthesisTables};
}
