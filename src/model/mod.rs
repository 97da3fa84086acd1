//! # Parsed Source Model
//!
//! One export table parses into exactly one of three shapes:
//!
//! - **Collection**: the table repeats an `LiItem_*` block, one record per block
//! - **Flat**: the table is a single record of top-level tags
//! - **Missing**: the file did not exist
//!
//! Each shape serializes to its own JSON document layout:
//!
//! ```text
//! {"items": [...], "meta": {"source", "type": "collection", "itemTag", "count"}}
//! {"data": {...},  "meta": {"source", "type": "flat", "count"}}
//! {"meta": {"source", "error": "file not found"}}
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

mod document;
mod error;

pub use document::{DocumentKind, DocumentMeta, SourceDocument};
pub use error::DocumentError;


/// Field name to whitespace-normalized value.
///
/// An empty value is a real value; a missing key is a separate state. Keys
/// serialize in sorted order.
pub type FieldMap = BTreeMap<String, String>;

/// Error marker stored in the document of a source file that does not exist.
pub const MISSING_MARKER: &str = "file not found";

/// Result of extracting one export table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SourceDocument", into = "SourceDocument")]
pub enum ParsedSource {
    /// Repeated records, one per item block that yielded at least one field
    Collection {
        /// Source file name
        source: String,
        /// Item tag name as written in the source (`LiItem_...`)
        item_tag: String,
        /// Records in order of appearance
        items: Vec<FieldMap>,
    },
    /// A single record built from the top-level tags
    Flat {
        /// Source file name
        source: String,
        /// The record
        data: FieldMap,
    },
    /// The source file does not exist
    Missing {
        /// Source file name
        source: String,
    },
}

/// Which of the three shapes a [`ParsedSource`] has.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// See [`ParsedSource::Collection`]
    Collection,
    /// See [`ParsedSource::Flat`]
    Flat,
    /// See [`ParsedSource::Missing`]
    Missing,
}

impl SourceKind {
    /// Unit used when reporting the count of a source of this kind
    pub fn count_unit(&self) -> &'static str {
        match self {
            SourceKind::Collection => "items",
            SourceKind::Flat => "fields",
            SourceKind::Missing => "entries",
        }
    }
}

impl ParsedSource {
    /// Missing source for the given file name
    pub fn missing(source: impl Into<String>) -> Self {
        ParsedSource::Missing {
            source: source.into(),
        }
    }

    /// Source file name
    pub fn source(&self) -> &str {
        match self {
            ParsedSource::Collection { source, .. }
            | ParsedSource::Flat { source, .. }
            | ParsedSource::Missing { source } => source,
        }
    }

    /// Shape of this source
    pub fn kind(&self) -> SourceKind {
        match self {
            ParsedSource::Collection { .. } => SourceKind::Collection,
            ParsedSource::Flat { .. } => SourceKind::Flat,
            ParsedSource::Missing { .. } => SourceKind::Missing,
        }
    }

    /// Number of records for a collection, number of fields for a flat
    /// record, zero when missing.
    pub fn count(&self) -> usize {
        match self {
            ParsedSource::Collection { items, .. } => items.len(),
            ParsedSource::Flat { data, .. } => data.len(),
            ParsedSource::Missing { .. } => 0,
        }
    }

    /// Collection records; empty for any other shape
    pub fn items(&self) -> &[FieldMap] {
        match self {
            ParsedSource::Collection { items, .. } => items,
            _ => &[],
        }
    }

    /// Flat record, if this source is one
    pub fn flat(&self) -> Option<&FieldMap> {
        match self {
            ParsedSource::Flat { data, .. } => Some(data),
            _ => None,
        }
    }

    /// Records of this source read as a table: the items of a collection, a
    /// flat record holding at least one field, nothing otherwise
    pub fn records(&self) -> &[FieldMap] {
        match self {
            ParsedSource::Collection { items, .. } => items,
            ParsedSource::Flat { data, .. } if !data.is_empty() => std::slice::from_ref(data),
            _ => &[],
        }
    }

    /// Whether the source file was absent
    pub fn is_missing(&self) -> bool {
        matches!(self, ParsedSource::Missing { .. })
    }

    /// Pretty-printed JSON document (two-space indent, non-ASCII kept as-is)
    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a JSON document written by [`ParsedSource::to_json`]
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Read back a per-source JSON document from disk.
pub fn read_source_document(path: impl AsRef<Path>) -> Result<ParsedSource, DocumentError> {
    let content = std::fs::read_to_string(path.as_ref())?;
    ParsedSource::from_json(&content)
}
