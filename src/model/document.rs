//! On-disk JSON layout of a [`ParsedSource`].

use serde::{Deserialize, Serialize};

use super::{DocumentError, FieldMap, ParsedSource, MISSING_MARKER};

/// Value of `meta.type`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// `"collection"`
    Collection,
    /// `"flat"`
    Flat,
}

/// The `meta` object of a per-source document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMeta {
    /// Source file name
    pub source: String,

    /// Document shape; absent for a missing source
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<DocumentKind>,

    /// Item tag of a collection
    #[serde(rename = "itemTag", default, skip_serializing_if = "Option::is_none")]
    pub item_tag: Option<String>,

    /// Item count of a collection, field count of a flat record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,

    /// Error marker of a missing source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A per-source document as it appears in JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDocument {
    /// Collection records
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<FieldMap>>,

    /// Flat record
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<FieldMap>,

    /// Provenance and shape
    pub meta: DocumentMeta,
}

impl From<ParsedSource> for SourceDocument {
    fn from(parsed: ParsedSource) -> Self {
        match parsed {
            ParsedSource::Collection {
                source,
                item_tag,
                items,
            } => SourceDocument {
                meta: DocumentMeta {
                    source,
                    kind: Some(DocumentKind::Collection),
                    item_tag: Some(item_tag),
                    count: Some(items.len()),
                    error: None,
                },
                items: Some(items),
                data: None,
            },
            ParsedSource::Flat { source, data } => SourceDocument {
                meta: DocumentMeta {
                    source,
                    kind: Some(DocumentKind::Flat),
                    item_tag: None,
                    count: Some(data.len()),
                    error: None,
                },
                items: None,
                data: Some(data),
            },
            ParsedSource::Missing { source } => SourceDocument {
                meta: DocumentMeta {
                    source,
                    kind: None,
                    item_tag: None,
                    count: None,
                    error: Some(MISSING_MARKER.to_string()),
                },
                items: None,
                data: None,
            },
        }
    }
}

impl TryFrom<SourceDocument> for ParsedSource {
    type Error = DocumentError;

    fn try_from(doc: SourceDocument) -> Result<Self, Self::Error> {
        let SourceDocument { items, data, meta } = doc;

        match meta.kind {
            Some(DocumentKind::Collection) => {
                let items = items.ok_or(DocumentError::MissingField {
                    kind: "collection",
                    field: "items",
                })?;
                let item_tag = meta.item_tag.ok_or(DocumentError::MissingField {
                    kind: "collection",
                    field: "meta.itemTag",
                })?;
                check_count(meta.count, items.len())?;
                Ok(ParsedSource::Collection {
                    source: meta.source,
                    item_tag,
                    items,
                })
            }
            Some(DocumentKind::Flat) => {
                let data = data.ok_or(DocumentError::MissingField {
                    kind: "flat",
                    field: "data",
                })?;
                check_count(meta.count, data.len())?;
                Ok(ParsedSource::Flat {
                    source: meta.source,
                    data,
                })
            }
            None if meta.error.is_some() => Ok(ParsedSource::Missing {
                source: meta.source,
            }),
            None => Err(DocumentError::UnknownShape(meta.source)),
        }
    }
}

fn check_count(declared: Option<usize>, actual: usize) -> Result<(), DocumentError> {
    match declared {
        Some(declared) if declared != actual => {
            Err(DocumentError::CountMismatch { declared, actual })
        }
        _ => Ok(()),
    }
}
