//! # Tag-Block Extraction
//!
//! Turns the text of one export table into a [`ParsedSource`] without an XML
//! parser. The exports are tag-delimited but not guaranteed well-formed, and
//! their shape is fixed, so scanning for tag pairs is enough:
//!
//! ```text
//! <LiTable_Z_Amiante>
//!   <LiItem_table_Z_Amiante>          <- item tag: one record per block
//!     <Num_Materiau>M1</Num_Materiau>
//!     <LiColonne_Ouvrages>Sols</LiColonne_Ouvrages>
//!   </LiItem_table_Z_Amiante>
//!   ...
//! </LiTable_Z_Amiante>
//! ```
//!
//! Tables without an `LiItem_*` tag are read as one flat record of their
//! top-level tags. Field values are whitespace-normalized, and every
//! `LiColonne_X` field is also stored under its short name `X`.

use log::{debug, warn};
use regex::Regex;

use crate::model::{FieldMap, ParsedSource};

mod normalize;
mod scanner;

pub use normalize::collapse_whitespace;
pub use scanner::TagPairs;


/// Name prefix of the tag delimiting one record of a collection table
pub const ITEM_TAG_PREFIX: &str = "LiItem_";

/// Name prefix of column fields; such fields are also stored without it
pub const COLUMN_PREFIX: &str = "LiColonne_";

/// Extract one export table.
///
/// `source` is the file name recorded in the result. Empty `text` means the
/// file was absent and yields [`ParsedSource::Missing`].
pub fn extract_source(source: &str, text: &str) -> ParsedSource {
    if text.is_empty() {
        debug!("{}: no content, reporting as missing", source);
        return ParsedSource::missing(source);
    }

    let Some(item_tag) = detect_item_tag(text) else {
        let data = extract_fields(text);
        debug!("{}: flat record with {} fields", source, data.len());
        return ParsedSource::Flat {
            source: source.to_string(),
            data,
        };
    };

    let blocks = item_blocks(text, item_tag);
    let items: Vec<FieldMap> = blocks
        .iter()
        .map(|block| extract_fields(block))
        .filter(|fields| !fields.is_empty())
        .collect();

    debug!(
        "{}: item tag {}, {} blocks, {} kept",
        source,
        item_tag,
        blocks.len(),
        items.len()
    );

    ParsedSource::Collection {
        source: source.to_string(),
        item_tag: item_tag.to_string(),
        items,
    }
}

/// Name of the first opening tag starting with [`ITEM_TAG_PREFIX`], compared
/// ASCII case-insensitively, as written in the text.
pub fn detect_item_tag(text: &str) -> Option<&str> {
    let prefix = ITEM_TAG_PREFIX.as_bytes();

    text.match_indices('<').find_map(|(open, _)| {
        let name_start = open + 1;
        let candidate = text.as_bytes().get(name_start..name_start + prefix.len())?;
        if !candidate.eq_ignore_ascii_case(prefix) {
            return None;
        }

        let rest = &text[name_start..];
        let name_len = rest
            .find(|c: char| c.is_whitespace() || c == '/' || c == '>')
            .unwrap_or(rest.len());
        Some(&rest[..name_len])
    })
}

/// Every field pair of `segment`, values normalized, column fields aliased.
///
/// A name seen twice keeps its last value.
pub fn extract_fields(segment: &str) -> FieldMap {
    let mut fields = FieldMap::new();
    for (name, raw) in TagPairs::new(segment) {
        let value = collapse_whitespace(raw);
        let alias = name.strip_prefix(COLUMN_PREFIX);
        fields.insert(name.to_string(), value.clone());
        if let Some(short) = alias {
            fields.insert(short.to_string(), value);
        }
    }
    fields
}

/// Contents of every `<item_tag>...</item_tag>` block, case-insensitive,
/// shortest match, in order.
fn item_blocks<'t>(text: &'t str, item_tag: &str) -> Vec<&'t str> {
    let tag = regex::escape(item_tag);
    let pattern = format!("(?is)<{tag}>(.*?)</{tag}>");

    match Regex::new(&pattern) {
        Ok(block_regex) => block_regex
            .captures_iter(text)
            .filter_map(|captures| captures.get(1))
            .map(|body| body.as_str())
            .collect(),
        Err(err) => {
            warn!("Cannot match item blocks for tag {}: {}", item_tag, err);
            Vec::new()
        }
    }
}
