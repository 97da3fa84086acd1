//! Fallback chains over field mappings.
//!
//! Throughout the exports an empty value means "not filled in", so a chain
//! skips a field that is absent *or* empty and takes the first one holding
//! text.

use crate::model::FieldMap;

/// Whether `key` is missing from `fields` or maps to an empty string.
pub fn is_effectively_absent(fields: &FieldMap, key: &str) -> bool {
    fields.get(key).map_or(true, |value| value.is_empty())
}

/// Value of `key` unless it is effectively absent.
pub fn present<'a>(fields: &'a FieldMap, key: &str) -> Option<&'a str> {
    if is_effectively_absent(fields, key) {
        None
    } else {
        fields.get(key).map(String::as_str)
    }
}

/// An ordered list of candidate lookups; the first present value wins.
///
/// ```
/// use amiante_json::join::Fallback;
/// use amiante_json::model::FieldMap;
///
/// let mut material = FieldMap::new();
/// material.insert("Localisation".into(), "".into());
/// material.insert("Detail_loc".into(), "Cuisine".into());
///
/// let local = Fallback::field(&material, "Localisation")
///     .or_field(&material, "Detail_loc")
///     .or_empty();
/// assert_eq!(local, "Cuisine");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Fallback<'a> {
    found: Option<&'a str>,
}

impl<'a> Fallback<'a> {
    /// Start an empty chain
    pub fn none() -> Self {
        Self { found: None }
    }

    /// Start a chain with one field lookup
    pub fn field(fields: &'a FieldMap, key: &str) -> Self {
        Self {
            found: present(fields, key),
        }
    }

    /// Try another field if nothing was found yet
    pub fn or_field(self, fields: &'a FieldMap, key: &str) -> Self {
        match self.found {
            Some(_) => self,
            None => Self::field(fields, key),
        }
    }

    /// Value found so far, if any
    pub fn value(self) -> Option<&'a str> {
        self.found
    }

    /// Finish with a literal default
    pub fn or_literal(self, default: &str) -> String {
        self.found.unwrap_or(default).to_string()
    }

    /// Finish with a computed default
    pub fn or_else(self, default: impl FnOnce() -> String) -> String {
        match self.found {
            Some(value) => value.to_string(),
            None => default(),
        }
    }

    /// Finish with the empty string as default
    pub fn or_empty(self) -> String {
        self.or_literal("")
    }
}
