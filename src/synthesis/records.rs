//! Record lists and lookups over export tables.

use std::collections::HashMap;

use serde_json::Value;

use crate::join::Fallback;
use crate::model::FieldMap;

/// Records of a table previously converted to JSON.
///
/// Accepts a bare array of objects or an object with an `items` array; any
/// other shape has no records. String values are kept, numbers and booleans
/// stringified, anything else skipped.
pub fn records_from_json(json: &str) -> serde_json::Result<Vec<FieldMap>> {
    let value: Value = serde_json::from_str(json)?;
    let rows = match &value {
        Value::Array(rows) => rows.as_slice(),
        Value::Object(document) => match document.get("items") {
            Some(Value::Array(rows)) => rows.as_slice(),
            _ => &[],
        },
        _ => &[],
    };

    Ok(rows
        .iter()
        .filter_map(Value::as_object)
        .map(|object| {
            object
                .iter()
                .filter_map(|(key, value)| {
                    let text = match value {
                        Value::String(text) => text.clone(),
                        Value::Number(number) => number.to_string(),
                        Value::Bool(flag) => flag.to_string(),
                        _ => return None,
                    };
                    Some((key.clone(), text))
                })
                .collect()
        })
        .collect())
}

/// First filled-in value among `keys`, or "".
pub(crate) fn first_of<'a>(record: &'a FieldMap, keys: &[&str]) -> &'a str {
    keys.iter()
        .fold(Fallback::none(), |chain, key| chain.or_field(record, key))
        .value()
        .unwrap_or("")
}

/// Index records by the first filled-in of `keys`; the last record wins.
pub(crate) fn index_by<'a>(
    records: &'a [FieldMap],
    keys: &[&str],
) -> HashMap<&'a str, &'a FieldMap> {
    records
        .iter()
        .filter_map(|record| {
            let key = first_of(record, keys);
            (!key.is_empty()).then_some((key, record))
        })
        .collect()
}

/// Split a `;`-separated list, trimming entries and dropping empty ones.
pub(crate) fn split_list(text: &str) -> Vec<&str> {
    text.split(';')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .collect()
}

/// Replace every run of two or more whitespace characters with one space.
pub(crate) fn squeeze_spaces(text: &str) -> String {
    let mut squeezed = String::with_capacity(text.len());
    let mut run = String::new();
    for c in text.chars() {
        if c.is_whitespace() {
            run.push(c);
            continue;
        }
        flush_run(&mut squeezed, &mut run);
        squeezed.push(c);
    }
    flush_run(&mut squeezed, &mut run);
    squeezed
}

fn flush_run(out: &mut String, run: &mut String) {
    match run.chars().count() {
        0 => {}
        1 => out.push_str(run),
        _ => out.push(' '),
    }
    run.clear();
}
