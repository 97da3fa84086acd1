//! Tag pair scanning.
//!
//! Finds `<name>value</name>` pairs the way the pattern
//! `<([^/>]+)>([\s\S]*?)</\1>` does under find-all: the name runs from `<` to
//! the first `/` or `>` and must end at `>`, the value stops at the first
//! `</name>` that follows, and scanning resumes after that closing tag. An
//! opening tag without a closing counterpart is skipped one character at a
//! time. Nothing recurses into a matched value.

/// Iterator over `(name, raw value)` pairs of a text segment, in order.
#[derive(Debug, Clone)]
pub struct TagPairs<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> TagPairs<'a> {
    /// Scan `text` from the start
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }
}

impl<'a> Iterator for TagPairs<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(offset) = self.text[self.pos..].find('<') {
            let open = self.pos + offset;
            match pair_at(self.text, open) {
                Some((name, value, end)) => {
                    self.pos = end;
                    return Some((name, value));
                }
                // '<' is one byte, so open + 1 is a char boundary
                None => self.pos = open + 1,
            }
        }
        self.pos = self.text.len();
        None
    }
}

/// Match a pair whose opening `<` sits at byte `open`.
///
/// Returns the name, the raw value and the byte offset just past the closing tag.
fn pair_at(text: &str, open: usize) -> Option<(&str, &str, usize)> {
    let after = &text[open + 1..];
    let name_len = after.find(|c: char| c == '/' || c == '>')?;
    if name_len == 0 || !after[name_len..].starts_with('>') {
        return None;
    }

    let name = &after[..name_len];
    let value_start = open + 1 + name_len + 1;
    let closing = format!("</{name}>");
    let value_len = text[value_start..].find(&closing)?;
    let value_end = value_start + value_len;

    Some((name, &text[value_start..value_end], value_end + closing.len()))
}
