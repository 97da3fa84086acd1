/// Collapses every whitespace run to a single space and trims both ends.
///
/// Line breaks and tabs inside exported values become plain spaces, so every
/// extracted value is a single line. Applying it twice changes nothing.
///
/// The ASCII information separators (U+001C to U+001F) count as whitespace
/// too.
pub fn collapse_whitespace(s: &str) -> String {
    let mut normalized = String::with_capacity(s.len());
    for segment in s.split(is_separator).filter(|segment| !segment.is_empty()) {
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        normalized.push_str(segment);
    }
    normalized
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}
