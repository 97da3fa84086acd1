//! Source text decoding
//!
//! Export tables are not always UTF-8: older LICIEL installations write
//! `windows-1252` or `ISO-8859-1` and say so in the XML declaration. The
//! encoding is chosen in this order:
//!
//! 1. a byte-order mark (UTF-8, UTF-16LE, UTF-16BE)
//! 2. the `encoding` attribute of the XML declaration
//! 3. UTF-8
//!
//! Malformed byte sequences are dropped instead of failing the run; every
//! correctly encoded character is kept, including a literal U+FFFD.

use encoding_rs::{DecoderResult, Encoding, UTF_8};
use log::debug;
use quick_xml::events::Event;
use quick_xml::Reader;

/// Decode the raw bytes of an export table into text.
pub fn decode_source(bytes: &[u8]) -> String {
    let (encoding, body) = match Encoding::for_bom(bytes) {
        Some((encoding, bom_len)) => (encoding, &bytes[bom_len..]),
        None => (declared_encoding(bytes).unwrap_or(UTF_8), bytes),
    };

    decode_dropping_malformed(encoding, body)
}

fn decode_dropping_malformed(encoding: &'static Encoding, body: &[u8]) -> String {
    let mut decoder = encoding.new_decoder_without_bom_handling();
    let mut text = String::with_capacity(
        decoder
            .max_utf8_buffer_length_without_replacement(body.len())
            .unwrap_or(body.len()),
    );

    let mut remaining = body;
    let mut dropped = 0usize;
    loop {
        let (result, read) =
            decoder.decode_to_string_without_replacement(remaining, &mut text, true);
        remaining = &remaining[read..];
        match result {
            DecoderResult::InputEmpty => break,
            DecoderResult::Malformed(_, _) => dropped += 1,
            DecoderResult::OutputFull => {
                let needed = decoder
                    .max_utf8_buffer_length_without_replacement(remaining.len())
                    .unwrap_or(remaining.len());
                text.reserve(needed.max(4));
            }
        }
    }

    if dropped > 0 {
        debug!(
            "Dropped {} malformed {} sequences from source text",
            dropped,
            encoding.name()
        );
    }
    text
}

/// Encoding named by the XML declaration, if the text starts with one.
///
/// A declaration readable as bytes cannot really be UTF-16, so such labels
/// fall back to UTF-8.
pub fn declared_encoding(bytes: &[u8]) -> Option<&'static Encoding> {
    let mut reader = Reader::from_reader(bytes);

    let Ok(Event::Decl(decl)) = reader.read_event() else {
        return None;
    };
    let label = decl.encoding()?.ok()?;
    let encoding = Encoding::for_label(&label)?.output_encoding();

    debug!("XML declaration selects {}", encoding.name());
    Some(encoding)
}
