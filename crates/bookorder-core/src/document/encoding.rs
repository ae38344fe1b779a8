//! Character encoding detection for raw XML bytes.
//!
//! A byte order mark decides the encoding when present. Otherwise the
//! `encoding` pseudo-attribute of the XML declaration is used, and UTF-8
//! is assumed when there is neither.
use std::borrow::Cow;

use encoding_rs::{Encoding, UTF_8};

use crate::document::error::DocumentError;

/// The declaration must appear within this many bytes to be honoured.
const DECLARATION_SCAN_LIMIT: usize = 200;

/// Decode `bytes` to text, stripping any byte order mark.
pub fn decode_xml(bytes: &[u8]) -> Result<Cow<'_, str>, DocumentError> {
    let (encoding, content) = match Encoding::for_bom(bytes) {
        Some((encoding, bom_len)) => (encoding, &bytes[bom_len..]),
        None => (declared_encoding(bytes)?.unwrap_or(UTF_8), bytes),
    };

    let (text, had_errors) = encoding.decode_without_bom_handling(content);
    if had_errors {
        return Err(DocumentError::Encoding {
            encoding: encoding.name(),
        });
    }
    if encoding != UTF_8 {
        log::debug!("Decoded document from {}", encoding.name());
    }
    Ok(text)
}

/// Resolve the encoding named by the XML declaration, if any.
///
/// Without a byte order mark the declaration was read as single-byte text,
/// so a label that is not ASCII compatible (UTF-16 and friends) contradicts
/// the bytes and UTF-8 is kept instead.
fn declared_encoding(bytes: &[u8]) -> Result<Option<&'static Encoding>, DocumentError> {
    let Some(label) = declaration_label(bytes) else {
        return Ok(None);
    };
    let encoding = Encoding::for_label(label.as_bytes())
        .ok_or_else(|| DocumentError::UnsupportedEncoding(label.clone()))?;
    if !encoding.is_ascii_compatible() {
        log::warn!("Ignoring declared encoding '{}' without a byte order mark", label);
        return Ok(None);
    }
    Ok(Some(encoding))
}

/// Pull the `encoding="..."` value out of a leading `<?xml ... ?>` declaration.
fn declaration_label(bytes: &[u8]) -> Option<String> {
    let scan = &bytes[..bytes.len().min(DECLARATION_SCAN_LIMIT)];
    if !scan.starts_with(b"<?xml") {
        return None;
    }
    let end = scan.windows(2).position(|w| w == b"?>")?;
    let decl = &scan[..end];

    let needle = b"encoding";
    let pos = decl.windows(needle.len()).position(|w| w == needle)?;
    let rest = decl[pos + needle.len()..].trim_ascii_start();
    let rest = rest.strip_prefix(b"=")?.trim_ascii_start();

    let (&quote, rest) = rest.split_first()?;
    if quote != b'"' && quote != b'\'' {
        return None;
    }
    let value = &rest[..rest.iter().position(|&b| b == quote)?];
    if value.is_empty() || !value.is_ascii() {
        return None;
    }
    Some(String::from_utf8_lossy(value).into_owned())
}
