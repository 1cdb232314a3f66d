//! Data block extraction
//!
//! The bulletin page is HTML around a plaintext table; only the text between
//! the start and end markers is parsed.

use std::fmt;

/// Why the data block could not be located
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedBulletin {
    /// The opening marker does not occur in the page
    MissingStartMarker,
    /// The closing marker does not occur after the opening marker
    MissingEndMarker,
}

impl fmt::Display for MalformedBulletin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedBulletin::MissingStartMarker => f.write_str("data block start marker not found"),
            MalformedBulletin::MissingEndMarker => f.write_str("data block end marker not found"),
        }
    }
}

/// Return the text strictly between `start_marker` and the first
/// `end_marker` that follows it
pub fn extract_data_block<'a>(
    text: &'a str,
    start_marker: &str,
    end_marker: &str,
) -> Result<&'a str, MalformedBulletin> {
    let start = text
        .find(start_marker)
        .ok_or(MalformedBulletin::MissingStartMarker)?
        + start_marker.len();

    let end = text[start..]
        .find(end_marker)
        .ok_or(MalformedBulletin::MissingEndMarker)?;

    Ok(&text[start..start + end])
}
