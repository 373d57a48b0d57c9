//! Query-string codec for the editing state.
//!
//! Values are encoded with the `encodeURIComponent` character set so links
//! produced here match links produced by the browser editor. One quirk is
//! kept on purpose: a single trailing encoded newline (`%0A`) is stripped
//! from each value, so content ending in a newline does not round-trip
//! byte-exact.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

use crate::state::EditingState;

/// Characters `encodeURIComponent` leaves alone: A-Z a-z 0-9 - _ . ! ~ * ' ( )
const COMPONENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// A newline after percent-encoding.
const ENCODED_NEWLINE: &str = "%0A";

/// Fields recovered from a query string. Absent keys are empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DecodedFields {
    pub title: String,
    pub author: String,
    pub content: String,
}

/// Decode `title`, `author` and `content` from a query string.
///
/// The leading `?` is optional. `+` means space, malformed escapes are kept
/// literally, the last occurrence of a repeated key wins and unknown keys
/// are ignored. Never fails.
#[must_use]
pub fn decode(query: &str) -> DecodedFields {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut fields = DecodedFields::default();

    for pair in query.split('&').filter(|pair| !pair.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let slot = match decode_component(key).as_str() {
            "title" => &mut fields.title,
            "author" => &mut fields.author,
            "content" => &mut fields.content,
            _ => continue,
        };
        *slot = decode_component(value);
    }

    fields
}

/// Encode the persisted fields as a query string.
///
/// Returns `""` when every field is empty, otherwise `?key=value&...` in
/// the fixed order title, author, content. Empty fields are skipped.
#[must_use]
pub fn encode(state: &EditingState) -> String {
    let pairs: Vec<String> = state
        .persisted()
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| {
            let encoded = encode_component(value);
            let encoded = encoded.strip_suffix(ENCODED_NEWLINE).unwrap_or(&encoded);
            format!("{key}={encoded}")
        })
        .collect();

    if pairs.is_empty() {
        String::new()
    } else {
        format!("?{}", pairs.join("&"))
    }
}

/// URL that replaces the current location: `path` plus the encoded state.
///
/// Any previous query or fragment is dropped.
#[must_use]
pub fn state_url(path: &str, state: &EditingState) -> String {
    format!("{path}{}", encode(state))
}

/// Percent-encode a single query component.
#[must_use]
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT_ENCODE_SET).to_string()
}

fn decode_component(value: &str) -> String {
    let value = value.replace('+', " ");
    percent_decode_str(&value).decode_utf8_lossy().into_owned()
}
