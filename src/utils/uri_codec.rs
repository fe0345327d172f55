//! Canonical URI encoding for stored redirect locations.
//!
//! Locations are persisted in the same form a browser's `encodeURI` produces:
//! reserved URI delimiters stay readable, everything else outside the unreserved
//! set is percent-encoded (including `%` itself). Decoding is the exact inverse
//! of [`encode_uri`], so a stored location always reads back unchanged.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};

/// Characters left untouched by [`encode_uri`].
///
/// Matches the ECMAScript `encodeURI` set: alphanumerics, the unreserved marks
/// `- _ . ! ~ * ' ( )` and the reserved delimiters `; , / ? : @ & = + $ #`.
const URI_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b';')
    .remove(b',')
    .remove(b'/')
    .remove(b'?')
    .remove(b':')
    .remove(b'@')
    .remove(b'&')
    .remove(b'=')
    .remove(b'+')
    .remove(b'$')
    .remove(b'#');

/// Encodes a location for storage.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(
///     encode_uri("https://example.com/a b?q=ü"),
///     "https://example.com/a%20b?q=%C3%BC"
/// );
/// ```
pub fn encode_uri(input: &str) -> String {
    utf8_percent_encode(input, URI_SET).to_string()
}

/// Decodes a stored location.
///
/// Invalid UTF-8 sequences in foreign records are replaced rather than rejected.
pub fn decode_uri(input: &str) -> String {
    percent_decode_str(input).decode_utf8_lossy().into_owned()
}
