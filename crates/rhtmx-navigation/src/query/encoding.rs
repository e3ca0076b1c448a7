/// Percent-encoding for query keys and values
///
/// All functions are **pure**: given same input, always produce same output with no side effects.
///
/// The encoder is URI-component encoding tightened towards RFC3986:
/// - `! ' ( ) *` are escaped (they are reserved sub-delims)
/// - commas are kept literal, so list-like values stay readable
use std::borrow::Cow;

use crate::error::DecodeError;

/// Percent-encodes a query key or value
///
/// Only the unreserved set `A-Z a-z 0-9 - . _ ~` and `,` are left as-is.
///
/// # Examples
///
/// ```
/// use rhtmx_navigation::query::encoding::encode;
///
/// assert_eq!(encode("a b"), "a%20b");
/// assert_eq!(encode("a,b"), "a,b");
/// assert_eq!(encode("a!b"), "a%21b");
/// ```
pub fn encode(input: &str) -> Cow<'_, str> {
    let encoded = urlencoding::encode(input);

    if encoded.contains("%2C") {
        Cow::Owned(encoded.replace("%2C", ","))
    } else {
        encoded
    }
}

/// Decodes a percent-encoded query key or value
///
/// Fails on a `%` that is not followed by two hex digits, or when the
/// decoded bytes are not valid UTF-8.
///
/// # Examples
///
/// ```
/// use rhtmx_navigation::query::encoding::decode;
///
/// assert_eq!(decode("a%20b").unwrap(), "a b");
/// assert!(decode("100%").is_err());
/// ```
pub fn decode(input: &str) -> Result<Cow<'_, str>, DecodeError> {
    validate_escapes(input)?;
    urlencoding::decode(input).map_err(|_| DecodeError::InvalidUtf8)
}

/// Rejects dangling or non-hex escapes, which the underlying decoder
/// would otherwise pass through verbatim
fn validate_escapes(input: &str) -> Result<(), DecodeError> {
    let bytes = input.as_bytes();

    bytes
        .iter()
        .enumerate()
        .filter(|(_, b)| **b == b'%')
        .try_for_each(|(position, _)| {
            match (bytes.get(position + 1), bytes.get(position + 2)) {
                (Some(hi), Some(lo)) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit() => Ok(()),
                _ => Err(DecodeError::MalformedEscape { position }),
            }
        })
}
