//! Base64 for text restricted to the Latin1 range.
//!
//! Each character of the input is treated as a single byte equal to its code
//! point, so only characters U+0000 to U+00FF can be encoded. Anything above
//! that is rejected instead of being transcoded.
use data_encoding::{BASE64, BASE64_NOPAD};

use crate::{
    error::{EncodingError, EncodingErrorKind},
    value::Value,
};

/// Operation name reported by [`encode()`] and [`encode_str()`] errors.
pub const ENCODE_OPERATION: &str = "reqwire base64 encode";

/// Operation name reported by [`decode()`] errors.
pub const DECODE_OPERATION: &str = "reqwire base64 decode";

/// Encode a value as padded standard Base64.
///
/// The value is first converted with [`Value::coerce_to_string()`], so
/// `encode(&Value::from(42))` equals `encode_str("42")`.
pub fn encode(input: &Value) -> Result<String, EncodingError> {
    encode_str(&input.coerce_to_string())
}

/// Encode Latin1 text as padded standard Base64.
pub fn encode_str(input: &str) -> Result<String, EncodingError> {
    let bytes = to_latin1_bytes(input)?;

    Ok(BASE64.encode(&bytes))
}

/// Decode standard Base64 into Latin1 text.
///
/// ASCII whitespace is ignored and the trailing `=` padding may be omitted.
/// Every decoded byte becomes the character with the same code point.
pub fn decode(input: &str) -> Result<String, EncodingError> {
    let compact = input
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .collect::<Vec<u8>>();

    let result = if compact.len() % 4 == 0 {
        BASE64.decode(&compact)
    } else {
        BASE64_NOPAD.decode(&compact)
    };

    let bytes = result.map_err(|error| {
        tracing::debug!(position = error.position, "invalid base64 input");

        EncodingError::new(EncodingErrorKind::InvalidBaseEncodedValue, DECODE_OPERATION)
            .with_position(error.position as u64)
            .with_source(error)
    })?;

    Ok(bytes.into_iter().map(char::from).collect())
}

fn to_latin1_bytes(input: &str) -> Result<Vec<u8>, EncodingError> {
    let invalid = input
        .chars()
        .enumerate()
        .find(|(_index, c)| u32::from(*c) > 0xFF);

    if let Some((position, c)) = invalid {
        tracing::debug!(position, "character outside of the Latin1 range");

        return Err(
            EncodingError::new(EncodingErrorKind::InvalidCharacter, ENCODE_OPERATION)
                .with_position(position as u64)
                .with_snippet(c.escape_unicode().to_string()),
        );
    }

    // Validated above: every code point fits in a byte.
    Ok(input.chars().map(|c| c as u8).collect())
}
