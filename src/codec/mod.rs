//! Precision-safe JSON codec.
//!
//! Identifiers issued by the backend are 64-bit (and occasionally wider)
//! integers. A double-precision float only holds integers up to 2^53 exactly,
//! so any JSON number with 16 or more digits has to be carried as exact
//! decimal text on both the way out and the way in.
//!
//! `serde_json` is built with `arbitrary_precision`, which means a
//! [`serde_json::Number`] keeps the literal digits it was parsed from. On top of
//! that the codec offers two modes:
//!
//! - [`BigIntMode::Exact`] keeps large integers as JSON numbers end to end.
//! - [`BigIntMode::String`] converts them to JSON strings when decoding and
//!   strips the quotes again when encoding, matching the wire behavior of the
//!   json-bigint `storeAsString` option.

mod big_id;

use std::{borrow::Cow, fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub use big_id::BigId;

/// Integer literals with at least this many digits are treated as
/// big-integer-sensitive.
pub const BIG_INTEGER_MIN_DIGITS: usize = 16;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid identifier: {0:?}")]
    InvalidIdentifier(String),

    #[error("Unknown big integer mode: {0}")]
    UnknownMode(String),
}

/// How large integers are represented after decoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BigIntMode {
    /// Large integers stay JSON numbers holding their exact digits.
    #[default]
    Exact,
    /// Large integers become decimal strings on decode and bare integers on encode.
    String,
}

impl Display for BigIntMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BigIntMode::Exact => write!(f, "exact"),
            BigIntMode::String => write!(f, "string"),
        }
    }
}

impl FromStr for BigIntMode {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "exact" => Ok(BigIntMode::Exact),
            "string" => Ok(BigIntMode::String),
            other => Err(CodecError::UnknownMode(other.to_string())),
        }
    }
}

/// Serializes `value` into outgoing JSON text.
///
/// Integers are written with their exact digits. In [`BigIntMode::String`] the
/// text additionally goes through [`unquote_big_integers`] so identifiers held
/// as strings reach the backend as bare JSON integers.
pub fn encode<T: Serialize + ?Sized>(value: &T, mode: BigIntMode) -> Result<String, CodecError> {
    let text = serde_json::to_string(value)?;
    match mode {
        BigIntMode::Exact => Ok(text),
        BigIntMode::String => Ok(unquote_big_integers(&text).into_owned()),
    }
}

/// Parses a raw response body.
///
/// Never rounds an integer through floating point. A body that is not JSON
/// (for example a plain `OK`) comes back unchanged as a JSON string instead of
/// failing the call.
pub fn decode(text: &str, mode: BigIntMode) -> Value {
    match serde_json::from_str::<Value>(text) {
        Ok(value) => match mode {
            BigIntMode::Exact => value,
            BigIntMode::String => stringify_big_integers(value),
        },
        Err(_) => Value::String(text.to_string()),
    }
}

/// Replaces every big integer number in `value` with its decimal string.
pub fn stringify_big_integers(value: Value) -> Value {
    match value {
        Value::Number(n) => {
            let digits = n.to_string();
            if is_big_integer_literal(&digits) {
                Value::String(digits)
            } else {
                Value::Number(n)
            }
        },
        Value::Array(items) => Value::Array(items.into_iter().map(stringify_big_integers).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (key, stringify_big_integers(value)))
                .collect(),
        ),
        other => other,
    }
}

/// Returns the exact decimal digits of an integer held either as a JSON number
/// or as a digit string.
pub fn exact_digits(value: &Value) -> Option<String> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        _ => return None,
    };
    is_integer_literal(&text).then_some(text)
}

/// True for a JSON integer literal (`-?(0|[1-9][0-9]*)`).
pub fn is_integer_literal(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    !digits.is_empty() &&
        digits.bytes().all(|b| b.is_ascii_digit()) &&
        (digits.len() == 1 || !digits.starts_with('0'))
}

/// True for an integer literal with at least [`BIG_INTEGER_MIN_DIGITS`] digits.
pub fn is_big_integer_literal(text: &str) -> bool {
    is_integer_literal(text) && text.trim_start_matches('-').len() >= BIG_INTEGER_MIN_DIGITS
}

/// Strips the quotes around big integer strings in value position.
///
/// Only a string that directly follows a `:` (with optional whitespace) and
/// whose whole content is a big integer literal is rewritten. Object keys,
/// array elements and strings that merely contain long digit runs are left
/// alone. The scan tracks string boundaries and escapes, so digits inside
/// another string can never be mistaken for a value.
///
/// The rewrite cannot tell an identifier from a string field that happens to
/// consist only of 16+ digits; [`BigIntMode::Exact`] avoids the question by
/// never quoting identifiers in the first place.
pub fn unquote_big_integers(json: &str) -> Cow<'_, str> {
    let bytes = json.as_bytes();
    let mut out: Option<String> = None;
    let mut copied_to = 0;
    let mut last_significant: Option<u8> = None;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if b != b'"' {
            if !b.is_ascii_whitespace() {
                last_significant = Some(b);
            }
            i += 1;
            continue;
        }

        let start = i;
        let Some(end) = string_end(bytes, start) else {
            break;
        };
        if last_significant == Some(b':') {
            let content = &json[start + 1..end];
            if is_big_integer_literal(content) {
                let buf = out.get_or_insert_with(|| String::with_capacity(json.len()));
                buf.push_str(&json[copied_to..start]);
                buf.push_str(content);
                copied_to = end + 1;
            }
        }
        last_significant = Some(b'"');
        i = end + 1;
    }

    match out {
        Some(mut buf) => {
            buf.push_str(&json[copied_to..]);
            Cow::Owned(buf)
        },
        None => Cow::Borrowed(json),
    }
}

/// Index of the closing quote of the string opening at `start`.
fn string_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return Some(i),
            _ => i += 1,
        }
    }
    None
}
