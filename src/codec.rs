//! Canonical JSON codec
//!
//! Deterministic, total encoding of [`Value`]s to compact JSON text, plus
//! the inverse parse, file-backed variants, a JSON-Lines stream form, and
//! a canonical SHA-256 hash over the encoded text.
//!
//! Coercion rules for values JSON cannot represent natively:
//!
//! - byte strings decode as UTF-8 and emit as JSON strings (invalid UTF-8
//!   is an encoding error);
//! - tuples emit as JSON arrays;
//! - sets and maps with non-string keys fall back to their display-string
//!   rendering wrapped in a JSON string (lossy, not round-trippable);
//! - opaque values emit their captured rendering as a JSON string;
//! - non-finite floats are rejected outright.

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde_json::{Map as JsonMap, Number, Value as JsonValue};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::{Result, ToolbeltError};
use crate::value::Value;

/// Encode a value as compact JSON text
///
/// Output has no inserted whitespace, map keys keep insertion order, and
/// there is no trailing newline. Fails on non-finite floats and on byte
/// strings that are not valid UTF-8.
pub fn encode(value: &Value) -> Result<String> {
    let coerced = coerce(value)?;
    serde_json::to_string(&coerced).map_err(|err| ToolbeltError::Encode(err.to_string()))
}

/// Parse JSON text into a [`Value`]
pub fn decode(text: &str) -> Result<Value> {
    let json: JsonValue = serde_json::from_str(text)?;
    Ok(Value::from(json))
}

/// Encode a value and write it to a file
///
/// Encoding happens fully before any write, so an unencodable value
/// leaves no file behind.
pub fn encode_to_file(path: impl AsRef<Path>, value: &Value) -> Result<()> {
    let encoded = encode(value)?;
    fs::write(path.as_ref(), encoded)?;
    debug!(path = %path.as_ref().display(), "wrote JSON file");
    Ok(())
}

/// Read a file and parse its contents as JSON
pub fn decode_from_file(path: impl AsRef<Path>) -> Result<Value> {
    let text = fs::read_to_string(path)?;
    decode(&text)
}

/// Encode values as JSON Lines
///
/// Entries are joined by a single newline, with no trailing newline
/// after the last entry.
pub fn encode_lines<'a>(values: impl IntoIterator<Item = &'a Value>) -> Result<String> {
    let lines = values
        .into_iter()
        .map(encode)
        .collect::<Result<Vec<String>>>()?;
    Ok(lines.join("\n"))
}

/// Encode values as JSON Lines and write them to a file
pub fn encode_lines_to_file<'a>(
    path: impl AsRef<Path>,
    values: impl IntoIterator<Item = &'a Value>,
) -> Result<()> {
    let encoded = encode_lines(values)?;
    fs::write(path.as_ref(), encoded)?;
    debug!(path = %path.as_ref().display(), "wrote JSON Lines file");
    Ok(())
}

/// Lazily decode JSON Lines text
///
/// Each line parses independently; blank lines are skipped.
pub fn decode_lines(text: &str) -> impl Iterator<Item = Result<Value>> + '_ {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(decode)
}

/// Lazily decode a JSON Lines file
pub fn decode_lines_from_file(
    path: impl AsRef<Path>,
) -> Result<impl Iterator<Item = Result<Value>>> {
    let file = File::open(path.as_ref())?;
    let reader = BufReader::new(file);
    Ok(reader.lines().filter_map(|line| match line {
        Ok(text) if text.trim().is_empty() => None,
        Ok(text) => Some(decode(&text)),
        Err(err) => Some(Err(err.into())),
    }))
}

/// Canonical SHA-256 hash of a value
///
/// The value is canonically encoded and the digest is computed over the
/// encoded UTF-8 bytes, rendered as lowercase hex. Values that cannot be
/// canonically encoded fail with a hashing error.
pub fn canonical_hash(value: &Value) -> Result<String> {
    let encoded = encode(value).map_err(|err| ToolbeltError::Hash(err.to_string()))?;
    let mut hasher = Sha256::new();
    hasher.update(encoded.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}

/// Apply the coercion rules, most specific type first
fn coerce(value: &Value) -> Result<JsonValue> {
    match value {
        Value::Null => Ok(JsonValue::Null),
        Value::Bool(b) => Ok(JsonValue::Bool(*b)),
        Value::Int(i) => Ok(JsonValue::Number(Number::from(*i))),
        Value::Float(x) => Number::from_f64(*x)
            .map(JsonValue::Number)
            .ok_or_else(|| ToolbeltError::Encode(format!("non-finite float: {x}"))),
        Value::Str(s) => Ok(JsonValue::String(s.clone())),
        Value::Bytes(raw) => match std::str::from_utf8(raw) {
            Ok(text) => Ok(JsonValue::String(text.to_string())),
            Err(err) => Err(ToolbeltError::Encode(format!("invalid UTF-8 bytes: {err}"))),
        },
        Value::List(items) | Value::Tuple(items) => items
            .iter()
            .map(coerce)
            .collect::<Result<Vec<JsonValue>>>()
            .map(JsonValue::Array),
        Value::Map(pairs) if value.is_string_keyed() => {
            let mut fields = JsonMap::with_capacity(pairs.len());
            for (key, entry) in pairs {
                if let Value::Str(name) = key {
                    fields.insert(name.clone(), coerce(entry)?);
                }
            }
            Ok(JsonValue::Object(fields))
        }
        // Lossy escape hatch: sets and non-string-keyed maps degrade to
        // their display rendering wrapped in a JSON string
        Value::Set(_) | Value::Map(_) => Ok(JsonValue::String(value.to_string())),
        Value::Opaque(rendered) => Ok(JsonValue::String(rendered.clone())),
    }
}
