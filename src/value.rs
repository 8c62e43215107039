//! Value model for the canonical serializer
//!
//! [`Value`] is the universe of in-memory values the codec accepts. It is
//! wider than JSON: byte strings, tuples, sets, arbitrarily-keyed maps,
//! and opaque display-only values are all representable, and the codec
//! decides how each degrades to JSON text.

use std::fmt;

/// An in-memory value accepted by the canonical serializer
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
    /// Variable-length ordered sequence
    List(Vec<Value>),
    /// Fixed-length ordered sequence
    Tuple(Vec<Value>),
    /// Unordered unique collection; insertion order is kept so the
    /// display rendering is deterministic
    Set(Vec<Value>),
    /// Mapping in insertion order; keys may be any `Value`
    Map(Vec<(Value, Value)>),
    /// Any other object, captured as its display-string rendering
    Opaque(String),
}

impl Value {
    /// Capture an arbitrary displayable object as an opaque value
    pub fn opaque(source: impl fmt::Display) -> Self {
        Value::Opaque(source.to_string())
    }

    pub fn bytes(raw: impl Into<Vec<u8>>) -> Self {
        Value::Bytes(raw.into())
    }

    pub fn tuple(items: Vec<Value>) -> Self {
        Value::Tuple(items)
    }

    pub fn set(items: Vec<Value>) -> Self {
        Value::Set(items)
    }

    pub fn map(pairs: Vec<(Value, Value)>) -> Self {
        Value::Map(pairs)
    }

    /// Whether every key of a `Map` is a string (other variants: false)
    pub fn is_string_keyed(&self) -> bool {
        match self {
            Value::Map(pairs) => pairs.iter().all(|(key, _)| matches!(key, Value::Str(_))),
            _ => false,
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Value {
    /// Textual rendering used by the codec's lossy fallback coercions
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => write!(f, "{s:?}"),
            Value::Bytes(raw) => write!(f, "{:?}", String::from_utf8_lossy(raw)),
            Value::List(items) => {
                write!(f, "[")?;
                write_joined(f, items)?;
                write!(f, "]")
            }
            Value::Tuple(items) => {
                write!(f, "(")?;
                write_joined(f, items)?;
                write!(f, ")")
            }
            Value::Set(items) => {
                write!(f, "{{")?;
                write_joined(f, items)?;
                write!(f, "}}")
            }
            Value::Map(pairs) => {
                write!(f, "{{")?;
                for (i, (key, value)) in pairs.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                write!(f, "}}")
            }
            Value::Opaque(rendered) => write!(f, "{rendered}"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<u32> for Value {
    fn from(u: u32) -> Self {
        Value::Int(i64::from(u))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                // u64 beyond i64::MAX degrades to f64
                None => n.as_f64().map_or(Value::Null, Value::Float),
            },
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(fields) => Value::Map(
                fields
                    .into_iter()
                    .map(|(key, value)| (Value::Str(key), Value::from(value)))
                    .collect(),
            ),
        }
    }
}
