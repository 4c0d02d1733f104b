//! JSON value tree and lookup helpers

use std::fmt;

/// A parsed JSON value
///
/// Arrays and objects own their children in document order. Object members
/// keep their keys; string payloads keep escape sequences verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<JsonValue>),
    Object(Vec<Member>),
}

/// One `"key": value` pair of an object
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub key: String,
    pub value: JsonValue,
}

/// A JSON number with its integer projection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Number {
    value: f64,
    int: i64,
}

impl Number {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            int: saturate(value),
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Truncated toward zero, saturating at the `i64` range (NaN is 0)
    pub fn as_i64(&self) -> i64 {
        self.int
    }
}

fn saturate(value: f64) -> i64 {
    if value.is_nan() {
        0
    } else if value >= i64::MAX as f64 {
        i64::MAX
    } else if value <= i64::MIN as f64 {
        i64::MIN
    } else {
        value as i64
    }
}

/// Tag of a [`JsonValue`], used in error messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        };
        f.write_str(name)
    }
}

impl JsonValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            JsonValue::Null => ValueKind::Null,
            JsonValue::Bool(_) => ValueKind::Bool,
            JsonValue::Number(_) => ValueKind::Number,
            JsonValue::String(_) => ValueKind::String,
            JsonValue::Array(_) => ValueKind::Array,
            JsonValue::Object(_) => ValueKind::Object,
        }
    }

    /// Member of an object by key, ASCII case-insensitive
    pub fn get_member(&self, key: &str) -> Option<&JsonValue> {
        self.get_member_with(key, false)
    }

    /// Member of an object by key. Returns the first match in document order.
    pub fn get_member_with(&self, key: &str, case_sensitive: bool) -> Option<&JsonValue> {
        self.as_object()?
            .iter()
            .find(|member| {
                if case_sensitive {
                    member.key == key
                } else {
                    member.key.eq_ignore_ascii_case(key)
                }
            })
            .map(|member| &member.value)
    }

    /// Element of an array by index. Negative indices return `None`.
    pub fn get_element(&self, index: i64) -> Option<&JsonValue> {
        let index = usize::try_from(index).ok()?;
        self.as_array()?.iter().nth(index)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, JsonValue::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            JsonValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<Number> {
        match self {
            JsonValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().map(|n| n.value())
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.as_number().map(|n| n.as_i64())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[JsonValue]> {
        match self {
            JsonValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&[Member]> {
        match self {
            JsonValue::Object(members) => Some(members),
            _ => None,
        }
    }

    /// Number of direct children (0 for scalars)
    pub fn len(&self) -> usize {
        match self {
            JsonValue::Array(items) => items.len(),
            JsonValue::Object(members) => members.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Array elements in order (empty for non-arrays)
    pub fn elements(&self) -> impl Iterator<Item = &JsonValue> {
        self.as_array().unwrap_or_default().iter()
    }

    /// Object members in order (empty for non-objects)
    pub fn members(&self) -> impl Iterator<Item = (&str, &JsonValue)> {
        self.as_object()
            .unwrap_or_default()
            .iter()
            .map(|member| (member.key.as_str(), &member.value))
    }

    /// Pre-order walk over this value and all of its descendants
    pub fn walk<F: FnMut(&JsonValue)>(&self, visit: &mut F) {
        visit(self);
        match self {
            JsonValue::Array(items) => {
                for item in items {
                    item.walk(&mut *visit);
                }
            }
            JsonValue::Object(members) => {
                for member in members {
                    member.value.walk(&mut *visit);
                }
            }
            _ => {}
        }
    }

    /// Total number of values in this tree, including the root
    pub fn value_count(&self) -> usize {
        let mut count = 0;
        self.walk(&mut |_| count += 1);
        count
    }
}

/// Compact JSON. Strings are written back verbatim (their escapes were never
/// decoded), so re-parsing the output yields an equal tree.
impl fmt::Display for JsonValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonValue::Null => f.write_str("null"),
            JsonValue::Bool(b) => write!(f, "{b}"),
            JsonValue::Number(n) => {
                let v = n.value();
                if !v.is_finite() {
                    f.write_str("null")
                } else if v == 0.0 && v.is_sign_negative() {
                    f.write_str("-0")
                } else if v.fract() == 0.0 && v.abs() < 1e15 {
                    write!(f, "{}", n.as_i64())
                } else {
                    write!(f, "{v}")
                }
            }
            JsonValue::String(s) => write!(f, "\"{s}\""),
            JsonValue::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            JsonValue::Object(members) => {
                f.write_str("{")?;
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "\"{}\":{}", member.key, member.value)?;
                }
                f.write_str("}")
            }
        }
    }
}
