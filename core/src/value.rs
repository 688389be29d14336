//! Attribute values.
//!
//! Values are the atomic data stored in node and edge attributes of an
//! attributed graph, and the literals carried by attribute requirements.
//! Only integers are ordered; strings and booleans support equality only.

use crate::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A value that can be stored in an attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// Boolean value.
    Bool(bool),
    /// 64-bit signed integer.
    Int(i64),
    /// UTF-8 string.
    String(String),
}

/// The numeric view of an [`AttributeValue`].
///
/// Ordering predicates are only available through this type, so a value has
/// to prove it is numeric before it can be compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericValue {
    Int(i64),
}

impl NumericValue {
    /// Returns true if `self < other`.
    ///
    /// Fails with a type mismatch if `other` is not numeric.
    pub fn less_than(&self, other: &AttributeValue) -> CoreResult<bool> {
        Ok(self.compare(other)? == Ordering::Less)
    }

    /// Total order against another value, which must be numeric.
    pub fn compare(&self, other: &AttributeValue) -> CoreResult<Ordering> {
        let other = other.as_numeric()?;
        match (self, other) {
            (NumericValue::Int(a), NumericValue::Int(b)) => Ok(a.cmp(&b)),
        }
    }
}

impl AttributeValue {
    /// Returns true if this is a boolean value.
    pub fn is_bool(&self) -> bool {
        matches!(self, AttributeValue::Bool(_))
    }

    /// Returns true if this is an integer value.
    pub fn is_int(&self) -> bool {
        matches!(self, AttributeValue::Int(_))
    }

    /// Returns true if this is a string value.
    pub fn is_string(&self) -> bool {
        matches!(self, AttributeValue::String(_))
    }

    /// Returns true if ordering predicates can be applied to this value.
    pub fn is_numeric(&self) -> bool {
        self.as_numeric().is_ok()
    }

    /// Get as boolean if this is a Bool value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttributeValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as integer if this is an Int value.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            AttributeValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as string reference if this is a String value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the numeric view of this value.
    pub fn as_numeric(&self) -> CoreResult<NumericValue> {
        match self {
            AttributeValue::Int(i) => Ok(NumericValue::Int(*i)),
            AttributeValue::Bool(_) | AttributeValue::String(_) => {
                Err(CoreError::type_mismatch("numeric", self.clone()))
            }
        }
    }

    /// Returns true if `self < other`; both values must be numeric.
    pub fn less_than(&self, other: &AttributeValue) -> CoreResult<bool> {
        self.as_numeric()?.less_than(other)
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            AttributeValue::Bool(_) => "Bool",
            AttributeValue::Int(_) => "Int",
            AttributeValue::String(_) => "String",
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Bool(b) => write!(f, "{}", b),
            AttributeValue::Int(i) => write!(f, "{}", i),
            AttributeValue::String(s) => write!(f, "\"{}\"", s),
        }
    }
}

impl From<bool> for AttributeValue {
    fn from(b: bool) -> Self {
        AttributeValue::Bool(b)
    }
}

impl From<i64> for AttributeValue {
    fn from(i: i64) -> Self {
        AttributeValue::Int(i)
    }
}

impl From<i32> for AttributeValue {
    fn from(i: i32) -> Self {
        AttributeValue::Int(i as i64)
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        AttributeValue::String(s)
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        AttributeValue::String(s.to_string())
    }
}

/// Type alias for attribute storage.
pub type Attributes = std::collections::HashMap<String, AttributeValue>;

/// Helper macro to create attribute maps.
#[macro_export]
macro_rules! attrs {
    () => {
        std::collections::HashMap::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        {
            let mut map = std::collections::HashMap::new();
            $(
                map.insert($key.to_string(), $crate::AttributeValue::from($value));
            )+
            map
        }
    };
}
