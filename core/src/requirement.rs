//! Attribute requirements.
//!
//! A requirement is a `(key, operator, value)` predicate evaluated against a
//! single graph element. The reserved key [`ID_KEY`] compares against the
//! element identifier instead of a stored attribute.

use crate::{AttributeAware, AttributeValue, CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Reserved requirement key addressing the element identifier.
pub const ID_KEY: &str = "#id";

/// How an attribute is compared against the requirement value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequirementOperator {
    Equal,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
}

impl RequirementOperator {
    /// Returns true for the operators that need numeric operands.
    pub fn is_ordering(&self) -> bool {
        !matches!(self, RequirementOperator::Equal)
    }

    fn symbol(&self) -> &'static str {
        match self {
            RequirementOperator::Equal => "=",
            RequirementOperator::LessThan => "<",
            RequirementOperator::LessThanOrEqual => "<=",
            RequirementOperator::GreaterThan => ">",
            RequirementOperator::GreaterThanOrEqual => ">=",
        }
    }
}

/// A predicate on one attribute of a node or edge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawRequirement")]
pub struct AttributeRequirement {
    key: String,
    operator: RequirementOperator,
    value: AttributeValue,
}

#[derive(Deserialize)]
struct RawRequirement {
    key: String,
    operator: RequirementOperator,
    value: AttributeValue,
}

impl TryFrom<RawRequirement> for AttributeRequirement {
    type Error = CoreError;

    fn try_from(raw: RawRequirement) -> CoreResult<Self> {
        AttributeRequirement::new(raw.key, raw.operator, raw.value)
    }
}

impl AttributeRequirement {
    /// Create a requirement, validating the literal against the operator.
    ///
    /// Ordering operators need a numeric literal and `#id` requirements need
    /// a string literal.
    pub fn new(
        key: impl Into<String>,
        operator: RequirementOperator,
        value: impl Into<AttributeValue>,
    ) -> CoreResult<Self> {
        let key = key.into();
        let value = value.into();

        if operator.is_ordering() {
            value.as_numeric()?;
        }
        if key == ID_KEY && !value.is_string() {
            return Err(CoreError::invalid_requirement(
                key,
                format!("identifier requirements must be strings, got {}", value),
            ));
        }

        Ok(Self {
            key,
            operator,
            value,
        })
    }

    /// Shorthand for an `EQUAL` requirement.
    pub fn equal(key: impl Into<String>, value: impl Into<AttributeValue>) -> CoreResult<Self> {
        Self::new(key, RequirementOperator::Equal, value)
    }

    /// Requirement fixing the element identifier.
    pub fn id(id: impl Into<String>) -> Self {
        Self {
            key: ID_KEY.to_string(),
            operator: RequirementOperator::Equal,
            value: AttributeValue::String(id.into()),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn operator(&self) -> RequirementOperator {
        self.operator
    }

    pub fn value(&self) -> &AttributeValue {
        &self.value
    }

    /// Returns true if this requirement addresses the element identifier.
    pub fn is_id(&self) -> bool {
        self.key == ID_KEY
    }

    /// The fixed identifier, if this is an `#id` requirement.
    pub fn fixed_id(&self) -> Option<&str> {
        if self.is_id() {
            self.value.as_str()
        } else {
            None
        }
    }

    /// Evaluate the requirement against an element.
    ///
    /// A missing attribute does not satisfy the requirement. Ordering
    /// operators fail with a type mismatch if the stored value is not numeric.
    pub fn evaluate<A: AttributeAware + ?Sized>(&self, element: &A) -> CoreResult<bool> {
        if let Some(id) = self.fixed_id() {
            return Ok(element.id() == id);
        }

        let Some(actual) = element.attribute(&self.key) else {
            return Ok(false);
        };

        let ordering = || actual.as_numeric().and_then(|n| n.compare(&self.value));

        Ok(match self.operator {
            RequirementOperator::Equal => actual == self.value,
            RequirementOperator::LessThan => ordering()? == Ordering::Less,
            RequirementOperator::LessThanOrEqual => ordering()? != Ordering::Greater,
            RequirementOperator::GreaterThan => ordering()? == Ordering::Greater,
            RequirementOperator::GreaterThanOrEqual => ordering()? != Ordering::Less,
        })
    }

    /// Evaluate every requirement, short-circuiting on the first failure.
    pub fn all_satisfied<A: AttributeAware + ?Sized>(
        requirements: &[AttributeRequirement],
        element: &A,
    ) -> CoreResult<bool> {
        for requirement in requirements {
            if !requirement.evaluate(element)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl fmt::Display for AttributeRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.key, self.operator.symbol(), self.value)
    }
}
