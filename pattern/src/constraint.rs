//! Mutual-exclusion constraints.

use std::fmt;

/// Two pattern nodes that must never be bound to the same graph node.
///
/// The pair is unordered: the ids are stored sorted, so `new(a, b)` and
/// `new(b, a)` are equal and hash alike.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MutualExclusionConstraint {
    first: String,
    second: String,
}

impl MutualExclusionConstraint {
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        let (a, b) = (a.into(), b.into());
        if a <= b {
            Self {
                first: a,
                second: b,
            }
        } else {
            Self {
                first: b,
                second: a,
            }
        }
    }

    pub fn first(&self) -> &str {
        &self.first
    }

    pub fn second(&self) -> &str {
        &self.second
    }

    pub fn involves(&self, node: &str) -> bool {
        self.first == node || self.second == node
    }

    /// The other node of the pair, if `node` belongs to it.
    pub fn partner(&self, node: &str) -> Option<&str> {
        if self.first == node {
            Some(&self.second)
        } else if self.second == node {
            Some(&self.first)
        } else {
            None
        }
    }
}

impl fmt::Display for MutualExclusionConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} != {}", self.first, self.second)
    }
}
