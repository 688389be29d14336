//! Matcher configuration.

/// Tuning switches for [`Matcher`](crate::Matcher).
///
/// None of these change which tuples are found for a coverable pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatcherConfig {
    /// Seed a variable directly when an `EQUAL` requirement targets an
    /// attribute the graph reports as unique for the variable's type.
    pub unique_attribute_seeding: bool,
    /// Verify that no assigned variable still carries a candidate domain.
    pub sanity_checks: bool,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            unique_attribute_seeding: true,
            sanity_checks: cfg!(debug_assertions),
        }
    }
}

impl MatcherConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_unique_attribute_seeding(mut self, enabled: bool) -> Self {
        self.unique_attribute_seeding = enabled;
        self
    }

    pub fn with_sanity_checks(mut self, enabled: bool) -> Self {
        self.sanity_checks = enabled;
        self
    }
}
