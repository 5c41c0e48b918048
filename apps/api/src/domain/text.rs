use serde::Serialize;
use std::fmt;

/// Non-blank text with an upper bound on its length in characters
///
/// # Invariants
/// - Never empty once surrounding whitespace is removed
/// - At most `MAX` characters
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct BoundedText<const MAX: usize>(String);

/// Names: course names, first/last names, usernames
pub type ShortText = BoundedText<20>;

/// Labels: course type names, descriptions
pub type LongText = BoundedText<50>;

impl<const MAX: usize> BoundedText<MAX> {
    /// Validates and wraps `value`
    ///
    /// # Example
    /// ```
    /// use club_canin_api::domain::ShortText;
    ///
    /// assert!(ShortText::new("Agility").is_ok());
    /// assert!(ShortText::new("   ").is_err());
    /// ```
    pub fn new(value: impl Into<String>) -> Result<Self, String> {
        let value = value.into().trim().to_string();
        if value.is_empty() {
            return Err("must not be empty".to_string());
        }
        if value.chars().count() > MAX {
            return Err(format!("must be at most {} characters", MAX));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl<const MAX: usize> fmt::Display for BoundedText<MAX> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
