//! Condition filter options
//!
//! The selectable values of the condition filter are derived from the
//! observed data: every distinct entry of the comma-joined `conditions`
//! strings, in first-seen order, behind a "Show All" sentinel.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator between individual conditions in a day's summary
pub const CONDITION_SEPARATOR: &str = ", ";

/// One selectable condition
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConditionOption {
    /// Position in the option list; `0` is the sentinel
    pub key: u32,
    /// Display text, also the filter value
    pub text: String,
}

impl ConditionOption {
    /// Key of the sentinel option
    pub const SHOW_ALL_KEY: u32 = 0;

    /// Display text of the sentinel option
    pub const SHOW_ALL_TEXT: &'static str = "Show All";

    /// The "Show All" sentinel
    #[must_use]
    pub fn show_all() -> Self {
        Self {
            key: Self::SHOW_ALL_KEY,
            text: Self::SHOW_ALL_TEXT.to_string(),
        }
    }

    /// Check whether this option means "no condition filter"
    ///
    /// Compares the key; option lists built by [`ConditionOptions`] never
    /// hand a nonzero key to a value spelled "Show All".
    #[must_use]
    pub const fn is_show_all(&self) -> bool {
        self.key == Self::SHOW_ALL_KEY
    }
}

impl fmt::Display for ConditionOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Ordered, duplicate-free list of condition options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionOptions(Vec<ConditionOption>);

impl ConditionOptions {
    /// List holding only the sentinel
    #[must_use]
    pub fn new() -> Self {
        Self(vec![ConditionOption::show_all()])
    }

    /// Build the list from a sequence of comma-joined condition strings
    #[must_use]
    pub fn from_joined<'a, I>(joined: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut options = Self::new();
        for value in joined {
            options.absorb(value);
        }
        options
    }

    /// Add every unseen condition of one comma-joined string
    pub fn absorb(&mut self, joined: &str) {
        for text in joined.split(CONDITION_SEPARATOR) {
            if self.find_by_text(text).is_none() {
                let key = u32::try_from(self.0.len()).unwrap_or(u32::MAX);
                self.0.push(ConditionOption {
                    key,
                    text: text.to_string(),
                });
            }
        }
    }

    /// Find an option by exact display text
    #[must_use]
    pub fn find_by_text(&self, text: &str) -> Option<&ConditionOption> {
        self.0.iter().find(|option| option.text == text)
    }

    /// Find an option by key
    #[must_use]
    pub fn find_by_key(&self, key: u32) -> Option<&ConditionOption> {
        self.0.iter().find(|option| option.key == key)
    }

    /// All options, sentinel first
    #[must_use]
    pub fn as_slice(&self) -> &[ConditionOption] {
        &self.0
    }

    /// Number of options including the sentinel
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; the sentinel is never removed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the options
    pub fn iter(&self) -> std::slice::Iter<'_, ConditionOption> {
        self.0.iter()
    }
}

impl Default for ConditionOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a ConditionOptions {
    type Item = &'a ConditionOption;
    type IntoIter = std::slice::Iter<'a, ConditionOption>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
