//! # Person Names
//!
//! Splits a registration `full_name` into the customer's name parts.
//!
//! ## Splitting Rules
//! ```text
//! "Jane"                  → first: Jane
//! "Jane Doe"              → first: Jane, last: Doe
//! "Jane Wanjiru Doe"      → first: Jane, middle: Wanjiru, last: Doe
//! "Jane Wanjiru Akinyi Doe" → first: Jane, middle: Wanjiru, last: Doe
//!                                        (third token is dropped)
//! ```

use serde::{Deserialize, Serialize};

/// Name parts derived from a full name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonName {
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
}

impl PersonName {
    /// Splits on whitespace.
    ///
    /// Returns `None` for a blank name.
    ///
    /// ```rust
    /// use fh_core::names::PersonName;
    ///
    /// let name = PersonName::split("Jane Wanjiru Doe").unwrap();
    /// assert_eq!(name.first_name, "Jane");
    /// assert_eq!(name.middle_name.as_deref(), Some("Wanjiru"));
    /// assert_eq!(name.last_name.as_deref(), Some("Doe"));
    /// ```
    pub fn split(full_name: &str) -> Option<Self> {
        let tokens: Vec<&str> = full_name.split_whitespace().collect();
        let first = tokens.first()?;

        let last_name = if tokens.len() > 1 {
            tokens.last().map(|t| t.to_string())
        } else {
            None
        };

        let middle_name = if tokens.len() > 2 {
            Some(tokens[1].to_string())
        } else {
            None
        };

        Some(PersonName {
            first_name: first.to_string(),
            middle_name,
            last_name,
        })
    }

    /// Tokens joined by single spaces, in first/middle/last order.
    pub fn display_name(&self) -> String {
        [
            Some(self.first_name.as_str()),
            self.middle_name.as_deref(),
            self.last_name.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ")
    }
}
