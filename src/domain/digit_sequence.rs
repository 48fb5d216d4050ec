use crate::domain::range_set::Discrete;
use crate::utils::error::{MigrationError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Longest digit sequence accepted anywhere in a job.
pub const MAX_DIGITS: usize = 19;

/// A non-empty run of decimal digits, ordered lexicographically.
///
/// Leading zeros are significant: `"0123"` and `"123"` are different
/// sequences, and a strict prefix always sorts before the longer sequence
/// (`"12" < "120" < "13"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DigitSequence(String);

impl DigitSequence {
    pub fn new(digits: &str) -> Result<Self> {
        if digits.is_empty() {
            return Err(MigrationError::InvalidDigitSequence {
                value: digits.to_string(),
                reason: "sequence is empty".to_string(),
            });
        }
        if let Some(c) = digits.chars().find(|c| !c.is_ascii_digit()) {
            return Err(MigrationError::InvalidDigitSequence {
                value: digits.to_string(),
                reason: format!("unexpected character '{}'", c),
            });
        }
        if digits.len() > MAX_DIGITS {
            return Err(MigrationError::InvalidDigitSequence {
                value: digits.to_string(),
                reason: format!("longer than {} digits", MAX_DIGITS),
            });
        }
        Ok(Self(digits.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Never true for a validated sequence.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Discrete for DigitSequence {
    // Next sequence in lexicographic order, bounded by MAX_DIGITS:
    // extend with '0' while there is room, otherwise drop trailing nines
    // and bump the last remaining digit.
    fn successor(&self) -> Option<Self> {
        if self.0.len() < MAX_DIGITS {
            return Some(Self(format!("{}0", self.0)));
        }
        let trimmed = self.0.trim_end_matches('9');
        let mut digits = trimmed.as_bytes().to_vec();
        let last = digits.last_mut()?;
        *last += 1;
        // Only ASCII digits '0'..='8' were incremented.
        String::from_utf8(digits).ok().map(Self)
    }
}

impl FromStr for DigitSequence {
    type Err = MigrationError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for DigitSequence {
    type Error = MigrationError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(&value)
    }
}

impl From<DigitSequence> for String {
    fn from(value: DigitSequence) -> Self {
        value.0
    }
}

impl AsRef<str> for DigitSequence {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DigitSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
