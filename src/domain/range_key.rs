use crate::domain::digit_sequence::DigitSequence;
use crate::domain::range_set::{Interval, RangeSet};
use crate::utils::error::{MigrationError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifies one recipe row by the digit-sequence ranges it covers.
///
/// The text form is a `;`-separated list of items, each either a single
/// number or an inclusive `lo-hi` range, e.g. `447100000000-447100999999;4471019`.
/// Two keys are equal when they cover the same set of sequences, whatever
/// text they were written with. Items that overlap or touch in the digit
/// order are stored as one interval.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RangeKey {
    ranges: RangeSet<DigitSequence>,
}

impl RangeKey {
    pub fn new(ranges: RangeSet<DigitSequence>) -> Result<Self> {
        if ranges.is_empty() {
            return Err(MigrationError::InvalidRangeKey {
                value: "<empty>".to_string(),
                reason: "a range key must cover at least one sequence".to_string(),
            });
        }
        Ok(Self {
            ranges: ranges.coalesce_adjacent(),
        })
    }

    pub fn closed(lower: DigitSequence, upper: DigitSequence) -> Result<Self> {
        let interval = Interval::closed(lower.clone(), upper.clone()).ok_or_else(|| {
            MigrationError::InvalidRangeKey {
                value: format!("{}-{}", lower, upper),
                reason: "lower bound sorts after upper bound".to_string(),
            }
        })?;
        Self::new(RangeSet::from_intervals([interval]))
    }

    pub fn as_range_set(&self) -> &RangeSet<DigitSequence> {
        &self.ranges
    }

    pub fn contains(&self, number: &DigitSequence) -> bool {
        self.ranges.contains(number)
    }

    fn parse_item(item: &str, whole: &str) -> Result<Interval<DigitSequence>> {
        let invalid = |reason: String| MigrationError::InvalidRangeKey {
            value: whole.to_string(),
            reason,
        };
        match item.split_once('-') {
            Some((lo, hi)) => {
                let lo = DigitSequence::new(lo.trim()).map_err(|e| invalid(e.to_string()))?;
                let hi = DigitSequence::new(hi.trim()).map_err(|e| invalid(e.to_string()))?;
                Interval::closed(lo, hi)
                    .ok_or_else(|| invalid(format!("'{}' has its bounds reversed", item)))
            }
            None => DigitSequence::new(item)
                .map(Interval::singleton)
                .map_err(|e| invalid(e.to_string())),
        }
    }
}

impl FromStr for RangeKey {
    type Err = MigrationError;

    fn from_str(s: &str) -> Result<Self> {
        let intervals = s
            .split(';')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(|item| Self::parse_item(item, s))
            .collect::<Result<Vec<_>>>()?;

        Self::new(RangeSet::from_intervals(intervals)).map_err(|_| MigrationError::InvalidRangeKey {
            value: s.to_string(),
            reason: "no ranges given".to_string(),
        })
    }
}

impl TryFrom<String> for RangeKey {
    type Error = MigrationError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<RangeKey> for String {
    fn from(value: RangeKey) -> Self {
        value.to_string()
    }
}

impl fmt::Display for RangeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ranges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_range() {
        let key: RangeKey = "447100000000-447100999999".parse().unwrap();
        assert_eq!(key.as_range_set().len(), 1);
        assert!(key.contains(&"447100000001".parse().unwrap()));
        assert!(!key.contains(&"447200000001".parse().unwrap()));
    }

    #[test]
    fn test_equality_is_structural() {
        let a: RangeKey = "100-150;150-199".parse().unwrap();
        let b: RangeKey = " 100 - 199 ".parse().unwrap();
        let c: RangeKey = "120-199;100-130".parse().unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_eq!(a.to_string(), "100-199");
    }

    #[test]
    fn test_touching_numeric_neighbours_stay_apart() {
        // "1505" sorts between "150" and "151", so these do not merge.
        let key: RangeKey = "100-150;151-199".parse().unwrap();
        assert_eq!(key.as_range_set().len(), 2);
        assert!(!key.contains(&"1505".parse().unwrap()));
    }

    #[test]
    fn test_single_numbers_and_mixed_items() {
        let key: RangeKey = "4471019;447100000000-447100999999".parse().unwrap();
        assert_eq!(key.as_range_set().len(), 2);
        assert_eq!(key.to_string(), "447100000000-447100999999;4471019");
    }

    #[test]
    fn test_rejects_malformed_keys() {
        assert!("".parse::<RangeKey>().is_err());
        assert!(" ; ".parse::<RangeKey>().is_err());
        assert!("200-100".parse::<RangeKey>().is_err());
        assert!("12a-13".parse::<RangeKey>().is_err());
        assert!("1-2-3".parse::<RangeKey>().is_err());
    }

    #[test]
    fn test_touching_items_are_stored_as_one_interval() {
        let key: RangeKey = "12;120-125".parse().unwrap();
        assert_eq!(key.as_range_set().len(), 1);
        assert_eq!(key.to_string(), "12-125");
        assert_eq!(key, "12-125".parse::<RangeKey>().unwrap());
    }

    #[test]
    fn test_empty_range_set_error_names_placeholder() {
        let err = RangeKey::new(RangeSet::new()).unwrap_err();
        assert!(matches!(
            &err,
            MigrationError::InvalidRangeKey { value, .. } if value == "<empty>"
        ));
        assert!(err.to_string().contains("<empty>"), "{}", err);
    }

    #[test]
    fn test_closed_constructor() {
        let lo: DigitSequence = "10".parse().unwrap();
        let hi: DigitSequence = "19".parse().unwrap();
        assert!(RangeKey::closed(lo.clone(), hi.clone()).is_ok());
        assert!(RangeKey::closed(hi, lo).is_err());
    }
}
