use crate::domain::digit_sequence::DigitSequence;
use crate::utils::error::{MigrationError, Result};
use std::collections::BTreeMap;

/// Turns user-entered text such as `+44 (7100) 000-001` into its digits.
///
/// One leading `+` and the usual separators (spaces, `-`, `.`, parentheses)
/// are dropped; anything else must be a digit.
pub fn parse_number(raw: &str) -> Result<DigitSequence> {
    let trimmed = raw.trim();
    let body = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits: String = body
        .chars()
        .filter(|c| !matches!(c, ' ' | '\t' | '-' | '.' | '(' | ')'))
        .collect();
    DigitSequence::new(&digits).map_err(|e| match e {
        MigrationError::InvalidDigitSequence { reason, .. } => MigrationError::InvalidDigitSequence {
            value: trimmed.to_string(),
            reason,
        },
        other => other,
    })
}

/// Builds the number map for a job from raw entries. The first raw form of a
/// repeated number wins.
pub fn number_map_from<I, S>(raw_numbers: I) -> Result<BTreeMap<DigitSequence, String>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut map = BTreeMap::new();
    for raw in raw_numbers {
        let raw = raw.as_ref().trim();
        let number = parse_number(raw)?;
        insert_first(&mut map, number, raw);
    }
    Ok(map)
}

/// Parses a number list: one number per line, blank lines and `#` comments
/// ignored.
pub fn parse_number_list(text: &str) -> Result<BTreeMap<DigitSequence, String>> {
    let mut map = BTreeMap::new();
    for (idx, line) in text.lines().enumerate() {
        let raw = line.trim();
        if raw.is_empty() || raw.starts_with('#') {
            continue;
        }
        let number = parse_number(raw).map_err(|e| match e {
            MigrationError::InvalidDigitSequence { value, reason } => {
                MigrationError::InvalidDigitSequence {
                    value,
                    reason: format!("line {}: {}", idx + 1, reason),
                }
            }
            other => other,
        })?;
        insert_first(&mut map, number, raw);
    }
    Ok(map)
}

fn insert_first(map: &mut BTreeMap<DigitSequence, String>, number: DigitSequence, raw: &str) {
    if let Some(existing) = map.get(&number) {
        tracing::warn!("Skipping '{}': same number as '{}'", raw, existing);
        return;
    }
    map.insert(number, raw.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number_strips_formatting() {
        let n = parse_number(" +44 (7100) 000-001 ").unwrap();
        assert_eq!(n.as_str(), "447100000001");
        assert_eq!(parse_number("0044.7100").unwrap().as_str(), "00447100");
    }

    #[test]
    fn test_parse_number_rejects_garbage() {
        assert!(parse_number("").is_err());
        assert!(parse_number("+").is_err());
        assert!(parse_number("++44").is_err());
        assert!(parse_number("44+71").is_err());
        assert!(parse_number("44 ext 7").is_err());
    }

    #[test]
    fn test_parse_number_list_keeps_raw_text() {
        let text = "# numbers to move\n+447100000001\n\n447200 000001\n+447100000001\n";
        let map = parse_number_list(text).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(
            map.get(&"447100000001".parse::<DigitSequence>().unwrap()).map(String::as_str),
            Some("+447100000001")
        );
        assert_eq!(
            map.get(&"447200000001".parse::<DigitSequence>().unwrap()).map(String::as_str),
            Some("447200 000001")
        );
    }

    #[test]
    fn test_parse_number_list_reports_line() {
        let err = parse_number_list("+447100000001\nnot-a-number\n").unwrap_err();
        assert!(err.to_string().contains("line 2"), "{}", err);
    }

    #[test]
    fn test_number_map_from_inline_values() {
        let map = number_map_from(["+1 650 253 0000", "16502530000"]).unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.values().next().map(String::as_str), Some("+1 650 253 0000"));
    }
}
