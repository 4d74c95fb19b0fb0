use std::fmt;

use serde::{Deserialize, Serialize};

/// Printed identifier of a card within its set. Kept as text because some sets
/// use numbers like "9a" or "★12".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollectorNumber {
    raw_value: String,
}

impl CollectorNumber {
    pub fn new(collector_number: &str) -> Self {
        Self {
            raw_value: collector_number.to_string(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw_value
    }

    /// The numeric value when the trimmed text is only ascii digits.
    pub fn as_number(&self) -> Option<u32> {
        let c_num = self.raw_value.trim();
        if Self::is_only_digits(c_num) {
            c_num.parse().ok()
        } else {
            None
        }
    }

    fn is_only_digits(num: &str) -> bool {
        !num.is_empty() && num.chars().all(|c| c.is_ascii_digit())
    }
}

impl fmt::Display for CollectorNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw_value)
    }
}

impl From<&str> for CollectorNumber {
    fn from(value: &str) -> Self {
        CollectorNumber::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_numbers_parse() {
        assert_eq!(CollectorNumber::new("1").as_number(), Some(1));
        assert_eq!(CollectorNumber::new("081").as_number(), Some(81));
        assert_eq!(CollectorNumber::new(" 17 ").as_number(), Some(17));
    }

    #[test]
    fn test_non_numeric_collector_numbers_do_not_parse() {
        assert_eq!(CollectorNumber::new("9a").as_number(), None);
        assert_eq!(CollectorNumber::new("★12").as_number(), None);
        assert_eq!(CollectorNumber::new("").as_number(), None);
        assert_eq!(CollectorNumber::new("-3").as_number(), None);
        assert_eq!(CollectorNumber::new("99999999999").as_number(), None);
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let number = CollectorNumber::new("9a");
        assert_eq!(serde_json::to_string(&number).unwrap(), "\"9a\"");
        let back: CollectorNumber = serde_json::from_str("\"9a\"").unwrap();
        assert_eq!(back, number);
    }
}
