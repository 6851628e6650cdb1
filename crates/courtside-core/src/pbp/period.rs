// Period keys of the play-by-play document.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Quarters in regulation.
pub const REGULATION_PERIODS: u32 = 4;

static PERIOD_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*(Q|OT)\s*(\d*)\s*$").expect("period key pattern is valid"));

/// A 1-based period number. Numbers past 4 are overtimes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Period(u32);

impl Period {
    pub fn new(number: u32) -> Option<Self> {
        (number >= 1).then_some(Period(number))
    }

    /// Parse a `GameActions` key: `Q1`..`Qn`, or `OT` / `OT<n>` for the n-th
    /// overtime.
    pub fn parse(key: &str) -> Option<Self> {
        let caps = PERIOD_KEY.captures(key)?;
        let digits = caps.get(2).map_or("", |m| m.as_str());
        let prefix = caps.get(1)?.as_str().to_ascii_uppercase();
        match prefix.as_str() {
            "Q" => Period::new(digits.parse().ok()?),
            _ => {
                let n: u32 = if digits.is_empty() { 1 } else { digits.parse().ok()? };
                (n >= 1).then(|| Period(REGULATION_PERIODS + n))
            }
        }
    }

    pub fn number(self) -> u32 {
        self.0
    }

    pub fn is_overtime(self) -> bool {
        self.0 > REGULATION_PERIODS
    }

    /// Display label, `Cuarto 2` or `Prórroga 1`.
    pub fn label(self) -> String {
        if self.is_overtime() {
            format!("Prórroga {}", self.0 - REGULATION_PERIODS)
        } else {
            format!("Cuarto {}", self.0)
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quarter_keys() {
        assert_eq!(Period::parse("Q1").map(Period::number), Some(1));
        assert_eq!(Period::parse("q4").map(Period::number), Some(4));
        assert!(!Period::parse("Q4").unwrap().is_overtime());
        let q5 = Period::parse("Q5").unwrap();
        assert!(q5.is_overtime());
        assert_eq!(q5.label(), "Prórroga 1");
    }

    #[test]
    fn overtime_keys() {
        assert_eq!(Period::parse("OT").map(Period::number), Some(5));
        assert_eq!(Period::parse("OT2").map(Period::number), Some(6));
        assert_eq!(Period::parse("OT0"), None);
    }

    #[test]
    fn other_keys_do_not_parse() {
        for key in ["", "Q", "Q0", "Half1", "1", "Q1x", "Quarter1"] {
            assert_eq!(Period::parse(key), None, "{key}");
        }
    }

    #[test]
    fn periods_order_numerically() {
        let mut periods: Vec<Period> = ["Q10", "Q2", "OT", "Q1"]
            .iter()
            .filter_map(|k| Period::parse(k))
            .collect();
        periods.sort();
        let numbers: Vec<u32> = periods.iter().map(|p| p.number()).collect();
        assert_eq!(numbers, vec![1, 2, 5, 10]);
        assert_eq!(periods[1].to_string(), "Cuarto 2");
    }
}
