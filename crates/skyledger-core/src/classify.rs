// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lowercase ASCII alphanumerics of `s`, so "Cash Cows", "cash-cows" and
/// "cash_cows" compare equal.
pub(crate) fn normalized_key(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// BCG-style quadrant of a scored route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    Stars,
    #[serde(rename = "Cash Cows")]
    CashCows,
    #[serde(rename = "Question Marks")]
    QuestionMarks,
    Dogs,
}

impl Classification {
    pub const ALL: [Classification; 4] = [
        Classification::Stars,
        Classification::CashCows,
        Classification::QuestionMarks,
        Classification::Dogs,
    ];

    /// Thresholds are inclusive lower bounds: 80, 65, 45.
    pub fn from_total(total_score: f64) -> Self {
        if total_score >= 80.0 {
            Classification::Stars
        } else if total_score >= 65.0 {
            Classification::CashCows
        } else if total_score >= 45.0 {
            Classification::QuestionMarks
        } else {
            Classification::Dogs
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Stars => "Stars",
            Classification::CashCows => "Cash Cows",
            Classification::QuestionMarks => "Question Marks",
            Classification::Dogs => "Dogs",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Classification {
    type Err = String;

    /// Accepts "Cash Cows", "cash-cows", "cash_cows" and "cashcows" alike.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalized_key(s).as_str() {
            "stars" | "star" => Ok(Classification::Stars),
            "cashcows" | "cashcow" => Ok(Classification::CashCows),
            "questionmarks" | "questionmark" => Ok(Classification::QuestionMarks),
            "dogs" | "dog" => Ok(Classification::Dogs),
            _ => Err(format!("Unknown classification '{}'", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

impl Trend {
    /// `Up` above +5 % average margin, `Down` below -5 %, `Stable` otherwise.
    pub fn from_margin(avg_margin: f64) -> Self {
        if avg_margin > 5.0 {
            Trend::Up
        } else if avg_margin < -5.0 {
            Trend::Down
        } else {
            Trend::Stable
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Up => "up",
            Trend::Down => "down",
            Trend::Stable => "stable",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_boundaries() {
        assert_eq!(Classification::from_total(80.0), Classification::Stars);
        assert_eq!(Classification::from_total(79.999), Classification::CashCows);
        assert_eq!(Classification::from_total(65.0), Classification::CashCows);
        assert_eq!(Classification::from_total(64.999), Classification::QuestionMarks);
        assert_eq!(Classification::from_total(45.0), Classification::QuestionMarks);
        assert_eq!(Classification::from_total(44.999), Classification::Dogs);
        assert_eq!(Classification::from_total(0.0), Classification::Dogs);
        assert_eq!(Classification::from_total(100.0), Classification::Stars);
    }

    #[test]
    fn test_trend_boundaries() {
        assert_eq!(Trend::from_margin(5.0001), Trend::Up);
        assert_eq!(Trend::from_margin(5.0), Trend::Stable);
        assert_eq!(Trend::from_margin(-5.0001), Trend::Down);
        assert_eq!(Trend::from_margin(-5.0), Trend::Stable);
        assert_eq!(Trend::from_margin(0.0), Trend::Stable);
    }

    #[test]
    fn test_parse_classification() {
        assert_eq!("Cash Cows".parse(), Ok(Classification::CashCows));
        assert_eq!("question-marks".parse(), Ok(Classification::QuestionMarks));
        assert_eq!("DOGS".parse(), Ok(Classification::Dogs));
        assert!("unicorns".parse::<Classification>().is_err());
    }

    #[test]
    fn test_serde_labels() {
        assert_eq!(
            serde_json::to_string(&Classification::QuestionMarks).unwrap(),
            "\"Question Marks\""
        );
        assert_eq!(serde_json::to_string(&Trend::Down).unwrap(), "\"down\"");
    }

    #[test]
    fn test_display_pads_columns() {
        assert_eq!(format!("{:<15}|", Classification::Dogs), "Dogs           |");
        assert_eq!(format!("{:<6}|", Trend::Up), "up    |");
    }
}
