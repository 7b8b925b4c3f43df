use std::fmt;

use serde::{Deserialize, Serialize};

/// Filing status selected by the user for a single calculation.
///
/// Selects the federal bracket schedule and the Additional Medicare Tax
/// threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilingStatus {
    #[default]
    Single,
    #[serde(rename = "married_jointly")]
    MarriedFilingJointly,
    #[serde(rename = "married_separately")]
    MarriedFilingSeparately,
    HeadOfHousehold,
}

impl FilingStatus {
    pub fn all() -> &'static [FilingStatus] {
        &[
            FilingStatus::Single,
            FilingStatus::MarriedFilingJointly,
            FilingStatus::MarriedFilingSeparately,
            FilingStatus::HeadOfHousehold,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "S",
            Self::MarriedFilingJointly => "MFJ",
            Self::MarriedFilingSeparately => "MFS",
            Self::HeadOfHousehold => "HOH",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Single => "Single",
            Self::MarriedFilingJointly => "Married Filing Jointly",
            Self::MarriedFilingSeparately => "Married Filing Separately",
            Self::HeadOfHousehold => "Head of Household",
        }
    }

    /// Parses either the short code (`MFJ`) or the long form
    /// (`married_jointly`). Case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "s" | "single" => Some(Self::Single),
            "mfj" | "married_jointly" | "married-jointly" => Some(Self::MarriedFilingJointly),
            "mfs" | "married_separately" | "married-separately" => {
                Some(Self::MarriedFilingSeparately)
            }
            "hoh" | "head_of_household" | "head-of-household" => Some(Self::HeadOfHousehold),
            _ => None,
        }
    }
}

impl fmt::Display for FilingStatus {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_accepts_short_codes() {
        assert_eq!(FilingStatus::parse("S"), Some(FilingStatus::Single));
        assert_eq!(
            FilingStatus::parse("mfj"),
            Some(FilingStatus::MarriedFilingJointly)
        );
        assert_eq!(
            FilingStatus::parse("MFS"),
            Some(FilingStatus::MarriedFilingSeparately)
        );
        assert_eq!(FilingStatus::parse("hoh"), Some(FilingStatus::HeadOfHousehold));
    }

    #[test]
    fn parse_accepts_long_names() {
        assert_eq!(
            FilingStatus::parse("married_jointly"),
            Some(FilingStatus::MarriedFilingJointly)
        );
        assert_eq!(
            FilingStatus::parse(" head_of_household "),
            Some(FilingStatus::HeadOfHousehold)
        );
    }

    #[test]
    fn parse_rejects_unknown_status() {
        assert_eq!(FilingStatus::parse("QSS"), None);
        assert_eq!(FilingStatus::parse(""), None);
    }

    #[test]
    fn as_str_round_trips_through_parse() {
        for status in FilingStatus::all() {
            assert_eq!(FilingStatus::parse(status.as_str()), Some(*status));
        }
    }
}
