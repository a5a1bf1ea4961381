use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The simplified taxation regime the seller reports under.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxRegime {
    /// 6% of gross income.
    #[default]
    Usn6,
    /// 15% of income less expenses.
    Usn15,
}

impl fmt::Display for TaxRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaxRegime::Usn6 => f.write_str("usn6"),
            TaxRegime::Usn15 => f.write_str("usn15"),
        }
    }
}

impl FromStr for TaxRegime {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "usn6" => Ok(TaxRegime::Usn6),
            "usn15" => Ok(TaxRegime::Usn15),
            other => Err(CoreError::InvalidInput(
                "tax regime".to_string(),
                format!("'{other}' (expected usn6 or usn15)"),
            )),
        }
    }
}

/// Profitability tier assigned by the ABC classification.
///
/// `A`, `B` and `C` partition the profitable SKUs by cumulative profit share;
/// `D` holds every SKU that made no profit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AbcTier {
    A,
    B,
    C,
    D,
}

impl fmt::Display for AbcTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AbcTier::A => "A",
            AbcTier::B => "B",
            AbcTier::C => "C",
            AbcTier::D => "D",
        };
        f.write_str(label)
    }
}

impl FromStr for AbcTier {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(AbcTier::A),
            "B" => Ok(AbcTier::B),
            "C" => Ok(AbcTier::C),
            "D" => Ok(AbcTier::D),
            other => Err(CoreError::InvalidInput(
                "ABC tier".to_string(),
                format!("'{other}' (expected A, B, C or D)"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tax_regime_parses_case_insensitively() {
        assert_eq!("USN15".parse::<TaxRegime>(), Ok(TaxRegime::Usn15));
        assert_eq!(" usn6 ".parse::<TaxRegime>(), Ok(TaxRegime::Usn6));
        assert!("osno".parse::<TaxRegime>().is_err());
    }

    #[test]
    fn tax_regime_round_trips_through_display() {
        for regime in [TaxRegime::Usn6, TaxRegime::Usn15] {
            assert_eq!(regime.to_string().parse::<TaxRegime>(), Ok(regime));
        }
    }

    #[test]
    fn abc_tier_parses_lowercase() {
        assert_eq!("b".parse::<AbcTier>(), Ok(AbcTier::B));
        assert!("E".parse::<AbcTier>().is_err());
    }
}
