//! Correction method selection

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use stick_core::{Error, Result};

/// Multiple comparison correction methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CorrectionMethod {
    /// No correction
    #[serde(rename = "none")]
    None,
    /// Bonferroni: `min(1, m·p)`
    #[default]
    #[serde(rename = "bonferroni")]
    Bonferroni,
    /// Holm step-down Bonferroni
    #[serde(rename = "holm")]
    Holm,
    /// Šidák: `1 − (1 − p)^m`
    #[serde(rename = "sidak")]
    Sidak,
    /// Holm step-down with Šidák factors
    #[serde(rename = "holm-sidak")]
    HolmSidak,
    /// Hochberg step-up
    #[serde(rename = "hochberg")]
    Hochberg,
    /// Benjamini-Hochberg false discovery rate
    #[serde(rename = "fdr_bh")]
    BenjaminiHochberg,
    /// Benjamini-Yekutieli false discovery rate under dependence
    #[serde(rename = "fdr_by")]
    BenjaminiYekutieli,
}

impl CorrectionMethod {
    /// All supported methods
    pub const ALL: [CorrectionMethod; 8] = [
        Self::None,
        Self::Bonferroni,
        Self::Holm,
        Self::Sidak,
        Self::HolmSidak,
        Self::Hochberg,
        Self::BenjaminiHochberg,
        Self::BenjaminiYekutieli,
    ];

    /// Canonical name as accepted by [`FromStr`]
    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Bonferroni => "bonferroni",
            Self::Holm => "holm",
            Self::Sidak => "sidak",
            Self::HolmSidak => "holm-sidak",
            Self::Hochberg => "hochberg",
            Self::BenjaminiHochberg => "fdr_bh",
            Self::BenjaminiYekutieli => "fdr_by",
        }
    }

    /// Whether the method controls the false discovery rate rather than the
    /// family-wise error rate
    pub fn controls_fdr(&self) -> bool {
        matches!(self, Self::BenjaminiHochberg | Self::BenjaminiYekutieli)
    }
}

impl FromStr for CorrectionMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "bonferroni" => Ok(Self::Bonferroni),
            "holm" | "holm-bonferroni" => Ok(Self::Holm),
            "sidak" => Ok(Self::Sidak),
            "holm-sidak" | "holm_sidak" => Ok(Self::HolmSidak),
            "hochberg" | "simes-hochberg" => Ok(Self::Hochberg),
            "fdr_bh" | "fdr-bh" | "bh" | "benjamini-hochberg" => Ok(Self::BenjaminiHochberg),
            "fdr_by" | "fdr-by" | "by" | "benjamini-yekutieli" => Ok(Self::BenjaminiYekutieli),
            _ => Err(Error::unsupported("correction method", s)),
        }
    }
}

impl fmt::Display for CorrectionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for method in CorrectionMethod::ALL {
            assert_eq!(method.name().parse::<CorrectionMethod>().unwrap(), method);
        }
    }

    #[test]
    fn test_aliases() {
        assert_eq!(
            "Holm-Bonferroni".parse::<CorrectionMethod>().unwrap(),
            CorrectionMethod::Holm
        );
        assert_eq!(
            "BH".parse::<CorrectionMethod>().unwrap(),
            CorrectionMethod::BenjaminiHochberg
        );
    }

    #[test]
    fn test_unknown_method_is_named() {
        let err = "tukey".parse::<CorrectionMethod>().unwrap_err();
        assert_eq!(err.to_string(), "Unsupported correction method: 'tukey'");
    }

    #[test]
    fn test_default_is_bonferroni() {
        assert_eq!(CorrectionMethod::default(), CorrectionMethod::Bonferroni);
        assert!(!CorrectionMethod::Holm.controls_fdr());
        assert!(CorrectionMethod::BenjaminiYekutieli.controls_fdr());
    }
}
