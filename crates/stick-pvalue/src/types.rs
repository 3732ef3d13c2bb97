//! P-value types

use std::fmt;
use std::str::FromStr;

use num_bigint::BigUint;
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};
use stick_core::{BigDecimal, Error, Precision, Result};

/// Caller's preference for how p-values are obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PValueMethod {
    /// Exact below the per-test sample-size thresholds, asymptotic above
    #[default]
    Auto,
    /// Always enumerate the exact null distribution (where one exists)
    Exact,
    /// Always use the large-sample approximation
    Asymptotic,
}

impl PValueMethod {
    /// Canonical name as accepted by [`FromStr`]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Exact => "exact",
            Self::Asymptotic => "asymptotic",
        }
    }
}

impl FromStr for PValueMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "exact" => Ok(Self::Exact),
            "asymptotic" | "approx" | "normal" => Ok(Self::Asymptotic),
            _ => Err(Error::unsupported("p-value method", s)),
        }
    }
}

impl fmt::Display for PValueMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Distribution a p-value was actually read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PValueSource {
    /// Exact permutation / enumeration / binomial distribution
    Exact,
    /// Standard normal approximation
    Normal,
    /// Chi-squared approximation
    ChiSquared,
    /// F approximation (Iman-Davenport)
    F,
    /// Null variance is zero; the observation carries no evidence, p = 1
    Degenerate,
}

impl PValueSource {
    /// Short name used in serialized results
    pub fn name(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::Normal => "normal",
            Self::ChiSquared => "chi-squared",
            Self::F => "f",
            Self::Degenerate => "degenerate",
        }
    }

    /// Whether the p-value came from an exact distribution
    pub fn is_exact(&self) -> bool {
        matches!(self, Self::Exact)
    }
}

impl fmt::Display for PValueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An exact tail probability as a ratio of outcome counts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExactFraction {
    /// Number of outcomes at least as extreme as observed
    pub numerator: BigUint,
    /// Number of equally likely outcomes
    pub denominator: BigUint,
}

impl ExactFraction {
    /// Create a fraction, clamping the numerator to the denominator
    pub fn new(numerator: BigUint, denominator: BigUint) -> Self {
        let numerator = numerator.min(denominator.clone());
        Self {
            numerator,
            denominator,
        }
    }

    /// Float value of the fraction
    pub fn value(&self) -> f64 {
        // Shift both sides so the denominator fits comfortably in an f64.
        let shift = self.denominator.bits().saturating_sub(1000);
        let num = (&self.numerator >> shift).to_f64().unwrap_or(0.0);
        let den = (&self.denominator >> shift).to_f64().unwrap_or(f64::INFINITY);
        if den == 0.0 {
            return 1.0;
        }
        (num / den).clamp(0.0, 1.0)
    }

    /// Decimal value to `precision` significant digits, exact in every digit
    pub fn decimal(&self, precision: &Precision) -> Result<BigDecimal> {
        precision.ratio(&self.numerator, &self.denominator)
    }
}

/// A p-value together with how it was obtained
#[derive(Debug, Clone, PartialEq)]
pub struct PValue {
    /// The p-value in [0, 1]
    pub value: f64,
    /// Distribution used
    pub source: PValueSource,
    /// Exact rational form, when the source is an enumerated distribution
    pub exact: Option<ExactFraction>,
    /// Standardized statistic of the normal approximation
    pub z_score: Option<f64>,
    /// Iman-Davenport F statistic
    pub f_statistic: Option<f64>,
    /// (Numerator) degrees of freedom
    pub df: Option<f64>,
    /// Denominator degrees of freedom (F distribution)
    pub df_denominator: Option<f64>,
}

impl PValue {
    /// A p-value read from a continuous or float-evaluated distribution
    pub fn approximate(value: f64, source: PValueSource) -> Self {
        Self {
            value: value.clamp(0.0, 1.0),
            source,
            exact: None,
            z_score: None,
            f_statistic: None,
            df: None,
            df_denominator: None,
        }
    }

    /// An exact p-value from outcome counts
    pub fn exact(fraction: ExactFraction) -> Self {
        Self {
            value: fraction.value(),
            source: PValueSource::Exact,
            exact: Some(fraction),
            z_score: None,
            f_statistic: None,
            df: None,
            df_denominator: None,
        }
    }

    /// p = 1 for a statistic whose null variance is zero
    pub fn degenerate() -> Self {
        Self::approximate(1.0, PValueSource::Degenerate)
    }

    /// Attach a z-score
    pub fn with_z_score(mut self, z: f64) -> Self {
        self.z_score = Some(z);
        self
    }

    /// Attach degrees of freedom
    pub fn with_df(mut self, df: f64) -> Self {
        self.df = Some(df);
        self
    }

    /// Decimal form of the p-value
    ///
    /// Exact fractions are divided out to full precision; float values are
    /// rounded from their shortest representation.
    pub fn decimal(&self, precision: &Precision) -> Result<BigDecimal> {
        match &self.exact {
            Some(fraction) => fraction.decimal(precision),
            None => precision.decimal(self.value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_parse_method() {
        assert_eq!("auto".parse::<PValueMethod>().unwrap(), PValueMethod::Auto);
        assert_eq!("Exact".parse::<PValueMethod>().unwrap(), PValueMethod::Exact);
        assert_eq!(
            "asymptotic".parse::<PValueMethod>().unwrap(),
            PValueMethod::Asymptotic
        );
        let err = "bootstrap".parse::<PValueMethod>().unwrap_err();
        assert_eq!(err.to_string(), "Unsupported p-value method: 'bootstrap'");
    }

    #[test]
    fn test_exact_fraction_value_and_decimal() {
        let fraction = ExactFraction::new(BigUint::from(2u32), BigUint::from(20u32));
        assert_eq!(fraction.value(), 0.1);
        let decimal = fraction.decimal(&Precision::default()).unwrap();
        assert_eq!(decimal, BigDecimal::from_str("0.1").unwrap());
    }

    #[test]
    fn test_exact_fraction_clamps() {
        let fraction = ExactFraction::new(BigUint::from(30u32), BigUint::from(20u32));
        assert_eq!(fraction.numerator, BigUint::from(20u32));
        assert_eq!(fraction.value(), 1.0);
    }

    #[test]
    fn test_huge_denominator_value() {
        let den = BigUint::from(1u32) << 3000usize;
        let num = BigUint::from(1u32) << 2999usize;
        let fraction = ExactFraction::new(num, den);
        assert_eq!(fraction.value(), 0.5);
    }

    #[test]
    fn test_degenerate() {
        let p = PValue::degenerate();
        assert_eq!(p.value, 1.0);
        assert_eq!(p.source, PValueSource::Degenerate);
        assert!(!p.source.is_exact());
    }
}
