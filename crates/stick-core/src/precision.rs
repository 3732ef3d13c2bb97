//! Decimal precision for reported results
//!
//! Every numeric field of a result record is reported as a [`BigDecimal`]
//! rounded to a number of significant digits. The precision is an explicit
//! value passed to each computation; nothing here touches process-wide state.
//!
//! Two conversions are provided:
//!
//! - [`Precision::decimal`] for float64 quantities. The decimal form starts
//!   from the shortest representation that round-trips the `f64`, so it never
//!   invents digits the float computation did not produce.
//! - [`Precision::ratio`] for exact rationals (permutation and enumeration
//!   counts). These are divided out in integer arithmetic and are correct to
//!   every requested digit.

use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use num_bigint::{BigInt, BigUint};
use num_traits::Zero;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Default number of significant digits
pub const DEFAULT_PRECISION: u64 = 50;

/// Largest accepted number of significant digits
pub const MAX_PRECISION: u64 = 10_000;

/// Number of significant decimal digits used for reported values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct Precision(u64);

impl Precision {
    /// Create a precision of `digits` significant digits
    pub fn new(digits: u64) -> Result<Self> {
        if digits == 0 {
            return Err(Error::InvalidParameter(
                "precision must be at least 1 significant digit".to_string(),
            ));
        }
        if digits > MAX_PRECISION {
            return Err(Error::InvalidParameter(format!(
                "precision of {digits} digits exceeds the limit of {MAX_PRECISION}"
            )));
        }
        Ok(Self(digits))
    }

    /// Number of significant digits
    pub fn digits(&self) -> u64 {
        self.0
    }

    /// Convert a float64 quantity to a decimal rounded to this precision
    pub fn decimal(&self, value: f64) -> Result<BigDecimal> {
        if !value.is_finite() {
            return Err(Error::Computation(format!(
                "cannot represent non-finite value {value} as a decimal"
            )));
        }
        if value == 0.0 {
            return Ok(BigDecimal::zero());
        }
        let shortest = format!("{value:e}");
        let parsed = BigDecimal::from_str(&shortest)
            .map_err(|e| Error::Computation(format!("decimal conversion of {value}: {e}")))?;
        Ok(self.round(&parsed))
    }

    /// Divide two exact integer counts to this precision
    pub fn ratio(&self, numerator: &BigUint, denominator: &BigUint) -> Result<BigDecimal> {
        if denominator.is_zero() {
            return Err(Error::Computation(
                "ratio with zero denominator".to_string(),
            ));
        }
        if numerator.is_zero() {
            return Ok(BigDecimal::zero());
        }

        let num_digits = numerator.to_string().len() as i64;
        let den_digits = denominator.to_string().len() as i64;
        // Enough scale that the integer quotient has more digits than we keep.
        let scale = (self.0 as i64 + 2 + den_digits - num_digits).max(0);
        let scaled = numerator * BigUint::from(10u32).pow(scale as u32);
        let quotient = scaled / denominator;

        Ok(self.round(&BigDecimal::new(BigInt::from(quotient), scale)))
    }

    /// Round an existing decimal to this precision, dropping trailing zeros
    pub fn round(&self, value: &BigDecimal) -> BigDecimal {
        if value.is_zero() {
            return BigDecimal::zero();
        }
        value.with_prec(self.0).normalized()
    }
}

impl Default for Precision {
    fn default() -> Self {
        Self(DEFAULT_PRECISION)
    }
}

impl TryFrom<u64> for Precision {
    type Error = Error;

    fn try_from(digits: u64) -> Result<Self> {
        Self::new(digits)
    }
}

impl From<Precision> for u64 {
    fn from(precision: Precision) -> Self {
        precision.0
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} significant digits", self.0)
    }
}
