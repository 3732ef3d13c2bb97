//! Large-sample approximations based on theoretical distributions

use statrs::distribution::{ChiSquared, ContinuousCDF, FisherSnedecor, Normal};
use stick_core::{Alternative, Error, Result};

fn standard_normal() -> Result<Normal> {
    Normal::new(0.0, 1.0).map_err(|e| {
        Error::Computation(format!("Failed to create normal distribution: {}", e))
    })
}

/// Standardize a statistic with an optional ±0.5 continuity correction
///
/// The correction always moves the statistic toward the mean. For the
/// two-sided case the returned value carries the sign of `statistic − mean`.
pub fn standardize(
    statistic: f64,
    mean: f64,
    std_dev: f64,
    alternative: Alternative,
    continuity: bool,
) -> f64 {
    let c = if continuity { 0.5 } else { 0.0 };
    let deviation = statistic - mean;
    match alternative {
        Alternative::Greater => (deviation - c) / std_dev,
        Alternative::Less => (deviation + c) / std_dev,
        Alternative::TwoSided => {
            let magnitude = (deviation.abs() - c).max(0.0) / std_dev;
            magnitude.copysign(deviation)
        }
    }
}

/// Normal tail probability of a z-score under `alternative`
pub fn normal_p_value(z: f64, alternative: Alternative) -> Result<f64> {
    let normal = standard_normal()?;
    let p = match alternative {
        Alternative::Greater => normal.sf(z),
        Alternative::Less => normal.cdf(z),
        Alternative::TwoSided => 2.0 * normal.sf(z.abs()),
    };
    Ok(p.clamp(0.0, 1.0))
}

/// Upper tail of the chi-squared distribution with `df` degrees of freedom
pub fn chi_squared_p_value(statistic: f64, df: f64) -> Result<f64> {
    if !(df > 0.0) {
        return Err(Error::InvalidParameter(format!(
            "chi-squared degrees of freedom must be positive, got {df}"
        )));
    }
    if statistic <= 0.0 {
        return Ok(1.0);
    }
    let chi = ChiSquared::new(df).map_err(|e| {
        Error::Computation(format!("Failed to create chi-squared distribution: {}", e))
    })?;
    Ok(chi.sf(statistic).clamp(0.0, 1.0))
}

/// Upper tail of the F distribution with (`df1`, `df2`) degrees of freedom
pub fn f_p_value(statistic: f64, df1: f64, df2: f64) -> Result<f64> {
    if !(df1 > 0.0) || !(df2 > 0.0) {
        return Err(Error::InvalidParameter(format!(
            "F degrees of freedom must be positive, got ({df1}, {df2})"
        )));
    }
    if statistic <= 0.0 {
        return Ok(1.0);
    }
    let f = FisherSnedecor::new(df1, df2).map_err(|e| {
        Error::Computation(format!("Failed to create F distribution: {}", e))
    })?;
    Ok(f.sf(statistic).clamp(0.0, 1.0))
}
