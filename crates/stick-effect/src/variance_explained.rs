//! Epsilon-squared for the Kruskal-Wallis test
//!
//! `ε² = H / (N − 1)`, the share of the rank variance explained by group
//! membership (Tomczak & Tomczak, 2014).

use crate::traits::{EffectSizeEstimator, FromStatistic};
use crate::types::{EffectSize, EffectSizeType};
use stick_core::{Error, Result};

/// Kruskal-Wallis `H` with the group sizes
#[derive(Debug, Clone, PartialEq)]
pub struct HStatistic {
    /// Tie-corrected `H`
    pub h: f64,
    /// Group sizes
    pub sizes: Vec<usize>,
}

impl HStatistic {
    /// Total number of observations
    pub fn total(&self) -> usize {
        self.sizes.iter().sum()
    }
}

/// Epsilon-squared estimator
#[derive(Debug, Clone, Copy, Default)]
pub struct EpsilonSquared;

impl EffectSizeEstimator for EpsilonSquared {
    fn effect_size_type(&self) -> EffectSizeType {
        EffectSizeType::VarianceExplained
    }

    fn name(&self) -> &'static str {
        "epsilon_squared"
    }
}

impl FromStatistic for EpsilonSquared {
    type Statistic = HStatistic;

    fn from_statistic(&self, statistic: &HStatistic) -> Result<EffectSize> {
        let n = statistic.total();
        if n < 2 {
            return Err(Error::InsufficientData {
                expected: 2,
                actual: n,
            });
        }
        Ok(EffectSize::new(
            self.name(),
            statistic.h / (n as f64 - 1.0),
            self.effect_size_type(),
            statistic.sizes.clone(),
        ))
    }
}
