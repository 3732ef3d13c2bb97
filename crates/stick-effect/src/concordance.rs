//! Kendall's coefficient of concordance
//!
//! `W = χ²_F / (n·(k − 1))` for a Friedman statistic over `n` blocks and `k`
//! treatments. `W = 1` when every block ranks the treatments identically and
//! `W = 0` when the mean ranks coincide.

use crate::traits::{EffectSizeEstimator, FromStatistic};
use crate::types::{EffectSize, EffectSizeType};
use stick_core::{Error, Result};

/// Friedman chi-squared with the design dimensions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FriedmanStatistic {
    /// Tie-corrected Friedman chi-squared
    pub chi_squared: f64,
    /// Number of blocks (subjects)
    pub blocks: usize,
    /// Number of treatments
    pub treatments: usize,
}

/// Kendall's W estimator
#[derive(Debug, Clone, Copy, Default)]
pub struct KendallsW;

impl EffectSizeEstimator for KendallsW {
    fn effect_size_type(&self) -> EffectSizeType {
        EffectSizeType::Concordance
    }

    fn name(&self) -> &'static str {
        "kendalls_w"
    }
}

impl FromStatistic for KendallsW {
    type Statistic = FriedmanStatistic;

    fn from_statistic(&self, statistic: &FriedmanStatistic) -> Result<EffectSize> {
        if statistic.blocks == 0 || statistic.treatments < 2 {
            return Err(Error::InvalidParameter(format!(
                "Kendall's W needs at least 1 block and 2 treatments, got {} and {}",
                statistic.blocks, statistic.treatments
            )));
        }
        let denominator = statistic.blocks as f64 * (statistic.treatments as f64 - 1.0);
        Ok(EffectSize::new(
            self.name(),
            statistic.chi_squared / denominator,
            self.effect_size_type(),
            vec![statistic.blocks, statistic.treatments],
        ))
    }
}
