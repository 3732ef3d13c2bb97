//! Sign imbalance for the sign test

use crate::traits::{EffectSizeEstimator, FromStatistic};
use crate::types::{EffectSize, EffectSizeType};
use stick_core::Result;

/// Counts of positive and negative paired differences (zeros excluded)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignCounts {
    /// Differences greater than zero
    pub positive: usize,
    /// Differences less than zero
    pub negative: usize,
}

impl SignCounts {
    /// Number of non-zero differences
    pub fn trials(&self) -> usize {
        self.positive + self.negative
    }
}

/// `|n₊ − n₋| / n`, zero when there are no non-zero differences
#[derive(Debug, Clone, Copy, Default)]
pub struct SignProportion;

impl EffectSizeEstimator for SignProportion {
    fn effect_size_type(&self) -> EffectSizeType {
        EffectSizeType::Proportion
    }

    fn name(&self) -> &'static str {
        "sign_proportion"
    }
}

impl FromStatistic for SignProportion {
    type Statistic = SignCounts;

    fn from_statistic(&self, counts: &SignCounts) -> Result<EffectSize> {
        let n = counts.trials();
        let magnitude = if n == 0 {
            0.0
        } else {
            counts.positive.abs_diff(counts.negative) as f64 / n as f64
        };
        Ok(EffectSize::new(
            self.name(),
            magnitude,
            self.effect_size_type(),
            vec![n],
        ))
    }
}
