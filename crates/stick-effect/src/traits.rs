//! Core traits for effect size estimation

use crate::types::{EffectSize, EffectSizeType};
use stick_core::Result;

/// Base trait for effect size estimators
pub trait EffectSizeEstimator {
    /// Get the type of effect size this estimator computes
    fn effect_size_type(&self) -> EffectSizeType;

    /// Measure name used when the effect size is reported
    fn name(&self) -> &'static str;

    /// Check if the estimator is symmetric (effect_size(A,B) = -effect_size(B,A))
    fn is_symmetric(&self) -> bool {
        false
    }
}

/// Effect sizes derived from an already computed test statistic
///
/// Test procedures compute the statistic once and hand it here, so the
/// effect size always agrees with the reported statistic.
pub trait FromStatistic: EffectSizeEstimator {
    /// Statistic (with the sizes it depends on) the effect is derived from
    type Statistic;

    /// Compute the effect size
    fn from_statistic(&self, statistic: &Self::Statistic) -> Result<EffectSize>;
}
