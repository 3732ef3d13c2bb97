//! Normalized trend statistics
//!
//! Jonckheere-Terpstra `J` and Page's `L` are rescaled to [0, 1] by their
//! attainable range. Values near 0.5 indicate no ordering.

use crate::traits::{EffectSizeEstimator, FromStatistic};
use crate::types::{EffectSize, EffectSizeType};
use stick_core::{Error, Result};

/// A trend statistic with the smallest and largest values it can take
#[derive(Debug, Clone, PartialEq)]
pub struct TrendStatistic {
    /// Observed statistic
    pub value: f64,
    /// Smallest attainable value
    pub min: f64,
    /// Largest attainable value
    pub max: f64,
    /// Sizes reported with the effect
    pub sizes: Vec<usize>,
}

impl TrendStatistic {
    /// Jonckheere-Terpstra `J`, attainable range `[0, Σ_{i<j} nᵢnⱼ]`
    pub fn jonckheere(j: f64, sizes: &[usize]) -> Self {
        let mut pairs = 0usize;
        for (i, &ni) in sizes.iter().enumerate() {
            for &nj in &sizes[i + 1..] {
                pairs += ni * nj;
            }
        }
        Self {
            value: j,
            min: 0.0,
            max: pairs as f64,
            sizes: sizes.to_vec(),
        }
    }

    /// Page's `L` for `blocks` × `treatments`
    ///
    /// `L` is largest when each block ranks treatment `j` as `j` and smallest
    /// when the ranking is reversed.
    pub fn page(l: f64, blocks: usize, treatments: usize) -> Self {
        let n = blocks as f64;
        let max = n * (1..=treatments).map(|j| (j * j) as f64).sum::<f64>();
        let min = n * (1..=treatments)
            .map(|j| (j * (treatments + 1 - j)) as f64)
            .sum::<f64>();
        Self {
            value: l,
            min,
            max,
            sizes: vec![blocks, treatments],
        }
    }
}

/// Trend statistic rescaled to `(value − min) / (max − min)`
#[derive(Debug, Clone, Copy)]
pub struct NormalizedTrend {
    name: &'static str,
}

impl NormalizedTrend {
    /// Normalized Jonckheere-Terpstra `J`
    pub fn jonckheere() -> Self {
        Self {
            name: "normalized_j",
        }
    }

    /// Normalized Page `L`
    pub fn page() -> Self {
        Self {
            name: "normalized_l",
        }
    }
}

impl EffectSizeEstimator for NormalizedTrend {
    fn effect_size_type(&self) -> EffectSizeType {
        EffectSizeType::Trend
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

impl FromStatistic for NormalizedTrend {
    type Statistic = TrendStatistic;

    fn from_statistic(&self, statistic: &TrendStatistic) -> Result<EffectSize> {
        if statistic.max < statistic.min {
            return Err(Error::InvalidParameter(format!(
                "trend range is empty: [{}, {}]",
                statistic.min, statistic.max
            )));
        }
        let range = statistic.max - statistic.min;
        let magnitude = if range > 0.0 {
            (statistic.value - statistic.min) / range
        } else {
            0.5
        };
        Ok(EffectSize::new(
            self.name,
            magnitude,
            self.effect_size_type(),
            statistic.sizes.clone(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_jonckheere_range() {
        let stat = TrendStatistic::jonckheere(27.0, &[3, 3, 3]);
        assert_eq!(stat.max, 27.0);
        let e = NormalizedTrend::jonckheere().from_statistic(&stat).unwrap();
        assert_eq!(e.magnitude, 1.0);
        assert_eq!(e.name, "normalized_j");
    }

    #[test]
    fn test_page_range() {
        // k = 3: max Σj² = 14, min 1·3 + 2·2 + 3·1 = 10 per block
        let stat = TrendStatistic::page(24.0, 2, 3);
        assert_eq!(stat.max, 28.0);
        assert_eq!(stat.min, 20.0);
        let e = NormalizedTrend::page().from_statistic(&stat).unwrap();
        assert_abs_diff_eq!(e.magnitude, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_empty_range_is_midpoint() {
        let stat = TrendStatistic::jonckheere(0.0, &[3]);
        let e = NormalizedTrend::jonckheere().from_statistic(&stat).unwrap();
        assert_eq!(e.magnitude, 0.5);
    }
}
