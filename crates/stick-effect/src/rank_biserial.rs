//! Rank-biserial correlation
//!
//! Glass (1966) defined the rank-biserial correlation of two samples as the
//! difference between the proportions of favourable and unfavourable pairs.
//! In terms of the Mann-Whitney statistic of the first sample it is
//! `r = 1 − 2·U1 / (n1·n2)`, which is positive when the second sample tends
//! to be larger.
//!
//! The Mann-Whitney result reports the unsigned form based on
//! `U = min(U1, U2)`, see [`RankBiserial::magnitude`].
//!
//! For paired data the matched-pairs form `(W+ − W−) / (W+ + W−)` of
//! Kerby (2014) is used instead.

use crate::traits::{EffectSizeEstimator, FromStatistic};
use crate::types::{EffectSize, EffectSizeType};
use stick_core::{Error, Result};

/// Mann-Whitney `U1` together with the sample sizes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankSumStatistic {
    /// Mann-Whitney statistic of the first sample
    pub u1: f64,
    /// First sample size
    pub n1: usize,
    /// Second sample size
    pub n2: usize,
}

impl RankSumStatistic {
    /// `U2 = n1·n2 − U1`
    pub fn u2(&self) -> f64 {
        (self.n1 * self.n2) as f64 - self.u1
    }

    /// `min(U1, U2)`
    pub fn u_min(&self) -> f64 {
        self.u1.min(self.u2())
    }
}

/// Rank-biserial correlation estimator
#[derive(Debug, Clone, Copy, Default)]
pub struct RankBiserial {
    signed: bool,
}

impl RankBiserial {
    /// Signed estimator, `1 − 2·U1/(n1·n2)`
    pub fn new() -> Self {
        Self { signed: true }
    }

    /// Unsigned estimator, `1 − 2·min(U1, U2)/(n1·n2)`
    pub fn magnitude() -> Self {
        Self { signed: false }
    }
}

impl EffectSizeEstimator for RankBiserial {
    fn effect_size_type(&self) -> EffectSizeType {
        EffectSizeType::Dominance
    }

    fn name(&self) -> &'static str {
        "rank_biserial_r"
    }

    fn is_symmetric(&self) -> bool {
        self.signed
    }
}

impl FromStatistic for RankBiserial {
    type Statistic = RankSumStatistic;

    fn from_statistic(&self, statistic: &RankSumStatistic) -> Result<EffectSize> {
        let pairs = (statistic.n1 * statistic.n2) as f64;
        if pairs == 0.0 {
            return Err(Error::InsufficientData {
                expected: 1,
                actual: 0,
            });
        }
        let u = if self.signed {
            statistic.u1
        } else {
            statistic.u_min()
        };
        Ok(EffectSize::new(
            self.name(),
            1.0 - 2.0 * u / pairs,
            self.effect_size_type(),
            vec![statistic.n1, statistic.n2],
        ))
    }
}

/// Wilcoxon signed-rank sums with the number of non-zero differences
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignedRankStatistic {
    /// Sum of ranks of positive differences
    pub w_plus: f64,
    /// Sum of ranks of negative differences
    pub w_minus: f64,
    /// Number of ranked differences
    pub n: usize,
}

/// Matched-pairs rank-biserial correlation, `(W+ − W−) / (W+ + W−)`
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchedPairsRankBiserial;

impl EffectSizeEstimator for MatchedPairsRankBiserial {
    fn effect_size_type(&self) -> EffectSizeType {
        EffectSizeType::Dominance
    }

    fn name(&self) -> &'static str {
        "matched_pairs_rank_biserial_r"
    }

    fn is_symmetric(&self) -> bool {
        true
    }
}

impl FromStatistic for MatchedPairsRankBiserial {
    type Statistic = SignedRankStatistic;

    fn from_statistic(&self, statistic: &SignedRankStatistic) -> Result<EffectSize> {
        let total = statistic.w_plus + statistic.w_minus;
        // No non-zero differences: no evidence either way
        let magnitude = if total > 0.0 {
            (statistic.w_plus - statistic.w_minus) / total
        } else {
            0.0
        };
        Ok(EffectSize::new(
            self.name(),
            magnitude,
            self.effect_size_type(),
            vec![statistic.n],
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_complete_separation() {
        // x entirely below y: U1 = 0
        let stat = RankSumStatistic { u1: 0.0, n1: 3, n2: 3 };
        let r = RankBiserial::new().from_statistic(&stat).unwrap();
        assert_eq!(r.magnitude, 1.0);
        let r = RankBiserial::magnitude().from_statistic(&stat).unwrap();
        assert_eq!(r.magnitude, 1.0);
    }

    #[test]
    fn test_signed_versus_magnitude() {
        // x entirely above y: U1 = 9
        let stat = RankSumStatistic { u1: 9.0, n1: 3, n2: 3 };
        let signed = RankBiserial::new().from_statistic(&stat).unwrap();
        assert_eq!(signed.magnitude, -1.0);
        let unsigned = RankBiserial::magnitude().from_statistic(&stat).unwrap();
        assert_eq!(unsigned.magnitude, 1.0);
        assert!(RankBiserial::new().is_symmetric());
    }

    #[test]
    fn test_no_effect() {
        let stat = RankSumStatistic { u1: 8.0, n1: 4, n2: 4 };
        let r = RankBiserial::new().from_statistic(&stat).unwrap();
        assert_abs_diff_eq!(r.magnitude, 0.0, epsilon = 1e-12);
        assert_eq!(r.sample_sizes, vec![4, 4]);
    }

    #[test]
    fn test_empty_sample_rejected() {
        let stat = RankSumStatistic { u1: 0.0, n1: 0, n2: 4 };
        assert!(RankBiserial::new().from_statistic(&stat).is_err());
    }

    #[test]
    fn test_matched_pairs() {
        let stat = SignedRankStatistic {
            w_plus: 15.0,
            w_minus: 0.0,
            n: 5,
        };
        let r = MatchedPairsRankBiserial.from_statistic(&stat).unwrap();
        assert_eq!(r.magnitude, 1.0);

        let stat = SignedRankStatistic {
            w_plus: 5.0,
            w_minus: 10.0,
            n: 5,
        };
        let r = MatchedPairsRankBiserial.from_statistic(&stat).unwrap();
        assert_abs_diff_eq!(r.magnitude, -1.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_matched_pairs_without_differences() {
        let stat = SignedRankStatistic {
            w_plus: 0.0,
            w_minus: 0.0,
            n: 0,
        };
        let r = MatchedPairsRankBiserial.from_statistic(&stat).unwrap();
        assert_eq!(r.magnitude, 0.0);
    }
}
