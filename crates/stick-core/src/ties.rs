//! Tie detection and variance correction
//!
//! A tie group is a maximal run of pooled observations sharing one value. The
//! tie profile of a sample is the multiset of tie group sizes `t > 1`; every
//! rank statistic corrects its null variance through `Σ (t³ − t)`.


use serde::{Deserialize, Serialize};

/// A maximal run of pooled observations with identical value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TieGroup {
    /// The shared value
    pub value: f64,
    /// Number of observations in the run (always > 1)
    pub count: usize,
    /// Rank assigned to the run's first member under the ranking method
    pub rank: f64,
}

/// Tie group sizes of a sample
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TieProfile {
    tie_counts: Vec<usize>,
}

impl TieProfile {
    /// Build a profile from raw tie group sizes (sizes ≤ 1 are dropped)
    pub fn new(tie_counts: impl IntoIterator<Item = usize>) -> Self {
        Self {
            tie_counts: tie_counts.into_iter().filter(|&t| t > 1).collect(),
        }
    }

    /// Scan a sample for repeated values
    ///
    /// NaN values never compare equal and therefore never form ties.
    pub fn from_values(values: &[f64]) -> Self {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let mut counts = Vec::new();
        let mut i = 0;
        while i < sorted.len() {
            let mut j = i;
            while j + 1 < sorted.len() && sorted[j + 1] == sorted[i] {
                j += 1;
            }
            if j > i {
                counts.push(j - i + 1);
            }
            i = j + 1;
        }
        Self { tie_counts: counts }
    }

    /// Build a profile from the tie groups found while ranking
    pub fn from_groups(groups: &[TieGroup]) -> Self {
        Self::new(groups.iter().map(|g| g.count))
    }

    /// Whether any value repeats
    pub fn has_ties(&self) -> bool {
        !self.tie_counts.is_empty()
    }

    /// Sizes of the tie groups
    pub fn tie_counts(&self) -> &[usize] {
        &self.tie_counts
    }

    /// Merge another profile into this one
    ///
    /// Used where ranking happens within blocks and ties are pooled
    /// across blocks (Friedman, Page).
    pub fn extend(&mut self, other: &TieProfile) {
        self.tie_counts.extend_from_slice(&other.tie_counts);
    }

    /// `Σ (t³ − t)` over all tie groups
    pub fn sum_cubed_minus_t(&self) -> f64 {
        sum_cubed_minus_t(&self.tie_counts)
    }

    /// Additive correction for the rank-sum (Mann-Whitney) variance
    pub fn rank_sum_correction(&self, n: usize) -> f64 {
        TieCorrection::RankSum.term(&self.tie_counts, n)
    }

    /// Additive correction for the signed-rank (Wilcoxon) variance
    pub fn signed_rank_correction(&self) -> f64 {
        TieCorrection::SignedRank.term(&self.tie_counts, 0)
    }

    /// Multiplicative correction `c` for the Kruskal-Wallis H statistic
    pub fn h_correction_factor(&self, n: usize) -> f64 {
        TieCorrection::KruskalWallis.term(&self.tie_counts, n)
    }
}

/// Which statistic a tie correction is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TieCorrection {
    /// `Σ t(t² − 1) / [12 N (N − 1)]`, subtracted inside `n1 n2 / 12 · (…)`
    RankSum,
    /// `Σ t(t² − 1) / 48`, subtracted from the signed-rank variance
    SignedRank,
    /// `c = 1 − Σ (t³ − t) / (N³ − N)`, divides H
    KruskalWallis,
}

impl TieCorrection {
    /// Correction term for `tie_counts` in a pool of `n` observations
    ///
    /// Without ties the additive forms return 0 and the multiplicative form
    /// returns 1, recovering the untied formula exactly.
    pub fn term(&self, tie_counts: &[usize], n: usize) -> f64 {
        let sum = sum_cubed_minus_t(tie_counts);
        match self {
            Self::RankSum => {
                if sum == 0.0 || n < 2 {
                    return 0.0;
                }
                let n = n as f64;
                sum / (12.0 * n * (n - 1.0))
            }
            Self::SignedRank => sum / 48.0,
            Self::KruskalWallis => {
                if sum == 0.0 || n < 2 {
                    return 1.0;
                }
                let n = n as f64;
                1.0 - sum / (n * n * n - n)
            }
        }
    }

    /// Whether the correction changes anything for these tie counts
    pub fn applies(tie_counts: &[usize]) -> bool {
        tie_counts.iter().any(|&t| t > 1)
    }
}

/// `Σ (t³ − t)`
pub fn sum_cubed_minus_t(tie_counts: &[usize]) -> f64 {
    tie_counts
        .iter()
        .map(|&t| {
            let t = t as f64;
            t * t * t - t
        })
        .sum()
}

/// Tie profile of a single sample
pub fn tie_profile(sample: &[f64]) -> TieProfile {
    TieProfile::from_values(sample)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_profile_without_ties() {
        let profile = tie_profile(&[3.0, 1.0, 2.0, 5.0]);
        assert!(!profile.has_ties());
        assert!(profile.tie_counts().is_empty());
        assert_eq!(profile.rank_sum_correction(4), 0.0);
        assert_eq!(profile.signed_rank_correction(), 0.0);
        assert_eq!(profile.h_correction_factor(4), 1.0);
    }

    #[test]
    fn test_signed_zeros_form_one_group() {
        let profile = TieProfile::from_values(&[-0.0, 2.0, 0.0, -0.0]);
        assert_eq!(profile.tie_counts(), &[3]);
    }

    #[test]
    fn test_profile_counts_tie_groups() {
        let profile = tie_profile(&[1.0, 2.0, 2.0, 3.0, 3.0, 3.0, 4.0]);
        assert!(profile.has_ties());
        assert_eq!(profile.tie_counts(), &[2, 3]);
        // (8 - 2) + (27 - 3)
        assert_eq!(profile.sum_cubed_minus_t(), 30.0);
    }

    #[test]
    fn test_correction_terms() {
        let counts = [2, 3];
        assert_abs_diff_eq!(
            TieCorrection::RankSum.term(&counts, 7),
            30.0 / (12.0 * 7.0 * 6.0),
            epsilon = 1e-15
        );
        assert_abs_diff_eq!(
            TieCorrection::SignedRank.term(&counts, 7),
            30.0 / 48.0,
            epsilon = 1e-15
        );
        assert_abs_diff_eq!(
            TieCorrection::KruskalWallis.term(&counts, 7),
            1.0 - 30.0 / 336.0,
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_all_tied_factor_is_zero() {
        let profile = tie_profile(&[4.0; 6]);
        assert_eq!(profile.tie_counts(), &[6]);
        assert_abs_diff_eq!(profile.h_correction_factor(6), 0.0, epsilon = 1e-15);
    }

    #[test]
    fn test_extend_and_filter() {
        let mut profile = TieProfile::new([1, 2, 1]);
        assert_eq!(profile.tie_counts(), &[2]);
        profile.extend(&TieProfile::new([3]));
        assert_eq!(profile.tie_counts(), &[2, 3]);
        assert!(TieCorrection::applies(profile.tie_counts()));
        assert!(!TieCorrection::applies(&[1, 1]));
    }
}
