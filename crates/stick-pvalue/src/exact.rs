//! Exact null distributions by enumeration
//!
//! Average ranks are half-integers, so every statistic here is handled on the
//! doubled scale where it is an integer. Counting is done by dynamic
//! programming over the observed ranks, which makes the distributions exact
//! for the actual tie pattern of the data rather than the untied textbook
//! tables.

use num_bigint::BigUint;
use num_traits::{One, Zero};
use stick_core::{Alternative, Error, Result};

use crate::types::ExactFraction;

/// Counts of an integer-valued statistic over equally likely outcomes
///
/// `counts[s]` is the number of outcomes whose (doubled) statistic equals `s`.
#[derive(Debug, Clone, PartialEq)]
pub struct CountDistribution {
    counts: Vec<u128>,
    total: u128,
}

impl CountDistribution {
    fn from_counts(counts: Vec<u128>) -> Self {
        let total = counts.iter().sum();
        Self { counts, total }
    }

    /// Number of equally likely outcomes
    pub fn total(&self) -> u128 {
        self.total
    }

    /// Largest attainable statistic on the doubled scale
    pub fn max_statistic(&self) -> usize {
        self.counts.len().saturating_sub(1)
    }

    /// Count of outcomes equal to `s`
    pub fn count(&self, s: usize) -> u128 {
        self.counts.get(s).copied().unwrap_or(0)
    }

    /// Outcomes with statistic ≤ `s`
    pub fn lower_tail(&self, s: usize) -> u128 {
        let end = (s + 1).min(self.counts.len());
        self.counts[..end].iter().sum()
    }

    /// Outcomes with statistic ≥ `s`
    pub fn upper_tail(&self, s: usize) -> u128 {
        if s >= self.counts.len() {
            return 0;
        }
        self.counts[s..].iter().sum()
    }

    /// Tail probability for `observed` under `alternative`
    ///
    /// `Greater` reads the upper tail, `Less` the lower tail, and the
    /// two-sided value is `2 · min(lower, upper)` clamped at 1.
    pub fn tail(&self, observed: usize, alternative: Alternative) -> ExactFraction {
        let lower = self.lower_tail(observed);
        let upper = self.upper_tail(observed);
        let numerator = match alternative {
            Alternative::Less => BigUint::from(lower),
            Alternative::Greater => BigUint::from(upper),
            Alternative::TwoSided => BigUint::from(lower.min(upper)) * 2u32,
        };
        ExactFraction::new(numerator, BigUint::from(self.total))
    }
}

/// Convert half-integer ranks to integers on the doubled scale
pub fn doubled(ranks: &[f64]) -> Result<Vec<usize>> {
    ranks
        .iter()
        .map(|&r| {
            let d = 2.0 * r;
            if !d.is_finite() || d < 0.0 || (d - d.round()).abs() > 1e-9 {
                return Err(Error::InvalidInput(format!(
                    "rank {r} is not a positive half-integer"
                )));
            }
            Ok(d.round() as usize)
        })
        .collect()
}

/// Distribution of the doubled rank sum of a random `n1`-subset of `ranks`
///
/// Every one of the `C(N, n1)` assignments of the pooled ranks to the first
/// sample is equally likely under the null hypothesis.
pub fn rank_sum_distribution(ranks: &[f64], n1: usize) -> Result<CountDistribution> {
    let values = doubled(ranks)?;
    let n = values.len();
    if n1 == 0 || n1 >= n {
        return Err(Error::InvalidParameter(format!(
            "first sample size {n1} must lie strictly between 0 and the pool size {n}"
        )));
    }

    // Enumerate the smaller side and reflect, the table is much smaller.
    let total_sum: usize = values.iter().sum();
    let m = n1.min(n - n1);
    let width = total_sum + 1;
    let mut table = vec![0u128; (m + 1) * width];
    table[0] = 1;

    for (idx, &v) in values.iter().enumerate() {
        let upper = (idx + 1).min(m);
        for j in (1..=upper).rev() {
            for s in (v..width).rev() {
                let add = table[(j - 1) * width + s - v];
                if add != 0 {
                    table[j * width + s] += add;
                }
            }
        }
    }

    let counts = table[m * width..].to_vec();
    if m == n1 {
        return Ok(CountDistribution::from_counts(counts));
    }
    // Sum of the complement: S1 = total − S2
    let mut reflected = vec![0u128; width];
    for (s, &c) in counts.iter().enumerate() {
        reflected[total_sum - s] = c;
    }
    Ok(CountDistribution::from_counts(reflected))
}

/// Distribution of the doubled positive-rank sum `W+`
///
/// Each of the `2^n` sign assignments to the ranks is equally likely.
pub fn signed_rank_distribution(ranks: &[f64]) -> Result<CountDistribution> {
    let values = doubled(ranks)?;
    if values.len() >= 127 {
        return Err(Error::InvalidParameter(format!(
            "exact signed-rank distribution is limited to fewer than 127 observations, got {}",
            values.len()
        )));
    }
    let total_sum: usize = values.iter().sum();
    let mut counts = vec![0u128; total_sum + 1];
    counts[0] = 1;
    for &v in &values {
        for s in (v..=total_sum).rev() {
            let add = counts[s - v];
            if add != 0 {
                counts[s] += add;
            }
        }
    }
    Ok(CountDistribution::from_counts(counts))
}

/// Exact tail of Binomial(`trials`, 1/2) at `successes`
///
/// Counts are binomial coefficients over a denominator of `2^trials`.
pub fn binomial_half_tail(successes: u64, trials: u64, alternative: Alternative) -> Result<ExactFraction> {
    if successes > trials {
        return Err(Error::InvalidParameter(format!(
            "successes {successes} exceed trials {trials}"
        )));
    }
    // P(X ≥ k) = P(X ≤ n − k) by symmetry of the fair coin
    let lower = binomial_cumulative(successes, trials);
    let upper = binomial_cumulative(trials - successes, trials);
    let total = BigUint::one() << trials;

    let numerator = match alternative {
        Alternative::Less => lower,
        Alternative::Greater => upper,
        Alternative::TwoSided => lower.min(upper) * 2u32,
    };
    Ok(ExactFraction::new(numerator, total))
}

/// `Σ_{i ≤ k} C(n, i)`
fn binomial_cumulative(k: u64, n: u64) -> BigUint {
    let mut coefficient = BigUint::one();
    let mut sum = BigUint::zero();
    for i in 0..=k {
        if i > 0 {
            coefficient = coefficient * (n - i + 1) / i;
        }
        sum += &coefficient;
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranks(n: usize) -> Vec<f64> {
        (1..=n).map(|r| r as f64).collect()
    }

    #[test]
    fn test_rank_sum_total_is_binomial_coefficient() {
        let dist = rank_sum_distribution(&ranks(6), 3).unwrap();
        assert_eq!(dist.total(), 20);
        // Smallest doubled sum 2·(1+2+3) = 12, largest 2·(4+5+6) = 30
        assert_eq!(dist.count(12), 1);
        assert_eq!(dist.count(30), 1);
        assert_eq!(dist.lower_tail(11), 0);
    }

    #[test]
    fn test_rank_sum_separated_groups() {
        let dist = rank_sum_distribution(&ranks(6), 3).unwrap();
        let lower = dist.tail(12, Alternative::Less);
        assert_eq!(lower.numerator, BigUint::from(1u32));
        assert_eq!(lower.denominator, BigUint::from(20u32));
        let two_sided = dist.tail(12, Alternative::TwoSided);
        assert_eq!(two_sided.value(), 0.1);
    }

    #[test]
    fn test_rank_sum_reflection_matches_direct() {
        // n1 = 4 of 6 is enumerated through the size-2 complement
        let dist = rank_sum_distribution(&ranks(6), 4).unwrap();
        assert_eq!(dist.total(), 15);
        // Smallest doubled sum 2·(1+2+3+4) = 20
        assert_eq!(dist.count(20), 1);
        assert_eq!(dist.lower_tail(19), 0);
        assert_eq!(dist.count(2 * (3 + 4 + 5 + 6)), 1);
    }

    #[test]
    fn test_rank_sum_with_ties() {
        // Pool [1, 2, 2, 3] has ranks [1, 2.5, 2.5, 4]
        let dist = rank_sum_distribution(&[1.0, 2.5, 2.5, 4.0], 2).unwrap();
        assert_eq!(dist.total(), 6);
        // {1,2.5} twice -> 7, {1,4} -> 10, {2.5,2.5} -> 10, {2.5,4} twice -> 13
        assert_eq!(dist.count(7), 2);
        assert_eq!(dist.count(10), 2);
        assert_eq!(dist.count(13), 2);
    }

    #[test]
    fn test_rank_sum_rejects_bad_sizes() {
        assert!(rank_sum_distribution(&ranks(4), 0).is_err());
        assert!(rank_sum_distribution(&ranks(4), 4).is_err());
        assert!(rank_sum_distribution(&[1.3, 2.0], 1).is_err());
    }

    #[test]
    fn test_signed_rank_distribution() {
        let dist = signed_rank_distribution(&ranks(5)).unwrap();
        assert_eq!(dist.total(), 32);
        assert_eq!(dist.max_statistic(), 30);
        // All positive: W+ = 15, one outcome
        let p = dist.tail(30, Alternative::Greater);
        assert_eq!(p.numerator, BigUint::from(1u32));
        let p = dist.tail(30, Alternative::TwoSided);
        assert_eq!(p.value(), 0.0625);
    }

    #[test]
    fn test_signed_rank_symmetry() {
        let dist = signed_rank_distribution(&ranks(8)).unwrap();
        let max = dist.max_statistic();
        for s in 0..=max {
            assert_eq!(dist.count(s), dist.count(max - s));
        }
    }

    #[test]
    fn test_binomial_tail() {
        let p = binomial_half_tail(0, 4, Alternative::TwoSided).unwrap();
        assert_eq!(p.numerator, BigUint::from(2u32));
        assert_eq!(p.denominator, BigUint::from(16u32));
        assert_eq!(p.value(), 0.125);

        let p = binomial_half_tail(4, 4, Alternative::Greater).unwrap();
        assert_eq!(p.value(), 0.0625);
        let p = binomial_half_tail(4, 4, Alternative::Less).unwrap();
        assert_eq!(p.value(), 1.0);
        let p = binomial_half_tail(2, 4, Alternative::TwoSided).unwrap();
        assert_eq!(p.value(), 1.0);
        assert!(binomial_half_tail(5, 4, Alternative::Less).is_err());
    }
}
