//! Exact-versus-asymptotic p-value selection
//!
//! The thresholds below decide when a statistic is referred to its exact
//! null distribution and when to its large-sample approximation:
//!
//! | Statistic | Exact when | Otherwise |
//! |---|---|---|
//! | Rank sum (Mann-Whitney) | both `n1, n2 < 20` | normal, ±0.5 continuity |
//! | Signed rank (Wilcoxon) | reduced `n < 25` | normal, ±0.5 continuity |
//! | Sign test | always (binomial, p = ½) | — |
//! | Kruskal-Wallis, Mood's median | never | chi-squared |
//! | Friedman | never | Iman-Davenport F when `n < 10` or `k < 5`, else chi-squared |

use serde::{Deserialize, Serialize};
use statrs::distribution::{Binomial, DiscreteCDF};
use stick_core::{Alternative, Error, Result, TieProfile};
use tracing::debug;

use crate::asymptotic::{chi_squared_p_value, f_p_value, normal_p_value, standardize};
use crate::exact::{binomial_half_tail, rank_sum_distribution, signed_rank_distribution};
use crate::types::{PValue, PValueMethod, PValueSource};

/// Both rank-sum samples must be smaller than this for the exact test
pub const RANK_SUM_EXACT_THRESHOLD: usize = 20;

/// The reduced signed-rank sample must be smaller than this for the exact test
pub const SIGNED_RANK_EXACT_THRESHOLD: usize = 25;

/// Largest pool a forced exact enumeration will accept
pub const EXACT_ENUMERATION_LIMIT: usize = 100;

/// Sign tests up to this many trials carry an exact rational p-value
pub const BINOMIAL_RATIONAL_LIMIT: u64 = 1000;

/// Friedman uses the Iman-Davenport F below this many blocks...
pub const FRIEDMAN_F_BLOCKS: usize = 10;

/// ...or below this many treatments
pub const FRIEDMAN_F_TREATMENTS: usize = 5;

/// Null distribution of a statistic, with the parameters it depends on
#[derive(Debug, Clone, Copy)]
pub enum NullDistribution<'a> {
    /// Statistic is `U1` of the first sample; `ranks` are the pooled average
    /// ranks of both samples
    RankSum {
        ranks: &'a [f64],
        n1: usize,
        ties: &'a TieProfile,
    },
    /// Statistic is `W+`; `ranks` are the ranks of the non-zero differences
    SignedRank {
        ranks: &'a [f64],
        mean: f64,
        variance: f64,
    },
    /// Statistic is the number of successes in `trials` fair coin flips
    Binomial { trials: u64 },
    /// Statistic is approximately normal with these moments
    Normal {
        mean: f64,
        variance: f64,
        continuity: bool,
    },
    /// Statistic is approximately chi-squared (upper tail)
    ChiSquared { df: f64 },
    /// Statistic is the Friedman chi-squared for `blocks` × `treatments`
    Friedman { blocks: usize, treatments: usize },
}

/// Chooses and evaluates the null distribution for a statistic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExactVsAsymptoticPolicy {
    /// Caller's method preference
    pub method: PValueMethod,
    /// Apply ±0.5 continuity correction to normal approximations of
    /// discrete statistics
    pub continuity_correction: bool,
}

impl Default for ExactVsAsymptoticPolicy {
    fn default() -> Self {
        Self {
            method: PValueMethod::Auto,
            continuity_correction: true,
        }
    }
}

impl ExactVsAsymptoticPolicy {
    /// Create a policy
    pub fn new(method: PValueMethod, continuity_correction: bool) -> Self {
        Self {
            method,
            continuity_correction,
        }
    }

    /// Whether a rank-sum test of these sizes is referred to the exact
    /// distribution
    pub fn rank_sum_is_exact(&self, n1: usize, n2: usize) -> bool {
        match self.method {
            PValueMethod::Auto => n1 < RANK_SUM_EXACT_THRESHOLD && n2 < RANK_SUM_EXACT_THRESHOLD,
            PValueMethod::Exact => true,
            PValueMethod::Asymptotic => false,
        }
    }

    /// Whether a signed-rank test with `n` non-zero differences is exact
    pub fn signed_rank_is_exact(&self, n: usize) -> bool {
        match self.method {
            PValueMethod::Auto => n < SIGNED_RANK_EXACT_THRESHOLD,
            PValueMethod::Exact => true,
            PValueMethod::Asymptotic => false,
        }
    }

    /// Whether a Friedman statistic is referred to the Iman-Davenport F
    pub fn friedman_uses_f(blocks: usize, treatments: usize) -> bool {
        blocks < FRIEDMAN_F_BLOCKS || treatments < FRIEDMAN_F_TREATMENTS
    }

    /// P-value of `statistic` under `distribution`
    pub fn p_value(
        &self,
        statistic: f64,
        distribution: &NullDistribution<'_>,
        alternative: Alternative,
    ) -> Result<PValue> {
        if !statistic.is_finite() {
            return Err(Error::Computation(format!(
                "test statistic is not finite: {statistic}"
            )));
        }
        match *distribution {
            NullDistribution::RankSum { ranks, n1, ties } => {
                self.rank_sum(statistic, ranks, n1, ties, alternative)
            }
            NullDistribution::SignedRank {
                ranks,
                mean,
                variance,
            } => self.signed_rank(statistic, ranks, mean, variance, alternative),
            NullDistribution::Binomial { trials } => self.binomial(statistic, trials, alternative),
            NullDistribution::Normal {
                mean,
                variance,
                continuity,
            } => normal(statistic, mean, variance, alternative, continuity),
            NullDistribution::ChiSquared { df } => {
                if self.method == PValueMethod::Exact {
                    debug!("no exact distribution for chi-squared statistic, using approximation");
                }
                let p = chi_squared_p_value(statistic, df)?;
                Ok(PValue::approximate(p, PValueSource::ChiSquared).with_df(df))
            }
            NullDistribution::Friedman { blocks, treatments } => {
                friedman(statistic, blocks, treatments)
            }
        }
    }

    fn rank_sum(
        &self,
        u1: f64,
        ranks: &[f64],
        n1: usize,
        ties: &TieProfile,
        alternative: Alternative,
    ) -> Result<PValue> {
        let n = ranks.len();
        if n1 == 0 || n1 >= n {
            return Err(Error::InvalidParameter(format!(
                "first sample size {n1} must lie strictly between 0 and the pool size {n}"
            )));
        }
        let n2 = n - n1;
        let (n1f, n2f, nf) = (n1 as f64, n2 as f64, n as f64);
        let mean = n1f * n2f / 2.0;
        let variance = n1f * n2f / 12.0 * (nf + 1.0) - n1f * n2f * ties.rank_sum_correction(n);
        let z = if variance > 0.0 {
            Some(standardize(
                u1,
                mean,
                variance.sqrt(),
                alternative,
                self.continuity_correction,
            ))
        } else {
            None
        };

        if self.rank_sum_is_exact(n1, n2) {
            if n > EXACT_ENUMERATION_LIMIT {
                return Err(Error::InvalidParameter(format!(
                    "exact rank-sum distribution requested for {n} observations, limit is {EXACT_ENUMERATION_LIMIT}"
                )));
            }
            debug!(n1, n2, ties = ties.has_ties(), "rank sum: exact permutation distribution");
            let dist = rank_sum_distribution(ranks, n1)?;
            // Doubled rank sum of the first sample
            let observed = (2.0 * u1 + n1f * (n1f + 1.0)).round() as usize;
            let mut p = PValue::exact(dist.tail(observed, alternative));
            p.z_score = z;
            return Ok(p);
        }

        match z {
            Some(z) => {
                debug!(n1, n2, z, "rank sum: normal approximation");
                Ok(PValue::approximate(normal_p_value(z, alternative)?, PValueSource::Normal)
                    .with_z_score(z))
            }
            None => {
                debug!(n1, n2, "rank sum: zero null variance, all observations tied");
                Ok(PValue::degenerate())
            }
        }
    }

    fn signed_rank(
        &self,
        w_plus: f64,
        ranks: &[f64],
        mean: f64,
        variance: f64,
        alternative: Alternative,
    ) -> Result<PValue> {
        let n = ranks.len();
        if n == 0 {
            debug!("signed rank: no non-zero differences");
            return Ok(PValue::degenerate());
        }
        let z = if variance > 0.0 {
            Some(standardize(
                w_plus,
                mean,
                variance.sqrt(),
                alternative,
                self.continuity_correction,
            ))
        } else {
            None
        };

        if self.signed_rank_is_exact(n) {
            if n > EXACT_ENUMERATION_LIMIT {
                return Err(Error::InvalidParameter(format!(
                    "exact signed-rank distribution requested for {n} differences, limit is {EXACT_ENUMERATION_LIMIT}"
                )));
            }
            debug!(n, "signed rank: exact enumeration");
            let dist = signed_rank_distribution(ranks)?;
            let observed = (2.0 * w_plus).round() as usize;
            let mut p = PValue::exact(dist.tail(observed, alternative));
            p.z_score = z;
            return Ok(p);
        }

        match z {
            Some(z) => {
                debug!(n, z, "signed rank: normal approximation");
                Ok(PValue::approximate(normal_p_value(z, alternative)?, PValueSource::Normal)
                    .with_z_score(z))
            }
            None => Ok(PValue::degenerate()),
        }
    }

    fn binomial(&self, successes: f64, trials: u64, alternative: Alternative) -> Result<PValue> {
        if trials == 0 {
            return Ok(PValue::degenerate());
        }
        if successes < 0.0 || successes.fract() != 0.0 || successes > trials as f64 {
            return Err(Error::InvalidParameter(format!(
                "successes must be an integer in [0, {trials}], got {successes}"
            )));
        }
        let k = successes as u64;
        let nf = trials as f64;

        if self.method == PValueMethod::Asymptotic {
            debug!(trials, "binomial: normal approximation");
            return normal(successes, nf / 2.0, nf / 4.0, alternative, self.continuity_correction);
        }

        if trials <= BINOMIAL_RATIONAL_LIMIT {
            debug!(trials, "binomial: exact rational tail");
            return Ok(PValue::exact(binomial_half_tail(k, trials, alternative)?));
        }

        debug!(trials, "binomial: exact tail in float arithmetic");
        let binomial = Binomial::new(0.5, trials).map_err(|e| {
            Error::Computation(format!("Failed to create binomial distribution: {}", e))
        })?;
        let lower = binomial.cdf(k);
        let upper = binomial.cdf(trials - k);
        let p = match alternative {
            Alternative::Less => lower,
            Alternative::Greater => upper,
            Alternative::TwoSided => 2.0 * lower.min(upper),
        };
        Ok(PValue::approximate(p, PValueSource::Exact))
    }
}

fn normal(
    statistic: f64,
    mean: f64,
    variance: f64,
    alternative: Alternative,
    continuity: bool,
) -> Result<PValue> {
    if !(variance > 0.0) {
        debug!("normal approximation with zero variance");
        return Ok(PValue::degenerate());
    }
    let z = standardize(statistic, mean, variance.sqrt(), alternative, continuity);
    Ok(PValue::approximate(normal_p_value(z, alternative)?, PValueSource::Normal).with_z_score(z))
}

fn friedman(chi_squared: f64, blocks: usize, treatments: usize) -> Result<PValue> {
    if treatments < 2 || blocks < 1 {
        return Err(Error::InvalidParameter(format!(
            "Friedman statistic needs at least 2 treatments and 1 block, got {treatments} and {blocks}"
        )));
    }
    let n = blocks as f64;
    let k = treatments as f64;
    let df1 = k - 1.0;

    if ExactVsAsymptoticPolicy::friedman_uses_f(blocks, treatments) {
        let df2 = (k - 1.0) * (n - 1.0);
        let denominator = n * (k - 1.0) - chi_squared;
        // Perfect concordance or a single block leaves F undefined
        if denominator.abs() <= 1e-12 * n * k || df2 <= 0.0 {
            debug!(blocks, treatments, "Iman-Davenport transform undefined, using chi-squared");
        } else {
            let f = (n - 1.0) * chi_squared / denominator;
            debug!(blocks, treatments, f, "Friedman: Iman-Davenport F");
            let mut p = PValue::approximate(f_p_value(f, df1, df2)?, PValueSource::F).with_df(df1);
            p.f_statistic = Some(f);
            p.df_denominator = Some(df2);
            return Ok(p);
        }
    }

    debug!(blocks, treatments, "Friedman: chi-squared");
    Ok(PValue::approximate(chi_squared_p_value(chi_squared, df1)?, PValueSource::ChiSquared)
        .with_df(df1))
}
