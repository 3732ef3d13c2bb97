//! Tie-aware ranking of one or more pooled samples
//!
//! Samples are concatenated with their provenance, stable-sorted, and walked
//! once. Each maximal run of equal values occupying sorted positions
//! `[i, j]` receives a rank according to the [`RankMethod`]; ranks are then
//! split back into one vector per input sample.
//!
//! Under [`RankMethod::Average`] the ranks of a pool of `n` observations
//! always sum to `n (n + 1) / 2`, whatever the tie pattern.
//!
//! # Examples
//!
//! ```rust
//! use stick_core::{RankingEngine, RankMethod};
//!
//! let x = [1.0, 2.0, 2.0];
//! let y = [2.0, 5.0];
//! let ranked = RankingEngine::new(RankMethod::Average).rank(&[&x, &y]).unwrap();
//!
//! assert_eq!(ranked.sample_ranks(0), &[1.0, 3.0, 3.0]);
//! assert_eq!(ranked.sample_ranks(1), &[3.0, 5.0]);
//! assert_eq!(ranked.rank_sums(), vec![7.0, 8.0]);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ties::{TieGroup, TieProfile};
use crate::validation::check_sample;
use crate::{Error, Result};

/// How tied observations are ranked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankMethod {
    /// Mean of the spanned ranks, `(i + j + 2) / 2`
    #[default]
    Average,
    /// Lowest spanned rank, `i + 1`
    Min,
    /// Highest spanned rank, `j + 1`
    Max,
    /// Consecutive integers per distinct value
    Dense,
    /// Distinct ranks in order of appearance
    Ordinal,
}

impl RankMethod {
    /// Canonical name as accepted by [`FromStr`]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Average => "average",
            Self::Min => "min",
            Self::Max => "max",
            Self::Dense => "dense",
            Self::Ordinal => "ordinal",
        }
    }
}

impl FromStr for RankMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "average" | "mean" => Ok(Self::Average),
            "min" => Ok(Self::Min),
            "max" => Ok(Self::Max),
            "dense" => Ok(Self::Dense),
            "ordinal" | "first" => Ok(Self::Ordinal),
            _ => Err(Error::unsupported("rank method", s)),
        }
    }
}

impl fmt::Display for RankMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ranks of pooled samples, split back per sample
#[derive(Debug, Clone, PartialEq)]
pub struct RankedSamples {
    ranks: Vec<Vec<f64>>,
    tie_groups: Vec<TieGroup>,
    method: RankMethod,
}

impl RankedSamples {
    /// Rank vectors, one per input sample, in input order
    pub fn ranks(&self) -> &[Vec<f64>] {
        &self.ranks
    }

    /// Ranks of sample `index`
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn sample_ranks(&self, index: usize) -> &[f64] {
        &self.ranks[index]
    }

    /// All ranks in input order (samples concatenated)
    pub fn pooled(&self) -> Vec<f64> {
        self.ranks.iter().flatten().copied().collect()
    }

    /// Number of samples
    pub fn num_samples(&self) -> usize {
        self.ranks.len()
    }

    /// Size of each sample
    pub fn sizes(&self) -> Vec<usize> {
        self.ranks.iter().map(Vec::len).collect()
    }

    /// Total number of pooled observations
    pub fn total(&self) -> usize {
        self.ranks.iter().map(Vec::len).sum()
    }

    /// Sum of ranks per sample
    pub fn rank_sums(&self) -> Vec<f64> {
        self.ranks.iter().map(|r| r.iter().sum()).collect()
    }

    /// Mean rank per sample
    pub fn mean_ranks(&self) -> Vec<f64> {
        self.ranks
            .iter()
            .map(|r| r.iter().sum::<f64>() / r.len() as f64)
            .collect()
    }

    /// Tie groups found in the pool
    pub fn tie_groups(&self) -> &[TieGroup] {
        &self.tie_groups
    }

    /// Whether any pooled value repeats
    pub fn has_ties(&self) -> bool {
        !self.tie_groups.is_empty()
    }

    /// Tie profile of the pool
    pub fn tie_profile(&self) -> TieProfile {
        TieProfile::from_groups(&self.tie_groups)
    }

    /// Method used to resolve ties
    pub fn method(&self) -> RankMethod {
        self.method
    }
}

/// Pools samples and assigns tie-aware ranks
#[derive(Debug, Clone, Copy, Default)]
pub struct RankingEngine {
    method: RankMethod,
}

impl RankingEngine {
    /// Create an engine using `method` for ties
    pub fn new(method: RankMethod) -> Self {
        Self { method }
    }

    /// Tie method of this engine
    pub fn method(&self) -> RankMethod {
        self.method
    }

    /// Rank the pooled observations of `samples`
    ///
    /// Every sample must be non-empty and finite.
    pub fn rank(&self, samples: &[&[f64]]) -> Result<RankedSamples> {
        if samples.is_empty() {
            return Err(Error::InsufficientData {
                expected: 1,
                actual: 0,
            });
        }
        for (i, sample) in samples.iter().enumerate() {
            check_sample(sample, &format!("sample {}", i + 1))?;
        }

        // (value, sample, position within sample)
        let mut pooled: Vec<(f64, usize, usize)> = samples
            .iter()
            .enumerate()
            .flat_map(|(s, sample)| sample.iter().enumerate().map(move |(p, &v)| (v, s, p)))
            .collect();
        pooled.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut ranks: Vec<Vec<f64>> = samples.iter().map(|s| vec![0.0; s.len()]).collect();
        let mut tie_groups = Vec::new();
        let n = pooled.len();
        let mut dense = 0.0;
        let mut i = 0;

        while i < n {
            let mut j = i;
            while j + 1 < n && pooled[j + 1].0 == pooled[i].0 {
                j += 1;
            }
            dense += 1.0;

            for (offset, &(_, s, p)) in pooled[i..=j].iter().enumerate() {
                ranks[s][p] = match self.method {
                    RankMethod::Average => (i + j + 2) as f64 / 2.0,
                    RankMethod::Min => (i + 1) as f64,
                    RankMethod::Max => (j + 1) as f64,
                    RankMethod::Dense => dense,
                    RankMethod::Ordinal => (i + offset + 1) as f64,
                };
            }

            if j > i {
                let (_, s, p) = pooled[i];
                tie_groups.push(TieGroup {
                    value: pooled[i].0,
                    count: j - i + 1,
                    rank: ranks[s][p],
                });
            }
            i = j + 1;
        }

        Ok(RankedSamples {
            ranks,
            tie_groups,
            method: self.method,
        })
    }
}

/// Rank pooled samples with `method`
pub fn rank(samples: &[&[f64]], method: RankMethod) -> Result<RankedSamples> {
    RankingEngine::new(method).rank(samples)
}

/// Rank a single sample with `method`
pub fn rank_data(values: &[f64], method: RankMethod) -> Result<Vec<f64>> {
    let ranked = RankingEngine::new(method).rank(&[values])?;
    Ok(ranked.ranks.into_iter().next().unwrap_or_default())
}
