//! The common shape of a test procedure
//!
//! Each test is a small strategy object holding its options. The shared
//! collaborators (ranking engine, p-value policy, configuration) are handed
//! in through a [`TestContext`], so procedures carry no state of their own.

use stick_core::{Precision, RankMethod, RankingEngine};
use stick_pvalue::ExactVsAsymptoticPolicy;

use crate::config::NonParametricConfig;

/// How a procedure obtains its p-value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyChoice {
    /// Exact permutation distribution for small samples, normal otherwise
    ExactOrNormal,
    /// Exact binomial distribution
    ExactBinomial,
    /// Chi-squared approximation
    ChiSquared,
    /// Chi-squared or Iman-Davenport F depending on the design size
    ChiSquaredOrF,
    /// Normal approximation
    Normal,
}

/// Shared collaborators for one procedure call
#[derive(Debug, Clone, Copy)]
pub struct TestContext<'a> {
    /// Caller's configuration
    pub config: &'a NonParametricConfig,
    /// Ranking engine (average ranks for every test)
    pub ranking: RankingEngine,
    /// Exact-versus-asymptotic policy derived from the configuration
    pub policy: ExactVsAsymptoticPolicy,
}

impl<'a> TestContext<'a> {
    /// Build the context for `config`
    pub fn new(config: &'a NonParametricConfig) -> Self {
        Self {
            config,
            ranking: RankingEngine::new(RankMethod::Average),
            policy: config.policy(),
        }
    }

    /// Decimal precision of reported values
    pub fn precision(&self) -> &Precision {
        &self.config.precision
    }

    /// Significance threshold
    pub fn alpha(&self) -> f64 {
        self.config.alpha
    }
}

/// A hypothesis test over input of type `I`
pub trait TestProcedure<I: ?Sized> {
    /// What the procedure returns
    type Output;

    /// Name of the test
    fn name(&self) -> &'static str;

    /// How the p-value is obtained
    fn policy_choice(&self) -> PolicyChoice;

    /// Validate the input, compute the statistic and package the result
    fn execute(&self, input: &I, context: &TestContext<'_>) -> stick_core::Result<Self::Output>;
}

/// Two independent samples
#[derive(Debug, Clone, Copy)]
pub struct TwoSamples<'a> {
    /// First sample
    pub x: &'a [f64],
    /// Second sample
    pub y: &'a [f64],
}

/// Two samples paired observation by observation
#[derive(Debug, Clone, Copy)]
pub struct PairedSamples<'a> {
    /// First measurement of each pair
    pub x: &'a [f64],
    /// Second measurement of each pair
    pub y: &'a [f64],
}

/// Input of the Wilcoxon signed-rank test
#[derive(Debug, Clone, Copy)]
pub enum SignedRankInput<'a> {
    /// Differences `x − y` of paired samples
    Paired(PairedSamples<'a>),
    /// Differences `data − mu` against a hypothesised median
    OneSample { data: &'a [f64], mu: f64 },
}
