//! High-precision non-parametric hypothesis tests
//!
//! Every test follows the same pipeline: validate the input, rank it with
//! tie awareness, compute the statistic and its tie correction, obtain a
//! p-value from the exact-versus-asymptotic policy, derive an effect size
//! and package a [`TestResult`] whose numbers are decimals at the
//! configured precision.
//!
//! # Tests
//!
//! | Test | Input | Statistic | Effect size |
//! |---|---|---|---|
//! | [`MannWhitneyU`] | two samples | `min(U1, U2)` | rank-biserial r |
//! | [`WilcoxonSignedRank`] | paired or one sample | `min(W+, W−)` | matched-pairs r |
//! | [`KruskalWallis`] | k groups | tie-corrected H | epsilon-squared |
//! | [`Friedman`] | blocks × treatments | tie-corrected χ² | Kendall's W |
//! | [`SignTest`] | paired samples | `min(n+, n−)` | sign proportion |
//! | [`MoodMedian`] | k groups | Pearson χ² | Cramér's V |
//! | [`JonckheereTerpstra`] | ordered groups | J | normalized J |
//! | [`PageTrend`] | blocks × ordered treatments | L | normalized L |
//! | [`DunnTest`] | k groups | pairwise z | none |
//!
//! # Example
//!
//! ```rust
//! use stick_core::Alternative;
//! use stick_nonparametric::{HighPrecisionNonParametric, NonParametricConfig};
//!
//! let engine = HighPrecisionNonParametric::new(NonParametricConfig::default().with_alpha(0.01))?;
//! let result = engine.sign_test(&[5.0, 6.0, 7.0, 8.0], &[1.0, 2.0, 3.0, 4.0], Alternative::TwoSided)?;
//! assert_eq!(result.p_value_f64(), 0.125);
//! assert!(!result.significant);
//!
//! let json = result.to_json()?;
//! assert_eq!(json["p_value"], "0.125");
//! # Ok::<(), stick_core::Error>(())
//! ```

mod config;
mod facade;
mod interpretation;
mod procedure;
mod procedures;
mod result;

pub use config::{MedianTies, NonParametricConfig, ZeroMethod};
pub use facade::HighPrecisionNonParametric;
pub use interpretation::format_p_value;
pub use procedure::{
    PairedSamples, PolicyChoice, SignedRankInput, TestContext, TestProcedure, TwoSamples,
};
pub use procedures::{
    DunnTest, Friedman, JonckheereTerpstra, KruskalWallis, MannWhitneyU, MoodMedian, PageTrend,
    SignTest, WilcoxonSignedRank,
};
pub use result::{PairwiseComparison, PostHocResult, ReportedEffect, ResultValue, TestResult};
