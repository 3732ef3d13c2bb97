//! Null distributions for rank statistics
//!
//! This crate turns a test statistic into a p-value. It knows the exact
//! permutation distributions of the rank-sum and signed-rank statistics, the
//! exact fair-coin binomial used by the sign test, and the normal,
//! chi-squared and F approximations used for larger samples.
//!
//! The [`ExactVsAsymptoticPolicy`] decides which one applies:
//!
//! ```rust
//! use stick_core::{Alternative, TieProfile};
//! use stick_pvalue::{ExactVsAsymptoticPolicy, NullDistribution, PValueSource};
//!
//! // x = [1, 2, 3] against y = [4, 5, 6]: U1 = 0
//! let pooled = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
//! let ties = TieProfile::default();
//! let p = ExactVsAsymptoticPolicy::default()
//!     .p_value(
//!         0.0,
//!         &NullDistribution::RankSum { ranks: &pooled, n1: 3, ties: &ties },
//!         Alternative::TwoSided,
//!     )
//!     .unwrap();
//!
//! assert_eq!(p.source, PValueSource::Exact);
//! assert_eq!(p.value, 0.1); // 2 of the 20 equally likely splits
//! ```
//!
//! Exact p-values keep their rational form ([`ExactFraction`]) so that they
//! can be reported to any decimal precision without float rounding.

pub mod asymptotic;
pub mod exact;
mod policy;
mod types;

pub use exact::{
    binomial_half_tail, rank_sum_distribution, signed_rank_distribution, CountDistribution,
};
pub use policy::{
    ExactVsAsymptoticPolicy, NullDistribution, BINOMIAL_RATIONAL_LIMIT, EXACT_ENUMERATION_LIMIT,
    FRIEDMAN_F_BLOCKS, FRIEDMAN_F_TREATMENTS, RANK_SUM_EXACT_THRESHOLD,
    SIGNED_RANK_EXACT_THRESHOLD,
};
pub use types::{ExactFraction, PValue, PValueMethod, PValueSource};
