//! StickForStats: high-precision non-parametric hypothesis testing
//!
//! This crate re-exports the workspace members:
//!
//! - [`core`]: errors, precision, alternatives, ranking and ties
//! - [`pvalue`]: exact and asymptotic null distributions
//! - [`effect`]: effect sizes
//! - [`correction`]: multiple-comparison adjustment
//! - [`nonparametric`]: the tests, their result records and the engine
//!
//! # Example
//!
//! ```rust
//! use stickforstats::prelude::*;
//!
//! let engine = HighPrecisionNonParametric::default();
//! let groups: [&[f64]; 3] = [&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0], &[7.0, 8.0, 9.0]];
//! let result = engine.kruskal_wallis(&groups)?;
//! assert!(result.significant);
//! # Ok::<(), stickforstats::core::Error>(())
//! ```

pub use stick_core as core;
pub use stick_correction as correction;
pub use stick_effect as effect;
pub use stick_nonparametric as nonparametric;
pub use stick_pvalue as pvalue;

/// Commonly used items
pub mod prelude {
    pub use stick_core::{Alternative, Error, Precision, RankMethod, Result};
    pub use stick_correction::{correct, CorrectionMethod};
    pub use stick_effect::{EffectSize, EffectSizeInterpretation, EffectSizeType};
    pub use stick_nonparametric::{
        HighPrecisionNonParametric, MedianTies, NonParametricConfig, PostHocResult, TestProcedure,
        TestResult, ZeroMethod,
    };
    pub use stick_pvalue::{PValueMethod, PValueSource};
}
