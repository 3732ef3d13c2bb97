//! Multiple comparison correction
//!
//! Post-hoc procedures test many hypotheses at once. [`correct`] adjusts the
//! family of raw p-values so that the family-wise error rate (Bonferroni,
//! Holm, Šidák, Holm-Šidák, Hochberg) or the false discovery rate
//! (Benjamini-Hochberg, Benjamini-Yekutieli) is controlled.
//!
//! ```rust
//! use stick_correction::{correct, CorrectionMethod};
//!
//! let raw = [0.01, 0.02, 0.4];
//! let adjusted = correct(&raw, CorrectionMethod::Bonferroni).unwrap();
//! assert_eq!(adjusted[2], 1.0);
//! ```

mod adjust;
mod method;

pub use adjust::correct;
pub use method::CorrectionMethod;
