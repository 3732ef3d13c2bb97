//! Core types for non-parametric statistical analysis
//!
//! This crate provides the shared building blocks every rank-based
//! procedure in the workspace depends on:
//!
//! - [`error`]: the unified [`Error`] type and [`Result`] alias
//! - [`precision`]: explicit decimal [`Precision`] for reported values
//! - [`ranking`]: the tie-aware [`RankingEngine`]
//! - [`ties`]: [`TieProfile`] and the [`TieCorrection`] variance terms
//! - [`validation`]: precondition checks run before any computation
//!
//! Everything here is pure and free of global state, so all of it may be
//! used concurrently from any number of threads.
//!
//! # Example
//!
//! ```rust
//! use stick_core::{rank, tie_profile, RankMethod};
//!
//! let ranked = rank(&[&[1.0, 2.0, 2.0], &[3.0, 4.0]], RankMethod::Average).unwrap();
//! let n = ranked.total() as f64;
//! assert_eq!(ranked.rank_sums().iter().sum::<f64>(), n * (n + 1.0) / 2.0);
//!
//! assert!(tie_profile(&[1.0, 2.0, 2.0]).has_ties());
//! ```

pub mod alternative;
pub mod error;
pub mod precision;
pub mod ranking;
pub mod ties;
pub mod validation;

// Re-export core types
pub use alternative::Alternative;
pub use error::{Error, Result};
pub use precision::{Precision, DEFAULT_PRECISION, MAX_PRECISION};
pub use ranking::{rank, rank_data, RankMethod, RankedSamples, RankingEngine};
pub use ties::{sum_cubed_minus_t, tie_profile, TieCorrection, TieGroup, TieProfile};

// Re-exported so downstream crates name one decimal type
pub use bigdecimal::BigDecimal;
pub use num_bigint::BigUint;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
