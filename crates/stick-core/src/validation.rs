//! Input validation shared by every procedure
//!
//! All checks run before any computation and fail with a message naming the
//! violated precondition.

use crate::{Error, Result};

/// Reject empty samples and NaN / infinite values
pub fn check_sample(sample: &[f64], context: &str) -> Result<()> {
    if sample.is_empty() {
        return Err(Error::empty_sample(context));
    }
    if sample.iter().any(|v| !v.is_finite()) {
        return Err(Error::non_finite(context));
    }
    Ok(())
}

/// Validate a pair of samples that must line up observation by observation
pub fn check_paired(first: &[f64], second: &[f64]) -> Result<()> {
    if first.len() != second.len() {
        return Err(Error::LengthMismatch {
            first: first.len(),
            second: second.len(),
        });
    }
    check_sample(first, "first sample")?;
    check_sample(second, "second sample")
}

/// Validate independent groups: at least `min_groups`, each non-empty and finite
pub fn check_groups(groups: &[&[f64]], min_groups: usize, test: &'static str) -> Result<()> {
    if groups.len() < min_groups {
        return Err(Error::too_few_groups(test, min_groups, groups.len()));
    }
    for (i, group) in groups.iter().enumerate() {
        check_sample(group, &format!("group {}", i + 1))?;
    }
    Ok(())
}

/// Validate a blocked design (rows = blocks/subjects, columns = treatments)
///
/// Returns `(blocks, treatments)`.
pub fn check_blocks(
    blocks: &[Vec<f64>],
    min_treatments: usize,
    min_blocks: usize,
    test: &'static str,
) -> Result<(usize, usize)> {
    if blocks.len() < min_blocks {
        return Err(Error::InsufficientData {
            expected: min_blocks,
            actual: blocks.len(),
        });
    }
    let k = blocks.first().map_or(0, Vec::len);
    if k < min_treatments {
        return Err(Error::too_few_groups(test, min_treatments, k));
    }
    for (i, row) in blocks.iter().enumerate() {
        if row.len() != k {
            return Err(Error::InvalidInput(format!(
                "block {} has {} treatments, expected {k}",
                i + 1,
                row.len()
            )));
        }
        check_sample(row, &format!("block {}", i + 1))?;
    }
    Ok((blocks.len(), k))
}
