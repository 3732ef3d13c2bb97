//! Cramér's V for contingency tables

use crate::traits::{EffectSizeEstimator, FromStatistic};
use crate::types::{EffectSize, EffectSizeType};
use stick_core::{Error, Result};

/// Pearson chi-squared of an `rows × columns` table with `total` counts
#[derive(Debug, Clone, PartialEq)]
pub struct ContingencyStatistic {
    /// Pearson chi-squared
    pub chi_squared: f64,
    /// Grand total of the table
    pub total: usize,
    /// Number of rows
    pub rows: usize,
    /// Number of columns
    pub columns: usize,
    /// Sizes reported with the effect (the group sizes)
    pub sizes: Vec<usize>,
}

/// Cramér's V estimator
///
/// `V = sqrt(χ² / (N · min(r − 1, c − 1)))`. For the 2 × k table of Mood's
/// median test this is `sqrt(χ² / N)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CramersV;

impl EffectSizeEstimator for CramersV {
    fn effect_size_type(&self) -> EffectSizeType {
        EffectSizeType::Association
    }

    fn name(&self) -> &'static str {
        "cramers_v"
    }
}

impl FromStatistic for CramersV {
    type Statistic = ContingencyStatistic;

    fn from_statistic(&self, statistic: &ContingencyStatistic) -> Result<EffectSize> {
        let dof = statistic.rows.min(statistic.columns).saturating_sub(1);
        if dof == 0 || statistic.total == 0 {
            return Err(Error::InvalidParameter(format!(
                "Cramér's V needs a non-empty table of at least 2 × 2, got {} × {} with {} counts",
                statistic.rows, statistic.columns, statistic.total
            )));
        }
        let v = (statistic.chi_squared.max(0.0) / (statistic.total as f64 * dof as f64)).sqrt();
        Ok(EffectSize::new(
            self.name(),
            v,
            self.effect_size_type(),
            statistic.sizes.clone(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_two_by_k() {
        let stat = ContingencyStatistic {
            chi_squared: 4.0,
            total: 16,
            rows: 2,
            columns: 3,
            sizes: vec![5, 5, 6],
        };
        let v = CramersV.from_statistic(&stat).unwrap();
        assert_abs_diff_eq!(v.magnitude, 0.5, epsilon = 1e-12);
        assert_eq!(v.sample_sizes, vec![5, 5, 6]);
    }

    #[test]
    fn test_degenerate_table() {
        let stat = ContingencyStatistic {
            chi_squared: 0.0,
            total: 10,
            rows: 1,
            columns: 3,
            sizes: vec![],
        };
        assert!(CramersV.from_statistic(&stat).is_err());
    }
}
