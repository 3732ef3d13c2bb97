//! Dunn's post-hoc test after a significant Kruskal-Wallis result

use stick_core::validation::check_groups;
use stick_core::{Alternative, Error, Result};
use stick_correction::{correct, CorrectionMethod};
use stick_pvalue::asymptotic::normal_p_value;
use tracing::debug;

use crate::interpretation::format_p_value;
use crate::procedure::{PolicyChoice, TestContext, TestProcedure};
use crate::result::{PairwiseComparison, PostHocResult};

/// Dunn's test for all pairwise group comparisons
///
/// Groups are ranked once in the pooled sample. For groups `i < j`,
/// `z = |R̄ᵢ − R̄ⱼ| / SE` with
/// `SE² = (N(N + 1)/12 − Σ(t³ − t)/(12(N − 1))) · (1/nᵢ + 1/nⱼ)`,
/// and the two-sided p-values are adjusted as one family.
#[derive(Debug, Clone, Default)]
pub struct DunnTest {
    /// Multiple-comparison correction
    pub correction: CorrectionMethod,
    /// Group labels; `Group1`, `Group2`, ... when absent
    pub labels: Option<Vec<String>>,
}

impl DunnTest {
    pub fn new(correction: CorrectionMethod) -> Self {
        Self {
            correction,
            labels: None,
        }
    }

    /// Name the groups in input order
    pub fn with_labels<S: Into<String>>(mut self, labels: impl IntoIterator<Item = S>) -> Self {
        self.labels = Some(labels.into_iter().map(Into::into).collect());
        self
    }

    fn group_labels(&self, k: usize) -> Result<Vec<String>> {
        match &self.labels {
            Some(labels) if labels.len() != k => Err(Error::InvalidInput(format!(
                "{} group labels given for {k} groups",
                labels.len()
            ))),
            Some(labels) => Ok(labels.clone()),
            None => Ok((1..=k).map(|i| format!("Group{i}")).collect()),
        }
    }
}

impl TestProcedure<[&[f64]]> for DunnTest {
    type Output = PostHocResult;

    fn name(&self) -> &'static str {
        "Dunn's test"
    }

    fn policy_choice(&self) -> PolicyChoice {
        PolicyChoice::Normal
    }

    fn execute(&self, groups: &[&[f64]], context: &TestContext<'_>) -> Result<PostHocResult> {
        check_groups(groups, 2, "Dunn's test")?;
        let labels = self.group_labels(groups.len())?;
        let precision = context.precision();
        let alpha = context.alpha();

        let ranked = context.ranking.rank(groups)?;
        let n = ranked.total() as f64;
        let sizes = ranked.sizes();
        let mean_ranks = ranked.mean_ranks();
        let ties = ranked.tie_profile();
        let base_variance = n * (n + 1.0) / 12.0 - ties.sum_cubed_minus_t() / (12.0 * (n - 1.0));

        let mut pairs = Vec::new();
        for i in 0..groups.len() {
            for j in i + 1..groups.len() {
                let difference = mean_ranks[i] - mean_ranks[j];
                let se = (base_variance * (1.0 / sizes[i] as f64 + 1.0 / sizes[j] as f64))
                    .max(0.0)
                    .sqrt();
                let (z, p) = if se > 0.0 {
                    let z = difference.abs() / se;
                    (z, normal_p_value(z, Alternative::TwoSided)?)
                } else {
                    (0.0, 1.0)
                };
                pairs.push((i, j, difference, z, p));
            }
        }

        let raw: Vec<f64> = pairs.iter().map(|&(.., p)| p).collect();
        let adjusted = correct(&raw, self.correction)?;
        debug!(
            comparisons = pairs.len(),
            correction = self.correction.name(),
            "Dunn's pairwise comparisons"
        );

        let comparisons = pairs
            .iter()
            .zip(&adjusted)
            .map(|(&(i, j, difference, z, p), &adj)| {
                Ok(PairwiseComparison {
                    group_a: labels[i].clone(),
                    group_b: labels[j].clone(),
                    mean_rank_difference: precision.decimal(difference)?,
                    z_statistic: precision.decimal(z)?,
                    p_value: precision.decimal(p)?,
                    adjusted_p_value: precision.decimal(adj)?,
                    significant: adj < alpha,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let significant: Vec<String> = comparisons
            .iter()
            .filter(|c| c.significant)
            .map(PairwiseComparison::label)
            .collect();
        let overall_significance = !significant.is_empty();
        let interpretation = if overall_significance {
            format!(
                "{} of {} pairwise comparisons significant after {} correction (alpha = {alpha}): {}.",
                significant.len(),
                comparisons.len(),
                self.correction,
                significant.join(", ")
            )
        } else {
            let smallest = adjusted.iter().copied().fold(1.0, f64::min);
            format!(
                "No pairwise comparison significant after {} correction (smallest adjusted {}, alpha = {alpha}).",
                self.correction,
                format_p_value(smallest)
            )
        };

        Ok(PostHocResult {
            test_name: self.name(),
            comparisons,
            correction_method: self.correction,
            group_labels: labels,
            mean_ranks: mean_ranks
                .iter()
                .map(|&r| precision.decimal(r))
                .collect::<Result<_>>()?,
            sample_sizes: sizes,
            ties_present: ties.has_ties(),
            alpha: precision.decimal(alpha)?,
            overall_significance,
            interpretation,
        })
    }
}
