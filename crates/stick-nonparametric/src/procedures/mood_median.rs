//! Mood's median test for k independent groups

use stick_core::validation::check_groups;
use stick_core::{Alternative, Result};
use stick_effect::{ContingencyStatistic, CramersV, FromStatistic};
use stick_pvalue::{NullDistribution, PValue};

use crate::config::MedianTies;
use crate::procedure::{PolicyChoice, TestContext, TestProcedure};
use crate::result::{Findings, RawExtra, ResultBuilder, TestResult};

const FINDINGS: Findings = Findings {
    significant: "the group medians are not all equal",
    not_significant: "no evidence that the group medians differ",
};

/// Expected cell counts below this make the chi-squared approximation doubtful
const MIN_EXPECTED: f64 = 5.0;

/// Mood's median test
///
/// Each group is split at the grand median into a 2 × k table of counts
/// above and below, which is tested with Pearson's chi-squared. With two
/// groups and continuity correction enabled, Yates' correction is applied.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoodMedian {
    /// Where observations equal to the grand median are counted
    pub ties: MedianTies,
}

impl MoodMedian {
    /// Test with the given tie handling
    pub fn new(ties: MedianTies) -> Self {
        Self { ties }
    }
}

/// Median of `values`, averaging the middle pair for even lengths
pub(crate) fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len();
    if n == 0 {
        return f64::NAN;
    }
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

/// Pearson chi-squared of a 2 × k table, with optional Yates' correction
///
/// Columns with no observations are dropped. Returns the statistic, the
/// number of columns kept and the smallest expected count.
fn chi_squared_2xk(above: &[usize], below: &[usize], yates: bool) -> (f64, usize, f64) {
    let columns: Vec<(f64, f64)> = above
        .iter()
        .zip(below)
        .filter(|&(&a, &b)| a + b > 0)
        .map(|(&a, &b)| (a as f64, b as f64))
        .collect();
    let total_above: f64 = columns.iter().map(|c| c.0).sum();
    let total_below: f64 = columns.iter().map(|c| c.1).sum();
    let total = total_above + total_below;

    let mut chi_squared = 0.0;
    let mut min_expected = f64::INFINITY;
    for &(a, b) in &columns {
        let column = a + b;
        for (observed, row) in [(a, total_above), (b, total_below)] {
            let expected = row * column / total;
            min_expected = min_expected.min(expected);
            if expected > 0.0 {
                let mut deviation = (observed - expected).abs();
                if yates {
                    deviation -= deviation.min(0.5);
                }
                chi_squared += deviation * deviation / expected;
            }
        }
    }
    (chi_squared, columns.len(), min_expected)
}

impl TestProcedure<[&[f64]]> for MoodMedian {
    type Output = TestResult;

    fn name(&self) -> &'static str {
        "Mood's median test"
    }

    fn policy_choice(&self) -> PolicyChoice {
        PolicyChoice::ChiSquared
    }

    fn execute(&self, groups: &[&[f64]], context: &TestContext<'_>) -> Result<TestResult> {
        check_groups(groups, 2, "Mood's median test")?;
        let pooled: Vec<f64> = groups.iter().flat_map(|g| g.iter().copied()).collect();
        let grand_median = median(&pooled);

        let group_medians: Vec<f64> = groups.iter().map(|g| median(g)).collect();

        let mut above = Vec::with_capacity(groups.len());
        let mut below = Vec::with_capacity(groups.len());
        let mut at_median = 0usize;
        for group in groups {
            let mut a = group.iter().filter(|&&v| v > grand_median).count();
            let mut b = group.iter().filter(|&&v| v < grand_median).count();
            let equal = group.len() - a - b;
            at_median += equal;
            match self.ties {
                MedianTies::Below => b += equal,
                MedianTies::Above => a += equal,
                MedianTies::Ignore => {}
            }
            above.push(a);
            below.push(b);
        }

        let yates = groups.len() == 2 && context.config.continuity_correction;
        let (chi_squared, columns, min_expected) = chi_squared_2xk(&above, &below, yates);
        let total: usize = above.iter().sum::<usize>() + below.iter().sum::<usize>();
        let degenerate =
            above.iter().all(|&a| a == 0) || below.iter().all(|&b| b == 0) || columns < 2;
        let df = (groups.len() - 1) as f64;

        let (p, effect) = if degenerate {
            (PValue::degenerate().with_df(df), None)
        } else {
            let p = context.policy.p_value(
                chi_squared,
                &NullDistribution::ChiSquared {
                    df: (columns - 1) as f64,
                },
                Alternative::TwoSided,
            )?;
            let effect = CramersV.from_statistic(&ContingencyStatistic {
                chi_squared,
                total,
                rows: 2,
                columns,
                sizes: groups.iter().map(|g| g.len()).collect(),
            })?;
            (p, Some(effect))
        };
        let statistic = if degenerate { 0.0 } else { chi_squared };

        let mut builder = ResultBuilder::new(self.name(), statistic, p)
            .sample_sizes(groups.iter().map(|g| g.len()).collect())
            .ties(at_median > 0, false)
            .extra_float("chi_squared", statistic)
            .extra_float("grand_median", grand_median)
            .extra("group_medians", RawExtra::Floats(group_medians))
            .extra("above_median", RawExtra::Counts(above))
            .extra("below_median", RawExtra::Counts(below))
            .extra("at_median", RawExtra::Count(at_median))
            .extra("ties", RawExtra::Text(self.ties.name().to_string()))
            .extra("yates_correction", RawExtra::Flag(yates))
            .p_value_details();
        if let Some(effect) = effect {
            builder = builder.effect_size(effect);
        }
        if degenerate {
            builder = builder.interpretation(
                "The median split leaves an empty row or fewer than two columns; chi-squared is 0 and p = 1.",
            );
        } else if min_expected.is_finite() {
            builder = builder.extra_float("min_expected", min_expected);
        }

        builder
            .recommend_if(
                !degenerate && min_expected < MIN_EXPECTED,
                "Some expected counts are below 5; the chi-squared approximation may be unreliable",
            )
            .build(context.precision(), context.alpha(), &FINDINGS)
    }
}
