//! Jonckheere-Terpstra test for ordered alternatives

use stick_core::validation::check_groups;
use stick_core::{Alternative, Result};
use stick_effect::{FromStatistic, NormalizedTrend, TrendStatistic};
use stick_pvalue::NullDistribution;

use crate::procedure::{PolicyChoice, TestContext, TestProcedure};
use crate::result::{Findings, ResultBuilder, TestResult};

const FINDINGS: Findings = Findings {
    significant: "the group distributions follow the hypothesised ordering",
    not_significant: "no evidence of an ordered trend across the groups",
};

/// Jonckheere-Terpstra trend test
///
/// Groups are given in their hypothesised order. `J` sums the Mann-Whitney
/// counts of every ordered pair of groups; `Greater` means later groups
/// tend to be larger. The normal approximation uses the untied variance.
#[derive(Debug, Clone, Copy, Default)]
pub struct JonckheereTerpstra {
    /// Alternative hypothesis
    pub alternative: Alternative,
}

impl JonckheereTerpstra {
    /// Test against `alternative`
    pub fn new(alternative: Alternative) -> Self {
        Self { alternative }
    }
}

impl TestProcedure<[&[f64]]> for JonckheereTerpstra {
    type Output = TestResult;

    fn name(&self) -> &'static str {
        "Jonckheere-Terpstra test"
    }

    fn policy_choice(&self) -> PolicyChoice {
        PolicyChoice::Normal
    }

    fn execute(&self, groups: &[&[f64]], context: &TestContext<'_>) -> Result<TestResult> {
        check_groups(groups, 3, "Jonckheere-Terpstra test")?;

        let mut j_statistic = 0.0;
        for (i, earlier) in groups.iter().enumerate() {
            for later in &groups[i + 1..] {
                // U of the later group: pairs where it is larger, ties count ½
                let ranked = context.ranking.rank(&[*earlier, *later])?;
                let n = later.len() as f64;
                j_statistic += ranked.rank_sums()[1] - n * (n + 1.0) / 2.0;
            }
        }

        let sizes: Vec<usize> = groups.iter().map(|g| g.len()).collect();
        let total = sizes.iter().sum::<usize>() as f64;
        let squares: f64 = sizes.iter().map(|&n| (n * n) as f64).sum();
        let mean = (total * total - squares) / 4.0;
        let variance = (total * total * (2.0 * total + 3.0)
            - sizes
                .iter()
                .map(|&n| {
                    let n = n as f64;
                    n * n * (2.0 * n + 3.0)
                })
                .sum::<f64>())
            / 72.0;

        let p = context.policy.p_value(
            j_statistic,
            &NullDistribution::Normal {
                mean,
                variance,
                continuity: false,
            },
            self.alternative,
        )?;
        let effect = NormalizedTrend::jonckheere()
            .from_statistic(&TrendStatistic::jonckheere(j_statistic, &sizes))?;
        let ties = context.ranking.rank(groups)?.has_ties();

        ResultBuilder::new(self.name(), j_statistic, p)
            .alternative(self.alternative)
            .sample_sizes(sizes)
            .effect_size(effect)
            .ties(ties, false)
            .extra_float("j_statistic", j_statistic)
            .extra_float("expected_j", mean)
            .extra_float("variance_j", variance)
            .p_value_details()
            .recommend_if(
                ties,
                "Ties present; the null variance of J does not account for them",
            )
            .build(context.precision(), context.alpha(), &FINDINGS)
    }
}
