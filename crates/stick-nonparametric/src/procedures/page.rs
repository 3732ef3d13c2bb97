//! Page's trend test for ordered treatments in a block design

use stick_core::{Alternative, Result};
use stick_effect::{FromStatistic, NormalizedTrend, TrendStatistic};
use stick_pvalue::NullDistribution;

use crate::procedures::friedman::block_ranks;
use crate::procedure::{PolicyChoice, TestContext, TestProcedure};
use crate::result::{Findings, ResultBuilder, TestResult};

const FINDINGS: Findings = Findings {
    significant: "treatment effects increase in the hypothesised order",
    not_significant: "no evidence of an increasing trend across treatments",
};

/// Page's L test
///
/// Rows are blocks and columns are treatments in their hypothesised order.
/// `L = Σ j·Rⱼ` is referred to its normal approximation with a one-sided
/// (increasing) alternative.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageTrend;

impl TestProcedure<[Vec<f64>]> for PageTrend {
    type Output = TestResult;

    fn name(&self) -> &'static str {
        "Page's trend test"
    }

    fn policy_choice(&self) -> PolicyChoice {
        PolicyChoice::Normal
    }

    fn execute(&self, blocks: &[Vec<f64>], context: &TestContext<'_>) -> Result<TestResult> {
        let ranks = block_ranks(&context.ranking, blocks, 3, "Page's trend test")?;
        let n = ranks.blocks as f64;
        let k = ranks.treatments as f64;

        let l_statistic: f64 = ranks
            .rank_sums
            .iter()
            .enumerate()
            .map(|(j, r)| (j + 1) as f64 * r)
            .sum();
        let mean = n * k * (k + 1.0).powi(2) / 4.0;
        let variance = n * k * k * (k + 1.0) * (k * k - 1.0) / 144.0;

        let p = context.policy.p_value(
            l_statistic,
            &NullDistribution::Normal {
                mean,
                variance,
                continuity: false,
            },
            Alternative::Greater,
        )?;
        let effect = NormalizedTrend::page().from_statistic(&TrendStatistic::page(
            l_statistic,
            ranks.blocks,
            ranks.treatments,
        ))?;
        let ties = ranks.ties.has_ties();

        ResultBuilder::new(self.name(), l_statistic, p)
            .alternative(Alternative::Greater)
            .sample_sizes(vec![ranks.blocks, ranks.treatments])
            .effect_size(effect)
            .ranks(ranks.mean_ranks(), ranks.rank_sums.clone())
            .ties(ties, false)
            .extra_float("l_statistic", l_statistic)
            .extra_float("expected_l", mean)
            .extra_float("variance_l", variance)
            .p_value_details()
            .recommend_if(
                ties,
                "Ties within blocks; the null variance of L does not account for them",
            )
            .build(context.precision(), context.alpha(), &FINDINGS)
    }
}
