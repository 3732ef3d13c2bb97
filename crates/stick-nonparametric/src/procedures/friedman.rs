//! Friedman test for a randomized complete block design

use stick_core::validation::check_blocks;
use stick_core::{Alternative, RankingEngine, Result, TieProfile};
use stick_effect::{FriedmanStatistic, FromStatistic, KendallsW};
use stick_pvalue::{NullDistribution, PValue, PValueSource};

use crate::procedure::{PolicyChoice, TestContext, TestProcedure};
use crate::result::{Findings, RawExtra, ResultBuilder, TestResult};

const FINDINGS: Findings = Findings {
    significant: "at least one treatment is ranked differently across blocks",
    not_significant: "no evidence that the treatments differ",
};

/// Friedman rank test
///
/// Input rows are blocks (subjects), columns are treatments. Small designs
/// (fewer than 10 blocks or 5 treatments) are referred to the Iman-Davenport
/// F distribution.
#[derive(Debug, Clone, Copy, Default)]
pub struct Friedman;

/// Treatment rank sums after ranking within each block
#[derive(Debug, Clone)]
pub(crate) struct BlockRanks {
    pub blocks: usize,
    pub treatments: usize,
    pub rank_sums: Vec<f64>,
    pub ties: TieProfile,
}

impl BlockRanks {
    pub fn mean_ranks(&self) -> Vec<f64> {
        let n = self.blocks as f64;
        self.rank_sums.iter().map(|r| r / n).collect()
    }
}

/// Rank each block separately and sum the ranks per treatment
pub(crate) fn block_ranks(
    ranking: &RankingEngine,
    blocks: &[Vec<f64>],
    min_treatments: usize,
    test: &'static str,
) -> Result<BlockRanks> {
    let (n, k) = check_blocks(blocks, min_treatments, 2, test)?;
    let mut rank_sums = vec![0.0; k];
    let mut ties = TieProfile::default();
    for block in blocks {
        let ranked = ranking.rank(&[block.as_slice()])?;
        for (sum, r) in rank_sums.iter_mut().zip(ranked.sample_ranks(0)) {
            *sum += r;
        }
        ties.extend(&ranked.tie_profile());
    }
    Ok(BlockRanks {
        blocks: n,
        treatments: k,
        rank_sums,
        ties,
    })
}

/// Friedman chi-squared with the within-block tie correction
///
/// `χ² = 12/(nk(k + 1)) · Σ (Rⱼ − n(k + 1)/2)² / C` with
/// `C = 1 − Σ(t³ − t)/(n(k³ − k))`. Blocks that are entirely tied make
/// `C = 0`; χ² is then reported as 0.
pub(crate) fn friedman_statistic(ranks: &BlockRanks) -> (f64, f64) {
    let n = ranks.blocks as f64;
    let k = ranks.treatments as f64;
    let centre = n * (k + 1.0) / 2.0;
    let spread: f64 = ranks.rank_sums.iter().map(|r| (r - centre).powi(2)).sum();
    let chi_squared = 12.0 / (n * k * (k + 1.0)) * spread;
    let c = 1.0 - ranks.ties.sum_cubed_minus_t() / (n * (k.powi(3) - k));
    if c > 1e-12 {
        ((chi_squared / c).max(0.0), c)
    } else {
        (0.0, 0.0)
    }
}

impl TestProcedure<[Vec<f64>]> for Friedman {
    type Output = TestResult;

    fn name(&self) -> &'static str {
        "Friedman test"
    }

    fn policy_choice(&self) -> PolicyChoice {
        PolicyChoice::ChiSquaredOrF
    }

    fn execute(&self, blocks: &[Vec<f64>], context: &TestContext<'_>) -> Result<TestResult> {
        let ranks = block_ranks(&context.ranking, blocks, 3, "Friedman test")?;
        let (chi_squared, c) = friedman_statistic(&ranks);
        let (n, k) = (ranks.blocks, ranks.treatments);

        let p = if c > 0.0 {
            context.policy.p_value(
                chi_squared,
                &NullDistribution::Friedman {
                    blocks: n,
                    treatments: k,
                },
                Alternative::TwoSided,
            )?
        } else {
            PValue::degenerate().with_df((k - 1) as f64)
        };
        let effect = KendallsW.from_statistic(&FriedmanStatistic {
            chi_squared,
            blocks: n,
            treatments: k,
        })?;
        let ties = ranks.ties.has_ties();
        let uses_f = p.source == PValueSource::F;

        let builder = ResultBuilder::new(self.name(), chi_squared, p)
            .sample_sizes(vec![n, k])
            .effect_size(effect)
            .ranks(ranks.mean_ranks(), ranks.rank_sums.clone())
            .ties(ties, ties)
            .extra_float("chi_squared", chi_squared)
            .extra_float("tie_correction_factor", c)
            .extra("iman_davenport", RawExtra::Flag(uses_f))
            .p_value_details();
        let significant = builder.p_value() < context.alpha();

        builder
            .recommend_if(
                significant,
                "Consider post-hoc pairwise Wilcoxon signed-rank tests with a multiple-comparison correction",
            )
            .recommend_if(
                c == 0.0,
                "Every block is constant; the data carry no information about treatment differences",
            )
            .build(context.precision(), context.alpha(), &FINDINGS)
    }
}
