//! Kruskal-Wallis H test for k independent groups

use stick_core::validation::check_groups;
use stick_core::{Alternative, RankedSamples, RankingEngine, Result};
use stick_effect::{EpsilonSquared, FromStatistic, HStatistic};
use stick_pvalue::{NullDistribution, PValue};

use crate::procedure::{PolicyChoice, TestContext, TestProcedure};
use crate::result::{Findings, ResultBuilder, TestResult};

const FINDINGS: Findings = Findings {
    significant: "at least one group comes from a different distribution",
    not_significant: "no evidence that the group distributions differ",
};

/// Groups below this size make the chi-squared approximation doubtful
const SMALL_GROUP: usize = 5;

/// Kruskal-Wallis H test
#[derive(Debug, Clone, Copy, Default)]
pub struct KruskalWallis;

/// H statistic with its tie correction
#[derive(Debug, Clone)]
pub(crate) struct KruskalWallisStatistic {
    pub h: HStatistic,
    pub uncorrected: f64,
    pub correction_factor: f64,
    pub ranked: RankedSamples,
}

/// Rank the pooled groups and compute the tie-corrected H
///
/// `H = 12 / (N(N + 1)) · Σ nᵢ (R̄ᵢ − (N + 1)/2)²`, divided by
/// `c = 1 − Σ(t³ − t)/(N³ − N)`. When every observation is tied `c = 0`
/// and H is reported as 0.
pub(crate) fn h_statistic(
    ranking: &RankingEngine,
    groups: &[&[f64]],
) -> Result<KruskalWallisStatistic> {
    check_groups(groups, 2, "Kruskal-Wallis test")?;
    let ranked = ranking.rank(groups)?;
    let n = ranked.total();
    let nf = n as f64;
    let centre = (nf + 1.0) / 2.0;

    let spread: f64 = ranked
        .mean_ranks()
        .iter()
        .zip(ranked.sizes())
        .map(|(&mean, size)| size as f64 * (mean - centre).powi(2))
        .sum();
    let uncorrected = 12.0 / (nf * (nf + 1.0)) * spread;
    let c = ranked.tie_profile().h_correction_factor(n);
    let h = if c > 0.0 { (uncorrected / c).max(0.0) } else { 0.0 };

    Ok(KruskalWallisStatistic {
        h: HStatistic {
            h,
            sizes: ranked.sizes(),
        },
        uncorrected,
        correction_factor: c,
        ranked,
    })
}

impl TestProcedure<[&[f64]]> for KruskalWallis {
    type Output = TestResult;

    fn name(&self) -> &'static str {
        "Kruskal-Wallis H test"
    }

    fn policy_choice(&self) -> PolicyChoice {
        PolicyChoice::ChiSquared
    }

    fn execute(&self, groups: &[&[f64]], context: &TestContext<'_>) -> Result<TestResult> {
        let stat = h_statistic(&context.ranking, groups)?;
        let df = (groups.len() - 1) as f64;
        let p = if stat.correction_factor > 0.0 {
            context.policy.p_value(
                stat.h.h,
                &NullDistribution::ChiSquared { df },
                Alternative::TwoSided,
            )?
        } else {
            PValue::degenerate().with_df(df)
        };
        let effect = EpsilonSquared.from_statistic(&stat.h)?;
        let ties = stat.ranked.has_ties();
        let small_group = stat.h.sizes.iter().any(|&s| s < SMALL_GROUP);

        let builder = ResultBuilder::new(self.name(), stat.h.h, p)
            .sample_sizes(stat.h.sizes.clone())
            .effect_size(effect)
            .ranks(stat.ranked.mean_ranks(), stat.ranked.rank_sums())
            .ties(ties, ties)
            .extra_float("h_statistic", stat.h.h)
            .extra_float("chi_squared", stat.h.h)
            .extra_float("h_uncorrected", stat.uncorrected)
            .extra_float("tie_correction_factor", stat.correction_factor)
            .p_value_details();
        let significant = builder.p_value() < context.alpha();

        builder
            .recommend_if(
                significant,
                "Consider post-hoc Dunn's test to identify which groups differ",
            )
            .recommend_if(
                small_group,
                "Some groups have fewer than 5 observations; the chi-squared approximation may be inaccurate",
            )
            .build(context.precision(), context.alpha(), &FINDINGS)
    }
}
