//! Mann-Whitney U test for two independent samples

use stick_core::validation::check_sample;
use stick_core::{Alternative, RankedSamples, RankingEngine, Result};
use stick_effect::{FromStatistic, RankBiserial, RankSumStatistic};
use stick_pvalue::{NullDistribution, RANK_SUM_EXACT_THRESHOLD};

use crate::procedure::{PolicyChoice, TestContext, TestProcedure, TwoSamples};
use crate::result::{Findings, ResultBuilder, TestResult};

const FINDINGS: Findings = Findings {
    significant: "the two samples come from distributions that differ in location",
    not_significant: "no evidence that the two distributions differ in location",
};

/// Mann-Whitney U (Wilcoxon rank-sum) test
///
/// The reported statistic is `U = min(U1, U2)`, so swapping the samples
/// leaves it unchanged. The p-value is computed from `U1` of the first
/// sample; `Greater` means the first sample tends to be larger.
#[derive(Debug, Clone, Copy, Default)]
pub struct MannWhitneyU {
    /// Alternative hypothesis
    pub alternative: Alternative,
}

impl MannWhitneyU {
    /// Test against `alternative`
    pub fn new(alternative: Alternative) -> Self {
        Self { alternative }
    }
}

/// Pool and rank two samples and compute `U1`
pub(crate) fn rank_sum_statistic(
    ranking: &RankingEngine,
    x: &[f64],
    y: &[f64],
) -> Result<(RankSumStatistic, RankedSamples)> {
    check_sample(x, "first sample")?;
    check_sample(y, "second sample")?;
    let ranked = ranking.rank(&[x, y])?;
    let n1 = x.len();
    let r1 = ranked.rank_sums()[0];
    let u1 = r1 - (n1 * (n1 + 1)) as f64 / 2.0;
    Ok((
        RankSumStatistic {
            u1,
            n1,
            n2: y.len(),
        },
        ranked,
    ))
}

impl TestProcedure<TwoSamples<'_>> for MannWhitneyU {
    type Output = TestResult;

    fn name(&self) -> &'static str {
        "Mann-Whitney U test"
    }

    fn policy_choice(&self) -> PolicyChoice {
        PolicyChoice::ExactOrNormal
    }

    fn execute(&self, input: &TwoSamples<'_>, context: &TestContext<'_>) -> Result<TestResult> {
        let (stat, ranked) = rank_sum_statistic(&context.ranking, input.x, input.y)?;
        let ties = ranked.tie_profile();
        let pooled = ranked.pooled();

        let p = context.policy.p_value(
            stat.u1,
            &NullDistribution::RankSum {
                ranks: &pooled,
                n1: stat.n1,
                ties: &ties,
            },
            self.alternative,
        )?;
        let effect = RankBiserial::magnitude().from_statistic(&stat)?;
        let signed = RankBiserial::new().from_statistic(&stat)?;
        let exact = p.source.is_exact();

        let builder = ResultBuilder::new(self.name(), stat.u_min(), p)
            .alternative(self.alternative)
            .sample_sizes(vec![stat.n1, stat.n2])
            .effect_size(effect)
            .ranks(ranked.mean_ranks(), ranked.rank_sums())
            .ties(ties.has_ties(), ties.has_ties())
            .extra_float("u1", stat.u1)
            .extra_float("u2", stat.u2())
            .extra_float("u_statistic", stat.u_min())
            .extra_float("rank_biserial_signed", signed.magnitude)
            .p_value_details();

        builder
            .recommend_if(
                !exact && stat.n1.max(stat.n2) < RANK_SUM_EXACT_THRESHOLD,
                "Samples are small; an exact p-value is available with the exact method",
            )
            .recommend_if(
                exact && ties.has_ties(),
                "Ties present; the exact p-value uses the permutation distribution of the observed tie pattern",
            )
            .build(context.precision(), context.alpha(), &FINDINGS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NonParametricConfig;
    use approx::assert_abs_diff_eq;
    use stick_pvalue::{PValueMethod, PValueSource};

    fn run(x: &[f64], y: &[f64], alternative: Alternative, config: &NonParametricConfig) -> TestResult {
        MannWhitneyU::new(alternative)
            .execute(&TwoSamples { x, y }, &TestContext::new(config))
            .unwrap()
    }

    #[test]
    fn test_fully_separated() {
        let config = NonParametricConfig::default();
        let result = run(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0], Alternative::TwoSided, &config);
        assert_eq!(result.statistic_f64(), 0.0);
        assert_eq!(result.p_value_f64(), 0.1);
        assert_eq!(result.p_value_method, PValueSource::Exact);
        assert_eq!(result.effect_size_f64(), Some(1.0));
        assert!(!result.ties_present);
        assert_eq!(result.p_value.to_string(), "0.1");
    }

    #[test]
    fn test_one_sided_direction() {
        let config = NonParametricConfig::default();
        let x = [1.0, 2.0, 3.0];
        let y = [4.0, 5.0, 6.0];
        // x smaller: only the lower tail is extreme
        let less = run(&x, &y, Alternative::Less, &config);
        assert_eq!(less.p_value_f64(), 0.05);
        let greater = run(&x, &y, Alternative::Greater, &config);
        assert_eq!(greater.p_value_f64(), 1.0);
    }

    #[test]
    fn test_ties_reported() {
        let config = NonParametricConfig::default();
        let result = run(&[1.0, 2.0, 2.0], &[2.0, 3.0, 4.0], Alternative::TwoSided, &config);
        assert!(result.ties_present);
        assert!(result.ties_correction_applied);
        assert!(result.p_value_f64() > 0.0 && result.p_value_f64() <= 1.0);
    }

    #[test]
    fn test_large_samples_use_normal() {
        let config = NonParametricConfig::default();
        let x: Vec<f64> = (0..25).map(|i| i as f64).collect();
        let y: Vec<f64> = (0..25).map(|i| i as f64 + 10.5).collect();
        let result = run(&x, &y, Alternative::TwoSided, &config);
        assert_eq!(result.p_value_method, PValueSource::Normal);
        assert!(result.extra("z_score").is_some());
        assert!(result.significant);
    }

    #[test]
    fn test_forced_asymptotic_small_sample_recommends_exact() {
        let config = NonParametricConfig::default().with_p_value_method(PValueMethod::Asymptotic);
        let result = run(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0], Alternative::TwoSided, &config);
        assert_eq!(result.p_value_method, PValueSource::Normal);
        assert!(result.recommendations.iter().any(|r| r.contains("exact")));
    }

    #[test]
    fn test_u_from_rank_sum() {
        let (stat, _) = rank_sum_statistic(
            &RankingEngine::default(),
            &[3.0, 5.0, 7.0, 9.0],
            &[1.0, 2.0, 4.0],
        )
        .unwrap();
        // ranks of x: 3, 5, 6, 7 → R1 = 21, U1 = 21 − 10
        assert_abs_diff_eq!(stat.u1, 11.0, epsilon = 1e-12);
        assert_abs_diff_eq!(stat.u2(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_rejects_empty_sample() {
        let config = NonParametricConfig::default();
        let err = MannWhitneyU::default()
            .execute(&TwoSamples { x: &[], y: &[1.0] }, &TestContext::new(&config))
            .unwrap_err();
        assert!(err.is_validation());
    }
}
