//! One entry point per test, bound to a configuration

use stick_core::{Alternative, RankMethod, RankedSamples, Result};
use stick_effect::{
    EffectSize, EpsilonSquared, FriedmanStatistic, FromStatistic, KendallsW, RankBiserial,
};
use tracing::instrument;

use crate::config::NonParametricConfig;
use crate::procedure::{PairedSamples, SignedRankInput, TestContext, TestProcedure, TwoSamples};
use crate::procedures::{
    block_ranks, friedman_statistic, h_statistic, rank_sum_statistic, DunnTest, Friedman,
    JonckheereTerpstra, KruskalWallis, MannWhitneyU, MoodMedian, PageTrend, SignTest,
    WilcoxonSignedRank,
};
use crate::result::{PostHocResult, TestResult};

/// High-precision non-parametric test engine
///
/// Holds a validated [`NonParametricConfig`]; every method is a pure
/// computation, so one engine can be shared across threads.
///
/// ```rust
/// use stick_core::Alternative;
/// use stick_nonparametric::HighPrecisionNonParametric;
///
/// let engine = HighPrecisionNonParametric::default();
/// let result = engine
///     .mann_whitney_u(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0], Alternative::TwoSided)
///     .unwrap();
/// assert_eq!(result.statistic_f64(), 0.0);
/// assert_eq!(result.p_value_f64(), 0.1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct HighPrecisionNonParametric {
    config: NonParametricConfig,
}

impl HighPrecisionNonParametric {
    /// Create an engine after validating `config`
    pub fn new(config: NonParametricConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &NonParametricConfig {
        &self.config
    }

    /// Collaborators handed to each procedure
    pub fn context(&self) -> TestContext<'_> {
        TestContext::new(&self.config)
    }

    /// Execute any procedure with this engine's configuration
    pub fn run<I, P>(&self, procedure: &P, input: &I) -> Result<P::Output>
    where
        I: ?Sized,
        P: TestProcedure<I>,
    {
        procedure.execute(input, &self.context())
    }

    /// Mann-Whitney U test of two independent samples
    #[instrument(skip(self, x, y), fields(n1 = x.len(), n2 = y.len()))]
    pub fn mann_whitney_u(
        &self,
        x: &[f64],
        y: &[f64],
        alternative: Alternative,
    ) -> Result<TestResult> {
        self.run(&MannWhitneyU::new(alternative), &TwoSamples { x, y })
    }

    /// Wilcoxon signed-rank test of paired samples
    #[instrument(skip(self, x, y), fields(n1 = x.len(), n2 = y.len()))]
    pub fn wilcoxon_signed_rank(
        &self,
        x: &[f64],
        y: &[f64],
        alternative: Alternative,
    ) -> Result<TestResult> {
        self.run(
            &WilcoxonSignedRank::new(alternative, self.config.zero_method),
            &SignedRankInput::Paired(PairedSamples { x, y }),
        )
    }

    /// Wilcoxon signed-rank test of one sample against the median `mu`
    #[instrument(skip(self, data), fields(n = data.len()))]
    pub fn wilcoxon_one_sample(
        &self,
        data: &[f64],
        mu: f64,
        alternative: Alternative,
    ) -> Result<TestResult> {
        self.run(
            &WilcoxonSignedRank::new(alternative, self.config.zero_method),
            &SignedRankInput::OneSample { data, mu },
        )
    }

    /// Kruskal-Wallis H test of k independent groups
    #[instrument(skip(self, groups), fields(groups = groups.len()))]
    pub fn kruskal_wallis(&self, groups: &[&[f64]]) -> Result<TestResult> {
        self.run(&KruskalWallis, groups)
    }

    /// Friedman test; rows are blocks, columns are treatments
    #[instrument(skip(self, blocks), fields(blocks = blocks.len()))]
    pub fn friedman(&self, blocks: &[Vec<f64>]) -> Result<TestResult> {
        self.run(&Friedman, blocks)
    }

    /// Sign test of paired samples
    #[instrument(skip(self, x, y), fields(n1 = x.len(), n2 = y.len()))]
    pub fn sign_test(&self, x: &[f64], y: &[f64], alternative: Alternative) -> Result<TestResult> {
        self.run(&SignTest::new(alternative), &PairedSamples { x, y })
    }

    /// Mood's median test of k independent groups
    #[instrument(skip(self, groups), fields(groups = groups.len()))]
    pub fn mood_median(&self, groups: &[&[f64]]) -> Result<TestResult> {
        self.run(&MoodMedian::new(self.config.median_ties), groups)
    }

    /// Jonckheere-Terpstra test for groups in their hypothesised order
    #[instrument(skip(self, groups), fields(groups = groups.len()))]
    pub fn jonckheere_terpstra(
        &self,
        groups: &[&[f64]],
        alternative: Alternative,
    ) -> Result<TestResult> {
        self.run(&JonckheereTerpstra::new(alternative), groups)
    }

    /// Page's trend test; columns are treatments in their hypothesised order
    #[instrument(skip(self, blocks), fields(blocks = blocks.len()))]
    pub fn page_trend(&self, blocks: &[Vec<f64>]) -> Result<TestResult> {
        self.run(&PageTrend, blocks)
    }

    /// Dunn's pairwise comparisons with the configured correction
    #[instrument(
        skip(self, groups, labels),
        fields(groups = groups.len(), correction = %self.config.correction)
    )]
    pub fn dunn_test(&self, groups: &[&[f64]], labels: Option<&[&str]>) -> Result<PostHocResult> {
        let mut test = DunnTest::new(self.config.correction);
        if let Some(labels) = labels {
            test = test.with_labels(labels.iter().copied());
        }
        self.run(&test, groups)
    }

    /// Signed rank-biserial correlation `1 − 2·U1/(n1·n2)`
    ///
    /// Positive when the second sample tends to be larger.
    #[instrument(skip(self, x, y), fields(n1 = x.len(), n2 = y.len()))]
    pub fn rank_biserial_correlation(&self, x: &[f64], y: &[f64]) -> Result<EffectSize> {
        let (statistic, _) = rank_sum_statistic(&self.context().ranking, x, y)?;
        RankBiserial::new().from_statistic(&statistic)
    }

    /// Epsilon-squared `H/(N − 1)` from the tie-corrected Kruskal-Wallis H
    #[instrument(skip(self, groups), fields(groups = groups.len()))]
    pub fn epsilon_squared(&self, groups: &[&[f64]]) -> Result<EffectSize> {
        let stat = h_statistic(&self.context().ranking, groups)?;
        EpsilonSquared.from_statistic(&stat.h)
    }

    /// Kendall's W from the tie-corrected Friedman chi-squared
    #[instrument(skip(self, blocks), fields(blocks = blocks.len()))]
    pub fn kendalls_w(&self, blocks: &[Vec<f64>]) -> Result<EffectSize> {
        let ranks = block_ranks(&self.context().ranking, blocks, 2, "Kendall's W")?;
        let (chi_squared, _) = friedman_statistic(&ranks);
        KendallsW.from_statistic(&FriedmanStatistic {
            chi_squared,
            blocks: ranks.blocks,
            treatments: ranks.treatments,
        })
    }

    /// Pool and rank samples with `method`
    pub fn rank(&self, samples: &[&[f64]], method: RankMethod) -> Result<RankedSamples> {
        stick_core::rank(samples, method)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use stick_core::Error;

    #[test]
    fn test_new_rejects_invalid_alpha() {
        let config = NonParametricConfig::default().with_alpha(1.5);
        assert!(matches!(
            HighPrecisionNonParametric::new(config),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_rank_biserial_is_signed() {
        let engine = HighPrecisionNonParametric::default();
        let x = [1.0, 2.0, 3.0];
        let y = [4.0, 5.0, 6.0];
        assert_eq!(engine.rank_biserial_correlation(&x, &y).unwrap().magnitude, 1.0);
        assert_eq!(engine.rank_biserial_correlation(&y, &x).unwrap().magnitude, -1.0);
    }

    #[test]
    fn test_effect_helpers_match_procedures() {
        let engine = HighPrecisionNonParametric::default();
        let groups: [&[f64]; 3] = [&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0], &[7.0, 8.0, 9.0]];
        let kw = engine.kruskal_wallis(&groups).unwrap();
        let eps = engine.epsilon_squared(&groups).unwrap();
        assert_abs_diff_eq!(kw.effect_size_f64().unwrap(), eps.magnitude, epsilon = 1e-12);
        assert_abs_diff_eq!(eps.magnitude, 7.2 / 8.0, epsilon = 1e-12);

        let blocks = vec![vec![1.0, 2.0, 3.0]; 5];
        let w = engine.kendalls_w(&blocks).unwrap();
        assert_abs_diff_eq!(w.magnitude, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_dunn_uses_configured_correction() {
        let config = NonParametricConfig::default()
            .with_correction(stick_correction::CorrectionMethod::Holm);
        let engine = HighPrecisionNonParametric::new(config).unwrap();
        let groups: [&[f64]; 2] = [&[1.0, 2.0], &[3.0, 4.0]];
        let result = engine.dunn_test(&groups, Some(&["a", "b"])).unwrap();
        assert_eq!(result.correction_method, stick_correction::CorrectionMethod::Holm);
        assert!(result.comparison("a_vs_b").is_some());
    }

    #[test]
    fn test_rank_exposes_methods() {
        let engine = HighPrecisionNonParametric::default();
        let ranked = engine.rank(&[&[1.0, 2.0, 2.0]], RankMethod::Min).unwrap();
        assert_eq!(ranked.sample_ranks(0), &[1.0, 2.0, 2.0]);
    }
}
