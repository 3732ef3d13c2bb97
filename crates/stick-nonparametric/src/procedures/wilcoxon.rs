//! Wilcoxon signed-rank test for paired samples or one sample against a
//! hypothesised median

use stick_core::validation::{check_paired, check_sample};
use stick_core::{Alternative, RankingEngine, Result, TieProfile};
use stick_effect::{FromStatistic, MatchedPairsRankBiserial, SignedRankStatistic};
use stick_pvalue::NullDistribution;

use crate::config::ZeroMethod;
use crate::procedure::{PolicyChoice, SignedRankInput, TestContext, TestProcedure};
use crate::result::{Findings, RawExtra, ResultBuilder, TestResult};

const FINDINGS: Findings = Findings {
    significant: "the differences are not symmetric about zero",
    not_significant: "no evidence that the median difference is non-zero",
};

/// Wilcoxon signed-rank test
///
/// The reported statistic is `W = min(W+, W−)`; the p-value is computed
/// from `W+` so that `Greater` means the differences `x − y` (or
/// `data − mu`) tend to be positive.
#[derive(Debug, Clone, Copy, Default)]
pub struct WilcoxonSignedRank {
    /// Alternative hypothesis
    pub alternative: Alternative,
    /// Treatment of zero differences
    pub zero_method: ZeroMethod,
}

impl WilcoxonSignedRank {
    /// Test against `alternative` with the given zero handling
    pub fn new(alternative: Alternative, zero_method: ZeroMethod) -> Self {
        Self {
            alternative,
            zero_method,
        }
    }
}

/// Ranks of the non-zero absolute differences with their signs
#[derive(Debug, Clone)]
pub(crate) struct SignedRanks {
    pub ranks: Vec<f64>,
    pub w_plus: f64,
    pub w_minus: f64,
    pub n_zero: usize,
    pub ties: TieProfile,
    pub mean: f64,
    pub variance: f64,
}

impl SignedRanks {
    fn statistic(&self) -> SignedRankStatistic {
        SignedRankStatistic {
            w_plus: self.w_plus,
            w_minus: self.w_minus,
            n: self.ranks.len(),
        }
    }
}

/// Rank `|d|` and split the rank sum by sign
pub(crate) fn signed_ranks(
    ranking: &RankingEngine,
    differences: &[f64],
    zero_method: ZeroMethod,
) -> Result<SignedRanks> {
    let n_zero = differences.iter().filter(|&&d| d == 0.0).count();
    let nonzero: Vec<f64> = differences.iter().copied().filter(|&d| d != 0.0).collect();
    let ties = TieProfile::from_values(&nonzero.iter().map(|d| d.abs()).collect::<Vec<_>>());

    if nonzero.is_empty() {
        return Ok(SignedRanks {
            ranks: Vec::new(),
            w_plus: 0.0,
            w_minus: 0.0,
            n_zero,
            ties,
            mean: 0.0,
            variance: 0.0,
        });
    }

    // (rank, sign) of each non-zero difference
    let signed: Vec<(f64, bool)> = match zero_method {
        ZeroMethod::Wilcox => {
            let abs: Vec<f64> = nonzero.iter().map(|d| d.abs()).collect();
            let ranked = ranking.rank(&[abs.as_slice()])?;
            ranked
                .sample_ranks(0)
                .iter()
                .zip(&nonzero)
                .map(|(&r, &d)| (r, d > 0.0))
                .collect()
        }
        ZeroMethod::Pratt => {
            let abs: Vec<f64> = differences.iter().map(|d| d.abs()).collect();
            let ranked = ranking.rank(&[abs.as_slice()])?;
            ranked
                .sample_ranks(0)
                .iter()
                .zip(differences)
                .filter(|&(_, &d)| d != 0.0)
                .map(|(&r, &d)| (r, d > 0.0))
                .collect()
        }
    };

    let w_plus: f64 = signed.iter().filter(|(_, pos)| *pos).map(|(r, _)| r).sum();
    let w_minus: f64 = signed.iter().filter(|(_, pos)| !*pos).map(|(r, _)| r).sum();

    let moments = |n: f64| (n * (n + 1.0) / 4.0, n * (n + 1.0) * (2.0 * n + 1.0) / 24.0);
    let (mean, variance) = match zero_method {
        ZeroMethod::Wilcox => moments(nonzero.len() as f64),
        ZeroMethod::Pratt => {
            let (mean_all, var_all) = moments(differences.len() as f64);
            let (mean_zero, var_zero) = moments(n_zero as f64);
            (mean_all - mean_zero, var_all - var_zero)
        }
    };

    Ok(SignedRanks {
        ranks: signed.into_iter().map(|(r, _)| r).collect(),
        w_plus,
        w_minus,
        n_zero,
        variance: variance - ties.signed_rank_correction(),
        ties,
        mean,
    })
}

impl TestProcedure<SignedRankInput<'_>> for WilcoxonSignedRank {
    type Output = TestResult;

    fn name(&self) -> &'static str {
        "Wilcoxon signed-rank test"
    }

    fn policy_choice(&self) -> PolicyChoice {
        PolicyChoice::ExactOrNormal
    }

    fn execute(&self, input: &SignedRankInput<'_>, context: &TestContext<'_>) -> Result<TestResult> {
        let differences: Vec<f64> = match *input {
            SignedRankInput::Paired(pair) => {
                check_paired(pair.x, pair.y)?;
                pair.x.iter().zip(pair.y).map(|(a, b)| a - b).collect()
            }
            SignedRankInput::OneSample { data, mu } => {
                check_sample(data, "sample")?;
                if !mu.is_finite() {
                    return Err(stick_core::Error::non_finite("hypothesised median"));
                }
                data.iter().map(|v| v - mu).collect()
            }
        };

        let sr = signed_ranks(&context.ranking, &differences, self.zero_method)?;
        let p = context.policy.p_value(
            sr.w_plus,
            &NullDistribution::SignedRank {
                ranks: &sr.ranks,
                mean: sr.mean,
                variance: sr.variance,
            },
            self.alternative,
        )?;
        let effect = MatchedPairsRankBiserial.from_statistic(&sr.statistic())?;
        let statistic = sr.w_plus.min(sr.w_minus);
        let all_zero = sr.ranks.is_empty();

        let mut builder = ResultBuilder::new(self.name(), statistic, p)
            .alternative(self.alternative)
            .sample_sizes(vec![differences.len(), sr.ranks.len()])
            .effect_size(effect)
            .ties(sr.ties.has_ties(), sr.ties.has_ties())
            .extra_float("w_plus", sr.w_plus)
            .extra_float("w_minus", sr.w_minus)
            .extra("n_zero", RawExtra::Count(sr.n_zero))
            .extra("zero_method", RawExtra::Text(self.zero_method.name().to_string()))
            .p_value_details();
        if let SignedRankInput::OneSample { mu, .. } = *input {
            builder = builder.extra_float("mu", mu);
        }

        if all_zero {
            builder = builder.interpretation(
                "All differences are zero; the data carry no evidence of a shift (statistic 0, p = 1).",
            );
        }
        builder
            .recommend_if(
                sr.n_zero > 0 && !all_zero,
                format!(
                    "{} zero difference(s) excluded from the signed ranks (zero_method = {})",
                    sr.n_zero, self.zero_method
                ),
            )
            .build(context.precision(), context.alpha(), &FINDINGS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NonParametricConfig;
    use crate::procedure::PairedSamples;
    use approx::assert_abs_diff_eq;
    use stick_pvalue::{PValueMethod, PValueSource};

    fn paired(x: &[f64], y: &[f64], test: WilcoxonSignedRank, config: &NonParametricConfig) -> TestResult {
        test.execute(
            &SignedRankInput::Paired(PairedSamples { x, y }),
            &TestContext::new(config),
        )
        .unwrap()
    }

    #[test]
    fn test_all_positive_differences() {
        let config = NonParametricConfig::default();
        let x = [11.0, 12.0, 13.0, 14.0, 15.0];
        let y = [10.0, 10.0, 10.0, 10.0, 10.0];
        let result = paired(&x, &y, WilcoxonSignedRank::default(), &config);
        assert_eq!(result.statistic_f64(), 0.0);
        assert_eq!(result.p_value_f64(), 0.0625);
        assert_eq!(result.p_value_method, PValueSource::Exact);
        assert_eq!(result.effect_size_f64(), Some(1.0));

        let greater = paired(
            &x,
            &y,
            WilcoxonSignedRank::new(Alternative::Greater, ZeroMethod::Wilcox),
            &config,
        );
        assert_eq!(greater.p_value_f64(), 0.03125);
    }

    #[test]
    fn test_identical_samples_are_degenerate() {
        let config = NonParametricConfig::default();
        let x = [1.0, 2.0, 3.0, 4.0];
        let result = paired(&x, &x, WilcoxonSignedRank::default(), &config);
        assert_eq!(result.statistic_f64(), 0.0);
        assert_eq!(result.p_value_f64(), 1.0);
        assert!(!result.significant);
        assert!(result.interpretation.contains("All differences are zero"));
    }

    #[test]
    fn test_zero_methods() {
        let config = NonParametricConfig::default();
        let ranking = RankingEngine::default();
        let d = [0.0, 1.0, -2.0, 3.0];

        let wilcox = signed_ranks(&ranking, &d, ZeroMethod::Wilcox).unwrap();
        assert_eq!(wilcox.ranks, vec![1.0, 2.0, 3.0]);
        assert_eq!(wilcox.w_plus, 4.0);
        assert_eq!(wilcox.w_minus, 2.0);
        assert_abs_diff_eq!(wilcox.mean, 3.0, epsilon = 1e-12);

        let pratt = signed_ranks(&ranking, &d, ZeroMethod::Pratt).unwrap();
        assert_eq!(pratt.ranks, vec![2.0, 3.0, 4.0]);
        assert_eq!(pratt.w_plus, 6.0);
        assert_eq!(pratt.w_minus, 3.0);
        // n = 4, one zero: 4·5/4 − 1·2/4
        assert_abs_diff_eq!(pratt.mean, 4.5, epsilon = 1e-12);
        // (4·5·9 − 1·2·3)/24
        assert_abs_diff_eq!(pratt.variance, 174.0 / 24.0, epsilon = 1e-12);

        let result = paired(
            &[1.0, 2.0, 1.0, 5.0],
            &[1.0, 1.0, 3.0, 2.0],
            WilcoxonSignedRank::new(Alternative::TwoSided, ZeroMethod::Pratt),
            &config,
        );
        assert_eq!(result.p_value_method, PValueSource::Exact);
        assert!(result.recommendations.iter().any(|r| r.contains("pratt")));
    }

    #[test]
    fn test_one_sample_against_median() {
        let config = NonParametricConfig::default();
        let data = [5.5, 6.1, 7.2, 4.9, 8.3, 6.6];
        let result = WilcoxonSignedRank::default()
            .execute(
                &SignedRankInput::OneSample { data: &data, mu: 5.0 },
                &TestContext::new(&config),
            )
            .unwrap();
        // differences 0.5, 1.1, 2.2, −0.1, 3.3, 1.6: only the smallest is negative
        assert_eq!(result.statistic_f64(), 1.0);
        assert!(result.extra("mu").is_some());
    }

    #[test]
    fn test_tie_corrected_variance_for_large_samples() {
        let config = NonParametricConfig::default().with_p_value_method(PValueMethod::Asymptotic);
        let x: Vec<f64> = (0..30).map(|i| (i % 5) as f64 + 1.0).collect();
        let y = vec![0.0; 30];
        let result = paired(&x, &y, WilcoxonSignedRank::default(), &config);
        assert_eq!(result.p_value_method, PValueSource::Normal);
        assert!(result.ties_present);
        assert!(result.significant);
    }

    #[test]
    fn test_length_mismatch() {
        let config = NonParametricConfig::default();
        let err = WilcoxonSignedRank::default()
            .execute(
                &SignedRankInput::Paired(PairedSamples {
                    x: &[1.0, 2.0],
                    y: &[1.0],
                }),
                &TestContext::new(&config),
            )
            .unwrap_err();
        assert_eq!(err, stick_core::Error::LengthMismatch { first: 2, second: 1 });
    }
}
