//! Sign test for paired samples

use stick_core::validation::check_paired;
use stick_core::{Alternative, Result};
use stick_effect::{FromStatistic, SignCounts, SignProportion};
use stick_pvalue::NullDistribution;

use crate::procedure::{PairedSamples, PolicyChoice, TestContext, TestProcedure};
use crate::result::{Findings, RawExtra, ResultBuilder, TestResult};

const FINDINGS: Findings = Findings {
    significant: "positive and negative differences are not equally likely",
    not_significant: "no evidence that the median difference is non-zero",
};

/// Sign test
///
/// Zero differences are discarded. The number of positive differences is
/// referred to a Binomial(n, ½) distribution; the reported statistic is
/// `S = min(n₊, n₋)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignTest {
    /// Alternative hypothesis; `Greater` means `x` tends to exceed `y`
    pub alternative: Alternative,
}

impl SignTest {
    /// Test against `alternative`
    pub fn new(alternative: Alternative) -> Self {
        Self { alternative }
    }
}

impl TestProcedure<PairedSamples<'_>> for SignTest {
    type Output = TestResult;

    fn name(&self) -> &'static str {
        "Sign test"
    }

    fn policy_choice(&self) -> PolicyChoice {
        PolicyChoice::ExactBinomial
    }

    fn execute(&self, input: &PairedSamples<'_>, context: &TestContext<'_>) -> Result<TestResult> {
        check_paired(input.x, input.y)?;
        let mut counts = SignCounts {
            positive: 0,
            negative: 0,
        };
        let mut zeros = 0usize;
        for (a, b) in input.x.iter().zip(input.y) {
            let d = a - b;
            if d > 0.0 {
                counts.positive += 1;
            } else if d < 0.0 {
                counts.negative += 1;
            } else {
                zeros += 1;
            }
        }
        let trials = counts.trials();

        let p = context.policy.p_value(
            counts.positive as f64,
            &NullDistribution::Binomial {
                trials: trials as u64,
            },
            self.alternative,
        )?;
        let effect = SignProportion.from_statistic(&counts)?;
        let statistic = counts.positive.min(counts.negative) as f64;

        let mut builder = ResultBuilder::new(self.name(), statistic, p)
            .alternative(self.alternative)
            .sample_sizes(vec![input.x.len(), trials])
            .effect_size(effect)
            .ties(zeros > 0, false)
            .extra("n_positive", RawExtra::Count(counts.positive))
            .extra("n_negative", RawExtra::Count(counts.negative))
            .extra("n_zero", RawExtra::Count(zeros))
            .p_value_details();
        if trials == 0 {
            builder = builder.interpretation(
                "All differences are zero; the data carry no evidence of a shift (statistic 0, p = 1).",
            );
        }
        builder
            .recommend_if(
                zeros > 0,
                format!("{zeros} zero difference(s) excluded from the sign counts"),
            )
            .recommend(
                "The Wilcoxon signed-rank test also uses the magnitudes of the differences and is usually more powerful",
            )
            .build(context.precision(), context.alpha(), &FINDINGS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NonParametricConfig;
    use stick_pvalue::{PValueMethod, PValueSource};

    fn run(x: &[f64], y: &[f64], alternative: Alternative, config: &NonParametricConfig) -> TestResult {
        SignTest::new(alternative)
            .execute(&PairedSamples { x, y }, &TestContext::new(config))
            .unwrap()
    }

    #[test]
    fn test_all_positive() {
        let config = NonParametricConfig::default();
        let result = run(
            &[5.0, 6.0, 7.0, 8.0],
            &[1.0, 2.0, 3.0, 4.0],
            Alternative::TwoSided,
            &config,
        );
        assert_eq!(result.statistic_f64(), 0.0);
        assert_eq!(result.p_value_f64(), 0.125);
        assert_eq!(result.p_value.to_string(), "0.125");
        assert_eq!(result.p_value_method, PValueSource::Exact);
        assert_eq!(result.effect_size_f64(), Some(1.0));
        assert_eq!(result.extra("n_positive"), Some(&crate::ResultValue::Integer(4)));
    }

    #[test]
    fn test_one_sided() {
        let config = NonParametricConfig::default();
        let x = [5.0, 6.0, 7.0, 8.0];
        let y = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(run(&x, &y, Alternative::Greater, &config).p_value_f64(), 0.0625);
        assert_eq!(run(&x, &y, Alternative::Less, &config).p_value_f64(), 1.0);
    }

    #[test]
    fn test_zeros_are_dropped() {
        let config = NonParametricConfig::default();
        let result = run(&[1.0, 2.0, 3.0], &[1.0, 1.0, 4.0], Alternative::TwoSided, &config);
        assert_eq!(result.extra("n_zero"), Some(&crate::ResultValue::Integer(1)));
        assert_eq!(result.p_value_f64(), 1.0);
        assert!(result.ties_present);
    }

    #[test]
    fn test_all_zero() {
        let config = NonParametricConfig::default();
        let result = run(&[1.0, 2.0], &[1.0, 2.0], Alternative::TwoSided, &config);
        assert_eq!(result.p_value_f64(), 1.0);
        assert!(result.interpretation.contains("All differences are zero"));
    }

    #[test]
    fn test_asymptotic_hint() {
        let config = NonParametricConfig::default().with_p_value_method(PValueMethod::Asymptotic);
        let x: Vec<f64> = (0..40).map(|i| i as f64).collect();
        let y: Vec<f64> = (0..40).map(|i| i as f64 - if i % 4 == 0 { -1.0 } else { 1.0 }).collect();
        let result = run(&x, &y, Alternative::TwoSided, &config);
        assert_eq!(result.p_value_method, PValueSource::Normal);
        assert!(result.significant);
    }
}
