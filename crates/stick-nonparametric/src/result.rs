//! Result records returned by the test procedures
//!
//! Every numeric field is a [`BigDecimal`] rounded to the configured
//! precision. Records serialize to JSON with decimals as strings so that no
//! digits are lost on the way to a report or an API client.

use std::collections::BTreeMap;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use stick_core::{Alternative, BigDecimal, Error, Precision, Result};
use stick_correction::CorrectionMethod;
use stick_effect::{EffectSize, EffectSizeInterpretation, EffectSizeType};
use stick_pvalue::{PValue, PValueSource};

/// A test-specific secondary value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResultValue {
    /// High-precision number
    Decimal(BigDecimal),
    /// Count
    Integer(u64),
    /// Flag
    Flag(bool),
    /// Free text
    Text(String),
    /// One number per group
    Decimals(Vec<BigDecimal>),
    /// One count per group
    Integers(Vec<u64>),
}

impl ResultValue {
    /// Decimal payload, if this is a decimal
    pub fn as_decimal(&self) -> Option<&BigDecimal> {
        match self {
            Self::Decimal(d) => Some(d),
            _ => None,
        }
    }
}

/// Effect size as reported in a result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportedEffect {
    /// Measure name, e.g. `epsilon_squared`
    pub name: &'static str,
    /// Value at the configured precision
    pub value: BigDecimal,
    /// Effect size family
    pub effect_type: EffectSizeType,
    /// Conventional magnitude label
    pub interpretation: EffectSizeInterpretation,
    #[serde(skip)]
    magnitude: f64,
}

impl ReportedEffect {
    fn new(effect: &EffectSize, precision: &Precision) -> Result<Self> {
        Ok(Self {
            name: effect.name,
            value: precision.decimal(effect.magnitude)?,
            effect_type: effect.effect_type,
            interpretation: effect.interpretation,
            magnitude: effect.magnitude,
        })
    }

    /// Float value of the effect size
    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }
}

/// Canonical outcome of a hypothesis test
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestResult {
    /// Name of the test
    pub test_name: &'static str,
    /// Primary statistic
    pub statistic: BigDecimal,
    /// P-value
    pub p_value: BigDecimal,
    /// Distribution the p-value was read from
    pub p_value_method: PValueSource,
    /// Alternative hypothesis
    pub alternative: Alternative,
    /// Size of each sample, group or design dimension
    pub sample_sizes: Vec<usize>,
    /// Test-specific effect size
    pub effect_size: Option<ReportedEffect>,
    /// Mean rank of each group
    pub mean_ranks: Option<Vec<BigDecimal>>,
    /// Rank sum of each group
    pub rank_sums: Option<Vec<BigDecimal>>,
    /// Whether the data contain ties
    pub ties_present: bool,
    /// Whether the statistic or its null distribution accounts for ties
    pub ties_correction_applied: bool,
    /// Significance threshold used for `significant`
    pub alpha: BigDecimal,
    /// `p_value < alpha`
    pub significant: bool,
    /// Plain-language summary
    pub interpretation: String,
    /// Follow-up suggestions
    pub recommendations: Vec<String>,
    /// Secondary statistics (z-score, aliases of the statistic, counts, ...)
    pub extras: BTreeMap<String, ResultValue>,
    #[serde(skip)]
    raw: RawValues,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct RawValues {
    statistic: f64,
    p_value: f64,
}

impl TestResult {
    /// Float value of the statistic
    pub fn statistic_f64(&self) -> f64 {
        self.raw.statistic
    }

    /// Float value of the p-value
    pub fn p_value_f64(&self) -> f64 {
        self.raw.p_value
    }

    /// Float value of the effect size, if the test reports one
    pub fn effect_size_f64(&self) -> Option<f64> {
        self.effect_size.as_ref().map(ReportedEffect::magnitude)
    }

    /// Look up a secondary value
    pub fn extra(&self, key: &str) -> Option<&ResultValue> {
        self.extras.get(key)
    }

    /// JSON form of the record
    pub fn to_json(&self) -> Result<serde_json::Value> {
        serde_json::to_value(self)
            .map_err(|e| Error::Computation(format!("failed to serialize result: {e}")))
    }
}

/// Secondary value before conversion to decimals
#[derive(Debug, Clone)]
pub(crate) enum RawExtra {
    Float(f64),
    Count(usize),
    Flag(bool),
    Text(String),
    Floats(Vec<f64>),
    Counts(Vec<usize>),
}

/// Collects the pieces of a [`TestResult`] as floats and converts them at
/// the end
#[derive(Debug, Clone)]
pub(crate) struct ResultBuilder {
    test_name: &'static str,
    statistic: f64,
    p_value: PValue,
    alternative: Alternative,
    sample_sizes: Vec<usize>,
    effect_size: Option<EffectSize>,
    mean_ranks: Option<Vec<f64>>,
    rank_sums: Option<Vec<f64>>,
    ties_present: bool,
    ties_correction_applied: bool,
    interpretation: Option<String>,
    recommendations: Vec<String>,
    extras: Vec<(&'static str, RawExtra)>,
}

impl ResultBuilder {
    pub(crate) fn new(test_name: &'static str, statistic: f64, p_value: PValue) -> Self {
        Self {
            test_name,
            statistic,
            p_value,
            alternative: Alternative::TwoSided,
            sample_sizes: Vec::new(),
            effect_size: None,
            mean_ranks: None,
            rank_sums: None,
            ties_present: false,
            ties_correction_applied: false,
            interpretation: None,
            recommendations: Vec::new(),
            extras: Vec::new(),
        }
    }

    pub(crate) fn alternative(mut self, alternative: Alternative) -> Self {
        self.alternative = alternative;
        self
    }

    pub(crate) fn sample_sizes(mut self, sizes: Vec<usize>) -> Self {
        self.sample_sizes = sizes;
        self
    }

    pub(crate) fn effect_size(mut self, effect: EffectSize) -> Self {
        self.effect_size = Some(effect);
        self
    }

    pub(crate) fn ranks(mut self, mean_ranks: Vec<f64>, rank_sums: Vec<f64>) -> Self {
        self.mean_ranks = Some(mean_ranks);
        self.rank_sums = Some(rank_sums);
        self
    }

    pub(crate) fn ties(mut self, present: bool, corrected: bool) -> Self {
        self.ties_present = present;
        self.ties_correction_applied = corrected;
        self
    }

    /// Replace the generated interpretation
    pub(crate) fn interpretation(mut self, text: impl Into<String>) -> Self {
        self.interpretation = Some(text.into());
        self
    }

    pub(crate) fn recommend(mut self, text: impl Into<String>) -> Self {
        self.recommendations.push(text.into());
        self
    }

    pub(crate) fn recommend_if(self, condition: bool, text: impl Into<String>) -> Self {
        if condition {
            self.recommend(text)
        } else {
            self
        }
    }

    pub(crate) fn extra(mut self, key: &'static str, value: RawExtra) -> Self {
        self.extras.push((key, value));
        self
    }

    pub(crate) fn extra_float(self, key: &'static str, value: f64) -> Self {
        self.extra(key, RawExtra::Float(value))
    }

    pub(crate) fn extra_opt(self, key: &'static str, value: Option<f64>) -> Self {
        match value {
            Some(v) => self.extra_float(key, v),
            None => self,
        }
    }

    /// Attach z-score, F statistic and degrees of freedom carried by the
    /// p-value
    pub(crate) fn p_value_details(self) -> Self {
        let p = self.p_value.clone();
        self.extra_opt("z_score", p.z_score)
            .extra_opt("f_statistic", p.f_statistic)
            .extra_opt("df", p.df)
            .extra_opt("df_denominator", p.df_denominator)
    }

    pub(crate) fn p_value(&self) -> f64 {
        self.p_value.value
    }

    pub(crate) fn build(
        self,
        precision: &Precision,
        alpha: f64,
        findings: &Findings,
    ) -> Result<TestResult> {
        let significant = self.p_value.value < alpha;
        let interpretation = match self.interpretation {
            Some(text) => text,
            None => crate::interpretation::describe(
                findings,
                self.p_value.value,
                alpha,
                self.effect_size.as_ref(),
            ),
        };

        let decimals = |values: &[f64]| -> Result<Vec<BigDecimal>> {
            values.iter().map(|&v| precision.decimal(v)).collect()
        };

        let mut extras = BTreeMap::new();
        for (key, value) in self.extras {
            let value = match value {
                RawExtra::Float(v) => ResultValue::Decimal(precision.decimal(v)?),
                RawExtra::Count(c) => ResultValue::Integer(c as u64),
                RawExtra::Flag(b) => ResultValue::Flag(b),
                RawExtra::Text(t) => ResultValue::Text(t),
                RawExtra::Floats(v) => ResultValue::Decimals(decimals(&v)?),
                RawExtra::Counts(v) => {
                    ResultValue::Integers(v.into_iter().map(|c| c as u64).collect())
                }
            };
            extras.insert(key.to_string(), value);
        }

        Ok(TestResult {
            test_name: self.test_name,
            statistic: precision.decimal(self.statistic)?,
            p_value: self.p_value.decimal(precision)?,
            p_value_method: self.p_value.source,
            alternative: self.alternative,
            sample_sizes: self.sample_sizes,
            effect_size: self
                .effect_size
                .as_ref()
                .map(|e| ReportedEffect::new(e, precision))
                .transpose()?,
            mean_ranks: self.mean_ranks.as_deref().map(decimals).transpose()?,
            rank_sums: self.rank_sums.as_deref().map(decimals).transpose()?,
            ties_present: self.ties_present,
            ties_correction_applied: self.ties_correction_applied,
            alpha: precision.decimal(alpha)?,
            significant,
            interpretation,
            recommendations: self.recommendations,
            extras,
            raw: RawValues {
                statistic: self.statistic,
                p_value: self.p_value.value,
            },
        })
    }
}

/// What a test concludes in each outcome
#[derive(Debug, Clone, Copy)]
pub(crate) struct Findings {
    pub significant: &'static str,
    pub not_significant: &'static str,
}

/// One pairwise comparison of a post-hoc test
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairwiseComparison {
    /// First group label
    pub group_a: String,
    /// Second group label
    pub group_b: String,
    /// Mean rank of `group_a` minus mean rank of `group_b`
    pub mean_rank_difference: BigDecimal,
    /// Standardized absolute mean-rank difference
    pub z_statistic: BigDecimal,
    /// Unadjusted two-sided p-value
    pub p_value: BigDecimal,
    /// P-value after multiple-comparison correction
    pub adjusted_p_value: BigDecimal,
    /// `adjusted_p_value < alpha`
    pub significant: bool,
}

impl PairwiseComparison {
    /// `"{group_a}_vs_{group_b}"`
    pub fn label(&self) -> String {
        format!("{}_vs_{}", self.group_a, self.group_b)
    }
}

/// Outcome of a post-hoc multiple comparison procedure
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostHocResult {
    /// Name of the procedure
    pub test_name: &'static str,
    /// Comparisons keyed by their label, in pair order
    #[serde(serialize_with = "comparisons_by_label")]
    pub comparisons: Vec<PairwiseComparison>,
    /// Correction applied to the raw p-values
    pub correction_method: CorrectionMethod,
    /// Group labels in input order
    pub group_labels: Vec<String>,
    /// Mean rank of each group in the pooled ranking
    pub mean_ranks: Vec<BigDecimal>,
    /// Size of each group
    pub sample_sizes: Vec<usize>,
    /// Whether the pooled data contain ties
    pub ties_present: bool,
    /// Significance threshold
    pub alpha: BigDecimal,
    /// Whether any adjusted p-value is below `alpha`
    pub overall_significance: bool,
    /// Plain-language summary
    pub interpretation: String,
}

fn comparisons_by_label<S: Serializer>(
    comparisons: &[PairwiseComparison],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(comparisons.len()))?;
    for comparison in comparisons {
        map.serialize_entry(&comparison.label(), comparison)?;
    }
    map.end()
}

impl PostHocResult {
    /// Find a comparison by its `"A_vs_B"` label
    pub fn comparison(&self, label: &str) -> Option<&PairwiseComparison> {
        self.comparisons.iter().find(|c| c.label() == label)
    }

    /// Comparisons whose adjusted p-value is below `alpha`
    pub fn significant_pairs(&self) -> impl Iterator<Item = &PairwiseComparison> {
        self.comparisons.iter().filter(|c| c.significant)
    }

    /// JSON form of the record
    pub fn to_json(&self) -> Result<serde_json::Value> {
        serde_json::to_value(self)
            .map_err(|e| Error::Computation(format!("failed to serialize result: {e}")))
    }
}
