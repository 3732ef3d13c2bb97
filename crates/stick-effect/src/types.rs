//! Types for effect size representation

use std::fmt;

use serde::{Deserialize, Serialize};

/// Families of effect sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EffectSizeType {
    /// Dominance correlation between two samples (rank-biserial r)
    Dominance,
    /// Proportion of rank variance explained by grouping (epsilon-squared)
    VarianceExplained,
    /// Agreement of rankings across blocks (Kendall's W)
    Concordance,
    /// Association in a contingency table (Cramér's V)
    Association,
    /// Imbalance between positive and negative signs
    Proportion,
    /// Trend statistic rescaled to [0, 1], 0.5 = no trend
    Trend,
}

impl EffectSizeType {
    /// Get the name of the effect size type
    pub fn name(&self) -> &'static str {
        match self {
            Self::Dominance => "Dominance",
            Self::VarianceExplained => "Variance Explained",
            Self::Concordance => "Concordance",
            Self::Association => "Association",
            Self::Proportion => "Proportion",
            Self::Trend => "Trend",
        }
    }

    /// Range every valid value of this type lies in
    pub fn typical_range(&self) -> (f64, f64) {
        match self {
            Self::Dominance => (-1.0, 1.0),
            Self::VarianceExplained
            | Self::Concordance
            | Self::Association
            | Self::Proportion
            | Self::Trend => (0.0, 1.0),
        }
    }

    /// Clamp a computed value into [`typical_range`](Self::typical_range)
    ///
    /// Only float rounding can push a value outside the range.
    pub fn clamp(&self, value: f64) -> f64 {
        let (lo, hi) = self.typical_range();
        value.clamp(lo, hi)
    }
}

/// An effect size measurement with magnitude and interpretation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectSize {
    /// Measure name, e.g. `rank_biserial_r`
    pub name: &'static str,
    /// The effect size magnitude
    pub magnitude: f64,
    /// The type of effect size
    pub effect_type: EffectSizeType,
    /// Interpretation of the magnitude
    pub interpretation: EffectSizeInterpretation,
    /// Sample sizes the effect was computed from
    pub sample_sizes: Vec<usize>,
}

impl EffectSize {
    /// Create a new effect size, clamped to the range of its type
    pub fn new(
        name: &'static str,
        magnitude: f64,
        effect_type: EffectSizeType,
        sample_sizes: Vec<usize>,
    ) -> Self {
        let magnitude = effect_type.clamp(magnitude);
        let interpretation = EffectSizeInterpretation::from_magnitude(magnitude, effect_type);

        Self {
            name,
            magnitude,
            effect_type,
            interpretation,
            sample_sizes,
        }
    }

    /// Get the absolute magnitude
    pub fn abs_magnitude(&self) -> f64 {
        self.magnitude.abs()
    }

    /// Check if the effect size is practically significant
    pub fn is_practically_significant(&self) -> bool {
        matches!(
            self.interpretation,
            EffectSizeInterpretation::Medium | EffectSizeInterpretation::Large
        )
    }
}

impl fmt::Display for EffectSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {:.3} ({})",
            self.name, self.magnitude, self.interpretation
        )
    }
}

/// Interpretation of effect size magnitude
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectSizeInterpretation {
    /// Negligible effect (very small)
    Negligible,
    /// Small effect
    Small,
    /// Medium effect
    Medium,
    /// Large effect
    Large,
}

impl EffectSizeInterpretation {
    /// Get interpretation from magnitude based on effect size type
    pub fn from_magnitude(magnitude: f64, effect_type: EffectSizeType) -> Self {
        let abs_magnitude = magnitude.abs();

        let (small, medium, large) = match effect_type {
            // Cohen's conventions for correlations
            EffectSizeType::Dominance
            | EffectSizeType::Concordance
            | EffectSizeType::Association
            | EffectSizeType::Proportion => (0.1, 0.3, 0.5),
            // Tomczak & Tomczak (2014) for epsilon-squared
            EffectSizeType::VarianceExplained => (0.01, 0.08, 0.26),
            EffectSizeType::Trend => {
                // Distance from the no-trend midpoint, as for CLES
                let distance = (abs_magnitude - 0.5).abs();
                return Self::bucket(distance, (0.06, 0.14, 0.21));
            }
        };
        Self::bucket(abs_magnitude, (small, medium, large))
    }

    fn bucket(value: f64, (small, medium, large): (f64, f64, f64)) -> Self {
        if value < small {
            Self::Negligible
        } else if value < medium {
            Self::Small
        } else if value < large {
            Self::Medium
        } else {
            Self::Large
        }
    }

    /// Lowercase label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Negligible => "negligible",
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

impl fmt::Display for EffectSizeInterpretation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dominance_interpretation() {
        let cases = [
            (0.05, EffectSizeInterpretation::Negligible),
            (-0.2, EffectSizeInterpretation::Small),
            (0.4, EffectSizeInterpretation::Medium),
            (-0.9, EffectSizeInterpretation::Large),
        ];
        for (magnitude, expected) in cases {
            assert_eq!(
                EffectSizeInterpretation::from_magnitude(magnitude, EffectSizeType::Dominance),
                expected
            );
        }
    }

    #[test]
    fn test_variance_explained_interpretation() {
        assert_eq!(
            EffectSizeInterpretation::from_magnitude(0.005, EffectSizeType::VarianceExplained),
            EffectSizeInterpretation::Negligible
        );
        assert_eq!(
            EffectSizeInterpretation::from_magnitude(0.1, EffectSizeType::VarianceExplained),
            EffectSizeInterpretation::Medium
        );
        assert_eq!(
            EffectSizeInterpretation::from_magnitude(0.3, EffectSizeType::VarianceExplained),
            EffectSizeInterpretation::Large
        );
    }

    #[test]
    fn test_trend_interpretation_centres_on_half() {
        assert_eq!(
            EffectSizeInterpretation::from_magnitude(0.52, EffectSizeType::Trend),
            EffectSizeInterpretation::Negligible
        );
        assert_eq!(
            EffectSizeInterpretation::from_magnitude(0.05, EffectSizeType::Trend),
            EffectSizeInterpretation::Large
        );
    }

    #[test]
    fn test_new_clamps_into_range() {
        let e = EffectSize::new("w", 1.0000000000000002, EffectSizeType::Concordance, vec![5, 3]);
        assert_eq!(e.magnitude, 1.0);
        let e = EffectSize::new("eps", -1e-17, EffectSizeType::VarianceExplained, vec![9]);
        assert_eq!(e.magnitude, 0.0);
    }

    #[test]
    fn test_effect_size_display() {
        let effect_size = EffectSize::new("kendalls_w", 0.6, EffectSizeType::Concordance, vec![10, 4]);
        let display = format!("{}", effect_size);
        assert!(display.contains("kendalls_w"));
        assert!(display.contains("0.600"));
        assert!(display.contains("large"));
        assert!(effect_size.is_practically_significant());
    }
}
