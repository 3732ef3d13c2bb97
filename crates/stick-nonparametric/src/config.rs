//! Configuration for the test procedures

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use stick_core::{Error, Precision, Result};
use stick_correction::CorrectionMethod;
use stick_pvalue::{ExactVsAsymptoticPolicy, PValueMethod};

/// Handling of zero differences in the Wilcoxon signed-rank test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZeroMethod {
    /// Drop zero differences before ranking
    #[default]
    Wilcox,
    /// Rank zero differences with the others, then drop their ranks
    Pratt,
}

impl ZeroMethod {
    /// Canonical name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Wilcox => "wilcox",
            Self::Pratt => "pratt",
        }
    }
}

impl FromStr for ZeroMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wilcox" => Ok(Self::Wilcox),
            "pratt" => Ok(Self::Pratt),
            _ => Err(Error::unsupported("zero method", s)),
        }
    }
}

impl fmt::Display for ZeroMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where Mood's median test counts observations equal to the grand median
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MedianTies {
    /// Count them as below the median
    #[default]
    Below,
    /// Count them as above the median
    Above,
    /// Leave them out of the table
    Ignore,
}

impl MedianTies {
    /// Canonical name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Below => "below",
            Self::Above => "above",
            Self::Ignore => "ignore",
        }
    }
}

impl FromStr for MedianTies {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "below" => Ok(Self::Below),
            "above" => Ok(Self::Above),
            "ignore" => Ok(Self::Ignore),
            _ => Err(Error::unsupported("median ties method", s)),
        }
    }
}

impl fmt::Display for MedianTies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Settings shared by every procedure
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NonParametricConfig {
    /// Significant digits of reported decimals
    pub precision: Precision,
    /// Significance threshold
    pub alpha: f64,
    /// Exact or asymptotic p-values
    pub p_value_method: PValueMethod,
    /// ±0.5 continuity correction for normal approximations of discrete
    /// statistics (and Yates' correction for two-sample median tests)
    pub continuity_correction: bool,
    /// Default correction for post-hoc comparisons
    pub correction: CorrectionMethod,
    /// Wilcoxon zero handling
    pub zero_method: ZeroMethod,
    /// Mood's median tie handling
    pub median_ties: MedianTies,
}

impl Default for NonParametricConfig {
    fn default() -> Self {
        Self {
            precision: Precision::default(),
            alpha: 0.05,
            p_value_method: PValueMethod::Auto,
            continuity_correction: true,
            correction: CorrectionMethod::Bonferroni,
            zero_method: ZeroMethod::Wilcox,
            median_ties: MedianTies::Below,
        }
    }
}

impl NonParametricConfig {
    /// Default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the decimal precision
    pub fn with_precision(mut self, precision: Precision) -> Self {
        self.precision = precision;
        self
    }

    /// Set the significance threshold
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set the p-value method
    pub fn with_p_value_method(mut self, method: PValueMethod) -> Self {
        self.p_value_method = method;
        self
    }

    /// Enable or disable continuity correction
    pub fn with_continuity_correction(mut self, enabled: bool) -> Self {
        self.continuity_correction = enabled;
        self
    }

    /// Set the post-hoc correction method
    pub fn with_correction(mut self, correction: CorrectionMethod) -> Self {
        self.correction = correction;
        self
    }

    /// Set the Wilcoxon zero handling
    pub fn with_zero_method(mut self, zero_method: ZeroMethod) -> Self {
        self.zero_method = zero_method;
        self
    }

    /// Set Mood's median tie handling
    pub fn with_median_ties(mut self, median_ties: MedianTies) -> Self {
        self.median_ties = median_ties;
        self
    }

    /// Check the configuration
    pub fn validate(&self) -> Result<()> {
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(Error::InvalidParameter(format!(
                "alpha must lie in (0, 1), got {}",
                self.alpha
            )));
        }
        Ok(())
    }

    /// Parse and validate a configuration from JSON
    ///
    /// Missing fields take their default values.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| Error::InvalidParameter(format!("invalid configuration: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// P-value policy described by this configuration
    pub fn policy(&self) -> ExactVsAsymptoticPolicy {
        ExactVsAsymptoticPolicy::new(self.p_value_method, self.continuity_correction)
    }
}
