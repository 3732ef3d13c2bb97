//! Alternative hypotheses

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Direction of the alternative hypothesis
///
/// `Greater` means the first sample (or, for trend tests, the later groups)
/// tends to take larger values than the second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Alternative {
    /// Difference in either direction
    #[default]
    #[serde(alias = "two_sided")]
    TwoSided,
    /// First sample stochastically smaller
    Less,
    /// First sample stochastically larger
    Greater,
}

impl Alternative {
    /// Canonical name as accepted by [`FromStr`]
    pub fn name(&self) -> &'static str {
        match self {
            Self::TwoSided => "two-sided",
            Self::Less => "less",
            Self::Greater => "greater",
        }
    }

    /// Whether this alternative is one-sided
    pub fn is_one_sided(&self) -> bool {
        !matches!(self, Self::TwoSided)
    }
}

impl FromStr for Alternative {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "two-sided" | "two_sided" | "two.sided" => Ok(Self::TwoSided),
            "less" => Ok(Self::Less),
            "greater" => Ok(Self::Greater),
            _ => Err(Error::unsupported("alternative", s)),
        }
    }
}

impl fmt::Display for Alternative {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_alternatives() {
        assert_eq!("two-sided".parse::<Alternative>().unwrap(), Alternative::TwoSided);
        assert_eq!("two_sided".parse::<Alternative>().unwrap(), Alternative::TwoSided);
        assert_eq!("Less".parse::<Alternative>().unwrap(), Alternative::Less);
        assert_eq!("greater".parse::<Alternative>().unwrap(), Alternative::Greater);
    }

    #[test]
    fn test_unknown_alternative_is_named() {
        let err = "upward".parse::<Alternative>().unwrap_err();
        assert_eq!(
            err,
            Error::UnsupportedOption {
                option: "alternative",
                value: "upward".to_string()
            }
        );
    }

    #[test]
    fn test_display_round_trips() {
        for alt in [Alternative::TwoSided, Alternative::Less, Alternative::Greater] {
            assert_eq!(alt.to_string().parse::<Alternative>().unwrap(), alt);
        }
        assert!(!Alternative::TwoSided.is_one_sided());
        assert!(Alternative::Greater.is_one_sided());
    }
}
