//! Effect size measures for rank-based tests
//!
//! Every non-parametric procedure reports an effect size next to its
//! p-value. The measures here are derived from the test statistic the
//! procedure already computed, through the [`FromStatistic`] trait, so the
//! two can never disagree.
//!
//! | Test | Measure | Range |
//! |---|---|---|
//! | Mann-Whitney U | rank-biserial r | [−1, 1] |
//! | Wilcoxon signed-rank | matched-pairs rank-biserial r | [−1, 1] |
//! | Kruskal-Wallis | epsilon-squared | [0, 1] |
//! | Friedman | Kendall's W | [0, 1] |
//! | Mood's median | Cramér's V | [0, 1] |
//! | Sign test | sign proportion | [0, 1] |
//! | Jonckheere-Terpstra, Page | normalized J / L | [0, 1] |
//!
//! ```rust
//! use stick_effect::{FromStatistic, RankBiserial, RankSumStatistic};
//!
//! let stat = RankSumStatistic { u1: 2.0, n1: 4, n2: 4 };
//! let r = RankBiserial::new().from_statistic(&stat).unwrap();
//! assert_eq!(r.magnitude, 0.75);
//! ```

mod association;
mod concordance;
mod proportion;
mod rank_biserial;
mod traits;
mod trend;
mod types;
mod variance_explained;

pub use association::{ContingencyStatistic, CramersV};
pub use concordance::{FriedmanStatistic, KendallsW};
pub use proportion::{SignCounts, SignProportion};
pub use rank_biserial::{
    MatchedPairsRankBiserial, RankBiserial, RankSumStatistic, SignedRankStatistic,
};
pub use traits::{EffectSizeEstimator, FromStatistic};
pub use trend::{NormalizedTrend, TrendStatistic};
pub use types::{EffectSize, EffectSizeInterpretation, EffectSizeType};
pub use variance_explained::{EpsilonSquared, HStatistic};
