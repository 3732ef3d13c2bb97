//! Test procedures, one module per test

mod dunn;
mod friedman;
mod jonckheere;
mod kruskal_wallis;
mod mann_whitney;
mod mood_median;
mod page;
mod sign;
mod wilcoxon;

pub use dunn::DunnTest;
pub use friedman::Friedman;
pub use jonckheere::JonckheereTerpstra;
pub use kruskal_wallis::KruskalWallis;
pub use mann_whitney::MannWhitneyU;
pub use mood_median::MoodMedian;
pub use page::PageTrend;
pub use sign::SignTest;
pub use wilcoxon::WilcoxonSignedRank;

pub(crate) use friedman::{block_ranks, friedman_statistic};
pub(crate) use kruskal_wallis::h_statistic;
pub(crate) use mann_whitney::rank_sum_statistic;
