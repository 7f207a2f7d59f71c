//! Statistics over race results.
//!
//! Pure reductions, no I/O:
//! - **best**: personal-best selection with the short-course exclusion
//! - **ranking**: opponent pools, rank, percentile, leaderboards
//! - **scoring**: World Aquatics points

pub mod best;
pub mod ranking;
pub mod scoring;

pub use best::{personal_best, PersonalBest};
pub use ranking::{build_ranking, PoolPolicy, RankedSwimmer, Ranking, RankingOptions, SeriesPoint};
pub use scoring::WaBaseTable;

/// Round to one decimal, the precision used in API responses.
pub fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round1() {
        assert_eq!(round1(66.666_666), 66.7);
        assert_eq!(round1(100.0), 100.0);
        assert_eq!(round1(0.04), 0.0);
    }
}
