//! Race result row model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::normalize::valid_seconds;

/// A single row from the `swim_results` table.
///
/// Everything is stored as free text by the out-of-band ingestion process;
/// this application tolerates the noise rather than validating it away.
/// `race_date` is an 8-digit date-like string (`YYYYMMDD`) used both as a
/// date and as a lexicographic sort key.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct RaceResult {
    pub race_date: String,

    /// Free text, inconsistent formatting across years.
    pub meet_name: String,

    /// Free text combining age group, distance, and stroke.
    pub event_name: String,

    /// Free text race time ("SS.ss" or "MM:SS.ss"); occasionally unparseable.
    pub result_time: String,

    pub finish_rank: Option<String>,

    pub lane: Option<String>,

    /// Free text or numeric string.
    pub division: Option<String>,

    /// Exact string, the join key.
    pub swimmer_name: String,

    pub gender: Option<String>,

    pub birth_year: Option<String>,
}

impl RaceResult {
    /// Parsed race time, or `None` when the result is unusable
    /// (unparseable, zero, or negative).
    pub fn seconds(&self) -> Option<f64> {
        valid_seconds(&self.result_time)
    }

    /// Birth year as a number, when the column holds one.
    pub fn birth_year_num(&self) -> Option<i32> {
        self.birth_year.as_deref()?.trim().parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(result_time: &str) -> RaceResult {
        RaceResult {
            race_date: "20230601".to_string(),
            meet_name: "Harbor City Open".to_string(),
            event_name: "50 meter breaststroke".to_string(),
            result_time: result_time.to_string(),
            finish_rank: None,
            lane: None,
            division: None,
            swimmer_name: "A".to_string(),
            gender: None,
            birth_year: None,
        }
    }

    #[test]
    fn test_seconds() {
        assert_eq!(row("31.50").seconds(), Some(31.5));
        assert_eq!(row("1:05.00").seconds(), Some(65.0));
        assert_eq!(row("DQ").seconds(), None);
        assert_eq!(row("0").seconds(), None);
    }

    #[test]
    fn test_birth_year_num() {
        let mut r = row("31.50");
        r.birth_year = Some("2012".to_string());
        assert_eq!(r.birth_year_num(), Some(2012));
        r.birth_year = Some("unknown".to_string());
        assert_eq!(r.birth_year_num(), None);
        r.birth_year = None;
        assert_eq!(r.birth_year_num(), None);
    }
}
