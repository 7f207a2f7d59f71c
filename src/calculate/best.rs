//! Personal-best reduction.

use serde::Serialize;

use crate::models::RaceResult;
use crate::normalize::MeetNormalizer;

/// A swimmer's best mark in one event.
#[derive(Debug, Clone, Serialize)]
pub struct PersonalBest {
    pub seconds: f64,
    pub meet_name: String,
    pub race_date: String,
}

/// Reduce a record sequence to the single best mark, or `None` when no
/// record parses to a positive time.
///
/// Short-course / winter meets are skipped: their times are not comparable
/// to standard-course results. They still count toward meet counts and
/// averages elsewhere. Ties on time resolve to the earliest `race_date`.
pub fn personal_best<'a, I>(rows: I, normalizer: &MeetNormalizer) -> Option<PersonalBest>
where
    I: IntoIterator<Item = &'a RaceResult>,
{
    let mut best: Option<PersonalBest> = None;
    for row in rows {
        if normalizer.is_short_course(&row.meet_name) {
            continue;
        }
        let Some(seconds) = row.seconds() else {
            continue;
        };
        let better = match &best {
            None => true,
            Some(b) => {
                seconds < b.seconds
                    || (seconds == b.seconds && row.race_date < b.race_date)
            }
        };
        if better {
            best = Some(PersonalBest {
                seconds,
                meet_name: row.meet_name.clone(),
                race_date: row.race_date.clone(),
            });
        }
    }
    best
}
