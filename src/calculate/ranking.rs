//! Opponent-pool construction and ranking.
//!
//! Given every row for an event, build the comparison pool for a target
//! swimmer under the configured membership policy, compute each member's
//! personal best, and report rank, percentile, leaderboard, a neighborhood
//! window, and the pool leader's history.

use std::collections::{HashMap, HashSet};

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calculate::best::personal_best;
use crate::calculate::round1;
use crate::models::RaceResult;
use crate::normalize::MeetNormalizer;

/// Pool membership policy.
///
/// The source iterations never settled on one; this is a configuration
/// choice (`[ranking] policy`), not a behavior to infer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PoolPolicy {
    /// Everyone with at least one row in the event.
    #[default]
    SharedEvent,
    /// Candidates sharing at least one (date, meet) row with the target in
    /// this event. A non-numeric division on the shared row must also match
    /// the target's division for that row.
    CoOccurrence,
    /// Same gender, birth year within the configured window.
    Demographic,
}

/// Knobs for one ranking computation.
#[derive(Debug, Clone)]
pub struct RankingOptions {
    pub policy: PoolPolicy,
    /// Birth-year tolerance for the demographic policy.
    pub age_window: i32,
    /// Restrict PB computation to the last N months before the target's
    /// most recent race in the event.
    pub months_back: Option<u32>,
    /// Leaderboard length.
    pub top_k: usize,
    /// Neighborhood half-width around the target's rank.
    pub window: usize,
}

impl Default for RankingOptions {
    fn default() -> Self {
        Self {
            policy: PoolPolicy::default(),
            age_window: 2,
            months_back: None,
            top_k: 10,
            window: 2,
        }
    }
}

/// One leaderboard entry.
#[derive(Debug, Clone, Serialize)]
pub struct RankedSwimmer {
    pub rank: u32,
    pub name: String,
    pub pb_seconds: f64,
    pub pb_meet: String,
    pub pb_date: String,
}

/// One point of a time series (raw history or per-date best).
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SeriesPoint {
    pub date: String,
    pub seconds: f64,
}

/// Ranking output for one (target, event) pair.
#[derive(Debug, Clone, Serialize)]
pub struct Ranking {
    /// Pool members with at least one valid eligible time.
    pub denominator: u32,
    pub rank: Option<u32>,
    pub percentile: Option<f64>,
    pub top: Vec<RankedSwimmer>,
    pub you: Option<RankedSwimmer>,
    /// Entries within `window` ranks of the target.
    pub window: Vec<RankedSwimmer>,
    /// Full valid history of the pool leader, ascending by date.
    pub leader_series: Vec<SeriesPoint>,
}

/// Rank `target` against the pool drawn from `rows` (all rows for one
/// event, every swimmer).
///
/// A target with no valid eligible time yields null rank/percentile while
/// the denominator and leaderboard still describe the pool.
pub fn build_ranking(
    target: &str,
    rows: &[RaceResult],
    opts: &RankingOptions,
    normalizer: &MeetNormalizer,
) -> Ranking {
    let target_rows: Vec<&RaceResult> = rows
        .iter()
        .filter(|r| r.swimmer_name == target)
        .collect();

    let members = pool_members(target, rows, &target_rows, opts);
    let cutoff = opts
        .months_back
        .and_then(|m| months_back_cutoff(&target_rows, m));

    let mut by_name: HashMap<&str, Vec<&RaceResult>> = HashMap::new();
    for r in rows {
        if !members.contains(r.swimmer_name.as_str()) {
            continue;
        }
        if let Some(cut) = &cutoff {
            if r.race_date.as_str() < cut.as_str() {
                continue;
            }
        }
        by_name.entry(r.swimmer_name.as_str()).or_default().push(r);
    }

    let mut board: Vec<RankedSwimmer> = by_name
        .iter()
        .filter_map(|(name, member_rows)| {
            personal_best(member_rows.iter().copied(), normalizer).map(|pb| RankedSwimmer {
                rank: 0,
                name: name.to_string(),
                pb_seconds: pb.seconds,
                pb_meet: pb.meet_name,
                pb_date: pb.race_date,
            })
        })
        .collect();

    // Ascending by time; equal PBs order by name so ranks are deterministic.
    board.sort_by(|a, b| {
        a.pb_seconds
            .partial_cmp(&b.pb_seconds)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });
    for (i, entry) in board.iter_mut().enumerate() {
        entry.rank = i as u32 + 1;
    }

    let denominator = board.len() as u32;
    let you = board.iter().find(|e| e.name == target).cloned();
    let rank = you.as_ref().map(|e| e.rank);
    let percentile = rank.map(|r| {
        round1(100.0 * (denominator - r + 1) as f64 / denominator as f64)
    });

    let window = match rank {
        Some(r) => {
            let lo = r.saturating_sub(opts.window as u32).max(1);
            let hi = r + opts.window as u32;
            board
                .iter()
                .filter(|e| e.rank >= lo && e.rank <= hi)
                .cloned()
                .collect()
        }
        None => Vec::new(),
    };

    let leader_series = board
        .first()
        .map(|leader| {
            let mut series: Vec<SeriesPoint> = rows
                .iter()
                .filter(|r| r.swimmer_name == leader.name)
                .filter_map(|r| {
                    r.seconds().map(|seconds| SeriesPoint {
                        date: r.race_date.clone(),
                        seconds,
                    })
                })
                .collect();
            series.sort_by(|a, b| {
                a.date.cmp(&b.date).then_with(|| {
                    a.seconds
                        .partial_cmp(&b.seconds)
                        .unwrap_or(std::cmp::Ordering::Equal)
                })
            });
            series
        })
        .unwrap_or_default();

    let top: Vec<RankedSwimmer> = board.iter().take(opts.top_k).cloned().collect();

    Ranking {
        denominator,
        rank,
        percentile,
        top,
        you,
        window,
        leader_series,
    }
}

fn pool_members<'a>(
    target: &'a str,
    rows: &'a [RaceResult],
    target_rows: &[&'a RaceResult],
    opts: &RankingOptions,
) -> HashSet<&'a str> {
    let mut members: HashSet<&str> = HashSet::new();
    members.insert(target);

    match opts.policy {
        PoolPolicy::SharedEvent => {
            members.extend(rows.iter().map(|r| r.swimmer_name.as_str()));
        }
        PoolPolicy::CoOccurrence => {
            // Target's division on each (date, meet) it raced.
            let mut shared: HashMap<(&str, &str), Option<&str>> = HashMap::new();
            for r in target_rows {
                shared
                    .entry((r.race_date.as_str(), r.meet_name.as_str()))
                    .or_insert(r.division.as_deref());
            }
            for r in rows {
                if r.swimmer_name == target {
                    continue;
                }
                let key = (r.race_date.as_str(), r.meet_name.as_str());
                let Some(target_division) = shared.get(&key) else {
                    continue;
                };
                let numeric = r
                    .division
                    .as_deref()
                    .map(is_purely_numeric)
                    .unwrap_or(false);
                if numeric || r.division.as_deref() == *target_division {
                    members.insert(r.swimmer_name.as_str());
                }
            }
        }
        PoolPolicy::Demographic => {
            let gender = target_rows
                .iter()
                .find_map(|r| r.gender.as_deref().filter(|g| !g.trim().is_empty()));
            let birth_year = target_rows.iter().find_map(|r| r.birth_year_num());
            let (Some(gender), Some(birth_year)) = (gender, birth_year) else {
                // Sparse demographics: nothing to compare against.
                return members;
            };
            for r in rows {
                if r.swimmer_name == target {
                    continue;
                }
                let same_gender = r.gender.as_deref() == Some(gender);
                let close_enough = r
                    .birth_year_num()
                    .map(|y| (y - birth_year).abs() <= opts.age_window)
                    .unwrap_or(false);
                if same_gender && close_enough {
                    members.insert(r.swimmer_name.as_str());
                }
            }
        }
    }
    members
}

fn is_purely_numeric(s: &str) -> bool {
    let t = s.trim();
    !t.is_empty() && t.chars().all(|c| c.is_ascii_digit())
}

/// Cutoff date string (`YYYYMMDD`) N months before the target's most
/// recent race. `None` when the target has no parseable race date.
fn months_back_cutoff(target_rows: &[&RaceResult], months: u32) -> Option<String> {
    let latest = target_rows.iter().map(|r| r.race_date.as_str()).max()?;
    let date = NaiveDate::parse_from_str(latest, "%Y%m%d").ok()?;
    let cutoff = date.checked_sub_months(Months::new(months))?;
    Some(cutoff.format("%Y%m%d").to_string())
}
