use std::collections::BTreeMap;

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::{required, ApiError, CursorPage};
use crate::calculate::{personal_best, SeriesPoint};
use crate::models::{RaceResult, StrokeFamily};
use crate::store::like_pattern;

#[derive(Debug, Deserialize)]
pub struct SummaryParams {
    pub name: Option<String>,
    pub event: Option<String>,
    pub limit: Option<u32>,
    pub cursor: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResultItem {
    pub race_date: String,
    pub meet_name: String,
    /// Short display label from the meet-name normalizer.
    pub meet_label: String,
    pub event_name: String,
    pub swimmer_name: String,
    pub seconds: f64,
}

#[derive(Debug, Serialize)]
pub struct Analysis {
    /// Rows with a usable time, short-course included.
    pub meet_count: u32,
    pub avg_seconds: Option<f64>,
    /// Best eligible time; short-course excluded.
    pub pb_seconds: Option<f64>,
    pub pb_meet: Option<String>,
    pub pb_date: Option<String>,
    pub wa_points: Option<u32>,
}

#[derive(Debug, Serialize, Default)]
pub struct FamilyStat {
    pub count: u32,
    pub most_distance: Option<u32>,
    pub most_count: Option<u32>,
    pub pb_seconds: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct TrendSeries {
    pub points: Vec<SeriesPoint>,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub items: Vec<ResultItem>,
    pub next_cursor: Option<u32>,
    pub analysis: Analysis,
    pub family: BTreeMap<&'static str, FamilyStat>,
    pub trend: TrendSeries,
    pub leader_trend: TrendSeries,
}

/// One swimmer's record in one event: raw listing (paginated), aggregate
/// analysis, per-stroke breakdown, and year-over-year trend lines.
pub async fn summary(
    State(state): State<AppState>,
    Query(params): Query<SummaryParams>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let name = required(&params.name, "name")?;
    let event = required(&params.event, "event")?;
    let page = CursorPage::new(params.limit, params.cursor);
    let pattern = like_pattern(event);

    let swimmer_rows = state
        .store
        .results_for_swimmer_event(name, &pattern)
        .await?;

    // Raw listing keeps only rows with a usable time, in query order
    // (ascending by date).
    let items_all: Vec<ResultItem> = swimmer_rows
        .iter()
        .filter_map(|r| {
            r.seconds().map(|seconds| ResultItem {
                race_date: r.race_date.clone(),
                meet_name: r.meet_name.clone(),
                meet_label: state.normalizer.simplify(&r.meet_name),
                event_name: r.event_name.clone(),
                swimmer_name: r.swimmer_name.clone(),
                seconds,
            })
        })
        .collect();
    let (page_items, next_cursor) = page.slice(&items_all);

    let secs: Vec<f64> = items_all.iter().map(|i| i.seconds).collect();
    let avg_seconds = if secs.is_empty() {
        None
    } else {
        Some(secs.iter().sum::<f64>() / secs.len() as f64)
    };

    let pb = personal_best(swimmer_rows.iter(), &state.normalizer);
    let gender = swimmer_rows
        .iter()
        .find_map(|r| r.gender.as_deref().filter(|g| !g.trim().is_empty()));
    let wa_points = match (&pb, gender) {
        (Some(pb), Some(g)) => state.wa_bases.points(pb.seconds, g, event),
        _ => None,
    };

    let analysis = Analysis {
        meet_count: items_all.len() as u32,
        avg_seconds,
        pb_seconds: pb.as_ref().map(|p| p.seconds),
        pb_meet: pb.as_ref().map(|p| p.meet_name.clone()),
        pb_date: pb.as_ref().map(|p| p.race_date.clone()),
        wa_points,
    };

    let all_person_rows = state.store.results_for_swimmer(name).await?;
    let family = family_breakdown(&all_person_rows, &state);

    let trend = TrendSeries {
        points: best_per_date(swimmer_rows.iter()),
    };

    let event_rows = state.store.results_for_event(&pattern).await?;
    let leader_trend = TrendSeries {
        points: best_per_date(event_rows.iter()),
    };

    Ok(Json(SummaryResponse {
        items: page_items.to_vec(),
        next_cursor,
        analysis,
        family,
        trend,
        leader_trend,
    }))
}

/// Per stroke family across every event the swimmer raced: valid-row
/// count, most-swum distance, and PB.
fn family_breakdown(
    rows: &[RaceResult],
    state: &AppState,
) -> BTreeMap<&'static str, FamilyStat> {
    let mut grouped: BTreeMap<&'static str, Vec<&RaceResult>> = BTreeMap::new();
    for row in rows {
        if row.seconds().is_none() {
            continue;
        }
        if let Some(stroke) = state.classifier.stroke(&row.event_name) {
            grouped.entry(stroke.as_str()).or_default().push(row);
        }
    }

    let mut out = BTreeMap::new();
    for family in StrokeFamily::DISPLAY {
        let rows = grouped.remove(family.as_str()).unwrap_or_default();
        let mut dist_counts: BTreeMap<u32, u32> = BTreeMap::new();
        for row in &rows {
            if let Some(d) = state.classifier.distance(&row.event_name) {
                *dist_counts.entry(d).or_default() += 1;
            }
        }
        // Most-swum distance; ties go to the shorter one.
        let most = dist_counts
            .iter()
            .max_by_key(|(d, c)| (**c, std::cmp::Reverse(**d)))
            .map(|(d, c)| (*d, *c));
        let pb = personal_best(rows.iter().copied(), &state.normalizer);
        out.insert(
            family.as_str(),
            FamilyStat {
                count: rows.len() as u32,
                most_distance: most.map(|(d, _)| d),
                most_count: most.map(|(_, c)| c),
                pb_seconds: pb.map(|p| p.seconds),
            },
        );
    }
    out
}

/// Best valid time per distinct race date, ascending.
fn best_per_date<'a, I>(rows: I) -> Vec<SeriesPoint>
where
    I: IntoIterator<Item = &'a RaceResult>,
{
    let mut best: BTreeMap<&str, f64> = BTreeMap::new();
    for row in rows {
        let Some(seconds) = row.seconds() else {
            continue;
        };
        best.entry(row.race_date.as_str())
            .and_modify(|s| *s = s.min(seconds))
            .or_insert(seconds);
    }
    best.into_iter()
        .map(|(date, seconds)| SeriesPoint {
            date: date.to_string(),
            seconds,
        })
        .collect()
}
