use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::{required, ApiError};
use crate::calculate::{build_ranking, PoolPolicy, Ranking, RankingOptions};
use crate::store::like_pattern;

#[derive(Debug, Deserialize)]
pub struct RankParams {
    pub name: Option<String>,
    pub event: Option<String>,
    /// Birth-year tolerance override for the demographic policy.
    pub age_window: Option<i32>,
    /// Only consider marks from the last N months before the target's most
    /// recent race in the event.
    pub months_back: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct RankResponse {
    #[serde(flatten)]
    pub ranking: Ranking,
    /// The membership policy the pool was built under.
    pub policy: PoolPolicy,
}

/// Rank a swimmer's personal best against the opponent pool for an event.
pub async fn rank(
    State(state): State<AppState>,
    Query(params): Query<RankParams>,
) -> Result<Json<RankResponse>, ApiError> {
    let name = required(&params.name, "name")?;
    let event = required(&params.event, "event")?;

    let rows = state.store.results_for_event(&like_pattern(event)).await?;

    let opts = RankingOptions {
        policy: state.ranking.policy,
        age_window: params.age_window.unwrap_or(state.ranking.age_window),
        months_back: params.months_back,
        top_k: state.ranking.top_k,
        window: state.ranking.window,
    };
    let ranking = build_ranking(name, &rows, &opts, &state.normalizer);

    Ok(Json(RankResponse {
        ranking,
        policy: opts.policy,
    }))
}
