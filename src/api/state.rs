use std::sync::Arc;

use crate::calculate::WaBaseTable;
use crate::config::{AppConfig, RankingConfig};
use crate::normalize::{EventClassifier, MeetNormalizer};
use crate::store::ResultStore;

/// Shared request context. The lookup tables are compiled once at startup
/// and injected here; handlers never reach for ambient globals.
#[derive(Clone)]
pub struct AppState {
    pub store: ResultStore,
    pub normalizer: Arc<MeetNormalizer>,
    pub classifier: Arc<EventClassifier>,
    pub ranking: RankingConfig,
    pub wa_bases: Arc<WaBaseTable>,
}

impl AppState {
    pub fn new(store: ResultStore, config: &AppConfig) -> Self {
        Self {
            store,
            normalizer: Arc::new(MeetNormalizer::new()),
            classifier: Arc::new(EventClassifier::new()),
            ranking: config.ranking.clone(),
            wa_bases: Arc::new(config.wa_bases.clone()),
        }
    }
}
