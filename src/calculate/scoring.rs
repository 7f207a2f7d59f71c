//! World Aquatics points.
//!
//! `points = 1000 * (base / t)^3`, where `base` is the reference time for a
//! (gender, event) pair. The base table ships empty and is filled in from
//! configuration; without a base the score is simply absent.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Reference base times, keyed gender → event label → seconds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WaBaseTable {
    bases: HashMap<String, HashMap<String, f64>>,
}

impl WaBaseTable {
    pub fn new(bases: HashMap<String, HashMap<String, f64>>) -> Self {
        Self { bases }
    }

    pub fn base(&self, gender: &str, event: &str) -> Option<f64> {
        self.bases.get(gender)?.get(event).copied()
    }

    /// Score a time, or `None` when the time is unusable or no base is
    /// configured for this (gender, event).
    pub fn points(&self, seconds: f64, gender: &str, event: &str) -> Option<u32> {
        if !(seconds > 0.0 && seconds.is_finite()) {
            return None;
        }
        let base = self.base(gender, event)?;
        Some((1000.0 * (base / seconds).powi(3)).round() as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> WaBaseTable {
        let mut bases = HashMap::new();
        let mut f = HashMap::new();
        f.insert("50 meter freestyle".to_string(), 23.61);
        bases.insert("F".to_string(), f);
        WaBaseTable::new(bases)
    }

    #[test]
    fn test_base_time_scores_thousand() {
        assert_eq!(table().points(23.61, "F", "50 meter freestyle"), Some(1000));
    }

    #[test]
    fn test_slower_time_scores_less() {
        let pts = table()
            .points(30.0, "F", "50 meter freestyle")
            .unwrap();
        assert!(pts < 1000);
        // 1000 * (23.61 / 30)^3 ≈ 487
        assert_eq!(pts, 487);
    }

    #[test]
    fn test_missing_base_or_bad_time() {
        let t = table();
        assert_eq!(t.points(30.0, "M", "50 meter freestyle"), None);
        assert_eq!(t.points(30.0, "F", "100 meter freestyle"), None);
        assert_eq!(t.points(0.0, "F", "50 meter freestyle"), None);
        assert_eq!(t.points(-1.0, "F", "50 meter freestyle"), None);
    }
}
