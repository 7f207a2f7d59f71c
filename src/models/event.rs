//! Stroke family vocabulary.

use serde::{Deserialize, Serialize};

/// The fixed stroke vocabulary.
///
/// Classification tests labels against these in declaration order; the
/// first containment match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeFamily {
    Breaststroke,
    Backstroke,
    Freestyle,
    Butterfly,
    Medley,
}

impl StrokeFamily {
    /// Full vocabulary in match-priority order.
    pub const ALL: [StrokeFamily; 5] = [
        StrokeFamily::Breaststroke,
        StrokeFamily::Backstroke,
        StrokeFamily::Freestyle,
        StrokeFamily::Butterfly,
        StrokeFamily::Medley,
    ];

    /// The four families shown in the per-stroke breakdown. Medley is
    /// classified but not broken out.
    pub const DISPLAY: [StrokeFamily; 4] = [
        StrokeFamily::Breaststroke,
        StrokeFamily::Backstroke,
        StrokeFamily::Freestyle,
        StrokeFamily::Butterfly,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StrokeFamily::Breaststroke => "breaststroke",
            StrokeFamily::Backstroke => "backstroke",
            StrokeFamily::Freestyle => "freestyle",
            StrokeFamily::Butterfly => "butterfly",
            StrokeFamily::Medley => "medley",
        }
    }
}

impl std::fmt::Display for StrokeFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
