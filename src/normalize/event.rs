//! Event label classification.
//!
//! Event labels mix age group, distance, and stroke in free text
//! ("11 & 12 age group 200 meter breaststroke"). The classifier pulls out
//! the stroke family and the distance; either can be absent, which is an
//! explicit unknown rather than an error.

use regex::Regex;

use crate::models::StrokeFamily;

/// What could be read out of an event label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventClass {
    pub stroke: Option<StrokeFamily>,
    pub distance: Option<u32>,
}

/// Extracts stroke family and distance from event labels.
#[derive(Debug)]
pub struct EventClassifier {
    distance: Regex,
}

impl EventClassifier {
    pub fn new() -> Self {
        Self {
            // A number immediately followed by the meter unit marker.
            distance: Regex::new(r"(\d+)\s*(?:meters?|metres?|m)\b").unwrap(),
        }
    }

    /// Stroke family by substring containment, first match wins in the
    /// fixed vocabulary order.
    pub fn stroke(&self, label: &str) -> Option<StrokeFamily> {
        let lower = label.to_lowercase();
        StrokeFamily::ALL
            .iter()
            .copied()
            .find(|family| lower.contains(family.as_str()))
    }

    /// Distance in meters, if the label carries one.
    pub fn distance(&self, label: &str) -> Option<u32> {
        self.distance
            .captures(label)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse().ok())
    }

    pub fn classify(&self, label: &str) -> EventClass {
        EventClass {
            stroke: self.stroke(label),
            distance: self.distance(label),
        }
    }
}

impl Default for EventClassifier {
    fn default() -> Self {
        Self::new()
    }
}
