//! Core data structures.

pub mod event;
pub mod result;

pub use event::StrokeFamily;
pub use result::RaceResult;
