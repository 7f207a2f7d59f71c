//! Race time parsing.
//!
//! Result strings in the source table are free text: "31.50", "1:23.45",
//! occasionally "1:02:03", and sometimes garbage. Anything that does not
//! parse cleanly is treated as missing data, not an error.

/// Parse a free-text race time into seconds.
///
/// Accepted shapes:
/// - "59.78" for plain decimal seconds
/// - "1:23.45" for minutes:seconds
/// - "1:02:03" for hours:minutes:seconds
///
/// Returns `None` for empty input, input without any digit, or anything
/// that fails to parse.
pub fn parse_race_time(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if !s.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    if !s.contains(':') {
        return s.parse::<f64>().ok();
    }

    // Rightmost segment is seconds; each segment to the left is a
    // successively larger unit, accumulated right-to-left.
    let mut total = 0.0;
    let mut multiplier = 1.0;
    for part in s.rsplit(':') {
        let value: f64 = part.trim().parse().ok()?;
        total += value * multiplier;
        multiplier *= 60.0;
    }
    Some(total)
}

/// A time usable in aggregations: parseable, finite, strictly positive.
///
/// Unparseable and non-positive results are treated identically; neither
/// produces a best-time candidate or counts toward an average.
pub fn valid_seconds(raw: &str) -> Option<f64> {
    parse_race_time(raw).filter(|s| s.is_finite() && *s > 0.0)
}
