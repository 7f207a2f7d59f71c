//! Meet-name normalization.
//!
//! Competition names in the source table are inconsistent across years:
//! the same meet shows up with year prefixes, sanction codes, and varying
//! amounts of boilerplate. `MeetNormalizer` maps them to short display
//! labels. The output is informational only; matching and identity logic
//! elsewhere always uses the raw name.

use regex::Regex;

/// Ordered literal substitutions. Earlier entries win when keys overlap,
/// so specific championships must come before the generic markers.
const MEET_REPLACEMENTS: &[(&str, &str)] = &[
    (
        "National Winter Short-Course Swimming Championship",
        "National Winter SC",
    ),
    (
        "National Presidents Cup Age-Group Swimming Championship",
        "Presidents Cup",
    ),
    (
        "National Presidents Cup Swimming Championship",
        "Presidents Cup",
    ),
    ("National Youth Swimming Championship", "National Youth"),
    ("National Games Swimming Trials", "National Games Trials"),
    ("Spring Swimming Championship", "Spring Long-Course"),
    ("Mayors Cup Aquatics Meet (Swimming)", "Mayors Cup"),
    ("Mayors Cup Short-Course", "Mayors Cup SC"),
    ("Council Speakers Cup", "Speakers Cup"),
    ("Elementary and Middle School Meet", "Schools Meet"),
    ("Winter Short-Course", "Winter SC"),
];

/// Suffix kept intact when the name ends with this token before the
/// generic suffix (e.g. "East National Swimming Championship").
const PROTECTED_TOKEN: &str = "National";

/// Meet names containing any of these markers are administratively
/// considered short-course / winter results: faster pool conditions,
/// excluded from personal-best comparison.
const SHORT_COURSE_MARKERS: &[&str] = &[
    "winter short-course",
    "winter short course",
    "winter sc",
    "short-course",
    "short course",
];

/// Canonicalizes noisy meet names into short display labels.
///
/// Tables and patterns are fixed at construction; build one at startup and
/// share it.
#[derive(Debug)]
pub struct MeetNormalizer {
    leading_year: Regex,
    leading_code: Regex,
    generic_suffix: Regex,
    whitespace_runs: Regex,
}

impl MeetNormalizer {
    pub fn new() -> Self {
        Self {
            leading_year: Regex::new(r"^\d{4}\s*").unwrap(),
            leading_code: Regex::new(r"^\d{3}\s*").unwrap(),
            generic_suffix: Regex::new(r"\s*Swimming Championship\s*$").unwrap(),
            whitespace_runs: Regex::new(r"\s{2,}").unwrap(),
        }
    }

    /// Map a raw meet name to its short display label.
    ///
    /// Literal substitutions first, then pattern cleanup: leading 4-digit
    /// year, leading 3-digit sanction code, the generic championship suffix
    /// (unless protected), collapsed whitespace. Lossy by design; calling it
    /// on its own output changes nothing.
    pub fn simplify(&self, name: &str) -> String {
        let mut s = name.trim().to_string();
        if s.is_empty() {
            return s;
        }

        for (from, to) in MEET_REPLACEMENTS {
            if s.contains(from) {
                s = s.replace(from, to);
            }
        }

        s = self.leading_year.replace(&s, "").into_owned();
        s = self.leading_code.replace(&s, "").into_owned();
        s = self.strip_generic_suffix(&s);
        s = self.whitespace_runs.replace_all(&s, " ").into_owned();
        s.trim().to_string()
    }

    fn strip_generic_suffix(&self, s: &str) -> String {
        match self.generic_suffix.find(s) {
            Some(m) if !s[..m.start()].trim_end().ends_with(PROTECTED_TOKEN) => {
                format!("{}{}", &s[..m.start()], &s[m.end()..])
            }
            _ => s.to_string(),
        }
    }

    /// Whether a meet counts as a short-course / winter meet.
    ///
    /// Substring match on the raw name, case-insensitive.
    pub fn is_short_course(&self, name: &str) -> bool {
        let lower = name.to_lowercase();
        SHORT_COURSE_MARKERS.iter().any(|m| lower.contains(m))
    }
}

impl Default for MeetNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_substitution() {
        let n = MeetNormalizer::new();
        assert_eq!(
            n.simplify("National Winter Short-Course Swimming Championship"),
            "National Winter SC"
        );
        assert_eq!(
            n.simplify("National Presidents Cup Swimming Championship"),
            "Presidents Cup"
        );
    }

    #[test]
    fn test_more_specific_entry_wins() {
        let n = MeetNormalizer::new();
        // The age-group variant must not fall through to the shorter key.
        assert_eq!(
            n.simplify("National Presidents Cup Age-Group Swimming Championship"),
            "Presidents Cup"
        );
    }

    #[test]
    fn test_leading_year_and_code_stripped() {
        let n = MeetNormalizer::new();
        assert_eq!(
            n.simplify("2024 301 Riverside City Swimming Championship"),
            "Riverside City"
        );
    }

    #[test]
    fn test_generic_suffix_stripped() {
        let n = MeetNormalizer::new();
        assert_eq!(n.simplify("Harbor City Swimming Championship"), "Harbor City");
    }

    #[test]
    fn test_protected_token_keeps_suffix() {
        let n = MeetNormalizer::new();
        assert_eq!(
            n.simplify("East National Swimming Championship"),
            "East National Swimming Championship"
        );
    }

    #[test]
    fn test_whitespace_collapsed() {
        let n = MeetNormalizer::new();
        assert_eq!(n.simplify("  Harbor   City  Open "), "Harbor City Open");
    }

    #[test]
    fn test_empty_input() {
        let n = MeetNormalizer::new();
        assert_eq!(n.simplify(""), "");
        assert_eq!(n.simplify("   "), "");
    }

    #[test]
    fn test_idempotent_on_own_output() {
        let n = MeetNormalizer::new();
        let inputs = [
            "2024 301 Riverside City Swimming Championship",
            "National Winter Short-Course Swimming Championship",
            "National Presidents Cup Age-Group Swimming Championship",
            "East National Swimming Championship",
            "Mayors Cup Aquatics Meet (Swimming)",
            "  Harbor   City  Open ",
            "2023 Spring Swimming Championship",
        ];
        for input in inputs {
            let once = n.simplify(input);
            assert_eq!(n.simplify(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_short_course_predicate() {
        let n = MeetNormalizer::new();
        assert!(n.is_short_course("X Winter Short-Course Championship"));
        assert!(n.is_short_course("Mayors Cup Short Course"));
        assert!(n.is_short_course("national winter sc"));
        assert!(!n.is_short_course("Harbor City Open"));
        assert!(!n.is_short_course("Spring Long-Course"));
    }
}
