//! Fit gate — the boolean decision derived from the synthesis stage output.
//!
//! Deliberately a whitelist-substring check, not an NLP classifier: the
//! phrase list below is the compatibility contract. Encapsulated here as a
//! pure function so a structured classification can replace it later
//! without touching the orchestrator.

/// Positive fit phrases, in match-priority order. Do not extend this list:
/// anything outside it (e.g. "fair fit") is a definitive negative.
pub const POSITIVE_FIT_PHRASES: [&str; 10] = [
    "strong fit",
    "good fit",
    "excellent fit",
    "very good fit",
    "high potential",
    "well-suited",
    "strong match",
    "good match",
    "moderate fit",
    "promising fit",
];

/// Heading that scopes the scan to the assessment section when present.
const ASSESSMENT_HEADING: &str = "overall fit assessment";

/// Classifies the synthesis-stage text as a positive or negative fit.
/// Idempotent and total: a non-matching text is a definitive negative,
/// never "unknown".
pub fn classify_fit(text: &str) -> bool {
    matched_phrase(text).is_some()
}

/// Returns the first whitelist phrase found, for logging. Scans
/// case-insensitively; when the text contains the "Overall Fit Assessment"
/// heading, only the portion after it is considered.
pub fn matched_phrase(text: &str) -> Option<&'static str> {
    let lower = text.to_lowercase();
    let scope = match lower.find(ASSESSMENT_HEADING) {
        Some(idx) => &lower[idx + ASSESSMENT_HEADING.len()..],
        None => lower.as_str(),
    };
    POSITIVE_FIT_PHRASES
        .iter()
        .copied()
        .find(|phrase| scope.contains(phrase))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strong_fit_any_case_passes() {
        assert!(classify_fit("This is a Strong Fit overall."));
        assert!(classify_fit("this is a STRONG FIT overall"));
        assert!(classify_fit("strong fit"));
    }

    #[test]
    fn test_every_whitelisted_phrase_passes() {
        for phrase in POSITIVE_FIT_PHRASES {
            let text = format!("Overall Fit Assessment: the candidate is a {phrase} here.");
            assert!(classify_fit(&text), "phrase '{phrase}' should pass the gate");
        }
    }

    #[test]
    fn test_weak_fit_fails() {
        assert!(!classify_fit("This is a Weak Fit."));
    }

    #[test]
    fn test_unlisted_borderline_phrase_fails() {
        // "Fair Fit" is not in the whitelist and must not be guessed in.
        assert!(!classify_fit("Overall Fit Assessment: a Fair Fit at best."));
    }

    #[test]
    fn test_empty_text_fails() {
        assert!(!classify_fit(""));
    }

    #[test]
    fn test_heading_scopes_the_scan() {
        // Positive phrase *before* the heading, negative verdict after it:
        // only the assessment section counts.
        let text = "The company culture sounds like a good fit for anyone.\n\
                    Overall Fit Assessment: unfortunately a weak alignment.";
        assert!(!classify_fit(text));
    }

    #[test]
    fn test_phrase_after_heading_passes() {
        let text = "Preamble about the role.\n\
                    Overall Fit Assessment: this candidate is well-suited to the position.";
        assert_eq!(matched_phrase(text), Some("well-suited"));
    }

    #[test]
    fn test_whole_text_scanned_without_heading() {
        assert_eq!(
            matched_phrase("Summary: moderate fit given the skill overlap."),
            Some("moderate fit")
        );
    }

    #[test]
    fn test_first_listed_phrase_wins() {
        // Both "strong fit" and "moderate fit" appear; list order decides.
        let text = "Overall Fit Assessment: moderate fit trending toward strong fit.";
        assert_eq!(matched_phrase(text), Some("strong fit"));
    }
}
