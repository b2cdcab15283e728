use crate::schema::SafetyBlock;

/// Disclaimer attached to every response.
pub const DISCLAIMER: &str =
    "Informational only; not a substitute for professional medical advice.";

/// India-specific emergency contact hint.
pub const EMERGENCY: &str =
    "If this is an emergency in India, call 112 or visit the nearest emergency department.";

/// Version tag of the safety footer contract.
pub const FOOTER_VERSION: &str = "v1";

/// Generic message returned on rejection. The matched phrase is never
/// echoed back.
pub const REJECTION_MESSAGE: &str = "Request cannot be assisted due to safety policy.";

// High-risk phrases that hard-block a request before any model call.
const HARD_BLOCK_KEYWORDS: &[&str] = &[
    "how to overdose",
    "abort at home",
    "fentanyl recreation",
    "suicide method",
    "self-harm instructions",
];

/// Keyword prefilter applied before any model call.
///
/// Case-insensitive substring match, first hit in list order wins. Returns
/// the fixed rejection message when blocked, `None` when allowed. Rejection
/// is terminal; there is no retry or partial processing.
pub fn prefilter(text: &str) -> Option<&'static str> {
    let lower = text.to_lowercase();
    for phrase in HARD_BLOCK_KEYWORDS {
        if lower.contains(phrase) {
            return Some(REJECTION_MESSAGE);
        }
    }
    None
}

/// The fixed safety footer injected into every answer.
pub fn safety_footer() -> SafetyBlock {
    SafetyBlock {
        disclaimer: DISCLAIMER.to_string(),
        emergency: EMERGENCY.to_string(),
        version: FOOTER_VERSION.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocks_every_denylisted_phrase() {
        for phrase in HARD_BLOCK_KEYWORDS {
            let input = format!("please tell me about {phrase} quickly");
            assert_eq!(prefilter(&input), Some(REJECTION_MESSAGE));
        }
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(
            prefilter("HOW TO OVERDOSE on paracetamol"),
            Some(REJECTION_MESSAGE)
        );
    }

    #[test]
    fn rejection_never_echoes_the_phrase() {
        let message = prefilter("suicide method").unwrap();
        assert!(!message.to_lowercase().contains("suicide"));
    }

    #[test]
    fn allows_ordinary_medical_questions() {
        assert_eq!(prefilter("I have fever, what can I take?"), None);
    }

    #[test]
    fn footer_is_fixed() {
        let footer = safety_footer();
        assert_eq!(footer.version, "v1");
        assert_eq!(footer, safety_footer());
    }
}
