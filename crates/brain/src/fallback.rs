//! Deterministic fallback classification.
//!
//! When the provider call fails, the question is matched against an ordered
//! keyword rule table and answered with a canned response. Classification is
//! a pure function of the question text: no network, no state, fully
//! unit-testable offline.

/// Category of canned answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackCategory {
    Capabilities,
    SystemStatus,
    UrgencyAssessment,
    EmergencyRedirect,
    SchoolSafety,
    Reporting,
    Default,
}

/// Ordered rule table; first match wins. Matching is a case-insensitive
/// substring test against any keyword in the row.
const RULES: &[(&[&str], FallbackCategory)] = &[
    (&["help", "what can you do"], FallbackCategory::Capabilities),
    (&["status", "how are you"], FallbackCategory::SystemStatus),
    (&["threat", "danger"], FallbackCategory::UrgencyAssessment),
    (&["emergency", "911"], FallbackCategory::EmergencyRedirect),
    (&["school"], FallbackCategory::SchoolSafety),
    (&["report"], FallbackCategory::Reporting),
];

/// Classify a question into a fallback category.
pub fn classify(question: &str) -> FallbackCategory {
    let lower = question.to_lowercase();
    RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|kw| lower.contains(kw)))
        .map(|(_, category)| *category)
        .unwrap_or(FallbackCategory::Default)
}

/// Canned response text for a category.
pub fn response(category: FallbackCategory) -> &'static str {
    match category {
        FallbackCategory::Capabilities => {
            "I can assist with support coordination, assess urgency levels, provide \
             situational guidance, and connect you with appropriate community resources."
        }
        FallbackCategory::SystemStatus => {
            "All systems operational. Currently monitoring active support requests. \
             Coordination teams are available and ready to assist."
        }
        FallbackCategory::UrgencyAssessment => {
            "Urgency assessment protocols are active. I analyze information to identify \
             needs and prioritize support actions based on urgency and proximity."
        }
        FallbackCategory::EmergencyRedirect => {
            "For immediate safety concerns, use the Help Button on the home screen. I will \
             coordinate support and connect you with appropriate resources. If you are in \
             immediate danger, please call 911."
        }
        FallbackCategory::SchoolSafety => {
            "School safety is a priority. Report concerns through the School Safety section. \
             I coordinate with appropriate support services and school wellness staff."
        }
        FallbackCategory::Reporting => {
            "You can submit reports through the Citizen Portal. Choose from wellness checks, \
             safety concerns, community issues, or school-related matters."
        }
        FallbackCategory::Default => {
            "I am the Lifeline Brain. I am here to assist with support coordination, urgency \
             assessment, and resource allocation. How may I help you today?"
        }
    }
}

/// Classify and answer in one step.
pub fn answer(question: &str) -> &'static str {
    response(classify(question))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_is_case_insensitive() {
        assert_eq!(
            classify("What is the STATUS of responders?"),
            FallbackCategory::SystemStatus
        );
        assert_eq!(classify("HELP me please"), FallbackCategory::Capabilities);
    }

    #[test]
    fn first_matching_rule_wins() {
        // "help" (row 1) beats "report" (row 6) even though both appear.
        assert_eq!(
            classify("help me file a report"),
            FallbackCategory::Capabilities
        );
        // "status" beats "emergency".
        assert_eq!(
            classify("status of the emergency?"),
            FallbackCategory::SystemStatus
        );
    }

    #[test]
    fn every_rule_row_is_reachable() {
        assert_eq!(classify("what can you do"), FallbackCategory::Capabilities);
        assert_eq!(classify("how are you"), FallbackCategory::SystemStatus);
        assert_eq!(classify("is there a threat"), FallbackCategory::UrgencyAssessment);
        assert_eq!(classify("danger nearby?"), FallbackCategory::UrgencyAssessment);
        assert_eq!(classify("should I call 911"), FallbackCategory::EmergencyRedirect);
        assert_eq!(classify("my school has an issue"), FallbackCategory::SchoolSafety);
        assert_eq!(classify("where do I report this"), FallbackCategory::Reporting);
    }

    #[test]
    fn unmatched_question_gets_default() {
        assert_eq!(classify("hello there"), FallbackCategory::Default);
        assert_eq!(classify(""), FallbackCategory::Default);
    }

    #[test]
    fn classification_is_deterministic() {
        let question = "Is this an emergency?";
        let first = classify(question);
        for _ in 0..10 {
            assert_eq!(classify(question), first);
        }
        assert_eq!(first, FallbackCategory::EmergencyRedirect);
    }

    #[test]
    fn emergency_response_directs_to_911() {
        assert!(answer("Is this an emergency?").contains("911"));
    }
}
