//! Input classification and the session state machine.
//!
//! Two states, three input classes. Emergency and severity checks run
//! on every message, regardless of state; only plain input is routed
//! differently while a location is awaited.

use serde::{Deserialize, Serialize};

/// Phrases that indicate a medication emergency.
pub const EMERGENCY_KEYWORDS: &[&str] = &[
    "wrong medicine",
    "took wrong medicine",
    "taken wrong medicine",
    "overdose",
    "too much medicine",
    "wrong tablet",
    "wrong pill",
    "wrong drug",
    "extra dose",
    "double dose",
    "accidentally took",
    "accidentally eaten",
    "accidentally consumed",
];

/// Phrases that indicate a severe condition and trigger the
/// location prompt.
pub const SEVERE_KEYWORDS: &[&str] = &[
    "severe",
    "severe condition",
    "serious condition",
    "critical condition",
    "emergency",
    "urgent",
    "life threatening",
    "near hospital",
    "need hospital",
    "need ambulance",
    "need help",
    "very sick",
    "dangerous",
    "severely ill",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputClass {
    Emergency,
    Severe,
    Other,
}

/// Classify one incoming message. Emergency keywords take precedence
/// over severity keywords.
pub fn classify(text: &str) -> InputClass {
    let lower = text.to_lowercase();
    if EMERGENCY_KEYWORDS.iter().any(|k| lower.contains(k)) {
        InputClass::Emergency
    } else if SEVERE_KEYWORDS.iter().any(|k| lower.contains(k)) {
        InputClass::Severe
    } else {
        InputClass::Other
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatState {
    Normal,
    AwaitingLocation,
}

/// What the orchestrator should do with the current message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Emit the fixed safety message and stop.
    SafetyMessage,
    /// Ask for a city/area and await the next message as that location.
    AskLocation,
    /// Treat the message as a place name and run the facility locator.
    LookupFacilities,
    /// Run the symptom matcher.
    Analyze,
}

impl ChatState {
    /// The complete transition table.
    pub fn transition(self, class: InputClass) -> (ChatState, Action) {
        match (self, class) {
            (_, InputClass::Emergency) => (ChatState::Normal, Action::SafetyMessage),
            (_, InputClass::Severe) => (ChatState::AwaitingLocation, Action::AskLocation),
            (ChatState::AwaitingLocation, InputClass::Other) => {
                (ChatState::Normal, Action::LookupFacilities)
            }
            (ChatState::Normal, InputClass::Other) => (ChatState::Normal, Action::Analyze),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_emergency_keyword_classifies_as_emergency() {
        for keyword in EMERGENCY_KEYWORDS {
            let text = format!("I think I {keyword} this morning");
            assert_eq!(classify(&text), InputClass::Emergency, "keyword: {keyword}");
        }
    }

    #[test]
    fn every_severe_keyword_classifies_as_severe() {
        for keyword in SEVERE_KEYWORDS {
            // None of the severity phrases contain an emergency phrase.
            let text = format!("this feels {keyword} to me");
            assert_eq!(classify(&text), InputClass::Severe, "keyword: {keyword}");
        }
    }

    #[test]
    fn emergency_takes_precedence_over_severe() {
        assert_eq!(
            classify("severe overdose, what do I do"),
            InputClass::Emergency
        );
    }

    #[test]
    fn plain_symptom_text_is_other() {
        assert_eq!(classify("I have a fever"), InputClass::Other);
        assert_eq!(classify("Springfield"), InputClass::Other);
    }

    #[test]
    fn classification_is_case_insensitive() {
        assert_eq!(classify("OVERDOSE"), InputClass::Emergency);
        assert_eq!(classify("SEVERE headache"), InputClass::Severe);
    }

    #[test]
    fn transition_table_is_complete() {
        use Action::*;
        use ChatState::*;
        assert_eq!(Normal.transition(InputClass::Emergency), (Normal, SafetyMessage));
        assert_eq!(
            AwaitingLocation.transition(InputClass::Emergency),
            (Normal, SafetyMessage)
        );
        assert_eq!(
            Normal.transition(InputClass::Severe),
            (AwaitingLocation, AskLocation)
        );
        assert_eq!(
            AwaitingLocation.transition(InputClass::Severe),
            (AwaitingLocation, AskLocation)
        );
        assert_eq!(
            AwaitingLocation.transition(InputClass::Other),
            (Normal, LookupFacilities)
        );
        assert_eq!(Normal.transition(InputClass::Other), (Normal, Analyze));
    }
}
