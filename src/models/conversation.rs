use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::analysis::AnalysisResult;
use super::geo::FacilitySearch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

/// One entry of the append-only conversation log. The log lives for one
/// session and is cleared wholesale on reset, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub id: Uuid,
    pub role: Role,
    pub text: String,
    /// Attached when this message carries a symptom analysis.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<AnalysisResult>,
    /// Attached when this message carries a facility lookup.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facilities: Option<FacilitySearch>,
    /// Marks failure/advisory messages for the renderer.
    pub is_error: bool,
    pub timestamp: DateTime<Utc>,
}

impl ConversationMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text, false)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, text, false)
    }

    pub fn assistant_error(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, text, true)
    }

    fn new(role: Role, text: impl Into<String>, is_error: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            text: text.into(),
            result: None,
            facilities: None,
            is_error,
            timestamp: Utc::now(),
        }
    }

    pub fn with_result(mut self, result: AnalysisResult) -> Self {
        self.result = Some(result);
        self
    }

    pub fn with_facilities(mut self, facilities: FacilitySearch) -> Self {
        self.facilities = Some(facilities);
        self
    }
}
