use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::symptom::Medicine;

/// How the input text matched a knowledge-base key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchQuality {
    /// The key (or its space-separated form) appeared verbatim in the input.
    Exact,
    /// Only the key's four-character prefix appeared in the input.
    Prefix,
    /// Nothing matched; the default key was substituted.
    Fallback,
}

impl MatchQuality {
    /// Deterministic confidence score derived from match quality.
    /// Replaces the random 80-100 score the feature shipped with,
    /// which carried no evidentiary meaning.
    pub fn confidence(self) -> u8 {
        match self {
            MatchQuality::Exact => 95,
            MatchQuality::Prefix => 70,
            MatchQuality::Fallback => 40,
        }
    }
}

/// Outcome of one symptom analysis. Created per user query, owned by
/// the requesting call, superseded wholesale by the next query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Display form of the matched key (separators replaced with spaces).
    pub symptom: String,
    /// Canonical key into the knowledge table. Always valid.
    pub matched_key: String,
    pub causes: Vec<String>,
    pub remedies: Vec<String>,
    pub medicines: Vec<Medicine>,
    pub severity: String,
    pub when_to_see_doctor: String,
    /// 0-100, derived from `match_quality`.
    pub confidence: u8,
    pub match_quality: MatchQuality,
    pub language: String,
    pub timestamp: DateTime<Utc>,
    /// Structured label data for the entry's first medicine.
    /// Absent whenever the lookup fails; never an error.
    pub drug_label: Option<DrugLabel>,
}

/// Structured drug-label record from the OpenFDA label endpoint.
/// Only the patient-facing sections are kept.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DrugLabel {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub purpose: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub dosage_and_administration: Vec<String>,
    #[serde(default)]
    pub openfda: DrugLabelMeta,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DrugLabelMeta {
    #[serde(default)]
    pub brand_name: Vec<String>,
    #[serde(default)]
    pub generic_name: Vec<String>,
}
