//! Symptom matcher: maps free-text input to one entry of the knowledge
//! table and assembles the analysis payload, including the best-effort
//! drug-label attachment.

use chrono::Utc;

use crate::knowledge::KnowledgeBase;
use crate::models::{AnalysisResult, MatchQuality, SymptomEntry};
use crate::services::OpenFdaClient;

/// Keys longer than this are eligible for the weakened prefix match.
const PREFIX_PROBE_LEN: usize = 4;

pub struct SymptomMatcher {
    knowledge: KnowledgeBase,
    drug_labels: OpenFdaClient,
}

impl SymptomMatcher {
    pub fn new(knowledge: KnowledgeBase, drug_labels: OpenFdaClient) -> Self {
        Self {
            knowledge,
            drug_labels,
        }
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    /// Select the knowledge-base key for the input text.
    ///
    /// Two passes in table order: keys (or their space-separated form)
    /// present verbatim in the lowercased input, then keys whose
    /// four-character prefix appears. No match falls back to the
    /// default key.
    pub fn match_key(&self, text: &str) -> (&str, MatchQuality) {
        let input = text.to_lowercase();

        if let Some(key) = self.knowledge.keys().find(|key| {
            input.contains(key) || (key.contains('_') && input.contains(&key.replace('_', " ")))
        }) {
            return (key, MatchQuality::Exact);
        }

        if let Some(key) = self.knowledge.keys().find(|key| {
            let name = key.replace('_', " ");
            name.len() > PREFIX_PROBE_LEN && input.contains(&name[..PREFIX_PROBE_LEN])
        }) {
            return (key, MatchQuality::Prefix);
        }

        (self.knowledge.default_key(), MatchQuality::Fallback)
    }

    /// Produce exactly one analysis for the input text. Steps 1-5 are
    /// infallible; the drug-label side lookup degrades to an absent
    /// attachment on any failure.
    pub async fn analyze(&self, text: &str, language: &str) -> AnalysisResult {
        let (key, quality) = self.match_key(text);
        let key = key.to_string();
        // The key always comes from the table (or the default of a
        // non-empty table); the guard covers degenerate empty tables.
        let entry = self.knowledge.get(&key).cloned().unwrap_or_else(empty_entry);

        let drug_label = match entry.medicines.first() {
            Some(medicine) => {
                let name = medicine.label_query_name();
                match self.drug_labels.fetch_label(name).await {
                    Ok(label) => label,
                    Err(err) => {
                        tracing::warn!(%err, medicine = name, "drug-label lookup failed");
                        None
                    }
                }
            }
            None => None,
        };

        AnalysisResult {
            symptom: key.replace('_', " "),
            matched_key: key,
            causes: entry.causes,
            remedies: entry.remedies,
            medicines: entry.medicines,
            severity: entry.severity,
            when_to_see_doctor: entry.when_to_see_doctor,
            confidence: quality.confidence(),
            match_quality: quality,
            language: language.to_string(),
            timestamp: Utc::now(),
            drug_label,
        }
    }
}

fn empty_entry() -> SymptomEntry {
    SymptomEntry {
        causes: Vec::new(),
        remedies: Vec::new(),
        medicines: Vec::new(),
        severity: String::new(),
        when_to_see_doctor: String::new(),
    }
}
