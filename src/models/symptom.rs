use serde::{Deserialize, Serialize};

/// One entry of the symptom knowledge table. Static, read-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymptomEntry {
    pub causes: Vec<String>,
    pub remedies: Vec<String>,
    pub medicines: Vec<Medicine>,
    pub severity: String,
    pub when_to_see_doctor: String,
}

/// A suggested medicine. The knowledge table mixes bare strings
/// ("Ibuprofen (Advil) - 200-400mg ...") with structured records,
/// so both shapes are kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Medicine {
    Plain(String),
    Detailed {
        name: String,
        #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
        kind: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        dosage: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        brand: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        note: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        warning: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
}

impl Medicine {
    /// The medicine name as written in the table.
    pub fn name(&self) -> &str {
        match self {
            Medicine::Plain(s) => s,
            Medicine::Detailed { name, .. } => name,
        }
    }

    /// Name suitable for a drug-label query: for plain strings the
    /// portion before the first "(" (brand lists, dose suffixes are
    /// not part of the label name).
    pub fn label_query_name(&self) -> &str {
        match self {
            Medicine::Plain(s) => s.split('(').next().unwrap_or(s).trim(),
            Medicine::Detailed { name, .. } => name.trim(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_query_name_strips_brand_suffix() {
        let m = Medicine::Plain("Acetaminophen (Tylenol) - 500-1000mg every 4-6 hours".into());
        assert_eq!(m.label_query_name(), "Acetaminophen");
    }

    #[test]
    fn label_query_name_detailed_uses_name() {
        let m = Medicine::Detailed {
            name: "Ondansetron (Zofran)".into(),
            kind: None,
            dosage: None,
            brand: None,
            note: Some("Common anti-nausea prescription.".into()),
            warning: None,
            description: None,
        };
        // Structured entries keep their name field as-is.
        assert_eq!(m.label_query_name(), "Ondansetron (Zofran)");
        assert_eq!(m.name(), "Ondansetron (Zofran)");
    }

    #[test]
    fn medicine_serializes_plain_as_string() {
        let m = Medicine::Plain("Ibuprofen".into());
        assert_eq!(serde_json::to_value(&m).unwrap(), serde_json::json!("Ibuprofen"));
    }

    #[test]
    fn medicine_deserializes_structured_record() {
        let m: Medicine = serde_json::from_value(serde_json::json!({
            "name": "Dextromethorphan (Robitussin DM)",
            "type": "Cough suppressant",
            "dosage": "10-20mg every 4-8 hours"
        }))
        .unwrap();
        match m {
            Medicine::Detailed { kind, .. } => {
                assert_eq!(kind.as_deref(), Some("Cough suppressant"));
            }
            Medicine::Plain(_) => panic!("expected structured record"),
        }
    }
}
