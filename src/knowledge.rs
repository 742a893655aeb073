//! Static symptom knowledge table.
//!
//! The table is an immutable value constructed once and injected into the
//! matcher, so tests can substitute smaller tables. Iteration order is the
//! declaration order, which the matcher relies on when several keys match.

use std::collections::HashSet;

use crate::config;
use crate::models::{Medicine, SymptomEntry};

/// Immutable symptom knowledge base. Keys are unique and fixed at
/// construction; entries are never mutated.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    entries: Vec<(String, SymptomEntry)>,
}

impl KnowledgeBase {
    /// Build a knowledge base from ordered (key, entry) pairs.
    /// Duplicate keys keep the first occurrence.
    pub fn new(entries: Vec<(String, SymptomEntry)>) -> Self {
        let mut seen = HashSet::new();
        let entries = entries
            .into_iter()
            .filter(|(key, _)| seen.insert(key.clone()))
            .collect();
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&SymptomEntry> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, entry)| entry)
    }

    /// Keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Key substituted when nothing matches: the fixed default if the
    /// table carries it, otherwise the table's first key.
    pub fn default_key(&self) -> &str {
        if self.get(config::DEFAULT_SYMPTOM_KEY).is_some() {
            config::DEFAULT_SYMPTOM_KEY
        } else {
            self.entries
                .first()
                .map(|(k, _)| k.as_str())
                .unwrap_or(config::DEFAULT_SYMPTOM_KEY)
        }
    }

    /// The full built-in table.
    pub fn builtin() -> Self {
        Self::new(builtin_entries())
    }
}

// ── Table construction helpers ──────────────────────────────

fn list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn plain(text: &str) -> Medicine {
    Medicine::Plain(text.into())
}

/// Optional fields for a structured medicine record.
#[derive(Default)]
struct MedSpec<'a> {
    kind: Option<&'a str>,
    dosage: Option<&'a str>,
    brand: Option<&'a str>,
    note: Option<&'a str>,
    warning: Option<&'a str>,
    description: Option<&'a str>,
}

fn med(name: &str, spec: MedSpec<'_>) -> Medicine {
    Medicine::Detailed {
        name: name.into(),
        kind: spec.kind.map(Into::into),
        dosage: spec.dosage.map(Into::into),
        brand: spec.brand.map(Into::into),
        note: spec.note.map(Into::into),
        warning: spec.warning.map(Into::into),
        description: spec.description.map(Into::into),
    }
}

fn dosed(name: &str, dosage: &str) -> Medicine {
    med(
        name,
        MedSpec {
            dosage: Some(dosage),
            ..Default::default()
        },
    )
}

fn noted(name: &str, note: &str) -> Medicine {
    med(
        name,
        MedSpec {
            note: Some(note),
            ..Default::default()
        },
    )
}

fn entry(
    causes: &[&str],
    remedies: &[&str],
    medicines: Vec<Medicine>,
    severity: &str,
    when_to_see_doctor: &str,
) -> SymptomEntry {
    SymptomEntry {
        causes: list(causes),
        remedies: list(remedies),
        medicines,
        severity: severity.into(),
        when_to_see_doctor: when_to_see_doctor.into(),
    }
}

fn builtin_entries() -> Vec<(String, SymptomEntry)> {
    // Shared by the nausea and vomiting entries.
    let sickness_causes = [
        "Stomach infection (viral gastroenteritis)",
        "Food poisoning or spoiled food.",
        "Motion sickness (travel-related).",
        "Overeating or indigestion.",
        "Migraine headaches.",
        "Pregnancy (morning sickness).",
        "Medication side effects.",
        "Stress or anxiety.",
        "Heatstroke or dehydration.",
        "Serious causes: appendicitis, intestinal blockage, kidney failure (if vomiting is persistent and severe).",
    ];
    let sickness_remedies = [
        "Rest in a cool, quiet environment.",
        "Sip clear fluids slowly (ORS, water, coconut water, clear soup).",
        "Avoid solid food until vomiting stops.",
        "When ready, try bland foods: toast, rice, banana, apple.",
        "Avoid spicy, oily, or dairy-based foods for a while.",
        "Ginger tea or sucking ginger candy may reduce nausea.",
    ];
    let sickness_medicines = || {
        vec![
            noted("Ondansetron (Zofran)", "Common anti-nausea prescription."),
            noted("Domperidone (Domstal)", "Helps with nausea and digestion."),
            noted(
                "Doxylamine + Pyridoxine",
                "Safe in pregnancy-related nausea.",
            ),
            noted(
                "ORS (Oral Rehydration Solution)",
                "Essential if there's dehydration.",
            ),
        ]
    };
    let sickness_doctor = "If vomiting is persistent, severe, with blood, or accompanied by \
         dehydration, confusion, or severe abdominal pain.";

    vec![
        (
            "fever".into(),
            entry(
                &[
                    "Viral infection",
                    "Bacterial infection",
                    "Inflammation",
                    "Heat exhaustion",
                    "Autoimmune disorders",
                ],
                &[
                    "Rest",
                    "Stay hydrated",
                    "Take fever-reducing medication",
                    "Cool compress",
                ],
                vec![
                    plain("Acetaminophen (Tylenol) - 500-1000mg every 4-6 hours (max 4000mg/day)"),
                    plain("Ibuprofen (Advil, Motrin) - 200-400mg every 4-6 hours (max 1200mg/day)"),
                    plain("Aspirin - 325-650mg every 4 hours (max 4000mg/day, not for children)"),
                ],
                "Mild to Moderate",
                "If fever >103°F (39.4°C), lasts more than 3 days, or is accompanied by rash",
            ),
        ),
        (
            "headache".into(),
            entry(
                &[
                    "Stress",
                    "Dehydration",
                    "Eye strain",
                    "Sinus pressure",
                    "Migraine",
                    "Tension",
                ],
                &[
                    "Rest in quiet, dark room",
                    "Stay hydrated",
                    "Apply cold compress",
                    "Massage",
                ],
                vec![
                    dosed("Acetaminophen", "500-1000mg every 4-6 hours"),
                    dosed("Ibuprofen", "200-400mg every 4-6 hours"),
                    dosed("Aspirin", "325-650mg every 4 hours"),
                    dosed("Naproxen (Aleve)", "220mg every 8-12 hours"),
                ],
                "Mild",
                "If sudden/severe pain, after head injury, with fever/stiff neck",
            ),
        ),
        (
            "cough".into(),
            entry(
                &[
                    "Common cold",
                    "Allergies",
                    "Bronchitis",
                    "Post-nasal drip",
                    "Asthma",
                    "GERD",
                ],
                &[
                    "Stay hydrated",
                    "Use honey",
                    "Steam inhalation",
                    "Elevate head while sleeping",
                ],
                vec![
                    med(
                        "Dextromethorphan (Robitussin DM)",
                        MedSpec {
                            kind: Some("Cough suppressant"),
                            dosage: Some("10-20mg every 4-8 hours"),
                            ..Default::default()
                        },
                    ),
                    med(
                        "Guaifenesin (Mucinex)",
                        MedSpec {
                            kind: Some("Expectorant"),
                            dosage: Some("200-400mg every 4 hours"),
                            ..Default::default()
                        },
                    ),
                    med(
                        "Diphenhydramine (Benadryl)",
                        MedSpec {
                            kind: Some("Antihistamine"),
                            dosage: Some("25-50mg every 4-6 hours"),
                            ..Default::default()
                        },
                    ),
                ],
                "Mild to Moderate",
                "If lasts >3 weeks, produces blood, or with difficulty breathing",
            ),
        ),
        (
            "stomach_pain".into(),
            entry(
                &[
                    "Indigestion",
                    "Food poisoning",
                    "Gastritis",
                    "Appendicitis",
                    "GERD",
                    "IBS",
                ],
                &[
                    "BRAT diet (bananas, rice, applesauce, toast)",
                    "Avoid dairy/fatty foods",
                    "Stay hydrated",
                    "Heat pad",
                ],
                vec![
                    dosed("Antacids (Tums, Rolaids)", "2-4 tablets as needed"),
                    dosed("Pepto-Bismol", "30mL or 2 tablets every 30-60 minutes"),
                    med(
                        "Loperamide (Imodium)",
                        MedSpec {
                            kind: Some("Anti-diarrheal"),
                            dosage: Some("4mg initially, then 2mg after each loose stool"),
                            ..Default::default()
                        },
                    ),
                ],
                "Moderate",
                "If severe pain, lasts >48 hours, vomiting blood, or black stools",
            ),
        ),
        (
            "fatigue".into(),
            entry(
                &[
                    "Lack of sleep",
                    "Stress",
                    "Poor nutrition",
                    "Anemia",
                    "Thyroid issues",
                    "Depression",
                ],
                &[
                    "Regular sleep schedule",
                    "Balanced diet",
                    "Moderate exercise",
                    "Stress management",
                ],
                vec![
                    dosed("Vitamin B complex", "1 tablet daily"),
                    dosed(
                        "Iron supplements (if deficient)",
                        "325mg ferrous sulfate 1-3x daily",
                    ),
                    dosed("Caffeine (moderate)", "200-400mg daily"),
                ],
                "Mild to Moderate",
                "If persists >2 weeks despite lifestyle changes or with other symptoms",
            ),
        ),
        (
            "sore_throat".into(),
            entry(
                &[
                    "Viral infection",
                    "Strep throat",
                    "Allergies",
                    "Dry air",
                    "GERD",
                ],
                &[
                    "Warm salt water gargle",
                    "Stay hydrated",
                    "Humidifier",
                    "Throat lozenges",
                ],
                vec![
                    dosed("Acetaminophen/Ibuprofen", "Standard doses for pain"),
                    dosed("Chloraseptic spray", "2 sprays every 2 hours"),
                    dosed("Zinc lozenges", "1 lozenge every 2-3 hours"),
                ],
                "Mild",
                "If lasts >1 week, difficulty breathing/swallowing, or white patches",
            ),
        ),
        (
            "rash".into(),
            entry(
                &[
                    "Allergic reaction",
                    "Contact dermatitis",
                    "Eczema",
                    "Viral infection",
                    "Fungal infection",
                ],
                &[
                    "Cool compress",
                    "Oatmeal bath",
                    "Avoid scratching",
                    "Moisturize",
                ],
                vec![
                    dosed("Hydrocortisone cream 1%", "Apply thin layer 2-3x daily"),
                    dosed("Diphenhydramine (Benadryl)", "25-50mg every 4-6 hours"),
                    dosed(
                        "Antifungal cream (for fungal rashes)",
                        "Apply 2x daily for 2 weeks",
                    ),
                ],
                "Mild to Moderate",
                "If covers large area, with fever, or spreads quickly",
            ),
        ),
        (
            "nausea".into(),
            entry(
                &sickness_causes,
                &sickness_remedies,
                sickness_medicines(),
                "Mild to Severe",
                sickness_doctor,
            ),
        ),
        (
            "vomiting".into(),
            entry(
                &sickness_causes,
                &sickness_remedies,
                sickness_medicines(),
                "Mild to Severe",
                sickness_doctor,
            ),
        ),
        (
            "motion_sickness".into(),
            entry(
                &[
                    "Travel-related movement",
                    "Visual-vestibular conflict",
                    "Inner ear sensitivity",
                    "Anxiety or anticipation",
                ],
                &[
                    "Ginger capsules or tea",
                    "Peppermint oil (aromatherapy)",
                    "Acupressure wristbands (Sea-Bands)",
                ],
                vec![
                    med(
                        "Dimenhydrinate",
                        MedSpec {
                            brand: Some("Dramamine"),
                            description: Some(
                                "Helps prevent and treat nausea, dizziness, and vomiting. \
                                 Can cause drowsiness. Suitable for short-term use.",
                            ),
                            ..Default::default()
                        },
                    ),
                    med(
                        "Meclizine",
                        MedSpec {
                            brand: Some("Bonine, Antivert"),
                            description: Some(
                                "Longer-lasting than dimenhydrinate. Causes less drowsiness \
                                 in some people. Often used for cruise or air travel.",
                            ),
                            ..Default::default()
                        },
                    ),
                    med(
                        "Cinnarizine",
                        MedSpec {
                            brand: Some("Stugeron"),
                            description: Some(
                                "Used for motion sickness and vertigo. Commonly prescribed \
                                 in Asia and Europe.",
                            ),
                            ..Default::default()
                        },
                    ),
                    med(
                        "Scopolamine patch",
                        MedSpec {
                            brand: Some("Prescription"),
                            description: Some(
                                "Worn behind the ear, effective for long trips (cruise, \
                                 flight). Not for children. May cause dry mouth, drowsiness.",
                            ),
                            ..Default::default()
                        },
                    ),
                ],
                "Mild to Moderate",
                "If symptoms persist despite medication, are severe, or are accompanied by dehydration.",
            ),
        ),
        (
            "back_pain".into(),
            entry(
                &[
                    "Muscle strain or overuse (heavy lifting, poor posture)",
                    "Herniated disc or sciatica (nerve pain down the leg)",
                    "Arthritis (especially in older adults)",
                    "Osteoporosis (weak bones, fractures)",
                    "Kidney issues (if pain is deep, one-sided, with fever or blood in urine)",
                    "Stress and tension",
                ],
                &[
                    "Rest briefly (1–2 days), but avoid long bed rest",
                    "Gentle stretching and walking",
                    "Use a warm compress or heating pad (for muscle tension)",
                    "Use an ice pack (for recent injury or swelling)",
                    "Maintain good posture when sitting or standing",
                    "Gentle back-strengthening exercises (as symptoms improve)",
                    "Consider seeing a physiotherapist for tailored exercises",
                ],
                vec![
                    med(
                        "Paracetamol (acetaminophen)",
                        MedSpec {
                            kind: Some("Pain reliever"),
                            note: Some(
                                "Always follow package directions and consult a doctor if unsure.",
                            ),
                            ..Default::default()
                        },
                    ),
                    med(
                        "Ibuprofen (Advil, Brufen)",
                        MedSpec {
                            kind: Some("NSAID"),
                            warning: Some(
                                "Avoid NSAIDs if you have ulcers, kidney disease, or certain \
                                 other conditions.",
                            ),
                            ..Default::default()
                        },
                    ),
                    med(
                        "Naproxen (Aleve)",
                        MedSpec {
                            kind: Some("NSAID"),
                            warning: Some(
                                "Avoid NSAIDs if you have ulcers, kidney disease, or certain \
                                 other conditions.",
                            ),
                            ..Default::default()
                        },
                    ),
                    med(
                        "Diclofenac gel",
                        MedSpec {
                            kind: Some("Topical cream/gel"),
                            ..Default::default()
                        },
                    ),
                    med(
                        "Capsaicin cream",
                        MedSpec {
                            kind: Some("Topical cream/gel"),
                            ..Default::default()
                        },
                    ),
                ],
                "Mild to Moderate",
                "If pain is severe, lasts more than a few weeks, is associated with fever, \
                 unexplained weight loss, or numbness/weakness in legs.",
            ),
        ),
    ]
}
