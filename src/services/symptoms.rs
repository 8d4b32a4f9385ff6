use serde::Serialize;

/// Symptom Checker
/// Keyword-threshold classifier from free text to a condition label

/// A rule fires when at least this many of its keywords appear in the text.
pub const MATCH_THRESHOLD: usize = 2;

pub const INSUFFICIENT_INFO_TEXT: &str = "Please describe your symptoms more specifically";

pub const DISCLAIMER: &str =
    "⚠️ This is not medical advice. Please consult a healthcare professional for proper diagnosis.";

/// Comma-joined keywords to condition label. Evaluated top to bottom and the
/// last firing rule wins, so a broader rule listed after a narrower one
/// overrides it. "fever,cough" sits above the three-keyword flu rule so that
/// the flu rule takes over when headache is also mentioned.
const SYMPTOM_RULES: &[(&str, &str)] = &[
    ("fever,cough", "Upper Respiratory Infection"),
    ("fever,cough,headache", "Common Cold or Flu"),
    ("headache,nausea", "Migraine or Tension Headache"),
    ("fever,fatigue", "Viral Infection"),
    ("cough,chest pain", "Bronchitis or Pneumonia"),
    ("stomach pain,nausea", "Gastroenteritis"),
    ("fatigue,weakness", "Anemia or Vitamin Deficiency"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "label", rename_all = "snake_case")]
pub enum Classification {
    Condition(&'static str),
    InsufficientInfo,
}

impl Classification {
    /// Assistant reply for this outcome. Only a named condition carries the disclaimer.
    pub fn reply_text(&self) -> String {
        match self {
            Classification::Condition(label) => {
                format!("Based on your symptoms, you might have: {}. {}", label, DISCLAIMER)
            }
            Classification::InsufficientInfo => INSUFFICIENT_INFO_TEXT.to_string(),
        }
    }
}

pub fn rule_count() -> usize {
    SYMPTOM_RULES.len()
}

/// Classify free text. Keywords match as plain substrings of the lower-cased input.
pub fn classify(text: &str) -> Classification {
    let text = text.to_lowercase();
    let mut outcome = Classification::InsufficientInfo;

    for &(keys, label) in SYMPTOM_RULES {
        let hits = keys.split(',').filter(|k| text.contains(k)).count();
        if hits >= MATCH_THRESHOLD {
            log::debug!("Symptom rule {:?} matched {} keywords", keys, hits);
            outcome = Classification::Condition(label);
        }
    }

    outcome
}
