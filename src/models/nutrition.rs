use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::enums::{Diet, Gender};
use crate::error::ValidationError;

/// Symptoms offered by the nutrition form.
pub const KNOWN_SYMPTOMS: [&str; 6] = [
    "fatigue",
    "weakness",
    "hair loss",
    "dry skin",
    "weak bones",
    "muscle cramps",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutritionProfile {
    pub age: u32,
    pub gender: Gender,
    pub diet: Diet,
    pub symptoms: BTreeSet<String>,
}

impl NutritionProfile {
    pub fn has_symptom(&self, symptom: &str) -> bool {
        self.symptoms.contains(symptom)
    }
}

/// Raw nutrition form. Age stays optional until validation.
#[derive(Debug, Clone, PartialEq)]
pub struct NutritionForm {
    pub age: Option<u32>,
    pub gender: Gender,
    pub diet: Diet,
    pub symptoms: Vec<String>,
}

impl NutritionForm {
    pub fn into_profile(self) -> Result<NutritionProfile, ValidationError> {
        let age = match self.age {
            Some(age) if age > 0 => age,
            _ => return Err(ValidationError::MissingAge),
        };

        let symptoms: BTreeSet<String> = self
            .symptoms
            .iter()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        for unknown in symptoms.iter().filter(|s| !KNOWN_SYMPTOMS.contains(&s.as_str())) {
            log::warn!("Nutrition profile carries unrecognised symptom {:?}", unknown);
        }

        Ok(NutritionProfile { age, gender: self.gender, diet: self.diet, symptoms })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeficiencyResult {
    pub name: String,
    pub recommended_foods: Vec<String>,
    pub icon: String,
}
