use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::enums::TimeOfDay;
use crate::error::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicineEntry {
    pub id: Uuid,
    pub name: String,   // display casing preserved
    pub dosage: String, // free text, e.g. "500mg"
    pub time_of_day: TimeOfDay,
    pub duration_days: u32,
    pub added_at: DateTime<Utc>,
}

/// Raw "add medicine" input as typed by the user.
#[derive(Debug, Clone, PartialEq)]
pub struct MedicineForm {
    pub name: String,
    pub dosage: String,
    pub time_of_day: TimeOfDay,
    pub duration: String,
}

impl MedicineForm {
    pub fn new(name: &str, dosage: &str, time_of_day: TimeOfDay, duration: &str) -> Self {
        Self {
            name: name.to_string(),
            dosage: dosage.to_string(),
            time_of_day,
            duration: duration.to_string(),
        }
    }

    /// Turn the form into a fresh entry, or say which field was unusable.
    pub fn into_entry(self) -> Result<MedicineEntry, ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::Blank("name"));
        }
        if self.dosage.trim().is_empty() {
            return Err(ValidationError::Blank("dosage"));
        }
        let duration = self.duration.trim();
        if duration.is_empty() {
            return Err(ValidationError::Blank("duration"));
        }
        let duration_days = match duration.parse::<u32>() {
            Ok(days) if days > 0 => days,
            _ => return Err(ValidationError::InvalidDuration(self.duration)),
        };

        Ok(MedicineEntry {
            id: Uuid::new_v4(),
            name: self.name,
            dosage: self.dosage,
            time_of_day: self.time_of_day,
            duration_days,
            added_at: Utc::now(),
        })
    }
}

/// Two medicines on the current list that should not be combined.
/// `first` was added before `second`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InteractionFinding {
    pub first: String,
    pub second: String,
}

impl InteractionFinding {
    pub fn warning(&self) -> String {
        format!("Potential interaction detected between {}", self)
    }
}

impl fmt::Display for InteractionFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} and {}", self.first, self.second)
    }
}
