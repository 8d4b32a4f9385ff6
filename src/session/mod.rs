use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Mutex;
use uuid::Uuid;

use crate::error::ValidationError;
use crate::models::{
    ChatTurn, DeficiencyResult, InteractionFinding, MedicineEntry, MedicineForm, NutritionForm,
    NutritionProfile, TimeOfDay,
};
use crate::services::{interactions, nutrition, symptoms};

/// Shared handle given to every command.
pub struct SessionState(pub Mutex<Session>);

impl SessionState {
    pub fn new() -> Self {
        Self(Mutex::new(Session::new()))
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

/// Medicine list together with the findings derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MedicineSnapshot {
    pub medicines: Vec<MedicineEntry>,
    pub findings: Vec<InteractionFinding>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleSlot {
    pub time_of_day: TimeOfDay,
    pub medicines: Vec<MedicineEntry>,
}

/// All mutable per-user state. The engines it calls hold none.
#[derive(Debug)]
pub struct Session {
    medicines: Vec<MedicineEntry>,
    findings: Vec<InteractionFinding>,
    conversation: Vec<ChatTurn>,
    pending_query: Option<String>,
    profile: Option<NutritionProfile>,
    deficiencies: Vec<DeficiencyResult>,
    started_at: DateTime<Utc>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            medicines: Vec::new(),
            findings: Vec::new(),
            conversation: Vec::new(),
            pending_query: None,
            profile: None,
            deficiencies: Vec::new(),
            started_at: Utc::now(),
        }
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    // ── Medicines ──────────────────────────────────────────

    pub fn medicines(&self) -> &[MedicineEntry] {
        &self.medicines
    }

    pub fn findings(&self) -> &[InteractionFinding] {
        &self.findings
    }

    pub fn medicine_snapshot(&self) -> MedicineSnapshot {
        MedicineSnapshot {
            medicines: self.medicines.clone(),
            findings: self.findings.clone(),
        }
    }

    /// Append a validated entry and rescan the whole list for interactions.
    pub fn add_medicine(&mut self, form: MedicineForm) -> Result<MedicineSnapshot, ValidationError> {
        let entry = form.into_entry()?;
        log::info!("Medicine added: {} ({}, {})", entry.name, entry.dosage, entry.time_of_day);
        self.medicines.push(entry);
        self.refresh_findings();
        Ok(self.medicine_snapshot())
    }

    /// Unknown ids leave the list as it is.
    pub fn remove_medicine(&mut self, id: Uuid) -> MedicineSnapshot {
        let before = self.medicines.len();
        self.medicines.retain(|m| m.id != id);
        if self.medicines.len() != before {
            log::info!("Medicine {} removed", id);
        }
        self.refresh_findings();
        self.medicine_snapshot()
    }

    fn refresh_findings(&mut self) {
        let findings = interactions::find_interactions(&self.medicines);
        if findings.len() != self.findings.len() {
            log::info!("Interaction findings: {} -> {}", self.findings.len(), findings.len());
        }
        self.findings = findings;
    }

    /// Today's schedule, one slot per time of day, list order within a slot.
    pub fn schedule(&self) -> Vec<ScheduleSlot> {
        TimeOfDay::ALL
            .iter()
            .map(|&slot| ScheduleSlot {
                time_of_day: slot,
                medicines: self.in_slot(slot),
            })
            .collect()
    }

    pub fn medicines_due(&self, hour: u32) -> Vec<MedicineEntry> {
        self.in_slot(TimeOfDay::from_hour(hour))
    }

    fn in_slot(&self, slot: TimeOfDay) -> Vec<MedicineEntry> {
        self.medicines
            .iter()
            .filter(|m| m.time_of_day == slot)
            .cloned()
            .collect()
    }

    // ── Symptom conversation ───────────────────────────────

    pub fn conversation(&self) -> &[ChatTurn] {
        &self.conversation
    }

    /// True while a user turn is waiting for its assistant reply.
    pub fn is_typing(&self) -> bool {
        self.pending_query.is_some()
    }

    /// Log the user turn and mark the reply as pending.
    pub fn begin_exchange(&mut self, text: &str) -> Result<ChatTurn, ValidationError> {
        if text.trim().is_empty() {
            return Err(ValidationError::Blank("symptoms"));
        }
        if self.is_typing() {
            return Err(ValidationError::ExchangePending);
        }

        let turn = ChatTurn::user(text);
        self.conversation.push(turn.clone());
        self.pending_query = Some(text.to_string());
        log::info!("Symptom query received ({} chars)", text.chars().count());
        Ok(turn)
    }

    /// Classify the pending query and append the assistant turn.
    /// Returns `None` when nothing was pending.
    pub fn complete_exchange(&mut self) -> Option<ChatTurn> {
        let query = self.pending_query.take()?;
        let outcome = symptoms::classify(&query);
        log::info!("Symptom query classified as {:?}", outcome);

        let turn = ChatTurn::assistant(outcome.reply_text());
        self.conversation.push(turn.clone());
        Some(turn)
    }

    // ── Nutrition ──────────────────────────────────────────

    pub fn profile(&self) -> Option<&NutritionProfile> {
        self.profile.as_ref()
    }

    pub fn deficiencies(&self) -> &[DeficiencyResult] {
        &self.deficiencies
    }

    /// Replace the stored profile and its results wholesale.
    pub fn analyze_nutrition(
        &mut self,
        form: NutritionForm,
    ) -> Result<Vec<DeficiencyResult>, ValidationError> {
        let profile = form.into_profile()?;
        let results = nutrition::analyze(&profile);
        log::info!(
            "Nutrition analysis for age {} ({}): {} result(s)",
            profile.age,
            profile.diet,
            results.len()
        );

        self.profile = Some(profile);
        self.deficiencies = results.clone();
        Ok(results)
    }
}
