use uuid::Uuid;

use crate::models::{MedicineEntry, MedicineForm};
use crate::session::{MedicineSnapshot, ScheduleSlot, SessionState};

/// Add a medicine and rescan for interactions
pub fn add_medicine(state: &SessionState, form: MedicineForm) -> Result<MedicineSnapshot, String> {
    let mut session = state.0.lock().map_err(|e| e.to_string())?;
    session.add_medicine(form).map_err(|e| {
        log::warn!("Medicine not added: {}", e);
        e.to_string()
    })
}

/// Remove a medicine by id and rescan for interactions
pub fn remove_medicine(state: &SessionState, id: Uuid) -> Result<MedicineSnapshot, String> {
    let mut session = state.0.lock().map_err(|e| e.to_string())?;
    Ok(session.remove_medicine(id))
}

pub fn get_medicines(state: &SessionState) -> Result<MedicineSnapshot, String> {
    let session = state.0.lock().map_err(|e| e.to_string())?;
    Ok(session.medicine_snapshot())
}

/// Today's schedule grouped by time of day
pub fn get_schedule(state: &SessionState) -> Result<Vec<ScheduleSlot>, String> {
    let session = state.0.lock().map_err(|e| e.to_string())?;
    Ok(session.schedule())
}

/// Medicines due in the slot containing `hour` (0-23)
pub fn get_medicines_due(state: &SessionState, hour: u32) -> Result<Vec<MedicineEntry>, String> {
    if hour > 23 {
        return Err(format!("Invalid hour: {}", hour));
    }
    let session = state.0.lock().map_err(|e| e.to_string())?;
    Ok(session.medicines_due(hour))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeOfDay;

    #[test]
    fn add_and_remove_through_shared_state() {
        let state = SessionState::new();
        add_medicine(&state, MedicineForm::new("Aspirin", "75mg", TimeOfDay::Morning, "30")).unwrap();
        let snapshot =
            add_medicine(&state, MedicineForm::new("ibuprofen", "200mg", TimeOfDay::Afternoon, "3"))
                .unwrap();
        assert_eq!(snapshot.findings[0].to_string(), "Aspirin and ibuprofen");

        let removed = remove_medicine(&state, snapshot.medicines[0].id).unwrap();
        assert_eq!(removed.medicines.len(), 1);
        assert!(removed.findings.is_empty());
        assert_eq!(get_medicines(&state).unwrap(), removed);
    }

    #[test]
    fn rejection_is_reported_as_text() {
        let state = SessionState::new();
        let err = add_medicine(&state, MedicineForm::new("", "75mg", TimeOfDay::Morning, "30"))
            .unwrap_err();
        assert_eq!(err, "validation failed: name");
        assert!(get_medicines(&state).unwrap().medicines.is_empty());
    }

    #[test]
    fn hour_out_of_range_is_refused() {
        let state = SessionState::new();
        assert!(get_medicines_due(&state, 24).is_err());
        assert!(get_medicines_due(&state, 23).unwrap().is_empty());
    }

    #[test]
    fn schedule_always_lists_three_slots() {
        let state = SessionState::new();
        let slots = get_schedule(&state).unwrap();
        assert_eq!(slots.len(), 3);
        assert!(slots.iter().all(|s| s.medicines.is_empty()));
    }
}
