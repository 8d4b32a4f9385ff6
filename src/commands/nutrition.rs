use crate::models::{DeficiencyResult, NutritionForm, NutritionProfile};
use crate::session::SessionState;

/// Run the deficiency rules over a fresh profile, replacing the previous one
pub fn analyze_nutrition(
    state: &SessionState,
    form: NutritionForm,
) -> Result<Vec<DeficiencyResult>, String> {
    let mut session = state.0.lock().map_err(|e| e.to_string())?;
    session.analyze_nutrition(form).map_err(|e| {
        log::warn!("Nutrition analysis skipped: {}", e);
        e.to_string()
    })
}

/// Last analysed profile and its results, if any analysis has run
pub fn get_last_analysis(
    state: &SessionState,
) -> Result<Option<(NutritionProfile, Vec<DeficiencyResult>)>, String> {
    let session = state.0.lock().map_err(|e| e.to_string())?;
    Ok(session
        .profile()
        .map(|profile| (profile.clone(), session.deficiencies().to_vec())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Diet, Gender};

    #[test]
    fn analysis_is_stored_for_later_queries() {
        let state = SessionState::new();
        assert!(get_last_analysis(&state).unwrap().is_none());

        let form = NutritionForm {
            age: Some(45),
            gender: Gender::Female,
            diet: Diet::Vegetarian,
            symptoms: vec![],
        };
        let results = analyze_nutrition(&state, form).unwrap();
        assert_eq!(results[0].name, "Vitamin B12");

        let (profile, stored) = get_last_analysis(&state).unwrap().unwrap();
        assert_eq!(profile.age, 45);
        assert_eq!(stored, results);
    }

    #[test]
    fn missing_age_is_refused() {
        let state = SessionState::new();
        let form = NutritionForm {
            age: None,
            gender: Gender::Male,
            diet: Diet::NonVegetarian,
            symptoms: vec!["fatigue".into()],
        };
        assert_eq!(analyze_nutrition(&state, form).unwrap_err(), "validation failed: age");
        assert!(get_last_analysis(&state).unwrap().is_none());
    }
}
