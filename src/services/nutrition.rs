use crate::models::{DeficiencyResult, Diet, NutritionProfile};

/// Nutrition Deficiency Analyzer
/// Independent predicate rules over a profile, each contributing one food bundle

/// What makes a rule fire.
#[derive(Debug, Clone, Copy)]
enum Trigger {
    /// Any of these symptoms is present.
    AnySymptom(&'static [&'static str]),
    /// Diet matches and age is strictly above the cutoff.
    DietOverAge { diet: Diet, age_above: u32 },
}

impl Trigger {
    fn fires(&self, profile: &NutritionProfile) -> bool {
        match *self {
            Trigger::AnySymptom(symptoms) => symptoms.iter().any(|s| profile.has_symptom(s)),
            Trigger::DietOverAge { diet, age_above } => {
                profile.diet == diet && profile.age > age_above
            }
        }
    }
}

#[derive(Debug)]
struct DeficiencyRule {
    trigger: Trigger,
    name: &'static str,
    foods: &'static [&'static str],
    icon: &'static str,
}

impl DeficiencyRule {
    fn result(&self) -> DeficiencyResult {
        DeficiencyResult {
            name: self.name.to_string(),
            recommended_foods: self.foods.iter().map(|f| f.to_string()).collect(),
            icon: self.icon.to_string(),
        }
    }
}

const FATIGUE: &[&str] = &["fatigue", "weakness"];

/// Every rule is checked; several may fire, including two Vitamin B12 bundles.
const DEFICIENCY_RULES: &[DeficiencyRule] = &[
    DeficiencyRule {
        trigger: Trigger::AnySymptom(FATIGUE),
        name: "Iron Deficiency",
        foods: &["Spinach", "Red Meat", "Lentils", "Tofu"],
        icon: "🥬",
    },
    DeficiencyRule {
        trigger: Trigger::AnySymptom(FATIGUE),
        name: "Vitamin B12",
        foods: &["Eggs", "Dairy", "Fortified Cereals", "Fish"],
        icon: "🥚",
    },
    DeficiencyRule {
        trigger: Trigger::AnySymptom(&["hair loss", "dry skin"]),
        name: "Vitamin D",
        foods: &["Sunlight", "Salmon", "Egg Yolks", "Fortified Milk"],
        icon: "☀️",
    },
    DeficiencyRule {
        trigger: Trigger::AnySymptom(&["weak bones", "muscle cramps"]),
        name: "Calcium",
        foods: &["Milk", "Cheese", "Broccoli", "Almonds"],
        icon: "🥛",
    },
    DeficiencyRule {
        trigger: Trigger::DietOverAge { diet: Diet::Vegetarian, age_above: 40 },
        name: "Vitamin B12",
        foods: &["Fortified Cereals", "Nutritional Yeast", "Plant Milk"],
        icon: "🌾",
    },
];

const NO_DEFICIENCY: DeficiencyRule = DeficiencyRule {
    trigger: Trigger::AnySymptom(&[]),
    name: "No Major Deficiencies Detected",
    foods: &["Maintain Balanced Diet", "Stay Hydrated", "Regular Exercise"],
    icon: "✅",
};

pub const NO_DEFICIENCY_NAME: &str = NO_DEFICIENCY.name;

pub fn rule_count() -> usize {
    DEFICIENCY_RULES.len()
}

/// Evaluate every rule in table order. Never returns an empty list.
pub fn analyze(profile: &NutritionProfile) -> Vec<DeficiencyResult> {
    let results: Vec<DeficiencyResult> = DEFICIENCY_RULES
        .iter()
        .filter(|rule| rule.trigger.fires(profile))
        .map(DeficiencyRule::result)
        .collect();

    if results.is_empty() {
        vec![NO_DEFICIENCY.result()]
    } else {
        results
    }
}
