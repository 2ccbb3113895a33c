//! Macronutrient targets
//!
//! Protein from a g/kg rate on the reference weight, fat from a share of calories
//! bounded by body weight, carbohydrate as the remainder.

use super::profile::{ActivityLevel, Goal};

pub const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
pub const KCAL_PER_GRAM_CARBS: f64 = 4.0;
pub const KCAL_PER_GRAM_FAT: f64 = 9.0;

pub const MIN_PROTEIN_PER_KG: f64 = 1.2;
pub const MAX_PROTEIN_PER_KG: f64 = 2.4;
pub const MIN_FAT_PER_KG: f64 = 0.5;
pub const MAX_FAT_PER_KG: f64 = 1.2;

const GOAL_PROTEIN_BONUS: f64 = 0.2;
const SENIOR_PROTEIN_BONUS: f64 = 0.2;
const SENIOR_AGE: u32 = 60;

const FAT_FRACTION_DEFICIT: f64 = 0.25;
const FAT_FRACTION_DEFAULT: f64 = 0.30;

/// Calories are reported in steps of 10 kcal
pub const CALORIE_STEP: f64 = 10.0;
/// Macros are reported in steps of 5 g
pub const GRAM_STEP: f64 = 5.0;

/// Baseline protein rate (g/kg) for an activity level
pub fn base_protein_per_kg(level: ActivityLevel) -> f64 {
    match level {
        ActivityLevel::Sedentary => 1.4,
        ActivityLevel::LightlyActive => 1.6,
        ActivityLevel::ModeratelyActive => 1.8,
        ActivityLevel::VeryActive => 2.0,
        ActivityLevel::Athlete => 2.2,
    }
}

/// Protein rate (g/kg) after goal and age adjustments, clamped to [1.2, 2.4]
pub fn protein_per_kg(level: ActivityLevel, goal: Goal, age: u32) -> f64 {
    let mut rate = base_protein_per_kg(level);

    if matches!(goal, Goal::LoseFat | Goal::GainMuscle) {
        rate += GOAL_PROTEIN_BONUS;
    }
    if age >= SENIOR_AGE {
        rate += SENIOR_PROTEIN_BONUS;
    }

    rate.clamp(MIN_PROTEIN_PER_KG, MAX_PROTEIN_PER_KG)
}

/// Share of calories assigned to fat before weight bounds apply
pub fn fat_fraction(goal: Goal) -> f64 {
    match goal {
        Goal::LoseFat => FAT_FRACTION_DEFICIT,
        Goal::MaintainWeight | Goal::GainMuscle => FAT_FRACTION_DEFAULT,
    }
}

/// Fat grams, bounded to [0.5, 1.2] g per kg of actual weight
pub fn fat_grams(calories: f64, goal: Goal, weight_kg: f64) -> f64 {
    let from_share = calories * fat_fraction(goal) / KCAL_PER_GRAM_FAT;
    from_share.clamp(MIN_FAT_PER_KG * weight_kg, MAX_FAT_PER_KG * weight_kg)
}

/// Carbohydrate grams filling the calories left after protein and fat
pub fn carbs_grams(calories: f64, protein_g: f64, fat_g: f64) -> f64 {
    let used = protein_g * KCAL_PER_GRAM_PROTEIN + fat_g * KCAL_PER_GRAM_FAT;
    ((calories - used) / KCAL_PER_GRAM_CARBS).max(0.0)
}

/// Round to the nearest multiple of `step` (halves away from zero)
pub fn round_to_step(value: f64, step: f64) -> f64 {
    (value / step).round() * step
}
