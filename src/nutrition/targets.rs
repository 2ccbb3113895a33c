//! Daily nutrition targets
//!
//! Ties the formulas together: normalize, estimate expenditure, set calories,
//! split macros, then round once at the end.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use super::body::{body_mass_index, ideal_body_weight_kg, protein_reference_weight_kg};
use super::energy::{basal_metabolic_rate, calorie_target, total_daily_energy_expenditure};
use super::macros::{
    carbs_grams, fat_grams, protein_per_kg, round_to_step, CALORIE_STEP, GRAM_STEP,
};
use super::profile::NutritionProfile;
use super::ValidationError;

/// Rounded daily calorie and macro targets
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyTargets {
    /// kcal, multiple of 10
    pub calories: u32,
    /// grams, multiple of 5
    pub protein_grams: f64,
    /// grams, multiple of 5
    pub fat_grams: f64,
    /// grams, multiple of 5
    pub carbs_grams: f64,
}

/// Unrounded intermediates behind a set of targets
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TargetBreakdown {
    pub height_cm: f64,
    pub weight_kg: f64,
    pub age: u32,
    pub body_mass_index: f64,
    pub ideal_body_weight_kg: f64,
    pub protein_reference_weight_kg: f64,
    pub basal_metabolic_rate: f64,
    pub total_daily_energy_expenditure: f64,
    pub calories: f64,
    pub protein_per_kg: f64,
    pub protein_grams: f64,
    pub fat_grams: f64,
    pub carbs_grams: f64,
}

impl TargetBreakdown {
    /// Output-stage rounding: calories to 10 kcal, macros to 5 g
    pub fn rounded(&self) -> DailyTargets {
        DailyTargets {
            calories: round_to_step(self.calories, CALORIE_STEP) as u32,
            protein_grams: round_to_step(self.protein_grams, GRAM_STEP),
            fat_grams: round_to_step(self.fat_grams, GRAM_STEP),
            carbs_grams: round_to_step(self.carbs_grams, GRAM_STEP),
        }
    }
}

/// Compute the full breakdown for `profile` as of `today`
///
/// # Errors
///
/// Returns a `ValidationError` naming the first invalid field; nothing is computed
/// for invalid input.
pub fn explain_daily_targets(
    profile: &NutritionProfile,
    today: NaiveDate,
) -> Result<TargetBreakdown, ValidationError> {
    let bio = profile.normalize(today)?;
    let sex = profile.biological_sex;

    let bmi = body_mass_index(bio.weight_kg, bio.height_cm);
    let ideal_kg = ideal_body_weight_kg(bio.height_cm, sex);
    let reference_kg = protein_reference_weight_kg(bio.weight_kg, bmi, ideal_kg);

    let bmr = basal_metabolic_rate(bio.weight_kg, bio.height_cm, bio.age, sex);
    let tdee = total_daily_energy_expenditure(bmr, profile.activity_level);
    let calories = calorie_target(bmr, tdee, profile.goal, sex);

    let protein_rate = protein_per_kg(profile.activity_level, profile.goal, bio.age);
    let protein_g = protein_rate * reference_kg;
    let fat_g = fat_grams(calories, profile.goal, bio.weight_kg);
    let carbs_g = carbs_grams(calories, protein_g, fat_g);

    tracing::debug!(
        bmr,
        tdee,
        calories,
        protein_g,
        fat_g,
        carbs_g,
        "Calculated targets for {} / {}",
        profile.activity_level.as_str(),
        profile.goal.as_str()
    );

    Ok(TargetBreakdown {
        height_cm: bio.height_cm,
        weight_kg: bio.weight_kg,
        age: bio.age,
        body_mass_index: bmi,
        ideal_body_weight_kg: ideal_kg,
        protein_reference_weight_kg: reference_kg,
        basal_metabolic_rate: bmr,
        total_daily_energy_expenditure: tdee,
        calories,
        protein_per_kg: protein_rate,
        protein_grams: protein_g,
        fat_grams: fat_g,
        carbs_grams: carbs_g,
    })
}

/// Rounded daily targets for `profile` as of `today`
pub fn calculate_daily_targets(
    profile: &NutritionProfile,
    today: NaiveDate,
) -> Result<DailyTargets, ValidationError> {
    explain_daily_targets(profile, today).map(|b| b.rounded())
}

/// Rounded daily targets using the local calendar date
pub fn calculate_daily_targets_today(
    profile: &NutritionProfile,
) -> Result<DailyTargets, ValidationError> {
    calculate_daily_targets(profile, Local::now().date_naive())
}
