//! Energy expenditure and calorie targets
//!
//! Mifflin-St Jeor (1990) basal metabolic rate, activity multipliers, and the
//! goal-adjusted calorie target with its safety floor.

use super::profile::{ActivityLevel, BiologicalSex, Goal};

const MSJ_WEIGHT_COEF: f64 = 10.0;
const MSJ_HEIGHT_COEF: f64 = 6.25;
const MSJ_AGE_COEF: f64 = 5.0;
const MSJ_MALE_CONSTANT: f64 = 5.0;
const MSJ_FEMALE_CONSTANT: f64 = -161.0;
/// Midpoint of the male and female constants; not a published value
const MSJ_OTHER_CONSTANT: f64 = -78.0;

const DEFICIT_MULTIPLIER: f64 = 0.8;
const SURPLUS_MULTIPLIER: f64 = 1.1;

const FLOOR_TDEE_FRACTION: f64 = 0.85;
const FLOOR_BMR_FRACTION: f64 = 1.05;
pub const MALE_CALORIE_FLOOR: f64 = 1500.0;
pub const DEFAULT_CALORIE_FLOOR: f64 = 1200.0;

/// Sex-dependent constant of the Mifflin-St Jeor equation
pub fn sex_constant(sex: BiologicalSex) -> f64 {
    match sex {
        BiologicalSex::Male => MSJ_MALE_CONSTANT,
        BiologicalSex::Female => MSJ_FEMALE_CONSTANT,
        BiologicalSex::Other => MSJ_OTHER_CONSTANT,
    }
}

/// Basal metabolic rate in kcal/day
///
/// BMR = 10 x weight_kg + 6.25 x height_cm - 5 x age + sex constant
pub fn basal_metabolic_rate(weight_kg: f64, height_cm: f64, age: u32, sex: BiologicalSex) -> f64 {
    MSJ_WEIGHT_COEF * weight_kg + MSJ_HEIGHT_COEF * height_cm - MSJ_AGE_COEF * f64::from(age)
        + sex_constant(sex)
}

/// Activity multiplier applied to BMR
pub fn activity_factor(level: ActivityLevel) -> f64 {
    match level {
        ActivityLevel::Sedentary => 1.2,
        ActivityLevel::LightlyActive => 1.375,
        ActivityLevel::ModeratelyActive => 1.55,
        ActivityLevel::VeryActive => 1.725,
        ActivityLevel::Athlete => 1.9,
    }
}

/// Total daily energy expenditure in kcal/day
pub fn total_daily_energy_expenditure(bmr: f64, level: ActivityLevel) -> f64 {
    bmr * activity_factor(level)
}

/// Multiplier turning TDEE into the goal's candidate intake
pub fn goal_multiplier(goal: Goal) -> f64 {
    match goal {
        Goal::LoseFat => DEFICIT_MULTIPLIER,
        Goal::MaintainWeight => 1.0,
        Goal::GainMuscle => SURPLUS_MULTIPLIER,
    }
}

/// Absolute minimum intake regardless of expenditure
pub fn sex_calorie_floor(sex: BiologicalSex) -> f64 {
    if sex.is_male_coded() {
        MALE_CALORIE_FLOOR
    } else {
        DEFAULT_CALORIE_FLOOR
    }
}

/// Daily calorie target (unrounded)
///
/// The goal-adjusted intake, raised to at least the smaller of 85% TDEE and
/// 105% BMR, and to at least the sex floor.
pub fn calorie_target(bmr: f64, tdee: f64, goal: Goal, sex: BiologicalSex) -> f64 {
    let candidate = tdee * goal_multiplier(goal);
    let metabolic_floor = (tdee * FLOOR_TDEE_FRACTION).min(bmr * FLOOR_BMR_FRACTION);

    candidate.max(metabolic_floor).max(sex_calorie_floor(sex))
}
