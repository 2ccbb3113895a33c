//! Nutrition target calculation module
//!
//! Turns a biometric profile, activity level and goal into daily calorie and
//! macronutrient targets.

pub mod body;
pub mod energy;
pub mod macros;
pub mod profile;
pub mod targets;
pub mod units;
mod validation;

pub use profile::{
    age_on, parse_date_of_birth, ActivityLevel, BiologicalSex, Biometrics, Goal,
    NutritionProfile,
};
pub use targets::{
    calculate_daily_targets, calculate_daily_targets_today, explain_daily_targets, DailyTargets,
    TargetBreakdown,
};
pub use units::UnitSystem;
pub use validation::ValidationError;
