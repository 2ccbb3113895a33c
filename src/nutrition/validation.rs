//! Input validation errors
//!
//! Every rejection names the offending field and carries the value that was supplied.

use thiserror::Error;

/// Validation error raised at the calculator boundary
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Invalid height: {0} (must be a finite positive value between 50 and 300 cm once normalized)")]
    Height(f64),

    #[error("Invalid weight: {0} (must be a finite positive value between 20 and 500 kg once normalized)")]
    Weight(f64),

    #[error("Invalid date of birth: {0}")]
    DateOfBirth(String),

    #[error("Unknown unit system '{0}' (expected: metric, imperial)")]
    UnitSystem(String),

    #[error("Unknown biological sex '{0}' (expected: female, male, other)")]
    BiologicalSex(String),

    #[error("Unknown activity level '{0}' (expected: sedentary, lightly_active, moderately_active, very_active, athlete)")]
    ActivityLevel(String),

    #[error("Unknown goal '{0}' (expected: lose_fat, maintain_weight, gain_muscle)")]
    Goal(String),

    #[error("Invalid {field}: {value}")]
    GoalValue { field: &'static str, value: f64 },
}

impl ValidationError {
    /// Name of the field that failed validation
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::Height(_) => "height",
            ValidationError::Weight(_) => "weight",
            ValidationError::DateOfBirth(_) => "date_of_birth",
            ValidationError::UnitSystem(_) => "unit_system",
            ValidationError::BiologicalSex(_) => "biological_sex",
            ValidationError::ActivityLevel(_) => "activity_level",
            ValidationError::Goal(_) => "goal",
            ValidationError::GoalValue { field, .. } => field,
        }
    }
}
