//! Profile and Target MCP Tools
//!
//! Tools for storing the profile and calculating targets from it.

use chrono::NaiveDate;
use serde::Serialize;

use super::{resolve_date, ToolError, ToolResult};
use crate::db::Database;
use crate::models::Profile;
use crate::nutrition::{
    calculate_daily_targets_today, explain_daily_targets, parse_date_of_birth, ActivityLevel,
    BiologicalSex, DailyTargets, Goal, NutritionProfile, TargetBreakdown, UnitSystem,
    ValidationError,
};

/// Response for calculate_targets and calculate_profile_targets
#[derive(Debug, Serialize)]
pub struct CalculateTargetsResponse {
    pub as_of: String,
    pub profile: NutritionProfile,
    pub targets: DailyTargets,
    pub breakdown: TargetBreakdown,
}

/// Response for set_profile
#[derive(Debug, Serialize)]
pub struct SetProfileResponse {
    pub profile: Profile,
    /// Targets the new profile produces today (not saved as goals)
    pub preview: DailyTargets,
}

/// Build calculator input from loosely typed values
pub fn parse_profile(
    unit_system: &str,
    height: f64,
    weight: f64,
    biological_sex: &str,
    date_of_birth: &str,
    activity_level: &str,
    goal: &str,
) -> Result<NutritionProfile, ValidationError> {
    Ok(NutritionProfile {
        unit_system: UnitSystem::from_str(unit_system)?,
        height,
        weight,
        biological_sex: BiologicalSex::from_str(biological_sex)?,
        date_of_birth: parse_date_of_birth(date_of_birth)?,
        activity_level: ActivityLevel::from_str(activity_level)?,
        goal: Goal::from_str(goal)?,
    })
}

fn rejected(e: ValidationError) -> ToolError {
    tracing::warn!(field = e.field(), "Rejected profile: {}", e);
    ToolError::Validation(e)
}

fn calculate(profile: NutritionProfile, as_of: NaiveDate) -> ToolResult<CalculateTargetsResponse> {
    let breakdown = explain_daily_targets(&profile, as_of).map_err(rejected)?;

    Ok(CalculateTargetsResponse {
        as_of: as_of.format("%Y-%m-%d").to_string(),
        profile,
        targets: breakdown.rounded(),
        breakdown,
    })
}

/// Calculate targets for an ad-hoc profile without touching the database
pub fn calculate_targets(
    profile: NutritionProfile,
    as_of: Option<&str>,
) -> ToolResult<CalculateTargetsResponse> {
    calculate(profile, resolve_date(as_of)?)
}

/// Validate and store the profile
pub fn set_profile(db: &Database, profile: NutritionProfile) -> ToolResult<SetProfileResponse> {
    let preview = calculate_daily_targets_today(&profile).map_err(rejected)?;

    let conn = db.get_conn().map_err(ToolError::db("Database error"))?;
    let stored = Profile::set(&conn, &profile).map_err(ToolError::db("Failed to save profile"))?;

    tracing::info!(
        activity_level = %stored.activity_level,
        goal = %stored.goal,
        "Profile updated"
    );

    Ok(SetProfileResponse {
        profile: stored,
        preview,
    })
}

/// Get the stored profile
pub fn get_profile(db: &Database) -> ToolResult<Option<Profile>> {
    let conn = db.get_conn().map_err(ToolError::db("Database error"))?;
    Profile::get(&conn).map_err(ToolError::db("Failed to get profile"))
}

/// Load the stored profile as calculator input
pub(crate) fn load_profile(db: &Database) -> ToolResult<NutritionProfile> {
    let stored = get_profile(db)?.ok_or(ToolError::NoProfile)?;
    stored
        .to_nutrition_profile()
        .map_err(|source| ToolError::Database {
            context: "Stored profile is invalid",
            source,
        })
}

/// Calculate targets from the stored profile without saving them
pub fn calculate_profile_targets(
    db: &Database,
    as_of: Option<&str>,
) -> ToolResult<CalculateTargetsResponse> {
    let profile = load_profile(db)?;
    calculate(profile, resolve_date(as_of)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NutritionProfile {
        parse_profile("metric", 180.0, 80.0, "male", "1996-01-15", "moderately_active", "maintain_weight")
            .unwrap()
    }

    #[test]
    fn test_parse_profile_rejects_unknown_activity() {
        let err = parse_profile("metric", 180.0, 80.0, "male", "1996-01-15", "couch_potato", "maintain_weight")
            .unwrap_err();
        assert_eq!(err.field(), "activity_level");
    }

    #[test]
    fn test_calculate_targets_for_date() {
        let resp = calculate_targets(sample(), Some("2026-03-01")).unwrap();
        assert_eq!(resp.as_of, "2026-03-01");
        assert_eq!(resp.targets.calories, 2760);
        assert_eq!(resp.breakdown.age, 30);
    }

    #[test]
    fn test_calculate_targets_bad_date() {
        assert!(calculate_targets(sample(), Some("03/01/2026")).is_err());
    }

    #[test]
    fn test_calculate_targets_invalid_profile() {
        let mut profile = sample();
        profile.weight = 0.0;
        let err = calculate_targets(profile, Some("2026-03-01")).unwrap_err();
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("weight"));
    }

    #[test]
    fn test_profile_round_trip_through_db() {
        let db = Database::in_memory().unwrap();
        assert!(get_profile(&db).unwrap().is_none());
        assert!(matches!(calculate_profile_targets(&db, None), Err(ToolError::NoProfile)));

        let resp = set_profile(&db, sample()).unwrap();
        assert_eq!(resp.profile.goal, "maintain_weight");
        assert!(resp.preview.calories >= 1500);

        let calc = calculate_profile_targets(&db, Some("2026-03-01")).unwrap();
        assert_eq!(calc.targets.calories, 2760);
    }

    #[test]
    fn test_invalid_profile_not_saved() {
        let db = Database::in_memory().unwrap();
        let mut profile = sample();
        profile.height = 0.0;

        let err = set_profile(&db, profile).unwrap_err();
        assert!(matches!(err, ToolError::Validation(ValidationError::Height(_))));
        assert!(get_profile(&db).unwrap().is_none());
    }

    #[test]
    fn test_future_birth_date_rejected() {
        let db = Database::in_memory().unwrap();
        let mut profile = sample();
        profile.date_of_birth = NaiveDate::from_ymd_opt(2999, 1, 1).unwrap();

        let err = set_profile(&db, profile).unwrap_err();
        assert!(matches!(err, ToolError::Validation(ValidationError::DateOfBirth(_))));
        assert!(get_profile(&db).unwrap().is_none());
    }
}
