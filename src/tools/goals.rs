//! Daily Goals MCP Tools
//!
//! Tools for recording goal records and reading the goal history.

use serde::Serialize;

use super::targets::load_profile;
use super::{parse_date, resolve_date, ToolError, ToolResult};
use crate::db::Database;
use crate::models::{DailyGoals, DailyGoalsCreate, GoalSource};
use crate::nutrition::{explain_daily_targets, DailyTargets, TargetBreakdown};

/// Response for apply_calculated_goals
#[derive(Debug, Serialize)]
pub struct ApplyGoalsResponse {
    pub goals: DailyGoals,
    pub breakdown: TargetBreakdown,
    /// Goals that were in effect on the date before this record
    pub previous: Option<DailyTargets>,
}

/// Response for get_current_goals
#[derive(Debug, Serialize)]
pub struct CurrentGoalsResponse {
    pub date: String,
    pub goals: Option<DailyGoals>,
}

/// Goal record summary for listing
#[derive(Debug, Serialize)]
pub struct GoalSummary {
    pub id: i64,
    pub effective_date: String,
    pub calories: u32,
    pub protein_grams: f64,
    pub fat_grams: f64,
    pub carbs_grams: f64,
    pub source: GoalSource,
}

/// Response for list_goal_history
#[derive(Debug, Serialize)]
pub struct GoalHistoryResponse {
    pub records: Vec<GoalSummary>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

/// Response for delete_goal_record
#[derive(Debug, Serialize)]
pub struct DeleteGoalResponse {
    pub success: bool,
    pub id: i64,
    pub message: String,
}

/// Calculate targets from the stored profile and record them as goals
///
/// Age is taken as of the effective date.
pub fn apply_calculated_goals(
    db: &Database,
    effective_date: Option<&str>,
    notes: Option<String>,
) -> ToolResult<ApplyGoalsResponse> {
    let date = resolve_date(effective_date)?;
    let profile = load_profile(db)?;
    let breakdown = explain_daily_targets(&profile, date)?;

    let date_str = date.format("%Y-%m-%d").to_string();
    let conn = db.get_conn().map_err(ToolError::db("Database error"))?;

    let previous = DailyGoals::current(&conn, &date_str)
        .map_err(ToolError::db("Failed to get current goals"))?
        .map(|g| g.targets());

    let goals = DailyGoals::create(
        &conn,
        &DailyGoalsCreate {
            effective_date: date_str,
            targets: breakdown.rounded(),
            source: GoalSource::Calculated,
            notes,
        },
    )
    .map_err(ToolError::db("Failed to save goals"))?;

    tracing::info!(
        id = goals.id,
        calories = goals.calories,
        "Applied calculated goals effective {}",
        goals.effective_date
    );

    Ok(ApplyGoalsResponse {
        goals,
        breakdown,
        previous,
    })
}

/// Record goals entered directly
pub fn set_manual_goals(
    db: &Database,
    effective_date: Option<&str>,
    targets: DailyTargets,
    notes: Option<String>,
) -> ToolResult<DailyGoals> {
    let date = resolve_date(effective_date)?;
    let conn = db.get_conn().map_err(ToolError::db("Database error"))?;

    let goals = DailyGoals::create(
        &conn,
        &DailyGoalsCreate {
            effective_date: date.format("%Y-%m-%d").to_string(),
            targets,
            source: GoalSource::Manual,
            notes,
        },
    )
    .map_err(ToolError::db("Failed to save goals"))?;

    tracing::info!(
        id = goals.id,
        calories = goals.calories,
        "Set manual goals effective {}",
        goals.effective_date
    );

    Ok(goals)
}

/// Get the goals in effect on a date (default today)
pub fn get_current_goals(db: &Database, date: Option<&str>) -> ToolResult<CurrentGoalsResponse> {
    let date = resolve_date(date)?.format("%Y-%m-%d").to_string();
    let conn = db.get_conn().map_err(ToolError::db("Database error"))?;

    let goals = DailyGoals::current(&conn, &date)
        .map_err(ToolError::db("Failed to get current goals"))?;

    Ok(CurrentGoalsResponse { date, goals })
}

fn iso_bound(date: &str) -> ToolResult<String> {
    Ok(parse_date(date)?.format("%Y-%m-%d").to_string())
}

/// List goal records with optional effective date range
pub fn list_goal_history(
    db: &Database,
    start_date: Option<&str>,
    end_date: Option<&str>,
    limit: i64,
    offset: i64,
) -> ToolResult<GoalHistoryResponse> {
    let limit = limit.clamp(1, 200);
    let offset = offset.max(0);

    // Bounds are compared as text in SQL, so normalize them to ISO first
    let start = start_date.map(iso_bound).transpose()?;
    let end = end_date.map(iso_bound).transpose()?;

    let conn = db.get_conn().map_err(ToolError::db("Database error"))?;

    let records = DailyGoals::history(&conn, start.as_deref(), end.as_deref(), limit, offset)
        .map_err(ToolError::db("Failed to list goals"))?;

    let total = DailyGoals::count(&conn, start.as_deref(), end.as_deref())
        .map_err(ToolError::db("Failed to count goals"))?;

    let records = records
        .into_iter()
        .map(|g| GoalSummary {
            id: g.id,
            effective_date: g.effective_date,
            calories: g.calories,
            protein_grams: g.protein_grams,
            fat_grams: g.fat_grams,
            carbs_grams: g.carbs_grams,
            source: g.source,
        })
        .collect();

    Ok(GoalHistoryResponse {
        records,
        total,
        limit,
        offset,
    })
}

/// Delete a goal record by ID
pub fn delete_goal_record(db: &Database, id: i64) -> ToolResult<DeleteGoalResponse> {
    let conn = db.get_conn().map_err(ToolError::db("Database error"))?;

    let deleted = DailyGoals::delete(&conn, id)
        .map_err(ToolError::db("Failed to delete goal record"))?;

    Ok(DeleteGoalResponse {
        success: deleted,
        id,
        message: if deleted {
            format!("Goal record {} deleted", id)
        } else {
            format!("Goal record {} not found", id)
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::targets::{parse_profile, set_profile};

    fn db_with_profile() -> Database {
        let db = Database::in_memory().unwrap();
        let profile = parse_profile(
            "metric", 180.0, 80.0, "male", "1996-01-15", "moderately_active", "maintain_weight",
        )
        .unwrap();
        set_profile(&db, profile).unwrap();
        db
    }

    fn manual(calories: u32) -> DailyTargets {
        DailyTargets {
            calories,
            protein_grams: 150.0,
            fat_grams: 70.0,
            carbs_grams: 200.0,
        }
    }

    #[test]
    fn test_apply_requires_profile() {
        let db = Database::in_memory().unwrap();
        let err = apply_calculated_goals(&db, Some("2026-03-01"), None).unwrap_err();
        assert!(matches!(err, ToolError::NoProfile));
        assert!(err.to_string().contains("set_profile"));
    }

    #[test]
    fn test_apply_calculated_goals() {
        let db = db_with_profile();

        let first = apply_calculated_goals(&db, Some("2026-03-01"), None).unwrap();
        assert_eq!(first.goals.calories, 2760);
        assert_eq!(first.goals.source, GoalSource::Calculated);
        assert!(first.previous.is_none());

        let second = apply_calculated_goals(&db, Some("2026-04-01"), Some("recheck".into())).unwrap();
        assert_eq!(second.previous, Some(first.goals.targets()));
        assert_eq!(second.goals.notes.as_deref(), Some("recheck"));
    }

    #[test]
    fn test_manual_goals_override_calculated() {
        let db = db_with_profile();
        apply_calculated_goals(&db, Some("2026-03-01"), None).unwrap();
        set_manual_goals(&db, Some("2026-03-10"), manual(2500), None).unwrap();

        let before = get_current_goals(&db, Some("2026-03-05")).unwrap();
        assert_eq!(before.goals.unwrap().calories, 2760);

        let after = get_current_goals(&db, Some("2026-03-15")).unwrap();
        let goals = after.goals.unwrap();
        assert_eq!(goals.calories, 2500);
        assert_eq!(goals.source, GoalSource::Manual);
    }

    #[test]
    fn test_manual_goals_validated() {
        let db = Database::in_memory().unwrap();
        let err = set_manual_goals(&db, Some("2026-03-10"), manual(0), None).unwrap_err();
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains("calories"));
    }

    #[test]
    fn test_history_clamps_limit() {
        let db = Database::in_memory().unwrap();
        for day in 1..=5 {
            let date = format!("2026-01-0{}", day);
            set_manual_goals(&db, Some(&date), manual(2000 + day * 10), None).unwrap();
        }

        let resp = list_goal_history(&db, None, None, 0, -3).unwrap();
        assert_eq!(resp.limit, 1);
        assert_eq!(resp.offset, 0);
        assert_eq!(resp.total, 5);
        assert_eq!(resp.records.len(), 1);
        assert_eq!(resp.records[0].effective_date, "2026-01-05");

        let resp = list_goal_history(&db, Some("2026-01-02"), Some("2026-01-03"), 50, 0).unwrap();
        assert_eq!(resp.total, 2);
    }

    #[test]
    fn test_history_rejects_malformed_bounds() {
        let db = Database::in_memory().unwrap();
        set_manual_goals(&db, Some("2026-01-05"), manual(2000), None).unwrap();
        set_manual_goals(&db, Some("2026-03-05"), manual(2100), None).unwrap();

        let err = list_goal_history(&db, Some("2026-1-1x"), None, 50, 0).unwrap_err();
        assert!(matches!(err, ToolError::Date(ref s) if s == "2026-1-1x"));
        assert!(matches!(
            list_goal_history(&db, None, Some("garbage"), 50, 0),
            Err(ToolError::Date(_))
        ));

        // Unpadded dates are normalized before comparison
        let resp = list_goal_history(&db, Some("2026-1-1"), Some("2026-2-1"), 50, 0).unwrap();
        assert_eq!(resp.total, 1);
        assert_eq!(resp.records[0].effective_date, "2026-01-05");
    }

    #[test]
    fn test_delete_goal_record() {
        let db = Database::in_memory().unwrap();
        let goals = set_manual_goals(&db, Some("2026-01-01"), manual(2000), None).unwrap();

        assert!(delete_goal_record(&db, goals.id).unwrap().success);
        assert!(!delete_goal_record(&db, goals.id).unwrap().success);
    }
}
