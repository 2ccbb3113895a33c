//! Daily goals model
//!
//! Append-only history of calorie and macro targets. The record in effect on a
//! date is the latest one whose effective date is on or before it.

use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::{DbError, DbResult};
use crate::nutrition::{DailyTargets, ValidationError};

/// Where a goal record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalSource {
    /// Produced by the target calculator from the stored profile
    Calculated,
    /// Entered directly
    Manual,
}

impl GoalSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalSource::Calculated => "calculated",
            GoalSource::Manual => "manual",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "calculated" => Some(GoalSource::Calculated),
            "manual" => Some(GoalSource::Manual),
            _ => None,
        }
    }
}

/// A persisted goal record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyGoals {
    pub id: i64,
    pub effective_date: String,  // ISO date: "2026-01-09"
    pub calories: u32,
    pub protein_grams: f64,
    pub fat_grams: f64,
    pub carbs_grams: f64,
    pub source: GoalSource,
    pub notes: Option<String>,
    pub created_at: String,
}

/// Data for creating a goal record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyGoalsCreate {
    pub effective_date: String,
    pub targets: DailyTargets,
    pub source: GoalSource,
    pub notes: Option<String>,
}

impl DailyGoalsCreate {
    /// Reject non-positive calories and negative or non-finite macros
    pub fn validate(&self) -> Result<(), ValidationError> {
        let t = &self.targets;
        if t.calories == 0 {
            return Err(ValidationError::GoalValue {
                field: "calories",
                value: 0.0,
            });
        }
        for (field, value) in [
            ("protein_grams", t.protein_grams),
            ("fat_grams", t.fat_grams),
            ("carbs_grams", t.carbs_grams),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ValidationError::GoalValue { field, value });
            }
        }
        Ok(())
    }
}

impl DailyGoals {
    /// Create from a database row
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let source_idx = row.as_ref().column_index("source")?;
        let source_str: String = row.get(source_idx)?;
        let source = GoalSource::from_str(&source_str).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                source_idx,
                Type::Text,
                format!("unknown goal source '{}'", source_str).into(),
            )
        })?;

        Ok(Self {
            id: row.get("id")?,
            effective_date: row.get("effective_date")?,
            calories: row.get("calories")?,
            protein_grams: row.get("protein_grams")?,
            fat_grams: row.get("fat_grams")?,
            carbs_grams: row.get("carbs_grams")?,
            source,
            notes: row.get("notes")?,
            created_at: row.get("created_at")?,
        })
    }

    /// The targets carried by this record
    pub fn targets(&self) -> DailyTargets {
        DailyTargets {
            calories: self.calories,
            protein_grams: self.protein_grams,
            fat_grams: self.fat_grams,
            carbs_grams: self.carbs_grams,
        }
    }

    /// Append a goal record
    pub fn create(conn: &Connection, data: &DailyGoalsCreate) -> DbResult<Self> {
        data.validate()?;

        conn.execute(
            r#"
            INSERT INTO daily_goals (effective_date, calories, protein_grams, fat_grams,
                                     carbs_grams, source, notes)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                data.effective_date,
                data.targets.calories,
                data.targets.protein_grams,
                data.targets.fat_grams,
                data.targets.carbs_grams,
                data.source.as_str(),
                data.notes,
            ],
        )?;

        let id = conn.last_insert_rowid();
        Self::get_by_id(conn, id)?.ok_or(DbError::NotFound)
    }

    /// Get a goal record by ID
    pub fn get_by_id(conn: &Connection, id: i64) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM daily_goals WHERE id = ?1")?;

        let result = stmt.query_row([id], Self::from_row);
        match result {
            Ok(goals) => Ok(Some(goals)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Get the goals in effect on `date`
    pub fn current(conn: &Connection, date: &str) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare(
            "SELECT * FROM daily_goals WHERE effective_date <= ?1
             ORDER BY effective_date DESC, id DESC LIMIT 1",
        )?;

        let result = stmt.query_row([date], Self::from_row);
        match result {
            Ok(goals) => Ok(Some(goals)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List goal records, newest first, with optional effective date range
    pub fn history(
        conn: &Connection,
        start_date: Option<&str>,
        end_date: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> DbResult<Vec<Self>> {
        let mut sql = String::from("SELECT * FROM daily_goals WHERE 1=1");
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(start) = start_date {
            params_vec.push(Box::new(start.to_string()));
            sql.push_str(&format!(" AND effective_date >= ?{}", params_vec.len()));
        }

        if let Some(end) = end_date {
            params_vec.push(Box::new(end.to_string()));
            sql.push_str(&format!(" AND effective_date <= ?{}", params_vec.len()));
        }

        sql.push_str(" ORDER BY effective_date DESC, id DESC");

        params_vec.push(Box::new(limit));
        sql.push_str(&format!(" LIMIT ?{}", params_vec.len()));

        params_vec.push(Box::new(offset));
        sql.push_str(&format!(" OFFSET ?{}", params_vec.len()));

        let mut stmt = conn.prepare(&sql)?;
        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|p| p.as_ref()).collect();

        let records = stmt
            .query_map(params_refs.as_slice(), Self::from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }

    /// Count goal records with optional effective date range
    pub fn count(conn: &Connection, start_date: Option<&str>, end_date: Option<&str>) -> DbResult<i64> {
        let mut sql = String::from("SELECT COUNT(*) FROM daily_goals WHERE 1=1");
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(start) = start_date {
            params_vec.push(Box::new(start.to_string()));
            sql.push_str(&format!(" AND effective_date >= ?{}", params_vec.len()));
        }

        if let Some(end) = end_date {
            params_vec.push(Box::new(end.to_string()));
            sql.push_str(&format!(" AND effective_date <= ?{}", params_vec.len()));
        }

        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|p| p.as_ref()).collect();
        let count: i64 = conn.query_row(&sql, params_refs.as_slice(), |row| row.get(0))?;
        Ok(count)
    }

    /// Delete a goal record
    pub fn delete(conn: &Connection, id: i64) -> DbResult<bool> {
        let rows = conn.execute("DELETE FROM daily_goals WHERE id = ?1", [id])?;
        Ok(rows > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    fn record(date: &str, calories: u32, source: GoalSource) -> DailyGoalsCreate {
        DailyGoalsCreate {
            effective_date: date.to_string(),
            targets: DailyTargets {
                calories,
                protein_grams: 150.0,
                fat_grams: 70.0,
                carbs_grams: 250.0,
            },
            source,
            notes: None,
        }
    }

    #[test]
    fn test_create_and_get() {
        let conn = setup();
        let created = DailyGoals::create(&conn, &record("2026-01-01", 2400, GoalSource::Calculated)).unwrap();

        assert_eq!(created.calories, 2400);
        assert_eq!(created.source, GoalSource::Calculated);

        let fetched = DailyGoals::get_by_id(&conn, created.id).unwrap().unwrap();
        assert_eq!(fetched.targets(), created.targets());
    }

    #[test]
    fn test_current_picks_latest_effective() {
        let conn = setup();
        DailyGoals::create(&conn, &record("2026-01-01", 2400, GoalSource::Calculated)).unwrap();
        DailyGoals::create(&conn, &record("2026-02-01", 2200, GoalSource::Calculated)).unwrap();
        DailyGoals::create(&conn, &record("2026-02-01", 2100, GoalSource::Manual)).unwrap();
        DailyGoals::create(&conn, &record("2026-03-01", 2000, GoalSource::Calculated)).unwrap();

        assert!(DailyGoals::current(&conn, "2025-12-31").unwrap().is_none());
        assert_eq!(DailyGoals::current(&conn, "2026-01-15").unwrap().unwrap().calories, 2400);
        // Same effective date: the later record wins
        assert_eq!(DailyGoals::current(&conn, "2026-02-10").unwrap().unwrap().calories, 2100);
        assert_eq!(DailyGoals::current(&conn, "2026-03-01").unwrap().unwrap().calories, 2000);
    }

    #[test]
    fn test_history_range_and_paging() {
        let conn = setup();
        for (i, date) in ["2026-01-01", "2026-01-08", "2026-01-15", "2026-01-22"].iter().enumerate() {
            DailyGoals::create(&conn, &record(date, 2000 + i as u32 * 10, GoalSource::Manual)).unwrap();
        }

        let all = DailyGoals::history(&conn, None, None, 10, 0).unwrap();
        assert_eq!(all.len(), 4);
        assert_eq!(all[0].effective_date, "2026-01-22");

        let ranged = DailyGoals::history(&conn, Some("2026-01-05"), Some("2026-01-20"), 10, 0).unwrap();
        assert_eq!(ranged.len(), 2);
        assert_eq!(DailyGoals::count(&conn, Some("2026-01-05"), Some("2026-01-20")).unwrap(), 2);

        let page = DailyGoals::history(&conn, None, None, 2, 2).unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].effective_date, "2026-01-08");
    }

    #[test]
    fn test_invalid_values_rejected() {
        let conn = setup();
        let mut data = record("2026-01-01", 0, GoalSource::Manual);
        assert!(matches!(DailyGoals::create(&conn, &data), Err(DbError::Validation(_))));

        data.targets.calories = 2000;
        data.targets.fat_grams = -5.0;
        let err = DailyGoals::create(&conn, &data).unwrap_err();
        assert!(err.to_string().contains("fat_grams"));
        assert_eq!(DailyGoals::count(&conn, None, None).unwrap(), 0);
    }

    #[test]
    fn test_unknown_source_is_an_error() {
        let conn = setup();
        let result = conn.query_row(
            "SELECT 1 AS id, '2026-01-01' AS effective_date, 2000 AS calories,
                    150.0 AS protein_grams, 70.0 AS fat_grams, 250.0 AS carbs_grams,
                    'imported' AS source, NULL AS notes, '2026-01-01 00:00:00' AS created_at",
            [],
            DailyGoals::from_row,
        );
        assert!(matches!(
            result,
            Err(rusqlite::Error::FromSqlConversionFailure(_, Type::Text, _))
        ));
    }

    #[test]
    fn test_delete() {
        let conn = setup();
        let created = DailyGoals::create(&conn, &record("2026-01-01", 2400, GoalSource::Manual)).unwrap();
        assert!(DailyGoals::delete(&conn, created.id).unwrap());
        assert!(!DailyGoals::delete(&conn, created.id).unwrap());
    }
}
