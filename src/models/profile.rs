//! Profile model
//!
//! Stores the user's biometric profile, the input to target calculation.

use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};

use crate::db::{DbError, DbResult};
use crate::nutrition::{
    parse_date_of_birth, ActivityLevel, BiologicalSex, Goal, NutritionProfile, UnitSystem,
};

/// Stored profile (single row table)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub unit_system: String,
    pub height: f64,
    pub weight: f64,
    pub biological_sex: String,
    pub date_of_birth: String,  // ISO date: "1990-06-15"
    pub activity_level: String,
    pub goal: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Profile {
    /// Create from a database row
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            unit_system: row.get("unit_system")?,
            height: row.get("height")?,
            weight: row.get("weight")?,
            biological_sex: row.get("biological_sex")?,
            date_of_birth: row.get("date_of_birth")?,
            activity_level: row.get("activity_level")?,
            goal: row.get("goal")?,
            created_at: row.get("created_at")?,
            updated_at: row.get("updated_at")?,
        })
    }

    /// Get the profile, if one has been set
    pub fn get(conn: &Connection) -> DbResult<Option<Self>> {
        let mut stmt = conn.prepare("SELECT * FROM profile WHERE id = 1")?;

        let result = stmt.query_row([], Self::from_row);
        match result {
            Ok(profile) => Ok(Some(profile)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Set or update the profile (upsert)
    pub fn set(conn: &Connection, data: &NutritionProfile) -> DbResult<Self> {
        conn.execute(
            r#"
            INSERT INTO profile (id, unit_system, height, weight, biological_sex,
                                 date_of_birth, activity_level, goal)
            VALUES (1, ?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ON CONFLICT(id) DO UPDATE SET
                unit_system = excluded.unit_system,
                height = excluded.height,
                weight = excluded.weight,
                biological_sex = excluded.biological_sex,
                date_of_birth = excluded.date_of_birth,
                activity_level = excluded.activity_level,
                goal = excluded.goal,
                updated_at = datetime('now')
            "#,
            params![
                data.unit_system.as_str(),
                data.height,
                data.weight,
                data.biological_sex.as_str(),
                data.date_of_birth.format("%Y-%m-%d").to_string(),
                data.activity_level.as_str(),
                data.goal.as_str(),
            ],
        )?;

        Self::get(conn)?.ok_or(DbError::NotFound)
    }

    /// Parse the stored columns into calculator input
    pub fn to_nutrition_profile(&self) -> DbResult<NutritionProfile> {
        Ok(NutritionProfile {
            unit_system: UnitSystem::from_str(&self.unit_system)?,
            height: self.height,
            weight: self.weight,
            biological_sex: BiologicalSex::from_str(&self.biological_sex)?,
            date_of_birth: parse_date_of_birth(&self.date_of_birth)?,
            activity_level: ActivityLevel::from_str(&self.activity_level)?,
            goal: Goal::from_str(&self.goal)?,
        })
    }
}
