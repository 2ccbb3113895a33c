//! Database migrations
//!
//! Schema creation and migration logic.

use rusqlite::Connection;

use super::connection::DbResult;

/// Current schema version
const SCHEMA_VERSION: i32 = 1;

/// Run all migrations to bring the database up to the current schema version
pub fn run_migrations(conn: &Connection) -> DbResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
        [],
    )?;

    let current_version = get_schema_version(conn)?;

    if current_version < 1 {
        migrate_v1(conn)?;
        conn.execute("INSERT INTO schema_migrations (version) VALUES (1)", [])?;
        tracing::info!("Applied schema migration v1");
    }

    Ok(())
}

/// Migration v1: Initial schema
fn migrate_v1(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        r#"
        -- ============================================
        -- PROFILE
        -- Single row: the calculator's input record, stored as entered
        -- ============================================
        CREATE TABLE profile (
            id INTEGER PRIMARY KEY CHECK(id = 1),
            unit_system TEXT NOT NULL CHECK(unit_system IN ('metric', 'imperial')),
            height REAL NOT NULL,                -- cm/m (metric) or in/ft (imperial)
            weight REAL NOT NULL,                -- kg (metric) or lb (imperial)
            biological_sex TEXT NOT NULL CHECK(biological_sex IN ('female', 'male', 'other')),
            date_of_birth TEXT NOT NULL,         -- ISO date: "1990-06-15"
            activity_level TEXT NOT NULL CHECK(activity_level IN
                ('sedentary', 'lightly_active', 'moderately_active', 'very_active', 'athlete')),
            goal TEXT NOT NULL CHECK(goal IN ('lose_fat', 'maintain_weight', 'gain_muscle')),

            -- Metadata
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        -- ============================================
        -- DAILY GOALS
        -- Append-only history of calorie/macro targets
        -- ============================================
        CREATE TABLE daily_goals (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            effective_date TEXT NOT NULL,        -- ISO date the goals apply from
            calories INTEGER NOT NULL CHECK(calories > 0),
            protein_grams REAL NOT NULL CHECK(protein_grams >= 0),
            fat_grams REAL NOT NULL CHECK(fat_grams >= 0),
            carbs_grams REAL NOT NULL CHECK(carbs_grams >= 0),
            source TEXT NOT NULL CHECK(source IN ('calculated', 'manual')),

            -- Metadata
            notes TEXT,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX idx_daily_goals_effective ON daily_goals(effective_date);
        "#,
    )?;

    Ok(())
}

/// Get the current schema version
pub fn get_schema_version(conn: &Connection) -> DbResult<i32> {
    let version: i32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}

/// Check if the database needs migration
pub fn needs_migration(conn: &Connection) -> DbResult<bool> {
    let current = get_schema_version(conn)?;
    Ok(current < SCHEMA_VERSION)
}
