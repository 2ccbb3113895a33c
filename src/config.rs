//! Runtime configuration
//!
//! Settings come from the environment:
//! - `NUTRIGOAL_DATABASE_PATH`: SQLite file (default `<project>/data/nutrigoal.db`)
//! - `RUST_LOG`: log filter (default `nutrigoal=info`)

use std::path::PathBuf;

/// Environment variable overriding the database location
pub const DATABASE_PATH_ENV: &str = "NUTRIGOAL_DATABASE_PATH";

/// Log directive applied when `RUST_LOG` does not set one
pub const DEFAULT_LOG_DIRECTIVE: &str = "nutrigoal=info";

/// Get the database path from environment or use default
pub fn database_path() -> PathBuf {
    std::env::var(DATABASE_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| default_database_path())
}

/// `data/nutrigoal.db` beside the executable, or beside the project root when
/// running from `target/release` or `target/debug`
fn default_database_path() -> PathBuf {
    let mut path = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));

    if path.ends_with("release") || path.ends_with("debug") {
        if let Some(parent) = path.parent() {
            if let Some(grandparent) = parent.parent() {
                path = grandparent.to_path_buf();
            }
        }
    }

    path.push("data");
    path.push("nutrigoal.db");
    path
}
