//! NutriGoal Tools module
//!
//! MCP tool implementations for profiles, targets and goal history.

pub mod goals;
pub mod status;
pub mod targets;

use chrono::{Local, NaiveDate};
use thiserror::Error;

use crate::db::DbError;
use crate::nutrition::ValidationError;

/// Tool error types
#[derive(Debug, Error)]
pub enum ToolError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    Date(String),

    #[error("No profile set. Call set_profile first.")]
    NoProfile,

    #[error("{context}: {source}")]
    Database {
        context: &'static str,
        source: DbError,
    },
}

impl ToolError {
    /// Whether the caller supplied bad input (as opposed to a storage failure)
    pub fn is_invalid_input(&self) -> bool {
        !matches!(self, ToolError::Database { .. })
    }

    /// Wrap a database error, surfacing validation failures as such
    pub(crate) fn db(context: &'static str) -> impl FnOnce(DbError) -> ToolError {
        move |e| match e {
            DbError::Validation(v) => ToolError::Validation(v),
            source => ToolError::Database { context, source },
        }
    }
}

/// Result type for tool functions
pub type ToolResult<T> = Result<T, ToolError>;

/// Parse an ISO date (YYYY-MM-DD)
pub(crate) fn parse_date(s: &str) -> ToolResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| ToolError::Date(s.to_string()))
}

/// Parse an optional ISO date, defaulting to today's local date
pub(crate) fn resolve_date(date: Option<&str>) -> ToolResult<NaiveDate> {
    match date {
        Some(s) => parse_date(s),
        None => Ok(Local::now().date_naive()),
    }
}
