//! Data models
//!
//! Rust structs representing database entities.

mod daily_goals;
mod profile;

pub use daily_goals::{DailyGoals, DailyGoalsCreate, GoalSource};
pub use profile::Profile;
