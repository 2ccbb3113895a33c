//! NutriGoal Library
//!
//! Daily calorie and macronutrient target calculation, with profile and goal
//! history storage.

pub mod build_info;
pub mod config;
pub mod db;
pub mod mcp;
pub mod models;
pub mod nutrition;
pub mod tools;
