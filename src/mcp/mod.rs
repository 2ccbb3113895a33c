//! MCP server module
//!
//! Exposes the NutriGoal tools over the Model Context Protocol.

mod server;

pub use server::NutriGoalService;
