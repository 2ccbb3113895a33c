//! NutriGoal MCP Server Implementation
//!
//! Implements the MCP server with all NutriGoal tools.

use std::path::PathBuf;
use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::db::Database;
use crate::nutrition::{DailyTargets, NutritionProfile};
use crate::tools::goals;
use crate::tools::status::StatusTracker;
use crate::tools::{targets, ToolError};

/// NutriGoal MCP Service
#[derive(Clone)]
pub struct NutriGoalService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    database: Database,
    tool_router: ToolRouter<NutriGoalService>,
}

impl NutriGoalService {
    pub fn new(database_path: PathBuf, database: Database) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(database_path))),
            database,
            tool_router: Self::tool_router(),
        }
    }
}

/// Serialize a tool response as pretty JSON text content
fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

/// Bad input becomes invalid params; storage failures are internal errors
fn tool_error(e: ToolError) -> McpError {
    if e.is_invalid_input() {
        McpError::invalid_params(e.to_string(), None)
    } else {
        tracing::error!("Tool failed: {}", e);
        McpError::internal_error(e.to_string(), None)
    }
}

// ============================================================================
// Profile Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ProfileParams {
    /// Unit system: metric or imperial
    pub unit_system: String,
    /// Height: cm (or meters if < 3) for metric; inches (or feet if < 10) for imperial
    pub height: f64,
    /// Weight: kg for metric; lb for imperial
    pub weight: f64,
    /// Biological sex: female, male, other
    pub biological_sex: String,
    /// Date of birth (ISO format: YYYY-MM-DD)
    pub date_of_birth: String,
    /// Activity level: sedentary, lightly_active, moderately_active, very_active, athlete
    pub activity_level: String,
    /// Goal: lose_fat, maintain_weight, gain_muscle
    pub goal: String,
}

impl ProfileParams {
    fn to_profile(&self) -> Result<NutritionProfile, McpError> {
        targets::parse_profile(
            &self.unit_system,
            self.height,
            self.weight,
            &self.biological_sex,
            &self.date_of_birth,
            &self.activity_level,
            &self.goal,
        )
        .map_err(|e| McpError::invalid_params(e.to_string(), None))
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CalculateTargetsParams {
    #[serde(flatten)]
    pub profile: ProfileParams,
    /// Date to calculate age on (ISO format: YYYY-MM-DD, default today)
    pub as_of: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CalculateProfileTargetsParams {
    /// Date to calculate age on (ISO format: YYYY-MM-DD, default today)
    pub as_of: Option<String>,
}

// ============================================================================
// Goal Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ApplyCalculatedGoalsParams {
    /// Date the goals take effect (ISO format: YYYY-MM-DD, default today)
    pub effective_date: Option<String>,
    /// Optional notes
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetManualGoalsParams {
    /// Date the goals take effect (ISO format: YYYY-MM-DD, default today)
    pub effective_date: Option<String>,
    /// Daily calories (kcal)
    pub calories: u32,
    /// Daily protein (grams)
    pub protein_grams: f64,
    /// Daily fat (grams)
    pub fat_grams: f64,
    /// Daily carbohydrates (grams)
    pub carbs_grams: f64,
    /// Optional notes
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetCurrentGoalsParams {
    /// Date (ISO format: YYYY-MM-DD, default today)
    pub date: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListGoalHistoryParams {
    /// Start of effective date range (ISO format: YYYY-MM-DD)
    pub start_date: Option<String>,
    /// End of effective date range (ISO format: YYYY-MM-DD)
    pub end_date: Option<String>,
    /// Maximum records to return (1-200, default 50)
    #[serde(default = "default_list_limit")]
    pub limit: i64,
    /// Records to skip
    #[serde(default)]
    pub offset: i64,
}

fn default_list_limit() -> i64 { 50 }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DeleteGoalRecordParams {
    /// Goal record ID
    pub id: i64,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl NutriGoalService {
    // --- Status ---

    #[tool(description = "Get the current status of the NutriGoal service including build info, database status, and process information")]
    async fn nutrigoal_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        json_result(&tracker.get_status())
    }

    #[tool(description = "Get step-by-step instructions for setting a profile and daily nutrition goals. Call this when starting a goal-setting session or when unsure how to use the tools.")]
    fn goal_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::GOAL_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(GOAL_INSTRUCTIONS)]))
    }

    // --- Profile & Targets ---

    #[tool(description = "Calculate daily calorie and macro targets for the given profile without saving anything. Returns rounded targets and the calculation breakdown.")]
    fn calculate_targets(&self, Parameters(p): Parameters<CalculateTargetsParams>) -> Result<CallToolResult, McpError> {
        let profile = p.profile.to_profile()?;
        let result = targets::calculate_targets(profile, p.as_of.as_deref())
            .map_err(tool_error)?;
        json_result(&result)
    }

    #[tool(description = "Set or replace the stored profile (height, weight, sex, date of birth, activity level, goal). Validated before saving; returns a preview of the resulting targets.")]
    fn set_profile(&self, Parameters(p): Parameters<ProfileParams>) -> Result<CallToolResult, McpError> {
        let profile = p.to_profile()?;
        let result = targets::set_profile(&self.database, profile)
            .map_err(tool_error)?;
        json_result(&result)
    }

    #[tool(description = "Get the stored profile")]
    fn get_profile(&self) -> Result<CallToolResult, McpError> {
        let result = targets::get_profile(&self.database).map_err(tool_error)?;
        match result {
            Some(profile) => json_result(&profile),
            None => Ok(CallToolResult::success(vec![Content::text(
                r#"{"error": "No profile set"}"#,
            )])),
        }
    }

    #[tool(description = "Calculate targets from the stored profile without saving them as goals")]
    fn calculate_profile_targets(&self, Parameters(p): Parameters<CalculateProfileTargetsParams>) -> Result<CallToolResult, McpError> {
        let result = targets::calculate_profile_targets(&self.database, p.as_of.as_deref())
            .map_err(tool_error)?;
        json_result(&result)
    }

    // --- Goals ---

    #[tool(description = "Calculate targets from the stored profile and record them as the goals in effect from the given date")]
    fn apply_calculated_goals(&self, Parameters(p): Parameters<ApplyCalculatedGoalsParams>) -> Result<CallToolResult, McpError> {
        let result = goals::apply_calculated_goals(&self.database, p.effective_date.as_deref(), p.notes)
            .map_err(tool_error)?;
        json_result(&result)
    }

    #[tool(description = "Record manually chosen daily goals (calories and macro grams) in effect from the given date")]
    fn set_manual_goals(&self, Parameters(p): Parameters<SetManualGoalsParams>) -> Result<CallToolResult, McpError> {
        let targets = DailyTargets {
            calories: p.calories,
            protein_grams: p.protein_grams,
            fat_grams: p.fat_grams,
            carbs_grams: p.carbs_grams,
        };
        let result = goals::set_manual_goals(&self.database, p.effective_date.as_deref(), targets, p.notes)
            .map_err(tool_error)?;
        json_result(&result)
    }

    #[tool(description = "Get the goals in effect on a date (default today)")]
    fn get_current_goals(&self, Parameters(p): Parameters<GetCurrentGoalsParams>) -> Result<CallToolResult, McpError> {
        let result = goals::get_current_goals(&self.database, p.date.as_deref())
            .map_err(tool_error)?;
        json_result(&result)
    }

    #[tool(description = "List goal records, newest first, with optional effective date range and pagination")]
    fn list_goal_history(&self, Parameters(p): Parameters<ListGoalHistoryParams>) -> Result<CallToolResult, McpError> {
        let result = goals::list_goal_history(&self.database, p.start_date.as_deref(), p.end_date.as_deref(), p.limit, p.offset)
            .map_err(tool_error)?;
        json_result(&result)
    }

    #[tool(description = "Delete a goal record by ID")]
    fn delete_goal_record(&self, Parameters(p): Parameters<DeleteGoalRecordParams>) -> Result<CallToolResult, McpError> {
        let result = goals::delete_goal_record(&self.database, p.id)
            .map_err(tool_error)?;
        json_result(&result)
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for NutriGoalService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "nutrigoal".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("NutriGoal".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "NutriGoal - Daily calorie and macronutrient targets. \
                 IMPORTANT: Call goal_instructions before setting goals. \
                 Profile: set_profile/get_profile. \
                 Targets: calculate_targets (ad-hoc profile), calculate_profile_targets (stored profile). \
                 Goals: apply_calculated_goals, set_manual_goals, get_current_goals, list_goal_history, delete_goal_record. \
                 Status: nutrigoal_status."
                    .into(),
            ),
        }
    }
}
