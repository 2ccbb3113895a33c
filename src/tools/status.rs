//! NutriGoal Status Tool
//!
//! Provides runtime status information and usage instructions.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;

/// Goal setting instructions for AI assistants
pub const GOAL_INSTRUCTIONS: &str = r#"
# NutriGoal Instructions

NutriGoal calculates daily calorie and macronutrient targets from a biometric
profile and keeps a history of the goals that were in effect.

## Getting the Current Date

Tools that take a date default to the server's local date. When the user refers to
a relative date ("from next Monday"), resolve it to YYYY-MM-DD before calling.

---

## Step 1: Store the Profile

```
set_profile(
  unit_system: "metric",          // or "imperial"
  height: 180,                    // metric: cm (or m if < 3); imperial: inches (or feet if < 10)
  weight: 80,                     // metric: kg; imperial: lb
  biological_sex: "male",         // female, male, other
  date_of_birth: "1990-06-15",
  activity_level: "moderately_active",
  goal: "maintain_weight"         // lose_fat, maintain_weight, gain_muscle
)
```

Activity levels: sedentary, lightly_active, moderately_active, very_active, athlete.

The profile is validated before it is saved. Rejections name the field:
- height/weight must be positive and plausible (50-300 cm, 20-500 kg once converted)
- date_of_birth must be a past YYYY-MM-DD date
- unknown activity levels or goals are rejected, never guessed

Update the profile whenever weight, activity or goal changes.

## Step 2: Preview Targets

```
calculate_profile_targets(as_of: "2026-03-01")
```

Returns rounded targets plus the breakdown (BMR, TDEE, BMI, protein reference
weight, protein g/kg). Nothing is saved. For a profile that should not be stored,
use `calculate_targets` with the same fields as `set_profile`.

## Step 3: Apply Goals

```
apply_calculated_goals(effective_date: "2026-03-01", notes: "New cut")
```

Records the calculated targets as the goals in effect from that date. The response
includes the previous goals so the change can be summarized.

To record targets from a dietitian or coach instead:

```
set_manual_goals(effective_date: "2026-03-01", calories: 2200,
                 protein_grams: 160, fat_grams: 70, carbs_grams: 220)
```

## Step 4: Read Goals

- `get_current_goals(date)` - goals in effect on a date
- `list_goal_history(start_date, end_date, limit, offset)` - newest first
- `delete_goal_record(id)` - remove a mistaken entry

---

## How Targets Are Calculated

1. Height and weight are converted to cm and kg; age is clamped to 10-100.
2. BMR (Mifflin-St Jeor): 10 x kg + 6.25 x cm - 5 x age + 5 (male) / -161 (female) / -78 (other)
3. TDEE = BMR x activity factor (1.2, 1.375, 1.55, 1.725, 1.9)
4. Calories = TDEE x 0.8 (lose fat), 1.0 (maintain), 1.1 (gain muscle), never below
   min(85% TDEE, 105% BMR) and never below 1500 (male) / 1200 (others)
5. Protein = 1.4-2.2 g/kg by activity, +0.2 for lose/gain goals, +0.2 from age 60,
   limited to 1.2-2.4 g/kg. At BMI 30+ an adjusted body weight is used.
6. Fat = 25% (lose fat) or 30% of calories, kept within 0.5-1.2 g/kg
7. Carbs = remaining calories / 4, never negative
8. Calories are rounded to 10 kcal, macros to 5 g

## Notes

- Dates use ISO format: YYYY-MM-DD
- Goal records are never edited; add a new record to change goals
- When two records share an effective date, the later one wins
"#;

/// Runtime status of the NutriGoal service
#[derive(Debug, Clone, Serialize)]
pub struct NutriGoalStatus {
    /// Build information
    pub build: BuildInfo,

    /// Database information
    pub database_path: String,
    pub database_size_bytes: Option<u64>,

    /// Process information
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
}

/// Status tracker for collecting runtime information
pub struct StatusTracker {
    start_time: Instant,
    database_path: PathBuf,
}

impl StatusTracker {
    /// Create a new status tracker
    pub fn new(database_path: PathBuf) -> Self {
        Self {
            start_time: Instant::now(),
            database_path,
        }
    }

    /// Get the current status
    pub fn get_status(&self) -> NutriGoalStatus {
        let database_size_bytes = std::fs::metadata(&self.database_path)
            .ok()
            .map(|m| m.len());

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        NutriGoalStatus {
            build: BuildInfo::current(),
            database_path: self.database_path.display().to_string(),
            database_size_bytes,
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
        }
    }
}
