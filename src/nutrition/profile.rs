//! Calculator input profile
//!
//! Typed biometric and behavioral inputs, plus the boundary checks that turn raw
//! values into SI biometrics and an age.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::units::{height_to_cm, weight_to_kg, UnitSystem};
use super::ValidationError;

/// Ages outside this range are clamped before use in any formula
pub const MIN_AGE: u32 = 10;
pub const MAX_AGE: u32 = 100;

const MIN_HEIGHT_CM: f64 = 50.0;
const MAX_HEIGHT_CM: f64 = 300.0;
const MIN_WEIGHT_KG: f64 = 20.0;
const MAX_WEIGHT_KG: f64 = 500.0;

/// Biological sex, used for the BMR constant, ideal body weight and calorie floor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BiologicalSex {
    Female,
    Male,
    Other,
}

impl BiologicalSex {
    pub fn as_str(&self) -> &'static str {
        match self {
            BiologicalSex::Female => "female",
            BiologicalSex::Male => "male",
            BiologicalSex::Other => "other",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, ValidationError> {
        match s.trim().to_lowercase().as_str() {
            "female" | "f" => Ok(BiologicalSex::Female),
            "male" | "m" => Ok(BiologicalSex::Male),
            "other" | "unspecified" => Ok(BiologicalSex::Other),
            _ => Err(ValidationError::BiologicalSex(s.to_string())),
        }
    }

    /// Only `Male` takes the male branch of sex-dependent formulas
    pub fn is_male_coded(&self) -> bool {
        matches!(self, BiologicalSex::Male)
    }
}

/// Self-reported activity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    LightlyActive,
    /// Moderate exercise 3-5 days/week
    ModeratelyActive,
    /// Hard exercise 6-7 days/week
    VeryActive,
    /// Training twice a day or physical job plus training
    Athlete,
}

impl ActivityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::LightlyActive => "lightly_active",
            ActivityLevel::ModeratelyActive => "moderately_active",
            ActivityLevel::VeryActive => "very_active",
            ActivityLevel::Athlete => "athlete",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, ValidationError> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "sedentary" => Ok(ActivityLevel::Sedentary),
            "lightly_active" | "light" => Ok(ActivityLevel::LightlyActive),
            "moderately_active" | "moderate" => Ok(ActivityLevel::ModeratelyActive),
            "very_active" => Ok(ActivityLevel::VeryActive),
            "athlete" => Ok(ActivityLevel::Athlete),
            _ => Err(ValidationError::ActivityLevel(s.to_string())),
        }
    }
}

/// Body composition goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    LoseFat,
    MaintainWeight,
    GainMuscle,
}

impl Goal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Goal::LoseFat => "lose_fat",
            Goal::MaintainWeight => "maintain_weight",
            Goal::GainMuscle => "gain_muscle",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, ValidationError> {
        match s.trim().to_lowercase().replace(['-', ' '], "_").as_str() {
            "lose_fat" | "lose" | "cut" => Ok(Goal::LoseFat),
            "maintain_weight" | "maintain" => Ok(Goal::MaintainWeight),
            "gain_muscle" | "gain" | "bulk" => Ok(Goal::GainMuscle),
            _ => Err(ValidationError::Goal(s.to_string())),
        }
    }
}

/// Everything the calculator needs about a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionProfile {
    pub unit_system: UnitSystem,
    /// Raw height: cm or m (metric), inches or feet (imperial)
    pub height: f64,
    /// Raw weight: kg (metric) or lb (imperial)
    pub weight: f64,
    pub biological_sex: BiologicalSex,
    pub date_of_birth: NaiveDate,
    pub activity_level: ActivityLevel,
    pub goal: Goal,
}

/// SI-normalized biometrics with a clamped age
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Biometrics {
    pub height_cm: f64,
    pub weight_kg: f64,
    pub age: u32,
}

impl NutritionProfile {
    /// Validate raw inputs and normalize them as of `today`
    pub fn normalize(&self, today: NaiveDate) -> Result<Biometrics, ValidationError> {
        if !self.height.is_finite() || self.height <= 0.0 {
            return Err(ValidationError::Height(self.height));
        }
        let height_cm = height_to_cm(self.height, self.unit_system);
        if !(MIN_HEIGHT_CM..=MAX_HEIGHT_CM).contains(&height_cm) {
            return Err(ValidationError::Height(self.height));
        }

        if !self.weight.is_finite() || self.weight <= 0.0 {
            return Err(ValidationError::Weight(self.weight));
        }
        let weight_kg = weight_to_kg(self.weight, self.unit_system);
        if !(MIN_WEIGHT_KG..=MAX_WEIGHT_KG).contains(&weight_kg) {
            return Err(ValidationError::Weight(self.weight));
        }

        let age = age_on(self.date_of_birth, today)?.clamp(MIN_AGE, MAX_AGE);

        Ok(Biometrics {
            height_cm,
            weight_kg,
            age,
        })
    }
}

/// Whole years between `date_of_birth` and `today`
///
/// Fails if the date of birth lies after `today`.
pub fn age_on(date_of_birth: NaiveDate, today: NaiveDate) -> Result<u32, ValidationError> {
    if date_of_birth > today {
        return Err(ValidationError::DateOfBirth(format!(
            "{} is after {}",
            date_of_birth, today
        )));
    }

    let mut years = today.year() - date_of_birth.year();
    if (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day()) {
        years -= 1;
    }

    Ok(years.max(0) as u32)
}

/// Parse an ISO date (YYYY-MM-DD) given as a date of birth
pub fn parse_date_of_birth(s: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::DateOfBirth(format!("'{}' is not a YYYY-MM-DD date", s)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn profile() -> NutritionProfile {
        NutritionProfile {
            unit_system: UnitSystem::Metric,
            height: 180.0,
            weight: 80.0,
            biological_sex: BiologicalSex::Male,
            date_of_birth: date(1990, 6, 15),
            activity_level: ActivityLevel::ModeratelyActive,
            goal: Goal::MaintainWeight,
        }
    }

    #[test]
    fn test_age_before_and_after_birthday() {
        let dob = date(1990, 6, 15);
        assert_eq!(age_on(dob, date(2020, 6, 14)).unwrap(), 29);
        assert_eq!(age_on(dob, date(2020, 6, 15)).unwrap(), 30);
        assert_eq!(age_on(dob, date(2020, 12, 1)).unwrap(), 30);
    }

    #[test]
    fn test_leap_day_birthday() {
        let dob = date(2000, 2, 29);
        assert_eq!(age_on(dob, date(2021, 2, 28)).unwrap(), 20);
        assert_eq!(age_on(dob, date(2021, 3, 1)).unwrap(), 21);
    }

    #[test]
    fn test_future_date_of_birth_rejected() {
        let err = age_on(date(2030, 1, 1), date(2026, 1, 1)).unwrap_err();
        assert_eq!(err.field(), "date_of_birth");
    }

    #[test]
    fn test_age_clamped() {
        let mut p = profile();
        p.date_of_birth = date(2020, 1, 1);
        assert_eq!(p.normalize(date(2026, 1, 1)).unwrap().age, MIN_AGE);

        p.date_of_birth = date(1900, 1, 1);
        assert_eq!(p.normalize(date(2026, 1, 1)).unwrap().age, MAX_AGE);
    }

    #[test]
    fn test_normalize_metric() {
        let bio = profile().normalize(date(2020, 6, 15)).unwrap();
        assert_eq!(bio.height_cm, 180.0);
        assert_eq!(bio.weight_kg, 80.0);
        assert_eq!(bio.age, 30);
    }

    #[test]
    fn test_zero_and_negative_values_rejected() {
        let today = date(2020, 6, 15);

        let mut p = profile();
        p.height = 0.0;
        assert_eq!(p.normalize(today), Err(ValidationError::Height(0.0)));

        let mut p = profile();
        p.weight = -70.0;
        assert_eq!(p.normalize(today), Err(ValidationError::Weight(-70.0)));

        let mut p = profile();
        p.weight = f64::NAN;
        assert!(matches!(p.normalize(today), Err(ValidationError::Weight(_))));
    }

    #[test]
    fn test_implausible_values_rejected() {
        let today = date(2020, 6, 15);

        // 400 inches
        let mut p = profile();
        p.unit_system = UnitSystem::Imperial;
        p.height = 400.0;
        assert!(matches!(p.normalize(today), Err(ValidationError::Height(_))));

        let mut p = profile();
        p.weight = 5.0;
        assert!(matches!(p.normalize(today), Err(ValidationError::Weight(_))));
    }

    #[test]
    fn test_enum_parsing() {
        assert_eq!(ActivityLevel::from_str("Very-Active").unwrap(), ActivityLevel::VeryActive);
        assert_eq!(Goal::from_str("gain muscle").unwrap(), Goal::GainMuscle);
        assert_eq!(BiologicalSex::from_str("F").unwrap(), BiologicalSex::Female);
        assert!(matches!(
            ActivityLevel::from_str("extreme"),
            Err(ValidationError::ActivityLevel(_))
        ));
    }

    #[test]
    fn test_profile_json_shape() {
        let json = serde_json::to_value(profile()).unwrap();
        assert_eq!(json["unit_system"], "metric");
        assert_eq!(json["activity_level"], "moderately_active");
        assert_eq!(json["goal"], "maintain_weight");
        assert_eq!(json["date_of_birth"], "1990-06-15");
    }

    #[test]
    fn test_parse_date_of_birth() {
        assert_eq!(parse_date_of_birth("1990-06-15").unwrap(), date(1990, 6, 15));
        assert!(parse_date_of_birth("15/06/1990").is_err());
    }
}
