//! Body composition estimates
//!
//! BMI, Devine ideal body weight, and the reference weight protein targets scale with.

use super::profile::BiologicalSex;
use super::units::{cm_to_inches, KG_PER_LB};

/// BMI at or above this is treated as obese for protein dosing
pub const OBESITY_BMI: f64 = 30.0;

const DEVINE_MALE_BASE: f64 = 50.0;
const DEVINE_FEMALE_BASE: f64 = 45.5;
const DEVINE_PER_INCH: f64 = 2.3;
const FIVE_FEET_INCHES: f64 = 60.0;

/// Share of excess weight counted by the adjusted body weight
const ADJUSTED_WEIGHT_FACTOR: f64 = 0.4;
/// Lower bound of the obese reference weight, as a fraction of ideal weight
const IDEAL_WEIGHT_FLOOR: f64 = 0.9;

/// Body mass index (kg/m²)
pub fn body_mass_index(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

/// Devine ideal body weight in kilograms
///
/// Non-male profiles use the female base.
pub fn ideal_body_weight_kg(height_cm: f64, sex: BiologicalSex) -> f64 {
    let inches_over_five_feet = (cm_to_inches(height_cm) - FIVE_FEET_INCHES).max(0.0);
    let base = if sex.is_male_coded() {
        DEVINE_MALE_BASE
    } else {
        DEVINE_FEMALE_BASE
    };
    (base + DEVINE_PER_INCH * inches_over_five_feet) * KG_PER_LB
}

/// Ideal weight plus 40% of the weight above it
pub fn adjusted_body_weight_kg(weight_kg: f64, ideal_kg: f64) -> f64 {
    ideal_kg + ADJUSTED_WEIGHT_FACTOR * (weight_kg - ideal_kg)
}

/// Weight used for protein dosing
///
/// Actual weight below the obesity threshold; otherwise the adjusted weight,
/// never less than 90% of ideal.
pub fn protein_reference_weight_kg(weight_kg: f64, bmi: f64, ideal_kg: f64) -> f64 {
    if bmi >= OBESITY_BMI {
        adjusted_body_weight_kg(weight_kg, ideal_kg).max(ideal_kg * IDEAL_WEIGHT_FLOOR)
    } else {
        weight_kg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bmi() {
        let bmi = body_mass_index(80.0, 180.0);
        assert!((bmi - 24.691).abs() < 0.001);
    }

    #[test]
    fn test_ideal_body_weight_by_sex() {
        // 70 inches: 10 inches over five feet
        let male = ideal_body_weight_kg(177.8, BiologicalSex::Male);
        let female = ideal_body_weight_kg(177.8, BiologicalSex::Female);
        let other = ideal_body_weight_kg(177.8, BiologicalSex::Other);

        assert!((male - 73.0 * KG_PER_LB).abs() < 1e-9);
        assert!((female - 68.5 * KG_PER_LB).abs() < 1e-9);
        assert_eq!(female, other);
    }

    #[test]
    fn test_ideal_body_weight_short_stature() {
        // Below five feet the inch term is zero
        let ibw = ideal_body_weight_kg(140.0, BiologicalSex::Female);
        assert!((ibw - 45.5 * KG_PER_LB).abs() < 1e-9);
    }

    #[test]
    fn test_reference_weight_not_obese() {
        assert_eq!(protein_reference_weight_kg(80.0, 24.7, 33.1), 80.0);
    }

    #[test]
    fn test_reference_weight_obese_uses_adjusted() {
        let ideal = 30.0;
        let reference = protein_reference_weight_kg(120.0, 35.0, ideal);
        // 30 + 0.4 * 90
        assert!((reference - 66.0).abs() < 1e-9);
    }

    #[test]
    fn test_reference_weight_obese_floor() {
        // Adjusted weight (46) below 90% of ideal (54)
        let reference = protein_reference_weight_kg(40.0, 31.0, 60.0);
        assert!((reference - 54.0).abs() < 1e-9);
    }
}
