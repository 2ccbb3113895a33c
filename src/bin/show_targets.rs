//! Print the stored profile, its calculated targets, and the goals in effect
//! Usage: cargo run --bin show_targets -- [date]

use chrono::NaiveDate;

use nutrigoal::config;
use nutrigoal::db::{migrations, Database, DbError};
use nutrigoal::models::{DailyGoals, Profile};
use nutrigoal::nutrition::explain_daily_targets;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    let date = match args.get(1) {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")?,
        None => chrono::Local::now().date_naive(),
    };
    let date_str = date.format("%Y-%m-%d").to_string();

    let db_path = config::database_path();
    println!("Database: {}", db_path.display());

    let database = Database::new(&db_path)?;
    database.with_conn(migrations::run_migrations)?;

    database.with_conn(|conn| {
        let profile = match Profile::get(conn)? {
            Some(p) => p,
            None => {
                println!("No profile set.");
                return Ok(());
            }
        };

        println!("\nProfile (updated {}):", profile.updated_at);
        println!(
            "  {} units, height {}, weight {}",
            profile.unit_system, profile.height, profile.weight
        );
        println!("  {}, born {}", profile.biological_sex, profile.date_of_birth);
        println!("  {}, goal {}", profile.activity_level, profile.goal);

        let breakdown = explain_daily_targets(&profile.to_nutrition_profile()?, date)
            .map_err(DbError::from)?;
        let targets = breakdown.rounded();

        println!("\nCalculated for {}:", date_str);
        println!(
            "  Age {} | {:.1} cm | {:.1} kg | BMI {:.1}",
            breakdown.age, breakdown.height_cm, breakdown.weight_kg, breakdown.body_mass_index
        );
        println!(
            "  BMR {:.0} kcal | TDEE {:.0} kcal",
            breakdown.basal_metabolic_rate, breakdown.total_daily_energy_expenditure
        );
        println!(
            "  Protein {:.2} g/kg x {:.1} kg",
            breakdown.protein_per_kg, breakdown.protein_reference_weight_kg
        );
        println!(
            "  => {} kcal, P {} g, F {} g, C {} g",
            targets.calories, targets.protein_grams, targets.fat_grams, targets.carbs_grams
        );

        match DailyGoals::current(conn, &date_str)? {
            Some(goals) => println!(
                "\nGoals in effect ({} since {}): {} kcal, P {} g, F {} g, C {} g",
                goals.source.as_str(),
                goals.effective_date,
                goals.calories,
                goals.protein_grams,
                goals.fat_grams,
                goals.carbs_grams
            ),
            None => println!("\nNo goals recorded on or before {}", date_str),
        }

        Ok(())
    })?;

    Ok(())
}
