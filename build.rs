//! Build script for NutriGoal
//!
//! Embeds the build timestamp, cargo profile and target triple.

fn main() {
    println!("cargo:rerun-if-changed=src");
    println!("cargo:rerun-if-changed=build.rs");

    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());
    let target = std::env::var("TARGET").unwrap_or_else(|_| "unknown".to_string());

    println!("cargo:rustc-env=NUTRIGOAL_BUILD_TIMESTAMP={}", timestamp);
    println!("cargo:rustc-env=NUTRIGOAL_BUILD_PROFILE={}", profile);
    println!("cargo:rustc-env=NUTRIGOAL_BUILD_TARGET={}", target);
}
