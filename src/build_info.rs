//! Build information module
//!
//! Compile-time metadata embedded by `build.rs`.

use std::fmt;

use serde::Serialize;

/// Build timestamp in ISO 8601 format
pub const BUILD_TIMESTAMP: &str = match option_env!("NUTRIGOAL_BUILD_TIMESTAMP") {
    Some(s) => s,
    None => "unknown",
};

/// Cargo profile the binary was built with (debug/release)
pub const BUILD_PROFILE: &str = match option_env!("NUTRIGOAL_BUILD_PROFILE") {
    Some(s) => s,
    None => "unknown",
};

/// Target triple
pub const BUILD_TARGET: &str = match option_env!("NUTRIGOAL_BUILD_TARGET") {
    Some(s) => s,
    None => "unknown",
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Build information structure for serialization
#[derive(Debug, Clone, Serialize)]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub profile: &'static str,
    pub target: &'static str,
    pub build_timestamp: &'static str,
    pub description: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            name: NAME,
            version: VERSION,
            profile: BUILD_PROFILE,
            target: BUILD_TARGET,
            build_timestamp: BUILD_TIMESTAMP,
            description: DESCRIPTION,
        }
    }
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} v{} ({} build for {}, compiled {})",
            self.name, self.version, self.profile, self.target, self.build_timestamp
        )
    }
}

/// Print the startup banner to stderr
pub fn print_startup_banner() {
    eprintln!("===============================================");
    eprintln!("  NutriGoal - daily nutrition targets");
    eprintln!("  {}", BuildInfo::current());
    eprintln!("===============================================");
}
