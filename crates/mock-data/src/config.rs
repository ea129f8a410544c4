//! Configuration types for mock data generation.

use std::ops::Range;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Catalog read when nothing else is configured.
pub const DEFAULT_CATALOG_PATH: &str = "course_descriptions.json";

/// Output written when nothing else is configured.
pub const DEFAULT_OUTPUT_PATH: &str = "mock_user_data.json";

/// First academic year generated.
pub const DEFAULT_START_YEAR: i32 = 2021;

/// Academic year at which generation stops (exclusive).
pub const DEFAULT_END_YEAR: i32 = 2025;

/// Environment variable overriding the catalog path.
pub const CATALOG_ENV: &str = "MOCK_DATA_CATALOG";

/// Environment variable overriding the output path.
pub const OUTPUT_ENV: &str = "MOCK_DATA_OUTPUT";

/// Environment variable holding an RNG seed for reproducible runs.
pub const SEED_ENV: &str = "MOCK_DATA_SEED";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be an unsigned integer, got '{value}'")]
    InvalidSeed { var: &'static str, value: String },
}

/// Fixed identity of the generated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub email: String,
    pub vanity_name: Option<String>,
    pub avatar_url: Option<String>,
}

impl Default for Identity {
    fn default() -> Self {
        Self {
            email: "wm@uga.edu".to_string(),
            vanity_name: Some("william".to_string()),
            avatar_url: Some("https://avatars.githubusercontent.com/u/14142910?v=4".to_string()),
        }
    }
}

/// Configuration for a generation run.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    /// Course catalog to read.
    pub catalog_path: PathBuf,

    /// Where the generated user is written.
    pub output_path: PathBuf,

    /// Academic years to generate, end exclusive.
    pub years: Range<i32>,

    /// RNG seed; `None` draws from entropy and differs every run.
    pub seed: Option<u64>,

    /// Identity of the generated user.
    pub identity: Identity,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            years: DEFAULT_START_YEAR..DEFAULT_END_YEAR,
            seed: None,
            identity: Identity::default(),
        }
    }
}

impl GenerateConfig {
    /// Builds the configuration from the defaults and the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds the configuration from the defaults and any variables `lookup` resolves.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let catalog_path = lookup(CATALOG_ENV)
            .map(PathBuf::from)
            .unwrap_or(defaults.catalog_path);
        let output_path = lookup(OUTPUT_ENV)
            .map(PathBuf::from)
            .unwrap_or(defaults.output_path);
        let seed = lookup(SEED_ENV)
            .map(|value| {
                let parsed = value.trim().parse::<u64>();
                parsed.map_err(|_| ConfigError::InvalidSeed {
                    var: SEED_ENV,
                    value,
                })
            })
            .transpose()?;

        Ok(Self {
            catalog_path,
            output_path,
            seed,
            ..defaults
        })
    }
}
