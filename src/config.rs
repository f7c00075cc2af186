use std::path::PathBuf;

/// Environment variable naming the dataset opened at startup.
pub const DATA_PATH_ENV: &str = "SATELLITE_LAUNCHES_PATH";

/// Used when the environment variable is unset or blank.
pub const DEFAULT_DATA_PATH: &str = "satellite launches.csv";

/// Startup configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_value(std::env::var(DATA_PATH_ENV).ok())
    }

    fn from_value(value: Option<String>) -> Self {
        let data_path = value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_DATA_PATH.to_string());
        Config {
            data_path: PathBuf::from(data_path),
        }
    }
}
