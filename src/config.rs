use std::{env, path::PathBuf};

const DEFAULT_PORT: u16 = 8080;

/// Startup settings, read once from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// JSON array of activities replacing the built-in seed set.
    pub seed_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("PORT")
            .and_then(|value| value.trim().parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);
        let seed_path = lookup("FIT_TRACK_SEED_PATH")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        Self { port, seed_path }
    }
}
