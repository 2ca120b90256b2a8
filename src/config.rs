use std::env;

use crate::deezer;

/// Application configuration from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub deezer_api_base: String,
    pub leaderboard_path: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);

        // Overridable for tests and self-hosted mirrors.
        let deezer_api_base = env::var("DEEZER_API_BASE")
            .unwrap_or_else(|_| deezer::DEFAULT_API_BASE.to_string());

        let leaderboard_path = env::var("LEADERBOARD_PATH")
            .unwrap_or_else(|_| "leaderboard.json".to_string());

        Ok(Self {
            port,
            deezer_api_base,
            leaderboard_path,
        })
    }
}
