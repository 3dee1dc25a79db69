use std::env;

use tracing::warn;

#[derive(Clone, Debug)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    /// Reads the comma-separated `ALLOWED_ORIGINS` list.
    pub fn from_env() -> Self {
        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .map(|value| parse_origins(&value))
            .unwrap_or_else(|_| parse_origins("http://localhost:3000,http://localhost:5173"));

        Self { allowed_origins }
    }
}

/// Splits the list, dropping blanks. A `*` entry is dropped with a warning:
/// credentialed CORS cannot use a wildcard origin.
fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter(|s| {
            if *s == "*" {
                warn!("Ignoring wildcard entry in ALLOWED_ORIGINS; list origins explicitly");
                return false;
            }
            true
        })
        .map(str::to_string)
        .collect()
}
