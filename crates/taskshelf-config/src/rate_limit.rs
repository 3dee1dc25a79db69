//! Rate limiting configuration for API endpoints.
//!
//! Limits are enforced per client IP with a token bucket (Governor):
//! tokens refill every `1 / per_second` seconds and at most `burst_size`
//! accumulate. The client IP is taken from `x-forwarded-for`, `x-real-ip`
//! or `forwarded` when present, and from the peer address otherwise.
//!
//! # Environment Variables
//!
//! - `RATE_LIMIT_ENABLED`: turn limiting on or off (default: true)
//! - `RATE_LIMIT_GENERAL_PER_SECOND`: refill interval source for general routes (default: 2)
//! - `RATE_LIMIT_GENERAL_BURST_SIZE`: bucket size for general routes (default: 30)
//! - `RATE_LIMIT_AUTH_PER_SECOND`: refill interval source for the login route (default: 10)
//! - `RATE_LIMIT_AUTH_BURST_SIZE`: bucket size for the login route (default: 5)
//!
//! # Example
//!
//! ```ignore
//! let config = RateLimitConfig::from_env();
//!
//! if let Some(governor) = config.auth_governor_config() {
//!     let auth_router = Router::new()
//!         .route("/token", post(login))
//!         .layer(GovernorLayer::new(governor));
//! }
//! ```

use tower_governor::governor::{GovernorConfig, GovernorConfigBuilder};
use tower_governor::key_extractor::SmartIpKeyExtractor;

use crate::env_flag;

pub type IpGovernorConfig =
    GovernorConfig<SmartIpKeyExtractor, ::governor::middleware::NoOpMiddleware>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub enabled: bool,

    pub general_per_second: u64,

    pub general_burst_size: u32,

    /// Stricter than the general limit; applies to `POST /auth/token`.
    pub auth_per_second: u64,

    pub auth_burst_size: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            general_per_second: 2,
            general_burst_size: 30,
            auth_per_second: 10,
            auth_burst_size: 5,
        }
    }
}

impl RateLimitConfig {
    /// Limiting turned off, for tests and local tooling.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Falls back to the defaults for variables that are unset or unparseable.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            enabled: env_flag("RATE_LIMIT_ENABLED", defaults.enabled),
            general_per_second: env_number("RATE_LIMIT_GENERAL_PER_SECOND")
                .unwrap_or(defaults.general_per_second),
            general_burst_size: env_number("RATE_LIMIT_GENERAL_BURST_SIZE")
                .unwrap_or(defaults.general_burst_size),
            auth_per_second: env_number("RATE_LIMIT_AUTH_PER_SECOND")
                .unwrap_or(defaults.auth_per_second),
            auth_burst_size: env_number("RATE_LIMIT_AUTH_BURST_SIZE")
                .unwrap_or(defaults.auth_burst_size),
        }
    }

    /// Governor config for general routes, `None` when limiting is disabled.
    #[must_use]
    pub fn general_governor_config(&self) -> Option<IpGovernorConfig> {
        self.governor_config(self.general_per_second, self.general_burst_size)
    }

    /// Governor config for the login route, `None` when limiting is disabled.
    #[must_use]
    pub fn auth_governor_config(&self) -> Option<IpGovernorConfig> {
        self.governor_config(self.auth_per_second, self.auth_burst_size)
    }

    fn governor_config(&self, per_second: u64, burst_size: u32) -> Option<IpGovernorConfig> {
        if !self.enabled {
            return None;
        }

        // Governor rejects zero for either value.
        GovernorConfigBuilder::default()
            .per_second(per_second.max(1))
            .burst_size(burst_size.max(1))
            .key_extractor(SmartIpKeyExtractor)
            .finish()
    }
}

fn env_number<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}
