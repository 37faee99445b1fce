//! Rate Limiting Middleware using GCRA Algorithm
//!
//! Per-IP rate limiting via tower_governor. Uses the Generic Cell Rate
//! Algorithm (GCRA), so no background process is needed.

use governor::middleware::StateInformationMiddleware;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;

/// Governor config keyed by peer IP, with X-RateLimit-* headers
pub type DefaultGovernorConfig =
    tower_governor::governor::GovernorConfig<PeerIpKeyExtractor, StateInformationMiddleware>;

/// Rate limiting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Seconds to replenish one request
    pub per_second: u64,
    /// Burst size (max requests that can be made immediately)
    pub burst_size: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            per_second: 1,
            burst_size: 20,
        }
    }
}

/// Build a governor config for the prediction router.
///
/// Returns `None` when the settings are rejected (zero period or burst).
/// The server must be run with
/// `into_make_service_with_connect_info::<SocketAddr>()` for IP extraction.
pub fn create_governor_config(config: &RateLimitConfig) -> Option<Arc<DefaultGovernorConfig>> {
    GovernorConfigBuilder::default()
        .per_second(config.per_second)
        .burst_size(config.burst_size)
        .use_headers()
        .finish()
        .map(Arc::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RateLimitConfig::default();
        assert_eq!(config.per_second, 1);
        assert_eq!(config.burst_size, 20);
    }

    #[test]
    fn test_create_governor_config() {
        let governor = create_governor_config(&RateLimitConfig::default());
        assert!(governor.is_some());
    }

    #[test]
    fn test_zero_burst_rejected() {
        let config = RateLimitConfig {
            per_second: 1,
            burst_size: 0,
        };
        assert!(create_governor_config(&config).is_none());
    }
}
