//! Rate limiting configuration for the API.
//!
//! A single global quota is applied per client IP ahead of every route.
//!
//! # Configuration
//!
//! - `RATE_LIMIT_MAX_REQUESTS`: Requests allowed per window (default: 100, `0` disables limiting)
//! - `RATE_LIMIT_WINDOW_SECS`: Window length in seconds (default: 900, i.e. 15 minutes)
//! - `RATE_LIMIT_TRUST_PROXY`: Key on the first `x-forwarded-for` hop instead of the
//!   socket peer (default: `false`). Enable only behind a proxy that overwrites the header.
//!
//! # Rate Limiting Strategy
//!
//! The limiter uses the Governor crate's GCRA (a token bucket equivalent):
//!
//! - The whole allowance is available as an initial burst
//! - One request's worth of capacity is replenished every `window / max_requests`
//! - Requests are rejected when no capacity is left

use std::net::IpAddr;
use std::num::NonZeroU32;
use std::time::Duration;

use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RateLimitConfig {
    /// Requests allowed per window for one client IP.
    pub max_requests: u32,

    /// Window length in seconds.
    pub window_secs: u64,

    /// Take the client address from `x-forwarded-for` rather than the socket peer.
    pub trust_proxy: bool,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 100,
            window_secs: 900,
            trust_proxy: false,
        }
    }
}

impl RateLimitConfig {
    /// Creates a new `RateLimitConfig` from environment variables.
    ///
    /// Falls back to default values if environment variables are not set
    /// or cannot be parsed.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_requests: crate::env_or("RATE_LIMIT_MAX_REQUESTS", defaults.max_requests),
            window_secs: crate::env_or("RATE_LIMIT_WINDOW_SECS", defaults.window_secs),
            trust_proxy: crate::env_or("RATE_LIMIT_TRUST_PROXY", defaults.trust_proxy),
        }
    }

    /// The Governor quota for this configuration, or `None` when limiting is disabled.
    #[must_use]
    pub fn quota(&self) -> Option<Quota> {
        let burst = NonZeroU32::new(self.max_requests)?;
        let period = Duration::from_secs(self.window_secs.max(1)) / burst.get();
        Quota::with_period(period).map(|quota| quota.allow_burst(burst))
    }

    /// How often idle client entries are purged from the limiter's state.
    #[must_use]
    pub fn upkeep_interval(&self) -> Duration {
        Duration::from_secs(self.window_secs.clamp(1, 60))
    }

    /// Builds a limiter keyed by client IP, or `None` when limiting is disabled.
    #[must_use]
    pub fn keyed_limiter(&self) -> Option<DefaultKeyedRateLimiter<IpAddr>> {
        self.quota().map(RateLimiter::keyed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn test_default_config() {
        let config = RateLimitConfig::default();
        assert_eq!(config.max_requests, 100);
        assert_eq!(config.window_secs, 900);
        assert!(!config.trust_proxy);
    }

    #[test]
    fn test_default_quota_shape() {
        let quota = RateLimitConfig::default().quota().unwrap();
        assert_eq!(quota.burst_size().get(), 100);
        assert_eq!(quota.replenish_interval(), Duration::from_secs(9));
    }

    #[test]
    fn test_zero_disables() {
        let config = RateLimitConfig {
            max_requests: 0,
            window_secs: 900,
            trust_proxy: false,
        };
        assert!(config.quota().is_none());
        assert!(config.keyed_limiter().is_none());
    }

    #[test]
    fn test_limiter_rejects_after_burst() {
        let config = RateLimitConfig {
            max_requests: 2,
            window_secs: 900,
            trust_proxy: false,
        };
        let limiter = config.keyed_limiter().unwrap();
        let ip = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1));
        let other = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 2));

        assert!(limiter.check_key(&ip).is_ok());
        assert!(limiter.check_key(&ip).is_ok());
        assert!(limiter.check_key(&ip).is_err());
        assert!(limiter.check_key(&other).is_ok());
    }
}
