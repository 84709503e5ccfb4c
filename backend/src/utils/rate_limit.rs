use governor::clock::{Clock, DefaultClock};
use governor::middleware::NoOpMiddleware;
use governor::state::keyed::DashMapStateStore;
use governor::{Quota, RateLimiter};
use shared::validation::phone_key;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

/// How often phone numbers with a refilled quota are forgotten.
pub const EVICTION_INTERVAL: Duration = Duration::from_secs(10 * 60);

type KeyedLimiter<C> =
    RateLimiter<String, DashMapStateStore<String>, C, NoOpMiddleware<<C as Clock>::Instant>>;

/// Caps how many membership requests one phone number can send per hour.
pub struct ContactRateLimiter<C: Clock = DefaultClock> {
    limiter: KeyedLimiter<C>,
}

impl ContactRateLimiter {
    pub fn per_hour(requests: NonZeroU32) -> Self {
        Self::with_clock(requests, &DefaultClock::default())
    }
}

impl<C: Clock> ContactRateLimiter<C> {
    pub fn with_clock(requests: NonZeroU32, clock: &C) -> Self {
        Self {
            limiter: RateLimiter::dashmap_with_clock(Quota::per_hour(requests), clock),
        }
    }

    /// Counts one request against `phone`. Returns false once the quota is spent.
    ///
    /// Keyed on digits only, so "06 12 34 56 78" and "0612345678" share a quota.
    pub fn check(&self, phone: &str) -> bool {
        self.limiter.check_key(&phone_key(phone)).is_ok()
    }

    /// Drops every phone number whose quota has fully refilled and returns how
    /// many are still tracked.
    pub fn retain_recent(&self) -> usize {
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();
        self.limiter.len()
    }
}

/// Runs [`ContactRateLimiter::retain_recent`] every `every` until the runtime stops.
pub fn spawn_eviction<C>(limiter: Arc<ContactRateLimiter<C>>, every: Duration) -> tokio::task::JoinHandle<()>
where
    C: Clock + Send + Sync + 'static,
    C::Instant: Send + Sync,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        // the first tick completes immediately
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let tracked = limiter.retain_recent();
            tracing::debug!("Rate limiter tracking {} phone number(s)", tracked);
        }
    })
}
