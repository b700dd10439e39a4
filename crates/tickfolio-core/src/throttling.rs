use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use governor::clock::DefaultClock;
use governor::state::direct::NotKeyed;
use governor::state::InMemoryState;
use governor::{Quota, RateLimiter};

type DirectRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// In-memory rate guard for free-tier provider quotas.
///
/// Alpha Vantage allows 5 calls per minute on the free tier; exceeding the
/// budget surfaces as a rate-limit fetch failure rather than a blocking wait,
/// keeping the enrichment path fail-fast.
#[derive(Clone)]
pub struct ThrottlingQueue {
    limiter: Arc<DirectRateLimiter>,
    period: Duration,
}

impl ThrottlingQueue {
    pub fn new(quota_window: Duration, quota_limit: u32) -> Self {
        let limit = NonZeroU32::new(quota_limit.max(1)).unwrap_or(NonZeroU32::MIN);
        let period = quota_window / limit.get();
        let quota = Quota::with_period(period)
            .unwrap_or_else(|| Quota::per_minute(limit))
            .allow_burst(limit);

        Self {
            limiter: Arc::new(RateLimiter::direct(quota)),
            period,
        }
    }

    /// Alpha Vantage free-tier quota: 5 calls per minute.
    pub fn alphavantage_default() -> Self {
        Self::new(Duration::from_secs(60), 5)
    }

    /// Tries to acquire rate budget. When budget is unavailable the
    /// recommended delay before retrying is returned.
    pub fn acquire(&self) -> Result<(), Duration> {
        if self.limiter.check().is_ok() {
            return Ok(());
        }
        Err(self.period)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allows_burst_up_to_quota() {
        let queue = ThrottlingQueue::new(Duration::from_secs(60), 5);
        for _ in 0..5 {
            assert!(queue.acquire().is_ok());
        }
        let delay = queue.acquire().expect_err("quota should be exhausted");
        assert!(delay > Duration::ZERO);
    }
}
