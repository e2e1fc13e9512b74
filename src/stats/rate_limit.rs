// Self-throttling for outbound provider requests.
//
// Each provider client owns one RateLimiter instance; call sites share it by
// reference. The mutex keeps throttling correct if callers are ever driven
// concurrently, though the board build itself is strictly sequential.

use tokio::sync::Mutex;
use tokio::time::{sleep, Duration, Instant};

/// Enforces a minimum interval between outgoing requests to one provider.
pub struct RateLimiter {
    min_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        RateLimiter {
            min_interval,
            last_request: Mutex::new(None),
        }
    }

    /// Sleep until at least `min_interval` has elapsed since the last
    /// completed request. Call before issuing a request.
    pub async fn throttle(&self) {
        let last = *self.last_request.lock().await;
        if let Some(last) = last {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                sleep(self.min_interval - elapsed).await;
            }
        }
    }

    /// Record that a request just completed. Call after the response arrives;
    /// a transport failure that never produced a response does not count.
    pub async fn mark(&self) {
        *self.last_request.lock().await = Some(Instant::now());
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn first_request_is_not_delayed() {
        let limiter = RateLimiter::new(Duration::from_secs(2));
        let before = Instant::now();
        limiter.throttle().await;
        assert_eq!(before.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn second_request_waits_out_the_interval() {
        let limiter = RateLimiter::new(Duration::from_millis(2100));
        limiter.throttle().await;
        limiter.mark().await;

        let before = Instant::now();
        limiter.throttle().await;
        // Paused-clock sleep advances virtual time by exactly the remainder.
        assert_eq!(before.elapsed(), Duration::from_millis(2100));
    }

    #[tokio::test(start_paused = true)]
    async fn elapsed_interval_means_no_wait() {
        let limiter = RateLimiter::new(Duration::from_millis(500));
        limiter.throttle().await;
        limiter.mark().await;

        sleep(Duration::from_millis(600)).await;

        let before = Instant::now();
        limiter.throttle().await;
        assert_eq!(before.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn partial_elapse_waits_only_the_remainder() {
        let limiter = RateLimiter::new(Duration::from_millis(2000));
        limiter.throttle().await;
        limiter.mark().await;

        sleep(Duration::from_millis(1500)).await;

        let before = Instant::now();
        limiter.throttle().await;
        assert_eq!(before.elapsed(), Duration::from_millis(500));
    }
}
