use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;

use crate::message::Message;

use super::error::{HandlerError, PolicyError};
use super::handler::Handler;

/// Fixed-count, fixed-interval retry policy.
///
/// `retries` is the maximum number of additional attempts after the first,
/// so a wrapped handler is invoked at most `retries + 1` times. The wait
/// between attempts is a constant `interval`, not an exponential backoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub retries: u32,
    pub interval: Duration,
}

impl RetryPolicy {
    pub fn new(retries: u32, interval: Duration) -> Self {
        Self { retries, interval }
    }

    fn validate(&self) -> Result<(), PolicyError> {
        if self.interval.is_zero() {
            return Err(PolicyError::ZeroInterval);
        }
        Ok(())
    }
}

/// Decorator that transparently retries a failing handler.
///
/// On failure the wrapped handler is re-invoked after `interval`, up to
/// `retries` additional attempts. The final failure propagates to the
/// caller unchanged. Each attempt re-runs the wrapped handler's side
/// effects; callers must ensure repeated execution is idempotency-safe.
pub struct RetryableHandler {
    inner: Arc<dyn Handler>,
    policy: RetryPolicy,
}

impl RetryableHandler {
    /// Wrap a handler with the given retry policy.
    ///
    /// Fails with [`PolicyError::ZeroInterval`] when the interval is zero.
    pub fn new(inner: Arc<dyn Handler>, policy: RetryPolicy) -> Result<Self, PolicyError> {
        policy.validate()?;
        Ok(Self { inner, policy })
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }
}

#[async_trait]
impl Handler for RetryableHandler {
    async fn handle(&self, message: &Message) -> Result<(), HandlerError> {
        let mut attempts: u32 = 0;

        loop {
            match self.inner.handle(message).await {
                Ok(()) => return Ok(()),
                Err(err) => {
                    if attempts < self.policy.retries {
                        attempts += 1;
                        sleep(self.policy.interval).await;
                    } else {
                        return Err(err);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use serde_json::Map;

    use super::*;

    /// Fails the first `failures` invocations, then succeeds.
    struct FlakyHandler {
        calls: AtomicU32,
        failures: u32,
    }

    impl FlakyHandler {
        fn new(failures: u32) -> Self {
            Self {
                calls: AtomicU32::new(0),
                failures,
            }
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Handler for FlakyHandler {
        async fn handle(&self, _message: &Message) -> Result<(), HandlerError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures {
                Err(HandlerError::Rejected("flaky".to_string()))
            } else {
                Ok(())
            }
        }
    }

    fn message() -> Message {
        Message::create("m-1", "Test", Map::new()).unwrap()
    }

    #[test]
    fn construction_rejects_zero_interval() {
        let inner = Arc::new(FlakyHandler::new(0));
        let result = RetryableHandler::new(inner, RetryPolicy::new(3, Duration::ZERO));
        assert!(matches!(result, Err(PolicyError::ZeroInterval)));
    }

    #[tokio::test(start_paused = true)]
    async fn succeeds_without_retry() {
        let inner = Arc::new(FlakyHandler::new(0));
        let policy = RetryPolicy::new(2, Duration::from_millis(10));
        let handler =
            RetryableHandler::new(Arc::clone(&inner) as Arc<dyn Handler>, policy).unwrap();

        handler.handle(&message()).await.unwrap();
        assert_eq!(inner.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn retries_until_success() {
        // Fails twice then succeeds: retries = 2 means 3 total calls.
        let inner = Arc::new(FlakyHandler::new(2));
        let policy = RetryPolicy::new(2, Duration::from_millis(10));
        let handler =
            RetryableHandler::new(Arc::clone(&inner) as Arc<dyn Handler>, policy).unwrap();

        handler.handle(&message()).await.unwrap();
        assert_eq!(inner.calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn surfaces_original_error_after_exhaustion() {
        let inner = Arc::new(FlakyHandler::new(u32::MAX));
        let policy = RetryPolicy::new(3, Duration::from_millis(10));
        let handler =
            RetryableHandler::new(Arc::clone(&inner) as Arc<dyn Handler>, policy).unwrap();

        let err = handler.handle(&message()).await.unwrap_err();
        assert!(matches!(err, HandlerError::Rejected(msg) if msg == "flaky"));
        assert_eq!(inner.calls(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_retries_means_single_attempt() {
        let inner = Arc::new(FlakyHandler::new(u32::MAX));
        let policy = RetryPolicy::new(0, Duration::from_millis(10));
        let handler =
            RetryableHandler::new(Arc::clone(&inner) as Arc<dyn Handler>, policy).unwrap();

        handler.handle(&message()).await.unwrap_err();
        assert_eq!(inner.calls(), 1);
    }
}
