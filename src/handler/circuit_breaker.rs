use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

use crate::message::Message;

use super::error::{HandlerError, PolicyError};
use super::handler::Handler;

/// Circuit breaker configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CircuitBreakerPolicy {
    /// Consecutive failures before the breaker opens.
    pub failure_threshold: u32,
    /// Time the breaker stays open before allowing a trial call.
    pub cooldown_period: Duration,
    /// Reserved: validated at construction, not yet consulted.
    pub reset_timeout: Duration,
}

impl CircuitBreakerPolicy {
    pub fn new(failure_threshold: u32, cooldown_period: Duration, reset_timeout: Duration) -> Self {
        Self {
            failure_threshold,
            cooldown_period,
            reset_timeout,
        }
    }

    fn validate(&self) -> Result<(), PolicyError> {
        if self.failure_threshold == 0 {
            return Err(PolicyError::ZeroFailureThreshold);
        }
        if self.cooldown_period.is_zero() {
            return Err(PolicyError::ZeroCooldown);
        }
        if self.reset_timeout.is_zero() {
            return Err(PolicyError::ZeroResetTimeout);
        }
        Ok(())
    }
}

/// Breaker states.
///
/// `Closed` is normal operation. After `failure_threshold` consecutive
/// failures the breaker moves to `Open` and fails fast until the cooldown
/// elapses, then probes recovery through a single `HalfOpen` trial call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    Closed,
    Open,
    HalfOpen,
}

struct BreakerState {
    state: CircuitState,
    failure_count: u32,
    next_attempt: Instant,
}

/// Decorator that sheds load from a persistently failing handler.
///
/// While `Open`, calls are rejected with [`HandlerError::CircuitOpen`]
/// without touching the wrapped handler. Cooldown expiry is detected by
/// deadline comparison at the next invocation; there is no background
/// timer. The single half-open trial decides between full recovery
/// (`Closed`, failure count reset) and a fresh cooldown window (`Open`).
pub struct CircuitBreakerHandler {
    inner: Arc<dyn Handler>,
    policy: CircuitBreakerPolicy,
    shared: Mutex<BreakerState>,
}

impl CircuitBreakerHandler {
    /// Wrap a handler with the given breaker policy.
    ///
    /// Fails with a [`PolicyError`] when any policy field is zero.
    pub fn new(inner: Arc<dyn Handler>, policy: CircuitBreakerPolicy) -> Result<Self, PolicyError> {
        policy.validate()?;
        Ok(Self {
            inner,
            policy,
            shared: Mutex::new(BreakerState {
                state: CircuitState::Closed,
                failure_count: 0,
                next_attempt: Instant::now(),
            }),
        })
    }

    pub fn policy(&self) -> CircuitBreakerPolicy {
        self.policy
    }

    /// Current breaker state. A poisoned lock reads as `Open`.
    pub fn state(&self) -> CircuitState {
        self.shared
            .lock()
            .map(|s| s.state)
            .unwrap_or(CircuitState::Open)
    }

    /// Consecutive failures since the last reset.
    pub fn failure_count(&self) -> u32 {
        self.shared.lock().map(|s| s.failure_count).unwrap_or(0)
    }
}

#[async_trait]
impl Handler for CircuitBreakerHandler {
    async fn handle(&self, message: &Message) -> Result<(), HandlerError> {
        // Gate check before the call. The lock is released before awaiting
        // the wrapped handler.
        {
            let mut shared = self
                .shared
                .lock()
                .map_err(|_| HandlerError::LockPoisoned("circuit breaker state"))?;

            if shared.state == CircuitState::Open {
                if Instant::now() < shared.next_attempt {
                    return Err(HandlerError::CircuitOpen);
                }
                shared.state = CircuitState::HalfOpen;
            }
        }

        let result = self.inner.handle(message).await;

        let mut shared = self
            .shared
            .lock()
            .map_err(|_| HandlerError::LockPoisoned("circuit breaker state"))?;

        match result {
            Ok(()) => {
                shared.state = CircuitState::Closed;
                shared.failure_count = 0;
                Ok(())
            }
            Err(err) => {
                shared.failure_count += 1;
                if shared.state == CircuitState::HalfOpen
                    || shared.failure_count >= self.policy.failure_threshold
                {
                    shared.state = CircuitState::Open;
                    shared.next_attempt = Instant::now() + self.policy.cooldown_period;
                }
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

    use serde_json::Map;

    use super::*;

    /// Handler whose outcome is toggled by the test.
    struct ToggleHandler {
        failing: AtomicBool,
        calls: AtomicU32,
    }

    impl ToggleHandler {
        fn new(failing: bool) -> Self {
            Self {
                failing: AtomicBool::new(failing),
                calls: AtomicU32::new(0),
            }
        }

        fn set_failing(&self, failing: bool) {
            self.failing.store(failing, Ordering::SeqCst);
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Handler for ToggleHandler {
        async fn handle(&self, _message: &Message) -> Result<(), HandlerError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.failing.load(Ordering::SeqCst) {
                Err(HandlerError::Rejected("downstream failure".to_string()))
            } else {
                Ok(())
            }
        }
    }

    fn policy() -> CircuitBreakerPolicy {
        CircuitBreakerPolicy::new(
            2,
            Duration::from_millis(1000),
            Duration::from_millis(5000),
        )
    }

    fn message() -> Message {
        Message::create("m-1", "Test", Map::new()).unwrap()
    }

    #[test]
    fn construction_validates_policy() {
        let inner = Arc::new(ToggleHandler::new(false));

        let zero_threshold = CircuitBreakerPolicy::new(
            0,
            Duration::from_millis(1000),
            Duration::from_millis(5000),
        );
        assert!(matches!(
            CircuitBreakerHandler::new(Arc::clone(&inner) as Arc<dyn Handler>, zero_threshold),
            Err(PolicyError::ZeroFailureThreshold)
        ));

        let zero_cooldown =
            CircuitBreakerPolicy::new(2, Duration::ZERO, Duration::from_millis(5000));
        assert!(matches!(
            CircuitBreakerHandler::new(Arc::clone(&inner) as Arc<dyn Handler>, zero_cooldown),
            Err(PolicyError::ZeroCooldown)
        ));

        let zero_reset =
            CircuitBreakerPolicy::new(2, Duration::from_millis(1000), Duration::ZERO);
        assert!(matches!(
            CircuitBreakerHandler::new(inner, zero_reset),
            Err(PolicyError::ZeroResetTimeout)
        ));
    }

    #[tokio::test]
    async fn starts_closed() {
        let inner = Arc::new(ToggleHandler::new(false));
        let breaker = CircuitBreakerHandler::new(inner, policy()).unwrap();
        assert_eq!(breaker.state(), CircuitState::Closed);
        assert_eq!(breaker.failure_count(), 0);
    }

    #[tokio::test]
    async fn success_keeps_breaker_closed() {
        let inner = Arc::new(ToggleHandler::new(false));
        let breaker =
            CircuitBreakerHandler::new(Arc::clone(&inner) as Arc<dyn Handler>, policy()).unwrap();

        breaker.handle(&message()).await.unwrap();
        assert_eq!(breaker.state(), CircuitState::Closed);
        assert_eq!(breaker.failure_count(), 0);
    }

    #[tokio::test]
    async fn failure_below_threshold_stays_closed() {
        let inner = Arc::new(ToggleHandler::new(true));
        let breaker =
            CircuitBreakerHandler::new(Arc::clone(&inner) as Arc<dyn Handler>, policy()).unwrap();

        breaker.handle(&message()).await.unwrap_err();
        assert_eq!(breaker.state(), CircuitState::Closed);
        assert_eq!(breaker.failure_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn opens_after_threshold_and_fails_fast() {
        let inner = Arc::new(ToggleHandler::new(true));
        let breaker =
            CircuitBreakerHandler::new(Arc::clone(&inner) as Arc<dyn Handler>, policy()).unwrap();

        breaker.handle(&message()).await.unwrap_err();
        breaker.handle(&message()).await.unwrap_err();
        assert_eq!(breaker.state(), CircuitState::Open);
        assert_eq!(breaker.failure_count(), 2);
        assert_eq!(inner.calls(), 2);

        // Within cooldown: rejected without invoking the wrapped handler,
        // and the rejection does not count as a new failure.
        let err = breaker.handle(&message()).await.unwrap_err();
        assert!(err.is_circuit_open());
        assert_eq!(inner.calls(), 2);
        assert_eq!(breaker.failure_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn recovers_through_half_open_trial() {
        let inner = Arc::new(ToggleHandler::new(true));
        let breaker =
            CircuitBreakerHandler::new(Arc::clone(&inner) as Arc<dyn Handler>, policy()).unwrap();

        breaker.handle(&message()).await.unwrap_err();
        breaker.handle(&message()).await.unwrap_err();
        assert_eq!(breaker.state(), CircuitState::Open);

        tokio::time::advance(Duration::from_millis(1001)).await;

        inner.set_failing(false);
        breaker.handle(&message()).await.unwrap();
        assert_eq!(breaker.state(), CircuitState::Closed);
        assert_eq!(breaker.failure_count(), 0);
        assert_eq!(inner.calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_trial_reopens_with_fresh_cooldown() {
        let inner = Arc::new(ToggleHandler::new(true));
        let breaker =
            CircuitBreakerHandler::new(Arc::clone(&inner) as Arc<dyn Handler>, policy()).unwrap();

        breaker.handle(&message()).await.unwrap_err();
        breaker.handle(&message()).await.unwrap_err();

        tokio::time::advance(Duration::from_millis(1001)).await;

        // Trial call fails: back to Open, original error surfaces.
        let err = breaker.handle(&message()).await.unwrap_err();
        assert!(matches!(err, HandlerError::Rejected(_)));
        assert_eq!(breaker.state(), CircuitState::Open);

        // New cooldown window is active again.
        let err = breaker.handle(&message()).await.unwrap_err();
        assert!(err.is_circuit_open());
    }
}
