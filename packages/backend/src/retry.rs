//! Bounded retry for transient failures.
//!
//! One policy type drives every automatic retry in the app: session
//! bootstrap and auth submission share [`retry`], differing only in the
//! [`RetryPolicy`] they pass. Delays grow linearly (`base * (n + 1)`),
//! only transient errors are retried, and the attempt budget is a hard
//! cap. Dropping the returned future cancels any pending delay, so no
//! timer outlives its caller.

use std::time::Duration;

use crate::error::{Error, ErrorKind};

/// How many times to retry and how long to wait between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt. Total attempts = `max_retries + 1`.
    pub max_retries: u32,
    /// Delay before the first retry; later retries wait `base * (n + 1)`.
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
        }
    }

    /// Session bootstrap: up to 3 automatic retries at 2s / 4s / 6s.
    pub fn bootstrap() -> Self {
        Self::new(3, Duration::from_secs(2))
    }

    /// Auth submission: one automatic retry; a rerun after that retry
    /// waits 4s instead of 2s.
    pub fn submit() -> Self {
        Self::new(1, Duration::from_secs(2))
    }

    /// Delay before retry number `retry_index` (zero-based).
    pub fn delay_for(&self, retry_index: u32) -> Duration {
        self.base_delay * (retry_index + 1)
    }
}

/// Progress of one retried operation, handed to the `on_wait` callback
/// before each delay so callers can surface "retrying" state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryState {
    /// Attempts completed so far. Always `<= max_attempts`.
    pub attempt_count: u32,
    /// Total attempt budget (`max_retries + 1`).
    pub max_attempts: u32,
    /// Category of the failure that triggered this wait.
    pub last_error: ErrorKind,
}

/// Run `op`, retrying transient failures per `policy`.
///
/// Non-transient errors and the final failure of an exhausted budget are
/// returned as-is; no delay is scheduled after the last attempt.
pub async fn retry<T, Fut, F, W>(policy: RetryPolicy, mut op: F, mut on_wait: W) -> Result<T, Error>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, Error>>,
    W: FnMut(RetryState, Duration),
{
    let max_attempts = policy.max_retries + 1;
    let mut attempt = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                attempt += 1;
                if !err.is_transient() || attempt >= max_attempts {
                    return Err(err);
                }
                let delay = policy.delay_for(attempt - 1);
                tracing::warn!(
                    attempt,
                    max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    "transient failure, retrying: {err}"
                );
                on_wait(
                    RetryState {
                        attempt_count: attempt,
                        max_attempts,
                        last_error: err.kind,
                    },
                    delay,
                );
                sleep(delay).await;
            }
        }
    }
}

/// Platform sleep: browser timers on wasm, tokio elsewhere.
pub async fn sleep(duration: Duration) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(duration).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(duration).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn transient() -> Error {
        Error::new(ErrorKind::Network, "Network request failed")
    }

    fn terminal() -> Error {
        Error::new(ErrorKind::InvalidCredentials, "Invalid login credentials")
    }

    // 1ms base keeps the timing real without slowing the suite down.
    fn fast(max_retries: u32) -> RetryPolicy {
        RetryPolicy::new(max_retries, Duration::from_millis(1))
    }

    #[test]
    fn test_delay_ladder() {
        let policy = RetryPolicy::bootstrap();
        assert_eq!(policy.delay_for(0), Duration::from_secs(2));
        assert_eq!(policy.delay_for(1), Duration::from_secs(4));
        assert_eq!(policy.delay_for(2), Duration::from_secs(6));

        assert_eq!(RetryPolicy::submit().max_retries, 1);
    }

    #[tokio::test]
    async fn test_success_needs_no_retry() {
        let calls = RefCell::new(0);
        let result = retry(
            fast(3),
            || {
                *calls.borrow_mut() += 1;
                async { Ok::<_, Error>(42) }
            },
            |_, _| panic!("no wait expected"),
        )
        .await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(*calls.borrow(), 1);
    }

    #[tokio::test]
    async fn test_transient_failures_retry_until_success() {
        let calls = RefCell::new(0);
        let waits = RefCell::new(Vec::new());
        let result = retry(
            fast(3),
            || {
                *calls.borrow_mut() += 1;
                let n = *calls.borrow();
                async move {
                    if n < 3 {
                        Err(transient())
                    } else {
                        Ok("session")
                    }
                }
            },
            |state, delay| waits.borrow_mut().push((state, delay)),
        )
        .await;
        assert_eq!(result.unwrap(), "session");
        assert_eq!(*calls.borrow(), 3);

        let waits = waits.borrow();
        assert_eq!(waits.len(), 2);
        assert_eq!(waits[0].0.attempt_count, 1);
        assert_eq!(waits[0].1, Duration::from_millis(1));
        assert_eq!(waits[1].0.attempt_count, 2);
        assert_eq!(waits[1].1, Duration::from_millis(2));
        assert!(waits.iter().all(|(s, _)| s.attempt_count <= s.max_attempts));
    }

    #[tokio::test]
    async fn test_budget_exhaustion_surfaces_last_error() {
        let calls = RefCell::new(0);
        let waits = RefCell::new(0);
        let result: Result<(), _> = retry(
            fast(3),
            || {
                *calls.borrow_mut() += 1;
                async { Err(transient()) }
            },
            |_, _| *waits.borrow_mut() += 1,
        )
        .await;
        let err = result.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Network);
        // 1 initial attempt + 3 retries, and no wait after the last failure.
        assert_eq!(*calls.borrow(), 4);
        assert_eq!(*waits.borrow(), 3);
    }

    #[tokio::test]
    async fn test_non_transient_error_is_not_retried() {
        let calls = RefCell::new(0);
        let result: Result<(), _> = retry(
            fast(3),
            || {
                *calls.borrow_mut() += 1;
                async { Err(terminal()) }
            },
            |_, _| panic!("no wait expected"),
        )
        .await;
        assert_eq!(result.unwrap_err().kind, ErrorKind::InvalidCredentials);
        assert_eq!(*calls.borrow(), 1);
    }

    #[tokio::test]
    async fn test_zero_retries_fails_on_first_transient() {
        let calls = RefCell::new(0);
        let result: Result<(), _> = retry(
            fast(0),
            || {
                *calls.borrow_mut() += 1;
                async { Err(transient()) }
            },
            |_, _| panic!("no wait expected"),
        )
        .await;
        assert!(result.is_err());
        assert_eq!(*calls.borrow(), 1);
    }
}
