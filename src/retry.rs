//! Bounded retry execution with fixed backoff.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::{HarvestError, Result};

/// Outcome of running an operation under a [`RetryPolicy`].
#[derive(Debug)]
pub enum RetryOutcome<T> {
    /// The operation succeeded within the attempt budget.
    Success(T),
    /// Every attempt failed with a transient error; carries the last one.
    Exhausted(HarvestError),
    /// The operation hit a non-transient error and was not attempted again.
    Fatal(HarvestError),
}

impl<T> RetryOutcome<T> {
    /// Returns the success value, if any.
    pub fn success(self) -> Option<T> {
        match self {
            RetryOutcome::Success(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the failure cause, if any.
    pub fn failure(&self) -> Option<&HarvestError> {
        match self {
            RetryOutcome::Success(_) => None,
            RetryOutcome::Exhausted(e) | RetryOutcome::Fatal(e) => Some(e),
        }
    }
}

/// Fixed-delay retry policy with a bounded attempt budget.
///
/// An operation is attempted up to `max_attempts` times. A transient
/// failure (see [`HarvestError::is_transient`]) sleeps for `delay` and
/// tries again; any other failure stops immediately. The delay is fixed,
/// with no jitter and no exponential growth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
}

impl RetryPolicy {
    /// Creates a policy with the given attempt budget and inter-attempt delay.
    ///
    /// `max_attempts` is clamped to at least 1.
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    /// Returns the attempt budget.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Returns the fixed inter-attempt delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Runs `operation` under this policy.
    ///
    /// At most `max_attempts` attempts are made, with `max_attempts - 1`
    /// sleeps between them when every attempt fails transiently.
    pub async fn run<F, Fut, T>(&self, mut operation: F) -> RetryOutcome<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt = 1;
        loop {
            match operation().await {
                Ok(value) => return RetryOutcome::Success(value),
                Err(e) if !e.is_transient() => return RetryOutcome::Fatal(e),
                Err(e) if attempt >= self.max_attempts => return RetryOutcome::Exhausted(e),
                Err(e) => {
                    warn!(
                        "Attempt {}/{} failed: {}, retrying in {:?}",
                        attempt, self.max_attempts, e, self.delay
                    );
                    attempt += 1;
                    tokio::time::sleep(self.delay).await;
                }
            }
        }
    }
}

impl Default for RetryPolicy {
    /// Two attempts with a fixed 10 second delay between them.
    fn default() -> Self {
        Self::new(2, Duration::from_secs(10))
    }
}
