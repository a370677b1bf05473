//! Bounded retry with linear backoff around archive attempts
//!
//! The coordinator moves through `Idle → Attempting(n) → Succeeded(n)` or
//! `Attempting(n) → Retrying(n + 1) → Attempting(n + 1) → … → Exhausted(max)`.
//! Diagnostics from every attempt are appended to one history that is never reset.

use crate::models::Diagnostics;
use crate::{Error, Result};
use std::future::Future;
use std::time::Duration;

/// How many attempts to make and how long to wait between them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
}

impl RetryPolicy {
    /// At least one attempt is always made.
    #[must_use]
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    #[must_use]
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Wait before `attempt` (1-based): nothing for the first, `base_delay * attempt` after.
    #[must_use]
    pub fn delay_before(&self, attempt: u32) -> Duration {
        if attempt <= 1 {
            Duration::ZERO
        } else {
            self.base_delay.saturating_mul(attempt)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetryState {
    #[default]
    Idle,
    Attempting(u32),
    Retrying(u32),
    Succeeded(u32),
    Exhausted(u32),
}

/// Result of one attempt together with the diagnostics it produced
#[derive(Debug)]
pub struct AttemptReport<T> {
    pub outcome: Result<T>,
    pub diagnostics: Diagnostics,
}

impl<T> AttemptReport<T> {
    pub fn new(outcome: Result<T>, diagnostics: Diagnostics) -> Self {
        Self {
            outcome,
            diagnostics,
        }
    }
}

#[derive(Debug)]
pub struct RetryCoordinator {
    policy: RetryPolicy,
    state: RetryState,
    attempts_made: u32,
}

impl RetryCoordinator {
    #[must_use]
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            policy,
            state: RetryState::Idle,
            attempts_made: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> RetryState {
        self.state
    }

    #[must_use]
    pub fn attempts_made(&self) -> u32 {
        self.attempts_made
    }

    /// Run `attempt_fn` sequentially until it succeeds or the policy is exhausted
    ///
    /// # Arguments
    /// * `history` - Cumulative diagnostics; each attempt's diagnostics and failure are appended
    /// * `attempt_fn` - Called with the 1-based attempt number
    ///
    /// # Returns
    /// The first successful value, the error of a non-retryable failure, or
    /// `Error::RetryExhausted` carrying the last error and the full history
    pub async fn run<T, F, Fut>(&mut self, history: &mut Diagnostics, mut attempt_fn: F) -> Result<T>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = AttemptReport<T>>,
    {
        let max_attempts = self.policy.max_attempts();
        let mut last_error = String::new();

        for attempt in 1..=max_attempts {
            if attempt > 1 {
                self.state = RetryState::Retrying(attempt);
                history.warn(format!("Retry attempt {attempt}/{max_attempts}"));
                log::warn!("Retry attempt {attempt}/{max_attempts}");
                tokio::time::sleep(self.policy.delay_before(attempt)).await;
            }

            self.state = RetryState::Attempting(attempt);
            self.attempts_made = attempt;

            let AttemptReport {
                outcome,
                diagnostics,
            } = attempt_fn(attempt).await;
            history.append(diagnostics);

            match outcome {
                Ok(value) => {
                    self.state = RetryState::Succeeded(attempt);
                    return Ok(value);
                }
                Err(e) => {
                    history.error(format!("Attempt {attempt} failed: {e}"));
                    if !e.is_retryable() {
                        self.state = RetryState::Exhausted(attempt);
                        return Err(e);
                    }
                    last_error = e.to_string();
                }
            }
        }

        self.state = RetryState::Exhausted(max_attempts);
        Err(Error::RetryExhausted {
            attempts: max_attempts,
            last_error,
            history: history.clone(),
        })
    }
}
