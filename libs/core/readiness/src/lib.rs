//! Startup readiness protocol
//!
//! Blocks a process on the startup path until a dependency answers a probe, so
//! peers can be started in any order. The server waits on PostgreSQL with a
//! `SELECT 1`, the client waits on the server with an empty `GetUsers` call.
//!
//! ```text
//! WAITING ──probe ok──────────▶ READY
//!    │
//!    └──budget exhausted──────▶ FAILED (terminal)
//! ```
//!
//! Probes run one after another with a fixed delay in between. The only exits
//! are success or exhaustion.
//!
//! # Example
//!
//! ```ignore
//! use readiness::{wait_until_ready, ReadinessConfig};
//! use std::time::Duration;
//!
//! let config = ReadinessConfig::new(10, Duration::from_secs(3));
//! wait_until_ready("postgres", &config, || database::postgres::check_health(&db)).await?;
//! ```

use std::fmt;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tracing::{error, info, warn};

#[cfg(feature = "config")]
mod config;

/// Retry budget for a readiness loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadinessConfig {
    /// Total number of probes, including the first one
    pub max_attempts: u32,

    /// Fixed pause between two consecutive probes
    pub delay: Duration,
}

impl ReadinessConfig {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Attempts actually performed; a zero budget still probes once.
    pub fn effective_attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

impl Default for ReadinessConfig {
    /// 10 attempts, 2 seconds apart
    fn default() -> Self {
        Self {
            max_attempts: 10,
            delay: Duration::from_secs(2),
        }
    }
}

/// Where a readiness loop currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadinessState {
    Waiting,
    Ready,
    Failed,
}

impl fmt::Display for ReadinessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadinessState::Waiting => write!(f, "waiting"),
            ReadinessState::Ready => write!(f, "ready"),
            ReadinessState::Failed => write!(f, "failed"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReadinessError {
    #[error("{dependency} not ready after {attempts} attempts: {last_error}")]
    Exhausted {
        dependency: String,
        attempts: u32,
        last_error: String,
    },

    /// `wait` was called on a loop that already reached a terminal state
    #[error("{dependency} readiness loop already finished ({state})")]
    AlreadyFinished {
        dependency: String,
        state: ReadinessState,
    },
}

/// Readiness loop for a single dependency
///
/// Keeps the state and the number of probes issued so far, which is what the
/// startup logs report.
#[derive(Debug)]
pub struct Readiness {
    dependency: String,
    config: ReadinessConfig,
    state: ReadinessState,
    attempts: u32,
}

impl Readiness {
    pub fn new(dependency: impl Into<String>, config: ReadinessConfig) -> Self {
        Self {
            dependency: dependency.into(),
            config,
            state: ReadinessState::Waiting,
            attempts: 0,
        }
    }

    pub fn state(&self) -> ReadinessState {
        self.state
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Probe until the dependency answers or the budget runs out.
    ///
    /// Returns the value of the first successful probe. Once the loop has
    /// left `Waiting` it is not restarted: calling `wait` again fails with
    /// `AlreadyFinished` without probing.
    pub async fn wait<F, Fut, T, E>(&mut self, mut probe: F) -> Result<T, ReadinessError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: fmt::Display,
    {
        if self.state != ReadinessState::Waiting {
            return Err(ReadinessError::AlreadyFinished {
                dependency: self.dependency.clone(),
                state: self.state,
            });
        }

        let max_attempts = self.config.effective_attempts();
        let mut last_error = String::new();

        while self.attempts < max_attempts {
            self.attempts += 1;

            match probe().await {
                Ok(value) => {
                    self.state = ReadinessState::Ready;
                    info!(
                        dependency = %self.dependency,
                        attempt = self.attempts,
                        state = %self.state,
                        "Dependency is ready"
                    );
                    return Ok(value);
                }
                Err(e) => {
                    last_error = e.to_string();

                    if self.attempts < max_attempts {
                        warn!(
                            dependency = %self.dependency,
                            attempt = self.attempts,
                            max_attempts,
                            error = %last_error,
                            "Dependency not ready, retrying in {:?}",
                            self.config.delay
                        );
                        tokio::time::sleep(self.config.delay).await;
                    }
                }
            }
        }

        self.state = ReadinessState::Failed;
        error!(
            dependency = %self.dependency,
            attempts = self.attempts,
            state = %self.state,
            error = %last_error,
            "Dependency never became ready"
        );
        Err(ReadinessError::Exhausted {
            dependency: self.dependency.clone(),
            attempts: self.attempts,
            last_error,
        })
    }
}

/// Run a fresh readiness loop for `dependency` and return the first successful probe value.
pub async fn wait_until_ready<F, Fut, T, E>(
    dependency: &str,
    config: &ReadinessConfig,
    probe: F,
) -> Result<T, ReadinessError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: fmt::Display,
{
    Readiness::new(dependency, config.clone()).wait(probe).await
}
