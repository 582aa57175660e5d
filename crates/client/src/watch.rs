//! Task completion watcher.
//!
//! Every mutating management-plane call returns a task handle immediately;
//! this module turns that externally-driven, unbounded-duration operation
//! into a result the caller can branch on.
//!
//! # What this module handles:
//! - Bounded polling of a task until it reaches a terminal state
//! - Timeout, cancellation, and unknown-state surfacing
//! - Still-waiting heartbeat logging for long operations
//!
//! # What this module does NOT handle:
//! - Submitting tasks (see [`crate::endpoints`])
//! - Retrying a failed task; the caller decides whether to abort
//!
//! # Invariants
//! - The first poll happens before any sleep, so a handle that is already
//!   terminal returns without sleeping.
//! - The timeout is checked before each sleep; total wait never exceeds
//!   `max_wait` by more than one poll interval.
//! - A zero poll interval is rejected before the handle is polled at all.

use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::cancel::CancelToken;
use crate::error::{ClientError, Result};
use crate::models::{TaskState, TaskStatus};
use virtmgr_config::WatchConfig;
use virtmgr_config::constants::DEFAULT_HEARTBEAT_EVERY_POLLS;

/// Options controlling a single watch.
#[derive(Debug, Clone)]
pub struct WatchOptions {
    /// Interval between task-status polls.
    pub poll_interval: Duration,
    /// Maximum total time to wait for a terminal state; `None` waits
    /// indefinitely.
    pub max_wait: Option<Duration>,
    /// Emit a still-waiting log line every N polls; 0 disables heartbeats.
    pub heartbeat_every: u32,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self::from(&WatchConfig::default())
    }
}

impl From<&WatchConfig> for WatchOptions {
    fn from(config: &WatchConfig) -> Self {
        Self {
            poll_interval: config.poll_interval,
            max_wait: config.max_wait,
            heartbeat_every: DEFAULT_HEARTBEAT_EVERY_POLLS,
        }
    }
}

impl WatchOptions {
    pub fn new(poll_interval: Duration) -> Self {
        Self {
            poll_interval,
            max_wait: None,
            heartbeat_every: DEFAULT_HEARTBEAT_EVERY_POLLS,
        }
    }

    pub fn max_wait(mut self, max_wait: Duration) -> Self {
        self.max_wait = Some(max_wait);
        self
    }

    pub fn heartbeat_every(mut self, polls: u32) -> Self {
        self.heartbeat_every = polls;
        self
    }
}

fn task_label(status: &TaskStatus) -> String {
    format!("{} on '{}'", status.description, status.target)
}

/// Poll a task until it reaches a terminal state.
///
/// `poll` is called once per tick and must return the task's current status;
/// polling is read-only on the management plane. Between non-terminal polls
/// the calling task is suspended for `options.poll_interval` (never a busy
/// loop).
///
/// Returns:
/// - `Ok(status)` once the task reports Succeeded;
/// - [`ClientError::TaskFailed`] carrying the task's error detail verbatim;
/// - [`ClientError::TaskTimedOut`] if `max_wait` elapses first (distinct
///   from an operation-reported failure);
/// - [`ClientError::UnknownTaskState`] on a state outside the known machine;
/// - [`ClientError::Cancelled`] on the next tick after `cancel` fires;
/// - [`ClientError::InvalidPollInterval`] without polling if the interval
///   is zero.
pub async fn watch<F, Fut>(
    mut poll: F,
    options: &WatchOptions,
    cancel: Option<&CancelToken>,
) -> Result<TaskStatus>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<TaskStatus>>,
{
    if options.poll_interval.is_zero() {
        return Err(ClientError::InvalidPollInterval);
    }

    let start = Instant::now();
    let mut polls: u32 = 0;

    loop {
        let status = poll().await?;
        polls += 1;

        let label = task_label(&status);
        match status.state.clone() {
            TaskState::Succeeded => {
                info!("{} completed successfully", label);
                return Ok(status);
            }
            TaskState::Failed => {
                let detail = status
                    .error
                    .clone()
                    .unwrap_or_else(|| "no error detail reported".to_string());
                warn!("{} failed: {}", label, detail);
                return Err(ClientError::TaskFailed {
                    description: status.description,
                    target: status.target,
                    detail,
                });
            }
            TaskState::Unknown(state) => {
                warn!("{} reported unsupported state '{}'", label, state);
                return Err(ClientError::UnknownTaskState {
                    description: status.description,
                    target: status.target,
                    state,
                });
            }
            TaskState::Pending | TaskState::Running => {
                debug!("{} is {}", label, status.state);
            }
        }

        if let Some(token) = cancel
            && token.is_cancelled()
        {
            return Err(ClientError::Cancelled(label));
        }

        let waited = start.elapsed();
        if let Some(max_wait) = options.max_wait
            && waited >= max_wait
        {
            warn!("{} still {} after {:?}, giving up", label, status.state, waited);
            return Err(ClientError::TaskTimedOut {
                description: status.description,
                target: status.target,
                waited,
            });
        }

        if options.heartbeat_every > 0 && polls % options.heartbeat_every == 0 {
            info!(
                "{} still {} after {} polls ({:?})",
                label, status.state, polls, waited
            );
        }

        match cancel {
            Some(token) => {
                tokio::select! {
                    _ = tokio::time::sleep(options.poll_interval) => {}
                    _ = token.cancelled() => {
                        return Err(ClientError::Cancelled(label));
                    }
                }
            }
            None => tokio::time::sleep(options.poll_interval).await,
        }
    }
}
