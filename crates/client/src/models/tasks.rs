//! Task models for the management plane's asynchronous operations.
//!
//! Every mutating API call returns a task reference immediately; the task
//! itself advances through a small state machine driven entirely by the
//! management plane:
//!
//! ```text
//! Pending --> Running --> Succeeded   (terminal)
//!                      \-> Failed     (terminal)
//! ```
//!
//! Terminal states are sticky. Anything outside this machine deserializes to
//! [`TaskState::Unknown`] so the watcher can surface it instead of looping.

use serde::{Deserialize, Serialize};

/// State of a management-plane task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TaskState {
    /// Queued, not yet started. Treated the same as Running by the watcher.
    Pending,
    /// In progress.
    Running,
    /// Terminal success.
    Succeeded,
    /// Terminal failure; the task carries an error detail.
    Failed,
    /// A state outside the known machine, kept verbatim for diagnostics.
    Unknown(String),
}

impl From<String> for TaskState {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "PENDING" => TaskState::Pending,
            "RUNNING" => TaskState::Running,
            "SUCCEEDED" => TaskState::Succeeded,
            "FAILED" => TaskState::Failed,
            _ => TaskState::Unknown(raw),
        }
    }
}

impl From<TaskState> for String {
    fn from(state: TaskState) -> Self {
        match state {
            TaskState::Pending => "PENDING".to_string(),
            TaskState::Running => "RUNNING".to_string(),
            TaskState::Succeeded => "SUCCEEDED".to_string(),
            TaskState::Failed => "FAILED".to_string(),
            TaskState::Unknown(raw) => raw,
        }
    }
}

impl std::fmt::Display for TaskState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskState::Pending => write!(f, "PENDING"),
            TaskState::Running => write!(f, "RUNNING"),
            TaskState::Succeeded => write!(f, "SUCCEEDED"),
            TaskState::Failed => write!(f, "FAILED"),
            TaskState::Unknown(raw) => write!(f, "{raw}"),
        }
    }
}

impl TaskState {
    /// True for Succeeded and Failed (the sticky states).
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskState::Succeeded | TaskState::Failed)
    }
}

/// Status of a management-plane task, as returned by `GET /api/tasks/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskStatus {
    /// Opaque task identifier.
    pub id: String,
    /// Human-readable label for the operation (e.g. "Enter maintenance mode").
    pub description: String,
    /// Name of the object the task operates on (host name/IP, cluster name).
    #[serde(default)]
    pub target: String,
    /// Current position in the task state machine.
    pub state: TaskState,
    /// Failure detail; present only when `state` is Failed.
    #[serde(default)]
    pub error: Option<String>,
}

/// Response body of every task-submitting endpoint: `{"task": "<id>"}`.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskSubmitted {
    pub task: String,
}
