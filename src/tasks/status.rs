use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::PollError;

/// Lifecycle state reported by the task API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskState {
    Created,
    Running,
    Finished,
    #[serde(other)]
    Unknown,
}

impl TaskState {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskState::Created => "created",
            TaskState::Running => "running",
            TaskState::Finished => "finished",
            TaskState::Unknown => "unknown",
        }
    }
}

/// Result of a task; only meaningful once it finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskOutcome {
    #[default]
    #[serde(rename = "none")]
    Pending,
    Success,
    Failure,
    Stopped,
    #[serde(other)]
    Unknown,
}

impl TaskOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskOutcome::Pending => "none",
            TaskOutcome::Success => "success",
            TaskOutcome::Failure => "failure",
            TaskOutcome::Stopped => "stopped",
            TaskOutcome::Unknown => "unknown",
        }
    }
}

/// One reply of the status endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StatusReport {
    pub status: TaskState,
    #[serde(default)]
    pub result: TaskOutcome,
    /// Percent, 0-100. The API sends either a number or a numeric string.
    #[serde(default, deserialize_with = "deserialize_progress")]
    pub progress: f64,
    #[serde(default)]
    pub status_values: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub text: String,
    #[serde(default, deserialize_with = "deserialize_next_url")]
    pub next_url: Option<String>,
    #[serde(default)]
    pub stop_requested: bool,
}

impl StatusReport {
    /// `status` or `status|result`, e.g. `finished|success`.
    pub fn combined_status(&self) -> String {
        if self.result == TaskOutcome::Pending {
            self.status.as_str().to_string()
        } else {
            format!("{}|{}", self.status.as_str(), self.result.as_str())
        }
    }

    pub fn is_finished(&self) -> bool {
        self.status == TaskState::Finished
    }
}

fn deserialize_progress<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    let value = match Raw::deserialize(deserializer)? {
        Raw::Number(n) => n,
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom)?,
    };
    if !value.is_finite() {
        return Err(serde::de::Error::custom(format!(
            "progress must be a finite number, got {}",
            value
        )));
    }
    Ok(value.clamp(0.0, 100.0))
}

fn deserialize_next_url<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let url: Option<String> = Option::deserialize(deserializer)?;
    // The server renders a missing URL as an empty string or "None".
    Ok(url.filter(|u| !u.is_empty() && u != "None"))
}

/// How a task is presented to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayStatus {
    Waiting,
    Running,
    Success,
    Stopped,
    Failed,
    Stopping,
    ApiError,
}

/// Visual weight of a status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Normal,
    Danger,
}

impl DisplayStatus {
    /// Map a report to its display status.
    ///
    /// A stop request on an unfinished task always shows as `Stopping`.
    pub fn from_report(report: &StatusReport) -> Result<Self, PollError> {
        if report.status != TaskState::Finished && report.stop_requested {
            return Ok(DisplayStatus::Stopping);
        }

        match (report.status, report.result) {
            (TaskState::Created, TaskOutcome::Pending) => Ok(DisplayStatus::Waiting),
            (TaskState::Running, TaskOutcome::Pending) => Ok(DisplayStatus::Running),
            (TaskState::Finished, TaskOutcome::Success) => Ok(DisplayStatus::Success),
            (TaskState::Finished, TaskOutcome::Stopped) => Ok(DisplayStatus::Stopped),
            (TaskState::Finished, TaskOutcome::Failure) => Ok(DisplayStatus::Failed),
            _ => Err(PollError::UnexpectedStatus(report.combined_status())),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DisplayStatus::Waiting => "Waiting for Start",
            DisplayStatus::Running => "Running",
            DisplayStatus::Success => "Successfully Finished",
            DisplayStatus::Stopped => "Stopped",
            DisplayStatus::Failed => "Failed",
            DisplayStatus::Stopping => "Waiting for Stop",
            DisplayStatus::ApiError => "Unexpected Problem",
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            DisplayStatus::Waiting | DisplayStatus::Running | DisplayStatus::Success => {
                Severity::Normal
            }
            DisplayStatus::Stopped
            | DisplayStatus::Failed
            | DisplayStatus::Stopping
            | DisplayStatus::ApiError => Severity::Danger,
        }
    }
}

/// What the poller hands to its caller after every fetch
#[derive(Debug, Clone, PartialEq)]
pub struct TaskUpdate {
    pub status: DisplayStatus,
    pub progress: f64,
    pub text: String,
    pub status_values: BTreeMap<String, serde_json::Value>,
}

impl TaskUpdate {
    pub fn from_report(status: DisplayStatus, report: &StatusReport) -> Self {
        Self {
            status,
            progress: report.progress,
            text: report.text.clone(),
            status_values: report.status_values.clone(),
        }
    }

    pub fn api_error(text: &str) -> Self {
        Self {
            status: DisplayStatus::ApiError,
            progress: 100.0,
            text: text.to_string(),
            status_values: BTreeMap::new(),
        }
    }
}
