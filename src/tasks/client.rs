use std::time::Duration;

use reqwest::blocking::{Client, Response};
use serde::{Deserialize, Serialize};

use super::status::StatusReport;
use crate::error::PollError;

/// Access to the task status API
pub trait StatusApi {
    /// Fetch the current status of a task
    fn status(&self, task_id: &str) -> Result<StatusReport, PollError>;

    /// Ask the server to stop a task
    fn stop(&self, task_id: &str) -> Result<(), PollError>;
}

#[derive(Debug, Serialize)]
struct ApiRequest<'a> {
    action: &'a str,
    task_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct StopReply {
    status: String,
}

/// Blocking HTTP client for the task API.
///
/// Every call is a JSON `POST` to the same URL with an `action` field.
pub struct HttpStatusApi {
    client: Client,
    api_url: String,
    csrf_token: Option<String>,
}

impl HttpStatusApi {
    pub fn new(
        api_url: impl Into<String>,
        timeout: Duration,
        csrf_token: Option<String>,
    ) -> Result<Self, PollError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("doc-browser/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            api_url: api_url.into(),
            csrf_token: csrf_token.filter(|token| !token.is_empty()),
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn post(&self, action: &str, task_id: &str) -> Result<Response, PollError> {
        let mut request = self
            .client
            .post(&self.api_url)
            .json(&ApiRequest { action, task_id });

        if let Some(token) = &self.csrf_token {
            request = request.header("X-CSRFToken", token);
        }

        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(action, status = status.as_u16(), "Task API request failed");
            return Err(PollError::Status(status.as_u16()));
        }
        Ok(response)
    }
}

impl StatusApi for HttpStatusApi {
    fn status(&self, task_id: &str) -> Result<StatusReport, PollError> {
        let report: StatusReport = self.post("status", task_id)?.json()?;
        tracing::trace!(?report, "Received task status");
        Ok(report)
    }

    fn stop(&self, task_id: &str) -> Result<(), PollError> {
        let reply: StopReply = self.post("stop", task_id)?.json()?;
        if reply.status != "stopping" {
            return Err(PollError::UnexpectedStopReply(reply.status));
        }
        Ok(())
    }
}
