//! Job domain types

use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Opaque identifier of a job submitted to the API
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for JobId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for JobId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Job status tag as reported by the work queue
///
/// The set of tags is open: anything the queue reports that is not listed
/// here is kept verbatim in [`JobStatus::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum JobStatus {
    Queued,
    Started,
    Deferred,
    Scheduled,
    Finished,
    Failed,
    Stopped,
    Canceled,
    Other(String),
}

impl JobStatus {
    pub fn as_str(&self) -> &str {
        match self {
            JobStatus::Queued => "queued",
            JobStatus::Started => "started",
            JobStatus::Deferred => "deferred",
            JobStatus::Scheduled => "scheduled",
            JobStatus::Finished => "finished",
            JobStatus::Failed => "failed",
            JobStatus::Stopped => "stopped",
            JobStatus::Canceled => "canceled",
            JobStatus::Other(tag) => tag.as_str(),
        }
    }

    /// Returns true once the job will no longer change state
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobStatus::Finished | JobStatus::Failed | JobStatus::Stopped | JobStatus::Canceled
        )
    }

    pub fn is_success(&self) -> bool {
        matches!(self, JobStatus::Finished)
    }
}

impl From<&str> for JobStatus {
    fn from(tag: &str) -> Self {
        match tag {
            "queued" => JobStatus::Queued,
            "started" => JobStatus::Started,
            "deferred" => JobStatus::Deferred,
            "scheduled" => JobStatus::Scheduled,
            "finished" => JobStatus::Finished,
            "failed" => JobStatus::Failed,
            "stopped" => JobStatus::Stopped,
            "canceled" => JobStatus::Canceled,
            other => JobStatus::Other(other.to_string()),
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for JobStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for JobStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(JobStatus::from(tag.as_str()))
    }
}

/// Outcome of inspecting one job status snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollDecision {
    /// The job is still in progress, fetch again later
    Continue,
    /// The job completed and its result can be extracted
    Finished,
    /// The job reached a terminal failure
    Failed(String),
}

impl PollDecision {
    pub fn should_continue(&self) -> bool {
        matches!(self, PollDecision::Continue)
    }
}

/// Snapshot of a job's state, as returned by `GET /job/status/{job_id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobStatusEnvelope {
    pub status: JobStatus,
    #[serde(default)]
    pub queue: Option<String>,
    #[serde(default)]
    pub task: Option<String>,
    #[serde(default)]
    pub result: Option<serde_json::Value>,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub finished_at: Option<DateTime<Utc>>,
}

impl JobStatusEnvelope {
    /// Creates an envelope with only a status and an optional result
    pub fn new(status: JobStatus, result: Option<serde_json::Value>) -> Self {
        Self {
            status,
            queue: None,
            task: None,
            result,
            submitted_at: None,
            started_at: None,
            finished_at: None,
        }
    }

    /// Default decision for job status polling
    ///
    /// `finished` stops successfully, `failed`, `stopped` and `canceled` stop
    /// with a failure, every other status keeps polling.
    pub fn decision(&self) -> PollDecision {
        match &self.status {
            JobStatus::Finished => PollDecision::Finished,
            JobStatus::Failed => PollDecision::Failed(format!("Job failed: {}", self.result_text())),
            JobStatus::Stopped | JobStatus::Canceled => {
                PollDecision::Failed(format!("Job {}", self.status))
            }
            _ => PollDecision::Continue,
        }
    }

    /// Decodes the result payload
    ///
    /// A missing result decodes as JSON `null`.
    pub fn result_as<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        let value = self.result.clone().unwrap_or(serde_json::Value::Null);
        serde_json::from_value(value)
    }

    fn result_text(&self) -> String {
        match &self.result {
            None | Some(serde_json::Value::Null) => "unknown error".to_string(),
            Some(serde_json::Value::String(text)) => text.clone(),
            Some(other) => other.to_string(),
        }
    }
}

/// Reads a job timestamp, with or without a UTC offset
///
/// The work queue may report naive datetimes; they are taken as UTC. A value
/// that is not a timestamp at all is dropped rather than failing the envelope.
fn deserialize_timestamp<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error> {
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_timestamp))
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .ok()
        .or_else(|| raw.parse::<NaiveDateTime>().ok().map(|ts| ts.and_utc()))
}
