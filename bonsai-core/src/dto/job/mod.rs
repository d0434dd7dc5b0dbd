//! Job DTOs

use serde::{Deserialize, Serialize};

use crate::domain::job::JobId;

/// Response of any endpoint that enqueues a job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmittedJob {
    pub id: JobId,
    pub task: String,
}
