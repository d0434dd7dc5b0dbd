//! Bonsai Runner
//!
//! Follows long-running Bonsai jobs (clustering, similarity search) until
//! they finish.
//!
//! Architecture:
//! - Configuration: API location and polling limits
//! - Scheduler: the generic fetch/decide/wait poll loop and its cancel token
//! - Services: job submission plus tracking, reporting to an injected observer

pub mod config;
pub mod error;
pub mod scheduler;
pub mod service;

pub use config::RunnerConfig;
pub use error::{Result, RunnerError};
pub use scheduler::{CancelToken, PollError, PollOptions, poll};
pub use service::{JobObserver, JobRunner, NoopObserver};
