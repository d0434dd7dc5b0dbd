//! Service layer
//!
//! Services combine the API client with the poller: they submit jobs, follow
//! them to completion and report progress to an injected observer.
//!
//! The API and the observer are both trait-based to enable testing and
//! dependency injection.

mod job_runner;
mod observer;

pub use job_runner::JobRunner;
pub use observer::{JobObserver, NoopObserver};
