//! Scheduler layer for the runner
//!
//! This layer drives the fetch/decide/wait loop used to follow a job until
//! it reaches a terminal state, and the cancellation signal that can stop it
//! early.

pub mod cancel;
pub mod poller;

pub use cancel::CancelToken;
pub use poller::{PollError, PollOptions, poll};
