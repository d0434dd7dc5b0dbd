//! Data Transfer Objects for the Bonsai REST API
//!
//! Request bodies sent to the job submission endpoints and the responses
//! they return.

pub mod cluster;
pub mod job;
