//! Bonsai Core
//!
//! Core types shared by the Bonsai API client, the job runner and the CLI.
//!
//! This crate contains:
//! - Domain types: jobs, job status envelopes and clustering results
//! - DTOs: request and response bodies exchanged with the REST API

pub mod domain;
pub mod dto;
