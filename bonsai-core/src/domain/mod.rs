//! Core domain types
//!
//! This module contains the domain structures returned by the Bonsai API.
//! They are shared between the HTTP client (which decodes them) and the
//! job runner (which decides what to do with them).

pub mod cluster;
pub mod job;
