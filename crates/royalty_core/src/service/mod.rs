//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate registry access into relationship-level APIs.
//! - Keep callers decoupled from how records are stored.

pub mod catalog;
