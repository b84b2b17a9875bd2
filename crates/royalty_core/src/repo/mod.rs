//! Record storage for a catalog.
//!
//! # Responsibility
//! - Keep every created record in creation order.
//! - Stay free of relationship logic; joins live in the service layer.
//!
//! # Invariants
//! - Storage is append-only; records are never removed individually.

pub mod registry;
