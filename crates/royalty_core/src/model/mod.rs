//! Domain model for authors, books and the contracts linking them.
//!
//! # Responsibility
//! - Define the three record kinds tracked by a `Catalog`.
//! - Own field-level validation for contract attributes.
//!
//! # Invariants
//! - Every record is identified by a stable, never-reused UUID.
//! - A contract is the only link between an author and a book.
//! - Records are never deleted while their catalog is alive.

pub mod author;
pub mod book;
pub mod contract;
