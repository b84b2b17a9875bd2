//! Core bookkeeping for authors, books and the royalty contracts between them.
//! This crate is the single source of truth for relationship invariants.

pub mod config;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{default_log_level, LoggingConfig};
pub use logging::{init_logging, logging_status, LogTarget};
pub use model::author::{Author, AuthorId};
pub use model::book::{Book, BookId};
pub use model::contract::{Contract, ContractField, ContractId, ContractValidationError};
pub use repo::registry::{Record, Registry};
pub use service::catalog::{Catalog, CatalogError, CatalogResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
