//! Author domain model.
//!
//! # Responsibility
//! - Define the writer record that roots zero or more contracts.
//! - Expose author-side relationship queries over a catalog.
//!
//! # Invariants
//! - `id` is generated once and identifies the author for its lifetime.
//! - `name` is stored verbatim and never mutated after construction.

use crate::model::book::Book;
use crate::model::contract::{Contract, ContractValidationError};
use crate::repo::registry::Record;
use crate::service::catalog::Catalog;
use serde::Serialize;
use uuid::Uuid;

/// Stable identifier for an author record.
pub type AuthorId = Uuid;

/// Writer record.
///
/// Two authors sharing a name are still distinct: identity is `id` only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Author {
    id: AuthorId,
    name: String,
}

impl Author {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }

    /// Creates an author and registers it in `catalog`.
    pub fn create(catalog: &mut Catalog, name: impl Into<String>) -> Self {
        catalog.create_author(name)
    }

    pub fn id(&self) -> AuthorId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns this author's contracts in registry order.
    pub fn contracts(&self, catalog: &Catalog) -> Vec<Contract> {
        catalog.author_contracts(self.id)
    }

    /// Returns the book of each contract, aligned with `contracts()`.
    ///
    /// A book appears once per contract, so duplicates are expected when the
    /// same book was signed more than once.
    pub fn books(&self, catalog: &Catalog) -> Vec<Book> {
        catalog.author_books(self.id)
    }

    /// Signs a new contract between this author and `book`.
    ///
    /// # Errors
    /// - Propagates the first failing field check from contract creation.
    pub fn sign_contract(
        &self,
        catalog: &mut Catalog,
        book: &Book,
        date: impl Into<String>,
        royalties: i64,
    ) -> Result<Contract, ContractValidationError> {
        catalog.create_contract(self.id, book.id(), date, royalties)
    }

    /// Sum of royalties across this author's contracts; `0` when unsigned.
    pub fn total_royalties(&self, catalog: &Catalog) -> i128 {
        catalog.total_royalties(self.id)
    }
}

impl Record for Author {
    type Id = AuthorId;

    fn id(&self) -> AuthorId {
        self.id
    }
}
