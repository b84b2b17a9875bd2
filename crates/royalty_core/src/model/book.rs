//! Book domain model.

use crate::model::author::Author;
use crate::model::contract::Contract;
use crate::repo::registry::Record;
use crate::service::catalog::Catalog;
use serde::Serialize;
use uuid::Uuid;

/// Stable identifier for a book record.
pub type BookId = Uuid;

/// Published work record. `title` is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Book {
    id: BookId,
    title: String,
}

impl Book {
    pub(crate) fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
        }
    }

    /// Creates a book and registers it in `catalog`.
    pub fn create(catalog: &mut Catalog, title: impl Into<String>) -> Self {
        catalog.create_book(title)
    }

    pub fn id(&self) -> BookId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns every contract for this book in registry order.
    pub fn contracts(&self, catalog: &Catalog) -> Vec<Contract> {
        catalog.book_contracts(self.id)
    }

    /// Returns the author of each contract, positionally aligned with
    /// `contracts()`.
    pub fn authors(&self, catalog: &Catalog) -> Vec<Author> {
        catalog.book_authors(self.id)
    }
}

impl Record for Book {
    type Id = BookId;

    fn id(&self) -> BookId {
        self.id
    }
}
