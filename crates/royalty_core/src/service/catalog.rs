//! Catalog use-case service.
//!
//! # Responsibility
//! - Own the author, book and contract registries for one bookkeeping scope.
//! - Validate contract fields before any registry write.
//! - Derive relationship queries by scanning the contract registry.
//!
//! # Invariants
//! - Contract validation order is author, book, date, royalties; the first
//!   failing field is the one reported.
//! - A rejected create or assignment leaves every registry unchanged.
//! - Query results are owned snapshots in registry insertion order.

use crate::model::author::{Author, AuthorId};
use crate::model::book::{Book, BookId};
use crate::model::contract::{
    decode_author_value, decode_book_value, decode_date_value, decode_royalties_value, Contract,
    ContractField, ContractId, ContractValidationError,
};
use crate::repo::registry::Registry;
use log::{debug, warn};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors from catalog operations that address an existing contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Field value was rejected; the contract keeps its previous value.
    Validation(ContractValidationError),
    /// No contract with this id exists in the catalog.
    ContractNotFound(ContractId),
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::ContractNotFound(id) => write!(f, "contract not found: {id}"),
        }
    }
}

impl Error for CatalogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::ContractNotFound(_) => None,
        }
    }
}

impl From<ContractValidationError> for CatalogError {
    fn from(value: ContractValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Context object owning every registry of one bookkeeping scope.
///
/// Dropping or clearing the catalog is the only way records go away.
#[derive(Debug, Default)]
pub struct Catalog {
    authors: Registry<Author>,
    books: Registry<Book>,
    contracts: Registry<Contract>,
}

impl Catalog {
    /// Creates a catalog with empty registries.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empties all registries.
    pub fn clear(&mut self) {
        debug!(
            "event=catalog_clear module=catalog status=ok authors={} books={} contracts={}",
            self.authors.len(),
            self.books.len(),
            self.contracts.len()
        );
        self.authors.clear();
        self.books.clear();
        self.contracts.clear();
    }

    /// Registers a new author. `name` is stored without validation.
    pub fn create_author(&mut self, name: impl Into<String>) -> Author {
        let author = self.authors.insert(Author::new(name)).clone();
        debug!(
            "event=author_create module=catalog status=ok author_id={}",
            author.id()
        );
        author
    }

    /// Registers a new book. `title` is stored without validation.
    pub fn create_book(&mut self, title: impl Into<String>) -> Book {
        let book = self.books.insert(Book::new(title)).clone();
        debug!(
            "event=book_create module=catalog status=ok book_id={}",
            book.id()
        );
        book
    }

    /// Validates and registers a contract.
    ///
    /// # Errors
    /// - `InvalidAuthor` when `author` is not registered here.
    /// - `InvalidBook` when `book` is not registered here.
    pub fn create_contract(
        &mut self,
        author: AuthorId,
        book: BookId,
        date: impl Into<String>,
        royalties: i64,
    ) -> Result<Contract, ContractValidationError> {
        let checked = self
            .require_author(author)
            .and_then(|_| self.require_book(book));
        if let Err(err) = checked {
            log_rejected_create(&err);
            return Err(err);
        }

        Ok(self.register_contract(author, book, date.into(), royalties))
    }

    /// Validates and registers a contract from loosely typed field values.
    ///
    /// `author` and `book` must be id strings of registered records, `date`
    /// a string and `royalties` an integer. Fields are checked in that order.
    pub fn create_contract_from_values(
        &mut self,
        author: &Value,
        book: &Value,
        date: &Value,
        royalties: &Value,
    ) -> Result<Contract, ContractValidationError> {
        match self.decode_contract_values(author, book, date, royalties) {
            Ok((author, book, date, royalties)) => {
                Ok(self.register_contract(author, book, date, royalties))
            }
            Err(err) => {
                log_rejected_create(&err);
                Err(err)
            }
        }
    }

    /// Reassigns a contract's author.
    pub fn set_contract_author(&mut self, id: ContractId, author: AuthorId) -> CatalogResult<()> {
        self.require_contract(id)?;
        self.require_author(author)
            .inspect_err(|err| log_rejected_assign(id, err))?;
        self.contract_mut(id)?.replace_author(author);
        Ok(())
    }

    /// Reassigns a contract's book.
    pub fn set_contract_book(&mut self, id: ContractId, book: BookId) -> CatalogResult<()> {
        self.require_contract(id)?;
        self.require_book(book).inspect_err(|err| log_rejected_assign(id, err))?;
        self.contract_mut(id)?.replace_book(book);
        Ok(())
    }

    pub fn set_contract_date(
        &mut self,
        id: ContractId,
        date: impl Into<String>,
    ) -> CatalogResult<()> {
        self.contract_mut(id)?.replace_date(date.into());
        Ok(())
    }

    pub fn set_contract_royalties(&mut self, id: ContractId, royalties: i64) -> CatalogResult<()> {
        self.contract_mut(id)?.replace_royalties(royalties);
        Ok(())
    }

    /// Assigns one contract field from a loosely typed value.
    ///
    /// Runs the same check as creation for `field`; on failure the contract
    /// keeps its previous value.
    pub fn set_contract_field(
        &mut self,
        id: ContractId,
        field: ContractField,
        value: &Value,
    ) -> CatalogResult<()> {
        self.require_contract(id)?;
        let decoded = match field {
            ContractField::Author => decode_author_value(value)
                .and_then(|author| self.require_author(author).map(|_| author))
                .map(FieldUpdate::Author),
            ContractField::Book => decode_book_value(value)
                .and_then(|book| self.require_book(book).map(|_| book))
                .map(FieldUpdate::Book),
            ContractField::Date => decode_date_value(value).map(FieldUpdate::Date),
            ContractField::Royalties => decode_royalties_value(value).map(FieldUpdate::Royalties),
        };
        let update = decoded.inspect_err(|err| log_rejected_assign(id, err))?;

        let contract = self.contract_mut(id)?;
        match update {
            FieldUpdate::Author(author) => contract.replace_author(author),
            FieldUpdate::Book(book) => contract.replace_book(book),
            FieldUpdate::Date(date) => contract.replace_date(date),
            FieldUpdate::Royalties(royalties) => contract.replace_royalties(royalties),
        }
        Ok(())
    }

    /// Every author in creation order.
    pub fn authors(&self) -> &[Author] {
        self.authors.as_slice()
    }

    /// Every book in creation order.
    pub fn books(&self) -> &[Book] {
        self.books.as_slice()
    }

    /// Every contract in creation order.
    pub fn contracts(&self) -> &[Contract] {
        self.contracts.as_slice()
    }

    pub fn author(&self, id: AuthorId) -> Option<&Author> {
        self.authors.get(id)
    }

    pub fn book(&self, id: BookId) -> Option<&Book> {
        self.books.get(id)
    }

    pub fn contract(&self, id: ContractId) -> Option<&Contract> {
        self.contracts.get(id)
    }

    /// Contracts whose author is `author`, in registry order.
    pub fn author_contracts(&self, author: AuthorId) -> Vec<Contract> {
        self.contracts.filtered(|contract| contract.author() == author)
    }

    /// Book of each contract of `author`, aligned with `author_contracts`.
    pub fn author_books(&self, author: AuthorId) -> Vec<Book> {
        self.contracts
            .iter()
            .filter(|contract| contract.author() == author)
            .filter_map(|contract| {
                let book = self.books.get(contract.book());
                debug_assert!(
                    book.is_some(),
                    "contract {} references unregistered book",
                    contract.id()
                );
                book.cloned()
            })
            .collect()
    }

    /// Sum of royalties over `author_contracts`; `0` when there are none.
    ///
    /// Accumulates in `i128` so any number of `i64` amounts sums exactly.
    pub fn total_royalties(&self, author: AuthorId) -> i128 {
        self.contracts
            .iter()
            .filter(|contract| contract.author() == author)
            .map(|contract| i128::from(contract.royalties()))
            .sum()
    }

    /// Contracts whose book is `book`, in registry order.
    pub fn book_contracts(&self, book: BookId) -> Vec<Contract> {
        self.contracts.filtered(|contract| contract.book() == book)
    }

    /// Author of each contract of `book`, aligned with `book_contracts`.
    pub fn book_authors(&self, book: BookId) -> Vec<Author> {
        self.contracts
            .iter()
            .filter(|contract| contract.book() == book)
            .filter_map(|contract| {
                let author = self.authors.get(contract.author());
                debug_assert!(
                    author.is_some(),
                    "contract {} references unregistered author",
                    contract.id()
                );
                author.cloned()
            })
            .collect()
    }

    /// Contracts dated exactly `date`, across all authors and books.
    pub fn contracts_by_date(&self, date: &str) -> Vec<Contract> {
        self.contracts.filtered(|contract| contract.date() == date)
    }

    fn decode_contract_values(
        &self,
        author: &Value,
        book: &Value,
        date: &Value,
        royalties: &Value,
    ) -> Result<(AuthorId, BookId, String, i64), ContractValidationError> {
        let author = decode_author_value(author)?;
        self.require_author(author)?;
        let book = decode_book_value(book)?;
        self.require_book(book)?;
        let date = decode_date_value(date)?;
        let royalties = decode_royalties_value(royalties)?;
        Ok((author, book, date, royalties))
    }

    fn register_contract(
        &mut self,
        author: AuthorId,
        book: BookId,
        date: String,
        royalties: i64,
    ) -> Contract {
        let contract = self
            .contracts
            .insert(Contract::new(author, book, date, royalties))
            .clone();
        debug!(
            "event=contract_create module=catalog status=ok contract_id={} author_id={} book_id={}",
            contract.id(),
            author,
            book
        );
        contract
    }

    fn require_author(&self, author: AuthorId) -> Result<(), ContractValidationError> {
        if self.authors.contains(author) {
            return Ok(());
        }
        Err(ContractValidationError::InvalidAuthor(format!(
            "unknown author id {author}"
        )))
    }

    fn require_book(&self, book: BookId) -> Result<(), ContractValidationError> {
        if self.books.contains(book) {
            return Ok(());
        }
        Err(ContractValidationError::InvalidBook(format!(
            "unknown book id {book}"
        )))
    }

    fn require_contract(&self, id: ContractId) -> CatalogResult<()> {
        if self.contracts.contains(id) {
            return Ok(());
        }
        Err(CatalogError::ContractNotFound(id))
    }

    fn contract_mut(&mut self, id: ContractId) -> CatalogResult<&mut Contract> {
        self.contracts
            .get_mut(id)
            .ok_or(CatalogError::ContractNotFound(id))
    }
}

enum FieldUpdate {
    Author(AuthorId),
    Book(BookId),
    Date(String),
    Royalties(i64),
}

fn log_rejected_create(err: &ContractValidationError) {
    warn!(
        "event=contract_create module=catalog status=error field={}",
        err.field()
    );
}

fn log_rejected_assign(id: ContractId, err: &ContractValidationError) {
    warn!(
        "event=contract_assign module=catalog status=error contract_id={} field={}",
        id,
        err.field()
    );
}
