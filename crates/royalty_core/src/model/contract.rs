//! Contract domain model and field validation.
//!
//! # Responsibility
//! - Define the join record linking one author to one book.
//! - Decode loosely typed field values into validated contract attributes.
//!
//! # Invariants
//! - `author` and `book` always reference records registered in the owning
//!   catalog; the catalog checks this before a contract is built or mutated.
//! - `date` is text and `royalties` is a whole number.
//! - Fields are private; every mutation goes through a validating catalog
//!   setter, so a failed assignment never leaves partial state behind.

use crate::model::author::{Author, AuthorId};
use crate::model::book::{Book, BookId};
use crate::repo::registry::Record;
use crate::service::catalog::Catalog;
use serde::Serialize;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a contract record.
pub type ContractId = Uuid;

/// Validated contract attributes, checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContractField {
    Author,
    Book,
    Date,
    Royalties,
}

impl ContractField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Author => "author",
            Self::Book => "book",
            Self::Date => "date",
            Self::Royalties => "royalties",
        }
    }
}

impl Display for ContractField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Invalid-argument error for contract construction and assignment.
///
/// Each variant names the failing field and carries a human-readable detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractValidationError {
    /// Author is not a registered author of this catalog.
    InvalidAuthor(String),
    /// Book is not a registered book of this catalog.
    InvalidBook(String),
    /// Date is not text.
    InvalidDate(String),
    /// Royalties is not a whole number.
    InvalidRoyalties(String),
}

impl ContractValidationError {
    /// Returns which field failed validation.
    pub fn field(&self) -> ContractField {
        match self {
            Self::InvalidAuthor(_) => ContractField::Author,
            Self::InvalidBook(_) => ContractField::Book,
            Self::InvalidDate(_) => ContractField::Date,
            Self::InvalidRoyalties(_) => ContractField::Royalties,
        }
    }
}

impl Display for ContractValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidAuthor(detail) => {
                write!(f, "author must reference a registered Author: {detail}")
            }
            Self::InvalidBook(detail) => {
                write!(f, "book must reference a registered Book: {detail}")
            }
            Self::InvalidDate(detail) => write!(f, "date must be a string: {detail}"),
            Self::InvalidRoyalties(detail) => write!(f, "royalties must be an integer: {detail}"),
        }
    }
}

impl Error for ContractValidationError {}

/// Join record between an author and a book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contract {
    id: ContractId,
    author: AuthorId,
    book: BookId,
    date: String,
    royalties: i64,
}

impl Contract {
    /// Builds a contract from attributes the catalog has already validated.
    pub(crate) fn new(author: AuthorId, book: BookId, date: String, royalties: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            author,
            book,
            date,
            royalties,
        }
    }

    /// Validates and registers a contract in `catalog`.
    ///
    /// # Errors
    /// - `InvalidAuthor` / `InvalidBook` when either record belongs to
    ///   another catalog; the author is checked first.
    pub fn create(
        catalog: &mut Catalog,
        author: &Author,
        book: &Book,
        date: impl Into<String>,
        royalties: i64,
    ) -> Result<Self, ContractValidationError> {
        catalog.create_contract(author.id(), book.id(), date, royalties)
    }

    pub fn id(&self) -> ContractId {
        self.id
    }

    pub fn author(&self) -> AuthorId {
        self.author
    }

    pub fn book(&self) -> BookId {
        self.book
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn royalties(&self) -> i64 {
        self.royalties
    }

    pub(crate) fn replace_author(&mut self, author: AuthorId) {
        self.author = author;
    }

    pub(crate) fn replace_book(&mut self, book: BookId) {
        self.book = book;
    }

    pub(crate) fn replace_date(&mut self, date: String) {
        self.date = date;
    }

    pub(crate) fn replace_royalties(&mut self, royalties: i64) {
        self.royalties = royalties;
    }

    /// Returns every contract in `catalog` signed on `date`.
    pub fn contracts_by_date(catalog: &Catalog, date: &str) -> Vec<Contract> {
        catalog.contracts_by_date(date)
    }
}

impl Record for Contract {
    type Id = ContractId;

    fn id(&self) -> ContractId {
        self.id
    }
}

/// Decodes an author reference from a loosely typed value.
///
/// Only the id shape is checked here; registration is the catalog's call.
pub fn decode_author_value(value: &Value) -> Result<AuthorId, ContractValidationError> {
    decode_id(value).map_err(ContractValidationError::InvalidAuthor)
}

/// Decodes a book reference from a loosely typed value.
pub fn decode_book_value(value: &Value) -> Result<BookId, ContractValidationError> {
    decode_id(value).map_err(ContractValidationError::InvalidBook)
}

/// Decodes a contract date. Any string is accepted verbatim.
pub fn decode_date_value(value: &Value) -> Result<String, ContractValidationError> {
    match value {
        Value::String(date) => Ok(date.clone()),
        other => Err(ContractValidationError::InvalidDate(format!(
            "got {}",
            describe_value(other)
        ))),
    }
}

/// Decodes royalties. Fractional numbers are rejected even when whole-valued
/// in magnitude (`100.0`), matching the integer-only contract.
pub fn decode_royalties_value(value: &Value) -> Result<i64, ContractValidationError> {
    match value {
        Value::Number(number) if number.is_f64() => Err(
            ContractValidationError::InvalidRoyalties(format!("got float `{number}`")),
        ),
        Value::Number(number) => number.as_i64().ok_or_else(|| {
            ContractValidationError::InvalidRoyalties(format!("`{number}` is out of range"))
        }),
        other => Err(ContractValidationError::InvalidRoyalties(format!(
            "got {}",
            describe_value(other)
        ))),
    }
}

fn decode_id(value: &Value) -> Result<Uuid, String> {
    match value {
        // Only the lowercase hyphenated form records serialize to is accepted.
        Value::String(text) => match Uuid::parse_str(text) {
            Ok(id) if id.hyphenated().to_string() == *text => Ok(id),
            _ => Err(format!("`{text}` is not a record id")),
        },
        other => Err(format!("got {}", describe_value(other))),
    }
}

fn describe_value(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(number) if number.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
