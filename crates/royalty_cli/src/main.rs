//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `royalty_core` linkage with a deterministic sample ledger.
//! - Exit non-zero when the sample contract is rejected.

use royalty_core::{Author, Book, Catalog, Contract, LoggingConfig};
use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(err) = royalty_core::init_logging(&LoggingConfig::default().with_level("warn")) {
        eprintln!("logging disabled: {err}");
    }

    println!("royalty_core version={}", royalty_core::core_version());

    let mut catalog = Catalog::new();
    let author = Author::create(&mut catalog, "Octavia Butler");
    let book = Book::create(&mut catalog, "Kindred");
    let contract = match author.sign_contract(&mut catalog, &book, "2024-01-01", 5000) {
        Ok(contract) => contract,
        Err(err) => {
            log::error!("event=smoke_sign module=cli status=error field={}", err.field());
            eprintln!("sample contract rejected: {err}");
            return ExitCode::FAILURE;
        }
    };

    println!("contract id={} date={}", contract.id(), contract.date());
    println!(
        "author={} books={} total_royalties={}",
        author.name(),
        author.books(&catalog).len(),
        author.total_royalties(&catalog)
    );
    println!(
        "book={} authors={} contracts_on_date={}",
        book.title(),
        book.authors(&catalog).len(),
        Contract::contracts_by_date(&catalog, contract.date()).len()
    );
    ExitCode::SUCCESS
}
