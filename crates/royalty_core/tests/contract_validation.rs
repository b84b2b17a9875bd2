use royalty_core::{
    Author, Book, Catalog, CatalogError, Contract, ContractField, ContractValidationError,
};
use serde_json::{json, Value};
use uuid::Uuid;

fn setup() -> (Catalog, Author, Book) {
    let mut catalog = Catalog::new();
    let author = Author::create(&mut catalog, "Octavia Butler");
    let book = Book::create(&mut catalog, "Kindred");
    (catalog, author, book)
}

fn id_value(id: Uuid) -> Value {
    Value::String(id.to_string())
}

#[test]
fn valid_contract_appears_once_by_date() {
    let (mut catalog, author, book) = setup();

    let contract = Contract::create(&mut catalog, &author, &book, "2024-06-01", 42).unwrap();

    let matches = Contract::contracts_by_date(&catalog, "2024-06-01");
    assert_eq!(matches, vec![contract]);
    assert!(Contract::contracts_by_date(&catalog, "2024-06-02").is_empty());
}

#[test]
fn author_from_another_catalog_is_rejected() {
    let (mut catalog, _, book) = setup();
    let mut other = Catalog::new();
    let stranger = Author::create(&mut other, "Stranger");

    let err = Contract::create(&mut catalog, &stranger, &book, "2024-01-01", 100).unwrap_err();

    assert_eq!(err.field(), ContractField::Author);
    assert!(catalog.contracts().is_empty());
}

#[test]
fn book_from_another_catalog_is_rejected() {
    let (mut catalog, author, _) = setup();
    let mut other = Catalog::new();
    let stray = Book::create(&mut other, "Stray");

    let err = author
        .sign_contract(&mut catalog, &stray, "2024-01-01", 100)
        .unwrap_err();

    assert!(matches!(err, ContractValidationError::InvalidBook(_)));
    assert!(catalog.contracts().is_empty());
}

#[test]
fn non_author_value_is_rejected_and_nothing_registered() {
    let (mut catalog, _, book) = setup();

    let err = catalog
        .create_contract_from_values(
            &json!("not an author"),
            &id_value(book.id()),
            &json!("2024-01-01"),
            &json!(100),
        )
        .unwrap_err();

    assert_eq!(err.field(), ContractField::Author);
    assert!(err.to_string().starts_with("author must reference"));
    assert!(Contract::contracts_by_date(&catalog, "2024-01-01").is_empty());
}

#[test]
fn fractional_royalties_are_rejected() {
    let (mut catalog, author, book) = setup();

    let err = catalog
        .create_contract_from_values(
            &id_value(author.id()),
            &id_value(book.id()),
            &json!("2024-01-01"),
            &json!(100.5),
        )
        .unwrap_err();

    assert_eq!(err.field(), ContractField::Royalties);
    assert!(catalog.contracts().is_empty());
}

#[test]
fn textual_royalties_and_non_text_date_are_rejected() {
    let (mut catalog, author, book) = setup();

    let royalties_err = catalog
        .create_contract_from_values(
            &id_value(author.id()),
            &id_value(book.id()),
            &json!("2024-01-01"),
            &json!("100"),
        )
        .unwrap_err();
    assert_eq!(royalties_err.field(), ContractField::Royalties);

    let date_err = catalog
        .create_contract_from_values(
            &id_value(author.id()),
            &id_value(book.id()),
            &json!(20240101),
            &json!(100),
        )
        .unwrap_err();
    assert_eq!(date_err.field(), ContractField::Date);
    assert!(catalog.contracts().is_empty());
}

#[test]
fn first_failing_field_wins() {
    let (mut catalog, _, _) = setup();

    let err = catalog
        .create_contract_from_values(&json!(1), &json!(null), &json!(2), &json!(3.5))
        .unwrap_err();
    assert_eq!(err.field(), ContractField::Author);

    let (mut catalog, author, _) = setup();
    let err = catalog
        .create_contract_from_values(&id_value(author.id()), &json!(null), &json!(2), &json!(3.5))
        .unwrap_err();
    assert_eq!(err.field(), ContractField::Book);

    let (mut catalog, author, book) = setup();
    let err = catalog
        .create_contract_from_values(
            &id_value(author.id()),
            &id_value(book.id()),
            &json!(2),
            &json!(3.5),
        )
        .unwrap_err();
    assert_eq!(err.field(), ContractField::Date);
}

#[test]
fn dynamic_create_accepts_valid_values() {
    let (mut catalog, author, book) = setup();

    let contract = catalog
        .create_contract_from_values(
            &id_value(author.id()),
            &id_value(book.id()),
            &json!("2024-01-01"),
            &json!(5000),
        )
        .unwrap();

    assert_eq!(contract.date(), "2024-01-01");
    assert_eq!(contract.royalties(), 5000);
    assert_eq!(author.total_royalties(&catalog), 5000);
}

#[test]
fn invalid_assignment_keeps_previous_value() {
    let (mut catalog, author, book) = setup();
    let contract = author
        .sign_contract(&mut catalog, &book, "2024-01-01", 5000)
        .unwrap();

    let err = catalog
        .set_contract_field(contract.id(), ContractField::Royalties, &json!(12.75))
        .unwrap_err();
    assert!(matches!(
        err,
        CatalogError::Validation(ContractValidationError::InvalidRoyalties(_))
    ));

    let err = catalog
        .set_contract_author(contract.id(), Uuid::new_v4())
        .unwrap_err();
    assert!(matches!(
        err,
        CatalogError::Validation(ContractValidationError::InvalidAuthor(_))
    ));

    assert_eq!(catalog.contract(contract.id()), Some(&contract));
}

#[test]
fn valid_assignment_moves_contract_between_queries() {
    let (mut catalog, author, book) = setup();
    let other_author = Author::create(&mut catalog, "Tananarive Due");
    let other_book = Book::create(&mut catalog, "The Good House");
    let contract = author
        .sign_contract(&mut catalog, &book, "2024-01-01", 5000)
        .unwrap();

    catalog
        .set_contract_author(contract.id(), other_author.id())
        .unwrap();
    catalog
        .set_contract_field(contract.id(), ContractField::Book, &id_value(other_book.id()))
        .unwrap();
    catalog.set_contract_date(contract.id(), "2025-01-01").unwrap();
    catalog.set_contract_royalties(contract.id(), 6000).unwrap();

    assert_eq!(author.total_royalties(&catalog), 0);
    assert_eq!(other_author.total_royalties(&catalog), 6000);
    assert_eq!(other_book.authors(&catalog), vec![other_author]);
    assert!(book.contracts(&catalog).is_empty());
    assert!(Contract::contracts_by_date(&catalog, "2024-01-01").is_empty());
    assert_eq!(Contract::contracts_by_date(&catalog, "2025-01-01").len(), 1);
}

#[test]
fn assignment_on_unknown_contract_is_not_found() {
    let (mut catalog, _, _) = setup();
    let missing = Uuid::new_v4();

    let err = catalog.set_contract_date(missing, "2024-01-01").unwrap_err();
    assert_eq!(err, CatalogError::ContractNotFound(missing));

    let err = catalog
        .set_contract_field(missing, ContractField::Date, &json!(5))
        .unwrap_err();
    assert_eq!(err, CatalogError::ContractNotFound(missing));
}

#[test]
fn non_canonical_author_and_book_ids_are_rejected() {
    let (mut catalog, author, book) = setup();

    let padded = catalog
        .create_contract_from_values(
            &json!(format!("  {}\n", author.id())),
            &id_value(book.id()),
            &json!("2024-01-01"),
            &json!(100),
        )
        .unwrap_err();
    assert_eq!(padded.field(), ContractField::Author);

    let simple = catalog
        .create_contract_from_values(
            &id_value(author.id()),
            &json!(book.id().simple().to_string()),
            &json!("2024-01-01"),
            &json!(100),
        )
        .unwrap_err();
    assert_eq!(simple.field(), ContractField::Book);

    assert!(catalog.contracts().is_empty());
}

#[test]
fn rejected_book_assignment_keeps_previous_book() {
    let (mut catalog, author, book) = setup();
    let contract = author
        .sign_contract(&mut catalog, &book, "2024-01-01", 5000)
        .unwrap();

    let err = catalog
        .set_contract_book(contract.id(), Uuid::new_v4())
        .unwrap_err();
    assert!(matches!(
        err,
        CatalogError::Validation(ContractValidationError::InvalidBook(_))
    ));

    let err = catalog
        .set_contract_field(
            contract.id(),
            ContractField::Book,
            &json!(book.id().simple().to_string()),
        )
        .unwrap_err();
    assert!(matches!(
        err,
        CatalogError::Validation(ContractValidationError::InvalidBook(_))
    ));

    assert_eq!(catalog.contract(contract.id()), Some(&contract));
    assert_eq!(book.authors(&catalog), vec![author]);
}

#[test]
fn rejected_date_assignment_keeps_previous_date() {
    let (mut catalog, author, book) = setup();
    let contract = author
        .sign_contract(&mut catalog, &book, "2024-01-01", 5000)
        .unwrap();

    let err = catalog
        .set_contract_field(contract.id(), ContractField::Date, &json!(5))
        .unwrap_err();
    assert!(matches!(
        err,
        CatalogError::Validation(ContractValidationError::InvalidDate(_))
    ));

    assert_eq!(catalog.contract(contract.id()), Some(&contract));
    assert_eq!(
        Contract::contracts_by_date(&catalog, "2024-01-01"),
        vec![contract]
    );
}

#[test]
fn rejected_author_value_assignment_keeps_previous_author() {
    let (mut catalog, author, book) = setup();
    let contract = author
        .sign_contract(&mut catalog, &book, "2024-01-01", 5000)
        .unwrap();

    let err = catalog
        .set_contract_field(contract.id(), ContractField::Author, &json!("not an author"))
        .unwrap_err();
    assert!(matches!(
        err,
        CatalogError::Validation(ContractValidationError::InvalidAuthor(_))
    ));

    assert_eq!(catalog.contract(contract.id()), Some(&contract));
    assert_eq!(author.total_royalties(&catalog), 5000);
}

#[test]
fn reference_assignment_on_unknown_contract_is_not_found() {
    let (mut catalog, author, book) = setup();
    let contract = author
        .sign_contract(&mut catalog, &book, "2024-01-01", 5000)
        .unwrap();
    let missing = Uuid::new_v4();

    let err = catalog.set_contract_author(missing, author.id()).unwrap_err();
    assert_eq!(err, CatalogError::ContractNotFound(missing));

    let err = catalog.set_contract_book(missing, book.id()).unwrap_err();
    assert_eq!(err, CatalogError::ContractNotFound(missing));

    let err = catalog.set_contract_royalties(missing, 1).unwrap_err();
    assert_eq!(err, CatalogError::ContractNotFound(missing));

    assert_eq!(catalog.contracts(), &[contract][..]);
}

#[test]
fn reassigned_references_keep_query_alignment() {
    let (mut catalog, author, book) = setup();
    let other_book = Book::create(&mut catalog, "Parable of the Sower");
    let first = author
        .sign_contract(&mut catalog, &book, "2024-01-01", 1)
        .unwrap();
    author
        .sign_contract(&mut catalog, &book, "2024-01-02", 2)
        .unwrap();

    catalog
        .set_contract_book(first.id(), other_book.id())
        .unwrap();

    let contracts = author.contracts(&catalog);
    let books = author.books(&catalog);
    assert_eq!(books.len(), contracts.len());
    for (contract, linked) in contracts.iter().zip(&books) {
        assert_eq!(contract.book(), linked.id());
    }
    assert_eq!(books, vec![other_book, book]);
}
