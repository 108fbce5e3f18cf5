// tests/store_tests.rs

use sieve_lang::{FilterError, ParserConfig, Store, StoreCatalog, StoreError};

fn catalog() -> StoreCatalog {
    let mut catalog = StoreCatalog::new();
    for store in [
        Store::new("store-1", "Gadget Haven", "Tech gadgets.", 150, 0),
        Store::new("store-2", "Book World", "Books.", 200, 0),
        Store::new("store-3", "Fashion Hub", "Clothing.", 250, 0),
        Store::new("store-4", "Home Essentials", "Homeware.", 75, 0),
        Store::new("store-5", "Sports Central", "Sports gear.", 125, 0),
    ] {
        catalog.add(store).unwrap();
    }
    catalog
}

fn ids(stores: &[&Store]) -> Vec<String> {
    stores.iter().map(|s| s.id.clone()).collect()
}

// ============================================================================
// Add
// ============================================================================

#[test]
fn test_add_and_get() {
    let catalog = catalog();
    assert_eq!(catalog.len(), 5);
    assert_eq!(catalog.get("store-2").map(|s| s.title.as_str()), Some("Book World"));
    assert!(catalog.get("store-9").is_none());
}

#[test]
fn test_add_existing_id_replaces() {
    let mut catalog = catalog();
    let saved = catalog
        .add(Store::new("store-1", "Gadget Haven", "Now with drones.", 175, 5))
        .unwrap();
    assert_eq!(saved.views, 175);

    assert_eq!(catalog.len(), 5);
    assert_eq!(catalog.get("store-1").map(|s| s.content.as_str()), Some("Now with drones."));
    assert_eq!(catalog.all()[0].id, "store-1", "Replacement keeps position");
}

#[test]
fn test_add_duplicate_title_rejected() {
    let mut catalog = catalog();
    let err = catalog
        .add(Store::new("store-6", "book world", "Another bookshop.", 1, 0))
        .unwrap_err();

    assert_eq!(err, StoreError::DuplicateTitle("book world".to_string()));
    assert!(err.is_client_error());
    assert_eq!(catalog.len(), 5);
}

#[test]
fn test_add_validation() {
    let long_id = "x".repeat(31);
    let long_title = "t".repeat(101);
    let long_content = "c".repeat(2001);

    let test_cases = vec![
        (Store::new("", "Title", "Content", 0, 0), "id"),
        (Store::new("   ", "Title", "Content", 0, 0), "id"),
        (Store::new(long_id.as_str(), "Title", "Content", 0, 0), "id"),
        (Store::new("store-9", "", "Content", 0, 0), "title"),
        (Store::new("store-9", long_title.as_str(), "Content", 0, 0), "title"),
        (Store::new("store-9", "Title", "", 0, 0), "content"),
        (Store::new("store-9", "Title", long_content.as_str(), 0, 0), "content"),
    ];

    let mut catalog = catalog();
    for (store, expected) in test_cases {
        match catalog.add(store) {
            Err(StoreError::Invalid { field, .. }) => assert_eq!(field, expected),
            other => panic!("Expected Invalid({}), got {:?}", expected, other),
        }
    }
    assert_eq!(catalog.len(), 5);
}

#[test]
fn test_limits_are_inclusive() {
    let mut catalog = StoreCatalog::new();
    let store = Store::new("x".repeat(30), "t".repeat(100), "c".repeat(2000), 0, 0);
    assert!(catalog.add(store).is_ok());
}

// ============================================================================
// Update and delete
// ============================================================================

#[test]
fn test_update() {
    let mut catalog = catalog();
    let updated = catalog
        .update("store-4", Store::new("ignored", "Home Essentials", "Homeware and garden.", 90, 7))
        .unwrap();

    assert_eq!(updated.id, "store-4", "Id comes from the path, not the body");
    assert_eq!(updated.views, 90);
    assert!(catalog.get("ignored").is_none());
}

#[test]
fn test_update_errors() {
    let mut catalog = catalog();

    let err = catalog
        .update("store-9", Store::new("store-9", "New Store", "Content.", 0, 0))
        .unwrap_err();
    assert_eq!(err, StoreError::NotFound("store-9".to_string()));
    assert!(!err.is_client_error());

    // A missing id wins over a bad body
    let test_cases = vec![
        Store::new("store-9", "", "", 0, 0),
        Store::new("store-9", "Book World", "Content.", 0, 0),
        Store::new("store-9", "t".repeat(101), "Content.", 0, 0),
    ];
    for body in test_cases {
        assert_eq!(
            catalog.update("store-9", body).unwrap_err(),
            StoreError::NotFound("store-9".to_string())
        );
    }

    let err = catalog
        .update("store-4", Store::new("store-4", "FASHION HUB", "Content.", 0, 0))
        .unwrap_err();
    assert!(matches!(err, StoreError::DuplicateTitle(_)));

    let err = catalog
        .update("store-4", Store::new("store-4", "Home Essentials", "", 0, 0))
        .unwrap_err();
    assert!(matches!(err, StoreError::Invalid { field: "content", .. }));
}

#[test]
fn test_delete() {
    let mut catalog = catalog();
    let removed = catalog.delete("store-3").unwrap();
    assert_eq!(removed.title, "Fashion Hub");
    assert_eq!(catalog.len(), 4);

    assert_eq!(
        catalog.delete("store-3").unwrap_err(),
        StoreError::NotFound("store-3".to_string())
    );
}

#[test]
fn test_deleted_title_can_be_reused() {
    let mut catalog = catalog();
    catalog.delete("store-2").unwrap();
    assert!(catalog.add(Store::new("store-6", "Book World", "Reopened.", 0, 0)).is_ok());
}

// ============================================================================
// Query
// ============================================================================

#[test]
fn test_query_without_filter_returns_all() {
    let catalog = catalog();
    for query in [None, Some(""), Some("   ")] {
        assert_eq!(catalog.query(query).unwrap().len(), 5, "Failed for {:?}", query);
    }
}

#[test]
fn test_query() {
    let catalog = catalog();
    let test_cases = vec![
        (r#"EQUAL(id,"store-1")"#, vec!["store-1"]),
        (r#"NOT(EQUAL(id,"store-2"))"#, vec!["store-1", "store-3", "store-4", "store-5"]),
        (r#"AND(EQUAL(id,"store-2"),GREATER_THAN(views,130))"#, vec!["store-2"]),
        ("GREATER_THAN(views,150)", vec!["store-2", "store-3"]),
        ("LESS_THAN(views,400)", vec!["store-1", "store-2", "store-3", "store-4", "store-5"]),
        (r#"OR(EQUAL(id,"store-1"),GREATER_THAN(views,200))"#, vec!["store-1", "store-3"]),
    ];

    for (query, expected) in test_cases {
        let hits = catalog.query(Some(query)).unwrap();
        assert_eq!(ids(&hits), expected, "Failed for query: {}", query);
    }
}

#[test]
fn test_query_errors_are_client_errors() {
    let catalog = catalog();
    let queries = [
        r#"OR((EQUAL(id,"store-1"),GREATER_THAN(views,200))"#,
        r#"EQUAL(rating,5)"#,
        r#"EQUAL(views,"many")"#,
        r#"MATCH(id,"store")"#,
        "EQUAL(id,@)",
    ];

    for query in queries {
        let err = catalog.query(Some(query)).unwrap_err();
        assert!(matches!(err, StoreError::Filter(_)), "Failed for query: {}", query);
        assert!(err.is_client_error());
    }
}

#[test]
fn test_query_error_keeps_original_positions() {
    let catalog = catalog();
    match catalog.query(Some("  EQUAL(rating,5)")) {
        Err(StoreError::Filter(FilterError::UnknownField { position, .. })) => assert_eq!(position, 8),
        other => panic!("Expected UnknownField, got {:?}", other),
    }
}

#[test]
fn test_query_with_config() {
    let catalog = catalog();
    let query = Some(r#"NOT(NOT(EQUAL(id,"store-1")))"#);

    let err = catalog.query_with(query, &ParserConfig { max_depth: 1 }).unwrap_err();
    assert!(matches!(err, StoreError::Filter(FilterError::NestingTooDeep { .. })));
    assert_eq!(ids(&catalog.query_with(query, &ParserConfig::default()).unwrap()), vec!["store-1"]);
}

// ============================================================================
// Serialization
// ============================================================================

#[test]
fn test_store_json_shape() {
    let store = Store::new("store-1", "Gadget Haven", "Tech gadgets.", 150, 1700000000);
    let json = serde_json::to_value(&store).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "id": "store-1",
            "title": "Gadget Haven",
            "content": "Tech gadgets.",
            "views": 150,
            "timeStamp": 1700000000
        })
    );

    let decoded: Store = serde_json::from_str(r#"{"id":"a","title":"b","content":"c"}"#).unwrap();
    assert_eq!(decoded.views, 0);
    assert_eq!(decoded.time_stamp, 0);
}

#[test]
fn test_from_stores_keeps_last_duplicate_id() {
    let catalog = StoreCatalog::from_stores(vec![
        Store::new("a", "First", "x", 1, 0),
        Store::new("b", "Second", "x", 2, 0),
        Store::new("a", "Third", "x", 3, 0),
    ]);
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.get("a").map(|s| s.views), Some(3));
}
