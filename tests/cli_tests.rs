// tests/cli_tests.rs

use sieve_lang::{
    FilterError, ParserConfig, StoreError, ValueType,
    cli::{
        CheckOptions, CheckResult, CliError, DocCategory, execute_check, get_doc_category,
        get_docs_overview, list_fields, parse_records,
    },
};

const STORES_JSON: &str = r#"[
    {"id": "store-1", "title": "Gadget Haven", "content": "Tech gadgets.", "views": 150, "timeStamp": 1700000000},
    {"id": "store-2", "title": "Book World", "content": "Books.", "views": 200, "timeStamp": 1700000100},
    {"id": "store-3", "title": "Fashion Hub", "content": "Clothing.", "views": 250, "timeStamp": 1700000200},
    {"id": "store-4", "title": "Home Essentials", "content": "Homeware.", "views": 75, "timeStamp": 1700000300},
    {"id": "store-5", "title": "Sports Central", "content": "Sports gear.", "views": 125, "timeStamp": 1700000400}
]"#;

fn check(query: &str) -> Result<CheckResult, CliError> {
    execute_check(&CheckOptions {
        query: query.to_string(),
        input: Some(STORES_JSON.to_string()),
        ..Default::default()
    })
}

fn check_ids(query: &str) -> Vec<String> {
    match check(query).unwrap() {
        CheckResult::Success(stores) => stores.into_iter().map(|s| s.id).collect(),
        other => panic!("Expected Success, got {:?}", other),
    }
}

// ============================================================================
// check
// ============================================================================

#[test]
fn test_check_filters_records() {
    assert_eq!(
        check_ids(r#"OR(EQUAL(id,"store-1"),GREATER_THAN(views,200))"#),
        vec!["store-1", "store-3"]
    );
    assert_eq!(check_ids("LESS_THAN(views,100)"), vec!["store-4"]);
}

#[test]
fn test_check_blank_query_returns_all() {
    assert_eq!(check_ids("").len(), 5);
}

#[test]
fn test_check_syntax_only() {
    let result = execute_check(&CheckOptions {
        query: r#"and( equal(ID,"x") , not(less_than(views,3)) )"#.to_string(),
        syntax_only: true,
        ..Default::default()
    })
    .unwrap();

    match result {
        CheckResult::SyntaxValid(canonical) => {
            assert_eq!(canonical, r#"AND(EQUAL(ID,"x"),NOT(LESS_THAN(views,3)))"#)
        }
        other => panic!("Expected SyntaxValid, got {:?}", other),
    }
}

#[test]
fn test_check_syntax_only_reports_errors() {
    let err = execute_check(&CheckOptions {
        query: "GREATER_THAN(title,3)".to_string(),
        syntax_only: true,
        ..Default::default()
    })
    .unwrap_err();

    assert!(matches!(err, CliError::Filter(FilterError::TypeCoercion { .. })));
    assert!(err.is_user_error());
}

#[test]
fn test_check_requires_input() {
    let err = execute_check(&CheckOptions {
        query: r#"EQUAL(id,"store-1")"#.to_string(),
        ..Default::default()
    })
    .unwrap_err();

    assert!(matches!(err, CliError::NoInput));
    assert!(err.is_user_error());
}

#[test]
fn test_check_invalid_json() {
    let err = execute_check(&CheckOptions {
        query: r#"EQUAL(id,"store-1")"#.to_string(),
        input: Some(r#"[{"id": "store-1"}"#.to_string()),
        ..Default::default()
    })
    .unwrap_err();

    assert!(matches!(err, CliError::Json(_)));
    assert!(err.is_user_error());
}

#[test]
fn test_check_invalid_filter() {
    let err = check(r#"OR((EQUAL(id,"store-1"),GREATER_THAN(views,200))"#).unwrap_err();
    assert!(matches!(
        err,
        CliError::Store(StoreError::Filter(FilterError::MalformedExpression { .. }))
    ));
    assert!(err.is_user_error());
}

#[test]
fn test_check_respects_max_depth() {
    let err = execute_check(&CheckOptions {
        query: r#"NOT(NOT(EQUAL(id,"store-1")))"#.to_string(),
        input: Some(STORES_JSON.to_string()),
        config: ParserConfig { max_depth: 2 },
        ..Default::default()
    })
    .unwrap_err();

    assert!(matches!(
        err,
        CliError::Store(StoreError::Filter(FilterError::NestingTooDeep { limit: 2, .. }))
    ));
}

#[test]
fn test_parse_records() {
    let stores = parse_records(STORES_JSON).unwrap();
    assert_eq!(stores.len(), 5);
    assert_eq!(stores[3].title, "Home Essentials");
    assert_eq!(stores[4].time_stamp, 1700000400);

    assert!(parse_records(r#"{"id": "store-1"}"#).is_err());
}

// ============================================================================
// fields
// ============================================================================

#[test]
fn test_list_fields() {
    let fields: Vec<(String, ValueType, bool)> = list_fields()
        .into_iter()
        .map(|f| (f.name, f.value_type, f.orderable))
        .collect();

    assert_eq!(
        fields,
        vec![
            ("Id".to_string(), ValueType::Str, false),
            ("Title".to_string(), ValueType::Str, false),
            ("Content".to_string(), ValueType::Str, false),
            ("Views".to_string(), ValueType::Int, true),
            ("TimeStamp".to_string(), ValueType::Int, true),
        ]
    );
}

#[test]
fn test_fields_json() {
    let json = serde_json::to_value(list_fields()).unwrap();
    assert_eq!(json[3], serde_json::json!({"name": "Views", "type": "int", "orderable": true}));
}

// ============================================================================
// docs
// ============================================================================

#[test]
fn test_doc_categories() {
    let test_cases = vec![
        ("syntax", DocCategory::Syntax),
        ("Grammar", DocCategory::Syntax),
        ("ops", DocCategory::Operators),
        ("TYPES", DocCategory::Types),
        ("coercion", DocCategory::Types),
        ("errors", DocCategory::Errors),
    ];

    for (name, expected) in test_cases {
        assert_eq!(DocCategory::from_name(name), Some(expected), "Failed for: {}", name);
        assert!(get_doc_category(name).is_ok());
    }
}

#[test]
fn test_unknown_doc_category() {
    let err = get_doc_category("functions").unwrap_err();
    assert!(matches!(err, CliError::UnknownCategory(ref name) if name == "functions"));
    assert!(err.is_user_error());
}

#[test]
fn test_docs_overview_lists_every_category() {
    let overview = get_docs_overview();
    for name in ["syntax", "operators", "types", "errors"] {
        assert!(overview.contains(name), "Overview is missing {}", name);
    }
}
