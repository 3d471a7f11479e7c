//! Registry integration tests
//!
//! Exercises the public API end to end: YAML loading, integrity
//! validation, reference resolution, and dependency ordering.

use std::fs;

use tempfile::tempdir;

use catalyst_schemas::{
    ColumnSchema, DataType, SchemaError, SchemaRegistry, TableSchema, YamlStorage,
};

fn users() -> TableSchema {
    TableSchema::new(
        "users",
        vec![
            ColumnSchema::new("id", DataType::Integer).primary_key(),
            ColumnSchema::new("name", DataType::String),
        ],
    )
}

fn posts() -> TableSchema {
    TableSchema::new(
        "posts",
        vec![
            ColumnSchema::new("id", DataType::Integer).primary_key(),
            ColumnSchema::new("user_id", DataType::Reference).references("users", "id"),
            ColumnSchema::new("content", DataType::String),
        ],
    )
}

// =============================================================================
// YAML loading
// =============================================================================

#[test]
fn test_load_from_directory() {
    let dir = tempdir().unwrap();
    let storage = YamlStorage::new();
    storage.save(&users(), dir.path().join("users.yaml")).unwrap();
    storage.save(&posts(), dir.path().join("posts.yaml")).unwrap();

    let mut registry = SchemaRegistry::new();
    registry.load_from_directory(dir.path()).unwrap();

    assert_eq!(registry.len(), 2);
    let loaded = registry.get("users").unwrap();
    assert_eq!(loaded.columns.len(), 2);
    assert!(registry.validate().is_empty());
}

#[test]
fn test_load_with_omitted_defaults() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("users.yaml"),
        r#"
name: users
columns:
  - name: id
    data_type: integer
    primary_key: true
  - name: name
    data_type: string
"#,
    )
    .unwrap();

    let mut registry = SchemaRegistry::new();
    registry.load_from_directory(dir.path()).unwrap();

    let users = registry.get("users").unwrap();
    assert!(users.columns[1].nullable);
    assert_eq!(users.columns[1].reference_column, "id");
}

#[test]
fn test_duplicate_across_files_keeps_first_registration() {
    let dir = tempdir().unwrap();
    let storage = YamlStorage::new();

    let first = users();
    let mut second = users();
    second.columns.push(ColumnSchema::new("extra", DataType::Boolean));

    // Lexicographic file order: a.yaml loads first
    storage.save(&first, dir.path().join("a.yaml")).unwrap();
    storage.save(&second, dir.path().join("b.yaml")).unwrap();

    let mut registry = SchemaRegistry::new();
    let err = registry.load_from_directory(dir.path()).unwrap_err();
    assert!(matches!(err, SchemaError::DuplicateTable { .. }));

    // No rollback: the first registration survives the failure
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.get("users").unwrap().columns.len(), 2);
}

// =============================================================================
// Reference resolution
// =============================================================================

#[test]
fn test_resolve_reference_chain() {
    let mut registry = SchemaRegistry::new();
    registry.register(users()).unwrap();
    registry.register(posts()).unwrap();

    assert_eq!(
        registry.resolve_target_datatype("users", "id").unwrap(),
        DataType::Integer
    );
    assert_eq!(
        registry.resolve_target_datatype("posts", "user_id").unwrap(),
        DataType::Integer
    );
}

#[test]
fn test_resolve_two_hop_chain() {
    let mut registry = SchemaRegistry::new();
    registry.register(users()).unwrap();
    registry.register(posts()).unwrap();
    registry
        .register(TableSchema::new(
            "comments",
            vec![
                ColumnSchema::new("id", DataType::Integer).primary_key(),
                ColumnSchema::new("post_id", DataType::Reference).references("posts", "id"),
                // Two hops: comments.author_id -> posts.user_id -> users.id
                ColumnSchema::new("author_id", DataType::Reference).references("posts", "user_id"),
            ],
        ))
        .unwrap();

    assert_eq!(
        registry
            .resolve_target_datatype("comments", "author_id")
            .unwrap(),
        DataType::Integer
    );
}

// =============================================================================
// Validation report
// =============================================================================

#[test]
fn test_validation_missing_table_message() {
    let mut registry = SchemaRegistry::new();
    registry.register(posts()).unwrap();

    let report = registry.validate();
    assert_eq!(report.len(), 1);
    assert!(report[0].to_string().contains("References unknown table 'users'"));
}

#[test]
fn test_validation_missing_column_message() {
    let mut registry = SchemaRegistry::new();
    registry.register(users()).unwrap();
    registry
        .register(TableSchema::new(
            "bad",
            vec![ColumnSchema::new("ref", DataType::Reference).references("users", "missing_col")],
        ))
        .unwrap();

    let report = registry.validate();
    assert_eq!(report.len(), 1);
    assert!(report[0]
        .to_string()
        .contains("References unknown column 'missing_col' in 'users'"));
}

#[test]
fn test_validation_is_repeatable() {
    let mut registry = SchemaRegistry::new();
    registry.register(posts()).unwrap();

    assert_eq!(registry.validate().len(), 1);
    assert_eq!(registry.validate().len(), 1);

    registry.register(users()).unwrap();
    assert!(registry.validate().is_empty());
}

// =============================================================================
// Dependency ordering
// =============================================================================

#[test]
fn test_topological_sort_registration_order_independent() {
    let mut registry = SchemaRegistry::new();
    registry.register(posts()).unwrap();
    registry.register(users()).unwrap();

    let names: Vec<String> = registry
        .get_ordered_schemas()
        .unwrap()
        .iter()
        .map(|s| s.name.clone())
        .collect();

    let users_at = names.iter().position(|n| n == "users").unwrap();
    let posts_at = names.iter().position(|n| n == "posts").unwrap();
    assert!(users_at < posts_at);
}

#[test]
fn test_independent_tables_sorted_by_name() {
    let mut registry = SchemaRegistry::new();
    for name in ["zebra", "alpha", "mango"] {
        registry
            .register(TableSchema::new(
                name,
                vec![ColumnSchema::new("id", DataType::Integer).primary_key()],
            ))
            .unwrap();
    }

    let names: Vec<&str> = registry
        .get_ordered_schemas()
        .unwrap()
        .iter()
        .map(|s| s.name.as_str())
        .collect();
    assert_eq!(names, vec!["alpha", "mango", "zebra"]);
}

#[test]
fn test_circular_dependency_is_reported() {
    let mut registry = SchemaRegistry::new();
    registry
        .register(TableSchema::new(
            "t1",
            vec![
                ColumnSchema::new("id", DataType::Integer).primary_key(),
                ColumnSchema::new("ref", DataType::Reference).references("t2", "id"),
            ],
        ))
        .unwrap();
    registry
        .register(TableSchema::new(
            "t2",
            vec![
                ColumnSchema::new("id", DataType::Integer).primary_key(),
                ColumnSchema::new("ref", DataType::Reference).references("t1", "id"),
            ],
        ))
        .unwrap();

    let err = registry.get_ordered_schemas().unwrap_err();
    assert!(err.to_string().contains("Circular dependency"));
}

#[test]
fn test_self_reference_orderable_alone() {
    let mut registry = SchemaRegistry::new();
    registry
        .register(TableSchema::new(
            "categories",
            vec![
                ColumnSchema::new("id", DataType::Integer).primary_key(),
                ColumnSchema::new("parent_id", DataType::Reference).references("categories", "id"),
            ],
        ))
        .unwrap();

    let ordered = registry.get_ordered_schemas().unwrap();
    assert_eq!(ordered.len(), 1);
    assert_eq!(ordered[0].name, "categories");
}

#[test]
fn test_diamond_dependency_orders_every_parent_first() {
    // accounts <- invoices, accounts <- payments, invoices/payments <- ledger
    let mut registry = SchemaRegistry::new();
    registry
        .register(TableSchema::new(
            "ledger",
            vec![
                ColumnSchema::new("id", DataType::Integer).primary_key(),
                ColumnSchema::new("invoice_id", DataType::Reference).references("invoices", "id"),
                ColumnSchema::new("payment_id", DataType::Reference).references("payments", "id"),
            ],
        ))
        .unwrap();
    for name in ["invoices", "payments"] {
        registry
            .register(TableSchema::new(
                name,
                vec![
                    ColumnSchema::new("id", DataType::Integer).primary_key(),
                    ColumnSchema::new("account_id", DataType::Reference).references("accounts", "id"),
                ],
            ))
            .unwrap();
    }
    registry
        .register(TableSchema::new(
            "accounts",
            vec![ColumnSchema::new("id", DataType::Integer).primary_key()],
        ))
        .unwrap();

    let names: Vec<&str> = registry
        .get_ordered_schemas()
        .unwrap()
        .iter()
        .map(|s| s.name.as_str())
        .collect();

    let position = |n: &str| names.iter().position(|x| *x == n).unwrap();
    assert!(position("accounts") < position("invoices"));
    assert!(position("accounts") < position("payments"));
    assert!(position("invoices") < position("ledger"));
    assert!(position("payments") < position("ledger"));
}
