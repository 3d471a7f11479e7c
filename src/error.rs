//! Error types for the schema catalog

use thiserror::Error;

/// Result type for catalog operations
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Schema catalog errors
///
/// All failures are immediate and synchronous; these are
/// configuration-correctness errors, not transient faults.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Schema for table '{table}' already exists")]
    DuplicateTable { table: String },

    #[error("Duplicate column '{column}' in table '{table}'")]
    DuplicateColumn { table: String, column: String },

    #[error("Table '{table}' not found in registry")]
    UnknownTable { table: String },

    #[error("Column '{column}' not found in table '{table}'")]
    UnknownColumn { table: String, column: String },

    #[error("Column '{table}.{column}' is a REFERENCE but has no reference_table")]
    MissingReferenceTable { table: String, column: String },

    #[error("{table}.{column}: References unknown table '{target_table}'")]
    UnknownReferenceTable {
        table: String,
        column: String,
        target_table: String,
    },

    #[error("{table}.{column}: References unknown column '{target_column}' in '{target_table}'")]
    MissingReferenceColumn {
        table: String,
        column: String,
        target_table: String,
        target_column: String,
    },

    #[error("Column '{table}.{column}' is an ENUM but has no enum_values")]
    MissingEnumValues { table: String, column: String },

    #[error("Circular reference detected on '{table}.{column}'")]
    CircularReference { table: String, column: String },

    #[error("Circular dependency detected involving table '{table}'")]
    CircularDependency { table: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
