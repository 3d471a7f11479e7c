//! DDL Emitter
//!
//! Compiles table schemas into MySQL `CREATE TABLE` statements. The
//! generator keeps its own output namespace: compiling the same table name
//! twice returns the cached statement instead of redefining it, so one
//! generator can serve overlapping table sequences.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{Result, SchemaError};
use crate::schema::{ColumnSchema, DataType, TableSchema};

/// MySQL DDL generator with per-table memoization
#[derive(Debug, Default)]
pub struct DdlGenerator {
    /// Table name -> rendered statement
    compiled: HashMap<String, String>,
}

impl DdlGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile one table into a `CREATE TABLE` statement (no trailing
    /// delimiter). Repeated calls for the same table name return the same
    /// statement.
    pub fn compile(&mut self, table: &TableSchema) -> Result<String> {
        if let Some(statement) = self.compiled.get(&table.name) {
            return Ok(statement.clone());
        }

        let statement = render_create_table(table)?;
        debug!(table = %table.name, "compiled DDL statement");
        self.compiled.insert(table.name.clone(), statement.clone());
        Ok(statement)
    }

    /// Compile each table in the given sequence and concatenate the
    /// statements, each terminated with `;` and separated by a blank line.
    ///
    /// Statement order equals input order; callers wanting referentially
    /// correct output supply the registry's dependency order.
    pub fn generate<'a, I>(&mut self, tables: I) -> Result<String>
    where
        I: IntoIterator<Item = &'a TableSchema>,
    {
        let mut statements = Vec::new();
        for table in tables {
            statements.push(format!("{};", self.compile(table)?));
        }
        Ok(statements.join("\n\n"))
    }
}

fn render_create_table(table: &TableSchema) -> Result<String> {
    let mut lines: Vec<String> = Vec::with_capacity(table.columns.len() + 4);
    let mut foreign_keys: Vec<String> = Vec::new();

    for col in &table.columns {
        lines.push(render_column(table, col)?);

        if col.data_type == DataType::Reference {
            // reference_table presence was checked while rendering the column
            if let Some(target) = col.reference_table.as_deref() {
                foreign_keys.push(format!(
                    "  FOREIGN KEY ({}) REFERENCES {} ({})",
                    col.name, target, col.reference_column
                ));
            }
        }
    }

    let primary_key: Vec<&str> = table
        .columns
        .iter()
        .filter(|c| c.primary_key)
        .map(|c| c.name.as_str())
        .collect();
    if !primary_key.is_empty() {
        lines.push(format!("  PRIMARY KEY ({})", primary_key.join(", ")));
    }

    for group in &table.composite_unique_constraints {
        lines.push(format!("  UNIQUE ({})", group.join(", ")));
    }

    lines.extend(foreign_keys);

    Ok(format!(
        "CREATE TABLE {} (\n{}\n) COMMENT={}",
        table.name,
        lines.join(",\n"),
        quote_literal(&table_comment(table))
    ))
}

fn render_column(table: &TableSchema, col: &ColumnSchema) -> Result<String> {
    let mut line = format!("  {} {}", col.name, column_sql_type(table, col)?);

    if col.primary_key || !col.nullable {
        line.push_str(" NOT NULL");
    }
    if let Some(default) = &col.default {
        line.push_str(" DEFAULT ");
        line.push_str(&quote_literal(default));
    }
    if col.unique {
        line.push_str(" UNIQUE");
    }

    Ok(line)
}

/// Map a column onto its MySQL type.
///
/// `Reference` columns become 32-bit integers without consulting the
/// target key's physical type; the relationship is carried by the
/// table-level foreign-key clause instead.
fn column_sql_type(table: &TableSchema, col: &ColumnSchema) -> Result<String> {
    let sql_type = match col.data_type {
        DataType::Integer => "INTEGER".to_string(),
        DataType::String => "VARCHAR(255)".to_string(),
        DataType::Boolean => "BOOL".to_string(),
        DataType::Float => "FLOAT".to_string(),
        DataType::Timestamp => "DATETIME".to_string(),
        DataType::Json => "JSON".to_string(),
        DataType::Enum => {
            if col.enum_values.is_empty() {
                return Err(SchemaError::MissingEnumValues {
                    table: table.name.clone(),
                    column: col.name.clone(),
                });
            }
            let values: Vec<String> = col.enum_values.iter().map(|v| quote_literal(v)).collect();
            format!("ENUM({})", values.join(", "))
        }
        DataType::Reference => {
            if col.reference_table.is_none() {
                return Err(SchemaError::MissingReferenceTable {
                    table: table.name.clone(),
                    column: col.name.clone(),
                });
            }
            "INTEGER".to_string()
        }
    };
    Ok(sql_type)
}

/// Human-readable table comment: the description (if any) followed by the
/// structured classification suffix.
fn table_comment(table: &TableSchema) -> String {
    let mut metadata = vec![format!("Category: {}", table.category.as_str())];
    if let Some(namespace) = &table.namespace {
        metadata.push(format!("Namespace: {}", namespace));
    }
    if let Some(owner) = &table.owner {
        metadata.push(format!("Owner: {}", owner));
    }
    metadata.push(format!("Sensitivity: {}", table.sensitivity.as_str()));
    metadata.push(format!("Retention: {}", table.retention.as_str()));

    let suffix = format!("({})", metadata.join(", "));
    match &table.description {
        Some(description) => format!("{} {}", description, suffix),
        None => suffix,
    }
}

fn quote_literal(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}
