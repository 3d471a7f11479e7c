//! Protobuf Emitter
//!
//! Compiles table schemas into a single proto3 module: enum columns become
//! standalone enum declarations, tables become messages. Message order is
//! immaterial on the wire, so callers usually feed the registry's
//! insertion order.

use crate::error::{Result, SchemaError};
use crate::schema::{ColumnSchema, DataType, TableSchema};

use super::names::{enum_value_identifier, to_pascal_case, to_upper_snake_case};

/// Default package for generated modules
pub const DEFAULT_PACKAGE: &str = "systemcatalyst";

/// proto3 module generator
#[derive(Debug, Clone)]
pub struct ProtobufGenerator {
    /// Package name, emitted verbatim in the package declaration
    package: String,
}

impl Default for ProtobufGenerator {
    fn default() -> Self {
        Self {
            package: DEFAULT_PACKAGE.to_string(),
        }
    }
}

impl ProtobufGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom package name
    pub fn with_package(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
        }
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    /// Emit a complete `.proto` module for the given tables: syntax header,
    /// package declaration, a timestamp import iff any column needs it,
    /// then per table its enum declarations followed by its message.
    pub fn generate<'a, I>(&self, tables: I) -> Result<String>
    where
        I: IntoIterator<Item = &'a TableSchema>,
    {
        let tables: Vec<&TableSchema> = tables.into_iter().collect();

        let mut out = String::new();
        out.push_str("syntax = \"proto3\";\n\n");
        out.push_str(&format!("package {};\n", self.package));

        let uses_timestamp = tables
            .iter()
            .any(|t| t.columns.iter().any(|c| c.data_type == DataType::Timestamp));
        if uses_timestamp {
            out.push_str("\nimport \"google/protobuf/timestamp.proto\";\n");
        }

        for table in tables {
            for col in table.columns.iter().filter(|c| c.data_type == DataType::Enum) {
                out.push('\n');
                emit_enum(&mut out, table, col)?;
            }
            out.push('\n');
            emit_message(&mut out, table)?;
        }

        Ok(out)
    }
}

/// Emit one enum declaration.
///
/// Member identifiers are `{PREFIX}_{VALUE}` and numbering starts at 0 in
/// declaration order — proto3 requires the first member to be zero.
fn emit_enum(out: &mut String, table: &TableSchema, col: &ColumnSchema) -> Result<()> {
    if col.enum_values.is_empty() {
        return Err(SchemaError::MissingEnumValues {
            table: table.name.clone(),
            column: col.name.clone(),
        });
    }

    let type_name = to_pascal_case(&col.enum_type_name(&table.name));
    let prefix = to_upper_snake_case(&type_name);

    out.push_str(&format!("enum {} {{\n", type_name));
    for (index, value) in col.enum_values.iter().enumerate() {
        out.push_str(&format!(
            "  {}_{} = {};\n",
            prefix,
            enum_value_identifier(value),
            index
        ));
    }
    out.push_str("}\n");
    Ok(())
}

/// Emit one message declaration. Field numbers are 1-based and sequential
/// in column declaration order; renumbering a published schema breaks wire
/// compatibility.
fn emit_message(out: &mut String, table: &TableSchema) -> Result<()> {
    out.push_str(&format!("message {} {{\n", table.name));
    for (index, col) in table.columns.iter().enumerate() {
        out.push_str(&format!(
            "  {} {} = {};\n",
            field_type(table, col),
            col.name,
            index + 1
        ));
    }
    out.push_str("}\n");
    Ok(())
}

/// Map a column onto its proto3 field type.
///
/// `Json` maps to `string` (the wire format has no native JSON scalar) and
/// `Reference` to `int32` without consulting the target key's type, the
/// same simplifying assumption the DDL emitter makes.
fn field_type(table: &TableSchema, col: &ColumnSchema) -> String {
    match col.data_type {
        DataType::Integer => "int32".to_string(),
        DataType::String => "string".to_string(),
        DataType::Boolean => "bool".to_string(),
        DataType::Float => "float".to_string(),
        DataType::Timestamp => "google.protobuf.Timestamp".to_string(),
        DataType::Json => "string".to_string(),
        DataType::Enum => to_pascal_case(&col.enum_type_name(&table.name)),
        DataType::Reference => "int32".to_string(),
    }
}
