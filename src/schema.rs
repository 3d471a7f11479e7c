//! Schema model types
//!
//! Immutable value types describing columns and tables. Instances are
//! constructed once (by hand, by the YAML loader, or by a test) and never
//! mutated afterwards; the registry is the only mutable structure.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SchemaError};

/// Logical column data type
///
/// `Enum` and `Reference` are non-primitive: they carry extra column
/// attributes and are resolved by the registry and generators rather than
/// mapped directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    Integer,
    String,
    Boolean,
    Float,
    Timestamp,
    Json,
    Enum,
    Reference,
}

impl DataType {
    /// True for types that map directly onto a target grammar
    pub fn is_primitive(&self) -> bool {
        !matches!(self, DataType::Enum | DataType::Reference)
    }
}

/// Category of data held by a table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DataCategory {
    /// Curated reference data, changed through review
    #[default]
    Controlled,
    /// Application-written data
    Dynamic,
}

impl DataCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataCategory::Controlled => "controlled",
            DataCategory::Dynamic => "dynamic",
        }
    }
}

/// Sensitivity classification of a table's contents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DataSensitivity {
    Public,
    #[default]
    Internal,
    Confidential,
    Pii,
    Restricted,
}

impl DataSensitivity {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSensitivity::Public => "public",
            DataSensitivity::Internal => "internal",
            DataSensitivity::Confidential => "confidential",
            DataSensitivity::Pii => "pii",
            DataSensitivity::Restricted => "restricted",
        }
    }
}

/// Data retention policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RetentionPolicy {
    #[default]
    #[serde(rename = "indefinite")]
    Indefinite,
    #[serde(rename = "30_days")]
    ThirtyDays,
    #[serde(rename = "fiscal_year")]
    FiscalYear,
}

impl RetentionPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            RetentionPolicy::Indefinite => "indefinite",
            RetentionPolicy::ThirtyDays => "30_days",
            RetentionPolicy::FiscalYear => "fiscal_year",
        }
    }
}

/// UI rendering hints for a table
///
/// Opaque to the generators; carried for display layers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableUiHints {
    /// Human-readable name for the table
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Icon identifier (e.g. mdi-account)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Column to sort by default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_sort_column: Option<String>,

    /// Columns to show in summary views
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub summary_columns: Vec<String>,
}

/// A single column definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSchema {
    /// Column name, unique within its table
    pub name: String,

    /// Logical data type
    pub data_type: DataType,

    /// Whether this column is part of the primary key
    #[serde(default)]
    pub primary_key: bool,

    /// Whether this column can be null
    #[serde(default = "default_true")]
    pub nullable: bool,

    /// Whether this column must be unique
    #[serde(default)]
    pub unique: bool,

    /// Default value for the column, as a literal string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,

    /// Allowed values for an `Enum` column, in declared order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<String>,

    /// Name of the enum type; synthesized as `{table}_{column}_enum` if absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enum_name: Option<String>,

    /// Table referenced by a `Reference` column
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_table: Option<String>,

    /// Column referenced in the target table
    #[serde(default = "default_reference_column")]
    pub reference_column: String,
}

fn default_true() -> bool {
    true
}

fn default_reference_column() -> String {
    "id".to_string()
}

impl ColumnSchema {
    /// Create a column with the given name and type; remaining fields take
    /// their defaults (nullable, no constraints)
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            primary_key: false,
            nullable: true,
            unique: false,
            default: None,
            enum_values: Vec::new(),
            enum_name: None,
            reference_table: None,
            reference_column: default_reference_column(),
        }
    }

    /// Mark as primary key (implies not null in generated DDL)
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Disallow nulls
    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Require values to be unique
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Set the default value literal
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Set the allowed enum values
    pub fn enum_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enum_values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Set an explicit enum type name
    pub fn enum_name(mut self, name: impl Into<String>) -> Self {
        self.enum_name = Some(name.into());
        self
    }

    /// Point a `Reference` column at `table.column`
    pub fn references(mut self, table: impl Into<String>, column: impl Into<String>) -> Self {
        self.reference_table = Some(table.into());
        self.reference_column = column.into();
        self
    }

    /// The enum type name for this column: `enum_name` if set, otherwise
    /// the synthesized `{table}_{column}_enum`
    pub fn enum_type_name(&self, table_name: &str) -> String {
        match &self.enum_name {
            Some(name) => name.clone(),
            None => format!("{}_{}_enum", table_name, self.name),
        }
    }
}

/// A table definition: the unit registered in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSchema {
    /// Table name, the registry key
    pub name: String,

    /// Columns in declaration order; this order is authoritative for all
    /// generated output
    pub columns: Vec<ColumnSchema>,

    /// Description of the table
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Category of data (controlled or dynamic)
    #[serde(default)]
    pub category: DataCategory,

    /// Namespace for organizing related content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// Owner or steward team responsible for this data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,

    /// Sensitivity classification
    #[serde(default)]
    pub sensitivity: DataSensitivity,

    /// Retention policy
    #[serde(default)]
    pub retention: RetentionPolicy,

    /// UI rendering hints, opaque to the generators
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui_hints: Option<TableUiHints>,

    /// Column groups that must be unique together, one constraint per group
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub composite_unique_constraints: Vec<Vec<String>>,
}

impl TableSchema {
    /// Create a table with the given name and columns; metadata fields take
    /// their defaults
    pub fn new(name: impl Into<String>, columns: Vec<ColumnSchema>) -> Self {
        Self {
            name: name.into(),
            columns,
            description: None,
            category: DataCategory::default(),
            namespace: None,
            owner: None,
            sensitivity: DataSensitivity::default(),
            retention: RetentionPolicy::default(),
            ui_hints: None,
            composite_unique_constraints: Vec::new(),
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the data category
    pub fn with_category(mut self, category: DataCategory) -> Self {
        self.category = category;
        self
    }

    /// Set the namespace
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Set the owning team
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// Set the sensitivity classification
    pub fn with_sensitivity(mut self, sensitivity: DataSensitivity) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    /// Set the retention policy
    pub fn with_retention(mut self, retention: RetentionPolicy) -> Self {
        self.retention = retention;
        self
    }

    /// Attach UI hints
    pub fn with_ui_hints(mut self, hints: TableUiHints) -> Self {
        self.ui_hints = Some(hints);
        self
    }

    /// Add a multi-column uniqueness constraint
    pub fn with_composite_unique<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.composite_unique_constraints
            .push(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Find a column by name
    pub fn column(&self, name: &str) -> Option<&ColumnSchema> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Check per-entity shape invariants: column names unique within the
    /// table, `Reference` columns carry a `reference_table`, `Enum` columns
    /// carry non-empty `enum_values`.
    ///
    /// The YAML loader runs this after deserialization, since serde cannot
    /// enforce cross-field shape. Cross-table integrity is the registry's
    /// `validate()` pass.
    pub fn check_shape(&self) -> Result<()> {
        let mut seen = std::collections::HashSet::new();
        for col in &self.columns {
            if !seen.insert(col.name.as_str()) {
                return Err(SchemaError::DuplicateColumn {
                    table: self.name.clone(),
                    column: col.name.clone(),
                });
            }
            match col.data_type {
                DataType::Reference if col.reference_table.is_none() => {
                    return Err(SchemaError::MissingReferenceTable {
                        table: self.name.clone(),
                        column: col.name.clone(),
                    });
                }
                DataType::Enum if col.enum_values.is_empty() => {
                    return Err(SchemaError::MissingEnumValues {
                        table: self.name.clone(),
                        column: col.name.clone(),
                    });
                }
                _ => {}
            }
        }
        Ok(())
    }
}
