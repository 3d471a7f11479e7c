//! Catalyst Schema Catalog
//!
//! A declarative, strongly-typed description of relational tables for the
//! Catalyst platform, validated for referential integrity, ordered by
//! dependency, and compiled into SQL DDL and Protocol Buffer definitions.
//!
//! ## Features
//!
//! - **Typed Model**: columns and tables as immutable value objects with
//!   classification metadata (category, sensitivity, retention)
//! - **Registry**: cross-table reference validation, recursive type
//!   resolution, deterministic dependency ordering
//! - **DDL Generation**: MySQL `CREATE TABLE` statements with inline
//!   foreign keys and classification comments
//! - **Protobuf Generation**: a proto3 module of enums and messages
//! - **YAML Storage**: schema documents loaded from a directory
//!
//! ## Architecture
//!
//! ```text
//! schemas/
//! ├── users.yaml        ──┐
//! ├── posts.yaml          ├─> SchemaRegistry ──> validate()
//! └── tasks.yaml        ──┘         │
//!                                   ├─> get_ordered_schemas() ──> DdlGenerator
//!                                   └─> list()                ──> ProtobufGenerator
//! ```

pub mod codegen;
pub mod config;
pub mod error;
pub mod registry;
pub mod schema;
pub mod storage;
pub mod workflow;

pub use codegen::{DdlGenerator, ProtobufGenerator};
pub use config::CatalogConfig;
pub use error::{Result, SchemaError};
pub use registry::SchemaRegistry;
pub use schema::{
    ColumnSchema, DataCategory, DataSensitivity, DataType, RetentionPolicy, TableSchema,
    TableUiHints,
};
pub use storage::YamlStorage;
pub use workflow::{
    validate_workflow, WorkflowDefinition, WorkflowEdge, WorkflowNode, WorkflowNodeType,
};
