//! YAML schema storage
//!
//! Loads and saves table schema documents. A document holds either a
//! single table or a list of tables; both forms deserialize into the same
//! registry input. This is the persistence collaborator consumed by
//! [`SchemaRegistry::load_from_directory`](crate::SchemaRegistry::load_from_directory).

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;
use walkdir::WalkDir;

use crate::error::Result;
use crate::schema::TableSchema;

/// A YAML document: one table or a list of tables
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SchemaDocument {
    Single(TableSchema),
    Many(Vec<TableSchema>),
}

/// YAML-backed schema storage
#[derive(Debug, Default)]
pub struct YamlStorage;

impl YamlStorage {
    pub fn new() -> Self {
        Self
    }

    /// Load the table schemas held by one YAML file.
    ///
    /// Each loaded schema is shape-checked before being returned, since
    /// serde cannot enforce cross-field invariants (enum values, reference
    /// targets, column-name uniqueness).
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Vec<TableSchema>> {
        let content = fs::read_to_string(path.as_ref())?;
        let document: SchemaDocument = serde_yaml::from_str(&content)?;

        let schemas = match document {
            SchemaDocument::Single(schema) => vec![schema],
            SchemaDocument::Many(schemas) => schemas,
        };

        for schema in &schemas {
            schema.check_shape()?;
        }

        debug!(file = %path.as_ref().display(), tables = schemas.len(), "loaded schema document");
        Ok(schemas)
    }

    /// Save one table schema as a YAML document
    pub fn save(&self, schema: &TableSchema, path: impl AsRef<Path>) -> Result<()> {
        let content = serde_yaml::to_string(schema)?;
        fs::write(path.as_ref(), content)?;
        Ok(())
    }

    /// Load every `*.yaml`/`*.yml` file directly under `dir`, in
    /// lexicographic file order so repeated loads yield the same sequence.
    pub fn load_directory(&self, dir: &Path) -> Result<Vec<TableSchema>> {
        let mut files: Vec<_> = WalkDir::new(dir)
            .max_depth(1)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| {
                entry.file_type().is_file()
                    && matches!(
                        entry.path().extension().and_then(|e| e.to_str()),
                        Some("yaml") | Some("yml")
                    )
            })
            .map(|entry| entry.into_path())
            .collect();
        files.sort();

        let mut schemas = Vec::new();
        for file in files {
            schemas.extend(self.load(&file)?);
        }
        Ok(schemas)
    }
}
