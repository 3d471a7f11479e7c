//! Schema Registry
//!
//! Central registry for all table schemas: registration, retrieval,
//! reference resolution, integrity validation, and dependency ordering.
//! One registry instance is scoped to one catalog-compilation session;
//! callers that need concurrency create one registry per request.

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{Result, SchemaError};
use crate::schema::{DataType, TableSchema};
use crate::storage::YamlStorage;

/// Traversal marker for dependency ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// The schema registry
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    /// Table name -> schema
    tables: HashMap<String, TableSchema>,
    /// Registration order, preserved for `list`
    insertion_order: Vec<String>,
}

impl SchemaRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new table schema.
    ///
    /// Fails with [`SchemaError::DuplicateTable`] if the name is already
    /// taken, leaving the existing entry unchanged. References are not
    /// checked here; integrity is a separate [`validate`](Self::validate)
    /// pass.
    pub fn register(&mut self, schema: TableSchema) -> Result<()> {
        if self.tables.contains_key(&schema.name) {
            return Err(SchemaError::DuplicateTable {
                table: schema.name.clone(),
            });
        }
        debug!(table = %schema.name, columns = schema.columns.len(), "registered table");
        self.insertion_order.push(schema.name.clone());
        self.tables.insert(schema.name.clone(), schema);
        Ok(())
    }

    /// Retrieve a schema by table name
    pub fn get(&self, name: &str) -> Option<&TableSchema> {
        self.tables.get(name)
    }

    /// All registered schemas, in registration order
    pub fn list(&self) -> Vec<&TableSchema> {
        self.insertion_order
            .iter()
            .filter_map(|name| self.tables.get(name))
            .collect()
    }

    /// Number of registered tables
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Remove all registered schemas
    pub fn clear(&mut self) {
        self.tables.clear();
        self.insertion_order.clear();
    }

    /// Load every `*.yaml`/`*.yml` schema document under `dir` and register
    /// the tables it yields.
    ///
    /// The first failure (unreadable file, malformed document, duplicate
    /// table) propagates to the caller; tables registered before the
    /// failure stay registered.
    pub fn load_from_directory(&mut self, dir: impl AsRef<Path>) -> Result<()> {
        let storage = YamlStorage::new();
        for schema in storage.load_directory(dir.as_ref())? {
            self.register(schema)?;
        }
        debug!(tables = self.tables.len(), dir = %dir.as_ref().display(), "loaded schema directory");
        Ok(())
    }

    /// Resolve the physical [`DataType`] of a column, following `Reference`
    /// chains until a primitive type is reached.
    ///
    /// Fails with [`SchemaError::UnknownTable`]/[`SchemaError::UnknownColumn`]
    /// when an endpoint is absent, [`SchemaError::MissingReferenceTable`]
    /// when a reference column lacks a target, and
    /// [`SchemaError::CircularReference`] when a column references its own
    /// table. The cycle guard is deliberately shallow: a chain that returns
    /// to an earlier table through distinct intermediaries is not detected
    /// here — [`get_ordered_schemas`](Self::get_ordered_schemas) reports
    /// such catalogs as cyclic.
    pub fn resolve_target_datatype(&self, table: &str, column: &str) -> Result<DataType> {
        let schema = self
            .get(table)
            .ok_or_else(|| SchemaError::UnknownTable {
                table: table.to_string(),
            })?;

        let col = schema
            .column(column)
            .ok_or_else(|| SchemaError::UnknownColumn {
                table: table.to_string(),
                column: column.to_string(),
            })?;

        if col.data_type != DataType::Reference {
            return Ok(col.data_type);
        }

        let target = col
            .reference_table
            .as_deref()
            .ok_or_else(|| SchemaError::MissingReferenceTable {
                table: table.to_string(),
                column: column.to_string(),
            })?;

        if target == table {
            return Err(SchemaError::CircularReference {
                table: table.to_string(),
                column: column.to_string(),
            });
        }

        self.resolve_target_datatype(target, &col.reference_column)
    }

    /// Integrity sweep over every `Reference` column in the catalog.
    ///
    /// Returns one report entry per violation — a missing
    /// `reference_table`, a target table absent from the registry, or a
    /// target column absent from the target table — and the empty vector
    /// for a consistent catalog. Side-effect-free; never fails.
    pub fn validate(&self) -> Vec<SchemaError> {
        let mut report = Vec::new();

        for schema in self.list() {
            for col in &schema.columns {
                if col.data_type != DataType::Reference {
                    continue;
                }

                let target_table = match col.reference_table.as_deref() {
                    Some(t) => t,
                    None => {
                        report.push(SchemaError::MissingReferenceTable {
                            table: schema.name.clone(),
                            column: col.name.clone(),
                        });
                        continue;
                    }
                };

                let target_schema = match self.get(target_table) {
                    Some(s) => s,
                    None => {
                        report.push(SchemaError::UnknownReferenceTable {
                            table: schema.name.clone(),
                            column: col.name.clone(),
                            target_table: target_table.to_string(),
                        });
                        continue;
                    }
                };

                if target_schema.column(&col.reference_column).is_none() {
                    report.push(SchemaError::MissingReferenceColumn {
                        table: schema.name.clone(),
                        column: col.name.clone(),
                        target_table: target_table.to_string(),
                        target_column: col.reference_column.clone(),
                    });
                }
            }
        }

        if !report.is_empty() {
            warn!(violations = report.len(), "catalog failed integrity validation");
        }
        report
    }

    /// All schemas in dependency order: every table appears after the
    /// tables it references, so the sequence is safe to feed to the DDL
    /// generator.
    ///
    /// Depth-first traversal with three-state markers, implemented with an
    /// explicit frame stack. Roots are visited in lexicographic name order
    /// and per-table dependencies in column declaration order, so the
    /// result is deterministic for a given registered set. Self-references
    /// do not constrain ordering and unknown targets are skipped (they are
    /// `validate`'s concern). A dependency cycle fails with
    /// [`SchemaError::CircularDependency`] naming a table in the cycle.
    pub fn get_ordered_schemas(&self) -> Result<Vec<&TableSchema>> {
        struct Frame<'a> {
            schema: &'a TableSchema,
            deps: Vec<&'a str>,
            next: usize,
        }

        let mut marks: HashMap<&str, Mark> = self
            .tables
            .keys()
            .map(|name| (name.as_str(), Mark::Unvisited))
            .collect();
        let mut order: Vec<&TableSchema> = Vec::with_capacity(self.tables.len());

        let mut roots: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        roots.sort_unstable();

        for root in roots {
            if marks[root] == Mark::Done {
                continue;
            }

            let mut stack = vec![Frame {
                schema: &self.tables[root],
                deps: self.dependencies_of(&self.tables[root]),
                next: 0,
            }];
            marks.insert(root, Mark::InProgress);

            loop {
                // Take the next unexplored dependency of the top frame, or
                // None when the frame is exhausted.
                let next_dep = match stack.last_mut() {
                    None => break,
                    Some(frame) if frame.next < frame.deps.len() => {
                        frame.next += 1;
                        Some(frame.deps[frame.next - 1])
                    }
                    Some(_) => None,
                };

                match next_dep {
                    Some(dep) => match marks[dep] {
                        Mark::InProgress => {
                            return Err(SchemaError::CircularDependency {
                                table: dep.to_string(),
                            });
                        }
                        Mark::Done => {}
                        Mark::Unvisited => {
                            let dep_schema = &self.tables[dep];
                            marks.insert(dep, Mark::InProgress);
                            stack.push(Frame {
                                schema: dep_schema,
                                deps: self.dependencies_of(dep_schema),
                                next: 0,
                            });
                        }
                    },
                    None => {
                        if let Some(frame) = stack.pop() {
                            marks.insert(&frame.schema.name, Mark::Done);
                            order.push(frame.schema);
                        }
                    }
                }
            }
        }

        Ok(order)
    }

    /// Distinct tables referenced by `schema`, in column declaration order.
    /// Self-references and unregistered targets are excluded.
    fn dependencies_of<'a>(&'a self, schema: &'a TableSchema) -> Vec<&'a str> {
        let mut deps: Vec<&str> = Vec::new();
        for col in &schema.columns {
            if col.data_type != DataType::Reference {
                continue;
            }
            if let Some(target) = col.reference_table.as_deref() {
                if target != schema.name
                    && self.tables.contains_key(target)
                    && !deps.contains(&target)
                {
                    deps.push(target);
                }
            }
        }
        deps
    }
}
