//! Catalog Validator CLI
//!
//! Checks the catalog: referential integrity, dependency ordering, and
//! reference-chain resolution.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use catalyst_schemas::{CatalogConfig, SchemaRegistry};

#[derive(Parser)]
#[command(name = "catalyst-validate")]
#[command(about = "Validate the schema catalog")]
struct Cli {
    /// Directory of YAML schema documents (overrides config)
    #[arg(short, long)]
    schemas: Option<PathBuf>,

    /// Path to a config file (catalyst.toml)
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the referential-integrity sweep and print every violation
    Integrity,

    /// Print the dependency order the DDL generator would use
    Order,

    /// Resolve the physical data type of a column through reference chains
    Resolve {
        /// Table name
        table: String,
        /// Column name
        column: String,
    },

    /// Generate a catalog report (JSON)
    Report {
        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = CatalogConfig::load_from(cli.config.as_deref())?;
    let schema_dir = cli.schemas.unwrap_or_else(|| config.schema_dir());

    let mut registry = SchemaRegistry::new();
    registry
        .load_from_directory(&schema_dir)
        .with_context(|| format!("failed to load schema directory {:?}", schema_dir))?;

    match cli.command {
        Commands::Integrity => {
            println!("🔍 Checking {} table(s)...", registry.len());
            let report = registry.validate();

            if report.is_empty() {
                println!("✅ Catalog is consistent");
            } else {
                println!("❌ {} violation(s):", report.len());
                for violation in &report {
                    println!("   └─ {}", violation);
                }
                std::process::exit(1);
            }
            Ok(())
        }

        Commands::Order => {
            let ordered = registry.get_ordered_schemas()?;
            println!("📋 Dependency order:");
            for (index, schema) in ordered.iter().enumerate() {
                println!("  {:>3}. {}", index + 1, schema.name);
            }
            Ok(())
        }

        Commands::Resolve { table, column } => {
            let data_type = registry.resolve_target_datatype(&table, &column)?;
            println!("{}.{} resolves to {:?}", table, column, data_type);
            Ok(())
        }

        Commands::Report { output } => {
            let violations = registry.validate();
            let dependency_order = match registry.get_ordered_schemas() {
                Ok(tables) => serde_json::json!(tables
                    .iter()
                    .map(|s| s.name.clone())
                    .collect::<Vec<_>>()),
                Err(e) => serde_json::json!({ "error": e.to_string() }),
            };

            let report = serde_json::json!({
                "tables": registry.len(),
                "consistent": violations.is_empty(),
                "violations": violations.iter().map(|v| v.to_string()).collect::<Vec<_>>(),
                "dependency_order": dependency_order,
            });
            let report_json = serde_json::to_string_pretty(&report)?;

            if let Some(path) = output {
                fs::write(&path, &report_json)
                    .with_context(|| format!("failed to write {:?}", path))?;
                println!("✅ Report written to {:?}", path);
            } else {
                println!("{}", report_json);
            }
            Ok(())
        }
    }
}
