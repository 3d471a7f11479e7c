//! Catalog Export CLI
//!
//! Loads YAML schema documents into a registry, runs the integrity sweep,
//! and compiles the catalog to SQL DDL (dependency order) and/or a proto3
//! module (registration order).

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use catalyst_schemas::{CatalogConfig, DdlGenerator, ProtobufGenerator, SchemaRegistry};

#[derive(Parser)]
#[command(name = "catalyst-export")]
#[command(about = "Compile the schema catalog to SQL DDL and Protocol Buffers")]
struct Cli {
    /// Directory of YAML schema documents (overrides config)
    #[arg(short, long)]
    schemas: Option<PathBuf>,

    /// Path to a config file (catalyst.toml)
    #[arg(short, long)]
    config: Option<String>,

    /// Write the DDL script here (overrides config; stdout by default)
    #[arg(long)]
    ddl_out: Option<PathBuf>,

    /// Write the proto module here (overrides config; stdout by default)
    #[arg(long)]
    proto_out: Option<PathBuf>,

    /// Protobuf package name (overrides config)
    #[arg(short, long)]
    package: Option<String>,

    /// Emit only the DDL target
    #[arg(long, conflicts_with = "proto_only")]
    ddl_only: bool,

    /// Emit only the Protobuf target
    #[arg(long, conflicts_with = "ddl_only")]
    proto_only: bool,

    /// Proceed even if the integrity sweep reports violations
    #[arg(long)]
    force: bool,

    /// Load and validate without writing any output
    #[arg(long)]
    dry_run: bool,
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
    println!("📦 Catalog export");
    println!("  Schemas: {:?}", schema_dir);
    println!();

    let mut registry = SchemaRegistry::new();
    registry
        .load_from_directory(&schema_dir)
        .with_context(|| format!("failed to load schema directory {:?}", schema_dir))?;
    println!("📂 Loaded {} table(s)", registry.len());

    if config.catalog.validate {
        let report = registry.validate();
        if report.is_empty() {
            println!("✅ Integrity check passed");
        } else {
            println!("❌ {} integrity violation(s):", report.len());
            for violation in &report {
                println!("   └─ {}", violation);
            }
            if !cli.force {
                anyhow::bail!("catalog failed validation (use --force to emit anyway)");
            }
            println!("⚠️  Continuing despite violations (--force)");
        }
    }

    if cli.dry_run {
        println!();
        println!("✅ Dry run complete, no output written");
        return Ok(());
    }

    if !cli.proto_only {
        let ordered = registry.get_ordered_schemas()?;
        let ddl = DdlGenerator::new().generate(ordered)?;
        emit("DDL", &ddl, cli.ddl_out.or(config.ddl.out.clone()))?;
    }

    if !cli.ddl_only {
        let package = cli.package.unwrap_or_else(|| config.proto.package.clone());
        let proto = ProtobufGenerator::with_package(package).generate(registry.list())?;
        emit("Protobuf", &proto, cli.proto_out.or(config.proto.out))?;
    }

    Ok(())
}

fn emit(label: &str, content: &str, out: Option<PathBuf>) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            fs::write(&path, content).with_context(|| format!("failed to write {:?}", path))?;
            println!("✅ {} written to {:?}", label, path);
        }
        None => {
            println!();
            println!("── {} ──", label);
            println!("{}", content);
        }
    }
    Ok(())
}
