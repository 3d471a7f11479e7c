//! Configuration for the catalog CLIs
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (catalyst.toml)
//! - Environment variables (CATALYST_*)
//!
//! ## Example config file (catalyst.toml):
//! ```toml
//! [catalog]
//! schema_dir = "./schemas"
//! validate = true
//!
//! [ddl]
//! out = "generated/catalog.sql"
//!
//! [proto]
//! package = "systemcatalyst"
//! out = "generated/catalog.proto"
//! ```

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::codegen::proto::DEFAULT_PACKAGE;

/// Main configuration for the catalog tools
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Catalog settings
    #[serde(default)]
    pub catalog: CatalogSection,

    /// DDL output settings
    #[serde(default)]
    pub ddl: DdlSection,

    /// Protobuf output settings
    #[serde(default)]
    pub proto: ProtoSection,
}

/// Catalog source settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSection {
    /// Directory holding the YAML schema documents
    #[serde(default = "default_schema_dir")]
    pub schema_dir: PathBuf,

    /// Whether to run the integrity sweep before generating output
    #[serde(default = "default_true")]
    pub validate: bool,
}

/// DDL output settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DdlSection {
    /// Output file; stdout when unset
    #[serde(default)]
    pub out: Option<PathBuf>,
}

/// Protobuf output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProtoSection {
    /// Package name for the generated module
    #[serde(default = "default_proto_package")]
    pub package: String,

    /// Output file; stdout when unset
    #[serde(default)]
    pub out: Option<PathBuf>,
}

fn default_schema_dir() -> PathBuf {
    PathBuf::from("./schemas")
}

fn default_true() -> bool {
    true
}

fn default_proto_package() -> String {
    DEFAULT_PACKAGE.to_string()
}

impl Default for CatalogSection {
    fn default() -> Self {
        Self {
            schema_dir: default_schema_dir(),
            validate: true,
        }
    }
}

impl Default for ProtoSection {
    fn default() -> Self {
        Self {
            package: default_proto_package(),
            out: None,
        }
    }
}

impl CatalogConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration, optionally from an explicit file
    pub fn load_from(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        let config_locations = ["catalyst.toml", ".catalyst.toml", "config/catalyst.toml"];
        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        if let Some(config_dir) = directories::ProjectDirs::from("dev", "catalyst", "schemas") {
            let xdg_config = config_dir.config_dir().join("catalyst.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("CATALYST")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }

    /// Get the schema directory (resolves relative paths)
    pub fn schema_dir(&self) -> PathBuf {
        if self.catalog.schema_dir.is_absolute() {
            self.catalog.schema_dir.clone()
        } else {
            std::env::current_dir()
                .unwrap_or_default()
                .join(&self.catalog.schema_dir)
        }
    }
}
