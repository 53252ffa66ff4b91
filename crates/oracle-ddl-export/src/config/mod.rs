//! Configuration loading and validation.

mod types;
mod validation;

pub use types::*;

use crate::catalog::ObjectType;
use crate::error::Result;
use std::path::Path;

impl Config {
    /// Load configuration from a file.
    ///
    /// Files ending in `.yaml` or `.yml` are parsed as YAML, anything else as TOML.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(&content),
            _ => Self::from_toml(&content),
        }
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml(toml: &str) -> Result<Self> {
        let config: Config = toml::from_str(toml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        validation::validate(self)
    }
}

impl DatabaseConfig {
    /// Build an Easy Connect string (`//host:port/service_name`).
    pub fn connect_string(&self) -> String {
        format!("//{}:{}/{}", self.host, self.port, self.service_name)
    }
}

impl ExtractionConfig {
    /// Requested object types, upper-cased and de-duplicated in order.
    pub fn object_types(&self) -> Vec<ObjectType> {
        let mut types: Vec<ObjectType> = Vec::with_capacity(self.object_types.len());
        for raw in &self.object_types {
            let ty = ObjectType::from_catalog(raw);
            if !types.contains(&ty) {
                types.push(ty);
            }
        }
        types
    }
}
