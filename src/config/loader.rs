//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the report
//! configuration from a YAML file and validating its layout.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::{LaborError, LaborResult};

use super::types::{DETAIL_COLUMN_COUNT, ReportConfig};

/// Loads and provides access to the report configuration.
///
/// # Example
///
/// ```no_run
/// use labor_summary::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/labor_summary.yaml")?;
/// println!("Report has {} columns", loader.config().columns.len());
/// # Ok::<(), labor_summary::error::LaborError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: ReportConfig,
}

impl ConfigLoader {
    /// Loads configuration from a YAML file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - The file is missing
    /// - The file contains invalid YAML
    /// - The column layout is unusable (see [`ConfigLoader::validate`])
    pub fn load<P: AsRef<Path>>(path: P) -> LaborResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| LaborError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::from_yaml_str(&content).map_err(|e| match e {
            LaborError::ConfigParseError { message, .. } => LaborError::ConfigParseError {
                path: path_str,
                message,
            },
            other => other,
        })
    }

    /// Parses and validates configuration from YAML text.
    pub fn from_yaml_str(content: &str) -> LaborResult<Self> {
        let config: ReportConfig =
            serde_yaml::from_str(content).map_err(|e| LaborError::ConfigParseError {
                path: "<inline>".to_string(),
                message: e.to_string(),
            })?;

        Self::validate(&config)?;
        Ok(Self { config })
    }

    /// Checks that a configuration describes a renderable layout.
    ///
    /// The first four columns are the detail columns and carry no task; every
    /// later column is a summary column mapped to a distinct task name.
    pub fn validate(config: &ReportConfig) -> LaborResult<()> {
        if config.columns.len() < DETAIL_COLUMN_COUNT {
            return Err(LaborError::InvalidConfig {
                message: format!(
                    "expected at least {} columns, found {}",
                    DETAIL_COLUMN_COUNT,
                    config.columns.len()
                ),
            });
        }

        if let Some(column) = config.columns[..DETAIL_COLUMN_COUNT]
            .iter()
            .find(|column| column.task.is_some())
        {
            return Err(LaborError::InvalidConfig {
                message: format!("detail column '{}' must not map a task", column.title),
            });
        }

        let mut seen = HashSet::new();
        for column in &config.columns[DETAIL_COLUMN_COUNT..] {
            let task = column.task.as_deref().ok_or_else(|| LaborError::InvalidConfig {
                message: format!("summary column '{}' has no task", column.title),
            })?;
            if !seen.insert(task) {
                return Err(LaborError::InvalidConfig {
                    message: format!("task '{}' is mapped to more than one column", task),
                });
            }
        }

        if config.columns.iter().any(|column| column.width <= 0.0) {
            return Err(LaborError::InvalidConfig {
                message: "column widths must be positive".to_string(),
            });
        }

        Ok(())
    }

    /// Returns the underlying report configuration.
    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> ReportConfig {
        self.config
    }
}
