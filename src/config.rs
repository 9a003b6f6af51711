use crate::error::{Error, Result};
use std::path::PathBuf;

/// Sort order for discovered status documents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl From<&str> for SortOrder {
    fn from(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "DESC" => SortOrder::Descending,
            _ => SortOrder::Ascending,
        }
    }
}

/// Configuration for the bill pipeline processor
#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    /// Congress numbers to process; empty means all
    pub congresses: Vec<String>,
    pub sort_order: SortOrder,
    pub limit: Option<usize>,
}

impl Config {
    /// Create a new default configuration
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            congresses: Vec::new(),
            sort_order: SortOrder::Ascending,
            limit: None,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !self.data_dir.exists() {
            return Err(Error::Config(format!(
                "Data directory does not exist: {}",
                self.data_dir.display()
            )));
        }

        if !self.data_dir.is_dir() {
            return Err(Error::Config(format!(
                "Data directory is not a directory: {}",
                self.data_dir.display()
            )));
        }

        for congress in &self.congresses {
            if congress.parse::<u32>().is_err() {
                return Err(Error::Config(format!(
                    "Invalid congress number: {}",
                    congress
                )));
            }
        }

        Ok(())
    }
}

/// Builder for creating configurations
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with default settings
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            config: Config::new(data_dir),
        }
    }

    /// Add a congress to process
    pub fn add_congress(mut self, congress: impl Into<String>) -> Self {
        self.config.congresses.push(congress.into());
        self
    }

    /// Set multiple congresses
    pub fn congresses(mut self, congresses: Vec<String>) -> Self {
        self.config.congresses = congresses;
        self
    }

    /// Set the sort order
    pub fn sort_order(mut self, order: SortOrder) -> Self {
        self.config.sort_order = order;
        self
    }

    /// Set sort order from string
    pub fn sort_order_str(mut self, order: &str) -> Self {
        self.config.sort_order = SortOrder::from(order);
        self
    }

    /// Set the limit
    pub fn limit(mut self, limit: usize) -> Self {
        self.config.limit = Some(limit);
        self
    }

    /// Clear the limit
    pub fn no_limit(mut self) -> Self {
        self.config.limit = None;
        self
    }

    /// Build the final configuration
    pub fn build(self) -> Result<Config> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new("data")
    }
}
