//! Configuration loaded from TOML.
//!
//! ```toml
//! [query]
//! default_limit = 300
//! max_limit = 800
//!
//! [viewport]
//! default_width = 960
//! default_height = 620
//! min_width = 600
//! min_height = 420
//! ```
//!
//! Every field is optional; an empty file yields [`GraphConfig::default`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    pub query: QueryLimits,
    pub viewport: ViewportConfig,
}

/// Window bounds applied to graph requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryLimits {
    /// Used when a request carries no usable limit.
    pub default_limit: usize,
    /// Requested limits above this are clamped down to it.
    pub max_limit: usize,
}

impl Default for QueryLimits {
    fn default() -> Self {
        Self {
            default_limit: 300,
            max_limit: 800,
        }
    }
}

/// Canvas sizing used by hosts that embed the layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub default_width: f64,
    pub default_height: f64,
    pub min_width: f64,
    pub min_height: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            default_width: 960.0,
            default_height: 620.0,
            min_width: 600.0,
            min_height: 420.0,
        }
    }
}

impl GraphConfig {
    /// Load and validate configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&contents)?;
        tracing::info!(path = %path.display(), "loaded graph configuration");
        Ok(config)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: GraphConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let q = &self.query;
        if q.default_limit == 0 {
            return Err(Error::Config("query.default_limit must be at least 1".into()));
        }
        if q.max_limit < q.default_limit {
            return Err(Error::Config(format!(
                "query.max_limit ({}) is below query.default_limit ({})",
                q.max_limit, q.default_limit
            )));
        }

        let v = &self.viewport;
        if v.default_width < v.min_width || v.default_height < v.min_height {
            return Err(Error::Config(format!(
                "viewport default {}x{} is below the minimum {}x{}",
                v.default_width, v.default_height, v.min_width, v.min_height
            )));
        }
        Ok(())
    }
}
