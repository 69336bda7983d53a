//! Window configuration loading
//!
//! A [`LimitConfig`] can come from YAML or JSON text, a file, or a pair of query parameters
//! (`?offset=50&limit=25` style).

use crate::error::{Error, Result};
use crate::limit::LimitConfig;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Default query parameter name for the number of items to skip
pub const DEFAULT_SKIP_PARAM: &str = "offset";

/// Default query parameter name for the max number of items
pub const DEFAULT_LIMIT_PARAM: &str = "limit";

/// Load a window config from a YAML or JSON file
pub fn load_limit_config(path: impl AsRef<Path>) -> Result<LimitConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::file_not_found(path.display().to_string())
        } else {
            Error::config(format!(
                "Failed to read window config '{}': {}",
                path.display(),
                e
            ))
        }
    })?;
    load_limit_config_from_str(&content)
}

/// Load a window config from a YAML string (JSON is accepted too)
pub fn load_limit_config_from_str(yaml: &str) -> Result<LimitConfig> {
    if yaml.trim().is_empty() {
        return Ok(LimitConfig::default());
    }
    let config: LimitConfig = serde_yaml::from_str(yaml)?;
    tracing::debug!("Loaded window config: {}", config);
    Ok(config)
}

impl LimitConfig {
    /// Read a window config from query parameters.
    ///
    /// Missing parameters fall back to the defaults (no skip, no limit). Values which are not
    /// integers are rejected.
    pub fn from_params(
        params: &HashMap<String, String>,
        skip_param: &str,
        limit_param: &str,
    ) -> Result<Self> {
        let skip = parse_param(params, skip_param)?.unwrap_or(0);
        let limit = parse_param(params, limit_param)?;
        Ok(Self::new(skip, limit))
    }

    /// Render the window as query parameters, omitting the limit when there is none
    pub fn to_params(&self, skip_param: &str, limit_param: &str) -> HashMap<String, String> {
        let mut params = HashMap::new();
        params.insert(skip_param.to_string(), self.skip.max(0).to_string());
        if let Some(limit) = self.limit.filter(|limit| *limit > 0) {
            params.insert(limit_param.to_string(), limit.to_string());
        }
        params
    }
}

fn parse_param(params: &HashMap<String, String>, name: &str) -> Result<Option<i64>> {
    let Some(raw) = params.get(name) else {
        return Ok(None);
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<i64>()
        .map(Some)
        .map_err(|e| Error::invalid_param(name, raw, e.to_string()))
}
