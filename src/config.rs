//! Filter configuration
//!
//! Loads filter settings from TOML files.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{FilterError, Result};
use crate::filter::predicate::{DecodeSupport, KeySystemSupport, PredicateChain, Restrictions};

/// How cross-period codec compatibility is enforced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompatibilityMode {
    /// Each period must be reachable from the previous one
    #[default]
    Rolling,
    /// A single codec identity must be valid across the whole timeline
    Common,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodeSettings {
    /// Decodable types as "<mime>;<codec base>", or a bare mime type
    pub supported: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrmSettings {
    /// Key systems available on this platform
    pub key_systems: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

/// Configuration file format
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterConfig {
    #[serde(default)]
    pub mode: CompatibilityMode,
    #[serde(default)]
    pub restrictions: Restrictions,
    /// Decode support check; skipped when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decode: Option<DecodeSettings>,
    /// Key system check; skipped when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drm: Option<DrmSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingSettings>,
}

impl FilterConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: FilterConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), content)?;
        Ok(())
    }

    /// Generate a default configuration with every check enabled
    pub fn default_config() -> Self {
        Self {
            mode: CompatibilityMode::Rolling,
            restrictions: Restrictions::default(),
            decode: Some(DecodeSettings {
                supported: vec![
                    "video/mp4;avc1".to_string(),
                    "video/mp4;hvc1".to_string(),
                    "audio/mp4;mp4a".to_string(),
                    "audio/mp4;ac-3".to_string(),
                    "audio/mp4;ec-3".to_string(),
                ],
            }),
            drm: Some(DrmSettings {
                key_systems: vec!["org.w3.clearkey".to_string()],
            }),
            logging: Some(LoggingSettings {
                level: "info".to_string(),
            }),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.restrictions.is_consistent() {
            return Err(FilterError::Config(
                "restriction minimum exceeds its maximum".to_string(),
            ));
        }
        Ok(())
    }

    /// Log level, defaulting to "info"
    pub fn log_level(&self) -> &str {
        self.logging
            .as_ref()
            .map(|l| l.level.as_str())
            .unwrap_or("info")
    }

    /// Build the per-variant checks described by this configuration
    pub fn predicate_chain(&self) -> PredicateChain {
        let mut chain = PredicateChain::new();
        if !self.restrictions.is_unrestricted() {
            chain = chain.with(self.restrictions.clone());
        }
        if let Some(decode) = &self.decode {
            chain = chain.with(DecodeSupport::new(decode.supported.iter().cloned()));
        }
        if let Some(drm) = &self.drm {
            chain = chain.with(KeySystemSupport::new(drm.key_systems.iter().cloned()));
        }
        chain
    }
}

/// Generate default configuration file at the specified path
pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
    FilterConfig::default_config().to_file(path)
}
