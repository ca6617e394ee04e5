//! Engine configuration
//!
//! Configuration is read from TOML or from `DHSECRET_*` environment
//! variables. Every field has a default, so an empty document is valid.

use core::fmt;
use core::str::FromStr;

use dhsecret_api::{Error, Result};
use dhsecret_backend::BackendKind;
use serde::{Deserialize, Serialize};

/// Environment variable selecting the backend
pub const ENV_BACKEND: &str = "DHSECRET_BACKEND";
/// Environment variable selecting the [`LengthPolicy`]
pub const ENV_LENGTH_POLICY: &str = "DHSECRET_LENGTH_POLICY";
/// Environment variable toggling pad-byte verification
pub const ENV_VERIFY_PAD_BYTE: &str = "DHSECRET_VERIFY_PAD_BYTE";

/// Serialized lengths accepted by the secret normalizer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LengthPolicy {
    /// Only `cs` or `cs + 1` bytes
    Strict,
    /// Also accept shorter values and left-pad them to `cs` bytes
    #[default]
    PadShort,
}

impl LengthPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            LengthPolicy::Strict => "strict",
            LengthPolicy::PadShort => "pad-short",
        }
    }
}

impl fmt::Display for LengthPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LengthPolicy {
    type Err = String;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(LengthPolicy::Strict),
            "pad-short" | "pad_short" => Ok(LengthPolicy::PadShort),
            other => Err(format!("unknown length policy '{}'", other)),
        }
    }
}

/// Settings of an [`Engine`](crate::Engine)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Backend to load at initialization
    pub backend: BackendKind,
    /// Serialized lengths the normalizer accepts
    pub length_policy: LengthPolicy,
    /// Require the byte stripped from a `cs + 1` serialization to be zero
    pub verify_pad_byte: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            length_policy: LengthPolicy::default(),
            verify_pad_byte: true,
        }
    }
}

fn config_error(context: &'static str, message: impl Into<String>) -> Error {
    Error::Config {
        context,
        message: message.into(),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl EngineConfig {
    /// Parse a TOML document
    pub fn from_toml_str(document: &str) -> Result<Self> {
        toml::from_str(document).map_err(|e| config_error("EngineConfig::from_toml_str", e.to_string()))
    }

    /// Render as a TOML document
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| config_error("EngineConfig::to_toml_string", e.to_string()))
    }

    /// Read the `DHSECRET_*` environment variables over the defaults
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_BACKEND) {
            config.backend = value
                .parse()
                .map_err(|e: String| config_error(ENV_BACKEND, e))?;
        }
        if let Some(value) = lookup(ENV_LENGTH_POLICY) {
            config.length_policy = value
                .parse()
                .map_err(|e: String| config_error(ENV_LENGTH_POLICY, e))?;
        }
        if let Some(value) = lookup(ENV_VERIFY_PAD_BYTE) {
            config.verify_pad_byte = parse_bool(&value).ok_or_else(|| {
                config_error(ENV_VERIFY_PAD_BYTE, format!("expected a boolean, got '{}'", value))
            })?;
        }

        tracing::debug!(
            backend = %config.backend,
            length_policy = %config.length_policy,
            verify_pad_byte = config.verify_pad_byte,
            "loaded engine configuration from environment"
        );
        Ok(config)
    }
}
