// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::{
    DEFAULT_API_TIMEOUT_MS, DEFAULT_DATAPLANE, DEFAULT_LOG_LEVEL, DEFAULT_RETRY_ATTEMPTS,
    DEFAULT_RETRY_BACKOFF_MS, MAX_RETRY_ATTEMPTS, MAX_RETRY_BACKOFF_MS,
};
use crate::errors::ConfigError;
use crate::model::{InterfaceType, NetworkInterfaceConfig};
use crate::observability::messages::config::{ConfigLoaded, ConfigValidationFailed};
use crate::observability::messages::StructuredLog;
use crate::registry::{DataplaneFactory, DataplaneRegistry};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Top-level configuration for a vrfplane run.
///
/// Names the dataplane backend to drive and the networks (routing domains)
/// to provision on it. Loaded from YAML, or from TOML when the file has a
/// `.toml` extension.
///
/// # Fields
/// * `dataplane` - Registry identifier of the backend (defaults to `linux`)
/// * `log_level` - Default log filter for the binary (defaults to `info`)
/// * `verbose` - Shorthand for `log_level: debug`
/// * `backend_options` - Timeout and retry settings for backend control calls
/// * `networks` - Routing domains keyed by network name
///
/// # Example
/// ```yaml
/// dataplane: vpp
/// log_level: info
/// backend_options:
///   timeout_ms: 2000
///   retry_attempts: 3
/// networks:
///   blue:
///     vrf_id: 1
///     interfaces:
///       xfrm10:
///         id: 10
///         type: ipip_tunnel
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_dataplane")]
    pub dataplane: String,
    #[serde(default = "default_log_level", alias = "loglevel")]
    pub log_level: String,
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub backend_options: BackendOptions,
    #[serde(default)]
    pub networks: BTreeMap<String, NetworkConfig>,
}

fn default_dataplane() -> String {
    DEFAULT_DATAPLANE.to_string()
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Config {
    /// Log filter the binary should start with when the CLI does not override it.
    pub fn effective_log_level(&self) -> &str {
        if self.verbose {
            "debug"
        } else {
            &self.log_level
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataplane: default_dataplane(),
            log_level: default_log_level(),
            verbose: false,
            backend_options: BackendOptions::default(),
            networks: BTreeMap::new(),
        }
    }
}

/// One routing domain and the interfaces to bind into it.
#[derive(Debug, Clone, Deserialize)]
pub struct NetworkConfig {
    pub vrf_id: u16,
    #[serde(default)]
    pub interfaces: BTreeMap<String, InterfaceConfig>,
}

impl NetworkConfig {
    /// Interfaces of this network in ascending id order.
    pub fn netifs(&self) -> Vec<NetworkInterfaceConfig> {
        let mut netifs: Vec<NetworkInterfaceConfig> = self
            .interfaces
            .iter()
            .map(|(name, cfg)| NetworkInterfaceConfig {
                name: name.clone(),
                id: cfg.id,
                interface_type: cfg.interface_type.clone(),
            })
            .collect();
        netifs.sort_by_key(|netif| netif.id);
        netifs
    }
}

/// An interface entry; its name is the key it is stored under.
#[derive(Debug, Clone, Deserialize)]
pub struct InterfaceConfig {
    pub id: u16,
    #[serde(rename = "type")]
    pub interface_type: InterfaceType,
}

/// Timeout and retry settings for backend control calls.
///
/// All fields are optional; accessors fall back to the built-in defaults and
/// clamp configured values to sane bounds.
///
/// # Example
/// ```
/// use vrfplane::config::BackendOptions;
///
/// let options = BackendOptions {
///     retry_attempts: Some(50),
///     ..BackendOptions::default()
/// };
/// assert_eq!(options.get_retry_attempts(), 10); // clamped to the maximum
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BackendOptions {
    pub timeout_ms: Option<u64>,
    pub retry_attempts: Option<u32>,
    pub retry_backoff_ms: Option<u64>,
    pub max_retry_backoff_ms: Option<u64>,
}

impl BackendOptions {
    pub fn get_timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms.unwrap_or(DEFAULT_API_TIMEOUT_MS).max(1))
    }

    /// At least one attempt is always made.
    pub fn get_retry_attempts(&self) -> u32 {
        self.retry_attempts
            .unwrap_or(DEFAULT_RETRY_ATTEMPTS)
            .clamp(1, MAX_RETRY_ATTEMPTS)
    }

    pub fn get_max_retry_backoff(&self) -> Duration {
        Duration::from_millis(self.max_retry_backoff_ms.unwrap_or(MAX_RETRY_BACKOFF_MS))
    }

    pub fn get_retry_backoff(&self) -> Duration {
        let backoff = Duration::from_millis(self.retry_backoff_ms.unwrap_or(DEFAULT_RETRY_BACKOFF_MS));
        backoff.min(self.get_max_retry_backoff())
    }
}

/// Load a config from a YAML or TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let cfg: Config = match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => toml::from_str(&content)?,
        _ => serde_yaml::from_str(&content)?,
    };

    ConfigLoaded {
        path: &path.display().to_string(),
        dataplane: &cfg.dataplane,
        network_count: cfg.networks.len(),
    }
    .log();

    Ok(cfg)
}

/// Load and validate a config file
///
/// Validation checks the networks for conflicting ids and names and makes
/// sure the dataplane type is known. The process-wide registry is consulted
/// only if it is already initialised; otherwise the built-in types are used,
/// so a later [`DataplaneFactory::init`] still applies this file's
/// `backend_options`.
pub fn load_and_validate_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    load_and_validate_config_with_dataplane(path, None)
}

/// Like [`load_and_validate_config`], with `dataplane` (when given) replacing
/// the type named in the file before validation runs.
pub fn load_and_validate_config_with_dataplane<P: AsRef<Path>>(
    path: P,
    dataplane: Option<&str>,
) -> Result<Config, ConfigError> {
    let mut cfg = load_config(path)?;
    if let Some(dataplane) = dataplane {
        cfg.dataplane = dataplane.to_string();
    }

    let available =
        DataplaneFactory::installed_types().unwrap_or_else(DataplaneRegistry::builtin_types);
    if let Err(errors) = crate::config::validate_config(&cfg, &available) {
        ConfigValidationFailed {
            error_count: errors.len(),
        }
        .log();
        return Err(ConfigError::Invalid(errors));
    }

    Ok(cfg)
}
