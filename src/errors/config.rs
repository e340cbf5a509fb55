// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading or validating a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("Failed to read config '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML decoding failed.
    #[error("Failed to parse YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// TOML decoding failed.
    #[error("Failed to parse TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    /// Two networks claim the same VRF id.
    #[error("VRF id {vrf_id} is used by both '{first}' and '{second}'")]
    DuplicateVrfId {
        vrf_id: u16,
        first: String,
        second: String,
    },

    /// Two interfaces of one network share an interface id.
    #[error("Network '{network}': interface id {if_id} is used by both '{first}' and '{second}'")]
    DuplicateInterfaceId {
        network: String,
        if_id: u16,
        first: String,
        second: String,
    },

    /// An interface name appears in more than one network.
    #[error("Interface '{interface}' is declared in both '{first}' and '{second}'")]
    DuplicateInterfaceName {
        interface: String,
        first: String,
        second: String,
    },

    /// The configured dataplane type is not registered.
    #[error("Unknown dataplane type '{dataplane}'. Available: {}", .available.join(", "))]
    UnknownDataplane {
        dataplane: String,
        available: Vec<String>,
    },

    /// Every validation failure found in one pass.
    #[error("Configuration validation failed:\n{}", join_errors(.0))]
    Invalid(Vec<ConfigError>),
}

fn join_errors(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
