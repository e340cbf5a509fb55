// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod loader;
mod provisioner;
mod validation;

#[cfg(test)]
mod integration_tests;
pub mod consts;

pub use loader::{
    load_and_validate_config, load_and_validate_config_with_dataplane, load_config, BackendOptions,
    Config, InterfaceConfig, NetworkConfig,
};
pub use provisioner::{ProvisionReport, Provisioner};
pub use validation::validate_config;
