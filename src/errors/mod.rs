// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod config;
mod dataplane;

pub use config::ConfigError;
pub use dataplane::{DataplaneError, DataplaneResult, Resource};
