// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod backends;   // dataplane backends
pub mod config;     // config loading + provisioning
pub mod errors;     // error handling
pub mod model;      // values crossing the dataplane interface
pub mod observability;
pub mod registry;   // type name -> backend constructor
pub mod traits;     // the Dataplane abstraction
