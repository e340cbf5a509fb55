// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Value types passed across the dataplane capability interface.

mod netif;
mod snapshot;

pub use netif::{InterfaceType, NetworkInterfaceConfig};
pub use snapshot::{DataplaneSnapshot, InterfaceSnapshot, VrfSnapshot};
