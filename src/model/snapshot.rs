// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::model::InterfaceType;
use serde::Serialize;
use std::collections::BTreeMap;

/// Point-in-time view of a backend's routing domains.
///
/// Maps are ordered so two snapshots of the same state compare and serialize
/// identically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DataplaneSnapshot {
    pub backend: String,
    pub vrfs: BTreeMap<u16, VrfSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VrfSnapshot {
    pub name: String,
    pub interfaces: BTreeMap<u16, InterfaceSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterfaceSnapshot {
    pub name: String,
    #[serde(rename = "type")]
    pub interface_type: InterfaceType,
}

impl DataplaneSnapshot {
    pub fn empty(backend: impl Into<String>) -> Self {
        Self {
            backend: backend.into(),
            vrfs: BTreeMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.vrfs.is_empty()
    }

    pub fn interface_count(&self) -> usize {
        self.vrfs.values().map(|vrf| vrf.interfaces.len()).sum()
    }
}
