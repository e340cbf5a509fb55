// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::backends::run_operation;
use crate::errors::DataplaneResult;
use crate::model::{DataplaneSnapshot, NetworkInterfaceConfig};
use crate::observability::messages::dataplane::{
    InterfaceAdded, InterfaceRemoved, VrfCreated, VrfDeleted,
};
use crate::observability::messages::StructuredLog;
use crate::traits::Dataplane;

pub const KIND: &str = "dry_run";
const LABEL: &str = "DryRun";

/// A dataplane that only logs.
///
/// Holds no state and accepts every call, so it never reports duplicate or
/// missing resources. Useful for rehearsing a config before pointing it at
/// a real backend.
#[derive(Debug, Default)]
pub struct DryRunDataplane;

impl DryRunDataplane {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Dataplane for DryRunDataplane {
    async fn create_vrf(&self, name: &str, vrf_id: u16) -> DataplaneResult<()> {
        run_operation(LABEL, "CreateVrf", vrf_id, async {
            VrfCreated { backend: LABEL, name, vrf_id }.log();
            Ok(())
        })
        .await
    }

    async fn delete_vrf(&self, vrf_id: u16) -> DataplaneResult<()> {
        run_operation(LABEL, "DeleteVrf", vrf_id, async {
            VrfDeleted { backend: LABEL, vrf_id, detached: 0 }.log();
            Ok(())
        })
        .await
    }

    async fn add_vrf_interface(&self, vrf_id: u16, netif: NetworkInterfaceConfig) -> DataplaneResult<()> {
        run_operation(LABEL, "AddVrfInterface", vrf_id, async {
            InterfaceAdded { backend: LABEL, vrf_id, netif: &netif }.log();
            Ok(())
        })
        .await
    }

    async fn remove_vrf_interface(&self, vrf_id: u16, if_id: u16) -> DataplaneResult<()> {
        run_operation(LABEL, "RemoveVrfInterface", vrf_id, async {
            InterfaceRemoved { backend: LABEL, vrf_id, if_id }.log();
            Ok(())
        })
        .await
    }

    fn kind(&self) -> &'static str {
        KIND
    }

    async fn snapshot(&self) -> DataplaneSnapshot {
        DataplaneSnapshot::empty(KIND)
    }
}
