// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Kernel-backed dataplane.
//!
//! Each routing domain becomes a VRF master device (`vrf<id>`) bound to the
//! routing table with the same id; binding an interface enslaves its link to
//! that master. Handles built over the same [`KernelTables`] share state the
//! way processes share one kernel.

mod command;
mod kernel;

use std::sync::Arc;

use async_trait::async_trait;

use crate::backends::run_operation;
use crate::errors::DataplaneResult;
use crate::model::{DataplaneSnapshot, NetworkInterfaceConfig};
use crate::observability::messages::dataplane::{
    InterfaceAdded, InterfaceRemoved, VrfCreated, VrfDeleted,
};
use crate::observability::messages::StructuredLog;
use crate::traits::Dataplane;

pub use command::{vrf_device_name, LinkCommand};
pub use kernel::KernelTables;

pub const KIND: &str = "linux";
const LABEL: &str = "Linux";

pub struct LinuxDataplane {
    kernel: Arc<KernelTables>,
}

impl LinuxDataplane {
    /// A dataplane over its own, private kernel tables.
    pub fn new() -> Self {
        Self::with_kernel(Arc::new(KernelTables::new()))
    }

    /// A dataplane sharing `kernel` with every other handle built from it.
    pub fn with_kernel(kernel: Arc<KernelTables>) -> Self {
        Self { kernel }
    }

    pub fn kernel(&self) -> &Arc<KernelTables> {
        &self.kernel
    }
}

impl Default for LinuxDataplane {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Dataplane for LinuxDataplane {
    async fn create_vrf(&self, name: &str, vrf_id: u16) -> DataplaneResult<()> {
        run_operation(LABEL, "CreateVrf", vrf_id, async {
            self.kernel.create_vrf(name, vrf_id)?;
            VrfCreated { backend: LABEL, name, vrf_id }.log();
            Ok(())
        })
        .await
    }

    async fn delete_vrf(&self, vrf_id: u16) -> DataplaneResult<()> {
        run_operation(LABEL, "DeleteVrf", vrf_id, async {
            let detached = self.kernel.delete_vrf(vrf_id).await?;
            VrfDeleted { backend: LABEL, vrf_id, detached }.log();
            Ok(())
        })
        .await
    }

    async fn add_vrf_interface(&self, vrf_id: u16, netif: NetworkInterfaceConfig) -> DataplaneResult<()> {
        run_operation(LABEL, "AddVrfInterface", vrf_id, async {
            let msg_netif = netif.clone();
            self.kernel.enslave(vrf_id, netif).await?;
            InterfaceAdded { backend: LABEL, vrf_id, netif: &msg_netif }.log();
            Ok(())
        })
        .await
    }

    async fn remove_vrf_interface(&self, vrf_id: u16, if_id: u16) -> DataplaneResult<()> {
        run_operation(LABEL, "RemoveVrfInterface", vrf_id, async {
            self.kernel.release(vrf_id, if_id).await?;
            InterfaceRemoved { backend: LABEL, vrf_id, if_id }.log();
            Ok(())
        })
        .await
    }

    fn kind(&self) -> &'static str {
        KIND
    }

    async fn snapshot(&self) -> DataplaneSnapshot {
        DataplaneSnapshot {
            backend: KIND.to_string(),
            vrfs: self.kernel.dump().await,
        }
    }
}
