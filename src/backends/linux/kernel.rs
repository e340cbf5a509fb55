// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! In-memory model of the kernel's VRF devices and enslaved links.
//!
//! One `KernelTables` stands in for one network namespace: every
//! [`super::LinuxDataplane`] holding the same `Arc<KernelTables>` sees the
//! same state, exactly like two processes talking netlink to one kernel.
//!
//! Locking:
//! * `vrfs` guards membership of the VRF map and is only held briefly.
//! * Each VRF device has its own async mutex; interface changes and
//!   deletion of that VRF are serialized on it.
//! * `links` indexes link names across all VRFs and is taken only while
//!   the owning VRF's mutex is held.
//!
//! A deleted device is tombstoned before it leaves the map, so a caller that
//! was queued on its mutex observes `NotFound` instead of mutating a dead
//! domain.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::Mutex as AsyncMutex;

use super::command::{vrf_device_name, LinkCommand};
use crate::errors::{DataplaneError, DataplaneResult, Resource};
use crate::model::{InterfaceSnapshot, NetworkInterfaceConfig, VrfSnapshot};

#[derive(Debug)]
struct VrfDevice {
    name: String,
    device: String,
    table: u32,
    links: BTreeMap<u16, NetworkInterfaceConfig>,
    deleted: bool,
}

#[derive(Debug, Default)]
pub struct KernelTables {
    vrfs: Mutex<HashMap<u16, Arc<AsyncMutex<VrfDevice>>>>,
    // link name -> (vrf_id, if_id)
    links: Mutex<HashMap<String, (u16, u16)>>,
}

impl KernelTables {
    pub fn new() -> Self {
        Self::default()
    }

    fn vrfs(&self) -> MutexGuard<'_, HashMap<u16, Arc<AsyncMutex<VrfDevice>>>> {
        // a panic while holding the lock cannot leave the map half-updated
        self.vrfs.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn links(&self) -> MutexGuard<'_, HashMap<String, (u16, u16)>> {
        self.links.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn device(&self, vrf_id: u16) -> DataplaneResult<Arc<AsyncMutex<VrfDevice>>> {
        self.vrfs()
            .get(&vrf_id)
            .cloned()
            .ok_or(DataplaneError::NotFound(Resource::Vrf(vrf_id)))
    }

    pub fn create_vrf(&self, name: &str, vrf_id: u16) -> DataplaneResult<()> {
        let mut vrfs = self.vrfs();
        if vrfs.contains_key(&vrf_id) {
            return Err(DataplaneError::DuplicateResource(Resource::Vrf(vrf_id)));
        }

        let device = vrf_device_name(vrf_id);
        let table = u32::from(vrf_id);
        LinkCommand::AddVrf { device: &device, table }.log();

        vrfs.insert(
            vrf_id,
            Arc::new(AsyncMutex::new(VrfDevice {
                name: name.to_string(),
                device,
                table,
                links: BTreeMap::new(),
                deleted: false,
            })),
        );
        Ok(())
    }

    /// Returns the number of links that were still enslaved.
    pub async fn delete_vrf(&self, vrf_id: u16) -> DataplaneResult<usize> {
        let handle = self.device(vrf_id)?;
        let mut device = handle.lock().await;
        if device.deleted {
            return Err(DataplaneError::NotFound(Resource::Vrf(vrf_id)));
        }

        let detached = device.links.len();
        {
            let mut links = self.links();
            for link in device.links.values() {
                LinkCommand::NoMaster { link: &link.name }.log();
                links.remove(&link.name);
            }
        }
        device.links.clear();
        device.deleted = true;
        LinkCommand::DelLink { device: &device.device }.log();

        let mut vrfs = self.vrfs();
        if vrfs.get(&vrf_id).is_some_and(|current| Arc::ptr_eq(current, &handle)) {
            vrfs.remove(&vrf_id);
        }

        Ok(detached)
    }

    pub async fn enslave(&self, vrf_id: u16, netif: NetworkInterfaceConfig) -> DataplaneResult<()> {
        let handle = self.device(vrf_id)?;
        let mut device = handle.lock().await;
        if device.deleted {
            return Err(DataplaneError::NotFound(Resource::Vrf(vrf_id)));
        }
        if device.links.contains_key(&netif.id) {
            return Err(DataplaneError::DuplicateResource(Resource::Interface {
                vrf_id,
                if_id: netif.id,
            }));
        }

        {
            let mut links = self.links();
            if links.contains_key(&netif.name) {
                return Err(DataplaneError::DuplicateResource(Resource::InterfaceName(
                    netif.name.clone(),
                )));
            }
            links.insert(netif.name.clone(), (vrf_id, netif.id));
        }

        LinkCommand::SetMaster { link: &netif.name, master: &device.device }.log();
        device.links.insert(netif.id, netif);
        Ok(())
    }

    pub async fn release(&self, vrf_id: u16, if_id: u16) -> DataplaneResult<()> {
        let handle = self.device(vrf_id)?;
        let mut device = handle.lock().await;
        if device.deleted {
            return Err(DataplaneError::NotFound(Resource::Vrf(vrf_id)));
        }

        let link = device
            .links
            .remove(&if_id)
            .ok_or(DataplaneError::NotFound(Resource::Interface { vrf_id, if_id }))?;
        self.links().remove(&link.name);
        LinkCommand::NoMaster { link: &link.name }.log();
        Ok(())
    }

    pub async fn dump(&self) -> BTreeMap<u16, VrfSnapshot> {
        let handles: Vec<(u16, Arc<AsyncMutex<VrfDevice>>)> = self
            .vrfs()
            .iter()
            .map(|(vrf_id, handle)| (*vrf_id, Arc::clone(handle)))
            .collect();

        let mut vrfs = BTreeMap::new();
        for (vrf_id, handle) in handles {
            let device = handle.lock().await;
            if device.deleted {
                continue;
            }
            let interfaces = device
                .links
                .iter()
                .map(|(if_id, link)| {
                    (
                        *if_id,
                        InterfaceSnapshot {
                            name: link.name.clone(),
                            interface_type: link.interface_type.clone(),
                        },
                    )
                })
                .collect();
            vrfs.insert(
                vrf_id,
                VrfSnapshot {
                    name: device.name.clone(),
                    interfaces,
                },
            );
        }
        vrfs
    }

    /// Routing table backing a VRF, if it exists.
    pub async fn table_of(&self, vrf_id: u16) -> Option<u32> {
        let handle = self.device(vrf_id).ok()?;
        let device = handle.lock().await;
        (!device.deleted).then_some(device.table)
    }
}
