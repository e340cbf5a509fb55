// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Packet-processing-engine dataplane.
//!
//! Routing domains map onto FIB tables and interface bindings onto
//! `sw_interface_set_table` requests. Every request travels through a
//! [`VppApiClient`], is bounded by the configured timeout, and is retried
//! with backoff when the transport fails. Rejections from the API itself are
//! final and map straight onto [`DataplaneError`] variants.

pub mod api;
pub mod client;

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::backends::retry::RetryPolicy;
use crate::backends::run_operation;
use crate::errors::{DataplaneError, DataplaneResult, Resource};
use crate::model::{DataplaneSnapshot, InterfaceSnapshot, NetworkInterfaceConfig, VrfSnapshot};
use crate::observability::messages::dataplane::{
    InterfaceAdded, InterfaceRemoved, VrfCreated, VrfDeleted,
};
use crate::observability::messages::StructuredLog;
use crate::traits::Dataplane;

pub use api::{ApiRetval, FibTableDetails, TransportError, VppApiMessage, VppApiReply};
pub use client::{InProcessVppApi, VppApiClient};

pub const KIND: &str = "vpp";
const LABEL: &str = "VPP";

pub struct VppDataplane {
    client: Arc<dyn VppApiClient>,
    retry: RetryPolicy,
}

impl VppDataplane {
    /// A dataplane talking to a fresh in-process API endpoint.
    pub fn new(retry: RetryPolicy) -> Self {
        Self::with_client(Arc::new(InProcessVppApi::new()), retry)
    }

    pub fn with_client(client: Arc<dyn VppApiClient>, retry: RetryPolicy) -> Self {
        Self { client, retry }
    }

    async fn send(&self, msg: VppApiMessage) -> DataplaneResult<VppApiReply> {
        let name = msg.name();
        self.retry
            .run(KIND, name, || self.client.call(msg.clone()))
            .await
    }

    fn unexpected(msg: &str, reply: VppApiReply) -> DataplaneError {
        DataplaneError::BackendUnavailable {
            backend: KIND,
            reason: format!("unexpected reply to {}: {:?}", msg, reply),
        }
    }
}

#[async_trait]
impl Dataplane for VppDataplane {
    async fn create_vrf(&self, name: &str, vrf_id: u16) -> DataplaneResult<()> {
        run_operation(LABEL, "CreateVrf", vrf_id, async {
            let msg = VppApiMessage::IpTableAddDel {
                table_id: vrf_id,
                name: name.to_string(),
                is_add: true,
            };
            match self.send(msg).await? {
                VppApiReply::Ok => {}
                VppApiReply::Rejected(ApiRetval::TableExists) => {
                    return Err(DataplaneError::DuplicateResource(Resource::Vrf(vrf_id)))
                }
                reply => return Err(Self::unexpected("ip_table_add", reply)),
            }

            VrfCreated { backend: LABEL, name, vrf_id }.log();
            Ok(())
        })
        .await
    }

    async fn delete_vrf(&self, vrf_id: u16) -> DataplaneResult<()> {
        run_operation(LABEL, "DeleteVrf", vrf_id, async {
            let msg = VppApiMessage::IpTableAddDel {
                table_id: vrf_id,
                name: String::new(),
                is_add: false,
            };
            let detached = match self.send(msg).await? {
                VppApiReply::TableDeleted { detached } => detached,
                VppApiReply::Rejected(ApiRetval::NoSuchTable) => {
                    return Err(DataplaneError::NotFound(Resource::Vrf(vrf_id)))
                }
                reply => return Err(Self::unexpected("ip_table_del", reply)),
            };

            VrfDeleted { backend: LABEL, vrf_id, detached }.log();
            Ok(())
        })
        .await
    }

    async fn add_vrf_interface(&self, vrf_id: u16, netif: NetworkInterfaceConfig) -> DataplaneResult<()> {
        run_operation(LABEL, "AddVrfInterface", vrf_id, async {
            match self.send(VppApiMessage::set_table(vrf_id, &netif)).await? {
                VppApiReply::Ok => {}
                VppApiReply::Rejected(ApiRetval::NoSuchTable) => {
                    return Err(DataplaneError::NotFound(Resource::Vrf(vrf_id)))
                }
                VppApiReply::Rejected(ApiRetval::EntryExists) => {
                    return Err(DataplaneError::DuplicateResource(Resource::Interface {
                        vrf_id,
                        if_id: netif.id,
                    }))
                }
                reply => return Err(Self::unexpected("sw_interface_set_table", reply)),
            }

            InterfaceAdded { backend: LABEL, vrf_id, netif: &netif }.log();
            Ok(())
        })
        .await
    }

    async fn remove_vrf_interface(&self, vrf_id: u16, if_id: u16) -> DataplaneResult<()> {
        run_operation(LABEL, "RemoveVrfInterface", vrf_id, async {
            let msg = VppApiMessage::SwInterfaceResetTable {
                table_id: vrf_id,
                sw_if_index: if_id,
            };
            match self.send(msg).await? {
                VppApiReply::Ok => {}
                VppApiReply::Rejected(ApiRetval::NoSuchTable) => {
                    return Err(DataplaneError::NotFound(Resource::Vrf(vrf_id)))
                }
                VppApiReply::Rejected(ApiRetval::NoSuchEntry) => {
                    return Err(DataplaneError::NotFound(Resource::Interface { vrf_id, if_id }))
                }
                reply => return Err(Self::unexpected("sw_interface_reset_table", reply)),
            }

            InterfaceRemoved { backend: LABEL, vrf_id, if_id }.log();
            Ok(())
        })
        .await
    }

    fn kind(&self) -> &'static str {
        KIND
    }

    async fn snapshot(&self) -> DataplaneSnapshot {
        let tables = match self.send(VppApiMessage::IpTableDump).await {
            Ok(VppApiReply::Tables(tables)) => tables,
            Ok(reply) => {
                tracing::warn!(?reply, "[VPP] unexpected reply to ip_table_dump");
                return DataplaneSnapshot::empty(KIND);
            }
            Err(e) => {
                tracing::warn!(error = %e, "[VPP] ip_table_dump failed");
                return DataplaneSnapshot::empty(KIND);
            }
        };

        let vrfs: BTreeMap<u16, VrfSnapshot> = tables
            .into_iter()
            .map(|table| {
                let interfaces = table
                    .interfaces
                    .into_iter()
                    .map(|netif| {
                        (
                            netif.id,
                            InterfaceSnapshot {
                                name: netif.name,
                                interface_type: netif.interface_type,
                            },
                        )
                    })
                    .collect();
                (
                    table.table_id,
                    VrfSnapshot {
                        name: table.name,
                        interfaces,
                    },
                )
            })
            .collect();

        DataplaneSnapshot {
            backend: KIND.to_string(),
            vrfs,
        }
    }
}
