// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::api::{ApiRetval, FibTableDetails, TransportError, VppApiMessage, VppApiReply};
use crate::model::NetworkInterfaceConfig;

/// Transport for control-API requests.
#[async_trait]
pub trait VppApiClient: Send + Sync {
    async fn call(&self, msg: VppApiMessage) -> Result<VppApiReply, TransportError>;
}

#[derive(Debug)]
struct FibTable {
    name: String,
    interfaces: BTreeMap<u16, NetworkInterfaceConfig>,
}

/// An API endpoint living in this process.
///
/// Requests are applied one at a time under a single lock, the same
/// single-writer discipline the engine's main thread imposes on API calls.
#[derive(Debug, Default)]
pub struct InProcessVppApi {
    tables: Mutex<BTreeMap<u16, FibTable>>,
}

impl InProcessVppApi {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VppApiClient for InProcessVppApi {
    async fn call(&self, msg: VppApiMessage) -> Result<VppApiReply, TransportError> {
        let mut tables = self.tables.lock().await;

        let reply = match msg {
            VppApiMessage::IpTableAddDel { table_id, name, is_add: true } => {
                if tables.contains_key(&table_id) {
                    VppApiReply::Rejected(ApiRetval::TableExists)
                } else {
                    tables.insert(
                        table_id,
                        FibTable {
                            name,
                            interfaces: BTreeMap::new(),
                        },
                    );
                    VppApiReply::Ok
                }
            }
            VppApiMessage::IpTableAddDel { table_id, is_add: false, .. } => {
                match tables.remove(&table_id) {
                    Some(table) => VppApiReply::TableDeleted {
                        detached: table.interfaces.len(),
                    },
                    None => VppApiReply::Rejected(ApiRetval::NoSuchTable),
                }
            }
            VppApiMessage::SwInterfaceSetTable {
                table_id,
                sw_if_index,
                if_name,
                if_type,
            } => match tables.get_mut(&table_id) {
                None => VppApiReply::Rejected(ApiRetval::NoSuchTable),
                Some(table) if table.interfaces.contains_key(&sw_if_index) => {
                    VppApiReply::Rejected(ApiRetval::EntryExists)
                }
                Some(table) => {
                    table.interfaces.insert(
                        sw_if_index,
                        NetworkInterfaceConfig {
                            name: if_name,
                            id: sw_if_index,
                            interface_type: if_type,
                        },
                    );
                    VppApiReply::Ok
                }
            },
            VppApiMessage::SwInterfaceResetTable { table_id, sw_if_index } => {
                match tables.get_mut(&table_id) {
                    None => VppApiReply::Rejected(ApiRetval::NoSuchTable),
                    Some(table) => match table.interfaces.remove(&sw_if_index) {
                        Some(_) => VppApiReply::Ok,
                        None => VppApiReply::Rejected(ApiRetval::NoSuchEntry),
                    },
                }
            }
            VppApiMessage::IpTableDump => VppApiReply::Tables(
                tables
                    .iter()
                    .map(|(table_id, table)| FibTableDetails {
                        table_id: *table_id,
                        name: table.name.clone(),
                        interfaces: table.interfaces.values().cloned().collect(),
                    })
                    .collect(),
            ),
        };

        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_endpoint_retvals() {
        let api = InProcessVppApi::new();
        let add = VppApiMessage::IpTableAddDel {
            table_id: 1,
            name: "blue".to_string(),
            is_add: true,
        };

        assert_eq!(api.call(add.clone()).await, Ok(VppApiReply::Ok));
        assert_eq!(
            api.call(add).await,
            Ok(VppApiReply::Rejected(ApiRetval::TableExists))
        );

        let netif = NetworkInterfaceConfig::new("xfrm10", 10, "ipip_tunnel");
        assert_eq!(
            api.call(VppApiMessage::set_table(2, &netif)).await,
            Ok(VppApiReply::Rejected(ApiRetval::NoSuchTable))
        );
        assert_eq!(api.call(VppApiMessage::set_table(1, &netif)).await, Ok(VppApiReply::Ok));

        match api.call(VppApiMessage::IpTableDump).await {
            Ok(VppApiReply::Tables(tables)) => {
                assert_eq!(tables.len(), 1);
                assert_eq!(tables[0].name, "blue");
                assert_eq!(tables[0].interfaces, vec![netif]);
            }
            other => panic!("Expected table dump, got {:?}", other),
        }

        assert_eq!(
            api.call(VppApiMessage::IpTableAddDel {
                table_id: 1,
                name: String::new(),
                is_add: false,
            })
            .await,
            Ok(VppApiReply::TableDeleted { detached: 1 })
        );
    }
}
