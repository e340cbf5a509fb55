// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Control-API messages exchanged with the packet-processing engine.

use thiserror::Error;

use crate::model::{InterfaceType, NetworkInterfaceConfig};

/// A request sent over the control API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VppApiMessage {
    /// Add or delete a FIB table.
    IpTableAddDel {
        table_id: u16,
        name: String,
        is_add: bool,
    },
    /// Bind an interface into a FIB table.
    SwInterfaceSetTable {
        table_id: u16,
        sw_if_index: u16,
        if_name: String,
        if_type: InterfaceType,
    },
    /// Return an interface to the default table.
    SwInterfaceResetTable { table_id: u16, sw_if_index: u16 },
    /// Dump every non-default FIB table and its interfaces.
    IpTableDump,
}

impl VppApiMessage {
    pub fn set_table(table_id: u16, netif: &NetworkInterfaceConfig) -> Self {
        VppApiMessage::SwInterfaceSetTable {
            table_id,
            sw_if_index: netif.id,
            if_name: netif.name.clone(),
            if_type: netif.interface_type.clone(),
        }
    }

    /// API message name, as it appears in logs.
    pub fn name(&self) -> &'static str {
        match self {
            VppApiMessage::IpTableAddDel { is_add: true, .. } => "ip_table_add",
            VppApiMessage::IpTableAddDel { is_add: false, .. } => "ip_table_del",
            VppApiMessage::SwInterfaceSetTable { .. } => "sw_interface_set_table",
            VppApiMessage::SwInterfaceResetTable { .. } => "sw_interface_reset_table",
            VppApiMessage::IpTableDump => "ip_table_dump",
        }
    }
}

/// Non-zero return values the API reports for a rejected request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiRetval {
    NoSuchTable,
    TableExists,
    NoSuchEntry,
    EntryExists,
}

impl ApiRetval {
    pub fn code(self) -> i32 {
        match self {
            ApiRetval::NoSuchTable => -6,
            ApiRetval::NoSuchEntry => -8,
            ApiRetval::EntryExists => -19,
            ApiRetval::TableExists => -81,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FibTableDetails {
    pub table_id: u16,
    pub name: String,
    pub interfaces: Vec<NetworkInterfaceConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VppApiReply {
    Ok,
    /// A table was deleted; `detached` interfaces went back to the default table.
    TableDeleted { detached: usize },
    Tables(Vec<FibTableDetails>),
    Rejected(ApiRetval),
}

/// The request never got an answer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("api connection closed")]
    Disconnected,
    #[error("api socket error: {0}")]
    Socket(String),
}
