// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for configuration loading and provisioning.
//!
//! This module contains message types for logging events related to:
//! * Configuration file loading
//! * Validation failures
//! * Applying and tearing down networks on a dataplane

use crate::observability::messages::{OperationSpan, StructuredLog};
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Configuration loaded from disk.
///
/// # Log Level
/// `info!` - Important operational event
pub struct ConfigLoaded<'a> {
    pub path: &'a str,
    pub dataplane: &'a str,
    pub network_count: usize,
}

impl Display for ConfigLoaded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Loaded config '{}': dataplane={}, {} networks",
            self.path, self.dataplane, self.network_count
        )
    }
}

impl StructuredLog for ConfigLoaded<'_> {
    fn log(&self) {
        tracing::info!(
            path = self.path,
            dataplane = self.dataplane,
            network_count = self.network_count,
            "{}", self
        );
    }
}

/// Configuration failed validation.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct ConfigValidationFailed {
    pub error_count: usize,
}

impl Display for ConfigValidationFailed {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Configuration validation failed with {} errors", self.error_count)
    }
}

impl StructuredLog for ConfigValidationFailed {
    fn log(&self) {
        tracing::error!(error_count = self.error_count, "{}", self);
    }
}

/// A provisioning pass over a config is starting.
///
/// # Log Level
/// `info!` - Important operational event
pub struct ProvisioningStarted<'a> {
    pub dataplane: &'a str,
    pub action: &'a str,
    pub network_count: usize,
}

impl Display for ProvisioningStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Starting {} of {} networks on '{}'",
            self.action, self.network_count, self.dataplane
        )
    }
}

impl StructuredLog for ProvisioningStarted<'_> {
    fn log(&self) {
        tracing::info!(
            dataplane = self.dataplane,
            action = self.action,
            network_count = self.network_count,
            "{}", self
        );
    }
}

impl OperationSpan for ProvisioningStarted<'_> {
    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "provisioning",
            span_name = name,
            dataplane = self.dataplane,
            action = self.action,
        )
    }
}

/// A network was applied to a dataplane.
///
/// # Log Level
/// `info!` - Important operational event
pub struct NetworkProvisioned<'a> {
    pub network: &'a str,
    pub vrf_id: u16,
    pub interface_count: usize,
}

impl Display for NetworkProvisioned<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Provisioned network '{}' as vrf {} with {} interfaces",
            self.network, self.vrf_id, self.interface_count
        )
    }
}

impl StructuredLog for NetworkProvisioned<'_> {
    fn log(&self) {
        tracing::info!(
            network = self.network,
            vrf_id = self.vrf_id,
            interface_count = self.interface_count,
            "{}", self
        );
    }
}

/// A network was removed from a dataplane.
///
/// # Log Level
/// `info!` - Important operational event
pub struct NetworkTornDown<'a> {
    pub network: &'a str,
    pub vrf_id: u16,
}

impl Display for NetworkTornDown<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Tore down network '{}' (vrf {})", self.network, self.vrf_id)
    }
}

impl StructuredLog for NetworkTornDown<'_> {
    fn log(&self) {
        tracing::info!(network = self.network, vrf_id = self.vrf_id, "{}", self);
    }
}
