// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for dataplane backend operations.
//!
//! This module contains message types for logging events related to:
//! * Operation start (each operation runs inside its span)
//! * Routing domain creation and deletion
//! * Interface binding and unbinding
//! * Rejected operations
//! * Control API retries

use crate::model::NetworkInterfaceConfig;
use crate::observability::messages::{OperationSpan, StructuredLog};
use std::fmt::{Display, Formatter};
use std::time::Duration;
use tracing::Span;

/// A backend operation is about to run.
///
/// # Log Level
/// `debug!` - The outcome is logged separately at `info!` or `warn!`
pub struct OperationStarted<'a> {
    pub backend: &'a str,
    pub operation: &'a str,
    pub vrf_id: u16,
}

impl Display for OperationStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "[{}] {} started: vrfid={}", self.backend, self.operation, self.vrf_id)
    }
}

impl StructuredLog for OperationStarted<'_> {
    fn log(&self) {
        tracing::debug!(
            backend = self.backend,
            operation = self.operation,
            vrf_id = self.vrf_id,
            "{}", self
        );
    }
}

impl OperationSpan for OperationStarted<'_> {
    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "dataplane_operation",
            span_name = name,
            backend = self.backend,
            operation = self.operation,
            vrf_id = self.vrf_id,
        )
    }
}

/// Routing domain created.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use vrfplane::observability::messages::dataplane::VrfCreated;
///
/// let msg = VrfCreated {
///     backend: "vpp",
///     name: "blue",
///     vrf_id: 1,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct VrfCreated<'a> {
    pub backend: &'a str,
    pub name: &'a str,
    pub vrf_id: u16,
}

impl Display for VrfCreated<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "[{}] CreateVrf: name={} vrfid={}",
            self.backend, self.name, self.vrf_id
        )
    }
}

impl StructuredLog for VrfCreated<'_> {
    fn log(&self) {
        tracing::info!(
            backend = self.backend,
            name = self.name,
            vrf_id = self.vrf_id,
            "{}", self
        );
    }
}

/// Routing domain deleted.
///
/// # Log Level
/// `info!` - Important operational event
pub struct VrfDeleted<'a> {
    pub backend: &'a str,
    pub vrf_id: u16,
    /// Interfaces that were still bound and got detached implicitly.
    pub detached: usize,
}

impl Display for VrfDeleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "[{}] DeleteVrf: vrfid={}", self.backend, self.vrf_id)?;
        if self.detached > 0 {
            write!(f, " (detached {} interfaces)", self.detached)?;
        }
        Ok(())
    }
}

impl StructuredLog for VrfDeleted<'_> {
    fn log(&self) {
        tracing::info!(
            backend = self.backend,
            vrf_id = self.vrf_id,
            detached = self.detached,
            "{}", self
        );
    }
}

/// Interface bound to a routing domain.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use vrfplane::model::NetworkInterfaceConfig;
/// use vrfplane::observability::messages::dataplane::InterfaceAdded;
///
/// let netif = NetworkInterfaceConfig::new("xfrm10", 10, "ipip_tunnel");
/// let msg = InterfaceAdded {
///     backend: "linux",
///     vrf_id: 1,
///     netif: &netif,
/// };
///
/// assert!(msg.to_string().contains("xfrm10"));
/// ```
pub struct InterfaceAdded<'a> {
    pub backend: &'a str,
    pub vrf_id: u16,
    pub netif: &'a NetworkInterfaceConfig,
}

impl Display for InterfaceAdded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "[{}] AddVrfInterface: vrfid={} netif={{name={} id={} type={}}}",
            self.backend,
            self.vrf_id,
            self.netif.name,
            self.netif.id,
            self.netif.interface_type
        )
    }
}

impl StructuredLog for InterfaceAdded<'_> {
    fn log(&self) {
        tracing::info!(
            backend = self.backend,
            vrf_id = self.vrf_id,
            if_name = %self.netif.name,
            if_id = self.netif.id,
            if_type = %self.netif.interface_type,
            "{}", self
        );
    }
}

/// Interface unbound from a routing domain.
///
/// # Log Level
/// `info!` - Important operational event
pub struct InterfaceRemoved<'a> {
    pub backend: &'a str,
    pub vrf_id: u16,
    pub if_id: u16,
}

impl Display for InterfaceRemoved<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "[{}] RemoveVrfInterface: vrfid={} ifid={}",
            self.backend, self.vrf_id, self.if_id
        )
    }
}

impl StructuredLog for InterfaceRemoved<'_> {
    fn log(&self) {
        tracing::info!(
            backend = self.backend,
            vrf_id = self.vrf_id,
            if_id = self.if_id,
            "{}", self
        );
    }
}

/// A backend refused an operation.
///
/// # Log Level
/// `warn!` - The caller gets the error back; this records it on the backend side
pub struct OperationRejected<'a> {
    pub backend: &'a str,
    pub operation: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for OperationRejected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "[{}] {} rejected: {}",
            self.backend, self.operation, self.error
        )
    }
}

impl StructuredLog for OperationRejected<'_> {
    fn log(&self) {
        tracing::warn!(
            backend = self.backend,
            operation = self.operation,
            error = %self.error,
            "{}", self
        );
    }
}

/// A control API call failed at the transport level and will be retried.
///
/// # Log Level
/// `warn!` - Degraded but recovering
pub struct ApiCallRetrying<'a> {
    pub backend: &'a str,
    pub message: &'a str,
    pub attempt: u32,
    pub max_attempts: u32,
    pub backoff: Duration,
    pub reason: &'a str,
}

impl Display for ApiCallRetrying<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "[{}] {} attempt {}/{} failed: {}; retrying in {:?}",
            self.backend, self.message, self.attempt, self.max_attempts, self.reason, self.backoff
        )
    }
}

impl StructuredLog for ApiCallRetrying<'_> {
    fn log(&self) {
        tracing::warn!(
            backend = self.backend,
            api_message = self.message,
            attempt = self.attempt,
            max_attempts = self.max_attempts,
            backoff_ms = self.backoff.as_millis() as u64,
            reason = self.reason,
            "{}", self
        );
    }
}
