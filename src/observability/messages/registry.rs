// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for the dataplane registry.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};

/// A backend constructor was added to the registry.
///
/// # Log Level
/// `debug!` - Startup detail
pub struct BackendRegistered<'a> {
    pub dataplane_type: &'a str,
}

impl Display for BackendRegistered<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Registered dataplane backend '{}'", self.dataplane_type)
    }
}

impl StructuredLog for BackendRegistered<'_> {
    fn log(&self) {
        tracing::debug!(dataplane_type = self.dataplane_type, "{}", self);
    }
}

/// A dataplane handle was constructed.
///
/// # Log Level
/// `info!` - Important operational event
pub struct DataplaneCreated<'a> {
    pub dataplane_type: &'a str,
}

impl Display for DataplaneCreated<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Created '{}' dataplane", self.dataplane_type)
    }
}

impl StructuredLog for DataplaneCreated<'_> {
    fn log(&self) {
        tracing::info!(dataplane_type = self.dataplane_type, "{}", self);
    }
}

/// A caller asked for a type identifier nobody registered.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use vrfplane::observability::messages::registry::UnsupportedDataplaneRequested;
///
/// let available = vec!["dry_run".to_string(), "linux".to_string()];
/// let msg = UnsupportedDataplaneRequested {
///     dataplane_type: "dpdk",
///     available: &available,
/// };
///
/// assert!(msg.to_string().contains("dry_run, linux"));
/// ```
pub struct UnsupportedDataplaneRequested<'a> {
    pub dataplane_type: &'a str,
    pub available: &'a [String],
}

impl Display for UnsupportedDataplaneRequested<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Unsupported dataplane type '{}' (available: {})",
            self.dataplane_type,
            self.available.join(", ")
        )
    }
}

impl StructuredLog for UnsupportedDataplaneRequested<'_> {
    fn log(&self) {
        tracing::error!(
            dataplane_type = self.dataplane_type,
            available = %self.available.join(","),
            "{}", self
        );
    }
}
