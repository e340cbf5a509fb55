// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Each message type implements `Display` for the human-readable line and
//! [`StructuredLog`] to emit the same data as `tracing` fields at the level
//! the message belongs to. Messages that open a unit of work also implement
//! [`OperationSpan`].
//!
//! * `dataplane` - VRF and interface operations
//! * `registry` - Backend registration and handle creation
//! * `config` - Configuration loading and provisioning

use tracing::Span;

pub mod config;
pub mod dataplane;
pub mod registry;

/// A message that knows its own log level and structured fields.
pub trait StructuredLog {
    /// Emit the message as a `tracing` event.
    fn log(&self);
}

/// A message that starts a unit of work; the work runs inside its span.
pub trait OperationSpan: StructuredLog {
    /// Open a span carrying the message's fields.
    fn span(&self, name: &str) -> Span;
}
