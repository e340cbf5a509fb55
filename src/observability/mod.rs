// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! This module provides centralized message types for all diagnostic and operational
//! logging throughout vrfplane. Message types follow a struct-based pattern
//! with `Display` trait implementation to:
//!
//! * Keep log wording in one place instead of scattered format strings
//! * Emit the same fields as structured `tracing` attributes
//! * Keep backends free of presentation details
//!
//! # Architecture
//!
//! Messages are organized by subsystem:
//! * `messages::dataplane` - VRF and interface operations inside backends
//! * `messages::registry` - Backend registration and handle creation
//! * `messages::config` - Configuration loading and provisioning
//!
//! # Usage
//!
//! ```rust
//! use vrfplane::observability::messages::dataplane::VrfCreated;
//! use vrfplane::observability::messages::StructuredLog;
//!
//! let msg = VrfCreated {
//!     backend: "linux",
//!     name: "blue",
//!     vrf_id: 1,
//! };
//!
//! msg.log();
//! ```

#[cfg(test)]
pub(crate) mod capture;
pub mod messages;
