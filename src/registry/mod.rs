// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Dataplane registry and factory.
//!
//! ```text
//! type identifier → DataplaneRegistry → constructor → Box<dyn Dataplane>
//! ```
//!
//! [`DataplaneRegistry`] is an explicit table that callers can build and
//! extend themselves. [`DataplaneFactory`] wraps one process-wide registry,
//! populated once at start-up and read-only afterwards.

mod factory;
mod table;

pub use factory::DataplaneFactory;
pub use table::{DataplaneConstructor, DataplaneRegistry};
