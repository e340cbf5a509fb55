// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::OnceLock;

use crate::config::BackendOptions;
use crate::errors::DataplaneResult;
use crate::registry::DataplaneRegistry;
use crate::traits::Dataplane;

static REGISTRY: OnceLock<DataplaneRegistry> = OnceLock::new();

/// Process-wide entry point for creating dataplanes by type name.
///
/// The registry behind it is filled exactly once: explicitly through
/// [`DataplaneFactory::init`] / [`DataplaneFactory::install`], or lazily with
/// the built-in backends and default options on first use. It is never torn
/// down.
pub struct DataplaneFactory;

impl DataplaneFactory {
    /// Initialise with the built-in backends configured from `options`.
    ///
    /// Returns `false` if the registry was already initialised, in which case
    /// the existing one is kept.
    pub fn init(options: &BackendOptions) -> bool {
        Self::install(DataplaneRegistry::with_builtin_backends(options)).is_ok()
    }

    /// Install a caller-built registry. Hands it back if one is already in place.
    pub fn install(registry: DataplaneRegistry) -> Result<(), DataplaneRegistry> {
        REGISTRY.set(registry)
    }

    pub fn registry() -> &'static DataplaneRegistry {
        REGISTRY.get_or_init(|| DataplaneRegistry::with_builtin_backends(&BackendOptions::default()))
    }

    /// Create a dataplane handle for a registered type.
    pub fn create(dataplane_type: &str) -> DataplaneResult<Box<dyn Dataplane>> {
        Self::registry().create(dataplane_type)
    }

    pub fn available_types() -> Vec<String> {
        Self::registry().list_types()
    }

    /// Types of the process-wide registry, or `None` while it is still
    /// uninitialised. Never initialises it.
    pub fn installed_types() -> Option<Vec<String>> {
        REGISTRY.get().map(DataplaneRegistry::list_types)
    }
}
