// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::sync::Arc;

use crate::backends::dry_run::{self, DryRunDataplane};
use crate::backends::linux::{self, KernelTables, LinuxDataplane};
use crate::backends::retry::RetryPolicy;
use crate::backends::vpp::{self, VppDataplane};
use crate::config::BackendOptions;
use crate::errors::{DataplaneError, DataplaneResult};
use crate::observability::messages::registry::{
    BackendRegistered, DataplaneCreated, UnsupportedDataplaneRequested,
};
use crate::observability::messages::StructuredLog;
use crate::traits::Dataplane;

/// Builds one dataplane handle per call.
pub type DataplaneConstructor = Arc<dyn Fn() -> Box<dyn Dataplane> + Send + Sync>;

/// Mapping from dataplane type identifier to constructor.
///
/// # Examples
///
/// ## Built-in backends
/// ```
/// use vrfplane::config::BackendOptions;
/// use vrfplane::registry::DataplaneRegistry;
///
/// let registry = DataplaneRegistry::with_builtin_backends(&BackendOptions::default());
/// assert_eq!(registry.list_types(), vec!["dry_run", "linux", "vpp"]);
///
/// let dp = registry.create("vpp").unwrap();
/// assert_eq!(dp.kind(), "vpp");
/// assert!(registry.create("dpdk").is_err());
/// ```
///
/// ## Registering a custom backend
/// ```
/// use vrfplane::backends::dry_run::DryRunDataplane;
/// use vrfplane::registry::DataplaneRegistry;
///
/// let mut registry = DataplaneRegistry::new();
/// registry.register("lab", || Box::new(DryRunDataplane::new()));
/// assert!(registry.is_registered("lab"));
/// ```
#[derive(Clone, Default)]
pub struct DataplaneRegistry {
    constructors: HashMap<String, DataplaneConstructor>,
}

impl DataplaneRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the `linux`, `vpp` and `dry_run` backends.
    ///
    /// All `linux` handles created from this registry share one set of
    /// kernel tables. Each `vpp` handle gets its own API endpoint.
    pub fn with_builtin_backends(options: &BackendOptions) -> Self {
        let mut registry = Self::new();

        let kernel = Arc::new(KernelTables::new());
        registry.register(linux::KIND, move || {
            Box::new(LinuxDataplane::with_kernel(Arc::clone(&kernel)))
        });

        let retry = RetryPolicy::from_options(options);
        registry.register(vpp::KIND, move || Box::new(VppDataplane::new(retry)));

        registry.register(dry_run::KIND, || Box::new(DryRunDataplane::new()));

        registry
    }

    /// Identifiers registered by [`DataplaneRegistry::with_builtin_backends`], sorted.
    pub fn builtin_types() -> Vec<String> {
        let mut types: Vec<String> = [linux::KIND, vpp::KIND, dry_run::KIND]
            .iter()
            .map(|t| t.to_string())
            .collect();
        types.sort();
        types
    }

    /// Add a constructor, replacing any previous one for the same identifier.
    pub fn register<F>(&mut self, dataplane_type: impl Into<String>, constructor: F) -> &mut Self
    where
        F: Fn() -> Box<dyn Dataplane> + Send + Sync + 'static,
    {
        let dataplane_type = dataplane_type.into();
        BackendRegistered {
            dataplane_type: &dataplane_type,
        }
        .log();
        self.constructors.insert(dataplane_type, Arc::new(constructor));
        self
    }

    /// Build a new handle for `dataplane_type`.
    ///
    /// Nothing is constructed when the identifier is unknown.
    pub fn create(&self, dataplane_type: &str) -> DataplaneResult<Box<dyn Dataplane>> {
        match self.constructors.get(dataplane_type) {
            Some(constructor) => {
                let dataplane = constructor();
                DataplaneCreated { dataplane_type }.log();
                Ok(dataplane)
            }
            None => {
                let available = self.list_types();
                UnsupportedDataplaneRequested {
                    dataplane_type,
                    available: &available,
                }
                .log();
                Err(DataplaneError::unsupported(dataplane_type))
            }
        }
    }

    pub fn is_registered(&self, dataplane_type: &str) -> bool {
        self.constructors.contains_key(dataplane_type)
    }

    /// Registered identifiers, sorted.
    pub fn list_types(&self) -> Vec<String> {
        let mut types: Vec<String> = self.constructors.keys().cloned().collect();
        types.sort();
        types
    }

    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }
}

impl std::fmt::Debug for DataplaneRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataplaneRegistry")
            .field("dataplane_types", &self.list_types())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Resource;
    use crate::model::NetworkInterfaceConfig;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn builtin() -> DataplaneRegistry {
        DataplaneRegistry::with_builtin_backends(&BackendOptions::default())
    }

    #[tokio::test]
    async fn test_every_registered_type_satisfies_the_interface() {
        let registry = builtin();

        for dataplane_type in registry.list_types() {
            let dp = registry.create(&dataplane_type).unwrap();
            assert_eq!(dp.kind(), dataplane_type);

            let netif = NetworkInterfaceConfig::new("xfrm10", 10, "ipip_tunnel");
            dp.create_vrf("blue", 1).await.unwrap();
            dp.add_vrf_interface(1, netif).await.unwrap();
            dp.remove_vrf_interface(1, 10).await.unwrap();
            dp.delete_vrf(1).await.unwrap();
            assert!(dp.snapshot().await.is_empty(), "{} left state behind", dataplane_type);
        }
    }

    #[test]
    fn test_unregistered_type_constructs_nothing() {
        let built = Arc::new(AtomicUsize::new(0));
        let mut registry = DataplaneRegistry::new();
        {
            let built = Arc::clone(&built);
            registry.register("counted", move || {
                built.fetch_add(1, Ordering::SeqCst);
                Box::new(crate::backends::dry_run::DryRunDataplane::new())
            });
        }

        for unknown in ["", "Linux", "dpdk", "vpp "] {
            match registry.create(unknown) {
                Err(DataplaneError::UnsupportedDataplane { dataplane_type }) => {
                    assert_eq!(dataplane_type, unknown)
                }
                Err(other) => panic!("unexpected error for '{}': {}", unknown, other),
                Ok(_) => panic!("'{}' should not be registered", unknown),
            }
        }
        assert_eq!(built.load(Ordering::SeqCst), 0);

        registry.create("counted").unwrap();
        assert_eq!(built.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_linux_handles_share_state_vpp_handles_do_not() {
        let registry = builtin();

        let linux_a = registry.create("linux").unwrap();
        let linux_b = registry.create("linux").unwrap();
        linux_a.create_vrf("blue", 1).await.unwrap();
        assert_eq!(
            linux_b.create_vrf("blue", 1).await,
            Err(DataplaneError::DuplicateResource(Resource::Vrf(1)))
        );

        let vpp_a = registry.create("vpp").unwrap();
        let vpp_b = registry.create("vpp").unwrap();
        vpp_a.create_vrf("blue", 1).await.unwrap();
        vpp_b.create_vrf("blue", 1).await.unwrap();

        // a separate registry means a separate kernel
        let other = builtin().create("linux").unwrap();
        other.create_vrf("blue", 1).await.unwrap();
    }

    #[test]
    fn test_builtin_types_match_builtin_registry() {
        assert_eq!(DataplaneRegistry::builtin_types(), builtin().list_types());
    }

    #[test]
    fn test_register_replaces_existing() {
        let mut registry = builtin();
        registry.register("linux", || Box::new(crate::backends::dry_run::DryRunDataplane::new()));

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.create("linux").unwrap().kind(), "dry_run");
    }
}
