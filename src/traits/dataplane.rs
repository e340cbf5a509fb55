use async_trait::async_trait;

use crate::errors::DataplaneResult;
use crate::model::{DataplaneSnapshot, NetworkInterfaceConfig};

/// The operation set every dataplane backend supports.
///
/// Callers hold a `Box<dyn Dataplane>` handed out by the registry and never
/// name a concrete backend. Each call completes before its future resolves;
/// failures come back as [`crate::errors::DataplaneError`].
#[async_trait]
pub trait Dataplane: Send + Sync {
    /// Create an isolated routing domain.
    async fn create_vrf(&self, name: &str, vrf_id: u16) -> DataplaneResult<()>;

    /// Destroy a routing domain, detaching any interfaces still bound to it.
    async fn delete_vrf(&self, vrf_id: u16) -> DataplaneResult<()>;

    /// Bind an interface to an existing routing domain.
    async fn add_vrf_interface(&self, vrf_id: u16, netif: NetworkInterfaceConfig) -> DataplaneResult<()>;

    /// Unbind an interface from a routing domain.
    async fn remove_vrf_interface(&self, vrf_id: u16, if_id: u16) -> DataplaneResult<()>;

    /// Registry identifier of the backend.
    fn kind(&self) -> &'static str;

    async fn snapshot(&self) -> DataplaneSnapshot;
}
