// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::{Config, NetworkConfig};
use crate::errors::DataplaneResult;
use crate::model::NetworkInterfaceConfig;
use crate::observability::messages::config::{
    NetworkProvisioned, NetworkTornDown, ProvisioningStarted,
};
use crate::observability::messages::{OperationSpan, StructuredLog};
use crate::traits::Dataplane;
use tracing::Instrument;

/// Counts of what a provisioning pass touched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProvisionReport {
    pub vrfs: usize,
    pub interfaces: usize,
}

/// Applies the networks of a [`Config`] to a dataplane handle.
///
/// Networks are processed in name order and interfaces in id order, so the
/// same config always produces the same sequence of calls. The provisioner
/// only sees the `Dataplane` trait; which backend runs the calls is decided
/// by whoever created the handle.
///
/// # Example
/// ```
/// use vrfplane::config::{Config, Provisioner};
/// use vrfplane::registry::DataplaneFactory;
///
/// let config: Config = serde_yaml::from_str(r#"
/// networks:
///   blue:
///     vrf_id: 1
///     interfaces:
///       xfrm10: { id: 10, type: ipip_tunnel }
/// "#).unwrap();
///
/// let rt = tokio::runtime::Runtime::new().unwrap();
/// rt.block_on(async {
///     let dp = DataplaneFactory::create("vpp").unwrap();
///     let provisioner = Provisioner::new(dp.as_ref());
///
///     let report = provisioner.apply(&config).await.unwrap();
///     assert_eq!(report.interfaces, 1);
///     provisioner.teardown(&config).await.unwrap();
/// });
/// ```
pub struct Provisioner<'a> {
    dataplane: &'a dyn Dataplane,
}

impl<'a> Provisioner<'a> {
    pub fn new(dataplane: &'a dyn Dataplane) -> Self {
        Self { dataplane }
    }

    /// Create every VRF and bind its interfaces.
    ///
    /// On the first failure everything this call already created is undone
    /// (best effort) and the original error is returned.
    pub async fn apply(&self, config: &Config) -> DataplaneResult<ProvisionReport> {
        let started = ProvisioningStarted {
            dataplane: self.dataplane.kind(),
            action: "apply",
            network_count: config.networks.len(),
        };
        let span = started.span("apply");
        started.log();
        self.apply_networks(config).instrument(span).await
    }

    async fn apply_networks(&self, config: &Config) -> DataplaneResult<ProvisionReport> {
        let mut applied: Vec<(u16, Vec<u16>)> = Vec::new();

        for (network, network_cfg) in &config.networks {
            if let Err(e) = self.apply_network(network, network_cfg, &mut applied).await {
                tracing::warn!(network = %network, error = %e, "provisioning failed, rolling back");
                self.rollback(&applied).await;
                return Err(e);
            }
        }

        Ok(ProvisionReport {
            vrfs: applied.len(),
            interfaces: applied.iter().map(|(_, ifs)| ifs.len()).sum(),
        })
    }

    async fn apply_network(
        &self,
        network: &str,
        network_cfg: &NetworkConfig,
        applied: &mut Vec<(u16, Vec<u16>)>,
    ) -> DataplaneResult<()> {
        let vrf_id = network_cfg.vrf_id;
        self.dataplane.create_vrf(network, vrf_id).await?;
        applied.push((vrf_id, Vec::new()));

        let netifs = network_cfg.netifs();
        let interface_count = netifs.len();
        for netif in netifs {
            let if_id = netif.id;
            self.dataplane.add_vrf_interface(vrf_id, netif).await?;
            if let Some((_, ifs)) = applied.last_mut() {
                ifs.push(if_id);
            }
        }

        NetworkProvisioned {
            network,
            vrf_id,
            interface_count,
        }
        .log();
        Ok(())
    }

    async fn rollback(&self, applied: &[(u16, Vec<u16>)]) {
        for (vrf_id, ifs) in applied.iter().rev() {
            for if_id in ifs.iter().rev() {
                if let Err(e) = self.dataplane.remove_vrf_interface(*vrf_id, *if_id).await {
                    tracing::warn!(vrf_id, if_id, error = %e, "rollback: interface removal failed");
                }
            }
            if let Err(e) = self.dataplane.delete_vrf(*vrf_id).await {
                tracing::warn!(vrf_id, error = %e, "rollback: vrf deletion failed");
            }
        }
    }

    /// Undo [`Provisioner::apply`]: unbind interfaces, then delete VRFs, in
    /// reverse order. Stops at the first failure.
    pub async fn teardown(&self, config: &Config) -> DataplaneResult<ProvisionReport> {
        let started = ProvisioningStarted {
            dataplane: self.dataplane.kind(),
            action: "teardown",
            network_count: config.networks.len(),
        };
        let span = started.span("teardown");
        started.log();
        self.teardown_networks(config).instrument(span).await
    }

    async fn teardown_networks(&self, config: &Config) -> DataplaneResult<ProvisionReport> {
        let mut report = ProvisionReport::default();

        for (network, network_cfg) in config.networks.iter().rev() {
            let vrf_id = network_cfg.vrf_id;
            for netif in network_cfg.netifs().iter().rev() {
                self.dataplane.remove_vrf_interface(vrf_id, netif.id).await?;
                report.interfaces += 1;
            }
            self.dataplane.delete_vrf(vrf_id).await?;
            report.vrfs += 1;

            NetworkTornDown { network, vrf_id }.log();
        }

        Ok(report)
    }

    /// Walk one routing domain through its whole lifecycle: create "blue"
    /// (vrf 1), bind `xfrm10` (id 10), unbind it, delete the domain.
    pub async fn exercise(&self) -> DataplaneResult<()> {
        let netif = NetworkInterfaceConfig::new("xfrm10", 10, "ipip_tunnel");

        self.dataplane.create_vrf("blue", 1).await?;
        self.dataplane.add_vrf_interface(1, netif).await?;
        self.dataplane.remove_vrf_interface(1, 10).await?;
        self.dataplane.delete_vrf(1).await
    }
}
