// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Dataplane backend implementations.
//!
//! Every backend implements the [`Dataplane`](crate::traits::Dataplane)
//! trait and is instantiated through the registry by its type identifier.
//! Backends share no base behaviour beyond that contract; each keeps its own
//! state model.
//!
//! # Available Backends
//!
//! ## Linux Backend (`linux`)
//! Kernel-style VRF devices with enslaved links:
//! - **State**: [`linux::KernelTables`], shared by all handles from one registry
//! - **Invariants**: duplicate VRF ids, interface ids and link names are rejected
//! - **Concurrency**: per-VRF locking, tombstoned deletes
//!
//! ## VPP Backend (`vpp`)
//! Requests to a packet-processing engine's control API:
//! - **Transport**: pluggable [`vpp::VppApiClient`], in-process endpoint by default
//! - **Resilience**: timeout plus retry with exponential backoff ([`retry::RetryPolicy`])
//! - **Errors**: API return values map onto the common error taxonomy
//!
//! ## Dry-Run Backend (`dry_run`)
//! Logs every call and accepts it. No state, never fails.
//!
//! ## Stub Clients (Test-Only)
//! Failing, stalling and flaky API clients for exercising the retry path.
//!
//! # Example
//! ```rust
//! use vrfplane::backends::linux::LinuxDataplane;
//! use vrfplane::model::NetworkInterfaceConfig;
//! use vrfplane::traits::Dataplane;
//!
//! let rt = tokio::runtime::Runtime::new().unwrap();
//! rt.block_on(async {
//!     let dp = LinuxDataplane::new();
//!     dp.create_vrf("blue", 1).await.unwrap();
//!     dp.add_vrf_interface(1, NetworkInterfaceConfig::new("xfrm10", 10, "ipip_tunnel")).await.unwrap();
//!     assert_eq!(dp.snapshot().await.interface_count(), 1);
//! });
//! ```

pub mod dry_run;
pub mod linux;
pub mod retry;
#[cfg(test)]
pub mod stub;
pub mod vpp;

use std::future::Future;

use tracing::Instrument;

use crate::errors::DataplaneResult;
use crate::observability::messages::dataplane::{OperationRejected, OperationStarted};
use crate::observability::messages::{OperationSpan, StructuredLog};

/// Run one backend operation inside its `dataplane_operation` span.
///
/// A failure is logged as rejected before it is handed back.
pub(crate) async fn run_operation<T, F>(
    backend: &'static str,
    operation: &'static str,
    vrf_id: u16,
    work: F,
) -> DataplaneResult<T>
where
    F: Future<Output = DataplaneResult<T>>,
{
    let started = OperationStarted {
        backend,
        operation,
        vrf_id,
    };
    let span = started.span(backend);

    async move {
        started.log();
        let result = work.await;
        if let Err(e) = &result {
            OperationRejected {
                backend,
                operation,
                error: e,
            }
            .log();
        }
        result
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::dry_run::DryRunDataplane;
    use crate::backends::linux::LinuxDataplane;
    use crate::backends::vpp::VppDataplane;
    use crate::config::Provisioner;
    use crate::observability::capture::SpanRecorder;
    use crate::traits::Dataplane;

    #[tokio::test]
    async fn test_every_operation_opens_a_span() {
        let recorder = SpanRecorder::new();
        let _default = recorder.set_default();

        let backends: Vec<Box<dyn Dataplane>> = vec![
            Box::new(LinuxDataplane::new()),
            Box::new(VppDataplane::new(Default::default())),
            Box::new(DryRunDataplane::new()),
        ];
        for dp in &backends {
            Provisioner::new(dp.as_ref()).exercise().await.unwrap();
        }

        // four lifecycle operations per backend
        assert_eq!(recorder.count("dataplane_operation"), 12);
    }

    #[tokio::test]
    async fn test_rejected_operation_still_spanned() {
        let recorder = SpanRecorder::new();
        let _default = recorder.set_default();

        let dp = LinuxDataplane::new();
        assert!(dp.delete_vrf(7).await.is_err());
        assert_eq!(recorder.count("dataplane_operation"), 1);
    }
}
