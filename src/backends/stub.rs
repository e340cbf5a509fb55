// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use crate::backends::vpp::{InProcessVppApi, TransportError, VppApiClient, VppApiMessage, VppApiReply};

/// An API client whose socket is always closed
pub struct UnreachableVppApi;

#[async_trait::async_trait]
impl VppApiClient for UnreachableVppApi {
    async fn call(&self, _msg: VppApiMessage) -> Result<VppApiReply, TransportError> {
        Err(TransportError::Disconnected)
    }
}

/// An API client that never answers
pub struct StallingVppApi;

#[async_trait::async_trait]
impl VppApiClient for StallingVppApi {
    async fn call(&self, _msg: VppApiMessage) -> Result<VppApiReply, TransportError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Err(TransportError::Disconnected)
    }
}

/// An API client that drops the first `failures` calls, then behaves like
/// the in-process endpoint
pub struct FlakyVppApi {
    failures_remaining: AtomicU32,
    calls: AtomicU32,
    inner: InProcessVppApi,
}

impl FlakyVppApi {
    pub fn new(failures: u32) -> Self {
        Self {
            failures_remaining: AtomicU32::new(failures),
            calls: AtomicU32::new(0),
            inner: InProcessVppApi::new(),
        }
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl VppApiClient for FlakyVppApi {
    async fn call(&self, msg: VppApiMessage) -> Result<VppApiReply, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let failing = self
            .failures_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(TransportError::Socket("connection reset by peer".to_string()));
        }
        self.inner.call(msg).await
    }
}
