// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Timeout and retry-with-backoff for backend control calls.
//!
//! Only transport failures and timeouts are retried. Once the attempts are
//! used up the failure surfaces as [`DataplaneError::BackendUnavailable`],
//! never as a hang.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use crate::config::BackendOptions;
use crate::errors::{DataplaneError, DataplaneResult};
use crate::observability::messages::dataplane::ApiCallRetrying;
use crate::observability::messages::StructuredLog;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub timeout: Duration,
    pub max_attempts: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl RetryPolicy {
    pub fn from_options(options: &BackendOptions) -> Self {
        Self {
            timeout: options.get_timeout(),
            max_attempts: options.get_retry_attempts(),
            initial_backoff: options.get_retry_backoff(),
            max_backoff: options.get_max_retry_backoff(),
        }
    }

    /// Run `call` until it succeeds, fails with a non-transport error, or
    /// the attempts are exhausted.
    ///
    /// `call` returns the transport outcome; an `Ok` value is handed back
    /// as-is, so backends can still turn application-level replies into
    /// their own errors.
    pub async fn run<T, E, F, Fut>(
        &self,
        backend: &'static str,
        operation: &str,
        mut call: F,
    ) -> DataplaneResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        let mut backoff = self.initial_backoff;
        let mut attempt = 1;

        loop {
            let reason = match tokio::time::timeout(self.timeout, call()).await {
                Ok(Ok(value)) => return Ok(value),
                Ok(Err(e)) => e.to_string(),
                Err(_) => format!("timed out after {:?}", self.timeout),
            };

            if attempt >= self.max_attempts {
                return Err(DataplaneError::BackendUnavailable {
                    backend,
                    reason: format!("{} failed after {} attempts: {}", operation, attempt, reason),
                });
            }

            ApiCallRetrying {
                backend,
                message: operation,
                attempt,
                max_attempts: self.max_attempts,
                backoff,
                reason: &reason,
            }
            .log();

            tokio::time::sleep(backoff).await;
            backoff = (backoff * 2).min(self.max_backoff);
            attempt += 1;
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_options(&BackendOptions::default())
    }
}
