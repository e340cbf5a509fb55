// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors surfaced by the dataplane capability interface and the registry.
//!
//! Every backend reports failures through [`DataplaneError`], so callers can
//! match on the same taxonomy regardless of which backend executed the call.

use std::fmt;
use thiserror::Error;

/// A resource addressed by a dataplane operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    /// A routing domain, by id.
    Vrf(u16),
    /// An interface binding inside a routing domain.
    Interface { vrf_id: u16, if_id: u16 },
    /// An interface name, which is unique per backend.
    InterfaceName(String),
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Vrf(vrf_id) => write!(f, "vrf {}", vrf_id),
            Resource::Interface { vrf_id, if_id } => {
                write!(f, "interface {} in vrf {}", if_id, vrf_id)
            }
            Resource::InterfaceName(name) => write!(f, "interface name '{}'", name),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataplaneError {
    /// The registry has no constructor for the requested type identifier.
    #[error("Unsupported dataplane type: '{dataplane_type}'")]
    UnsupportedDataplane { dataplane_type: String },

    /// The VRF or interface binding already exists.
    #[error("Duplicate resource: {0} already exists")]
    DuplicateResource(Resource),

    /// The VRF or interface binding does not exist.
    #[error("Not found: {0} does not exist")]
    NotFound(Resource),

    /// The substrate behind the backend could not be reached.
    #[error("Dataplane backend '{backend}' unavailable: {reason}")]
    BackendUnavailable {
        backend: &'static str,
        reason: String,
    },
}

impl DataplaneError {
    /// Only transport-level failures are worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(self, DataplaneError::BackendUnavailable { .. })
    }

    pub fn unsupported(dataplane_type: impl Into<String>) -> Self {
        DataplaneError::UnsupportedDataplane {
            dataplane_type: dataplane_type.into(),
        }
    }
}

pub type DataplaneResult<T> = Result<T, DataplaneError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_backend_unavailable_is_retryable() {
        let cases = vec![
            (DataplaneError::unsupported("bogus"), false),
            (DataplaneError::DuplicateResource(Resource::Vrf(1)), false),
            (
                DataplaneError::NotFound(Resource::Interface { vrf_id: 1, if_id: 10 }),
                false,
            ),
            (
                DataplaneError::BackendUnavailable {
                    backend: "vpp",
                    reason: "api socket closed".to_string(),
                },
                true,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.is_retryable(), expected, "retryable mismatch for {}", error);
        }
    }

    #[test]
    fn test_error_messages_name_the_resource() {
        let err = DataplaneError::NotFound(Resource::Interface { vrf_id: 1, if_id: 10 });
        assert_eq!(err.to_string(), "Not found: interface 10 in vrf 1 does not exist");

        let err = DataplaneError::DuplicateResource(Resource::InterfaceName("xfrm10".to_string()));
        assert!(err.to_string().contains("interface name 'xfrm10'"));

        let err = DataplaneError::unsupported("dpdk");
        assert_eq!(err.to_string(), "Unsupported dataplane type: 'dpdk'");
    }
}
