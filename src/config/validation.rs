//! Configuration validation for network definitions.
//!
//! Checks run in one pass and every failure is collected, so a single run
//! reports everything wrong with a file:
//!
//! 1. **Dataplane**: the configured backend type is registered
//! 2. **VRF ids**: no two networks share a `vrf_id`
//! 3. **Interface ids**: ids are unique within each network
//! 4. **Interface names**: a name appears in at most one network
//!
//! The same invariants are enforced again at runtime by stateful backends;
//! validating up front keeps a bad file from leaving a half-provisioned
//! dataplane behind.
//!
//! # Example
//! ```rust
//! use vrfplane::config::{validate_config, Config};
//!
//! let config: Config = serde_yaml::from_str(r#"
//! dataplane: linux
//! networks:
//!   blue: { vrf_id: 1 }
//!   red: { vrf_id: 1 }
//! "#).unwrap();
//!
//! let available = vec!["linux".to_string()];
//! let errors = validate_config(&config, &available).unwrap_err();
//! assert_eq!(errors.len(), 1);
//! ```

use std::collections::HashMap;

use crate::config::Config;
use crate::errors::ConfigError;

/// Validate a configuration against the set of registered dataplane types.
pub fn validate_config(config: &Config, available: &[String]) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !available.iter().any(|t| t == &config.dataplane) {
        errors.push(ConfigError::UnknownDataplane {
            dataplane: config.dataplane.clone(),
            available: available.to_vec(),
        });
    }

    errors.extend(validate_vrf_ids(config));
    errors.extend(validate_interface_ids(config));
    errors.extend(validate_interface_names(config));

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_vrf_ids(config: &Config) -> Vec<ConfigError> {
    let mut owners: HashMap<u16, &str> = HashMap::new();
    let mut errors = Vec::new();

    for (network, network_cfg) in &config.networks {
        if let Some(first) = owners.insert(network_cfg.vrf_id, network) {
            errors.push(ConfigError::DuplicateVrfId {
                vrf_id: network_cfg.vrf_id,
                first: first.to_string(),
                second: network.clone(),
            });
            // keep the first owner for subsequent reports
            owners.insert(network_cfg.vrf_id, first);
        }
    }

    errors
}

fn validate_interface_ids(config: &Config) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    for (network, network_cfg) in &config.networks {
        let mut owners: HashMap<u16, &str> = HashMap::new();
        for (interface, interface_cfg) in &network_cfg.interfaces {
            match owners.get(&interface_cfg.id) {
                Some(first) => errors.push(ConfigError::DuplicateInterfaceId {
                    network: network.clone(),
                    if_id: interface_cfg.id,
                    first: first.to_string(),
                    second: interface.clone(),
                }),
                None => {
                    owners.insert(interface_cfg.id, interface);
                }
            }
        }
    }

    errors
}

fn validate_interface_names(config: &Config) -> Vec<ConfigError> {
    let mut owners: HashMap<&str, &str> = HashMap::new();
    let mut errors = Vec::new();

    for (network, network_cfg) in &config.networks {
        for interface in network_cfg.interfaces.keys() {
            match owners.get(interface.as_str()) {
                Some(first) => errors.push(ConfigError::DuplicateInterfaceName {
                    interface: interface.clone(),
                    first: first.to_string(),
                    second: network.clone(),
                }),
                None => {
                    owners.insert(interface, network);
                }
            }
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn available() -> Vec<String> {
        vec!["dry_run".to_string(), "linux".to_string(), "vpp".to_string()]
    }

    fn parse(yaml: &str) -> Config {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_validate_config_table_driven() {
        struct TestCase {
            name: &'static str,
            yaml: &'static str,
            expected_errors: Vec<&'static str>,
        }

        let test_cases = vec![
            TestCase {
                name: "valid single network",
                yaml: r#"
networks:
  blue:
    vrf_id: 1
    interfaces:
      xfrm10: { id: 10, type: ipip_tunnel }
"#,
                expected_errors: vec![],
            },
            TestCase {
                name: "empty networks",
                yaml: "dataplane: vpp\nnetworks: {}",
                expected_errors: vec![],
            },
            TestCase {
                name: "unknown dataplane",
                yaml: "dataplane: dpdk",
                expected_errors: vec!["Unknown dataplane type 'dpdk'"],
            },
            TestCase {
                name: "duplicate vrf id",
                yaml: r#"
networks:
  blue: { vrf_id: 1 }
  red: { vrf_id: 1 }
"#,
                expected_errors: vec!["VRF id 1 is used by both 'blue' and 'red'"],
            },
            TestCase {
                name: "duplicate interface id within a network",
                yaml: r#"
networks:
  blue:
    vrf_id: 1
    interfaces:
      xfrm10: { id: 10, type: ipip_tunnel }
      xfrm11: { id: 10, type: ipip_tunnel }
"#,
                expected_errors: vec!["Network 'blue': interface id 10 is used by both 'xfrm10' and 'xfrm11'"],
            },
            TestCase {
                name: "same interface id in different networks is fine",
                yaml: r#"
networks:
  blue:
    vrf_id: 1
    interfaces:
      xfrm10: { id: 10, type: ipip_tunnel }
  red:
    vrf_id: 2
    interfaces:
      xfrm20: { id: 10, type: ipip_tunnel }
"#,
                expected_errors: vec![],
            },
            TestCase {
                name: "interface name reused across networks",
                yaml: r#"
networks:
  blue:
    vrf_id: 1
    interfaces:
      eth0: { id: 1, type: ethernet }
  red:
    vrf_id: 2
    interfaces:
      eth0: { id: 2, type: ethernet }
"#,
                expected_errors: vec!["Interface 'eth0' is declared in both 'blue' and 'red'"],
            },
            TestCase {
                name: "every problem reported at once",
                yaml: r#"
dataplane: dpdk
networks:
  blue: { vrf_id: 3 }
  green: { vrf_id: 3 }
  red: { vrf_id: 3 }
"#,
                expected_errors: vec![
                    "Unknown dataplane type 'dpdk'",
                    "VRF id 3 is used by both 'blue' and 'green'",
                    "VRF id 3 is used by both 'blue' and 'red'",
                ],
            },
        ];

        for test_case in test_cases {
            let config = parse(test_case.yaml);
            let result = validate_config(&config, &available());

            match result {
                Ok(()) => assert!(
                    test_case.expected_errors.is_empty(),
                    "Test case '{}': expected errors {:?}, got none",
                    test_case.name,
                    test_case.expected_errors
                ),
                Err(errors) => {
                    let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
                    assert_eq!(
                        messages.len(),
                        test_case.expected_errors.len(),
                        "Test case '{}': got {:?}",
                        test_case.name,
                        messages
                    );
                    for (message, expected) in messages.iter().zip(&test_case.expected_errors) {
                        assert!(
                            message.contains(expected),
                            "Test case '{}': '{}' does not contain '{}'",
                            test_case.name,
                            message,
                            expected
                        );
                    }
                }
            }
        }
    }
}
