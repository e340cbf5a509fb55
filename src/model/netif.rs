// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of interface being attached to a routing domain.
///
/// The set is open: well-known kinds get their own variant, anything else is
/// carried verbatim in [`InterfaceType::Other`]. The string tag is the wire
/// and config representation.
///
/// # Example
/// ```
/// use vrfplane::model::InterfaceType;
///
/// assert_eq!(InterfaceType::from("ipip_tunnel"), InterfaceType::IpipTunnel);
/// assert_eq!(InterfaceType::from("geneve").as_str(), "geneve");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum InterfaceType {
    IpipTunnel,
    XfrmTunnel,
    GreTunnel,
    VxlanTunnel,
    Ethernet,
    Loopback,
    Other(String),
}

impl InterfaceType {
    pub fn as_str(&self) -> &str {
        match self {
            InterfaceType::IpipTunnel => "ipip_tunnel",
            InterfaceType::XfrmTunnel => "xfrm_tunnel",
            InterfaceType::GreTunnel => "gre_tunnel",
            InterfaceType::VxlanTunnel => "vxlan_tunnel",
            InterfaceType::Ethernet => "ethernet",
            InterfaceType::Loopback => "loopback",
            InterfaceType::Other(tag) => tag,
        }
    }
}

impl From<&str> for InterfaceType {
    fn from(tag: &str) -> Self {
        match tag {
            "ipip_tunnel" => InterfaceType::IpipTunnel,
            "xfrm_tunnel" => InterfaceType::XfrmTunnel,
            "gre_tunnel" => InterfaceType::GreTunnel,
            "vxlan_tunnel" => InterfaceType::VxlanTunnel,
            "ethernet" => InterfaceType::Ethernet,
            "loopback" => InterfaceType::Loopback,
            other => InterfaceType::Other(other.to_string()),
        }
    }
}

impl From<String> for InterfaceType {
    fn from(tag: String) -> Self {
        InterfaceType::from(tag.as_str())
    }
}

impl From<InterfaceType> for String {
    fn from(kind: InterfaceType) -> Self {
        match kind {
            InterfaceType::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for InterfaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One interface to bind into a routing domain.
///
/// Built by the caller right before use; backends copy what they need and do
/// not hold on to the value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkInterfaceConfig {
    pub name: String,
    pub id: u16,
    #[serde(rename = "type")]
    pub interface_type: InterfaceType,
}

impl NetworkInterfaceConfig {
    pub fn new(name: impl Into<String>, id: u16, interface_type: impl Into<InterfaceType>) -> Self {
        Self {
            name: name.into(),
            id,
            interface_type: interface_type.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_and_unknown_tags() {
        let cases = vec![
            ("ipip_tunnel", InterfaceType::IpipTunnel),
            ("xfrm_tunnel", InterfaceType::XfrmTunnel),
            ("gre_tunnel", InterfaceType::GreTunnel),
            ("vxlan_tunnel", InterfaceType::VxlanTunnel),
            ("ethernet", InterfaceType::Ethernet),
            ("loopback", InterfaceType::Loopback),
            ("geneve", InterfaceType::Other("geneve".to_string())),
        ];

        for (tag, expected) in cases {
            let kind = InterfaceType::from(tag);
            assert_eq!(kind, expected, "tag '{}'", tag);
            assert_eq!(kind.as_str(), tag);
            assert_eq!(String::from(kind), tag);
        }
    }

    #[test]
    fn test_netif_deserializes_type_tag() {
        let yaml = r#"
name: xfrm10
id: 10
type: ipip_tunnel
"#;
        let netif: NetworkInterfaceConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(netif, NetworkInterfaceConfig::new("xfrm10", 10, "ipip_tunnel"));

        let json = serde_json::to_string(&netif).unwrap();
        assert!(json.contains(r#""type":"ipip_tunnel""#));
    }
}
