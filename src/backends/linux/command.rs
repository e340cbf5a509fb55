// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt::{Display, Formatter};

/// Kernel link changes, rendered in iproute2 syntax for logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkCommand<'a> {
    AddVrf { device: &'a str, table: u32 },
    DelLink { device: &'a str },
    SetMaster { link: &'a str, master: &'a str },
    NoMaster { link: &'a str },
}

impl LinkCommand<'_> {
    pub fn log(&self) {
        tracing::debug!(command = %self, "netlink request");
    }
}

impl Display for LinkCommand<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            LinkCommand::AddVrf { device, table } => {
                write!(f, "ip link add {} type vrf table {}", device, table)
            }
            LinkCommand::DelLink { device } => write!(f, "ip link del {}", device),
            LinkCommand::SetMaster { link, master } => {
                write!(f, "ip link set dev {} master {}", link, master)
            }
            LinkCommand::NoMaster { link } => write!(f, "ip link set dev {} nomaster", link),
        }
    }
}

/// Device name of the VRF master for a routing domain.
pub fn vrf_device_name(vrf_id: u16) -> String {
    format!("vrf{}", vrf_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_render_as_iproute2() {
        let cases = vec![
            (LinkCommand::AddVrf { device: "vrf1", table: 1 }, "ip link add vrf1 type vrf table 1"),
            (LinkCommand::DelLink { device: "vrf1" }, "ip link del vrf1"),
            (
                LinkCommand::SetMaster { link: "xfrm10", master: "vrf1" },
                "ip link set dev xfrm10 master vrf1",
            ),
            (LinkCommand::NoMaster { link: "xfrm10" }, "ip link set dev xfrm10 nomaster"),
        ];

        for (command, expected) in cases {
            assert_eq!(command.to_string(), expected);
        }
    }
}
