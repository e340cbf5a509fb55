// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use vrfplane::model::NetworkInterfaceConfig;
use vrfplane::registry::DataplaneFactory;

/// Walk one routing domain through its lifecycle on a freshly created handle
async fn run_lifecycle(dataplane_type: &str) -> Result<(), Box<dyn std::error::Error>> {
    let dp = DataplaneFactory::create(dataplane_type)?;
    println!("--- {} ---", dp.kind());

    dp.create_vrf("blue", 1).await?;
    println!("Created VRF blue (1)");

    let netif = NetworkInterfaceConfig::new("xfrm10", 10, "ipip_tunnel");
    dp.add_vrf_interface(1, netif).await?;
    println!("Bound xfrm10 (10) to VRF 1");
    println!("{}", serde_json::to_string_pretty(&dp.snapshot().await)?);

    // a second bind of the same id must be rejected
    let again = NetworkInterfaceConfig::new("xfrm10b", 10, "ipip_tunnel");
    match dp.add_vrf_interface(1, again).await {
        Ok(()) => println!("Unexpected: duplicate binding accepted"),
        Err(e) => println!("Rejected as expected: {}", e),
    }

    dp.remove_vrf_interface(1, 10).await?;
    dp.delete_vrf(1).await?;
    println!("Removed xfrm10 and deleted VRF 1; empty = {}\n", dp.snapshot().await.is_empty());

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== vrfplane Bridge Demo ===\n");
    println!("Registered dataplanes: {:?}\n", DataplaneFactory::available_types());

    // twice on linux: the id is reusable once the domain is deleted
    run_lifecycle("linux").await?;
    run_lifecycle("linux").await?;
    run_lifecycle("vpp").await?;

    match DataplaneFactory::create("dpdk") {
        Ok(_) => println!("Unexpected: dpdk is registered"),
        Err(e) => println!("{}", e),
    }

    Ok(())
}
