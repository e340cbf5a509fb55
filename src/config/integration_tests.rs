#[cfg(test)]
mod integration_tests {
    use crate::config::{load_and_validate_config, load_config, Provisioner};
    use crate::errors::ConfigError;
    use crate::model::InterfaceType;
    use crate::registry::DataplaneRegistry;
    use std::time::Duration;

    /// Test that YAML configurations can be loaded and parsed correctly
    #[test]
    fn test_blue_red_yaml_loading() {
        let config = load_and_validate_config("configs/blue-red.yaml").unwrap();

        assert_eq!(config.dataplane, "linux");
        assert_eq!(config.effective_log_level(), "info");
        assert_eq!(config.networks.len(), 2);
        assert_eq!(config.networks["blue"].vrf_id, 1);
        assert_eq!(config.networks["red"].vrf_id, 2);
        assert_eq!(
            config.networks["blue"].interfaces["xfrm11"].interface_type,
            InterfaceType::XfrmTunnel
        );
    }

    /// Test backend options are read and clamped
    #[test]
    fn test_vpp_retry_yaml_loading() {
        let config = load_and_validate_config("configs/vpp-retry.yaml").unwrap();

        assert_eq!(config.dataplane, "vpp");
        assert_eq!(config.effective_log_level(), "debug");
        assert_eq!(config.backend_options.get_timeout(), Duration::from_millis(500));
        assert_eq!(config.backend_options.get_retry_attempts(), 5);
        assert_eq!(config.backend_options.get_retry_backoff(), Duration::from_millis(10));
        assert_eq!(config.networks["blue"].netifs()[1].id, 100);
    }

    /// Test TOML configs load through the same path
    #[test]
    fn test_dry_run_toml_loading() {
        let config = load_and_validate_config("configs/dry-run.toml").unwrap();

        assert_eq!(config.dataplane, "dry_run");
        assert_eq!(config.networks.len(), 2);
        assert_eq!(
            config.networks["green"].interfaces["lo3"].interface_type,
            InterfaceType::Loopback
        );
    }

    /// Test that validation reports every conflict in the file
    #[test]
    fn test_invalid_duplicates_rejected() {
        // parses fine on its own
        assert!(load_config("configs/invalid-duplicates.yaml").is_ok());

        match load_and_validate_config("configs/invalid-duplicates.yaml") {
            Err(ConfigError::Invalid(errors)) => {
                assert_eq!(errors.len(), 2);
                assert!(matches!(errors[0], ConfigError::DuplicateVrfId { vrf_id: 1, .. }));
                assert!(matches!(errors[1], ConfigError::DuplicateInterfaceName { .. }));
            }
            other => panic!("Expected Invalid, got {:?}", other),
        }
    }

    /// Test every shipped config provisions and tears down on its own backend
    #[tokio::test]
    async fn test_configs_apply_and_teardown() {
        for path in ["configs/blue-red.yaml", "configs/vpp-retry.yaml", "configs/dry-run.toml"] {
            let config = load_and_validate_config(path).unwrap();
            let registry = DataplaneRegistry::with_builtin_backends(&config.backend_options);
            let dp = registry.create(&config.dataplane).unwrap();
            let provisioner = Provisioner::new(dp.as_ref());

            let applied = provisioner.apply(&config).await.unwrap();
            let expected_interfaces: usize =
                config.networks.values().map(|n| n.interfaces.len()).sum();
            assert_eq!(applied.vrfs, config.networks.len(), "{}", path);
            assert_eq!(applied.interfaces, expected_interfaces, "{}", path);

            if config.dataplane != "dry_run" {
                assert_eq!(dp.snapshot().await.interface_count(), expected_interfaces, "{}", path);
            }

            let torn_down = provisioner.teardown(&config).await.unwrap();
            assert_eq!(torn_down, applied, "{}", path);
            assert!(dp.snapshot().await.is_empty(), "{}", path);
        }
    }
}
