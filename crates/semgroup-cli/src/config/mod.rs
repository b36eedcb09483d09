mod deployments;
mod network;
mod script;

pub use deployments::{
    get_deployed_contract_address, DeployedContract, Deployments, NetworkDeployment,
};
pub use network::{NetworkConfig, HARDHAT_DEV_PRIVATE_KEY, SUPPORTED_NETWORKS};
pub use script::{LoggingConfig, ResolvedNetwork, ScriptConfig};

#[cfg(test)]
mod tests {
    use super::*;
    use semgroup_types::SEMAPHORE_CONTRACT_NAME;

    const DEPLOYMENTS: &str = r#"[
        {
            "network": "localhost",
            "contracts": [
                { "name": "SemaphoreVerifier", "address": "0x5FbDB2315678afecb367f032d93F642f64180aa3" },
                { "name": "Semaphore", "address": "0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512" }
            ]
        },
        {
            "network": "sepolia",
            "contracts": [{ "name": "Semaphore", "address": "not-an-address" }]
        }
    ]"#;

    #[test]
    fn test_missing_network_is_config_error() {
        let config = ScriptConfig::default();

        let err = config.resolve_network(None).unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("Please, define a supported network"));

        assert!(config.resolve_network(Some("  ")).unwrap_err().is_config());
    }

    #[test]
    fn test_unknown_network() {
        let config = ScriptConfig::default();
        let err = config.resolve_network(Some("goerli")).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_builtin_networks() {
        let config = ScriptConfig::default();
        for name in SUPPORTED_NETWORKS {
            let resolved = config.resolve_network(Some(name)).unwrap();
            assert_eq!(&resolved.name, name);
        }

        let hardhat = config.resolve_network(Some("hardhat")).unwrap();
        assert_eq!(hardhat.config.chain_id, 31337);
        assert_eq!(
            hardhat.config.private_key.as_deref(),
            Some(HARDHAT_DEV_PRIVATE_KEY)
        );
        assert_eq!(config.resolve_network(Some("base")).unwrap().config.chain_id, 8453);
        assert!(config.resolve_network(Some("mainnet")).unwrap().config.private_key.is_none());
    }

    #[test]
    fn test_configured_network_overrides_preset() {
        let config = ScriptConfig::from_toml(
            r#"
            artifacts_dir = "/tmp/keys"

            [networks.sepolia]
            rpc_url = "https://sepolia.example.org"
            chain_id = 11155111
            private_key = "0x01"

            [networks.devnet]
            rpc_url = "http://127.0.0.1:9545"
            chain_id = 1337
            "#,
        )
        .unwrap();

        assert_eq!(config.artifacts_dir.to_str(), Some("/tmp/keys"));
        assert_eq!(
            config.deployments.to_str(),
            Some("./deployed-contracts.json")
        );

        let sepolia = config.resolve_network(Some("sepolia")).unwrap();
        assert_eq!(sepolia.config.rpc_url, "https://sepolia.example.org");
        assert_eq!(sepolia.config.private_key.as_deref(), Some("0x01"));

        let devnet = config.resolve_network(Some("devnet")).unwrap();
        assert_eq!(devnet.config.chain_id, 1337);
        assert!(devnet.config.private_key.is_none());
    }

    #[test]
    fn test_validate_rejects_bad_network() {
        let config = ScriptConfig::from_toml(
            r#"
            [networks.broken]
            rpc_url = ""
            chain_id = 1
            "#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_artifacts_url() {
        let config = ScriptConfig::default();
        assert_eq!(config.artifacts_url, crate::DEFAULT_ARTIFACTS_URL);

        let config = ScriptConfig::from_toml(r#"artifacts_url = "http://127.0.0.1:8000/semaphore""#)
            .unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.artifacts_url, "http://127.0.0.1:8000/semaphore");

        let config = ScriptConfig::from_toml(r#"artifacts_url = "./local""#).unwrap();
        assert!(config.validate().unwrap_err().is_config());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = ScriptConfig::load("/nonexistent/semgroup.toml").unwrap();
        assert!(config.networks.is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("semgroup-{}.toml", std::process::id()));
        let mut config = ScriptConfig::default();
        config
            .networks
            .insert("devnet".into(), NetworkConfig::localhost());
        config.save(&path).unwrap();

        let loaded = ScriptConfig::load(&path).unwrap();
        assert_eq!(loaded.networks.get("devnet"), Some(&NetworkConfig::localhost()));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_deployed_contract_address() {
        let deployments = Deployments::from_json(DEPLOYMENTS).unwrap();

        let address = deployments
            .get_deployed_contract_address("localhost", SEMAPHORE_CONTRACT_NAME)
            .unwrap();
        assert_eq!(
            hex::encode(address.as_bytes()),
            "e7f1725e7734ce288f8367e1bb143e90bb3f0512"
        );

        assert!(deployments
            .get_deployed_contract_address("localhost", "Missing")
            .is_err());
        assert!(deployments
            .get_deployed_contract_address("base", SEMAPHORE_CONTRACT_NAME)
            .is_err());
        assert!(deployments
            .get_deployed_contract_address("sepolia", SEMAPHORE_CONTRACT_NAME)
            .unwrap_err()
            .is_config());
    }

    #[test]
    fn test_deployments_file() {
        let path = std::env::temp_dir().join(format!("semgroup-deployments-{}.json", std::process::id()));
        std::fs::write(&path, DEPLOYMENTS).unwrap();

        let address =
            get_deployed_contract_address(&path, "localhost", SEMAPHORE_CONTRACT_NAME).unwrap();
        assert!(!address.is_zero());

        let _ = std::fs::remove_file(&path);
        assert!(get_deployed_contract_address(&path, "localhost", SEMAPHORE_CONTRACT_NAME)
            .unwrap_err()
            .is_config());
    }
}
