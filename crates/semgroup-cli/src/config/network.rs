use serde::{Deserialize, Serialize};

/// Account #0 of the Hardhat/Anvil development mnemonic. Only ever used for
/// the local chains.
pub const HARDHAT_DEV_PRIVATE_KEY: &str =
    "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

pub const SUPPORTED_NETWORKS: &[&str] =
    &["localhost", "hardhat", "sepolia", "mainnet", "arbitrum", "base"];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub rpc_url: String,
    pub chain_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self::localhost()
    }
}

impl NetworkConfig {
    pub fn localhost() -> Self {
        Self {
            rpc_url: "http://localhost:8545".to_string(),
            chain_id: 31337,
            private_key: Some(HARDHAT_DEV_PRIVATE_KEY.to_string()),
        }
    }

    pub fn sepolia() -> Self {
        Self {
            rpc_url: "https://ethereum-sepolia-rpc.publicnode.com".to_string(),
            chain_id: 11155111,
            private_key: None,
        }
    }

    pub fn mainnet() -> Self {
        Self {
            rpc_url: "https://ethereum-rpc.publicnode.com".to_string(),
            chain_id: 1,
            private_key: None,
        }
    }

    pub fn arbitrum() -> Self {
        Self {
            rpc_url: "https://arb1.arbitrum.io/rpc".to_string(),
            chain_id: 42161,
            private_key: None,
        }
    }

    pub fn base() -> Self {
        Self {
            rpc_url: "https://mainnet.base.org".to_string(),
            chain_id: 8453,
            private_key: None,
        }
    }

    /// Preset for one of [`SUPPORTED_NETWORKS`].
    pub fn builtin(name: &str) -> Option<Self> {
        match name {
            "localhost" | "hardhat" => Some(Self::localhost()),
            "sepolia" => Some(Self::sepolia()),
            "mainnet" => Some(Self::mainnet()),
            "arbitrum" => Some(Self::arbitrum()),
            "base" => Some(Self::base()),
            _ => None,
        }
    }
}
