//! Addresses of deployed contracts, keyed by network and contract name.
//!
//! ```json
//! [
//!   { "network": "sepolia", "contracts": [{ "name": "Semaphore", "address": "0x..." }] }
//! ]
//! ```

use ethers::types::Address;
use semgroup_types::{SemgroupError, SemgroupResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployedContract {
    pub name: String,
    pub address: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkDeployment {
    pub network: String,
    pub contracts: Vec<DeployedContract>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Deployments(pub Vec<NetworkDeployment>);

impl Deployments {
    pub fn load(path: impl AsRef<Path>) -> SemgroupResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            SemgroupError::Config(format!(
                "Failed to read deployments {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> SemgroupResult<Self> {
        serde_json::from_str(contents)
            .map_err(|e| SemgroupError::Config(format!("Failed to parse deployments: {}", e)))
    }

    pub fn get_deployed_contract_address(
        &self,
        network: &str,
        contract_name: &str,
    ) -> SemgroupResult<Address> {
        let deployment = self
            .0
            .iter()
            .find(|d| d.network == network)
            .ok_or_else(|| {
                SemgroupError::Config(format!("No contracts deployed on network '{}'", network))
            })?;

        let contract = deployment
            .contracts
            .iter()
            .find(|c| c.name == contract_name)
            .ok_or_else(|| {
                SemgroupError::Config(format!(
                    "Contract '{}' is not deployed on network '{}'",
                    contract_name, network
                ))
            })?;

        contract.address.parse::<Address>().map_err(|e| {
            SemgroupError::Config(format!(
                "Invalid address '{}' for contract '{}': {}",
                contract.address, contract_name, e
            ))
        })
    }
}

/// Reads the artifact at `path` and returns the address of `contract_name` on `network`.
pub fn get_deployed_contract_address(
    path: impl AsRef<Path>,
    network: &str,
    contract_name: &str,
) -> SemgroupResult<Address> {
    Deployments::load(path)?.get_deployed_contract_address(network, contract_name)
}
