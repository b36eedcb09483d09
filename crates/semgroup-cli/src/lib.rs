#![allow(missing_docs)]
#![warn(clippy::all)]

//! Group lifecycle tooling for a deployed Semaphore contract.

pub mod artifacts;
pub mod config;
pub mod contracts;
pub mod mock_groups;

pub use artifacts::{ensure_artifacts, DEFAULT_ARTIFACTS_URL};
pub use config::{
    get_deployed_contract_address, Deployments, NetworkConfig, ResolvedNetwork, ScriptConfig,
};
pub use contracts::{CreatedGroup, SemaphoreClient, SemaphoreContract};
pub use mock_groups::{create_mock_groups, mock_identities, MockGroupParams, MockGroupReport};
