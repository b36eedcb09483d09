use super::commands::{Cli, OutputFormat};
use ethers::types::Address;
use semgroup_cli::{
    create_mock_groups, ensure_artifacts, get_deployed_contract_address, MockGroupParams,
    MockGroupReport, ResolvedNetwork, ScriptConfig, SemaphoreClient,
};
use semgroup_crypto::SnarkArtifacts;
use semgroup_types::{SemgroupError, SemgroupResult, SEMAPHORE_CONTRACT_NAME};
use tracing::info;

/// Everything needed to reach the contract, resolved before any connection is made.
#[derive(Debug)]
pub struct Target {
    pub network: ResolvedNetwork,
    pub address: Address,
    pub private_key: String,
}

pub fn resolve_target(cli: &Cli, config: &ScriptConfig) -> SemgroupResult<Target> {
    let mut network = config.resolve_network(cli.network.as_deref())?;

    if let Some(ref url) = cli.rpc_url {
        network.config.rpc_url = url.clone();
    }
    if let Some(ref key) = cli.private_key {
        network.config.private_key = Some(key.clone());
    }

    let deployments = cli.deployments.as_ref().unwrap_or(&config.deployments);
    let address =
        get_deployed_contract_address(deployments, &network.name, SEMAPHORE_CONTRACT_NAME)?;

    let private_key = network.config.private_key.clone().ok_or_else(|| {
        SemgroupError::Wallet(format!(
            "No private key for network '{}'. Set SEMGROUP_PRIVATE_KEY or --private-key",
            network.name
        ))
    })?;

    Ok(Target {
        network,
        address,
        private_key,
    })
}

pub async fn run(cli: &Cli, config: &ScriptConfig) -> SemgroupResult<MockGroupReport> {
    let target = resolve_target(cli, config)?;
    info!(
        "{} contract on '{}': {:?}",
        SEMAPHORE_CONTRACT_NAME, target.network.name, target.address
    );

    let params = MockGroupParams {
        check_roots: cli.check_roots,
        ..Default::default()
    };

    let mut client = SemaphoreClient::new(&target.network.config, target.address);
    client.connect().await?;
    let admin = client.set_wallet(&target.private_key)?;

    let artifacts_dir = cli
        .artifacts_dir
        .clone()
        .unwrap_or_else(|| config.artifacts_dir.clone());
    let depth = params.merkle_tree_depth;
    ensure_artifacts(&artifacts_dir, &config.artifacts_url, depth).await?;
    let artifacts =
        tokio::task::spawn_blocking(move || SnarkArtifacts::load(&artifacts_dir, depth))
            .await
            .map_err(|e| SemgroupError::Internal(format!("Artifact task failed: {}", e)))??;

    create_mock_groups(&client, admin, &params, &artifacts).await
}

pub fn print_report(report: &MockGroupReport, format: &OutputFormat) -> SemgroupResult<()> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(report)
                .map_err(|e| SemgroupError::Serialization(e.to_string()))?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            println!("Group:       {}", report.group_id);
            println!("Members:");
            for (i, (before, after)) in report
                .members
                .iter()
                .zip(report.final_members.iter())
                .enumerate()
            {
                if before == after {
                    println!("  [{}] {}", i, before);
                } else {
                    println!("  [{}] {} -> {}", i, before, after);
                }
            }
            if let Some(root) = report.merkle_tree_root {
                println!("Root:        {}", root);
            }
            println!("Nullifier:   {}", report.proof.nullifier);
            println!("Transactions:");
            let txs = &report.transactions;
            println!("  createGroup    {:?}", txs.create_group);
            println!("  addMembers     {:?}", txs.add_members);
            println!("  removeMember   {:?}", txs.remove_member);
            println!("  updateMember   {:?}", txs.update_member);
            println!("  validateProof  {:?}", txs.validate_proof);
        }
    }
    Ok(())
}

/// Process status for the outcome of a run: 0 on success, 1 on any error.
pub fn exit_status<T>(result: &SemgroupResult<T>) -> u8 {
    match result {
        Ok(_) => 0,
        Err(_) => 1,
    }
}
