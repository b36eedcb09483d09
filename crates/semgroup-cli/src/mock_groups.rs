//! Full lifecycle of one Semaphore group against a deployed contract.
//!
//! The local [`Group`] replays every mutation before the matching contract
//! call so that the sibling paths it hands out are the ones the contract
//! expects for its own tree.

use ethers::types::{Address, H256, U256};
use semgroup_crypto::{Group, Identity, Prover, SemaphoreProof};
use semgroup_types::{SemgroupError, SemgroupResult, Word};
use serde::Serialize;
use tracing::{debug, info};

use crate::contracts::SemaphoreContract;

#[derive(Clone, Debug)]
pub struct MockGroupParams {
    /// Members are the identities seeded with `"0"`, `"1"`, ...
    pub member_count: usize,
    pub removed_index: usize,
    /// The updated member takes the commitment of the removed one.
    pub updated_index: usize,
    pub prover_index: usize,
    pub message: Word,
    pub scope: Word,
    pub merkle_tree_depth: usize,
    pub check_roots: bool,
}

impl Default for MockGroupParams {
    fn default() -> Self {
        Self {
            member_count: 3,
            removed_index: 2,
            updated_index: 1,
            prover_index: 0,
            message: Word::from_u64(42),
            scope: Word::from_u64(9),
            merkle_tree_depth: 10,
            check_roots: false,
        }
    }
}

impl MockGroupParams {
    pub fn validate(&self) -> SemgroupResult<()> {
        let n = self.member_count;
        if n == 0 {
            return Err(SemgroupError::Config("At least one member is required".into()));
        }
        for (what, index) in [
            ("removed", self.removed_index),
            ("updated", self.updated_index),
            ("prover", self.prover_index),
        ] {
            if index >= n {
                return Err(SemgroupError::Config(format!(
                    "The {} index {} is out of range for {} members",
                    what, index, n
                )));
            }
        }
        if self.removed_index == self.updated_index {
            return Err(SemgroupError::Config(
                "The removed and updated members must differ".into(),
            ));
        }
        if self.prover_index == self.removed_index || self.prover_index == self.updated_index {
            return Err(SemgroupError::Config(
                "The prover must still be a member after the update".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct Transactions {
    pub create_group: H256,
    pub add_members: H256,
    pub remove_member: H256,
    pub update_member: H256,
    pub validate_proof: H256,
}

#[derive(Clone, Debug, Serialize)]
pub struct MockGroupReport {
    pub group_id: String,
    pub members: Vec<Word>,
    pub final_members: Vec<Word>,
    pub merkle_tree_root: Option<Word>,
    pub proof: SemaphoreProof,
    pub transactions: Transactions,
}

pub fn mock_identities(count: usize) -> Vec<Identity> {
    (0..count).map(|i| Identity::from_seed(&i.to_string())).collect()
}

/// Runs create, add, remove, update and validate in that order, each call
/// awaited before the next one starts.
pub async fn create_mock_groups<C, P>(
    contract: &C,
    admin: Address,
    params: &MockGroupParams,
    prover: &P,
) -> SemgroupResult<MockGroupReport>
where
    C: SemaphoreContract + ?Sized,
    P: Prover + ?Sized,
{
    params.validate()?;

    let identities = mock_identities(params.member_count);
    let members: Vec<Word> = identities.iter().map(Identity::commitment).collect();
    let mut group = Group::new(&members)?;

    info!("Creating new group...");
    let created = contract.create_group(admin).await?;
    let group_id = created.group_id;

    info!("Adding {} members to group '{}'...", members.len(), group_id);
    let add_tx = contract.add_members(group_id, &members).await?;
    check_root(contract, params, group_id, &group).await?;

    info!("Removing member {} from group '{}'...", params.removed_index, group_id);
    group.remove_member(params.removed_index)?;
    let siblings = group.siblings(params.removed_index)?;
    let remove_tx = contract
        .remove_member(group_id, members[params.removed_index], &siblings)
        .await?;
    check_root(contract, params, group_id, &group).await?;

    info!("Updating member {} of group '{}'...", params.updated_index, group_id);
    let replacement = members[params.removed_index];
    group.update_member(params.updated_index, &replacement)?;
    let siblings = group.siblings(params.updated_index)?;
    let update_tx = contract
        .update_member(group_id, members[params.updated_index], replacement, &siblings)
        .await?;
    check_root(contract, params, group_id, &group).await?;

    info!(
        "Validating a proof generated by member {} of group '{}'...",
        params.prover_index, group_id
    );
    let proof = prover.prove(
        &identities[params.prover_index],
        &group,
        params.message,
        params.scope,
        Some(params.merkle_tree_depth),
    )?;
    debug!("Proof nullifier: {}", proof.nullifier);
    let validate_tx = contract.validate_proof(group_id, &proof).await?;

    Ok(MockGroupReport {
        group_id: group_id.to_string(),
        members,
        final_members: group.members(),
        merkle_tree_root: group.root(),
        proof,
        transactions: Transactions {
            create_group: created.tx_hash,
            add_members: add_tx,
            remove_member: remove_tx,
            update_member: update_tx,
            validate_proof: validate_tx,
        },
    })
}

async fn check_root<C>(
    contract: &C,
    params: &MockGroupParams,
    group_id: U256,
    group: &Group,
) -> SemgroupResult<()>
where
    C: SemaphoreContract + ?Sized,
{
    if !params.check_roots {
        return Ok(());
    }

    let local = group.root().unwrap_or(Word::ZERO);
    let onchain = contract.merkle_tree_root(group_id).await?;
    if local != onchain {
        return Err(SemgroupError::GroupOutOfSync {
            local: format!("root {}", local.to_hex()),
            onchain: format!("root {}", onchain.to_hex()),
        });
    }

    // Removed members still occupy a leaf on both sides.
    let local_size = group.size() as u64;
    let onchain_size = contract.merkle_tree_size(group_id).await?;
    if local_size != onchain_size {
        return Err(SemgroupError::GroupOutOfSync {
            local: format!("size {}", local_size),
            onchain: format!("size {}", onchain_size),
        });
    }

    debug!("Group '{}' in sync: root {}, size {}", group_id, local, local_size);
    Ok(())
}
