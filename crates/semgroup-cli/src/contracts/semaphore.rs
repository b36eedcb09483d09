use async_trait::async_trait;
use ethers::types::{Address, H256, U256};
use semgroup_crypto::SemaphoreProof;
use semgroup_types::{SemgroupResult, Word};

/// Group handle and the transaction that created it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CreatedGroup {
    pub group_id: U256,
    pub tx_hash: H256,
}

/// The Semaphore calls the mock-groups procedure depends on.
///
/// Mutating calls resolve once the transaction is mined and return its hash.
#[async_trait]
pub trait SemaphoreContract: Send + Sync {
    async fn create_group(&self, admin: Address) -> SemgroupResult<CreatedGroup>;

    async fn add_members(&self, group_id: U256, members: &[Word]) -> SemgroupResult<H256>;

    async fn remove_member(
        &self,
        group_id: U256,
        member: Word,
        siblings: &[Word],
    ) -> SemgroupResult<H256>;

    async fn update_member(
        &self,
        group_id: U256,
        old_member: Word,
        new_member: Word,
        siblings: &[Word],
    ) -> SemgroupResult<H256>;

    async fn validate_proof(&self, group_id: U256, proof: &SemaphoreProof) -> SemgroupResult<H256>;

    async fn merkle_tree_root(&self, group_id: U256) -> SemgroupResult<Word>;

    async fn merkle_tree_size(&self, group_id: U256) -> SemgroupResult<u64>;
}
