use super::bindings::{GroupCreatedFilter, Semaphore};
use super::convert::{proof_to_call, u256_to_word, word_to_u256, words_to_u256s};
use super::semaphore::{CreatedGroup, SemaphoreContract};
use crate::config::NetworkConfig;
use async_trait::async_trait;
use ethers::{
    abi::Detokenize,
    contract::{parse_log, ContractCall},
    middleware::SignerMiddleware,
    providers::{Http, Middleware, Provider},
    signers::{LocalWallet, Signer},
    types::{Address, TransactionReceipt, H256, U256, U64},
};
use semgroup_crypto::SemaphoreProof;
use semgroup_types::{SemgroupError, SemgroupResult, Word};
use std::sync::Arc;
use tracing::{debug, info};

type SignerClient = SignerMiddleware<Provider<Http>, LocalWallet>;

/// Semaphore contract reached over JSON-RPC with a local signing key.
pub struct SemaphoreClient {
    provider_url: String,
    chain_id: u64,
    address: Address,
    provider: Option<Arc<Provider<Http>>>,
    signer: Option<Arc<SignerClient>>,
}

impl SemaphoreClient {
    pub fn new(network: &NetworkConfig, address: Address) -> Self {
        Self {
            provider_url: network.rpc_url.clone(),
            chain_id: network.chain_id,
            address,
            provider: None,
            signer: None,
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn is_connected(&self) -> bool {
        self.provider.is_some()
    }

    pub async fn connect(&mut self) -> SemgroupResult<()> {
        info!("Connecting to RPC: {}", self.provider_url);

        let provider = Provider::<Http>::try_from(self.provider_url.as_str())
            .map_err(|e| SemgroupError::Network(format!("Failed to create provider: {}", e)))?;

        let chain_id = provider
            .get_chainid()
            .await
            .map_err(|e| SemgroupError::Network(format!("Failed to get chain ID: {}", e)))?;

        if chain_id.as_u64() != self.chain_id {
            return Err(SemgroupError::Network(format!(
                "Chain ID mismatch: expected {}, got {}",
                self.chain_id,
                chain_id.as_u64()
            )));
        }

        self.provider = Some(Arc::new(provider));

        info!("Connected to chain {}", self.chain_id);
        Ok(())
    }

    pub fn set_wallet(&mut self, private_key: &str) -> SemgroupResult<Address> {
        let provider = self
            .provider
            .as_ref()
            .ok_or_else(|| SemgroupError::Network("Not connected".into()))?
            .clone();

        let wallet: LocalWallet = private_key
            .trim()
            .parse()
            .map_err(|e| SemgroupError::Wallet(format!("Invalid private key: {}", e)))?;

        let wallet = wallet.with_chain_id(self.chain_id);
        let address = wallet.address();

        let client = SignerMiddleware::new((*provider).clone(), wallet);
        self.signer = Some(Arc::new(client));

        info!("Wallet set: {:?}", address);
        Ok(address)
    }

    pub fn wallet_address(&self) -> Option<Address> {
        self.signer.as_ref().map(|s| s.address())
    }

    fn writer(&self) -> SemgroupResult<Semaphore<SignerClient>> {
        let signer = self
            .signer
            .as_ref()
            .ok_or_else(|| SemgroupError::Wallet("No wallet configured".into()))?;
        Ok(Semaphore::new(self.address, signer.clone()))
    }

    fn reader(&self) -> SemgroupResult<Semaphore<Provider<Http>>> {
        let provider = self
            .provider
            .as_ref()
            .ok_or_else(|| SemgroupError::Network("Not connected".into()))?;
        Ok(Semaphore::new(self.address, provider.clone()))
    }
}

/// Sends `call` and waits for it to be mined. A reverted transaction is an error.
async fn confirm<D>(
    call: ContractCall<SignerClient, D>,
    action: &str,
) -> SemgroupResult<TransactionReceipt>
where
    D: Detokenize + Send + Sync,
{
    let pending = call
        .send()
        .await
        .map_err(|e| SemgroupError::Contract(format!("Failed to {}: {}", action, e)))?;

    let receipt = pending
        .await
        .map_err(|e| SemgroupError::Contract(format!("{} transaction failed: {}", action, e)))?
        .ok_or_else(|| SemgroupError::Contract(format!("No receipt for {}", action)))?;

    if receipt.status == Some(U64::zero()) {
        return Err(SemgroupError::Contract(format!(
            "{} transaction reverted: {:?}",
            action, receipt.transaction_hash
        )));
    }

    debug!("{} confirmed: {:?}", action, receipt.transaction_hash);
    Ok(receipt)
}

/// Group id from the first `GroupCreated` log of `receipt`.
pub(crate) fn group_id_from_receipt(receipt: &TransactionReceipt) -> SemgroupResult<U256> {
    receipt
        .logs
        .iter()
        .find_map(|log| parse_log::<GroupCreatedFilter>(log.clone()).ok())
        .map(|event| event.group_id)
        .ok_or_else(|| {
            SemgroupError::Contract(format!(
                "No GroupCreated event in transaction {:?}",
                receipt.transaction_hash
            ))
        })
}

#[async_trait]
impl SemaphoreContract for SemaphoreClient {
    async fn create_group(&self, admin: Address) -> SemgroupResult<CreatedGroup> {
        let contract = self.writer()?;
        let receipt = confirm(contract.create_group(admin), "create group").await?;
        let group_id = group_id_from_receipt(&receipt)?;

        info!("Group {} created: {:?}", group_id, receipt.transaction_hash);
        Ok(CreatedGroup {
            group_id,
            tx_hash: receipt.transaction_hash,
        })
    }

    async fn add_members(&self, group_id: U256, members: &[Word]) -> SemgroupResult<H256> {
        let contract = self.writer()?;
        let call = contract.add_members(group_id, words_to_u256s(members));
        let receipt = confirm(call, "add members").await?;
        Ok(receipt.transaction_hash)
    }

    async fn remove_member(
        &self,
        group_id: U256,
        member: Word,
        siblings: &[Word],
    ) -> SemgroupResult<H256> {
        let contract = self.writer()?;
        let call = contract.remove_member(group_id, word_to_u256(&member), words_to_u256s(siblings));
        let receipt = confirm(call, "remove member").await?;
        Ok(receipt.transaction_hash)
    }

    async fn update_member(
        &self,
        group_id: U256,
        old_member: Word,
        new_member: Word,
        siblings: &[Word],
    ) -> SemgroupResult<H256> {
        let contract = self.writer()?;
        let call = contract.update_member(
            group_id,
            word_to_u256(&old_member),
            word_to_u256(&new_member),
            words_to_u256s(siblings),
        );
        let receipt = confirm(call, "update member").await?;
        Ok(receipt.transaction_hash)
    }

    async fn validate_proof(&self, group_id: U256, proof: &SemaphoreProof) -> SemgroupResult<H256> {
        let contract = self.writer()?;
        let call = contract.validate_proof(group_id, proof_to_call(proof));
        let receipt = confirm(call, "validate proof").await?;
        Ok(receipt.transaction_hash)
    }

    async fn merkle_tree_root(&self, group_id: U256) -> SemgroupResult<Word> {
        let root = self
            .reader()?
            .get_merkle_tree_root(group_id)
            .call()
            .await
            .map_err(|e| SemgroupError::Contract(format!("Failed to get merkle tree root: {}", e)))?;
        Ok(u256_to_word(root))
    }

    async fn merkle_tree_size(&self, group_id: U256) -> SemgroupResult<u64> {
        let size = self
            .reader()?
            .get_merkle_tree_size(group_id)
            .call()
            .await
            .map_err(|e| SemgroupError::Contract(format!("Failed to get merkle tree size: {}", e)))?;
        Ok(size.low_u64())
    }
}
