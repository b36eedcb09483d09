use super::client::group_id_from_receipt;
use super::*;
use crate::config::NetworkConfig;
use ethers::contract::EthEvent;
use ethers::types::{Address, Log, TransactionReceipt, H256, U256};
use semgroup_crypto::SemaphoreProof;
use semgroup_types::{SemgroupError, Word};

fn group_created_log(group_id: u64) -> Log {
    let mut id_topic = [0u8; 32];
    U256::from(group_id).to_big_endian(&mut id_topic);

    Log {
        address: Address::repeat_byte(0x11),
        topics: vec![GroupCreatedFilter::signature(), H256(id_topic)],
        ..Default::default()
    }
}

#[test]
fn test_word_u256_conversion() {
    let word = Word::from_decimal(
        "21888242871839275222246405745257275088548364400416034343698204186575808495616",
    )
    .unwrap();
    let value = word_to_u256(&word);
    assert_eq!(value.to_string(), word.to_decimal());
    assert_eq!(u256_to_word(value), word);

    assert_eq!(word_to_u256(&Word::from_u64(42)), U256::from(42u64));
    assert_eq!(
        words_to_u256s(&[Word::from_u64(1), Word::from_u64(2)]),
        vec![U256::from(1u64), U256::from(2u64)]
    );
}

#[test]
fn test_proof_to_call_layout() {
    let proof = SemaphoreProof {
        merkle_tree_depth: 10,
        merkle_tree_root: Word::from_u64(7),
        nullifier: Word::from_u64(8),
        message: Word::from_u64(42),
        scope: Word::from_u64(9),
        points: std::array::from_fn(|i| Word::from_u64(100 + i as u64)),
    };

    let call = proof_to_call(&proof);
    assert_eq!(call.merkle_tree_depth, U256::from(10u64));
    assert_eq!(call.merkle_tree_root, U256::from(7u64));
    assert_eq!(call.nullifier, U256::from(8u64));
    assert_eq!(call.message, U256::from(42u64));
    assert_eq!(call.scope, U256::from(9u64));
    assert_eq!(call.points[0], U256::from(100u64));
    assert_eq!(call.points[7], U256::from(107u64));
}

#[test]
fn test_group_id_from_receipt() {
    let receipt = TransactionReceipt {
        logs: vec![group_created_log(3)],
        ..Default::default()
    };
    assert_eq!(group_id_from_receipt(&receipt).unwrap(), U256::from(3u64));

    let empty = TransactionReceipt::default();
    assert!(matches!(
        group_id_from_receipt(&empty),
        Err(SemgroupError::Contract(_))
    ));
}

#[test]
fn test_group_created_signature() {
    assert_eq!(GroupCreatedFilter::abi_signature(), "GroupCreated(uint256)");
}

#[test]
fn test_client_creation() {
    let client = SemaphoreClient::new(&NetworkConfig::localhost(), Address::repeat_byte(0x22));
    assert!(!client.is_connected());
    assert!(client.wallet_address().is_none());
    assert_eq!(client.address(), Address::repeat_byte(0x22));
}

#[test]
fn test_wallet_requires_connection() {
    let mut client = SemaphoreClient::new(&NetworkConfig::localhost(), Address::zero());
    assert!(matches!(
        client.set_wallet(crate::config::HARDHAT_DEV_PRIVATE_KEY),
        Err(SemgroupError::Network(_))
    ));
}

#[tokio::test]
async fn test_calls_require_wallet() {
    let client = SemaphoreClient::new(&NetworkConfig::localhost(), Address::zero());

    let result = client.create_group(Address::zero()).await;
    assert!(matches!(result, Err(SemgroupError::Wallet(_))));

    let result = client.merkle_tree_root(U256::zero()).await;
    assert!(matches!(result, Err(SemgroupError::Network(_))));
}
