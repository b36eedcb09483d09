use ethers::types::U256;
use semgroup_crypto::SemaphoreProof;
use semgroup_types::{Word, WORD_SIZE};

use super::bindings;

pub fn word_to_u256(word: &Word) -> U256 {
    U256::from_big_endian(&word.to_be_bytes())
}

pub fn u256_to_word(value: U256) -> Word {
    let mut bytes = [0u8; WORD_SIZE];
    value.to_big_endian(&mut bytes);
    Word::from_be_bytes(bytes)
}

pub fn words_to_u256s(words: &[Word]) -> Vec<U256> {
    words.iter().map(word_to_u256).collect()
}

/// Contract-side layout of a proof. All fields widen to `uint256`.
pub fn proof_to_call(proof: &SemaphoreProof) -> bindings::SemaphoreProof {
    bindings::SemaphoreProof {
        merkle_tree_depth: U256::from(proof.merkle_tree_depth),
        merkle_tree_root: word_to_u256(&proof.merkle_tree_root),
        nullifier: word_to_u256(&proof.nullifier),
        message: word_to_u256(&proof.message),
        scope: word_to_u256(&proof.scope),
        points: proof.points.map(|p| word_to_u256(&p)),
    }
}
