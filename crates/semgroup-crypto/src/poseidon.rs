//! Poseidon hash over the BN254 scalar field, circomlib parameters.
//!
//! The Semaphore contract hashes its tree with `PoseidonT3` and the circuit
//! uses circomlib's `Poseidon(2)`, so nodes, commitments and nullifiers all
//! go through the same constants here. Each arity has its own width
//! (`t = n + 1`), which keeps a one-input hash distinct from a two-input
//! hash with a zero right operand.

use ark_bn254::Fr;
use light_poseidon::{Poseidon, PoseidonHasher};
use semgroup_types::{SemgroupError, SemgroupResult};

/// circomlib `Poseidon(n)` for `1 <= n <= 12` inputs.
pub fn poseidon_hash(inputs: &[Fr]) -> SemgroupResult<Fr> {
    let mut hasher = Poseidon::<Fr>::new_circom(inputs.len())
        .map_err(|e| SemgroupError::Crypto(format!("Unsupported Poseidon arity: {}", e)))?;
    hasher
        .hash(inputs)
        .map_err(|e| SemgroupError::Crypto(format!("Poseidon hash failed: {}", e)))
}

/// Tree node hash, `PoseidonT3` on chain.
pub fn poseidon_hash2(left: Fr, right: Fr) -> Fr {
    hash_fixed([left, right])
}

pub fn poseidon_hash1(input: Fr) -> Fr {
    hash_fixed([input])
}

// Arities 1 and 2 are always supported, so these cannot fail.
fn hash_fixed<const N: usize>(inputs: [Fr; N]) -> Fr {
    match poseidon_hash(&inputs) {
        Ok(hash) => hash,
        Err(e) => unreachable!("circomlib Poseidon rejected {} inputs: {}", N, e),
    }
}
