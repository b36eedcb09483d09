#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

//! Shared types for the semgroup workspace: the error enum, the 256-bit
//! `Word` used to carry contract values, and Semaphore protocol constants.

mod error;
mod word;

pub use error::{SemgroupError, SemgroupResult};
pub use word::Word;

/// Size in bytes of a BN254 scalar or an EVM word.
pub const WORD_SIZE: usize = 32;

/// Smallest Merkle tree depth a proof can be generated for.
pub const MIN_MERKLE_TREE_DEPTH: usize = 1;

/// Largest Merkle tree depth supported by the circuit and the contract.
pub const MAX_MERKLE_TREE_DEPTH: usize = 32;

/// Number of words in a packed Groth16 proof.
pub const PROOF_POINTS: usize = 8;

/// Contract name looked up in the deployments artifact.
pub const SEMAPHORE_CONTRACT_NAME: &str = "Semaphore";
