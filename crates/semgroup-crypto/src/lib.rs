#![deny(unsafe_code)]
#![warn(clippy::all)]

//! Identities, lean Merkle groups and Groth16 membership proofs over BN254.

pub mod babyjubjub;
pub mod field;
pub mod group;
pub mod identity;
pub mod lean_imt;
pub mod poseidon;
pub mod proof;

pub use babyjubjub::Point;
pub use field::{fq_to_word, fr_to_word, hash_to_field, word_to_fr};
pub use group::Group;
pub use identity::Identity;
pub use lean_imt::{LeanIMT, MerkleProof};
pub use poseidon::{poseidon_hash, poseidon_hash1, poseidon_hash2};
pub use proof::{
    generate_proof, proof_depth, verify_proof, CircuitInputs, Prover, SemaphoreProof,
    SnarkArtifacts,
};
