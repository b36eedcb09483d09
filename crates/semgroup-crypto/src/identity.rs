//! Semaphore identities.
//!
//! An identity is an EdDSA private key of any length. The secret scalar is
//! `(pruned(blake512(key)[..32]) >> 3) mod l`, the public key is that scalar
//! times [`BASE8`], and the commitment stored in groups is
//! `Poseidon(pk.x, pk.y)`.

use crate::babyjubjub::{sub_order, Point, BASE8};
use crate::field::fr_to_word;
use crate::poseidon::poseidon_hash2;
use ark_bn254::Fr;
use base64::Engine;
use blake_hash::{Blake512, Digest};
use num_bigint::BigUint;
use semgroup_types::{SemgroupError, SemgroupResult, Word};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Identity {
    private_key: Vec<u8>,
}

impl Identity {
    /// The UTF-8 bytes of `seed` are the private key, so the same seed always
    /// yields the same commitment.
    pub fn from_seed(seed: &str) -> Self {
        Self::from_private_key(seed.as_bytes())
    }

    pub fn from_private_key(private_key: &[u8]) -> Self {
        Self {
            private_key: private_key.to_vec(),
        }
    }

    pub fn random() -> Self {
        use rand::RngCore;
        let mut private_key = vec![0u8; 32];
        rand::thread_rng().fill_bytes(&mut private_key);
        Self { private_key }
    }

    fn secret_biguint(&self) -> BigUint {
        let digest = Blake512::digest(&self.private_key);
        let mut scalar = [0u8; 32];
        scalar.copy_from_slice(&digest[..32]);
        scalar[0] &= 0xf8;
        scalar[31] &= 0x7f;
        scalar[31] |= 0x40;

        let secret = (BigUint::from_bytes_le(&scalar) >> 3u32) % sub_order();
        scalar.zeroize();
        secret
    }

    /// Always below the Baby Jubjub subgroup order.
    pub fn secret_scalar(&self) -> Fr {
        Fr::from(self.secret_biguint())
    }

    pub fn public_key(&self) -> Point {
        BASE8.mul_scalar(&self.secret_biguint())
    }

    pub fn commitment_field(&self) -> Fr {
        let public_key = self.public_key();
        poseidon_hash2(public_key.x, public_key.y)
    }

    pub fn commitment(&self) -> Word {
        fr_to_word(&self.commitment_field())
    }

    /// `Poseidon(scope_hash, secret)`; one value per (identity, scope).
    pub fn nullifier(&self, scope_hash: Fr) -> Fr {
        poseidon_hash2(scope_hash, self.secret_scalar())
    }

    /// Base64 private key.
    pub fn export(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.private_key)
    }

    pub fn import(exported: &str) -> SemgroupResult<Self> {
        let private_key = base64::engine::general_purpose::STANDARD
            .decode(exported.trim())
            .map_err(|e| SemgroupError::Crypto(format!("Invalid identity export: {}", e)))?;
        if private_key.is_empty() {
            return Err(SemgroupError::Crypto("Empty private key".into()));
        }
        Ok(Self { private_key })
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("commitment", &self.commitment())
            .finish_non_exhaustive()
    }
}

impl PartialEq for Identity {
    fn eq(&self, other: &Self) -> bool {
        self.commitment() == other.commitment()
    }
}

impl Eq for Identity {}
