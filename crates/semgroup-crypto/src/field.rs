//! Conversions between BN254 field elements and big-endian [`Word`]s, plus
//! the keccak-based hash that maps arbitrary 256-bit messages and scopes
//! into the scalar field.

use ark_bn254::{Fq, Fr};
use ark_ff::{BigInteger, PrimeField};
use semgroup_types::{SemgroupError, SemgroupResult, Word};
use sha3::{Digest, Keccak256};

/// Scalar to big-endian word.
pub fn fr_to_word(f: &Fr) -> Word {
    word_from_bigint_bytes(f.into_bigint().to_bytes_be())
}

/// Base-field element to big-endian word.
pub fn fq_to_word(f: &Fq) -> Word {
    word_from_bigint_bytes(f.into_bigint().to_bytes_be())
}

fn word_from_bigint_bytes(bytes: Vec<u8>) -> Word {
    let mut out = [0u8; 32];
    out[32 - bytes.len()..].copy_from_slice(&bytes);
    Word::from_be_bytes(out)
}

/// Strict conversion: rejects words at or above the scalar modulus.
pub fn word_to_fr(word: &Word) -> SemgroupResult<Fr> {
    let fr = Fr::from_be_bytes_mod_order(&word.to_be_bytes());
    if fr_to_word(&fr) != *word {
        return Err(SemgroupError::Crypto(format!(
            "Value {} is not in the BN254 scalar field",
            word.to_hex()
        )));
    }
    Ok(fr)
}

/// Strict conversion into the base field.
pub fn word_to_fq(word: &Word) -> SemgroupResult<Fq> {
    let fq = Fq::from_be_bytes_mod_order(&word.to_be_bytes());
    if fq_to_word(&fq) != *word {
        return Err(SemgroupError::Crypto(format!(
            "Value {} is not in the BN254 base field",
            word.to_hex()
        )));
    }
    Ok(fq)
}

/// `keccak256(word) >> 8`, which always lands below the scalar modulus.
pub fn hash_to_field(word: &Word) -> Fr {
    let digest = Keccak256::digest(word.to_be_bytes());
    Fr::from_be_bytes_mod_order(&digest[..31])
}
