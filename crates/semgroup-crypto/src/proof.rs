//! Groth16 membership proofs for the Semaphore v4 circuit.
//!
//! Witnesses come from the circuit's compiled `semaphore-<D>.wasm` and proofs
//! from its ceremony `semaphore-<D>.zkey`, the same pair the deployed
//! `SemaphoreVerifier` was exported from.

use ark_bn254::{Bn254, Fq2, Fr, G1Affine, G2Affine};
use ark_circom::{read_zkey, CircomReduction, WitnessCalculator};
use ark_ec::AffineRepr;
use ark_ff::{BigInteger, PrimeField, UniformRand};
use ark_groth16::{Groth16, PreparedVerifyingKey, Proof, ProvingKey, VerifyingKey};
use ark_relations::r1cs::ConstraintMatrices;
use ark_serialize::CanonicalSerialize;
use ark_snark::SNARK;
use ark_std::rand::thread_rng;
use num_bigint::{BigInt, Sign};
use semgroup_types::{
    SemgroupError, SemgroupResult, Word, MAX_MERKLE_TREE_DEPTH, MIN_MERKLE_TREE_DEPTH,
    PROOF_POINTS,
};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::debug;
use wasmer::Store;

use crate::field::{fq_to_word, fr_to_word, hash_to_field, word_to_fq, word_to_fr};
use crate::group::Group;
use crate::identity::Identity;
use crate::lean_imt::MerkleProof;

/// Root, nullifier, message hash, scope hash.
const PUBLIC_INPUTS: usize = 4;

/// Proof as submitted to the contract. `message` and `scope` are the raw
/// values; the contract hashes them itself.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemaphoreProof {
    pub merkle_tree_depth: usize,
    pub merkle_tree_root: Word,
    pub nullifier: Word,
    pub message: Word,
    pub scope: Word,
    pub points: [Word; PROOF_POINTS],
}

/// Anything that can turn a group membership into a [`SemaphoreProof`].
pub trait Prover: Send + Sync {
    fn prove(
        &self,
        identity: &Identity,
        group: &Group,
        message: Word,
        scope: Word,
        merkle_tree_depth: Option<usize>,
    ) -> SemgroupResult<SemaphoreProof>;
}

/// Private and public signals of one circuit run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CircuitInputs {
    pub secret: Fr,
    pub merkle_proof_length: usize,
    pub merkle_proof_index: u64,
    /// Padded with zeros up to the circuit depth.
    pub merkle_proof_siblings: Vec<Fr>,
    pub message: Fr,
    pub scope: Fr,
}

impl CircuitInputs {
    pub fn new(
        identity: &Identity,
        merkle_proof: &MerkleProof,
        message: &Word,
        scope: &Word,
        depth: usize,
    ) -> SemgroupResult<Self> {
        let length = merkle_proof.siblings.len();
        if length > depth {
            return Err(SemgroupError::Circuit(format!(
                "The group needs {} levels but the circuit only supports {}",
                length, depth
            )));
        }

        let mut siblings = merkle_proof.siblings.clone();
        siblings.resize(depth, Fr::from(0u64));

        Ok(Self {
            secret: identity.secret_scalar(),
            merkle_proof_length: length,
            merkle_proof_index: merkle_proof.index,
            merkle_proof_siblings: siblings,
            message: hash_to_field(message),
            scope: hash_to_field(scope),
        })
    }

    /// Signal names as declared in `semaphore.circom`.
    pub fn to_named(&self) -> Vec<(String, Vec<BigInt>)> {
        vec![
            ("secret".to_string(), vec![fr_to_bigint(&self.secret)]),
            (
                "merkleProofLength".to_string(),
                vec![BigInt::from(self.merkle_proof_length)],
            ),
            (
                "merkleProofIndex".to_string(),
                vec![BigInt::from(self.merkle_proof_index)],
            ),
            (
                "merkleProofSiblings".to_string(),
                self.merkle_proof_siblings.iter().map(fr_to_bigint).collect(),
            ),
            ("message".to_string(), vec![fr_to_bigint(&self.message)]),
            ("scope".to_string(), vec![fr_to_bigint(&self.scope)]),
        ]
    }
}

/// Compiled circuit and ceremony proving key for one tree depth.
pub struct SnarkArtifacts {
    depth: usize,
    wasm_path: PathBuf,
    proving_key: ProvingKey<Bn254>,
    matrices: ConstraintMatrices<Fr>,
    prepared_vk: PreparedVerifyingKey<Bn254>,
}

fn check_depth(depth: usize) -> SemgroupResult<()> {
    if !(MIN_MERKLE_TREE_DEPTH..=MAX_MERKLE_TREE_DEPTH).contains(&depth) {
        return Err(SemgroupError::Circuit(format!(
            "The tree depth must be a number between {} and {}, got {}",
            MIN_MERKLE_TREE_DEPTH, MAX_MERKLE_TREE_DEPTH, depth
        )));
    }
    Ok(())
}

/// Requested depth, or the depth of the group (at least 1).
pub fn proof_depth(group: &Group, requested: Option<usize>) -> SemgroupResult<usize> {
    let depth = requested.unwrap_or_else(|| group.depth().max(MIN_MERKLE_TREE_DEPTH));
    check_depth(depth)?;
    Ok(depth)
}

impl SnarkArtifacts {
    pub fn artifact_name(depth: usize) -> String {
        format!("semaphore-{}", depth)
    }

    pub fn wasm_path(dir: &Path, depth: usize) -> PathBuf {
        dir.join(format!("{}.wasm", Self::artifact_name(depth)))
    }

    pub fn zkey_path(dir: &Path, depth: usize) -> PathBuf {
        dir.join(format!("{}.zkey", Self::artifact_name(depth)))
    }

    pub fn exist(dir: &Path, depth: usize) -> bool {
        Self::wasm_path(dir, depth).is_file() && Self::zkey_path(dir, depth).is_file()
    }

    pub fn load(dir: &Path, depth: usize) -> SemgroupResult<Self> {
        check_depth(depth)?;

        let wasm_path = Self::wasm_path(dir, depth);
        if !wasm_path.is_file() {
            return Err(SemgroupError::Circuit(format!(
                "Missing circuit wasm: {}",
                wasm_path.display()
            )));
        }

        let zkey_path = Self::zkey_path(dir, depth);
        let mut reader = BufReader::new(File::open(&zkey_path)?);
        let (proving_key, matrices) = read_zkey(&mut reader).map_err(|e| {
            SemgroupError::Serialization(format!("Invalid zkey {}: {}", zkey_path.display(), e))
        })?;

        let inputs = proving_key.vk.gamma_abc_g1.len().saturating_sub(1);
        if inputs != PUBLIC_INPUTS {
            return Err(SemgroupError::Circuit(format!(
                "{} has {} public inputs, a Semaphore circuit has {}",
                zkey_path.display(),
                inputs,
                PUBLIC_INPUTS
            )));
        }

        let prepared_vk = Groth16::<Bn254>::process_vk(&proving_key.vk)
            .map_err(|e| SemgroupError::Circuit(format!("Failed to prepare VK: {}", e)))?;

        debug!(
            "Loaded artifacts for depth {}: {} constraints",
            depth, matrices.num_constraints
        );

        Ok(Self {
            depth,
            wasm_path,
            proving_key,
            matrices,
            prepared_vk,
        })
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn verifying_key(&self) -> &VerifyingKey<Bn254> {
        &self.proving_key.vk
    }

    pub fn verifying_key_bytes(&self) -> SemgroupResult<Vec<u8>> {
        let mut bytes = Vec::new();
        self.proving_key
            .vk
            .serialize_compressed(&mut bytes)
            .map_err(|e| SemgroupError::Serialization(format!("Failed to serialize VK: {}", e)))?;
        Ok(bytes)
    }

    /// Full wire assignment for `inputs`, constant wire first.
    pub fn witness(&self, inputs: &CircuitInputs) -> SemgroupResult<Vec<Fr>> {
        let mut store = Store::default();
        let mut calculator = WitnessCalculator::new(&mut store, &self.wasm_path)
            .map_err(|e| SemgroupError::Circuit(format!("Failed to load circuit wasm: {}", e)))?;

        let witness = calculator
            .calculate_witness(&mut store, inputs.to_named(), true)
            .map_err(|e| SemgroupError::Circuit(format!("Failed to compute witness: {}", e)))?;

        witness.iter().map(bigint_to_fr).collect()
    }

    pub fn verify(&self, proof: &SemaphoreProof) -> SemgroupResult<bool> {
        if proof.merkle_tree_depth != self.depth {
            return Err(SemgroupError::Circuit(format!(
                "Proof depth {} does not match verifying key depth {}",
                proof.merkle_tree_depth, self.depth
            )));
        }
        verify_proof(proof, &self.prepared_vk)
    }
}

impl Prover for SnarkArtifacts {
    fn prove(
        &self,
        identity: &Identity,
        group: &Group,
        message: Word,
        scope: Word,
        merkle_tree_depth: Option<usize>,
    ) -> SemgroupResult<SemaphoreProof> {
        generate_proof(identity, group, message, scope, merkle_tree_depth, self)
    }
}

/// Proves that `identity` belongs to `group`, bound to `message` and `scope`.
///
/// `merkle_tree_depth` defaults to the depth of the group (at least 1) and
/// must match the depth of the artifacts.
pub fn generate_proof(
    identity: &Identity,
    group: &Group,
    message: Word,
    scope: Word,
    merkle_tree_depth: Option<usize>,
    artifacts: &SnarkArtifacts,
) -> SemgroupResult<SemaphoreProof> {
    let index = group
        .index_of(&identity.commitment())
        .ok_or_else(|| SemgroupError::Group("The identity is not part of the group".into()))?;
    let merkle_proof = group.generate_merkle_proof(index)?;

    let depth = proof_depth(group, merkle_tree_depth)?;
    if artifacts.depth != depth {
        return Err(SemgroupError::Circuit(format!(
            "Artifacts are for depth {}, proof requested for depth {}",
            artifacts.depth, depth
        )));
    }

    let inputs = CircuitInputs::new(identity, &merkle_proof, &message, &scope, depth)?;
    let full_assignment = artifacts.witness(&inputs)?;

    // Outputs follow the constant wire: merkleRoot, nullifier.
    let nullifier = identity.nullifier(inputs.scope);
    if full_assignment.get(1) != Some(&merkle_proof.root)
        || full_assignment.get(2) != Some(&nullifier)
    {
        return Err(SemgroupError::Circuit(
            "Circuit outputs do not match the group root and nullifier".into(),
        ));
    }

    let mut rng = thread_rng();
    let r = Fr::rand(&mut rng);
    let s = Fr::rand(&mut rng);
    let matrices = &artifacts.matrices;
    let proof = Groth16::<Bn254, CircomReduction>::create_proof_with_reduction_and_matrices(
        &artifacts.proving_key,
        r,
        s,
        matrices,
        matrices.num_instance_variables,
        matrices.num_constraints,
        &full_assignment,
    )
    .map_err(|e| SemgroupError::Circuit(format!("Failed to generate proof: {}", e)))?;

    debug!("Generated proof for member {} at depth {}", index, depth);

    Ok(SemaphoreProof {
        merkle_tree_depth: depth,
        merkle_tree_root: fr_to_word(&merkle_proof.root),
        nullifier: fr_to_word(&nullifier),
        message,
        scope,
        points: pack_points(&proof),
    })
}

pub fn verify_proof(
    proof: &SemaphoreProof,
    prepared_vk: &PreparedVerifyingKey<Bn254>,
) -> SemgroupResult<bool> {
    let groth16_proof = unpack_points(&proof.points)?;

    let public_inputs: Vec<Fr> = vec![
        word_to_fr(&proof.merkle_tree_root)?,
        word_to_fr(&proof.nullifier)?,
        hash_to_field(&proof.message),
        hash_to_field(&proof.scope),
    ];

    Groth16::<Bn254>::verify_with_processed_vk(prepared_vk, &public_inputs, &groth16_proof)
        .map_err(|e| SemgroupError::Circuit(format!("Proof verification error: {}", e)))
}

/// `[a.x, a.y, b.x.c1, b.x.c0, b.y.c1, b.y.c0, c.x, c.y]`, the layout the
/// Solidity verifier takes.
pub fn pack_points(proof: &Proof<Bn254>) -> [Word; PROOF_POINTS] {
    [
        fq_to_word(&proof.a.x),
        fq_to_word(&proof.a.y),
        fq_to_word(&proof.b.x.c1),
        fq_to_word(&proof.b.x.c0),
        fq_to_word(&proof.b.y.c1),
        fq_to_word(&proof.b.y.c0),
        fq_to_word(&proof.c.x),
        fq_to_word(&proof.c.y),
    ]
}

pub fn unpack_points(points: &[Word; PROOF_POINTS]) -> SemgroupResult<Proof<Bn254>> {
    let a = g1_from_words(&points[0], &points[1])?;

    let b = if points[2..6].iter().all(Word::is_zero) {
        G2Affine::zero()
    } else {
        let x = Fq2::new(word_to_fq(&points[3])?, word_to_fq(&points[2])?);
        let y = Fq2::new(word_to_fq(&points[5])?, word_to_fq(&points[4])?);
        let b = G2Affine::new_unchecked(x, y);
        if !b.is_on_curve() || !b.is_in_correct_subgroup_assuming_on_curve() {
            return Err(SemgroupError::Crypto("Proof point B is not a valid G2 point".into()));
        }
        b
    };

    let c = g1_from_words(&points[6], &points[7])?;

    Ok(Proof { a, b, c })
}

fn g1_from_words(x: &Word, y: &Word) -> SemgroupResult<G1Affine> {
    if x.is_zero() && y.is_zero() {
        return Ok(G1Affine::zero());
    }
    let point = G1Affine::new_unchecked(word_to_fq(x)?, word_to_fq(y)?);
    if !point.is_on_curve() || !point.is_in_correct_subgroup_assuming_on_curve() {
        return Err(SemgroupError::Crypto("Proof point is not a valid G1 point".into()));
    }
    Ok(point)
}

fn fr_to_bigint(f: &Fr) -> BigInt {
    BigInt::from_bytes_le(Sign::Plus, &f.into_bigint().to_bytes_le())
}

fn bigint_to_fr(value: &BigInt) -> SemgroupResult<Fr> {
    let (sign, bytes) = value.to_bytes_le();
    if sign == Sign::Minus {
        return Err(SemgroupError::Circuit(format!("Negative witness value {}", value)));
    }
    Ok(Fr::from_le_bytes_mod_order(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bn254::{G1Projective, G2Projective};
    use ark_ec::{CurveGroup, PrimeGroup};

    fn three_member_group() -> (Identity, Group) {
        let members: Vec<Word> = (0..3)
            .map(|i| Identity::from_seed(&i.to_string()).commitment())
            .collect();
        (Identity::from_seed("0"), Group::new(&members).unwrap())
    }

    fn sample_proof() -> Proof<Bn254> {
        Proof {
            a: G1Affine::generator(),
            b: (G2Projective::generator() * Fr::from(3u64)).into_affine(),
            c: (G1Projective::generator() * Fr::from(5u64)).into_affine(),
        }
    }

    #[test]
    fn test_circuit_inputs_padding() {
        let (identity, group) = three_member_group();
        let merkle_proof = group.generate_merkle_proof(0).unwrap();
        let inputs = CircuitInputs::new(
            &identity,
            &merkle_proof,
            &Word::from_u64(42),
            &Word::from_u64(9),
            10,
        )
        .unwrap();

        assert_eq!(inputs.merkle_proof_length, 2);
        assert_eq!(inputs.merkle_proof_index, 0);
        assert_eq!(inputs.merkle_proof_siblings.len(), 10);
        assert_eq!(&inputs.merkle_proof_siblings[..2], &merkle_proof.siblings[..]);
        assert!(inputs.merkle_proof_siblings[2..].iter().all(|s| *s == Fr::from(0u64)));
        assert_eq!(inputs.secret, identity.secret_scalar());
        assert_eq!(inputs.message, hash_to_field(&Word::from_u64(42)));
        assert_eq!(inputs.scope, hash_to_field(&Word::from_u64(9)));
    }

    #[test]
    fn test_circuit_inputs_names() {
        let (identity, group) = three_member_group();
        let merkle_proof = group.generate_merkle_proof(2).unwrap();
        let inputs =
            CircuitInputs::new(&identity, &merkle_proof, &Word::ZERO, &Word::ZERO, 4).unwrap();
        let named = inputs.to_named();

        let names: Vec<&str> = named.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "secret",
                "merkleProofLength",
                "merkleProofIndex",
                "merkleProofSiblings",
                "message",
                "scope"
            ]
        );
        assert_eq!(named[1].1, vec![BigInt::from(1u64)]);
        assert_eq!(named[2].1, vec![BigInt::from(1u64)]);
        assert_eq!(named[3].1.len(), 4);
    }

    #[test]
    fn test_group_deeper_than_circuit() {
        let members: Vec<Word> = (1..=5).map(Word::from_u64).collect();
        let group = Group::new(&members).unwrap();
        let identity = Identity::from_seed("0");
        let merkle_proof = group.generate_merkle_proof(0).unwrap();
        let result = CircuitInputs::new(&identity, &merkle_proof, &Word::ZERO, &Word::ZERO, 2);
        assert!(matches!(result, Err(SemgroupError::Circuit(_))));
    }

    #[test]
    fn test_proof_depth() {
        let (_, group) = three_member_group();
        assert_eq!(proof_depth(&group, None).unwrap(), 2);
        assert_eq!(proof_depth(&group, Some(10)).unwrap(), 10);
        assert!(proof_depth(&group, Some(0)).is_err());
        assert!(proof_depth(&group, Some(33)).is_err());

        let single = Group::new(&[Word::from_u64(1)]).unwrap();
        assert_eq!(proof_depth(&single, None).unwrap(), 1);
    }

    #[test]
    fn test_bigint_roundtrip() {
        let f = Fr::from(123_456_789u64);
        assert_eq!(bigint_to_fr(&fr_to_bigint(&f)).unwrap(), f);
        assert!(bigint_to_fr(&BigInt::from(-1)).is_err());
    }

    #[test]
    fn test_points_layout() {
        let proof = sample_proof();
        let points = pack_points(&proof);

        assert_eq!(points[0], fq_to_word(&proof.a.x));
        assert_eq!(points[2], fq_to_word(&proof.b.x.c1));
        assert_eq!(points[3], fq_to_word(&proof.b.x.c0));
        assert_eq!(points[7], fq_to_word(&proof.c.y));

        let unpacked = unpack_points(&points).unwrap();
        assert_eq!(unpacked, proof);
    }

    #[test]
    fn test_invalid_points_rejected() {
        let mut points = pack_points(&sample_proof());
        points[0] = Word::from_u64(1);
        assert!(unpack_points(&points).is_err());

        let mut points = pack_points(&sample_proof());
        points.swap(2, 3);
        assert!(unpack_points(&points).is_err());
    }

    #[test]
    fn test_missing_artifacts() {
        let dir = std::env::temp_dir().join(format!("semgroup-no-artifacts-{}", std::process::id()));
        assert!(!SnarkArtifacts::exist(&dir, 10));
        assert!(SnarkArtifacts::load(&dir, 10).is_err());
        assert!(matches!(
            SnarkArtifacts::load(&dir, 0),
            Err(SemgroupError::Circuit(_))
        ));
        assert_eq!(
            SnarkArtifacts::zkey_path(&dir, 10),
            dir.join("semaphore-10.zkey")
        );
    }

    #[test]
    fn test_proof_json() {
        let proof = SemaphoreProof {
            merkle_tree_depth: 10,
            merkle_tree_root: Word::from_u64(1),
            nullifier: Word::from_u64(2),
            message: Word::from_u64(42),
            scope: Word::from_u64(9),
            points: pack_points(&sample_proof()),
        };
        let json = serde_json::to_string(&proof).unwrap();
        let parsed: SemaphoreProof = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, proof);
    }

    fn ceremony_artifacts() -> SnarkArtifacts {
        let dir = std::env::var("SEMGROUP_TEST_ARTIFACTS")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("../../snark-artifacts"));
        SnarkArtifacts::load(&dir, 10).unwrap()
    }

    #[test]
    #[ignore]
    fn test_ceremony_prove_and_verify() {
        let artifacts = ceremony_artifacts();
        let (identity, group) = three_member_group();

        let proof = artifacts
            .prove(&identity, &group, Word::from_u64(42), Word::from_u64(9), Some(10))
            .unwrap();

        assert_eq!(proof.merkle_tree_depth, 10);
        assert_eq!(Some(proof.merkle_tree_root), group.root());
        assert!(artifacts.verify(&proof).unwrap());

        let mut tampered = proof.clone();
        tampered.message = Word::from_u64(43);
        assert!(!artifacts.verify(&tampered).unwrap());

        let mut tampered = proof;
        tampered.nullifier =
            fr_to_word(&identity.nullifier(hash_to_field(&Word::from_u64(10))));
        assert!(!artifacts.verify(&tampered).unwrap());
    }

    #[test]
    #[ignore]
    fn test_ceremony_rejects_outsider_and_wrong_depth() {
        let artifacts = ceremony_artifacts();
        let (identity, group) = three_member_group();

        let outsider = Identity::from_seed("outsider");
        let result = artifacts.prove(&outsider, &group, Word::ZERO, Word::ZERO, Some(10));
        assert!(matches!(result, Err(SemgroupError::Group(_))));

        let result = artifacts.prove(&identity, &group, Word::ZERO, Word::ZERO, Some(11));
        assert!(matches!(result, Err(SemgroupError::Circuit(_))));
    }
}
