//! Lean incremental Merkle tree.
//!
//! A binary tree whose depth is `ceil(log2(size))`. A node with no right
//! sibling is promoted to the next level unchanged instead of being hashed
//! against a zero value, so proofs only carry the siblings that exist.

use crate::poseidon::poseidon_hash2;
use ark_bn254::Fr;
use semgroup_types::{SemgroupError, SemgroupResult};

/// Inclusion proof for one leaf.
///
/// `index` packs one bit per recorded sibling: bit `i` set means the node
/// was the right child at the level of `siblings[i]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MerkleProof {
    pub root: Fr,
    pub leaf: Fr,
    pub index: u64,
    pub siblings: Vec<Fr>,
}

#[derive(Clone, Debug)]
pub struct LeanIMT {
    nodes: Vec<Vec<Fr>>,
}

fn depth_for(size: usize) -> usize {
    if size <= 1 {
        0
    } else {
        (usize::BITS - (size - 1).leading_zeros()) as usize
    }
}

impl LeanIMT {
    pub fn new() -> Self {
        Self {
            nodes: vec![Vec::new()],
        }
    }

    pub fn from_leaves(leaves: &[Fr]) -> Self {
        let mut tree = Self::new();
        if !leaves.is_empty() {
            tree.build_from(0, leaves);
        }
        tree
    }

    pub fn size(&self) -> usize {
        self.nodes[0].len()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    pub fn depth(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn root(&self) -> Option<Fr> {
        self.nodes[self.depth()].first().copied()
    }

    pub fn leaves(&self) -> &[Fr] {
        &self.nodes[0]
    }

    pub fn index_of(&self, leaf: &Fr) -> Option<usize> {
        self.nodes[0].iter().position(|l| l == leaf)
    }

    pub fn has(&self, leaf: &Fr) -> bool {
        self.index_of(leaf).is_some()
    }

    pub fn insert(&mut self, leaf: Fr) {
        let size = self.size() + 1;
        if self.depth() < depth_for(size) {
            self.nodes.push(Vec::new());
        }

        let depth = self.depth();
        let mut node = leaf;
        let mut index = size - 1;

        for level in 0..depth {
            set_node(&mut self.nodes[level], index, node);

            if index & 1 == 1 {
                let sibling = self.nodes[level][index - 1];
                node = poseidon_hash2(sibling, node);
            }

            index >>= 1;
        }

        self.nodes[depth] = vec![node];
    }

    /// Appends a batch, recomputing each touched parent once.
    pub fn insert_many(&mut self, leaves: &[Fr]) -> SemgroupResult<()> {
        if leaves.is_empty() {
            return Err(SemgroupError::Group("There are no leaves to add".into()));
        }
        let start = self.size();
        self.build_from(start, leaves);
        Ok(())
    }

    fn build_from(&mut self, start: usize, leaves: &[Fr]) {
        self.nodes[0].extend_from_slice(leaves);

        let new_depth = depth_for(self.size());
        while self.depth() < new_depth {
            self.nodes.push(Vec::new());
        }

        let mut start_index = start >> 1;
        for level in 0..self.depth() {
            let parents = self.nodes[level].len().div_ceil(2);

            for index in start_index..parents {
                let left = self.nodes[level][index * 2];
                let parent = match self.nodes[level].get(index * 2 + 1) {
                    Some(right) => poseidon_hash2(left, *right),
                    None => left,
                };
                set_node(&mut self.nodes[level + 1], index, parent);
            }

            start_index >>= 1;
        }
    }

    pub fn update(&mut self, index: usize, new_leaf: Fr) -> SemgroupResult<()> {
        if index >= self.size() {
            return Err(SemgroupError::Group(format!(
                "The leaf at index '{}' does not exist in this tree",
                index
            )));
        }

        let depth = self.depth();
        let mut node = new_leaf;
        let mut index = index;

        for level in 0..depth {
            self.nodes[level][index] = node;

            if index & 1 == 1 {
                let sibling = self.nodes[level][index - 1];
                node = poseidon_hash2(sibling, node);
            } else if let Some(sibling) = self.nodes[level].get(index + 1) {
                node = poseidon_hash2(node, *sibling);
            }

            index >>= 1;
        }

        self.nodes[depth] = vec![node];
        Ok(())
    }

    pub fn generate_proof(&self, index: usize) -> SemgroupResult<MerkleProof> {
        if index >= self.size() {
            return Err(SemgroupError::Group(format!(
                "The leaf at index '{}' does not exist in this tree",
                index
            )));
        }

        let leaf = self.nodes[0][index];
        let mut siblings = Vec::with_capacity(self.depth());
        let mut path_index = 0u64;
        let mut index = index;

        for level in 0..self.depth() {
            let is_right = index & 1 == 1;
            let sibling_index = if is_right { index - 1 } else { index + 1 };

            if let Some(sibling) = self.nodes[level].get(sibling_index) {
                if is_right {
                    path_index |= 1 << siblings.len();
                }
                siblings.push(*sibling);
            }

            index >>= 1;
        }

        let root = self
            .root()
            .ok_or_else(|| SemgroupError::Internal("Non-empty tree without root".into()))?;

        Ok(MerkleProof {
            root,
            leaf,
            index: path_index,
            siblings,
        })
    }

    pub fn verify_proof(proof: &MerkleProof) -> bool {
        let mut node = proof.leaf;

        for (i, sibling) in proof.siblings.iter().enumerate() {
            if (proof.index >> i) & 1 == 1 {
                node = poseidon_hash2(*sibling, node);
            } else {
                node = poseidon_hash2(node, *sibling);
            }
        }

        node == proof.root
    }
}

impl Default for LeanIMT {
    fn default() -> Self {
        Self::new()
    }
}

fn set_node(level: &mut Vec<Fr>, index: usize, node: Fr) {
    if index < level.len() {
        level[index] = node;
    } else {
        level.push(node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn leaves(n: u64) -> Vec<Fr> {
        (1..=n).map(Fr::from).collect()
    }

    #[test]
    fn test_depth_for() {
        assert_eq!(depth_for(0), 0);
        assert_eq!(depth_for(1), 0);
        assert_eq!(depth_for(2), 1);
        assert_eq!(depth_for(3), 2);
        assert_eq!(depth_for(4), 2);
        assert_eq!(depth_for(5), 3);
        assert_eq!(depth_for(1024), 10);
    }

    #[test]
    fn test_empty_tree() {
        let tree = LeanIMT::new();
        assert_eq!(tree.size(), 0);
        assert_eq!(tree.depth(), 0);
        assert!(tree.root().is_none());
        assert!(tree.generate_proof(0).is_err());
    }

    #[test]
    fn test_single_leaf_is_root() {
        let mut tree = LeanIMT::new();
        tree.insert(Fr::from(5u64));
        assert_eq!(tree.root(), Some(Fr::from(5u64)));

        let proof = tree.generate_proof(0).unwrap();
        assert!(proof.siblings.is_empty());
        assert_eq!(proof.index, 0);
        assert!(LeanIMT::verify_proof(&proof));
    }

    #[test]
    fn test_three_leaves_shape() {
        let l = leaves(3);
        let tree = LeanIMT::from_leaves(&l);

        assert_eq!(tree.depth(), 2);
        let expected = poseidon_hash2(poseidon_hash2(l[0], l[1]), l[2]);
        assert_eq!(tree.root(), Some(expected));

        // Third leaf has no sibling on level 0.
        let proof = tree.generate_proof(2).unwrap();
        assert_eq!(proof.siblings, vec![poseidon_hash2(l[0], l[1])]);
        assert_eq!(proof.index, 1);
        assert!(LeanIMT::verify_proof(&proof));
    }

    #[test]
    fn test_two_leaf_root_matches_poseidon_t3() {
        let tree = LeanIMT::from_leaves(&leaves(2));
        let expected = Fr::from_str(
            "7853200120776062878684798364095072458815029376092732009249414926327459813530",
        )
        .unwrap();
        assert_eq!(tree.root(), Some(expected));
    }

    #[test]
    fn test_update_and_remove() {
        let l = leaves(3);
        let mut tree = LeanIMT::from_leaves(&l);

        tree.update(2, Fr::from(0u64)).unwrap();
        let expected = poseidon_hash2(poseidon_hash2(l[0], l[1]), Fr::from(0u64));
        assert_eq!(tree.root(), Some(expected));

        tree.update(1, l[2]).unwrap();
        let expected = poseidon_hash2(poseidon_hash2(l[0], l[2]), Fr::from(0u64));
        assert_eq!(tree.root(), Some(expected));

        assert!(tree.update(3, Fr::from(1u64)).is_err());
    }

    #[test]
    fn test_insert_many_requires_leaves() {
        let mut tree = LeanIMT::new();
        assert!(tree.insert_many(&[]).is_err());
    }

    #[test]
    fn test_index_of() {
        let tree = LeanIMT::from_leaves(&leaves(4));
        assert_eq!(tree.index_of(&Fr::from(3u64)), Some(2));
        assert!(tree.has(&Fr::from(4u64)));
        assert!(!tree.has(&Fr::from(5u64)));
    }

    #[test]
    fn test_tampered_proof_rejected() {
        let tree = LeanIMT::from_leaves(&leaves(5));
        let mut proof = tree.generate_proof(3).unwrap();
        proof.leaf = Fr::from(99u64);
        assert!(!LeanIMT::verify_proof(&proof));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn prop_batch_matches_sequential(n in 1u64..40, split in 0u64..40) {
            let l = leaves(n);
            let split = (split.min(n)) as usize;

            let mut sequential = LeanIMT::new();
            for leaf in &l {
                sequential.insert(*leaf);
            }

            let mut batched = LeanIMT::from_leaves(&l[..split]);
            if split < l.len() {
                batched.insert_many(&l[split..]).unwrap();
            }

            prop_assert_eq!(sequential.root(), batched.root());
            prop_assert_eq!(sequential.depth(), batched.depth());
        }

        #[test]
        fn prop_every_proof_verifies(n in 1u64..33, update in 0u64..33) {
            let mut tree = LeanIMT::from_leaves(&leaves(n));
            let update = (update % n) as usize;
            tree.update(update, Fr::from(0u64)).unwrap();

            for i in 0..n as usize {
                let proof = tree.generate_proof(i).unwrap();
                prop_assert!(LeanIMT::verify_proof(&proof));
                prop_assert_eq!(Some(proof.root), tree.root());
            }
        }

        #[test]
        fn prop_update_matches_rebuild(n in 1u64..33, index in 0u64..33, value in 1u64..1000) {
            let mut l = leaves(n);
            let index = (index % n) as usize;

            let mut tree = LeanIMT::from_leaves(&l);
            tree.update(index, Fr::from(value)).unwrap();

            l[index] = Fr::from(value);
            prop_assert_eq!(tree.root(), LeanIMT::from_leaves(&l).root());
        }
    }
}
