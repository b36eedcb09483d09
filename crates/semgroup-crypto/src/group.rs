//! Off-chain mirror of a Semaphore group.
//!
//! Members are identity commitments kept in a [`LeanIMT`]. Removing a
//! member zeroes its leaf so every other index stays put, exactly like the
//! contract does; this keeps locally generated sibling paths valid against
//! the on-chain root as long as both sides replay the same mutations.

use crate::field::{fr_to_word, word_to_fr};
use crate::lean_imt::{LeanIMT, MerkleProof};
use ark_bn254::Fr;
use ark_ff::Zero;
use semgroup_types::{SemgroupError, SemgroupResult, Word};

#[derive(Clone, Debug, Default)]
pub struct Group {
    tree: LeanIMT,
}

impl Group {
    pub fn new(members: &[Word]) -> SemgroupResult<Self> {
        let mut group = Self::default();
        if !members.is_empty() {
            group.add_members(members)?;
        }
        Ok(group)
    }

    pub fn root(&self) -> Option<Word> {
        self.tree.root().map(|r| fr_to_word(&r))
    }

    pub fn depth(&self) -> usize {
        self.tree.depth()
    }

    pub fn size(&self) -> usize {
        self.tree.size()
    }

    pub fn members(&self) -> Vec<Word> {
        self.tree.leaves().iter().map(fr_to_word).collect()
    }

    pub fn index_of(&self, member: &Word) -> Option<usize> {
        let leaf = word_to_fr(member).ok()?;
        self.tree.index_of(&leaf)
    }

    pub fn add_member(&mut self, member: &Word) -> SemgroupResult<()> {
        let leaf = member_to_leaf(member, "add")?;
        self.tree.insert(leaf);
        Ok(())
    }

    pub fn add_members(&mut self, members: &[Word]) -> SemgroupResult<()> {
        let leaves = members
            .iter()
            .map(|m| member_to_leaf(m, "add"))
            .collect::<SemgroupResult<Vec<_>>>()?;
        self.tree.insert_many(&leaves)
    }

    pub fn update_member(&mut self, index: usize, member: &Word) -> SemgroupResult<()> {
        self.ensure_not_removed(index, "update")?;
        let leaf = member_to_leaf(member, "update")?;
        self.tree.update(index, leaf)
    }

    pub fn remove_member(&mut self, index: usize) -> SemgroupResult<()> {
        self.ensure_not_removed(index, "remove")?;
        self.tree.update(index, Fr::zero())
    }

    pub fn generate_merkle_proof(&self, index: usize) -> SemgroupResult<MerkleProof> {
        self.tree.generate_proof(index)
    }

    /// Sibling path of `index` as contract words.
    pub fn siblings(&self, index: usize) -> SemgroupResult<Vec<Word>> {
        Ok(self
            .generate_merkle_proof(index)?
            .siblings
            .iter()
            .map(fr_to_word)
            .collect())
    }

    fn ensure_not_removed(&self, index: usize, action: &str) -> SemgroupResult<()> {
        match self.tree.leaves().get(index) {
            None => Err(SemgroupError::Group(format!(
                "Failed to {} member: index '{}' does not exist",
                action, index
            ))),
            Some(leaf) if leaf.is_zero() => Err(SemgroupError::Group(format!(
                "Failed to {} member: it has already been removed",
                action
            ))),
            Some(_) => Ok(()),
        }
    }
}

fn member_to_leaf(member: &Word, action: &str) -> SemgroupResult<Fr> {
    if member.is_zero() {
        return Err(SemgroupError::Group(format!(
            "Failed to {} member: value cannot be 0",
            action
        )));
    }
    word_to_fr(member)
}
