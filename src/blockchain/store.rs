use log::info;

use super::Block;
use super::error::{ChainRejected, StoreError};
use super::validation::{check_chain, check_new_block};

/// In-memory authoritative chain. Always holds at least the genesis block.
#[derive(Debug)]
pub struct ChainStore {
    chain: Vec<Block>,
}

impl ChainStore {
    /// Initialize a new store holding only the genesis block.
    pub fn new() -> Self {
        Self {
            chain: vec![Block::genesis()],
        }
    }

    /// Return the last block in the chain.
    pub fn latest(&self) -> &Block {
        self.chain
            .last()
            .expect("chain store should always hold at least the genesis block")
    }

    pub fn blocks(&self) -> &[Block] {
        &self.chain
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    /// Append a block that directly extends the current tip.
    pub fn append(&mut self, block: Block) -> Result<&Block, StoreError> {
        check_new_block(&block, self.latest())?;
        info!("appended block #{} hash={}", block.index, block.hash);
        self.chain.push(block);
        Ok(self.latest())
    }

    /// Swap in `candidate` if it is a valid chain strictly longer than ours.
    /// Ties are refused.
    pub fn replace(&mut self, candidate: Vec<Block>) -> Result<&Block, StoreError> {
        check_chain(&candidate).map_err(ChainRejected::from)?;
        // An empty candidate passes `check_chain` but can never be longer.
        if candidate.len() <= self.chain.len() {
            return Err(ChainRejected::NotLonger {
                candidate: candidate.len(),
                current: self.chain.len(),
            }
            .into());
        }
        info!(
            "replacing chain: {} -> {} blocks",
            self.chain.len(),
            candidate.len()
        );
        self.chain = candidate;
        Ok(self.latest())
    }
}

impl Default for ChainStore {
    fn default() -> Self {
        Self::new()
    }
}
