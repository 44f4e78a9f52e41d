mod condition;

pub use condition::{CharCodeSum, MiningCondition};

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use log::{debug, trace};

use crate::blockchain::Block;
use crate::blockchain::hash::calculate_hash;

/// Shared flag that stops a running search at its next attempt.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Proof-of-work search. Blocks the calling thread until a nonce is found,
/// so callers run it on a blocking worker.
#[derive(Clone)]
pub struct Miner {
    difficulty: u32,
    condition: Arc<dyn MiningCondition>,
}

impl Miner {
    pub fn new(difficulty: u32) -> Self {
        Self::with_condition(difficulty, Arc::new(CharCodeSum))
    }

    pub fn with_condition(difficulty: u32, condition: Arc<dyn MiningCondition>) -> Self {
        Self {
            difficulty,
            condition,
        }
    }

    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    /// Search until a block extending `predecessor` satisfies the mining
    /// condition. There is no attempt limit; only `cancel` stops the search,
    /// in which case `None` is returned.
    pub fn mine(
        &self,
        data: &str,
        predecessor: &Block,
        cancel: &CancelToken,
    ) -> Option<Block> {
        let mut nonce = 0u64;
        while !cancel.is_cancelled() {
            if let Some(block) = self.attempt(data, predecessor, nonce) {
                return Some(block);
            }
            nonce += 1;
        }
        debug!(
            "mining on top of #{} cancelled after {} attempts",
            predecessor.index, nonce
        );
        None
    }

    fn attempt(&self, data: &str, predecessor: &Block, nonce: u64) -> Option<Block> {
        let index = predecessor.index + 1;
        let timestamp = Utc::now().timestamp();
        let hash = calculate_hash(index, &predecessor.hash, timestamp, data, nonce);
        trace!("index={index} timestamp={timestamp} nonce={nonce} hash={hash}");

        if !self.condition.is_met(&hash, self.difficulty) {
            return None;
        }
        debug!(
            "found nonce {} for block #{} (difficulty {})",
            nonce, index, self.difficulty
        );
        Some(Block {
            index,
            previous_hash: predecessor.hash.clone(),
            timestamp,
            data: data.to_string(),
            hash,
            difficulty: self.difficulty,
            nonce,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::validation::check_new_block;

    struct Never;

    impl MiningCondition for Never {
        fn is_met(&self, _hash: &str, _difficulty: u32) -> bool {
            false
        }
    }

    /// Requires `difficulty` leading zeros; used to check the condition is pluggable.
    struct LeadingZeros;

    impl MiningCondition for LeadingZeros {
        fn is_met(&self, hash: &str, difficulty: u32) -> bool {
            hash.chars().take(difficulty as usize).all(|c| c == '0')
        }
    }

    #[test]
    fn mined_block_extends_predecessor_and_meets_condition() {
        let miner = Miner::new(6);
        let genesis = Block::genesis();
        let block = miner.mine("hello", &genesis, &CancelToken::new()).unwrap();

        assert_eq!(block.index, 1);
        assert_eq!(block.previous_hash, genesis.hash);
        assert_eq!(block.data, "hello");
        assert_eq!(block.difficulty, 6);
        assert!(CharCodeSum.is_met(&block.hash, 6));
        assert_eq!(check_new_block(&block, &genesis), Ok(()));
    }

    #[test]
    fn successive_blocks_chain_together() {
        let miner = Miner::new(4);
        let cancel = CancelToken::new();
        let b1 = miner.mine("one", &Block::genesis(), &cancel).unwrap();
        let b2 = miner.mine("two", &b1, &cancel).unwrap();
        assert_eq!(check_new_block(&b2, &b1), Ok(()));
    }

    #[test]
    fn uses_supplied_condition() {
        let miner = Miner::with_condition(1, Arc::new(LeadingZeros));
        let block = miner
            .mine("zeros", &Block::genesis(), &CancelToken::new())
            .unwrap();
        assert!(block.hash.starts_with('0'));
    }

    #[test]
    fn cancelled_search_returns_none() {
        let miner = Miner::with_condition(6, Arc::new(Never));
        let cancel = CancelToken::new();
        let c = cancel.clone();
        let handle = std::thread::spawn(move || {
            std::thread::sleep(std::time::Duration::from_millis(20));
            c.cancel();
        });
        assert!(
            miner
                .mine("never", &Block::genesis(), &cancel)
                .is_none()
        );
        handle.join().unwrap();
    }

    #[test]
    fn uncancelled_search_finds_block() {
        let miner = Miner::new(2);
        let block = miner
            .mine("x", &Block::genesis(), &CancelToken::new())
            .unwrap();
        assert!(CharCodeSum.is_met(&block.hash, 2));
    }
}
