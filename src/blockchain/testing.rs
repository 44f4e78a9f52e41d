//! Chain builders shared by unit tests.

use super::Block;
use super::hash::calculate_hash;

/// A correctly linked successor of `prev` (no proof-of-work applied).
pub fn next_block(prev: &Block, data: &str) -> Block {
    let index = prev.index + 1;
    let timestamp = prev.timestamp + 10;
    Block {
        index,
        previous_hash: prev.hash.clone(),
        timestamp,
        data: data.to_string(),
        hash: calculate_hash(index, &prev.hash, timestamp, data, 0),
        difficulty: 0,
        nonce: 0,
    }
}

/// Valid chain of `len` blocks starting at genesis, payloads tagged with `tag`.
pub fn chain_of(len: usize, tag: &str) -> Vec<Block> {
    let mut chain = vec![Block::genesis()];
    while chain.len() < len {
        let b = next_block(chain.last().unwrap(), &format!("{tag} {}", chain.len()));
        chain.push(b);
    }
    chain
}
