use serde::{Deserialize, Serialize};

use super::hash::calculate_hash;

pub const GENESIS_PREVIOUS_HASH: &str = "0";
pub const GENESIS_TIMESTAMP: i64 = 1_682_839_690;
pub const GENESIS_DATA: &str = "RUT-MIIT first block";
pub const GENESIS_HASH: &str = "8d9d5a7ff4a78042ea6737bf59c772f8ed27ef3c9b576eac1976c91aaf48d2de";

/// A single block carrying an opaque data payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub index: u64,
    pub previous_hash: String,
    pub timestamp: i64, // Unix seconds (UTC)
    pub data: String,
    pub hash: String,
    pub difficulty: u32,
    pub nonce: u64,
}

impl Block {
    /// The hard-coded first block every valid chain starts with.
    ///
    /// Its hash is a fixed constant and is never recomputed; chains are
    /// checked against it field by field.
    pub fn genesis() -> Self {
        Self {
            index: 0,
            previous_hash: GENESIS_PREVIOUS_HASH.to_string(),
            timestamp: GENESIS_TIMESTAMP,
            data: GENESIS_DATA.to_string(),
            hash: GENESIS_HASH.to_string(),
            difficulty: 0,
            nonce: 0,
        }
    }

    /// Recompute the hash from this block's fields (ignores the stored `hash`).
    pub fn compute_hash(&self) -> String {
        calculate_hash(
            self.index,
            &self.previous_hash,
            self.timestamp,
            &self.data,
            self.nonce,
        )
    }

    pub fn is_genesis(&self) -> bool {
        *self == Self::genesis()
    }
}
