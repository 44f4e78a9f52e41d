use thiserror::Error;

/// Why a candidate block does not extend its predecessor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid index: expected {expected}, got {got}")]
    BadIndex { expected: u64, got: u64 },

    #[error("invalid previous hash: expected {expected}, got {got}")]
    BadPreviousHash { expected: String, got: String },

    #[error("invalid hash: computed {computed}, stored {stored}")]
    BadHash { computed: String, stored: String },
}

/// Why a candidate chain was refused by `ChainStore::replace`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainRejected {
    #[error("received chain ({candidate} blocks) is not longer than ours ({current} blocks)")]
    NotLonger { candidate: usize, current: usize },

    #[error("received chain is invalid: {0}")]
    InvalidChain(#[from] ChainInvalid),
}

/// Failure reported by `is_valid_chain` diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainInvalid {
    #[error("first block does not match genesis")]
    BadGenesis,

    #[error("block #{position}: {source}")]
    BadLink {
        position: usize,
        #[source]
        source: ValidationError,
    },
}

/// Mutation refused by the chain store. The store is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("block rejected: {0}")]
    BlockRejected(#[from] ValidationError),

    #[error("chain rejected: {0}")]
    ChainRejected(#[from] ChainRejected),
}
