pub mod block;
pub mod error;
pub mod hash;
pub mod store;
pub mod validation;

#[cfg(test)]
pub mod testing;

pub use block::Block;
pub use error::StoreError;
pub use store::ChainStore;
pub use validation::is_valid_chain;

/// Default mining difficulty (number of leading hash characters summed).
pub const DEFAULT_DIFFICULTY: u32 = 6;
