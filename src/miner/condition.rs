/// Predicate a candidate hash must satisfy before a block counts as mined.
pub trait MiningCondition: Send + Sync {
    fn is_met(&self, hash: &str, difficulty: u32) -> bool;
}

/// Network rule: the character codes of the first `difficulty` hash
/// characters must sum to a multiple of 10.
///
/// Every node on the network has to agree on this rule, so it must not be
/// swapped for a leading-zeros target.
#[derive(Debug, Clone, Copy, Default)]
pub struct CharCodeSum;

impl MiningCondition for CharCodeSum {
    fn is_met(&self, hash: &str, difficulty: u32) -> bool {
        let sum: u32 = hash
            .chars()
            .take(difficulty as usize)
            .map(|c| c as u32)
            .sum();
        sum % 10 == 0
    }
}
