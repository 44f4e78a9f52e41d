use log::warn;

use super::Block;
use super::error::{ChainInvalid, ValidationError};

/// Check the three extension rules in order: index, linkage, hash.
pub fn check_new_block(candidate: &Block, predecessor: &Block) -> Result<(), ValidationError> {
    let expected = predecessor.index + 1;
    if candidate.index != expected {
        return Err(ValidationError::BadIndex {
            expected,
            got: candidate.index,
        });
    }
    if candidate.previous_hash != predecessor.hash {
        return Err(ValidationError::BadPreviousHash {
            expected: predecessor.hash.clone(),
            got: candidate.previous_hash.clone(),
        });
    }
    let computed = candidate.compute_hash();
    if computed != candidate.hash {
        return Err(ValidationError::BadHash {
            computed,
            stored: candidate.hash.clone(),
        });
    }
    Ok(())
}

pub fn is_valid_new_block(candidate: &Block, predecessor: &Block) -> bool {
    match check_new_block(candidate, predecessor) {
        Ok(()) => true,
        Err(e) => {
            warn!("block #{} rejected: {}", candidate.index, e);
            false
        }
    }
}

/// Whole-chain check: genesis must match exactly, then every adjacent pair
/// must satisfy the extension rules. An empty chain passes.
pub fn check_chain(chain: &[Block]) -> Result<(), ChainInvalid> {
    let Some(first) = chain.first() else {
        return Ok(());
    };
    if !first.is_genesis() {
        return Err(ChainInvalid::BadGenesis);
    }
    for (position, pair) in chain.windows(2).enumerate() {
        check_new_block(&pair[1], &pair[0]).map_err(|source| ChainInvalid::BadLink {
            position: position + 1,
            source,
        })?;
    }
    Ok(())
}

pub fn is_valid_chain(chain: &[Block]) -> bool {
    let Some(first) = chain.first() else {
        return true;
    };
    if !first.is_genesis() {
        warn!(
            "chain of {} blocks rejected: {}",
            chain.len(),
            ChainInvalid::BadGenesis
        );
        return false;
    }
    chain
        .windows(2)
        .all(|pair| is_valid_new_block(&pair[1], &pair[0]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::testing::{chain_of, next_block as next};

    #[test]
    fn accepts_proper_successor() {
        let g = Block::genesis();
        assert_eq!(check_new_block(&next(&g, "a"), &g), Ok(()));
    }

    #[test]
    fn classifies_bad_index() {
        let g = Block::genesis();
        let mut b = next(&g, "a");
        b.index = 5;
        assert!(matches!(
            check_new_block(&b, &g),
            Err(ValidationError::BadIndex { expected: 1, got: 5 })
        ));
    }

    #[test]
    fn classifies_bad_previous_hash() {
        let g = Block::genesis();
        let mut b = next(&g, "a");
        b.previous_hash = "deadbeef".into();
        assert!(matches!(
            check_new_block(&b, &g),
            Err(ValidationError::BadPreviousHash { .. })
        ));
    }

    #[test]
    fn classifies_bad_hash() {
        let g = Block::genesis();
        let mut b = next(&g, "a");
        b.data = "tampered".into();
        assert!(matches!(
            check_new_block(&b, &g),
            Err(ValidationError::BadHash { .. })
        ));
        assert!(!is_valid_new_block(&b, &g));
    }

    #[test]
    fn index_checked_before_linkage() {
        let g = Block::genesis();
        let mut b = next(&g, "a");
        b.index = 9;
        b.previous_hash = "x".into();
        assert!(matches!(
            check_new_block(&b, &g),
            Err(ValidationError::BadIndex { .. })
        ));
    }

    #[test]
    fn empty_and_genesis_only_chains_are_valid() {
        assert!(is_valid_chain(&[]));
        assert!(is_valid_chain(&[Block::genesis()]));
    }

    #[test]
    fn built_chain_is_valid() {
        assert!(is_valid_chain(&chain_of(6, "v")));
    }

    #[test]
    fn any_broken_block_invalidates_chain() {
        let chain = chain_of(5, "v");
        for i in 1..chain.len() {
            let mut c = chain.clone();
            c[i].index += 1;
            assert!(!is_valid_chain(&c), "index mutation at {i}");

            let mut c = chain.clone();
            c[i].previous_hash = "ffff".into();
            assert!(!is_valid_chain(&c), "linkage mutation at {i}");

            let mut c = chain.clone();
            c[i].data.push('x');
            assert!(!is_valid_chain(&c), "payload mutation at {i}");
        }
    }

    #[test]
    fn reports_position_of_bad_link() {
        let mut chain = chain_of(4, "v");
        chain[2].data = "evil".into();
        assert!(matches!(
            check_chain(&chain),
            Err(ChainInvalid::BadLink { position: 2, .. })
        ));
    }

    #[test]
    fn foreign_genesis_rejected_even_if_internally_consistent() {
        let mut fake = Block::genesis();
        fake.timestamp += 1;
        let b1 = next(&fake, "a");
        let b2 = next(&b1, "b");
        let chain = [fake, b1, b2];
        assert_eq!(check_chain(&chain), Err(ChainInvalid::BadGenesis));
        assert!(!is_valid_chain(&chain));
    }

    #[test]
    fn boolean_and_diagnostic_checks_agree() {
        let chain = chain_of(5, "v");
        for i in 0..chain.len() {
            let mut c = chain.clone();
            c[i].hash = "00".into();
            assert_eq!(is_valid_chain(&c), check_chain(&c).is_ok(), "hash mutation at {i}");
        }
    }
}
