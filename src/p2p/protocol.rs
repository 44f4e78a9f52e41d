//! Longest-chain reconciliation.
//!
//! [`reconcile`] only decides what to do with a peer's blocks; applying the
//! decision (mutating the store, messaging peers) is left to [`super::Node`].

use log::{debug, info, warn};

use crate::blockchain::Block;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Peer is not ahead of us, or sent nothing.
    Ignore,
    /// Peer's tip links directly onto ours.
    Append(Block),
    /// Peer is ahead but we only have its tip; ask it for everything.
    QueryAll,
    /// Peer sent a longer chain that does not link to our tip.
    Replace(Vec<Block>),
}

pub fn reconcile(held: &Block, mut received: Vec<Block>) -> Decision {
    received.sort_by_key(|b| b.index);
    let Some(latest) = received.last() else {
        warn!("peer sent an empty block list");
        return Decision::Ignore;
    };

    if latest.index <= held.index {
        debug!(
            "received chain is not longer than ours (peer #{}, ours #{}), ignoring",
            latest.index, held.index
        );
        return Decision::Ignore;
    }

    info!(
        "chain possibly behind: we have #{}, peer has #{}",
        held.index, latest.index
    );
    if latest.previous_hash == held.hash {
        info!("received block #{} extends our tip", latest.index);
        // `latest` borrows `received`; take ownership of the last element.
        return match received.pop() {
            Some(block) => Decision::Append(block),
            None => Decision::Ignore,
        };
    }
    if received.len() == 1 {
        info!("peer tip does not link to ours, querying full chain");
        return Decision::QueryAll;
    }
    info!(
        "received {} blocks not linking to our tip, trying to replace",
        received.len()
    );
    Decision::Replace(received)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::testing::{chain_of, next_block};

    #[test]
    fn tip_extending_ours_is_appended() {
        let local = chain_of(3, "shared");
        let b4 = next_block(&local[2], "four");
        assert_eq!(
            reconcile(&local[2], vec![b4.clone()]),
            Decision::Append(b4)
        );
    }

    #[test]
    fn unlinked_tip_triggers_query_all() {
        let local = chain_of(3, "local");
        let remote = chain_of(4, "remote");
        assert_eq!(
            reconcile(&local[2], vec![remote[3].clone()]),
            Decision::QueryAll
        );
    }

    #[test]
    fn longer_unlinked_chain_is_replacement_candidate() {
        let local = chain_of(3, "local");
        let remote = chain_of(5, "remote");
        assert_eq!(
            reconcile(&local[2], remote.clone()),
            Decision::Replace(remote)
        );
    }

    #[test]
    fn blocks_are_sorted_before_deciding() {
        let local = chain_of(3, "local");
        let remote = chain_of(5, "remote");
        let mut shuffled = remote.clone();
        shuffled.reverse();
        shuffled.swap(1, 3);
        assert_eq!(reconcile(&local[2], shuffled), Decision::Replace(remote));
    }

    #[test]
    fn full_chain_whose_tip_links_is_appended() {
        let local = chain_of(3, "shared");
        let mut remote = local.clone();
        remote.push(next_block(&local[2], "four"));
        assert_eq!(
            reconcile(&local[2], remote.clone()),
            Decision::Append(remote[3].clone())
        );
    }

    #[test]
    fn not_ahead_is_ignored() {
        let local = chain_of(3, "local");
        let remote = chain_of(3, "remote");
        assert_eq!(reconcile(&local[2], remote.clone()), Decision::Ignore);
        assert_eq!(reconcile(&local[2], vec![remote[1].clone()]), Decision::Ignore);
    }

    #[test]
    fn empty_response_is_ignored() {
        assert_eq!(reconcile(&Block::genesis(), Vec::new()), Decision::Ignore);
    }
}
