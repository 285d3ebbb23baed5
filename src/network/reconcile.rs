use futures::future::join_all;
use log::{debug, info, warn};
use std::sync::RwLock;

use super::client::{PeerChain, PeerClient};
use crate::blockchain::{Block, Ledger, is_chain_valid};

/// Longest-chain rule over fetched peer chains.
///
/// Keeps a running maximum starting at `local_len`; a candidate must be
/// strictly longer than the current maximum and valid to take over, so the
/// last chain to raise the maximum wins. A chain whose advertised `length`
/// disagrees with its content is skipped.
pub fn select_longest(local_len: usize, candidates: Vec<PeerChain>) -> Option<Vec<Block>> {
    let mut max_length = local_len;
    let mut longest = None;

    for PeerChain { chain, length } in candidates {
        if length <= max_length {
            continue;
        }
        if chain.len() != length {
            debug!(
                "peer advertised length {} for a chain of {} blocks",
                length,
                chain.len()
            );
            continue;
        }
        if is_chain_valid(&chain) {
            max_length = length;
            longest = Some(chain);
        }
    }

    longest
}

/// Query every peer concurrently. Failed peers are logged and left out.
pub async fn fetch_chains<C: PeerClient>(client: &C, peers: &[String]) -> Vec<PeerChain> {
    let fetches = peers.iter().map(|peer| async move {
        match client.fetch_chain(peer).await {
            Ok(chain) => Some(chain),
            Err(err) => {
                warn!("skipping peer during reconciliation: {err}");
                None
            }
        }
    });

    join_all(fetches).await.into_iter().flatten().collect()
}

/// Replace the local chain with the longest valid peer chain, if any is
/// strictly longer. Returns whether a swap happened and the resulting chain.
///
/// Fetches run without holding the ledger lock; the decision and the swap
/// happen under one write lock against the ledger's length at that moment.
pub async fn replace_if_longer<C: PeerClient>(
    ledger: &RwLock<Ledger>,
    peers: &[String],
    client: &C,
) -> (bool, Vec<Block>) {
    let candidates = fetch_chains(client, peers).await;
    debug!(
        "{} of {} peer(s) answered with a chain",
        candidates.len(),
        peers.len()
    );

    let mut guard = ledger.write().expect("ledger lock poisoned");
    let replaced = match select_longest(guard.len(), candidates) {
        Some(chain) => {
            info!(
                "replacing local chain ({} blocks) with peer chain ({} blocks)",
                guard.len(),
                chain.len()
            );
            guard.replace_chain(chain);
            true
        }
        None => false,
    };

    (replaced, guard.chain().to_vec())
}
