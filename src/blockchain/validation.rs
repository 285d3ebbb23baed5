use log::debug;

use super::Block;
use super::pow::is_valid_proof;

/// Check hash linkage and proof-of-work for every consecutive pair of blocks.
///
/// The first block is taken as the root of trust and is not inspected on its
/// own. Stops at the first broken pair. An empty chain is never valid.
pub fn is_chain_valid(chain: &[Block]) -> bool {
    if chain.is_empty() {
        return false;
    }

    for pair in chain.windows(2) {
        let (previous, block) = (&pair[0], &pair[1]);

        if block.previous_hash != previous.hash() {
            debug!("block #{} does not link to its predecessor", block.index);
            return false;
        }

        if !is_valid_proof(block.proof, previous.proof) {
            debug!("block #{} carries an invalid proof", block.index);
            return false;
        }
    }

    true
}
