use log::debug;
use std::sync::RwLock;

use super::hash::sha256_hex;
use super::{Block, DIFFICULTY_PREFIX, Ledger};
use crate::transaction::Transaction;

/// Digest of `proof² - previous_proof²` rendered as a signed decimal string.
///
/// Returns `None` when the difference does not fit in an `i128`, which can only
/// happen for proofs far beyond anything a real search would reach.
pub fn proof_digest(proof: u64, previous_proof: u64) -> Option<String> {
    let p = i128::from(proof);
    let q = i128::from(previous_proof);
    let operation = p.checked_mul(p)?.checked_sub(q.checked_mul(q)?)?;
    Some(sha256_hex(operation.to_string().as_bytes()))
}

/// Difficulty predicate shared by the miner and the validator.
pub fn is_valid_proof(proof: u64, previous_proof: u64) -> bool {
    proof_digest(proof, previous_proof)
        .is_some_and(|digest| digest.starts_with(DIFFICULTY_PREFIX))
}

/// Brute-force the smallest proof (counting from 1) that satisfies the
/// difficulty predicate against `previous_proof`. Runs to completion.
pub fn solve(previous_proof: u64) -> u64 {
    let mut proof: u64 = 1;
    while !is_valid_proof(proof, previous_proof) {
        proof += 1;
    }
    proof
}

/// Seal a block with `proof` if the ledger's tip still hashes to
/// `previous_hash`. Returns `None`, leaving the ledger untouched, when the tip
/// moved since the proof search started.
pub fn try_append(
    ledger: &mut Ledger,
    previous_hash: &str,
    proof: u64,
    reward: Option<&Transaction>,
) -> Option<Block> {
    if ledger.previous_block().hash() != previous_hash {
        return None;
    }
    if let Some(tx) = reward {
        ledger.add_transaction(tx.clone());
    }
    Some(ledger.create_block(proof, previous_hash.to_string()).clone())
}

/// Mine the next block on top of the ledger's tip.
///
/// The search runs without holding the lock. If the tip changed by the time a
/// proof is found, the search restarts from the new tip. `reward` is queued
/// right before sealing so it ends up in the block that actually lands.
pub fn mine_next_block(ledger: &RwLock<Ledger>, reward: Option<&Transaction>) -> Block {
    loop {
        let (previous_proof, previous_hash) = {
            let guard = ledger.read().expect("ledger lock poisoned");
            let tip = guard.previous_block();
            (tip.proof, tip.hash())
        };

        let proof = solve(previous_proof);

        let mut guard = ledger.write().expect("ledger lock poisoned");
        match try_append(&mut guard, &previous_hash, proof, reward) {
            Some(block) => return block,
            None => debug!("tip moved during proof search, restarting"),
        }
    }
}
