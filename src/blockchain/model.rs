use log::debug;

use super::validation::is_chain_valid;
use super::{Block, GENESIS_PREVIOUS_HASH, GENESIS_PROOF};
use crate::transaction::{Mempool, Transaction};

/// In-memory chain of blocks plus the pool of transactions bound for the next one.
#[derive(Debug)]
pub struct Ledger {
    chain: Vec<Block>,
    mempool: Mempool,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    /// Initialize a ledger holding only the genesis block.
    pub fn new() -> Self {
        let mut ledger = Self {
            chain: Vec::new(),
            mempool: Mempool::new(),
        };
        ledger.create_block(GENESIS_PROOF, GENESIS_PREVIOUS_HASH.to_string());
        ledger
    }

    /// Seal every pending transaction into a new block and append it.
    pub fn create_block(&mut self, proof: u64, previous_hash: String) -> &Block {
        let index = self.chain.len() as u64 + 1;
        let transactions = self.mempool.drain();
        debug!(
            "sealing block #{} with {} transaction(s)",
            index,
            transactions.len()
        );

        self.chain
            .push(Block::new(index, proof, previous_hash, transactions));
        self.previous_block()
    }

    /// Return the last block in the chain.
    pub fn previous_block(&self) -> &Block {
        self.chain
            .last()
            .expect("ledger always holds at least the genesis block")
    }

    /// Queue a transaction and return the block index it is meant for.
    ///
    /// The value is `chain length + 1`. It is advisory: the transaction lands in
    /// whichever block is mined next.
    pub fn add_transaction(&mut self, tx: Transaction) -> u64 {
        self.mempool.push(tx);
        debug!("mempool size now {}", self.mempool.len());
        self.chain.len() as u64 + 1
    }

    pub fn chain(&self) -> &[Block] {
        &self.chain
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn mempool(&self) -> &Mempool {
        &self.mempool
    }

    pub fn is_valid(&self) -> bool {
        is_chain_valid(&self.chain)
    }

    /// Swap in a chain received from a peer. Pending transactions are kept.
    pub fn replace_chain(&mut self, chain: Vec<Block>) {
        debug_assert!(!chain.is_empty());
        self.chain = chain;
    }
}
