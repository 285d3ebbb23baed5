use chrono::Local;
use serde::{Deserialize, Serialize};

use super::hash::hash_block;
use crate::transaction::Transaction;

/// A sealed block in the ledger. Never mutated after being appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    pub timestamp: String, // local wall-clock time, microsecond precision
    pub proof: u64,
    pub previous_hash: String,
    pub transactions: Vec<Transaction>,
}

impl Block {
    /// Build a block stamped with the current local time.
    pub fn new(
        index: u64,
        proof: u64,
        previous_hash: String,
        transactions: Vec<Transaction>,
    ) -> Self {
        Self {
            index,
            timestamp: now_timestamp(),
            proof,
            previous_hash,
            transactions,
        }
    }

    /// Digest of the block's canonical serialization.
    pub fn hash(&self) -> String {
        hash_block(self)
    }
}

/// Current local time as `YYYY-MM-DD HH:MM:SS.ffffff`.
pub fn now_timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S%.6f").to_string()
}
