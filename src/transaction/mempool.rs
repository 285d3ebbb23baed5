use super::model::Transaction;

/// Pending transactions waiting to be sealed into the next block.
#[derive(Debug, Default)]
pub struct Mempool {
    pending: Vec<Transaction>,
}

impl Mempool {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    pub fn push(&mut self, tx: Transaction) {
        self.pending.push(tx);
    }

    /// Move every pending transaction out, leaving the pool empty.
    pub fn drain(&mut self) -> Vec<Transaction> {
        std::mem::take(&mut self.pending)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
