use serde::{Deserialize, Serialize};
use serde_json::Number;

/// A transfer between two parties. Immutable once it has been sealed into a block.
///
/// `amount` is kept as a raw JSON number (`arbitrary_precision`), so integers
/// of any width and floats survive a round trip through peers unchanged
/// (`10` and `10.0` hash differently).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub sender: String,
    pub receiver: String,
    pub amount: Number,
}

impl Transaction {
    pub fn new(sender: impl Into<String>, receiver: impl Into<String>, amount: Number) -> Self {
        Self {
            sender: sender.into(),
            receiver: receiver.into(),
            amount,
        }
    }
}
