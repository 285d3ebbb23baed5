use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::sync::RwLock;

use crate::blockchain::{Block, Ledger};
use crate::config::NodeConfig;
use crate::network::{HttpPeerClient, PeerSet};
use crate::transaction::Transaction;

/// Shared node state: the ledger (chain + mempool), known peers, and the
/// transport used to reach them.
pub struct AppState {
    pub ledger: RwLock<Ledger>,
    pub peers: RwLock<PeerSet>,
    pub client: HttpPeerClient,
    /// Queued ahead of every mined block, when enabled.
    pub reward: Option<Transaction>,
}

impl AppState {
    pub fn new(config: &NodeConfig) -> Self {
        let reward = (config.reward_amount > 0).then(|| {
            Transaction::new(
                config.node_id.clone(),
                config.reward_recipient.clone(),
                Number::from(config.reward_amount),
            )
        });

        Self {
            ledger: RwLock::new(Ledger::new()),
            peers: RwLock::new(PeerSet::new()),
            client: HttpPeerClient::new(config.peer_timeout),
            reward,
        }
    }
}

/* ---------- Chain API Models ---------- */

#[derive(Serialize)]
pub struct ChainResponse<'a> {
    pub chain: &'a [Block],
    pub length: usize,
}

#[derive(Serialize)]
pub struct ValidityResponse {
    pub datetime: String,
    pub valid: bool,
    pub health_status: &'static str,
}

#[derive(Serialize)]
pub struct MineResponse {
    pub message: &'static str,
    pub index: u64,
    pub timestamp: String,
    pub proof: u64,
    pub previous_hash: String,
    pub transactions: Vec<Transaction>,
}

impl From<Block> for MineResponse {
    fn from(block: Block) -> Self {
        Self {
            message: "Congratulations, you just mined a block!",
            index: block.index,
            timestamp: block.timestamp,
            proof: block.proof,
            previous_hash: block.previous_hash,
            transactions: block.transactions,
        }
    }
}

/* ---------- TX API Models ---------- */

/// Every field is optional so that absence maps to `MissingFields`
/// instead of a generic deserialization error.
#[derive(Deserialize)]
pub struct NewTxRequest {
    pub sender: Option<String>,
    pub receiver: Option<String>,
    pub amount: Option<Number>,
}

#[derive(Serialize)]
pub struct NewTxResponse {
    pub message: String,
    pub index: u64,
}

/* ---------- Node API Models ---------- */

#[derive(Deserialize)]
pub struct ConnectRequest {
    pub nodes: Option<Vec<String>>,
}

#[derive(Serialize)]
pub struct ConnectResponse {
    pub message: &'static str,
    pub total_nodes: Vec<String>,
}

#[derive(Serialize)]
pub struct ReplaceResponse {
    pub message: &'static str,
    pub replaced: bool,
    pub chain: Vec<Block>,
}
