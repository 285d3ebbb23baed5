use actix_web::{HttpResponse, get, web};
use log::info;

use super::models::{AppState, ChainResponse, MineResponse, ValidityResponse};
use crate::blockchain::block::now_timestamp;
use crate::blockchain::pow::mine_next_block;
use crate::error::NodeError;

/// Mine a block on top of the current tip:
/// - Search the proof on a blocking worker so reads stay responsive
/// - Queue the node's reward (if enabled) right before sealing
/// - Seal all pending transactions into the new block
#[get("/mine_block")]
pub async fn mine_block(state: web::Data<AppState>) -> Result<HttpResponse, NodeError> {
    let worker_state = state.clone();
    let block = web::block(move || {
        mine_next_block(&worker_state.ledger, worker_state.reward.as_ref())
    })
    .await
    .map_err(|err| NodeError::Mining(err.to_string()))?;

    info!(
        "MINER - sealed block #{} (proof={}, txs={})",
        block.index,
        block.proof,
        block.transactions.len()
    );
    Ok(HttpResponse::Ok().json(MineResponse::from(block)))
}

/// Get the full chain. Also serves as the peer protocol endpoint.
#[get("/get_chain")]
pub async fn get_chain(state: web::Data<AppState>) -> HttpResponse {
    let ledger = state.ledger.read().expect("ledger lock poisoned");
    HttpResponse::Ok().json(ChainResponse {
        chain: ledger.chain(),
        length: ledger.len(),
    })
}

/// Report whether the local chain currently validates.
#[get("/is_valid")]
pub async fn is_valid(state: web::Data<AppState>) -> HttpResponse {
    let valid = {
        let ledger = state.ledger.read().expect("ledger lock poisoned");
        ledger.is_valid()
    };
    HttpResponse::Ok().json(ValidityResponse {
        datetime: now_timestamp(),
        valid,
        health_status: if valid { "Good" } else { "Bad" },
    })
}
