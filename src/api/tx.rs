use actix_web::{HttpResponse, post, web};
use log::{debug, warn};

use super::models::{AppState, NewTxRequest, NewTxResponse};
use crate::error::NodeError;
use crate::transaction::Transaction;

/// Queue a transaction for the next mined block.
#[post("/add_transaction")]
pub async fn add_transaction(
    state: web::Data<AppState>,
    body: web::Json<NewTxRequest>,
) -> Result<HttpResponse, NodeError> {
    let NewTxRequest {
        sender,
        receiver,
        amount,
    } = body.into_inner();

    let (Some(sender), Some(receiver), Some(amount)) = (sender, receiver, amount) else {
        warn!("POST /add_transaction - rejected: missing fields");
        return Err(NodeError::MissingFields);
    };

    let tx = Transaction::new(sender, receiver, amount);
    debug!("POST /add_transaction - {:?}", tx);

    let index = {
        let mut ledger = state.ledger.write().expect("ledger lock poisoned");
        ledger.add_transaction(tx)
    };

    Ok(HttpResponse::Created().json(NewTxResponse {
        message: format!("This transaction will be added to block {index}"),
        index,
    }))
}
