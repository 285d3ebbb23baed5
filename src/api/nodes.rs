use actix_web::{HttpResponse, get, post, web};
use log::info;

use super::models::{AppState, ConnectRequest, ConnectResponse, ReplaceResponse};
use crate::error::NodeError;
use crate::network::replace_if_longer;

/// Register peer nodes by address; only `host:port` is kept.
#[post("/connect_node")]
pub async fn connect_node(
    state: web::Data<AppState>,
    body: web::Json<ConnectRequest>,
) -> Result<HttpResponse, NodeError> {
    let nodes = match body.into_inner().nodes {
        Some(nodes) if !nodes.is_empty() => nodes,
        _ => return Err(NodeError::NoNodesProvided),
    };

    let total_nodes = {
        let mut peers = state.peers.write().expect("peer lock poisoned");
        let added = peers.add_all(&nodes)?;
        info!("registered {} new peer(s), {} known", added, peers.len());
        peers.snapshot()
    };

    Ok(HttpResponse::Created().json(ConnectResponse {
        message: "All nodes are now connected",
        total_nodes,
    }))
}

/// Adopt the longest valid chain among known peers, if one beats ours.
#[get("/replace_chain")]
pub async fn replace_chain(state: web::Data<AppState>) -> HttpResponse {
    let peers = state
        .peers
        .read()
        .expect("peer lock poisoned")
        .snapshot();

    let (replaced, chain) = replace_if_longer(&state.ledger, &peers, &state.client).await;
    let message = if replaced {
        "The node had a different chain, so it was replaced by the longest one"
    } else {
        "All good. The chain is the largest one"
    };

    HttpResponse::Ok().json(ReplaceResponse {
        message,
        replaced,
        chain,
    })
}
