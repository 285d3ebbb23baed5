use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::blockchain::Block;

/// Upper bound on a peer's `/get_chain` body.
const MAX_CHAIN_BYTES: usize = 64 * 1024 * 1024;

/// Body of a peer's `/get_chain` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeerChain {
    pub chain: Vec<Block>,
    pub length: usize,
}

/// A peer that could not deliver its chain; it sits out the current pass.
#[derive(Debug, Error)]
#[error("peer {peer} unreachable: {reason}")]
pub struct PeerUnreachable {
    pub peer: String,
    pub reason: String,
}

/// Transport used to pull a chain from another node.
#[allow(async_fn_in_trait)]
pub trait PeerClient {
    async fn fetch_chain(&self, peer: &str) -> Result<PeerChain, PeerUnreachable>;
}

/// `GET http://<peer>/get_chain` over awc, bounded by a per-request timeout.
#[derive(Debug, Clone)]
pub struct HttpPeerClient {
    timeout: Duration,
}

impl HttpPeerClient {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl PeerClient for HttpPeerClient {
    async fn fetch_chain(&self, peer: &str) -> Result<PeerChain, PeerUnreachable> {
        let excluded = |reason: String| PeerUnreachable {
            peer: peer.to_string(),
            reason,
        };

        // awc clients are not Send, so one is built per request.
        let client = awc::Client::builder().timeout(self.timeout).finish();
        let mut response = client
            .get(format!("http://{peer}/get_chain"))
            .send()
            .await
            .map_err(|err| excluded(err.to_string()))?;

        if !response.status().is_success() {
            return Err(excluded(format!("status {}", response.status())));
        }

        response
            .json::<PeerChain>()
            .limit(MAX_CHAIN_BYTES)
            .await
            .map_err(|err| excluded(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::{HttpPeerClient, PeerClient};
    use crate::api::{AppState, init_routes};
    use crate::config::NodeConfig;
    use actix_web::dev::ServerHandle;
    use actix_web::web::{self, ServiceConfig};
    use actix_web::{App, HttpResponse, HttpServer};
    use std::net::TcpListener;
    use std::time::Duration;

    /// Serve `configure` on an ephemeral local port; returns `host:port`.
    fn spawn_peer(configure: fn(&mut ServiceConfig)) -> std::io::Result<(String, ServerHandle)> {
        let server = HttpServer::new(move || App::new().configure(configure))
            .workers(1)
            .bind(("127.0.0.1", 0))?;
        let addr = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);
        Ok((addr.to_string(), handle))
    }

    fn healthy_node(cfg: &mut ServiceConfig) {
        cfg.app_data(web::Data::new(AppState::new(&NodeConfig::default())));
        init_routes(cfg);
    }

    fn failing_node(cfg: &mut ServiceConfig) {
        cfg.route(
            "/get_chain",
            web::get().to(|| async { HttpResponse::InternalServerError().finish() }),
        );
    }

    fn stalled_node(cfg: &mut ServiceConfig) {
        cfg.route(
            "/get_chain",
            web::get().to(|| async {
                actix_web::rt::time::sleep(Duration::from_secs(2)).await;
                HttpResponse::Ok().finish()
            }),
        );
    }

    #[actix_web::test]
    async fn decodes_chain_served_by_a_node() {
        let (peer, handle) = spawn_peer(healthy_node).unwrap();
        let client = HttpPeerClient::new(Duration::from_secs(5));

        let offered = client.fetch_chain(&peer).await.unwrap();
        assert_eq!(offered.length, 1);
        assert_eq!(offered.chain.len(), 1);
        assert_eq!(offered.chain[0].index, 1);
        assert_eq!(offered.chain[0].previous_hash, "0");

        handle.stop(false).await;
    }

    #[actix_web::test]
    async fn error_status_excludes_peer() {
        let (peer, handle) = spawn_peer(failing_node).unwrap();
        let client = HttpPeerClient::new(Duration::from_secs(5));

        let err = client.fetch_chain(&peer).await.unwrap_err();
        assert_eq!(err.peer, peer);
        assert!(err.reason.contains("500"), "reason: {}", err.reason);

        handle.stop(false).await;
    }

    #[actix_web::test]
    async fn slow_peer_hits_timeout() {
        let (peer, handle) = spawn_peer(stalled_node).unwrap();
        let client = HttpPeerClient::new(Duration::from_millis(200));

        let err = client.fetch_chain(&peer).await.unwrap_err();
        assert_eq!(err.peer, peer);

        handle.stop(false).await;
    }

    #[actix_web::test]
    async fn closed_port_excludes_peer() {
        let port = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let peer = format!("127.0.0.1:{port}");
        let client = HttpPeerClient::new(Duration::from_secs(1));

        let err = client.fetch_chain(&peer).await.unwrap_err();
        assert_eq!(err.peer, peer);
    }
}
