mod chain;
pub mod models;
mod nodes;
mod tx;

use actix_web::web::{self, ServiceConfig};
use log::warn;

pub use models::AppState;
use crate::error::NodeError;

/// Paths are unprefixed: `/get_chain` doubles as the peer protocol.
pub fn init_routes(cfg: &mut ServiceConfig) {
    // mistyped bodies get the same `{error}` JSON as other client errors
    cfg.app_data(web::JsonConfig::default().error_handler(|err, req| {
        warn!("{} {} - rejected body: {}", req.method(), req.path(), err);
        NodeError::MalformedBody(err.to_string()).into()
    }));

    cfg.service(chain::mine_block)
        .service(chain::get_chain)
        .service(chain::is_valid)
        .service(tx::add_transaction)
        .service(nodes::connect_node)
        .service(nodes::replace_chain);
}
