pub mod client;
pub mod peers;
pub mod reconcile;

pub use client::{HttpPeerClient, PeerChain, PeerClient, PeerUnreachable};
pub use peers::PeerSet;
pub use reconcile::replace_if_longer;
