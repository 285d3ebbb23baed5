//! Peer-reconciled proof-of-work ledger node.
//!
//! The ledger, miner and validator live in [`blockchain`]; pending
//! transactions in [`transaction`]; peer registry and longest-chain
//! reconciliation in [`network`]; the HTTP surface in [`api`].

pub mod api;
pub mod blockchain;
pub mod config;
pub mod error;
pub mod network;
pub mod transaction;
