use actix_web::http::Uri;
use std::collections::BTreeSet;

use crate::error::NodeError;

/// Reduce an address to its `host:port` network location.
///
/// Accepts absolute URLs (`http://host:port/path?q`) as well as bare
/// `host:port` authorities.
pub fn network_location(address: &str) -> Result<String, NodeError> {
    let invalid = || NodeError::InvalidAddress(address.to_string());

    let uri: Uri = address.trim().parse().map_err(|_| invalid())?;
    match uri.authority() {
        Some(authority) if !authority.as_str().is_empty() => Ok(authority.as_str().to_string()),
        _ => Err(invalid()),
    }
}

/// Deduplicated registry of peer locations. Entries are never removed.
#[derive(Debug, Default)]
pub struct PeerSet {
    nodes: BTreeSet<String>,
}

impl PeerSet {
    pub fn new() -> Self {
        Self {
            nodes: BTreeSet::new(),
        }
    }

    /// Register `address`. Returns `false` if the location was already known.
    pub fn add(&mut self, address: &str) -> Result<bool, NodeError> {
        let location = network_location(address)?;
        Ok(self.nodes.insert(location))
    }

    /// Register every address, or none of them if any is malformed.
    /// Returns how many locations were new.
    pub fn add_all<S: AsRef<str>>(&mut self, addresses: &[S]) -> Result<usize, NodeError> {
        let locations = addresses
            .iter()
            .map(|address| network_location(address.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        let mut added = 0;
        for location in locations {
            if self.nodes.insert(location) {
                added += 1;
            }
        }
        Ok(added)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Owned copy of every known location, in sorted order.
    pub fn snapshot(&self) -> Vec<String> {
        self.nodes.iter().cloned().collect()
    }
}
