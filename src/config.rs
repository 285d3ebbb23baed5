use std::env;
use std::str::FromStr;
use std::time::Duration;
use uuid::Uuid;

/// Runtime settings for a node, read from the environment (and `.env`).
#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// Interface the HTTP server binds to. `HOST`, defaults to `127.0.0.1`.
    pub host: String,
    /// `PORT`, defaults to `5000`.
    pub port: u16,
    /// Identity used as the sender of mining rewards. `NODE_ID`, defaults to
    /// a random UUID without dashes.
    pub node_id: String,
    /// `REWARD_RECIPIENT`, defaults to the node id.
    pub reward_recipient: String,
    /// `REWARD_AMOUNT`; `0` turns the reward transaction off.
    pub reward_amount: u64,
    /// Per-peer budget for `/get_chain` during reconciliation.
    pub peer_timeout: Duration,
}

impl Default for NodeConfig {
    fn default() -> Self {
        let node_id = Uuid::new_v4().simple().to_string();
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            reward_recipient: node_id.clone(),
            node_id,
            reward_amount: 10,
            peer_timeout: Duration::from_secs(5),
        }
    }
}

impl NodeConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let node_id = env::var("NODE_ID").unwrap_or(defaults.node_id);
        let reward_recipient = env::var("REWARD_RECIPIENT").unwrap_or_else(|_| node_id.clone());

        Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: parsed("PORT").unwrap_or(defaults.port),
            node_id,
            reward_recipient,
            reward_amount: parsed("REWARD_AMOUNT").unwrap_or(defaults.reward_amount),
            peer_timeout: parsed("PEER_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.peer_timeout),
        }
    }
}

fn parsed<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::NodeConfig;

    #[test]
    fn default_rewards_the_node_itself() {
        let config = NodeConfig::default();
        assert_eq!(config.port, 5000);
        assert_eq!(config.node_id.len(), 32);
        assert!(!config.node_id.contains('-'));
        assert_eq!(config.reward_recipient, config.node_id);
        assert_eq!(config.reward_amount, 10);
    }
}
