pub mod block;
pub mod hash;
pub mod model;
pub mod pow;
pub mod validation;

pub use block::Block;
pub use model::Ledger;
pub use validation::is_chain_valid;

/// Required hex prefix of a proof digest. Fixed; there is no retargeting.
pub const DIFFICULTY_PREFIX: &str = "0000";

/// Proof stored in the genesis block.
pub const GENESIS_PROOF: u64 = 1;

/// `previous_hash` of the genesis block.
pub const GENESIS_PREVIOUS_HASH: &str = "0";
