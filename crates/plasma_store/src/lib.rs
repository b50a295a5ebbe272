//! UTXO lookup adapters for the plasma ante verifier
//!
//! Both adapters implement [`plasma_core::UtxoStore`]. Writes exist only so the
//! ledger (or a test) can populate them; the verifier never calls them.

pub mod memory;
pub mod persistence;

pub use memory::MemoryUtxoStore;
pub use persistence::UtxoStorage;

use thiserror::Error;

/// Error types for store operations
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Corrupt UTXO record of {len} bytes")]
    CorruptRecord { len: usize },
    #[error("Store lock poisoned")]
    LockPoisoned,
}
