//! Core functionality for the plasma ante verifier
//! Contains the ledger data model, capability traits, and the recoverable signature codec

pub mod codec;
pub mod traits;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_helpers;

pub use codec::*;
pub use traits::*;
pub use types::*;
