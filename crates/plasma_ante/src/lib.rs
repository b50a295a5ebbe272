//! Ante handler for plasma spend transactions
//!
//! Checks that every input of a spend is signed by its owner and that the
//! addresses which funded each input have confirmed the spend. The handler
//! reads UTXOs through [`plasma_core::UtxoStore`] and never writes them.

pub mod config;
pub mod confirm_sig;
pub mod errors;
pub mod handler;
pub mod input_sig;

#[cfg(test)]
mod test_helpers;


pub use config::{AnteConfig, SignatureConfig};
pub use confirm_sig::verify_confirm_signatures;
pub use errors::{AnteError, Slot};
pub use handler::{Accepted, AnteHandler, BlockOutcome, ExecMode};
pub use input_sig::verify_input_signature;
