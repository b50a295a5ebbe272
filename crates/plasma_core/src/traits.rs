//! Core traits for the plasma ante verifier

use crate::types::{Address, Msg, OpaqueMsg, Position, SpendMsg, Utxo};
use std::sync::Arc;
use thiserror::Error;

/// Error types for signature decoding and recovery
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("Wrong signature type prefix: {0}")]
    WrongPrefix(String),
    #[error("Wrong signature length: expected {expected}, got {actual}")]
    WrongLength { expected: usize, actual: usize },
    #[error("Recovery id out of range: {0}")]
    InvalidRecoveryId(u8),
    #[error("Malformed signature")]
    Malformed,
    #[error("Public key recovery failed")]
    RecoveryFailed,
}

/// A message that names the addresses which must sign it
pub trait Spendable {
    /// Addresses expected to provide ownership signatures, in order
    fn signers(&self) -> Vec<Address>;

    /// Bytes the ownership signatures are computed over
    fn sign_bytes(&self) -> Vec<u8>;
}

impl Spendable for SpendMsg {
    fn signers(&self) -> Vec<Address> {
        SpendMsg::signers(self)
    }

    fn sign_bytes(&self) -> Vec<u8> {
        SpendMsg::sign_bytes(self)
    }
}

impl Spendable for OpaqueMsg {
    fn signers(&self) -> Vec<Address> {
        self.signers.clone()
    }

    fn sign_bytes(&self) -> Vec<u8> {
        self.payload.clone()
    }
}

impl Spendable for Msg {
    fn signers(&self) -> Vec<Address> {
        match self {
            Msg::Spend(msg) => Spendable::signers(msg),
            Msg::Opaque(msg) => msg.signers(),
        }
    }

    fn sign_bytes(&self) -> Vec<u8> {
        match self {
            Msg::Spend(msg) => Spendable::sign_bytes(msg),
            Msg::Opaque(msg) => msg.sign_bytes(),
        }
    }
}

/// A ledger record with a spender and a provenance
pub trait OwnedUtxo {
    /// Address currently allowed to spend the output
    fn owner(&self) -> Address;

    /// Owners of the inputs that funded the output
    fn input_addresses(&self) -> [Address; 2];
}

impl OwnedUtxo for Utxo {
    fn owner(&self) -> Address {
        self.owner
    }

    fn input_addresses(&self) -> [Address; 2] {
        self.input_addresses
    }
}

/// Read access to the ledger's unspent outputs.
///
/// Absence is not an error here; callers decide what a miss means.
pub trait UtxoStore {
    type Utxo: OwnedUtxo;

    fn get_utxo(&self, position: &Position) -> Option<Self::Utxo>;
}

impl<S: UtxoStore + ?Sized> UtxoStore for &S {
    type Utxo = S::Utxo;

    fn get_utxo(&self, position: &Position) -> Option<Self::Utxo> {
        (**self).get_utxo(position)
    }
}

impl<S: UtxoStore + ?Sized> UtxoStore for Arc<S> {
    type Utxo = S::Utxo;

    fn get_utxo(&self, position: &Position) -> Option<Self::Utxo> {
        (**self).get_utxo(position)
    }
}
