//! Rejection reasons for the ante handler

use plasma_core::{Address, CodecError, Position};
use std::fmt;
use thiserror::Error;

/// Which of the two input (or confirmation) slots a check concerns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    First,
    Second,
}

impl Slot {
    pub fn index(self) -> usize {
        match self {
            Slot::First => 0,
            Slot::Second => 1,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::First => f.write_str("first"),
            Slot::Second => f.write_str("second"),
        }
    }
}

/// Reason a transaction was rejected. The first failing check wins.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnteError {
    #[error("no signers")]
    NoSigners,

    #[error("tx must be in form of BaseTx")]
    WrongTxShape,

    #[error("wrong number of signers: {signatures} signatures for {signers} signers")]
    SignerCountMismatch { signatures: usize, signers: usize },

    #[error("msg must be of type SpendMsg")]
    WrongMessageShape,

    #[error("{slot} input UTXO {position} does not exist")]
    UnknownUtxo { slot: Slot, position: Position },

    #[error("signer {expected} does not match owner {owner} of {slot} input")]
    OwnerMismatch {
        slot: Slot,
        expected: Address,
        owner: Address,
    },

    #[error("{slot} input signature is malformed: {source}")]
    SignatureInvalid {
        slot: Slot,
        #[source]
        source: CodecError,
    },

    #[error("{slot} input signature recovers {recovered}, expected {expected}")]
    SignatureMismatch {
        slot: Slot,
        expected: Address,
        recovered: Address,
    },

    #[error("confirm signature {confirm} of {input} input verification failed")]
    ConfirmSignatureMismatch { input: Slot, confirm: Slot },

    #[error("fee {fee} overflows collected fees {fees}")]
    FeeOverflow { fees: u64, fee: u64 },
}

impl AnteError {
    /// Stable reason code for logs and callers
    pub fn code(&self) -> &'static str {
        match self {
            AnteError::NoSigners => "no_signers",
            AnteError::WrongTxShape => "wrong_tx_shape",
            AnteError::SignerCountMismatch { .. } => "signer_count_mismatch",
            AnteError::WrongMessageShape => "wrong_message_shape",
            AnteError::UnknownUtxo { .. } => "unknown_utxo",
            AnteError::OwnerMismatch { .. } => "owner_mismatch",
            AnteError::SignatureInvalid { .. } => "signature_invalid",
            AnteError::SignatureMismatch { .. } => "signature_mismatch",
            AnteError::ConfirmSignatureMismatch { .. } => "confirm_signature_mismatch",
            AnteError::FeeOverflow { .. } => "fee_overflow",
        }
    }

    /// Input slot the rejection points at, if any
    pub fn slot(&self) -> Option<Slot> {
        match self {
            AnteError::UnknownUtxo { slot, .. }
            | AnteError::OwnerMismatch { slot, .. }
            | AnteError::SignatureInvalid { slot, .. }
            | AnteError::SignatureMismatch { slot, .. } => Some(*slot),
            AnteError::ConfirmSignatureMismatch { input, .. } => Some(*input),
            _ => None,
        }
    }
}
