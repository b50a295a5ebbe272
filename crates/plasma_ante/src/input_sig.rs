//! Ownership signature check for a single input

use plasma_core::{
    keccak256, Address, EncodedSignature, OwnedUtxo, Position, SignatureCodec, UtxoStore,
};

use crate::errors::{AnteError, Slot};

/// Verify that the UTXO at `position` belongs to `expected` and that
/// `signature` over `sign_bytes` was produced by `expected`'s key.
///
/// The declared owner is compared before any cryptography so a spend of
/// someone else's output is reported as `OwnerMismatch` rather than as a
/// signature failure.
pub fn verify_input_signature<S: UtxoStore>(
    store: &S,
    codec: &SignatureCodec,
    slot: Slot,
    position: &Position,
    expected: &Address,
    signature: &EncodedSignature,
    sign_bytes: &[u8],
) -> Result<(), AnteError> {
    let utxo = store.get_utxo(position).ok_or(AnteError::UnknownUtxo {
        slot,
        position: *position,
    })?;

    let owner = utxo.owner();
    if owner != *expected {
        return Err(AnteError::OwnerMismatch {
            slot,
            expected: *expected,
            owner,
        });
    }

    let message_hash = keccak256(sign_bytes);
    let recovered = codec
        .recover_address(&message_hash, signature)
        .map_err(|source| AnteError::SignatureInvalid { slot, source })?;

    if recovered != *expected {
        return Err(AnteError::SignatureMismatch {
            slot,
            expected: *expected,
            recovered,
        });
    }

    tracing::debug!("{} input {} signed by owner {}", slot, position, owner);
    Ok(())
}
