//! Confirmation signature check for a single input
//!
//! The addresses that funded a UTXO must re-sign its position every time it is
//! spent. This ties the spend to the chain state those funders have seen, so an
//! exit built from a superseded state cannot reuse an old authorization.

use plasma_core::{
    keccak256, Address, ConfirmSigs, OwnedUtxo, Position, SignatureCodec, UtxoStore,
};

use crate::errors::{AnteError, Slot};

/// Verify the confirmation signatures of the input at `position`.
///
/// Checked against the UTXO's input addresses, not its owner. The second
/// signature is required only when the UTXO records a second input address.
pub fn verify_confirm_signatures<S: UtxoStore>(
    store: &S,
    codec: &SignatureCodec,
    input: Slot,
    position: &Position,
    confirm_sigs: &ConfirmSigs,
    position_sign_bytes: &[u8],
) -> Result<(), AnteError> {
    let utxo = store.get_utxo(position).ok_or(AnteError::UnknownUtxo {
        slot: input,
        position: *position,
    })?;
    let input_addresses = utxo.input_addresses();

    let message_hash = keccak256(position_sign_bytes);

    let check = |confirm: Slot, expected: &Address| -> Result<(), AnteError> {
        match codec.recover_address(&message_hash, &confirm_sigs[confirm.index()]) {
            Ok(recovered) if recovered == *expected => Ok(()),
            Ok(recovered) => {
                tracing::debug!(
                    "confirm signature {} of {} recovers {}, expected {}",
                    confirm,
                    position,
                    recovered,
                    expected
                );
                Err(AnteError::ConfirmSignatureMismatch { input, confirm })
            }
            Err(e) => {
                tracing::debug!("confirm signature {} of {} unreadable: {}", confirm, position, e);
                Err(AnteError::ConfirmSignatureMismatch { input, confirm })
            }
        }
    };

    check(Slot::First, &input_addresses[0])?;

    if input_addresses[1].is_valid() {
        check(Slot::Second, &input_addresses[1])?;
    }

    Ok(())
}
