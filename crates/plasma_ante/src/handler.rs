//! Authorization of spend transactions
//!
//! [`AnteHandler::authorize`] runs every check in a fixed order and stops at
//! the first failure. Fee accounting is explicit: the caller passes its running
//! total in and gets the updated total back on acceptance, so a rejected
//! transaction leaves nothing to undo.

use plasma_core::{Msg, SignatureCodec, Spendable, Tx, UtxoStore};

use crate::config::AnteConfig;
use crate::confirm_sig::verify_confirm_signatures;
use crate::errors::{AnteError, Slot};
use crate::input_sig::verify_input_signature;

/// Whether a transaction is being checked for the mempool or applied in a block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecMode {
    /// Speculative check; fee totals are never changed
    Check,
    /// Block application; accepted fees are added to the running total
    Deliver,
}

/// Outcome of a successful authorization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accepted {
    /// Fee added by this transaction (zero in `Check` mode)
    pub fee_delta: u64,
    /// Running fee total after this transaction
    pub fees: u64,
}

/// Per-transaction outcomes of a batch and the final fee total
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockOutcome {
    pub results: Vec<Result<Accepted, AnteError>>,
    pub fees: u64,
}

impl BlockOutcome {
    pub fn accepted(&self) -> usize {
        self.results.iter().filter(|result| result.is_ok()).count()
    }
}

/// Verifier for spend transactions against a read-only UTXO set
pub struct AnteHandler<S> {
    store: S,
    codec: SignatureCodec,
}

impl<S: UtxoStore> AnteHandler<S> {
    /// Handler expecting default secp256k1 signature encoding
    pub fn new(store: S) -> Self {
        Self::with_codec(store, SignatureCodec::default())
    }

    pub fn with_codec(store: S, codec: SignatureCodec) -> Self {
        Self { store, codec }
    }

    /// Handler configured from an [`AnteConfig`]
    pub fn with_config(store: S, config: &AnteConfig) -> Result<Self, config::ConfigError> {
        Ok(Self::with_codec(store, config.codec()?))
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Authorize `tx`, returning the updated fee total or the first failed check.
    ///
    /// Identical inputs against an unchanged store always give the same answer.
    pub fn authorize(&self, tx: &Tx, mode: ExecMode, fees: u64) -> Result<Accepted, AnteError> {
        match self.run_checks(tx, mode, fees) {
            Ok(accepted) => {
                if mode == ExecMode::Deliver {
                    tracing::info!(
                        "Accepted spend, fee {} (total {})",
                        accepted.fee_delta,
                        accepted.fees
                    );
                } else {
                    tracing::debug!("Spend passes check");
                }
                Ok(accepted)
            }
            Err(e) => {
                tracing::debug!("Rejected tx ({}): {}", e.code(), e);
                Err(e)
            }
        }
    }

    /// Authorize transactions in order, threading the fee total through.
    /// A rejected transaction does not stop the batch.
    pub fn authorize_block(&self, txs: &[Tx], mode: ExecMode, fees: u64) -> BlockOutcome {
        let mut total = fees;
        let results = txs
            .iter()
            .map(|tx| {
                let result = self.authorize(tx, mode, total);
                if let Ok(accepted) = &result {
                    total = accepted.fees;
                }
                result
            })
            .collect();

        BlockOutcome {
            results,
            fees: total,
        }
    }

    fn run_checks(&self, tx: &Tx, mode: ExecMode, fees: u64) -> Result<Accepted, AnteError> {
        let signatures = tx.signatures();
        if signatures.is_empty() {
            return Err(AnteError::NoSigners);
        }

        let base = tx.as_base().ok_or(AnteError::WrongTxShape)?;

        let signers = base.msg.signers();
        if signatures.len() != signers.len() {
            return Err(AnteError::SignerCountMismatch {
                signatures: signatures.len(),
                signers: signers.len(),
            });
        }

        let spend = match &base.msg {
            Msg::Spend(spend) => spend,
            Msg::Opaque(opaque) => {
                tracing::debug!("Message for route {} is not a spend", opaque.route);
                return Err(AnteError::WrongMessageShape);
            }
        };
        let sign_bytes = spend.sign_bytes();

        let first = &spend.inputs[0];
        verify_input_signature(
            &self.store,
            &self.codec,
            Slot::First,
            &first.position,
            &signers[0],
            &signatures[0],
            &sign_bytes,
        )?;
        verify_confirm_signatures(
            &self.store,
            &self.codec,
            Slot::First,
            &first.position,
            &first.confirm_sigs,
            &first.position.sign_bytes(),
        )?;

        if let Some(second) = spend.second_input() {
            verify_input_signature(
                &self.store,
                &self.codec,
                Slot::Second,
                &second.position,
                &signers[1],
                &signatures[1],
                &sign_bytes,
            )?;
            verify_confirm_signatures(
                &self.store,
                &self.codec,
                Slot::Second,
                &second.position,
                &second.confirm_sigs,
                &second.position.sign_bytes(),
            )?;
        }

        match mode {
            ExecMode::Check => Ok(Accepted { fee_delta: 0, fees }),
            ExecMode::Deliver => {
                let updated = fees.checked_add(spend.fee).ok_or(AnteError::FeeOverflow {
                    fees,
                    fee: spend.fee,
                })?;
                Ok(Accepted {
                    fee_delta: spend.fee,
                    fees: updated,
                })
            }
        }
    }
}
