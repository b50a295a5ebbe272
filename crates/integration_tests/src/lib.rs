//! Shared setup for the end-to-end tests: a fjall-backed UTXO set seeded with
//! funded positions and helpers to build signed spends against it.

use plasma_core::test_helpers::TestKey;
use plasma_core::{
    Address, BaseTx, EncodedSignature, Msg, Position, SpendInput, SpendMsg, SpendOutput, Tx, Utxo,
};
use plasma_store::{StoreError, UtxoStorage};

/// A UTXO in the ledger together with the keys allowed to touch it
pub struct FundedUtxo {
    pub utxo: Utxo,
    pub owner: TestKey,
    pub funders: Vec<TestKey>,
}

impl FundedUtxo {
    pub fn position(&self) -> Position {
        self.utxo.position
    }

    /// Confirmation signatures from every funder, empty where none is needed
    pub fn confirm_sigs(&self) -> [EncodedSignature; 2] {
        let position = self.position();
        let mut sigs = [EncodedSignature::empty(), EncodedSignature::empty()];
        for (slot, funder) in self.funders.iter().take(2).enumerate() {
            sigs[slot] = funder.confirm(&position);
        }
        sigs
    }

    pub fn spend_input(&self) -> SpendInput {
        SpendInput::new(self.position(), self.owner.address, self.confirm_sigs())
    }
}

/// Store a fresh UTXO at `position` owned by a new key and funded by
/// `funder_count` new keys (one or two).
pub fn fund(
    storage: &UtxoStorage,
    position: Position,
    amount: u64,
    funder_count: usize,
) -> Result<FundedUtxo, StoreError> {
    let owner = TestKey::random();
    let funders: Vec<TestKey> = (0..funder_count.clamp(1, 2))
        .map(|_| TestKey::random())
        .collect();

    let mut input_addresses = [Address::ZERO; 2];
    for (slot, funder) in funders.iter().enumerate() {
        input_addresses[slot] = funder.address;
    }

    let utxo = Utxo::new(position, owner.address, input_addresses, amount);
    storage.store_utxo(&utxo)?;

    Ok(FundedUtxo {
        utxo,
        owner,
        funders,
    })
}

/// Spend all of `inputs` to a single recipient, signed by each owner in order
pub fn spend(inputs: &[&FundedUtxo], recipient: Address, fee: u64) -> Tx {
    let total: u64 = inputs.iter().map(|input| input.utxo.amount).sum();
    let outputs = [
        SpendOutput {
            owner: recipient,
            amount: total.saturating_sub(fee),
        },
        SpendOutput::default(),
    ];

    let mut msg = SpendMsg::single(inputs[0].spend_input(), outputs, fee);
    if let Some(second) = inputs.get(1) {
        msg.inputs[1] = second.spend_input();
    }

    let sign_bytes = msg.sign_bytes();
    let signatures = inputs
        .iter()
        .map(|input| input.owner.sign(&sign_bytes))
        .collect();

    Tx::Base(BaseTx {
        msg: Msg::Spend(msg),
        signatures,
    })
}
