use plasma_core::test_helpers::{filler_address, TestKey};
use plasma_core::{
    Address, BaseTx, EncodedSignature, Msg, Position, SpendInput, SpendMsg, SpendOutput, Tx, Utxo,
};
use plasma_store::MemoryUtxoStore;

/// One UTXO owned by `owner`, created by a transaction whose only input
/// belonged to `funder`, and a spend of it
pub struct SingleInputFixture {
    pub store: MemoryUtxoStore,
    pub owner: TestKey,
    pub funder: TestKey,
    pub position: Position,
    pub msg: SpendMsg,
}

impl SingleInputFixture {
    pub fn signed_tx(&self) -> Tx {
        spend_tx(&self.msg, &[&self.owner])
    }
}

/// Two UTXOs spent together. The first has one funder (`funders[0]`), the
/// second has two (`funders[1]`, `funders[2]`).
pub struct TwoInputFixture {
    pub store: MemoryUtxoStore,
    pub owners: [TestKey; 2],
    pub funders: [TestKey; 3],
    pub msg: SpendMsg,
}

impl TwoInputFixture {
    pub fn signed_tx(&self) -> Tx {
        spend_tx(&self.msg, &[&self.owners[0], &self.owners[1]])
    }
}

pub fn single_input_fixture(fee: u64) -> SingleInputFixture {
    let owner = TestKey::random();
    let funder = TestKey::random();
    let position = Position::new(100, 0, 0, 0);

    let store = MemoryUtxoStore::new();
    store
        .insert(Utxo::new(
            position,
            owner.address,
            [funder.address, Address::ZERO],
            1_000,
        ))
        .expect("insert UTXO");

    let input = SpendInput::new(
        position,
        owner.address,
        [funder.confirm(&position), EncodedSignature::empty()],
    );
    let outputs = [
        SpendOutput {
            owner: filler_address(0xaa),
            amount: 1_000 - fee,
        },
        SpendOutput::default(),
    ];

    SingleInputFixture {
        store,
        owner,
        funder,
        position,
        msg: SpendMsg::single(input, outputs, fee),
    }
}

pub fn two_input_fixture(fee: u64) -> TwoInputFixture {
    let owners = [TestKey::random(), TestKey::random()];
    let funders = [TestKey::random(), TestKey::random(), TestKey::random()];
    let first = Position::new(300, 1, 0, 0);
    let second = Position::new(301, 4, 1, 0);

    let store = MemoryUtxoStore::new();
    store
        .insert(Utxo::new(
            first,
            owners[0].address,
            [funders[0].address, Address::ZERO],
            600,
        ))
        .expect("insert UTXO");
    store
        .insert(Utxo::new(
            second,
            owners[1].address,
            [funders[1].address, funders[2].address],
            400,
        ))
        .expect("insert UTXO");

    let msg = SpendMsg {
        inputs: [
            SpendInput::new(
                first,
                owners[0].address,
                [funders[0].confirm(&first), EncodedSignature::empty()],
            ),
            SpendInput::new(
                second,
                owners[1].address,
                [funders[1].confirm(&second), funders[2].confirm(&second)],
            ),
        ],
        outputs: [
            SpendOutput {
                owner: filler_address(0xbb),
                amount: 1_000 - fee,
            },
            SpendOutput::default(),
        ],
        fee,
    };

    TwoInputFixture {
        store,
        owners,
        funders,
        msg,
    }
}

/// Wrap a spend in a transaction signed by `signers`, in order
pub fn spend_tx(msg: &SpendMsg, signers: &[&TestKey]) -> Tx {
    let sign_bytes = msg.sign_bytes();
    Tx::Base(BaseTx {
        msg: Msg::Spend(msg.clone()),
        signatures: signers.iter().map(|key| key.sign(&sign_bytes)).collect(),
    })
}
