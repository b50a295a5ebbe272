use criterion::{black_box, criterion_group, criterion_main, Criterion};
use plasma_ante::{AnteHandler, ExecMode};
use plasma_core::test_helpers::{filler_address, TestKey};
use plasma_core::{
    keccak256, recover_address, Address, BaseTx, EncodedSignature, Msg, Position, SpendInput,
    SpendMsg, SpendOutput, Tx, Utxo,
};
use plasma_store::MemoryUtxoStore;

fn single_input_spend() -> (MemoryUtxoStore, Tx) {
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
        .unwrap();

    let msg = SpendMsg::single(
        SpendInput::new(
            position,
            owner.address,
            [funder.confirm(&position), EncodedSignature::empty()],
        ),
        [
            SpendOutput {
                owner: filler_address(1),
                amount: 990,
            },
            SpendOutput::default(),
        ],
        10,
    );
    let signature = owner.sign(&msg.sign_bytes());
    let tx = Tx::Base(BaseTx {
        msg: Msg::Spend(msg),
        signatures: vec![signature],
    });

    (store, tx)
}

fn bench_recover_address(c: &mut Criterion) {
    c.bench_function("recover_address", |b| {
        let key = TestKey::random();
        let hash = keccak256(b"benchmark message for recovery");
        let signature = key.sign_hash(&hash);

        b.iter(|| {
            let address = recover_address(black_box(&hash), black_box(&signature));
            black_box(address);
        });
    });
}

fn bench_authorize(c: &mut Criterion) {
    let (store, tx) = single_input_spend();
    let handler = AnteHandler::new(store);

    c.bench_function("authorize_single_input_deliver", |b| {
        b.iter(|| {
            let result = handler.authorize(black_box(&tx), ExecMode::Deliver, black_box(0));
            black_box(result);
        });
    });

    c.bench_function("authorize_single_input_check", |b| {
        b.iter(|| {
            let result = handler.authorize(black_box(&tx), ExecMode::Check, black_box(0));
            black_box(result);
        });
    });
}

criterion_group!(benches, bench_recover_address, bench_authorize);
criterion_main!(benches);
