use criterion::{black_box, criterion_group, criterion_main, Criterion};
use keypad_gate::module::Module;
use keypad_gate::payloads::{STAGE_FIVE_OBSCURED, STAGE_TWO_MODULE, XOR_ORACLE_MODULE};
use keypad_gate::stages::default_chain;
use keypad_gate::{decode_with_oracle, xor_decode, Gate, GateConfig, Instance, StdHost, STATIC_XOR_KEY};
use std::time::Duration;

fn bench_module_decode(c: &mut Criterion) {
    c.bench_function("module_decode", |b| {
        b.iter(|| {
            let _ = Module::decode(black_box(STAGE_TWO_MODULE));
        });
    });
}

fn bench_xor_decode(c: &mut Criterion) {
    c.bench_function("xor_decode", |b| {
        b.iter(|| {
            let _ = xor_decode(black_box(STAGE_FIVE_OBSCURED), black_box(STATIC_XOR_KEY));
        });
    });
}

fn bench_oracle_decode(c: &mut Criterion) {
    let oracle = Instance::instantiate(XOR_ORACLE_MODULE).expect("oracle module decodes");

    c.bench_function("oracle_decode", |b| {
        b.iter(|| {
            let _ = decode_with_oracle(black_box(STAGE_FIVE_OBSCURED), &oracle, "lolwat");
        });
    });
}

fn bench_validators(c: &mut Criterion) {
    let host = StdHost::new(Duration::ZERO);
    let chain = default_chain();

    for stage in &chain {
        c.bench_function(&format!("validate_{}", stage.id), |b| {
            b.iter(|| {
                let _ = stage.validator.evaluate(&host, black_box(4));
            });
        });
    }
}

fn bench_reset_press(c: &mut Criterion) {
    let mut gate = Gate::new(StdHost::new(Duration::ZERO), &GateConfig::default());
    gate.boot();

    c.bench_function("wrong_press_on_stage_one", |b| {
        b.iter(|| gate.handle(black_box(5)));
    });
}

criterion_group!(
    benches,
    bench_module_decode,
    bench_xor_decode,
    bench_oracle_decode,
    bench_validators,
    bench_reset_press
);
criterion_main!(benches);
