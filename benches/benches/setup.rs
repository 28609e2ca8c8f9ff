use ark_bls12_381::Bls12_381;
use ark_std::rand::{rngs::StdRng, SeedableRng};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tiac::{perform_setup_with_rng, setup};

fn setup_benchmark(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0u64);

    c.bench_function("setup BLS12-381", |b| {
        b.iter(|| setup::<Bls12_381, _>(&mut rng, black_box(128)).unwrap())
    });

    c.bench_function("setup boundary with hex encoding", |b| {
        b.iter(|| perform_setup_with_rng(&mut rng, black_box(256)))
    });
}

criterion_group!(benches, setup_benchmark);
criterion_main!(benches);
