use ark_bls12_381::Bls12_381;
use ark_std::rand::{rngs::StdRng, SeedableRng};
use benches::{bench_committees, bls12_381_params, committee_thresholds};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tiac::{
    keygen, perform_keygen_with_rng, KeyGenOutput, KeyGenRequest, SerializedParameters,
    VerificationKey,
};

fn keygen_benchmark(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0u64);
    let params = bls12_381_params(&mut rng);
    let thresholds = committee_thresholds();

    bench_committees!(c, "threshold keygen", thresholds, |b, threshold| {
        b.iter(|| keygen(&mut rng, black_box(&params), *threshold).unwrap())
    });

    let serialized = SerializedParameters::from(&params);
    bench_committees!(c, "threshold keygen boundary", thresholds, |b, threshold| {
        let request = KeyGenRequest::new(
            serialized.clone(),
            threshold.threshold() as i32,
            threshold.total() as i32,
        );
        b.iter(|| perform_keygen_with_rng(&mut rng, black_box(&request)))
    });

    let outputs = thresholds
        .iter()
        .map(|t| keygen(&mut rng, &params, *t).unwrap())
        .collect::<Vec<KeyGenOutput<Bls12_381>>>();

    bench_committees!(c, "aggregate verification shares", thresholds, |b, threshold| {
        let output = outputs
            .iter()
            .find(|o| o.threshold == *threshold)
            .unwrap();
        b.iter(|| {
            VerificationKey::aggregate(
                threshold.threshold(),
                black_box(output.verification_shares()),
            )
            .unwrap()
        })
    });

    bench_committees!(c, "reconstruct master secret", thresholds, |b, threshold| {
        let output = outputs
            .iter()
            .find(|o| o.threshold == *threshold)
            .unwrap();
        let (x_shares, _) = output.secret_shares();
        b.iter(|| black_box(&x_shares).reconstruct_secret().unwrap())
    });
}

criterion_group!(benches, keygen_benchmark);
criterion_main!(benches);
