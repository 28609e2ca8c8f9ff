use ark_bls12_381::Bls12_381;
use ark_std::rand::RngCore;
use tiac::{setup, PairingGroupParameters, Threshold};

/// `(threshold, total)` pairs benchmarked. Hardcoded, ideally these would come from the command
/// line.
pub const COMMITTEES: [(u16, u16); 6] = [(2, 3), (3, 5), (4, 7), (6, 10), (11, 20), (26, 50)];

pub fn committee_thresholds() -> Vec<Threshold> {
    COMMITTEES
        .iter()
        .map(|(t, n)| Threshold::new(*t, *n).unwrap())
        .collect()
}

pub fn bls12_381_params<R: RngCore>(rng: &mut R) -> PairingGroupParameters<Bls12_381> {
    setup::<Bls12_381, _>(rng, 128).unwrap()
}

#[macro_export]
macro_rules! bench_committees {
    ($c: ident, $group_name: expr, $thresholds: ident, |$b: ident, $threshold: ident| $body: block) => {
        let mut group = $c.benchmark_group($group_name);
        for $threshold in $thresholds.iter() {
            group.bench_with_input(
                BenchmarkId::from_parameter(format!(
                    "{}-of-{}",
                    $threshold.threshold(),
                    $threshold.total()
                )),
                $threshold,
                |$b, $threshold| $body,
            );
        }
        group.finish();
    };
}
