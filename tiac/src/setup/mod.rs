//! Generation of the public parameters: the pairing group triple for a security level and fresh
//! generators `g1`, `h1` of G1 and `g2` of G2.
//!
//! `g1` and `h1` are sampled as independent uniformly random points, neither is derived from the
//! other, so nobody knows their discrete log relation.

use ark_ec::{pairing::Pairing, AffineRepr, CurveGroup};
use ark_std::{rand::RngCore, UniformRand};
use tracing::{debug, instrument, warn};

use crate::{
    config::{PairingCurve, SecurityLevel},
    error::TiacError,
};

mod params;

pub use params::*;

/// Number of times generators are sampled before giving up.
pub const MAX_SAMPLING_ATTEMPTS: usize = 16;

/// Creates fresh parameters for `security_level` on the pairing `E`.
pub fn setup<E: PairingCurve, R: RngCore>(
    rng: &mut R,
    security_level: i32,
) -> Result<PairingGroupParameters<E>, TiacError> {
    setup_with_attempts(rng, security_level, MAX_SAMPLING_ATTEMPTS)
}

/// Same as [`setup`] with a custom bound on the sampling attempts.
#[instrument(skip_all, fields(security_level = security_level, curve = E::CURVE.name()))]
pub fn setup_with_attempts<E: PairingCurve, R: RngCore>(
    rng: &mut R,
    security_level: i32,
    attempts: usize,
) -> Result<PairingGroupParameters<E>, TiacError> {
    let level = SecurityLevel::new(security_level)?;
    if level.curve() != E::CURVE {
        return Err(TiacError::UnsupportedSecurityLevel(security_level as i64));
    }

    for attempt in 1..=attempts {
        let (g1, h1, g2) = sample_generators::<E, R>(rng);
        if g1.is_zero() || h1.is_zero() || g2.is_zero() || g1 == h1 {
            warn!(attempt, "discarding degenerate generators");
            continue;
        }
        debug!(attempt, "sampled generators");
        return Ok(PairingGroupParameters {
            descriptor: E::descriptor(),
            g1,
            h1,
            g2,
        });
    }
    Err(TiacError::ParameterGenerationFailure(
        "no suitable generators found",
    ))
}

fn sample_generators<E: Pairing, R: RngCore>(
    rng: &mut R,
) -> (E::G1Affine, E::G1Affine, E::G2Affine) {
    let g1 = E::G1::rand(rng);
    let h1 = E::G1::rand(rng);
    let g2 = E::G2::rand(rng);
    let g1s = E::G1::normalize_batch(&[g1, h1]);
    (g1s[0], g1s[1], g2.into_affine())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::CurveId, error::ErrorKind};
    use ark_bls12_381::Bls12_381;
    use ark_std::rand::{rngs::StdRng, SeedableRng};

    type E = Bls12_381;

    #[test]
    fn fresh_generators() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let p1 = setup::<E, _>(&mut rng, 256).unwrap();
        let p2 = setup::<E, _>(&mut rng, 128).unwrap();

        for p in [&p1, &p2] {
            assert_eq!(p.validate(), Ok(()));
            assert_eq!(p.descriptor, CurveId::Bls12_381.descriptor());
            assert!(p.g1.is_on_curve() && p.g1.is_in_correct_subgroup_assuming_on_curve());
            assert!(p.h1.is_on_curve() && p.h1.is_in_correct_subgroup_assuming_on_curve());
            assert!(p.g2.is_on_curve() && p.g2.is_in_correct_subgroup_assuming_on_curve());
        }
        assert_ne!(p1.g1, p2.g1);
        assert_ne!(p1.h1, p2.h1);
        assert_ne!(p1.g2, p2.g2);
        assert_eq!(p1.prime_order_hex(), p2.prime_order_hex());
    }

    #[test]
    fn unsupported_levels() {
        let mut rng = StdRng::seed_from_u64(0u64);
        for level in [0, -5, 257, 4096] {
            let err = setup::<E, _>(&mut rng, level).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::UnsupportedSecurityLevel);
        }
    }

    #[test]
    fn exhausted_attempts() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let err = setup_with_attempts::<E, _>(&mut rng, 128, 0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ParameterGenerationFailure);
        assert!(setup_with_attempts::<E, _>(&mut rng, 128, 1).is_ok());
    }
}
