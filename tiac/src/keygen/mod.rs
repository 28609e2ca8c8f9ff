//! Threshold key generation by a trusted dealer.
//!
//! Two random polynomials `v`, `w` of degree `t - 1` are sampled. The master secret is
//! `(x, y) = (v(0), w(0))` and authority `m` gets `(xm, ym) = (v(m), w(m))` along with the public
//! `(g2^xm, g2^ym, g1^ym)`. Any `t` authorities can interpolate `x` and `y` (or their images in
//! the groups) while fewer learn nothing about them. The master secret itself is never output.

use ark_ec::AffineRepr;
use ark_std::{cfg_into_iter, rand::RngCore, vec::Vec};
use tiac_crypto_utils::{join, msm::WindowTable};
use tiac_secret_sharing::{common::ShareId, polynomial::share};
use tracing::{debug, instrument};
use zeroize::Zeroize;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::{config::PairingCurve, error::TiacError, setup::PairingGroupParameters};

mod keys;
mod threshold;

pub use keys::*;
pub use threshold::Threshold;

/// Deals master verification key and key shares for `threshold.total()` authorities, any
/// `threshold.threshold()` of which can act together.
#[instrument(skip_all, fields(threshold = threshold.threshold(), total = threshold.total()))]
pub fn keygen<E: PairingCurve, R: RngCore>(
    rng: &mut R,
    params: &PairingGroupParameters<E>,
    threshold: Threshold,
) -> Result<KeyGenOutput<E>, TiacError> {
    let threshold = Threshold::new(threshold.threshold(), threshold.total())?;
    params.validate()?;

    let v = share::<R, E::ScalarField>(rng, threshold.degree());
    let w = share::<R, E::ScalarField>(rng, threshold.degree());

    // Index 0 holds the master secret, index m the share of authority m.
    let total = threshold.total();
    let (mut xs, mut ys): (Vec<_>, Vec<_>) = cfg_into_iter!((0..=total))
        .map(|i| (v.evaluate_at(i), w.evaluate_at(i)))
        .unzip();

    let g2_table = WindowTable::new(2 * xs.len(), params.g2.into_group());
    let g1_table = WindowTable::new(ys.len(), params.g1.into_group());
    let (alpha2, beta2, beta1) = join!(
        g2_table.multiply_many_affine(&xs),
        g2_table.multiply_many_affine(&ys),
        g1_table.multiply_many_affine(&ys)
    );

    let verification_key = |i: usize| VerificationKey {
        alpha2: alpha2[i],
        beta2: beta2[i],
        beta1: beta1[i],
    };
    let authority_shares = (1..=total as usize)
        .map(|m| AuthorityKeyShare {
            index: m as ShareId,
            secret: AuthoritySecretShare { x: xs[m], y: ys[m] },
            verification: verification_key(m),
        })
        .collect();
    let master_verification_key = verification_key(0);

    xs.zeroize();
    ys.zeroize();

    debug!("dealt key shares");
    Ok(KeyGenOutput {
        threshold,
        master_verification_key,
        authority_shares,
    })
}
