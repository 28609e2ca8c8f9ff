//! Shamir secret sharing

use ark_ff::PrimeField;
use ark_std::{cfg_into_iter, rand::RngCore, vec::Vec};

use crate::{
    common,
    common::{ShareId, Shares},
    error::SSError,
    polynomial::SecretPolynomial,
};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Generate a random secret with its shares according to Shamir secret sharing.
/// At least `threshold` number of shares are needed to reconstruct the secret.
/// Returns the secret, shares and the polynomial whose evaluations are the secret and the shares
pub fn deal_random_secret<R: RngCore, F: PrimeField>(
    rng: &mut R,
    threshold: ShareId,
    total: ShareId,
) -> Result<(F, Shares<F>, SecretPolynomial<F>), SSError> {
    let secret = F::rand(rng);
    let (shares, poly) = deal_secret(rng, secret, threshold, total)?;
    Ok((secret, shares, poly))
}

/// Same as `deal_random_secret` above but accepts the secret to share
pub fn deal_secret<R: RngCore, F: PrimeField>(
    rng: &mut R,
    secret: F,
    threshold: ShareId,
    total: ShareId,
) -> Result<(Shares<F>, SecretPolynomial<F>), SSError> {
    check_threshold(threshold, total)?;
    let poly = SecretPolynomial::rand_with_secret(rng, secret, threshold as usize - 1);
    let shares = deal_polynomial(&poly, total)?;
    Ok((shares, poly))
}

/// Evaluates an already sampled polynomial at `1..=total`. The threshold of the shares is the
/// number of coefficients of `poly`.
pub fn deal_polynomial<F: PrimeField>(
    poly: &SecretPolynomial<F>,
    total: ShareId,
) -> Result<Shares<F>, SSError> {
    let threshold = ShareId::try_from(poly.threshold())
        .map_err(|_| SSError::InvalidThresholdOrTotal(ShareId::MAX, total))?;
    check_threshold(threshold, total)?;
    let shares = cfg_into_iter!((1..=total))
        .map(|i| (i, threshold, poly.evaluate_at(i)).into())
        .collect::<Vec<_>>();
    Ok(Shares(shares))
}

/// `1 <= threshold <= total`
pub fn check_threshold(threshold: ShareId, total: ShareId) -> Result<(), SSError> {
    if threshold < 1 || threshold > total {
        return Err(SSError::InvalidThresholdOrTotal(threshold, total));
    }
    Ok(())
}

impl<F: PrimeField> Shares<F> {
    /// Reconstruct the secret from the first `threshold` shares. Share ids must be distinct and
    /// non-zero and all shares must carry the same threshold.
    pub fn reconstruct_secret(&self) -> Result<F, SSError> {
        let threshold = self.threshold()?;
        let len = self.0.len() as ShareId;
        if threshold > len {
            return Err(SSError::BelowThreshold(threshold, len));
        }
        let shares = &self.0[0..threshold as usize];
        let share_ids = shares.iter().map(|s| s.id).collect::<Vec<_>>();
        let basis = common::lagrange_basis_at_0_for_all::<F>(share_ids)?;
        Ok(cfg_into_iter!(basis)
            .zip(cfg_into_iter!(shares))
            .map(|(b, s)| b * s.share)
            .sum::<F>())
    }
}
