use ark_ff::PrimeField;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::{cfg_into_iter, cfg_iter, vec::Vec};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use tiac_crypto_utils::serde_utils::HexScalar;
use zeroize::Zeroize;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::SSError;

/// Index of a share, i.e. the point at which the polynomial was evaluated. Never 0 as that
/// evaluation is the secret.
pub type ShareId = u16;

/// Share used in Shamir secret sharing
#[serde_as]
#[derive(
    Clone,
    Debug,
    PartialEq,
    Eq,
    Zeroize,
    CanonicalSerialize,
    CanonicalDeserialize,
    Serialize,
    Deserialize,
)]
#[serde(bound = "")]
pub struct Share<F: PrimeField> {
    pub id: ShareId,
    pub threshold: ShareId,
    #[serde_as(as = "HexScalar")]
    pub share: F,
}

/// Collection of `Share`s. A sufficient number of `Share`s reconstruct the secret.
/// Expects each share to have a different `ShareId` and all to have the same threshold.
#[derive(
    Clone,
    Debug,
    PartialEq,
    Eq,
    Zeroize,
    CanonicalSerialize,
    CanonicalDeserialize,
    Serialize,
    Deserialize,
)]
#[serde(bound = "")]
pub struct Shares<F: PrimeField>(pub Vec<Share<F>>);

impl<F: PrimeField> Drop for Share<F> {
    fn drop(&mut self) {
        self.share.zeroize();
    }
}

impl<F: PrimeField> From<(ShareId, ShareId, F)> for Share<F> {
    fn from((i, t, s): (ShareId, ShareId, F)) -> Self {
        Share {
            id: i,
            threshold: t,
            share: s,
        }
    }
}

impl<F: PrimeField> Shares<F> {
    /// Threshold of the first share, all others are expected to agree.
    pub fn threshold(&self) -> Result<ShareId, SSError> {
        let first = self.0.first().ok_or(SSError::NoShares)?;
        if let Some(other) = self.0.iter().find(|s| s.threshold != first.threshold) {
            return Err(SSError::UnequalThresholdInShares(
                first.threshold,
                other.threshold,
            ));
        }
        Ok(first.threshold)
    }

    pub fn ids(&self) -> Vec<ShareId> {
        self.0.iter().map(|s| s.id).collect()
    }
}

/// Checks that `x_coords` are usable as interpolation points, i.e. none is 0 and all are distinct.
pub fn check_share_ids(x_coords: &[ShareId]) -> Result<(), SSError> {
    let mut sorted = x_coords.to_vec();
    sorted.sort_unstable();
    if sorted.first() == Some(&0) {
        return Err(SSError::InvalidShareId(0));
    }
    if let Some(w) = sorted.windows(2).find(|w| w[0] == w[1]) {
        return Err(SSError::DuplicateShareId(w[0]));
    }
    Ok(())
}

/// Return the Lagrange basis polynomial at x = 0 given the `x` coordinates
/// `(x_coords[0]) * (x_coords[1]) * ... / ((x_coords[0] - i) * (x_coords[1] - i) * ...)`
pub fn lagrange_basis_at_0<F: PrimeField>(x_coords: &[ShareId], i: ShareId) -> Result<F, SSError> {
    check_share_ids(x_coords)?;
    if i == 0 {
        return Err(SSError::InvalidShareId(0));
    }
    let mut numerator = F::one();
    let mut denominator = F::one();
    let i_f = F::from(i as u64);
    for x in x_coords {
        if *x == i {
            continue;
        }
        let x = F::from(*x as u64);
        numerator *= x;
        denominator *= x - i_f;
    }
    // Ids are distinct, so no factor of the denominator is zero.
    denominator.inverse_in_place();
    Ok(numerator * denominator)
}

/// Return the Lagrange basis polynomial at x = 0 for each of the given `x` coordinates. Faster than
/// doing multiple calls to `lagrange_basis_at_0`
pub fn lagrange_basis_at_0_for_all<F: PrimeField>(
    x_coords: Vec<ShareId>,
) -> Result<Vec<F>, SSError> {
    check_share_ids(&x_coords)?;

    let x = cfg_into_iter!(x_coords.as_slice())
        .map(|x| F::from(*x as u64))
        .collect::<Vec<_>>();

    // Product of all `x`, i.e. \prod_{i}(x_i}
    let product = cfg_iter!(x).product::<F>();

    Ok(cfg_into_iter!(x.clone())
        .map(move |i| {
            let mut denominator = cfg_iter!(x)
                .filter(|&j| &i != j)
                .map(|&j| j - i)
                .product::<F>();
            denominator.inverse_in_place();

            // The numerator is of the form `x_1*x_2*...x_{i-1}*x_{i+1}*x_{i+2}*..` which is a product of all
            // `x` except `x_i` and thus can be calculated as \prod_{i}(x_i} * (1 / x_i)
            let numerator = product * i.inverse().unwrap_or_default();

            denominator * numerator
        })
        .collect::<Vec<_>>())
}
