use ark_ec::{pairing::Pairing, AffineRepr, CurveGroup, VariableBaseMSM};
use ark_ff::{PrimeField, Zero};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::vec::Vec;
use itertools::multiunzip;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use tiac_crypto_utils::{
    join,
    serde_utils::{HexCanonical, HexScalar},
};
use tiac_secret_sharing::{
    common::{lagrange_basis_at_0_for_all, Share, ShareId, Shares},
    error::SSError,
};
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::Threshold;
use crate::{error::TiacError, setup::PairingGroupParameters};

/// Public key `(alpha2, beta2, beta1) = (g2^x, g2^y, g1^y)` for secrets `x`, `y`. Used both for
/// the master key and for the share of each authority.
#[serde_as]
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    CanonicalSerialize,
    CanonicalDeserialize,
    Serialize,
    Deserialize,
)]
#[serde(bound = "")]
pub struct VerificationKey<E: Pairing> {
    #[serde_as(as = "HexCanonical")]
    pub alpha2: E::G2Affine,
    #[serde_as(as = "HexCanonical")]
    pub beta2: E::G2Affine,
    #[serde_as(as = "HexCanonical")]
    pub beta1: E::G1Affine,
}

/// Verification key of the authorities as a whole, `(g2^x, g2^y, g1^y)`.
pub type MasterVerificationKey<E> = VerificationKey<E>;

/// Verification key of a single authority, `(g2^xm, g2^ym, g1^ym)`.
pub type AuthorityVerificationShare<E> = VerificationKey<E>;

/// Evaluations `(xm, ym) = (v(m), w(m))` of the secret polynomials at an authority's index.
#[serde_as]
#[derive(
    Clone,
    Debug,
    PartialEq,
    Eq,
    Zeroize,
    ZeroizeOnDrop,
    CanonicalSerialize,
    CanonicalDeserialize,
    Serialize,
    Deserialize,
)]
#[serde(bound = "")]
pub struct AuthoritySecretShare<F: PrimeField> {
    #[serde_as(as = "HexScalar")]
    pub x: F,
    #[serde_as(as = "HexScalar")]
    pub y: F,
}

/// Key material dealt to the authority with index `index`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct AuthorityKeyShare<E: Pairing> {
    pub index: ShareId,
    pub secret: AuthoritySecretShare<E::ScalarField>,
    pub verification: AuthorityVerificationShare<E>,
}

/// Everything produced by one key generation. Shares are ordered by index, starting at 1.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct KeyGenOutput<E: Pairing> {
    pub threshold: Threshold,
    pub master_verification_key: MasterVerificationKey<E>,
    pub authority_shares: Vec<AuthorityKeyShare<E>>,
}

impl<E: Pairing> VerificationKey<E> {
    /// Derives the key of secrets `x` and `y`.
    pub fn new(x: &E::ScalarField, y: &E::ScalarField, params: &PairingGroupParameters<E>) -> Self {
        let (alpha2, beta2, beta1) = join!(
            (params.g2 * x).into_affine(),
            (params.g2 * y).into_affine(),
            (params.g1 * y).into_affine()
        );
        Self {
            alpha2,
            beta2,
            beta1,
        }
    }

    /// `true` when no element is the identity and `beta1`, `beta2` carry the same exponent, i.e.
    /// `e(g1, beta2) == e(beta1, g2)`.
    pub fn is_well_formed(&self, params: &PairingGroupParameters<E>) -> bool {
        if self.alpha2.is_zero() || self.beta2.is_zero() || self.beta1.is_zero() {
            return false;
        }
        E::multi_pairing(
            [
                E::G1Prepared::from(params.g1),
                E::G1Prepared::from(-self.beta1.into_group()),
            ],
            [
                E::G2Prepared::from(self.beta2),
                E::G2Prepared::from(params.g2),
            ],
        )
        .is_zero()
    }

    /// Combines the verification keys of at least `threshold` authorities into the master
    /// verification key by Lagrange interpolation in the exponent. Only the first `threshold`
    /// keys are used. Indices must be distinct and non-zero.
    pub fn aggregate<'a, I>(threshold: ShareId, shares: I) -> Result<Self, TiacError>
    where
        I: IntoIterator<Item = (ShareId, &'a AuthorityVerificationShare<E>)>,
    {
        let (ids, alpha2, beta2, beta1): (Vec<ShareId>, Vec<_>, Vec<_>, Vec<_>) = multiunzip(
            shares
                .into_iter()
                .take(threshold as usize)
                .map(|(id, vk)| (id, vk.alpha2, vk.beta2, vk.beta1)),
        );
        if ids.is_empty() {
            return Err(SSError::NoShares.into());
        }
        if ids.len() < threshold as usize {
            return Err(SSError::BelowThreshold(threshold, ids.len() as ShareId).into());
        }
        let l = lagrange_basis_at_0_for_all::<E::ScalarField>(ids)?;
        let (alpha2, beta2, beta1) = join!(
            E::G2::msm_unchecked(&alpha2, &l).into_affine(),
            E::G2::msm_unchecked(&beta2, &l).into_affine(),
            E::G1::msm_unchecked(&beta1, &l).into_affine()
        );
        Ok(Self {
            alpha2,
            beta2,
            beta1,
        })
    }
}

impl<F: PrimeField> AuthoritySecretShare<F> {
    /// The two values as Shamir shares of `x` and `y` for the authority `index`.
    pub fn to_shares(&self, index: ShareId, threshold: ShareId) -> (Share<F>, Share<F>) {
        (
            (index, threshold, self.x).into(),
            (index, threshold, self.y).into(),
        )
    }
}

impl<E: Pairing> AuthorityKeyShare<E> {
    /// `true` when the verification share is `(g2^xm, g2^ym, g1^ym)` for the secret share.
    pub fn is_consistent(&self, params: &PairingGroupParameters<E>) -> bool {
        VerificationKey::new(&self.secret.x, &self.secret.y, params) == self.verification
    }
}

impl<E: Pairing> KeyGenOutput<E> {
    /// Shamir shares of `x` and of `y` held by the authorities, in index order.
    pub fn secret_shares(&self) -> (Shares<E::ScalarField>, Shares<E::ScalarField>) {
        let (x, y): (Vec<_>, Vec<_>) = self
            .authority_shares
            .iter()
            .map(|s| s.secret.to_shares(s.index, self.threshold.threshold()))
            .unzip();
        (Shares(x), Shares(y))
    }

    /// Verification shares paired with the index of their authority.
    pub fn verification_shares(
        &self,
    ) -> impl Iterator<Item = (ShareId, &AuthorityVerificationShare<E>)> + '_ {
        self.authority_shares
            .iter()
            .map(|s| (s.index, &s.verification))
    }

    /// Checks every share against the parameters and that aggregating the first `threshold`
    /// verification shares yields the master key.
    pub fn is_consistent(&self, params: &PairingGroupParameters<E>) -> bool {
        self.authority_shares.len() == self.threshold.total() as usize
            && self
                .authority_shares
                .iter()
                .map(|s| s.index)
                .eq(1..=self.threshold.total())
            && self.authority_shares.iter().all(|s| s.is_consistent(params))
            && self.master_verification_key.is_well_formed(params)
            && VerificationKey::aggregate(self.threshold.threshold(), self.verification_shares())
                .map_or(false, |vk| vk == self.master_verification_key)
    }
}
