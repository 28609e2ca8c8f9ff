//! Random polynomials over a prime field whose constant term is a secret.

use ark_ff::PrimeField;
use ark_std::{rand::RngCore, vec::Vec};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::common::ShareId;

/// Polynomial `c_0 + c_1*X + ... + c_d*X^d` with `c_0` being the shared secret. Coefficients are
/// wiped when dropped.
#[derive(Clone, Debug, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecretPolynomial<F: PrimeField> {
    coefficients: Vec<F>,
}

/// Samples `degree + 1` independent uniformly random coefficients. Coefficient 0 is the secret.
pub fn share<R: RngCore, F: PrimeField>(rng: &mut R, degree: usize) -> SecretPolynomial<F> {
    SecretPolynomial::rand(rng, degree)
}

/// Evaluates the polynomial with given coefficients (lowest degree first) at `point` using
/// Horner's method.
pub fn evaluate<F: PrimeField>(coefficients: &[F], point: &F) -> F {
    coefficients
        .iter()
        .rev()
        .fold(F::zero(), |acc, c| acc * point + c)
}

impl<F: PrimeField> SecretPolynomial<F> {
    /// Random polynomial of the given degree
    pub fn rand<R: RngCore>(rng: &mut R, degree: usize) -> Self {
        Self {
            coefficients: (0..=degree).map(|_| F::rand(rng)).collect(),
        }
    }

    /// Random polynomial of the given degree with `secret` as its constant term
    pub fn rand_with_secret<R: RngCore>(rng: &mut R, secret: F, degree: usize) -> Self {
        let mut poly = Self::rand(rng, degree);
        poly.coefficients[0] = secret;
        poly
    }

    /// Returns `None` for an empty coefficient list since such polynomial has no secret.
    pub fn from_coefficients(coefficients: Vec<F>) -> Option<Self> {
        (!coefficients.is_empty()).then_some(Self { coefficients })
    }

    /// Degree as sampled, the leading coefficient may be zero.
    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    /// Number of evaluations needed to recover the polynomial.
    pub fn threshold(&self) -> usize {
        self.coefficients.len()
    }

    pub fn coefficients(&self) -> &[F] {
        &self.coefficients
    }

    /// The evaluation at 0.
    pub fn secret(&self) -> F {
        self.coefficients[0]
    }

    pub fn evaluate(&self, point: &F) -> F {
        evaluate(&self.coefficients, point)
    }

    /// Evaluation at the point identified by `id`, i.e. the share of participant `id`.
    pub fn evaluate_at(&self, id: ShareId) -> F {
        self.evaluate(&F::from(id as u64))
    }
}
