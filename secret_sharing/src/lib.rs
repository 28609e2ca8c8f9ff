#![cfg_attr(not(feature = "std"), no_std)]

//! # Polynomial secret sharing
//!
//! Secrets are the constant terms of random polynomials over a prime field. Participant `i`
//! holds the evaluation at `i`, so any `threshold` participants recover the secret by
//! Lagrange interpolation at 0 while fewer learn nothing about it.
//!
//! 1. [Random polynomials and their evaluation](./src/polynomial.rs)
//! 1. [Shamir secret sharing (Requires a trusted dealer)](./src/shamir_ss.rs)

extern crate alloc;

pub mod common;
pub mod error;
pub mod polynomial;
pub mod shamir_ss;
