//! Trusted setup and threshold key generation for threshold issuance anonymous credentials
//! (TIAC), in the manner of Coconut.
//!
//! - [`setup`] picks the pairing groups for a security level and samples fresh generators
//!   `g1`, `h1` of G1 and `g2` of G2.
//! - [`keygen`] shares the master secret `(x, y)` among `n` authorities with threshold `t` and
//!   derives the master verification key `(g2^x, g2^y, g1^y)` and one verification share per
//!   authority.
//! - [`codec`] fixes the lowercase hex encoding of group and field elements.
//! - [`boundary`] exposes both operations to outside callers with string inputs and outputs and
//!   reports every failure inside the returned outcome.
//!
//! Only BLS12-381 is supported currently. Pairing arithmetic is done by `arkworks`.

pub mod boundary;
pub mod codec;
pub mod config;
pub mod error;
pub mod keygen;
pub mod setup;

pub use boundary::{
    perform_keygen, perform_keygen_with_rng, perform_setup, perform_setup_with_rng,
    AuthorityShareRecord, KeyGenOutcome, KeyGenRequest, MasterVerificationKeyRecord,
    SetupOutcome,
};
pub use config::{recommended_threshold, CurveId, PairingCurve, PairingDescriptor, SecurityLevel};
pub use error::{ErrorKind, InvalidParameters, TiacError};
pub use keygen::{
    keygen, AuthorityKeyShare, AuthoritySecretShare, AuthorityVerificationShare, KeyGenOutput,
    MasterVerificationKey, Threshold, VerificationKey,
};
pub use setup::{setup, PairingGroupParameters, SerializedParameters};
