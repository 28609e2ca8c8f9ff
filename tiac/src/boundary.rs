//! Entry points for callers outside the crate. Inputs and outputs are plain strings and integers,
//! every failure is reported inside the returned outcome and nothing panics or unwinds out of
//! these functions.

use std::panic::{catch_unwind, AssertUnwindSafe};

use ark_bls12_381::Bls12_381;
use ark_std::rand::{rngs::StdRng, RngCore, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use zeroize::Zeroize;

use crate::{
    codec::{self, Element},
    config::{CurveId, PairingCurve, PairingDescriptor, SecurityLevel},
    error::{ErrorKind, TiacError},
    keygen::{keygen, KeyGenOutput, Threshold},
    setup::{setup, PairingGroupParameters, SerializedParameters},
};

/// Result of [`perform_setup`]. On failure only `success`, `error_kind` and `error_message` are
/// set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupOutcome {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_level: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pairing_descriptor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prime_order: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub g1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub g2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// Input of [`perform_keygen`], the output of a successful setup plus the threshold and the
/// number of authorities.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyGenRequest {
    #[serde(flatten)]
    pub params: SerializedParameters,
    pub threshold: i32,
    pub num_authorities: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasterVerificationKeyRecord {
    pub alpha2: String,
    pub beta2: String,
    pub beta1: String,
}

/// Key material of one authority. The secret share strings are wiped when dropped.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorityShareRecord {
    pub index: u32,
    pub xm: String,
    pub ym: String,
    pub vkm1: String,
    pub vkm2: String,
    pub vkm3: String,
}

/// Result of [`perform_keygen`]. On failure only `success`, `error_kind` and `error_message`
/// are set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyGenOutcome {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_authorities: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub master_verification_key: Option<MasterVerificationKeyRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authority_shares: Option<Vec<AuthorityShareRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl Drop for AuthorityShareRecord {
    fn drop(&mut self) {
        self.xm.zeroize();
        self.ym.zeroize();
    }
}

impl SetupOutcome {
    pub fn from_params<E: PairingCurve>(
        security_level: i32,
        params: &PairingGroupParameters<E>,
    ) -> Self {
        let SerializedParameters {
            pairing_descriptor,
            prime_order,
            g1,
            g2,
            h1,
        } = SerializedParameters::from_params(params);
        Self {
            success: true,
            security_level: Some(security_level),
            pairing_descriptor: Some(pairing_descriptor),
            prime_order: Some(prime_order),
            g1: Some(g1),
            g2: Some(g2),
            h1: Some(h1),
            error_kind: None,
            error_message: None,
        }
    }

    pub fn failure(err: &TiacError) -> Self {
        Self {
            error_kind: Some(err.kind()),
            error_message: Some(err.to_string()),
            ..Self::default()
        }
    }

    /// The generated parameters, `None` unless every field is present.
    pub fn parameters(&self) -> Option<SerializedParameters> {
        Some(SerializedParameters {
            pairing_descriptor: self.pairing_descriptor.clone()?,
            prime_order: self.prime_order.clone()?,
            g1: self.g1.clone()?,
            g2: self.g2.clone()?,
            h1: self.h1.clone()?,
        })
    }
}

impl KeyGenRequest {
    pub fn new(params: SerializedParameters, threshold: i32, num_authorities: i32) -> Self {
        Self {
            params,
            threshold,
            num_authorities,
        }
    }

    /// Request built from a successful setup, `None` if the setup failed.
    pub fn from_setup(outcome: &SetupOutcome, threshold: i32, num_authorities: i32) -> Option<Self> {
        outcome
            .success
            .then(|| outcome.parameters())
            .flatten()
            .map(|params| Self::new(params, threshold, num_authorities))
    }
}

impl KeyGenOutcome {
    pub fn from_output<E: PairingCurve>(output: &KeyGenOutput<E>) -> Self {
        let mvk = &output.master_verification_key;
        let master_verification_key = MasterVerificationKeyRecord {
            alpha2: codec::encode::<E>(&Element::G2(mvk.alpha2)),
            beta2: codec::encode::<E>(&Element::G2(mvk.beta2)),
            beta1: codec::encode::<E>(&Element::G1(mvk.beta1)),
        };
        let authority_shares = output
            .authority_shares
            .iter()
            .map(|share| AuthorityShareRecord {
                index: share.index as u32,
                xm: codec::encode::<E>(&Element::Scalar(share.secret.x)),
                ym: codec::encode::<E>(&Element::Scalar(share.secret.y)),
                vkm1: codec::encode::<E>(&Element::G2(share.verification.alpha2)),
                vkm2: codec::encode::<E>(&Element::G2(share.verification.beta2)),
                vkm3: codec::encode::<E>(&Element::G1(share.verification.beta1)),
            })
            .collect();
        Self {
            success: true,
            threshold: Some(output.threshold.threshold() as i32),
            num_authorities: Some(output.threshold.total() as i32),
            master_verification_key: Some(master_verification_key),
            authority_shares: Some(authority_shares),
            error_kind: None,
            error_message: None,
        }
    }

    pub fn failure(err: &TiacError) -> Self {
        Self {
            error_kind: Some(err.kind()),
            error_message: Some(err.to_string()),
            ..Self::default()
        }
    }
}

/// Generates fresh public parameters for `security_level` using the operating system's
/// randomness.
pub fn perform_setup(security_level: i32) -> SetupOutcome {
    perform_setup_with_rng(&mut StdRng::from_entropy(), security_level)
}

/// Deals keys for the request using the operating system's randomness.
pub fn perform_keygen(request: &KeyGenRequest) -> KeyGenOutcome {
    perform_keygen_with_rng(&mut StdRng::from_entropy(), request)
}

#[instrument(level = "info", skip(rng))]
pub fn perform_setup_with_rng<R: RngCore>(rng: &mut R, security_level: i32) -> SetupOutcome {
    let outcome = guarded(|| match SecurityLevel::new(security_level)?.curve() {
        CurveId::Bls12_381 => setup::<Bls12_381, _>(rng, security_level)
            .map(|params| SetupOutcome::from_params(security_level, &params)),
    });
    match outcome {
        Ok(outcome) => {
            info!("setup succeeded");
            outcome
        }
        Err(err) => {
            warn!(kind = ?err.kind(), error = %err, "setup failed");
            SetupOutcome::failure(&err)
        }
    }
}

#[instrument(
    level = "info",
    skip_all,
    fields(threshold = request.threshold, num_authorities = request.num_authorities)
)]
pub fn perform_keygen_with_rng<R: RngCore>(rng: &mut R, request: &KeyGenRequest) -> KeyGenOutcome {
    let outcome = guarded(|| {
        let threshold =
            Threshold::checked(request.threshold as i64, request.num_authorities as i64)?;
        let curve = PairingDescriptor::from_hex(&request.params.pairing_descriptor)?.curve()?;
        match curve {
            CurveId::Bls12_381 => {
                let params = request.params.decode::<Bls12_381>()?;
                keygen(rng, &params, threshold).map(|out| KeyGenOutcome::from_output(&out))
            }
        }
    });
    match outcome {
        Ok(outcome) => {
            info!("key generation succeeded");
            outcome
        }
        Err(err) => {
            warn!(kind = ?err.kind(), error = %err, "key generation failed");
            KeyGenOutcome::failure(&err)
        }
    }
}

/// Runs `f`, turning a panic into [`TiacError::UnknownFailure`].
fn guarded<T>(f: impl FnOnce() -> Result<T, TiacError>) -> Result<T, TiacError> {
    catch_unwind(AssertUnwindSafe(f)).unwrap_or_else(|panic| {
        let reason = panic
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| panic.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "panic in arithmetic backend".into());
        Err(TiacError::UnknownFailure(reason))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setup_outcome_shape() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let outcome = perform_setup_with_rng(&mut rng, 256);
        assert!(outcome.success);
        assert_eq!(outcome.security_level, Some(256));
        assert_eq!(
            outcome.pairing_descriptor,
            Some(CurveId::Bls12_381.descriptor().to_hex())
        );
        assert_eq!(outcome.prime_order.as_ref().unwrap().len(), 64);
        assert_eq!(outcome.g1.as_ref().unwrap().len(), 96);
        assert_eq!(outcome.h1.as_ref().unwrap().len(), 96);
        assert_eq!(outcome.g2.as_ref().unwrap().len(), 192);
        assert!(outcome.error_kind.is_none() && outcome.error_message.is_none());

        let failed = perform_setup_with_rng(&mut rng, 0);
        assert_eq!(
            failed,
            SetupOutcome {
                success: false,
                error_kind: Some(ErrorKind::UnsupportedSecurityLevel),
                error_message: failed.error_message.clone(),
                ..SetupOutcome::default()
            }
        );
        assert!(!failed.error_message.unwrap().is_empty());
        assert!(KeyGenRequest::from_setup(&SetupOutcome::default(), 2, 3).is_none());
    }

    #[test]
    fn keygen_outcome_shape() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let setup = perform_setup_with_rng(&mut rng, 128);
        let request = KeyGenRequest::from_setup(&setup, 2, 3).unwrap();
        let outcome = perform_keygen_with_rng(&mut rng, &request);

        assert!(outcome.success);
        assert_eq!(outcome.threshold, Some(2));
        assert_eq!(outcome.num_authorities, Some(3));
        let mvk = outcome.master_verification_key.as_ref().unwrap();
        assert_eq!(
            (mvk.alpha2.len(), mvk.beta2.len(), mvk.beta1.len()),
            (192, 192, 96)
        );
        let shares = outcome.authority_shares.as_ref().unwrap();
        assert_eq!(shares.iter().map(|s| s.index).collect::<Vec<_>>(), vec![1, 2, 3]);
        for s in shares {
            assert_eq!((s.xm.len(), s.ym.len()), (64, 64));
            assert_eq!((s.vkm1.len(), s.vkm2.len(), s.vkm3.len()), (192, 192, 96));
        }
    }

    #[test]
    fn validation_order() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let setup = perform_setup_with_rng(&mut rng, 128);
        let mut broken = KeyGenRequest::from_setup(&setup, 2, 3).unwrap();
        broken.params.g1 = "zz".repeat(48);

        let kind = |request: &KeyGenRequest, t: i32, n: i32| {
            let request = KeyGenRequest::new(request.params.clone(), t, n);
            perform_keygen_with_rng(&mut StdRng::seed_from_u64(1u64), &request).error_kind
        };
        // Authority count, then threshold, then the parameters.
        assert_eq!(kind(&broken, 0, 0), Some(ErrorKind::InvalidAuthorityCount));
        assert_eq!(kind(&broken, -1, 0), Some(ErrorKind::InvalidAuthorityCount));
        assert_eq!(kind(&broken, 4, 3), Some(ErrorKind::InvalidThreshold));
        assert_eq!(kind(&broken, 0, 3), Some(ErrorKind::InvalidThreshold));
        assert_eq!(kind(&broken, 2, 3), Some(ErrorKind::InvalidParameters));
    }

    #[test]
    fn panics_are_contained() {
        let err = guarded::<()>(|| panic!("boom")).unwrap_err();
        assert_eq!(err, TiacError::UnknownFailure("boom".into()));
        assert_eq!(err.kind(), ErrorKind::UnknownFailure);

        let err = guarded::<()>(|| panic!("{} {}", "formatted", 1)).unwrap_err();
        assert_eq!(err, TiacError::UnknownFailure("formatted 1".into()));

        assert_eq!(guarded(|| Ok(5)), Ok(5));
    }
}
