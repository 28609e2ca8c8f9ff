use ark_ec::{pairing::Pairing, AffineRepr};
use ark_ff::PrimeField;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use tiac_crypto_utils::serde_utils::HexCanonical;

use crate::{
    codec::{self, check_prime_order},
    config::{PairingCurve, PairingDescriptor},
    error::{InvalidParameters, TiacError},
};

/// Public parameters shared by every later phase: the pairing groups, two independent
/// generators `g1`, `h1` of G1 and a generator `g2` of G2.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct PairingGroupParameters<E: Pairing> {
    pub descriptor: PairingDescriptor,
    #[serde_as(as = "HexCanonical")]
    pub g1: E::G1Affine,
    #[serde_as(as = "HexCanonical")]
    pub h1: E::G1Affine,
    #[serde_as(as = "HexCanonical")]
    pub g2: E::G2Affine,
}

impl<E: PairingCurve> PairingGroupParameters<E> {
    /// Checks the invariants not already enforced by decoding: the descriptor is the one of `E`
    /// and the generators are non-identity with `g1 != h1`.
    pub fn validate(&self) -> Result<(), InvalidParameters> {
        let curve = self.descriptor.curve()?;
        if curve != E::CURVE {
            return Err(InvalidParameters::PairingMismatch {
                expected: E::descriptor().to_string(),
                found: self.descriptor.to_string(),
            });
        }
        if self.g1.is_zero() {
            return Err(InvalidParameters::IdentityGenerator("g1"));
        }
        if self.h1.is_zero() {
            return Err(InvalidParameters::IdentityGenerator("h1"));
        }
        if self.g2.is_zero() {
            return Err(InvalidParameters::IdentityGenerator("g2"));
        }
        if self.g1 == self.h1 {
            return Err(InvalidParameters::DependentGenerators);
        }
        Ok(())
    }
}

impl<E: Pairing> PairingGroupParameters<E> {
    /// Order `p` of G1, G2 and GT.
    pub fn prime_order(&self) -> <E::ScalarField as PrimeField>::BigInt {
        <E::ScalarField as PrimeField>::MODULUS
    }

    pub fn prime_order_hex(&self) -> String {
        codec::encode_prime_order::<E>()
    }
}

/// [`PairingGroupParameters`] as the hex strings handed to callers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedParameters {
    pub pairing_descriptor: String,
    pub prime_order: String,
    pub g1: String,
    pub g2: String,
    pub h1: String,
}

impl SerializedParameters {
    pub fn from_params<E: Pairing>(params: &PairingGroupParameters<E>) -> Self {
        Self {
            pairing_descriptor: params.descriptor.to_hex(),
            prime_order: params.prime_order_hex(),
            g1: codec::encode::<E>(&codec::Element::G1(params.g1)),
            g2: codec::encode::<E>(&codec::Element::G2(params.g2)),
            h1: codec::encode::<E>(&codec::Element::G1(params.h1)),
        }
    }

    /// Rebuilds the parameters for the pairing `E`, rejecting anything that doesn't describe `E`
    /// exactly or has generators outside the prime order subgroups.
    pub fn decode<E: PairingCurve>(&self) -> Result<PairingGroupParameters<E>, TiacError> {
        let descriptor = PairingDescriptor::from_hex(&self.pairing_descriptor)?;
        let curve = descriptor.curve()?;
        if curve != E::CURVE {
            return Err(InvalidParameters::PairingMismatch {
                expected: E::descriptor().to_string(),
                found: descriptor.to_string(),
            }
            .into());
        }
        check_prime_order::<E>(&self.prime_order)?;
        let params = PairingGroupParameters {
            descriptor,
            g1: codec::decode_g1::<E>(&self.g1, "g1").map_err(TiacError::in_parameters)?,
            h1: codec::decode_g1::<E>(&self.h1, "h1").map_err(TiacError::in_parameters)?,
            g2: codec::decode_g2::<E>(&self.g2, "g2").map_err(TiacError::in_parameters)?,
        };
        params.validate()?;
        Ok(params)
    }
}

impl<E: Pairing> From<&PairingGroupParameters<E>> for SerializedParameters {
    fn from(params: &PairingGroupParameters<E>) -> Self {
        Self::from_params(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::CurveId, error::ErrorKind};
    use ark_bls12_381::{Bls12_381, G1Affine, G1Projective, G2Projective};
    use ark_ec::CurveGroup;
    use ark_std::{
        rand::{rngs::StdRng, SeedableRng},
        UniformRand,
    };
    use tiac_crypto_utils::CodecError;

    type E = Bls12_381;

    fn random_params(rng: &mut StdRng) -> PairingGroupParameters<E> {
        PairingGroupParameters {
            descriptor: CurveId::Bls12_381.descriptor(),
            g1: G1Projective::rand(rng).into_affine(),
            h1: G1Projective::rand(rng).into_affine(),
            g2: G2Projective::rand(rng).into_affine(),
        }
    }

    #[test]
    fn serialized_round_trip() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let params = random_params(&mut rng);
        assert_eq!(params.validate(), Ok(()));

        let serialized = SerializedParameters::from(&params);
        assert_eq!(serialized.prime_order.len(), 64);
        assert_eq!(serialized.g1.len(), 96);
        assert_eq!(serialized.h1.len(), 96);
        assert_eq!(serialized.g2.len(), 192);
        assert_eq!(serialized.decode::<E>().unwrap(), params);

        let json = serde_json::to_value(&serialized).unwrap();
        assert!(json["pairingDescriptor"].is_string());
        assert!(json["primeOrder"].is_string());

        let json = serde_json::to_string(&params).unwrap();
        assert_eq!(
            serde_json::from_str::<PairingGroupParameters<E>>(&json).unwrap(),
            params
        );
    }

    #[test]
    fn rejects_bad_parameters() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let params = random_params(&mut rng);
        let good = SerializedParameters::from(&params);

        let mut s = good.clone();
        s.h1 = s.g1.clone();
        assert_eq!(
            s.decode::<E>(),
            Err(TiacError::InvalidParameters(
                InvalidParameters::DependentGenerators
            ))
        );

        let mut s = good.clone();
        s.g1 = codec::encode::<E>(&codec::Element::G1(G1Affine::zero()));
        assert_eq!(
            s.decode::<E>(),
            Err(TiacError::InvalidParameters(
                InvalidParameters::IdentityGenerator("g1")
            ))
        );

        let mut s = good.clone();
        s.g2 = "00".repeat(96);
        assert_eq!(
            s.decode::<E>(),
            Err(TiacError::InvalidParameters(InvalidParameters::Encoding {
                field: "g2",
                error: CodecError::NotInGroup
            }))
        );

        let mut s = good.clone();
        s.h1.push_str("00");
        assert_eq!(s.decode::<E>().unwrap_err().kind(), ErrorKind::InvalidParameters);

        let mut s = good.clone();
        s.pairing_descriptor =
            PairingDescriptor::parse("type=bls12;curve=bls12-377;rbits=253;qbits=377")
                .unwrap()
                .to_hex();
        assert!(matches!(
            s.decode::<E>(),
            Err(TiacError::InvalidParameters(
                InvalidParameters::UnknownPairing(_)
            ))
        ));

        let mut s = good;
        s.prime_order = "00".repeat(32);
        assert_eq!(
            s.decode::<E>(),
            Err(TiacError::InvalidParameters(
                InvalidParameters::PrimeOrderMismatch
            ))
        );
    }
}
