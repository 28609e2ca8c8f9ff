//! Hex encoding of the elements exchanged with callers, tagged by the group they belong to.
//!
//! Widths for BLS12-381 are 48 bytes for G1, 96 bytes for G2 and 32 bytes for scalars, always as
//! lowercase hex without prefix. Points use the compressed big-endian encoding of the curve and
//! are checked for subgroup membership when decoded. Scalars are big-endian integers below the
//! group order.

use ark_ec::pairing::Pairing;
use tiac_crypto_utils::{
    hex_codec::{
        decode_point, decode_scalar as decode_field_elem, encode_modulus, encode_point,
        encode_scalar, hex_to_bytes, point_size, scalar_size,
    },
    CodecError,
};

use crate::error::{InvalidParameters, TiacError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementTag {
    G1,
    G2,
    Scalar,
}

impl ElementTag {
    /// Number of hex characters of an element with this tag.
    pub fn hex_len<E: Pairing>(&self) -> usize {
        2 * match self {
            Self::G1 => point_size::<E::G1Affine>(),
            Self::G2 => point_size::<E::G2Affine>(),
            Self::Scalar => scalar_size::<E::ScalarField>(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Element<E: Pairing> {
    G1(E::G1Affine),
    G2(E::G2Affine),
    Scalar(E::ScalarField),
}

impl<E: Pairing> Element<E> {
    pub fn tag(&self) -> ElementTag {
        match self {
            Self::G1(_) => ElementTag::G1,
            Self::G2(_) => ElementTag::G2,
            Self::Scalar(_) => ElementTag::Scalar,
        }
    }
}

pub fn encode<E: Pairing>(element: &Element<E>) -> String {
    match element {
        Element::G1(p) => encode_point(p),
        Element::G2(p) => encode_point(p),
        Element::Scalar(s) => encode_scalar(s),
    }
}

/// Inverse of [`encode`]. The error names the tag of the expected element.
pub fn decode<E: Pairing>(s: &str, tag: ElementTag) -> Result<Element<E>, TiacError> {
    match tag {
        ElementTag::G1 => decode_g1::<E>(s, "g1").map(Element::G1),
        ElementTag::G2 => decode_g2::<E>(s, "g2").map(Element::G2),
        ElementTag::Scalar => decode_scalar::<E>(s, "scalar").map(Element::Scalar),
    }
}

pub fn decode_g1<E: Pairing>(s: &str, field: &'static str) -> Result<E::G1Affine, TiacError> {
    decode_point(s).map_err(TiacError::decoding(field))
}

pub fn decode_g2<E: Pairing>(s: &str, field: &'static str) -> Result<E::G2Affine, TiacError> {
    decode_point(s).map_err(TiacError::decoding(field))
}

pub fn decode_scalar<E: Pairing>(
    s: &str,
    field: &'static str,
) -> Result<E::ScalarField, TiacError> {
    decode_field_elem(s).map_err(TiacError::decoding(field))
}

/// Fixed-width hex of the prime order `p` of the groups.
pub fn encode_prime_order<E: Pairing>() -> String {
    encode_modulus::<E::ScalarField>()
}

/// Checks that `s` is the prime order of the groups of `E`. The order can't be decoded as a
/// scalar since it is not less than itself.
pub fn check_prime_order<E: Pairing>(s: &str) -> Result<(), InvalidParameters> {
    let expected = encode_prime_order::<E>();
    if s.len() != expected.len() {
        return Err(InvalidParameters::Encoding {
            field: "primeOrder",
            error: CodecError::UnexpectedLength {
                expected: expected.len() / 2,
                actual: s.len() / 2,
            },
        });
    }
    hex_to_bytes(s).map_err(|error| InvalidParameters::Encoding {
        field: "primeOrder",
        error,
    })?;
    if s != expected {
        return Err(InvalidParameters::PrimeOrderMismatch);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use ark_bls12_381::{Bls12_381, Fr, G1Projective, G2Projective};
    use ark_ec::CurveGroup;
    use ark_ff::{One, Zero};
    use ark_std::{
        rand::{rngs::StdRng, SeedableRng},
        UniformRand,
    };

    type E = Bls12_381;

    #[test]
    fn tagged_round_trip() {
        let mut rng = StdRng::seed_from_u64(0u64);
        for _ in 0..5 {
            let elements: [Element<E>; 3] = [
                Element::G1(G1Projective::rand(&mut rng).into_affine()),
                Element::G2(G2Projective::rand(&mut rng).into_affine()),
                Element::Scalar(Fr::rand(&mut rng)),
            ];
            for element in elements {
                let encoded = encode(&element);
                assert_eq!(encoded.len(), element.tag().hex_len::<E>());
                assert_eq!(decode::<E>(&encoded, element.tag()).unwrap(), element);
            }
        }
        assert_eq!(ElementTag::G1.hex_len::<E>(), 96);
        assert_eq!(ElementTag::G2.hex_len::<E>(), 192);
        assert_eq!(ElementTag::Scalar.hex_len::<E>(), 64);
    }

    #[test]
    fn wrong_tag_or_length() {
        let mut rng = StdRng::seed_from_u64(0u64);
        let g1 = encode::<E>(&Element::G1(G1Projective::rand(&mut rng).into_affine()));
        let s = encode::<E>(&Element::Scalar(Fr::rand(&mut rng)));

        let err = decode::<E>(&g1, ElementTag::Scalar).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedEncoding);
        let err = decode::<E>(&s, ElementTag::G2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedEncoding);
        let err = decode::<E>(&g1[2..], ElementTag::G1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedEncoding);
        let err = decode::<E>(&g1.to_uppercase(), ElementTag::G1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedEncoding);
    }

    #[test]
    fn scalars_out_of_range() {
        let err = decode::<E>(&encode_prime_order::<E>(), ElementTag::Scalar).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfRange);
        assert_eq!(
            err,
            TiacError::Decoding {
                field: "scalar",
                error: CodecError::OutOfRange
            }
        );

        let max = encode::<E>(&Element::Scalar(-Fr::one()));
        assert_eq!(
            decode::<E>(&max, ElementTag::Scalar).unwrap(),
            Element::Scalar(-Fr::one())
        );
        let zero = encode::<E>(&Element::Scalar(Fr::zero()));
        assert_eq!(zero, "0".repeat(64));
    }

    #[test]
    fn prime_order() {
        let p = encode_prime_order::<E>();
        assert_eq!(p.len(), 64);
        assert_eq!(check_prime_order::<E>(&p), Ok(()));

        let mut other = p.clone();
        other.replace_range(63.., "3");
        assert_eq!(
            check_prime_order::<E>(&other),
            Err(InvalidParameters::PrimeOrderMismatch)
        );
        assert!(matches!(
            check_prime_order::<E>(&p.to_uppercase()),
            Err(InvalidParameters::Encoding {
                field: "primeOrder",
                ..
            })
        ));
        assert!(matches!(
            check_prime_order::<E>(&p[..62]),
            Err(InvalidParameters::Encoding {
                field: "primeOrder",
                error: CodecError::UnexpectedLength { .. }
            })
        ));
    }
}
