//! Fixed-width, lowercase hexadecimal encoding of field elements and curve points.
//!
//! Points are written in their canonical compressed form and always decoded with full
//! validation, i.e. the decoded point must lie on the curve and in the prime order subgroup.
//! Field elements are written as big-endian integers padded to the byte size of the modulus and
//! decoding rejects values not less than the modulus instead of reducing them.

use ark_ec::AffineRepr;
use ark_ff::{BigInteger, PrimeField};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize, Compress, Validate};
use ark_std::{fmt, string::String, vec::Vec};

/// Reasons a hex string could not be turned back into a field element or a group element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Hex strings encode whole bytes so their length must be even.
    OddLength(usize),
    /// Only the characters `0-9` and `a-f` are allowed.
    InvalidCharacter { index: usize, character: char },
    /// Byte length differs from the fixed width of the expected element.
    UnexpectedLength { expected: usize, actual: usize },
    /// Bytes don't describe a point on the curve in the prime order subgroup.
    NotInGroup,
    /// Integer is not less than the modulus of the field.
    OutOfRange,
}

impl CodecError {
    /// `true` for the errors describing a numeric value that is well-formed but too big.
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Self::OutOfRange)
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OddLength(len) => write!(f, "odd number of hex characters ({})", len),
            Self::InvalidCharacter { index, character } => write!(
                f,
                "invalid character {:?} at position {}, expected lowercase hex",
                character, index
            ),
            Self::UnexpectedLength { expected, actual } => {
                write!(f, "expected {} bytes but got {}", expected, actual)
            }
            Self::NotInGroup => write!(f, "not a point of the prime order subgroup"),
            Self::OutOfRange => write!(f, "value is not less than the group order"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CodecError {}

/// Lowercase hex without prefix or separators.
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Strict inverse of [`bytes_to_hex`]. Uppercase digits are rejected so that every byte string has
/// exactly one textual form.
pub fn hex_to_bytes(s: &str) -> Result<Vec<u8>, CodecError> {
    if s.len() % 2 != 0 {
        return Err(CodecError::OddLength(s.len()));
    }
    if let Some((index, character)) = s
        .char_indices()
        .find(|(_, c)| !matches!(c, '0'..='9' | 'a'..='f'))
    {
        return Err(CodecError::InvalidCharacter { index, character });
    }
    hex::decode(s).map_err(|_| CodecError::OddLength(s.len()))
}

/// Same as [`hex_to_bytes`] but also checks the decoded length.
pub fn hex_to_bytes_exact(s: &str, expected: usize) -> Result<Vec<u8>, CodecError> {
    let bytes = hex_to_bytes(s)?;
    if bytes.len() != expected {
        return Err(CodecError::UnexpectedLength {
            expected,
            actual: bytes.len(),
        });
    }
    Ok(bytes)
}

/// Number of bytes in the compressed encoding of any point of the group of `G`.
pub fn point_size<G: AffineRepr>() -> usize {
    G::zero().compressed_size()
}

/// Number of bytes needed for any element of `F`, i.e. the byte size of its modulus.
pub fn scalar_size<F: PrimeField>() -> usize {
    (F::MODULUS_BIT_SIZE as usize + 7) / 8
}

/// Canonical compressed bytes of `obj`.
pub fn canonical_bytes<T: CanonicalSerialize>(obj: &T) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(obj.compressed_size());
    // Writing into a `Vec` can't fail.
    let _ = obj.serialize_with_mode(&mut bytes, Compress::Yes);
    bytes
}

/// Validating inverse of [`canonical_bytes`]. All of `bytes` must be consumed.
pub fn from_canonical_bytes<T: CanonicalDeserialize>(bytes: &[u8]) -> Result<T, CodecError> {
    let mut reader = bytes;
    let obj = T::deserialize_with_mode(&mut reader, Compress::Yes, Validate::Yes)
        .map_err(|_| CodecError::NotInGroup)?;
    if !reader.is_empty() {
        return Err(CodecError::UnexpectedLength {
            expected: bytes.len() - reader.len(),
            actual: bytes.len(),
        });
    }
    Ok(obj)
}

/// Hex of the compressed encoding of `point`.
pub fn encode_point<G: AffineRepr>(point: &G) -> String {
    bytes_to_hex(&canonical_bytes(point))
}

/// Decodes a point written by [`encode_point`], checking width and subgroup membership.
pub fn decode_point<G: AffineRepr>(s: &str) -> Result<G, CodecError> {
    let bytes = hex_to_bytes_exact(s, point_size::<G>())?;
    from_canonical_bytes(&bytes)
}

/// Big-endian bytes of `n` truncated or zero padded to `width` bytes.
pub fn bigint_to_bytes_be<B: BigInteger>(n: &B, width: usize) -> Vec<u8> {
    let bytes = n.to_bytes_be();
    if bytes.len() >= width {
        bytes[bytes.len() - width..].to_vec()
    } else {
        let mut padded = Vec::with_capacity(width);
        padded.resize(width - bytes.len(), 0);
        padded.extend_from_slice(&bytes);
        padded
    }
}

/// Fixed-width big-endian hex of a field element.
pub fn encode_scalar<F: PrimeField>(scalar: &F) -> String {
    bytes_to_hex(&bigint_to_bytes_be(&scalar.into_bigint(), scalar_size::<F>()))
}

/// Decodes a field element written by [`encode_scalar`]. Fails with [`CodecError::OutOfRange`]
/// for integers not in `[0, p)`.
pub fn decode_scalar<F: PrimeField>(s: &str) -> Result<F, CodecError> {
    let width = scalar_size::<F>();
    let bytes = hex_to_bytes_exact(s, width)?;
    let modulus = bigint_to_bytes_be(&F::MODULUS, width);
    // Equal width big-endian byte strings compare like the integers they represent.
    if bytes.as_slice() >= modulus.as_slice() {
        return Err(CodecError::OutOfRange);
    }
    Ok(F::from_be_bytes_mod_order(&bytes))
}

/// Fixed-width big-endian hex of the modulus of `F`, i.e. the order of the groups.
pub fn encode_modulus<F: PrimeField>() -> String {
    bytes_to_hex(&bigint_to_bytes_be(&F::MODULUS, scalar_size::<F>()))
}
