//! Serde serialization for `arkworks-rs` objects they themselves don't implement serde.
//! Everything is written as the lowercase hex strings of [`crate::hex_codec`].

use ark_ff::PrimeField;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use ark_std::string::String;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_with::{DeserializeAs, SerializeAs};

use crate::hex_codec::{
    bytes_to_hex, canonical_bytes, decode_scalar, encode_scalar, from_canonical_bytes,
    hex_to_bytes,
};

/// Hex string of the compressed canonical encoding. Deserialization validates the object, so
/// points must be in the prime order subgroup.
pub struct HexCanonical;

impl HexCanonical {
    pub fn serialize<S, T>(x: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: CanonicalSerialize,
        S: Serializer,
    {
        Serialize::serialize(&bytes_to_hex(&canonical_bytes(x)), serializer)
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        T: CanonicalDeserialize,
        D: Deserializer<'de>,
    {
        let s: String = Deserialize::deserialize(deserializer)?;
        let bytes = hex_to_bytes(&s).map_err(serde::de::Error::custom)?;
        from_canonical_bytes(&bytes).map_err(serde::de::Error::custom)
    }
}

impl<T> SerializeAs<T> for HexCanonical
where
    T: CanonicalSerialize,
{
    fn serialize_as<S>(x: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        Self::serialize(x, serializer)
    }
}

impl<'de, T> DeserializeAs<'de, T> for HexCanonical
where
    T: CanonicalDeserialize,
{
    fn deserialize_as<D>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
    {
        Self::deserialize(deserializer)
    }
}

/// Fixed-width big-endian hex of a field element.
pub struct HexScalar;

impl<F: PrimeField> SerializeAs<F> for HexScalar {
    fn serialize_as<S>(x: &F, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        Serialize::serialize(&encode_scalar(x), serializer)
    }
}

impl<'de, F: PrimeField> DeserializeAs<'de, F> for HexScalar {
    fn deserialize_as<D>(deserializer: D) -> Result<F, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s: String = Deserialize::deserialize(deserializer)?;
        decode_scalar(&s).map_err(serde::de::Error::custom)
    }
}
