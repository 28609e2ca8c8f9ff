//! Configuration of the pairing groups: which curve serves a security level and how the choice
//! is described to the holder of the parameters.
//!
//! The pairing is identified by a [`PairingDescriptor`], a short `key=value` text such as
//! `type=bls12;curve=bls12-381;rbits=255;qbits=381` which is handed out as lowercase hex together
//! with the generators. Key generation reconstructs the exact group from it.

use core::{fmt, str::FromStr};

use ark_bls12_381::Bls12_381;
use ark_ec::pairing::Pairing;
use ark_ff::PrimeField;
use serde::{Deserialize, Serialize};
use tiac_crypto_utils::hex_codec::{bytes_to_hex, hex_to_bytes};
use tiac_secret_sharing::common::ShareId;

use crate::error::{InvalidParameters, TiacError};

/// Supported pairing-friendly curves.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum CurveId {
    /// BLS12-381, type-3 pairing with a 255-bit prime order and a 381-bit base field.
    Bls12_381,
}

impl CurveId {
    pub const ALL: [CurveId; 1] = [CurveId::Bls12_381];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Bls12_381 => "bls12-381",
        }
    }

    pub fn family(&self) -> &'static str {
        match self {
            Self::Bls12_381 => "bls12",
        }
    }

    /// Bit size of the prime order of the groups.
    pub fn order_bits(&self) -> u32 {
        match self {
            Self::Bls12_381 => <Bls12_381 as Pairing>::ScalarField::MODULUS_BIT_SIZE,
        }
    }

    /// Bit size of the base field the curves are defined over.
    pub fn base_field_bits(&self) -> u32 {
        match self {
            Self::Bls12_381 => <<Bls12_381 as Pairing>::BaseField as PrimeField>::MODULUS_BIT_SIZE,
        }
    }

    pub fn descriptor(&self) -> PairingDescriptor {
        PairingDescriptor {
            family: self.family().into(),
            curve: self.name().into(),
            order_bits: self.order_bits(),
            base_field_bits: self.base_field_bits(),
        }
    }
}

/// Requested bit size of the prime group order.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct SecurityLevel(u16);

impl SecurityLevel {
    pub const MIN: u16 = 1;
    /// Largest level a supported curve can serve. Levels up to 256 are rounded to the 255-bit
    /// order of BLS12-381, the closest prime order available.
    pub const MAX: u16 = 256;

    pub fn new(level: i32) -> Result<Self, TiacError> {
        u16::try_from(level)
            .ok()
            .filter(|l| (Self::MIN..=Self::MAX).contains(l))
            .map(Self)
            .ok_or(TiacError::UnsupportedSecurityLevel(level as i64))
    }

    pub fn bits(&self) -> u16 {
        self.0
    }

    /// Smallest supported curve serving this level.
    pub fn curve(&self) -> CurveId {
        CurveId::Bls12_381
    }
}

/// Textual description of a pairing group triple.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct PairingDescriptor {
    pub family: String,
    pub curve: String,
    /// Bits of the prime order `p`
    pub order_bits: u32,
    /// Bits of the base field modulus
    pub base_field_bits: u32,
}

impl PairingDescriptor {
    const KEYS: [&'static str; 4] = ["type", "curve", "rbits", "qbits"];

    /// Parses the `key=value;...` text. Every key must appear exactly once, in any order, and
    /// numbers must be written without sign or leading zeros.
    pub fn parse(text: &str) -> Result<Self, InvalidParameters> {
        let malformed = |reason: String| InvalidParameters::MalformedDescriptor(reason);
        let mut values: [Option<&str>; 4] = [None; 4];
        for entry in text.split(';') {
            let (key, value) = entry
                .split_once('=')
                .ok_or_else(|| malformed(format!("entry `{}` is not `key=value`", entry)))?;
            let slot = Self::KEYS
                .iter()
                .position(|k| *k == key)
                .ok_or_else(|| malformed(format!("unknown key `{}`", key)))?;
            if values[slot].replace(value).is_some() {
                return Err(malformed(format!("key `{}` repeated", key)));
            }
        }
        let [Some(family), Some(curve), Some(rbits), Some(qbits)] = values else {
            let missing = Self::KEYS
                .iter()
                .zip(values)
                .find_map(|(k, v)| v.is_none().then_some(*k))
                .unwrap_or_default();
            return Err(malformed(format!("key `{}` missing", missing)));
        };
        let bits = |key: &str, value: &str| {
            u32::from_str(value)
                .ok()
                .filter(|n| n.to_string() == value)
                .ok_or_else(|| malformed(format!("`{}` is not a bit size: `{}`", key, value)))
        };
        Ok(Self {
            family: family.into(),
            curve: curve.into(),
            order_bits: bits("rbits", rbits)?,
            base_field_bits: bits("qbits", qbits)?,
        })
    }

    /// Lowercase hex of the canonical text.
    pub fn to_hex(&self) -> String {
        bytes_to_hex(self.to_string().as_bytes())
    }

    pub fn from_hex(s: &str) -> Result<Self, InvalidParameters> {
        let bytes = hex_to_bytes(s).map_err(|error| InvalidParameters::Encoding {
            field: "pairingDescriptor",
            error,
        })?;
        let text = String::from_utf8(bytes).map_err(|_| {
            InvalidParameters::MalformedDescriptor("descriptor is not UTF-8 text".into())
        })?;
        Self::parse(&text)
    }

    /// The supported curve matching every entry of this descriptor.
    pub fn curve(&self) -> Result<CurveId, InvalidParameters> {
        CurveId::ALL
            .into_iter()
            .find(|c| &c.descriptor() == self)
            .ok_or_else(|| InvalidParameters::UnknownPairing(self.to_string()))
    }
}

impl fmt::Display for PairingDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "type={};curve={};rbits={};qbits={}",
            self.family, self.curve, self.order_bits, self.base_field_bits
        )
    }
}

impl FromStr for PairingDescriptor {
    type Err = InvalidParameters;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A pairing engine with a known descriptor.
pub trait PairingCurve: Pairing {
    const CURVE: CurveId;

    fn descriptor() -> PairingDescriptor {
        Self::CURVE.descriptor()
    }
}

impl PairingCurve for Bls12_381 {
    const CURVE: CurveId = CurveId::Bls12_381;
}

/// Threshold suggested for `total` authorities: a majority for larger committees, 2 of 3 and
/// 3 of 5 for the small ones and all of them otherwise.
pub fn recommended_threshold(total: ShareId) -> ShareId {
    match total {
        3 => 2,
        5 => 3,
        n if n >= 7 => n / 2 + 1,
        n => n,
    }
}
