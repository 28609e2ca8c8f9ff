use ark_serialize::{
    CanonicalDeserialize, CanonicalSerialize, Compress, Read, SerializationError, Valid, Validate,
};
use serde::{Deserialize, Serialize};
use tiac_secret_sharing::common::ShareId;

use crate::error::TiacError;

/// Numbers relation `threshold` / `total` where `1 <= threshold <= total`. Deserialization
/// enforces the relation as well.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, CanonicalSerialize, Serialize, Deserialize)]
#[serde(try_from = "(ShareId, ShareId)")]
pub struct Threshold(
    /// `threshold`
    pub(crate) ShareId,
    /// `total`
    pub(crate) ShareId,
);

impl TryFrom<(ShareId, ShareId)> for Threshold {
    type Error = TiacError;

    fn try_from((threshold, total): (ShareId, ShareId)) -> Result<Self, Self::Error> {
        Self::new(threshold, total)
    }
}

impl Valid for Threshold {
    fn check(&self) -> Result<(), SerializationError> {
        Self::new(self.0, self.1)
            .map(|_| ())
            .map_err(|_| SerializationError::InvalidData)
    }
}

impl CanonicalDeserialize for Threshold {
    fn deserialize_with_mode<R: Read>(
        mut reader: R,
        compress: Compress,
        validate: Validate,
    ) -> Result<Self, SerializationError> {
        let threshold = ShareId::deserialize_with_mode(&mut reader, compress, validate)?;
        let total = ShareId::deserialize_with_mode(&mut reader, compress, validate)?;
        // Checked regardless of `validate`, `degree` relies on it.
        Self::new(threshold, total).map_err(|_| SerializationError::InvalidData)
    }
}

impl Threshold {
    /// Checks the number of authorities first, then the threshold against it.
    pub fn new(threshold: ShareId, total: ShareId) -> Result<Self, TiacError> {
        Self::checked(threshold as i64, total as i64)
    }

    /// Same as [`Threshold::new`] for integers coming from callers, which may be negative or
    /// too big for a [`ShareId`].
    pub fn checked(threshold: i64, total: i64) -> Result<Self, TiacError> {
        let total_id = ShareId::try_from(total)
            .ok()
            .filter(|n| *n >= 1)
            .ok_or(TiacError::InvalidAuthorityCount(total))?;
        match ShareId::try_from(threshold) {
            Ok(t) if t >= 1 && t <= total_id => Ok(Self(t, total_id)),
            _ => Err(TiacError::InvalidThreshold { threshold, total }),
        }
    }

    pub fn threshold(&self) -> ShareId {
        self.0
    }

    pub fn total(&self) -> ShareId {
        self.1
    }

    /// Degree of the polynomials sharing the master secret.
    pub fn degree(&self) -> usize {
        self.0 as usize - 1
    }
}
