use core::fmt;

use serde::{Deserialize, Serialize};
use tiac_crypto_utils::CodecError;
use tiac_secret_sharing::error::SSError;

/// Coarse classification of failures, reported to callers of the boundary functions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    ParameterGenerationFailure,
    UnsupportedSecurityLevel,
    InvalidThreshold,
    InvalidAuthorityCount,
    InvalidParameters,
    MalformedEncoding,
    OutOfRange,
    UnknownFailure,
}

/// Why setup output handed back to key generation was rejected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvalidParameters {
    /// A hex field could not be decoded.
    Encoding {
        field: &'static str,
        error: CodecError,
    },
    /// Descriptor text doesn't follow the `key=value;...` format.
    MalformedDescriptor(String),
    /// Descriptor is well-formed but names no supported pairing.
    UnknownPairing(String),
    /// Descriptor names a supported pairing different from the one requested.
    PairingMismatch { expected: String, found: String },
    /// Prime order is not the order of the described groups.
    PrimeOrderMismatch,
    /// A generator is the identity element.
    IdentityGenerator(&'static str),
    /// `g1` and `h1` are equal.
    DependentGenerators,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TiacError {
    UnsupportedSecurityLevel(i64),
    ParameterGenerationFailure(&'static str),
    InvalidAuthorityCount(i64),
    InvalidThreshold { threshold: i64, total: i64 },
    InvalidParameters(InvalidParameters),
    /// Decoding of a standalone encoded element failed.
    Decoding {
        field: &'static str,
        error: CodecError,
    },
    SecretSharing(SSError),
    UnknownFailure(String),
}

impl TiacError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnsupportedSecurityLevel(_) => ErrorKind::UnsupportedSecurityLevel,
            Self::ParameterGenerationFailure(_) => ErrorKind::ParameterGenerationFailure,
            Self::InvalidAuthorityCount(_) => ErrorKind::InvalidAuthorityCount,
            Self::InvalidThreshold { .. } => ErrorKind::InvalidThreshold,
            Self::InvalidParameters(_) => ErrorKind::InvalidParameters,
            Self::Decoding { error, .. } if error.is_out_of_range() => ErrorKind::OutOfRange,
            Self::Decoding { .. } => ErrorKind::MalformedEncoding,
            Self::SecretSharing(SSError::InvalidThresholdOrTotal(..)) => ErrorKind::InvalidThreshold,
            Self::SecretSharing(_) | Self::UnknownFailure(_) => ErrorKind::UnknownFailure,
        }
    }

    /// Returns a closure attaching the name of the decoded field to a codec error.
    pub fn decoding(field: &'static str) -> impl Fn(CodecError) -> Self {
        move |error| Self::Decoding { field, error }
    }

    /// Re-labels decoding failures as invalid setup parameters, other errors are kept.
    pub fn in_parameters(self) -> Self {
        match self {
            Self::Decoding { field, error } => {
                Self::InvalidParameters(InvalidParameters::Encoding { field, error })
            }
            other => other,
        }
    }
}

impl From<InvalidParameters> for TiacError {
    fn from(err: InvalidParameters) -> Self {
        Self::InvalidParameters(err)
    }
}

impl From<SSError> for TiacError {
    fn from(err: SSError) -> Self {
        Self::SecretSharing(err)
    }
}

impl fmt::Display for InvalidParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Encoding { field, error } => write!(f, "field `{}`: {}", field, error),
            Self::MalformedDescriptor(reason) => {
                write!(f, "malformed pairing descriptor: {}", reason)
            }
            Self::UnknownPairing(descriptor) => {
                write!(f, "unsupported pairing descriptor `{}`", descriptor)
            }
            Self::PairingMismatch { expected, found } => write!(
                f,
                "pairing descriptor `{}` doesn't match `{}`",
                found, expected
            ),
            Self::PrimeOrderMismatch => {
                write!(f, "prime order doesn't match the pairing descriptor")
            }
            Self::IdentityGenerator(field) => write!(f, "generator `{}` is the identity", field),
            Self::DependentGenerators => write!(f, "generators `g1` and `h1` are equal"),
        }
    }
}

impl fmt::Display for TiacError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedSecurityLevel(level) => {
                write!(f, "unsupported security level {}", level)
            }
            Self::ParameterGenerationFailure(reason) => {
                write!(f, "parameter generation failed: {}", reason)
            }
            Self::InvalidAuthorityCount(n) => {
                write!(f, "number of authorities must be at least 1, got {}", n)
            }
            Self::InvalidThreshold { threshold, total } => write!(
                f,
                "threshold must satisfy 1 <= threshold <= {}, got {}",
                total, threshold
            ),
            Self::InvalidParameters(reason) => write!(f, "invalid setup parameters: {}", reason),
            Self::Decoding { field, error } => write!(f, "malformed `{}`: {}", field, error),
            Self::SecretSharing(err) => write!(f, "secret sharing failed: {}", err),
            Self::UnknownFailure(reason) => write!(f, "unexpected failure: {}", reason),
        }
    }
}

impl std::error::Error for TiacError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds() {
        assert_eq!(
            TiacError::decoding("g1")(CodecError::OddLength(3)).kind(),
            ErrorKind::MalformedEncoding
        );
        assert_eq!(
            TiacError::decoding("xm")(CodecError::OutOfRange).kind(),
            ErrorKind::OutOfRange
        );
        assert_eq!(
            TiacError::decoding("g1")(CodecError::NotInGroup)
                .in_parameters()
                .kind(),
            ErrorKind::InvalidParameters
        );
        assert_eq!(
            TiacError::from(SSError::InvalidThresholdOrTotal(4, 3)).kind(),
            ErrorKind::InvalidThreshold
        );
        assert_eq!(
            TiacError::from(SSError::NoShares).kind(),
            ErrorKind::UnknownFailure
        );
    }

    #[test]
    fn messages_name_the_field() {
        let err = TiacError::decoding("g1")(CodecError::InvalidCharacter {
            index: 4,
            character: 'z',
        })
        .in_parameters();
        let msg = err.to_string();
        assert!(msg.contains("`g1`"), "{}", msg);
        assert!(msg.contains("position 4"), "{}", msg);
    }
}
