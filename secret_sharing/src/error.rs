use ark_std::fmt;

use crate::common::ShareId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SSError {
    InvalidThresholdOrTotal(ShareId, ShareId),
    BelowThreshold(ShareId, ShareId),
    NoShares,
    InvalidShareId(ShareId),
    DuplicateShareId(ShareId),
    UnequalThresholdInShares(ShareId, ShareId),
}

impl fmt::Display for SSError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidThresholdOrTotal(threshold, total) => write!(
                f,
                "threshold {} and total {} must satisfy 1 <= threshold <= total",
                threshold, total
            ),
            Self::BelowThreshold(threshold, len) => write!(
                f,
                "{} shares are needed but only {} were given",
                threshold, len
            ),
            Self::NoShares => write!(f, "no shares were given"),
            Self::InvalidShareId(id) => write!(f, "share id {} is not allowed", id),
            Self::DuplicateShareId(id) => write!(f, "share id {} appears more than once", id),
            Self::UnequalThresholdInShares(expected, found) => write!(
                f,
                "shares disagree on the threshold: {} and {}",
                expected, found
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SSError {}
