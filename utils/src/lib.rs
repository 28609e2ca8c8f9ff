#![cfg_attr(not(feature = "std"), no_std)]

//! Helpers shared by the TIAC crates: canonical hex encodings of field and group elements,
//! serde adapters built on them and fixed-base multiplication tables.

extern crate alloc;

#[macro_use]
pub mod macros;
pub mod hex_codec;
pub mod msm;
pub mod serde_utils;

pub use hex_codec::CodecError;
