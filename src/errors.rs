use thiserror::Error;

use crate::hash::Checksum;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid base58 character {character:?} at position {position}")]
    InvalidCharacter { character: char, position: usize },

    #[error("invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error(
        "checksum mismatch: expected {}, got {}",
        hex::encode(.expected),
        hex::encode(.actual)
    )]
    ChecksumMismatch { expected: Checksum, actual: Checksum },

    #[error("invalid script: {0}")]
    InvalidScript(String),

    #[error("unknown network: {0}")]
    UnknownNetwork(String),

    #[error("unknown version byte 0x{0:02x}")]
    UnknownVersion(u8),

    #[error("invalid WIF: {0}")]
    InvalidWif(String),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("invalid hex: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("secp256k1: {0}")]
    Secp256k1(#[from] secp256k1::Error),
}
