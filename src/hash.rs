use ripemd160::Ripemd160;
use sha2::{Digest, Sha256};

pub type Hash160 = [u8; 20];
pub type Checksum = [u8; 4];

// apply sha256 twice
pub fn hash256(input: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::default();
    hasher.input(input);
    let result = hasher.result();

    let mut hasher = Sha256::default();
    hasher.input(&result);

    let mut out = [0u8; 32];
    out.copy_from_slice(&hasher.result());
    out
}

// apply sha256 and ripemd160
pub fn hash160(input: &[u8]) -> Hash160 {
    let mut hasher = Sha256::default();
    hasher.input(input);
    let result = hasher.result();

    let mut hasher = Ripemd160::default();
    hasher.input(&result);

    let mut out = [0u8; 20];
    out.copy_from_slice(&hasher.result());
    out
}

/// First four bytes of `hash256(input)`.
pub fn checksum(input: &[u8]) -> Checksum {
    let digest = hash256(input);
    let mut out = [0u8; 4];
    out.copy_from_slice(&digest[..4]);
    out
}
