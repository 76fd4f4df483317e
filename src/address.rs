//! Legacy pay-to-pubkey-hash addresses: a version byte and a HASH160 framed
//! with Base58Check.

use std::fmt;
use std::str::FromStr;

use secp256k1::PublicKey;

use crate::encode::{base58check, decode_base58check, CHECKSUM_LEN};
use crate::errors::{Error, Result};
use crate::hash::{hash160, Hash160};
use crate::network::Network;

pub const HASH160_LEN: usize = 20;
/// Version byte, HASH160 and checksum.
pub const ADDRESS_BYTES: usize = 1 + HASH160_LEN + CHECKSUM_LEN;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address {
    pub version: u8,
    pub hash: Hash160,
}

impl Address {
    pub fn new(version: u8, hash: Hash160) -> Address {
        Address { version, hash }
    }

    pub fn p2pkh(hash: Hash160, network: Network) -> Address {
        Address::new(network.p2pkh_prefix(), hash)
    }

    pub fn from_public_key(pk: &PublicKey, network: Network, compressed: bool) -> Address {
        let hashed_pk = if compressed {
            hash160(&pk.serialize())
        } else {
            hash160(&pk.serialize_uncompressed())
        };
        Address::p2pkh(hashed_pk, network)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut v = Vec::with_capacity(1 + HASH160_LEN);
        v.push(self.version);
        v.extend_from_slice(&self.hash);
        f.write_str(&base58check(&v))
    }
}

impl FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Address> {
        let (version, hash) = decode(s)?;
        Ok(Address { version, hash })
    }
}

pub fn encode(version: u8, payload: &[u8]) -> Result<String> {
    if payload.len() != HASH160_LEN {
        return Err(Error::InvalidLength {
            expected: HASH160_LEN,
            actual: payload.len(),
        });
    }
    let mut hash = [0u8; HASH160_LEN];
    hash.copy_from_slice(payload);
    Ok(Address::new(version, hash).to_string())
}

pub fn decode(address: &str) -> Result<(u8, Hash160)> {
    let extended = decode_base58check(address, ADDRESS_BYTES)?;
    let mut hash = [0u8; HASH160_LEN];
    hash.copy_from_slice(&extended[1..]);
    Ok((extended[0], hash))
}
