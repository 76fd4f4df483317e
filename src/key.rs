use std::fmt;
use std::str::FromStr;

use log::debug;
use secp256k1::{PublicKey, Secp256k1, SecretKey};

use crate::address::Address;
use crate::encode::{base58check, decode_bounded, verify_checksum, CHECKSUM_LEN};
use crate::errors::{Error, Result};
use crate::network::Network;

pub const SECRET_KEY_LEN: usize = 32;

const COMPRESSED_FLAG: u8 = 0x01;
const UNCOMPRESSED_WIF_BYTES: usize = 1 + SECRET_KEY_LEN + CHECKSUM_LEN;
const COMPRESSED_WIF_BYTES: usize = UNCOMPRESSED_WIF_BYTES + 1;

/// A private key in Wallet Import Format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wif {
    pub network: Network,
    pub compressed: bool,
    pub secret_key: SecretKey,
}

impl Wif {
    pub fn public_key(&self) -> PublicKey {
        let secp = Secp256k1::new();
        PublicKey::from_secret_key(&secp, &self.secret_key)
    }

    pub fn address(&self) -> Address {
        Address::from_public_key(&self.public_key(), self.network, self.compressed)
    }
}

impl fmt::Display for Wif {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&encode_to_wif(&self.secret_key, self.network, self.compressed))
    }
}

impl FromStr for Wif {
    type Err = Error;

    fn from_str(s: &str) -> Result<Wif> {
        decode_wif(s)
    }
}

pub fn encode_to_wif(secret_key: &SecretKey, network: Network, compressed: bool) -> String {
    let mut wif = Vec::with_capacity(COMPRESSED_WIF_BYTES);
    wif.push(network.wif_prefix());
    wif.extend_from_slice(&secret_key[..]);
    if compressed {
        wif.push(COMPRESSED_FLAG);
    }
    base58check(&wif)
}

fn wrong_length(actual: usize) -> Error {
    debug!("WIF decoded to {} bytes", actual);
    Error::InvalidWif(format!(
        "expected {} (uncompressed) or {} (compressed) bytes, got {}",
        UNCOMPRESSED_WIF_BYTES, COMPRESSED_WIF_BYTES, actual
    ))
}

pub fn decode_wif(wif: &str) -> Result<Wif> {
    let decoded = decode_bounded(wif.trim(), COMPRESSED_WIF_BYTES).map_err(|e| match e {
        Error::InvalidLength { actual, .. } => wrong_length(actual),
        e => e,
    })?;
    let compressed = match decoded.len() {
        UNCOMPRESSED_WIF_BYTES => false,
        COMPRESSED_WIF_BYTES => true,
        actual => return Err(wrong_length(actual)),
    };
    let payload = verify_checksum(&decoded)?;
    let network = Network::from_wif_prefix(payload[0])?;
    if compressed && payload[1 + SECRET_KEY_LEN] != COMPRESSED_FLAG {
        return Err(Error::InvalidWif(format!(
            "compression flag must be 0x01, got 0x{:02x}",
            payload[1 + SECRET_KEY_LEN]
        )));
    }
    let secret_key = SecretKey::from_slice(&payload[1..1 + SECRET_KEY_LEN])?;
    Ok(Wif {
        network,
        compressed,
        secret_key,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one() -> SecretKey {
        let mut bytes = [0u8; 32];
        bytes[31] = 1;
        SecretKey::from_slice(&bytes).unwrap()
    }

    #[test]
    fn encodes_secret_key_one() {
        assert_eq!(
            encode_to_wif(&one(), Network::Mainnet, false),
            "5HpHagT65TZzG1PH3CSu63k8DbpvD8s5ip4nEB3kEsreAnchuDf"
        );
        assert_eq!(
            encode_to_wif(&one(), Network::Mainnet, true),
            "KwDiBf89QgGbjEhKnhXJuH7LrciVrZi3qYjgd9M7rFU73sVHnoWn"
        );
        assert_eq!(
            encode_to_wif(&one(), Network::Testnet, true),
            "cMahea7zqjxrtgAbB7LSGbcQUr1uX1ojuat9jZodMN87JcbXMTcA"
        );
    }

    #[test]
    fn decodes_and_derives_address() {
        let wif = decode_wif("KwDiBf89QgGbjEhKnhXJuH7LrciVrZi3qYjgd9M7rFU73sVHnoWn").unwrap();
        assert_eq!(wif.network, Network::Mainnet);
        assert!(wif.compressed);
        assert_eq!(wif.secret_key, one());
        assert_eq!(wif.address().to_string(), "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH");

        let wif: Wif = "5HpHagT65TZzG1PH3CSu63k8DbpvD8s5ip4nEB3kEsreAnchuDf"
            .parse()
            .unwrap();
        assert!(!wif.compressed);
        assert_eq!(wif.address().to_string(), "1EHNa6Q4Jz2uvNExL497mE43ikXhwF6kZm");
        assert_eq!(
            wif.to_string(),
            "5HpHagT65TZzG1PH3CSu63k8DbpvD8s5ip4nEB3kEsreAnchuDf"
        );

        let wif = decode_wif("cMahea7zqjxrtgAbB7LSGbcQUr1uX1ojuat9jZodMN87JcbXMTcA").unwrap();
        assert_eq!(wif.network, Network::Testnet);
        assert_eq!(wif.address().to_string(), "mrCDrCybB6J1vRfbwM5hemdJz73FwDBC8r");
    }

    #[test]
    fn rejects_address_as_wif() {
        match decode_wif("1EhqbyUMvvs7BfL8goY6qcPbD6YKfPqb7e") {
            Err(Error::InvalidWif(reason)) => {
                assert!(reason.contains("37"));
                assert!(reason.contains("38"));
                assert!(reason.ends_with("got 25"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn rejects_oversized_wif_quickly() {
        let long = "K".repeat(100_000);
        assert!(matches!(decode_wif(&long), Err(Error::InvalidWif(_))));
    }

    #[test]
    fn rejects_unknown_prefix() {
        let mut payload = vec![0x00];
        payload.extend_from_slice(&[0x01; 32]);
        let wif = base58check(&payload);
        assert!(matches!(decode_wif(&wif), Err(Error::UnknownVersion(0x00))));
    }

    #[test]
    fn rejects_bad_compression_flag() {
        let mut payload = vec![0x80];
        payload.extend_from_slice(&[0x01; 32]);
        payload.push(0x02);
        let wif = base58check(&payload);
        assert!(matches!(decode_wif(&wif), Err(Error::InvalidWif(_))));
    }

    #[test]
    fn rejects_out_of_range_scalar() {
        let mut payload = vec![0x80];
        payload.extend_from_slice(&[0x00; 32]);
        let wif = base58check(&payload);
        assert!(matches!(decode_wif(&wif), Err(Error::Secp256k1(_))));
    }

    #[test]
    fn rejects_corrupted_checksum() {
        assert!(matches!(
            decode_wif("KwDiBf89QgGbjEhKnhXJuH7LrciVrZi3qYjgd9M7rFU73sVHnoWm"),
            Err(Error::ChecksumMismatch { .. })
        ));
    }
}
