use log::{debug, trace};

use crate::base58;
use crate::errors::{Error, Result};
use crate::hash::{checksum, Checksum};

pub const CHECKSUM_LEN: usize = 4;

pub fn base58check(input: &[u8]) -> String {
    let mut buf = Vec::with_capacity(input.len() + CHECKSUM_LEN);
    buf.extend_from_slice(input);
    let sum = checksum(input);
    trace!("checksum {}", hex::encode(sum));
    buf.extend_from_slice(&sum);
    base58::encode(&buf)
}

/// Base58-decodes `input`, refusing up front any input that cannot fit in
/// `max_len` bytes so oversized strings never reach the quadratic decoder.
pub fn decode_bounded(input: &str, max_len: usize) -> Result<Vec<u8>> {
    base58::validate(input)?;
    let min_len = base58::min_decoded_len(input);
    if min_len > max_len {
        debug!(
            "rejecting {} characters: decodes to at least {} bytes, limit {}",
            input.chars().count(),
            min_len,
            max_len
        );
        return Err(Error::InvalidLength {
            expected: max_len,
            actual: min_len,
        });
    }
    base58::decode(input)
}

/// Decodes `input` and checks that the buffer, checksum included, is exactly
/// `expected_len` bytes. Returns the payload with the checksum stripped.
pub fn decode_base58check(input: &str, expected_len: usize) -> Result<Vec<u8>> {
    let decoded = decode_bounded(input, expected_len)?;
    if decoded.len() != expected_len {
        debug!(
            "rejecting {:?}: decoded to {} bytes, wanted {}",
            input,
            decoded.len(),
            expected_len
        );
        return Err(Error::InvalidLength {
            expected: expected_len,
            actual: decoded.len(),
        });
    }
    verify_checksum(&decoded).map(|payload| payload.to_vec())
}

/// Splits `buf` into payload and trailing checksum and verifies the latter.
pub fn verify_checksum(buf: &[u8]) -> Result<&[u8]> {
    if buf.len() < CHECKSUM_LEN {
        return Err(Error::InvalidLength {
            expected: CHECKSUM_LEN,
            actual: buf.len(),
        });
    }
    let (payload, tail) = buf.split_at(buf.len() - CHECKSUM_LEN);
    let expected = checksum(payload);
    let mut actual: Checksum = [0u8; CHECKSUM_LEN];
    actual.copy_from_slice(tail);
    if expected != actual {
        debug!(
            "checksum mismatch: computed {}, found {}",
            hex::encode(expected),
            hex::encode(actual)
        );
        return Err(Error::ChecksumMismatch { expected, actual });
    }
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_payload_with_checksum() {
        let payload = hex::decode("000659a10acba837f71af2129690947e417b9cdca1").unwrap();
        let encoded = base58check(&payload);
        assert_eq!(encoded, "1aaRguU1ufUKBZUvRu7SDk3mCSvELV1xa");

        let raw = base58::decode(&encoded).unwrap();
        assert_eq!(hex::encode(&raw[21..]), "90404f07");
    }

    #[test]
    fn decode_checks_expected_length() {
        let encoded = base58check(&[0x80; 10]);
        assert_eq!(decode_base58check(&encoded, 14).unwrap(), vec![0x80; 10]);
        match decode_base58check(&encoded, 25) {
            Err(Error::InvalidLength { expected, actual }) => {
                assert_eq!(expected, 25);
                assert_eq!(actual, 14);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn oversized_input_fails_before_decoding() {
        let long = "z".repeat(100_000);
        match decode_base58check(&long, 25) {
            Err(Error::InvalidLength { expected, actual }) => {
                assert_eq!(expected, 25);
                assert!(actual > 25);
            }
            other => panic!("unexpected {:?}", other),
        }

        // alphabet errors still win over length
        let mut bad = "z".repeat(100_000);
        bad.push('0');
        assert!(matches!(
            decode_base58check(&bad, 25),
            Err(Error::InvalidCharacter { character: '0', position: 100_000 })
        ));
    }

    #[test]
    fn verify_rejects_short_buffers() {
        assert!(matches!(
            verify_checksum(&[1, 2, 3]),
            Err(Error::InvalidLength { expected: 4, actual: 3 })
        ));
    }

    #[test]
    fn verify_reports_both_checksums() {
        let mut buf = vec![0u8; 21];
        buf.extend_from_slice(&[0xde, 0xad, 0xbe, 0xef]);
        match verify_checksum(&buf) {
            Err(Error::ChecksumMismatch { expected, actual }) => {
                assert_eq!(hex::encode(expected), "94a00911");
                assert_eq!(actual, [0xde, 0xad, 0xbe, 0xef]);
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
