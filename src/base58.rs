//! Base58 over arbitrary byte strings, Bitcoin alphabet.
//!
//! Leading zero bytes map one-to-one onto leading `'1'` characters; the
//! remaining bytes are treated as a big-endian integer and written in base 58.

use log::debug;

use crate::errors::{Error, Result};

pub const ALPHABET: &[u8; 58] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

const INVALID: u8 = 0xFF;

const DECODE_MAP: [u8; 128] = {
    let mut map = [INVALID; 128];
    let mut i = 0;
    while i < 58 {
        map[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    map
};

fn digit(c: char) -> Option<u8> {
    if !c.is_ascii() {
        return None;
    }
    match DECODE_MAP[c as usize] {
        INVALID => None,
        d => Some(d),
    }
}

pub fn encode(input: &[u8]) -> String {
    let zeros = input.iter().take_while(|&&b| b == 0).count();

    // little-endian base58 digits of the non-zero tail
    let mut digits: Vec<u8> = Vec::with_capacity(input.len() * 138 / 100 + 1);
    for &byte in &input[zeros..] {
        let mut carry = byte as u32;
        for d in digits.iter_mut() {
            carry += (*d as u32) << 8;
            *d = (carry % 58) as u8;
            carry /= 58;
        }
        while carry > 0 {
            digits.push((carry % 58) as u8);
            carry /= 58;
        }
    }

    let mut out = String::with_capacity(zeros + digits.len());
    for _ in 0..zeros {
        out.push(ALPHABET[0] as char);
    }
    for &d in digits.iter().rev() {
        out.push(ALPHABET[d as usize] as char);
    }
    out
}

fn invalid_character(input: &str, position: usize, character: char) -> Error {
    debug!("rejecting {:?}: bad character at {}", input, position);
    Error::InvalidCharacter {
        character,
        position,
    }
}

/// Checks every character against the alphabet without decoding.
pub fn validate(input: &str) -> Result<()> {
    match input.chars().enumerate().find(|&(_, c)| digit(c).is_none()) {
        Some((position, character)) => Err(invalid_character(input, position, character)),
        None => Ok(()),
    }
}

/// Lower bound on the length `decode(input)` produces, computed in linear
/// time. Assumes `input` is within the alphabet.
pub fn min_decoded_len(input: &str) -> usize {
    let zeros = input.chars().take_while(|&c| c == ALPHABET[0] as char).count();
    let rest = input.chars().count() - zeros;
    if rest == 0 {
        return zeros;
    }
    // the leading digit is non-zero, so the value is at least 58^(rest - 1);
    // 5.85 bits per digit stays under log2(58)
    zeros + (rest - 1) * 585 / 800 + 1
}

pub fn decode(input: &str) -> Result<Vec<u8>> {
    let zeros = input.chars().take_while(|&c| c == ALPHABET[0] as char).count();

    // little-endian bytes of the integer value
    let mut bytes: Vec<u8> = Vec::with_capacity(input.len() * 733 / 1000 + 1);
    for (position, character) in input.chars().enumerate() {
        let d = match digit(character) {
            Some(d) => d,
            None => return Err(invalid_character(input, position, character)),
        };
        let mut carry = d as u32;
        for b in bytes.iter_mut() {
            carry += (*b as u32) * 58;
            *b = (carry & 0xFF) as u8;
            carry >>= 8;
        }
        while carry > 0 {
            bytes.push((carry & 0xFF) as u8);
            carry >>= 8;
        }
    }

    let mut out = vec![0u8; zeros];
    out.extend(bytes.iter().rev());
    Ok(out)
}
