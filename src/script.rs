//! The P2PKH locking script,
//! `OP_DUP OP_HASH160 <20 bytes> OP_EQUALVERIFY OP_CHECKSIG`, in raw and
//! assembly form.

use log::debug;

use crate::address::HASH160_LEN;
use crate::errors::{Error, Result};
use crate::hash::Hash160;

pub const P2PKH_LEN: usize = 25;

// pushes the next 20 bytes
const PUSH_20: u8 = 0x14;

// OP_DUP OP_HASH160 <hash> OP_EQUALVERIFY OP_CHECKSIG
const P2PKH_ELEMENTS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    Dup,
    Hash160,
    EqualVerify,
    Checksig,
}

const OPCODES: [Opcode; 4] = [
    Opcode::Dup,
    Opcode::Hash160,
    Opcode::EqualVerify,
    Opcode::Checksig,
];

impl Opcode {
    pub fn value(&self) -> u8 {
        match self {
            Opcode::Dup => 0x76,
            Opcode::Hash160 => 0xA9,
            Opcode::EqualVerify => 0x88,
            Opcode::Checksig => 0xAC,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Opcode::Dup => "OP_DUP",
            Opcode::Hash160 => "OP_HASH160",
            Opcode::EqualVerify => "OP_EQUALVERIFY",
            Opcode::Checksig => "OP_CHECKSIG",
        }
    }

    // name without separators, the form assembly tokens are compared in
    fn bare_name(&self) -> String {
        normalize(self.name())
    }

    fn from_bare_name(bare: &str) -> Option<Opcode> {
        OPCODES.iter().copied().find(|op| op.bare_name() == bare)
    }

    fn is_partial_name(bare: &str) -> bool {
        OPCODES.iter().any(|op| {
            let name = op.bare_name();
            name.len() > bare.len() && name.starts_with(bare)
        })
    }
}

pub fn p2pkh(hash: &Hash160) -> Vec<u8> {
    let mut script = Vec::with_capacity(P2PKH_LEN);
    script.push(Opcode::Dup.value());
    script.push(Opcode::Hash160.value());
    script.push(PUSH_20);
    script.extend_from_slice(hash);
    script.push(Opcode::EqualVerify.value());
    script.push(Opcode::Checksig.value());
    script
}

pub fn hash160_from_bytes(script: &[u8]) -> Result<Hash160> {
    if script.len() != P2PKH_LEN {
        return Err(Error::InvalidScript(format!(
            "P2PKH script is {} bytes, got {}",
            P2PKH_LEN,
            script.len()
        )));
    }
    if script[0] != Opcode::Dup.value() || script[1] != Opcode::Hash160.value() {
        return Err(Error::InvalidScript(
            "script must start with OP_DUP OP_HASH160".to_string(),
        ));
    }
    if script[2] != PUSH_20 {
        return Err(Error::InvalidScript(format!(
            "expected a 20-byte push, got 0x{:02x}",
            script[2]
        )));
    }
    if script[23] != Opcode::EqualVerify.value() || script[24] != Opcode::Checksig.value() {
        return Err(Error::InvalidScript(
            "script must end with OP_EQUALVERIFY OP_CHECKSIG".to_string(),
        ));
    }
    let mut hash = [0u8; HASH160_LEN];
    hash.copy_from_slice(&script[3..23]);
    Ok(hash)
}

#[derive(Debug, PartialEq)]
enum Token {
    Op(Opcode),
    Data(Vec<u8>),
}

fn normalize(word: &str) -> String {
    word.chars()
        .filter(|&c| c != '_' && c != '-')
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

fn is_hex(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_ascii_hexdigit())
}

// listings pasted from JSON or logs carry escaped whitespace
fn expand_escapes(text: &str) -> String {
    text.replace("\\n", "\n")
        .replace("\\r", "\r")
        .replace("\\t", "\t")
}

fn strip_comments(text: &str) -> String {
    expand_escapes(text)
        .lines()
        .filter_map(|line| line.split('#').next())
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn flush_data(pending: &mut String, tokens: &mut Vec<Token>) -> Result<()> {
    if pending.is_empty() {
        return Ok(());
    }
    let data = hex::decode(pending.as_str())
        .map_err(|e| Error::InvalidScript(format!("bad push data {}: {}", pending, e)))?;
    tokens.push(Token::Data(data));
    pending.clear();
    Ok(())
}

fn tokenize(asm: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut partial_op = String::new();
    let mut pending_hex = String::new();

    for word in strip_comments(asm).split_whitespace() {
        let bare = normalize(word);
        if bare.is_empty() {
            continue;
        }
        let candidate = format!("{}{}", partial_op, bare);
        let body_done = tokens.len() == P2PKH_ELEMENTS;

        if let Some(op) = Opcode::from_bare_name(&candidate) {
            if body_done {
                return Err(Error::InvalidScript(format!(
                    "unexpected {} after OP_CHECKSIG",
                    op.name()
                )));
            }
            flush_data(&mut pending_hex, &mut tokens)?;
            tokens.push(Token::Op(op));
            partial_op.clear();
            continue;
        }
        if Opcode::is_partial_name(&candidate) {
            partial_op = candidate;
            continue;
        }
        if !partial_op.is_empty() {
            return Err(Error::InvalidScript(format!(
                "unrecognized opcode sequence {}",
                candidate
            )));
        }

        if body_done {
            if is_hex(word) && word.len() == 2 * HASH160_LEN {
                return Err(Error::InvalidScript(format!(
                    "unexpected pubkey hash {} after OP_CHECKSIG",
                    word
                )));
            }
            // trailing sections such as a witness
            debug!("ignoring {:?}", word);
        } else if is_hex(word) {
            pending_hex.push_str(word);
        } else if tokens.is_empty() && pending_hex.is_empty() {
            // labels ahead of the script body
            debug!("skipping {:?}", word);
        } else {
            return Err(Error::InvalidScript(format!("unexpected token {}", word)));
        }
    }

    if !partial_op.is_empty() {
        return Err(Error::InvalidScript(format!(
            "dangling opcode fragment {}",
            partial_op
        )));
    }
    flush_data(&mut pending_hex, &mut tokens)?;
    Ok(tokens)
}

pub fn hash160_from_asm(asm: &str) -> Result<Hash160> {
    match tokenize(asm)?.as_slice() {
        [Token::Op(Opcode::Dup), Token::Op(Opcode::Hash160), Token::Data(data), Token::Op(Opcode::EqualVerify), Token::Op(Opcode::Checksig)] =>
        {
            if data.len() != HASH160_LEN {
                return Err(Error::InvalidScript(format!(
                    "pubkey hash is {} bytes, got {}",
                    HASH160_LEN,
                    data.len()
                )));
            }
            let mut hash = [0u8; HASH160_LEN];
            hash.copy_from_slice(data);
            Ok(hash)
        }
        _ => Err(Error::InvalidScript(
            "expected OP_DUP OP_HASH160 <20 bytes> OP_EQUALVERIFY OP_CHECKSIG".to_string(),
        )),
    }
}

/// Accepts either a hex-encoded script or its assembly listing.
pub fn parse(script: &str) -> Result<Hash160> {
    let compact: String = strip_comments(script)
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if is_hex(&compact) && compact.len() % 2 == 0 {
        hash160_from_bytes(&hex::decode(&compact)?)
    } else {
        hash160_from_asm(script)
    }
}
