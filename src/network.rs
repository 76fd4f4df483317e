use std::fmt;
use std::str::FromStr;

use crate::errors::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Network {
    Mainnet,
    Testnet,
    Regtest,
}

impl Network {
    /// Version byte of P2PKH addresses.
    pub fn p2pkh_prefix(&self) -> u8 {
        match self {
            Network::Mainnet => 0x00,
            Network::Testnet | Network::Regtest => 0x6F,
        }
    }

    /// Version byte of WIF-encoded private keys.
    pub fn wif_prefix(&self) -> u8 {
        match self {
            Network::Mainnet => 0x80,
            Network::Testnet | Network::Regtest => 0xEF,
        }
    }

    // regtest shares testnet's prefixes, so a prefix alone never yields it
    pub fn from_wif_prefix(prefix: u8) -> Result<Network> {
        match prefix {
            0x80 => Ok(Network::Mainnet),
            0xEF => Ok(Network::Testnet),
            other => Err(Error::UnknownVersion(other)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
            Network::Regtest => "regtest",
        }
    }
}

impl Default for Network {
    fn default() -> Self {
        Network::Mainnet
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Network {
    type Err = Error;

    fn from_str(s: &str) -> Result<Network> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Network::Mainnet),
            "testnet" => Ok(Network::Testnet),
            "regtest" => Ok(Network::Regtest),
            _ => Err(Error::UnknownNetwork(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names() {
        assert_eq!("mainnet".parse::<Network>().unwrap(), Network::Mainnet);
        assert_eq!("Testnet".parse::<Network>().unwrap(), Network::Testnet);
        assert_eq!("regtest".parse::<Network>().unwrap(), Network::Regtest);
        assert!(matches!(
            "venusnet".parse::<Network>(),
            Err(Error::UnknownNetwork(ref name)) if name == "venusnet"
        ));
    }

    #[test]
    fn prefixes() {
        assert_eq!(Network::Mainnet.p2pkh_prefix(), 0x00);
        assert_eq!(Network::Regtest.p2pkh_prefix(), 0x6F);
        assert_eq!(Network::Mainnet.wif_prefix(), 0x80);
        assert_eq!(Network::from_wif_prefix(0xEF).unwrap(), Network::Testnet);
        assert!(matches!(
            Network::from_wif_prefix(0x00),
            Err(Error::UnknownVersion(0x00))
        ));
    }
}
