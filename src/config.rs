use std::ffi::OsString;

use clap::{value_t, App, AppSettings, Arg, ArgMatches, ErrorKind, SubCommand};

use crate::errors::{Error, Result};
use crate::network::Network;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Encode {
        version: Option<u8>,
        hash160: String,
    },
    Decode {
        address: String,
    },
    /// `None` reads the script from standard input.
    Script {
        script: Option<String>,
    },
    Wif {
        wif: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub network: Network,
    pub verbosity: usize,
    pub command: Command,
}

/// Parses a single byte written as one or two hex digits, with an optional `0x`.
pub fn parse_version_byte(s: &str) -> Result<u8> {
    let digits = s.trim_start_matches("0x").trim_start_matches("0X");
    let bytes = if digits.len() == 1 {
        hex::decode(format!("0{}", digits))?
    } else {
        hex::decode(digits)?
    };
    if bytes.len() != 1 {
        return Err(Error::InvalidLength {
            expected: 1,
            actual: bytes.len(),
        });
    }
    Ok(bytes[0])
}

fn app<'a, 'b>() -> App<'a, 'b> {
    App::new("base58addr")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Base58Check codec for legacy P2PKH addresses")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .setting(AppSettings::VersionlessSubcommands)
        .arg(
            Arg::with_name("verbosity")
                .short("v")
                .multiple(true)
                .help("Increase logging verbosity"),
        )
        .arg(
            Arg::with_name("network")
                .long("network")
                .help("Network whose version bytes to use")
                .takes_value(true)
                .possible_values(&["mainnet", "testnet", "regtest"])
                .env("BASE58ADDR_NETWORK")
                .default_value("mainnet"),
        )
        .subcommand(
            SubCommand::with_name("encode")
                .about("Encode a version byte and HASH160 as an address")
                .arg(
                    Arg::with_name("version")
                        .long("version")
                        .help("Version byte in hex (defaults to the network's P2PKH prefix)")
                        .takes_value(true)
                        .validator(|v| parse_version_byte(&v).map(|_| ()).map_err(|e| e.to_string())),
                )
                .arg(
                    Arg::with_name("hash160")
                        .long("hash160")
                        .help("20-byte public key hash as 40 hex characters")
                        .takes_value(true)
                        .required(true),
                ),
        )
        .subcommand(
            SubCommand::with_name("decode")
                .about("Decode an address into its version byte and HASH160")
                .arg(
                    Arg::with_name("address")
                        .long("address")
                        .takes_value(true)
                        .required(true),
                ),
        )
        .subcommand(
            SubCommand::with_name("script")
                .about("Derive the address locked by a P2PKH script (hex or assembly)")
                .arg(Arg::with_name("SCRIPT").help("Script text; read from stdin when omitted")),
        )
        .subcommand(
            SubCommand::with_name("wif")
                .about("Validate a WIF private key and print its address")
                .arg(Arg::with_name("WIF").required(true)),
        )
}

fn command_from_matches(m: &ArgMatches) -> clap::Result<Command> {
    match m.subcommand() {
        ("encode", Some(sub)) => {
            let version = match sub.value_of("version") {
                Some(v) => Some(parse_version_byte(v).map_err(|e| {
                    clap::Error::with_description(&e.to_string(), ErrorKind::InvalidValue)
                })?),
                None => None,
            };
            Ok(Command::Encode {
                version,
                hash160: sub.value_of("hash160").unwrap_or_default().to_string(),
            })
        }
        ("decode", Some(sub)) => Ok(Command::Decode {
            address: sub.value_of("address").unwrap_or_default().to_string(),
        }),
        ("script", Some(sub)) => Ok(Command::Script {
            script: sub.value_of("SCRIPT").map(str::to_string),
        }),
        ("wif", Some(sub)) => Ok(Command::Wif {
            wif: sub.value_of("WIF").unwrap_or_default().to_string(),
        }),
        _ => Err(clap::Error::with_description(
            "a subcommand is required",
            ErrorKind::MissingSubcommand,
        )),
    }
}

impl Config {
    pub fn from_args() -> Config {
        Config::from_iter_safe(std::env::args_os()).unwrap_or_else(|e| e.exit())
    }

    pub fn from_iter_safe<I, T>(args: I) -> clap::Result<Config>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let m = app().get_matches_from_safe(args)?;
        Ok(Config {
            network: value_t!(m, "network", Network)?,
            verbosity: m.occurrences_of("verbosity") as usize,
            command: command_from_matches(&m)?,
        })
    }

    pub fn init_logging(&self) {
        let mut log = stderrlog::new();
        log.verbosity(self.verbosity);
        log.timestamp(stderrlog::Timestamp::Off);
        if let Err(e) = log.init() {
            eprintln!("logging initialization failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_version_bytes() {
        assert_eq!(parse_version_byte("00").unwrap(), 0x00);
        assert_eq!(parse_version_byte("0x6f").unwrap(), 0x6F);
        assert_eq!(parse_version_byte("FF").unwrap(), 0xFF);
        assert_eq!(parse_version_byte("0").unwrap(), 0x00);
        assert_eq!(parse_version_byte("f").unwrap(), 0x0F);
        assert_eq!(parse_version_byte("0x5").unwrap(), 0x05);
        assert!(parse_version_byte("").is_err());
        assert!(parse_version_byte("g").is_err());
        assert!(parse_version_byte("0100").is_err());
        assert!(parse_version_byte("zz").is_err());
    }

    #[test]
    fn encode_command() {
        let config = Config::from_iter_safe(vec![
            "base58addr",
            "-vv",
            "encode",
            "--version",
            "6f",
            "--hash160",
            "9652d86bedf43ad264362e6e6eba6eb764508127",
        ])
        .unwrap();
        assert_eq!(config.verbosity, 2);
        assert_eq!(
            config.command,
            Command::Encode {
                version: Some(0x6F),
                hash160: "9652d86bedf43ad264362e6e6eba6eb764508127".to_string(),
            }
        );
    }

    #[test]
    fn network_flag() {
        let config = Config::from_iter_safe(vec![
            "base58addr",
            "--network",
            "testnet",
            "wif",
            "cMahea7zqjxrtgAbB7LSGbcQUr1uX1ojuat9jZodMN87JcbXMTcA",
        ])
        .unwrap();
        assert_eq!(config.network, Network::Testnet);
        assert!(Config::from_iter_safe(vec!["base58addr", "--network", "venusnet", "script"]).is_err());
    }

    #[test]
    fn script_without_argument_reads_stdin() {
        let config = Config::from_iter_safe(vec!["base58addr", "script"]).unwrap();
        assert_eq!(config.command, Command::Script { script: None });
    }

    #[test]
    fn rejects_malformed_version() {
        assert!(Config::from_iter_safe(vec![
            "base58addr",
            "encode",
            "--version",
            "xyz",
            "--hash160",
            "00",
        ])
        .is_err());
    }

    #[test]
    fn decode_requires_address() {
        assert!(Config::from_iter_safe(vec!["base58addr", "decode"]).is_err());
    }
}
