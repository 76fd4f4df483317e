use std::io::{self, Read};
use std::process;

use log::debug;

use base58addr::address::{self, Address};
use base58addr::config::{Command, Config};
use base58addr::errors::{Error, Result};
use base58addr::key::decode_wif;
use base58addr::script;

fn read_stdin() -> Result<String> {
    let mut text = String::new();
    io::stdin().read_to_string(&mut text)?;
    Ok(text)
}

fn run(config: &Config) -> Result<String> {
    match &config.command {
        Command::Encode { version, hash160 } => {
            let hash = hex::decode(hash160)?;
            let version = version.unwrap_or_else(|| config.network.p2pkh_prefix());
            address::encode(version, &hash)
        }
        Command::Decode { address: text } => {
            let (version, hash) = address::decode(text)?;
            Ok(format!("version={:02x} hash160={}", version, hex::encode(hash)))
        }
        Command::Script { script: source } => {
            let text = match source {
                Some(text) => text.clone(),
                None => read_stdin()?,
            };
            let hash = script::parse(&text)?;
            Ok(Address::p2pkh(hash, config.network).to_string())
        }
        Command::Wif { wif } => {
            let wif = decode_wif(wif)?;
            Ok(format!(
                "network={} compressed={} address={}",
                wif.network,
                wif.compressed,
                wif.address()
            ))
        }
    }
}

fn exit_code(err: &Error) -> i32 {
    match err {
        Error::InvalidCharacter { .. } => 2,
        Error::InvalidLength { .. } => 3,
        Error::ChecksumMismatch { .. } => 4,
        _ => 1,
    }
}

fn main() {
    let config = Config::from_args();
    config.init_logging();
    debug!("{:?}", config);

    match run(&config) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(exit_code(&e));
        }
    }
}
