pub mod address;
pub mod base58;
pub mod config;
pub mod encode;
pub mod errors;
pub mod hash;
pub mod key;
pub mod network;
pub mod script;
