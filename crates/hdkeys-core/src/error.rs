// error: crate-wide error type
//
// One variant per error kind. Cryptographic retry (BIP-32 "next index" rule) is
// handled internally by bip32.rs and never reaches this type.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid seed: {0}")]
    InvalidSeed(String),

    #[error("invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    #[error("invalid derivation path: {0}")]
    InvalidPath(String),

    #[error("depth error: expected depth {expected}, got {actual}")]
    DepthError { expected: u8, actual: u8 },

    #[error("cannot derive a hardened child from a public-only key")]
    HardenedFromPublic,

    #[error("derivation produced an invalid key (IL >= n or k == 0) after exhausting retries")]
    DerivationInvalid,

    #[error("invalid extended key: {0}")]
    InvalidExtendedKey(String),

    #[error("invalid encoding: {0}")]
    InvalidEncoding(String),

    #[error("coin not allowed for this purpose: {0}")]
    CoinNotAllowed(String),

    #[error("invalid key: {0}")]
    InvalidKey(String),
}
