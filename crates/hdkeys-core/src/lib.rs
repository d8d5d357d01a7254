// hdkeys-core — hierarchical deterministic key derivation and multi-coin
// address encoding
//
// Implements BIP-32 (extended-key tree), BIP-39 (mnemonic/seed), and the
// BIP-44/49/84 purpose wrappers over a fixed set of UTXO and account-model
// coins. Pure computational core: no I/O beyond an optional RNG for mnemonic
// entropy, no persistent storage, no transaction construction or signing —
// callers own the private keys this crate derives and decide what to do
// with them.
//
// Modules:
//   hash      — SHA-256, RIPEMD-160, Hash160, HMAC-SHA-512, Keccak-256, PBKDF2
//   ec        — secp256k1 scalar/point arithmetic
//   codec     — Base58/Base58Check and Bech32
//   mnemonic  — BIP-39 entropy <-> mnemonic <-> seed
//   bip32     — extended-key tree, CKDpriv/CKDpub, serialization, path parsing
//   coins     — per-coin version-byte and address-family registry
//   address   — P2PKH / P2SH-P2WPKH / P2WPKH / Ethereum / Ripple encoders
//   purpose   — BIP-44/49/84 generic wrapper engine
//   error     — crate-wide error type

pub mod address;
pub mod bip32;
pub mod codec;
pub mod coins;
pub mod ec;
pub mod error;
pub mod hash;
pub mod mnemonic;
pub mod purpose;

pub use error::{Error, Result};

/// `Bip32::from_seed` / `from_extended` / `derive_path` / `child_key` —
/// thin, discoverable entry points over [`bip32::ExtendedKey`].
pub struct Bip32;

impl Bip32 {
    pub fn from_seed(seed: &[u8]) -> Result<bip32::ExtendedKey> {
        bip32::ExtendedKey::from_seed(seed)
    }

    pub fn from_extended(s: &str, versions: bip32::Versions) -> Result<bip32::ExtendedKey> {
        bip32::ExtendedKey::from_base58(s, versions)
    }

    pub fn derive_path(key: &bip32::ExtendedKey, path: &str) -> Result<bip32::ExtendedKey> {
        key.derive_path_str(path)
    }

    pub fn child_key(key: &bip32::ExtendedKey, index: u32) -> Result<bip32::ExtendedKey> {
        key.derive_child(index)
    }
}

/// `Bip39::generate` / `validate` / `to_seed` over [`mnemonic`].
pub struct Bip39;

impl Bip39 {
    pub fn generate(word_count: mnemonic::WordCount) -> bip39::Mnemonic {
        mnemonic::generate(word_count)
    }

    pub fn validate(phrase: &str) -> Result<bip39::Mnemonic> {
        mnemonic::validate(phrase, bip39::Language::English)
    }

    pub fn to_seed(m: &bip39::Mnemonic, passphrase: &str) -> [u8; 64] {
        mnemonic::to_seed(m, passphrase)
    }
}

pub use purpose::{Bip44, Bip49, Bip84};

/// `Base58::{encode,decode,check_encode,check_decode}` over [`codec::base58`].
pub struct Base58;

impl Base58 {
    pub fn encode(bytes: &[u8]) -> String {
        codec::base58::encode(bytes, codec::base58::Alphabet::Bitcoin)
    }

    pub fn decode(s: &str) -> Result<Vec<u8>> {
        codec::base58::decode(s, codec::base58::Alphabet::Bitcoin)
    }

    pub fn check_encode(payload: &[u8]) -> String {
        codec::base58::check_encode(payload, codec::base58::Alphabet::Bitcoin)
    }

    pub fn check_decode(s: &str) -> Result<Vec<u8>> {
        codec::base58::check_decode(s, codec::base58::Alphabet::Bitcoin)
    }
}

/// `Bech32::{encode,decode}` over [`codec::bech32`].
pub struct Bech32;

impl Bech32 {
    pub fn encode(hrp: &str, program: &[u8]) -> Result<String> {
        codec::bech32::encode_v0(hrp, program)
    }

    pub fn decode(address: &str) -> Result<(String, u8, Vec<u8>)> {
        codec::bech32::decode(address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bip32_entry_point_matches_test_vector_1() {
        let seed = hex::decode("000102030405060708090a0b0c0d0e0f").unwrap();
        let master = Bip32::from_seed(&seed).unwrap();
        assert_eq!(
            master.to_public().to_base58(),
            "xpub661MyMwAqRbcFtXgS5sYJABqqG9YLmC4Q1Rdap9gSE8NqtwybGhePY2gZ29ESFjqJoCu1Rupje8YtGqsefD265TMg7usUDFdp6W1EGMcet8"
        );
    }

    #[test]
    fn bip39_entry_point_generates_valid_mnemonic() {
        let m = Bip39::generate(mnemonic::WordCount::W12);
        assert!(Bip39::validate(&m.to_string()).is_ok());
    }

    #[test]
    fn base58_entry_point_matches_s3_vector() {
        let payload = [0u8; 10];
        assert_eq!(Base58::encode(&payload), "1111111111");
    }

    #[test]
    fn bip44_entry_point_produces_bitcoin_address() {
        let seed = hex::decode("000102030405060708090a0b0c0d0e0f").unwrap();
        let wallet = Bip44::from_seed(&seed, coins::BITCOIN).unwrap();
        let leaf = wallet
            .purpose()
            .unwrap()
            .coin()
            .unwrap()
            .account(0)
            .unwrap()
            .change(0)
            .unwrap()
            .address_index(0)
            .unwrap();
        assert!(leaf.address().unwrap().starts_with('1'));
    }
}
