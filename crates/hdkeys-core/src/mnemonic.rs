// mnemonic: BIP-39 entropy <-> mnemonic <-> seed pipeline
//
// Wraps the `bip39` crate, which already implements the wordlist, the
// ENT/CS/checksum bit-packing, and NFKD-normalized PBKDF2-HMAC-SHA512 seed
// stretching bit-for-bit. English is mandatory; other bip39-crate-supported
// languages are exposed but optional.

use bip39::{Language, Mnemonic};
use rand::RngCore;

use crate::error::{Error, Result};

/// Word count for a generated mnemonic. `ENT = (words * 11) - (words * 11) / 33`
/// reduces to the standard 128/160/192/224/256-bit entropy sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordCount {
    W12 = 12,
    W15 = 15,
    W18 = 18,
    W21 = 21,
    W24 = 24,
}

impl WordCount {
    fn entropy_bytes(self) -> usize {
        match self {
            WordCount::W12 => 16,
            WordCount::W15 => 20,
            WordCount::W18 => 24,
            WordCount::W21 => 28,
            WordCount::W24 => 32,
        }
    }
}

/// Fill a buffer with cryptographically secure entropy, sized for `count`.
/// Callers who already have their own entropy source should skip this and
/// call [`from_entropy`] directly.
pub fn generate_entropy(count: WordCount) -> Vec<u8> {
    let mut bytes = vec![0u8; count.entropy_bytes()];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Entropy -> mnemonic. `entropy.len()` must be one of 16/20/24/28/32 bytes
/// (128/160/192/224/256 bits).
pub fn from_entropy(entropy: &[u8], language: Language) -> Result<Mnemonic> {
    Mnemonic::from_entropy_in(language, entropy)
        .map_err(|e| Error::InvalidMnemonic(format!("invalid entropy: {e}")))
}

/// Generate a new random mnemonic of the requested length in English.
pub fn generate(word_count: WordCount) -> Mnemonic {
    let entropy = generate_entropy(word_count);
    from_entropy(&entropy, Language::English).expect("generated entropy is always valid length")
}

/// Mnemonic -> entropy (validation). Recomputes and checks the embedded
/// checksum; unknown words or a bad word count both fail.
pub fn validate(phrase: &str, language: Language) -> Result<Mnemonic> {
    Mnemonic::parse_in(language, phrase)
        .map_err(|e| Error::InvalidMnemonic(format!("{e}")))
}

/// Convenience: `validate` against English, discarding the parsed mnemonic.
pub fn is_valid(phrase: &str) -> bool {
    Mnemonic::parse_in(Language::English, phrase).is_ok()
}

/// Mnemonic + passphrase -> 64-byte seed via PBKDF2-HMAC-SHA512, 2048 rounds,
/// NFKD-normalized on both sides.
pub fn to_seed(mnemonic: &Mnemonic, passphrase: &str) -> [u8; 64] {
    mnemonic.to_seed(passphrase)
}
