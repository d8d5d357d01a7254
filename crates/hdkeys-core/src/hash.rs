// hash: the primitive digests the rest of the crate is built from
//
// Functions:
//   sha256, double_sha256, ripemd160, hash160, hmac_sha512, keccak256, pbkdf2_hmac_sha512

use hmac::{Hmac, Mac};
use pbkdf2::pbkdf2_hmac;
use ripemd::Ripemd160;
use sha2::{Digest, Sha256, Sha512};
use tiny_keccak::{Hasher, Keccak};

type HmacSha512 = Hmac<Sha512>;

pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

pub fn double_sha256(data: &[u8]) -> [u8; 32] {
    sha256(&sha256(data))
}

pub fn ripemd160(data: &[u8]) -> [u8; 20] {
    Ripemd160::digest(data).into()
}

/// RIPEMD160(SHA256(data)) — the address-hashing primitive used throughout Bitcoin-family coins.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    ripemd160(&sha256(data))
}

/// HMAC-SHA512(key, msg). Used for BIP-32 master/child key derivation.
pub fn hmac_sha512(key: &[u8], msg: &[u8]) -> [u8; 64] {
    let mut mac = HmacSha512::new_from_slice(key).expect("HMAC accepts keys of any length");
    mac.update(msg);
    mac.finalize().into_bytes().into()
}

pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    let mut out = [0u8; 32];
    hasher.update(data);
    hasher.finalize(&mut out);
    out
}

/// PBKDF2-HMAC-SHA512, used by BIP-39 mnemonic-to-seed stretching.
pub fn pbkdf2_hmac_sha512(password: &[u8], salt: &[u8], iterations: u32, dklen: usize) -> Vec<u8> {
    let mut out = vec![0u8; dklen];
    pbkdf2_hmac::<Sha512>(password, salt, iterations, &mut out);
    out
}
