// address: per-coin-family address string encoders
//
// Each coin descriptor carries an `AddressFamily` tag (coins.rs); `encode`
// dispatches on it instead of having one function per chain.

use crate::codec::base58::{self, Alphabet};
use crate::codec::bech32;
use crate::coins::{AddressFamily, CoinDescriptor};
use crate::error::{Error, Result};
use crate::hash::{hash160, keccak256};

/// Both public-key forms an address encoder might need: most coins hash the
/// compressed point, Ethereum hashes the uncompressed X||Y coordinates.
#[derive(Debug, Clone, Copy)]
pub struct PublicKeyBytes {
    pub compressed: [u8; 33],
    pub uncompressed_xy: [u8; 64],
}

/// Encode a public key as this coin's address string.
pub fn encode(pubkey: &PublicKeyBytes, coin: &CoinDescriptor) -> Result<String> {
    match coin.address_family {
        AddressFamily::P2pkh => p2pkh(&pubkey.compressed, coin),
        AddressFamily::P2shP2wpkh => p2sh_p2wpkh(&pubkey.compressed, coin),
        AddressFamily::P2wpkh => p2wpkh(&pubkey.compressed, coin),
        AddressFamily::Ethereum => ethereum(pubkey.uncompressed_xy),
        AddressFamily::Ripple => ripple(&pubkey.compressed),
    }
}

fn p2pkh(pubkey: &[u8; 33], coin: &CoinDescriptor) -> Result<String> {
    let version = coin
        .p2pkh_version
        .ok_or_else(|| Error::InvalidEncoding(format!("{} has no P2PKH version byte", coin.name)))?;
    let h = hash160(pubkey);
    let mut payload = Vec::with_capacity(21);
    payload.push(version);
    payload.extend_from_slice(&h);
    Ok(base58::check_encode(&payload, Alphabet::Bitcoin))
}

fn p2sh_p2wpkh(pubkey: &[u8; 33], coin: &CoinDescriptor) -> Result<String> {
    let version = coin
        .p2sh_version
        .ok_or_else(|| Error::InvalidEncoding(format!("{} has no P2SH version byte", coin.name)))?;
    let pubkey_hash = hash160(pubkey);
    let mut redeem = Vec::with_capacity(22);
    redeem.push(0x00);
    redeem.push(0x14);
    redeem.extend_from_slice(&pubkey_hash);
    let redeem_hash = hash160(&redeem);
    let mut payload = Vec::with_capacity(21);
    payload.push(version);
    payload.extend_from_slice(&redeem_hash);
    Ok(base58::check_encode(&payload, Alphabet::Bitcoin))
}

fn p2wpkh(pubkey: &[u8; 33], coin: &CoinDescriptor) -> Result<String> {
    let hrp = coin
        .bech32_hrp
        .ok_or_else(|| Error::InvalidEncoding(format!("{} has no Bech32 HRP", coin.name)))?;
    let program = hash160(pubkey);
    bech32::encode_v0(hrp, &program)
}

/// keccak256(X||Y)[12:32], lower-case hex, `0x`-prefixed and EIP-55 checksummed.
/// `uncompressed_xy` is the 64-byte X||Y (no `0x04` prefix).
pub fn ethereum(uncompressed_xy: [u8; 64]) -> Result<String> {
    let hash = keccak256(&uncompressed_xy);
    let address_bytes = &hash[12..32];
    Ok(eip55_checksum(address_bytes))
}

/// EIP-55: uppercase hex nibble `i` of the address iff nibble `i` of
/// `keccak256(lowercase_hex_without_0x)` is `>= 8`.
fn eip55_checksum(address_bytes: &[u8]) -> String {
    let lower_hex = hex::encode(address_bytes);
    let hash = keccak256(lower_hex.as_bytes());
    let mut out = String::with_capacity(42);
    out.push_str("0x");
    for (i, c) in lower_hex.chars().enumerate() {
        if c.is_ascii_digit() {
            out.push(c);
            continue;
        }
        let nibble = hash[i / 2];
        let high = i % 2 == 0;
        let nibble_value = if high { nibble >> 4 } else { nibble & 0x0F };
        if nibble_value >= 8 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}

fn ripple(pubkey: &[u8; 33]) -> Result<String> {
    let h = hash160(pubkey);
    let mut payload = Vec::with_capacity(21);
    payload.push(0x00);
    payload.extend_from_slice(&h);
    Ok(base58::check_encode(&payload, Alphabet::Ripple))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coins::{BITCOIN, DOGECOIN, ETHEREUM as ETH_COIN, LITECOIN, RIPPLE as XRP_COIN};

    fn sample_pubkey() -> PublicKeyBytes {
        let scalar = crate::ec::scalar_from_bytes(&[0x42u8; 32]).unwrap();
        let compressed = crate::ec::priv_to_pub(&scalar);
        let uncompressed = crate::ec::priv_to_pub_uncompressed(&scalar);
        let mut uncompressed_xy = [0u8; 64];
        uncompressed_xy.copy_from_slice(&uncompressed[1..]);
        PublicKeyBytes { compressed, uncompressed_xy }
    }

    #[test]
    fn p2pkh_starts_with_expected_prefix() {
        let pubkey = sample_pubkey();
        let addr = encode(&pubkey, &BITCOIN).unwrap();
        assert!(addr.starts_with('1'));
    }

    #[test]
    fn dogecoin_p2pkh_uses_its_own_version() {
        let pubkey = sample_pubkey();
        let addr = encode(&pubkey, &DOGECOIN).unwrap();
        assert!(addr.starts_with('D'));
    }

    #[test]
    fn litecoin_p2sh_p2wpkh_roundtrips_through_prefix() {
        let mut litecoin_segwit = LITECOIN;
        litecoin_segwit.address_family = AddressFamily::P2shP2wpkh;
        let pubkey = sample_pubkey();
        let addr = encode(&pubkey, &litecoin_segwit).unwrap();
        assert!(addr.starts_with('M') || addr.starts_with('3'));
    }

    #[test]
    fn bech32_address_decodes_back_to_hash160_of_pubkey() {
        let mut bitcoin_segwit = BITCOIN;
        bitcoin_segwit.address_family = AddressFamily::P2wpkh;
        let pubkey = sample_pubkey();
        let addr = encode(&pubkey, &bitcoin_segwit).unwrap();
        let (hrp, version, program) = bech32::decode(&addr).unwrap();
        assert_eq!(hrp, "bc");
        assert_eq!(version, 0);
        assert_eq!(program, hash160(&pubkey.compressed));
    }

    #[test]
    fn eip55_checksum_known_vector() {
        // EIP-55 reference vector.
        let addr_bytes = hex::decode("5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed").unwrap();
        let checksummed = eip55_checksum(&addr_bytes);
        assert_eq!(checksummed, "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed");
    }

    #[test]
    fn ripple_address_uses_ripple_alphabet() {
        let pubkey = sample_pubkey();
        let addr = encode(&pubkey, &XRP_COIN).unwrap();
        assert!(addr.starts_with('r'));
    }

    #[test]
    fn ethereum_family_via_generic_encode_dispatches_to_keccak() {
        let pubkey = sample_pubkey();
        let addr = encode(&pubkey, &ETH_COIN).unwrap();
        assert!(addr.starts_with("0x"));
        assert_eq!(addr.len(), 42);
    }
}
