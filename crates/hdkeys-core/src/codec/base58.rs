// codec/base58: Base58 and Base58Check
//
// Bitcoin and Ripple each use a different character ordering for the same 58-symbol
// alphabet; every coin's address encoder in address.rs picks one of the two.

use crate::error::{Error, Result};
use crate::hash::double_sha256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alphabet {
    Bitcoin,
    Ripple,
}

impl Alphabet {
    fn as_bs58(self) -> &'static bs58::Alphabet {
        match self {
            Alphabet::Bitcoin => bs58::Alphabet::BITCOIN,
            Alphabet::Ripple => bs58::Alphabet::RIPPLE,
        }
    }
}

/// Interpret `bytes` as a big-endian integer and base58-encode it, one `'1'`
/// (alphabet[0]) per leading zero byte.
pub fn encode(bytes: &[u8], alphabet: Alphabet) -> String {
    bs58::encode(bytes).with_alphabet(alphabet.as_bs58()).into_string()
}

pub fn decode(s: &str, alphabet: Alphabet) -> Result<Vec<u8>> {
    bs58::decode(s)
        .with_alphabet(alphabet.as_bs58())
        .into_vec()
        .map_err(|e| Error::InvalidEncoding(format!("base58 decode: {e}")))
}

/// Append the first 4 bytes of `double_sha256(payload)`, then base58-encode.
pub fn check_encode(payload: &[u8], alphabet: Alphabet) -> String {
    let checksum = double_sha256(payload);
    let mut data = Vec::with_capacity(payload.len() + 4);
    data.extend_from_slice(payload);
    data.extend_from_slice(&checksum[..4]);
    encode(&data, alphabet)
}

/// Decode and verify the trailing 4-byte double-SHA256 checksum, returning the
/// payload with the checksum stripped.
pub fn check_decode(s: &str, alphabet: Alphabet) -> Result<Vec<u8>> {
    let data = decode(s, alphabet)?;
    if data.len() < 4 {
        return Err(Error::InvalidEncoding("base58check payload too short".into()));
    }
    let (payload, checksum) = data.split_at(data.len() - 4);
    let expected = double_sha256(payload);
    if checksum != &expected[..4] {
        return Err(Error::InvalidEncoding("base58check checksum mismatch".into()));
    }
    Ok(payload.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn all_zero_payload_encodes_to_all_ones() {
        let payload = [0u8; 10];
        assert_eq!(encode(&payload, Alphabet::Bitcoin), "1111111111");
    }

    #[test]
    fn check_encode_known_vector() {
        let payload = hex::decode("00eb15231dfceb60925886b67d065299925915aeb172c06647").unwrap();
        assert_eq!(
            check_encode(&payload, Alphabet::Bitcoin),
            "13REmUhe2ckUKy1FvM7AMCdtyYq831yxM3QeyEu4"
        );
    }

    #[test]
    fn check_decode_rejects_bad_checksum() {
        for bad in ["237LSrY9NUUar", "GwDDDeduj1jpykc27a", "2W1Yd5Zu6WGyKVtHGMrJ"] {
            assert!(check_decode(bad, Alphabet::Bitcoin).is_err(), "{bad} should fail");
        }
    }

    #[test]
    fn decode_rejects_invalid_charset() {
        for bad in ["237LSrYONUUar", "GwDDDeduj1jpykc27I", "2WlYd5Zu6WGyKVtHGMrJ"] {
            assert!(decode(bad, Alphabet::Bitcoin).is_err(), "{bad} should fail");
        }
    }

    #[test]
    fn check_encode_decode_roundtrip() {
        let payload = vec![0x00, 0xAB, 0xCD, 0xEF, 0x01, 0x23, 0x45];
        let encoded = check_encode(&payload, Alphabet::Ripple);
        let decoded = check_decode(&encoded, Alphabet::Ripple).unwrap();
        assert_eq!(payload, decoded);
    }

    #[test]
    fn flipping_one_character_breaks_checksum_or_charset() {
        let payload = hex::decode("00eb15231dfceb60925886b67d065299925915aeb172c06647").unwrap();
        let encoded = check_encode(&payload, Alphabet::Bitcoin);
        let bytes: Vec<char> = encoded.chars().collect();
        for i in 0..bytes.len() {
            let mut mutated = bytes.clone();
            // Rotate one character to another valid base58 symbol.
            mutated[i] = if mutated[i] == '2' { '3' } else { '2' };
            let candidate: String = mutated.into_iter().collect();
            if candidate != encoded {
                assert!(check_decode(&candidate, Alphabet::Bitcoin).is_err());
            }
        }
    }

    proptest! {
        #[test]
        fn check_encode_decode_always_roundtrips(payload in prop::collection::vec(any::<u8>(), 0..64)) {
            let encoded = check_encode(&payload, Alphabet::Bitcoin);
            let decoded = check_decode(&encoded, Alphabet::Bitcoin).unwrap();
            prop_assert_eq!(payload, decoded);
        }

        #[test]
        fn flipping_any_single_character_fails_or_is_a_noop(
            payload in prop::collection::vec(any::<u8>(), 1..32),
            flip_index in 0usize..64,
            replacement in any::<u8>(),
        ) {
            let encoded = check_encode(&payload, Alphabet::Bitcoin);
            let mut chars: Vec<char> = encoded.chars().collect();
            let i = flip_index % chars.len();
            const ALPHABET: &[u8] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";
            let new_char = ALPHABET[replacement as usize % ALPHABET.len()] as char;
            chars[i] = new_char;
            let candidate: String = chars.into_iter().collect();
            if candidate != encoded {
                prop_assert!(check_decode(&candidate, Alphabet::Bitcoin).is_err());
            }
        }
    }
}
