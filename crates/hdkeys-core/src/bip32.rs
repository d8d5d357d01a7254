// bip32: extended-key tree — master-from-seed, CKDpriv/CKDpub, serialization,
// path parsing and whole-path derivation.
//
// Carries its own version-byte pair instead of a single hardcoded mainnet
// prefix so purpose.rs can re-stamp the same tree node as xprv/yprv/zprv.

use std::fmt;

use k256::{AffinePoint, NonZeroScalar};

use crate::codec::base58::{self, Alphabet};
use crate::ec;
use crate::error::{Error, Result};
use crate::hash::{hash160, hmac_sha512};

const HARDENED_BIT: u32 = 0x8000_0000;
const SEED_HMAC_KEY: &[u8] = b"Bitcoin seed";

/// BIP-32 mainnet xprv/xpub version bytes — the default for a freshly derived
/// master key before a BIP-44/49/84 wrapper re-stamps it.
pub const MAINNET_XPRV: u32 = 0x0488_ADE4;
pub const MAINNET_XPUB: u32 = 0x0488_B21E;

/// The pair of version bytes an extended key carries so it can be serialized
/// in either its private or public form regardless of which material it
/// currently holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Versions {
    pub private: u32,
    pub public: u32,
}

impl Default for Versions {
    fn default() -> Self {
        Versions { private: MAINNET_XPRV, public: MAINNET_XPUB }
    }
}

#[derive(Clone)]
enum KeyMaterial {
    Private(NonZeroScalar),
    Public(AffinePoint),
}

/// A node in a BIP-32 tree: either a private key (can derive anything) or a
/// public-only key (can derive non-hardened children only).
#[derive(Clone)]
pub struct ExtendedKey {
    material: KeyMaterial,
    chain_code: [u8; 32],
    depth: u8,
    parent_fingerprint: [u8; 4],
    child_number: u32,
    versions: Versions,
}

impl fmt::Debug for ExtendedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtendedKey")
            .field("is_private", &self.is_private())
            .field("depth", &self.depth)
            .field("child_number", &self.child_number)
            .finish()
    }
}

impl ExtendedKey {
    /// `I = hmac_sha512("Bitcoin seed", seed)`; `IL` becomes the master scalar,
    /// `IR` the master chain code. Rejects seeds outside [16, 64] bytes and
    /// seeds whose `IL` is zero or `>= n` (astronomically unlikely, but the
    /// BIP mandates the check).
    pub fn from_seed(seed: &[u8]) -> Result<Self> {
        if !(16..=64).contains(&seed.len()) {
            return Err(Error::InvalidSeed(format!(
                "seed must be 16-64 bytes, got {}",
                seed.len()
            )));
        }
        let i = hmac_sha512(SEED_HMAC_KEY, seed);
        let (il, ir) = i.split_at(32);
        let mut il_arr = [0u8; 32];
        il_arr.copy_from_slice(il);
        let scalar = ec::scalar_from_bytes(&il_arr)
            .map_err(|_| Error::InvalidSeed("master IL is zero or >= curve order".into()))?;
        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(ir);
        tracing::trace!("derived master key from {}-byte seed", seed.len());
        Ok(ExtendedKey {
            material: KeyMaterial::Private(scalar),
            chain_code,
            depth: 0,
            parent_fingerprint: [0u8; 4],
            child_number: 0,
            versions: Versions::default(),
        })
    }

    /// Re-stamp this key's serialization version bytes (used when a
    /// BIP-44/49/84 wrapper wants xprv/yprv/zprv framing on the same tree node).
    pub fn with_versions(mut self, versions: Versions) -> Self {
        self.versions = versions;
        self
    }

    pub fn is_private(&self) -> bool {
        matches!(self.material, KeyMaterial::Private(_))
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn child_number(&self) -> u32 {
        self.child_number
    }

    pub fn chain_code(&self) -> [u8; 32] {
        self.chain_code
    }

    /// Compressed public key, derived from the private scalar if needed.
    pub fn public_key_compressed(&self) -> [u8; 33] {
        match &self.material {
            KeyMaterial::Private(k) => ec::priv_to_pub(k),
            KeyMaterial::Public(p) => ec::compress_affine(p),
        }
    }

    /// The raw 32-byte private scalar. Fails on a public-only key.
    pub fn private_key_bytes(&self) -> Result<[u8; 32]> {
        match &self.material {
            KeyMaterial::Private(k) => Ok(k.to_bytes().into()),
            KeyMaterial::Public(_) => Err(Error::InvalidKey(
                "no private key material on a public-only extended key".into(),
            )),
        }
    }

    /// WIF = Base58Check(version || 32-byte scalar || 0x01) — the trailing
    /// 0x01 marks "pair with a compressed public key".
    pub fn to_wif(&self, version_byte: u8) -> Result<String> {
        let k = self.private_key_bytes()?;
        let mut payload = Vec::with_capacity(34);
        payload.push(version_byte);
        payload.extend_from_slice(&k);
        payload.push(0x01);
        Ok(base58::check_encode(&payload, Alphabet::Bitcoin))
    }

    /// Drop private material, returning the public-only twin of this key.
    pub fn to_public(&self) -> Self {
        let compressed = self.public_key_compressed();
        let point = ec::point_from_compressed(&compressed)
            .expect("a key's own derived public point is always valid");
        ExtendedKey {
            material: KeyMaterial::Public(point),
            chain_code: self.chain_code,
            depth: self.depth,
            parent_fingerprint: self.parent_fingerprint,
            child_number: self.child_number,
            versions: self.versions,
        }
    }

    /// First 4 bytes of `hash160` of this key's own compressed public key —
    /// used as the *parent* fingerprint when serializing its children.
    pub fn fingerprint(&self) -> [u8; 4] {
        let h = hash160(&self.public_key_compressed());
        let mut out = [0u8; 4];
        out.copy_from_slice(&h[..4]);
        out
    }

    /// Derive child `index`. Hardened indices (`>= 2^31`) require private
    /// material. On the astronomically rare invalid-tweak outcome, retries
    /// with `index + 1` per BIP-32's "proceed with the next value for i".
    pub fn derive_child(&self, index: u32) -> Result<Self> {
        let mut i = index;
        loop {
            match self.try_derive_child(i) {
                Ok(child) => return Ok(child),
                Err(Error::DerivationInvalid) => {
                    tracing::debug!("child index {i} produced an invalid key, retrying with {i}+1");
                    i = i.checked_add(1).ok_or(Error::DerivationInvalid)?;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn try_derive_child(&self, index: u32) -> Result<Self> {
        if self.depth == u8::MAX {
            return Err(Error::DepthError { expected: 255, actual: self.depth });
        }
        let hardened = index >= HARDENED_BIT;
        match &self.material {
            KeyMaterial::Private(k) => {
                let data = if hardened {
                    let mut buf = Vec::with_capacity(37);
                    buf.push(0u8);
                    buf.extend_from_slice(&k.to_bytes());
                    buf.extend_from_slice(&index.to_be_bytes());
                    buf
                } else {
                    let mut buf = Vec::with_capacity(37);
                    buf.extend_from_slice(&ec::priv_to_pub(k));
                    buf.extend_from_slice(&index.to_be_bytes());
                    buf
                };
                let i = hmac_sha512(&self.chain_code, &data);
                let (il, ir) = i.split_at(32);
                let mut il_arr = [0u8; 32];
                il_arr.copy_from_slice(il);
                let tweak = ec::scalar_from_bytes(&il_arr).map_err(|_| Error::DerivationInvalid)?;
                let child_scalar = ec::scalar_add_mod_n(k, &tweak)?;
                let mut chain_code = [0u8; 32];
                chain_code.copy_from_slice(ir);
                Ok(ExtendedKey {
                    material: KeyMaterial::Private(child_scalar),
                    chain_code,
                    depth: self.depth + 1,
                    parent_fingerprint: self.fingerprint(),
                    child_number: index,
                    versions: self.versions,
                })
            }
            KeyMaterial::Public(parent_point) => {
                if hardened {
                    return Err(Error::HardenedFromPublic);
                }
                let compressed = ec::compress_affine(parent_point);
                let mut data = Vec::with_capacity(37);
                data.extend_from_slice(&compressed);
                data.extend_from_slice(&index.to_be_bytes());
                let i = hmac_sha512(&self.chain_code, &data);
                let (il, ir) = i.split_at(32);
                let mut il_arr = [0u8; 32];
                il_arr.copy_from_slice(il);
                let tweak = ec::scalar_from_bytes(&il_arr).map_err(|_| Error::DerivationInvalid)?;
                let tweak_point_compressed = ec::priv_to_pub(&tweak);
                let tweak_point = ec::point_from_compressed(&tweak_point_compressed)?;
                let child_point = ec::point_add(&tweak_point, parent_point)?;
                let mut chain_code = [0u8; 32];
                chain_code.copy_from_slice(ir);
                Ok(ExtendedKey {
                    material: KeyMaterial::Public(child_point),
                    chain_code,
                    depth: self.depth + 1,
                    parent_fingerprint: self.fingerprint(),
                    child_number: index,
                    versions: self.versions,
                })
            }
        }
    }

    /// Derive every index in a parsed path in sequence, starting from this key.
    pub fn derive_path(&self, path: &DerivationPath) -> Result<Self> {
        let mut current = self.clone();
        for index in &path.0 {
            current = current.derive_child(*index)?;
        }
        Ok(current)
    }

    /// `derive_path` straight from a path string, e.g. `"0'/1/2'/2/1000000000"`
    /// or `"m/44'/0'/0'"`.
    pub fn derive_path_str(&self, path: &str) -> Result<Self> {
        self.derive_path(&DerivationPath::parse(path)?)
    }

    /// 78-byte BIP-32 serialization: version || depth || parent_fpr ||
    /// child_number || chain_code || key_data.
    pub fn serialize(&self) -> [u8; 78] {
        let mut out = [0u8; 78];
        let version = match &self.material {
            KeyMaterial::Private(_) => self.versions.private,
            KeyMaterial::Public(_) => self.versions.public,
        };
        out[0..4].copy_from_slice(&version.to_be_bytes());
        out[4] = self.depth;
        out[5..9].copy_from_slice(&self.parent_fingerprint);
        out[9..13].copy_from_slice(&self.child_number.to_be_bytes());
        out[13..45].copy_from_slice(&self.chain_code);
        match &self.material {
            KeyMaterial::Private(k) => {
                out[45] = 0x00;
                out[46..78].copy_from_slice(&k.to_bytes());
            }
            KeyMaterial::Public(p) => {
                out[45..78].copy_from_slice(&ec::compress_affine(p));
            }
        }
        out
    }

    pub fn to_base58(&self) -> String {
        base58::check_encode(&self.serialize(), Alphabet::Bitcoin)
    }

    /// Parse a 111-character Base58Check-encoded extended key back into its
    /// structured form. `private_version`/`public_version` tell this call
    /// which 4-byte prefix means "private" vs "public" for the coin/purpose
    /// in play, since the raw bytes alone don't carry that distinction.
    pub fn from_base58(s: &str, versions: Versions) -> Result<Self> {
        let data = base58::check_decode(s, Alphabet::Bitcoin)?;
        if data.len() != 78 {
            return Err(Error::InvalidExtendedKey(format!(
                "expected 78 bytes, got {}",
                data.len()
            )));
        }
        let version = u32::from_be_bytes(data[0..4].try_into().unwrap());
        let depth = data[4];
        let mut parent_fingerprint = [0u8; 4];
        parent_fingerprint.copy_from_slice(&data[5..9]);
        let child_number = u32::from_be_bytes(data[9..13].try_into().unwrap());
        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(&data[13..45]);
        let key_data = &data[45..78];

        let material = if version == versions.private {
            if key_data[0] != 0x00 {
                return Err(Error::InvalidExtendedKey(
                    "private key data must start with 0x00".into(),
                ));
            }
            let mut bytes = [0u8; 32];
            bytes.copy_from_slice(&key_data[1..]);
            KeyMaterial::Private(ec::scalar_from_bytes(&bytes)?)
        } else if version == versions.public {
            let mut bytes = [0u8; 33];
            bytes.copy_from_slice(key_data);
            KeyMaterial::Public(ec::point_from_compressed(&bytes)?)
        } else {
            return Err(Error::InvalidExtendedKey(format!(
                "unknown version bytes {version:#010x}"
            )));
        };

        Ok(ExtendedKey {
            material,
            chain_code,
            depth,
            parent_fingerprint,
            child_number,
            versions,
        })
    }
}

impl PartialEq for ExtendedKey {
    fn eq(&self, other: &Self) -> bool {
        self.serialize() == other.serialize()
    }
}
impl Eq for ExtendedKey {}

/// One step of a derivation path: a child index, with the hardened bit
/// already folded in if the original token had `'`/`h`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivationPath(Vec<u32>);

impl DerivationPath {
    pub fn indices(&self) -> &[u32] {
        &self.0
    }

    /// Parse `m/44'/0'/0'/0/0` (leading `m`/`M` optional, `'`/`h`/`H` all mark
    /// hardened). Whitespace, empty tokens and overflowing indices all fail.
    pub fn parse(path: &str) -> Result<Self> {
        if path.chars().any(char::is_whitespace) {
            return Err(Error::InvalidPath("whitespace is not allowed in a path".into()));
        }
        let mut tokens: Vec<&str> = path.split('/').collect();
        if let Some(&first) = tokens.first() {
            if first == "m" || first == "M" {
                tokens.remove(0);
            }
        }
        let mut indices = Vec::with_capacity(tokens.len());
        for token in tokens {
            if token.is_empty() {
                return Err(Error::InvalidPath(format!("empty path segment in {path:?}")));
            }
            let (digits, hardened) = if let Some(stripped) =
                token.strip_suffix('\'').or_else(|| token.strip_suffix('h')).or_else(|| token.strip_suffix('H'))
            {
                (stripped, true)
            } else {
                (token, false)
            };
            let value: u32 = digits
                .parse()
                .map_err(|_| Error::InvalidPath(format!("not a valid index: {token:?}")))?;
            if value >= HARDENED_BIT {
                return Err(Error::InvalidPath(format!("index {value} out of range")));
            }
            indices.push(if hardened { value + HARDENED_BIT } else { value });
        }
        Ok(DerivationPath(indices))
    }
}
