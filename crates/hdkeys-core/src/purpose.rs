// purpose: the BIP-44/49/84 generic wrapper engine
//
// A single engine parameterized by a purpose policy record, rather than
// three near-identical structs. `Wallet` is the depth-tracked wrapper bound
// to one coin + one purpose; Bip44/Bip49/Bip84 are thin constructors over it.

use crate::address::{self, PublicKeyBytes};
use crate::bip32::{ExtendedKey, Versions};
use crate::coins::{AddressFamily, CoinDescriptor};
use crate::ec;
use crate::error::{Error, Result};

const HARDENED_BIT: u32 = 0x8000_0000;

/// Which BIP-44-family purpose this wrapper implements, and the policy that
/// goes with it (version bytes, address family override, coin allow-list).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Purpose {
    Bip44,
    Bip49,
    Bip84,
}

impl Purpose {
    fn index(self) -> u32 {
        match self {
            Purpose::Bip44 => 44,
            Purpose::Bip49 => 49,
            Purpose::Bip84 => 84,
        }
    }

    /// Version bytes this purpose wants stamped on extended keys at or below
    /// the account level. `None` if the coin doesn't support this purpose.
    fn versions_for(self, coin: &CoinDescriptor) -> Option<Versions> {
        match self {
            Purpose::Bip44 => Some(coin.versions.bip32),
            Purpose::Bip49 => coin.versions.bip49,
            Purpose::Bip84 => coin.versions.bip84,
        }
    }

    /// The address family this purpose forces, overriding the coin's native
    /// family only for coins whose natural family differs from BIP-44's
    /// assumption (single-account coins like Ethereum/Ripple keep their own
    /// family regardless of purpose).
    fn address_family_for(self, coin: &CoinDescriptor) -> AddressFamily {
        match coin.address_family {
            AddressFamily::Ethereum | AddressFamily::Ripple => coin.address_family,
            _ => match self {
                Purpose::Bip44 => AddressFamily::P2pkh,
                Purpose::Bip49 => AddressFamily::P2shP2wpkh,
                Purpose::Bip84 => AddressFamily::P2wpkh,
            },
        }
    }
}

/// `is_coin_allowed(coin, purpose)` — promoted to a standalone predicate so
/// callers can pre-check compatibility without constructing a wrapper first.
/// BIP-84 (native SegWit) is only meaningful for coins with a Bech32 HRP;
/// BIP-49 (wrapped SegWit) needs a P2SH version byte; BIP-44 works for any
/// registered coin.
pub fn is_coin_allowed(coin: &CoinDescriptor, purpose: Purpose) -> bool {
    purpose.versions_for(coin).is_some()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WalletDepth {
    Master = 0,
    Purpose = 1,
    Coin = 2,
    Account = 3,
    Change = 4,
    AddressIndex = 5,
}

/// A BIP-44/49/84 tree node bound to a specific coin, carrying the underlying
/// extended key plus enough policy to know which operation is legal next.
#[derive(Clone)]
pub struct Wallet {
    key: ExtendedKey,
    coin: CoinDescriptor,
    purpose: Purpose,
    wallet_depth: WalletDepth,
}

impl Wallet {
    /// Start a new wrapper at the master level (depth 0) from a seed.
    pub fn from_seed(seed: &[u8], coin: CoinDescriptor, purpose: Purpose) -> Result<Self> {
        if !is_coin_allowed(&coin, purpose) {
            return Err(Error::CoinNotAllowed(format!(
                "{} does not support BIP-{}",
                coin.name,
                purpose.index()
            )));
        }
        let versions = purpose.versions_for(&coin).expect("checked by is_coin_allowed");
        let key = ExtendedKey::from_seed(seed)?.with_versions(versions);
        Ok(Wallet { key, coin, purpose, wallet_depth: WalletDepth::Master })
    }

    fn assert_depth(&self, expected: WalletDepth) -> Result<()> {
        if self.wallet_depth != expected {
            return Err(Error::DepthError {
                expected: expected as u8,
                actual: self.wallet_depth as u8,
            });
        }
        Ok(())
    }

    fn step(&self, index: u32, next: WalletDepth) -> Result<Self> {
        let key = self.key.derive_child(index)?;
        Ok(Wallet { key, coin: self.coin, purpose: self.purpose, wallet_depth: next })
    }

    /// `m / purpose'`. Parent must be at depth 0.
    pub fn purpose(&self) -> Result<Self> {
        self.assert_depth(WalletDepth::Master)?;
        self.step(self.purpose.index() + HARDENED_BIT, WalletDepth::Purpose)
    }

    /// `.. / coin_type'`. Parent must be at depth 1. Hardened coin-type index
    /// comes from the coin descriptor, not a caller-supplied argument.
    pub fn coin(&self) -> Result<Self> {
        self.assert_depth(WalletDepth::Purpose)?;
        self.step(self.coin.coin_type + HARDENED_BIT, WalletDepth::Coin)
    }

    /// `.. / account'`. `acc_idx` is 0-indexed and hardened.
    pub fn account(&self, acc_idx: u32) -> Result<Self> {
        self.assert_depth(WalletDepth::Coin)?;
        self.step(acc_idx + HARDENED_BIT, WalletDepth::Account)
    }

    /// `.. / change`. `change_idx` is conventionally 0 (external) or 1
    /// (internal), but any non-hardened value is accepted.
    pub fn change(&self, change_idx: u32) -> Result<Self> {
        self.assert_depth(WalletDepth::Account)?;
        if change_idx >= HARDENED_BIT {
            return Err(Error::InvalidPath("change index must not be hardened".into()));
        }
        self.step(change_idx, WalletDepth::Change)
    }

    /// `.. / address_index`. Non-hardened.
    pub fn address_index(&self, addr_idx: u32) -> Result<Self> {
        self.assert_depth(WalletDepth::Change)?;
        if addr_idx >= HARDENED_BIT {
            return Err(Error::InvalidPath("address index must not be hardened".into()));
        }
        self.step(addr_idx, WalletDepth::AddressIndex)
    }

    /// Compressed public key. Legal at any depth.
    pub fn public_key(&self) -> [u8; 33] {
        self.key.public_key_compressed()
    }

    /// Private scalar. Fails if this wrapper only holds public material.
    pub fn private_key(&self) -> Result<[u8; 32]> {
        self.key.private_key_bytes()
    }

    /// WIF-encoded private key (Base58Check(version || k || 0x01)). Only
    /// meaningful for coins that define a WIF version byte.
    pub fn private_key_wif(&self) -> Result<String> {
        let version = self
            .coin
            .wif_version
            .ok_or_else(|| Error::InvalidKey(format!("{} has no WIF version byte", self.coin.name)))?;
        self.key.to_wif(version)
    }

    /// Terminal operation: the coin-family address string. Legal at depth 5
    /// for the standard BIP-44 descent; wrappers holding Ethereum/Ripple
    /// coins may also call it earlier since those coins have no change/index
    /// levels in practice, but the address still reflects whatever key this
    /// node currently holds.
    pub fn address(&self) -> Result<String> {
        let compressed = self.key.public_key_compressed();
        let uncompressed_xy = ec::uncompressed_xy_from_compressed(&compressed)?;
        let pubkey = PublicKeyBytes { compressed, uncompressed_xy };
        let mut coin = self.coin;
        coin.address_family = self.purpose.address_family_for(&self.coin);
        address::encode(&pubkey, &coin)
    }

    /// BIP-32 serialization (111-char Base58Check) with this wrapper's
    /// purpose-specific version bytes (xprv/yprv/zprv).
    pub fn extended_private_key(&self) -> Result<String> {
        if !self.key.is_private() {
            return Err(Error::InvalidKey("wrapper holds no private extended key".into()));
        }
        Ok(self.key.to_base58())
    }

    pub fn extended_public_key(&self) -> String {
        self.key.to_public().to_base58()
    }

    pub fn to_public(&self) -> Self {
        Wallet { key: self.key.to_public(), coin: self.coin, purpose: self.purpose, wallet_depth: self.wallet_depth }
    }
}

/// `Bip44::from_seed(coin)`, the legacy-P2PKH (or coin-native) purpose.
pub struct Bip44;
impl Bip44 {
    pub fn from_seed(seed: &[u8], coin: CoinDescriptor) -> Result<Wallet> {
        Wallet::from_seed(seed, coin, Purpose::Bip44)
    }
}

/// `Bip49::from_seed(coin)`, wrapped-SegWit (P2SH-P2WPKH).
pub struct Bip49;
impl Bip49 {
    pub fn from_seed(seed: &[u8], coin: CoinDescriptor) -> Result<Wallet> {
        Wallet::from_seed(seed, coin, Purpose::Bip49)
    }
}

/// `Bip84::from_seed(coin)`, native SegWit (P2WPKH/Bech32).
pub struct Bip84;
impl Bip84 {
    pub fn from_seed(seed: &[u8], coin: CoinDescriptor) -> Result<Wallet> {
        Wallet::from_seed(seed, coin, Purpose::Bip84)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coins::{BITCOIN, DOGECOIN, ETHEREUM, LITECOIN, LITECOIN_TESTNET};

    fn seed() -> Vec<u8> {
        hex::decode("000102030405060708090a0b0c0d0e0f").unwrap()
    }

    #[test]
    fn full_descent_to_address_index_succeeds() {
        let wallet = Bip44::from_seed(&seed(), BITCOIN).unwrap();
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
        let addr = leaf.address().unwrap();
        assert!(addr.starts_with('1'));
    }

    #[test]
    fn operations_out_of_depth_order_fail_with_depth_error() {
        let wallet = Bip44::from_seed(&seed(), BITCOIN).unwrap();
        let err = wallet.coin();
        assert!(matches!(err, Err(Error::DepthError { .. })));
    }

    #[test]
    fn bip84_on_litecoin_testnet_is_allowed_but_dogecoin_is_not() {
        assert!(is_coin_allowed(&LITECOIN_TESTNET, Purpose::Bip84));
        assert!(!is_coin_allowed(&DOGECOIN, Purpose::Bip84));
        assert!(Bip84::from_seed(&seed(), DOGECOIN).is_err());
    }

    #[test]
    fn ckdpub_on_hardened_index_fails_hardened_from_public() {
        let wallet = Bip44::from_seed(&seed(), BITCOIN).unwrap().to_public();
        let err = wallet.purpose();
        assert!(matches!(err, Err(Error::HardenedFromPublic)));
    }

    #[test]
    fn ethereum_address_available_without_full_depth_5_descent() {
        let wallet = Bip44::from_seed(&seed(), ETHEREUM).unwrap();
        let account_level = wallet.purpose().unwrap().coin().unwrap().account(0).unwrap();
        let addr = account_level.address().unwrap();
        assert!(addr.starts_with("0x"));
    }

    #[test]
    fn ethereum_xpub_address_matches_xprv_address() {
        let wallet = Bip44::from_seed(&seed(), ETHEREUM).unwrap();
        let account_level = wallet.purpose().unwrap().coin().unwrap().account(0).unwrap();
        let from_private = account_level.address().unwrap();
        let from_public = account_level.to_public().address().unwrap();
        assert_eq!(from_private, from_public);
        assert_ne!(from_public, format!("0x{}", hex::encode([0u8; 20])));
    }

    #[test]
    fn bip49_litecoin_extended_private_key_roundtrips() {
        let wallet = Bip49::from_seed(&seed(), LITECOIN).unwrap();
        let xprv = wallet.extended_private_key().unwrap();
        let decoded = ExtendedKey::from_base58(&xprv, LITECOIN.versions.bip49.unwrap()).unwrap();
        assert!(decoded.is_private());
    }
}
