// coins: per-coin constant tables — version bytes, address prefixes, HRPs,
// BIP-44 coin-type indices. Pure data; address.rs dispatches on `AddressFamily`.

use crate::bip32::Versions;

/// Which address algorithm a coin uses. Closed set — address.rs matches on
/// this exhaustively instead of taking a trait object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressFamily {
    P2pkh,
    P2shP2wpkh,
    P2wpkh,
    Ethereum,
    Ripple,
}

/// BIP-32/49/84 version-byte pairs for one coin, only populated for the
/// purposes the coin actually supports (e.g. Dogecoin has no BIP-49/84 entry).
#[derive(Debug, Clone, Copy)]
pub struct PurposeVersions {
    pub bip32: Versions,
    pub bip49: Option<Versions>,
    pub bip84: Option<Versions>,
}

/// Immutable per-coin record.
#[derive(Debug, Clone, Copy)]
pub struct CoinDescriptor {
    pub name: &'static str,
    /// BIP-44 coin-type index, unhardened (purpose.rs hardens it on use).
    pub coin_type: u32,
    pub versions: PurposeVersions,
    pub p2pkh_version: Option<u8>,
    pub p2sh_version: Option<u8>,
    pub bech32_hrp: Option<&'static str>,
    pub wif_version: Option<u8>,
    pub address_family: AddressFamily,
}

macro_rules! versions {
    ($priv:expr, $pub:expr) => {
        Versions { private: $priv, public: $pub }
    };
}

pub const BITCOIN: CoinDescriptor = CoinDescriptor {
    name: "Bitcoin",
    coin_type: 0,
    versions: PurposeVersions {
        bip32: versions!(0x0488_ADE4, 0x0488_B21E),
        bip49: Some(versions!(0x049D_7878, 0x049D_7CB2)),
        bip84: Some(versions!(0x04B2_430C, 0x04B2_4746)),
    },
    p2pkh_version: Some(0x00),
    p2sh_version: Some(0x05),
    bech32_hrp: Some("bc"),
    wif_version: Some(0x80),
    address_family: AddressFamily::P2pkh,
};

pub const BITCOIN_TESTNET: CoinDescriptor = CoinDescriptor {
    name: "Bitcoin Testnet",
    coin_type: 1,
    versions: PurposeVersions {
        bip32: versions!(0x0435_8394, 0x0435_87CF),
        bip49: Some(versions!(0x044A_4E28, 0x044A_5262)),
        bip84: Some(versions!(0x045F_18BC, 0x045F_1CF6)),
    },
    p2pkh_version: Some(0x6F),
    p2sh_version: Some(0xC4),
    bech32_hrp: Some("tb"),
    wif_version: Some(0xEF),
    address_family: AddressFamily::P2pkh,
};

// Litecoin/Dogecoin/Dash testnets don't each define their own SLIP-132
// extended-key prefixes the way Bitcoin/Litecoin mainnet do; wallets that
// support them (e.g. the coin-type table this registry is modeled on)
// stamp them with Bitcoin Testnet's xprv/xpub/yprv/ypub/zprv/zpub bytes, the
// same way DASH above reuses Bitcoin mainnet's BIP-32 prefix wholesale.
pub const LITECOIN_TESTNET: CoinDescriptor = CoinDescriptor {
    name: "Litecoin Testnet",
    coin_type: 1,
    versions: PurposeVersions {
        bip32: versions!(0x0435_8394, 0x0435_87CF),
        bip49: Some(versions!(0x044A_4E28, 0x044A_5262)),
        bip84: Some(versions!(0x045F_18BC, 0x045F_1CF6)),
    },
    p2pkh_version: Some(0x6F),
    p2sh_version: Some(0x3A),
    bech32_hrp: Some("tltc"),
    wif_version: Some(0xEF),
    address_family: AddressFamily::P2pkh,
};

pub const DOGECOIN_TESTNET: CoinDescriptor = CoinDescriptor {
    name: "Dogecoin Testnet",
    coin_type: 1,
    versions: PurposeVersions {
        bip32: versions!(0x0435_8394, 0x0435_87CF),
        bip49: None,
        bip84: None,
    },
    p2pkh_version: Some(0x71),
    p2sh_version: Some(0xC4),
    bech32_hrp: None,
    wif_version: Some(0xF1),
    address_family: AddressFamily::P2pkh,
};

pub const DASH_TESTNET: CoinDescriptor = CoinDescriptor {
    name: "Dash Testnet",
    coin_type: 1,
    versions: PurposeVersions {
        bip32: versions!(0x0435_8394, 0x0435_87CF),
        bip49: None,
        bip84: None,
    },
    p2pkh_version: Some(0x8C),
    p2sh_version: Some(0x13),
    bech32_hrp: None,
    wif_version: Some(0xEF),
    address_family: AddressFamily::P2pkh,
};

pub const LITECOIN: CoinDescriptor = CoinDescriptor {
    name: "Litecoin",
    coin_type: 2,
    versions: PurposeVersions {
        bip32: versions!(0x0488_ADE4, 0x0488_B21E),
        bip49: Some(versions!(0x01B2_6792, 0x01B2_6EF6)),
        bip84: Some(versions!(0x04B2_430C, 0x04B2_4746)),
    },
    p2pkh_version: Some(0x30),
    p2sh_version: Some(0x32),
    bech32_hrp: Some("ltc"),
    wif_version: Some(0xB0),
    address_family: AddressFamily::P2pkh,
};

pub const DOGECOIN: CoinDescriptor = CoinDescriptor {
    name: "Dogecoin",
    coin_type: 3,
    versions: PurposeVersions {
        bip32: versions!(0x02FA_C398, 0x02FA_CAFD),
        bip49: None,
        bip84: None,
    },
    p2pkh_version: Some(0x1E),
    p2sh_version: Some(0x16),
    bech32_hrp: None,
    wif_version: Some(0x9E),
    address_family: AddressFamily::P2pkh,
};

pub const DASH: CoinDescriptor = CoinDescriptor {
    name: "Dash",
    coin_type: 5,
    versions: PurposeVersions {
        bip32: versions!(0x0488_ADE4, 0x0488_B21E),
        bip49: None,
        bip84: None,
    },
    p2pkh_version: Some(0x4C),
    p2sh_version: Some(0x10),
    bech32_hrp: None,
    wif_version: Some(0xCC),
    address_family: AddressFamily::P2pkh,
};

pub const ETHEREUM: CoinDescriptor = CoinDescriptor {
    name: "Ethereum",
    coin_type: 60,
    versions: PurposeVersions {
        bip32: versions!(0x0488_ADE4, 0x0488_B21E),
        bip49: None,
        bip84: None,
    },
    p2pkh_version: None,
    p2sh_version: None,
    bech32_hrp: None,
    wif_version: None,
    address_family: AddressFamily::Ethereum,
};

pub const RIPPLE: CoinDescriptor = CoinDescriptor {
    name: "Ripple",
    coin_type: 144,
    versions: PurposeVersions {
        bip32: versions!(0x0488_ADE4, 0x0488_B21E),
        bip49: None,
        bip84: None,
    },
    p2pkh_version: None,
    p2sh_version: None,
    bech32_hrp: None,
    wif_version: None,
    address_family: AddressFamily::Ripple,
};

pub const ALL: &[CoinDescriptor] = &[
    BITCOIN,
    BITCOIN_TESTNET,
    LITECOIN,
    LITECOIN_TESTNET,
    DOGECOIN,
    DOGECOIN_TESTNET,
    DASH,
    DASH_TESTNET,
    ETHEREUM,
    RIPPLE,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coin_type_indices_match_registry() {
        assert_eq!(BITCOIN.coin_type, 0);
        assert_eq!(BITCOIN_TESTNET.coin_type, 1);
        assert_eq!(LITECOIN.coin_type, 2);
        assert_eq!(DOGECOIN.coin_type, 3);
        assert_eq!(DASH.coin_type, 5);
        assert_eq!(ETHEREUM.coin_type, 60);
        assert_eq!(RIPPLE.coin_type, 144);
    }

    #[test]
    fn dogecoin_has_no_segwit_versions() {
        assert!(DOGECOIN.versions.bip49.is_none());
        assert!(DOGECOIN.versions.bip84.is_none());
        assert!(DOGECOIN.bech32_hrp.is_none());
    }

    #[test]
    fn bitcoin_xprv_version_matches_known_constant() {
        assert_eq!(BITCOIN.versions.bip32.private, 0x0488_ADE4);
        assert_eq!(BITCOIN.versions.bip32.public, 0x0488_B21E);
    }

    #[test]
    fn testnets_all_use_slip44_coin_type_one() {
        assert_eq!(LITECOIN_TESTNET.coin_type, 1);
        assert_eq!(DOGECOIN_TESTNET.coin_type, 1);
        assert_eq!(DASH_TESTNET.coin_type, 1);
    }

    #[test]
    fn litecoin_testnet_supports_bip84() {
        assert!(LITECOIN_TESTNET.versions.bip84.is_some());
        assert!(LITECOIN_TESTNET.versions.bip49.is_some());
        assert_eq!(LITECOIN_TESTNET.bech32_hrp, Some("tltc"));
    }

    #[test]
    fn all_table_includes_every_testnet() {
        assert!(ALL.iter().any(|c| c.name == "Litecoin Testnet"));
        assert!(ALL.iter().any(|c| c.name == "Dogecoin Testnet"));
        assert!(ALL.iter().any(|c| c.name == "Dash Testnet"));
    }
}
