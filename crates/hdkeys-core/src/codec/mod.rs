// codec: wire encodings shared across coins — Base58/Base58Check and Bech32.

pub mod base58;
pub mod bech32;
