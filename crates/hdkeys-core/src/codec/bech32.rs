// codec/bech32: BIP-173 SegWit v0 address encoding
//
// Delegates the 5-bit grouping / GF(32) polymod checksum to the `bech32`
// crate; address.rs calls this for any coin with an HRP.

use bech32::Hrp;

use crate::error::{Error, Result};

/// `<hrp>1<data><checksum>`, witness version 0. `program` must be 20 bytes
/// (P2WPKH) or 32 bytes (P2WSH) per BIP-173.
pub fn encode_v0(hrp: &str, program: &[u8]) -> Result<String> {
    if program.len() != 20 && program.len() != 32 {
        return Err(Error::InvalidEncoding(format!(
            "witness v0 program must be 20 or 32 bytes, got {}",
            program.len()
        )));
    }
    let hrp = Hrp::parse(hrp).map_err(|e| Error::InvalidEncoding(format!("invalid HRP: {e}")))?;
    bech32::segwit::encode_v0(hrp, program)
        .map_err(|e| Error::InvalidEncoding(format!("bech32 segwit encode: {e}")))
}

/// Decode a SegWit bech32 address, returning `(hrp, witness_version, program)`.
pub fn decode(address: &str) -> Result<(String, u8, Vec<u8>)> {
    let (hrp, version, program) = bech32::segwit::decode(address)
        .map_err(|e| Error::InvalidEncoding(format!("bech32 segwit decode: {e}")))?;
    Ok((hrp.to_string(), version.to_u8(), program))
}
