// ec: secp256k1 scalar and point arithmetic
//
// Thin wrapper around k256's constant-time field/group types. Everything here
// operates on fixed-size byte arrays so bip32.rs never has to reach into k256
// directly.

use k256::elliptic_curve::group::Group;
use k256::elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint};
use k256::{AffinePoint, EncodedPoint, NonZeroScalar, ProjectivePoint, Scalar};

use crate::error::{Error, Result};

/// A 32-byte scalar known to be in `[1, n)`.
pub fn scalar_from_bytes(bytes: &[u8; 32]) -> Result<NonZeroScalar> {
    Option::from(NonZeroScalar::from_repr((*bytes).into()))
        .ok_or_else(|| Error::InvalidKey("scalar is zero or >= curve order".into()))
}

/// `k * G`, compressed (33 bytes, `0x02`/`0x03` prefix + X).
pub fn priv_to_pub(k: &NonZeroScalar) -> [u8; 33] {
    let point = ProjectivePoint::GENERATOR * k.as_ref();
    compress_point(&point)
}

/// Uncompressed public key (65 bytes: `0x04` + X + Y), used by Ethereum-family
/// address derivation which hashes the raw X||Y coordinates.
pub fn priv_to_pub_uncompressed(k: &NonZeroScalar) -> [u8; 65] {
    let point = ProjectivePoint::GENERATOR * k.as_ref();
    let encoded = point.to_affine().to_encoded_point(false);
    let mut out = [0u8; 65];
    out.copy_from_slice(encoded.as_bytes());
    out
}

fn compress_point(point: &ProjectivePoint) -> [u8; 33] {
    let encoded = point.to_affine().to_encoded_point(true);
    let mut out = [0u8; 33];
    out.copy_from_slice(encoded.as_bytes());
    out
}

/// Parse a 33-byte SEC1-compressed point. Rejects points not on the curve.
pub fn point_from_compressed(bytes: &[u8; 33]) -> Result<AffinePoint> {
    let encoded = EncodedPoint::from_bytes(bytes)
        .map_err(|e| Error::InvalidKey(format!("malformed compressed point: {e}")))?;
    Option::from(AffinePoint::from_encoded_point(&encoded))
        .ok_or_else(|| Error::InvalidKey("point is not on the secp256k1 curve".into()))
}

/// Decompress a 33-byte SEC1 point and return the raw X||Y coordinates (64
/// bytes, no `0x04` prefix), for callers that only hold a compressed public
/// key but need the uncompressed form (e.g. Ethereum-family address
/// derivation from an xpub).
pub fn uncompressed_xy_from_compressed(bytes: &[u8; 33]) -> Result<[u8; 64]> {
    let point = point_from_compressed(bytes)?;
    let encoded = point.to_encoded_point(false);
    let mut xy = [0u8; 64];
    xy.copy_from_slice(&encoded.as_bytes()[1..]);
    Ok(xy)
}

/// `P + Q`. Fails if the result is the point at infinity (the BIP-32 "reject and
/// retry with i+1" case).
pub fn point_add(p: &AffinePoint, q: &AffinePoint) -> Result<AffinePoint> {
    let sum = ProjectivePoint::from(*p) + ProjectivePoint::from(*q);
    if bool::from(sum.is_identity()) {
        return Err(Error::DerivationInvalid);
    }
    Ok(sum.to_affine())
}

/// `a + b mod n`. Fails only if the sum is exactly zero (the BIP-32 retry case);
/// wraparound itself is not an error, it's ordinary modular arithmetic.
pub fn scalar_add_mod_n(a: &NonZeroScalar, b: &NonZeroScalar) -> Result<NonZeroScalar> {
    let sum: Scalar = a.as_ref() + b.as_ref();
    Option::from(NonZeroScalar::new(sum)).ok_or(Error::DerivationInvalid)
}

pub fn compress_affine(point: &AffinePoint) -> [u8; 33] {
    let encoded = point.to_encoded_point(true);
    let mut out = [0u8; 33];
    out.copy_from_slice(encoded.as_bytes());
    out
}
