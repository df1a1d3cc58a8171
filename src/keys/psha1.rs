//! P_SHA1 pseudorandom function (RFC 2246 §5 `P_hash` over HMAC-SHA1), used by WS-Trust to
//! combine requester and STS entropy into a computed key.

// crates.io
use hmac::{Hmac, Mac};
use sha1::Sha1;
use zeroize::Zeroizing;
// self
use crate::{error::KeyMaterialError, trust::SecretBytes};

type HmacSha1 = Hmac<Sha1>;

/// Expands `secret` keyed over `seed` into exactly `length` bytes.
///
/// `A(0) = seed`, `A(i) = HMAC(secret, A(i-1))`, and the output is
/// `HMAC(secret, A(1) || seed) || HMAC(secret, A(2) || seed) || ...` truncated to `length`.
/// WS-Trust passes the requester entropy as `secret` and the STS entropy as `seed`.
pub fn p_sha1(secret: &[u8], seed: &[u8], length: usize) -> Result<SecretBytes, KeyMaterialError> {
	let mut output = Zeroizing::new(Vec::with_capacity(length));
	let mut a = Zeroizing::new(seed.to_vec());

	while output.len() < length {
		a = hmac_sha1(secret, &[&a[..]])?;

		let block = hmac_sha1(secret, &[&a[..], seed])?;
		let take = (length - output.len()).min(block.len());

		output.extend_from_slice(&block[..take]);
	}

	Ok(output.into())
}

fn hmac_sha1(key: &[u8], parts: &[&[u8]]) -> Result<Zeroizing<Vec<u8>>, KeyMaterialError> {
	let mut mac = HmacSha1::new_from_slice(key)
		.map_err(|e| KeyMaterialError::Combination { reason: e.to_string() })?;

	for part in parts {
		mac.update(part);
	}

	Ok(Zeroizing::new(mac.finalize().into_bytes().to_vec()))
}
