//! Key and certificate handles plus the proof-token key info handed to providers.

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD_NO_PAD};
use sha2::{Digest, Sha256};
// self
use crate::{
	_prelude::*,
	trust::{BinarySecret, Element, SecretBytes},
};

/// DER-encoded (SubjectPublicKeyInfo) public key.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PublicKey {
	der: Arc<[u8]>,
}
impl PublicKey {
	/// Wraps DER bytes.
	pub fn from_der(der: impl Into<Arc<[u8]>>) -> Self {
		Self { der: der.into() }
	}

	/// Returns the DER encoding.
	pub fn der(&self) -> &[u8] {
		&self.der
	}

	/// Base64 (no padding) SHA-256 digest of the DER encoding, safe for logs.
	pub fn fingerprint(&self) -> String {
		fingerprint(&self.der)
	}
}
impl Debug for PublicKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("PublicKey").field(&self.fingerprint()).finish()
	}
}

/// DER-encoded (PKCS#8) private key that is wiped on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct PrivateKey(SecretBytes);
impl PrivateKey {
	/// Wraps DER bytes.
	pub fn from_der(der: impl Into<Vec<u8>>) -> Self {
		Self(SecretBytes::new(der))
	}

	/// Returns the DER encoding. Callers must avoid logging it.
	pub fn expose_der(&self) -> &[u8] {
		self.0.expose()
	}
}
impl Debug for PrivateKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("PrivateKey").field(&"<redacted>").finish()
	}
}

/// Key pair the STS signs issued tokens with and verifies presented tokens against.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StsKeyPair {
	/// Verification key.
	pub public: PublicKey,
	/// Signing key.
	pub private: PrivateKey,
}
impl StsKeyPair {
	/// Creates a key pair from its halves.
	pub fn new(public: PublicKey, private: PrivateKey) -> Self {
		Self { public, private }
	}
}

/// DER-encoded X.509 certificate.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Certificate {
	der: Arc<[u8]>,
}
impl Certificate {
	/// Wraps DER bytes.
	pub fn from_der(der: impl Into<Arc<[u8]>>) -> Self {
		Self { der: der.into() }
	}

	/// Returns the DER encoding.
	pub fn der(&self) -> &[u8] {
		&self.der
	}

	/// Base64 (no padding) SHA-256 digest of the DER encoding, safe for logs.
	pub fn fingerprint(&self) -> String {
		fingerprint(&self.der)
	}
}
impl Debug for Certificate {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("Certificate").field(&self.fingerprint()).finish()
	}
}

/// Proof key wrapped for a relying service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncryptedKey {
	/// Key transport algorithm URI.
	pub algorithm: String,
	/// Fingerprint of the public key the secret was wrapped for.
	pub recipient: String,
	/// Wrapped key bytes.
	pub cipher_value: Vec<u8>,
}

/// Proof-token key info passed to providers so they can bind the token to a key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyInfo {
	/// Symmetric proof key in the clear (no service key to wrap it for).
	BinarySecret(BinarySecret),
	/// Symmetric proof key wrapped for the relying service.
	EncryptedKey(EncryptedKey),
	/// Requester certificate.
	X509Certificate(Certificate),
	/// Requester-supplied key content passed through as-is.
	UseKey(Element),
}

fn fingerprint(der: &[u8]) -> String {
	STANDARD_NO_PAD.encode(Sha256::digest(der))
}
