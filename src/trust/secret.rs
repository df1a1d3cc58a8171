//! Redacted secret wrappers for binary secrets carried in entropy and proof tokens.

// crates.io
use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::{Deserializer, Serializer, de::Error as DeError};
use zeroize::Zeroizing;
// self
use crate::{_prelude::*, trust::uri};

/// Secret key bytes that are wiped on drop and never printed.
#[derive(Clone)]
pub struct SecretBytes(Zeroizing<Vec<u8>>);
impl SecretBytes {
	/// Wraps raw secret bytes.
	pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
		Self(Zeroizing::new(bytes.into()))
	}

	/// Returns the secret bytes. Callers must avoid logging them.
	pub fn expose(&self) -> &[u8] {
		&self.0
	}

	/// Number of secret bytes.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns `true` when no secret bytes are present.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}
impl PartialEq for SecretBytes {
	fn eq(&self, other: &Self) -> bool {
		self.expose() == other.expose()
	}
}
impl Eq for SecretBytes {}
impl From<Vec<u8>> for SecretBytes {
	fn from(value: Vec<u8>) -> Self {
		Self(Zeroizing::new(value))
	}
}
impl From<Zeroizing<Vec<u8>>> for SecretBytes {
	fn from(value: Zeroizing<Vec<u8>>) -> Self {
		Self(value)
	}
}
impl Debug for SecretBytes {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "SecretBytes(<redacted {} bytes>)", self.len())
	}
}
impl Display for SecretBytes {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}
impl Serialize for SecretBytes {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(&STANDARD.encode(self.expose()))
	}
}
impl<'de> Deserialize<'de> for SecretBytes {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let encoded = Zeroizing::new(String::deserialize(deserializer)?);

		STANDARD.decode(encoded.as_bytes()).map(Self::from).map_err(D::Error::custom)
	}
}

/// Declared purpose of a binary secret.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinarySecretType {
	/// Private half of an asymmetric key.
	AsymmetricKey,
	/// Symmetric key.
	SymmetricKey,
	/// Random nonce used as key entropy.
	Nonce,
}
impl BinarySecretType {
	/// Returns the WS-Trust URI for the secret type.
	pub const fn as_uri(self) -> &'static str {
		match self {
			BinarySecretType::AsymmetricKey => uri::BS_TYPE_ASYMMETRIC,
			BinarySecretType::SymmetricKey => uri::BS_TYPE_SYMMETRIC,
			BinarySecretType::Nonce => uri::BS_TYPE_NONCE,
		}
	}
}

/// `BinarySecret` element content.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinarySecret {
	/// Declared type, when the sender supplied one.
	pub kind: Option<BinarySecretType>,
	/// Secret value.
	pub value: SecretBytes,
}
impl BinarySecret {
	/// Creates a nonce secret, the type servers use for their entropy.
	pub fn nonce(value: impl Into<SecretBytes>) -> Self {
		Self { kind: Some(BinarySecretType::Nonce), value: value.into() }
	}

	/// Creates an untyped secret.
	pub fn untyped(value: impl Into<SecretBytes>) -> Self {
		Self { kind: None, value: value.into() }
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn secret_formatters_redact() {
		let secret = SecretBytes::new(b"super-secret".to_vec());

		assert_eq!(format!("{secret:?}"), "SecretBytes(<redacted 12 bytes>)");
		assert_eq!(format!("{secret}"), "<redacted>");
	}

	#[test]
	fn binary_secret_serializes_as_base64() {
		let secret = BinarySecret::nonce(vec![0_u8, 1, 2, 3]);
		let payload = serde_json::to_string(&secret).expect("Binary secret should serialize.");

		assert_eq!(payload, r#"{"kind":"nonce","value":"AAECAw=="}"#);

		let round_trip: BinarySecret =
			serde_json::from_str(&payload).expect("Binary secret should deserialize.");

		assert_eq!(round_trip, secret);
		assert_eq!(BinarySecretType::Nonce.as_uri(), uri::BS_TYPE_NONCE);
	}
}
