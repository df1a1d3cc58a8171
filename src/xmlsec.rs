//! XML signature and encryption primitives consumed by the engine.
//!
//! Canonicalization, XML-DSig, and XML-Enc live outside this crate. Implementations plug in
//! through [`XmlSecurity`], which works on the crate-owned [`Element`] tree so the engine never
//! depends on a particular XML stack.

// self
use crate::{
	_prelude::*,
	keys::{EncryptedKey, PublicKey, StsKeyPair},
	trust::{Element, uri},
};

type BoxError = Box<dyn StdError + Send + Sync>;

/// Failure reported by an [`XmlSecurity`] implementation.
#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct XmlSecurityError {
	message: String,
	#[source]
	source: Option<BoxError>,
}
impl XmlSecurityError {
	/// Creates an error from a message.
	pub fn new(message: impl Into<String>) -> Self {
		Self { message: message.into(), source: None }
	}

	/// Attaches the underlying cause.
	pub fn with_source(mut self, source: impl 'static + StdError + Send + Sync) -> Self {
		self.source = Some(Box::new(source));

		self
	}
}

/// Parameters for an enveloped signature over a token element.
#[derive(Clone, Copy, Debug)]
pub struct SignatureRequest<'a> {
	/// Key pair producing the signature.
	pub key_pair: &'a StsKeyPair,
	/// Digest method URI.
	pub digest_algorithm: &'a str,
	/// Signature method URI.
	pub signature_algorithm: &'a str,
	/// Same-document reference (`#<ID>`) to the signed element.
	pub reference_uri: &'a str,
}
impl<'a> SignatureRequest<'a> {
	/// Creates a request using the SHA-1 digest and RSA-SHA1 signature defaults.
	pub fn new(key_pair: &'a StsKeyPair, reference_uri: &'a str) -> Self {
		Self {
			key_pair,
			digest_algorithm: uri::DIGEST_SHA1,
			signature_algorithm: uri::SIGNATURE_RSA_SHA1,
			reference_uri,
		}
	}

	/// Overrides the signature method.
	pub fn with_signature_algorithm(mut self, algorithm: &'a str) -> Self {
		self.signature_algorithm = algorithm;

		self
	}
}

/// XML security services the dispatcher and key derivation engine delegate to.
///
/// Implementations must be safe to call concurrently and must not keep per-call state
/// between invocations.
pub trait XmlSecurity: Send + Sync {
	/// Signs `element` in place with an enveloped signature.
	fn sign(&self, element: &mut Element, request: SignatureRequest<'_>)
	-> Result<(), XmlSecurityError>;

	/// Verifies every signature inside `document` against `public_key`.
	///
	/// `Ok(false)` means the signature does not match; `Err` means verification could not be
	/// performed at all.
	fn verify(&self, document: &Element, public_key: &PublicKey) -> Result<bool, XmlSecurityError>;

	/// Replaces `element` with its encrypted form, using `secret` as the content key wrapped
	/// for `public_key`.
	fn encrypt_element(
		&self,
		element: &mut Element,
		public_key: &PublicKey,
		secret: &[u8],
		key_size_bits: u32,
	) -> Result<(), XmlSecurityError>;

	/// Wraps a proof key for `public_key` with the provided key transport algorithm.
	fn wrap_key(
		&self,
		secret: &[u8],
		public_key: &PublicKey,
		algorithm: &str,
	) -> Result<EncryptedKey, XmlSecurityError>;
}
