//! Parsed `RequestSecurityToken` documents.

// self
use crate::{
	_prelude::*,
	trust::{BinarySecret, Element, uri},
};

/// WS-Trust binding requested by the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestType {
	/// Issue binding.
	Issue,
	/// Renew binding.
	Renew,
	/// Validate binding.
	Validate,
	/// Cancel binding.
	Cancel,
}
impl RequestType {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			RequestType::Issue => "issue",
			RequestType::Renew => "renew",
			RequestType::Validate => "validate",
			RequestType::Cancel => "cancel",
		}
	}

	/// Returns the WS-Trust `RequestType` URI.
	pub const fn as_uri(self) -> &'static str {
		match self {
			RequestType::Issue => uri::ISSUE_REQUEST,
			RequestType::Renew => uri::RENEW_REQUEST,
			RequestType::Validate => uri::VALIDATE_REQUEST,
			RequestType::Cancel => uri::CANCEL_REQUEST,
		}
	}

	/// Parses a WS-Trust `RequestType` URI.
	pub fn from_uri(value: &str) -> Option<Self> {
		[RequestType::Issue, RequestType::Renew, RequestType::Validate, RequestType::Cancel]
			.into_iter()
			.find(|kind| kind.as_uri() == value)
	}
}
impl Display for RequestType {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Proof-of-possession strategy requested for an issued token.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum KeyType {
	/// No proof key; possession of the token is enough.
	Bearer,
	/// Shared symmetric proof key.
	Symmetric,
	/// Client public key proof.
	Public,
	/// Any other URI; treated like [`KeyType::Bearer`] when issuing.
	Other(String),
}
impl KeyType {
	/// Parses a key type URI, ignoring ASCII case like the WS-Trust stacks this engine
	/// interoperates with.
	pub fn from_uri(value: &str) -> Self {
		if value.eq_ignore_ascii_case(uri::KEY_TYPE_BEARER) {
			KeyType::Bearer
		} else if value.eq_ignore_ascii_case(uri::KEY_TYPE_SYMMETRIC) {
			KeyType::Symmetric
		} else if value.eq_ignore_ascii_case(uri::KEY_TYPE_PUBLIC) {
			KeyType::Public
		} else {
			KeyType::Other(value.to_owned())
		}
	}

	/// Returns the key type URI.
	pub fn as_uri(&self) -> &str {
		match self {
			KeyType::Bearer => uri::KEY_TYPE_BEARER,
			KeyType::Symmetric => uri::KEY_TYPE_SYMMETRIC,
			KeyType::Public => uri::KEY_TYPE_PUBLIC,
			KeyType::Other(value) => value,
		}
	}
}
impl From<String> for KeyType {
	fn from(value: String) -> Self {
		Self::from_uri(&value)
	}
}
impl From<KeyType> for String {
	fn from(value: KeyType) -> Self {
		value.as_uri().to_owned()
	}
}
impl Display for KeyType {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_uri())
	}
}

/// Requested or granted token validity window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lifetime {
	/// Start of the validity window.
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub created: Option<OffsetDateTime>,
	/// End of the validity window.
	#[serde(default, with = "time::serde::rfc3339::option")]
	pub expires: Option<OffsetDateTime>,
}
impl Lifetime {
	/// Creates a window starting at `created` and lasting `timeout`, saturating at the
	/// largest representable instant.
	pub fn starting_at(created: OffsetDateTime, timeout: Duration) -> Self {
		Self { created: Some(created), expires: Some(created.saturating_add(timeout)) }
	}
}

/// `AppliesTo` endpoint reference naming the relying service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliesTo {
	/// Endpoint reference address, when one could be parsed.
	pub address: Option<String>,
}
impl AppliesTo {
	/// Creates an AppliesTo for the provided endpoint address.
	pub fn new(address: impl Into<String>) -> Self {
		Self { address: Some(address.into()) }
	}

	/// Service name used for provider and key lookups; blank addresses do not count.
	pub fn service_name(&self) -> Option<&str> {
		self.address.as_deref().map(str::trim).filter(|address| !address.is_empty())
	}
}

/// `Claims` block with its dialect and opaque content.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
	/// Claims dialect URI.
	pub dialect: String,
	/// Dialect-specific content.
	pub content: Vec<Element>,
}

/// Key entropy contributed by a requester or the STS.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Entropy {
	/// Entropy carried as a binary secret.
	BinarySecret(BinarySecret),
	/// Any other entropy form (for example an encrypted key); never used as a client secret.
	Other(Element),
}
impl Entropy {
	/// Returns the binary secret, if the entropy carries one.
	pub fn binary_secret(&self) -> Option<&BinarySecret> {
		match self {
			Entropy::BinarySecret(secret) => Some(secret),
			Entropy::Other(_) => None,
		}
	}
}

/// `UseKey` hint naming the key the requester wants the token bound to.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UseKey {
	/// Embedded key or token reference, when present.
	pub key: Option<Element>,
	/// Identifier of the signature proving possession of the key.
	pub sig: Option<String>,
}

/// Parsed `RequestSecurityToken`.
///
/// Fields mirror the wire document. The dispatcher writes effective defaults (key type, key
/// size, lifetime, token type) back so the response and the post-processor echo the values
/// that were actually used.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
	/// Binding requested by the caller.
	pub kind: RequestType,
	/// Element the request was parsed from.
	pub document: Option<Element>,
	/// Correlation context attribute.
	pub context: Option<String>,
	/// Requested token type URI.
	pub token_type: Option<String>,
	/// Requested proof-of-possession key type.
	pub key_type: Option<KeyType>,
	/// Requested key size in bits.
	pub key_size: Option<u32>,
	/// Algorithm used to wrap proof keys for the relying service.
	pub key_wrap_algorithm: Option<String>,
	/// Relying service the token is intended for.
	pub applies_to: Option<AppliesTo>,
	/// Claims the caller wants asserted.
	pub claims: Option<Claims>,
	/// Requester entropy.
	pub entropy: Option<Entropy>,
	/// Key the requester wants the token bound to.
	pub use_key: Option<UseKey>,
	/// Requested validity window.
	pub lifetime: Option<Lifetime>,
	/// Signature algorithm override for the issued token.
	pub signature_algorithm: Option<String>,
	/// Token carried by RenewTarget, ValidateTarget, or CancelTarget.
	pub target: Option<Element>,
}
impl Request {
	/// Creates an empty request of the provided kind.
	pub fn new(kind: RequestType) -> Self {
		Self {
			kind,
			document: None,
			context: None,
			token_type: None,
			key_type: None,
			key_size: None,
			key_wrap_algorithm: None,
			applies_to: None,
			claims: None,
			entropy: None,
			use_key: None,
			lifetime: None,
			signature_algorithm: None,
			target: None,
		}
	}

	/// Attaches the element the request was parsed from.
	pub fn with_document(mut self, document: Element) -> Self {
		self.document = Some(document);

		self
	}

	/// Sets the correlation context.
	pub fn with_context(mut self, context: impl Into<String>) -> Self {
		self.context = Some(context.into());

		self
	}

	/// Sets the requested token type.
	pub fn with_token_type(mut self, token_type: impl Into<String>) -> Self {
		self.token_type = Some(token_type.into());

		self
	}

	/// Sets the requested key type.
	pub fn with_key_type(mut self, key_type: KeyType) -> Self {
		self.key_type = Some(key_type);

		self
	}

	/// Sets the requested key size in bits.
	pub fn with_key_size(mut self, bits: u32) -> Self {
		self.key_size = Some(bits);

		self
	}

	/// Sets the key-wrap algorithm.
	pub fn with_key_wrap_algorithm(mut self, algorithm: impl Into<String>) -> Self {
		self.key_wrap_algorithm = Some(algorithm.into());

		self
	}

	/// Sets the AppliesTo endpoint address.
	pub fn with_applies_to(mut self, address: impl Into<String>) -> Self {
		self.applies_to = Some(AppliesTo::new(address));

		self
	}

	/// Sets the claims block.
	pub fn with_claims(mut self, claims: Claims) -> Self {
		self.claims = Some(claims);

		self
	}

	/// Sets the requester entropy.
	pub fn with_entropy(mut self, entropy: Entropy) -> Self {
		self.entropy = Some(entropy);

		self
	}

	/// Sets the UseKey hint.
	pub fn with_use_key(mut self, use_key: UseKey) -> Self {
		self.use_key = Some(use_key);

		self
	}

	/// Sets the requested lifetime.
	pub fn with_lifetime(mut self, lifetime: Lifetime) -> Self {
		self.lifetime = Some(lifetime);

		self
	}

	/// Overrides the signature algorithm for the issued token.
	pub fn with_signature_algorithm(mut self, algorithm: impl Into<String>) -> Self {
		self.signature_algorithm = Some(algorithm.into());

		self
	}

	/// Sets the renew/validate/cancel target token.
	pub fn with_target(mut self, token: Element) -> Self {
		self.target = Some(token);

		self
	}

	/// Service name parsed from AppliesTo, if any.
	pub fn service_name(&self) -> Option<&str> {
		self.applies_to.as_ref().and_then(AppliesTo::service_name)
	}

	/// Requester secret carried as binary-secret entropy, if any.
	pub fn client_secret(&self) -> Option<&[u8]> {
		self.entropy.as_ref().and_then(Entropy::binary_secret).map(|secret| secret.value.expose())
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;

	#[test]
	fn key_type_parsing_ignores_case_and_keeps_unknown_uris() {
		assert_eq!(
			KeyType::from_uri("HTTP://DOCS.OASIS-OPEN.ORG/WS-SX/WS-TRUST/200512/SYMMETRICKEY"),
			KeyType::Symmetric
		);
		assert_eq!(KeyType::from_uri(uri::KEY_TYPE_PUBLIC), KeyType::Public);

		let other = KeyType::from_uri("urn:example:key-type");

		assert_eq!(other, KeyType::Other("urn:example:key-type".into()));
		assert_eq!(other.as_uri(), "urn:example:key-type");
	}

	#[test]
	fn request_type_uris_round_trip() {
		for kind in
			[RequestType::Issue, RequestType::Renew, RequestType::Validate, RequestType::Cancel]
		{
			assert_eq!(RequestType::from_uri(kind.as_uri()), Some(kind));
		}

		assert_eq!(RequestType::from_uri("urn:example:unknown"), None);
	}

	#[test]
	fn applies_to_ignores_blank_addresses() {
		let request = Request::new(RequestType::Issue).with_applies_to("  ");

		assert_eq!(request.service_name(), None);

		let request = Request::new(RequestType::Issue).with_applies_to("http://services/a");

		assert_eq!(request.service_name(), Some("http://services/a"));
	}

	#[test]
	fn client_secret_only_reads_binary_secrets() {
		let request = Request::new(RequestType::Issue)
			.with_entropy(Entropy::Other(Element::unqualified("EncryptedKey")));

		assert_eq!(request.client_secret(), None);

		let request = Request::new(RequestType::Issue)
			.with_entropy(Entropy::BinarySecret(BinarySecret::untyped(vec![7_u8; 4])));

		assert_eq!(request.client_secret(), Some(&[7_u8; 4][..]));
	}

	#[test]
	fn lifetime_serializes_as_rfc3339() {
		let lifetime = Lifetime::starting_at(
			macros::datetime!(2025-01-01 00:00 UTC),
			Duration::seconds(7200),
		);
		let payload = serde_json::to_string(&lifetime).expect("Lifetime should serialize.");

		assert_eq!(payload, r#"{"created":"2025-01-01T00:00:00Z","expires":"2025-01-01T02:00:00Z"}"#);
	}
}
