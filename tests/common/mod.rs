#![allow(dead_code)]

// std
use std::sync::Arc;
// crates.io
use parking_lot::Mutex;
// self
use wstrust_engine::{
	config::{StaticConfigurationBuilder, StsSettings, StaticConfiguration},
	context::RequestContext,
	dispatch::RequestHandler,
	keys::{EncryptedKey, KeyInfo, PrivateKey, PublicKey, StsKeyPair},
	provider::{ClaimedAttributes, ProviderError, SecurityToken, SecurityTokenProvider},
	trust::{Element, Principal, ProviderId, Request, RequestType, ServiceName, Status, uri},
	xmlsec::{SignatureRequest, XmlSecurity, XmlSecurityError},
};

pub const STS_NAME: &str = "sts-test";
pub const SAML_NS: &str = "urn:oasis:names:tc:SAML:2.0:assertion";
pub const SAML2_TOKEN_TYPE: &str =
	"http://docs.oasis-open.org/wss/oasis-wss-saml-token-profile-1.1#SAMLV2.0";
pub const SAML1_TOKEN_TYPE: &str =
	"http://docs.oasis-open.org/wss/oasis-wss-saml-token-profile-1.1#SAMLV1.1";
pub const XENC_NS: &str = "http://www.w3.org/2001/04/xmlenc#";
pub const DSIG_NS: &str = "http://www.w3.org/2000/09/xmldsig#";

/// Inputs a [`RecordingProvider`] observed on one call.
#[derive(Clone, Debug)]
pub struct ProviderCall {
	pub operation: RequestType,
	pub token_type: Option<String>,
	pub issuer: Option<String>,
	pub service_key: Option<PublicKey>,
	pub key_info: Option<KeyInfo>,
	pub attributes: Option<ClaimedAttributes>,
	pub target: Option<Element>,
}

/// Provider double that records every call and emits `saml:Assertion` tokens.
#[derive(Debug)]
pub struct RecordingProvider {
	id: ProviderId,
	token_type: String,
	failure: Option<String>,
	emits_token: bool,
	status: Status,
	calls: Mutex<Vec<ProviderCall>>,
}
impl RecordingProvider {
	pub fn new(id: &str, token_type: &str) -> Self {
		Self {
			id: ProviderId::new(id).expect("Provider fixture identifier should be valid."),
			token_type: token_type.into(),
			failure: None,
			emits_token: true,
			status: Status::valid("Token is valid"),
			calls: Mutex::new(Vec::new()),
		}
	}

	pub fn failing(mut self, message: &str) -> Self {
		self.failure = Some(message.into());

		self
	}

	pub fn without_token(mut self) -> Self {
		self.emits_token = false;

		self
	}

	pub fn with_status(mut self, status: Status) -> Self {
		self.status = status;

		self
	}

	pub fn calls(&self) -> Vec<ProviderCall> {
		self.calls.lock().clone()
	}

	pub fn call_count(&self) -> usize {
		self.calls.lock().len()
	}

	pub fn token(&self) -> Element {
		assertion(&format!("ID_{}", self.id))
	}

	fn record(&self, operation: RequestType, context: &RequestContext<'_>) -> Result<(), ProviderError> {
		self.calls.lock().push(ProviderCall {
			operation,
			token_type: context.request().token_type.clone(),
			issuer: context.token_issuer().map(str::to_owned),
			service_key: context.service_provider_public_key().cloned(),
			key_info: context.proof_token_info().cloned(),
			attributes: context.claimed_attributes().cloned(),
			target: context.target().cloned(),
		});

		match &self.failure {
			Some(message) => Err(ProviderError::new(message.clone())),
			None => Ok(()),
		}
	}

	fn emit(&self, context: &mut RequestContext<'_>) {
		if self.emits_token {
			context.set_security_token(SecurityToken::new(self.token_type.clone(), self.token()));
			context.set_attached_reference(
				Element::unqualified("SecurityTokenReference").with_attribute("URI", format!("#ID_{}", self.id)),
			);
		}
	}
}
impl SecurityTokenProvider for RecordingProvider {
	fn id(&self) -> &ProviderId {
		&self.id
	}

	fn issue_token(&self, context: &mut RequestContext<'_>) -> Result<(), ProviderError> {
		self.record(RequestType::Issue, context)?;
		self.emit(context);

		Ok(())
	}

	fn renew_token(&self, context: &mut RequestContext<'_>) -> Result<(), ProviderError> {
		self.record(RequestType::Renew, context)?;
		self.emit(context);

		Ok(())
	}

	fn validate_token(&self, context: &mut RequestContext<'_>) -> Result<(), ProviderError> {
		self.record(RequestType::Validate, context)?;
		context.set_status(self.status.clone());

		Ok(())
	}

	fn cancel_token(&self, context: &mut RequestContext<'_>) -> Result<(), ProviderError> {
		self.record(RequestType::Cancel, context)
	}
}

/// Result the fake verifier reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verification {
	Valid,
	Invalid,
	Broken,
}

/// Signature parameters the fake signer received.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignCall {
	pub reference_uri: String,
	pub digest_algorithm: String,
	pub signature_algorithm: String,
}

/// Deterministic stand-in for the XML security services.
///
/// Signing appends a `ds:Signature` child, encryption replaces the element with
/// `xenc:EncryptedData`, and key wrapping reverses the secret bytes.
#[derive(Debug)]
pub struct FakeXmlSecurity {
	verification: Verification,
	verifications: Mutex<usize>,
	signatures: Mutex<Vec<SignCall>>,
	encryptions: Mutex<Vec<(usize, u32)>>,
}
impl FakeXmlSecurity {
	pub fn new(verification: Verification) -> Self {
		Self {
			verification,
			verifications: Mutex::new(0),
			signatures: Mutex::new(Vec::new()),
			encryptions: Mutex::new(Vec::new()),
		}
	}

	pub fn verification_count(&self) -> usize {
		*self.verifications.lock()
	}

	pub fn signatures(&self) -> Vec<SignCall> {
		self.signatures.lock().clone()
	}

	/// `(secret length in bytes, key size in bits)` per encryption.
	pub fn encryptions(&self) -> Vec<(usize, u32)> {
		self.encryptions.lock().clone()
	}
}
impl XmlSecurity for FakeXmlSecurity {
	fn sign(
		&self,
		element: &mut Element,
		request: SignatureRequest<'_>,
	) -> Result<(), XmlSecurityError> {
		self.signatures.lock().push(SignCall {
			reference_uri: request.reference_uri.into(),
			digest_algorithm: request.digest_algorithm.into(),
			signature_algorithm: request.signature_algorithm.into(),
		});

		let signature = Element::new(DSIG_NS, "Signature")
			.with_prefix("ds")
			.with_namespace_declaration("ds", DSIG_NS)
			.with_attribute("Reference", request.reference_uri);

		*element = element.clone().with_child(signature);

		Ok(())
	}

	fn verify(&self, _document: &Element, _public_key: &PublicKey) -> Result<bool, XmlSecurityError> {
		*self.verifications.lock() += 1;

		match self.verification {
			Verification::Valid => Ok(true),
			Verification::Invalid => Ok(false),
			Verification::Broken => Err(XmlSecurityError::new("signature element is truncated")),
		}
	}

	fn encrypt_element(
		&self,
		element: &mut Element,
		public_key: &PublicKey,
		secret: &[u8],
		key_size_bits: u32,
	) -> Result<(), XmlSecurityError> {
		self.encryptions.lock().push((secret.len(), key_size_bits));

		*element = Element::new(XENC_NS, "EncryptedData")
			.with_prefix("xenc")
			.with_namespace_declaration("xenc", XENC_NS)
			.with_attribute("Recipient", public_key.fingerprint());

		Ok(())
	}

	fn wrap_key(
		&self,
		secret: &[u8],
		public_key: &PublicKey,
		algorithm: &str,
	) -> Result<EncryptedKey, XmlSecurityError> {
		Ok(EncryptedKey {
			algorithm: algorithm.into(),
			recipient: public_key.fingerprint(),
			cipher_value: secret.iter().rev().copied().collect(),
		})
	}
}

pub fn assertion(id: &str) -> Element {
	Element::new(SAML_NS, "Assertion")
		.with_prefix("saml")
		.with_namespace_declaration("saml", SAML_NS)
		.with_attribute(Element::ID_ATTRIBUTE, id)
		.with_child(
			Element::new(SAML_NS, "Issuer")
				.with_prefix("saml")
				.with_namespace_declaration("saml", SAML_NS)
				.with_text(STS_NAME),
		)
}

pub fn rst_document() -> Element {
	Element::new(uri::BASE_NAMESPACE, "RequestSecurityToken").with_prefix("wst")
}

pub fn request(kind: RequestType) -> Request {
	Request::new(kind).with_document(rst_document()).with_context("ctx-42")
}

pub fn principal() -> Principal {
	Principal::new("CN=Jane Doe, O=Example").expect("Principal fixture should be valid.")
}

pub fn service(name: &str) -> ServiceName {
	ServiceName::new(name).expect("Service fixture should be valid.")
}

pub fn service_key() -> PublicKey {
	PublicKey::from_der(vec![0x30_u8, 0x82, 0x01, 0x22])
}

pub fn sts_key_pair() -> StsKeyPair {
	StsKeyPair::new(PublicKey::from_der(vec![0x30_u8, 0x01]), PrivateKey::from_der(vec![0x30_u8, 0x02]))
}

pub fn settings() -> StsSettings {
	StsSettings::new(STS_NAME)
}

pub fn builder(settings: StsSettings) -> StaticConfigurationBuilder {
	StaticConfiguration::builder(settings)
}

pub fn handler(builder: StaticConfigurationBuilder, security: Arc<FakeXmlSecurity>) -> RequestHandler {
	let config = builder.build().expect("Test configuration should build.");

	RequestHandler::new(Arc::new(config), security)
}
