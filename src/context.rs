//! Per-call scratch state shared between the dispatcher and a provider.
//!
//! A [`RequestContext`] is created when a dispatch operation starts and dropped when it
//! returns. It borrows the request and principal, so it can never outlive the call or be
//! handed to another one.

// self
use crate::{
	_prelude::*,
	keys::{KeyInfo, PublicKey},
	provider::{ClaimedAttributes, SecurityToken},
	trust::{Element, Principal, Request, Status},
};

/// Inputs the dispatcher resolved for a provider, plus the outputs the provider produced.
#[derive(Debug)]
pub struct RequestContext<'a> {
	request: &'a Request,
	principal: &'a Principal,
	token_issuer: Option<String>,
	service_provider_public_key: Option<PublicKey>,
	claimed_attributes: Option<ClaimedAttributes>,
	proof_token_info: Option<KeyInfo>,
	security_token: Option<SecurityToken>,
	attached_reference: Option<Element>,
	unattached_reference: Option<Element>,
	status: Option<Status>,
}
impl<'a> RequestContext<'a> {
	/// Creates an empty context for one call.
	pub fn new(request: &'a Request, principal: &'a Principal) -> Self {
		Self {
			request,
			principal,
			token_issuer: None,
			service_provider_public_key: None,
			claimed_attributes: None,
			proof_token_info: None,
			security_token: None,
			attached_reference: None,
			unattached_reference: None,
			status: None,
		}
	}

	/// Request being processed, with effective defaults already applied.
	pub fn request(&self) -> &'a Request {
		self.request
	}

	/// Authenticated caller.
	pub fn principal(&self) -> &'a Principal {
		self.principal
	}

	/// Target token of a renew, validate, or cancel request.
	pub fn target(&self) -> Option<&'a Element> {
		self.request.target.as_ref()
	}

	/// Issuer name the provider should stamp on issued tokens.
	pub fn token_issuer(&self) -> Option<&str> {
		self.token_issuer.as_deref()
	}

	/// Sets the issuer name.
	pub fn set_token_issuer(&mut self, issuer: impl Into<String>) {
		self.token_issuer = Some(issuer.into());
	}

	/// Public key of the relying service, when AppliesTo resolved one.
	pub fn service_provider_public_key(&self) -> Option<&PublicKey> {
		self.service_provider_public_key.as_ref()
	}

	/// Sets (or clears) the relying service key.
	pub fn set_service_provider_public_key(&mut self, key: Option<PublicKey>) {
		self.service_provider_public_key = key;
	}

	/// Attributes produced by claims processing.
	pub fn claimed_attributes(&self) -> Option<&ClaimedAttributes> {
		self.claimed_attributes.as_ref()
	}

	/// Stores claims processing output.
	pub fn set_claimed_attributes(&mut self, attributes: ClaimedAttributes) {
		self.claimed_attributes = Some(attributes);
	}

	/// Key the issued token must be bound to.
	pub fn proof_token_info(&self) -> Option<&KeyInfo> {
		self.proof_token_info.as_ref()
	}

	/// Sets (or clears) the proof-token key info.
	pub fn set_proof_token_info(&mut self, key_info: Option<KeyInfo>) {
		self.proof_token_info = key_info;
	}

	/// Token produced by the provider.
	pub fn security_token(&self) -> Option<&SecurityToken> {
		self.security_token.as_ref()
	}

	/// Stores the token produced by the provider.
	pub fn set_security_token(&mut self, token: SecurityToken) {
		self.security_token = Some(token);
	}

	/// Reference used when the token is attached to the message.
	pub fn attached_reference(&self) -> Option<&Element> {
		self.attached_reference.as_ref()
	}

	/// Sets the attached reference.
	pub fn set_attached_reference(&mut self, reference: Element) {
		self.attached_reference = Some(reference);
	}

	/// Reference used when the token is not attached to the message.
	pub fn unattached_reference(&self) -> Option<&Element> {
		self.unattached_reference.as_ref()
	}

	/// Sets the unattached reference.
	pub fn set_unattached_reference(&mut self, reference: Element) {
		self.unattached_reference = Some(reference);
	}

	/// Validation status set by the provider.
	pub fn status(&self) -> Option<&Status> {
		self.status.as_ref()
	}

	/// Records a validation status.
	pub fn set_status(&mut self, status: Status) {
		self.status = Some(status);
	}

	/// Consumes the context and returns what the provider produced.
	pub fn into_outputs(self) -> ProviderOutputs {
		ProviderOutputs {
			security_token: self.security_token,
			attached_reference: self.attached_reference,
			unattached_reference: self.unattached_reference,
			status: self.status,
		}
	}
}

/// Provider outputs carried from a finished context into the response.
#[derive(Clone, Debug, Default)]
pub struct ProviderOutputs {
	/// Issued or renewed token.
	pub security_token: Option<SecurityToken>,
	/// Attached token reference.
	pub attached_reference: Option<Element>,
	/// Unattached token reference.
	pub unattached_reference: Option<Element>,
	/// Validation status.
	pub status: Option<Status>,
}
