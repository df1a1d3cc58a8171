//! WS-Trust request dispatch.
//!
//! [`RequestHandler`] owns the injected configuration and XML security services and exposes
//! one method per binding (`issue`, `renew`, `validate`, `cancel`) plus
//! [`RequestHandler::post_process`] for signing and encrypting issued tokens. Each binding
//! lives in its own module. This module keeps the pieces they share: target-token provider
//! resolution, default lifetimes, signature checks, and the span/metrics wrapper.

mod cancel;
mod issue;
mod post_process;
mod renew;
mod validate;

// self
use crate::{
	_prelude::*,
	config::StsConfiguration,
	keys::DEFAULT_KEY_SIZE_BITS,
	obs::{self, DispatchSpan, Outcome},
	provider::SecurityTokenProvider,
	trust::{Element, Lifetime, Principal, Request, RequestType, Response},
	xmlsec::{XmlSecurity, XmlSecurityError},
};

/// Entry point turning parsed WS-Trust requests into responses.
///
/// The handler is immutable and cheap to clone; concurrent calls share the configuration and
/// XML security services but never a [`RequestContext`](crate::context::RequestContext).
#[derive(Clone)]
pub struct RequestHandler {
	config: Arc<dyn StsConfiguration>,
	security: Arc<dyn XmlSecurity>,
}
impl RequestHandler {
	/// Creates a handler over the provided configuration and XML security services.
	pub fn new(config: Arc<dyn StsConfiguration>, security: Arc<dyn XmlSecurity>) -> Self {
		Self { config, security }
	}

	/// Configuration the handler resolves providers and keys from.
	pub fn config(&self) -> &dyn StsConfiguration {
		self.config.as_ref()
	}

	/// Dispatches on the request kind, then signs/encrypts the resulting token.
	///
	/// Defaults filled while dispatching are written back into `request`.
	pub fn handle(&self, request: &mut Request, principal: &Principal) -> Result<Response> {
		let response = match request.kind {
			RequestType::Issue => self.issue(request, principal)?,
			RequestType::Renew => self.renew(request, principal)?,
			RequestType::Validate => self.validate(request, principal)?,
			RequestType::Cancel => self.cancel(request, principal)?,
		};

		self.post_process(response, request)
	}

	fn provider_for_target(
		&self,
		operation: RequestType,
		target: &Element,
	) -> Result<Arc<dyn SecurityTokenProvider>> {
		let name = target.name();

		self.config.provider_for_token_element(&name.namespace, &name.local_name).ok_or(
			Error::NoProviderForElement {
				operation,
				namespace: name.namespace,
				local_name: name.local_name,
			},
		)
	}

	fn fill_default_lifetime(&self, request: &mut Request) {
		if request.lifetime.is_some() {
			return;
		}

		let timeout = self.config.issued_token_timeout_seconds();

		if timeout == 0 {
			return;
		}

		let timeout = Duration::seconds(i64::try_from(timeout).unwrap_or(i64::MAX));
		let lifetime = Lifetime::starting_at(OffsetDateTime::now_utc(), timeout);

		tracing::debug!(expires = ?lifetime.expires, "Filled default token lifetime.");

		request.lifetime = Some(lifetime);
	}

	/// Verifies the target against the STS public key when signing is enabled.
	///
	/// The target is cloned into a standalone document before verification.
	fn check_signature(&self, target: &Element) -> SignatureCheck {
		if !self.config.sign_issued_token() {
			tracing::trace!("Token signing is disabled; skipping signature verification.");

			return SignatureCheck::Skipped;
		}

		let Some(key_pair) = self.config.sts_key_pair() else {
			tracing::trace!("No STS key pair configured; skipping signature verification.");

			return SignatureCheck::Skipped;
		};
		let document = target.clone();

		match self.security.verify(&document, &key_pair.public) {
			Ok(true) => SignatureCheck::Valid,
			Ok(false) => SignatureCheck::Invalid,
			Err(e) => SignatureCheck::Failed(e),
		}
	}
}
impl Debug for RequestHandler {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RequestHandler")
			.field("sts_name", &self.config.sts_name())
			.field("sign_issued_token", &self.config.sign_issued_token())
			.field("encrypt_issued_token", &self.config.encrypt_issued_token())
			.finish()
	}
}

enum SignatureCheck {
	Skipped,
	Valid,
	Invalid,
	Failed(XmlSecurityError),
}

fn effective_key_size(request: &Request) -> u32 {
	request.key_size.filter(|bits| *bits > 0).unwrap_or(DEFAULT_KEY_SIZE_BITS)
}

fn observe<T>(
	operation: RequestType,
	stage: &'static str,
	f: impl FnOnce() -> Result<T>,
) -> Result<T> {
	let _span = DispatchSpan::new(operation, stage).entered();

	obs::record_outcome(operation, Outcome::Attempt);

	let result = f();

	match &result {
		Ok(_) => obs::record_outcome(operation, Outcome::Success),
		Err(e) => {
			tracing::debug!(error = %e, "Dispatch failed.");

			obs::record_outcome(operation, Outcome::Failure);
		},
	}

	result
}
