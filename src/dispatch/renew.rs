//! Renew binding.

// self
use crate::{
	_prelude::*,
	context::RequestContext,
	dispatch::{self, RequestHandler, SignatureCheck},
	trust::{Principal, Request, RequestType, Response},
};

const OPERATION: RequestType = RequestType::Renew;

impl RequestHandler {
	/// Renews the token carried in `RenewTarget`.
	///
	/// When signing is enabled and an STS key pair is configured, a target whose signature
	/// does not verify aborts the call with [`Error::SignatureInvalid`] before any provider is
	/// consulted.
	pub fn renew(&self, request: &mut Request, principal: &Principal) -> Result<Response> {
		dispatch::observe(OPERATION, "renew", || self.renew_token(request, principal))
	}

	fn renew_token(&self, request: &mut Request, principal: &Principal) -> Result<Response> {
		let Some(target) = request.target.as_ref() else {
			return Err(Error::MalformedRequest {
				operation: OPERATION,
				reason: "renew target is missing",
			});
		};

		match self.check_signature(target) {
			SignatureCheck::Skipped | SignatureCheck::Valid => {},
			SignatureCheck::Invalid => {
				return Err(Error::SignatureInvalid {
					reason: "digital signature is invalid".into(),
					source: None,
				});
			},
			SignatureCheck::Failed(e) => {
				return Err(Error::SignatureInvalid {
					reason: "unable to verify digital signature".into(),
					source: Some(e),
				});
			},
		}

		let provider = self.provider_for_target(OPERATION, target)?;

		self.fill_default_lifetime(request);

		let request: &Request = request;
		let mut context = RequestContext::new(request, principal);

		context.set_token_issuer(self.config.sts_name());
		provider.renew_token(&mut context).map_err(|source| Error::Provider {
			operation: OPERATION,
			provider: provider.id().to_string(),
			source,
		})?;

		let outputs = context.into_outputs();
		let token = outputs.security_token.ok_or_else(|| Error::ProviderContract {
			operation: OPERATION,
			provider: provider.id().to_string(),
		})?;

		Ok(Response {
			context: request.context.clone(),
			token_type: request.token_type.clone().or(Some(token.token_type)),
			lifetime: request.lifetime,
			requested_security_token: Some(token.value),
			requested_attached_reference: outputs.attached_reference,
			requested_unattached_reference: outputs.unattached_reference,
			..Default::default()
		})
	}
}
