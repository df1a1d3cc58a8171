//! Validate binding.

// self
use crate::{
	_prelude::*,
	context::RequestContext,
	dispatch::{self, RequestHandler, SignatureCheck},
	trust::{Principal, Request, RequestType, Response, Status, uri},
};

const OPERATION: RequestType = RequestType::Validate;

impl RequestHandler {
	/// Validates the token carried in `ValidateTarget`.
	///
	/// A bad or unverifiable signature never fails the call: it yields an `invalid`
	/// [`Status`] and the provider is not consulted. The token type defaults to the WS-Trust
	/// status token type.
	pub fn validate(&self, request: &mut Request, principal: &Principal) -> Result<Response> {
		dispatch::observe(OPERATION, "validate", || self.validate_token(request, principal))
	}

	fn validate_token(&self, request: &mut Request, principal: &Principal) -> Result<Response> {
		if request.document.is_none() {
			return Err(Error::MalformedRequest {
				operation: OPERATION,
				reason: "request document is missing",
			});
		}

		let Some(target) = request.target.clone() else {
			return Err(Error::MalformedRequest {
				operation: OPERATION,
				reason: "validate target is missing",
			});
		};

		if request.token_type.is_none() {
			request.token_type = Some(uri::STATUS_TYPE.to_owned());
		}

		let request: &Request = request;
		let provider = self.provider_for_target(OPERATION, &target)?;
		let signature_status = match self.check_signature(&target) {
			SignatureCheck::Skipped | SignatureCheck::Valid => None,
			SignatureCheck::Invalid =>
				Some(Status::invalid("Validation failure: digital signature is invalid")),
			SignatureCheck::Failed(e) => Some(Status::invalid(format!(
				"Validation failure: unable to verify digital signature: {e}"
			))),
		};
		let status = match signature_status {
			Some(status) => {
				tracing::debug!(reason = %status.reason, "Target signature rejected; skipping provider validation.");

				Some(status)
			},
			None => {
				let mut context = RequestContext::new(request, principal);

				provider.validate_token(&mut context).map_err(|source| Error::Provider {
					operation: OPERATION,
					provider: provider.id().to_string(),
					source,
				})?;

				let status = context.into_outputs().status;

				if status.is_none() {
					tracing::warn!(provider = %provider.id(), "Provider returned no validation status.");
				}

				status
			},
		};

		Ok(Response {
			context: request.context.clone(),
			token_type: request.token_type.clone(),
			status,
			..Default::default()
		})
	}
}
