//! Cancel binding.

// self
use crate::{
	_prelude::*,
	context::RequestContext,
	dispatch::{self, RequestHandler},
	trust::{Principal, Request, RequestType, Response},
};

const OPERATION: RequestType = RequestType::Cancel;

impl RequestHandler {
	/// Cancels the token carried in `CancelTarget`.
	///
	/// The provider returning `Ok(())` is the only success signal; its errors are propagated
	/// unchanged as the source of [`Error::Provider`].
	pub fn cancel(&self, request: &Request, principal: &Principal) -> Result<Response> {
		dispatch::observe(OPERATION, "cancel", || self.cancel_token(request, principal))
	}

	fn cancel_token(&self, request: &Request, principal: &Principal) -> Result<Response> {
		if request.document.is_none() {
			return Err(Error::MalformedRequest {
				operation: OPERATION,
				reason: "request document is missing",
			});
		}

		let Some(target) = request.target.as_ref() else {
			return Err(Error::MalformedRequest {
				operation: OPERATION,
				reason: "cancel target is missing",
			});
		};
		let provider = self.provider_for_target(OPERATION, target)?;
		let mut context = RequestContext::new(request, principal);

		provider.cancel_token(&mut context).map_err(|source| Error::Provider {
			operation: OPERATION,
			provider: provider.id().to_string(),
			source,
		})?;

		Ok(Response { requested_token_cancelled: true, ..Response::for_context(request.context.as_deref()) })
	}
}
