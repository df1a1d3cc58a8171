//! Issue binding: provider resolution, default filling, claims, and proof-of-possession keys.

// self
use crate::{
	_prelude::*,
	context::RequestContext,
	dispatch::{self, RequestHandler},
	keys::{KeyDerivation, ProofMaterial, PublicKey},
	provider::{ClaimedAttributes, SecurityTokenProvider},
	trust::{KeyType, Principal, Request, RequestType, Response},
};

const OPERATION: RequestType = RequestType::Issue;

impl RequestHandler {
	/// Issues a token for `principal`.
	///
	/// An AppliesTo service bound to a provider wins over the requested token type, and its
	/// configured token type replaces the requested one. Key type defaults to Bearer and key
	/// size to 128 bits; both defaults, the default lifetime, and any service token type are
	/// written back into `request`.
	pub fn issue(&self, request: &mut Request, principal: &Principal) -> Result<Response> {
		dispatch::observe(OPERATION, "issue", || self.issue_token(request, principal))
	}

	fn issue_token(&self, request: &mut Request, principal: &Principal) -> Result<Response> {
		if request.document.is_none() {
			return Err(Error::MalformedRequest {
				operation: OPERATION,
				reason: "request document is missing",
			});
		}

		let (provider, service_key) = self.resolve_issue_provider(request)?;

		self.fill_default_lifetime(request);

		let key_type = request.key_type.get_or_insert(KeyType::Bearer).clone();
		let key_size = dispatch::effective_key_size(request);

		request.key_size = Some(key_size);

		tracing::debug!(%key_type, key_size, provider = %provider.id(), "Resolved issue parameters.");

		let request: &Request = request;
		let attributes = self.process_claims(request, principal)?;
		let proof = self.proof_material(request, principal, &key_type, key_size, service_key.as_ref())?;
		let mut context = RequestContext::new(request, principal);

		context.set_token_issuer(self.config.sts_name());
		context.set_service_provider_public_key(service_key);

		if let Some(attributes) = attributes {
			context.set_claimed_attributes(attributes);
		}

		context.set_proof_token_info(proof.key_info);
		provider.issue_token(&mut context).map_err(|source| Error::Provider {
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
			applies_to: request.applies_to.clone(),
			key_size: request.key_size,
			key_type: request.key_type.clone(),
			requested_security_token: Some(token.value),
			requested_proof_token: proof.proof_token,
			entropy: proof.server_entropy,
			requested_attached_reference: outputs.attached_reference,
			requested_unattached_reference: outputs.unattached_reference,
			..Default::default()
		})
	}

	fn resolve_issue_provider(
		&self,
		request: &mut Request,
	) -> Result<(Arc<dyn SecurityTokenProvider>, Option<PublicKey>)> {
		if request.applies_to.is_none() && request.token_type.is_none() {
			return Err(Error::MalformedRequest {
				operation: OPERATION,
				reason: "neither AppliesTo nor TokenType is present",
			});
		}

		let service = request.service_name().map(str::to_owned);
		let by_service = service.as_deref().and_then(|service| {
			self.config.provider_for_service(service).map(|provider| (service, provider))
		});

		if let Some((service, provider)) = by_service {
			if let Some(token_type) = self.config.token_type_for_service(service) {
				request.token_type = Some(token_type);
			}

			return Ok((provider, self.config.service_public_key(service)));
		}

		let by_token_type = request
			.token_type
			.as_deref()
			.and_then(|token_type| self.config.provider_for_token_type(token_type));

		if let Some(provider) = by_token_type {
			return Ok((provider, None));
		}

		Err(Error::NoProvider { service, token_type: request.token_type.clone() })
	}

	fn process_claims(
		&self,
		request: &Request,
		principal: &Principal,
	) -> Result<Option<ClaimedAttributes>> {
		let Some(claims) = request.claims.as_ref() else {
			return Ok(None);
		};
		let Some(processor) = self.config.claims_processor(&claims.dialect) else {
			tracing::debug!(dialect = %claims.dialect, "No claims processor for dialect; skipping claims.");

			return Ok(None);
		};

		processor.process_claims(claims, principal).map(Some).map_err(|source| {
			Error::ClaimsProcessing { dialect: claims.dialect.clone(), source }
		})
	}

	fn proof_material(
		&self,
		request: &Request,
		principal: &Principal,
		key_type: &KeyType,
		key_size: u32,
		service_key: Option<&PublicKey>,
	) -> Result<ProofMaterial> {
		let derivation = KeyDerivation::new(self.security.as_ref());

		match key_type {
			KeyType::Symmetric => Ok(derivation.symmetric(
				key_size,
				request.client_secret(),
				service_key,
				request.key_wrap_algorithm.as_deref(),
			)?),
			KeyType::Public => derivation
				.public(self.config.certificate_for_principal(principal.name()), request.use_key.as_ref())
				.ok_or_else(|| Error::PublicKeyUnavailable { principal: principal.name().to_owned() }),
			KeyType::Bearer | KeyType::Other(_) => Ok(ProofMaterial::default()),
		}
	}
}
