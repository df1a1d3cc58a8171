//! Signing and encryption of issued or renewed tokens.

// self
use crate::{
	_prelude::*,
	dispatch::{self, RequestHandler},
	keys::{self, StsKeyPair},
	obs::DispatchSpan,
	trust::{Element, Request, RequestType, Response},
	xmlsec::SignatureRequest,
};

impl RequestHandler {
	/// Signs and/or encrypts the token inside an Issue or Renew response.
	///
	/// Responses to Validate and Cancel, and responses without a token, are returned
	/// untouched. A missing encryption key for the relying service only logs a warning and
	/// leaves the token in the clear.
	pub fn post_process(&self, mut response: Response, request: &Request) -> Result<Response> {
		if !matches!(request.kind, RequestType::Issue | RequestType::Renew) {
			return Ok(response);
		}

		let Some(token) = response.requested_security_token.as_mut() else {
			return Ok(response);
		};
		let _span = DispatchSpan::new(request.kind, "post_process").entered();

		token.normalize_namespaces();

		if self.config.sign_issued_token() {
			match self.config.sts_key_pair() {
				Some(key_pair) => self.sign_token(token, &key_pair, request)?,
				None => tracing::debug!("No STS key pair configured; token left unsigned."),
			}
		}
		if self.config.encrypt_issued_token() {
			self.encrypt_token(token, request)?;
		}

		Ok(response)
	}

	fn sign_token(&self, token: &mut Element, key_pair: &StsKeyPair, request: &Request) -> Result<()> {
		let Some(id) = token.id() else {
			return Err(Error::TokenSigning {
				reason: format!("token element `{}` has no ID attribute", token.name()),
				source: None,
			});
		};
		let reference_uri = format!("#{id}");
		let mut signature = SignatureRequest::new(key_pair, &reference_uri);

		if let Some(algorithm) = request.signature_algorithm.as_deref() {
			signature = signature.with_signature_algorithm(algorithm);
		}

		self.security.sign(token, signature).map_err(|e| Error::TokenSigning {
			reason: "signature generation failed".into(),
			source: Some(e),
		})
	}

	fn encrypt_token(&self, token: &mut Element, request: &Request) -> Result<()> {
		let service = request.service_name();
		let Some(public_key) = service.and_then(|service| self.config.service_public_key(service))
		else {
			tracing::warn!(
				service = service.unwrap_or_default(),
				"No encrypting key found for the relying service; token left unencrypted."
			);

			return Ok(());
		};
		let key_size = dispatch::effective_key_size(request);
		let secret = keys::random_secret(keys::secret_len(key_size)?);

		self.security
			.encrypt_element(token, &public_key, secret.expose(), key_size)
			.map_err(Error::TokenEncryption)
	}
}
