//! `RequestSecurityTokenResponse` documents assembled by the dispatcher.

// self
use crate::{
	_prelude::*,
	trust::{AppliesTo, BinarySecret, Element, Entropy, KeyType, Lifetime, uri},
};

/// Computed-key algorithms a proof token can announce.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComputedKeyAlgorithm {
	/// Key derived with P_SHA1 over requester and STS entropy.
	Psha1,
}
impl ComputedKeyAlgorithm {
	/// Returns the algorithm URI.
	pub const fn as_uri(self) -> &'static str {
		match self {
			ComputedKeyAlgorithm::Psha1 => uri::CK_PSHA1,
		}
	}
}

/// `RequestedProofToken` content.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestedProofToken {
	/// Proof key returned directly.
	BinarySecret(BinarySecret),
	/// Requester must compute the proof key from both entropies.
	ComputedKey(ComputedKeyAlgorithm),
}

/// Validation status returned by the Validate binding.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
	/// Status code URI.
	pub code: String,
	/// Human-readable explanation.
	pub reason: String,
}
impl Status {
	/// Creates a `valid` status.
	pub fn valid(reason: impl Into<String>) -> Self {
		Self { code: uri::STATUS_CODE_VALID.into(), reason: reason.into() }
	}

	/// Creates an `invalid` status.
	pub fn invalid(reason: impl Into<String>) -> Self {
		Self { code: uri::STATUS_CODE_INVALID.into(), reason: reason.into() }
	}

	/// Returns `true` for the `valid` status code.
	pub fn is_valid(&self) -> bool {
		self.code == uri::STATUS_CODE_VALID
	}
}

/// Assembled `RequestSecurityTokenResponse`.
///
/// Which fields are meaningful depends on the binding: Issue and Renew carry a token,
/// Validate carries a [`Status`], and Cancel only sets `requested_token_cancelled`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
	/// Correlation context copied from the request.
	pub context: Option<String>,
	/// Effective token type.
	pub token_type: Option<String>,
	/// Effective lifetime.
	pub lifetime: Option<Lifetime>,
	/// AppliesTo echoed from the request.
	pub applies_to: Option<AppliesTo>,
	/// Effective key size in bits.
	pub key_size: Option<u32>,
	/// Effective key type.
	pub key_type: Option<KeyType>,
	/// Issued or renewed token.
	pub requested_security_token: Option<Element>,
	/// Proof-of-possession token.
	pub requested_proof_token: Option<RequestedProofToken>,
	/// STS entropy.
	pub entropy: Option<Entropy>,
	/// Reference to the token when it is attached to the message.
	pub requested_attached_reference: Option<Element>,
	/// Reference to the token when it is not attached to the message.
	pub requested_unattached_reference: Option<Element>,
	/// Validation status.
	pub status: Option<Status>,
	/// Set when the token has been cancelled.
	pub requested_token_cancelled: bool,
}
impl Response {
	/// Creates an empty response carrying the request's correlation context.
	pub fn for_context(context: Option<&str>) -> Self {
		Self { context: context.map(str::to_owned), ..Default::default() }
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn status_helpers_use_ws_trust_codes() {
		assert!(Status::valid("ok").is_valid());

		let invalid = Status::invalid("Validation failure: digital signature is invalid");

		assert!(!invalid.is_valid());
		assert_eq!(invalid.code, uri::STATUS_CODE_INVALID);
	}

	#[test]
	fn response_starts_with_only_the_context() {
		let response = Response::for_context(Some("ctx-1"));

		assert_eq!(response.context.as_deref(), Some("ctx-1"));
		assert!(response.requested_security_token.is_none());
		assert!(!response.requested_token_cancelled);
		assert_eq!(ComputedKeyAlgorithm::Psha1.as_uri(), uri::CK_PSHA1);
	}
}
