//! Pluggable token semantics: security token providers and claims processors.
//!
//! Providers own everything the engine treats as opaque: the token format, how a token is
//! renewed, what makes it valid, and what cancelling it means. Each operation reads its
//! inputs from and writes its outputs to the per-call [`RequestContext`].

// self
use crate::{
	_prelude::*,
	context::RequestContext,
	trust::{Claims, Element, Principal, ProviderId},
};

type BoxError = Box<dyn StdError + Send + Sync>;

/// Failure reported by a provider or claims processor.
#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct ProviderError {
	message: String,
	#[source]
	source: Option<BoxError>,
}
impl ProviderError {
	/// Creates an error from a message.
	pub fn new(message: impl Into<String>) -> Self {
		Self { message: message.into(), source: None }
	}

	/// Attaches the underlying cause.
	pub fn with_source(mut self, source: impl 'static + StdError + Send + Sync) -> Self {
		self.source = Some(Box::new(source));

		self
	}

	/// Human-readable failure description.
	pub fn message(&self) -> &str {
		&self.message
	}
}

/// Token produced by a provider during issue or renew.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SecurityToken {
	/// Token type URI.
	pub token_type: String,
	/// Token element placed in `RequestedSecurityToken`.
	pub value: Element,
}
impl SecurityToken {
	/// Creates a token of the provided type.
	pub fn new(token_type: impl Into<String>, value: Element) -> Self {
		Self { token_type: token_type.into(), value }
	}
}

/// Attribute name to values mapping produced by claims processing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimedAttributes(pub BTreeMap<String, Vec<String>>);
impl ClaimedAttributes {
	/// Adds a value for the provided attribute.
	pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
		self.0.entry(name.into()).or_default().push(value.into());
	}

	/// Returns the values recorded for an attribute.
	pub fn get(&self, name: &str) -> Option<&[String]> {
		self.0.get(name).map(Vec::as_slice)
	}

	/// Returns `true` when no attribute was claimed.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

/// Token semantics plugged into the dispatcher, one instance per binding.
///
/// Implementors must be `Send + Sync`; the same instance serves concurrent calls, each with
/// its own [`RequestContext`].
pub trait SecurityTokenProvider: Send + Sync {
	/// Identifier used in logs and error messages.
	fn id(&self) -> &ProviderId;

	/// Issues a token and stores it with [`RequestContext::set_security_token`].
	fn issue_token(&self, context: &mut RequestContext<'_>) -> Result<(), ProviderError>;

	/// Renews the request target and stores the new token on the context.
	fn renew_token(&self, context: &mut RequestContext<'_>) -> Result<(), ProviderError>;

	/// Validates the request target and records the outcome with
	/// [`RequestContext::set_status`].
	fn validate_token(&self, context: &mut RequestContext<'_>) -> Result<(), ProviderError>;

	/// Cancels the request target. Returning `Ok(())` means the token is cancelled.
	fn cancel_token(&self, context: &mut RequestContext<'_>) -> Result<(), ProviderError>;
}

/// Dialect-specific extraction of caller attributes from a `Claims` block.
pub trait ClaimsProcessor: Send + Sync {
	/// Maps the claims the caller asked for onto attributes for the issued token.
	fn process_claims(
		&self,
		claims: &Claims,
		principal: &Principal,
	) -> Result<ClaimedAttributes, ProviderError>;
}
