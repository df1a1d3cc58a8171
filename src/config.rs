//! Configuration port consumed by the dispatcher, plus an immutable in-memory implementation.
//!
//! `settings` holds the scalar STS settings (issuer name, default lifetime, signing and
//! encryption switches) loadable from JSON. `registry` holds
//! [`StaticConfiguration`], the provider/key registry assembled once at startup and shared
//! read-only across concurrent dispatches.

pub mod registry;
pub mod settings;

pub use registry::*;
pub use settings::*;

// self
use crate::{
	_prelude::*,
	keys::{Certificate, PublicKey, StsKeyPair},
	provider::{ClaimsProcessor, SecurityTokenProvider},
};

/// Read-only lookups the dispatcher performs while handling a request.
///
/// Implementations must tolerate concurrent reads and must not change while requests are in
/// flight. Every lookup reports absence with `None`; the dispatcher decides whether absence
/// is fatal.
pub trait StsConfiguration: Send + Sync {
	/// Provider bound to an AppliesTo service name.
	fn provider_for_service(&self, service: &str) -> Option<Arc<dyn SecurityTokenProvider>>;

	/// Provider bound to a token type URI.
	fn provider_for_token_type(&self, token_type: &str)
	-> Option<Arc<dyn SecurityTokenProvider>>;

	/// Provider bound to a token element's namespace and local name.
	fn provider_for_token_element(
		&self,
		namespace: &str,
		local_name: &str,
	) -> Option<Arc<dyn SecurityTokenProvider>>;

	/// Token type issued for a service.
	fn token_type_for_service(&self, service: &str) -> Option<String>;

	/// Public key of a relying service.
	fn service_public_key(&self, service: &str) -> Option<PublicKey>;

	/// Key pair used to sign issued tokens and verify presented ones.
	fn sts_key_pair(&self) -> Option<StsKeyPair>;

	/// Issuer name stamped on issued tokens.
	fn sts_name(&self) -> &str;

	/// Default token lifetime in seconds; zero disables the default.
	fn issued_token_timeout_seconds(&self) -> u64;

	/// Whether issued tokens are signed (and presented tokens verified).
	fn sign_issued_token(&self) -> bool;

	/// Whether issued tokens are encrypted for the relying service.
	fn encrypt_issued_token(&self) -> bool;

	/// Claims processor for a dialect URI.
	fn claims_processor(&self, dialect: &str) -> Option<Arc<dyn ClaimsProcessor>>;

	/// Certificate registered for a principal name.
	fn certificate_for_principal(&self, name: &str) -> Option<Certificate>;
}
