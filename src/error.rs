//! Engine-level error types shared across dispatch, key derivation, and configuration.

// self
use crate::{_prelude::*, provider::ProviderError, trust::RequestType, xmlsec::XmlSecurityError};

/// Engine-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Canonical engine error surfaced by every dispatch operation.
///
/// Only fatal conditions live here. Soft outcomes (no claims processor for a dialect, no
/// encrypting key, a bad signature on a validate request) are absorbed by the dispatcher and
/// only change the response shape.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Proof-of-possession material could not be produced.
	#[error(transparent)]
	KeyMaterial(#[from] KeyMaterialError),

	/// Request lacks an element the operation cannot proceed without.
	#[error("Malformed {operation} request: {reason}.")]
	MalformedRequest {
		/// Operation that rejected the request.
		operation: RequestType,
		/// Which part of the request is missing.
		reason: &'static str,
	},
	/// Neither the AppliesTo service nor the token type resolved to a provider.
	#[error("Unable to find a token provider for the token request (service: {service:?}, token type: {token_type:?}).")]
	NoProvider {
		/// Service name parsed from AppliesTo, when present.
		service: Option<String>,
		/// Requested (or service-configured) token type, when present.
		token_type: Option<String>,
	},
	/// No provider is bound to the target token element.
	#[error("No security token provider configured for {namespace}:{local_name} ({operation}).")]
	NoProviderForElement {
		/// Operation that attempted the lookup.
		operation: RequestType,
		/// Namespace URI of the target token element (empty when unqualified).
		namespace: String,
		/// Local name of the target token element.
		local_name: String,
	},
	/// PublicKey proof requested but no certificate or usable UseKey was found.
	#[error("Unable to locate client public key for principal `{principal}`.")]
	PublicKeyUnavailable {
		/// Caller principal name used for the certificate lookup.
		principal: String,
	},
	/// Provider raised an error while handling the request.
	#[error("Security token provider `{provider}` failed to {operation} the token.")]
	Provider {
		/// Operation delegated to the provider.
		operation: RequestType,
		/// Provider identifier.
		provider: String,
		/// Error returned by the provider, unchanged.
		#[source]
		source: ProviderError,
	},
	/// Provider returned without producing the output the operation requires.
	#[error("Token produced by provider `{provider}` during {operation} is missing.")]
	ProviderContract {
		/// Operation delegated to the provider.
		operation: RequestType,
		/// Provider identifier.
		provider: String,
	},
	/// Claims processor failed on the supplied claims.
	#[error("Claims processor for dialect `{dialect}` failed.")]
	ClaimsProcessing {
		/// Claims dialect URI.
		dialect: String,
		/// Error returned by the processor.
		#[source]
		source: ProviderError,
	},
	/// Target token signature could not be verified (fatal for renew only).
	#[error("Validation failure during renewal: {reason}.")]
	SignatureInvalid {
		/// Human-readable failure description.
		reason: String,
		/// Verification failure, when the primitive itself failed.
		#[source]
		source: Option<XmlSecurityError>,
	},
	/// Issued or renewed token could not be signed.
	#[error("Failed to sign security token: {reason}.")]
	TokenSigning {
		/// Human-readable failure description.
		reason: String,
		/// Signing failure, when the primitive itself failed.
		#[source]
		source: Option<XmlSecurityError>,
	},
	/// Issued or renewed token could not be encrypted.
	#[error("Unable to encrypt security token.")]
	TokenEncryption(#[source] XmlSecurityError),
}

/// Configuration and validation failures raised while assembling the engine.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Settings document could not be parsed.
	#[error("STS settings are malformed at `{path}`.")]
	SettingsParse {
		/// JSON path to the offending value.
		path: String,
		/// Structured parsing failure.
		#[source]
		source: serde_json::Error,
	},
	/// Service binding declares an empty token type.
	#[error("Service `{service}` must declare a token type.")]
	MissingServiceTokenType {
		/// Service name.
		service: String,
	},
	/// Token element binding declares an empty local name.
	#[error("Token element binding for namespace `{namespace}` must declare a local name.")]
	MissingElementName {
		/// Namespace URI of the binding.
		namespace: String,
	},
	/// Token type binding declares an empty URI.
	#[error("Token type bindings require a non-empty URI.")]
	EmptyTokenType,
}
impl From<serde_path_to_error::Error<serde_json::Error>> for ConfigError {
	fn from(e: serde_path_to_error::Error<serde_json::Error>) -> Self {
		let path = e.path().to_string();

		Self::SettingsParse { path, source: e.into_inner() }
	}
}

/// Failures raised while deriving proof-of-possession key material.
#[derive(Debug, ThisError)]
pub enum KeyMaterialError {
	/// Combined secret could not be computed.
	#[error("Error generating combined secret key: {reason}.")]
	Combination {
		/// Underlying failure description.
		reason: String,
	},
	/// Requested key size cannot produce any key bytes.
	#[error("Key size of {bits} bits is too small to derive key material.")]
	KeySizeTooSmall {
		/// Requested key size in bits.
		bits: u32,
	},
	/// Proof-token key could not be wrapped for the service.
	#[error("Unable to wrap the proof-of-possession key for the service provider.")]
	KeyWrap(#[source] XmlSecurityError),
}
