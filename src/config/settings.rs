//! Scalar STS settings.

// self
use crate::{_prelude::*, error::ConfigError};

/// Scalar settings shared by every request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StsSettings {
	/// Issuer name stamped on issued tokens.
	pub sts_name: String,
	/// Default token lifetime in seconds; zero disables the default.
	#[serde(default)]
	pub token_timeout_seconds: u64,
	/// Sign issued tokens and verify presented ones.
	#[serde(default)]
	pub sign_issued_token: bool,
	/// Encrypt issued tokens for the relying service.
	#[serde(default)]
	pub encrypt_issued_token: bool,
}
impl StsSettings {
	/// Creates settings with no default lifetime and signing/encryption disabled.
	pub fn new(sts_name: impl Into<String>) -> Self {
		Self {
			sts_name: sts_name.into(),
			token_timeout_seconds: 0,
			sign_issued_token: false,
			encrypt_issued_token: false,
		}
	}

	/// Parses settings from JSON, reporting the path of the offending value on failure.
	pub fn from_json(payload: &str) -> Result<Self, ConfigError> {
		let de = &mut serde_json::Deserializer::from_str(payload);

		Ok(serde_path_to_error::deserialize(de)?)
	}

	/// Overrides the default lifetime.
	pub fn with_token_timeout_seconds(mut self, seconds: u64) -> Self {
		self.token_timeout_seconds = seconds;

		self
	}

	/// Enables or disables token signing.
	pub fn with_signing(mut self, enabled: bool) -> Self {
		self.sign_issued_token = enabled;

		self
	}

	/// Enables or disables token encryption.
	pub fn with_encryption(mut self, enabled: bool) -> Self {
		self.encrypt_issued_token = enabled;

		self
	}
}
