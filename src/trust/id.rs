//! Strongly typed names used for provider resolution and caller identity.

// std
use std::borrow::Borrow;
// self
use crate::_prelude::*;

macro_rules! def_id {
	($name:ident, $kind:literal, $doc:literal) => {
		#[doc = $doc]
		#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
		#[serde(try_from = "String", into = "String")]
		pub struct $name(String);
		impl $name {
			/// Validates `value` and wraps it.
			pub fn new(value: impl Into<String>) -> Result<Self, IdentifierError> {
				checked($kind, value.into()).map(Self)
			}

			/// Returns the underlying name.
			pub fn as_str(&self) -> &str {
				&self.0
			}
		}
		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				&self.0
			}
		}
		impl Borrow<str> for $name {
			fn borrow(&self) -> &str {
				&self.0
			}
		}
		impl TryFrom<String> for $name {
			type Error = IdentifierError;

			fn try_from(value: String) -> Result<Self, Self::Error> {
				Self::new(value)
			}
		}
		impl From<$name> for String {
			fn from(value: $name) -> Self {
				value.0
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				write!(f, "{}({})", $kind, self.0)
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str(&self.0)
			}
		}
	};
}

const IDENTIFIER_MAX_LEN: usize = 2048;

/// Error returned when identifier validation fails.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum IdentifierError {
	/// The identifier was empty.
	#[error("{kind} identifier cannot be empty.")]
	Empty {
		/// Kind of identifier (service, provider).
		kind: &'static str,
	},
	/// The identifier contains whitespace characters.
	#[error("{kind} identifier contains whitespace.")]
	ContainsWhitespace {
		/// Kind of identifier (service, provider).
		kind: &'static str,
	},
	/// The identifier exceeded the allowed byte count.
	#[error("{kind} identifier exceeds {max} characters.")]
	TooLong {
		/// Kind of identifier (service, provider).
		kind: &'static str,
		/// Maximum permitted length.
		max: usize,
	},
}

def_id! { ServiceName, "Service", "Service endpoint named by an AppliesTo element." }
def_id! { ProviderId, "Provider", "Identifier reported by a security token provider." }

/// Authenticated caller on whose behalf a request is processed.
///
/// Names are free-form (distinguished names routinely contain spaces) and are only required
/// to be non-empty.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Principal {
	name: String,
}
impl Principal {
	/// Creates a principal from its authenticated name.
	pub fn new(name: impl Into<String>) -> Result<Self, IdentifierError> {
		let name = name.into();

		if name.trim().is_empty() {
			return Err(IdentifierError::Empty { kind: "Principal" });
		}

		Ok(Self { name })
	}

	/// Returns the principal name used for certificate lookups.
	pub fn name(&self) -> &str {
		&self.name
	}
}
impl Display for Principal {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.name)
	}
}

fn checked(kind: &'static str, value: String) -> Result<String, IdentifierError> {
	match value.len() {
		0 => Err(IdentifierError::Empty { kind }),
		len if len > IDENTIFIER_MAX_LEN => Err(IdentifierError::TooLong { kind, max: IDENTIFIER_MAX_LEN }),
		_ if value.chars().any(char::is_whitespace) => Err(IdentifierError::ContainsWhitespace { kind }),
		_ => Ok(value),
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn service_names_reject_whitespace_and_empty_values() {
		assert!(ServiceName::new(" http://services.example.org/a").is_err());
		assert!(ServiceName::new("").is_err());

		let service = ServiceName::new("http://services.example.org/provider1")
			.expect("Service fixture should be considered valid.");

		assert_eq!(service.as_str(), "http://services.example.org/provider1");
		assert!(ProviderId::new("with space").is_err());
	}

	#[test]
	fn serde_round_trip_enforces_validation() {
		let provider: ProviderId =
			serde_json::from_str("\"saml20\"").expect("Provider should deserialize successfully.");

		assert_eq!(provider.as_ref(), "saml20");
		assert!(serde_json::from_str::<ProviderId>("\"saml 20\"").is_err());
	}

	#[test]
	fn principal_allows_distinguished_names() {
		let principal = Principal::new("CN=Jane Doe, O=Example")
			.expect("Distinguished names should be accepted.");

		assert_eq!(principal.name(), "CN=Jane Doe, O=Example");
		assert!(Principal::new("   ").is_err());
	}

	#[test]
	fn borrow_supports_fast_lookup() {
		let map: HashMap<ServiceName, u8> = HashMap::from_iter([(
			ServiceName::new("svc-a").expect("Service used for lookup should be valid."),
			7_u8,
		)]);

		assert_eq!(map.get("svc-a"), Some(&7));
	}
}
