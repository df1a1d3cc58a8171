//! Immutable provider, key, and certificate registry.

// self
use crate::{
	_prelude::*,
	config::{StsConfiguration, StsSettings},
	error::ConfigError,
	keys::{Certificate, PublicKey, StsKeyPair},
	provider::{ClaimsProcessor, SecurityTokenProvider},
	trust::{ServiceName, TokenElementName},
};

/// Provider and keys configured for one relying service.
#[derive(Clone)]
pub struct ServiceBinding {
	/// Provider issuing tokens for the service.
	pub provider: Arc<dyn SecurityTokenProvider>,
	/// Token type issued for the service; overrides whatever the request asked for.
	pub token_type: String,
	/// Service public key used to wrap proof keys and encrypt issued tokens.
	pub public_key: Option<PublicKey>,
}
impl Debug for ServiceBinding {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ServiceBinding")
			.field("provider", self.provider.id())
			.field("token_type", &self.token_type)
			.field("public_key", &self.public_key)
			.finish()
	}
}

/// [`StsConfiguration`] backed by maps that never change after [`build`](StaticConfigurationBuilder::build).
pub struct StaticConfiguration {
	settings: StsSettings,
	services: HashMap<ServiceName, ServiceBinding>,
	token_types: HashMap<String, Arc<dyn SecurityTokenProvider>>,
	token_elements: HashMap<TokenElementName, Arc<dyn SecurityTokenProvider>>,
	claims_processors: HashMap<String, Arc<dyn ClaimsProcessor>>,
	certificates: HashMap<String, Certificate>,
	key_pair: Option<StsKeyPair>,
}
impl StaticConfiguration {
	/// Creates a builder seeded with the provided settings.
	pub fn builder(settings: StsSettings) -> StaticConfigurationBuilder {
		StaticConfigurationBuilder::new(settings)
	}

	/// Scalar settings.
	pub fn settings(&self) -> &StsSettings {
		&self.settings
	}
}
impl Debug for StaticConfiguration {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("StaticConfiguration")
			.field("settings", &self.settings)
			.field("services", &self.services)
			.field("token_types", &self.token_types.keys().collect::<Vec<_>>())
			.field("token_elements", &self.token_elements.keys().collect::<Vec<_>>())
			.field("claims_dialects", &self.claims_processors.keys().collect::<Vec<_>>())
			.field("certificates", &self.certificates.len())
			.field("key_pair_set", &self.key_pair.is_some())
			.finish()
	}
}
impl StsConfiguration for StaticConfiguration {
	fn provider_for_service(&self, service: &str) -> Option<Arc<dyn SecurityTokenProvider>> {
		self.services.get(service).map(|binding| binding.provider.clone())
	}

	fn provider_for_token_type(
		&self,
		token_type: &str,
	) -> Option<Arc<dyn SecurityTokenProvider>> {
		self.token_types.get(token_type).cloned()
	}

	fn provider_for_token_element(
		&self,
		namespace: &str,
		local_name: &str,
	) -> Option<Arc<dyn SecurityTokenProvider>> {
		self.token_elements.get(&TokenElementName::new(namespace, local_name)).cloned()
	}

	fn token_type_for_service(&self, service: &str) -> Option<String> {
		self.services.get(service).map(|binding| binding.token_type.clone())
	}

	fn service_public_key(&self, service: &str) -> Option<PublicKey> {
		self.services.get(service).and_then(|binding| binding.public_key.clone())
	}

	fn sts_key_pair(&self) -> Option<StsKeyPair> {
		self.key_pair.clone()
	}

	fn sts_name(&self) -> &str {
		&self.settings.sts_name
	}

	fn issued_token_timeout_seconds(&self) -> u64 {
		self.settings.token_timeout_seconds
	}

	fn sign_issued_token(&self) -> bool {
		self.settings.sign_issued_token
	}

	fn encrypt_issued_token(&self) -> bool {
		self.settings.encrypt_issued_token
	}

	fn claims_processor(&self, dialect: &str) -> Option<Arc<dyn ClaimsProcessor>> {
		self.claims_processors.get(dialect).cloned()
	}

	fn certificate_for_principal(&self, name: &str) -> Option<Certificate> {
		self.certificates.get(name).cloned()
	}
}

/// Builder for [`StaticConfiguration`] values.
pub struct StaticConfigurationBuilder {
	settings: StsSettings,
	services: Vec<(ServiceName, ServiceBinding)>,
	token_types: Vec<(String, Arc<dyn SecurityTokenProvider>)>,
	token_elements: Vec<(TokenElementName, Arc<dyn SecurityTokenProvider>)>,
	claims_processors: HashMap<String, Arc<dyn ClaimsProcessor>>,
	certificates: HashMap<String, Certificate>,
	key_pair: Option<StsKeyPair>,
}
impl StaticConfigurationBuilder {
	/// Creates a builder seeded with the provided settings.
	pub fn new(settings: StsSettings) -> Self {
		Self {
			settings,
			services: Vec::new(),
			token_types: Vec::new(),
			token_elements: Vec::new(),
			claims_processors: HashMap::new(),
			certificates: HashMap::new(),
			key_pair: None,
		}
	}

	/// Binds a relying service to a provider and token type.
	pub fn service(
		mut self,
		service: ServiceName,
		token_type: impl Into<String>,
		provider: Arc<dyn SecurityTokenProvider>,
		public_key: Option<PublicKey>,
	) -> Self {
		self.services
			.push((service, ServiceBinding { provider, token_type: token_type.into(), public_key }));

		self
	}

	/// Binds a token type URI to a provider.
	pub fn token_type(
		mut self,
		token_type: impl Into<String>,
		provider: Arc<dyn SecurityTokenProvider>,
	) -> Self {
		self.token_types.push((token_type.into(), provider));

		self
	}

	/// Binds a token element name to a provider.
	pub fn token_element(
		mut self,
		name: TokenElementName,
		provider: Arc<dyn SecurityTokenProvider>,
	) -> Self {
		self.token_elements.push((name, provider));

		self
	}

	/// Registers a claims processor for a dialect URI.
	pub fn claims_processor(
		mut self,
		dialect: impl Into<String>,
		processor: Arc<dyn ClaimsProcessor>,
	) -> Self {
		self.claims_processors.insert(dialect.into(), processor);

		self
	}

	/// Registers the certificate of a principal.
	pub fn certificate(mut self, principal: impl Into<String>, certificate: Certificate) -> Self {
		self.certificates.insert(principal.into(), certificate);

		self
	}

	/// Sets the STS key pair.
	pub fn key_pair(mut self, key_pair: StsKeyPair) -> Self {
		self.key_pair = Some(key_pair);

		self
	}

	/// Consumes the builder and validates the resulting configuration.
	///
	/// Later bindings for the same criterion replace earlier ones.
	pub fn build(self) -> Result<StaticConfiguration, ConfigError> {
		let mut services = HashMap::with_capacity(self.services.len());

		for (service, binding) in self.services {
			if binding.token_type.trim().is_empty() {
				return Err(ConfigError::MissingServiceTokenType { service: service.into() });
			}

			services.insert(service, binding);
		}

		let mut token_types = HashMap::with_capacity(self.token_types.len());

		for (token_type, provider) in self.token_types {
			if token_type.trim().is_empty() {
				return Err(ConfigError::EmptyTokenType);
			}

			token_types.insert(token_type, provider);
		}

		let mut token_elements = HashMap::with_capacity(self.token_elements.len());

		for (name, provider) in self.token_elements {
			if name.local_name.trim().is_empty() {
				return Err(ConfigError::MissingElementName { namespace: name.namespace });
			}

			token_elements.insert(name, provider);
		}

		Ok(StaticConfiguration {
			settings: self.settings,
			services,
			token_types,
			token_elements,
			claims_processors: self.claims_processors,
			certificates: self.certificates,
			key_pair: self.key_pair,
		})
	}
}
impl Debug for StaticConfigurationBuilder {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("StaticConfigurationBuilder")
			.field("settings", &self.settings)
			.field("services", &self.services.len())
			.field("token_types", &self.token_types.len())
			.field("token_elements", &self.token_elements.len())
			.finish()
	}
}
