//! Proof-of-possession key derivation.
//!
//! Symmetric requests get a fresh STS secret, combined with the requester secret through
//! P_SHA1 when one is supplied. Public-key requests bind the token to the requester's
//! certificate or to the key named by its `UseKey` hint.

pub mod material;
pub mod psha1;

pub use material::*;
pub use psha1::p_sha1;

// crates.io
use rand::RngCore;
use zeroize::Zeroizing;
// self
use crate::{
	_prelude::*,
	error::KeyMaterialError,
	trust::{
		BinarySecret, BinarySecretType, ComputedKeyAlgorithm, Entropy, RequestedProofToken,
		SecretBytes, UseKey, uri,
	},
	xmlsec::XmlSecurity,
};

/// Key size used when a request names none (or zero).
pub const DEFAULT_KEY_SIZE_BITS: u32 = 128;

/// Proof-of-possession material produced for one issue request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProofMaterial {
	/// Proof token returned to the requester.
	pub proof_token: Option<RequestedProofToken>,
	/// STS entropy returned to the requester.
	pub server_entropy: Option<Entropy>,
	/// Key info handed to the provider.
	pub key_info: Option<KeyInfo>,
}

/// Derives proof-of-possession material, delegating key wrapping to [`XmlSecurity`].
#[derive(Clone, Copy)]
pub struct KeyDerivation<'a> {
	security: &'a dyn XmlSecurity,
}
impl<'a> KeyDerivation<'a> {
	/// Creates a derivation engine backed by the provided XML security services.
	pub fn new(security: &'a dyn XmlSecurity) -> Self {
		Self { security }
	}

	/// Produces symmetric proof material of `key_size_bits / 8` bytes.
	///
	/// With a non-empty `client_secret` the proof key is `P_SHA1(client, server)` and the proof
	/// token only announces the computed-key algorithm. Without one, the STS secret itself is
	/// the proof key. The STS secret is returned as entropy in both cases so the requester can
	/// recompute the key. When `service_key` is set the proof key is wrapped for it.
	pub fn symmetric(
		&self,
		key_size_bits: u32,
		client_secret: Option<&[u8]>,
		service_key: Option<&PublicKey>,
		wrap_algorithm: Option<&str>,
	) -> Result<ProofMaterial, KeyMaterialError> {
		let length = secret_len(key_size_bits)?;
		let server_secret = random_secret(length);
		let server_binary_secret = BinarySecret::nonce(server_secret.clone());

		match client_secret.filter(|secret| !secret.is_empty()) {
			Some(client_secret) => {
				let combined = p_sha1(client_secret, server_secret.expose(), length)?;
				let key_info = self.key_info(combined, service_key, wrap_algorithm)?;

				Ok(ProofMaterial {
					proof_token: Some(RequestedProofToken::ComputedKey(ComputedKeyAlgorithm::Psha1)),
					server_entropy: Some(Entropy::BinarySecret(server_binary_secret)),
					key_info: Some(key_info),
				})
			},
			None => {
				let key_info = self.key_info(server_secret, service_key, wrap_algorithm)?;

				Ok(ProofMaterial {
					proof_token: Some(RequestedProofToken::BinarySecret(server_binary_secret.clone())),
					server_entropy: Some(Entropy::BinarySecret(server_binary_secret)),
					key_info: Some(key_info),
				})
			},
		}
	}

	/// Produces public-key proof material.
	///
	/// A certificate registered for the caller wins over the `UseKey` hint. The hint's content
	/// is passed through untouched; a hint without content yields no key info. Returns `None`
	/// when neither source exists.
	pub fn public(
		&self,
		certificate: Option<Certificate>,
		use_key: Option<&UseKey>,
	) -> Option<ProofMaterial> {
		if let Some(certificate) = certificate {
			return Some(ProofMaterial {
				key_info: Some(KeyInfo::X509Certificate(certificate)),
				..Default::default()
			});
		}

		use_key.map(|use_key| ProofMaterial {
			key_info: use_key.key.clone().map(KeyInfo::UseKey),
			..Default::default()
		})
	}

	fn key_info(
		&self,
		secret: SecretBytes,
		service_key: Option<&PublicKey>,
		wrap_algorithm: Option<&str>,
	) -> Result<KeyInfo, KeyMaterialError> {
		match service_key {
			Some(public_key) => self
				.security
				.wrap_key(
					secret.expose(),
					public_key,
					wrap_algorithm.unwrap_or(uri::KEY_WRAP_RSA_OAEP),
				)
				.map(KeyInfo::EncryptedKey)
				.map_err(KeyMaterialError::KeyWrap),
			None => Ok(KeyInfo::BinarySecret(BinarySecret {
				kind: Some(BinarySecretType::SymmetricKey),
				value: secret,
			})),
		}
	}
}
impl Debug for KeyDerivation<'_> {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("KeyDerivation(..)")
	}
}

/// Generates `length` random bytes from the thread-local CSPRNG.
pub fn random_secret(length: usize) -> SecretBytes {
	let mut bytes = Zeroizing::new(vec![0_u8; length]);

	rand::rng().fill_bytes(&mut bytes);

	bytes.into()
}

/// Converts a key size in bits into a secret length in bytes.
pub fn secret_len(key_size_bits: u32) -> Result<usize, KeyMaterialError> {
	match usize::try_from(key_size_bits / 8) {
		Ok(0) | Err(_) => Err(KeyMaterialError::KeySizeTooSmall { bits: key_size_bits }),
		Ok(length) => Ok(length),
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::{trust::Element, xmlsec::{SignatureRequest, XmlSecurityError}};

	struct RecordingWrapper;
	impl XmlSecurity for RecordingWrapper {
		fn sign(
			&self,
			_element: &mut Element,
			_request: SignatureRequest<'_>,
		) -> Result<(), XmlSecurityError> {
			Ok(())
		}

		fn verify(&self, _document: &Element, _key: &PublicKey) -> Result<bool, XmlSecurityError> {
			Ok(true)
		}

		fn encrypt_element(
			&self,
			_element: &mut Element,
			_public_key: &PublicKey,
			_secret: &[u8],
			_key_size_bits: u32,
		) -> Result<(), XmlSecurityError> {
			Ok(())
		}

		fn wrap_key(
			&self,
			secret: &[u8],
			public_key: &PublicKey,
			algorithm: &str,
		) -> Result<EncryptedKey, XmlSecurityError> {
			Ok(EncryptedKey {
				algorithm: algorithm.into(),
				recipient: public_key.fingerprint(),
				cipher_value: secret.iter().rev().copied().collect(),
			})
		}
	}

	fn server_secret(material: &ProofMaterial) -> Vec<u8> {
		match material.server_entropy.as_ref().and_then(Entropy::binary_secret) {
			Some(secret) => secret.value.expose().to_vec(),
			None => panic!("Symmetric material must expose the server entropy."),
		}
	}

	#[test]
	fn symmetric_without_client_secret_returns_server_secret() {
		let derivation = KeyDerivation::new(&RecordingWrapper);
		let material =
			derivation.symmetric(256, Some(&[][..]), None, None).expect("Derivation should succeed.");
		let server = server_secret(&material);

		assert_eq!(server.len(), 32);

		let Some(RequestedProofToken::BinarySecret(proof)) = &material.proof_token else {
			panic!("Proof token should carry the server secret.");
		};

		assert_eq!(proof.value.expose(), server.as_slice());
		assert_eq!(proof.kind, Some(BinarySecretType::Nonce));
		assert!(matches!(
			&material.key_info,
			Some(KeyInfo::BinarySecret(secret)) if secret.value.expose() == server.as_slice()
		));
	}

	#[test]
	fn symmetric_with_client_secret_computes_psha1_key() {
		let derivation = KeyDerivation::new(&RecordingWrapper);
		let client = [0x42_u8; 32];
		let material = derivation
			.symmetric(256, Some(&client[..]), None, None)
			.expect("Derivation should succeed.");
		let server = server_secret(&material);
		let expected = p_sha1(&client, &server, 32).expect("P_SHA1 should succeed.");

		assert_eq!(
			material.proof_token,
			Some(RequestedProofToken::ComputedKey(ComputedKeyAlgorithm::Psha1))
		);
		assert!(matches!(
			&material.key_info,
			Some(KeyInfo::BinarySecret(secret)) if secret.value == expected
		));
	}

	#[test]
	fn symmetric_wraps_for_service_key_with_default_algorithm() {
		let derivation = KeyDerivation::new(&RecordingWrapper);
		let service_key = PublicKey::from_der(vec![1_u8, 2, 3]);
		let material = derivation
			.symmetric(128, None, Some(&service_key), None)
			.expect("Derivation should succeed.");

		let Some(KeyInfo::EncryptedKey(wrapped)) = &material.key_info else {
			panic!("Key info should be wrapped for the service key.");
		};

		assert_eq!(wrapped.algorithm, uri::KEY_WRAP_RSA_OAEP);
		assert_eq!(wrapped.recipient, service_key.fingerprint());
		assert_eq!(wrapped.cipher_value.len(), 16);
	}

	#[test]
	fn tiny_key_sizes_are_rejected() {
		let derivation = KeyDerivation::new(&RecordingWrapper);

		assert!(matches!(
			derivation.symmetric(7, None, None, None),
			Err(KeyMaterialError::KeySizeTooSmall { bits: 7 })
		));
	}

	#[test]
	fn public_prefers_certificate_then_use_key() {
		let derivation = KeyDerivation::new(&RecordingWrapper);
		let certificate = Certificate::from_der(vec![0x30_u8]);
		let use_key = UseKey { key: Some(Element::unqualified("KeyValue")), sig: None };
		let material = derivation
			.public(Some(certificate.clone()), Some(&use_key))
			.expect("Certificate should produce material.");

		assert_eq!(material.key_info, Some(KeyInfo::X509Certificate(certificate)));

		let material =
			derivation.public(None, Some(&use_key)).expect("UseKey should produce material.");

		assert_eq!(material.key_info, Some(KeyInfo::UseKey(Element::unqualified("KeyValue"))));

		let empty = UseKey::default();
		let material =
			derivation.public(None, Some(&empty)).expect("Empty UseKey is still accepted.");

		assert_eq!(material.key_info, None);
		assert!(derivation.public(None, None).is_none());
	}
}
