//! WS-Trust 1.3 and XML security URIs the engine reproduces verbatim.

/// WS-Trust 1.3 base namespace.
pub const BASE_NAMESPACE: &str = "http://docs.oasis-open.org/ws-sx/ws-trust/200512";

/// Issue request type.
pub const ISSUE_REQUEST: &str = "http://docs.oasis-open.org/ws-sx/ws-trust/200512/Issue";
/// Renew request type.
pub const RENEW_REQUEST: &str = "http://docs.oasis-open.org/ws-sx/ws-trust/200512/Renew";
/// Validate request type.
pub const VALIDATE_REQUEST: &str = "http://docs.oasis-open.org/ws-sx/ws-trust/200512/Validate";
/// Cancel request type.
pub const CANCEL_REQUEST: &str = "http://docs.oasis-open.org/ws-sx/ws-trust/200512/Cancel";

/// Bearer key type.
pub const KEY_TYPE_BEARER: &str = "http://docs.oasis-open.org/ws-sx/ws-trust/200512/Bearer";
/// Symmetric key type.
pub const KEY_TYPE_SYMMETRIC: &str =
	"http://docs.oasis-open.org/ws-sx/ws-trust/200512/SymmetricKey";
/// Public key type.
pub const KEY_TYPE_PUBLIC: &str = "http://docs.oasis-open.org/ws-sx/ws-trust/200512/PublicKey";

/// Asymmetric binary secret type.
pub const BS_TYPE_ASYMMETRIC: &str =
	"http://docs.oasis-open.org/ws-sx/ws-trust/200512/AsymmetricKey";
/// Symmetric binary secret type.
pub const BS_TYPE_SYMMETRIC: &str =
	"http://docs.oasis-open.org/ws-sx/ws-trust/200512/SymmetricKey";
/// Nonce binary secret type.
pub const BS_TYPE_NONCE: &str = "http://docs.oasis-open.org/ws-sx/ws-trust/200512/Nonce";

/// PSHA1 computed-key algorithm.
pub const CK_PSHA1: &str = "http://docs.oasis-open.org/ws-sx/ws-trust/200512/CK/PSHA1";

/// Token type used by validate responses that only carry a status.
pub const STATUS_TYPE: &str = "http://docs.oasis-open.org/ws-sx/ws-trust/200512/RSTR/Status";
/// Status code reported for valid tokens.
pub const STATUS_CODE_VALID: &str = "http://docs.oasis-open.org/ws-sx/ws-trust/200512/status/valid";
/// Status code reported for invalid tokens.
pub const STATUS_CODE_INVALID: &str =
	"http://docs.oasis-open.org/ws-sx/ws-trust/200512/status/invalid";

/// SHA-1 digest method.
pub const DIGEST_SHA1: &str = "http://www.w3.org/2000/09/xmldsig#sha1";
/// RSA-SHA1 signature method.
pub const SIGNATURE_RSA_SHA1: &str = "http://www.w3.org/2000/09/xmldsig#rsa-sha1";
/// RSA-OAEP key transport, used when the request names no key-wrap algorithm.
pub const KEY_WRAP_RSA_OAEP: &str = "http://www.w3.org/2001/04/xmlenc#rsa-oaep-mgf1p";
