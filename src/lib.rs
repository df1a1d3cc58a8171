//! WS-Trust security token service engine: resolve the right token provider, derive
//! proof-of-possession keys, and sign or encrypt what the provider issues behind narrow,
//! pluggable contracts.
//!
//! The crate never decides what a token looks like. [`provider::SecurityTokenProvider`]
//! implementations own token semantics, [`config::StsConfiguration`] owns lookups, and
//! [`xmlsec::XmlSecurity`] owns XML signature/encryption primitives. The
//! [`dispatch::RequestHandler`] glues them together for the four WS-Trust bindings
//! (Issue, Renew, Validate, Cancel).

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod config;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod keys;
pub mod obs;
pub mod provider;
pub mod trust;
pub mod xmlsec;

mod _prelude {
	pub use std::{
		collections::{BTreeMap, HashMap},
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		sync::Arc,
	};

	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};

	pub use crate::error::{Error, Result};
}

#[cfg(test)] use parking_lot as _;
