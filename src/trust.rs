//! WS-Trust protocol model: identifiers, opaque XML elements, secrets, and the
//! request/response documents exchanged with callers.

pub mod element;
pub mod id;
pub mod request;
pub mod response;
pub mod secret;
pub mod uri;

pub use element::*;
pub use id::*;
pub use request::*;
pub use response::*;
pub use secret::*;
