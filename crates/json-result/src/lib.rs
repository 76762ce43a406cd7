//! # Json Result
//!
//! The `{status, msg, data}` response envelope returned to API clients,
//! together with helpers to decode it back into typed payloads.
//!
//! | status | meaning |
//! |--------|---------|
//! | 200 | success |
//! | 500 | error, message in `msg` |
//! | 501 | validation error, field errors as a map in `data` |
//! | 502 | user token rejected |
//! | 555 | unhandled exception, message in `msg` |
//!
//! ## Building envelopes
//!
//! ```rust
//! use json_result::*;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, AsJsonResult)]
//! struct User {
//!     id: u32,
//!     name: String,
//! }
//!
//! let envelope = User { id: 7, name: "ada".to_string() }.into_json_result();
//! assert!(envelope.is_ok());
//!
//! let denied = JsonResult::<User>::error_token_msg("token expired");
//! assert_eq!(denied.status_code(), Some(StatusCode::Auth));
//!
//! let custom = JsonResult::<User>::builder()
//!     .status(404)
//!     .msg("no such user")
//!     .build()
//!     .expect("status is set");
//! assert!(custom.validate().is_ok());
//! ```
//!
//! ## Decoding
//!
//! ```rust
//! use json_result::JsonResult;
//! use serde::Deserialize;
//!
//! #[derive(Debug, Deserialize)]
//! struct User {
//!     id: u32,
//! }
//!
//! let one = JsonResult::<User>::decode_as_object(r#"{"status":200,"msg":"OK","data":{"id":1}}"#)
//!     .expect("valid envelope");
//! assert_eq!(one.data.map(|u| u.id), Some(1));
//!
//! let many = JsonResult::<Vec<User>>::decode_as_list(r#"{"status":200,"msg":"OK","data":[]}"#);
//! assert!(many.is_none());
//!
//! let err = JsonResult::<User>::try_decode_as_object("not json").unwrap_err();
//! assert!(matches!(err, json_result::DecodeError::Parse(_)));
//! ```

mod builder;
mod decode;
mod json_result;
mod status;
mod validation;

pub use builder::*;
pub use decode::DecodeError;
pub use json_result::*;
pub use status::*;
pub use validation::*;

// Re-export the derive macro
pub use json_result_derive::AsJsonResult;

pub trait AsJsonResult {
    fn into_json_result(self) -> JsonResult<Self>
    where
        Self: Sized;
}
