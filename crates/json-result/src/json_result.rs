use crate::status::StatusCode;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const OK_MSG: &str = "OK";
pub const VALIDATION_MSG: &str = "error";

/// Response envelope shared by every API surface: `{status, msg, data, ok}`.
///
/// `status` stays a raw integer so codes outside [`StatusCode`] survive a
/// decode/encode cycle untouched. `ok` is a legacy field that is never set by
/// the constructors but is still written to the wire as `null`. Decoding
/// rejects keys other than these four.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JsonResult<T = Value> {
    pub status: i32,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub msg: String,
    pub data: Option<T>,
    #[serde(default)]
    pub ok: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl<T> JsonResult<T> {
    pub fn build(status: i32, msg: impl Into<String>, data: Option<T>) -> Self {
        Self {
            status,
            msg: msg.into(),
            data,
            ok: None,
        }
    }

    pub fn ok(data: T) -> Self {
        Self::build(StatusCode::Success.code(), OK_MSG, Some(data))
    }

    pub fn ok_empty() -> Self {
        Self::build(StatusCode::Success.code(), OK_MSG, None)
    }

    pub fn error_msg(msg: impl Into<String>) -> Self {
        Self::build(StatusCode::Error.code(), msg, None)
    }

    /// Validation failure; `data` carries the field name to error map.
    pub fn error_map(data: T) -> Self {
        Self::build(StatusCode::Validation.code(), VALIDATION_MSG, Some(data))
    }

    pub fn error_token_msg(msg: impl Into<String>) -> Self {
        Self::build(StatusCode::Auth.code(), msg, None)
    }

    pub fn error_exception(msg: impl Into<String>) -> Self {
        Self::build(StatusCode::Exception.code(), msg, None)
    }

    pub fn is_ok(&self) -> bool {
        self.status == StatusCode::Success.code()
    }

    /// `None` when the status is not one of the known codes.
    pub fn status_code(&self) -> Option<StatusCode> {
        StatusCode::from_code(self.status)
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn into_data(self) -> Option<T> {
        self.data
    }

    pub fn map_data<U, F>(self, f: F) -> JsonResult<U>
    where
        F: FnOnce(T) -> U,
    {
        JsonResult {
            status: self.status,
            msg: self.msg,
            data: self.data.map(f),
            ok: self.ok,
        }
    }
}
