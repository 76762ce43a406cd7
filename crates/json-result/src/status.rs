use serde::{Deserialize, Serialize};
use std::fmt;

/// Status codes understood by envelope consumers.
///
/// The integer values are part of the wire contract and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i32", try_from = "i32")]
pub enum StatusCode {
    /// 200: the request succeeded, payload (if any) in `data`.
    Success,
    /// 500: generic failure, message in `msg`.
    Error,
    /// 501: bean validation failed, field errors as a map in `data`.
    Validation,
    /// 502: the interceptor rejected the user token.
    Auth,
    /// 555: an unhandled exception, message in `msg`.
    Exception,
}

impl StatusCode {
    pub const fn code(self) -> i32 {
        match self {
            Self::Success => 200,
            Self::Error => 500,
            Self::Validation => 501,
            Self::Auth => 502,
            Self::Exception => 555,
        }
    }

    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            200 => Some(Self::Success),
            500 => Some(Self::Error),
            501 => Some(Self::Validation),
            502 => Some(Self::Auth),
            555 => Some(Self::Exception),
            _ => None,
        }
    }

    pub fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

impl From<StatusCode> for i32 {
    fn from(status: StatusCode) -> Self {
        status.code()
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown status code: {0}")]
pub struct UnknownStatusCode(pub i32);

impl TryFrom<i32> for StatusCode {
    type Error = UnknownStatusCode;

    fn try_from(code: i32) -> Result<Self, UnknownStatusCode> {
        Self::from_code(code).ok_or(UnknownStatusCode(code))
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Validation => "validation error",
            Self::Auth => "auth error",
            Self::Exception => "exception",
        };
        write!(f, "{} ({})", self.code(), label)
    }
}
