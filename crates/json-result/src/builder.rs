use crate::json_result::JsonResult;
use crate::status::StatusCode;

pub struct JsonResultBuilder<T> {
    status: Option<i32>,
    msg: Option<String>,
    data: Option<T>,
    ok: Option<String>,
}

impl<T> Default for JsonResultBuilder<T> {
    fn default() -> Self {
        Self {
            status: None,
            msg: None,
            data: None,
            ok: None,
        }
    }
}

impl<T> JsonResultBuilder<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: i32) -> Self {
        self.status = Some(status);
        self
    }

    pub fn status_code(self, status: StatusCode) -> Self {
        self.status(status.code())
    }

    pub fn msg(mut self, msg: impl Into<String>) -> Self {
        self.msg = Some(msg.into());
        self
    }

    pub fn data(mut self, data: T) -> Self {
        self.data = Some(data);
        self
    }

    /// Sets the legacy `ok` field. Only useful when replaying old payloads.
    pub fn legacy_ok(mut self, ok: impl Into<String>) -> Self {
        self.ok = Some(ok.into());
        self
    }

    pub fn success(self, data: T) -> Self {
        self.status_code(StatusCode::Success)
            .msg(crate::json_result::OK_MSG)
            .data(data)
    }

    pub fn error(self, msg: impl Into<String>) -> Self {
        self.status_code(StatusCode::Error).msg(msg)
    }

    pub fn build(self) -> Result<JsonResult<T>, BuildError> {
        let status = self.status.ok_or(BuildError::MissingStatus)?;

        Ok(JsonResult {
            status,
            msg: self.msg.unwrap_or_default(),
            data: self.data,
            ok: self.ok,
        })
    }
}

impl<T> JsonResult<T> {
    pub fn builder() -> JsonResultBuilder<T> {
        JsonResultBuilder::new()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Status is required to build a json result")]
    MissingStatus,
}
