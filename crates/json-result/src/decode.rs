use crate::json_result::JsonResult;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Why a JSON string could not be turned into an envelope.
///
/// The `try_` decoders return these; the plain decoders collapse them into
/// `None` for callers relying on the absent-result contract.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("JSON parsing failed: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("Field `{field}` does not match the target shape: {message}")]
    ShapeMismatch { field: &'static str, message: String },

    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Field `data` is an empty list")]
    EmptyList,
}

impl DecodeError {
    /// Syntax and EOF errors are parse failures, data errors are shape
    /// mismatches on `field`.
    fn from_serde(field: &'static str, err: serde_json::Error) -> Self {
        if err.is_data() {
            Self::ShapeMismatch {
                field,
                message: err.to_string(),
            }
        } else {
            Self::Parse(err)
        }
    }

    fn unexpected(field: &'static str, expected: &str, found: &Value) -> Self {
        Self::ShapeMismatch {
            field,
            message: format!("expected {expected}, found {}", kind_of(found)),
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn absent_on_error<R>(operation: &'static str, result: Result<R, DecodeError>) -> Option<R> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            debug!(operation, error = %err, "envelope decode failed");
            None
        }
    }
}

/// Envelope fields read from a parsed tree, with `data` still undecoded.
struct RawEnvelope {
    status: i32,
    msg: String,
    data: Value,
}

impl RawEnvelope {
    fn parse(json: &str) -> Result<Self, DecodeError> {
        let mut tree = match serde_json::from_str::<Value>(json).map_err(DecodeError::Parse)? {
            Value::Object(map) => map,
            other => return Err(DecodeError::unexpected("$", "an object", &other)),
        };

        let status = read_status(&tree)?;
        let msg = read_msg(&tree)?;
        let data = tree.remove("data").ok_or(DecodeError::MissingField("data"))?;

        Ok(Self { status, msg, data })
    }
}

fn read_status(tree: &Map<String, Value>) -> Result<i32, DecodeError> {
    let value = tree
        .get("status")
        .ok_or(DecodeError::MissingField("status"))?;

    value
        .as_i64()
        .and_then(|status| i32::try_from(status).ok())
        .ok_or_else(|| DecodeError::unexpected("status", "a 32-bit integer", value))
}

/// Strings are taken verbatim, scalars (including `null`) as their JSON text,
/// objects and arrays as the empty string.
fn read_msg(tree: &Map<String, Value>) -> Result<String, DecodeError> {
    match tree.get("msg").ok_or(DecodeError::MissingField("msg"))? {
        Value::String(msg) => Ok(msg.clone()),
        Value::Object(_) | Value::Array(_) => Ok(String::new()),
        other => Ok(other.to_string()),
    }
}

fn decode_object_payload<T: DeserializeOwned>(data: Value) -> Result<Option<T>, DecodeError> {
    match data {
        Value::Object(_) => serde_json::from_value(data)
            .map(Some)
            .map_err(|err| DecodeError::from_serde("data", err)),
        // Some producers double-encode the payload as a JSON string.
        Value::String(nested) => serde_json::from_str(&nested)
            .map(Some)
            .map_err(|err| DecodeError::from_serde("data", err)),
        _ => Ok(None),
    }
}

fn decode_list_payload<T: DeserializeOwned>(data: Value) -> Result<Vec<T>, DecodeError> {
    let items = match data {
        Value::Array(items) if items.is_empty() => return Err(DecodeError::EmptyList),
        Value::Array(items) => items,
        other => return Err(DecodeError::unexpected("data", "an array", &other)),
    };

    items
        .into_iter()
        .map(|item| serde_json::from_value(item).map_err(|err| DecodeError::from_serde("data", err)))
        .collect()
}

impl<T: DeserializeOwned> JsonResult<T> {
    /// Decodes `data` into `T`. An object is decoded directly, a string is
    /// parsed as nested JSON first, any other value leaves `data` empty.
    pub fn try_decode_as_object(json: &str) -> Result<Self, DecodeError> {
        let RawEnvelope { status, msg, data } = RawEnvelope::parse(json)?;
        Ok(JsonResult::build(status, msg, decode_object_payload(data)?))
    }

    /// Like [`JsonResult::try_decode_as_object`] but every failure becomes `None`.
    pub fn decode_as_object(json: &str) -> Option<Self> {
        absent_on_error("decode_as_object", Self::try_decode_as_object(json))
    }
}

impl<T: DeserializeOwned> JsonResult<Vec<T>> {
    /// Decodes `data` as a non-empty array of `T`.
    pub fn try_decode_as_list(json: &str) -> Result<Self, DecodeError> {
        let RawEnvelope { status, msg, data } = RawEnvelope::parse(json)?;
        Ok(JsonResult::build(status, msg, Some(decode_list_payload(data)?)))
    }

    pub fn decode_as_list(json: &str) -> Option<Self> {
        absent_on_error("decode_as_list", Self::try_decode_as_list(json))
    }
}

impl JsonResult<Value> {
    /// Decodes the whole document as an envelope, leaving `data` as a
    /// generic JSON value.
    pub fn try_decode_raw(json: &str) -> Result<Self, DecodeError> {
        serde_json::from_str(json).map_err(|err| DecodeError::from_serde("$", err))
    }

    /// Untyped decode that reports failures at `warn`.
    pub fn decode_raw(json: &str) -> Option<Self> {
        match Self::try_decode_raw(json) {
            Ok(envelope) => Some(envelope),
            Err(err) => {
                warn!(error = %err, "failed to decode json result");
                None
            }
        }
    }

    /// Object decode without a target shape: the same as
    /// [`JsonResult::decode_raw`] but quiet on failure.
    pub fn decode_untyped(json: &str) -> Option<Self> {
        absent_on_error("decode_untyped", Self::try_decode_raw(json))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Person {
        id: u32,
        #[serde(default)]
        name: Option<String>,
    }

    #[test]
    fn test_object_payload_is_decoded() {
        let envelope = JsonResult::<Person>::decode_as_object(
            r#"{"status":200,"msg":"OK","data":{"id":1,"name":"a"}}"#,
        )
        .unwrap();

        assert_eq!(envelope.status, 200);
        assert_eq!(envelope.msg, "OK");
        assert_eq!(
            envelope.data,
            Some(Person {
                id: 1,
                name: Some("a".to_string())
            })
        );
    }

    #[test]
    fn test_string_payload_is_decoded_as_nested_json() {
        let envelope = JsonResult::<Person>::decode_as_object(
            r#"{"status":200,"msg":"OK","data":"{\"id\":1}"}"#,
        )
        .unwrap();

        assert_eq!(envelope.data, Some(Person { id: 1, name: None }));
    }

    #[test]
    fn test_other_payload_kinds_leave_data_empty() {
        for data in ["null", "42", "true", "[{\"id\":1}]"] {
            let json = format!(r#"{{"status":500,"msg":"nope","data":{data}}}"#);
            let envelope = JsonResult::<Person>::decode_as_object(&json).unwrap();
            assert_eq!(envelope.status, 500);
            assert_eq!(envelope.msg, "nope");
            assert!(envelope.data.is_none(), "data {data} should be absent");
        }
    }

    #[test]
    fn test_invalid_json_is_absent() {
        assert!(JsonResult::<Person>::decode_as_object("not valid json").is_none());
        assert!(matches!(
            JsonResult::<Person>::try_decode_as_object("not valid json"),
            Err(DecodeError::Parse(_))
        ));
    }

    #[test]
    fn test_try_decode_reports_cause() {
        assert!(matches!(
            JsonResult::<Person>::try_decode_as_object(r#"{"status":200,"msg":"OK"}"#),
            Err(DecodeError::MissingField("data"))
        ));
        assert!(matches!(
            JsonResult::<Person>::try_decode_as_object(r#"{"msg":"OK","data":null}"#),
            Err(DecodeError::MissingField("status"))
        ));
        assert!(matches!(
            JsonResult::<Person>::try_decode_as_object(
                r#"{"status":200,"msg":"OK","data":{"name":"no id"}}"#
            ),
            Err(DecodeError::ShapeMismatch { field: "data", .. })
        ));
        assert!(matches!(
            JsonResult::<Person>::try_decode_as_object(r#"{"status":"200","msg":"OK","data":null}"#),
            Err(DecodeError::ShapeMismatch { field: "status", .. })
        ));
        assert!(matches!(
            JsonResult::<Person>::try_decode_as_object("[1, 2]"),
            Err(DecodeError::ShapeMismatch { field: "$", .. })
        ));
    }

    #[test]
    fn test_nested_string_that_is_not_json_is_a_parse_error() {
        assert!(matches!(
            JsonResult::<Person>::try_decode_as_object(r#"{"status":200,"msg":"OK","data":"plain text"}"#),
            Err(DecodeError::Parse(_))
        ));
    }

    #[test]
    fn test_non_string_msg_reads_as_json_text() {
        let envelope =
            JsonResult::<Person>::decode_as_object(r#"{"status":200,"msg":null,"data":null}"#)
                .unwrap();
        assert_eq!(envelope.msg, "null");

        let envelope =
            JsonResult::<Person>::decode_as_object(r#"{"status":200,"msg":7,"data":null}"#).unwrap();
        assert_eq!(envelope.msg, "7");
    }

    #[test]
    fn test_container_msg_reads_as_empty_text() {
        for msg in [r#"{"code":"E1"}"#, r#"["a","b"]"#] {
            let json = format!(r#"{{"status":500,"msg":{msg},"data":null}}"#);
            let envelope = JsonResult::<Person>::decode_as_object(&json).unwrap();
            assert_eq!(envelope.msg, "", "msg {msg} should read as empty");
        }
    }

    #[test]
    fn test_string_status_is_rejected() {
        assert!(JsonResult::decode_raw(r#"{"status":"200","msg":"OK","data":null}"#).is_none());
        assert!(matches!(
            JsonResult::try_decode_raw(r#"{"status":"200","msg":"OK","data":null}"#),
            Err(DecodeError::ShapeMismatch { field: "$", .. })
        ));
        assert!(JsonResult::<Person>::decode_as_object(
            r#"{"status":"200","msg":"OK","data":null}"#
        )
        .is_none());
    }

    #[test]
    fn test_untyped_decoders_reject_unknown_keys() {
        let json = r#"{"status":200,"msg":"OK","data":null,"extra":1}"#;
        assert!(JsonResult::decode_raw(json).is_none());
        assert!(JsonResult::decode_untyped(json).is_none());
        assert!(matches!(
            JsonResult::try_decode_raw(json),
            Err(DecodeError::ShapeMismatch { field: "$", .. })
        ));
    }

    #[test]
    fn test_list_payload_is_decoded_in_order() {
        let envelope = JsonResult::<Vec<Person>>::decode_as_list(
            r#"{"status":200,"msg":"OK","data":[{"id":2},{"id":1,"name":"b"}]}"#,
        )
        .unwrap();

        let ids: Vec<u32> = envelope.data.unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_list_rejects_empty_missing_and_non_array() {
        assert!(matches!(
            JsonResult::<Vec<Person>>::try_decode_as_list(r#"{"status":200,"msg":"OK","data":[]}"#),
            Err(DecodeError::EmptyList)
        ));
        assert!(JsonResult::<Vec<Person>>::decode_as_list(r#"{"status":200,"msg":"OK"}"#).is_none());
        assert!(
            JsonResult::<Vec<Person>>::decode_as_list(r#"{"status":200,"msg":"OK","data":{"id":1}}"#)
                .is_none()
        );
        assert!(JsonResult::<Vec<Person>>::decode_as_list(
            r#"{"status":200,"msg":"OK","data":[{"id":1},{"id":"x"}]}"#
        )
        .is_none());
    }

    #[test]
    fn test_raw_decode_keeps_generic_payload() {
        let envelope =
            JsonResult::decode_raw(r#"{"status":501,"msg":"error","data":{"email":"blank"},"ok":null}"#)
                .unwrap();

        assert_eq!(envelope.status, 501);
        assert_eq!(envelope.data, Some(json!({"email": "blank"})));
        assert!(JsonResult::decode_raw("{").is_none());
        assert!(JsonResult::decode_untyped(r#"{"msg":"no status"}"#).is_none());
    }
}
