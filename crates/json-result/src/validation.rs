use crate::json_result::JsonResult;
use anyhow::{anyhow, Result};
use jsonschema::{Draft, JSONSchema};
use once_cell::sync::Lazy;
use serde_json::Value;

const JSON_RESULT_SCHEMA: &str = include_str!("../../../contracts/envelopes/json-result.json");

static DEFAULT_VALIDATOR: Lazy<Result<JsonResultValidator, String>> =
    Lazy::new(|| JsonResultValidator::new().map_err(|e| e.to_string()));

/// Checks envelopes against the wire schema in `contracts/envelopes`.
pub struct JsonResultValidator {
    schema: JSONSchema,
}

impl JsonResultValidator {
    pub fn new() -> Result<Self> {
        let schema_value: Value = serde_json::from_str(JSON_RESULT_SCHEMA)
            .map_err(|e| anyhow!("Failed to parse json result schema: {}", e))?;

        Self::from_schema(&schema_value)
    }

    pub fn from_schema(schema_value: &Value) -> Result<Self> {
        let schema = JSONSchema::options()
            .with_draft(Draft::Draft7)
            .compile(schema_value)
            .map_err(|e| anyhow!("Failed to compile json result schema: {}", e))?;

        Ok(Self { schema })
    }

    pub fn validate<T>(&self, envelope: &JsonResult<T>) -> Result<()>
    where
        T: serde::Serialize,
    {
        let envelope_value = serde_json::to_value(envelope)
            .map_err(|e| anyhow!("Failed to serialize json result for validation: {}", e))?;

        self.validate_json(&envelope_value)
    }

    pub fn validate_json(&self, envelope_json: &Value) -> Result<()> {
        if let Err(errors) = self.schema.validate(envelope_json) {
            let error_messages: Vec<String> = errors
                .map(|error| format!("{} at {}", error, error.instance_path))
                .collect();

            return Err(anyhow!(
                "Json result validation failed: {}",
                error_messages.join(", ")
            ));
        }

        Ok(())
    }
}

impl Default for JsonResultValidator {
    fn default() -> Self {
        Self::new().expect("Failed to create default json result validator")
    }
}

impl<T> JsonResult<T>
where
    T: serde::Serialize,
{
    /// Validates against the bundled schema, compiled once per process.
    pub fn validate(&self) -> Result<()> {
        let validator = DEFAULT_VALIDATOR
            .as_ref()
            .map_err(|message| anyhow!("{}", message))?;
        validator.validate(self)
    }

    pub fn validate_with(&self, validator: &JsonResultValidator) -> Result<()> {
        validator.validate(self)
    }
}
