use jsonschema::{validator_for, Validator};
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("Schema compile error: {0}")]
    Compile(String),
}

/// Compiled `inputSchema` of a single tool.
pub struct ArgumentValidator {
    validator: Validator,
}

impl ArgumentValidator {
    pub fn compile(schema: &Value) -> Result<Self, SchemaError> {
        let validator = validator_for(schema).map_err(|e| SchemaError::Compile(e.to_string()))?;
        Ok(Self { validator })
    }

    /// Check `arguments` against the schema, reporting the first violation.
    pub fn check(&self, arguments: &Value) -> Result<(), String> {
        self.validator.validate(arguments).map_err(|e| e.to_string())
    }
}

impl std::fmt::Debug for ArgumentValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ArgumentValidator")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn validator() -> ArgumentValidator {
        ArgumentValidator::compile(&json!({
            "type": "object",
            "required": ["title"],
            "properties": { "title": { "type": "string" } }
        }))
        .unwrap()
    }

    #[test]
    fn accepts_conforming_arguments() {
        assert!(validator().check(&json!({ "title": "X" })).is_ok());
    }

    #[test]
    fn reports_missing_required_field() {
        let err = validator().check(&json!({})).unwrap_err();
        assert!(err.contains("title"), "unexpected message: {err}");
    }

    #[test]
    fn reports_wrong_type() {
        let err = validator().check(&json!({ "title": 7 })).unwrap_err();
        assert!(err.contains("string"), "unexpected message: {err}");
    }

    #[test]
    fn invalid_schema_fails_to_compile() {
        let err = ArgumentValidator::compile(&json!({ "type": "no-such-type" })).unwrap_err();
        assert!(err.to_string().starts_with("Schema compile error"));
    }
}
