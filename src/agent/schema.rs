//! Declared input schemas for agent tools: a flat JSON object of scalar fields.

use serde_json::{json, Map, Value};

/// JSON type of a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer,
    Number,
    Boolean,
}

impl FieldKind {
    fn json_type(self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Integer => "integer",
            FieldKind::Number => "number",
            FieldKind::Boolean => "boolean",
        }
    }

    fn matches(self, value: &Value) -> bool {
        match self {
            FieldKind::String => value.is_string(),
            FieldKind::Integer => value.is_i64() || value.is_u64(),
            FieldKind::Number => value.is_number(),
            FieldKind::Boolean => value.is_boolean(),
        }
    }
}

/// One argument of a tool.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaField {
    pub name: String,
    pub kind: FieldKind,
    pub description: String,
    pub required: bool,
}

impl SchemaField {
    /// A required string field.
    pub fn string(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: FieldKind::String,
            description: description.to_string(),
            required: true,
        }
    }

    /// An optional field of the given kind.
    pub fn optional(name: &str, kind: FieldKind, description: &str) -> Self {
        Self {
            name: name.to_string(),
            kind,
            description: description.to_string(),
            required: false,
        }
    }
}

/// Input schema of a tool: a JSON object with the listed fields.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ToolSchema {
    pub fields: Vec<SchemaField>,
}

impl ToolSchema {
    pub fn new(fields: Vec<SchemaField>) -> Self {
        Self { fields }
    }

    /// JSON Schema object sent to the model.
    pub fn to_json_schema(&self) -> Value {
        let mut properties = Map::new();
        for field in &self.fields {
            properties.insert(
                field.name.clone(),
                json!({
                    "type": field.kind.json_type(),
                    "description": field.description,
                }),
            );
        }
        let required: Vec<&str> = self
            .fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name.as_str())
            .collect();

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    /// Check arguments against the schema. Extra fields are ignored.
    pub fn validate(&self, args: &Value) -> Result<(), String> {
        let object = args
            .as_object()
            .ok_or_else(|| format!("arguments must be a JSON object, got {}", args))?;

        for field in &self.fields {
            match object.get(&field.name) {
                None | Some(Value::Null) if field.required => {
                    return Err(format!("missing required field '{}'", field.name));
                }
                None | Some(Value::Null) => {}
                Some(value) if !field.kind.matches(value) => {
                    return Err(format!(
                        "field '{}' must be {}, got {}",
                        field.name,
                        field.kind.json_type(),
                        value
                    ));
                }
                Some(_) => {}
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query_schema() -> ToolSchema {
        ToolSchema::new(vec![
            SchemaField::string("query", "Search query"),
            SchemaField::optional("limit", FieldKind::Integer, "Max results"),
        ])
    }

    #[test]
    fn test_json_schema_shape() {
        let schema = query_schema().to_json_schema();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["query"]["type"], "string");
        assert_eq!(schema["properties"]["limit"]["type"], "integer");
        assert_eq!(schema["required"], json!(["query"]));
    }

    #[test]
    fn test_valid_arguments() {
        let schema = query_schema();
        assert!(schema.validate(&json!({"query": "deploy"})).is_ok());
        assert!(schema.validate(&json!({"query": "deploy", "limit": 3})).is_ok());
        assert!(schema.validate(&json!({"query": "deploy", "extra": true})).is_ok());
    }

    #[test]
    fn test_missing_required_field() {
        let err = query_schema().validate(&json!({"limit": 3})).unwrap_err();
        assert!(err.contains("'query'"));
        assert!(query_schema().validate(&json!({"query": null})).is_err());
    }

    #[test]
    fn test_wrong_kinds() {
        let schema = query_schema();
        assert!(schema.validate(&json!({"query": 42})).is_err());
        assert!(schema.validate(&json!({"query": "x", "limit": 1.5})).is_err());
        assert!(schema.validate(&json!(["query"])).is_err());
    }
}
