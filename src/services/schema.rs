use crate::domain::constants::PROMPT_IR_SCHEMA_ID;
use serde_json::{json, Value};

pub fn prompt_ir_schema() -> Value {
    let non_empty = json!({ "type": "string", "minLength": 1 });
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "$id": PROMPT_IR_SCHEMA_ID,
        "title": "PromptForge Prompt IR",
        "type": "object",
        "required": [
            "version",
            "system_role",
            "rules",
            "input_schema",
            "output_schema",
            "failure_modes"
        ],
        "additionalProperties": false,
        "properties": {
            "version": non_empty,
            "system_role": non_empty,
            "rules": {
                "type": "array",
                "minItems": 1,
                "items": { "$ref": "#/$defs/rule" }
            },
            "input_schema": { "$ref": "#/$defs/schema" },
            "output_schema": { "$ref": "#/$defs/schema" },
            "failure_modes": {
                "type": "array",
                "minItems": 1,
                "items": { "$ref": "#/$defs/failure_mode" }
            }
        },
        "$defs": {
            "rule": {
                "type": "object",
                "required": ["id", "description"],
                "additionalProperties": false,
                "properties": {
                    "id": non_empty,
                    "description": non_empty,
                    "condition": { "type": "string" }
                }
            },
            "schema": {
                "type": "object",
                "required": ["type"],
                "additionalProperties": false,
                "properties": {
                    "type": non_empty,
                    "properties": {
                        "type": "object",
                        "additionalProperties": { "$ref": "#/$defs/property" }
                    },
                    "required": {
                        "type": "array",
                        "items": { "type": "string" }
                    },
                    "items": { "$ref": "#/$defs/schema" }
                }
            },
            "property": {
                "type": "object",
                "required": ["type"],
                "additionalProperties": false,
                "properties": {
                    "type": non_empty,
                    "description": { "type": "string" },
                    "enum": { "type": "array" },
                    "properties": {
                        "type": "object",
                        "additionalProperties": { "$ref": "#/$defs/property" }
                    },
                    "items": { "$ref": "#/$defs/schema" }
                }
            },
            "failure_mode": {
                "type": "object",
                "required": ["id", "condition", "response"],
                "additionalProperties": false,
                "properties": {
                    "id": non_empty,
                    "condition": non_empty,
                    "response": non_empty
                }
            }
        }
    })
}

/// Exact bytes of `prompt.ir.schema.json`. Audit compares against these.
pub fn schema_text() -> String {
    format!("{:#}\n", prompt_ir_schema())
}
