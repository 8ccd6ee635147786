// src/codec/decode.rs

use tracing::warn;

use super::{DecodeError, Outputs};
use crate::types::{OutputFormat, RAW_KEY};

/// Parse captured stdout into outputs.
///
/// Returns `Ok(None)` when the format is `null` or unsupported, which the host
/// sees as "no outputs" rather than an empty map. Structured formats must parse
/// to a top-level mapping; every value is flattened to its string form.
pub fn decode_output(format: &OutputFormat, bytes: &[u8]) -> Result<Option<Outputs>, DecodeError> {
    let outputs = match format {
        OutputFormat::Yaml => decode_yaml(bytes)?,
        OutputFormat::Json => decode_json(bytes)?,
        OutputFormat::Hcl => decode_hcl(bytes)?,
        OutputFormat::Toml => decode_toml(bytes)?,
        OutputFormat::Raw => {
            let mut outputs = Outputs::new();
            outputs.insert(
                RAW_KEY.to_string(),
                String::from_utf8_lossy(bytes).into_owned(),
            );
            outputs
        }
        OutputFormat::Null => return Ok(None),
        OutputFormat::Unsupported(tag) => {
            warn!(format = %tag, "unsupported output format; discarding output");
            return Ok(None);
        }
    };
    Ok(Some(outputs))
}

fn decode_json(bytes: &[u8]) -> Result<Outputs, DecodeError> {
    let map: serde_json::Map<String, serde_json::Value> =
        serde_json::from_slice(bytes).map_err(|e| DecodeError::new("json", e))?;
    Ok(map
        .into_iter()
        .map(|(k, v)| (k, json_to_string(v)))
        .collect())
}

fn decode_yaml(bytes: &[u8]) -> Result<Outputs, DecodeError> {
    let doc: serde_norway::Value =
        serde_norway::from_slice(bytes).map_err(|e| DecodeError::new("yaml", e))?;
    match doc {
        // Empty document.
        serde_norway::Value::Null => Ok(Outputs::new()),
        serde_norway::Value::Mapping(map) => Ok(map
            .iter()
            .map(|(k, v)| (yaml_to_string(k), yaml_to_string(v)))
            .collect()),
        other => Err(DecodeError::new(
            "yaml",
            format!("expected a mapping at the top level, got {}", yaml_kind(&other)),
        )),
    }
}

fn decode_hcl(bytes: &[u8]) -> Result<Outputs, DecodeError> {
    let text = std::str::from_utf8(bytes).map_err(|e| DecodeError::new("hcl", e))?;
    let body: hcl::Value = hcl::from_str(text).map_err(|e| DecodeError::new("hcl", e))?;
    // Go through JSON so HCL values share the JSON stringification rules.
    match serde_json::to_value(body).map_err(|e| DecodeError::new("hcl", e))? {
        serde_json::Value::Object(map) => Ok(map
            .into_iter()
            .map(|(k, v)| (k, json_to_string(v)))
            .collect()),
        _ => Err(DecodeError::new("hcl", "expected an object body")),
    }
}

fn decode_toml(bytes: &[u8]) -> Result<Outputs, DecodeError> {
    let text = std::str::from_utf8(bytes).map_err(|e| DecodeError::new("toml", e))?;
    let table: toml::Table = toml::from_str(text).map_err(|e| DecodeError::new("toml", e))?;
    Ok(table
        .into_iter()
        .map(|(k, v)| {
            let v = match v {
                toml::Value::String(s) => s,
                other => other.to_string(),
            };
            (k, v)
        })
        .collect())
}

fn json_to_string(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        // Numbers, bools, arrays and objects use their compact JSON text.
        other => other.to_string(),
    }
}

fn yaml_to_string(value: &serde_norway::Value) -> String {
    match value {
        serde_norway::Value::String(s) => s.clone(),
        serde_norway::Value::Null => String::new(),
        serde_norway::Value::Bool(b) => b.to_string(),
        serde_norway::Value::Number(n) => n.to_string(),
        other => serde_norway::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

fn yaml_kind(value: &serde_norway::Value) -> &'static str {
    match value {
        serde_norway::Value::Null => "null",
        serde_norway::Value::Bool(_) => "a boolean",
        serde_norway::Value::Number(_) => "a number",
        serde_norway::Value::String(_) => "a string",
        serde_norway::Value::Sequence(_) => "a sequence",
        serde_norway::Value::Mapping(_) => "a mapping",
        _ => "a tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decoded(format: OutputFormat, text: &str) -> Outputs {
        decode_output(&format, text.as_bytes())
            .expect("decode should succeed")
            .expect("outputs should be present")
    }

    #[test]
    fn json_values_are_stringified() {
        let out = decoded(
            OutputFormat::Json,
            r#"{"a":"1","n":2,"ok":true,"none":null,"list":[1,"x"],"obj":{"k":"v"}}"#,
        );
        assert_eq!(out["a"], "1");
        assert_eq!(out["n"], "2");
        assert_eq!(out["ok"], "true");
        assert_eq!(out["none"], "");
        assert_eq!(out["list"], r#"[1,"x"]"#);
        assert_eq!(out["obj"], r#"{"k":"v"}"#);
    }

    #[test]
    fn json_must_be_an_object() {
        let err = decode_output(&OutputFormat::Json, b"[1, 2]").unwrap_err();
        assert_eq!(err.format, "json");
        assert!(decode_output(&OutputFormat::Json, b"").is_err());
    }

    #[test]
    fn yaml_mapping_with_scalars() {
        let out = decoded(OutputFormat::Yaml, "name: web\nport: 8080\nenabled: false\n");
        assert_eq!(out["name"], "web");
        assert_eq!(out["port"], "8080");
        assert_eq!(out["enabled"], "false");
    }

    #[test]
    fn yaml_non_string_keys_are_coerced() {
        let out = decoded(OutputFormat::Yaml, "1: one\ntrue: yes\n");
        assert_eq!(out["1"], "one");
        assert_eq!(out["true"], "yes");
    }

    #[test]
    fn yaml_scalar_document_is_rejected() {
        let err = decode_output(&OutputFormat::Yaml, b"just a string\n").unwrap_err();
        assert!(err.reason.contains("mapping"));
    }

    #[test]
    fn toml_top_level_entries_are_flattened() {
        let out = decoded(OutputFormat::Toml, "name = \"web\"\nport = 8080\nflag = true\n");
        assert_eq!(out["name"], "web");
        assert_eq!(out["port"], "8080");
        assert_eq!(out["flag"], "true");
    }

    #[test]
    fn toml_parse_error_is_reported() {
        let err = decode_output(&OutputFormat::Toml, b"name = \n").unwrap_err();
        assert_eq!(err.format, "toml");
    }

    #[test]
    fn hcl_attributes_become_outputs() {
        let out = decoded(OutputFormat::Hcl, "name = \"web\"\ncount = 3\n");
        assert_eq!(out["name"], "web");
        assert_eq!(out["count"], "3");
    }

    #[test]
    fn hcl_parse_error_is_reported() {
        assert!(decode_output(&OutputFormat::Hcl, b"name = = \"web\"").is_err());
    }

    #[test]
    fn raw_wraps_everything_under_string_key() {
        let out = decoded(OutputFormat::Raw, "line one\nline two\n");
        assert_eq!(out.len(), 1);
        assert_eq!(out[RAW_KEY], "line one\nline two\n");
    }

    #[test]
    fn null_and_unsupported_produce_no_outputs() {
        assert!(decode_output(&OutputFormat::Null, b"{\"a\":\"1\"}").unwrap().is_none());
        let unknown = OutputFormat::Unsupported("ini".to_string());
        assert!(decode_output(&unknown, b"a=1").unwrap().is_none());
    }
}
