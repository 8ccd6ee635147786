// src/codec/encode.rs

use std::collections::BTreeMap;

use tracing::{error, warn};

use crate::types::{InputFormat, RAW_KEY};

/// Serialize `values` into the payload written to a command's stdin.
///
/// Never fails: an unsupported format, or a raw format without a `string`
/// entry, produces an empty payload.
pub fn encode_input(format: &InputFormat, values: &BTreeMap<String, String>) -> Vec<u8> {
    let encoded = match format {
        InputFormat::Yaml => serde_norway::to_string(values).map_err(|e| e.to_string()),
        InputFormat::Json => serde_json::to_string(values).map_err(|e| e.to_string()),
        InputFormat::Toml => toml::to_string(values).map_err(|e| e.to_string()),
        InputFormat::Raw => {
            return values
                .get(RAW_KEY)
                .map(|raw| raw.as_bytes().to_vec())
                .unwrap_or_default();
        }
        InputFormat::Unsupported(tag) => {
            warn!(format = %tag, "unsupported input format; sending no input");
            return Vec::new();
        }
    };

    match encoded {
        Ok(text) => text.into_bytes(),
        Err(err) => {
            error!(%format, error = %err, "failed to encode inputs; sending no input");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn json_is_a_flat_object() {
        let bytes = encode_input(&InputFormat::Json, &inputs(&[("a", "1"), ("b", "x\"y")]));
        assert_eq!(String::from_utf8(bytes).unwrap(), r#"{"a":"1","b":"x\"y"}"#);
    }

    #[test]
    fn toml_is_a_table_of_strings() {
        let bytes = encode_input(&InputFormat::Toml, &inputs(&[("name", "web")]));
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text.trim(), r#"name = "web""#);
    }

    #[test]
    fn yaml_quotes_numeric_looking_strings() {
        let bytes = encode_input(&InputFormat::Yaml, &inputs(&[("port", "8080")]));
        let back: BTreeMap<String, String> = serde_norway::from_slice(&bytes).unwrap();
        assert_eq!(back.get("port").map(String::as_str), Some("8080"));
    }

    #[test]
    fn raw_passes_the_string_key_through() {
        let bytes = encode_input(&InputFormat::Raw, &inputs(&[("string", "hello\n"), ("x", "y")]));
        assert_eq!(bytes, b"hello\n");
    }

    #[test]
    fn raw_without_string_key_is_empty() {
        assert!(encode_input(&InputFormat::Raw, &inputs(&[("x", "y")])).is_empty());
    }

    #[test]
    fn unsupported_format_is_empty() {
        let format = InputFormat::Unsupported("xml".to_string());
        assert!(encode_input(&format, &inputs(&[("string", "ignored")])).is_empty());
    }
}
