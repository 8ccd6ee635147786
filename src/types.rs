use std::fmt;

use serde::Deserialize;

/// Reserved key carrying the raw payload for the `string` input/output
/// formats.
pub const RAW_KEY: &str = "string";

/// The three lifecycle phases of a managed resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Apply,
    Check,
    Destroy,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Apply => "apply",
            Phase::Check => "check",
            Phase::Destroy => "destroy",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Format used to encode a phase's inputs onto the child's stdin.
///
/// Tags are matched case-insensitively. Anything unrecognised is kept as
/// `Unsupported` rather than rejected: the encoder logs it and sends no input.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum InputFormat {
    Yaml,
    Json,
    Toml,
    /// `""`, `string` or `stdin`: pass the `string` input through verbatim.
    #[default]
    Raw,
    Unsupported(String),
}

impl From<&str> for InputFormat {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "yaml" | "yml" => InputFormat::Yaml,
            "json" => InputFormat::Json,
            "toml" => InputFormat::Toml,
            "" | "string" | "stdin" => InputFormat::Raw,
            _ => InputFormat::Unsupported(s.to_string()),
        }
    }
}

impl From<String> for InputFormat {
    fn from(s: String) -> Self {
        InputFormat::from(s.as_str())
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputFormat::Yaml => f.write_str("yaml"),
            InputFormat::Json => f.write_str("json"),
            InputFormat::Toml => f.write_str("toml"),
            InputFormat::Raw => f.write_str("string"),
            InputFormat::Unsupported(tag) => write!(f, "{tag}"),
        }
    }
}

/// Format used to decode a phase's captured stdout into outputs.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum OutputFormat {
    Yaml,
    Json,
    Hcl,
    Toml,
    /// `""`, `string` or `stdout`: the whole output under the `string` key.
    #[default]
    Raw,
    /// Explicitly discard the output.
    Null,
    Unsupported(String),
}

impl From<&str> for OutputFormat {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "yaml" | "yml" => OutputFormat::Yaml,
            "json" => OutputFormat::Json,
            "hcl" => OutputFormat::Hcl,
            "toml" => OutputFormat::Toml,
            "" | "string" | "stdout" => OutputFormat::Raw,
            "null" => OutputFormat::Null,
            _ => OutputFormat::Unsupported(s.to_string()),
        }
    }
}

impl From<String> for OutputFormat {
    fn from(s: String) -> Self {
        OutputFormat::from(s.as_str())
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Yaml => f.write_str("yaml"),
            OutputFormat::Json => f.write_str("json"),
            OutputFormat::Hcl => f.write_str("hcl"),
            OutputFormat::Toml => f.write_str("toml"),
            OutputFormat::Raw => f.write_str("string"),
            OutputFormat::Null => f.write_str("null"),
            OutputFormat::Unsupported(tag) => write!(f, "{tag}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_tags_are_case_insensitive() {
        assert_eq!(InputFormat::from("YML"), InputFormat::Yaml);
        assert_eq!(InputFormat::from(" Json "), InputFormat::Json);
        assert_eq!(OutputFormat::from("HCL"), OutputFormat::Hcl);
        assert_eq!(OutputFormat::from("Null"), OutputFormat::Null);
    }

    #[test]
    fn empty_and_sentinel_tags_mean_raw() {
        assert_eq!(InputFormat::from(""), InputFormat::Raw);
        assert_eq!(InputFormat::from("stdin"), InputFormat::Raw);
        assert_eq!(OutputFormat::from("string"), OutputFormat::Raw);
        assert_eq!(OutputFormat::from("stdout"), OutputFormat::Raw);
    }

    #[test]
    fn omitted_formats_default_to_raw() {
        assert_eq!(InputFormat::default(), InputFormat::Raw);
        assert_eq!(OutputFormat::default(), OutputFormat::Raw);
    }

    #[test]
    fn unknown_tags_are_kept_verbatim() {
        assert_eq!(
            InputFormat::from("xml"),
            InputFormat::Unsupported("xml".to_string())
        );
        // hcl and null are output-only.
        assert_eq!(
            InputFormat::from("hcl"),
            InputFormat::Unsupported("hcl".to_string())
        );
        assert_eq!(OutputFormat::from("ini").to_string(), "ini");
    }
}
