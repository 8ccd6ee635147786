// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::errors::{Result, ShellstateError};
use crate::types::{InputFormat, OutputFormat};

/// Top-level manifest as read from a TOML file.
///
/// ```toml
/// [resource.web]
/// shell = "/bin/sh -c"
/// apply = "./deploy.sh"
/// check = "./status.sh"
/// destroy = "./teardown.sh"
/// exit_code_force_new = 0
/// apply_input_format = "json"
/// apply_inputs = { version = "1.2.3" }
/// check_output_format = "json"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawManifest {
    /// All resources from `[resource.<name>]`.
    #[serde(default)]
    pub resource: BTreeMap<String, RawResourceConfig>,
}

/// `[resource.<name>]` section, attribute names as the host spells them.
#[derive(Debug, Clone, Deserialize)]
pub struct RawResourceConfig {
    /// Interpreter and flags, split on whitespace. Defaults per OS.
    #[serde(default)]
    pub shell: Option<String>,

    pub apply: String,

    pub check: String,

    #[serde(default)]
    pub destroy: Option<String>,

    /// Arbitrary values whose change should recreate the resource. Carried
    /// for the host; the engine never looks at them.
    #[serde(default)]
    pub keepers: BTreeMap<String, String>,

    #[serde(default)]
    pub exit_code: i32,

    #[serde(default)]
    pub exit_code_force_new: i32,

    #[serde(default)]
    pub apply_input_format: InputFormat,
    #[serde(default)]
    pub apply_inputs: BTreeMap<String, String>,
    #[serde(default)]
    pub apply_output_format: OutputFormat,

    #[serde(default)]
    pub check_input_format: InputFormat,
    #[serde(default)]
    pub check_inputs: BTreeMap<String, String>,
    #[serde(default)]
    pub check_output_format: OutputFormat,

    #[serde(default)]
    pub destroy_input_format: InputFormat,
    #[serde(default)]
    pub destroy_inputs: BTreeMap<String, String>,
}

/// Validated manifest.
#[derive(Debug, Clone)]
pub struct Manifest {
    resources: BTreeMap<String, ResourceConfig>,
}

impl Manifest {
    pub(crate) fn new_unchecked(resources: BTreeMap<String, ResourceConfig>) -> Self {
        Self { resources }
    }

    pub fn resources(&self) -> impl Iterator<Item = &ResourceConfig> {
        self.resources.values()
    }

    pub fn get(&self, name: &str) -> Result<&ResourceConfig> {
        self.resources
            .get(name)
            .ok_or_else(|| ShellstateError::UnknownResource(name.to_string()))
    }

    /// Pick a resource by name, or the only one when no name is given.
    pub fn select(&self, name: Option<&str>) -> Result<&ResourceConfig> {
        match name {
            Some(name) => self.get(name),
            None => {
                let mut iter = self.resources.values();
                match (iter.next(), iter.next()) {
                    (Some(only), None) => Ok(only),
                    _ => Err(ShellstateError::ConfigError(format!(
                        "manifest defines {} resources; pick one with --resource",
                        self.resources.len()
                    ))),
                }
            }
        }
    }
}

/// Inputs written to a phase's stdin.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputSpec {
    pub format: InputFormat,
    pub values: BTreeMap<String, String>,
}

/// Everything needed to run one phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseSpec {
    pub command: String,
    pub input: InputSpec,
    /// Destroy never decodes its output; its spec carries `Null`.
    pub output: OutputFormat,
}

impl PhaseSpec {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            input: InputSpec::default(),
            output: OutputFormat::default(),
        }
    }
}

/// One managed resource, validated and typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceConfig {
    pub name: String,
    /// Argument prefix for every command, never empty.
    pub shell: Vec<String>,
    pub apply: PhaseSpec,
    pub check: PhaseSpec,
    pub destroy: Option<PhaseSpec>,
    pub keepers: BTreeMap<String, String>,
    pub exit_code: i32,
    pub exit_code_force_new: i32,
}
