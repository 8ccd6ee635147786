#![allow(dead_code)]

use std::collections::BTreeMap;

use shellstate::config::{InputSpec, PhaseSpec, ResourceConfig};
use shellstate::types::{InputFormat, OutputFormat};

/// Builder for `ResourceConfig` to simplify test setup.
///
/// Defaults: shell `/bin/sh -c`, raw input/output formats, no destroy
/// command, both expectations 0.
pub struct ResourceConfigBuilder {
    config: ResourceConfig,
}

impl ResourceConfigBuilder {
    pub fn new(name: &str, apply: &str, check: &str) -> Self {
        Self {
            config: ResourceConfig {
                name: name.to_string(),
                shell: vec!["/bin/sh".to_string(), "-c".to_string()],
                apply: PhaseSpec::new(apply),
                check: PhaseSpec::new(check),
                destroy: None,
                keepers: BTreeMap::new(),
                exit_code: 0,
                exit_code_force_new: 0,
            },
        }
    }

    pub fn shell(mut self, shell: &str) -> Self {
        self.config.shell = shell.split_whitespace().map(str::to_string).collect();
        self
    }

    pub fn destroy(mut self, cmd: &str) -> Self {
        let mut spec = PhaseSpec::new(cmd);
        spec.output = OutputFormat::Null;
        self.config.destroy = Some(spec);
        self
    }

    pub fn exit_code(mut self, code: i32) -> Self {
        self.config.exit_code = code;
        self
    }

    pub fn exit_code_force_new(mut self, code: i32) -> Self {
        self.config.exit_code_force_new = code;
        self
    }

    pub fn apply_output(mut self, format: &str) -> Self {
        self.config.apply.output = OutputFormat::from(format);
        self
    }

    pub fn check_output(mut self, format: &str) -> Self {
        self.config.check.output = OutputFormat::from(format);
        self
    }

    pub fn apply_input(mut self, format: &str, pairs: &[(&str, &str)]) -> Self {
        self.config.apply.input = input_spec(format, pairs);
        self
    }

    pub fn check_input(mut self, format: &str, pairs: &[(&str, &str)]) -> Self {
        self.config.check.input = input_spec(format, pairs);
        self
    }

    /// Only meaningful once `destroy` has been set.
    pub fn destroy_input(mut self, format: &str, pairs: &[(&str, &str)]) -> Self {
        if let Some(spec) = self.config.destroy.as_mut() {
            spec.input = input_spec(format, pairs);
        }
        self
    }

    pub fn build(self) -> ResourceConfig {
        self.config
    }
}

fn input_spec(format: &str, pairs: &[(&str, &str)]) -> InputSpec {
    InputSpec {
        format: InputFormat::from(format),
        values: pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    }
}

/// Build a string map from literal pairs.
pub fn outputs(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
