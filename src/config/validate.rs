// src/config/validate.rs

use std::collections::BTreeMap;

use crate::config::model::{
    InputSpec, Manifest, PhaseSpec, RawManifest, RawResourceConfig, ResourceConfig,
};
use crate::errors::{Result, ShellstateError};
use crate::exec::command::{default_shell, split_shell};
use crate::types::OutputFormat;

impl TryFrom<RawManifest> for Manifest {
    type Error = ShellstateError;

    fn try_from(raw: RawManifest) -> std::result::Result<Self, Self::Error> {
        ensure_has_resources(&raw)?;

        let mut resources = BTreeMap::new();
        for (name, raw_resource) in raw.resource {
            let resource = ResourceConfig::from_raw(&name, raw_resource)?;
            resources.insert(name, resource);
        }
        Ok(Manifest::new_unchecked(resources))
    }
}

impl ResourceConfig {
    /// Validate one `[resource.<name>]` section.
    pub fn from_raw(name: &str, raw: RawResourceConfig) -> Result<Self> {
        let shell_spec = raw.shell.as_deref().unwrap_or(default_shell());
        let shell = split_shell(shell_spec).map_err(|_| {
            ShellstateError::ConfigError(format!(
                "resource '{name}' has an empty `shell`; expected e.g. \"{}\"",
                default_shell()
            ))
        })?;

        let apply = PhaseSpec {
            command: raw.apply,
            input: InputSpec {
                format: raw.apply_input_format,
                values: raw.apply_inputs,
            },
            output: raw.apply_output_format,
        };

        let check = PhaseSpec {
            command: raw.check,
            input: InputSpec {
                format: raw.check_input_format,
                values: raw.check_inputs,
            },
            output: raw.check_output_format,
        };

        let destroy = raw.destroy.map(|command| PhaseSpec {
            command,
            input: InputSpec {
                format: raw.destroy_input_format,
                values: raw.destroy_inputs,
            },
            output: OutputFormat::Null,
        });

        Ok(ResourceConfig {
            name: name.to_string(),
            shell,
            apply,
            check,
            destroy,
            keepers: raw.keepers,
            exit_code: raw.exit_code,
            exit_code_force_new: raw.exit_code_force_new,
        })
    }
}

fn ensure_has_resources(raw: &RawManifest) -> Result<()> {
    if raw.resource.is_empty() {
        return Err(ShellstateError::ConfigError(
            "manifest must contain at least one [resource.<name>] section".to_string(),
        ));
    }
    Ok(())
}
