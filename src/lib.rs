// src/lib.rs

pub mod cli;
pub mod codec;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod types;

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use crate::cli::{Action, CliArgs};
use crate::config::{load_and_validate, PhaseSpec, ResourceConfig};
use crate::engine::{plan, IdGenerator, PlanAction, Reconciler, ResourceState};
use crate::exec::RealCommandBackend;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - manifest loading
/// - prior state (if any)
/// - the reconciler with the real process backend
/// - printing the resulting state as JSON on stdout
pub async fn run(args: CliArgs) -> Result<()> {
    let manifest = load_and_validate(&args.manifest)
        .with_context(|| format!("loading manifest {}", args.manifest))?;
    let cfg = manifest.select(args.resource.as_deref())?;

    if args.action == Action::Show {
        print_resource(cfg);
        return Ok(());
    }

    let mut state = match &args.state {
        Some(path) => load_state(path)?,
        None => ResourceState::new(cfg),
    };

    let ids = args
        .seed
        .map(IdGenerator::seeded)
        .unwrap_or_else(IdGenerator::from_entropy);
    let mut reconciler = Reconciler::new(RealCommandBackend, ids);

    match args.action {
        Action::Apply => {
            let outcome = reconciler.apply(cfg, &mut state).await?;
            info!(resource = %cfg.name, ?outcome, "apply complete");
        }
        Action::Check => {
            let outcome = reconciler.check(cfg, &mut state).await?;
            info!(resource = %cfg.name, ?outcome, "check complete");
        }
        Action::Destroy => {
            reconciler.destroy(cfg, &mut state).await?;
            info!(resource = %cfg.name, "destroy complete");
        }
        Action::Reconcile => {
            let action = reconciler.converge(cfg, &mut state).await?;
            info!(resource = %cfg.name, ?action, "reconcile complete");
        }
        Action::Plan | Action::Show => {
            let report = PlanReport {
                resource: &cfg.name,
                action: plan(cfg, &state),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
            return Ok(());
        }
    }

    println!("{}", serde_json::to_string_pretty(&state)?);
    Ok(())
}

#[derive(Debug, Serialize)]
struct PlanReport<'a> {
    resource: &'a str,
    action: PlanAction,
}

/// Read a state document previously printed by `shellstate`.
pub fn load_state(path: impl AsRef<Path>) -> Result<ResourceState> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading state file {}", path.display()))?;
    let state = serde_json::from_str(&contents)
        .with_context(|| format!("parsing state file {}", path.display()))?;
    Ok(state)
}

/// Simple `show` output: print the resolved resource config.
fn print_resource(cfg: &ResourceConfig) {
    println!("shellstate resource {}", cfg.name);
    println!("  shell: {:?}", cfg.shell);
    println!("  exit_code: {}", cfg.exit_code);
    println!("  exit_code_force_new: {}", cfg.exit_code_force_new);
    if !cfg.keepers.is_empty() {
        println!("  keepers: {:?}", cfg.keepers);
    }
    print_phase("apply", Some(&cfg.apply));
    print_phase("check", Some(&cfg.check));
    print_phase("destroy", cfg.destroy.as_ref());

    debug!("show complete (no execution)");
}

fn print_phase(label: &str, spec: Option<&PhaseSpec>) {
    let Some(spec) = spec else {
        println!("  {label}: (none)");
        return;
    };
    println!("  {label}:");
    println!("      cmd: {}", spec.command);
    println!("      input_format: {}", spec.input.format);
    if !spec.input.values.is_empty() {
        println!("      inputs: {:?}", spec.input.values);
    }
    println!("      output_format: {}", spec.output);
}
