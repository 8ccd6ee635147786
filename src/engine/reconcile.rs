// src/engine/reconcile.rs

//! The reconciliation state machine.
//!
//! `Reconciler` sequences the phases of one resource and decides, from the
//! check command's exit status alone, whether the resource is in sync, has
//! drifted (outputs cleared, identity kept) or must be replaced.
//!
//! All phase methods take `&mut self` and `&mut ResourceState`, so two phases
//! can never run concurrently against the same resource.

use tracing::{debug, info, warn};

use crate::codec::{decode_output, encode_input, Outputs};
use crate::config::{PhaseSpec, ResourceConfig};
use crate::engine::identity::IdGenerator;
use crate::engine::plan::{plan, PlanAction};
use crate::engine::state::{ResourceState, ResourceStatus};
use crate::errors::{Result, ShellstateError};
use crate::exec::{build_argv, CommandBackend, CommandOutput};
use crate::types::{OutputFormat, Phase};

/// Result of a check, reported to the host as data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Exit status matched both expectations; outputs decoded.
    InSync,
    /// Exit status missed `exit_code`.
    Drifted { expected: i32, observed: i32 },
    /// Exit status missed `exit_code_force_new`.
    MustReplace { expected: i32, observed: i32 },
}

impl CheckOutcome {
    pub fn requires_replacement(&self) -> bool {
        matches!(self, CheckOutcome::MustReplace { .. })
    }
}

pub struct Reconciler<B> {
    backend: B,
    ids: IdGenerator,
}

impl<B: CommandBackend> Reconciler<B> {
    pub fn new(backend: B, ids: IdGenerator) -> Self {
        Self { backend, ids }
    }

    /// Run the apply command, then check.
    ///
    /// A non-zero apply exit status aborts with `CommandFailed` before any
    /// state is touched; check never runs. Only a successful apply is followed
    /// by the check that decides whether the resource is where it should be.
    pub async fn apply(
        &mut self,
        cfg: &ResourceConfig,
        state: &mut ResourceState,
    ) -> Result<CheckOutcome> {
        let output = self.run_phase(cfg, Phase::Apply, &cfg.apply).await?;
        ensure_success(cfg, Phase::Apply, &output)?;

        // Apply runs against the configured expectations, not whatever the
        // last check wrote back.
        state.reset_expectations(cfg);

        state.apply_outputs = None;
        state.apply_outputs = decode_phase(Phase::Apply, &cfg.apply.output, &output)?;

        self.check(cfg, state).await
    }

    /// Run the check command and reconcile `state` against its exit status.
    pub async fn check(
        &mut self,
        cfg: &ResourceConfig,
        state: &mut ResourceState,
    ) -> Result<CheckOutcome> {
        let output = self.run_phase(cfg, Phase::Check, &cfg.check).await?;

        if state.id.is_none() {
            let id = self.ids.next_id();
            info!(resource = %cfg.name, id = %id, "assigned resource identity");
            state.id = Some(id);
        }

        let observed = output.exit_code;
        state.last_exit_code = Some(observed);

        if observed != state.exit_code_force_new {
            let expected = state.exit_code_force_new;
            warn!(
                resource = %cfg.name,
                expected,
                observed,
                "check exit status missed exit_code_force_new; resource must be replaced"
            );
            state.exit_code_force_new = observed;
            state.check_outputs = None;
            state.status = ResourceStatus::MustReplace;
            return Ok(CheckOutcome::MustReplace { expected, observed });
        }

        if observed != state.exit_code {
            let expected = state.exit_code;
            warn!(
                resource = %cfg.name,
                expected,
                observed,
                "check exit status missed exit_code; clearing outputs"
            );
            state.exit_code = observed;
            state.check_outputs = None;
            state.status = ResourceStatus::Drifted;
            return Ok(CheckOutcome::Drifted { expected, observed });
        }

        state.check_outputs = None;
        state.check_outputs = decode_phase(Phase::Check, &cfg.check.output, &output)?;
        state.status = ResourceStatus::Checked;
        Ok(CheckOutcome::InSync)
    }

    /// Run the destroy command, if any, and forget the resource.
    ///
    /// Without a destroy command nothing is spawned. If the command cannot be
    /// run, or exits non-zero, the state is left untouched so the host can
    /// retry.
    pub async fn destroy(&mut self, cfg: &ResourceConfig, state: &mut ResourceState) -> Result<()> {
        match &cfg.destroy {
            Some(spec) => {
                let output = self.run_phase(cfg, Phase::Destroy, spec).await?;
                ensure_success(cfg, Phase::Destroy, &output)?;
                debug!(resource = %cfg.name, "destroy finished");
            }
            None => {
                debug!(resource = %cfg.name, "no destroy command configured; nothing to run");
            }
        }
        state.forget();
        Ok(())
    }

    /// Bring the resource to its configured state in one go.
    ///
    /// Existing resources are checked first; the resulting plan then decides
    /// between doing nothing, re-applying, or destroying and recreating.
    pub async fn converge(
        &mut self,
        cfg: &ResourceConfig,
        state: &mut ResourceState,
    ) -> Result<PlanAction> {
        if state.id.is_some() {
            self.check(cfg, state).await?;
        }

        let action = plan(cfg, state);
        info!(resource = %cfg.name, ?action, "planned");

        match action {
            PlanAction::NoOp => {}
            PlanAction::Create | PlanAction::Update => {
                self.apply(cfg, state).await?;
            }
            PlanAction::Replace => {
                self.destroy(cfg, state).await?;
                self.apply(cfg, state).await?;
            }
        }
        Ok(action)
    }

    async fn run_phase(
        &self,
        cfg: &ResourceConfig,
        phase: Phase,
        spec: &PhaseSpec,
    ) -> Result<CommandOutput> {
        let argv = build_argv(&cfg.shell, &spec.command)?;
        let input = encode_input(&spec.input.format, &spec.input.values);
        info!(
            resource = %cfg.name,
            %phase,
            input_format = %spec.input.format,
            "running phase"
        );
        self.backend.run(&argv, &input).await
    }
}

/// Apply and destroy must exit 0; check statuses are compared against the
/// stored expectations instead.
fn ensure_success(cfg: &ResourceConfig, phase: Phase, output: &CommandOutput) -> Result<()> {
    if output.exit_code == 0 {
        return Ok(());
    }
    warn!(
        resource = %cfg.name,
        %phase,
        exit_code = output.exit_code,
        "command failed; aborting"
    );
    Err(ShellstateError::CommandFailed {
        phase,
        exit_code: output.exit_code,
    })
}

fn decode_phase(
    phase: Phase,
    format: &OutputFormat,
    output: &CommandOutput,
) -> Result<Option<Outputs>> {
    let outputs = decode_output(format, &output.stdout)
        .map_err(|source| ShellstateError::OutputDecodeFailed { phase, source })?;
    debug!(%phase, ?outputs, "decoded outputs");
    Ok(outputs)
}
