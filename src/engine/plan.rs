// src/engine/plan.rs

//! Diff between a stored state and the configured expectations.
//!
//! Hosts normally compute this themselves from their own config diff; this is
//! the minimal version the CLI uses. Both expectations are written back by a
//! check that missed them, so comparing them with the configured values is
//! enough to tell drift from forced replacement.

use serde::Serialize;

use crate::config::ResourceConfig;
use crate::engine::state::ResourceState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanAction {
    /// No identity yet.
    Create,
    /// Everything matches.
    NoOp,
    /// `exit_code` drifted: re-apply in place.
    Update,
    /// `exit_code_force_new` drifted: destroy, then create.
    Replace,
}

pub fn plan(cfg: &ResourceConfig, state: &ResourceState) -> PlanAction {
    if state.id.is_none() {
        PlanAction::Create
    } else if state.exit_code_force_new != cfg.exit_code_force_new {
        PlanAction::Replace
    } else if state.exit_code != cfg.exit_code {
        PlanAction::Update
    } else {
        PlanAction::NoOp
    }
}
