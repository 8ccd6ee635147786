// src/engine/state.rs

use serde::{Deserialize, Serialize};

use crate::codec::Outputs;
use crate::config::ResourceConfig;

/// Where a resource stands after the last phase that touched it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceStatus {
    /// No identity yet (never checked, or destroyed).
    #[default]
    Uninitialized,
    /// Identity assigned, check outputs current.
    Checked,
    /// `exit_code` expectation missed: outputs cleared, identity kept.
    Drifted,
    /// `exit_code_force_new` expectation missed: host should destroy and
    /// recreate.
    MustReplace,
}

/// Host-visible state of one managed resource.
///
/// The engine is the only writer; hosts persist it between runs and hand it
/// back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResourceState {
    /// Assigned by the first check, then never changed.
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub status: ResourceStatus,

    /// Expected check exit status; a miss clears outputs.
    #[serde(default)]
    pub exit_code: i32,

    /// Expected check exit status; a miss forces replacement.
    #[serde(default)]
    pub exit_code_force_new: i32,

    /// Exit status of the most recent check.
    #[serde(default)]
    pub last_exit_code: Option<i32>,

    /// `None` means "no outputs", which is not the same as an empty map.
    #[serde(default)]
    pub apply_outputs: Option<Outputs>,

    #[serde(default)]
    pub check_outputs: Option<Outputs>,
}

impl ResourceState {
    /// Fresh state for a resource that has never been applied.
    pub fn new(cfg: &ResourceConfig) -> Self {
        let mut state = Self::default();
        state.reset_expectations(cfg);
        state
    }

    /// Take the configured expectations as the new baseline.
    pub fn reset_expectations(&mut self, cfg: &ResourceConfig) {
        self.exit_code = cfg.exit_code;
        self.exit_code_force_new = cfg.exit_code_force_new;
    }

    /// Drop everything tied to the destroyed resource.
    pub fn forget(&mut self) {
        *self = Self::default();
    }

    pub fn must_replace(&self) -> bool {
        self.status == ResourceStatus::MustReplace
    }
}
