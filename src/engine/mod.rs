// src/engine/mod.rs

//! Resource reconciliation.
//!
//! - [`reconcile`] holds the `Reconciler` that runs apply / check / destroy.
//! - [`state`] is the host-visible `ResourceState` it mutates.
//! - [`plan`] turns a state into the next action (create, update, replace).
//! - [`identity`] generates resource ids.

pub mod identity;
pub mod plan;
pub mod reconcile;
pub mod state;

pub use identity::IdGenerator;
pub use plan::{plan, PlanAction};
pub use reconcile::{CheckOutcome, Reconciler};
pub use state::{ResourceState, ResourceStatus};
