// src/config/mod.rs

//! Manifest loading and validation for shellstate.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a manifest from disk (`loader.rs`).
//! - Turn raw sections into typed, per-phase configs (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path, parse_manifest};
pub use model::{
    InputSpec, Manifest, PhaseSpec, RawManifest, RawResourceConfig, ResourceConfig,
};
