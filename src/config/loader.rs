// src/config/loader.rs

use std::fs;
use std::path::Path;

use crate::config::model::{Manifest, RawManifest};
use crate::errors::Result;

/// Load a manifest from a given path and return the raw `RawManifest`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawManifest> {
    let contents = fs::read_to_string(path.as_ref())?;
    parse_manifest(&contents)
}

/// Parse manifest TOML already in memory.
pub fn parse_manifest(contents: &str) -> Result<RawManifest> {
    let manifest: RawManifest = toml::from_str(contents)?;
    Ok(manifest)
}

/// Load a manifest from path and validate it.
///
/// - Reads TOML.
/// - Applies defaults (handled by `serde` + `Default` impls).
/// - Checks that there is at least one resource and that every shell is
///   usable.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<Manifest> {
    let raw = load_from_path(path)?;
    Manifest::try_from(raw)
}

