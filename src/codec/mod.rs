// src/codec/mod.rs

//! Conversion between the string maps the host deals in and the bytes a
//! command reads from stdin / writes to stdout.
//!
//! - [`encode`] serializes a phase's inputs into a stdin payload.
//! - [`decode`] parses captured stdout into a phase's outputs.
//!
//! Both sides fail soft on an unrecognised format tag (warn + empty result).
//! Only the decoder can fail, and only when an explicitly requested
//! structured format does not parse.

pub mod decode;
pub mod encode;

use std::collections::BTreeMap;

use thiserror::Error;

pub use decode::decode_output;
pub use encode::encode_input;

/// String-keyed outputs as exposed to the host.
pub type Outputs = BTreeMap<String, String>;

/// Captured output did not parse under the requested format.
#[derive(Error, Debug)]
#[error("invalid {format}: {reason}")]
pub struct DecodeError {
    pub format: &'static str,
    pub reason: String,
}

impl DecodeError {
    pub(crate) fn new(format: &'static str, reason: impl ToString) -> Self {
        Self {
            format,
            reason: reason.to_string(),
        }
    }
}
