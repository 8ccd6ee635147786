#![allow(dead_code)]

pub use shellstate_test_utils::{init_tracing, with_timeout};

use shellstate::engine::{IdGenerator, Reconciler};
use shellstate_test_utils::scripted_backend::ScriptedBackend;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Reconciler over a scripted backend with a fixed id seed.
pub fn scripted(backend: ScriptedBackend) -> Reconciler<ScriptedBackend> {
    Reconciler::new(backend, IdGenerator::seeded(1234))
}
