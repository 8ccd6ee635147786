// tests/plan_converge.rs

mod common;
use crate::common::{init_tracing, scripted, TestResult};

use shellstate::engine::{plan, PlanAction, ResourceState, ResourceStatus};
use shellstate_test_utils::builders::ResourceConfigBuilder;
use shellstate_test_utils::scripted_backend::ScriptedBackend;

#[test]
fn plan_decisions() {
    let cfg = ResourceConfigBuilder::new("web", "a", "c")
        .exit_code(0)
        .exit_code_force_new(0)
        .build();

    let fresh = ResourceState::new(&cfg);
    assert_eq!(plan(&cfg, &fresh), PlanAction::Create);

    let mut state = fresh.clone();
    state.id = Some("1".to_string());
    assert_eq!(plan(&cfg, &state), PlanAction::NoOp);

    state.exit_code = 3;
    assert_eq!(plan(&cfg, &state), PlanAction::Update);

    // Replacement wins over a plain update.
    state.exit_code_force_new = 3;
    assert_eq!(plan(&cfg, &state), PlanAction::Replace);
}

#[tokio::test]
async fn converge_creates_a_new_resource() -> TestResult {
    init_tracing();

    let cfg = ResourceConfigBuilder::new("web", "apply.sh", "check.sh").build();
    let backend = ScriptedBackend::new();
    let mut reconciler = scripted(backend.clone());
    let mut state = ResourceState::new(&cfg);

    let action = reconciler.converge(&cfg, &mut state).await?;

    assert_eq!(action, PlanAction::Create);
    assert_eq!(backend.commands_run(), vec!["apply.sh", "check.sh"]);
    assert!(state.id.is_some());
    Ok(())
}

#[tokio::test]
async fn converge_leaves_an_in_sync_resource_alone() -> TestResult {
    init_tracing();

    let cfg = ResourceConfigBuilder::new("web", "apply.sh", "check.sh").build();
    let backend = ScriptedBackend::new();
    let mut reconciler = scripted(backend.clone());
    let mut state = ResourceState::new(&cfg);
    reconciler.apply(&cfg, &mut state).await?;

    let action = reconciler.converge(&cfg, &mut state).await?;

    assert_eq!(action, PlanAction::NoOp);
    assert_eq!(
        backend.commands_run(),
        vec!["apply.sh", "check.sh", "check.sh"]
    );
    Ok(())
}

#[tokio::test]
async fn converge_reapplies_after_soft_drift() -> TestResult {
    init_tracing();

    let cfg = ResourceConfigBuilder::new("web", "apply.sh", "check.sh")
        .exit_code_force_new(1)
        .build();
    // Check keeps exiting 1: exit_code_force_new is satisfied, exit_code is not.
    let backend = ScriptedBackend::new().reply("check.sh", 1, "");
    let mut reconciler = scripted(backend.clone());
    let mut state = ResourceState::new(&cfg);

    reconciler.apply(&cfg, &mut state).await?;
    assert_eq!(state.status, ResourceStatus::Drifted);

    let action = reconciler.converge(&cfg, &mut state).await?;

    assert_eq!(action, PlanAction::Update);
    assert_eq!(
        backend.commands_run(),
        vec!["apply.sh", "check.sh", "check.sh", "apply.sh", "check.sh"]
    );
    Ok(())
}

#[tokio::test]
async fn converge_replaces_after_hard_drift() -> TestResult {
    init_tracing();

    let cfg = ResourceConfigBuilder::new("web", "apply.sh", "check.sh")
        .destroy("destroy.sh")
        .build();
    let backend = ScriptedBackend::new();
    let mut reconciler = scripted(backend.clone());
    let mut state = ResourceState::new(&cfg);
    reconciler.apply(&cfg, &mut state).await?;
    let old_id = state.id.clone();

    // The resource breaks, then the recreate fixes it.
    backend.push_reply("check.sh", 2, "");
    backend.push_reply("check.sh", 0, "");

    let action = reconciler.converge(&cfg, &mut state).await?;

    assert_eq!(action, PlanAction::Replace);
    assert_eq!(
        backend.commands_run(),
        vec![
            "apply.sh",
            "check.sh",
            "check.sh",
            "destroy.sh",
            "apply.sh",
            "check.sh"
        ]
    );
    assert_eq!(state.status, ResourceStatus::Checked);
    assert!(state.id.is_some());
    assert_ne!(state.id, old_id, "replacement gets a fresh identity");
    Ok(())
}
