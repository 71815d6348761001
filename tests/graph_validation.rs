use taskdag::errors::TaskdagError;
use taskdag::graph::{toggle_dependency, validate_new_edge};
use taskdag_test_utils::builders::{SnapshotBuilder, TaskBuilder, design_build_test};

#[test]
fn rejects_self_dependency() {
    let tasks = design_build_test();
    let err = validate_new_edge(&tasks, 2, 2).unwrap_err();
    assert!(matches!(err, TaskdagError::SelfDependency(2)));
}

#[test]
fn rejects_edge_that_would_close_a_cycle() {
    // 3 -> 2 -> 1; making 1 depend on 3 closes the loop.
    let tasks = design_build_test();
    let err = validate_new_edge(&tasks, 1, 3).unwrap_err();
    assert!(matches!(err, TaskdagError::CycleDetected(_)));
}

#[test]
fn accepts_redundant_forward_edge() {
    // 3 already transitively depends on 1; a direct 3 -> 1 edge is
    // redundant but legal.
    let tasks = design_build_test();
    assert!(validate_new_edge(&tasks, 3, 1).is_ok());
}

#[test]
fn accepts_edge_between_unrelated_tasks() {
    let tasks = SnapshotBuilder::new()
        .with_task(TaskBuilder::new(1, "a").build())
        .with_task(TaskBuilder::new(2, "b").build())
        .build();
    assert!(validate_new_edge(&tasks, 1, 2).is_ok());
    assert!(validate_new_edge(&tasks, 2, 1).is_ok());
}

#[test]
fn rejects_cycle_through_a_longer_path() {
    // 4 -> 3 -> 2 -> 1; candidate 4 reaches 1 in three hops.
    let tasks = SnapshotBuilder::new()
        .with_task(TaskBuilder::new(1, "a").build())
        .with_task(TaskBuilder::new(2, "b").depends_on(1).build())
        .with_task(TaskBuilder::new(3, "c").depends_on(2).build())
        .with_task(TaskBuilder::new(4, "d").depends_on(3).build())
        .build();

    let err = validate_new_edge(&tasks, 1, 4).unwrap_err();
    assert!(matches!(err, TaskdagError::CycleDetected(_)));
}

#[test]
fn dangling_reference_is_a_dead_end_not_an_error() {
    // 2 depends on 99, which does not exist; the search just stops there.
    let tasks = SnapshotBuilder::new()
        .with_task(TaskBuilder::new(1, "a").build())
        .with_task(TaskBuilder::new(2, "b").depends_on(99).build())
        .build();

    assert!(validate_new_edge(&tasks, 1, 2).is_ok());
}

#[test]
fn validation_terminates_on_an_already_cyclic_snapshot() {
    // The invariant is already broken (1 <-> 2); the visited set must stop
    // the walk rather than spinning.
    let tasks = SnapshotBuilder::new()
        .with_task(TaskBuilder::new(1, "a").depends_on(2).build())
        .with_task(TaskBuilder::new(2, "b").depends_on(1).build())
        .with_task(TaskBuilder::new(3, "c").build())
        .build();

    // 3 is outside the cycle, so adding 3 as a prerequisite of 1 is fine.
    assert!(validate_new_edge(&tasks, 1, 3).is_ok());
    // 2 reaches 1, so this is still correctly rejected.
    let err = validate_new_edge(&tasks, 1, 2).unwrap_err();
    assert!(matches!(err, TaskdagError::CycleDetected(_)));
}

#[test]
fn toggle_adds_then_removes() {
    let mut tasks = SnapshotBuilder::new()
        .with_task(TaskBuilder::new(1, "a").build())
        .with_task(TaskBuilder::new(2, "b").build())
        .build();

    let original = tasks[1].depends_on.clone();

    let added = toggle_dependency(&tasks, 2, 1).unwrap();
    assert!(added.contains(&1));
    tasks[1].depends_on = added;

    let removed = toggle_dependency(&tasks, 2, 1).unwrap();
    assert_eq!(removed, original);
}

#[test]
fn toggle_off_skips_validation() {
    // Removal must always be possible, even when the stored set contains a
    // dangling id.
    let tasks = SnapshotBuilder::new()
        .with_task(TaskBuilder::new(1, "a").depends_on(99).build())
        .build();

    let deps = toggle_dependency(&tasks, 1, 99).unwrap();
    assert!(deps.is_empty());
}

#[test]
fn toggle_rejects_unknown_task() {
    let tasks = design_build_test();
    let err = toggle_dependency(&tasks, 42, 1).unwrap_err();
    assert!(matches!(err, TaskdagError::InvalidReference(42)));
}

#[test]
fn toggle_on_rejects_unknown_candidate() {
    let tasks = design_build_test();
    let err = toggle_dependency(&tasks, 1, 42).unwrap_err();
    assert!(matches!(err, TaskdagError::InvalidReference(42)));
}

#[test]
fn toggle_rejects_cycle_before_commit() {
    let tasks = design_build_test();
    let err = toggle_dependency(&tasks, 1, 3).unwrap_err();
    assert!(matches!(err, TaskdagError::CycleDetected(_)));
    // The snapshot itself is untouched; the caller never got an edge set to
    // commit.
    assert!(tasks[0].depends_on.is_empty());
}
