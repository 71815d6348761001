use std::collections::HashMap;

use taskdag::errors::TaskdagError;
use taskdag::graph::{DepGraph, analyze, compute_schedule, topo_sort};
use taskdag::store::TaskId;
use taskdag_test_utils::builders::{SnapshotBuilder, TaskBuilder, design_build_test};

#[test]
fn topo_order_breaks_ties_by_ascending_id() {
    let tasks = SnapshotBuilder::new()
        .with_task(TaskBuilder::new(5, "e").build())
        .with_task(TaskBuilder::new(3, "c").build())
        .with_task(TaskBuilder::new(1, "a").build())
        .build();

    let graph = DepGraph::from_tasks(&tasks);
    let order = topo_sort(&graph).unwrap();
    assert_eq!(order, vec![1, 3, 5]);
}

#[test]
fn topo_order_places_every_task_after_its_prerequisites() {
    let tasks = SnapshotBuilder::new()
        .with_task(TaskBuilder::new(1, "a").build())
        .with_task(TaskBuilder::new(2, "b").depends_on(1).build())
        .with_task(TaskBuilder::new(3, "c").depends_on(1).build())
        .with_task(TaskBuilder::new(4, "d").depends_on(2).depends_on(3).build())
        .with_task(TaskBuilder::new(5, "e").build())
        .build();

    let graph = DepGraph::from_tasks(&tasks);
    let order = topo_sort(&graph).unwrap();
    assert_eq!(order.len(), tasks.len());

    let position: HashMap<TaskId, usize> =
        order.iter().enumerate().map(|(i, &id)| (id, i)).collect();
    for task in &tasks {
        for dep in &task.depends_on {
            assert!(
                position[dep] < position[&task.id],
                "task {} sorted before its prerequisite {}",
                task.id,
                dep
            );
        }
    }
}

#[test]
fn topo_sort_signals_cycle_instead_of_partial_order() {
    let tasks = SnapshotBuilder::new()
        .with_task(TaskBuilder::new(1, "a").depends_on(2).build())
        .with_task(TaskBuilder::new(2, "b").depends_on(1).build())
        .with_task(TaskBuilder::new(3, "c").build())
        .build();

    let graph = DepGraph::from_tasks(&tasks);
    let err = topo_sort(&graph).unwrap_err();
    assert!(matches!(err, TaskdagError::CycleDetected(_)));
}

#[test]
fn design_build_test_schedule() {
    // 1 "Design" <- 2 "Build" <- 3 "Test", target 3.
    let tasks = design_build_test();
    let schedule = compute_schedule(&tasks, Some(3)).unwrap();

    assert_eq!(schedule.order, vec![1, 2, 3]);
    assert_eq!(schedule.earliest_start[&1], Some(0));
    assert_eq!(schedule.earliest_start[&2], Some(1));
    assert_eq!(schedule.earliest_start[&3], Some(2));

    assert_eq!(
        schedule.critical_nodes.iter().copied().collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
    assert!(schedule.critical_edges.contains(&(1, 2)));
    assert!(schedule.critical_edges.contains(&(2, 3)));
    assert_eq!(schedule.critical_edges.len(), 2);
}

#[test]
fn isolated_task_starts_at_zero_and_stays_off_the_critical_path() {
    let mut tasks = design_build_test();
    tasks.push(TaskBuilder::new(4, "Standalone").build());

    let schedule = compute_schedule(&tasks, Some(3)).unwrap();
    assert_eq!(schedule.earliest_start[&4], Some(0));
    assert!(!schedule.critical_nodes.contains(&4));

    // Unless it is the target itself.
    let schedule = compute_schedule(&tasks, Some(4)).unwrap();
    assert!(schedule.critical_nodes.contains(&4));
    assert_eq!(schedule.critical_nodes.len(), 1);
    assert!(schedule.critical_edges.is_empty());
}

#[test]
fn diamond_keeps_the_longest_path_and_first_improving_predecessor() {
    // 1 at the base; 2 and 3 both depend on 1; 4 depends on 2 and 3.
    let tasks = SnapshotBuilder::new()
        .with_task(TaskBuilder::new(1, "a").build())
        .with_task(TaskBuilder::new(2, "b").depends_on(1).build())
        .with_task(TaskBuilder::new(3, "c").depends_on(1).build())
        .with_task(TaskBuilder::new(4, "d").depends_on(2).depends_on(3).build())
        .build();

    let schedule = compute_schedule(&tasks, Some(4)).unwrap();
    assert_eq!(schedule.earliest_start[&4], Some(2));

    // Both incoming chains have equal length; the deterministic order means
    // task 2 (processed first) wins the predecessor slot and the critical
    // path runs 1 -> 2 -> 4.
    assert_eq!(schedule.predecessor[&4], 2);
    assert_eq!(
        schedule.critical_nodes.iter().copied().collect::<Vec<_>>(),
        vec![1, 2, 4]
    );
}

#[test]
fn no_dp_pass_on_a_cyclic_snapshot() {
    let tasks = SnapshotBuilder::new()
        .with_task(TaskBuilder::new(1, "a").depends_on(2).build())
        .with_task(TaskBuilder::new(2, "b").depends_on(1).build())
        .build();

    let err = compute_schedule(&tasks, None).unwrap_err();
    assert!(matches!(err, TaskdagError::GraphInvalid(_)));
}

#[test]
fn unknown_target_is_rejected() {
    let tasks = design_build_test();
    let err = compute_schedule(&tasks, Some(42)).unwrap_err();
    assert!(matches!(err, TaskdagError::InvalidReference(42)));
}

#[test]
fn max_earliest_start_equals_longest_chain_minus_one() {
    let mut builder = SnapshotBuilder::new().with_task(TaskBuilder::new(1, "t1").build());
    for id in 2..=6 {
        builder = builder.with_task(
            TaskBuilder::new(id, &format!("t{id}"))
                .depends_on(id - 1)
                .build(),
        );
    }
    // A short side chain that must not win.
    let tasks = builder
        .with_task(TaskBuilder::new(10, "side").depends_on(1).build())
        .build();

    let schedule = compute_schedule(&tasks, None).unwrap();
    let max_start = schedule
        .earliest_start
        .values()
        .filter_map(|v| *v)
        .max()
        .unwrap();
    assert_eq!(max_start, 5); // chain 1..=6 has 6 tasks, 5 hops
}

#[test]
fn dangling_prerequisites_do_not_block_the_forward_pass() {
    // 2's only prerequisite is missing from the snapshot, so its in-degree
    // is zero and it starts at hop 0; 3 depends on 2 normally.
    let tasks = SnapshotBuilder::new()
        .with_task(TaskBuilder::new(2, "b").depends_on(99).build())
        .with_task(TaskBuilder::new(3, "c").depends_on(2).build())
        .build();

    let graph = DepGraph::from_tasks(&tasks);
    let order = topo_sort(&graph).unwrap();
    let result = analyze(&graph, &order, None);

    assert_eq!(result.earliest_start[&2], Some(0));
    assert_eq!(result.earliest_start[&3], Some(1));
}
