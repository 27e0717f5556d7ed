mod common;

use common::{GraphBuilder, TaskRecordBuilder, TestResult, init_tracing};
use pertdag::dag::{Scheduler, TaskId, Timing};

fn timing(start: u64, end: u64) -> Option<Timing> {
    Some(Timing { start, end })
}

#[test]
fn chain_gets_one_level_per_task_and_is_fully_critical() -> TestResult {
    init_tracing();

    let mut b = GraphBuilder::new();
    let a = b.task("A", 1, &[]);
    let bb = b.task("B", 1, &[a]);
    let c = b.task("C", 1, &[bb]);
    let scheduler = b.build();

    let schedule = scheduler.build_schedule();

    assert_eq!(schedule.levels(), &[vec![a], vec![bb], vec![c]]);
    assert_eq!(schedule.timing(a), timing(0, 1));
    assert_eq!(schedule.timing(bb), timing(1, 2));
    assert_eq!(schedule.timing(c), timing(2, 3));
    assert!(schedule.is_critical(a));
    assert!(schedule.is_critical(bb));
    assert!(schedule.is_critical(c));
    assert_eq!(schedule.terminal(), Some(c));
    assert_eq!(schedule.makespan(), 3);
    Ok(())
}

#[test]
fn independent_tasks_share_a_level_and_first_found_wins() -> TestResult {
    let mut b = GraphBuilder::new();
    let a = b.task("A", 1, &[]);
    let bb = b.task("B", 1, &[]);
    let scheduler = b.build();

    let schedule = scheduler.build_schedule();

    assert_eq!(schedule.levels(), &[vec![a, bb]]);
    assert_eq!(schedule.terminal(), Some(a));
    assert!(schedule.is_critical(a));
    assert!(!schedule.is_critical(bb));
    assert!(!schedule.is_critical_dependent_on(a, bb));
    assert!(!schedule.is_critical_dependent_on(bb, a));
    Ok(())
}

#[test]
fn latest_finisher_of_final_level_is_terminal() -> TestResult {
    let mut b = GraphBuilder::new();
    let short = b.task("short", 1, &[]);
    let long = b.task("long", 4, &[]);
    let scheduler = b.build();

    let schedule = scheduler.build_schedule();

    assert_eq!(schedule.terminal(), Some(long));
    assert!(schedule.is_critical(long));
    assert!(!schedule.is_critical(short));
    Ok(())
}

#[test]
fn join_starts_after_latest_prerequisite() -> TestResult {
    // B ends at 2, C ends at 5; D waits for both.
    let mut b = GraphBuilder::new();
    let bb = b.task("B", 2, &[]);
    let c = b.task("C", 5, &[]);
    let d = b.task("D", 1, &[bb, c]);
    let scheduler = b.build();

    let schedule = scheduler.build_schedule();

    assert_eq!(schedule.levels(), &[vec![bb, c], vec![d]]);
    assert_eq!(schedule.end_time(bb), Some(2));
    assert_eq!(schedule.end_time(c), Some(5));
    assert_eq!(schedule.start_time(d), Some(5));
    assert_eq!(schedule.end_time(d), Some(6));

    assert!(schedule.is_critical_dependent_on(d, c));
    assert!(!schedule.is_critical_dependent_on(d, bb));
    assert_eq!(schedule.critical_tasks(), vec![c, d]);
    Ok(())
}

#[test]
fn critical_dependency_requires_a_direct_edge() -> TestResult {
    let mut b = GraphBuilder::new();
    let a = b.task("A", 2, &[]);
    let other = b.task("other", 2, &[]);
    let c = b.task("C", 1, &[a]);
    let scheduler = b.build();

    let schedule = scheduler.build_schedule();

    // `other` ends exactly when C starts, but C does not depend on it.
    assert_eq!(schedule.end_time(other), schedule.start_time(c));
    assert!(!schedule.is_critical_dependent_on(c, other));
    assert!(schedule.is_critical_dependent_on(c, a));
    Ok(())
}

#[test]
fn critical_walk_follows_every_zero_slack_branch() -> TestResult {
    // Two equally long branches feed the sink; both are critical.
    let mut b = GraphBuilder::new();
    let root = b.task("root", 1, &[]);
    let left = b.task("left", 3, &[root]);
    let right = b.task("right", 3, &[root]);
    let slow_side = b.task("side", 1, &[root]);
    let sink = b.task("sink", 1, &[left, right, slow_side]);
    let scheduler = b.build();

    let schedule = scheduler.build_schedule();

    assert_eq!(schedule.critical_tasks(), vec![root, left, right, sink]);
    assert!(!schedule.is_critical(slow_side));
    Ok(())
}

#[test]
fn long_task_outside_final_level_is_not_terminal() -> TestResult {
    // The critical path ends in the final level even when an earlier level
    // holds a task that finishes later.
    let mut b = GraphBuilder::new();
    let long = b.task("long", 10, &[]);
    let first = b.task("first", 1, &[]);
    let second = b.task("second", 1, &[first]);
    let scheduler = b.build();

    let schedule = scheduler.build_schedule();

    assert_eq!(schedule.terminal(), Some(second));
    assert_eq!(schedule.critical_tasks(), vec![first, second]);
    assert!(!schedule.is_critical(long));
    assert_eq!(schedule.makespan(), 10);
    Ok(())
}

#[test]
fn zero_duration_tasks_hand_over_immediately() -> TestResult {
    let mut b = GraphBuilder::new();
    let milestone = b.task("milestone", 0, &[]);
    let work = b.task("work", 3, &[milestone]);
    let scheduler = b.build();

    let schedule = scheduler.build_schedule();

    assert_eq!(schedule.timing(milestone), timing(0, 0));
    assert_eq!(schedule.timing(work), timing(0, 3));
    assert!(schedule.is_critical(milestone));
    assert!(schedule.is_critical(work));
    Ok(())
}

#[test]
fn rebuilding_the_schedule_is_idempotent() -> TestResult {
    let mut b = GraphBuilder::new();
    let a = b.task("A", 3, &[]);
    let bb = b.task("B", 2, &[a]);
    let c = b.task("C", 4, &[a]);
    b.task("D", 1, &[bb, c]);
    b.task("E", 7, &[]);
    let scheduler = b.build();

    let first = scheduler.build_schedule();
    let second = scheduler.build_schedule();

    assert_eq!(first.levels(), second.levels());
    assert_eq!(first.order(), second.order());
    for id in scheduler.graph().ids() {
        assert_eq!(first.timing(id), second.timing(id));
        assert_eq!(first.is_critical(id), second.is_critical(id));
    }
    Ok(())
}

#[test]
fn schedule_order_matches_topological_order() -> TestResult {
    let mut b = GraphBuilder::new();
    let a = b.task("A", 1, &[]);
    let bb = b.task("B", 1, &[]);
    b.task("C", 1, &[a]);
    b.task("D", 1, &[bb]);
    b.task("E", 1, &[]);
    let scheduler = b.build();

    let schedule = scheduler.build_schedule();
    assert_eq!(
        schedule.levels(),
        &[
            vec![TaskId(0), TaskId(1), TaskId(4)],
            vec![TaskId(2), TaskId(3)]
        ]
    );
    assert_eq!(schedule.order(), scheduler.topological_order().order());
    Ok(())
}

#[test]
fn cyclic_tasks_have_no_timing() -> TestResult {
    let scheduler = Scheduler::from_records(vec![
        TaskRecordBuilder::new(0, "Start").duration(2).build(),
        TaskRecordBuilder::new(1, "Loop A").after(2).build(),
        TaskRecordBuilder::new(2, "Loop B").after(1).build(),
        TaskRecordBuilder::new(3, "Finish").duration(3).after(0).build(),
    ])?;

    let schedule = scheduler.build_schedule();

    assert_eq!(schedule.levels(), &[vec![TaskId(0)], vec![TaskId(3)]]);
    assert_eq!(schedule.timing(TaskId(1)), None);
    assert_eq!(schedule.timing(TaskId(2)), None);
    assert!(!schedule.is_critical(TaskId(1)));
    assert_eq!(schedule.timing(TaskId(3)), timing(2, 5));
    assert_eq!(schedule.critical_tasks(), vec![TaskId(0), TaskId(3)]);

    assert!(!schedule.is_complete());
    assert_eq!(schedule.missing(), vec![TaskId(1), TaskId(2)]);
    assert!(schedule.ensure_complete().is_err());
    Ok(())
}

#[test]
fn empty_graph_has_no_terminal() -> TestResult {
    let scheduler = Scheduler::from_records(Vec::new())?;

    let schedule = scheduler.build_schedule();

    assert!(schedule.levels().is_empty());
    assert_eq!(schedule.terminal(), None);
    assert_eq!(schedule.makespan(), 0);
    schedule.ensure_complete()?;
    Ok(())
}

#[test]
fn scheduler_can_be_shared_across_threads() -> TestResult {
    let mut b = GraphBuilder::new();
    let a = b.task("A", 2, &[]);
    b.task("B", 3, &[a]);
    let scheduler = b.build();

    let makespans: Vec<u64> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| scheduler.build_schedule().makespan()))
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("schedule thread panicked"))
            .collect()
    });

    assert_eq!(makespans, vec![5, 5, 5, 5]);
    Ok(())
}
