use std::collections::HashSet;

use proptest::prelude::*;
use taskweave::graph::{TaskSpec, normalize, validate_tasks};
use taskweave::types::TaskStatus;
use taskweave_test_utils::builders::{GraphBuilder, task};

// Acyclic by construction: task N may only name tasks 0..N-1 as
// dependencies, and only tasks N+1.. as unblock targets.
fn dag_strategy(max_tasks: usize) -> impl Strategy<Value = Vec<TaskSpec>> {
    (1..=max_tasks).prop_flat_map(|num_tasks| {
        let edges = proptest::collection::vec(
            (
                proptest::collection::vec(any::<usize>(), 0..3),
                proptest::collection::vec(any::<usize>(), 0..2),
                any::<bool>(),
            ),
            num_tasks,
        );

        edges.prop_map(move |raw| {
            let mut builder = GraphBuilder::new();
            for (i, (deps, targets, is_fork)) in raw.into_iter().enumerate() {
                let id = format!("task_{i}");
                let mut spec = task(&id);

                if i > 0 {
                    let deps: HashSet<usize> = deps.into_iter().map(|d| d % i).collect();
                    for dep in deps {
                        spec = spec.after(&format!("task_{dep}"));
                    }
                }
                let later = num_tasks - i - 1;
                if later > 0 {
                    let targets: HashSet<usize> =
                        targets.into_iter().map(|t| i + 1 + t % later).collect();
                    for target in targets {
                        spec = spec.unblocks(&format!("task_{target}"));
                    }
                }
                if is_fork {
                    spec = spec.fork();
                }
                builder = builder.with_task(spec.build());
            }
            builder.specs()
        })
    })
}

proptest! {
    #[test]
    fn normalization_is_symmetric_and_idempotent(specs in dag_strategy(12)) {
        let nodes: Vec<_> = specs.into_iter().map(TaskSpec::into_node).collect();
        let once = normalize(&nodes);
        let twice = normalize(&once);
        prop_assert_eq!(&once, &twice);

        for node in &once {
            for dep in &node.dependencies {
                let upstream = once.iter().find(|t| &t.id == dep).expect("dep exists");
                prop_assert!(upstream.unblocks.contains(&node.id));
            }
            for target in &node.unblocks {
                let downstream = once.iter().find(|t| &t.id == target).expect("target exists");
                prop_assert!(downstream.dependencies.contains(&node.id));
            }
        }

        prop_assert!(validate_tasks(&once).is_empty());
    }

    #[test]
    fn completing_ready_tasks_drains_the_graph(specs in dag_strategy(12)) {
        let total = specs.len();
        let mut builder = GraphBuilder::new();
        for spec in specs {
            builder = builder.with_task(spec);
        }
        let mut engine = builder.engine();

        let mut completed = 0;
        loop {
            let ready = engine.get_unblocked_tasks().expect("memory store").tasks.unwrap_or_default();
            if ready.is_empty() {
                break;
            }
            for t in ready {
                let response = engine
                    .update_task_status(&t.id, TaskStatus::Completed, Some(format!("out {}", t.id)))
                    .expect("memory store");
                prop_assert!(response.success, "{}", response.message);
                completed += 1;
            }
        }

        prop_assert_eq!(completed, total);
        let graph = engine.graph().expect("memory store");
        prop_assert!(graph.tasks().iter().all(|t| t.status == TaskStatus::Completed));
        for t in graph.tasks() {
            if !t.dependencies.is_empty() {
                prop_assert!(t.input_context.is_some(), "{} got no context", t.id);
            }
        }
    }
}
