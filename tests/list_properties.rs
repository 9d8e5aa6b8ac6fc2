// UniAIMS - tests/list_properties.rs
//
// Property checks for the list filter/paginate pattern and the canvas
// transform, run over generated inputs from a seeded RNG.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uniaims::core::canvas::{Point, ViewTransform};
use uniaims::core::filter::{apply_filters, paginate, TaskFilter, TimeBucket};
use uniaims::core::model::{Task, TaskStatus, TaskType};
use uniaims::core::repository::{MockRepository, Repository};
use uniaims::util::constants::{MAX_CANVAS_SCALE, MIN_CANVAS_SCALE};

fn numbered_tasks(n: usize) -> Vec<Task> {
    (0..n)
        .map(|i| Task {
            id: format!("T-{i:04}"),
            name: format!("Sample {i}"),
            date: "2023-10-24".to_string(),
            items: i as u32,
            status: TaskStatus::Completed,
            task_type: TaskType::Particle,
            model: "v1.1".to_string(),
        })
        .collect()
}

fn every_filter() -> Vec<TaskFilter> {
    let mut filters = Vec::new();
    for search in ["", "t-10", "graphene", "zzz"] {
        for time in TimeBucket::all() {
            for task_type in [None, Some(TaskType::Particle), Some(TaskType::Fiber)] {
                for status in [None, Some(TaskStatus::Completed), Some(TaskStatus::Failed)] {
                    filters.push(TaskFilter {
                        search: search.to_string(),
                        time: *time,
                        task_type,
                        status,
                    });
                }
            }
        }
    }
    filters
}

// =============================================================================
// Filter / paginate
// =============================================================================

#[test]
fn empty_input_filters_to_empty() {
    let empty: Vec<Task> = Vec::new();
    for filter in every_filter() {
        assert!(apply_filters(&empty, &filter).is_empty(), "{filter:?}");
    }
}

#[test]
fn neutral_filter_keeps_everything_in_order() {
    let tasks = MockRepository.list_tasks();
    let keep = apply_filters(&tasks, &TaskFilter::default());
    assert_eq!(keep, (0..tasks.len()).collect::<Vec<_>>());
}

#[test]
fn filtered_indices_are_increasing() {
    let tasks = MockRepository.list_tasks();
    for filter in every_filter() {
        let keep = apply_filters(&tasks, &filter);
        assert!(keep.windows(2).all(|w| w[0] < w[1]), "{filter:?}");
    }
}

#[test]
fn paginate_25_items() {
    let items = numbered_tasks(25);

    let page2 = paginate(&items, 2, 10);
    assert_eq!(page2.len(), 10);
    assert_eq!(page2.first().map(|t| t.items), Some(10));
    assert_eq!(page2.last().map(|t| t.items), Some(19));

    let page3 = paginate(&items, 3, 10);
    assert_eq!(page3.len(), 5);
    assert_eq!(page3.first().map(|t| t.items), Some(20));
    assert_eq!(page3.last().map(|t| t.items), Some(24));

    assert!(paginate(&items, 4, 10).is_empty());
}

#[test]
fn pages_cover_the_list_exactly_once() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..50 {
        let n = rng.random_range(0..120);
        let per_page = rng.random_range(1..30);
        let items = numbered_tasks(n);
        let mut seen = Vec::new();
        let mut page = 1;
        loop {
            let slice = paginate(&items, page, per_page);
            if slice.is_empty() {
                break;
            }
            seen.extend(slice.iter().map(|t| t.items));
            page += 1;
        }
        assert_eq!(seen, (0..n as u32).collect::<Vec<_>>(), "n={n} per_page={per_page}");
    }
}

// =============================================================================
// Canvas transform
// =============================================================================

#[test]
fn zoom_stays_within_bounds() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut t = ViewTransform::default();
    for _ in 0..2_000 {
        let delta = rng.random_range(-5_000.0f32..5_000.0);
        t.zoom(delta, true);
        assert!(
            (MIN_CANVAS_SCALE..=MAX_CANVAS_SCALE).contains(&t.scale()),
            "scale {} after delta {delta}",
            t.scale()
        );
    }
}

#[test]
fn no_drift_after_release() {
    let mut rng = StdRng::seed_from_u64(1234);
    for _ in 0..100 {
        let mut t = ViewTransform::default();
        let mut p = Point::new(rng.random_range(0.0..800.0), rng.random_range(0.0..600.0));
        t.pointer_down(p);
        for _ in 0..rng.random_range(1..20) {
            p = Point::new(rng.random_range(-200.0..1000.0), rng.random_range(-200.0..800.0));
            t.pointer_move(p);
        }
        let before = t.offset();
        if rng.random_bool(0.5) {
            t.pointer_up();
        } else {
            t.pointer_leave();
        }
        // Moves after release are ignored.
        t.pointer_move(Point::new(5_000.0, 5_000.0));
        assert_eq!(t.offset(), before);
        assert!(!t.is_dragging());
    }
}
