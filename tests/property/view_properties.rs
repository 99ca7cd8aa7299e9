//! Property-based tests for the pure view derivation functions.
//!
//! Uses proptest to verify that sorting is a stable-input permutation,
//! that pagination always stays inside the collection, and that the
//! page arithmetic is consistent with slicing.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use proptest::prelude::*;
use taskdeck::view::{
    PageSpec, SortDirection, SortField, SortSpec, paged_view, sorted_view, total_pages,
};
use taskdeck_proto::{Task, TaskId, TaskStatus};

// --- Strategies ---

fn arb_status() -> impl Strategy<Value = TaskStatus> {
    prop_oneof![
        Just(TaskStatus::Todo),
        Just(TaskStatus::InProgress),
        Just(TaskStatus::Done),
    ]
}

/// A collection of tasks with unique ids, in shuffled insertion order.
fn arb_tasks() -> impl Strategy<Value = Vec<Task>> {
    prop::collection::vec(("[a-zA-Z ]{0,20}", "[a-zA-Z ]{0,40}", arb_status()), 0..40)
        .prop_map(|fields| {
            fields
                .into_iter()
                .enumerate()
                .map(|(i, (title, description, status))| Task {
                    id: TaskId::new(i as u64 + 1),
                    title,
                    description,
                    status,
                })
                .collect()
        })
        .prop_shuffle()
}

fn arb_sort_spec() -> impl Strategy<Value = SortSpec> {
    (
        prop_oneof![
            Just(None),
            Just(Some(SortField::Id)),
            Just(Some(SortField::Title)),
            Just(Some(SortField::Description)),
            Just(Some(SortField::Status)),
        ],
        prop_oneof![Just(SortDirection::Asc), Just(SortDirection::Desc)],
    )
        .prop_map(|(field, direction)| SortSpec { field, direction })
}

fn sort_key(task: &Task, field: SortField) -> String {
    match field {
        SortField::Id => format!("{:020}", task.id.value()),
        SortField::Title => task.title.clone(),
        SortField::Description => task.description.clone(),
        SortField::Status => format!("{:?}", task.status as u8),
    }
}

// --- Properties ---

proptest! {
    /// Sorting never adds, drops, or mutates tasks.
    #[test]
    fn sorted_view_is_a_permutation(tasks in arb_tasks(), spec in arb_sort_spec()) {
        let view = sorted_view(&tasks, spec);
        prop_assert_eq!(view.len(), tasks.len());
        let mut original: Vec<TaskId> = tasks.iter().map(|t| t.id).collect();
        let mut derived: Vec<TaskId> = view.iter().map(|t| t.id).collect();
        original.sort_unstable();
        derived.sort_unstable();
        prop_assert_eq!(original, derived);
    }

    /// With no sort field the input order is preserved exactly.
    #[test]
    fn no_sort_field_preserves_insertion_order(tasks in arb_tasks()) {
        let spec = SortSpec { field: None, direction: SortDirection::Desc };
        prop_assert_eq!(sorted_view(&tasks, spec), tasks);
    }

    /// An ascending sort yields nondecreasing keys; descending, nonincreasing.
    #[test]
    fn sorted_view_orders_by_key(tasks in arb_tasks(), spec in arb_sort_spec()) {
        let Some(field) = spec.field else { return Ok(()) };
        let view = sorted_view(&tasks, spec);
        for pair in view.windows(2) {
            let (a, b) = (sort_key(&pair[0], field), sort_key(&pair[1], field));
            match spec.direction {
                SortDirection::Asc => prop_assert!(a <= b),
                SortDirection::Desc => prop_assert!(a >= b),
            }
        }
    }

    /// Sorting an already sorted view changes nothing observable.
    #[test]
    fn sorting_is_idempotent_on_keys(tasks in arb_tasks(), spec in arb_sort_spec()) {
        let once = sorted_view(&tasks, spec);
        let twice = sorted_view(&once, spec);
        let Some(field) = spec.field else {
            prop_assert_eq!(once, twice);
            return Ok(());
        };
        let keys_once: Vec<String> = once.iter().map(|t| sort_key(t, field)).collect();
        let keys_twice: Vec<String> = twice.iter().map(|t| sort_key(t, field)).collect();
        prop_assert_eq!(keys_once, keys_twice);
    }

    /// A page never exceeds the page size and always slices the input.
    #[test]
    fn page_is_bounded_slice(
        tasks in arb_tasks(),
        page in 1usize..10,
        page_size in 1usize..10,
    ) {
        let spec = PageSpec { page, page_size };
        let slice = paged_view(&tasks, spec);
        prop_assert!(slice.len() <= page_size);

        let start = (page - 1) * page_size;
        if start < tasks.len() {
            prop_assert_eq!(slice, &tasks[start..(start + page_size).min(tasks.len())]);
        } else {
            prop_assert!(slice.is_empty());
        }
    }

    /// Walking all pages in order reproduces the collection exactly.
    #[test]
    fn pages_partition_the_collection(tasks in arb_tasks(), page_size in 1usize..10) {
        let pages = total_pages(tasks.len(), page_size);
        let mut walked: Vec<Task> = Vec::new();
        for page in 1..=pages {
            let slice = paged_view(&tasks, PageSpec { page, page_size });
            prop_assert!(!slice.is_empty());
            walked.extend_from_slice(slice);
        }
        prop_assert_eq!(walked, tasks);
    }

    /// Pages past the end are empty, and the last in-range page is not.
    #[test]
    fn out_of_range_page_is_empty(tasks in arb_tasks(), page_size in 1usize..10) {
        let pages = total_pages(tasks.len(), page_size);
        let beyond = paged_view(&tasks, PageSpec { page: pages + 1, page_size });
        prop_assert!(beyond.is_empty());
    }

    /// Page count arithmetic matches actual slicing behavior.
    #[test]
    fn total_pages_matches_slicing(len in 0usize..200, page_size in 1usize..10) {
        let pages = total_pages(len, page_size);
        prop_assert_eq!(pages, len.div_ceil(page_size));
        // Every task index falls on exactly one page.
        if len > 0 {
            prop_assert!((pages - 1) * page_size < len);
            prop_assert!(pages * page_size >= len);
        } else {
            prop_assert_eq!(pages, 0);
        }
    }
}
