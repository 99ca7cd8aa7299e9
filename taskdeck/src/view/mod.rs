//! Pure view derivations: sorting, pagination, and view parameters.
//!
//! Nothing here owns task state. [`sorted_view`] and [`paged_view`] are
//! pure functions over a borrowed collection, recomputed on each call;
//! [`ViewState`] holds only the parameters (sort spec, page, expansion)
//! and the clamping rules that keep them in range.

use std::cmp::Ordering;

use taskdeck_proto::{Task, TaskId};

/// A task field that views can sort by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    /// Server-assigned id.
    Id,
    /// Title, lexicographic.
    Title,
    /// Description, lexicographic.
    Description,
    /// Status, in workflow order (TODO < IN_PROGRESS < DONE).
    Status,
}

impl SortField {
    /// Column header label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Id => "Id",
            Self::Title => "Title",
            Self::Description => "Description",
            Self::Status => "Status",
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Asc,
    /// Largest first.
    Desc,
}

impl SortDirection {
    /// Returns the opposite direction.
    #[must_use]
    pub const fn flip(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Sort parameters. `field == None` means "no sorting; preserve store order".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortSpec {
    /// Field to sort by, or `None` for store order.
    pub field: Option<SortField>,
    /// Direction applied when `field` is set.
    pub direction: SortDirection,
}

/// Pagination parameters. `page` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSpec {
    /// 1-based page number.
    pub page: usize,
    /// Number of tasks per page, at least 1.
    pub page_size: usize,
}

/// Compares two tasks by a single field.
///
/// All task fields are total values here, so the "null fields compare
/// equal" rule of the API model has no case to handle; equal keys simply
/// yield `Ordering::Equal` and their relative order is left to the sort.
fn compare_by(field: SortField, a: &Task, b: &Task) -> Ordering {
    match field {
        SortField::Id => a.id.cmp(&b.id),
        SortField::Title => a.title.cmp(&b.title),
        SortField::Description => a.description.cmp(&b.description),
        SortField::Status => a.status.cmp(&b.status),
    }
}

/// Returns the collection ordered per `spec`, without mutating the input.
///
/// With `field == None` the input order is preserved exactly. Otherwise an
/// unstable sort is used: the relative order of tasks with equal keys is
/// unspecified. That property is deliberate, not an accident — callers
/// must not rely on tie order.
#[must_use]
pub fn sorted_view(tasks: &[Task], spec: SortSpec) -> Vec<Task> {
    let mut view = tasks.to_vec();
    if let Some(field) = spec.field {
        view.sort_unstable_by(|a, b| {
            let ord = compare_by(field, a, b);
            match spec.direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        });
    }
    view
}

/// Returns the sub-sequence for the requested page.
///
/// `start = (page - 1) * page_size`; a `start` at or past the end yields
/// an empty slice rather than an error.
#[must_use]
pub fn paged_view(tasks: &[Task], spec: PageSpec) -> &[Task] {
    let start = spec.page.saturating_sub(1).saturating_mul(spec.page_size);
    if start >= tasks.len() {
        return &[];
    }
    let end = start.saturating_add(spec.page_size).min(tasks.len());
    &tasks[start..end]
}

/// Number of pages needed for `len` tasks: `ceil(len / page_size)`,
/// which is 0 for an empty collection.
#[must_use]
pub const fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size)
}

/// View parameters: sort spec, current page, and the expanded task.
///
/// Owns no task data. The app applies it to the store's collection on
/// every draw via [`ViewState::current_page`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    /// Active sort parameters.
    pub sort: SortSpec,
    /// Current 1-based page.
    pub page: usize,
    /// Page size, at least 1.
    pub page_size: usize,
    /// Which task's detail panel is open, if any. At most one at a time.
    pub expanded: Option<TaskId>,
}

impl ViewState {
    /// Creates a view on page 1 with no sorting and nothing expanded.
    #[must_use]
    pub const fn new(page_size: usize) -> Self {
        Self {
            sort: SortSpec {
                field: None,
                direction: SortDirection::Asc,
            },
            page: 1,
            page_size,
            expanded: None,
        }
    }

    /// Applies the sort toggle rule for `field`.
    ///
    /// Selecting the active field flips the direction; selecting a
    /// different field activates it ascending. Either way the page resets
    /// to 1 so a re-sort can never land on an out-of-range page.
    pub fn toggle_sort(&mut self, field: SortField) {
        if self.sort.field == Some(field) {
            self.sort.direction = self.sort.direction.flip();
        } else {
            self.sort = SortSpec {
                field: Some(field),
                direction: SortDirection::Asc,
            };
        }
        self.page = 1;
    }

    /// Advances to the next page, clamped to the last page for `len` tasks.
    pub const fn next_page(&mut self, len: usize) {
        let max = total_pages(len, self.page_size);
        if self.page < max {
            self.page += 1;
        }
    }

    /// Goes back one page, clamped at page 1.
    pub const fn prev_page(&mut self) {
        if self.page > 1 {
            self.page -= 1;
        }
    }

    /// Pulls the page back into range after the collection shrank
    /// (e.g. the last task on the final page was removed).
    pub const fn clamp_page(&mut self, len: usize) {
        let max = total_pages(len, self.page_size);
        if max == 0 {
            self.page = 1;
        } else if self.page > max {
            self.page = max;
        }
    }

    /// Toggles the detail panel for `id`: expanding a task implicitly
    /// collapses any other, and toggling the expanded task collapses it.
    pub fn toggle_expanded(&mut self, id: TaskId) {
        if self.expanded == Some(id) {
            self.expanded = None;
        } else {
            self.expanded = Some(id);
        }
    }

    /// Derives the visible page: sort, then slice.
    #[must_use]
    pub fn current_page(&self, tasks: &[Task]) -> Vec<Task> {
        let sorted = sorted_view(tasks, self.sort);
        paged_view(
            &sorted,
            PageSpec {
                page: self.page,
                page_size: self.page_size,
            },
        )
        .to_vec()
    }

    /// Total pages for `len` tasks at the current page size.
    #[must_use]
    pub const fn page_count(&self, len: usize) -> usize {
        total_pages(len, self.page_size)
    }
}
