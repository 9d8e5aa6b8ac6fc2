// UniAIMS - core/filter.rs
//
// Shared list filter and pagination engine used by every list view
// (dashboard task tables, data batch linked tasks, batch lists).
// All active predicates are AND-combined.
// Core layer: pure logic, no I/O or UI dependencies.

use crate::core::model::{DataBatch, LinkedTask, Task, TaskStatus, TaskType};
use crate::util::constants::{DEFAULT_PAGE_SIZE, REFERENCE_DATE, RUNNING_DATE};

// =============================================================================
// Filterable records
// =============================================================================

/// Anything a list view can filter.
///
/// `status` and `task_type` return `None` for records that have no such
/// attribute; an active predicate then rejects the record.
pub trait FilterRecord {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
    fn date(&self) -> &str;
    fn status(&self) -> Option<TaskStatus>;
    fn task_type(&self) -> Option<TaskType>;
}

impl FilterRecord for Task {
    fn id(&self) -> &str {
        &self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn date(&self) -> &str {
        &self.date
    }
    fn status(&self) -> Option<TaskStatus> {
        Some(self.status)
    }
    fn task_type(&self) -> Option<TaskType> {
        Some(self.task_type)
    }
}

impl FilterRecord for LinkedTask {
    fn id(&self) -> &str {
        &self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn date(&self) -> &str {
        &self.date
    }
    fn status(&self) -> Option<TaskStatus> {
        Some(self.status)
    }
    fn task_type(&self) -> Option<TaskType> {
        Some(self.task_type)
    }
}

impl FilterRecord for DataBatch {
    fn id(&self) -> &str {
        &self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn date(&self) -> &str {
        &self.upload_date
    }
    fn status(&self) -> Option<TaskStatus> {
        None
    }
    fn task_type(&self) -> Option<TaskType> {
        None
    }
}

// =============================================================================
// Filter state
// =============================================================================

/// Coarse time bucket offered by the list toolbars.
///
/// Dates in the mock data are plain strings, so the buckets are approximate:
/// `Today` compares against a fixed reference date, `Week` accepts everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeBucket {
    #[default]
    All,
    Today,
    Week,
}

impl TimeBucket {
    pub fn all() -> &'static [TimeBucket] {
        &[Self::All, Self::Today, Self::Week]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All Time",
            Self::Today => "Today",
            Self::Week => "This Week",
        }
    }

    fn matches(&self, date: &str) -> bool {
        match self {
            Self::All | Self::Week => true,
            Self::Today => date == RUNNING_DATE || date == REFERENCE_DATE,
        }
    }
}

/// Complete filter state. All fields are AND-combined when applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskFilter {
    /// Substring search over name and id (case-insensitive). Empty = no filter.
    pub search: String,

    pub time: TimeBucket,

    /// Exact type match. None = all types.
    pub task_type: Option<TaskType>,

    /// Exact status match. None = all statuses.
    pub status: Option<TaskStatus>,
}

impl TaskFilter {
    /// Returns true if no filters are active.
    pub fn is_empty(&self) -> bool {
        self.search.is_empty()
            && self.time == TimeBucket::All
            && self.task_type.is_none()
            && self.status.is_none()
    }

    /// Check if a single record matches all active predicates.
    ///
    /// `search_lower` must be the lowercased search text.
    fn matches<R: FilterRecord>(&self, record: &R, search_lower: &str) -> bool {
        if !search_lower.is_empty()
            && !record.name().to_lowercase().contains(search_lower)
            && !record.id().to_lowercase().contains(search_lower)
        {
            return false;
        }

        if let Some(status) = self.status {
            if record.status() != Some(status) {
                return false;
            }
        }

        if let Some(task_type) = self.task_type {
            if record.task_type() != Some(task_type) {
                return false;
            }
        }

        self.time.matches(record.date())
    }
}

/// Apply the filter to a slice of records, returning indices of matches.
///
/// Indices are in input order, so the filtered view preserves list order.
pub fn apply_filters<R: FilterRecord>(items: &[R], filter: &TaskFilter) -> Vec<usize> {
    if filter.is_empty() {
        return (0..items.len()).collect();
    }

    let search_lower = filter.search.to_lowercase();

    items
        .iter()
        .enumerate()
        .filter(|(_, item)| filter.matches(*item, &search_lower))
        .map(|(idx, _)| idx)
        .collect()
}

/// Apply the filter and return references to the matching records.
pub fn filtered<'a, R: FilterRecord>(items: &'a [R], filter: &TaskFilter) -> Vec<&'a R> {
    apply_filters(items, filter)
        .into_iter()
        .filter_map(|idx| items.get(idx))
        .collect()
}

// =============================================================================
// Pagination
// =============================================================================

/// Return page `page` (1-based) of `items` with `per_page` rows per page.
///
/// Out-of-range pages yield an empty slice; page 0 is treated as page 1.
pub fn paginate<T>(items: &[T], page: usize, per_page: usize) -> &[T] {
    if per_page == 0 {
        return &[];
    }
    let page = page.max(1);
    let start = (page - 1).saturating_mul(per_page).min(items.len());
    let end = page.saturating_mul(per_page).min(items.len());
    &items[start..end]
}

/// Page cursor for a list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    /// 1-based current page.
    pub page: usize,
    pub per_page: usize,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pager {
    pub fn new(per_page: usize) -> Self {
        Self {
            page: 1,
            per_page: per_page.max(1),
        }
    }

    /// Change the page size. Always returns to the first page.
    pub fn set_per_page(&mut self, per_page: usize) {
        self.per_page = per_page.max(1);
        self.page = 1;
    }

    /// Number of pages needed for `total` rows (at least one).
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.per_page).max(1)
    }

    pub fn next(&mut self, total: usize) {
        if self.page < self.page_count(total) {
            self.page += 1;
        }
    }

    pub fn prev(&mut self) {
        if self.page > 1 {
            self.page -= 1;
        }
    }

    /// Pull the cursor back inside the valid range after the list shrank.
    pub fn clamp_to(&mut self, total: usize) {
        self.page = self.page.clamp(1, self.page_count(total));
    }

    /// The rows of `items` visible on the current page.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        paginate(items, self.page, self.per_page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_task(id: &str, name: &str, date: &str, status: TaskStatus, t: TaskType) -> Task {
        Task {
            id: id.to_string(),
            name: name.to_string(),
            date: date.to_string(),
            items: 1,
            status,
            task_type: t,
            model: "v1.1".to_string(),
        }
    }

    fn sample() -> Vec<Task> {
        vec![
            make_task("T-1029", "Graphene Oxide", "2023-10-24", TaskStatus::Completed, TaskType::Particle),
            make_task("T-1028", "Carbon Nanotubes", "2023-10-23", TaskStatus::Processing, TaskType::Fiber),
            make_task("T-1025", "Polymer Mix", "2023-10-20", TaskStatus::Failed, TaskType::Particle),
            make_task("FT-002", "Fiber Model", "Running", TaskStatus::Processing, TaskType::Training),
        ]
    }

    #[test]
    fn test_empty_filter_returns_all() {
        let items = sample();
        assert_eq!(apply_filters(&items, &TaskFilter::default()), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_empty_input_returns_empty() {
        let items: Vec<Task> = Vec::new();
        let filter = TaskFilter {
            search: "x".to_string(),
            time: TimeBucket::Today,
            task_type: Some(TaskType::Fiber),
            status: Some(TaskStatus::Failed),
        };
        assert!(apply_filters(&items, &filter).is_empty());
        assert!(apply_filters(&items, &TaskFilter::default()).is_empty());
    }

    #[test]
    fn test_search_matches_name_or_id_case_insensitive() {
        let items = sample();
        let by_name = TaskFilter {
            search: "CARBON".to_string(),
            ..Default::default()
        };
        assert_eq!(apply_filters(&items, &by_name), vec![1]);

        let by_id = TaskFilter {
            search: "t-10".to_string(),
            ..Default::default()
        };
        assert_eq!(apply_filters(&items, &by_id), vec![0, 1, 2]);
    }

    #[test]
    fn test_status_and_type_are_exact() {
        let items = sample();
        let filter = TaskFilter {
            task_type: Some(TaskType::Particle),
            status: Some(TaskStatus::Failed),
            ..Default::default()
        };
        assert_eq!(apply_filters(&items, &filter), vec![2]);
    }

    #[test]
    fn test_today_bucket_uses_reference_date_and_running() {
        let items = sample();
        let filter = TaskFilter {
            time: TimeBucket::Today,
            ..Default::default()
        };
        assert_eq!(apply_filters(&items, &filter), vec![0, 3]);
    }

    #[test]
    fn test_week_bucket_is_approximate() {
        let items = sample();
        let filter = TaskFilter {
            time: TimeBucket::Week,
            ..Default::default()
        };
        assert_eq!(apply_filters(&items, &filter).len(), items.len());
    }

    #[test]
    fn test_batches_reject_status_predicate() {
        let batch = crate::core::repository::MockRepository::template_batch("DB-1");
        let filter = TaskFilter {
            status: Some(TaskStatus::Completed),
            ..Default::default()
        };
        assert!(apply_filters(&[batch], &filter).is_empty());
    }

    #[test]
    fn test_paginate_pages() {
        let items: Vec<usize> = (0..25).collect();
        assert_eq!(paginate(&items, 2, 10), &items[10..20]);
        assert_eq!(paginate(&items, 3, 10), &items[20..25]);
        assert!(paginate(&items, 4, 10).is_empty());
        assert_eq!(paginate(&items, 0, 10), &items[0..10]);
        assert!(paginate(&items, 1, 0).is_empty());
    }

    #[test]
    fn test_pager_resets_page_on_per_page_change() {
        let mut pager = Pager::new(10);
        pager.next(25);
        pager.next(25);
        assert_eq!(pager.page, 3);
        pager.next(25);
        assert_eq!(pager.page, 3);
        pager.set_per_page(5);
        assert_eq!(pager.page, 1);
        assert_eq!(pager.page_count(25), 5);
    }

    #[test]
    fn test_pager_clamp_after_shrink() {
        let mut pager = Pager::new(10);
        pager.page = 3;
        pager.clamp_to(4);
        assert_eq!(pager.page, 1);
        assert_eq!(pager.page_count(0), 1);
    }
}
