// Search filtering and pagination over the task collection

use crate::models::Task;

/// Filter tasks by search term, preserving insertion order.
pub fn filter_tasks<'a>(tasks: &'a [Task], term: &str) -> Vec<&'a Task> {
    tasks.iter().filter(|t| t.matches(term)).collect()
}

/// Take the 1-indexed `page` of `items`, `page_size` entries per page,
/// clipped to the available length. Pages past the end come back empty.
pub fn paginate<'a, T: ?Sized>(items: &[&'a T], page: usize, page_size: usize) -> Vec<&'a T> {
    let start = page.saturating_sub(1).saturating_mul(page_size);
    items
        .iter()
        .skip(start)
        .take(page_size)
        .copied()
        .collect()
}

/// Number of pages needed to show `total` items at `page_size` per page.
pub fn page_count(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size)
}
