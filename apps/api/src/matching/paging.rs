//! Explicit paging cursors for ranked results.
//!
//! A page carries its own cursor and the count of items left, so "load more"
//! is driven by the value the client sends back rather than by state held
//! anywhere else.

use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const MAX_PAGE_SIZE: usize = 100;

#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub cursor: usize,
    pub next_cursor: Option<usize>,
    pub remaining: usize,
}

/// Cuts `page_size` items starting at offset `cursor`.
pub fn paginate<T>(items: Vec<T>, cursor: usize, page_size: usize) -> Page<T> {
    let total = items.len();
    let start = cursor.min(total);
    let end = start.saturating_add(page_size).min(total);

    let page: Vec<T> = items.into_iter().skip(start).take(end - start).collect();
    let remaining = total - end;

    Page {
        items: page,
        total,
        cursor: start,
        next_cursor: (remaining > 0).then_some(end),
        remaining,
    }
}
