//! Fixed-size page windows over a projection.
//!
//! Pages are numbered from 1. A projection always has at least one page, so
//! an empty result still renders as "Page 1 of 1".

use std::num::NonZeroUsize;

use serde::Serialize;

/// One page of a projection plus navigation metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<'a, T> {
    /// Items on this page; empty when the page is out of range.
    pub items: &'a [T],
    /// The requested page number.
    pub page: usize,
    pub total_pages: usize,
    /// Length of the whole projection.
    pub total_items: usize,
}

impl<T> Page<'_, T> {
    /// Returns `true` if a previous page exists.
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Returns `true` if a following page exists.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// Number of pages needed for `len` items, never less than one.
pub fn total_pages(len: usize, page_size: NonZeroUsize) -> usize {
    len.div_ceil(page_size.get()).max(1)
}

/// Slices page `page` out of `items`.
///
/// Out-of-range pages, including page 0, yield an empty window rather than an
/// error.
///
/// ```
/// use std::num::NonZeroUsize;
/// use loadboard::paginate;
///
/// let items = [1, 2, 3, 4, 5];
/// let size = NonZeroUsize::new(2).unwrap();
///
/// let last = paginate(&items, size, 3);
/// assert_eq!(last.items, &[5]);
/// assert_eq!(last.total_pages, 3);
///
/// assert!(paginate(&items, size, 4).items.is_empty());
/// ```
pub fn paginate<T>(items: &[T], page_size: NonZeroUsize, page: usize) -> Page<'_, T> {
    let size = page_size.get();
    let window = page
        .checked_sub(1)
        .and_then(|index| index.checked_mul(size))
        .filter(|start| *start < items.len())
        .map(|start| &items[start..start.saturating_add(size).min(items.len())])
        .unwrap_or(&[]);

    Page {
        items: window,
        page,
        total_pages: total_pages(items.len(), page_size),
        total_items: items.len(),
    }
}

/// Moves `offset` pages from `current`.
///
/// A move that would leave `[1, total_pages]` is ignored and `current` is
/// returned unchanged.
pub fn change_page(current: usize, offset: isize, total_pages: usize) -> usize {
    match current.checked_add_signed(offset) {
        Some(next) if (1..=total_pages).contains(&next) => next,
        _ => current,
    }
}
