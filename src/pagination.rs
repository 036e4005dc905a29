//! Which page buttons to draw under the list.
//!
//! Always the first and last page, plus a window of `visible` pages centered
//! on the current one. Gaps become [`PageMarker::Ellipsis`].
use store::models::PageResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMarker {
    Page(usize),
    Ellipsis,
}

pub fn total_pages(total: usize, limit: usize) -> usize {
    if limit == 0 { 0 } else { total.div_ceil(limit) }
}

/// Window size for a viewport `width` wide.
pub fn visible_count(width: u16) -> usize {
    match width {
        0..480 => 3,
        480..768 => 5,
        _ => 7,
    }
}

pub fn page_markers(total_pages: usize, current: usize, visible: usize) -> Vec<PageMarker> {
    let visible = visible.max(1);

    if total_pages <= visible + 2 {
        return (1..=total_pages).map(PageMarker::Page).collect();
    }

    let current = current.clamp(1, total_pages);

    // window stays inside [2, total_pages - 1]
    let start = current
        .saturating_sub(visible / 2)
        .max(2)
        .min(total_pages - visible);
    let end = start + visible - 1;

    let mut markers = Vec::with_capacity(visible + 4);
    markers.push(PageMarker::Page(1));

    if start > 2 {
        markers.push(PageMarker::Ellipsis);
    }

    markers.extend((start..=end).map(PageMarker::Page));

    if end < total_pages - 1 {
        markers.push(PageMarker::Ellipsis);
    }

    markers.push(PageMarker::Page(total_pages));
    markers
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pagination {
    pub current: usize,
    pub total_pages: usize,
    pub markers: Vec<PageMarker>,
    pub prev: Option<usize>,
    pub next: Option<usize>,
}

impl Pagination {
    pub fn new(page: &PageResult, width: u16) -> Self {
        let total_pages = total_pages(page.total, page.limit);
        let current = page.page;

        Self {
            current,
            total_pages,
            markers: page_markers(total_pages, current, visible_count(width)),
            prev: (current > 1 && total_pages > 0).then(|| (current - 1).min(total_pages)),
            next: (current < total_pages).then(|| current + 1),
        }
    }
}
