use serde::Serialize;

/// Width of the consecutive page-number window.
const WINDOW: u64 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PageItem {
    Page { number: u64, current: bool },
    Ellipsis,
}

/// Everything the page needs to draw the pagination bar. Computed here so
/// the view does no arithmetic of its own.
#[derive(Debug, Clone, Serialize)]
pub struct PageControls {
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
    pub page_count: u64,
    pub current_page: u64,
    pub prev_enabled: bool,
    pub next_enabled: bool,
    pub items: Vec<PageItem>,
}

pub fn page_count(total: u64, limit: u64) -> u64 {
    total.div_ceil(limit)
}

pub fn current_page(offset: u64, limit: u64) -> u64 {
    offset / limit + 1
}

/// Offset of the last non-empty page, 0 when there are no records.
pub fn last_page_offset(total: u64, limit: u64) -> u64 {
    if total == 0 {
        0
    } else {
        (page_count(total, limit) - 1) * limit
    }
}

pub fn controls(total: u64, limit: u64, offset: u64) -> PageControls {
    let pages = page_count(total, limit);
    if pages == 0 {
        return PageControls {
            total,
            limit,
            offset: 0,
            page_count: 0,
            current_page: 1,
            prev_enabled: false,
            next_enabled: false,
            items: Vec::new(),
        };
    }

    let current = current_page(offset, limit).min(pages);
    PageControls {
        total,
        limit,
        offset,
        page_count: pages,
        current_page: current,
        prev_enabled: current > 1,
        next_enabled: current < pages,
        items: window(current, pages),
    }
}

/// Up to five consecutive page numbers centred on `current`, clamped to
/// `[1, pages]`, with the first and last page always reachable and an
/// ellipsis wherever the window does not touch an edge.
fn window(current: u64, pages: u64) -> Vec<PageItem> {
    let start = current
        .saturating_sub(WINDOW / 2)
        .max(1)
        .min(pages.saturating_sub(WINDOW - 1).max(1));
    let end = (start + WINDOW - 1).min(pages);

    let mut items = Vec::new();
    if start > 1 {
        items.push(PageItem::Page {
            number: 1,
            current: false,
        });
        if start > 2 {
            items.push(PageItem::Ellipsis);
        }
    }
    for number in start..=end {
        items.push(PageItem::Page {
            number,
            current: number == current,
        });
    }
    if end < pages {
        if end < pages - 1 {
            items.push(PageItem::Ellipsis);
        }
        items.push(PageItem::Page {
            number: pages,
            current: false,
        });
    }
    items
}
