use crate::pagination::{self, PageControls};

/// Fixed page size for the history list.
pub const PAGE_SIZE: u64 = 10;

/// Client-side pagination state for the history list. `total` is
/// authoritative from the server and replaced wholesale on every load.
///
/// Loads are not cancelled once started, so two rapid actions can finish
/// out of order. Each load takes a generation token; only the newest
/// generation may update this state, older completions are reported stale.
#[derive(Debug)]
pub struct HistoryPager {
    pub limit: u64,
    pub offset: u64,
    pub total: u64,
    issued: u64,
}

impl HistoryPager {
    pub fn new(limit: u64) -> Self {
        Self {
            limit,
            offset: 0,
            total: 0,
            issued: 0,
        }
    }

    /// Start a load and get its generation token.
    pub fn begin(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    /// Apply a completed load. Returns false (and changes nothing) when a
    /// newer load was issued while this one was in flight.
    pub fn apply(&mut self, token: u64, offset: u64, total: u64) -> bool {
        if token < self.issued {
            return false;
        }
        self.offset = offset;
        self.total = total;
        true
    }

    /// Offset to retry at when a requested page came back empty: the start
    /// of the last non-empty page, or 0 once nothing is left.
    pub fn clamped_offset(total: u64, limit: u64, offset: u64) -> u64 {
        if total == 0 {
            0
        } else {
            offset.min(pagination::last_page_offset(total, limit))
        }
    }

    pub fn controls(&self) -> PageControls {
        pagination::controls(self.total, self.limit, self.offset)
    }
}
