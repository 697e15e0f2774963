use crate::models::LinkPage;

/// Counters for a single expansion call. Built fresh per call and handed
/// back to the caller; expanders never hold one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExpansionStats {
    pub pages_fetched: u32,
    pub edges_kept: u64,
    pub entries_filtered: u64,
}

impl ExpansionStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one parsed page into the counters.
    pub fn record_page(&mut self, page: &LinkPage) {
        self.pages_fetched += 1;
        self.edges_kept += page.titles.len() as u64;
        self.entries_filtered += page.filtered as u64;
    }

    pub fn pages(&self) -> u32 {
        self.pages_fetched
    }

    pub fn edges(&self) -> u64 {
        self.edges_kept
    }

    pub fn filtered(&self) -> u64 {
        self.entries_filtered
    }

    /// Combines counters from separate calls, e.g. the two halves of a
    /// forward+backward benchmark run.
    pub fn merge(&self, other: &ExpansionStats) -> ExpansionStats {
        ExpansionStats {
            pages_fetched: self.pages_fetched + other.pages_fetched,
            edges_kept: self.edges_kept + other.edges_kept,
            entries_filtered: self.entries_filtered + other.entries_filtered,
        }
    }
}
