//! Recently-active tab history.

use std::collections::VecDeque;

use pagequill_protocols::platform::TabId;

#[cfg(test)]
#[path = "history_tests.rs"]
mod tests;

/// Maximum number of remembered activations.
pub const TAB_HISTORY_CAPACITY: usize = 10;

/// Ordered sequence of tab activations, most-recent-last.
///
/// The same tab may appear multiple times when activated repeatedly;
/// closing a tab purges every occurrence.
#[derive(Debug, Default)]
pub struct TabHistory {
    entries: VecDeque<TabId>,
}

impl TabHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an activation, evicting the oldest entry beyond capacity.
    pub fn record_activation(&mut self, tab: TabId) {
        self.entries.push_back(tab);
        if self.entries.len() > TAB_HISTORY_CAPACITY {
            self.entries.pop_front();
        }
    }

    /// Drop every occurrence of a closed tab. Idempotent.
    pub fn forget(&mut self, tab: TabId) {
        self.entries.retain(|entry| *entry != tab);
    }

    /// The most recent entry not equal to `exclude`, scanning backwards.
    pub fn last_excluding(&self, exclude: Option<TabId>) -> Option<TabId> {
        self.entries
            .iter()
            .rev()
            .find(|entry| Some(**entry) != exclude)
            .copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entries oldest-first, for inspection.
    pub fn snapshot(&self) -> Vec<TabId> {
        self.entries.iter().copied().collect()
    }
}
