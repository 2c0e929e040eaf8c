// Calendar views
// Day, week and month grids plus the overflow cells they share

use std::collections::HashSet;
use std::hash::Hash;

use crate::models::event::CalendarEvent;

pub mod day_view;
pub mod month_view;
pub mod time_grid;
pub mod week_view;

/// Shown instead of a grid when there is nothing to display.
pub const EMPTY_STATE_MESSAGE: &str =
    "No appointments yet. Click an empty slot to create the first one.";

/// A grid cell that shows a few events inline and folds the rest behind "+N more".
#[derive(Debug, Clone, PartialEq)]
pub struct OverflowCell<'a> {
    pub events: Vec<&'a CalendarEvent>,
    pub inline_limit: usize,
    pub expanded: bool,
}

impl<'a> OverflowCell<'a> {
    pub fn new(events: Vec<&'a CalendarEvent>, inline_limit: usize, expanded: bool) -> Self {
        Self {
            events,
            inline_limit,
            expanded,
        }
    }

    /// Events to render: all of them when expanded, otherwise up to the inline limit.
    pub fn visible(&self) -> &[&'a CalendarEvent] {
        if self.expanded {
            &self.events
        } else {
            &self.events[..self.events.len().min(self.inline_limit)]
        }
    }

    pub fn has_overflow(&self) -> bool {
        self.events.len() > self.inline_limit
    }

    pub fn hidden_count(&self) -> usize {
        if self.expanded {
            0
        } else {
            self.events.len().saturating_sub(self.inline_limit)
        }
    }

    /// "+N more" while collapsed with hidden events.
    pub fn more_label(&self) -> Option<String> {
        let hidden = self.hidden_count();
        (hidden > 0).then(|| format!("+{} more", hidden))
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Which overflow cells the user has expanded. Keys are week (date, slot)
/// pairs or month dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpansionState<K: Hash + Eq> {
    expanded: HashSet<K>,
}

impl<K: Hash + Eq> Default for ExpansionState<K> {
    fn default() -> Self {
        Self {
            expanded: HashSet::new(),
        }
    }
}

impl<K: Hash + Eq> ExpansionState<K> {
    /// Flip a cell; returns whether it is now expanded.
    pub fn toggle(&mut self, key: K) -> bool {
        if self.expanded.remove(&key) {
            false
        } else {
            self.expanded.insert(key);
            true
        }
    }

    pub fn is_expanded(&self, key: &K) -> bool {
        self.expanded.contains(key)
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }
}
