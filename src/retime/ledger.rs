//! Ordered split ledger with a movable cursor

use tracing::debug;

use crate::estimation::TimeQuantizer;
use crate::types::Split;

/// Non-empty ordered list of splits plus the index being edited
///
/// Ordering between splits is not checked here; the calculator reports it.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitLedger {
    splits: Vec<Split>,
    current: usize,
}

impl Default for SplitLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl SplitLedger {
    /// A ledger holding one unset split
    pub fn new() -> Self {
        Self { splits: vec![Split::new()], current: 0 }
    }

    /// Build a ledger from existing splits, or `None` if there are none
    pub fn from_splits(splits: Vec<Split>) -> Option<Self> {
        if splits.is_empty() { None } else { Some(Self { splits, current: 0 }) }
    }

    /// Set the current split's start to `seconds` snapped to the frame grid
    pub fn mark_start(&mut self, seconds: f64, quantizer: &TimeQuantizer) -> f64 {
        let start = quantizer.round_to_frame(seconds);
        self.splits[self.current].start = start;
        start
    }

    /// Set the current split's end to `seconds` snapped to the frame grid
    pub fn mark_end(&mut self, seconds: f64, quantizer: &TimeQuantizer) -> f64 {
        let end = quantizer.round_to_frame(seconds);
        self.splits[self.current].end = end;
        end
    }

    /// Insert an unset split after the current one and move to it
    pub fn insert_after_current(&mut self) {
        self.current += 1;
        self.splits.insert(self.current, Split::new());
        debug!(current = self.current, splits = self.splits.len(), "Inserted split");
    }

    /// Remove the current split unless it is the only one
    pub fn delete_current(&mut self) -> bool {
        if !self.can_delete() {
            return false;
        }
        self.splits.remove(self.current);
        self.current = self.current.min(self.splits.len() - 1);
        debug!(current = self.current, splits = self.splits.len(), "Deleted split");
        true
    }

    /// Move to the previous split; stays put at the first
    pub fn prev(&mut self) -> bool {
        if !self.can_prev() {
            return false;
        }
        self.current -= 1;
        true
    }

    /// Move to the next split; stays put at the last
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> bool {
        if !self.can_next() {
            return false;
        }
        self.current += 1;
        true
    }

    pub fn can_prev(&self) -> bool {
        self.current > 0
    }

    pub fn can_next(&self) -> bool {
        self.current + 1 < self.splits.len()
    }

    pub fn can_delete(&self) -> bool {
        self.splits.len() > 1
    }

    pub fn current(&self) -> &Split {
        &self.splits[self.current]
    }

    /// Zero-based index of the split being edited
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// `(position, total)` with a 1-based position, as shown to users
    pub fn position(&self) -> (usize, usize) {
        (self.current + 1, self.splits.len())
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.splits.len()
    }

    pub fn splits(&self) -> &[Split] {
        &self.splits
    }
}
