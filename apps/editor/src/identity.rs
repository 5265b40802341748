//! Entry id allocation.
//!
//! Ids are seeded from wall-clock milliseconds so they stay wire-compatible
//! with documents produced by older clients, with a monotonic tie-breaker so
//! rapid-fire allocations (button double-click) never collide.

use chrono::Utc;

use crate::document::EntryId;

/// Session-scoped id source for newly added entries.
///
/// `allocate` never returns the same value twice within one session, and ids
/// are never recycled after deletion.
#[derive(Debug, Default)]
pub struct IdAllocator {
    last_issued: EntryId,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns an id strictly greater than every id issued so far.
    pub fn allocate(&mut self) -> EntryId {
        let now = Utc::now().timestamp_millis();
        self.last_issued = now.max(self.last_issued + 1);
        self.last_issued
    }

    /// Raises the allocation floor above `floor`. Called after a document is
    /// wholesale-replaced so fresh ids cannot collide with imported ones.
    pub fn ensure_above(&mut self, floor: EntryId) {
        if floor > self.last_issued {
            self.last_issued = floor;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rapid_fire_allocations_are_pairwise_distinct() {
        let mut ids = IdAllocator::new();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..10_000 {
            assert!(seen.insert(ids.allocate()), "allocator reused an id");
        }
    }

    #[test]
    fn allocations_are_strictly_increasing() {
        let mut ids = IdAllocator::new();
        let a = ids.allocate();
        let b = ids.allocate();
        let c = ids.allocate();
        assert!(a < b && b < c);
    }

    #[test]
    fn ensure_above_guards_against_imported_ids() {
        let mut ids = IdAllocator::new();
        let far_future = Utc::now().timestamp_millis() + 1_000_000;
        ids.ensure_above(far_future);
        assert!(ids.allocate() > far_future);
    }
}
