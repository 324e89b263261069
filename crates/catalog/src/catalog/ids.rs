//! Product id assignment.

use std::sync::atomic::{AtomicI64, Ordering};

use catalog_keeper_core::ProductId;

/// Hands out strictly increasing product ids.
///
/// Ids follow the wall clock in milliseconds. When the clock has not moved
/// past the last id (two products in the same millisecond, or the clock
/// stepping backwards) the next id is the last one plus one instead. Once
/// the last id is `i64::MAX` no further id can be issued.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicI64,
}

impl IdGenerator {
    /// Create a generator that has issued nothing yet.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last: AtomicI64::new(0),
        }
    }

    /// Record an id that already exists so later ids are greater than it.
    pub fn observe(&self, id: ProductId) {
        self.last.fetch_max(id.as_i64(), Ordering::SeqCst);
    }

    /// Next id, using the current time. `None` when ids are exhausted.
    #[must_use]
    pub fn next(&self) -> Option<ProductId> {
        self.next_at(chrono::Utc::now().timestamp_millis())
    }

    /// Next id given the current time in milliseconds since the epoch.
    /// `None` when ids are exhausted.
    #[must_use]
    pub fn next_at(&self, now_millis: i64) -> Option<ProductId> {
        let mut last = self.last.load(Ordering::SeqCst);
        loop {
            let candidate = if now_millis > last {
                now_millis
            } else {
                last.checked_add(1)?
            };
            match self
                .last
                .compare_exchange(last, candidate, Ordering::SeqCst, Ordering::SeqCst)
            {
                Ok(_) => return Some(ProductId::new(candidate)),
                Err(current) => last = current,
            }
        }
    }
}
