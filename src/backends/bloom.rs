//! Bloom filter backend: compact in-memory membership at the cost of a
//! configurable false-positive rate.

use fastbloom::BloomFilter;

use crate::errors::Result;
use crate::store::{BulkWriter, DictReader, DictWriter, Lifecycle};

/// Dictionary stored as a bloom filter.
///
/// `has` can report false positives (a candidate flagged as present that
/// was never added), which for a denylist only errs on the safe side;
/// it never reports false negatives.
pub struct BloomStore {
    filter: BloomFilter,
}

impl BloomStore {
    /// Size the filter for `expected_items` entries at the given
    /// false-positive rate (e.g. 0.001).
    pub fn new(expected_items: usize, false_positive_rate: f64) -> Self {
        BloomStore {
            filter: BloomFilter::with_false_pos(false_positive_rate).expected_items(expected_items),
        }
    }

    /// Wrap an existing filter (e.g. one deserialized from disk).
    pub fn from_filter(filter: BloomFilter) -> Self {
        BloomStore { filter }
    }

    /// Access the underlying filter, e.g. to persist it.
    pub fn filter(&self) -> &BloomFilter {
        &self.filter
    }
}

impl Lifecycle for BloomStore {}

impl DictWriter for BloomStore {
    fn add(&mut self, password: &str) -> Result<()> {
        self.filter.insert(password);
        Ok(())
    }
}

impl BulkWriter for BloomStore {
    fn add_multiple(&mut self, passwords: &[String]) -> Result<()> {
        for p in passwords {
            self.filter.insert(p.as_str());
        }
        Ok(())
    }
}

impl DictReader for BloomStore {
    fn has(&self, password: &str) -> Result<bool> {
        Ok(self.filter.contains(password))
    }
}
