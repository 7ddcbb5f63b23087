//! In-memory backends, primarily for tests and as a driver reference.
//!
//! Memory use grows with the dictionary, so these are not meant for
//! production dictionaries; see [`bloom`](crate::backends::bloom) for a
//! compact in-memory representation.

use std::collections::HashSet;

use crate::errors::Result;
use crate::store::{BulkWriter, DictReader, DictWriter, Lifecycle};

/// The simplest possible backend: a set of sanitized passwords.
#[derive(Debug, Default)]
pub struct MemStore {
    set: HashSet<String>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct stored passwords.
    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }
}

impl Lifecycle for MemStore {}

impl DictWriter for MemStore {
    fn add(&mut self, password: &str) -> Result<()> {
        self.set.insert(password.to_string());
        Ok(())
    }
}

impl DictReader for MemStore {
    fn has(&self, password: &str) -> Result<bool> {
        Ok(self.set.contains(password))
    }
}

/// Same as [`MemStore`], but bulk-capable.
#[derive(Debug, Default)]
pub struct MemStoreBulk {
    set: HashSet<String>,
}

impl MemStoreBulk {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }
}

impl Lifecycle for MemStoreBulk {}

impl DictWriter for MemStoreBulk {
    fn add(&mut self, password: &str) -> Result<()> {
        self.set.insert(password.to_string());
        Ok(())
    }
}

impl BulkWriter for MemStoreBulk {
    fn add_multiple(&mut self, passwords: &[String]) -> Result<()> {
        for p in passwords {
            self.set.insert(p.clone());
        }
        Ok(())
    }
}

impl DictReader for MemStoreBulk {
    fn has(&self, password: &str) -> Result<bool> {
        Ok(self.set.contains(password))
    }
}
