//! # Catalog
//!
//! Owns both indexes over one record set and applies the resize policy.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                          Catalog                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │                                                             │
//! │  Insert:  HashIndex::insert ──> OrderedIndex::insert        │
//! │           └─> grow while load factor >= grow threshold      │
//! │                                                             │
//! │  Delete:  OrderedIndex::retrieve (existence)                │
//! │           ──> HashIndex::delete_entry (same handle)         │
//! │           ──> OrderedIndex::delete                          │
//! │           └─> shrink while load factor <= shrink threshold  │
//! │                                                             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Hash mutations happen first, so a failed hash step leaves both indexes
//! exactly as they were.

use std::io::Write;
use std::path::Path;

use tracing::{debug, info, warn};

use aerodex_core::config::IndexConfig;
use aerodex_core::{Code, Config, Error, Metrics, MetricsSnapshot, Record, Result, SharedRecord};
use aerodex_index::{HashIndex, LoadReport, LoadState, OrderedIndex};

use crate::format;

/// Airport records indexed by code tree and hash table
pub struct Catalog {
    ordered: OrderedIndex,
    hashed: HashIndex,
    config: IndexConfig,
    metrics: Metrics,
}

impl Catalog {
    /// Empty catalog with the default policy
    pub fn new() -> Result<Self> {
        Self::with_config(Vec::new(), &IndexConfig::default())
    }

    /// Bulk-build with the default policy
    pub fn load(records: Vec<Record>) -> Result<Self> {
        Self::with_config(records, &IndexConfig::default())
    }

    pub fn with_config(records: Vec<Record>, config: &IndexConfig) -> Result<Self> {
        config.validate()?;
        let buckets = config.initial_buckets(records.len());
        let mut catalog = Self {
            ordered: OrderedIndex::new(),
            hashed: HashIndex::with_config(buckets, config)?,
            config: config.clone(),
            metrics: Metrics::new(),
        };

        for record in records {
            let shared = record.into_shared();
            catalog.hashed.insert(shared.clone())?;
            catalog.ordered.insert(shared);
        }
        catalog.grow_while_needed();

        debug!(
            "Catalog built with {} records in {} buckets",
            catalog.len(),
            catalog.hashed.capacity()
        );
        Ok(catalog)
    }

    /// Read a source file and build a catalog from it
    pub fn open(path: &Path, config: &Config) -> Result<Self> {
        let records = format::read_file(path)?;
        let catalog = Self::with_config(records, &config.index)?;
        info!("Loaded {} records from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Insert without a duplicate check.
    ///
    /// A duplicate code lands in the right subtree of the tree and on the
    /// bucket's chain. Use [`add`](Self::add) to reject duplicates.
    pub fn insert(&mut self, record: Record) -> Result<SharedRecord> {
        let shared = record.into_shared();
        self.hashed.insert(shared.clone())?;
        self.ordered.insert(shared.clone());
        self.metrics.record_insert();
        debug!("Inserted {}", shared.code());

        self.grow_while_needed();
        Ok(shared)
    }

    /// Insert, failing with `DuplicateKey` when the code is already present
    pub fn add(&mut self, record: Record) -> Result<SharedRecord> {
        if self.hashed.get(record.code()).is_some() {
            return Err(Error::DuplicateKey {
                code: record.code().to_string(),
            });
        }
        self.insert(record)
    }

    /// Remove one record for `code` from both indexes and hand it back
    pub fn delete(&mut self, code: &Code) -> Result<SharedRecord> {
        let target = self
            .ordered
            .retrieve(code)
            .cloned()
            .ok_or_else(|| Error::not_found(code))?;

        match self.hashed.delete_entry(&target) {
            Ok(_) => {}
            Err(Error::NotFound { .. }) => {
                warn!("{} is in the ordered index but not the hash index", code);
                return Err(Error::IndexDesync {
                    details: format!("{} missing from hash index", code),
                });
            }
            Err(e) => return Err(e),
        }

        let removed = self.ordered.delete(code)?;
        if !SharedRecord::ptr_eq(&removed, &target) {
            return Err(Error::IndexDesync {
                details: format!("ordered index released a different {} record", code),
            });
        }
        drop(target);

        self.metrics.record_delete();
        debug!("Deleted {}", code);

        self.shrink_while_needed();
        Ok(removed)
    }

    fn grow_while_needed(&mut self) {
        while self.hashed.load_state() == LoadState::Grow {
            if let Err(e) = self.hashed.grow() {
                warn!("Grow refused, keeping {} buckets: {}", self.hashed.capacity(), e);
                return;
            }
            self.metrics.record_grow();
        }
    }

    fn shrink_while_needed(&mut self) {
        while self.hashed.load_state() == LoadState::Shrink {
            match self.hashed.shrink() {
                Ok(true) => self.metrics.record_shrink(),
                Ok(false) => return,
                Err(e) => {
                    warn!("Shrink refused, keeping {} buckets: {}", self.hashed.capacity(), e);
                    return;
                }
            }
        }
    }

    /// Hash lookup; a chain hit moves to the head of its chain
    pub fn find(&mut self, code: &Code) -> Option<SharedRecord> {
        let found = self.hashed.find_entry(code);
        self.metrics.record_find(
            found.is_some(),
            found.as_ref().map_or(false, |f| f.promoted()),
        );
        found.map(|f| f.record)
    }

    /// Ordered-index lookup
    pub fn retrieve(&self, code: &Code) -> Option<&SharedRecord> {
        self.ordered.retrieve(code)
    }

    /// Records in bucket order with their bucket index
    pub fn list_by_hash_order<F>(&self, visit: F)
    where
        F: FnMut(usize, &SharedRecord),
    {
        self.hashed.list_all(visit);
    }

    /// Records sorted by code
    pub fn list_by_key_order<F>(&self, visit: F)
    where
        F: FnMut(&SharedRecord),
    {
        self.ordered.traverse(visit);
    }

    /// Reverse in-order walk with depth, for printing the tree sideways
    pub fn walk_tree<F>(&self, visit: F)
    where
        F: FnMut(usize, &SharedRecord),
    {
        self.ordered.walk_sideways(visit);
    }

    pub fn load_report(&self) -> LoadReport {
        self.hashed.report()
    }

    /// Double the table regardless of load
    pub fn grow_table(&mut self) -> Result<()> {
        self.hashed.grow()?;
        self.metrics.record_grow();
        Ok(())
    }

    /// Halve the table regardless of load; false when already at the minimum
    pub fn shrink_table(&mut self) -> Result<bool> {
        let shrunk = self.hashed.shrink()?;
        if shrunk {
            self.metrics.record_shrink();
        }
        Ok(shrunk)
    }

    /// Write every record in hash order to `path`
    pub fn save(&self, path: &Path) -> Result<usize> {
        let written = format::write_file(path, self.hashed.iter().map(|(_, r)| &**r))?;
        info!("Saved {} records to {}", written, path.display());
        Ok(written)
    }

    pub fn write_to<W: Write>(&self, writer: W) -> Result<usize> {
        format::write_records(writer, self.hashed.iter().map(|(_, r)| &**r))
    }

    /// Release every record through the coordinated delete path
    pub fn teardown(&mut self) -> Result<usize> {
        let codes: Vec<Code> = self.ordered.iter().map(|r| *r.code()).collect();
        let mut released = 0;
        for code in &codes {
            self.delete(code)?;
            released += 1;
        }
        info!("Released {} records", released);
        Ok(released)
    }

    /// Drop everything at once; the table keeps its current size
    pub fn clear(&mut self) {
        self.hashed.clear();
        self.ordered.destroy_all();
    }

    /// Check that both indexes hold the same record handles
    pub fn verify(&self) -> Result<()> {
        if self.ordered.count() != self.hashed.len() {
            return Err(Error::IndexDesync {
                details: format!(
                    "ordered index has {} records, hash index has {}",
                    self.ordered.count(),
                    self.hashed.len()
                ),
            });
        }
        for record in self.ordered.iter() {
            let present = self
                .hashed
                .buckets()
                .iter()
                .flat_map(|b| b.iter())
                .any(|r| SharedRecord::ptr_eq(r, record));
            if !present {
                return Err(Error::IndexDesync {
                    details: format!("{} missing from hash index", record.code()),
                });
            }
        }
        Ok(())
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    pub fn ordered(&self) -> &OrderedIndex {
        &self.ordered
    }

    pub fn hashed(&self) -> &HashIndex {
        &self.hashed
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.ordered.count()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}
