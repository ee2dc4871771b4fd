//! # Hash Index
//!
//! Open bucket array with one primary slot per bucket and a collision chain
//! behind it. Lookups that hit the chain move the entry to the chain head,
//! so repeatedly requested codes drift toward O(1).
//!
//! ## Layout
//! ```text
//!  bucket │ primary │ chain (head first)
//!  ───────┼─────────┼──────────────────────
//!     0   │  SFO    │ LAX ─ JFK
//!     1   │  ---    │
//!     2   │  ORD    │
//! ```
//!
//! ## Invariants
//! - A bucket with no primary has an empty chain.
//! - `used` counts buckets with a primary, `len` counts all records.
//! - The bucket array is never empty.
//!
//! The bucket array and chains reserve memory fallibly; exhaustion surfaces
//! as [`Error::Allocation`] and leaves the table unchanged.

use std::collections::VecDeque;

use tracing::debug;

use aerodex_core::config::IndexConfig;
use aerodex_core::{Code, Error, Result, SharedRecord};

use crate::traits::RecordIndex;

/// Bucket selected for `code` in a table of `buckets` slots.
///
/// Product of `(letter - 64 + 7)` over the three letters, modulo the table
/// size. Weak but deterministic; the result changes whenever the table is
/// resized.
pub fn bucket_of(code: &Code, buckets: usize) -> usize {
    let product = code
        .as_bytes()
        .iter()
        .fold(1u64, |acc, &b| acc * (u64::from(b) + 7 - 64));
    (product % buckets as u64) as usize
}

/// One slot of the bucket array
#[derive(Debug, Clone, Default)]
pub struct Bucket {
    primary: Option<SharedRecord>,
    chain: VecDeque<SharedRecord>,
}

impl Bucket {
    pub fn primary(&self) -> Option<&SharedRecord> {
        self.primary.as_ref()
    }

    /// Collision chain, head first
    pub fn chain(&self) -> impl Iterator<Item = &SharedRecord> + '_ {
        self.chain.iter()
    }

    pub fn collision_count(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_none()
    }

    /// Primary first, then the chain in its current order
    pub fn iter(&self) -> impl Iterator<Item = &SharedRecord> + '_ {
        self.primary.iter().chain(self.chain.iter())
    }

    /// Place a record; returns true when it took the primary slot
    fn place(&mut self, record: SharedRecord) -> Result<bool> {
        if self.primary.is_none() {
            self.primary = Some(record);
            return Ok(true);
        }
        self.chain.try_reserve(1)?;
        self.chain.push_front(record);
        Ok(false)
    }
}

/// Where a lookup found its record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Primary,
    /// Chain position before promotion; 0 means it already was the head
    Chain(usize),
}

/// Successful hash lookup
#[derive(Debug, Clone)]
pub struct Found {
    pub record: SharedRecord,
    pub slot: Slot,
}

impl Found {
    /// Whether the lookup reordered the chain
    pub fn promoted(&self) -> bool {
        matches!(self.slot, Slot::Chain(pos) if pos > 0)
    }
}

/// Load factor classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// At or above the grow threshold
    Grow,
    /// At or below the shrink threshold
    Shrink,
    Stable,
}

/// Table efficiency summary
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadReport {
    pub used_slots: usize,
    pub array_size: usize,
    pub total_collisions: usize,
    pub longest_chain: usize,
    /// Mean chain length over buckets with a non-empty chain
    pub average_chain_length: f64,
    pub load_factor: f64,
}

/// Resizable chained hash table of record handles
#[derive(Debug, Clone)]
pub struct HashIndex {
    buckets: Vec<Bucket>,
    used: usize,
    len: usize,
    grow_threshold: f64,
    shrink_threshold: f64,
    min_buckets: usize,
}

impl HashIndex {
    /// Create a table with `buckets` slots and the default resize policy
    pub fn new(buckets: usize) -> Result<Self> {
        Self::with_config(buckets, &IndexConfig::default())
    }

    pub fn with_config(buckets: usize, config: &IndexConfig) -> Result<Self> {
        Ok(Self {
            buckets: Self::allocate(buckets)?,
            used: 0,
            len: 0,
            grow_threshold: config.grow_threshold,
            shrink_threshold: config.shrink_threshold,
            min_buckets: config.min_buckets.max(1),
        })
    }

    fn allocate(buckets: usize) -> Result<Vec<Bucket>> {
        if buckets == 0 {
            return Err(Error::Configuration {
                message: "hash table needs at least one bucket".to_string(),
            });
        }
        let mut table = Vec::new();
        table.try_reserve_exact(buckets)?;
        table.resize_with(buckets, Bucket::default);
        Ok(table)
    }

    fn slot(&self, code: &Code) -> usize {
        bucket_of(code, self.buckets.len())
    }

    pub fn insert(&mut self, record: SharedRecord) -> Result<()> {
        let idx = self.slot(record.code());
        if self.buckets[idx].place(record)? {
            self.used += 1;
        }
        self.len += 1;
        Ok(())
    }

    /// Look up `code`, moving a chain hit to the chain head
    pub fn find(&mut self, code: &Code) -> Option<SharedRecord> {
        self.find_entry(code).map(|found| found.record)
    }

    /// Like [`find`](Self::find), also reporting where the record was
    pub fn find_entry(&mut self, code: &Code) -> Option<Found> {
        let idx = self.slot(code);
        let bucket = &mut self.buckets[idx];

        let primary = bucket.primary.as_ref()?;
        if primary.code() == code {
            return Some(Found {
                record: primary.clone(),
                slot: Slot::Primary,
            });
        }

        let pos = bucket.chain.iter().position(|r| r.code() == code)?;
        if pos > 0 {
            if let Some(hit) = bucket.chain.remove(pos) {
                bucket.chain.push_front(hit);
            }
        }
        bucket.chain.front().map(|record| Found {
            record: record.clone(),
            slot: Slot::Chain(pos),
        })
    }

    /// Look up without reordering
    pub fn get(&self, code: &Code) -> Option<&SharedRecord> {
        self.buckets[self.slot(code)].iter().find(|r| r.code() == code)
    }

    /// Remove the first record for `code`, primary before chain
    pub fn delete(&mut self, code: &Code) -> Result<SharedRecord> {
        self.delete_where(code, |_| true)
    }

    /// Remove exactly this record handle, leaving same-code duplicates alone
    pub fn delete_entry(&mut self, record: &SharedRecord) -> Result<SharedRecord> {
        self.delete_where(record.code(), |candidate| SharedRecord::ptr_eq(candidate, record))
    }

    fn delete_where<F>(&mut self, code: &Code, is_target: F) -> Result<SharedRecord>
    where
        F: Fn(&SharedRecord) -> bool,
    {
        let matches = |r: &SharedRecord| r.code() == code && is_target(r);
        let idx = self.slot(code);
        let bucket = &mut self.buckets[idx];

        let removed = if bucket.primary.as_ref().map_or(false, |r| matches(r)) {
            // Chain head, if any, is promoted into the primary slot
            let promoted = bucket.chain.pop_front();
            if promoted.is_none() {
                self.used -= 1;
            }
            std::mem::replace(&mut bucket.primary, promoted)
        } else {
            let pos = bucket.chain.iter().position(|r| matches(r));
            pos.and_then(|pos| bucket.chain.remove(pos))
        };

        let removed = removed.ok_or_else(|| Error::not_found(code))?;
        self.len -= 1;
        Ok(removed)
    }

    pub fn load_factor(&self) -> f64 {
        self.used as f64 / self.buckets.len() as f64
    }

    pub fn load_state(&self) -> LoadState {
        let factor = self.load_factor();
        if factor >= self.grow_threshold {
            LoadState::Grow
        } else if factor <= self.shrink_threshold {
            LoadState::Shrink
        } else {
            LoadState::Stable
        }
    }

    /// Rebuild into `new_size` buckets, rehashing every record.
    ///
    /// Buckets are visited in order, primary before chain. Record handles
    /// move; records themselves are never copied.
    pub fn resize(&mut self, new_size: usize) -> Result<()> {
        let mut table = Self::allocate(new_size)?;
        let mut used = 0;
        for record in self.buckets.iter().flat_map(Bucket::iter) {
            let idx = bucket_of(record.code(), new_size);
            if table[idx].place(record.clone())? {
                used += 1;
            }
        }

        debug!(
            "Hash table resized {} -> {} buckets (used {} -> {})",
            self.buckets.len(),
            new_size,
            self.used,
            used
        );
        self.buckets = table;
        self.used = used;
        Ok(())
    }

    /// Double the bucket array
    pub fn grow(&mut self) -> Result<()> {
        let target = self.buckets.len().checked_mul(2).ok_or_else(|| Error::Allocation {
            resource: format!("bucket array larger than {}", self.buckets.len()),
        })?;
        self.resize(target)
    }

    /// Halve the bucket array; returns false when already at the minimum
    pub fn shrink(&mut self) -> Result<bool> {
        let current = self.buckets.len();
        let target = (current / 2).max(self.min_buckets);
        if target >= current {
            return Ok(false);
        }
        self.resize(target)?;
        Ok(true)
    }

    /// Visit every record in bucket order: primary, then chain
    pub fn list_all<F>(&self, mut visit: F)
    where
        F: FnMut(usize, &SharedRecord),
    {
        for (idx, record) in self.iter() {
            visit(idx, record);
        }
    }

    /// `(bucket, record)` pairs in bucket order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &SharedRecord)> + '_ {
        self.buckets
            .iter()
            .enumerate()
            .flat_map(|(idx, bucket)| bucket.iter().map(move |r| (idx, r)))
    }

    pub fn report(&self) -> LoadReport {
        let mut total_collisions = 0;
        let mut longest_chain = 0;
        let mut chained_buckets = 0;
        for bucket in &self.buckets {
            let chain = bucket.collision_count();
            if chain > 0 {
                chained_buckets += 1;
                total_collisions += chain;
                longest_chain = longest_chain.max(chain);
            }
        }

        let average_chain_length = if chained_buckets > 0 {
            total_collisions as f64 / chained_buckets as f64
        } else {
            0.0
        };

        LoadReport {
            used_slots: self.used,
            array_size: self.buckets.len(),
            total_collisions,
            longest_chain,
            average_chain_length,
            load_factor: self.load_factor(),
        }
    }

    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    /// Bucket array length
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub fn used_slots(&self) -> usize {
        self.used
    }

    pub fn min_buckets(&self) -> usize {
        self.min_buckets
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drop every record handle, keeping the bucket array size
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.primary = None;
            bucket.chain.clear();
        }
        self.used = 0;
        self.len = 0;
    }
}

impl RecordIndex for HashIndex {
    fn insert(&mut self, record: SharedRecord) -> Result<()> {
        HashIndex::insert(self, record)
    }

    fn remove(&mut self, code: &Code) -> Result<SharedRecord> {
        self.delete(code)
    }

    fn get(&self, code: &Code) -> Option<&SharedRecord> {
        HashIndex::get(self, code)
    }

    fn len(&self) -> usize {
        self.len
    }

    fn records(&self) -> Vec<SharedRecord> {
        self.iter().map(|(_, r)| r.clone()).collect()
    }

    fn clear(&mut self) {
        HashIndex::clear(self);
    }
}
