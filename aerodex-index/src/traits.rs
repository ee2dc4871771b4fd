//! # Record Index Traits
//!
//! Common interface for the ordered and hashed indexes.

use aerodex_core::{Code, Result, SharedRecord};

/// Index trait - implemented by OrderedIndex and HashIndex
///
/// Neither implementation rejects duplicate codes; callers that need
/// uniqueness check with `get` first.
pub trait RecordIndex {
    /// Add a record handle
    fn insert(&mut self, record: SharedRecord) -> Result<()>;

    /// Remove the first record found for `code`
    fn remove(&mut self, code: &Code) -> Result<SharedRecord>;

    /// Look up without changing internal order
    fn get(&self, code: &Code) -> Option<&SharedRecord>;

    /// Number of records in index
    fn len(&self) -> usize;

    /// Check if empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All records in the index's natural iteration order
    fn records(&self) -> Vec<SharedRecord>;

    /// Drop every record handle
    fn clear(&mut self);
}
