//! # AeroDex Indexes
//!
//! Two in-memory indexes over the same set of shared records.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Index Layer                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │                                                             │
//! │  ┌──────────────────────┐      ┌──────────────────────┐     │
//! │  │     OrderedIndex     │      │      HashIndex       │     │
//! │  │   (unbalanced BST)   │      │  (chained buckets,   │     │
//! │  │   key-order scans    │      │   move-to-front)     │     │
//! │  └──────────┬───────────┘      └──────────┬───────────┘     │
//! │             └──────────────┬──────────────┘                 │
//! │                     RecordIndex Trait                       │
//! │                                                             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `traits`: Common RecordIndex trait
//! - `bst`: Binary search tree ordered by code
//! - `hash`: Resizable bucket table with collision chains

pub mod bst;
pub mod hash;
pub mod traits;

pub use bst::OrderedIndex;
pub use hash::{bucket_of, Bucket, Found, HashIndex, LoadReport, LoadState, Slot};
pub use traits::RecordIndex;
