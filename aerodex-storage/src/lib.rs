//! # AeroDex Storage
//!
//! Keeps both indexes consistent over one record set and moves records
//! between memory and the flat text format.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       Mutation Path                         │
//! │                                                             │
//! │  insert / delete ──> HashIndex ──> OrderedIndex             │
//! │                         │                                   │
//! │                         ▼                                   │
//! │                   grow / shrink                             │
//! └─────────────────────────────────────────────────────────────┘
//!
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Load / Save                          │
//! │                                                             │
//! │  data.txt ──> format::read_records ──> Catalog::load        │
//! │  Catalog::save ──> format::write_records ──> outputFile.txt │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod catalog;
pub mod format;

pub use catalog::Catalog;
pub use format::{parse_line, read_file, read_records, write_file, write_records};
