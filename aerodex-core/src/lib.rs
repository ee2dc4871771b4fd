//! # AeroDex Core
//!
//! This crate provides the fundamental building blocks for AeroDex:
//! - Record types and airport codes
//! - Error types
//! - Configuration
//! - Operation counters
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                  aerodex-core                   │
//! ├─────────────────────────────────────────────────┤
//! │  • record   - Record, Code, SharedRecord        │
//! │  • error    - Error handling                    │
//! │  • config   - Thresholds, paths, logging        │
//! │  • metrics  - Catalog operation counters        │
//! └─────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod metrics;
pub mod record;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};
pub use metrics::{Metrics, MetricsSnapshot};
pub use record::{Code, Record, SharedRecord, CODE_LEN};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
