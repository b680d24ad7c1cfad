//! Row processing stages: normalize → classify → validate → (dedupe).
//!
//! Each stage is a plain function or a small value built from [`crate::config::ValidationConfig`];
//! [`crate::pipeline::Pipeline`] strings them together.
//!
//! ## Example: normalize → classify → validate
//!
//! ```rust
//! use allowlist_builder::config::ValidationConfig;
//! use allowlist_builder::processing::{classify, normalize_rows, ValidationEngine};
//! use allowlist_builder::types::{RawRow, RawTable, ViolationReason};
//!
//! let table = RawTable::new(vec![
//!     RawRow::new(2, "fourthParty", "9999999999999", "100", ""),
//!     RawRow::new(3, "fourthParty", "9999 999999999", "100", ""),
//!     RawRow::new(4, "", "", "", ""),
//! ]);
//!
//! let rows = normalize_rows(&table); // the blank row 4 is dropped
//! let classified = classify(&rows);
//! let violations = ValidationEngine::new(ValidationConfig::default()).validate(&rows, &classified);
//!
//! assert_eq!(rows.len(), 2);
//! assert_eq!(violations.len(), 2);
//! assert!(violations.iter().all(|v| v.reason == ViolationReason::DuplicateNzbn));
//! ```

pub mod classify;
pub mod dedupe;
pub mod normalize;
pub mod validate;

pub use classify::{Classified, classify, promote};
pub use dedupe::Deduplicator;
pub use normalize::{normalize_row, normalize_rows};
pub use validate::{ValidationEngine, is_valid_nzbn, nzbn_key, parse_limit};
