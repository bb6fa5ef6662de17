//! Bulk client import pipeline.
//!
//! Turns an uploaded table (headers + string rows) into persisted client
//! records plus a row-by-row decision report: normalize headers, validate each
//! row, optionally corroborate against the official registry, deduplicate
//! against the store, persist, and fire best-effort post-commit side effects.
//!
//! Rows are processed sequentially and fault-isolated: one row's failure never
//! aborts the run, and every input row produces exactly one outcome entry.
//! File parsing (bytes → cells) is a collaborator concern and lives outside
//! this crate.

pub mod config;
pub mod export;
pub mod hooks;
pub mod reconciler;
pub mod record;
pub mod registry;
pub mod report;
pub mod store;

pub use config::ImportConfig;
pub use export::{EXPORT_HEADERS, export_table};
pub use hooks::{OnboardingTrigger, WelcomeNotifier};
pub use reconciler::{Reconciler, validate_preflight};
pub use record::{ImportField, ImportRecord, match_header, parse_table};
pub use registry::{LookupError, OfficialRecord, RegistryLookup};
pub use report::{ImportOutcome, ImportReport, OutcomeKind, PreflightReport, RowMessage};
pub use store::{ClientStore, StoreError};
