//! Infrastructure layer: collaborator implementations for the import pipeline.
//!
//! In-memory, tenant-isolated implementations intended for tests/dev; real
//! deployments swap in SQL-backed and HTTP-backed collaborators behind the
//! same traits.

pub mod client_store;
pub mod hooks;
pub mod registry;


pub use client_store::InMemoryClientStore;
pub use hooks::{RecordingNotifier, RecordingOnboarding};
pub use registry::{StaticRegistry, UnavailableRegistry};
