//! Clients domain module (the companies an accounting tenant manages).
//!
//! This crate contains the client record shape and its business rules,
//! implemented purely as deterministic domain logic (no IO, no HTTP, no storage).

pub mod client;

pub use client::{Client, ClientContact, ClientTier, NewClient};
