//! RUT (Chilean national tax ID) validation and formatting.
//!
//! This crate contains the check-digit arithmetic for the RUT — a numeric body
//! plus one check character (digit or `K`) verified by a modulo-11 weighted
//! sum — implemented purely as deterministic domain logic (no IO, no storage).

pub mod rut;

pub use rut::{Rut, format, is_valid};
