//! Types shared across Provlite crates.

pub mod errors;

pub use errors::{ProvliteError, ProvliteResult};
