//! Library-only instance provisioning engine.
//!
//! Provlite reconciles compute instances as they come into existence: it
//! attaches network interfaces for every requested network, computes the
//! effective list of bind-mounted data volumes, propagates user labels to
//! the label store, and decides whether a follow-up start process should be
//! chained.
//!
//! The reconciliation handlers consume storage only through the narrow
//! traits in [`object`]; [`db`] provides the SQLite-backed implementations.
//! [`engine`] hosts the handlers and runs nested and chained processes.

pub mod db;
pub mod engine;
pub mod model;
pub mod object;
pub mod process;

mod logging;

pub use logging::init_logging;
pub use provlite_shared::errors::{ProvliteError, ProvliteResult};

pub use engine::{ProcessEngine, Resource, StepContext, StepResult};
pub use model::{DataBag, Instance, Nic, Volume};
pub use process::{InstanceCreate, InstanceStart, NicCreate};
