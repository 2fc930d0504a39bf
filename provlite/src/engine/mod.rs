//! Process engine surface.
//!
//! Handlers implement [`ProcessHandler`] and are registered with a
//! [`ProcessEngine`] under a process name. Executing a process builds a
//! [`StepContext`] for the target resource, runs the handler, then executes
//! any chained process on the same resource with the same transient data.
//!
//! The engine also implements [`ProcessRunner`], which is how a handler
//! triggers a nested process execution (e.g. creating a child resource)
//! synchronously before its own step returns.

mod context;
mod engine;
mod handler;

pub use context::{Resource, StepContext, StepResult};
pub use engine::ProcessEngine;
pub use handler::{ProcessHandler, ProcessRunner};
