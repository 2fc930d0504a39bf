//! Handler and runner traits for process execution.

use async_trait::async_trait;
use provlite_shared::errors::ProvliteResult;

use super::context::{Resource, StepContext, StepResult};
use crate::model::DataBag;

/// One step of a resource lifecycle process.
#[async_trait]
pub trait ProcessHandler: Send + Sync {
    /// Process name this handler serves (e.g. `instance.create`).
    fn name(&self) -> &str;

    /// Execute the step. `runner` allows nested process executions that
    /// complete before this step returns.
    async fn handle(
        &self,
        ctx: &mut StepContext,
        runner: &dyn ProcessRunner,
    ) -> ProvliteResult<StepResult>;
}

/// Capability to execute a process from inside a handler.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    async fn run_process(
        &self,
        process: &str,
        resource: Resource,
        data: DataBag,
    ) -> ProvliteResult<StepResult>;
}
