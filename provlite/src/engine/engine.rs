//! Process registry and execution loop.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use provlite_shared::errors::{ProvliteError, ProvliteResult};

use super::context::{Resource, StepContext, StepResult};
use super::handler::{ProcessHandler, ProcessRunner};
use crate::model::DataBag;

/// Registry of process handlers plus the execution loop.
///
/// Execution is strictly sequential: a nested process triggered through
/// [`ProcessRunner`] completes before the caller's step resumes, and a
/// chained process completes before `execute` returns.
pub struct ProcessEngine {
    handlers: HashMap<String, Arc<dyn ProcessHandler>>,
}

impl ProcessEngine {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register a handler under its process name. The last registration for
    /// a name wins.
    pub fn register(&mut self, handler: Arc<dyn ProcessHandler>) {
        self.handlers.insert(handler.name().to_string(), handler);
    }

    /// Execute a process on a resource.
    ///
    /// Returns the requested process's own result; chained processes run to
    /// completion first but their results are not merged into it.
    pub async fn execute(
        &self,
        process: &str,
        resource: Resource,
        data: DataBag,
    ) -> ProvliteResult<StepResult> {
        let mut ctx = StepContext::new(resource, data);
        self.execute_with_ctx(process, &mut ctx).await
    }

    /// Run one process and everything it chains into, against one context.
    ///
    /// The chained process sees the same resource, the same transient data
    /// and the same context flags, including mutations the handler made.
    async fn execute_with_ctx(
        &self,
        process: &str,
        ctx: &mut StepContext,
    ) -> ProvliteResult<StepResult> {
        let handler = self.handlers.get(process).ok_or_else(|| {
            ProvliteError::NotFound(format!("no handler registered for process '{}'", process))
        })?;

        tracing::debug!(
            process = %process,
            resource = %ctx.resource.describe(),
            "executing process"
        );

        let result = handler.handle(ctx, self).await?;

        if let Some(chain) = result.chain_process() {
            tracing::debug!(process = %process, chain = %chain, "chaining into next process");
            Box::pin(self.execute_with_ctx(chain, ctx)).await?;
        }

        Ok(result)
    }
}

impl Default for ProcessEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProcessRunner for ProcessEngine {
    async fn run_process(
        &self,
        process: &str,
        resource: Resource,
        data: DataBag,
    ) -> ProvliteResult<StepResult> {
        self.execute(process, resource, data).await
    }
}
