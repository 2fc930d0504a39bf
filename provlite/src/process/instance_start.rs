//! Start step chained after creation.

use std::sync::Arc;

use async_trait::async_trait;
use provlite_shared::errors::ProvliteResult;

use crate::engine::{ProcessHandler, ProcessRunner, StepContext, StepResult};
use crate::model::InstanceState;
use crate::model::constants::processes;
use crate::object::ObjectGraph;

/// Handler for `instance.start`: marks the instance running.
pub struct InstanceStart {
    objects: Arc<dyn ObjectGraph>,
}

impl InstanceStart {
    pub fn new(objects: Arc<dyn ObjectGraph>) -> Self {
        Self { objects }
    }
}

#[async_trait]
impl ProcessHandler for InstanceStart {
    fn name(&self) -> &str {
        processes::INSTANCE_START
    }

    async fn handle(
        &self,
        ctx: &mut StepContext,
        _runner: &dyn ProcessRunner,
    ) -> ProvliteResult<StepResult> {
        let instance = ctx.resource.as_instance()?;
        self.objects
            .update_instance_state(instance.id, InstanceState::Running)?;
        tracing::debug!(
            instance_id = instance.id,
            create_start = ctx.create_start,
            "Instance started"
        );
        Ok(StepResult::new())
    }
}
