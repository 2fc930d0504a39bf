//! Nested creation step for network interfaces.
//!
//! Runs synchronously from inside `instance.create` for every nic touched
//! by the reconciliation, before the resolver moves to the next slot.

use std::sync::Arc;

use async_trait::async_trait;
use provlite_shared::errors::ProvliteResult;

use crate::engine::{ProcessHandler, ProcessRunner, StepContext, StepResult};
use crate::model::NicState;
use crate::model::constants::processes;
use crate::object::ObjectGraph;

/// Handler for `nic.create`: marks the nic active.
pub struct NicCreate {
    objects: Arc<dyn ObjectGraph>,
}

impl NicCreate {
    pub fn new(objects: Arc<dyn ObjectGraph>) -> Self {
        Self { objects }
    }
}

#[async_trait]
impl ProcessHandler for NicCreate {
    fn name(&self) -> &str {
        processes::NIC_CREATE
    }

    async fn handle(
        &self,
        ctx: &mut StepContext,
        _runner: &dyn ProcessRunner,
    ) -> ProvliteResult<StepResult> {
        let nic = ctx.resource.as_nic()?;
        self.objects.update_nic_state(nic.id, NicState::Active)?;
        tracing::debug!(
            nic_id = nic.id,
            network_id = nic.network_id,
            device_number = nic.device_number,
            "Nic activated"
        );
        Ok(StepResult::new())
    }
}
