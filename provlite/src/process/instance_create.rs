//! Create-time reconciliation for compute instances.

use std::sync::Arc;

use async_trait::async_trait;
use provlite_shared::errors::ProvliteResult;
use serde_json::Value;

use crate::engine::{ProcessHandler, ProcessRunner, StepContext, StepResult};
use crate::model::constants::{fields, processes};
use crate::object::{LabelWriter, ObjectGraph};
use crate::process::labels::propagate_labels;
use crate::process::nics::resolve_attachments;
use crate::process::start::should_start;
use crate::process::volumes::build_data_volumes;

/// Handler for `instance.create`.
///
/// Sequences volume-descriptor computation, network attachment
/// reconciliation and label propagation, then decides whether to chain into
/// `instance.start`. Collaborators are injected at construction.
pub struct InstanceCreate {
    objects: Arc<dyn ObjectGraph>,
    labels: Arc<dyn LabelWriter>,
}

impl InstanceCreate {
    pub fn new(objects: Arc<dyn ObjectGraph>, labels: Arc<dyn LabelWriter>) -> Self {
        Self { objects, labels }
    }
}

#[async_trait]
impl ProcessHandler for InstanceCreate {
    fn name(&self) -> &str {
        processes::INSTANCE_CREATE
    }

    async fn handle(
        &self,
        ctx: &mut StepContext,
        runner: &dyn ProcessRunner,
    ) -> ProvliteResult<StepResult> {
        // visible to later steps of this run, never persisted
        ctx.create_start = true;

        let instance = ctx.resource.as_instance()?.clone();
        tracing::debug!(instance_id = instance.id, "Reconciling instance create");

        let data_volumes = build_data_volumes(&instance, self.objects.as_ref())?;

        let existing = self.objects.instance_nics(instance.id)?;
        let requested = instance.data.id_list(fields::NETWORK_IDS)?;
        let nic_ids = resolve_attachments(
            &instance,
            &existing,
            requested,
            &ctx.data,
            self.objects.as_ref(),
            runner,
        )
        .await?;

        propagate_labels(&instance, self.labels.as_ref())?;

        let mut result = StepResult::new();
        result.set_field(
            fields::NIC_IDS,
            Value::from(nic_ids.iter().copied().collect::<Vec<_>>()),
        );
        result.set_field(fields::DATA_VOLUMES, Value::from(data_volumes));

        if should_start(ctx, &instance) {
            result.set_chain_process(processes::INSTANCE_START);
        }

        Ok(result)
    }
}
