//! Step context and result types.

use provlite_shared::errors::{ProvliteError, ProvliteResult};
use serde_json::Value;

use crate::model::{DataBag, Instance, Nic};

/// Resource a process executes against.
#[derive(Debug, Clone)]
pub enum Resource {
    Instance(Instance),
    Nic(Nic),
}

impl Resource {
    /// Short description for logs and error messages.
    pub fn describe(&self) -> String {
        match self {
            Resource::Instance(instance) => format!("instance {}", instance.id),
            Resource::Nic(nic) => format!("nic {}", nic.id),
        }
    }

    pub fn as_instance(&self) -> ProvliteResult<&Instance> {
        match self {
            Resource::Instance(instance) => Ok(instance),
            other => Err(ProvliteError::InvalidState(format!(
                "expected an instance resource, got {}",
                other.describe()
            ))),
        }
    }

    pub fn as_nic(&self) -> ProvliteResult<&Nic> {
        match self {
            Resource::Nic(nic) => Ok(nic),
            other => Err(ProvliteError::InvalidState(format!(
                "expected a nic resource, got {}",
                other.describe()
            ))),
        }
    }
}

/// Execution-scoped state handed to a process handler.
///
/// `data` lives for one engine run: it is visible to nested process
/// executions and to chained processes, then discarded. It is never written
/// back to the resource.
#[derive(Debug, Clone)]
pub struct StepContext {
    pub resource: Resource,
    pub data: DataBag,
    /// Set by the create step so later steps of the same run can tell they
    /// are part of an initial creation rather than a standalone execution.
    pub create_start: bool,
}

impl StepContext {
    pub fn new(resource: Resource, data: DataBag) -> Self {
        Self {
            resource,
            data,
            create_start: false,
        }
    }
}

/// Outcome of one process step.
///
/// Carries named result fields for the hosting engine plus an optional
/// process to chain into next.
#[derive(Debug, Default)]
pub struct StepResult {
    fields: Vec<(String, Value)>,
    chain_process: Option<String>,
}

impl StepResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_field(&mut self, key: impl Into<String>, value: Value) {
        self.fields.push((key.into(), value));
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn fields(&self) -> &[(String, Value)] {
        &self.fields
    }

    pub fn set_chain_process(&mut self, process: impl Into<String>) {
        self.chain_process = Some(process.into());
    }

    pub fn chain_process(&self) -> Option<&str> {
        self.chain_process.as_deref()
    }
}
