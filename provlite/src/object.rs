//! Narrow collaborator contracts consumed by process handlers.
//!
//! Handlers never talk to storage directly; they receive these trait objects
//! at construction. `db::ObjectStore` and `db::LabelStore` are the SQLite
//! implementations.

use provlite_shared::errors::ProvliteResult;

use crate::model::{
    AccountId, InstanceId, InstanceState, NetworkId, Nic, NicId, NicState, Volume, VolumeId,
};

/// Fields for a network interface about to be persisted.
#[derive(Debug, Clone)]
pub struct NewNic {
    pub account_id: AccountId,
    pub instance_id: InstanceId,
    pub network_id: NetworkId,
    pub device_number: u32,
}

/// Object-graph access for the resources handlers reconcile.
pub trait ObjectGraph: Send + Sync {
    /// Child network interfaces of an instance, ordered by device number.
    fn instance_nics(&self, instance: InstanceId) -> ProvliteResult<Vec<Nic>>;

    /// Persist a new network interface in `Requested` state.
    fn create_nic(&self, fields: NewNic) -> ProvliteResult<Nic>;

    fn update_nic_state(&self, id: NicId, state: NicState) -> ProvliteResult<()>;

    /// Load a volume by id. Absent volumes resolve to `Ok(None)`.
    fn load_volume(&self, id: VolumeId) -> ProvliteResult<Option<Volume>>;

    fn update_instance_state(&self, id: InstanceId, state: InstanceState) -> ProvliteResult<()>;
}

/// Write access to the label store.
pub trait LabelWriter: Send + Sync {
    fn create_instance_label(
        &self,
        account: AccountId,
        instance: InstanceId,
        key: &str,
        value: &str,
    ) -> ProvliteResult<()>;
}
