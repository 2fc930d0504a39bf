//! Persisted resource records.
//!
//! Follows the separation of identity columns from the open `DataBag`
//! attribute blob: everything the engine queries by lives in a typed field,
//! everything user-supplied lives in `data`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::data::DataBag;

pub type AccountId = i64;
pub type InstanceId = i64;
pub type NicId = i64;
pub type NetworkId = i64;
pub type VolumeId = i64;

/// Instance lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstanceState {
    Requested,
    Creating,
    Created,
    Running,
    Stopped,
}

impl InstanceState {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstanceState::Requested => "requested",
            InstanceState::Creating => "creating",
            InstanceState::Created => "created",
            InstanceState::Running => "running",
            InstanceState::Stopped => "stopped",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "requested" => Some(InstanceState::Requested),
            "creating" => Some(InstanceState::Creating),
            "created" => Some(InstanceState::Created),
            "running" => Some(InstanceState::Running),
            "stopped" => Some(InstanceState::Stopped),
            _ => None,
        }
    }
}

/// Network interface lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NicState {
    Requested,
    Active,
}

impl NicState {
    pub fn as_str(&self) -> &'static str {
        match self {
            NicState::Requested => "requested",
            NicState::Active => "active",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "requested" => Some(NicState::Requested),
            "active" => Some(NicState::Active),
            _ => None,
        }
    }
}

/// A compute instance under provisioning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instance {
    pub id: InstanceId,
    pub account_id: AccountId,
    /// User-defined name (optional).
    pub name: Option<String>,
    pub state: InstanceState,
    pub created_at: DateTime<Utc>,
    /// Open attribute data (requested networks, volumes, labels, ...).
    pub data: DataBag,
}

/// A per-instance attachment to a network.
///
/// Device numbers are ordinal attachment slots: they mirror the position of
/// the network in the creation request, so eth0/eth1/... addressing stays
/// stable even when some slots are left empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Nic {
    pub id: NicId,
    pub account_id: AccountId,
    pub instance_id: InstanceId,
    pub network_id: NetworkId,
    pub device_number: u32,
    pub state: NicState,
    pub created_at: DateTime<Utc>,
}

/// A data volume that can be bind-mounted into instances.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Volume {
    pub id: VolumeId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}
