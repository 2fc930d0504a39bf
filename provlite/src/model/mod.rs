//! Resource records and open attribute data.
//!
//! This module is organized into focused submodules:
//! - `types`: persisted resource records (instances, nics, volumes)
//! - `data`: the ordered open attribute bag carried by instances and steps
//! - `constants`: field keys and process names shared across handlers

pub mod constants;
mod data;
mod types;

pub use data::DataBag;
pub use types::{
    AccountId, Instance, InstanceId, InstanceState, NetworkId, Nic, NicId, NicState, Volume,
    VolumeId,
};
