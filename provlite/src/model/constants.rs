//! Field keys and process names.
//!
//! Centralized location for the attribute keys read from instance data and
//! step context data, and for the process names known to the engine.

/// Attribute and result field keys.
pub mod fields {
    /// Requested network ids, a list that may contain null slots.
    pub const NETWORK_IDS: &str = "networkIds";

    /// Explicit data-volume descriptor list (`name:mountPath` strings).
    pub const DATA_VOLUMES: &str = "dataVolumes";

    /// Mount-path to volume-id map for managed volumes.
    pub const DATA_VOLUME_MOUNTS: &str = "dataVolumeMounts";

    /// User-supplied label map.
    pub const LABELS: &str = "labels";

    /// Whether the instance should start right after creation.
    pub const START_ON_CREATE: &str = "startOnCreate";

    /// Result field: ids of the network interfaces touched by create.
    pub const NIC_IDS: &str = "nicIds";
}

/// Process names.
pub mod processes {
    pub const INSTANCE_CREATE: &str = "instance.create";
    pub const INSTANCE_START: &str = "instance.start";
    pub const NIC_CREATE: &str = "nic.create";
}
