//! Lifecycle process handlers.
//!
//! ## Architecture
//!
//! `instance.create` is the reconciliation step that runs when an instance
//! transitions into existence. It sequences four concerns and may chain
//! into `instance.start`:
//!
//! ```text
//! instance.create:
//!   1. mark create-start on the step context
//!   2. build data-volume descriptors   (explicit list + mount map, deduped)
//!   3. reconcile network attachments   (device numbers by request position)
//!        └─ nic.create                 (nested, per touched nic)
//!   4. propagate labels                (one label-store write per entry)
//!   5. result: nicIds + dataVolumes
//!   6. chain instance.start            (unless start-on-create is off)
//! ```
//!
//! Each concern lives in its own submodule so it can be exercised on its
//! own; `instance_create` only sequences them.

mod instance_create;
mod instance_start;
mod labels;
mod nic_create;
mod nics;
mod start;
mod volumes;

pub use instance_create::InstanceCreate;
pub use instance_start::InstanceStart;
pub use labels::propagate_labels;
pub use nic_create::NicCreate;
pub use nics::resolve_attachments;
pub use start::should_start;
pub use volumes::build_data_volumes;
