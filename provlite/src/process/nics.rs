//! Network attachment reconciliation.

use std::collections::BTreeSet;

use provlite_shared::errors::ProvliteResult;

use crate::engine::{ProcessRunner, Resource};
use crate::model::constants::processes;
use crate::model::{DataBag, Instance, NetworkId, Nic, NicId};
use crate::object::{NewNic, ObjectGraph};

/// Reconcile the requested networks against the instance's existing nics.
///
/// Device numbers mirror request-list position: the counter advances once
/// per slot, including null slots, so ordinal addressing (eth0, eth1, ...)
/// is preserved when a slot is intentionally left empty. A request entry
/// that matches an existing nic by network id reuses it; otherwise a new
/// nic is persisted with the slot's device number. Either way the nested
/// `nic.create` process runs to completion before the next slot is handled,
/// with the step's transient data passed through.
///
/// Matching is against the `existing` snapshot taken at step entry, not a
/// live list. A request naming the same network twice with no pre-existing
/// nic therefore creates two nics for that network.
pub async fn resolve_attachments(
    instance: &Instance,
    existing: &[Nic],
    requested: Option<Vec<Option<NetworkId>>>,
    ctx_data: &DataBag,
    objects: &dyn ObjectGraph,
    runner: &dyn ProcessRunner,
) -> ProvliteResult<BTreeSet<NicId>> {
    let mut nic_ids = BTreeSet::new();

    let Some(network_ids) = requested else {
        return Ok(nic_ids);
    };

    let mut device_number: u32 = 0;

    for slot in network_ids {
        let Some(network_id) = slot else {
            // empty slot: the device number stays reserved
            device_number += 1;
            continue;
        };

        let nic = match existing.iter().find(|nic| nic.network_id == network_id) {
            Some(nic) => nic.clone(),
            None => {
                tracing::debug!(
                    instance_id = instance.id,
                    network_id,
                    device_number,
                    "Attaching new nic"
                );
                objects.create_nic(NewNic {
                    account_id: instance.account_id,
                    instance_id: instance.id,
                    network_id,
                    device_number,
                })?
            }
        };

        device_number += 1;

        runner
            .run_process(processes::NIC_CREATE, Resource::Nic(nic.clone()), ctx_data.clone())
            .await?;

        nic_ids.insert(nic.id);
    }

    Ok(nic_ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{Database, ObjectStore};
    use crate::engine::StepResult;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use tempfile::TempDir;

    fn create_test_store() -> (TempDir, ObjectStore) {
        let dir = TempDir::new().unwrap();
        let db = Database::open(&dir.path().join("test.db")).unwrap();
        (dir, ObjectStore::new(db))
    }

    fn test_instance(objects: &ObjectStore) -> Instance {
        objects.create_instance(3, None, DataBag::new()).unwrap()
    }

    /// Records nested process executions instead of running them.
    #[derive(Default)]
    struct RecordingRunner {
        calls: Mutex<Vec<(String, NicId)>>,
    }

    #[async_trait]
    impl ProcessRunner for RecordingRunner {
        async fn run_process(
            &self,
            process: &str,
            resource: Resource,
            _data: DataBag,
        ) -> ProvliteResult<StepResult> {
            let nic = resource.as_nic()?;
            self.calls.lock().push((process.to_string(), nic.id));
            Ok(StepResult::new())
        }
    }

    #[tokio::test]
    async fn test_absent_request_yields_empty_set() {
        let (_dir, objects) = create_test_store();
        let instance = test_instance(&objects);
        let runner = RecordingRunner::default();

        let ids = resolve_attachments(&instance, &[], None, &DataBag::new(), &objects, &runner)
            .await
            .unwrap();

        assert!(ids.is_empty());
        assert!(runner.calls.lock().is_empty());
    }

    #[tokio::test]
    async fn test_empty_request_yields_empty_set() {
        let (_dir, objects) = create_test_store();
        let instance = test_instance(&objects);
        let runner = RecordingRunner::default();

        let ids = resolve_attachments(
            &instance,
            &[],
            Some(Vec::new()),
            &DataBag::new(),
            &objects,
            &runner,
        )
        .await
        .unwrap();

        assert!(ids.is_empty());
    }

    #[tokio::test]
    async fn test_null_slots_reserve_device_numbers() {
        let (_dir, objects) = create_test_store();
        let instance = test_instance(&objects);
        let runner = RecordingRunner::default();

        let ids = resolve_attachments(
            &instance,
            &[],
            Some(vec![Some(10), None, Some(20)]),
            &DataBag::new(),
            &objects,
            &runner,
        )
        .await
        .unwrap();

        let nics = objects.instance_nics(instance.id).unwrap();
        assert_eq!(nics.len(), 2);
        assert_eq!((nics[0].network_id, nics[0].device_number), (10, 0));
        assert_eq!((nics[1].network_id, nics[1].device_number), (20, 2));

        let expected: BTreeSet<NicId> = nics.iter().map(|nic| nic.id).collect();
        assert_eq!(ids, expected);

        // one nested create per touched nic, in slot order
        let calls = runner.calls.lock();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], ("nic.create".to_string(), nics[0].id));
        assert_eq!(calls[1], ("nic.create".to_string(), nics[1].id));
    }

    #[tokio::test]
    async fn test_existing_nic_is_reused() {
        let (_dir, objects) = create_test_store();
        let instance = test_instance(&objects);
        let runner = RecordingRunner::default();

        let existing = objects
            .create_nic(NewNic {
                account_id: instance.account_id,
                instance_id: instance.id,
                network_id: 10,
                device_number: 0,
            })
            .unwrap();

        let snapshot = objects.instance_nics(instance.id).unwrap();
        let ids = resolve_attachments(
            &instance,
            &snapshot,
            Some(vec![Some(10)]),
            &DataBag::new(),
            &objects,
            &runner,
        )
        .await
        .unwrap();

        assert_eq!(ids, BTreeSet::from([existing.id]));
        // no second nic appeared
        assert_eq!(objects.instance_nics(instance.id).unwrap().len(), 1);
        // the nested create still ran on the reused nic
        assert_eq!(runner.calls.lock().len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_request_against_empty_snapshot_creates_two_nics() {
        // Matching runs against the entry snapshot, so a request naming the
        // same network twice creates two nics when none existed before.
        let (_dir, objects) = create_test_store();
        let instance = test_instance(&objects);
        let runner = RecordingRunner::default();

        let ids = resolve_attachments(
            &instance,
            &[],
            Some(vec![Some(7), Some(7)]),
            &DataBag::new(),
            &objects,
            &runner,
        )
        .await
        .unwrap();

        let nics = objects.instance_nics(instance.id).unwrap();
        assert_eq!(nics.len(), 2);
        assert!(nics.iter().all(|nic| nic.network_id == 7));
        assert_eq!(ids.len(), 2);
    }

    #[tokio::test]
    async fn test_nested_create_failure_propagates() {
        struct FailingRunner;

        #[async_trait]
        impl ProcessRunner for FailingRunner {
            async fn run_process(
                &self,
                _process: &str,
                _resource: Resource,
                _data: DataBag,
            ) -> ProvliteResult<StepResult> {
                Err(provlite_shared::errors::ProvliteError::Process(
                    "nic create rejected".into(),
                ))
            }
        }

        let (_dir, objects) = create_test_store();
        let instance = test_instance(&objects);

        let err = resolve_attachments(
            &instance,
            &[],
            Some(vec![Some(10)]),
            &DataBag::new(),
            &objects,
            &FailingRunner,
        )
        .await
        .unwrap_err();

        assert!(err.to_string().contains("nic create rejected"));
    }
}
