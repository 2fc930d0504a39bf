//! Label propagation to the label store.

use provlite_shared::errors::ProvliteResult;

use crate::model::Instance;
use crate::model::constants::fields;
use crate::object::LabelWriter;

/// Forward the instance's label map to the label store, one write per entry
/// in map order.
///
/// An absent label map is a no-op. Writes are fail-fast: the first failing
/// entry aborts the remaining ones.
pub fn propagate_labels(instance: &Instance, labels: &dyn LabelWriter) -> ProvliteResult<()> {
    let Some(entries) = instance.data.string_pairs(fields::LABELS)? else {
        return Ok(());
    };

    for (key, value) in entries {
        labels.create_instance_label(instance.account_id, instance.id, &key, &value)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DataBag, InstanceState};
    use chrono::Utc;
    use parking_lot::Mutex;
    use provlite_shared::errors::ProvliteError;
    use serde_json::json;

    fn instance_with_labels(labels: serde_json::Value) -> Instance {
        let mut data = DataBag::new();
        data.set(fields::LABELS, labels);
        Instance {
            id: 5,
            account_id: 9,
            name: None,
            state: InstanceState::Creating,
            created_at: Utc::now(),
            data,
        }
    }

    #[derive(Default)]
    struct RecordingWriter {
        calls: Mutex<Vec<(i64, i64, String, String)>>,
        fail_on: Option<String>,
    }

    impl LabelWriter for RecordingWriter {
        fn create_instance_label(
            &self,
            account: i64,
            instance: i64,
            key: &str,
            value: &str,
        ) -> ProvliteResult<()> {
            if self.fail_on.as_deref() == Some(key) {
                return Err(ProvliteError::Process(format!("label '{}' rejected", key)));
            }
            self.calls
                .lock()
                .push((account, instance, key.to_string(), value.to_string()));
            Ok(())
        }
    }

    #[test]
    fn test_absent_label_map_is_a_noop() {
        let writer = RecordingWriter::default();
        let instance = Instance {
            id: 5,
            account_id: 9,
            name: None,
            state: InstanceState::Creating,
            created_at: Utc::now(),
            data: DataBag::new(),
        };

        propagate_labels(&instance, &writer).unwrap();
        assert!(writer.calls.lock().is_empty());
    }

    #[test]
    fn test_one_call_per_entry_in_map_order() {
        let writer = RecordingWriter::default();
        let instance = instance_with_labels(json!({"env": "prod", "tier": "web"}));

        propagate_labels(&instance, &writer).unwrap();

        assert_eq!(
            *writer.calls.lock(),
            vec![
                (9, 5, "env".to_string(), "prod".to_string()),
                (9, 5, "tier".to_string(), "web".to_string()),
            ]
        );
    }

    #[test]
    fn test_failure_aborts_remaining_entries() {
        let writer = RecordingWriter {
            fail_on: Some("tier".to_string()),
            ..Default::default()
        };
        let instance =
            instance_with_labels(json!({"env": "prod", "tier": "web", "zone": "eu"}));

        let err = propagate_labels(&instance, &writer).unwrap_err();
        assert!(err.to_string().contains("tier"));
        // only the entry before the failure got through
        assert_eq!(writer.calls.lock().len(), 1);
    }
}
