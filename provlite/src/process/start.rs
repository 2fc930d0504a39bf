//! Start-on-create decision.

use crate::engine::StepContext;
use crate::model::Instance;
use crate::model::constants::fields;

/// Whether instance creation should chain into the start process.
///
/// An explicit boolean in the step's transient data wins; otherwise the
/// instance's persisted attribute is used; absence everywhere defaults to
/// starting.
pub fn should_start(ctx: &StepContext, instance: &Instance) -> bool {
    if let Some(explicit) = ctx.data.bool_field(fields::START_ON_CREATE) {
        return explicit;
    }
    instance.data.bool_field(fields::START_ON_CREATE).unwrap_or(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Resource;
    use crate::model::{DataBag, InstanceState};
    use chrono::Utc;
    use serde_json::json;

    fn instance_with(start_on_create: Option<bool>) -> Instance {
        let mut data = DataBag::new();
        if let Some(flag) = start_on_create {
            data.set(fields::START_ON_CREATE, json!(flag));
        }
        Instance {
            id: 1,
            account_id: 1,
            name: None,
            state: InstanceState::Creating,
            created_at: Utc::now(),
            data,
        }
    }

    fn context_with(override_flag: Option<bool>, instance: &Instance) -> StepContext {
        let mut data = DataBag::new();
        if let Some(flag) = override_flag {
            data.set(fields::START_ON_CREATE, json!(flag));
        }
        StepContext::new(Resource::Instance(instance.clone()), data)
    }

    #[test]
    fn test_context_override_wins() {
        let instance = instance_with(Some(true));
        let ctx = context_with(Some(false), &instance);
        assert!(!should_start(&ctx, &instance));
    }

    #[test]
    fn test_instance_attribute_used_without_override() {
        let instance = instance_with(Some(false));
        let ctx = context_with(None, &instance);
        assert!(!should_start(&ctx, &instance));
    }

    #[test]
    fn test_defaults_to_true_when_absent_everywhere() {
        let instance = instance_with(None);
        let ctx = context_with(None, &instance);
        assert!(should_start(&ctx, &instance));
    }

    #[test]
    fn test_context_true_beats_instance_false() {
        let instance = instance_with(Some(false));
        let ctx = context_with(Some(true), &instance);
        assert!(should_start(&ctx, &instance));
    }
}
