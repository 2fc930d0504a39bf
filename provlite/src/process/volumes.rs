//! Effective data-volume descriptor computation.

use provlite_shared::errors::ProvliteResult;

use crate::model::Instance;
use crate::model::constants::fields;
use crate::object::ObjectGraph;

/// Merge the instance's explicit volume list with its mount map into one
/// deduplicated descriptor list.
///
/// Descriptors have the form `<volumeName>:<trimmedMountPath>`. The list is
/// order-preserving: explicit entries first, then mount-map entries in map
/// order, first occurrence of a descriptor wins. Mounts that reference a
/// volume the object graph cannot load are skipped.
pub fn build_data_volumes(
    instance: &Instance,
    objects: &dyn ObjectGraph,
) -> ProvliteResult<Vec<String>> {
    let mut descriptors = instance
        .data
        .string_list(fields::DATA_VOLUMES)?
        .unwrap_or_default();

    let Some(mounts) = instance.data.mount_pairs(fields::DATA_VOLUME_MOUNTS)? else {
        return Ok(descriptors);
    };

    for (mount_path, volume_id) in mounts {
        let Some(volume) = objects.load_volume(volume_id)? else {
            tracing::debug!(
                instance_id = instance.id,
                volume_id,
                mount_path = %mount_path,
                "Mounted volume not found, skipping"
            );
            continue;
        };

        let descriptor = format!("{}:{}", volume.name, mount_path.trim());
        if !descriptors.contains(&descriptor) {
            descriptors.push(descriptor);
        }
    }

    Ok(descriptors)
}
