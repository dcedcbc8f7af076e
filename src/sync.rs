//! The synchronization passes, usable without an [`App`](bevy::app::App).
//!
//! The systems in the crate root gather the capability data from the ECS and call into these.
//! All precondition failures (no mesh, no camera, wrong shape, synchronization disabled) are
//! silent no-ops; stale geometry is corrected by the next pass once the preconditions hold.

use bevy::math::Vec3;
use parry3d::shape::SharedShape;

use crate::{
    collider::{ColliderShape, SpriteCollider},
    sprites::ProjectionPlane,
    ColliderSync,
};

/// Snapshot of the render camera the depth axis is derived from.
#[derive(Debug, Clone, Copy)]
pub struct CameraView {
    pub near_clip: f32,
    pub far_clip: f32,
    /// Camera world position.
    pub position: Vec3,
}

/// Runs the full synchronization pass: size fit, then center fit.
pub fn update_collider(
    collider: &mut SpriteCollider,
    sprite_mesh: Option<&SharedShape>,
    plane: ProjectionPlane,
    camera: Option<&CameraView>,
    host_position: Vec3,
    settings: &ColliderSync,
) {
    update_size(collider, sprite_mesh, plane, settings);
    update_center(collider, plane, camera, host_position, settings);
}

/// Fits the collider to the sprite's mesh.
///
/// For a box collider the center snaps to the mesh bounds center and the size to the bounds
/// extents on the two in-plane axes, with [`ColliderSync::length`] on the depth axis. For a
/// mesh collider the shared-mesh reference is re-assigned so the host rebuilds its collision
/// representation.
pub fn update_size(
    collider: &mut SpriteCollider,
    sprite_mesh: Option<&SharedShape>,
    plane: ProjectionPlane,
    settings: &ColliderSync,
) {
    let Some(mesh) = sprite_mesh else {
        return;
    };
    if !settings.auto_resize_collision() {
        return;
    }

    if matches!(collider.shape(), ColliderShape::BoxShaped { .. }) {
        let bounds = mesh.compute_local_aabb();
        let center: Vec3 = bounds.center().into();
        let extents: Vec3 = bounds.extents().into();

        let length = settings.length();
        let size = match plane {
            ProjectionPlane::XY => Vec3::new(extents.x, extents.y, length),
            ProjectionPlane::XZ => Vec3::new(extents.x, length, extents.z),
            ProjectionPlane::ZY => Vec3::new(length, extents.y, extents.z),
        };

        collider.set_box(center, size);
    } else {
        // NOTE: re-assigning an identical reference doesn't register with the host's change
        // detection, the reference has to be cleared first.
        let mesh = mesh.clone();
        collider.clear_shared_mesh();
        collider.assign_shared_mesh(mesh);
    }
}

/// Stretches a box collider along the sprite's depth axis to span the render camera's full
/// clip range, starting at the near clip plane. Only applies with [`ColliderSync::auto_length`]
/// set; mesh colliders have no adjustable center & size and are left alone.
pub fn update_center(
    collider: &mut SpriteCollider,
    plane: ProjectionPlane,
    camera: Option<&CameraView>,
    host_position: Vec3,
    settings: &ColliderSync,
) {
    if !settings.auto_length() {
        return;
    }
    let Some(camera) = camera else {
        return;
    };
    let (mut center, mut size) = match collider.shape() {
        ColliderShape::BoxShaped { center, size } => (*center, *size),
        ColliderShape::MeshShaped { .. } => return,
    };

    let depth = camera.far_clip - camera.near_clip;

    // Place the box's depth-axis center half the frustum depth beyond the camera's near clip
    // boundary, relative to the host's own position on that axis. The two in-plane axes are
    // left untouched.
    match plane {
        ProjectionPlane::XY => {
            let offset = depth * 0.5 + (camera.position.z + camera.near_clip) - host_position.z;
            center.z = offset;
            size.z = depth;
        }
        ProjectionPlane::XZ => {
            let offset = depth * 0.5 + host_position.y - (camera.position.y + camera.near_clip);
            center.y = -offset;
            size.y = depth;
        }
        ProjectionPlane::ZY => {
            let offset = depth * 0.5 + host_position.x - (camera.position.x + camera.near_clip);
            center.x = -offset;
            size.x = depth;
        }
    }

    collider.set_box(center, size);
}
