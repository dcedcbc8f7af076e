use bevy::{ecs::component::Component, math::Vec3};
use parry3d::{math::Isometry, shape::SharedShape};

/// The geometry of a [`SpriteCollider`].
///
/// A box keeps its own center & size. A mesh collider owns no geometry of its own; it borrows
/// the sprite's shared mesh and is refreshed by re-assigning that reference.
#[derive(Clone)]
pub enum ColliderShape {
    BoxShaped { center: Vec3, size: Vec3 },
    MeshShaped { shared_mesh: Option<SharedShape> },
}

/// The collider kept in sync with a [`SyncedSprite`](crate::sprites::SyncedSprite) on the same
/// entity.
///
/// Every mutation the host would need to react to bumps [`SpriteCollider::revision`]: box
/// geometry bumps only when the value actually changes, the shared-mesh reference bumps on
/// every write.
#[derive(Component, Clone)]
pub struct SpriteCollider {
    shape: ColliderShape,
    revision: u64,
}

impl SpriteCollider {
    /// A box collider with the engine-default unit extents, centered on the entity.
    #[must_use]
    pub fn box_shaped() -> Self {
        Self {
            shape: ColliderShape::BoxShaped {
                center: Vec3::ZERO,
                size: Vec3::ONE,
            },
            revision: 0,
        }
    }

    /// A mesh collider with no mesh assigned yet. The first size pass assigns the sprite's
    /// shared mesh.
    #[must_use]
    pub fn mesh_shaped() -> Self {
        Self {
            shape: ColliderShape::MeshShaped { shared_mesh: None },
            revision: 0,
        }
    }

    pub fn shape(&self) -> &ColliderShape {
        &self.shape
    }

    /// Change-notification counter. Increases whenever a synchronization pass wrote to this
    /// collider.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The collider's geometry as a parry shape & offset, for handing to a physics backend.
    ///
    /// ``None`` for a mesh collider that has no mesh assigned yet.
    pub fn physics_shape(&self) -> Option<(Isometry<f32>, SharedShape)> {
        match &self.shape {
            ColliderShape::BoxShaped { center, size } => {
                let half_extents = *size * 0.5;
                Some((
                    Isometry::translation(center.x, center.y, center.z),
                    SharedShape::cuboid(half_extents.x, half_extents.y, half_extents.z),
                ))
            }
            ColliderShape::MeshShaped { shared_mesh } => shared_mesh
                .clone()
                .map(|mesh| (Isometry::identity(), mesh)),
        }
    }

    pub(crate) fn set_box(&mut self, new_center: Vec3, new_size: Vec3) {
        if let ColliderShape::BoxShaped { center, size } = &mut self.shape {
            if *center != new_center || *size != new_size {
                *center = new_center;
                *size = new_size;
                self.revision += 1;
            }
        }
    }

    pub(crate) fn clear_shared_mesh(&mut self) {
        if let ColliderShape::MeshShaped { shared_mesh } = &mut self.shape {
            *shared_mesh = None;
            self.revision += 1;
        }
    }

    pub(crate) fn assign_shared_mesh(&mut self, mesh: SharedShape) {
        if let ColliderShape::MeshShaped { shared_mesh } = &mut self.shape {
            *shared_mesh = Some(mesh);
            self.revision += 1;
        }
    }
}
