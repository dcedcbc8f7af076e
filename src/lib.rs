//! Collider synchronization for axis-aligned 2D sprite planes in [Bevy].
//!
//! Keeps a box- or mesh-shaped collider fitted to a sprite's mesh bounds, and optionally
//! stretches the box along the sprite's depth axis to span the render camera's full clip range
//! so anything between the near and far plane hits the collider.
//!
//! ## Quick-start:
//! 1. Implement the [`SyncedSprite`](sprites::SyncedSprite) trait for your sprite-plane
//!    component. It exposes the projection plane, the sprite's `parry3d::shape::SharedShape`
//!    mesh, and the entity of the [`RenderCamera`] the sprite is rendered through.
//! 2. Add ``SpriteColliderSyncPlugin`` as a plugin (eg.
//!    ``SpriteColliderSyncPlugin::<MySprite>::new()``).
//! 3. Attach a [`ColliderSync`] configuration to sprite entities and request a collider with
//!    [`EnsureColliderExt::ensure_box_collider`] or
//!    [`EnsureColliderExt::ensure_mesh_collider`].
//!
//! *At this point the collider is re-fitted whenever the sprite, its configuration, its
//! ``GlobalTransform``, or the referenced camera changes.*
//!
//! ## FAQ
//!
//! > Nothing happens after I attach a collider.
//!
//! Synchronization is a set of silent no-ops until its inputs exist: the sprite must return a
//! realized mesh for the size pass, and a resolvable [`RenderCamera`] entity for the
//! auto-length pass. Attach those and the next update fixes the geometry up.
//!
//! > Calling ``ensure_mesh_collider`` on an entity that already has a box collider does nothing.
//!
//! That is intentional. The ensure operations are attach-if-absent, not shape converters;
//! remove the existing [`SpriteCollider`] first if you want to switch shape.
//!
//! [Bevy]: https://crates.io/crates/bevy

use std::marker::PhantomData;

use bevy::{ecs::system::EntityCommands, prelude::*};
use smallvec::SmallVec;

use collider::SpriteCollider;
use sprites::{ProjectionPlane, SyncedSprite};
use sync::{update_center, update_collider, CameraView};

pub mod collider;
#[cfg(feature = "debug_draw")]
pub mod debug_draw;
pub mod sprites;
pub mod sync;

/// System sets containing the crate's systems.
#[derive(SystemSet, Debug, PartialEq, Eq, Hash, Clone)]
pub enum SpriteColliderSync {
    /// The main changed-driven pass: re-fits colliders whose sprite, configuration, or
    /// transform changed, and runs the first pass after a collider is attached.
    Main,
    /// Re-runs the center pass for sprites whose render camera moved or changed clip planes.
    /// Separated because the sprite entity's own change detection cannot see the camera.
    CameraResync,
}

pub struct SpriteColliderSyncPlugin<SpriteComponent> {
    _sprite_type: PhantomData<SpriteComponent>,
}

impl<SP> SpriteColliderSyncPlugin<SP>
where
    SP: SyncedSprite,
{
    #[must_use]
    pub fn new() -> SpriteColliderSyncPlugin<SP> {
        SpriteColliderSyncPlugin::<SP> {
            _sprite_type: PhantomData::<SP>,
        }
    }
}

impl<SP> Default for SpriteColliderSyncPlugin<SP>
where
    SP: SyncedSprite,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<SP> Plugin for SpriteColliderSyncPlugin<SP>
where
    SP: SyncedSprite,
{
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            SpriteColliderSync::CameraResync.after(SpriteColliderSync::Main),
        );

        app.add_systems(
            Update,
            sync_sprite_colliders_system::<SP>.in_set(SpriteColliderSync::Main),
        );
        app.add_systems(
            Update,
            sync_on_camera_change_system::<SP>.in_set(SpriteColliderSync::CameraResync),
        );

        app.register_type::<ColliderSync>()
            .register_type::<RenderCamera>()
            .register_type::<ProjectionPlane>();
    }
}

/// Per-entity collider synchronization configuration.
///
/// Fields are only reachable through the ``set_*`` setters, which report whether the value
/// actually changed; an unchanged write is not a change and triggers no synchronization pass.
#[derive(Component, Reflect, Clone)]
#[reflect(Component)]
pub struct ColliderSync {
    auto_resize_collision: bool,
    auto_length: bool,
    length: f32,
}

impl Default for ColliderSync {
    fn default() -> Self {
        Self {
            auto_resize_collision: true,
            auto_length: true,
            length: 0.2,
        }
    }
}

impl ColliderSync {
    /// When true, a box collider's in-plane dimensions track the sprite's mesh bounds and a
    /// mesh collider is refreshed from the sprite's shared mesh.
    pub fn auto_resize_collision(&self) -> bool {
        self.auto_resize_collision
    }

    /// When true, a box collider's depth dimension & offset track the render camera's
    /// near/far clip range instead of [`ColliderSync::length`].
    pub fn auto_length(&self) -> bool {
        self.auto_length
    }

    /// Fixed depth extent of the collision box, used while ``auto_length`` is off.
    pub fn length(&self) -> f32 {
        self.length
    }

    /// Returns whether the value changed.
    pub fn set_auto_resize_collision(&mut self, value: bool) -> bool {
        if self.auto_resize_collision == value {
            return false;
        }
        self.auto_resize_collision = value;
        true
    }

    /// Returns whether the value changed.
    pub fn set_auto_length(&mut self, value: bool) -> bool {
        if self.auto_length == value {
            return false;
        }
        self.auto_length = value;
        true
    }

    /// Returns whether the value changed.
    pub fn set_length(&mut self, value: f32) -> bool {
        if self.length == value {
            return false;
        }
        self.length = value;
        true
    }

    /// Setter for [`ColliderSync::auto_resize_collision`]
    #[must_use]
    pub fn with_auto_resize_collision(mut self, auto_resize_collision: bool) -> Self {
        self.auto_resize_collision = auto_resize_collision;

        self
    }

    /// Setter for [`ColliderSync::auto_length`]
    #[must_use]
    pub fn with_auto_length(mut self, auto_length: bool) -> Self {
        self.auto_length = auto_length;

        self
    }

    /// Setter for [`ColliderSync::length`]
    #[must_use]
    pub fn with_length(mut self, length: f32) -> Self {
        self.length = length;

        self
    }
}

/// Clip-range capability of the camera a sprite is rendered through. World position comes
/// from the entity's ``GlobalTransform``.
#[derive(Component, Reflect, Clone, Copy)]
#[reflect(Component)]
pub struct RenderCamera {
    pub near_clip: f32,
    pub far_clip: f32,
}

impl Default for RenderCamera {
    fn default() -> Self {
        Self {
            near_clip: 0.3,
            far_clip: 1000.0,
        }
    }
}

/// Attach-if-absent collider creation.
///
/// Both operations are no-ops when the entity already holds a [`SpriteCollider`] of either
/// shape. The first synchronization pass after attaching runs on the next update.
pub trait EnsureColliderExt {
    fn ensure_box_collider(&mut self) -> &mut Self;
    fn ensure_mesh_collider(&mut self) -> &mut Self;
}

impl EnsureColliderExt for EntityCommands<'_> {
    fn ensure_box_collider(&mut self) -> &mut Self {
        self.insert_if_new(SpriteCollider::box_shaped())
    }

    fn ensure_mesh_collider(&mut self) -> &mut Self {
        self.insert_if_new(SpriteCollider::mesh_shaped())
    }
}

fn sync_sprite_colliders_system<SP: SyncedSprite>(
    mut sprite_query: Query<
        (&SP, &ColliderSync, &mut SpriteCollider, &GlobalTransform),
        Or<(
            Changed<SP>,
            Changed<ColliderSync>,
            Changed<GlobalTransform>,
            Added<SpriteCollider>,
        )>,
    >,
    camera_query: Query<(&RenderCamera, &GlobalTransform)>,
) {
    #[cfg(feature = "trace")]
    let _span = info_span!("Sync sprite colliders").entered();

    sprite_query
        .iter_mut()
        .for_each(|(sprite, settings, mut sprite_collider, global_transform)| {
            let camera = resolve_camera(sprite.render_camera(), &camera_query);

            update_collider(
                &mut sprite_collider,
                sprite.sprite_mesh(),
                sprite.projection_plane(),
                camera.as_ref(),
                global_transform.translation(),
                settings,
            );
        });
}

fn sync_on_camera_change_system<SP: SyncedSprite>(
    changed_cameras: Query<
        Entity,
        (
            With<RenderCamera>,
            Or<(Changed<RenderCamera>, Changed<GlobalTransform>)>,
        ),
    >,
    mut sprite_query: Query<(&SP, &ColliderSync, &mut SpriteCollider, &GlobalTransform)>,
    camera_query: Query<(&RenderCamera, &GlobalTransform)>,
) {
    let changed: SmallVec<[Entity; 4]> = changed_cameras.iter().collect();
    if changed.is_empty() {
        return;
    }

    for (sprite, settings, mut sprite_collider, global_transform) in sprite_query.iter_mut() {
        let Some(camera_entity) = sprite.render_camera() else {
            continue;
        };
        if !changed.contains(&camera_entity) {
            continue;
        }

        let camera = resolve_camera(Some(camera_entity), &camera_query);
        update_center(
            &mut sprite_collider,
            sprite.projection_plane(),
            camera.as_ref(),
            global_transform.translation(),
            settings,
        );
    }
}

fn resolve_camera(
    camera_entity: Option<Entity>,
    camera_query: &Query<(&RenderCamera, &GlobalTransform)>,
) -> Option<CameraView> {
    let entity = camera_entity?;

    match camera_query.get(entity) {
        Ok((camera, transform)) => Some(CameraView {
            near_clip: camera.near_clip,
            far_clip: camera.far_clip,
            position: transform.translation(),
        }),
        Err(_) => {
            warn!("Sprite render camera {entity} has no RenderCamera component, skipping auto-length synchronization.");
            None
        }
    }
}
