use bevy::{
    ecs::{component::Component, entity::Entity},
    reflect::Reflect,
};
use parry3d::shape::SharedShape;

/// The trait to implement for the sprite-plane component whose collider should be kept in sync.
/// Essentially it allows you to use any bevy component that exposes an axis-aligned projection
/// plane and a `parry3d::shape::SharedShape` mesh as the sprite the collider is fitted to.
///
/// See the tests for how to implement this trait for a custom component that wraps a
/// `parry3d::shape::SharedShape`.
pub trait SyncedSprite: Component {
    /// The world-axis-aligned plane the sprite's quad lies in.
    fn projection_plane(&self) -> ProjectionPlane;

    /// The sprite's realized mesh. Return ``None`` while the sprite has no mesh yet;
    /// size synchronization is skipped until one exists.
    fn sprite_mesh(&self) -> Option<&SharedShape>;

    /// The entity holding the [`RenderCamera`](crate::RenderCamera) this sprite is rendered
    /// through, if any. Auto-length synchronization is skipped without one.
    fn render_camera(&self) -> Option<Entity>;
}

/// The world-axis-aligned plane a sprite is oriented along. The remaining world axis is the
/// sprite's depth axis.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum ProjectionPlane {
    #[default]
    XY,
    XZ,
    ZY,
}
