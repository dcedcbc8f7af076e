//! Module for debug draws.
use bevy::{
    gizmos::{config::GizmoConfigGroup, AppGizmoBuilder},
    prelude::{
        App, Color, Gizmos, GlobalTransform, IntoScheduleConfigs, Plugin, Query, ReflectResource,
        Res, Resource, Transform, Update,
    },
    reflect::Reflect,
};

use crate::collider::{ColliderShape, SpriteCollider};

pub struct SpriteColliderDebugDrawPlugin;
impl Plugin for SpriteColliderDebugDrawPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DrawColliders>();
        app.register_type::<DrawColliders>();

        app.add_systems(Update, draw_colliders_system.run_if(should_draw_colliders));

        app.init_gizmo_group::<ColliderSyncGroup>();
    }
}

#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct ColliderSyncGroup;

#[derive(Default, Resource, Reflect)]
#[reflect(Resource)]
/// Whether to draw sprite colliders or not.
pub struct DrawColliders(pub bool);

fn should_draw_colliders(draw_colliders: Res<DrawColliders>) -> bool {
    draw_colliders.0
}

fn draw_colliders_system(
    collider_query: Query<(&SpriteCollider, &GlobalTransform)>,
    mut gizmos: Gizmos<ColliderSyncGroup>,
) {
    for (sprite_collider, global_transform) in collider_query.iter() {
        // Mesh colliders borrow the sprite's own geometry, there is nothing extra to show.
        let ColliderShape::BoxShaped { center, size } = sprite_collider.shape() else {
            continue;
        };

        let box_color = Color::srgb(0.0, 1.0, 0.5);
        gizmos.cuboid(
            Transform::from_translation(global_transform.translation() + *center)
                .with_scale(*size),
            box_color,
        );
    }
}
