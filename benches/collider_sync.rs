use bevy::prelude::Vec3;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use parry3d::shape::SharedShape;
use sprite_collider_sync::{
    collider::SpriteCollider,
    sprites::ProjectionPlane,
    sync::{update_collider, CameraView},
    ColliderSync,
};

fn sync_single_box_collider() {
    let mesh = SharedShape::cuboid(1.0, 2.0, 3.0);
    let camera = CameraView {
        near_clip: 0.3,
        far_clip: 1000.3,
        position: Vec3::ZERO,
    };
    let settings = ColliderSync::default();

    let mut sprite_collider = SpriteCollider::box_shaped();
    update_collider(
        &mut sprite_collider,
        Some(&mesh),
        ProjectionPlane::XY,
        Some(&camera),
        Vec3::ZERO,
        &settings,
    );

    black_box(sprite_collider);
}

fn sync_many_box_colliders() {
    let mesh = SharedShape::cuboid(1.0, 2.0, 3.0);
    let camera = CameraView {
        near_clip: 0.3,
        far_clip: 1000.3,
        position: Vec3::ZERO,
    };
    let settings = ColliderSync::default();
    let planes = [
        ProjectionPlane::XY,
        ProjectionPlane::XZ,
        ProjectionPlane::ZY,
    ];

    let mut sprite_colliders = vec![SpriteCollider::box_shaped(); 1024];
    for (index, sprite_collider) in sprite_colliders.iter_mut().enumerate() {
        update_collider(
            sprite_collider,
            Some(&mesh),
            planes[index % planes.len()],
            Some(&camera),
            Vec3::new(index as f32, 0.0, 0.0),
            &settings,
        );
    }

    black_box(sprite_colliders);
}

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("Sync Single Box Collider", |b| {
        b.iter(sync_single_box_collider)
    });
    c.bench_function("Sync Many Box Colliders", |b| {
        b.iter(sync_many_box_colliders)
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
