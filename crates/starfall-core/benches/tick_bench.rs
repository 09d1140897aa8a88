use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::Vec2;
use starfall_core::{Angle, CollisionKind, RotationMode, World};

/// Builds a world with `count` ships on a spread-out grid, each moving.
fn build_world(count: u32) -> World {
    let mut world = World::new();
    let mut first = None;
    for i in 0..count {
        let id = world.spawn("ship", CollisionKind::Ship);
        let ship = world.get_mut(id).unwrap();
        #[allow(clippy::cast_precision_loss)]
        let (col, row) = ((i % 32) as f32, (i / 32) as f32);
        ship.set_position(Vec2::new(col * 100.0, row * 100.0));
        ship.transform.size = Vec2::splat(8.0);
        ship.set_speed(10.0);
        ship.set_rotation(Angle::from_degrees(col * 7.0));
        first.get_or_insert(id);
    }
    // Give half the fleet something to chase so the controller runs.
    let target = first.unwrap();
    let ids: Vec<_> = world.ids().collect();
    for id in ids.iter().skip(1).step_by(2) {
        let ship = world.get_mut(*id).unwrap();
        ship.set_rotation_mode(RotationMode::Tracking);
        ship.set_tracking_target(Some(target));
    }
    world
}

fn bench_tick_small(c: &mut Criterion) {
    let mut world = build_world(64);
    c.bench_function("tick_64_entities", |b| {
        b.iter(|| {
            world.tick(black_box(1.0 / 60.0));
        })
    });
}

fn bench_tick_large(c: &mut Criterion) {
    let mut world = build_world(512);
    c.bench_function("tick_512_entities", |b| {
        b.iter(|| {
            world.tick(black_box(1.0 / 60.0));
        })
    });
}

fn bench_sweep_only(c: &mut Criterion) {
    let world = build_world(512);
    c.bench_function("sweep_512_entities", |b| {
        b.iter(|| black_box(world.registry().overlapping_pairs()))
    });
}

criterion_group!(benches, bench_tick_small, bench_tick_large, bench_sweep_only);
criterion_main!(benches);
