/// Performance benchmarks for the per-frame tracking paths
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::{Quat, Vec2, Vec3};
use imagetrack_core::{
    ar::gesture_recognition::delta_angle, ArSession, ContentDescriptor, ContentPart, Frame, Pose,
    SpawnRule, TargetsChanged, Touch, TrackedTarget, TrackerConfig, TrackingState,
};

fn config_with_targets(count: usize) -> TrackerConfig {
    let mut config = TrackerConfig::default();
    for i in 0..count {
        let content = ContentDescriptor::new(format!("model-{}", i))
            .with_part(ContentPart::new("body", Vec3::new(0.0, 0.05, 0.0)).with_radius(0.05))
            .with_part(ContentPart::new("head", Vec3::new(0.0, 0.12, 0.0)).with_parent(0));
        config = config.with_rule(SpawnRule::new(format!("image-{}", i), content));
    }
    config
}

fn targets(count: usize, state: TrackingState) -> Vec<TrackedTarget> {
    (0..count)
        .map(|i| {
            let position = Vec3::new(i as f32 * 0.3 - 1.5, 0.0, -2.0);
            TrackedTarget::new(format!("image-{}", i), Pose::from_position(position), state)
        })
        .collect()
}

fn spawn_all(session: &mut ArSession) {
    let added = TargetsChanged::added(targets(10, TrackingState::Tracking));
    session.tick(&Frame::new(0.016).with_targets(added));
}

fn benchmark_lifecycle(c: &mut Criterion) {
    c.bench_function("spawn_and_remove_10_targets", |b| {
        let config = config_with_targets(10);
        b.iter(|| {
            let mut session = ArSession::new(&config);
            spawn_all(&mut session);
            let removed = TargetsChanged::removed(targets(10, TrackingState::None));
            black_box(session.tick(&Frame::new(0.016).with_targets(removed)))
        });
    });

    c.bench_function("update_10_targets", |b| {
        let config = config_with_targets(10);
        let mut session = ArSession::new(&config);
        spawn_all(&mut session);
        let updated = TargetsChanged::updated(targets(10, TrackingState::Tracking));
        let frame = Frame::new(0.016).with_targets(updated);

        b.iter(|| black_box(session.tick(black_box(&frame))));
    });
}

fn benchmark_gestures(c: &mut Criterion) {
    let config = config_with_targets(10);
    let center = config.camera.viewport * 0.5;

    c.bench_function("select_with_10_entities", |b| {
        let mut session = ArSession::new(&config);
        spawn_all(&mut session);
        let down = Frame::new(0.016).with_touches([Touch::began(0, center)]);
        let up = Frame::new(0.016);

        b.iter(|| {
            black_box(session.tick(&down));
            black_box(session.tick(&up));
        });
    });

    c.bench_function("two_finger_twist", |b| {
        let mut session = ArSession::new(&config);
        spawn_all(&mut session);
        session.tick(&Frame::new(0.016).with_touches([
            Touch::began(0, center),
            Touch::began(1, center + Vec2::new(100.0, 0.0)),
        ]));
        let twist = Frame::new(0.016).with_touches([
            Touch::moved(0, center + Vec2::new(0.0, -5.0), Vec2::new(0.0, -5.0)),
            Touch::moved(1, center + Vec2::new(100.0, 5.0), Vec2::new(0.0, 5.0)),
        ]);

        b.iter(|| black_box(session.tick(black_box(&twist))));
    });
}

fn benchmark_angle_math(c: &mut Criterion) {
    c.bench_function("delta_angle_sweep", |b| {
        b.iter(|| {
            let mut total = 0.0;
            for i in 0..360 {
                total += delta_angle(black_box(170.0), i as f32 - 180.0);
            }
            black_box(total)
        });
    });

    c.bench_function("quat_compose", |b| {
        let start = Quat::from_rotation_x(0.3);
        b.iter(|| {
            let mut rotation = start;
            for _ in 0..100 {
                rotation = Quat::from_euler(glam::EulerRot::YXZ, 0.01, 0.002, -0.003) * rotation;
            }
            black_box(rotation.normalize())
        });
    });
}

criterion_group!(
    benches,
    benchmark_lifecycle,
    benchmark_gestures,
    benchmark_angle_math
);

criterion_main!(benches);
