//! Benchmarks for strand chain simulation.

use criterion::{criterion_group, criterion_main, Criterion};
use glam::Vec3;
use strand::*;

fn bench_single_chain(c: &mut Criterion) {
    c.bench_function("chain_50_particles_60_ticks", |b| {
        b.iter(|| {
            let mut registry = ChainRegistry::new(SimConfig::new().with_iterations(8));
            let id = registry.create_chain(12.0, 50, Vec3::new(100.0, 500.0, 0.0)).unwrap();
            let anchor = registry.particle_handle(id, 0).unwrap();
            registry.toggle_fixed(anchor);
            for _ in 0..60 {
                registry.step(&mut NoOpStepObserver);
            }
            registry.chain(id).map(|chain| chain.positions())
        });
    });
}

fn bench_cross_collisions(c: &mut Criterion) {
    c.bench_function("four_chains_30_particles_60_ticks", |b| {
        b.iter(|| {
            let mut registry = ChainRegistry::default();
            for row in 0..4 {
                let start = Vec3::new(60.0 + row as f32 * 15.0, 520.0 - row as f32 * 10.0, 0.0);
                registry.create_chain(20.0, 30, start).unwrap();
            }
            let mut contacts = 0;
            for _ in 0..60 {
                contacts += registry.step(&mut NoOpStepObserver).cross_contacts;
            }
            contacts
        });
    });
}

fn bench_split_and_rejoin(c: &mut Criterion) {
    c.bench_function("split_rejoin_200_particles", |b| {
        b.iter(|| {
            let chain = Chain::new(5.0, 200, Vec3::ZERO).unwrap();
            let (mut left, right) = chain.split_at(100);
            left.attach_tail(right);
            left.len()
        });
    });
}

criterion_group!(benches, bench_single_chain, bench_cross_collisions, bench_split_and_rejoin);
criterion_main!(benches);
