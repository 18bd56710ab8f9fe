//! Headless run of a scene: ticks the simulation, performs a few edits a
//! user would make with the mouse, and prints chain summaries.
//!
//! ```sh
//! RUST_LOG=debug cargo run --example hanging_chain -- demos/scene.toml
//! ```

use glam::{Vec2, Vec3};
use strand::{ChainRegistry, CollisionStats, SceneConfig, StepObserver};

#[derive(Default)]
struct ContactTally {
    ticks: usize,
    totals: CollisionStats,
}

impl StepObserver for ContactTally {
    fn on_collisions(&mut self, stats: &CollisionStats) {
        self.totals.self_contacts += stats.self_contacts;
        self.totals.cross_contacts += stats.cross_contacts;
        self.totals.wall_clamps += stats.wall_clamps;
    }

    fn on_step_complete(&mut self) {
        self.ticks += 1;
    }
}

fn summarize(registry: &ChainRegistry) {
    for (id, chain) in registry.chains() {
        let pinned = chain.points().filter(|(_, fixed)| *fixed).count();
        let lowest = chain.iter().map(|p| p.pos.y).fold(f32::INFINITY, f32::min);
        println!(
            "{:?}: {} particles, spacing {:.2}, {} pinned, lowest y {:.1}",
            id,
            chain.len(),
            chain.rest_spacing(),
            pinned,
            lowest
        );
    }
}

fn run(registry: &mut ChainRegistry, ticks: usize, tally: &mut ContactTally) {
    for _ in 0..ticks {
        registry.step(tally);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let scene = match std::env::args().nth(1) {
        Some(path) => SceneConfig::load(path)?,
        None => SceneConfig::classic(),
    };
    let mut registry = scene.build()?;
    let mut tally = ContactTally::default();

    run(&mut registry, 200, &mut tally);
    println!("after settling:");
    summarize(&registry);

    // drag out a second rope, pin its first particle, then let it fall
    let rope = registry.create_chain_between(
        Vec3::new(450.0, 550.0, 0.0),
        Vec3::new(700.0, 550.0, 0.0),
        10,
    )?;
    registry.toggle_fixed_near(Vec2::new(450.0, 550.0), 15.0);
    run(&mut registry, 200, &mut tally);

    // cut the new rope in half, let the pieces fall apart, then splice them back
    if let Some((left, right)) = registry.split_chain(rope, 5) {
        run(&mut registry, 100, &mut tally);
        registry.append_chain(left, right);
    }

    // drag the pinned anchor and everything after it
    if let Some(anchor) = registry.nearest_particle(Vec2::new(450.0, 550.0), 15.0) {
        registry.move_particle_by(anchor, Vec3::new(-100.0, 0.0, 0.0), true);
    }
    run(&mut registry, 200, &mut tally);

    println!("after edits:");
    summarize(&registry);
    println!(
        "{} ticks: {} self, {} cross, {} wall contacts",
        tally.ticks, tally.totals.self_contacts, tally.totals.cross_contacts, tally.totals.wall_clamps
    );
    Ok(())
}
