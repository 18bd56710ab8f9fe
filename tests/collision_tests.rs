use glam::Vec3;
use strand::{Bounds, Chain, CollisionResolver, Contact, Particle};

fn resolver() -> CollisionResolver {
    CollisionResolver::new(10.0, Bounds::new(800.0, 600.0))
}

#[test]
fn overlapping_pair_separates_to_min_distance() {
    let mut a = Particle::at_rest(Vec3::new(100.0, 100.0, 0.0));
    let mut b = Particle::at_rest(Vec3::new(112.0, 105.0, 0.0));
    let axis = (b.pos - a.pos).normalize();
    let midpoint = (a.pos + b.pos) * 0.5;

    assert_eq!(resolver().resolve_pair(&mut a, &mut b), Contact::Separated);

    let dist = a.pos.distance(b.pos);
    assert!((dist - 20.0).abs() < 1e-4, "distance after resolve = {}", dist);
    assert!((b.pos - a.pos).normalize().distance(axis) < 1e-5);
    assert!(((a.pos + b.pos) * 0.5).distance(midpoint) < 1e-4);
}

#[test]
fn fixed_particle_does_not_move_in_collision() {
    let mut a = Particle::at_rest(Vec3::new(100.0, 100.0, 0.0));
    let mut b = Particle::at_rest(Vec3::new(106.0, 108.0, 0.0));
    a.set_fixed(true);

    assert_eq!(resolver().resolve_pair(&mut a, &mut b), Contact::Separated);
    assert_eq!(a.pos, Vec3::new(100.0, 100.0, 0.0));
    assert!((a.pos.distance(b.pos) - 20.0).abs() < 1e-4);
}

#[test]
fn distant_coincident_and_pinned_pairs_are_left_alone() {
    let r = resolver();

    let mut a = Particle::at_rest(Vec3::new(0.0, 0.0, 0.0));
    let mut b = Particle::at_rest(Vec3::new(20.0, 0.0, 0.0));
    assert_eq!(r.resolve_pair(&mut a, &mut b), Contact::Clear);
    assert_eq!(b.pos.x, 20.0);

    let mut a = Particle::at_rest(Vec3::splat(50.0));
    let mut b = Particle::at_rest(Vec3::splat(50.0));
    assert_eq!(r.resolve_pair(&mut a, &mut b), Contact::Coincident);
    assert_eq!(a.pos, b.pos);

    let mut a = Particle::at_rest(Vec3::new(0.0, 0.0, 0.0));
    let mut b = Particle::at_rest(Vec3::new(5.0, 0.0, 0.0));
    a.set_fixed(true);
    b.set_fixed(true);
    assert_eq!(r.resolve_pair(&mut a, &mut b), Contact::BothFixed);
    assert_eq!(b.pos.x, 5.0);
}

#[test]
fn self_collision_ignores_adjacent_pairs() {
    // 0, 5, 10 along x: every pair overlaps, only (0, 2) is non-adjacent
    let particles = (0..3).map(|i| Particle::at_rest(Vec3::new(100.0 + i as f32 * 5.0, 300.0, 0.0)));
    let mut chain = Chain::from_particles(5.0, particles);

    assert_eq!(resolver().resolve_self(&mut chain), 1);

    let xs: Vec<f32> = chain.iter().map(|p| p.pos.x).collect();
    assert!((xs[0] - 95.0).abs() < 1e-4, "xs = {:?}", xs);
    assert_eq!(xs[1], 105.0);
    assert!((xs[2] - 115.0).abs() < 1e-4, "xs = {:?}", xs);
}

#[test]
fn cross_chain_particles_separate() {
    let mut a = Chain::from_particles(1.0, [Particle::at_rest(Vec3::new(200.0, 200.0, 0.0))]);
    let mut b = Chain::from_particles(1.0, [Particle::at_rest(Vec3::new(208.0, 200.0, 0.0))]);

    assert_eq!(resolver().resolve_between(&mut a, &mut b), 1);

    let pa = a.head().unwrap().pos;
    let pb = b.head().unwrap().pos;
    assert!((pa.x - 194.0).abs() < 1e-4);
    assert!((pb.x - 214.0).abs() < 1e-4);
}

#[test]
fn wall_clamp_is_exact_and_keeps_previous_position() {
    let r = resolver();
    let mut p = Particle::at_rest(Vec3::new(3.0, 300.0, -50.0));
    p.prev_pos = Vec3::new(8.0, 300.0, -50.0);

    assert!(r.enforce_wall(&mut p));
    assert_eq!(p.pos.x, 10.0);
    assert_eq!(p.pos.y, 300.0);
    assert_eq!(p.pos.z, -50.0);
    assert_eq!(p.prev_pos, Vec3::new(8.0, 300.0, -50.0));
}

#[test]
fn wall_clamp_covers_every_edge() {
    let r = resolver();

    let mut p = Particle::at_rest(Vec3::new(900.0, 700.0, 0.0));
    assert!(r.enforce_wall(&mut p));
    assert_eq!(p.pos, Vec3::new(790.0, 590.0, 0.0));

    let mut p = Particle::at_rest(Vec3::new(400.0, -20.0, 0.0));
    assert!(r.enforce_wall(&mut p));
    assert_eq!(p.pos, Vec3::new(400.0, 10.0, 0.0));

    let mut p = Particle::at_rest(Vec3::new(400.0, 300.0, 0.0));
    assert!(!r.enforce_wall(&mut p));
}

#[test]
fn fixed_particle_ignores_walls() {
    let mut p = Particle::at_rest(Vec3::new(-100.0, -100.0, 0.0));
    p.set_fixed(true);
    assert!(!resolver().enforce_wall(&mut p));
    assert_eq!(p.pos, Vec3::new(-100.0, -100.0, 0.0));
}

#[test]
fn enforce_bounds_counts_clamped_particles() {
    let particles = [
        Particle::at_rest(Vec3::new(0.0, 300.0, 0.0)),
        Particle::at_rest(Vec3::new(400.0, 300.0, 0.0)),
        Particle::at_rest(Vec3::new(810.0, 300.0, 0.0)),
    ];
    let mut chain = Chain::from_particles(1.0, particles);
    assert_eq!(resolver().enforce_bounds(&mut chain), 2);
    let xs: Vec<f32> = chain.iter().map(|p| p.pos.x).collect();
    assert_eq!(xs, vec![10.0, 400.0, 790.0]);
}
