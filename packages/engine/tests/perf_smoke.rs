use sandfall_engine::{ElementType, World};

#[test]
fn perf_smoke_step() {
    let mut world = World::new(128, 64);
    world.enable_perf_metrics(true);
    world.paint(64, 16, 14, ElementType::Sand.id()).unwrap();
    world.step();
    let stats = world.get_perf_stats();
    assert!(stats.step_ms() >= 0.0);
    assert_eq!(stats.grid_size(), 128 * 64);
    assert!(stats.cells_painted() > 0);
    assert!(stats.non_empty_cells() >= stats.cells_painted());
}

#[test]
fn perf_smoke_particles() {
    let mut world = World::new(96, 96);
    world.enable_perf_metrics(true);
    assert!(world.spawn_particle(10, 48.0, 48.0).unwrap()); // nuke
    world.step();
    let stats = world.get_perf_stats();
    assert_eq!(stats.active_particles(), 1);
    assert!(stats.particle_ms() >= 0.0);
    assert!(stats.composite_ms() >= 0.0);
}
