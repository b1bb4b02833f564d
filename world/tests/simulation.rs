use arena_royale_core::{
    ArenaConfig, Building, Command, DamageSource, Event, Health, ProjectileImpact, Rect,
    WallSegment, WorldPoint, WorldVec,
};
use arena_royale_world::{apply, query, scaffolding, World};

fn tick(world: &mut World) -> Vec<Event> {
    let mut events = Vec::new();
    apply(world, Command::Tick, &mut events);
    events
}

fn empty_world() -> World {
    let mut world = World::new();
    scaffolding::clear_buildings(&mut world);
    world
}

#[test]
fn projectile_hit_costs_the_victim_exactly_one_damage_packet() {
    let mut world = empty_world();
    let victim = scaffolding::place_agent(&mut world, WorldPoint::new(0.0, 0.0), false);
    let shooter = scaffolding::place_agent(&mut world, WorldPoint::new(0.0, 0.0), false);

    let mut events = Vec::new();
    apply(
        &mut world,
        Command::FireProjectile {
            agent: shooter,
            direction: WorldVec::new(-1.0, 0.0),
        },
        &mut events,
    );
    assert_eq!(query::projectile_view(&world).len(), 1);

    let events = tick(&mut world);

    assert!(events.iter().any(|event| matches!(
        event,
        Event::AgentDamaged {
            agent,
            amount: 35,
            remaining,
            source: DamageSource::Projectile { owner },
        } if *agent == victim && *owner == shooter && *remaining == Health::new(65)
    )));
    assert!(events.iter().any(|event| matches!(
        event,
        Event::ProjectileRemoved {
            impact: ProjectileImpact::Agent(hit),
            ..
        } if *hit == victim
    )));
    assert!(query::projectile_view(&world).is_empty());

    let view = query::agent_view(&world);
    assert_eq!(view.get(victim).unwrap().health, Health::new(65));
    assert_eq!(view.get(shooter).unwrap().health, Health::new(100));
}

#[test]
fn walls_absorb_projectiles_before_agents_take_damage() {
    let mut world = empty_world();
    let wall = Rect::new(40.0, -100.0, 10.0, 300.0);
    scaffolding::place_building(
        &mut world,
        Building::new(wall, false, vec![WallSegment::new(wall)], Vec::new()),
    );

    // The victim's rectangle pokes through the wall so the incoming
    // projectile overlaps both on the same tick.
    let victim = scaffolding::place_agent(&mut world, WorldPoint::new(15.0, 0.0), false);
    let shooter = scaffolding::place_agent(&mut world, WorldPoint::new(100.0, 0.0), false);

    let mut events = Vec::new();
    apply(
        &mut world,
        Command::FireProjectile {
            agent: shooter,
            direction: WorldVec::new(-1.0, 0.0),
        },
        &mut events,
    );

    let mut wall_hit = false;
    for _ in 0..20 {
        let events = tick(&mut world);
        assert!(
            !events
                .iter()
                .any(|event| matches!(event, Event::AgentDamaged { .. })),
            "the wall must absorb the projectile before any damage lands"
        );
        if events.iter().any(|event| {
            matches!(
                event,
                Event::ProjectileRemoved {
                    impact: ProjectileImpact::Wall,
                    ..
                }
            )
        }) {
            wall_hit = true;
            break;
        }
    }

    assert!(wall_hit, "projectile never reached the wall");
    let view = query::agent_view(&world);
    assert_eq!(view.get(victim).unwrap().health, Health::new(100));
}

#[test]
fn agents_outside_the_safe_zone_bleed_health() {
    let mut world = empty_world();
    let straggler = scaffolding::place_agent(&mut world, WorldPoint::new(-100.0, -100.0), false);
    let _bystander = scaffolding::place_agent(&mut world, WorldPoint::new(500.0, 500.0), false);

    let events = tick(&mut world);

    assert!(events.iter().any(|event| matches!(
        event,
        Event::AgentDamaged {
            agent,
            amount: 1,
            source: DamageSource::SafeZone,
            ..
        } if *agent == straggler
    )));
    let view = query::agent_view(&world);
    assert_eq!(view.get(straggler).unwrap().health, Health::new(99));
}

#[test]
fn the_safe_zone_shrinks_on_schedule() {
    let mut world = World::new();
    let config = ArenaConfig {
        safe_zone_interval: 5,
        ..ArenaConfig::default()
    };
    let mut events = Vec::new();
    apply(
        &mut world,
        Command::ConfigureArena { config, seed: 1 },
        &mut events,
    );

    for _ in 0..4 {
        let events = tick(&mut world);
        assert!(!events
            .iter()
            .any(|event| matches!(event, Event::SafeZoneShrunk { .. })));
    }

    let events = tick(&mut world);
    let area = events
        .iter()
        .find_map(|event| match event {
            Event::SafeZoneShrunk { area } => Some(*area),
            _ => None,
        })
        .expect("fifth tick shrinks the zone");

    assert_eq!(area, Rect::new(150.0, 150.0, 2700.0, 2700.0));
    assert_eq!(query::safe_zone(&world), area);
}

#[test]
fn expired_projectiles_are_pruned() {
    let mut world = World::new();
    let config = ArenaConfig {
        projectile_lifetime: 3,
        ..ArenaConfig::default()
    };
    let mut events = Vec::new();
    apply(
        &mut world,
        Command::ConfigureArena { config, seed: 2 },
        &mut events,
    );
    scaffolding::clear_buildings(&mut world);
    let shooter = scaffolding::place_agent(&mut world, WorldPoint::new(500.0, 500.0), false);

    apply(
        &mut world,
        Command::FireProjectile {
            agent: shooter,
            direction: WorldVec::new(1.0, 0.0),
        },
        &mut events,
    );

    let _ = tick(&mut world);
    let _ = tick(&mut world);
    assert_eq!(query::projectile_view(&world).len(), 1);

    let events = tick(&mut world);
    assert!(events.iter().any(|event| matches!(
        event,
        Event::ProjectileRemoved {
            impact: ProjectileImpact::Expired,
            ..
        }
    )));
    assert!(query::projectile_view(&world).is_empty());
}

#[test]
fn firing_is_gated_by_the_cooldown() {
    let mut world = empty_world();
    let shooter = scaffolding::place_agent(&mut world, WorldPoint::new(500.0, 500.0), false);

    let mut events = Vec::new();
    apply(
        &mut world,
        Command::FireProjectile {
            agent: shooter,
            direction: WorldVec::new(1.0, 0.0),
        },
        &mut events,
    );
    apply(
        &mut world,
        Command::FireProjectile {
            agent: shooter,
            direction: WorldVec::new(1.0, 0.0),
        },
        &mut events,
    );

    // The second shot lands inside the fresh cooldown window.
    assert_eq!(query::projectile_view(&world).len(), 1);
    assert_eq!(
        query::agent_view(&world).get(shooter).unwrap().fire_cooldown,
        60
    );
}

#[test]
fn a_last_survivor_ends_the_match() {
    let mut world = empty_world();
    let survivor = scaffolding::place_agent(&mut world, WorldPoint::new(500.0, 500.0), true);

    let events = tick(&mut world);

    assert!(events.iter().any(|event| matches!(
        event,
        Event::MatchEnded { winner: Some(agent) } if *agent == survivor
    )));
    assert!(query::is_match_over(&world));
    assert_eq!(query::winner(&world), Some(survivor));

    // The terminal event fires exactly once.
    let events = tick(&mut world);
    assert!(!events
        .iter()
        .any(|event| matches!(event, Event::MatchEnded { .. })));
}

#[test]
fn roster_spawns_clear_of_buildings() {
    let mut world = World::new();
    let mut events = Vec::new();
    apply(
        &mut world,
        Command::ConfigureArena {
            config: ArenaConfig::default(),
            seed: 13,
        },
        &mut events,
    );
    apply(&mut world, Command::SpawnRoster, &mut events);

    let view = query::agent_view(&world);
    assert_eq!(view.len(), 10);
    assert_eq!(view.iter().filter(|agent| agent.is_human).count(), 1);

    for agent in view.iter() {
        for building in query::buildings(&world) {
            assert!(
                !building.collides_with(&agent.rect),
                "agent {} spawned inside a building",
                agent.id.get()
            );
        }
    }
}

#[test]
fn steering_respects_walls_and_zeroes_blocked_velocity() {
    let mut world = empty_world();
    let wall = Rect::new(533.0, 400.0, 10.0, 300.0);
    scaffolding::place_building(
        &mut world,
        Building::new(wall, false, vec![WallSegment::new(wall)], Vec::new()),
    );
    let agent = scaffolding::place_agent(&mut world, WorldPoint::new(500.0, 500.0), true);

    let mut events = Vec::new();
    apply(
        &mut world,
        Command::SteerAgent {
            agent,
            velocity: WorldVec::new(2.0, 1.0),
            facing: 0.0,
        },
        &mut events,
    );

    let moved = events
        .iter()
        .find_map(|event| match event {
            Event::AgentMoved {
                to,
                blocked_x,
                blocked_y,
                ..
            } => Some((*to, *blocked_x, *blocked_y)),
            _ => None,
        })
        .expect("steering emits a movement event");

    assert_eq!(moved.0, WorldPoint::new(500.0, 501.0));
    assert!(moved.1);
    assert!(!moved.2);

    let snapshot = query::agent_view(&world);
    let snapshot = snapshot.get(agent).unwrap();
    assert_eq!(snapshot.velocity, WorldVec::new(0.0, 1.0));
}
