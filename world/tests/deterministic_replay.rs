use arena_royale_core::{AgentId, ArenaConfig, Command, Event, WorldVec};
use arena_royale_world::{apply, query, World};

fn script() -> Vec<Command> {
    let mut commands = vec![
        Command::ConfigureArena {
            config: ArenaConfig::default(),
            seed: 0xdead_beef,
        },
        Command::SpawnRoster,
    ];

    for round in 0..120u32 {
        for agent in 0..10u32 {
            let angle = (round + agent) as f32 * 0.37;
            commands.push(Command::SteerAgent {
                agent: AgentId::new(agent),
                velocity: WorldVec::new(angle.cos() * 2.0, angle.sin() * 2.0),
                facing: angle,
            });
            if round % 30 == 0 {
                commands.push(Command::FireProjectile {
                    agent: AgentId::new(agent),
                    direction: WorldVec::new(angle.sin(), angle.cos()),
                });
            }
        }
        commands.push(Command::Tick);
    }

    commands
}

fn run(commands: &[Command]) -> (Vec<Event>, World) {
    let mut world = World::new();
    let mut events = Vec::new();
    for command in commands {
        apply(&mut world, command.clone(), &mut events);
    }
    (events, world)
}

#[test]
fn identical_command_logs_replay_identically() {
    let commands = script();
    let (first_events, first_world) = run(&commands);
    let (second_events, second_world) = run(&commands);

    assert_eq!(first_events, second_events);
    assert_eq!(
        query::agent_view(&first_world).into_vec(),
        query::agent_view(&second_world).into_vec()
    );
    assert_eq!(
        query::projectile_view(&first_world).into_vec(),
        query::projectile_view(&second_world).into_vec()
    );
    assert_eq!(
        query::buildings(&first_world),
        query::buildings(&second_world)
    );
    assert_eq!(query::safe_zone(&first_world), query::safe_zone(&second_world));
}

#[test]
fn different_seeds_produce_different_arenas() {
    let mut first = World::new();
    let mut second = World::new();
    let mut events = Vec::new();

    apply(
        &mut first,
        Command::ConfigureArena {
            config: ArenaConfig::default(),
            seed: 1,
        },
        &mut events,
    );
    apply(
        &mut second,
        Command::ConfigureArena {
            config: ArenaConfig::default(),
            seed: 2,
        },
        &mut events,
    );

    assert_ne!(query::buildings(&first), query::buildings(&second));
}
