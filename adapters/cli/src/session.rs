//! Fixed-tick match session wiring the pure systems to the world.
//!
//! Every tick the session snapshots the world, lets targeting, steering and
//! combat emit their command batches from that pre-tick snapshot, appends
//! the clock tick, and applies the whole batch in order. Steering commands
//! are ordered by agent id, so the world resolves agents one at a time and
//! later agents see earlier agents' updated positions within the tick.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use arena_royale_core::{ArenaConfig, Command, Event, WorldPoint};
use arena_royale_rendering::{
    Camera, Color, FrameReport, Palette, Presentation, RenderingBackend, Scene, SceneAgent,
    SceneProjectile,
};
use arena_royale_rendering_macroquad::{MacroquadBackend, Theme};
use arena_royale_system_combat::{Combat, FireIntent};
use arena_royale_system_steering::{HumanIntent, Steering};
use arena_royale_system_targeting::{AgentTarget, Targeting};
use arena_royale_world::{apply, query, World};

const WINDOW_TITLE: &str = "Arena Royale";
const FULL_HEALTH: f32 = 100.0;

pub(crate) struct Session {
    world: World,
    targeting: Targeting,
    steering: Steering,
    combat: Combat,
    targets: Vec<AgentTarget>,
    commands: Vec<Command>,
    events: Vec<Event>,
}

impl Session {
    pub(crate) fn new(config: ArenaConfig, seed: u64) -> Self {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::ConfigureArena { config, seed },
            &mut events,
        );
        apply(&mut world, Command::SpawnRoster, &mut events);
        log::info!(
            "{} seed={seed} buildings={} agents={}",
            query::welcome_banner(&world),
            query::buildings(&world).len(),
            query::agent_view(&world).len(),
        );

        Self {
            world,
            targeting: Targeting::new(),
            steering: Steering::new(),
            combat: Combat::new(),
            targets: Vec::new(),
            commands: Vec::new(),
            events: Vec::new(),
        }
    }

    pub(crate) fn world(&self) -> &World {
        &self.world
    }

    /// Advances the simulation by exactly one tick, returning the events
    /// the world broadcast while processing it.
    pub(crate) fn advance_tick(&mut self, intent: HumanIntent, fire: FireIntent) -> &[Event] {
        self.events.clear();
        if query::is_match_over(&self.world) {
            return &self.events;
        }

        let view = query::agent_view(&self.world);
        self.targeting.handle(&view, &mut self.targets);

        self.commands.clear();
        self.steering.handle(
            &view,
            &self.targets,
            intent,
            query::config(&self.world),
            &mut self.commands,
        );
        self.combat
            .handle(&view, &self.targets, fire, &mut self.commands);
        self.commands.push(Command::Tick);

        for command in self.commands.drain(..) {
            apply(&mut self.world, command, &mut self.events);
        }
        &self.events
    }
}

/// Runs the match without a window for at most `ticks` ticks and prints a
/// short summary.
pub(crate) fn run_headless(config: ArenaConfig, seed: u64, ticks: u64) -> Result<()> {
    let mut session = Session::new(config, seed);

    for _ in 0..ticks {
        let events = session.advance_tick(HumanIntent::default(), FireIntent::default());
        if events
            .iter()
            .any(|event| matches!(event, Event::MatchEnded { .. }))
        {
            break;
        }
    }

    let world = session.world();
    let survivors = query::agent_view(world).len();
    println!(
        "simulated {} ticks, {survivors} agents standing",
        query::tick(world)
    );
    match query::winner(world) {
        Some(agent) => println!("winner: agent {}", agent.get()),
        None if survivors > 1 => println!("no winner yet"),
        None => println!("no survivors"),
    }
    Ok(())
}

/// Runs the match in a macroquad window at the configured tick rate.
pub(crate) fn run_windowed(
    config: ArenaConfig,
    seed: u64,
    vsync: bool,
    show_fps: bool,
    theme_path: Option<PathBuf>,
) -> Result<()> {
    let palette = match theme_path {
        Some(path) => Theme::load(&path)?.palette(),
        None => Palette::default(),
    };

    let mut session = Session::new(config, seed);
    let tick_duration = Duration::from_secs_f32(1.0 / config.tick_rate.max(1) as f32);
    let mut accumulator = Duration::ZERO;

    let mut scene = Scene {
        camera: Camera::new(800.0, 600.0),
        ..Scene::default()
    };
    populate_scene(&session, &mut scene);

    let presentation = Presentation {
        window_title: WINDOW_TITLE.to_owned(),
        palette,
        scene: scene.clone(),
    };

    let backend = MacroquadBackend::new()
        .with_vsync(vsync)
        .with_show_fps(show_fps);
    backend.run(presentation, move |frame_dt, input, scene| {
        let started = Instant::now();

        // Cap runaway frames so a window drag cannot trigger a tick spiral.
        accumulator += frame_dt.min(Duration::from_millis(250));
        while accumulator >= tick_duration {
            accumulator -= tick_duration;

            let cursor_world = input.cursor_screen.map(|cursor| {
                let world = scene.camera.screen_to_world(cursor);
                WorldPoint::new(world.x, world.y)
            });
            let intent = HumanIntent {
                up: input.move_up,
                down: input.move_down,
                left: input.move_left,
                right: input.move_right,
                sprint: input.sprint,
                cursor_world,
            };
            let fire = FireIntent {
                trigger: input.fire,
                cursor_world,
            };
            let _ = session.advance_tick(intent, fire);
        }

        populate_scene(&session, scene);
        FrameReport {
            simulation: started.elapsed(),
            exit_requested: false,
        }
    })
}

fn populate_scene(session: &Session, scene: &mut Scene) {
    let world = session.world();

    scene.walls.clear();
    scene.doors.clear();
    for building in query::buildings(world) {
        for wall in building.walls() {
            scene.walls.push(wall.rect());
        }
        for door in building.doors() {
            scene.doors.push(door.rect());
        }
    }

    let view = query::agent_view(world);
    scene.agents.clear();
    for agent in view.iter() {
        scene.agents.push(SceneAgent {
            rect: agent.rect,
            facing: agent.facing,
            health_fraction: agent.health.get() as f32 / FULL_HEALTH,
            is_human: agent.is_human,
            color: Color::from_rgb_u8(agent.color.red(), agent.color.green(), agent.color.blue()),
        });
    }

    scene.projectiles.clear();
    for projectile in query::projectile_view(world).iter() {
        scene.projectiles.push(SceneProjectile {
            rect: projectile.rect,
        });
    }

    scene.safe_zone = Some(query::safe_zone(world));

    let focus = view
        .human()
        .map(|human| human.rect)
        .or_else(|| query::winner(world).and_then(|id| view.get(id).map(|agent| agent.rect)));
    if let Some(rect) = focus {
        scene.camera.follow(rect.center_x(), rect.center_y());
    }

    scene.banner = if query::is_match_over(world) {
        Some(match query::winner(world) {
            Some(_) => "Winner!".to_owned(),
            None => "No survivors".to_owned(),
        })
    } else {
        None
    };

    scene.debug_coords = view
        .human()
        .map(|human| (human.position.x(), human.position.y()));
}
