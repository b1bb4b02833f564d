#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Arena Royale.
//!
//! The [`World`] owns the building layout, the agent roster, the projectile
//! set, and the shrinking safe zone. Adapters and systems never mutate it
//! directly; they submit [`Command`] values through [`apply`], which executes
//! them in order and appends the resulting [`Event`] stream. Steering
//! commands are resolved one agent at a time against the current state, so
//! agents later in a batch see the already-updated positions of earlier
//! ones; that sequencing is deliberate and must be preserved for replays.

mod safezone;
mod spawn;

use arena_royale_core::{
    AgentColor, AgentId, AgentSnapshot, AgentView, ArenaConfig, Building, Command, DamageSource,
    Event, Health, ProjectileId, ProjectileImpact, ProjectileSnapshot, ProjectileView, Rect,
    WorldPoint, WorldVec, RNG_STREAM_ROSTER, RNG_STREAM_WORLDGEN, WELCOME_BANNER,
};
use arena_royale_system_movement as movement;
use arena_royale_system_worldgen as worldgen;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};

use safezone::SafeZone;

/// Seed used by [`World::new`] before an explicit configuration arrives.
const DEFAULT_SEED: u64 = 0x4a52_9f3d_91c8_7b15;

const HUMAN_COLOR: AgentColor = AgentColor::from_rgb(0x00, 0x00, 0xff);

/// Represents the authoritative Arena Royale world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    config: ArenaConfig,
    seed: u64,
    buildings: Vec<Building>,
    agents: Vec<Agent>,
    projectiles: Vec<Projectile>,
    safe_zone: SafeZone,
    spawn_rng: ChaCha8Rng,
    next_agent: u32,
    next_projectile: u32,
    tick_index: u64,
    match_over: bool,
}

impl World {
    /// Creates a new world with the default configuration and seed.
    #[must_use]
    pub fn new() -> Self {
        let config = ArenaConfig::default();
        let mut world = Self {
            banner: WELCOME_BANNER,
            config,
            seed: DEFAULT_SEED,
            buildings: Vec::new(),
            agents: Vec::new(),
            projectiles: Vec::new(),
            safe_zone: SafeZone::new(config.world_bounds()),
            spawn_rng: ChaCha8Rng::seed_from_u64(0),
            next_agent: 0,
            next_projectile: 0,
            tick_index: 0,
            match_over: false,
        };
        world.reset(config, DEFAULT_SEED);
        world
    }

    fn reset(&mut self, config: ArenaConfig, seed: u64) {
        let mut generation_rng =
            ChaCha8Rng::seed_from_u64(derive_stream_seed(seed, RNG_STREAM_WORLDGEN));
        self.config = config;
        self.seed = seed;
        self.buildings = worldgen::generate(&config, &mut generation_rng);
        self.agents.clear();
        self.projectiles.clear();
        self.safe_zone = SafeZone::new(config.world_bounds());
        self.spawn_rng = ChaCha8Rng::seed_from_u64(derive_stream_seed(seed, RNG_STREAM_ROSTER));
        self.next_agent = 0;
        self.next_projectile = 0;
        self.tick_index = 0;
        self.match_over = false;
    }

    fn agent_index(&self, agent: AgentId) -> Option<usize> {
        self.agents.iter().position(|entry| entry.id == agent)
    }

    fn spawn_agent(&mut self, position: WorldPoint, is_human: bool, out_events: &mut Vec<Event>) {
        let color = if is_human {
            HUMAN_COLOR
        } else {
            AgentColor::from_rgb(
                self.spawn_rng.gen_range(0..=255),
                self.spawn_rng.gen_range(0..=255),
                self.spawn_rng.gen_range(0..=255),
            )
        };
        let id = AgentId::new(self.next_agent);
        self.next_agent = self.next_agent.saturating_add(1);
        self.agents.push(Agent {
            id,
            position,
            velocity: WorldVec::ZERO,
            facing: 0.0,
            health: Health::new(100),
            is_human,
            fire_cooldown: if is_human {
                self.config.human_fire_cooldown
            } else {
                self.config.ai_fire_cooldown
            },
            view_range: self.config.view_range,
            preferred_distance: self.config.preferred_distance,
            color,
        });
        out_events.push(Event::AgentSpawned {
            agent: id,
            position,
            is_human,
        });
    }

    fn steer_agent(
        &mut self,
        agent: AgentId,
        velocity: WorldVec,
        facing: f32,
        out_events: &mut Vec<Event>,
    ) {
        let Some(index) = self.agent_index(agent) else {
            return;
        };
        let size = self.config.agent_size;
        let cap = self.config.speed_cap(true);

        let others: Vec<Rect> = self
            .agents
            .iter()
            .enumerate()
            .filter(|(other, _)| *other != index)
            .map(|(_, entry)| entry.rect(size))
            .collect();

        let entry = &mut self.agents[index];
        entry.velocity = velocity.clamped(cap);
        entry.facing = facing;

        if entry.velocity.is_zero() {
            return;
        }

        let from = entry.position;
        let outcome =
            movement::resolve_move(from, size, entry.velocity, &self.buildings, &others);
        entry.position = outcome.position;
        entry.velocity = WorldVec::new(
            if outcome.blocked_x { 0.0 } else { entry.velocity.dx() },
            if outcome.blocked_y { 0.0 } else { entry.velocity.dy() },
        );

        out_events.push(Event::AgentMoved {
            agent,
            from,
            to: outcome.position,
            blocked_x: outcome.blocked_x,
            blocked_y: outcome.blocked_y,
        });
    }

    fn fire_projectile(
        &mut self,
        agent: AgentId,
        direction: WorldVec,
        out_events: &mut Vec<Event>,
    ) {
        let Some(index) = self.agent_index(agent) else {
            return;
        };
        let direction = direction.normalized_or_zero();
        if direction.is_zero() {
            return;
        }

        let (origin, velocity) = {
            let entry = &mut self.agents[index];
            if entry.fire_cooldown != 0 {
                return;
            }
            entry.fire_cooldown = if entry.is_human {
                self.config.human_fire_cooldown
            } else {
                self.config.ai_fire_cooldown
            };
            let half = self.config.agent_size / 2.0;
            (
                WorldPoint::new(entry.position.x() + half, entry.position.y() + half),
                direction.scaled(self.config.projectile_speed),
            )
        };

        let id = ProjectileId::new(self.next_projectile);
        self.next_projectile = self.next_projectile.saturating_add(1);
        self.projectiles.push(Projectile {
            id,
            position: origin,
            velocity,
            lifetime: self.config.projectile_lifetime,
            owner: agent,
        });
        out_events.push(Event::ProjectileFired {
            projectile: id,
            owner: agent,
            origin,
            velocity,
        });
    }

    fn advance_tick(&mut self, out_events: &mut Vec<Event>) {
        self.tick_index = self.tick_index.saturating_add(1);
        out_events.push(Event::TimeAdvanced {
            tick: self.tick_index,
        });

        self.advance_safe_zone(out_events);
        self.cool_weapons();
        self.advance_projectiles();
        self.resolve_projectile_collisions(out_events);
        self.prune_expired_projectiles(out_events);
        self.prune_dead_agents();
        self.check_for_winner(out_events);
    }

    fn advance_safe_zone(&mut self, out_events: &mut Vec<Event>) {
        if let Some(area) = self
            .safe_zone
            .advance(self.config.safe_zone_interval, self.config.safe_zone_factor)
        {
            out_events.push(Event::SafeZoneShrunk { area });
        }

        let size = self.config.agent_size;
        let damage = self.config.safe_zone_damage;
        let area = self.safe_zone.area();
        for index in 0..self.agents.len() {
            let rect = self.agents[index].rect(size);
            if !area.contains(&rect) {
                damage_agent(
                    &mut self.agents[index],
                    damage,
                    DamageSource::SafeZone,
                    out_events,
                );
            }
        }
    }

    fn cool_weapons(&mut self) {
        for agent in &mut self.agents {
            agent.fire_cooldown = agent.fire_cooldown.saturating_sub(1);
        }
    }

    fn advance_projectiles(&mut self) {
        for projectile in &mut self.projectiles {
            projectile.position = projectile.position.offset(projectile.velocity);
            projectile.lifetime = projectile.lifetime.saturating_sub(1);
        }
    }

    /// Building hits are tested before agent hits: a projectile overlapping
    /// both a wall and an agent is absorbed by the wall and deals no damage.
    fn resolve_projectile_collisions(&mut self, out_events: &mut Vec<Event>) {
        let projectile_size = self.config.projectile_size;
        let agent_size = self.config.agent_size;
        let damage = self.config.projectile_damage;

        let mut removed: Vec<(usize, ProjectileId, ProjectileImpact)> = Vec::new();
        for index in 0..self.projectiles.len() {
            let rect = self.projectiles[index].rect(projectile_size);
            let id = self.projectiles[index].id;
            let owner = self.projectiles[index].owner;

            if self
                .buildings
                .iter()
                .any(|building| building.collides_with(&rect))
            {
                removed.push((index, id, ProjectileImpact::Wall));
                continue;
            }

            let hit = self
                .agents
                .iter()
                .position(|agent| agent.id != owner && agent.rect(agent_size).intersects(&rect));
            if let Some(victim) = hit {
                let victim_id = self.agents[victim].id;
                damage_agent(
                    &mut self.agents[victim],
                    damage,
                    DamageSource::Projectile { owner },
                    out_events,
                );
                removed.push((index, id, ProjectileImpact::Agent(victim_id)));
            }
        }

        for (index, _, _) in removed.iter().rev() {
            let _ = self.projectiles.remove(*index);
        }
        for (_, projectile, impact) in removed {
            out_events.push(Event::ProjectileRemoved { projectile, impact });
        }
    }

    fn prune_expired_projectiles(&mut self, out_events: &mut Vec<Event>) {
        let mut expired = Vec::new();
        self.projectiles.retain(|projectile| {
            if projectile.lifetime == 0 {
                expired.push(projectile.id);
                false
            } else {
                true
            }
        });
        for projectile in expired {
            out_events.push(Event::ProjectileRemoved {
                projectile,
                impact: ProjectileImpact::Expired,
            });
        }
    }

    fn prune_dead_agents(&mut self) {
        self.agents.retain(|agent| !agent.health.is_depleted());
    }

    fn check_for_winner(&mut self, out_events: &mut Vec<Event>) {
        if self.match_over || self.agents.len() > 1 {
            return;
        }
        self.match_over = true;
        let winner = self.agents.first().map(|agent| agent.id);
        match winner {
            Some(agent) => log::info!("match ended, agent {} wins", agent.get()),
            None => log::info!("match ended with no survivors"),
        }
        out_events.push(Event::MatchEnded { winner });
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureArena { config, seed } => {
            world.reset(config, seed);
            out_events.push(Event::ArenaConfigured {
                seed,
                building_count: world.buildings.len(),
            });
        }
        Command::SpawnRoster => {
            for _ in 0..world.config.ai_agent_count {
                let position = spawn::random_spawn_position(
                    &world.config,
                    &world.buildings,
                    &mut world.spawn_rng,
                );
                world.spawn_agent(position, false, out_events);
            }
            let position = spawn::center_spawn_position(&world.config, &world.buildings);
            world.spawn_agent(position, true, out_events);
        }
        Command::SteerAgent {
            agent,
            velocity,
            facing,
        } => {
            world.steer_agent(agent, velocity, facing, out_events);
        }
        Command::FireProjectile { agent, direction } => {
            world.fire_projectile(agent, direction, out_events);
        }
        Command::Tick => {
            world.advance_tick(out_events);
        }
    }
}

fn damage_agent(
    agent: &mut Agent,
    amount: u32,
    source: DamageSource,
    out_events: &mut Vec<Event>,
) {
    let before = agent.health;
    agent.health = agent.health.damaged(amount);
    out_events.push(Event::AgentDamaged {
        agent: agent.id,
        amount,
        remaining: agent.health,
        source,
    });
    if !before.is_depleted() && agent.health.is_depleted() {
        out_events.push(Event::AgentDied { agent: agent.id });
    }
}

/// Derives a per-subsystem RNG seed from the master seed and a stream label.
fn derive_stream_seed(master: u64, stream: &str) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(stream.as_bytes());
    hasher.update(master.to_le_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(bytes)
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::{AgentSnapshot, AgentView, ProjectileSnapshot, ProjectileView, World};
    use arena_royale_core::{AgentId, ArenaConfig, Building, Rect};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the active configuration.
    #[must_use]
    pub fn config(world: &World) -> &ArenaConfig {
        &world.config
    }

    /// Master seed the current arena layout was derived from.
    #[must_use]
    pub fn seed(world: &World) -> u64 {
        world.seed
    }

    /// Provides read-only access to the generated buildings.
    #[must_use]
    pub fn buildings(world: &World) -> &[Building] {
        &world.buildings
    }

    /// Rectangle of the safe zone currently in effect.
    #[must_use]
    pub fn safe_zone(world: &World) -> Rect {
        world.safe_zone.area()
    }

    /// Index of the last completed tick.
    #[must_use]
    pub fn tick(world: &World) -> u64 {
        world.tick_index
    }

    /// Reports whether at most one agent remains alive.
    #[must_use]
    pub fn is_match_over(world: &World) -> bool {
        world.match_over
    }

    /// The winning agent of a finished match, if any agent survived.
    #[must_use]
    pub fn winner(world: &World) -> Option<AgentId> {
        if world.match_over {
            world.agents.first().map(|agent| agent.id)
        } else {
            None
        }
    }

    /// Captures a read-only view of the living agents.
    #[must_use]
    pub fn agent_view(world: &World) -> AgentView {
        let size = world.config.agent_size;
        let snapshots: Vec<AgentSnapshot> = world
            .agents
            .iter()
            .map(|agent| AgentSnapshot {
                id: agent.id,
                position: agent.position,
                velocity: agent.velocity,
                rect: agent.rect(size),
                health: agent.health,
                facing: agent.facing,
                is_human: agent.is_human,
                view_range: agent.view_range,
                preferred_distance: agent.preferred_distance,
                fire_cooldown: agent.fire_cooldown,
                color: agent.color,
            })
            .collect();
        AgentView::from_snapshots(snapshots)
    }

    /// Captures a read-only view of the live projectiles.
    #[must_use]
    pub fn projectile_view(world: &World) -> ProjectileView {
        let size = world.config.projectile_size;
        let snapshots: Vec<ProjectileSnapshot> = world
            .projectiles
            .iter()
            .map(|projectile| ProjectileSnapshot {
                id: projectile.id,
                position: projectile.position,
                velocity: projectile.velocity,
                rect: projectile.rect(size),
                owner: projectile.owner,
                lifetime: projectile.lifetime,
            })
            .collect();
        ProjectileView::from_snapshots(snapshots)
    }
}

/// Deterministic state scaffolding for integration tests.
///
/// Bypasses random spawn placement so scenarios can pin agents and
/// geometry exactly. Scaffolded agents enter combat-ready, with no
/// initial fire cooldown.
#[cfg(feature = "roster_scaffolding")]
pub mod scaffolding {
    use super::{Agent, Health, World, WorldVec};
    use arena_royale_core::{AgentColor, AgentId, Building, WorldPoint};

    /// Inserts an agent at the exact position, skipping spawn search.
    pub fn place_agent(world: &mut World, position: WorldPoint, is_human: bool) -> AgentId {
        let id = AgentId::new(world.next_agent);
        world.next_agent = world.next_agent.saturating_add(1);
        world.agents.push(Agent {
            id,
            position,
            velocity: WorldVec::ZERO,
            facing: 0.0,
            health: Health::new(100),
            is_human,
            fire_cooldown: 0,
            view_range: world.config.view_range,
            preferred_distance: world.config.preferred_distance,
            color: AgentColor::from_rgb(0x80, 0x80, 0x80),
        });
        id
    }

    /// Adds a hand-built building to the collision set.
    pub fn place_building(world: &mut World, building: Building) {
        world.buildings.push(building);
    }

    /// Removes every generated building.
    pub fn clear_buildings(world: &mut World) {
        world.buildings.clear();
    }
}

#[derive(Clone, Debug)]
struct Agent {
    id: AgentId,
    position: WorldPoint,
    velocity: WorldVec,
    facing: f32,
    health: Health,
    is_human: bool,
    fire_cooldown: u32,
    view_range: f32,
    preferred_distance: f32,
    color: AgentColor,
}

impl Agent {
    fn rect(&self, size: f32) -> Rect {
        Rect::new(self.position.x(), self.position.y(), size, size)
    }
}

#[derive(Clone, Copy, Debug)]
struct Projectile {
    id: ProjectileId,
    position: WorldPoint,
    velocity: WorldVec,
    lifetime: u32,
    owner: AgentId,
}

impl Projectile {
    fn rect(&self, size: f32) -> Rect {
        Rect::new(self.position.x(), self.position.y(), size, size)
    }
}
