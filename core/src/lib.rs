#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Arena Royale engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to the arena.";

/// Stream label used to derive the building-generation RNG seed.
pub const RNG_STREAM_WORLDGEN: &str = "worldgen";

/// Stream label used to derive the roster-spawning RNG seed.
pub const RNG_STREAM_ROSTER: &str = "roster";

/// Axis-aligned rectangle expressed in floating-point world units.
///
/// Invariant: `width >= 0` and `height >= 0`. All collision semantics follow
/// the strict-overlap convention: rectangles that merely share an edge do not
/// intersect, and zero-area rectangles never intersect anything.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

impl Rect {
    /// Creates a new rectangle from its top-left corner and dimensions.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Horizontal coordinate of the left edge.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical coordinate of the top edge.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Width of the rectangle in world units.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Height of the rectangle in world units.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// Horizontal coordinate of the left edge.
    #[must_use]
    pub const fn left(&self) -> f32 {
        self.x
    }

    /// Horizontal coordinate one past the right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Vertical coordinate of the top edge.
    #[must_use]
    pub const fn top(&self) -> f32 {
        self.y
    }

    /// Vertical coordinate one past the bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Horizontal coordinate of the rectangle's center.
    #[must_use]
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Vertical coordinate of the rectangle's center.
    #[must_use]
    pub fn center_y(&self) -> f32 {
        self.y + self.height / 2.0
    }

    /// Center of the rectangle as a world point.
    #[must_use]
    pub fn center(&self) -> WorldPoint {
        WorldPoint::new(self.center_x(), self.center_y())
    }

    /// Reports whether the two rectangles overlap with positive area.
    #[must_use]
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.width <= 0.0 || self.height <= 0.0 || other.width <= 0.0 || other.height <= 0.0 {
            return false;
        }

        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Reports whether `other` lies completely inside this rectangle.
    ///
    /// Shared borders count as contained.
    #[must_use]
    pub fn contains(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.right() <= self.right()
            && other.y >= self.y
            && other.bottom() <= self.bottom()
    }

    /// Returns a copy grown by the full `dx`/`dy` amounts while keeping the
    /// same center. Dimensions are floored at zero to uphold the invariant.
    #[must_use]
    pub fn inflated(&self, dx: f32, dy: f32) -> Self {
        let width = (self.width + dx).max(0.0);
        let height = (self.height + dy).max(0.0);
        Self {
            x: self.center_x() - width / 2.0,
            y: self.center_y() - height / 2.0,
            width,
            height,
        }
    }

    /// Returns the smallest rectangle covering both operands.
    #[must_use]
    pub fn union(&self, other: &Rect) -> Self {
        let left = self.x.min(other.x);
        let top = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Self {
            x: left,
            y: top,
            width: right - left,
            height: bottom - top,
        }
    }

    /// Returns the overlapping region of the two rectangles, if any.
    #[must_use]
    pub fn clipped(&self, other: &Rect) -> Option<Rect> {
        if !self.intersects(other) {
            return None;
        }

        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Some(Self {
            x: left,
            y: top,
            width: right - left,
            height: bottom - top,
        })
    }

    /// Returns a copy translated by the provided offsets.
    #[must_use]
    pub fn offset(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            width: self.width,
            height: self.height,
        }
    }

    /// Area of the rectangle in square world units.
    #[must_use]
    pub fn area(&self) -> f32 {
        self.width * self.height
    }
}

/// Position expressed in floating-point world coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldPoint {
    x: f32,
    y: f32,
}

impl WorldPoint {
    /// Creates a new world point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Horizontal coordinate of the point.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical coordinate of the point.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Returns a copy translated by the provided vector.
    #[must_use]
    pub fn offset(&self, delta: WorldVec) -> Self {
        Self {
            x: self.x + delta.dx(),
            y: self.y + delta.dy(),
        }
    }

    /// Vector pointing from this point to `other`.
    #[must_use]
    pub fn vector_to(&self, other: WorldPoint) -> WorldVec {
        WorldVec::new(other.x - self.x, other.y - self.y)
    }

    /// Euclidean distance between two points.
    #[must_use]
    pub fn distance_to(&self, other: WorldPoint) -> f32 {
        self.vector_to(other).length()
    }
}

/// Displacement or velocity expressed in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldVec {
    dx: f32,
    dy: f32,
}

impl WorldVec {
    /// The zero vector.
    pub const ZERO: WorldVec = WorldVec::new(0.0, 0.0);

    /// Creates a new vector from its components.
    #[must_use]
    pub const fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }

    /// Horizontal component of the vector.
    #[must_use]
    pub const fn dx(&self) -> f32 {
        self.dx
    }

    /// Vertical component of the vector.
    #[must_use]
    pub const fn dy(&self) -> f32 {
        self.dy
    }

    /// Euclidean length of the vector.
    #[must_use]
    pub fn length(&self) -> f32 {
        (self.dx * self.dx + self.dy * self.dy).sqrt()
    }

    /// Reports whether both components are exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.dx == 0.0 && self.dy == 0.0
    }

    /// Returns a unit-length copy, or the zero vector for degenerate input.
    #[must_use]
    pub fn normalized_or_zero(&self) -> Self {
        let length = self.length();
        if length <= f32::EPSILON {
            return Self::ZERO;
        }
        Self {
            dx: self.dx / length,
            dy: self.dy / length,
        }
    }

    /// Returns a copy scaled by the provided factor.
    #[must_use]
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            dx: self.dx * factor,
            dy: self.dy * factor,
        }
    }

    /// Returns a copy whose length is clamped to `max_length`.
    #[must_use]
    pub fn clamped(&self, max_length: f32) -> Self {
        let length = self.length();
        if length <= max_length || length <= f32::EPSILON {
            return *self;
        }
        self.scaled(max_length / length)
    }

    /// Angle of the vector in radians, measured via `atan2`.
    #[must_use]
    pub fn angle(&self) -> f32 {
        self.dy.atan2(self.dx)
    }
}

/// Sides of an axis-aligned rectangle, used for door placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// The top edge, toward decreasing y.
    North,
    /// The right edge, toward increasing x.
    East,
    /// The bottom edge, toward increasing y.
    South,
    /// The left edge, toward decreasing x.
    West,
}

impl Side {
    /// All four sides in the canonical north/east/south/west order.
    pub const ALL: [Side; 4] = [Side::North, Side::East, Side::South, Side::West];

    /// Maps a numeric draw onto a side, wrapping modulo four.
    #[must_use]
    pub const fn from_index(value: u32) -> Self {
        match value % 4 {
            0 => Side::North,
            1 => Side::East,
            2 => Side::South,
            _ => Side::West,
        }
    }
}

/// Unique identifier assigned to an agent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AgentId(u32);

impl AgentId {
    /// Creates a new agent identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectileId(u32);

impl ProjectileId {
    /// Creates a new projectile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Hit points of an agent, floored at zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Health(u32);

impl Health {
    /// Creates a new health value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the remaining hit points.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Returns a copy reduced by `amount`, saturating at zero.
    #[must_use]
    pub const fn damaged(&self, amount: u32) -> Self {
        Self(self.0.saturating_sub(amount))
    }

    /// Reports whether the hit points have run out.
    #[must_use]
    pub const fn is_depleted(&self) -> bool {
        self.0 == 0
    }
}

/// Visual appearance applied to an agent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AgentColor {
    red: u8,
    green: u8,
    blue: u8,
}

impl AgentColor {
    /// Creates a new agent color from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Red component of the color.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the color.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the color.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }
}

/// Solid wall piece owned by a building. Blocks movement and projectiles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallSegment {
    rect: Rect,
}

impl WallSegment {
    /// Creates a new wall segment covering the provided rectangle.
    #[must_use]
    pub const fn new(rect: Rect) -> Self {
        Self { rect }
    }

    /// Rectangle covered by the segment.
    #[must_use]
    pub const fn rect(&self) -> Rect {
        self.rect
    }
}

/// Passable opening in a building perimeter. Never collision-tested; kept so
/// renderers can distinguish carved wall from open floor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DoorGap {
    rect: Rect,
}

impl DoorGap {
    /// Creates a new door gap covering the provided rectangle.
    #[must_use]
    pub const fn new(rect: Rect) -> Self {
        Self { rect }
    }

    /// Rectangle covered by the gap.
    #[must_use]
    pub const fn rect(&self) -> Rect {
        self.rect
    }
}

/// Room footprint within a complex building plus its interior door flags.
///
/// Consumed once during building synthesis, then discarded.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SubRoom {
    rect: Rect,
    has_door_north: bool,
    has_door_east: bool,
    has_door_south: bool,
    has_door_west: bool,
}

impl SubRoom {
    /// Creates a new sub-room description.
    #[must_use]
    pub const fn new(
        rect: Rect,
        has_door_north: bool,
        has_door_east: bool,
        has_door_south: bool,
        has_door_west: bool,
    ) -> Self {
        Self {
            rect,
            has_door_north,
            has_door_east,
            has_door_south,
            has_door_west,
        }
    }

    /// Footprint of the room.
    #[must_use]
    pub const fn rect(&self) -> Rect {
        self.rect
    }

    /// Reports whether the given side opens into a neighboring room.
    #[must_use]
    pub const fn has_door(&self, side: Side) -> bool {
        match side {
            Side::North => self.has_door_north,
            Side::East => self.has_door_east,
            Side::South => self.has_door_south,
            Side::West => self.has_door_west,
        }
    }
}

/// Immutable building assembled by the generator at world setup.
///
/// Invariant: wall segments plus door gaps tile the wall-thickness band of
/// every perimeter (and interior room boundary) with no gaps except at doors
/// and no overlaps between adjacent segments.
#[derive(Clone, Debug, PartialEq)]
pub struct Building {
    bounding: Rect,
    is_complex: bool,
    walls: Vec<WallSegment>,
    doors: Vec<DoorGap>,
}

impl Building {
    /// Creates a building from already-synthesized geometry.
    #[must_use]
    pub fn new(
        bounding: Rect,
        is_complex: bool,
        walls: Vec<WallSegment>,
        doors: Vec<DoorGap>,
    ) -> Self {
        Self {
            bounding,
            is_complex,
            walls,
            doors,
        }
    }

    /// Outer bounding rectangle of the building.
    #[must_use]
    pub const fn bounding(&self) -> Rect {
        self.bounding
    }

    /// Reports whether the building was merged from several rooms.
    #[must_use]
    pub const fn is_complex(&self) -> bool {
        self.is_complex
    }

    /// Solid wall segments composing the building.
    #[must_use]
    pub fn walls(&self) -> &[WallSegment] {
        &self.walls
    }

    /// Passable door gaps carved into the building.
    #[must_use]
    pub fn doors(&self) -> &[DoorGap] {
        &self.doors
    }

    /// Reports whether the rectangle overlaps any wall segment.
    ///
    /// Door gaps are never tested; a rectangle exactly covering a door gap
    /// does not collide.
    #[must_use]
    pub fn collides_with(&self, rect: &Rect) -> bool {
        self.walls.iter().any(|wall| wall.rect().intersects(rect))
    }
}

/// Tunable parameters that define an arena match.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArenaConfig {
    /// Width of the world in world units.
    pub world_width: f32,
    /// Height of the world in world units.
    pub world_height: f32,
    /// Side length of every agent's square bounding rectangle.
    pub agent_size: f32,
    /// Thickness of every generated wall band.
    pub wall_thickness: f32,
    /// Width of every carved door gap.
    pub door_width: f32,
    /// Number of AI agents spawned alongside the human.
    pub ai_agent_count: u32,
    /// Base movement speed cap in world units per tick.
    pub max_speed: f32,
    /// Multiplier applied to the speed cap while sprinting.
    pub sprint_multiplier: f32,
    /// Per-tick velocity step toward the steering target.
    pub acceleration: f32,
    /// Per-tick velocity decay on axes without steering input.
    pub deceleration: f32,
    /// Maximum distance at which an AI agent notices non-human targets.
    pub view_range: f32,
    /// Distance an AI agent tries to keep from its target.
    pub preferred_distance: f32,
    /// Dead band around the preferred distance within which AI holds still.
    pub distance_buffer: f32,
    /// Projectile travel speed in world units per tick.
    pub projectile_speed: f32,
    /// Side length of every projectile's square bounding rectangle.
    pub projectile_size: f32,
    /// Hit points removed from an agent struck by a projectile.
    pub projectile_damage: u32,
    /// Ticks a projectile survives before expiring.
    pub projectile_lifetime: u32,
    /// Ticks between successive AI shots.
    pub ai_fire_cooldown: u32,
    /// Ticks between successive human shots.
    pub human_fire_cooldown: u32,
    /// Ticks between successive safe-zone shrink steps.
    pub safe_zone_interval: u32,
    /// Factor applied to each safe-zone dimension per shrink step.
    pub safe_zone_factor: f32,
    /// Hit points removed per tick from agents outside the safe zone.
    pub safe_zone_damage: u32,
    /// Simulation ticks per second.
    pub tick_rate: u32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            world_width: 3000.0,
            world_height: 3000.0,
            agent_size: 32.0,
            wall_thickness: 10.0,
            door_width: 48.0,
            ai_agent_count: 9,
            max_speed: 2.0,
            sprint_multiplier: 1.5,
            acceleration: 0.5,
            deceleration: 0.5,
            view_range: 400.0,
            preferred_distance: 150.0,
            distance_buffer: 20.0,
            projectile_speed: 5.0,
            projectile_size: 5.0,
            projectile_damage: 35,
            projectile_lifetime: 300,
            ai_fire_cooldown: 60,
            human_fire_cooldown: 30,
            safe_zone_interval: 1800,
            safe_zone_factor: 0.9,
            safe_zone_damage: 1,
            tick_rate: 60,
        }
    }
}

impl ArenaConfig {
    /// Rectangle covering the whole world.
    #[must_use]
    pub const fn world_bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.world_width, self.world_height)
    }

    /// Speed cap for the provided sprint state.
    #[must_use]
    pub fn speed_cap(&self, sprinting: bool) -> f32 {
        if sprinting {
            self.max_speed * self.sprint_multiplier
        } else {
            self.max_speed
        }
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Generates the building layout and resets the match state.
    ConfigureArena {
        /// Parameters defining the match.
        config: ArenaConfig,
        /// Master seed from which all RNG streams are derived.
        seed: u64,
    },
    /// Spawns the AI roster plus the human agent into the configured arena.
    SpawnRoster,
    /// Applies one tick's steering decision for a single agent.
    ///
    /// Steering commands are applied strictly in submission order; an agent
    /// steered later in the batch observes the already-updated positions of
    /// agents steered earlier in the same tick.
    SteerAgent {
        /// Identifier of the agent being steered.
        agent: AgentId,
        /// Desired velocity for this tick, in world units per tick.
        velocity: WorldVec,
        /// Aim rotation in radians.
        facing: f32,
    },
    /// Requests that an agent fire a projectile in the given direction.
    FireProjectile {
        /// Identifier of the firing agent.
        agent: AgentId,
        /// Direction of travel; normalized by the world before use.
        direction: WorldVec,
    },
    /// Advances the simulation clock by one fixed tick.
    Tick,
}

/// Origin of a damage application.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DamageSource {
    /// A projectile fired by another agent.
    Projectile {
        /// Agent that fired the projectile.
        owner: AgentId,
    },
    /// Standing outside the shrinking safe zone.
    SafeZone,
}

/// Terminal state of a removed projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProjectileImpact {
    /// The projectile struck a building wall segment.
    Wall,
    /// The projectile struck an agent and dealt damage.
    Agent(AgentId),
    /// The projectile's lifetime ran out.
    Expired,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Confirms that the arena layout was generated.
    ArenaConfigured {
        /// Master seed the layout was derived from.
        seed: u64,
        /// Number of buildings produced by the generator.
        building_count: usize,
    },
    /// Confirms that an agent entered the arena.
    AgentSpawned {
        /// Identifier assigned to the agent.
        agent: AgentId,
        /// Top-left corner of the agent's bounding rectangle.
        position: WorldPoint,
        /// Whether the agent is controlled by the human player.
        is_human: bool,
    },
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Index of the tick that just completed.
        tick: u64,
    },
    /// Confirms that an agent's position was updated this tick.
    AgentMoved {
        /// Identifier of the agent that moved.
        agent: AgentId,
        /// Position before collision resolution.
        from: WorldPoint,
        /// Committed position after collision resolution.
        to: WorldPoint,
        /// Whether horizontal motion was rejected by a collision.
        blocked_x: bool,
        /// Whether vertical motion was rejected by a collision.
        blocked_y: bool,
    },
    /// Confirms that a projectile entered the world.
    ProjectileFired {
        /// Identifier assigned to the projectile.
        projectile: ProjectileId,
        /// Agent that fired it.
        owner: AgentId,
        /// Top-left corner of the projectile's starting rectangle.
        origin: WorldPoint,
        /// Velocity in world units per tick.
        velocity: WorldVec,
    },
    /// Confirms that a projectile left the world.
    ProjectileRemoved {
        /// Identifier of the removed projectile.
        projectile: ProjectileId,
        /// What ended the projectile's flight.
        impact: ProjectileImpact,
    },
    /// Reports that an agent lost hit points.
    AgentDamaged {
        /// Identifier of the damaged agent.
        agent: AgentId,
        /// Hit points removed.
        amount: u32,
        /// Hit points remaining after the damage.
        remaining: Health,
        /// Origin of the damage.
        source: DamageSource,
    },
    /// Reports that an agent's health reached zero.
    AgentDied {
        /// Identifier of the dead agent.
        agent: AgentId,
    },
    /// Announces a new, smaller safe zone.
    SafeZoneShrunk {
        /// The safe rectangle now in effect.
        area: Rect,
    },
    /// Announces that at most one agent remains alive.
    MatchEnded {
        /// The surviving agent, if any.
        winner: Option<AgentId>,
    },
}

/// Immutable representation of a single agent's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AgentSnapshot {
    /// Unique identifier assigned to the agent.
    pub id: AgentId,
    /// Top-left corner of the agent's bounding rectangle.
    pub position: WorldPoint,
    /// Velocity committed at the end of the previous tick.
    pub velocity: WorldVec,
    /// Bounding rectangle at the snapshot position.
    pub rect: Rect,
    /// Remaining hit points.
    pub health: Health,
    /// Aim rotation in radians.
    pub facing: f32,
    /// Whether the agent is controlled by the human player.
    pub is_human: bool,
    /// Maximum distance at which the agent notices non-human targets.
    pub view_range: f32,
    /// Distance the agent tries to keep from its target.
    pub preferred_distance: f32,
    /// Ticks until the agent may fire again; zero means ready.
    pub fire_cooldown: u32,
    /// Appearance assigned to the agent.
    pub color: AgentColor,
}

/// Read-only snapshot describing all living agents.
#[derive(Clone, Debug, Default)]
pub struct AgentView {
    snapshots: Vec<AgentSnapshot>,
}

impl AgentView {
    /// Creates a new agent view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<AgentSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in deterministic id order.
    pub fn iter(&self) -> impl Iterator<Item = &AgentSnapshot> {
        self.snapshots.iter()
    }

    /// Looks up a single agent's snapshot by identifier.
    #[must_use]
    pub fn get(&self, agent: AgentId) -> Option<&AgentSnapshot> {
        self.snapshots
            .binary_search_by_key(&agent, |snapshot| snapshot.id)
            .ok()
            .map(|index| &self.snapshots[index])
    }

    /// Snapshot of the human-controlled agent, if it is still alive.
    #[must_use]
    pub fn human(&self) -> Option<&AgentSnapshot> {
        self.snapshots.iter().find(|snapshot| snapshot.is_human)
    }

    /// Number of captured snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<AgentSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single projectile's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileSnapshot {
    /// Unique identifier assigned to the projectile.
    pub id: ProjectileId,
    /// Top-left corner of the projectile's bounding rectangle.
    pub position: WorldPoint,
    /// Velocity in world units per tick.
    pub velocity: WorldVec,
    /// Bounding rectangle at the snapshot position.
    pub rect: Rect,
    /// Agent that fired the projectile.
    pub owner: AgentId,
    /// Ticks remaining before expiry.
    pub lifetime: u32,
}

/// Read-only snapshot describing all live projectiles.
#[derive(Clone, Debug, Default)]
pub struct ProjectileView {
    snapshots: Vec<ProjectileSnapshot>,
}

impl ProjectileView {
    /// Creates a new projectile view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<ProjectileSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in deterministic id order.
    pub fn iter(&self) -> impl Iterator<Item = &ProjectileSnapshot> {
        self.snapshots.iter()
    }

    /// Number of captured snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether the view is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<ProjectileSnapshot> {
        self.snapshots
    }
}
