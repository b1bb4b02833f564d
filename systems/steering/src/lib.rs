#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that turns intent and target assignments into steering
//! commands.
//!
//! The human agent steers from the directional input snapshot; AI agents
//! steer relative to their assigned target, closing in when too far,
//! backing off when too close, and braking to a stop inside the dead band.
//! Velocity never jumps: each axis walks toward its desired value by the
//! configured acceleration step and decays by the deceleration step when
//! idle, then the whole vector is clamped to the active speed cap.
//!
//! One `SteerAgent` command is emitted per living agent per tick, in agent
//! id order. The world applies them sequentially, so agents later in the
//! order observe earlier agents' already-updated positions within the same
//! tick; that ordering is part of the simulation contract and keeps replays
//! deterministic.

use arena_royale_core::{AgentSnapshot, AgentView, ArenaConfig, Command, WorldPoint, WorldVec};
use arena_royale_system_targeting::AgentTarget;

/// Directional input snapshot captured by the adapter for the human agent.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct HumanIntent {
    /// Move toward decreasing y.
    pub up: bool,
    /// Move toward increasing y.
    pub down: bool,
    /// Move toward decreasing x.
    pub left: bool,
    /// Move toward increasing x.
    pub right: bool,
    /// Raise the speed cap while held.
    pub sprint: bool,
    /// Cursor position in world coordinates, used for aim facing.
    pub cursor_world: Option<WorldPoint>,
}

impl HumanIntent {
    /// Unit-length movement direction implied by the pressed keys.
    #[must_use]
    pub fn direction(&self) -> WorldVec {
        let mut dx = 0.0;
        let mut dy = 0.0;
        if self.left {
            dx -= 1.0;
        }
        if self.right {
            dx += 1.0;
        }
        if self.up {
            dy -= 1.0;
        }
        if self.down {
            dy += 1.0;
        }
        WorldVec::new(dx, dy).normalized_or_zero()
    }
}

/// Steering system emitting one command per agent per tick.
#[derive(Debug, Default)]
pub struct Steering;

impl Steering {
    /// Creates a new steering system.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Emits `Command::SteerAgent` for every agent in the view.
    pub fn handle(
        &self,
        agents: &AgentView,
        targets: &[AgentTarget],
        intent: HumanIntent,
        config: &ArenaConfig,
        out: &mut Vec<Command>,
    ) {
        for agent in agents.iter() {
            let (desired, facing, cap) = if agent.is_human {
                self.human_decision(agent, intent, config)
            } else {
                self.ai_decision(agent, agents, targets, config)
            };

            let velocity = WorldVec::new(
                approach_axis(agent.velocity.dx(), desired.dx(), config),
                approach_axis(agent.velocity.dy(), desired.dy(), config),
            )
            .clamped(cap);

            out.push(Command::SteerAgent {
                agent: agent.id,
                velocity,
                facing,
            });
        }
    }

    fn human_decision(
        &self,
        agent: &AgentSnapshot,
        intent: HumanIntent,
        config: &ArenaConfig,
    ) -> (WorldVec, f32, f32) {
        let cap = config.speed_cap(intent.sprint);
        let desired = intent.direction().scaled(cap);
        let facing = intent
            .cursor_world
            .map(|cursor| agent.rect.center().vector_to(cursor).angle())
            .unwrap_or(agent.facing);
        (desired, facing, cap)
    }

    fn ai_decision(
        &self,
        agent: &AgentSnapshot,
        agents: &AgentView,
        targets: &[AgentTarget],
        config: &ArenaConfig,
    ) -> (WorldVec, f32, f32) {
        let cap = config.max_speed;
        let assignment = targets.iter().find(|target| target.seeker == agent.id);
        let Some(assignment) = assignment else {
            return (WorldVec::ZERO, agent.facing, cap);
        };
        let Some(quarry) = agents.get(assignment.target) else {
            return (WorldVec::ZERO, agent.facing, cap);
        };

        let toward = agent.position.vector_to(quarry.position).normalized_or_zero();
        let facing = if toward.is_zero() {
            agent.facing
        } else {
            toward.angle()
        };

        let desired = if assignment.distance < agent.preferred_distance - config.distance_buffer {
            toward.scaled(-cap)
        } else if assignment.distance > agent.preferred_distance + config.distance_buffer {
            toward.scaled(cap)
        } else {
            WorldVec::ZERO
        };

        (desired, facing, cap)
    }
}

/// Walks one velocity component toward its desired value.
///
/// An idle axis decays toward zero by the deceleration step; a driven axis
/// moves toward the desired value by the acceleration step, landing exactly
/// on it instead of oscillating around it.
fn approach_axis(current: f32, desired: f32, config: &ArenaConfig) -> f32 {
    if desired == 0.0 {
        if current.abs() <= config.deceleration {
            return 0.0;
        }
        return current - config.deceleration * current.signum();
    }

    let delta = desired - current;
    if delta.abs() <= config.acceleration {
        return desired;
    }
    current + config.acceleration * delta.signum()
}
