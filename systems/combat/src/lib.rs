#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that emits fire commands for agents ready to shoot.
//!
//! AI agents shoot at their assigned target whenever their cooldown has
//! elapsed and the target sits inside their view range. The human agent
//! shoots on an explicit trigger, aimed at the cursor's world position,
//! on its own shorter cooldown. The world remains authoritative over
//! cooldown bookkeeping; this system merely refuses to queue commands for
//! agents that cannot fire yet.

use arena_royale_core::{AgentView, Command, WorldPoint};
use arena_royale_system_targeting::AgentTarget;

/// Fire input snapshot captured by the adapter for the human agent.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct FireIntent {
    /// Whether the fire control is held this tick.
    pub trigger: bool,
    /// Cursor position in world coordinates to aim at.
    pub cursor_world: Option<WorldPoint>,
}

/// Combat system that queues firing commands for ready agents.
#[derive(Debug, Default)]
pub struct Combat {
    scratch: Vec<Command>,
}

impl Combat {
    /// Creates a new combat system with an empty scratch buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emits `Command::FireProjectile` entries for agents ready to fire.
    pub fn handle(
        &mut self,
        agents: &AgentView,
        targets: &[AgentTarget],
        intent: FireIntent,
        out: &mut Vec<Command>,
    ) {
        self.scratch.clear();

        for assignment in targets {
            let Some(seeker) = agents.get(assignment.seeker) else {
                continue;
            };
            if seeker.fire_cooldown != 0 {
                continue;
            }
            if assignment.distance <= 0.0 || assignment.distance > seeker.view_range {
                continue;
            }
            let Some(quarry) = agents.get(assignment.target) else {
                continue;
            };

            let direction = seeker
                .position
                .vector_to(quarry.position)
                .normalized_or_zero();
            if direction.is_zero() {
                continue;
            }

            self.scratch.push(Command::FireProjectile {
                agent: seeker.id,
                direction,
            });
        }

        if intent.trigger {
            if let (Some(human), Some(cursor)) = (agents.human(), intent.cursor_world) {
                if human.fire_cooldown == 0 {
                    let direction = human.rect.center().vector_to(cursor).normalized_or_zero();
                    if !direction.is_zero() {
                        self.scratch.push(Command::FireProjectile {
                            agent: human.id,
                            direction,
                        });
                    }
                }
            }
        }

        if self.scratch.is_empty() {
            return;
        }

        out.reserve(self.scratch.len());
        out.append(&mut self.scratch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arena_royale_core::{
        AgentColor, AgentId, AgentSnapshot, AgentView, Health, Rect, WorldVec,
    };

    fn agent(id: u32, x: f32, y: f32, is_human: bool, cooldown: u32) -> AgentSnapshot {
        AgentSnapshot {
            id: AgentId::new(id),
            position: WorldPoint::new(x, y),
            velocity: WorldVec::ZERO,
            rect: Rect::new(x, y, 32.0, 32.0),
            health: Health::new(100),
            facing: 0.0,
            is_human,
            view_range: 400.0,
            preferred_distance: 150.0,
            fire_cooldown: cooldown,
            color: AgentColor::from_rgb(0, 0, 0),
        }
    }

    fn assignment(seeker: u32, target: u32, distance: f32) -> AgentTarget {
        AgentTarget {
            seeker: AgentId::new(seeker),
            target: AgentId::new(target),
            distance,
        }
    }

    #[test]
    fn ready_ai_fires_toward_its_target() {
        let view = AgentView::from_snapshots(vec![
            agent(0, 0.0, 0.0, false, 0),
            agent(1, 300.0, 0.0, true, 10),
        ]);
        let mut out = Vec::new();
        Combat::new().handle(
            &view,
            &[assignment(0, 1, 300.0)],
            FireIntent::default(),
            &mut out,
        );

        assert_eq!(out.len(), 1);
        let Command::FireProjectile { agent, direction } = &out[0] else {
            panic!("expected a fire command");
        };
        assert_eq!(*agent, AgentId::new(0));
        assert!((direction.dx() - 1.0).abs() < 1e-5);
        assert_eq!(direction.dy(), 0.0);
    }

    #[test]
    fn cooling_agents_hold_fire() {
        let view = AgentView::from_snapshots(vec![
            agent(0, 0.0, 0.0, false, 17),
            agent(1, 300.0, 0.0, true, 0),
        ]);
        let mut out = Vec::new();
        Combat::new().handle(
            &view,
            &[assignment(0, 1, 300.0)],
            FireIntent::default(),
            &mut out,
        );

        assert!(out.is_empty());
    }

    #[test]
    fn targets_beyond_view_range_are_not_shot_at() {
        // The human is visible for steering at any range but may only be
        // fired upon inside the view range.
        let view = AgentView::from_snapshots(vec![
            agent(0, 0.0, 0.0, false, 0),
            agent(1, 900.0, 0.0, true, 0),
        ]);
        let mut out = Vec::new();
        Combat::new().handle(
            &view,
            &[assignment(0, 1, 900.0)],
            FireIntent::default(),
            &mut out,
        );

        assert!(out.is_empty());
    }

    #[test]
    fn the_human_fires_at_the_cursor_on_trigger() {
        let view = AgentView::from_snapshots(vec![agent(5, 100.0, 100.0, true, 0)]);
        let intent = FireIntent {
            trigger: true,
            cursor_world: Some(WorldPoint::new(116.0, 300.0)),
        };
        let mut out = Vec::new();
        Combat::new().handle(&view, &[], intent, &mut out);

        assert_eq!(out.len(), 1);
        let Command::FireProjectile { agent, direction } = &out[0] else {
            panic!("expected a fire command");
        };
        assert_eq!(*agent, AgentId::new(5));
        assert_eq!(direction.dx(), 0.0);
        assert!((direction.dy() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn the_trigger_is_inert_without_a_cursor_or_during_cooldown() {
        let cooling = AgentView::from_snapshots(vec![agent(5, 0.0, 0.0, true, 3)]);
        let mut out = Vec::new();
        Combat::new().handle(
            &cooling,
            &[],
            FireIntent {
                trigger: true,
                cursor_world: Some(WorldPoint::new(50.0, 0.0)),
            },
            &mut out,
        );
        assert!(out.is_empty());

        let ready = AgentView::from_snapshots(vec![agent(5, 0.0, 0.0, true, 0)]);
        Combat::new().handle(
            &ready,
            &[],
            FireIntent {
                trigger: true,
                cursor_world: None,
            },
            &mut out,
        );
        assert!(out.is_empty());
    }
}
