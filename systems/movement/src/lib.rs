#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Per-axis collision-resolved movement for arena agents.
//!
//! A desired displacement is decomposed into its horizontal and vertical
//! components and each axis is committed or rejected independently: the
//! horizontal candidate is tested first and, if clear, committed before the
//! vertical candidate is formed. Rejecting one axis never cancels the other,
//! which yields the sliding behavior that lets an agent pressed diagonally
//! into a wall keep gliding along the open axis.
//!
//! Collision tests are discrete exact rectangle intersections against wall
//! segments and other agents; door gaps are never tested. There is no swept
//! test between ticks, so the resolver only guarantees wall integrity while
//! per-tick displacement stays at or below the wall thickness. The shipped
//! speed caps keep a wide margin below that bound.

use arena_royale_core::{Building, Rect, WorldPoint, WorldVec};

/// Result of resolving one tick of movement for a single agent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoveOutcome {
    /// Committed position after collision resolution.
    pub position: WorldPoint,
    /// Whether horizontal motion was rejected by a collision.
    pub blocked_x: bool,
    /// Whether vertical motion was rejected by a collision.
    pub blocked_y: bool,
}

/// Moves a bounding box of `size` at `position` by `displacement`, clamping
/// each axis independently against building walls and the other agents'
/// bounding rectangles.
#[must_use]
pub fn resolve_move(
    position: WorldPoint,
    size: f32,
    displacement: WorldVec,
    buildings: &[Building],
    other_agents: &[Rect],
) -> MoveOutcome {
    let mut x = position.x();
    let mut y = position.y();
    let mut blocked_x = false;
    let mut blocked_y = false;

    if displacement.dx() != 0.0 {
        let candidate = Rect::new(x + displacement.dx(), y, size, size);
        if is_obstructed(&candidate, buildings, other_agents) {
            blocked_x = true;
        } else {
            x += displacement.dx();
        }
    }

    if displacement.dy() != 0.0 {
        let candidate = Rect::new(x, y + displacement.dy(), size, size);
        if is_obstructed(&candidate, buildings, other_agents) {
            blocked_y = true;
        } else {
            y += displacement.dy();
        }
    }

    MoveOutcome {
        position: WorldPoint::new(x, y),
        blocked_x,
        blocked_y,
    }
}

/// Reports whether the candidate rectangle overlaps any obstacle.
#[must_use]
pub fn is_obstructed(candidate: &Rect, buildings: &[Building], other_agents: &[Rect]) -> bool {
    buildings
        .iter()
        .any(|building| building.collides_with(candidate))
        || other_agents.iter().any(|agent| candidate.intersects(agent))
}
