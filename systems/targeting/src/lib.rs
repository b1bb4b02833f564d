#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that selects targets for AI agents from world snapshots.
//!
//! Every AI agent is assigned the nearest other living agent it can see.
//! AI-controlled candidates are visible only within the seeker's view
//! range; the human candidate is always visible regardless of range. The
//! asymmetry is intentional: the human can break line of pursuit by
//! outranging AI opponents but never hides from them entirely.

use arena_royale_core::{AgentId, AgentView};

/// Target assignment produced for a single AI seeker.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AgentTarget {
    /// The AI agent doing the seeking.
    pub seeker: AgentId,
    /// The nearest visible agent.
    pub target: AgentId,
    /// Distance between the two agents' positions at snapshot time.
    pub distance: f32,
}

/// Targeting system that reuses a scratch buffer to avoid reallocations.
#[derive(Debug, Default)]
pub struct Targeting {
    scratch: Vec<AgentTarget>,
}

impl Targeting {
    /// Creates a new targeting system with an empty scratch buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes target assignments for the provided agent snapshot.
    ///
    /// The output buffer is cleared before being populated. Assignments are
    /// emitted in seeker id order; distance ties break toward the smaller
    /// candidate id so replays stay deterministic.
    pub fn handle(&mut self, agents: &AgentView, out: &mut Vec<AgentTarget>) {
        out.clear();
        self.scratch.clear();

        for seeker in agents.iter() {
            if seeker.is_human {
                continue;
            }

            let mut best: Option<AgentTarget> = None;
            for candidate in agents.iter() {
                if candidate.id == seeker.id {
                    continue;
                }

                let distance = seeker.position.distance_to(candidate.position);
                if !candidate.is_human && distance > seeker.view_range {
                    continue;
                }

                let replace = match best {
                    None => true,
                    Some(current) => {
                        distance < current.distance
                            || (distance == current.distance && candidate.id < current.target)
                    }
                };
                if replace {
                    best = Some(AgentTarget {
                        seeker: seeker.id,
                        target: candidate.id,
                        distance,
                    });
                }
            }

            if let Some(assignment) = best {
                self.scratch.push(assignment);
            }
        }

        out.append(&mut self.scratch);
    }
}
