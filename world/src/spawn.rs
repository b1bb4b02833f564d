//! Spawn placement for the agent roster.
//!
//! AI agents land on uniformly random positions re-rolled until they clear
//! every building; the human lands at the world center and walks a fixed
//! diagonal offset away from any building it would clip. Both searches are
//! explicitly capped and fall back to the world origin instead of spinning
//! forever on a pathological layout.

use arena_royale_core::{ArenaConfig, Building, Rect, WorldPoint};
use rand::Rng;

const MAX_RANDOM_ATTEMPTS: u32 = 256;
const MAX_CENTER_ATTEMPTS: u32 = 64;
const CENTER_RETRY_STEP: f32 = 50.0;

/// Picks a random spawn position whose bounding box clears every building.
pub(crate) fn random_spawn_position<R: Rng>(
    config: &ArenaConfig,
    buildings: &[Building],
    rng: &mut R,
) -> WorldPoint {
    let size = config.agent_size;
    let max_x = (config.world_width - size).max(0.0) as i32;
    let max_y = (config.world_height - size).max(0.0) as i32;

    for _ in 0..MAX_RANDOM_ATTEMPTS {
        let x = rng.gen_range(0..=max_x) as f32;
        let y = rng.gen_range(0..=max_y) as f32;
        if is_clear(&Rect::new(x, y, size, size), buildings) {
            return WorldPoint::new(x, y);
        }
    }

    log::warn!(
        "no clear random spawn found in {MAX_RANDOM_ATTEMPTS} attempts, falling back to origin"
    );
    WorldPoint::new(0.0, 0.0)
}

/// Places the human at the world center, nudging diagonally until clear.
pub(crate) fn center_spawn_position(config: &ArenaConfig, buildings: &[Building]) -> WorldPoint {
    let size = config.agent_size;
    let mut x = (config.world_width / 2.0).floor();
    let mut y = (config.world_height / 2.0).floor();

    for _ in 0..MAX_CENTER_ATTEMPTS {
        if is_clear(&Rect::new(x, y, size, size), buildings) {
            return WorldPoint::new(x, y);
        }
        x += CENTER_RETRY_STEP;
        y += CENTER_RETRY_STEP;
    }

    log::warn!(
        "no clear center spawn found in {MAX_CENTER_ATTEMPTS} attempts, falling back to origin"
    );
    WorldPoint::new(0.0, 0.0)
}

fn is_clear(candidate: &Rect, buildings: &[Building]) -> bool {
    !buildings
        .iter()
        .any(|building| building.collides_with(candidate))
}
