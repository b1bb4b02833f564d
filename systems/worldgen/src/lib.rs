#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic building generation for the arena world.
//!
//! The generator scatters candidate room footprints across the world,
//! merges or bridges the ones that land close together, partitions the
//! resulting pool into connected groups, and synthesizes wall segments and
//! door gaps for every group. Singleton groups become simple one-room
//! buildings; larger groups become complex multi-room buildings with
//! interior doors and one carved exterior entrance.

use arena_royale_core::{ArenaConfig, Building, DoorGap, Rect, Side, SubRoom, WallSegment};
use rand::Rng;

/// Number of L/U-shaped footprint clusters seeded per world.
const COMPLEX_SEED_COUNT: usize = 10;

/// Number of standalone footprints scattered per world.
const STANDALONE_COUNT: usize = 30;

/// Overlap dimensions beyond which two footprints are merged into one.
const SIGNIFICANT_OVERLAP: f32 = 20.0;

/// Inflation applied when testing whether two footprints deserve a corridor.
const PROXIMITY_INFLATION: f32 = 80.0;

/// Inflation applied when grouping footprints into connected buildings.
const GROUP_INFLATION: f32 = 20.0;

/// Overlap between a cluster base and its extensions so grouping links them.
const EXTENSION_OVERLAP: f32 = 10.0;

/// Inset applied to corridor mouths so they land inside both footprints.
const CORRIDOR_MARGIN: f32 = 20.0;

/// Distance a corridor reaches into each footprint it bridges.
const CORRIDOR_REACH: f32 = 10.0;

/// Produces the building set for a world of the configured dimensions.
///
/// The RNG is the only source of nondeterminism; equal seeds produce equal
/// layouts. The footprint merge pass is a greedy, order-dependent single
/// pass and can leave residual overlaps or detached corridors for some
/// draws; those layouts are accepted as-is rather than re-rolled.
pub fn generate<R: Rng>(config: &ArenaConfig, rng: &mut R) -> Vec<Building> {
    let mut pool: Vec<Rect> = Vec::new();

    seed_complex_footprints(config, rng, &mut pool);
    for _ in 0..STANDALONE_COUNT {
        if let Some(footprint) = random_standalone_footprint(config, rng) {
            absorb_footprint(&mut pool, footprint);
        }
    }

    let mut buildings = Vec::new();
    for group in group_footprints(&pool) {
        if group.len() == 1 {
            let side = Side::from_index(rng.gen_range(0..4));
            buildings.push(synthesize_simple(group[0], side, config));
        } else {
            buildings.push(synthesize_complex(&group, config, rng));
        }
    }

    buildings
}

/// Folds a new footprint into the pool.
///
/// A footprint that significantly overlaps an existing one replaces it with
/// their bounding union. A footprint that lands near an existing one gains a
/// bridging corridor and both are kept. Anything else is added standalone.
/// The pass is greedy and order-dependent; re-running it over a pool already
/// free of significant overlaps and proximity changes nothing.
pub fn absorb_footprint(pool: &mut Vec<Rect>, footprint: Rect) {
    for index in 0..pool.len() {
        let existing = pool[index];
        if !footprint.intersects(&existing) {
            continue;
        }
        let Some(overlap) = footprint.clipped(&existing) else {
            continue;
        };
        if overlap.width() > SIGNIFICANT_OVERLAP && overlap.height() > SIGNIFICANT_OVERLAP {
            let merged = footprint.union(&existing);
            let _ = pool.remove(index);
            pool.push(merged);
            return;
        }
    }

    for existing in pool.iter().copied() {
        if footprint
            .inflated(PROXIMITY_INFLATION, PROXIMITY_INFLATION)
            .intersects(&existing)
        {
            if let Some(corridor) = bridge_corridor(&footprint, &existing) {
                pool.push(corridor);
            }
            break;
        }
    }

    pool.push(footprint);
}

/// Synthesizes a corridor footprint spanning the gap between two rooms.
///
/// The corridor runs along whichever axis the rooms are closer-aligned on
/// and is dropped when the shared span is too narrow to host one.
fn bridge_corridor(a: &Rect, b: &Rect) -> Option<Rect> {
    let dx = (a.center_x() - b.center_x()).abs();
    let dy = (a.center_y() - b.center_y()).abs();

    if dx < dy {
        // Rooms stack vertically; run the corridor north to south.
        let x = a.left().max(b.left()) + CORRIDOR_MARGIN;
        let width = a.right().min(b.right()) - x - CORRIDOR_MARGIN;
        let (y, height) = if a.center_y() < b.center_y() {
            let y = a.bottom() - CORRIDOR_REACH;
            (y, b.top() - y + CORRIDOR_REACH)
        } else {
            let y = b.bottom() - CORRIDOR_REACH;
            (y, a.top() - y + CORRIDOR_REACH)
        };
        if width > 40.0 && height > 20.0 {
            return Some(Rect::new(x, y, width, height));
        }
    } else {
        let y = a.top().max(b.top()) + CORRIDOR_MARGIN;
        let height = a.bottom().min(b.bottom()) - y - CORRIDOR_MARGIN;
        let (x, width) = if a.center_x() < b.center_x() {
            let x = a.right() - CORRIDOR_REACH;
            (x, b.left() - x + CORRIDOR_REACH)
        } else {
            let x = b.right() - CORRIDOR_REACH;
            (x, a.left() - x + CORRIDOR_REACH)
        };
        if width > 20.0 && height > 40.0 {
            return Some(Rect::new(x, y, width, height));
        }
    }

    None
}

/// Scatters the L/U-shaped cluster seeds that later group into complex
/// buildings. Extensions deliberately overlap their base so grouping links
/// them. Worlds too small to host the seed margins are left without clusters.
fn seed_complex_footprints<R: Rng>(config: &ArenaConfig, rng: &mut R, pool: &mut Vec<Rect>) {
    let world_width = config.world_width as i32;
    let world_height = config.world_height as i32;
    if world_width < 400 || world_height < 400 {
        return;
    }

    for _ in 0..COMPLEX_SEED_COUNT {
        let base_width = rng.gen_range(80..=150) as f32;
        let base_height = rng.gen_range(80..=150) as f32;
        let base_x = rng.gen_range(100..=world_width - 300) as f32;
        let base_y = rng.gen_range(100..=world_height - 300) as f32;
        let base = Rect::new(base_x, base_y, base_width, base_height);
        pool.push(base);

        if rng.gen_bool(0.5) {
            push_l_extension(rng, pool, &base);
        } else {
            push_u_extensions(rng, pool, &base);
        }
    }
}

fn push_l_extension<R: Rng>(rng: &mut R, pool: &mut Vec<Rect>, base: &Rect) {
    if rng.gen_bool(0.5) {
        let width = rng.gen_range(80..=150) as f32;
        let height = rng.gen_range(50..=base.height() as i32 - 20) as f32;
        let x = base.right() - EXTENSION_OVERLAP;
        let y = base.top() + rng.gen_range(0..=(base.height() - height) as i32) as f32;
        pool.push(Rect::new(x, y, width, height));
    } else {
        let width = rng.gen_range(50..=base.width() as i32 - 20) as f32;
        let height = rng.gen_range(80..=150) as f32;
        let x = base.left() + rng.gen_range(0..=(base.width() - width) as i32) as f32;
        let y = base.bottom() - EXTENSION_OVERLAP;
        pool.push(Rect::new(x, y, width, height));
    }
}

fn push_u_extensions<R: Rng>(rng: &mut R, pool: &mut Vec<Rect>, base: &Rect) {
    if rng.gen_bool(0.5) {
        // Arms reach out horizontally from both vertical edges.
        let left_width = rng.gen_range(40..=80) as f32;
        let left_height = rng.gen_range(80..=120) as f32;
        pool.push(Rect::new(
            base.left() - left_width + EXTENSION_OVERLAP,
            base.top() + ((base.height() - left_height) / 2.0).floor(),
            left_width,
            left_height,
        ));

        let right_width = rng.gen_range(40..=80) as f32;
        let right_height = rng.gen_range(80..=120) as f32;
        pool.push(Rect::new(
            base.right() - EXTENSION_OVERLAP,
            base.top() + ((base.height() - right_height) / 2.0).floor(),
            right_width,
            right_height,
        ));
    } else {
        let top_width = rng.gen_range(80..=120) as f32;
        let top_height = rng.gen_range(40..=80) as f32;
        pool.push(Rect::new(
            base.left() + ((base.width() - top_width) / 2.0).floor(),
            base.top() - top_height + EXTENSION_OVERLAP,
            top_width,
            top_height,
        ));

        let bottom_width = rng.gen_range(80..=120) as f32;
        let bottom_height = rng.gen_range(40..=80) as f32;
        pool.push(Rect::new(
            base.left() + ((base.width() - bottom_width) / 2.0).floor(),
            base.bottom() - EXTENSION_OVERLAP,
            bottom_width,
            bottom_height,
        ));
    }
}

fn random_standalone_footprint<R: Rng>(config: &ArenaConfig, rng: &mut R) -> Option<Rect> {
    let world_width = config.world_width as i32;
    let world_height = config.world_height as i32;
    if world_width < 50 || world_height < 50 {
        return None;
    }

    let width = rng.gen_range(50..=200.min(world_width)) as f32;
    let height = rng.gen_range(50..=200.min(world_height)) as f32;
    let x = rng.gen_range(0..=(config.world_width - width) as i32) as f32;
    let y = rng.gen_range(0..=(config.world_height - height) as i32) as f32;
    Some(Rect::new(x, y, width, height))
}

/// Partitions the footprint pool into connected groups.
///
/// Membership expands to a fixed point: a footprint joins a group when it
/// touches, overlaps, or lies within the group inflation distance of any
/// member, and newly absorbed members keep recruiting until no more join.
fn group_footprints(pool: &[Rect]) -> Vec<Vec<Rect>> {
    let mut processed = vec![false; pool.len()];
    let mut groups = Vec::new();

    for start in 0..pool.len() {
        if processed[start] {
            continue;
        }
        processed[start] = true;
        let mut members = vec![start];

        let mut changed = true;
        while changed {
            changed = false;
            for candidate in 0..pool.len() {
                if processed[candidate] {
                    continue;
                }
                let adjacent = members.iter().any(|&member| {
                    pool[member].intersects(&pool[candidate])
                        || pool[member]
                            .inflated(GROUP_INFLATION, GROUP_INFLATION)
                            .intersects(&pool[candidate])
                });
                if adjacent {
                    processed[candidate] = true;
                    members.push(candidate);
                    changed = true;
                }
            }
        }

        groups.push(members.iter().map(|&index| pool[index]).collect());
    }

    groups
}

/// Derives the interior door flags for every room of a connected group.
///
/// A room opens north when some adjacent room's vertical center lies above
/// its own and their horizontal spans overlap; the other sides follow the
/// symmetric rule. This is a directional heuristic, not an exact adjacency
/// test, so oddly shaped groups can gain doors into thin air.
fn room_door_flags(group: &[Rect]) -> Vec<SubRoom> {
    group
        .iter()
        .map(|room| {
            let mut north = false;
            let mut east = false;
            let mut south = false;
            let mut west = false;

            for other in group {
                if other == room {
                    continue;
                }
                let adjacent = room.intersects(other)
                    || room
                        .inflated(GROUP_INFLATION, GROUP_INFLATION)
                        .intersects(other);
                if !adjacent {
                    continue;
                }

                let spans_horizontally = other.right() > room.left() && other.left() < room.right();
                let spans_vertically = other.bottom() > room.top() && other.top() < room.bottom();

                if other.center_y() < room.center_y() && spans_horizontally {
                    north = true;
                }
                if other.center_x() > room.center_x() && spans_vertically {
                    east = true;
                }
                if other.center_y() > room.center_y() && spans_horizontally {
                    south = true;
                }
                if other.center_x() < room.center_x() && spans_vertically {
                    west = true;
                }
            }

            SubRoom::new(*room, north, east, south, west)
        })
        .collect()
}

/// Rectangle of the door gap centered on the given side of a footprint.
fn door_gap_on_side(footprint: &Rect, side: Side, config: &ArenaConfig) -> Rect {
    let thickness = config.wall_thickness;
    let door = config.door_width;
    match side {
        Side::North => Rect::new(
            footprint.left() + ((footprint.width() - door) / 2.0).floor(),
            footprint.top(),
            door,
            thickness,
        ),
        Side::South => Rect::new(
            footprint.left() + ((footprint.width() - door) / 2.0).floor(),
            footprint.bottom() - thickness,
            door,
            thickness,
        ),
        Side::East => Rect::new(
            footprint.right() - thickness,
            footprint.top() + ((footprint.height() - door) / 2.0).floor(),
            thickness,
            door,
        ),
        Side::West => Rect::new(
            footprint.left(),
            footprint.top() + ((footprint.height() - door) / 2.0).floor(),
            thickness,
            door,
        ),
    }
}

/// Synthesizes a one-room building with a single door on the chosen side.
///
/// Corner ownership is fixed: the north and south bands span the full
/// footprint width while the east and west bands are inset by the wall
/// thickness at both ends, so segments never overlap at corners. Flanks that
/// collapse to zero width are dropped by the final cleanup.
#[must_use]
pub fn synthesize_simple(footprint: Rect, door_side: Side, config: &ArenaConfig) -> Building {
    let thickness = config.wall_thickness;
    let gap = door_gap_on_side(&footprint, door_side, config);
    let mut walls = Vec::with_capacity(6);

    for side in Side::ALL {
        if side == door_side {
            push_split_side(&mut walls, &footprint, side, &gap, thickness);
        } else {
            walls.push(full_side_band(&footprint, side, thickness));
        }
    }

    Building::new(
        footprint,
        false,
        cleanup(walls),
        vec![DoorGap::new(gap)],
    )
}

/// Synthesizes a multi-room building from a connected footprint group.
///
/// Every room contributes four wall bands with interior doors where its
/// flags demand them, then one exterior door is carved out of a uniformly
/// chosen outer-perimeter segment so the building is always enterable. An
/// empty candidate list (degenerate geometry) skips the carving silently.
#[must_use]
pub fn synthesize_complex<R: Rng>(group: &[Rect], config: &ArenaConfig, rng: &mut R) -> Building {
    let rooms = room_door_flags(group);
    let thickness = config.wall_thickness;
    let mut walls: Vec<Rect> = Vec::new();
    let mut doors: Vec<DoorGap> = Vec::new();

    for room in &rooms {
        let footprint = room.rect();
        for side in Side::ALL {
            if room.has_door(side) {
                let gap = door_gap_on_side(&footprint, side, config);
                push_split_side(&mut walls, &footprint, side, &gap, thickness);
                doors.push(DoorGap::new(gap));
            } else {
                walls.push(full_side_band(&footprint, side, thickness));
            }
        }
    }

    carve_exterior_door(&mut walls, &mut doors, &rooms, config, rng);

    let bounding = group
        .iter()
        .skip(1)
        .fold(group[0], |union, rect| union.union(rect));
    Building::new(bounding, true, cleanup(walls), doors)
}

/// Full wall band covering one side of a footprint.
fn full_side_band(footprint: &Rect, side: Side, thickness: f32) -> Rect {
    match side {
        Side::North => Rect::new(footprint.left(), footprint.top(), footprint.width(), thickness),
        Side::South => Rect::new(
            footprint.left(),
            footprint.bottom() - thickness,
            footprint.width(),
            thickness,
        ),
        Side::East => Rect::new(
            footprint.right() - thickness,
            footprint.top() + thickness,
            thickness,
            footprint.height() - 2.0 * thickness,
        ),
        Side::West => Rect::new(
            footprint.left(),
            footprint.top() + thickness,
            thickness,
            footprint.height() - 2.0 * thickness,
        ),
    }
}

/// Two wall segments flanking a door gap on one side of a footprint.
fn push_split_side(walls: &mut Vec<Rect>, footprint: &Rect, side: Side, gap: &Rect, thickness: f32) {
    match side {
        Side::North | Side::South => {
            let y = gap.y();
            walls.push(Rect::new(
                footprint.left(),
                y,
                gap.left() - footprint.left(),
                thickness,
            ));
            walls.push(Rect::new(
                gap.right(),
                y,
                footprint.right() - gap.right(),
                thickness,
            ));
        }
        Side::East | Side::West => {
            let x = gap.x();
            let inner_top = footprint.top() + thickness;
            let inner_bottom = footprint.bottom() - thickness;
            walls.push(Rect::new(x, inner_top, thickness, gap.top() - inner_top));
            walls.push(Rect::new(
                x,
                gap.bottom(),
                thickness,
                inner_bottom - gap.bottom(),
            ));
        }
    }
}

/// Replaces one outer-perimeter wall segment with a centered door gap plus
/// flanking segments. A segment counts as outer when it is not strictly
/// inside any room's footprint.
fn carve_exterior_door<R: Rng>(
    walls: &mut Vec<Rect>,
    doors: &mut Vec<DoorGap>,
    rooms: &[SubRoom],
    config: &ArenaConfig,
    rng: &mut R,
) {
    let thickness = config.wall_thickness;
    let door = config.door_width;

    let candidates: Vec<usize> = walls
        .iter()
        .enumerate()
        .filter(|(_, wall)| {
            !rooms.iter().any(|room| {
                let footprint = room.rect();
                wall.left() > footprint.left()
                    && wall.right() < footprint.right()
                    && wall.top() > footprint.top()
                    && wall.bottom() < footprint.bottom()
            })
        })
        .map(|(index, _)| index)
        .collect();

    if candidates.is_empty() {
        return;
    }
    let chosen = candidates[rng.gen_range(0..candidates.len())];
    let wall = walls.remove(chosen);

    if wall.height() <= thickness {
        let gap_x = wall.left() + ((wall.width() - door) / 2.0).floor();
        if gap_x > wall.left() {
            walls.push(Rect::new(wall.left(), wall.top(), gap_x - wall.left(), thickness));
        }
        if gap_x + door < wall.right() {
            walls.push(Rect::new(
                gap_x + door,
                wall.top(),
                wall.right() - (gap_x + door),
                thickness,
            ));
        }
        doors.push(DoorGap::new(Rect::new(gap_x, wall.top(), door, thickness)));
    } else {
        let gap_y = wall.top() + ((wall.height() - door) / 2.0).floor();
        if gap_y > wall.top() {
            walls.push(Rect::new(wall.left(), wall.top(), thickness, gap_y - wall.top()));
        }
        if gap_y + door < wall.bottom() {
            walls.push(Rect::new(
                wall.left(),
                gap_y + door,
                thickness,
                wall.bottom() - (gap_y + door),
            ));
        }
        doors.push(DoorGap::new(Rect::new(wall.left(), gap_y, thickness, door)));
    }
}

/// Drops synthesized segments with non-positive dimensions.
fn cleanup(walls: Vec<Rect>) -> Vec<WallSegment> {
    walls
        .into_iter()
        .filter(|rect| rect.width() > 0.0 && rect.height() > 0.0)
        .map(WallSegment::new)
        .collect()
}
