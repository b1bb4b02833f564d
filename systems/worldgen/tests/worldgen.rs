use arena_royale_core::{ArenaConfig, Building, Rect, Side};
use arena_royale_system_worldgen::{absorb_footprint, generate, synthesize_complex, synthesize_simple};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn config() -> ArenaConfig {
    ArenaConfig::default()
}

#[test]
fn simple_building_with_north_door_matches_expected_geometry() {
    let building = synthesize_simple(Rect::new(100.0, 100.0, 150.0, 100.0), Side::North, &config());

    assert!(!building.is_complex());
    assert_eq!(building.walls().len(), 5);
    assert_eq!(building.doors().len(), 1);

    let gap = building.doors()[0].rect();
    assert_eq!(gap, Rect::new(151.0, 100.0, 48.0, 10.0));

    // Perimeter band area minus four corner double counts minus the door.
    let expected_wall_area = 2.0 * (150.0 + 100.0) * 10.0 - 4.0 * 10.0 * 10.0 - 48.0 * 10.0;
    let wall_area: f32 = building.walls().iter().map(|wall| wall.rect().area()).sum();
    assert!((wall_area - expected_wall_area).abs() < 1e-3);
}

#[test]
fn simple_building_walls_and_door_tile_every_side() {
    let footprint = Rect::new(100.0, 100.0, 150.0, 100.0);
    for side in Side::ALL {
        let building = synthesize_simple(footprint, side, &config());
        assert_side_band_tiles(&building, &footprint, Side::North);
        assert_side_band_tiles(&building, &footprint, Side::South);
        assert_side_band_tiles(&building, &footprint, Side::East);
        assert_side_band_tiles(&building, &footprint, Side::West);
    }
}

#[test]
fn door_gap_is_passable() {
    for side in Side::ALL {
        let building = synthesize_simple(Rect::new(0.0, 0.0, 200.0, 160.0), side, &config());
        for door in building.doors() {
            assert!(
                !building.collides_with(&door.rect()),
                "door gap on {side:?} side reported as colliding"
            );
        }
    }
}

#[test]
fn degenerate_footprints_produce_no_invalid_segments() {
    // Smaller than twice the wall thickness; the inner span collapses.
    let building = synthesize_simple(Rect::new(0.0, 0.0, 15.0, 15.0), Side::North, &config());
    for wall in building.walls() {
        assert!(wall.rect().width() > 0.0);
        assert!(wall.rect().height() > 0.0);
    }
}

#[test]
fn complex_building_connects_rooms_and_carves_an_entrance() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let rooms = vec![
        Rect::new(0.0, 0.0, 150.0, 100.0),
        Rect::new(140.0, 0.0, 150.0, 100.0),
    ];

    let building = synthesize_complex(&rooms, &config(), &mut rng);

    assert!(building.is_complex());
    assert_eq!(building.bounding(), Rect::new(0.0, 0.0, 290.0, 100.0));
    // One interior door per adjacent side pair plus the exterior entrance.
    assert_eq!(building.doors().len(), 3);
    for wall in building.walls() {
        assert!(wall.rect().width() > 0.0);
        assert!(wall.rect().height() > 0.0);
    }
}

#[test]
fn merge_pass_is_idempotent_on_settled_pools() {
    // Far enough apart that neither merging nor corridor bridging triggers.
    let candidates = vec![
        Rect::new(0.0, 0.0, 100.0, 100.0),
        Rect::new(400.0, 0.0, 100.0, 100.0),
        Rect::new(0.0, 400.0, 120.0, 80.0),
        Rect::new(700.0, 700.0, 60.0, 180.0),
    ];

    let mut pool = Vec::new();
    for rect in &candidates {
        absorb_footprint(&mut pool, *rect);
    }
    assert_eq!(pool, candidates);

    let mut replayed = Vec::new();
    for rect in &pool {
        absorb_footprint(&mut replayed, *rect);
    }
    assert_eq!(replayed, pool);
}

#[test]
fn generation_is_deterministic_for_equal_seeds() {
    let first = generate(&config(), &mut ChaCha8Rng::seed_from_u64(42));
    let second = generate(&config(), &mut ChaCha8Rng::seed_from_u64(42));
    assert_eq!(first, second);

    let other = generate(&config(), &mut ChaCha8Rng::seed_from_u64(43));
    assert_ne!(first, other);
}

#[test]
fn generated_layouts_are_well_formed() {
    let buildings = generate(&config(), &mut ChaCha8Rng::seed_from_u64(7));
    assert!(!buildings.is_empty());

    for building in &buildings {
        assert!(
            !building.doors().is_empty(),
            "every building must be enterable"
        );
        for wall in building.walls() {
            assert!(wall.rect().width() > 0.0);
            assert!(wall.rect().height() > 0.0);
        }
        for door in building.doors() {
            assert!(
                building.bounding().intersects(&door.rect()),
                "door gaps belong to the building footprint"
            );
        }
    }
}

/// Projects every wall segment and door gap lying in the side's
/// wall-thickness band onto the side's long axis and asserts the intervals
/// exactly cover the expected span with no gaps and no overlaps.
fn assert_side_band_tiles(building: &Building, footprint: &Rect, side: Side) {
    let thickness = 10.0;
    let mut intervals: Vec<(f32, f32)> = Vec::new();
    let mut push_interval = |rect: Rect| match side {
        Side::North if rect.y() == footprint.top() && rect.height() == thickness => {
            intervals.push((rect.left(), rect.right()));
        }
        Side::South if rect.bottom() == footprint.bottom() && rect.height() == thickness => {
            intervals.push((rect.left(), rect.right()));
        }
        Side::West if rect.x() == footprint.left() && rect.width() == thickness => {
            intervals.push((rect.top(), rect.bottom()));
        }
        Side::East if rect.right() == footprint.right() && rect.width() == thickness => {
            intervals.push((rect.top(), rect.bottom()));
        }
        _ => {}
    };

    for wall in building.walls() {
        push_interval(wall.rect());
    }
    for door in building.doors() {
        push_interval(door.rect());
    }

    let expected_span = match side {
        Side::North | Side::South => (footprint.left(), footprint.right()),
        // Vertical bands are inset by the wall thickness at both ends; the
        // corners belong to the horizontal bands.
        Side::East | Side::West => (
            footprint.top() + thickness,
            footprint.bottom() - thickness,
        ),
    };

    intervals.sort_by(|a, b| a.0.partial_cmp(&b.0).expect("finite interval bounds"));
    assert!(!intervals.is_empty(), "side {side:?} has no band coverage");

    let mut cursor = expected_span.0;
    for (start, end) in intervals {
        assert!(
            (start - cursor).abs() < 1e-3,
            "side {side:?} band has a gap or overlap at {cursor}"
        );
        cursor = end;
    }
    assert!(
        (cursor - expected_span.1).abs() < 1e-3,
        "side {side:?} band stops short of the span end"
    );
}
