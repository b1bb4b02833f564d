use arena_royale_core::{ArenaConfig, Rect, Side, WorldPoint, WorldVec};
use arena_royale_system_movement::{is_obstructed, resolve_move};
use arena_royale_system_worldgen::synthesize_simple;

const AGENT: f32 = 32.0;

#[test]
fn resolved_positions_never_overlap_walls() {
    let config = ArenaConfig::default();
    let building = synthesize_simple(Rect::new(200.0, 200.0, 150.0, 100.0), Side::North, &config);
    let buildings = vec![building];

    // Legal starting positions hugging the building from every direction,
    // pushed at every angle at the sprinting speed cap.
    let starts = [
        WorldPoint::new(160.0, 230.0),
        WorldPoint::new(355.0, 230.0),
        WorldPoint::new(250.0, 160.0),
        WorldPoint::new(250.0, 310.0),
        WorldPoint::new(166.0, 166.0),
    ];
    let speed = config.max_speed * config.sprint_multiplier;

    for start in starts {
        assert!(
            !is_obstructed(&Rect::new(start.x(), start.y(), AGENT, AGENT), &buildings, &[]),
            "test precondition: start {start:?} must be legal"
        );
        for step in 0..24 {
            let angle = step as f32 * std::f32::consts::TAU / 24.0;
            let displacement = WorldVec::new(angle.cos(), angle.sin()).scaled(speed);
            let outcome = resolve_move(start, AGENT, displacement, &buildings, &[]);
            let landed = Rect::new(outcome.position.x(), outcome.position.y(), AGENT, AGENT);
            assert!(
                !is_obstructed(&landed, &buildings, &[]),
                "angle {angle} from {start:?} landed inside a wall"
            );
        }
    }
}

#[test]
fn diagonal_push_into_a_wall_slides_along_it() {
    let config = ArenaConfig::default();
    let building = synthesize_simple(Rect::new(100.0, 0.0, 150.0, 150.0), Side::East, &config);

    // Agent just west of the building, pushed northeast: the east component
    // dies against the wall while the north component survives intact.
    let start = WorldPoint::new(66.0, 50.0);
    let outcome = resolve_move(
        start,
        AGENT,
        WorldVec::new(3.0, -2.0),
        &[building],
        &[],
    );

    assert!(outcome.blocked_x);
    assert!(!outcome.blocked_y);
    assert_eq!(outcome.position, WorldPoint::new(66.0, 48.0));
}

#[test]
fn agents_walk_through_door_gaps() {
    let config = ArenaConfig::default();
    let building = synthesize_simple(Rect::new(100.0, 100.0, 150.0, 100.0), Side::North, &config);
    let gap = building.doors()[0].rect();
    let buildings = vec![building];

    // Start above the building, horizontally centered in the 48-unit gap.
    let mut position = WorldPoint::new(gap.center_x() - AGENT / 2.0, 60.0);
    for _ in 0..40 {
        let outcome = resolve_move(position, AGENT, WorldVec::new(0.0, 2.0), &buildings, &[]);
        assert!(
            !outcome.blocked_y,
            "agent snagged at {position:?} while walking the doorway"
        );
        position = outcome.position;
    }

    // Forty steps of two units carry the agent well past the wall band.
    assert!(position.y() > 110.0);
}
