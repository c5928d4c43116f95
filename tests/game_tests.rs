//! Game integration tests driven through the public move protocol.

use sprouts_engine::core::{EdgeId, GameConfig, Location, MoveRecord, MoveResult, PointId, RegionId, SproutsError};
use sprouts_engine::game::{GameEvent, SproutsGame};
use sprouts_engine::geometry::{PathHandle, BezierGeometry};
use sprouts_engine::loops::detect_loops;

type Game = SproutsGame<BezierGeometry>;

fn new_game(points: usize) -> Game {
    SproutsGame::new(GameConfig::new(points), BezierGeometry::new()).unwrap()
}

fn drawn(game: &mut Game, a: u32, via: &[(f64, f64)], b: u32) -> PathHandle {
    let mut points = vec![game.point(PointId::new(a)).unwrap().location];
    points.extend(via.iter().map(|&(x, y)| Location::new(x, y)));
    points.push(game.point(PointId::new(b)).unwrap().location);
    game.geometry_mut().add_path(points)
}

fn connect(game: &mut Game, a: u32, via: &[(f64, f64)], b: u32) -> Result<MoveResult, SproutsError> {
    let path = drawn(game, a, via, b);
    game.start_move(PointId::new(a))?;
    game.try_complete_move(PointId::new(b), path)
}

// =============================================================================
// Setup
// =============================================================================

/// Test that a default game opens with six active points in the root region.
#[test]
fn test_default_setup() {
    let game = new_game(6);

    assert_eq!(game.points().count(), 6);
    assert!(game.points().all(|p| p.active));
    assert_eq!(game.root_region().inner_points.len(), 6);
    assert!(game.root_region().inner_regions.is_empty());
    assert_eq!(game.edges().count(), 0);
    assert!(!game.is_terminal());
}

/// Test that the starting points sit on the configured circle.
#[test]
fn test_layout_follows_config() {
    let config = GameConfig::new(4)
        .with_radius(10.0)
        .with_center(Location::new(100.0, 100.0));
    let game = SproutsGame::new(config, BezierGeometry::new()).unwrap();

    let expected = [(100.0, 90.0), (110.0, 100.0), (100.0, 110.0), (90.0, 100.0)];
    for (i, &(x, y)) in expected.iter().enumerate() {
        let location = game.point(PointId::new(i as u32)).unwrap().location;
        assert!(location.approx_eq(Location::new(x, y), 1e-9), "point {} at {}", i, location);
    }
}

/// Test that a config read from partial JSON drives the game.
#[test]
fn test_config_from_json() {
    let config: GameConfig = serde_json::from_str(r#"{"starting_point_count": 3}"#).unwrap();
    let game = SproutsGame::new(config, BezierGeometry::new()).unwrap();

    assert_eq!(game.points().count(), 3);
    assert_eq!(game.config().layout_radius, 150.0);
}

// =============================================================================
// Scenarios
// =============================================================================

/// Test that joining two unconnected points closes no loop.
#[test]
fn test_first_connection() {
    let mut game = new_game(6);

    let result = connect(&mut game, 0, &[], 1).unwrap();

    assert!(!result.closed_loop());
    assert_eq!(game.point(PointId::new(0)).unwrap().degree(), 1);
    assert_eq!(game.point(PointId::new(1)).unwrap().degree(), 1);
    assert!(!game.is_terminal());
}

/// Test that closing a triangle carves one region bounded by its corners.
#[test]
fn test_triangle() {
    let mut game = new_game(6);
    connect(&mut game, 0, &[], 1).unwrap();
    connect(&mut game, 1, &[], 2).unwrap();

    let loops = detect_loops(game.graph(), PointId::new(2), PointId::new(0)).unwrap();
    assert_eq!(loops.len(), 1);
    assert_eq!(loops[0].points.len(), 3);

    let result = connect(&mut game, 2, &[], 0).unwrap();

    assert_eq!(result.new_regions_created.len(), 1);
    let region = game.region(result.new_regions_created[0]).unwrap();
    assert_eq!(
        region.boundary_points,
        vec![PointId::new(0), PointId::new(1), PointId::new(2)]
    );
    for i in 0..3 {
        let point = game.point(PointId::new(i)).unwrap();
        assert_eq!(point.degree(), 2);
        assert!(point.active);
    }
}

/// Test that a finished game stays finished under further attempts.
#[test]
fn test_terminal_stays_terminal() {
    let mut game = new_game(2);
    connect(&mut game, 0, &[], 1).unwrap();
    connect(&mut game, 0, &[(100.0, 0.0)], 1).unwrap();
    let last = connect(&mut game, 0, &[(-100.0, 0.0)], 1).unwrap();
    assert!(last.game_over);

    for region in game.regions() {
        let active = region
            .inner_points
            .iter()
            .filter(|&&p| game.point(p).unwrap().active)
            .count();
        assert!(active < 2, "{} still has {} active points", region.id, active);
    }

    for _ in 0..3 {
        assert_eq!(connect(&mut game, 1, &[(200.0, 0.0)], 0), Err(SproutsError::GameOver));
        assert!(game.is_terminal());
        assert!(game.evaluate_terminal().unwrap());
    }
}

// =============================================================================
// Rejections
// =============================================================================

/// Test that a rejected move leaves history, events and board untouched.
#[test]
fn test_rejection_is_side_effect_free() {
    let mut game = new_game(6);
    connect(&mut game, 0, &[], 3).unwrap();
    game.drain_events();
    let edges_before: Vec<EdgeId> = game.edges().map(|e| e.id).collect();

    let err = connect(&mut game, 1, &[], 5).unwrap_err();

    assert!(matches!(err, SproutsError::CrossesEdge { .. }));
    assert!(!err.is_fatal());
    assert_eq!(game.edges().map(|e| e.id).collect::<Vec<_>>(), edges_before);
    assert_eq!(game.history().len(), 1);
    assert!(game.drain_events().is_empty());
    assert_eq!(game.point(PointId::new(1)).unwrap().degree(), 0);
}

/// Test that a path running through a third point is rejected and leaves
/// that point free to move.
#[test]
fn test_path_through_point_is_rejected() {
    let mut game = new_game(3);
    let middle = game.point(PointId::new(1)).unwrap().location;

    let err = connect(&mut game, 0, &[(middle.x, middle.y)], 2).unwrap_err();

    assert_eq!(err, SproutsError::PassesThroughPoint { point: PointId::new(1) });
    assert!(!err.is_fatal());
    assert_eq!(game.point(PointId::new(1)).unwrap().degree(), 0);
    assert_eq!(game.edges().count(), 0);
    assert!(game.history().is_empty());

    connect(&mut game, 1, &[], 0).unwrap();
    connect(&mut game, 1, &[], 2).unwrap();
    assert!(!game.is_terminal());
    assert!(!game.evaluate_terminal().unwrap());
}

/// Test that the point clearance comes from the config.
#[test]
fn test_point_clearance_from_config() {
    let config = GameConfig::new(3).with_point_clearance(5.0);
    let mut game = SproutsGame::new(config, BezierGeometry::new()).unwrap();
    let middle = game.point(PointId::new(1)).unwrap().location;

    let err = connect(&mut game, 0, &[(middle.x, middle.y + 2.0)], 2).unwrap_err();
    assert_eq!(err, SproutsError::PassesThroughPoint { point: PointId::new(1) });

    connect(&mut game, 0, &[(middle.x, middle.y + 20.0)], 2).unwrap();
}

/// Test that a point cannot be connected to an unknown point.
#[test]
fn test_unknown_candidate() {
    let mut game = new_game(3);
    let path = drawn(&mut game, 0, &[], 1);
    game.start_move(PointId::new(0)).unwrap();

    let err = game.try_complete_move(PointId::new(42), path).unwrap_err();

    assert_eq!(err, SproutsError::UnknownPoint(PointId::new(42)));
    assert_eq!(game.pending_origin(), None);
}

// =============================================================================
// History and events
// =============================================================================

/// Test that history records connections and placements in order.
#[test]
fn test_history() {
    let mut game = new_game(6);
    connect(&mut game, 0, &[], 1).unwrap();
    let a = game.point(PointId::new(0)).unwrap().location;
    let b = game.point(PointId::new(1)).unwrap().location;
    let point = game.place_point_mid_edge(EdgeId::new(0), a.lerp(b, 0.5)).unwrap();

    let history = game.history();
    assert_eq!(history.len(), 2);
    assert!(history.iter().enumerate().all(|(i, r)| r.sequence() == i as u32));
    match &history[1] {
        MoveRecord::PlacePoint { point: placed, split, .. } => {
            assert_eq!(*placed, point);
            assert_eq!(*split, EdgeId::new(0));
        }
        other => panic!("unexpected record {:?}", other),
    }

    let json = serde_json::to_string(history).unwrap();
    let parsed: Vec<MoveRecord> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.as_slice(), history);
}

/// Test that deactivation and game over are reported as events.
#[test]
fn test_events_to_game_over() {
    let mut game = new_game(2);
    connect(&mut game, 0, &[], 1).unwrap();
    connect(&mut game, 0, &[(100.0, 0.0)], 1).unwrap();
    game.drain_events();

    connect(&mut game, 0, &[(-100.0, 0.0)], 1).unwrap();

    let events = game.drain_events();
    let deactivated: Vec<PointId> = events
        .iter()
        .filter_map(|e| match e {
            GameEvent::PointDeactivated { point } => Some(*point),
            _ => None,
        })
        .collect();
    assert_eq!(deactivated, vec![PointId::new(0), PointId::new(1)]);
    let created = events
        .iter()
        .filter(|e| matches!(e, GameEvent::RegionCreated { parent, .. } if *parent == RegionId::ROOT))
        .count();
    assert_eq!(created, 2);
    assert_eq!(events.last(), Some(&GameEvent::GameOver));
}
