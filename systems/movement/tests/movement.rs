use balloon_defence_core::{Balloon, BalloonId, Health, MobSpawn, Path};
use balloon_defence_system_movement::{advance, WAYPOINT_SNAP_DISTANCE};
use glam::Vec2;
use proptest::prelude::*;
use std::time::Duration;

fn spawn_on(path: &Path, id: u32, speed: f32) -> Balloon {
    let spawn = MobSpawn::new(Duration::ZERO, Health::new(1), speed);
    Balloon::spawn(BalloonId::new(id), &spawn, path.clone()).expect("path has waypoints")
}

fn zigzag_path() -> Path {
    Path::from_waypoints(vec![
        Vec2::new(37.5, 66.7),
        Vec2::new(337.5, 66.7),
        Vec2::new(337.5, 200.1),
        Vec2::new(37.5, 200.1),
        Vec2::new(375.0, 200.1),
    ])
}

#[test]
fn balloon_traverses_whole_path_and_exits_once() {
    let path = zigzag_path();
    let mut balloons = vec![spawn_on(&path, 0, 2.0)];
    let mut exits = 0;
    let mut last_index = 1;

    for _ in 0..10_000 {
        let outcome = advance(balloons);
        exits += outcome.exited_count();
        balloons = outcome.balloons;
        if let Some(balloon) = balloons.first() {
            assert!(balloon.waypoint_index >= last_index, "index never regresses");
            assert!(balloon.waypoint_index < path.len());
            last_index = balloon.waypoint_index;
        } else {
            break;
        }
    }

    assert!(balloons.is_empty(), "balloon should have left the path");
    assert_eq!(exits, 1);
}

#[test]
fn order_of_survivors_is_preserved() {
    let path = zigzag_path();
    let balloons: Vec<_> = (0..5).map(|id| spawn_on(&path, id, 1.0 + id as f32)).collect();

    let outcome = advance(balloons);

    let ids: Vec<_> = outcome.balloons.iter().map(|balloon| balloon.id.get()).collect();
    assert_eq!(ids, vec![0, 1, 2, 3, 4]);
    assert!(outcome.exited.is_empty());
}

proptest! {
    #[test]
    fn a_single_step_never_moves_farther_than_speed(
        start_x in 0.0f32..500.0,
        start_y in 0.0f32..500.0,
        target_x in 0.0f32..500.0,
        target_y in 0.0f32..500.0,
        speed in 0.5f32..20.0,
    ) {
        let start = Vec2::new(start_x, start_y);
        let target = Vec2::new(target_x, target_y);
        let path = Path::from_waypoints(vec![start, target, Vec2::new(900.0, 900.0)]);
        let balloon = spawn_on(&path, 0, speed);

        let outcome = advance(vec![balloon]);
        let moved = outcome.balloons[0].position.distance(start);
        let gap = start.distance(target);

        if gap < WAYPOINT_SNAP_DISTANCE {
            prop_assert_eq!(outcome.balloons[0].position, target);
            prop_assert_eq!(outcome.balloons[0].waypoint_index, 2);
        } else {
            prop_assert!((moved - speed).abs() <= speed * 1e-4 + 1e-3);
            prop_assert_eq!(outcome.balloons[0].waypoint_index, 1);
        }
    }

    #[test]
    fn exit_happens_exactly_after_last_waypoint(waypoints in 2usize..8) {
        let points: Vec<Vec2> = (0..waypoints)
            .map(|index| Vec2::new(index as f32 * 30.0, (index % 2) as f32 * 30.0))
            .collect();
        let path = Path::from_waypoints(points);
        let mut balloons = vec![spawn_on(&path, 0, 3.0)];

        for _ in 0..10_000 {
            let before = balloons[0].waypoint_index;
            let outcome = advance(balloons);
            if outcome.exited_count() == 1 {
                prop_assert_eq!(before, waypoints - 1);
                prop_assert!(outcome.balloons.is_empty());
                return Ok(());
            }
            balloons = outcome.balloons;
        }
        prop_assert!(false, "balloon never exited");
    }
}
