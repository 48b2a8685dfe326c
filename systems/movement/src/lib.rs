#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic movement system that advances balloons along their paths.

use balloon_defence_core::{Balloon, BalloonId};
use tracing::warn;

/// Distance below which a balloon snaps onto its target waypoint.
///
/// Snapping absorbs overshoot when the per-tick speed exceeds the remaining
/// distance, so balloons never oscillate around a waypoint.
pub const WAYPOINT_SNAP_DISTANCE: f32 = 5.0;

/// Result of advancing every balloon by one tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MovementOutcome {
    /// Balloons still travelling, in their original order.
    pub balloons: Vec<Balloon>,
    /// Balloons that ran past the final waypoint this tick.
    pub exited: Vec<BalloonId>,
}

impl MovementOutcome {
    /// Number of balloons that escaped, i.e. lives the caller should deduct.
    #[must_use]
    pub fn exited_count(&self) -> u32 {
        u32::try_from(self.exited.len()).unwrap_or(u32::MAX)
    }
}

/// Moves every balloon toward its current waypoint and splits off escapees.
///
/// The collection order of surviving balloons is preserved because combat
/// resolves targets by first match in that order.
#[must_use]
pub fn advance(balloons: Vec<Balloon>) -> MovementOutcome {
    let mut outcome = MovementOutcome {
        balloons: Vec::with_capacity(balloons.len()),
        exited: Vec::new(),
    };

    for mut balloon in balloons {
        step(&mut balloon);
        if balloon.has_exited() {
            outcome.exited.push(balloon.id);
        } else {
            outcome.balloons.push(balloon);
        }
    }

    outcome
}

fn step(balloon: &mut Balloon) {
    let Some(target) = balloon.target() else {
        warn!(
            balloon = balloon.id.get(),
            waypoint_index = balloon.waypoint_index,
            path_len = balloon.path.len(),
            "live balloon has no target waypoint"
        );
        return;
    };

    let offset = target - balloon.position;
    let distance = offset.length();
    if distance < WAYPOINT_SNAP_DISTANCE {
        balloon.position = target;
        balloon.waypoint_index = balloon.waypoint_index.saturating_add(1);
        return;
    }

    balloon.position += offset * (balloon.speed / distance);
}

#[cfg(test)]
mod tests {
    use super::*;
    use balloon_defence_core::{Health, Path};
    use glam::Vec2;

    fn balloon_on(path: &Path, position: Vec2, waypoint_index: usize) -> Balloon {
        Balloon {
            id: BalloonId::new(1),
            position,
            speed: 2.0,
            path: path.clone(),
            waypoint_index,
            health: Health::new(1),
        }
    }

    fn straight_path() -> Path {
        Path::from_waypoints(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(100.0, 0.0),
            Vec2::new(100.0, 100.0),
        ])
    }

    #[test]
    fn moves_exactly_speed_toward_target() {
        let path = straight_path();
        let mut balloon = balloon_on(&path, Vec2::new(0.0, 0.0), 1);

        step(&mut balloon);

        assert_eq!(balloon.position, Vec2::new(2.0, 0.0));
        assert_eq!(balloon.waypoint_index, 1);
    }

    #[test]
    fn snaps_onto_waypoint_inside_threshold() {
        let path = straight_path();
        let mut balloon = balloon_on(&path, Vec2::new(96.0, 0.0), 1);

        step(&mut balloon);

        assert_eq!(balloon.position, Vec2::new(100.0, 0.0));
        assert_eq!(balloon.waypoint_index, 2);
    }

    #[test]
    fn distance_equal_to_threshold_still_moves() {
        let path = straight_path();
        let mut balloon = balloon_on(&path, Vec2::new(95.0, 0.0), 1);

        step(&mut balloon);

        assert_eq!(balloon.position, Vec2::new(97.0, 0.0));
        assert_eq!(balloon.waypoint_index, 1);
    }

    #[test]
    fn passing_final_waypoint_reports_exit() {
        let path = straight_path();
        let leaving = balloon_on(&path, Vec2::new(100.0, 98.0), 2);
        let mut staying = balloon_on(&path, Vec2::new(10.0, 0.0), 1);
        staying.id = BalloonId::new(2);

        let outcome = advance(vec![leaving, staying]);

        assert_eq!(outcome.exited, vec![BalloonId::new(1)]);
        assert_eq!(outcome.exited_count(), 1);
        assert_eq!(outcome.balloons.len(), 1);
        assert_eq!(outcome.balloons[0].id, BalloonId::new(2));
    }

    #[test]
    fn balloon_without_target_is_left_in_place() {
        let path = straight_path();
        let mut balloon = balloon_on(&path, Vec2::new(40.0, 40.0), 7);

        step(&mut balloon);

        assert_eq!(balloon.position, Vec2::new(40.0, 40.0));
        assert_eq!(balloon.waypoint_index, 7);
    }
}
