#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure combat system: tower firing, projectile flight, and collision resolution.
//!
//! One combat pass runs three phases in a fixed order: towers fire, every
//! projectile advances by its velocity, then projectiles collide with balloons.
//! A projectile fired this tick therefore moves once before it can hit.

use std::time::Duration;

use balloon_defence_core::{Balloon, BalloonId, Health, Projectile, Tower, TowerId, Viewport};
use glam::Vec2;
use tracing::debug;

/// A tower will not fire while any projectile is closer than this to it.
pub const PROJECTILE_THROTTLE_RADIUS: f32 = 20.0;

/// A projectile hits a balloon closer than this.
pub const COLLISION_RADIUS: f32 = 15.0;

/// Fraction of the tower-to-target gap a projectile covers per tick is `1 / AIM_DIVISOR`.
pub const AIM_DIVISOR: f32 = 10.0;

/// Record of a tower launching a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Shot {
    /// Tower that fired.
    pub tower: TowerId,
    /// Balloon the projectile was aimed at.
    pub target: BalloonId,
}

/// Record of a projectile striking a balloon.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hit {
    /// Balloon that was struck.
    pub balloon: BalloonId,
    /// Health left after the hit.
    pub remaining: Health,
}

impl Hit {
    /// Reports whether the hit destroyed the balloon.
    #[must_use]
    pub const fn popped(&self) -> bool {
        self.remaining.is_depleted()
    }
}

/// Everything that happened during one combat pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CombatReport {
    /// Projectiles launched, in tower order.
    pub shots: Vec<Shot>,
    /// Collisions, in projectile order.
    pub hits: Vec<Hit>,
}

impl CombatReport {
    /// Number of balloons destroyed during the pass.
    #[must_use]
    pub fn popped_count(&self) -> u32 {
        let popped = self.hits.iter().filter(|hit| hit.popped()).count();
        u32::try_from(popped).unwrap_or(u32::MAX)
    }
}

/// Tower combat system that sequences the firing, flight, and collision phases.
#[derive(Debug, Default)]
pub struct TowerCombat {
    report: CombatReport,
}

impl TowerCombat {
    /// Creates a new tower combat system with an empty report buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs one combat pass at level time `now`.
    ///
    /// Towers update their cooldowns in place, projectiles are advanced and
    /// culled against `bounds`, and destroyed balloons are removed from
    /// `balloons`. The returned report is cleared at the start of every pass.
    pub fn handle<'a, I>(
        &mut self,
        now: Duration,
        towers: I,
        balloons: &mut Vec<Balloon>,
        projectiles: &mut Vec<Projectile>,
        bounds: Option<Viewport>,
    ) -> &CombatReport
    where
        I: IntoIterator<Item = &'a mut Tower>,
    {
        self.report.shots.clear();
        self.report.hits.clear();

        fire(towers, balloons.as_slice(), projectiles, now, &mut self.report.shots);
        advance_projectiles(projectiles, bounds);
        resolve_collisions(projectiles, balloons, &mut self.report.hits);

        &self.report
    }
}

/// Lets every ready tower fire at the first balloon in range.
///
/// Balloons are scanned in collection order and the first one strictly
/// inside the tower's range is chosen, not the nearest. A ready tower's
/// cooldown restarts whether or not it found a target, giving a fixed cadence.
pub fn fire<'a, I>(
    towers: I,
    balloons: &[Balloon],
    projectiles: &mut Vec<Projectile>,
    now: Duration,
    out: &mut Vec<Shot>,
) where
    I: IntoIterator<Item = &'a mut Tower>,
{
    for tower in towers {
        if !tower.is_ready(now) {
            continue;
        }

        if !is_throttled(tower.position, projectiles) {
            if let Some(target) = first_in_range(tower, balloons) {
                projectiles.push(Projectile {
                    position: tower.position,
                    velocity: (target.position - tower.position) / AIM_DIVISOR,
                });
                debug!(
                    tower = tower.id.get(),
                    target = target.id.get(),
                    "tower fired"
                );
                out.push(Shot {
                    tower: tower.id,
                    target: target.id,
                });
            }
        }

        tower.next_shot_at = now.saturating_add(tower.cooldown());
    }
}

/// Moves every projectile by its velocity and drops those that left `bounds`.
///
/// The bounds are grown by [`COLLISION_RADIUS`] so a projectile can still hit a
/// balloon sitting on the edge of the play surface.
pub fn advance_projectiles(projectiles: &mut Vec<Projectile>, bounds: Option<Viewport>) {
    for projectile in projectiles.iter_mut() {
        *projectile = projectile.advanced();
    }

    if let Some(bounds) = bounds {
        projectiles.retain(|projectile| bounds.contains(projectile.position, COLLISION_RADIUS));
    }
}

/// Applies projectile hits to balloons.
///
/// Each projectile strikes the first balloon within [`COLLISION_RADIUS`] in
/// collection order and is consumed. A struck balloon loses one health and is
/// removed once none is left. Projectiles that hit nothing stay in flight.
pub fn resolve_collisions(
    projectiles: &mut Vec<Projectile>,
    balloons: &mut Vec<Balloon>,
    out: &mut Vec<Hit>,
) {
    projectiles.retain(|projectile| {
        let Some(index) = balloons
            .iter()
            .position(|balloon| within(balloon.position, projectile.position, COLLISION_RADIUS))
        else {
            return true;
        };

        let balloon = &mut balloons[index];
        balloon.health = balloon.health.damaged();
        let hit = Hit {
            balloon: balloon.id,
            remaining: balloon.health,
        };
        if hit.popped() {
            let _ = balloons.remove(index);
        }
        out.push(hit);
        false
    });
}

fn is_throttled(tower_position: Vec2, projectiles: &[Projectile]) -> bool {
    projectiles
        .iter()
        .any(|projectile| within(projectile.position, tower_position, PROJECTILE_THROTTLE_RADIUS))
}

fn first_in_range<'b>(tower: &Tower, balloons: &'b [Balloon]) -> Option<&'b Balloon> {
    balloons
        .iter()
        .find(|balloon| within(balloon.position, tower.position, tower.range))
}

fn within(a: Vec2, b: Vec2, radius: f32) -> bool {
    a.distance(b) < radius
}
