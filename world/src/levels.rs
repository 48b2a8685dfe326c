//! Static catalog of level layouts and spawn schedules.

use std::time::Duration;

use balloon_defence_core::{Health, LevelId, MobSpawn, NormalizedPoint, Viewport};
use glam::Vec2;

/// Read-only description of a single level.
#[derive(Debug)]
pub struct LevelDefinition {
    id: LevelId,
    waypoints: &'static [NormalizedPoint],
    mobs: &'static [MobSpawn],
}

impl LevelDefinition {
    /// Catalog number of the level.
    #[must_use]
    pub const fn id(&self) -> LevelId {
        self.id
    }

    /// Path waypoints as fractions of the viewport.
    #[must_use]
    pub const fn waypoints(&self) -> &'static [NormalizedPoint] {
        self.waypoints
    }

    /// Spawn schedule ordered by spawn time.
    #[must_use]
    pub const fn mobs(&self) -> &'static [MobSpawn] {
        self.mobs
    }

    /// Converts the normalized path into absolute coordinates for `viewport`.
    #[must_use]
    pub fn resolve(&self, viewport: Viewport) -> Vec<Vec2> {
        self.waypoints
            .iter()
            .map(|point| viewport.to_absolute(*point))
            .collect()
    }
}

const fn point(x: f32, y: f32) -> NormalizedPoint {
    NormalizedPoint::new(x, y)
}

const fn mob(spawn_at_ms: u64) -> MobSpawn {
    MobSpawn::new(Duration::from_millis(spawn_at_ms), Health::new(1), 2.0)
}

static SERPENTINE_PATH: [NormalizedPoint; 11] = [
    point(0.1, 0.1),
    point(0.9, 0.1),
    point(0.9, 0.3),
    point(0.1, 0.3),
    point(0.1, 0.5),
    point(0.9, 0.5),
    point(0.9, 0.7),
    point(0.1, 0.7),
    point(0.1, 0.9),
    point(0.9, 0.9),
    point(1.0, 0.9),
];

static SERPENTINE_MOBS: [MobSpawn; 5] = [mob(1000), mob(2000), mob(3000), mob(4000), mob(5000)];

static TIGHT_WEAVE_PATH: [NormalizedPoint; 11] = [
    point(0.1, 0.5),
    point(0.9, 0.5),
    point(0.9, 0.52),
    point(0.1, 0.52),
    point(0.1, 0.54),
    point(0.9, 0.54),
    point(0.9, 0.56),
    point(0.1, 0.56),
    point(0.1, 0.58),
    point(0.9, 0.58),
    point(1.0, 0.58),
];

static TIGHT_WEAVE_MOBS: [MobSpawn; 6] = [
    mob(1000),
    mob(1500),
    mob(2000),
    mob(2500),
    mob(3000),
    mob(3500),
];

static BOX_PATH: [NormalizedPoint; 7] = [
    point(0.2, 0.4),
    point(0.8, 0.4),
    point(0.8, 0.6),
    point(0.2, 0.6),
    point(0.2, 0.8),
    point(0.8, 0.8),
    point(1.0, 0.8),
];

static BOX_MOBS: [MobSpawn; 8] = [
    mob(500),
    mob(1000),
    mob(1500),
    mob(2000),
    mob(2500),
    mob(3000),
    mob(3500),
    mob(4000),
];

static CATALOG: [LevelDefinition; 3] = [
    LevelDefinition {
        id: LevelId::new(1),
        waypoints: &SERPENTINE_PATH,
        mobs: &SERPENTINE_MOBS,
    },
    LevelDefinition {
        id: LevelId::new(2),
        waypoints: &TIGHT_WEAVE_PATH,
        mobs: &TIGHT_WEAVE_MOBS,
    },
    LevelDefinition {
        id: LevelId::new(3),
        waypoints: &BOX_PATH,
        mobs: &BOX_MOBS,
    },
];

/// Every defined level in catalog order.
#[must_use]
pub fn levels() -> &'static [LevelDefinition] {
    &CATALOG
}

/// Looks up the definition of level `id`.
#[must_use]
pub fn level(id: LevelId) -> Option<&'static LevelDefinition> {
    let index = usize::try_from(id.get()).ok()?.checked_sub(1)?;
    CATALOG.get(index)
}

/// Absolute waypoints of level `id`; empty when the level is not defined.
#[must_use]
pub fn resolve_waypoints(id: LevelId, viewport: Viewport) -> Vec<Vec2> {
    level(id).map_or_else(Vec::new, |definition| definition.resolve(viewport))
}

/// Level that follows `id`, wrapping to the first after the last defined one.
#[must_use]
pub fn next_level(id: LevelId) -> LevelId {
    let next = LevelId::new(id.get().saturating_add(1));
    if level(next).is_some() {
        next
    } else {
        LevelId::FIRST
    }
}
