#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Balloon Defence engine.
//!
//! This crate defines the entity model and the message surface that connects
//! the host adapter, the authoritative world, and the pure systems. Adapters
//! submit [`Command`] values describing player intents or timer ticks, the
//! world executes those commands via its `apply` entry point, and then
//! broadcasts [`Event`] values describing what changed or why a command was
//! rejected. After each command the world can publish a [`FrameSnapshot`] that
//! the presentation layer renders without touching live state.

use std::{fmt, sync::Arc, time::Duration};

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fixed period of a single simulation tick.
pub const TICK_PERIOD: Duration = Duration::from_millis(50);

/// Money granted to the player when a level starts fresh.
pub const STARTING_MONEY: Money = Money::new(500);

/// Lives granted to the player when the session starts.
pub const STARTING_LIVES: u32 = 50;

/// Money earned whenever a balloon is popped.
pub const POP_REWARD: Money = Money::new(1);

/// Price of placing a tower with base stats.
pub const BASE_TOWER_COST: Money = Money::new(100);

/// Detection radius of a freshly placed tower.
pub const BASE_TOWER_RANGE: f32 = 150.0;

/// Shots per second of a freshly placed tower.
pub const BASE_FIRE_RATE: f32 = 1.0;

/// Projectile speed attribute of a freshly placed tower.
pub const BASE_PROJECTILE_SPEED: f32 = 10.0;

/// Index of the waypoint a freshly spawned balloon heads toward.
///
/// Balloons appear on waypoint zero, so their first target is the next one.
pub const FIRST_TARGET_WAYPOINT: usize = 1;

/// Lifecycle state of the simulation driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayState {
    /// The clock is halted; ticks are ignored but no state is discarded.
    Stopped,
    /// Ticks advance the simulation.
    Running,
    /// Every scheduled balloon has been resolved; waiting for reset or advance.
    LevelComplete,
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Sets the play surface size used to resolve normalized waypoints.
    ConfigureViewport {
        /// Width of the play surface in pixels.
        width: f32,
        /// Height of the play surface in pixels.
        height: f32,
    },
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Starts or resumes the active level.
    Start,
    /// Halts the clock without discarding entity state.
    Pause,
    /// Restarts the active level, keeping towers and money.
    ResetLevel,
    /// Moves on to the next catalog level with a fresh board and stake.
    AdvanceLevel,
    /// Requests placement of a base tower at the provided position.
    PlaceTower {
        /// Absolute position of the tower on the play surface.
        position: Vec2,
    },
    /// Shows a speculative upgrade of a tower without spending money.
    SelectUpgradeTrack {
        /// Tower being inspected.
        tower: TowerId,
        /// Track whose next level should be previewed.
        track: UpgradeTrack,
    },
    /// Discards any speculative upgrade shown for a tower.
    ClearUpgradePreview {
        /// Tower whose preview should be dropped.
        tower: TowerId,
    },
    /// Buys the next level of an upgrade track for a tower.
    PurchaseUpgrade {
        /// Tower receiving the upgrade.
        tower: TowerId,
        /// Track to advance by one level.
        track: UpgradeTrack,
    },
    /// Sells a tower for a partial refund of everything invested in it.
    SellTower {
        /// Tower to remove from play.
        tower: TowerId,
    },
    /// Toggles the range overlay drawn around a tower.
    SetRangeOverlay {
        /// Tower whose overlay changes.
        tower: TowerId,
        /// Whether the overlay should be drawn.
        visible: bool,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Confirms that the play surface size changed and waypoints were resolved.
    ViewportConfigured {
        /// Viewport now in effect.
        viewport: Viewport,
    },
    /// Reports that a viewport with unusable dimensions was ignored.
    ViewportRejected {
        /// Requested width.
        width: f32,
        /// Requested height.
        height: f32,
    },
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
        /// Total simulated time since the level started.
        elapsed: Duration,
    },
    /// Announces that the driver entered a new lifecycle state.
    PlayStateChanged {
        /// State that became active.
        state: PlayState,
    },
    /// Reports that a start request was refused.
    StartRejected {
        /// Specific reason the level cannot run.
        reason: StartError,
    },
    /// Confirms that a scheduled balloon entered the path.
    BalloonSpawned {
        /// Identifier assigned to the balloon.
        balloon: BalloonId,
        /// Position the balloon appeared at.
        position: Vec2,
    },
    /// Reports balloons that ran past the final waypoint during a tick.
    BalloonsEscaped {
        /// Number of balloons that escaped.
        count: u32,
        /// Lives left after the loss was applied.
        lives_remaining: u32,
    },
    /// Confirms that a tower launched a projectile.
    ProjectileFired {
        /// Tower that fired.
        tower: TowerId,
        /// Balloon the projectile was aimed at.
        target: BalloonId,
    },
    /// Reports a projectile hit that left the balloon alive.
    BalloonHit {
        /// Balloon that was struck.
        balloon: BalloonId,
        /// Health left after the hit.
        remaining: Health,
    },
    /// Confirms that a balloon was destroyed by a projectile.
    BalloonPopped {
        /// Balloon that was destroyed.
        balloon: BalloonId,
        /// Money credited for the pop.
        reward: Money,
    },
    /// Announces that every scheduled balloon of the level was resolved.
    LevelCompleted {
        /// Level that was completed.
        level: LevelId,
    },
    /// Confirms that the active level was restarted.
    LevelReset {
        /// Level that was restarted.
        level: LevelId,
    },
    /// Confirms that the driver moved to another level.
    LevelChanged {
        /// Level that became active.
        level: LevelId,
    },
    /// Confirms that a tower was placed on the board.
    TowerPlaced {
        /// Identifier assigned to the tower by the world.
        tower: TowerId,
        /// Position of the tower.
        position: Vec2,
        /// Money spent on the placement.
        cost: Money,
    },
    /// Reports that a tower placement request was rejected.
    TowerPlacementRejected {
        /// Position provided in the placement request.
        position: Vec2,
        /// Specific reason the placement failed.
        reason: PurchaseError,
    },
    /// Confirms that a speculative upgrade is being shown for a tower.
    UpgradePreviewed {
        /// Tower being previewed.
        tower: TowerId,
        /// Track being previewed.
        track: UpgradeTrack,
        /// Price the purchase would cost.
        cost: Money,
    },
    /// Confirms that a tower's speculative upgrade was discarded.
    UpgradePreviewCleared {
        /// Tower whose preview was dropped.
        tower: TowerId,
    },
    /// Confirms that an upgrade level was bought.
    UpgradePurchased {
        /// Tower that was upgraded.
        tower: TowerId,
        /// Track that advanced.
        track: UpgradeTrack,
        /// Money spent on the upgrade.
        cost: Money,
    },
    /// Reports that an upgrade purchase was rejected.
    UpgradeRejected {
        /// Tower targeted by the purchase.
        tower: TowerId,
        /// Track requested.
        track: UpgradeTrack,
        /// Specific reason the purchase failed.
        reason: PurchaseError,
    },
    /// Confirms that a tower was sold.
    TowerSold {
        /// Tower that left the board.
        tower: TowerId,
        /// Money credited for the sale.
        refund: Money,
    },
    /// Confirms that a tower's range overlay was toggled.
    RangeOverlayChanged {
        /// Tower whose overlay changed.
        tower: TowerId,
        /// Whether the overlay is now drawn.
        visible: bool,
    },
    /// Reports that a command referenced a tower that does not exist.
    TowerMissing {
        /// Identifier provided by the command.
        tower: TowerId,
    },
}

/// Reasons a purchase (placement or upgrade) may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum PurchaseError {
    /// The player cannot afford the purchase.
    #[error("insufficient funds: {required} required, {available} available")]
    InsufficientFunds {
        /// Price of the purchase.
        required: Money,
        /// Money the player holds.
        available: Money,
    },
    /// No tower with the provided identifier exists.
    #[error("tower {0} does not exist")]
    MissingTower(TowerId),
}

/// Reasons the driver may refuse to enter the running state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum StartError {
    /// The play surface size has not been configured yet.
    #[error("viewport has not been configured")]
    MissingViewport,
    /// The catalog has no definition for the active level.
    #[error("level {0} is not defined")]
    UnknownLevel(LevelId),
    /// The level was completed and must be reset or advanced first.
    #[error("level is complete; reset or advance before starting")]
    LevelComplete,
}

/// Amount of in-game currency.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Money(u32);

impl Money {
    /// No money at all.
    pub const ZERO: Self = Self(0);

    /// Creates a new amount from whole currency units.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the amount in whole currency units.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Adds two amounts, clamping at the numeric maximum.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Subtracts `other`, returning `None` when the result would be negative.
    #[must_use]
    pub const fn checked_sub(self, other: Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }

    /// Multiplies the amount by a whole factor, clamping at the numeric maximum.
    #[must_use]
    pub const fn saturating_mul(self, factor: u32) -> Self {
        Self(self.0.saturating_mul(factor))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}

/// Hit points carried by a balloon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Health(u32);

impl Health {
    /// Creates a new health value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric health value.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Reports whether no hit points remain.
    #[must_use]
    pub const fn is_depleted(&self) -> bool {
        self.0 == 0
    }

    /// Returns the health left after absorbing a single hit.
    #[must_use]
    pub const fn damaged(self) -> Self {
        Self(self.0.saturating_sub(1))
    }
}

/// One-based index into the level catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LevelId(u32);

impl LevelId {
    /// The first level of the catalog.
    pub const FIRST: Self = Self(1);

    /// Creates a new level identifier.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric level number.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for LevelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier assigned to a balloon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BalloonId(u32);

impl BalloonId {
    /// Creates a new balloon identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a tower.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TowerId(u32);

impl TowerId {
    /// Creates a new tower identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the tower identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for TowerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Size of the play surface in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    width: f32,
    height: f32,
}

impl Viewport {
    /// Creates a viewport, returning `None` unless both sides are finite and positive.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Option<Self> {
        let usable = |side: f32| side.is_finite() && side > 0.0;
        if usable(width) && usable(height) {
            Some(Self { width, height })
        } else {
            None
        }
    }

    /// Width of the play surface.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Height of the play surface.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// Converts a normalized point into absolute play surface coordinates.
    #[must_use]
    pub fn to_absolute(&self, point: NormalizedPoint) -> Vec2 {
        Vec2::new(point.x() * self.width, point.y() * self.height)
    }

    /// Reports whether `point` lies on the surface grown by `margin` on every side.
    #[must_use]
    pub fn contains(&self, point: Vec2, margin: f32) -> bool {
        point.x >= -margin
            && point.y >= -margin
            && point.x <= self.width + margin
            && point.y <= self.height + margin
    }
}

/// Point expressed as fractions of the viewport width and height.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPoint {
    x: f32,
    y: f32,
}

impl NormalizedPoint {
    /// Creates a normalized point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Horizontal fraction of the viewport width.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Vertical fraction of the viewport height.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }
}

/// Scheduled appearance of a single balloon within a level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MobSpawn {
    spawn_at: Duration,
    health: Health,
    speed: f32,
}

impl MobSpawn {
    /// Creates a spawn entry.
    #[must_use]
    pub const fn new(spawn_at: Duration, health: Health, speed: f32) -> Self {
        Self {
            spawn_at,
            health,
            speed,
        }
    }

    /// Level time at which the balloon appears.
    #[must_use]
    pub const fn spawn_at(&self) -> Duration {
        self.spawn_at
    }

    /// Starting health of the balloon.
    #[must_use]
    pub const fn health(&self) -> Health {
        self.health
    }

    /// Distance the balloon travels per tick.
    #[must_use]
    pub const fn speed(&self) -> f32 {
        self.speed
    }
}

/// Absolute waypoint sequence shared by every balloon on a level.
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    waypoints: Arc<[Vec2]>,
}

impl Path {
    /// Wraps resolved waypoints into a shareable path.
    #[must_use]
    pub fn from_waypoints(waypoints: Vec<Vec2>) -> Self {
        Self {
            waypoints: waypoints.into(),
        }
    }

    /// Waypoint stored at `index`, if any.
    #[must_use]
    pub fn waypoint(&self, index: usize) -> Option<Vec2> {
        self.waypoints.get(index).copied()
    }

    /// First waypoint of the path, where balloons appear.
    #[must_use]
    pub fn first(&self) -> Option<Vec2> {
        self.waypoint(0)
    }

    /// Number of waypoints in the path.
    #[must_use]
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Reports whether the path has no waypoints.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// All waypoints in traversal order.
    #[must_use]
    pub fn waypoints(&self) -> &[Vec2] {
        &self.waypoints
    }

    /// Reports whether both paths share the same allocation.
    #[must_use]
    pub fn shares_waypoints(&self, other: &Path) -> bool {
        Arc::ptr_eq(&self.waypoints, &other.waypoints)
    }
}

/// A balloon travelling along a level path.
#[derive(Clone, Debug, PartialEq)]
pub struct Balloon {
    /// Identifier allocated by the world.
    pub id: BalloonId,
    /// Current position on the play surface.
    pub position: Vec2,
    /// Distance travelled per tick.
    pub speed: f32,
    /// Path the balloon follows.
    pub path: Path,
    /// Index of the waypoint the balloon is heading toward.
    pub waypoint_index: usize,
    /// Hit points left.
    pub health: Health,
}

impl Balloon {
    /// Places a scheduled balloon on the first waypoint of `path`.
    ///
    /// Returns `None` when the path has no waypoints.
    #[must_use]
    pub fn spawn(id: BalloonId, spawn: &MobSpawn, path: Path) -> Option<Self> {
        let position = path.first()?;
        Some(Self {
            id,
            position,
            speed: spawn.speed(),
            path,
            waypoint_index: FIRST_TARGET_WAYPOINT,
            health: spawn.health(),
        })
    }

    /// Waypoint the balloon is currently heading toward.
    #[must_use]
    pub fn target(&self) -> Option<Vec2> {
        self.path.waypoint(self.waypoint_index)
    }

    /// Reports whether the balloon ran past the final waypoint.
    #[must_use]
    pub fn has_exited(&self) -> bool {
        self.waypoint_index >= self.path.len()
    }
}

/// Upgrade tracks a tower can advance along.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpgradeTrack {
    /// Extends the detection radius.
    Range,
    /// Increases fire rate and projectile speed.
    FireSpeed,
    /// Increases the piercing attribute.
    Piercing,
}

impl UpgradeTrack {
    /// Every track in presentation order.
    pub const ALL: [Self; 3] = [Self::Range, Self::FireSpeed, Self::Piercing];

    /// Price of the first level of the track.
    #[must_use]
    pub const fn base_cost(self) -> Money {
        match self {
            Self::Range => Money::new(50),
            Self::FireSpeed => Money::new(75),
            Self::Piercing => Money::new(100),
        }
    }
}

impl fmt::Display for UpgradeTrack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Range => "range",
            Self::FireSpeed => "fire speed",
            Self::Piercing => "piercing",
        };
        f.write_str(label)
    }
}

/// Levels purchased on each upgrade track of a tower.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UpgradeLevels {
    range: u32,
    fire_speed: u32,
    piercing: u32,
}

impl UpgradeLevels {
    /// Level purchased on `track`.
    #[must_use]
    pub const fn level(&self, track: UpgradeTrack) -> u32 {
        match track {
            UpgradeTrack::Range => self.range,
            UpgradeTrack::FireSpeed => self.fire_speed,
            UpgradeTrack::Piercing => self.piercing,
        }
    }

    /// Returns a copy with `track` advanced by one level.
    #[must_use]
    pub fn incremented(self, track: UpgradeTrack) -> Self {
        let mut next = self;
        match track {
            UpgradeTrack::Range => next.range = next.range.saturating_add(1),
            UpgradeTrack::FireSpeed => next.fire_speed = next.fire_speed.saturating_add(1),
            UpgradeTrack::Piercing => next.piercing = next.piercing.saturating_add(1),
        }
        next
    }
}

/// A player-placed tower.
#[derive(Clone, Debug, PartialEq)]
pub struct Tower {
    /// Identifier allocated by the world.
    pub id: TowerId,
    /// Position of the tower on the play surface.
    pub position: Vec2,
    /// Detection radius; balloons strictly closer than this can be targeted.
    pub range: f32,
    /// Shots per second.
    pub fire_rate: f32,
    /// Projectile speed attribute.
    pub projectile_speed: f32,
    /// Piercing attribute.
    pub piercing: u32,
    /// Total money invested in the tower, including upgrades.
    pub cost: Money,
    /// Levels purchased on each upgrade track.
    pub upgrades: UpgradeLevels,
    /// Level time at which the tower may fire again.
    pub next_shot_at: Duration,
    /// Whether the range overlay is drawn around the tower.
    pub range_overlay_visible: bool,
}

impl Tower {
    /// Creates a tower with base stats at `position`.
    #[must_use]
    pub fn new(id: TowerId, position: Vec2) -> Self {
        Self {
            id,
            position,
            range: BASE_TOWER_RANGE,
            fire_rate: BASE_FIRE_RATE,
            projectile_speed: BASE_PROJECTILE_SPEED,
            piercing: 0,
            cost: BASE_TOWER_COST,
            upgrades: UpgradeLevels::default(),
            next_shot_at: Duration::ZERO,
            range_overlay_visible: false,
        }
    }

    /// Time between two firing attempts.
    ///
    /// A non-positive or non-finite fire rate never becomes ready again.
    #[must_use]
    pub fn cooldown(&self) -> Duration {
        if !self.fire_rate.is_finite() || self.fire_rate <= 0.0 {
            return Duration::MAX;
        }
        Duration::try_from_secs_f32(self.fire_rate.recip()).unwrap_or(Duration::MAX)
    }

    /// Reports whether the cooldown elapsed at level time `now`.
    #[must_use]
    pub fn is_ready(&self, now: Duration) -> bool {
        now >= self.next_shot_at
    }
}

/// A projectile travelling in a straight line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projectile {
    /// Current position on the play surface.
    pub position: Vec2,
    /// Displacement applied every tick.
    pub velocity: Vec2,
}

impl Projectile {
    /// Returns the projectile moved by one tick of its velocity.
    #[must_use]
    pub fn advanced(self) -> Self {
        Self {
            position: self.position + self.velocity,
            velocity: self.velocity,
        }
    }
}

/// Immutable representation of a balloon used for rendering.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BalloonSnapshot {
    /// Identifier of the balloon.
    pub id: BalloonId,
    /// Current position.
    pub position: Vec2,
    /// Hit points left.
    pub health: Health,
    /// Index of the waypoint the balloon is heading toward.
    pub waypoint_index: usize,
}

/// Immutable representation of a tower used for rendering.
///
/// When an upgrade preview is active the preview replaces the committed tower
/// here; the committed tower is never modified by a preview.
#[derive(Clone, Debug, PartialEq)]
pub struct TowerSnapshot {
    /// Tower as it should be drawn.
    pub tower: Tower,
    /// Track being previewed, if the drawn tower is speculative.
    pub previewing: Option<UpgradeTrack>,
}

/// Read-only snapshot of everything the presentation layer draws after a tick.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameSnapshot {
    /// Active level.
    pub level: LevelId,
    /// Driver lifecycle state.
    pub play_state: PlayState,
    /// Money held by the player.
    pub money: Money,
    /// Lives left.
    pub lives: u32,
    /// Simulated time since the level started.
    pub elapsed: Duration,
    /// Absolute waypoints of the active path.
    pub waypoints: Vec<Vec2>,
    /// Live balloons in collection order.
    pub balloons: Vec<BalloonSnapshot>,
    /// Towers in placement order.
    pub towers: Vec<TowerSnapshot>,
    /// Projectiles in flight.
    pub projectiles: Vec<Projectile>,
}

impl FrameSnapshot {
    /// Reports whether the level-complete dialog should be shown.
    #[must_use]
    pub fn level_complete(&self) -> bool {
        self.play_state == PlayState::LevelComplete
    }
}
