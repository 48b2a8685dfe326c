#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Balloon Defence.
//!
//! The world owns every entity collection and the round's economy counters.
//! Adapters mutate it only through [`apply`] and read it only through
//! [`query`], which keeps the fire-then-move-then-collide ordering of a tick
//! intact no matter how the host schedules commands.

pub mod levels;
mod towers;

use std::time::Duration;

use balloon_defence_core::{
    Balloon, BalloonId, Command, Event, LevelId, MobSpawn, Money, Path, PlayState, Projectile,
    PurchaseError, StartError, Viewport, BASE_TOWER_COST, POP_REWARD, STARTING_LIVES,
    STARTING_MONEY,
};
use balloon_defence_system_economy as economy;
use balloon_defence_system_movement as movement;
use balloon_defence_system_spawning::{last_spawn_time, Spawning};
use balloon_defence_system_tower_combat::TowerCombat;
use tracing::{debug, info, warn};

use towers::TowerRegistry;

/// Session parameters applied when the world is created or a level advances.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Money granted at the start and whenever the player advances a level.
    pub starting_money: Money,
    /// Lives granted once per session.
    pub starting_lives: u32,
    /// Level the session opens on.
    pub initial_level: LevelId,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            starting_money: STARTING_MONEY,
            starting_lives: STARTING_LIVES,
            initial_level: LevelId::FIRST,
        }
    }
}

/// Represents the authoritative Balloon Defence world state.
#[derive(Debug)]
pub struct World {
    config: Config,
    viewport: Option<Viewport>,
    level: LevelId,
    path: Path,
    play_state: PlayState,
    spawning: Spawning,
    elapsed: Duration,
    money: Money,
    lives: u32,
    balloons: Vec<Balloon>,
    towers: TowerRegistry,
    projectiles: Vec<Projectile>,
    next_balloon_id: BalloonId,
    combat: TowerCombat,
}

impl World {
    /// Creates a new world with the default session parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates a new world using the provided session parameters.
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            viewport: None,
            level: config.initial_level,
            path: Path::from_waypoints(Vec::new()),
            play_state: PlayState::Stopped,
            spawning: Spawning::new(),
            elapsed: Duration::ZERO,
            money: config.starting_money,
            lives: config.starting_lives,
            balloons: Vec::new(),
            towers: TowerRegistry::new(),
            projectiles: Vec::new(),
            next_balloon_id: BalloonId::new(0),
            combat: TowerCombat::new(),
        }
    }

    fn schedule(&self) -> &'static [MobSpawn] {
        levels::level(self.level)
            .map(levels::LevelDefinition::mobs)
            .unwrap_or(&[])
    }

    fn refresh_path(&mut self) {
        let waypoints = self
            .viewport
            .map(|viewport| levels::resolve_waypoints(self.level, viewport))
            .unwrap_or_default();
        self.path = Path::from_waypoints(waypoints);
        for balloon in &mut self.balloons {
            balloon.path = self.path.clone();
        }
    }

    fn set_play_state(&mut self, state: PlayState, out_events: &mut Vec<Event>) {
        if self.play_state == state {
            return;
        }
        info!(from = ?self.play_state, to = ?state, level = self.level.get(), "play state changed");
        self.play_state = state;
        out_events.push(Event::PlayStateChanged { state });
    }

    fn start(&mut self, out_events: &mut Vec<Event>) {
        let refusal = match self.play_state {
            PlayState::Running => return,
            PlayState::LevelComplete => Some(StartError::LevelComplete),
            PlayState::Stopped if self.viewport.is_none() => Some(StartError::MissingViewport),
            PlayState::Stopped if self.path.is_empty() => {
                Some(StartError::UnknownLevel(self.level))
            }
            PlayState::Stopped => None,
        };

        match refusal {
            Some(reason) => {
                warn!(%reason, level = self.level.get(), "start rejected");
                out_events.push(Event::StartRejected { reason });
            }
            None => self.set_play_state(PlayState::Running, out_events),
        }
    }

    fn reset_round(&mut self) {
        self.elapsed = Duration::ZERO;
        self.spawning.reset();
        self.balloons.clear();
        self.projectiles.clear();
        self.towers.reset_cooldowns();
    }

    fn step(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        self.elapsed = self.elapsed.saturating_add(dt);
        out_events.push(Event::TimeAdvanced {
            dt,
            elapsed: self.elapsed,
        });

        self.spawn_due(out_events);
        self.move_balloons(out_events);
        self.resolve_combat(out_events);
        self.check_completion(out_events);
    }

    fn spawn_due(&mut self, out_events: &mut Vec<Event>) {
        let schedule = self.schedule();
        let mut due = Vec::new();
        self.spawning.handle(self.elapsed, schedule, &mut due);

        for spawn in due {
            let id = self.next_balloon_id;
            let Some(balloon) = Balloon::spawn(id, &spawn, self.path.clone()) else {
                warn!(level = self.level.get(), "cannot spawn balloon on an empty path");
                continue;
            };
            self.next_balloon_id = BalloonId::new(id.get().saturating_add(1));
            debug!(
                balloon = id.get(),
                elapsed_ms = self.elapsed.as_millis() as u64,
                "balloon spawned"
            );
            out_events.push(Event::BalloonSpawned {
                balloon: id,
                position: balloon.position,
            });
            self.balloons.push(balloon);
        }
    }

    fn move_balloons(&mut self, out_events: &mut Vec<Event>) {
        let outcome = movement::advance(std::mem::take(&mut self.balloons));
        let escaped = outcome.exited_count();
        self.balloons = outcome.balloons;

        if escaped == 0 {
            return;
        }

        self.lives = self.lives.saturating_sub(escaped);
        debug!(escaped, lives = self.lives, "balloons escaped");
        out_events.push(Event::BalloonsEscaped {
            count: escaped,
            lives_remaining: self.lives,
        });
    }

    fn resolve_combat(&mut self, out_events: &mut Vec<Event>) {
        let report = self.combat.handle(
            self.elapsed,
            self.towers.committed_mut(),
            &mut self.balloons,
            &mut self.projectiles,
            self.viewport,
        );

        for shot in &report.shots {
            out_events.push(Event::ProjectileFired {
                tower: shot.tower,
                target: shot.target,
            });
        }

        for hit in &report.hits {
            if hit.popped() {
                self.money = self.money.saturating_add(POP_REWARD);
                debug!(balloon = hit.balloon.get(), money = self.money.get(), "balloon popped");
                out_events.push(Event::BalloonPopped {
                    balloon: hit.balloon,
                    reward: POP_REWARD,
                });
            } else {
                out_events.push(Event::BalloonHit {
                    balloon: hit.balloon,
                    remaining: hit.remaining,
                });
            }
        }
    }

    fn check_completion(&mut self, out_events: &mut Vec<Event>) {
        let schedule = self.schedule();
        let complete = self.spawning.is_exhausted(schedule)
            && self.balloons.is_empty()
            && self.elapsed > last_spawn_time(schedule);
        if !complete {
            return;
        }

        info!(
            level = self.level.get(),
            money = self.money.get(),
            lives = self.lives,
            "level completed"
        );
        out_events.push(Event::LevelCompleted { level: self.level });
        self.set_play_state(PlayState::LevelComplete, out_events);
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureViewport { width, height } => match Viewport::new(width, height) {
            Some(viewport) => {
                world.viewport = Some(viewport);
                world.refresh_path();
                debug!(width, height, waypoints = world.path.len(), "viewport configured");
                out_events.push(Event::ViewportConfigured { viewport });
            }
            None => {
                warn!(width, height, "viewport rejected");
                out_events.push(Event::ViewportRejected { width, height });
            }
        },
        Command::Tick { dt } => {
            if world.play_state == PlayState::Running {
                world.step(dt, out_events);
            }
        }
        Command::Start => world.start(out_events),
        Command::Pause => {
            if world.play_state == PlayState::Running {
                world.set_play_state(PlayState::Stopped, out_events);
            }
        }
        Command::ResetLevel => {
            world.reset_round();
            info!(level = world.level.get(), "level reset");
            out_events.push(Event::LevelReset { level: world.level });
            world.set_play_state(PlayState::Stopped, out_events);
        }
        Command::AdvanceLevel => {
            world.reset_round();
            world.towers.clear();
            world.money = world.config.starting_money;
            world.level = levels::next_level(world.level);
            world.refresh_path();
            info!(level = world.level.get(), "level changed");
            out_events.push(Event::LevelChanged { level: world.level });
            world.set_play_state(PlayState::Stopped, out_events);
        }
        Command::PlaceTower { position } => match economy::purchase_tower(world.money) {
            Ok(remaining) => {
                world.money = remaining;
                let tower = world.towers.place(position);
                debug!(tower = tower.get(), x = position.x, y = position.y, "tower placed");
                out_events.push(Event::TowerPlaced {
                    tower,
                    position,
                    cost: BASE_TOWER_COST,
                });
            }
            Err(reason) => {
                warn!(%reason, "tower placement rejected");
                out_events.push(Event::TowerPlacementRejected { position, reason });
            }
        },
        Command::SelectUpgradeTrack { tower, track } => match world.towers.get_mut(tower) {
            Some(entry) => {
                entry.preview = Some(track);
                out_events.push(Event::UpgradePreviewed {
                    tower,
                    track,
                    cost: economy::upgrade_cost(&entry.committed, track),
                });
            }
            None => out_events.push(Event::TowerMissing { tower }),
        },
        Command::ClearUpgradePreview { tower } => match world.towers.get_mut(tower) {
            Some(entry) => {
                if entry.preview.take().is_some() {
                    out_events.push(Event::UpgradePreviewCleared { tower });
                }
            }
            None => out_events.push(Event::TowerMissing { tower }),
        },
        Command::PurchaseUpgrade { tower, track } => {
            let Some(entry) = world.towers.get_mut(tower) else {
                warn!(%tower, %track, "upgrade requested for missing tower");
                out_events.push(Event::UpgradeRejected {
                    tower,
                    track,
                    reason: PurchaseError::MissingTower(tower),
                });
                return;
            };

            match economy::purchase_upgrade(world.money, &entry.committed, track) {
                Ok(purchase) => {
                    world.money = purchase.remaining;
                    entry.committed = purchase.tower;
                    info!(%tower, %track, cost = purchase.cost.get(), "upgrade purchased");
                    out_events.push(Event::UpgradePurchased {
                        tower,
                        track,
                        cost: purchase.cost,
                    });
                    if let Some(previewed) = entry.preview {
                        out_events.push(Event::UpgradePreviewed {
                            tower,
                            track: previewed,
                            cost: economy::upgrade_cost(&entry.committed, previewed),
                        });
                    }
                }
                Err(reason) => {
                    warn!(%tower, %track, %reason, "upgrade rejected");
                    out_events.push(Event::UpgradeRejected {
                        tower,
                        track,
                        reason,
                    });
                }
            }
        }
        Command::SellTower { tower } => match world.towers.remove(tower) {
            Some(entry) => {
                let refund = economy::refund(&entry.committed);
                world.money = world.money.saturating_add(refund);
                info!(%tower, refund = refund.get(), "tower sold");
                out_events.push(Event::TowerSold { tower, refund });
            }
            None => out_events.push(Event::TowerMissing { tower }),
        },
        Command::SetRangeOverlay { tower, visible } => match world.towers.get_mut(tower) {
            Some(entry) => {
                entry.committed.range_overlay_visible = visible;
                out_events.push(Event::RangeOverlayChanged { tower, visible });
            }
            None => out_events.push(Event::TowerMissing { tower }),
        },
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use super::{levels, World};
    use balloon_defence_core::{
        Balloon, BalloonSnapshot, FrameSnapshot, LevelId, Money, Path, PlayState, Projectile,
        Tower, TowerId, UpgradeTrack, Viewport,
    };
    use balloon_defence_system_economy as economy;

    /// Lifecycle state of the driver.
    #[must_use]
    pub fn play_state(world: &World) -> PlayState {
        world.play_state
    }

    /// Active level.
    #[must_use]
    pub fn level(world: &World) -> LevelId {
        world.level
    }

    /// Definition of the active level, if the catalog has one.
    #[must_use]
    pub fn level_definition(world: &World) -> Option<&'static levels::LevelDefinition> {
        levels::level(world.level)
    }

    /// Money held by the player.
    #[must_use]
    pub fn money(world: &World) -> Money {
        world.money
    }

    /// Lives left.
    #[must_use]
    pub fn lives(world: &World) -> u32 {
        world.lives
    }

    /// Simulated time since the level started.
    #[must_use]
    pub fn elapsed(world: &World) -> Duration {
        world.elapsed
    }

    /// Play surface size, once configured.
    #[must_use]
    pub fn viewport(world: &World) -> Option<Viewport> {
        world.viewport
    }

    /// Absolute path of the active level; empty until a viewport is configured.
    #[must_use]
    pub fn path(world: &World) -> &Path {
        &world.path
    }

    /// Live balloons in collection order.
    #[must_use]
    pub fn balloons(world: &World) -> &[Balloon] {
        &world.balloons
    }

    /// Projectiles in flight.
    #[must_use]
    pub fn projectiles(world: &World) -> &[Projectile] {
        &world.projectiles
    }

    /// Committed towers in placement order.
    pub fn towers(world: &World) -> impl Iterator<Item = &Tower> {
        world.towers.committed()
    }

    /// Committed state of a tower, ignoring any open preview.
    #[must_use]
    pub fn tower(world: &World, tower: TowerId) -> Option<&Tower> {
        world.towers.get(tower).map(|entry| &entry.committed)
    }

    /// Speculative tower currently previewed for `tower`, if any.
    #[must_use]
    pub fn upgrade_preview(world: &World, tower: TowerId) -> Option<(UpgradeTrack, Tower)> {
        world.towers.get(tower).and_then(|entry| entry.previewed())
    }

    /// Price of the next level of `track` for `tower`.
    #[must_use]
    pub fn upgrade_cost(world: &World, tower: TowerId, track: UpgradeTrack) -> Option<Money> {
        self::tower(world, tower).map(|committed| economy::upgrade_cost(committed, track))
    }

    /// Money the player would receive for selling `tower` now.
    #[must_use]
    pub fn refund(world: &World, tower: TowerId) -> Option<Money> {
        self::tower(world, tower).map(economy::refund)
    }

    /// Captures everything the presentation layer draws.
    #[must_use]
    pub fn snapshot(world: &World) -> FrameSnapshot {
        FrameSnapshot {
            level: world.level,
            play_state: world.play_state,
            money: world.money,
            lives: world.lives,
            elapsed: world.elapsed,
            waypoints: world.path.waypoints().to_vec(),
            balloons: world
                .balloons
                .iter()
                .map(|balloon| BalloonSnapshot {
                    id: balloon.id,
                    position: balloon.position,
                    health: balloon.health,
                    waypoint_index: balloon.waypoint_index,
                })
                .collect(),
            towers: world.towers.snapshots(),
            projectiles: world.projectiles.clone(),
        }
    }
}
