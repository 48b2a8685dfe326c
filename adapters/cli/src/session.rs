//! Headless session that plays a scenario against the world.

use std::{fmt, thread, time::Instant};

use anyhow::{anyhow, Context, Result};
use balloon_defence_core::{Command, Event, LevelId, Money, PlayState, TICK_PERIOD};
use balloon_defence_system_clock::FixedStep;
use balloon_defence_world::{apply, query, World};
use tracing::{info, warn};

use crate::scenario::Scenario;

/// How ticks are paced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Pacing {
    /// Submit ticks back to back.
    Unpaced,
    /// Submit ticks as real time accumulates whole periods.
    Realtime,
}

/// Totals gathered while the session ran.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Tally {
    pub(crate) spawned: u32,
    pub(crate) shots: u32,
    pub(crate) popped: u32,
    pub(crate) escaped: u32,
    pub(crate) rejected: u32,
}

impl Tally {
    fn record(&mut self, event: &Event) {
        match event {
            Event::BalloonSpawned { .. } => self.spawned += 1,
            Event::ProjectileFired { .. } => self.shots += 1,
            Event::BalloonPopped { .. } => self.popped += 1,
            Event::BalloonsEscaped { count, .. } => self.escaped += count,
            Event::TowerPlacementRejected { position, reason } => {
                warn!(x = position.x, y = position.y, %reason, "scenario tower was not placed");
                self.rejected += 1;
            }
            Event::UpgradeRejected {
                tower,
                track,
                reason,
            } => {
                warn!(%tower, %track, %reason, "scenario upgrade was not bought");
                self.rejected += 1;
            }
            _ => {}
        }
    }
}

/// Final state of a finished session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Summary {
    pub(crate) ticks: u64,
    pub(crate) level: LevelId,
    pub(crate) state: PlayState,
    pub(crate) money: Money,
    pub(crate) lives: u32,
    pub(crate) tally: Tally,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "level {} {:?} after {} ticks: money {}, lives {}, \
             spawned {}, popped {}, escaped {}, shots {}, rejected commands {}",
            self.level,
            self.state,
            self.ticks,
            self.money,
            self.lives,
            self.tally.spawned,
            self.tally.popped,
            self.tally.escaped,
            self.tally.shots,
            self.tally.rejected,
        )
    }
}

/// Drives a world through a scenario.
pub(crate) struct Session {
    scenario: Scenario,
    world: World,
    events: Vec<Event>,
    tally: Tally,
    ticks: u64,
    max_ticks: u64,
}

impl Session {
    /// Prepares the board and starts the level.
    ///
    /// A refused start is fatal: a scenario that cannot run is a configuration error.
    pub(crate) fn start(scenario: Scenario, max_ticks: Option<u64>) -> Result<Self> {
        let mut world = World::with_config(scenario.config());
        let mut events = Vec::new();
        for command in scenario.setup_commands() {
            apply(&mut world, command, &mut events);
        }
        apply(&mut world, Command::Start, &mut events);

        if let Some(reason) = events.iter().find_map(|event| match event {
            Event::StartRejected { reason } => Some(*reason),
            _ => None,
        }) {
            return Err(anyhow!(reason)).context("scenario level cannot start");
        }

        let max_ticks = max_ticks.unwrap_or(scenario.max_ticks);
        info!(
            level = query::level(&world).get(),
            towers = query::towers(&world).count(),
            max_ticks,
            "session started"
        );

        let mut session = Self {
            scenario,
            world,
            events: Vec::new(),
            tally: Tally::default(),
            ticks: 0,
            max_ticks,
        };
        for event in &events {
            session.tally.record(event);
        }
        Ok(session)
    }

    fn finished(&self) -> bool {
        self.ticks >= self.max_ticks || query::play_state(&self.world) != PlayState::Running
    }

    fn step(&mut self) {
        let upgrades: Vec<Command> = self.scenario.upgrades_at(self.ticks).collect();
        for command in upgrades {
            apply(&mut self.world, command, &mut self.events);
        }
        apply(
            &mut self.world,
            Command::Tick { dt: TICK_PERIOD },
            &mut self.events,
        );
        self.ticks += 1;

        for event in self.events.drain(..) {
            self.tally.record(&event);
        }

        let report_every = self.scenario.report_every;
        if report_every > 0 && self.ticks % report_every == 0 {
            println!("{}", self.status_line());
        }
    }

    fn status_line(&self) -> String {
        let snapshot = query::snapshot(&self.world);
        format!(
            "t={:>6}ms money={} lives={} balloons={} projectiles={}",
            snapshot.elapsed.as_millis(),
            snapshot.money,
            snapshot.lives,
            snapshot.balloons.len(),
            snapshot.projectiles.len(),
        )
    }

    /// Plays until the level completes or the tick budget runs out.
    pub(crate) fn run(mut self, pacing: Pacing) -> Summary {
        match pacing {
            Pacing::Unpaced => {
                while !self.finished() {
                    self.step();
                }
            }
            Pacing::Realtime => self.run_realtime(FixedStep::default()),
        }
        self.summary()
    }

    fn run_realtime(&mut self, mut clock: FixedStep) {
        let mut last = Instant::now();
        while !self.finished() {
            thread::sleep(clock.period() / 2);
            let now = Instant::now();
            let due = clock.accumulate(now.duration_since(last));
            last = now;
            for _ in 0..due {
                if self.finished() {
                    break;
                }
                self.step();
            }
        }
    }

    fn summary(&self) -> Summary {
        Summary {
            ticks: self.ticks,
            level: query::level(&self.world),
            state: query::play_state(&self.world),
            money: query::money(&self.world),
            lives: query::lives(&self.world),
            tally: self.tally,
        }
    }
}
