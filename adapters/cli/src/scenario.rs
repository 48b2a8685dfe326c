//! Scenario files describing a scripted headless session.

use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use balloon_defence_core::{Command, LevelId, Money, TowerId, UpgradeTrack};
use balloon_defence_world::{levels, Config};
use glam::Vec2;
use serde::Deserialize;

/// Scenario shipped with the binary and used when no file is given.
pub(crate) const BUILT_IN: &str = include_str!("../scenarios/default.toml");

/// Play surface dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ViewportSpec {
    pub(crate) width: f32,
    pub(crate) height: f32,
}

impl Default for ViewportSpec {
    fn default() -> Self {
        Self {
            width: 375.0,
            height: 667.0,
        }
    }
}

/// Overrides for the session stake.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct EconomySpec {
    pub(crate) starting_money: Option<u32>,
    pub(crate) starting_lives: Option<u32>,
}

/// Tower placed before the level starts.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct TowerSpec {
    pub(crate) x: f32,
    pub(crate) y: f32,
}

/// Upgrade purchase attempted when the session reaches `tick`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct UpgradeSpec {
    pub(crate) tick: u64,
    pub(crate) tower: u32,
    pub(crate) track: UpgradeTrack,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub(crate) struct Scenario {
    pub(crate) level: u32,
    pub(crate) max_ticks: u64,
    /// Ticks between status lines; zero silences them.
    pub(crate) report_every: u64,
    pub(crate) viewport: ViewportSpec,
    pub(crate) economy: EconomySpec,
    pub(crate) towers: Vec<TowerSpec>,
    pub(crate) upgrades: Vec<UpgradeSpec>,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            level: LevelId::FIRST.get(),
            max_ticks: 5_000,
            report_every: 20,
            viewport: ViewportSpec::default(),
            economy: EconomySpec::default(),
            towers: Vec::new(),
            upgrades: Vec::new(),
        }
    }
}

impl Scenario {
    /// Loads and validates the scenario stored at `path`.
    pub(crate) fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario at {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("invalid scenario {}", path.display()))
    }

    /// Parses the scenario bundled with the binary.
    pub(crate) fn built_in() -> Result<Self> {
        Self::parse(BUILT_IN).context("built-in scenario is invalid")
    }

    pub(crate) fn parse(contents: &str) -> Result<Self> {
        let scenario: Scenario =
            toml::from_str(contents).context("failed to parse scenario toml contents")?;

        if levels::level(LevelId::new(scenario.level)).is_none() {
            bail!(
                "level {} is not defined; the catalog has {} levels",
                scenario.level,
                levels::levels().len()
            );
        }
        let ViewportSpec { width, height } = scenario.viewport;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            bail!("viewport {width}x{height} must have positive finite sides");
        }
        if let Some(upgrade) = scenario
            .upgrades
            .iter()
            .find(|upgrade| upgrade.tick >= scenario.max_ticks)
        {
            bail!(
                "upgrade at tick {} would never run within {} ticks",
                upgrade.tick,
                scenario.max_ticks
            );
        }

        Ok(scenario)
    }

    /// World parameters with the scenario's overrides applied.
    pub(crate) fn config(&self) -> Config {
        let defaults = Config::default();
        Config {
            starting_money: self
                .economy
                .starting_money
                .map_or(defaults.starting_money, Money::new),
            starting_lives: self
                .economy
                .starting_lives
                .unwrap_or(defaults.starting_lives),
            initial_level: LevelId::new(self.level),
        }
    }

    /// Commands that prepare the board before the level starts.
    pub(crate) fn setup_commands(&self) -> Vec<Command> {
        let mut commands = vec![Command::ConfigureViewport {
            width: self.viewport.width,
            height: self.viewport.height,
        }];
        commands.extend(self.towers.iter().map(|tower| Command::PlaceTower {
            position: Vec2::new(tower.x, tower.y),
        }));
        commands
    }

    /// Upgrade purchases scheduled for `tick`, in file order.
    pub(crate) fn upgrades_at(&self, tick: u64) -> impl Iterator<Item = Command> + '_ {
        self.upgrades
            .iter()
            .filter(move |upgrade| upgrade.tick == tick)
            .map(|upgrade| Command::PurchaseUpgrade {
                tower: TowerId::new(upgrade.tower),
                track: upgrade.track,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_scenario_parses() {
        let scenario = Scenario::built_in().expect("built-in scenario");
        assert_eq!(scenario.level, 1);
        assert!(!scenario.towers.is_empty());
        assert_eq!(scenario.config(), Config::default());
    }

    #[test]
    fn empty_file_uses_defaults() {
        let scenario = Scenario::parse("").expect("empty scenario");
        assert_eq!(scenario, Scenario::default());
        assert_eq!(scenario.setup_commands().len(), 1);
    }

    #[test]
    fn overrides_reach_world_config() {
        let scenario = Scenario::parse(
            r#"
            level = 3

            [economy]
            starting_money = 250
            "#,
        )
        .expect("valid scenario");

        let config = scenario.config();
        assert_eq!(config.starting_money, Money::new(250));
        assert_eq!(config.starting_lives, Config::default().starting_lives);
        assert_eq!(config.initial_level, LevelId::new(3));
    }

    #[test]
    fn towers_and_upgrades_become_commands() {
        let scenario = Scenario::parse(
            r#"
            [[towers]]
            x = 100.0
            y = 66.7

            [[upgrades]]
            tick = 40
            tower = 0
            track = "fire_speed"
            "#,
        )
        .expect("valid scenario");

        assert_eq!(
            scenario.setup_commands()[1],
            Command::PlaceTower {
                position: Vec2::new(100.0, 66.7)
            }
        );
        let upgrades: Vec<_> = scenario.upgrades_at(40).collect();
        assert_eq!(
            upgrades,
            vec![Command::PurchaseUpgrade {
                tower: TowerId::new(0),
                track: UpgradeTrack::FireSpeed,
            }]
        );
        assert_eq!(scenario.upgrades_at(41).count(), 0);
    }

    #[test]
    fn unknown_level_is_rejected() {
        let error = Scenario::parse("level = 12").expect_err("undefined level");
        assert!(error.to_string().contains("level 12 is not defined"));
    }

    #[test]
    fn degenerate_viewport_is_rejected() {
        let error = Scenario::parse(
            r#"
            [viewport]
            width = 0.0
            height = 667.0
            "#,
        )
        .expect_err("zero width");
        assert!(error.to_string().contains("positive finite sides"));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(Scenario::parse("lifes = 3").is_err());
    }

    #[test]
    fn late_upgrade_is_rejected() {
        let error = Scenario::parse(
            r#"
            max_ticks = 10

            [[upgrades]]
            tick = 10
            tower = 0
            track = "range"
            "#,
        )
        .expect_err("upgrade after the last tick");
        assert!(error.to_string().contains("would never run"));
    }
}
