#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic spawning system that releases scheduled balloons.

use std::time::Duration;

use balloon_defence_core::MobSpawn;
use tracing::debug;

/// Pure system that walks a level's spawn schedule as the level clock advances.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Spawning {
    next_index: usize,
}

impl Spawning {
    /// Creates a spawning system positioned at the start of a schedule.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the next schedule entry that has not spawned yet.
    #[must_use]
    pub const fn next_index(&self) -> usize {
        self.next_index
    }

    /// Reports whether every entry of `schedule` has been released.
    #[must_use]
    pub fn is_exhausted(&self, schedule: &[MobSpawn]) -> bool {
        self.next_index >= schedule.len()
    }

    /// Rewinds to the start of the schedule.
    pub fn reset(&mut self) {
        self.next_index = 0;
    }

    /// Emits every schedule entry whose spawn time is at or before `elapsed`.
    ///
    /// Entries are released strictly in schedule order; several may be
    /// released at once when a single tick crosses multiple thresholds.
    pub fn handle(&mut self, elapsed: Duration, schedule: &[MobSpawn], out: &mut Vec<MobSpawn>) {
        while let Some(spawn) = schedule.get(self.next_index) {
            if spawn.spawn_at() > elapsed {
                break;
            }

            debug!(
                index = self.next_index,
                spawn_at_ms = spawn.spawn_at().as_millis() as u64,
                "releasing scheduled balloon"
            );
            out.push(*spawn);
            self.next_index += 1;
        }
    }
}

/// Level time of the final scheduled spawn, or zero for an empty schedule.
#[must_use]
pub fn last_spawn_time(schedule: &[MobSpawn]) -> Duration {
    schedule
        .last()
        .map_or(Duration::ZERO, |spawn| spawn.spawn_at())
}

#[cfg(test)]
mod tests {
    use super::*;
    use balloon_defence_core::Health;

    fn schedule(times_ms: &[u64]) -> Vec<MobSpawn> {
        times_ms
            .iter()
            .map(|ms| MobSpawn::new(Duration::from_millis(*ms), Health::new(1), 2.0))
            .collect()
    }

    #[test]
    fn nothing_spawns_before_first_threshold() {
        let mobs = schedule(&[1000, 2000]);
        let mut spawning = Spawning::new();
        let mut out = Vec::new();

        spawning.handle(Duration::from_millis(950), &mobs, &mut out);

        assert!(out.is_empty());
        assert_eq!(spawning.next_index(), 0);
    }

    #[test]
    fn threshold_is_inclusive() {
        let mobs = schedule(&[1000, 2000]);
        let mut spawning = Spawning::new();
        let mut out = Vec::new();

        spawning.handle(Duration::from_millis(1000), &mobs, &mut out);

        assert_eq!(out, vec![mobs[0]]);
        assert!(!spawning.is_exhausted(&mobs));
    }

    #[test]
    fn reset_rewinds_schedule() {
        let mobs = schedule(&[0]);
        let mut spawning = Spawning::new();
        let mut out = Vec::new();
        spawning.handle(Duration::ZERO, &mobs, &mut out);
        assert!(spawning.is_exhausted(&mobs));

        spawning.reset();

        assert_eq!(spawning.next_index(), 0);
        assert!(!spawning.is_exhausted(&mobs));
    }

    #[test]
    fn last_spawn_time_handles_empty_schedule() {
        assert_eq!(last_spawn_time(&[]), Duration::ZERO);
        assert_eq!(
            last_spawn_time(&schedule(&[500, 4000])),
            Duration::from_millis(4000)
        );
    }
}
