//! Authoritative tower state management utilities.

use std::{collections::BTreeMap, time::Duration};

use balloon_defence_core::{Tower, TowerId, TowerSnapshot, UpgradeTrack};
use balloon_defence_system_economy::apply_upgrade;
use glam::Vec2;

/// Committed tower plus the upgrade track currently previewed on it.
#[derive(Clone, Debug)]
pub(crate) struct TowerEntry {
    /// Tower as purchased; previews never touch it.
    pub(crate) committed: Tower,
    /// Track whose next level is being shown speculatively.
    pub(crate) preview: Option<UpgradeTrack>,
}

impl TowerEntry {
    /// Speculative tower derived from the committed one, if a preview is open.
    pub(crate) fn previewed(&self) -> Option<(UpgradeTrack, Tower)> {
        self.preview
            .map(|track| (track, apply_upgrade(&self.committed, track)))
    }

    fn snapshot(&self) -> TowerSnapshot {
        match self.previewed() {
            Some((track, tower)) => TowerSnapshot {
                tower,
                previewing: Some(track),
            },
            None => TowerSnapshot {
                tower: self.committed.clone(),
                previewing: None,
            },
        }
    }
}

/// Registry that stores towers and manages identifier allocation.
#[derive(Debug)]
pub(crate) struct TowerRegistry {
    entries: BTreeMap<TowerId, TowerEntry>,
    next_tower_id: TowerId,
}

impl TowerRegistry {
    /// Creates an empty tower registry with a reset identifier counter.
    pub(crate) fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_tower_id: TowerId::new(0),
        }
    }

    /// Adds a base tower at `position` and returns its identifier.
    pub(crate) fn place(&mut self, position: Vec2) -> TowerId {
        let id = self.next_tower_id;
        self.next_tower_id = TowerId::new(id.get().saturating_add(1));
        let previous = self.entries.insert(
            id,
            TowerEntry {
                committed: Tower::new(id, position),
                preview: None,
            },
        );
        debug_assert!(previous.is_none(), "tower identifiers are never reused");
        id
    }

    pub(crate) fn get(&self, id: TowerId) -> Option<&TowerEntry> {
        self.entries.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: TowerId) -> Option<&mut TowerEntry> {
        self.entries.get_mut(&id)
    }

    pub(crate) fn remove(&mut self, id: TowerId) -> Option<TowerEntry> {
        self.entries.remove(&id)
    }

    /// Drops every tower; identifiers keep counting up.
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    /// Committed towers in placement order.
    pub(crate) fn committed(&self) -> impl Iterator<Item = &Tower> {
        self.entries.values().map(|entry| &entry.committed)
    }

    /// Mutable committed towers in placement order.
    pub(crate) fn committed_mut(&mut self) -> impl Iterator<Item = &mut Tower> {
        self.entries.values_mut().map(|entry| &mut entry.committed)
    }

    /// Lets every tower fire immediately on the next eligible tick.
    pub(crate) fn reset_cooldowns(&mut self) {
        for tower in self.committed_mut() {
            tower.next_shot_at = Duration::ZERO;
        }
    }

    /// Towers as they should be drawn, with previews overlaid.
    pub(crate) fn snapshots(&self) -> Vec<TowerSnapshot> {
        self.entries.values().map(TowerEntry::snapshot).collect()
    }
}
