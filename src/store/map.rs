//! Map store: territory ownership, troop counts, selection cursor

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::types::{Faction, TerritoryId};
use crate::data::territories;

/// Persistent slice of the map state. An empty save section restores
/// the starting map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapSave {
    #[serde(default)]
    pub territory_owners: BTreeMap<TerritoryId, Faction>,
    #[serde(default)]
    pub troops: BTreeMap<TerritoryId, u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapState {
    /// Every territory always has exactly one owner (possibly neutral).
    pub territory_owners: BTreeMap<TerritoryId, Faction>,
    pub troops: BTreeMap<TerritoryId, u32>,
    /// Transient UI cursor; never persisted.
    pub selected_territory: Option<TerritoryId>,
}

impl Default for MapState {
    fn default() -> Self {
        let mut territory_owners = BTreeMap::new();
        let mut troops = BTreeMap::new();
        for t in territories::all() {
            territory_owners.insert(t.id, t.starting_owner);
            troops.insert(t.id, t.starting_troops());
        }
        Self {
            territory_owners,
            troops,
            selected_territory: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MapCommand {
    Capture {
        territory: TerritoryId,
        new_owner: Faction,
    },
    AddTroops {
        territory: TerritoryId,
        count: u32,
    },
    RemoveTroops {
        territory: TerritoryId,
        count: u32,
    },
    SetTroops {
        territory: TerritoryId,
        count: u32,
    },
    Select(TerritoryId),
    Deselect,
    Reset,
    Load(MapSave),
}

impl MapState {
    pub fn reduce(mut self, command: &MapCommand) -> Self {
        match command {
            MapCommand::Capture { territory, new_owner } => {
                self.territory_owners.insert(*territory, *new_owner);
                self
            }

            MapCommand::AddTroops { territory, count } => {
                let entry = self.troops.entry(*territory).or_insert(0);
                *entry = entry.saturating_add(*count);
                self
            }

            MapCommand::RemoveTroops { territory, count } => {
                let entry = self.troops.entry(*territory).or_insert(0);
                *entry = entry.saturating_sub(*count);
                self
            }

            MapCommand::SetTroops { territory, count } => {
                self.troops.insert(*territory, *count);
                self
            }

            MapCommand::Select(territory) => {
                self.selected_territory = Some(*territory);
                self
            }

            MapCommand::Deselect => {
                self.selected_territory = None;
                self
            }

            MapCommand::Reset => Self::default(),

            MapCommand::Load(save) => {
                // Missing entries fall back to the starting map so a
                // truncated save cannot leave territories unowned.
                let mut state = Self::default();
                for (id, owner) in &save.territory_owners {
                    state.territory_owners.insert(*id, *owner);
                }
                for (id, count) in &save.troops {
                    state.troops.insert(*id, *count);
                }
                state.selected_territory = None;
                state
            }
        }
    }

    pub fn save(&self) -> MapSave {
        MapSave {
            territory_owners: self.territory_owners.clone(),
            troops: self.troops.clone(),
        }
    }

    pub fn owner(&self, id: TerritoryId) -> Faction {
        *self.territory_owners.get(&id).unwrap_or(&Faction::Neutral)
    }

    pub fn troops_in(&self, id: TerritoryId) -> u32 {
        *self.troops.get(&id).unwrap_or(&0)
    }

    /// Number of territories held by `faction`.
    pub fn owned_count(&self, faction: Faction) -> usize {
        self.territory_owners.values().filter(|&&o| o == faction).count()
    }

    /// Territory ids held by `faction`, in fixed map order.
    pub fn owned_territories(&self, faction: Faction) -> Vec<TerritoryId> {
        territories::all()
            .iter()
            .filter(|t| self.owner(t.id) == faction)
            .map(|t| t.id)
            .collect()
    }
}
