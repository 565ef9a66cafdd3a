//! Event store: drawn event cards and round-scoped capture immunity
//!
//! Card *content* lives outside the engine; the store records which
//! card is in play, which have been used, and the invulnerable
//! territories granted by events such as the Fort McHenry bombardment.

use serde::{Deserialize, Serialize};

use crate::core::types::TerritoryId;

/// An event card as supplied by the content collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventCard {
    pub id: String,
    pub title: String,
    pub body: String,
}

/// Persistent slice of the event state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventSave {
    #[serde(default)]
    pub used_event_ids: Vec<String>,
    #[serde(default)]
    pub invulnerable_territories: Vec<TerritoryId>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventState {
    /// Card currently displayed; transient.
    pub current_event: Option<EventCard>,
    pub used_event_ids: Vec<String>,
    pub show_event_card: bool,
    /// Territories immune to capture until cleared at round end.
    pub invulnerable_territories: Vec<TerritoryId>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EventCommand {
    Draw(EventCard),
    ShowCard,
    HideCard,
    MarkUsed(String),
    AddInvulnerableTerritory(TerritoryId),
    ClearInvulnerableTerritories,
    Reset,
    Load(EventSave),
}

impl EventState {
    pub fn reduce(mut self, command: &EventCommand) -> Self {
        match command {
            EventCommand::Draw(card) => {
                self.current_event = Some(card.clone());
                self
            }

            EventCommand::ShowCard => {
                self.show_event_card = true;
                self
            }

            EventCommand::HideCard => {
                self.show_event_card = false;
                self
            }

            EventCommand::MarkUsed(id) => {
                self.used_event_ids.push(id.clone());
                self
            }

            EventCommand::AddInvulnerableTerritory(territory) => {
                if !self.invulnerable_territories.contains(territory) {
                    self.invulnerable_territories.push(*territory);
                }
                self
            }

            EventCommand::ClearInvulnerableTerritories => {
                self.invulnerable_territories.clear();
                self
            }

            EventCommand::Reset => Self::default(),

            EventCommand::Load(save) => Self {
                current_event: None,
                used_event_ids: save.used_event_ids.clone(),
                show_event_card: false,
                invulnerable_territories: save.invulnerable_territories.clone(),
            },
        }
    }

    pub fn save(&self) -> EventSave {
        EventSave {
            used_event_ids: self.used_event_ids.clone(),
            invulnerable_territories: self.invulnerable_territories.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: &str) -> EventCard {
        EventCard {
            id: id.to_string(),
            title: "British Blockade".to_string(),
            body: "Exports collapse along the coast.".to_string(),
        }
    }

    #[test]
    fn draw_and_mark_used_track_repeats() {
        let state = EventState::default()
            .reduce(&EventCommand::Draw(card("blockade")))
            .reduce(&EventCommand::ShowCard)
            .reduce(&EventCommand::MarkUsed("blockade".to_string()));
        assert!(state.show_event_card);
        assert_eq!(state.used_event_ids, vec!["blockade"]);
    }

    #[test]
    fn invulnerable_list_deduplicates() {
        let state = EventState::default()
            .reduce(&EventCommand::AddInvulnerableTerritory(TerritoryId::Baltimore))
            .reduce(&EventCommand::AddInvulnerableTerritory(TerritoryId::Baltimore));
        assert_eq!(state.invulnerable_territories, vec![TerritoryId::Baltimore]);
        let state = state.reduce(&EventCommand::ClearInvulnerableTerritories);
        assert!(state.invulnerable_territories.is_empty());
    }

    #[test]
    fn load_keeps_used_ids_but_not_open_card() {
        let dirty = EventState::default()
            .reduce(&EventCommand::Draw(card("blockade")))
            .reduce(&EventCommand::ShowCard);
        let loaded = dirty.reduce(&EventCommand::Load(EventSave {
            used_event_ids: vec!["blockade".to_string()],
            invulnerable_territories: vec![TerritoryId::Baltimore],
        }));
        assert!(loaded.current_event.is_none());
        assert!(!loaded.show_event_card);
        assert_eq!(loaded.used_event_ids, vec!["blockade"]);
        assert_eq!(loaded.invulnerable_territories, vec![TerritoryId::Baltimore]);
    }
}
