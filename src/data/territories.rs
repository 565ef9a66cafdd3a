//! Static territory definitions for the War of 1812 map
//!
//! Twenty-three territories across four theaters. The graph is fixed:
//! territories are never created or destroyed, only re-owned.

use crate::core::types::{Faction, Theater, TerritoryId};

/// Static attributes of a single territory.
#[derive(Debug, Clone, Copy)]
pub struct Territory {
    pub id: TerritoryId,
    pub name: &'static str,
    pub theater: Theater,
    pub starting_owner: Faction,
    /// Victory points awarded per round for holding this territory.
    pub points: u32,
    /// A fort grants +1 to the highest defense die.
    pub has_fort: bool,
    /// Naval zones trigger naval-superiority and naval leader bonuses.
    pub is_naval: bool,
    pub adjacency: &'static [TerritoryId],
}

impl Territory {
    /// Troops present when a fresh game starts.
    pub fn starting_troops(&self) -> u32 {
        if self.starting_owner == Faction::Neutral {
            0
        } else if self.has_fort {
            4
        } else {
            2
        }
    }
}

use Faction::{British, Native, Neutral, Us};
use Theater::{Chesapeake, GreatLakes, Maritime, Southern};
use TerritoryId::*;

static TERRITORIES: [Territory; 23] = [
    // Great Lakes theater
    Territory {
        id: Detroit,
        name: "Detroit",
        theater: GreatLakes,
        starting_owner: Us,
        points: 2,
        has_fort: true,
        is_naval: false,
        adjacency: &[FortDearborn, LakeErie, UpperCanada, OhioValley],
    },
    Territory {
        id: FortDearborn,
        name: "Fort Dearborn",
        theater: GreatLakes,
        starting_owner: Us,
        points: 1,
        has_fort: true,
        is_naval: false,
        adjacency: &[Detroit, OhioValley, IndianaTerritory],
    },
    Territory {
        id: Niagara,
        name: "Niagara",
        theater: GreatLakes,
        starting_owner: British,
        points: 2,
        has_fort: true,
        is_naval: false,
        adjacency: &[LakeErie, UpperCanada, NewYork, LakeOntario],
    },
    Territory {
        id: LakeErie,
        name: "Lake Erie",
        theater: GreatLakes,
        starting_owner: Neutral,
        points: 2,
        has_fort: false,
        is_naval: true,
        adjacency: &[Detroit, Niagara, OhioValley, UpperCanada],
    },
    Territory {
        id: LakeOntario,
        name: "Lake Ontario",
        theater: GreatLakes,
        starting_owner: Neutral,
        points: 1,
        has_fort: false,
        is_naval: true,
        adjacency: &[Niagara, UpperCanada, NewYork, Montreal],
    },
    Territory {
        id: UpperCanada,
        name: "Upper Canada",
        theater: GreatLakes,
        starting_owner: British,
        points: 2,
        has_fort: true,
        is_naval: false,
        adjacency: &[Detroit, Niagara, LakeErie, LakeOntario, Montreal],
    },
    // Chesapeake theater
    Territory {
        id: WashingtonDc,
        name: "Washington D.C.",
        theater: Chesapeake,
        starting_owner: Us,
        points: 3,
        has_fort: false,
        is_naval: false,
        adjacency: &[Baltimore, Virginia, Bladensburg],
    },
    Territory {
        id: Baltimore,
        name: "Baltimore",
        theater: Chesapeake,
        starting_owner: Us,
        points: 2,
        has_fort: true,
        is_naval: false,
        adjacency: &[WashingtonDc, Bladensburg, NewYork, ChesapeakeBay],
    },
    Territory {
        id: Bladensburg,
        name: "Bladensburg",
        theater: Chesapeake,
        starting_owner: Us,
        points: 1,
        has_fort: false,
        is_naval: false,
        adjacency: &[WashingtonDc, Baltimore, Virginia, ChesapeakeBay],
    },
    Territory {
        id: ChesapeakeBay,
        name: "Chesapeake Bay",
        theater: Chesapeake,
        starting_owner: Neutral,
        points: 1,
        has_fort: false,
        is_naval: true,
        adjacency: &[Baltimore, Bladensburg, Virginia, AtlanticSeaLanes],
    },
    Territory {
        id: Virginia,
        name: "Virginia",
        theater: Chesapeake,
        starting_owner: Us,
        points: 1,
        has_fort: false,
        is_naval: false,
        adjacency: &[WashingtonDc, Bladensburg, ChesapeakeBay, Carolina, OhioValley],
    },
    // Southern theater
    Territory {
        id: NewOrleans,
        name: "New Orleans",
        theater: Southern,
        starting_owner: Us,
        points: 3,
        has_fort: true,
        is_naval: false,
        adjacency: &[Mobile, MississippiTerritory, GulfOfMexico],
    },
    Territory {
        id: Mobile,
        name: "Mobile",
        theater: Southern,
        starting_owner: Us,
        points: 1,
        has_fort: false,
        is_naval: false,
        adjacency: &[NewOrleans, CreekNation, GulfOfMexico, Carolina],
    },
    Territory {
        id: CreekNation,
        name: "Creek Nation",
        theater: Southern,
        starting_owner: Native,
        points: 2,
        has_fort: false,
        is_naval: false,
        adjacency: &[Mobile, MississippiTerritory, Carolina],
    },
    Territory {
        id: MississippiTerritory,
        name: "Mississippi Terr.",
        theater: Southern,
        starting_owner: Us,
        points: 1,
        has_fort: false,
        is_naval: false,
        adjacency: &[NewOrleans, CreekNation, IndianaTerritory],
    },
    Territory {
        id: GulfOfMexico,
        name: "Gulf of Mexico",
        theater: Southern,
        starting_owner: Neutral,
        points: 1,
        has_fort: false,
        is_naval: true,
        adjacency: &[NewOrleans, Mobile, AtlanticSeaLanes],
    },
    // Maritime theater
    Territory {
        id: AtlanticSeaLanes,
        name: "Atlantic Sea Lanes",
        theater: Maritime,
        starting_owner: British,
        points: 2,
        has_fort: false,
        is_naval: true,
        adjacency: &[ChesapeakeBay, GulfOfMexico, Halifax, NewYork],
    },
    Territory {
        id: Halifax,
        name: "Halifax",
        theater: Maritime,
        starting_owner: British,
        points: 2,
        has_fort: true,
        is_naval: false,
        adjacency: &[AtlanticSeaLanes, Montreal, NewYork],
    },
    // Connectors / interior
    Territory {
        id: NewYork,
        name: "New York",
        theater: Chesapeake,
        starting_owner: Us,
        points: 2,
        has_fort: false,
        is_naval: false,
        adjacency: &[Niagara, LakeOntario, Baltimore, AtlanticSeaLanes, Halifax, Montreal],
    },
    Territory {
        id: Montreal,
        name: "Montreal",
        theater: GreatLakes,
        starting_owner: British,
        points: 2,
        has_fort: true,
        is_naval: false,
        adjacency: &[UpperCanada, LakeOntario, NewYork, Halifax],
    },
    Territory {
        id: OhioValley,
        name: "Ohio Valley",
        theater: GreatLakes,
        starting_owner: Us,
        points: 1,
        has_fort: false,
        is_naval: false,
        adjacency: &[Detroit, FortDearborn, LakeErie, IndianaTerritory, Virginia],
    },
    Territory {
        id: IndianaTerritory,
        name: "Indiana Terr.",
        theater: GreatLakes,
        starting_owner: Native,
        points: 1,
        has_fort: false,
        is_naval: false,
        adjacency: &[FortDearborn, OhioValley, MississippiTerritory],
    },
    Territory {
        id: Carolina,
        name: "Carolina",
        theater: Southern,
        starting_owner: Us,
        points: 1,
        has_fort: false,
        is_naval: false,
        adjacency: &[Virginia, Mobile, CreekNation],
    },
];

/// All territories in fixed map order. AI code iterates this list rather
/// than hash maps so decisions stay deterministic.
pub fn all() -> &'static [Territory] {
    &TERRITORIES
}

/// Look up the static definition of a territory.
pub fn get(id: TerritoryId) -> &'static Territory {
    TERRITORIES
        .iter()
        .find(|t| t.id == id)
        .unwrap_or_else(|| unreachable!("territory table covers every id"))
}

/// True if `from` borders `to`.
pub fn are_adjacent(from: TerritoryId, to: TerritoryId) -> bool {
    get(from).adjacency.contains(&to)
}
