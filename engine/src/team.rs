use std::fmt;

use serde::{Deserialize, Serialize};

use crate::character::{Character, CharacterDef};
use crate::error::BattleError;

/// Stable handle to a character stored in an [`Arena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CharacterId(pub usize);

/// Owns every character taking part in a battle. Characters are never
/// removed; death only drops the id from its team's roster.
#[derive(Debug, Clone, Default)]
pub struct Arena {
    characters: Vec<Character>,
}

impl Arena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, character: Character) -> CharacterId {
        self.characters.push(character);
        CharacterId(self.characters.len() - 1)
    }

    pub fn get(&self, id: CharacterId) -> Result<&Character, BattleError> {
        self.characters
            .get(id.0)
            .ok_or(BattleError::UnknownCharacter(id))
    }

    pub fn get_mut(&mut self, id: CharacterId) -> Result<&mut Character, BattleError> {
        self.characters
            .get_mut(id.0)
            .ok_or(BattleError::UnknownCharacter(id))
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// Sum of the char ranks of `ids`; unknown ids contribute nothing.
    pub fn rating_of(&self, ids: &[CharacterId]) -> f64 {
        ids.iter()
            .filter_map(|id| self.characters.get(id.0))
            .map(Character::char_rank)
            .sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Team1,
    Team2,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::Team1 => Side::Team2,
            Side::Team2 => Side::Team1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Team1 => f.write_str("team1"),
            Side::Team2 => f.write_str("team2"),
        }
    }
}

/// An ordered roster of living characters.
#[derive(Debug, Clone, PartialEq)]
pub struct Team {
    name: String,
    members: Vec<CharacterId>,
    rating: f64,
}

impl Team {
    pub fn new(name: impl Into<String>, members: Vec<CharacterId>, arena: &Arena) -> Self {
        let rating = arena.rating_of(&members);
        Self {
            name: name.into(),
            members,
            rating,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn members(&self) -> &[CharacterId] {
        &self.members
    }

    pub fn size(&self) -> usize {
        self.members.len()
    }

    pub fn contains(&self, id: CharacterId) -> bool {
        self.members.contains(&id)
    }

    pub fn is_defeated(&self) -> bool {
        self.members.is_empty()
    }

    /// Replace the roster and recompute the rating from it.
    pub fn set_members(&mut self, members: Vec<CharacterId>, arena: &Arena) {
        self.rating = arena.rating_of(&members);
        self.members = members;
    }

    /// Drop one character, keeping the others in order.
    pub fn remove_member(&mut self, id: CharacterId, arena: &Arena) {
        let remaining = self.members.iter().copied().filter(|m| *m != id).collect();
        self.set_members(remaining, arena);
    }

    /// Rating as of the last roster change.
    pub fn rating(&self) -> f64 {
        self.rating
    }

    /// Rating from the members' current char ranks.
    pub fn get_team_rating(&self, arena: &Arena) -> f64 {
        arena.rating_of(&self.members)
    }
}

/// Team definition as supplied by a roster file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamDef {
    pub name: String,
    pub members: Vec<CharacterDef>,
}

/// A named group of built characters, ready to be placed in an arena.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamSetup {
    pub name: String,
    pub members: Vec<Character>,
}

impl TeamSetup {
    pub fn new(name: impl Into<String>, members: Vec<Character>) -> Self {
        Self {
            name: name.into(),
            members,
        }
    }
}

impl From<&TeamDef> for TeamSetup {
    fn from(def: &TeamDef) -> Self {
        TeamSetup::new(def.name.clone(), def.members.iter().map(CharacterDef::build).collect())
    }
}
