use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::attribute::{AbilityKind, Attribute, AttributeDef, AttributeKind, SpecialAbility, SpecialAbilityDef};
use crate::error::BattleError;

/// Letter tier derived from a character's rank. Ordered E < D < C < B < A < S.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BattleRank {
    E,
    D,
    C,
    B,
    A,
    S,
}

impl BattleRank {
    pub fn from_char_rank(rank: f64) -> Self {
        if rank <= 4000.0 {
            BattleRank::E
        } else if rank <= 6000.0 {
            BattleRank::D
        } else if rank <= 8000.0 {
            BattleRank::C
        } else if rank <= 10000.0 {
            BattleRank::B
        } else if rank <= 14000.0 {
            BattleRank::A
        } else {
            BattleRank::S
        }
    }
}

impl fmt::Display for BattleRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Character {
    name: String,
    class: String,
    attributes: IndexMap<AttributeKind, Attribute>,
    special_abilities: Vec<SpecialAbility>,
    attr_rank: f64,
    ability_rank: f64,
    char_rank: f64,
}

impl Character {
    /// Later duplicates of an attribute name replace earlier ones.
    pub fn new(
        name: impl Into<String>,
        class: impl Into<String>,
        attributes: impl IntoIterator<Item = Attribute>,
        special_abilities: Vec<SpecialAbility>,
    ) -> Self {
        let attributes: IndexMap<_, _> = attributes.into_iter().map(|a| (a.name, a)).collect();
        let ability_rank = special_abilities.iter().map(SpecialAbility::value).sum();
        let mut character = Self {
            name: name.into(),
            class: class.into(),
            attributes,
            special_abilities,
            attr_rank: 0.0,
            ability_rank,
            char_rank: 0.0,
        };
        character.recompute_rank();
        character
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.values()
    }

    pub fn special_abilities(&self) -> &[SpecialAbility] {
        &self.special_abilities
    }

    pub fn get_attribute(&self, name: AttributeKind) -> Option<&Attribute> {
        self.attributes.get(&name)
    }

    /// Current value of a required attribute.
    pub fn require(&self, name: AttributeKind) -> Result<f64, BattleError> {
        self.get_attribute(name)
            .map(|a| a.value)
            .ok_or_else(|| BattleError::MissingAttribute {
                character: self.name.clone(),
                attribute: name,
            })
    }

    /// Replace an attribute's value and re-derive the rank. Returns false
    /// (and leaves the character untouched) when the attribute is absent.
    pub fn modify_attribute(&mut self, name: AttributeKind, value: f64) -> bool {
        match self.attributes.get_mut(&name) {
            Some(attr) => {
                attr.value = value;
                self.recompute_rank();
                true
            }
            None => {
                tracing::warn!(character = %self.name, attribute = %name, "no attribute with that name");
                false
            }
        }
    }

    pub fn get_special_ability(&self, name: AbilityKind) -> Result<&SpecialAbility, BattleError> {
        self.special_abilities
            .iter()
            .find(|a| a.name() == name)
            .ok_or_else(|| BattleError::AbilityNotFound {
                character: self.name.clone(),
                ability: name,
            })
    }

    /// Subtract `amount` from hp, flooring at 0. Returns the new hp.
    pub fn take_damage(&mut self, amount: f64) -> Result<f64, BattleError> {
        let hp = (self.require(AttributeKind::Hp)? - amount).max(0.0);
        self.modify_attribute(AttributeKind::Hp, hp);
        Ok(hp)
    }

    /// Add `amount` to an attribute, uncapped. Returns the new value.
    pub fn raise(&mut self, name: AttributeKind, amount: f64) -> Result<f64, BattleError> {
        let value = self.require(name)? + amount;
        self.modify_attribute(name, value);
        Ok(value)
    }

    pub fn is_down(&self) -> Result<bool, BattleError> {
        Ok(self.require(AttributeKind::Hp)? <= 0.0)
    }

    pub fn attr_rank(&self) -> f64 {
        self.attr_rank
    }

    pub fn ability_rank(&self) -> f64 {
        self.ability_rank
    }

    pub fn char_rank(&self) -> f64 {
        self.char_rank
    }

    pub fn battle_rank(&self) -> BattleRank {
        BattleRank::from_char_rank(self.char_rank)
    }

    pub fn summary(&self) -> CharacterSummary {
        CharacterSummary {
            name: self.name.clone(),
            class: self.class.clone(),
            attributes: self.attributes.values().map(|a| (a.name, a.value)).collect(),
            rank: format!("{} ({})", self.char_rank, self.battle_rank()),
            special_abilities: self
                .special_abilities
                .iter()
                .map(|a| AbilitySummary {
                    name: a.name(),
                    skill_name: a.skill_name().to_string(),
                    value: a.value(),
                    mp_cost: a.mp_cost(),
                    description: a.description().to_string(),
                })
                .collect(),
        }
    }

    fn recompute_rank(&mut self) {
        self.attr_rank = self.attributes.values().map(|a| a.value).sum();
        self.char_rank = self.attr_rank + self.ability_rank;
    }
}

/// Character definition as supplied by a catalog or roster file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CharacterDef {
    pub name: String,
    #[serde(default)]
    pub class: String,
    pub attributes: Vec<AttributeDef>,
    #[serde(default, alias = "specialAbilities")]
    pub special_abilities: Vec<SpecialAbilityDef>,
}

impl CharacterDef {
    pub fn build(&self) -> Character {
        Character::new(
            self.name.clone(),
            self.class.clone(),
            self.attributes.iter().copied().map(Attribute::from),
            self.special_abilities
                .iter()
                .cloned()
                .map(SpecialAbility::from)
                .collect(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AbilitySummary {
    pub name: AbilityKind,
    pub skill_name: String,
    pub value: f64,
    pub mp_cost: f64,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CharacterSummary {
    pub name: String,
    pub class: String,
    pub attributes: IndexMap<AttributeKind, f64>,
    pub rank: String,
    pub special_abilities: Vec<AbilitySummary>,
}
