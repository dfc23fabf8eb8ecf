use std::fmt;

use serde::{Deserialize, Serialize};

use crate::status::EffectKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeKind {
    Hp,
    Mp,
    Dmg,
    Speed,
    Range,
    Armor,
    Stamina,
}

impl AttributeKind {
    pub const ALL: [AttributeKind; 7] = [
        AttributeKind::Hp,
        AttributeKind::Mp,
        AttributeKind::Dmg,
        AttributeKind::Speed,
        AttributeKind::Range,
        AttributeKind::Armor,
        AttributeKind::Stamina,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AttributeKind::Hp => "hp",
            AttributeKind::Mp => "mp",
            AttributeKind::Dmg => "dmg",
            AttributeKind::Speed => "speed",
            AttributeKind::Range => "range",
            AttributeKind::Armor => "armor",
            AttributeKind::Stamina => "stamina",
        }
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named numeric stat. Owned by exactly one character.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: AttributeKind,
    pub value: f64,
}

impl Attribute {
    pub fn new(name: AttributeKind, value: f64) -> Self {
        Self { name, value }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbilityKind {
    #[serde(rename = "evasion")]
    Evasion,
    #[serde(rename = "critical_strike", alias = "critical strike")]
    CriticalStrike,
    #[serde(rename = "poison")]
    Poison,
    #[serde(rename = "stun")]
    Stun,
    #[serde(rename = "heal_self", alias = "heal self")]
    HealSelf,
    #[serde(rename = "heal_others", alias = "heal others")]
    HealOthers,
    #[serde(rename = "buff")]
    Buff,
}

impl AbilityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AbilityKind::Evasion => "evasion",
            AbilityKind::CriticalStrike => "critical strike",
            AbilityKind::Poison => "poison",
            AbilityKind::Stun => "stun",
            AbilityKind::HealSelf => "heal self",
            AbilityKind::HealOthers => "heal others",
            AbilityKind::Buff => "buff",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            AbilityKind::Evasion => "Evade attacks to certain extent",
            AbilityKind::CriticalStrike => "Chance to deal certain multiple of damage",
            AbilityKind::Poison => "Deal damage over time",
            AbilityKind::Stun => "Stun the enemy for a turn",
            AbilityKind::HealSelf => "Heal self",
            AbilityKind::HealOthers => "Heal others",
            AbilityKind::Buff => "Increase hp to certain extent",
        }
    }

    /// The timed effect this ability applies, if any.
    pub fn status_effect(self) -> Option<EffectKind> {
        match self {
            AbilityKind::Evasion => Some(EffectKind::Evasion),
            AbilityKind::Poison => Some(EffectKind::Poison),
            AbilityKind::Stun => Some(EffectKind::Stun),
            _ => None,
        }
    }
}

impl fmt::Display for AbilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A special ability as carried by a character. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpecialAbility {
    name: AbilityKind,
    value: f64,
    mp_cost: f64,
    skill_name: String,
    is_status_effect: bool,
    duration: u32,
}

impl SpecialAbility {
    pub fn new(name: AbilityKind, value: f64, mp_cost: f64, skill_name: impl Into<String>) -> Self {
        let effect = name.status_effect();
        Self {
            name,
            value,
            mp_cost,
            skill_name: skill_name.into(),
            is_status_effect: effect.is_some(),
            duration: effect.map_or(0, EffectKind::default_duration),
        }
    }

    pub fn name(&self) -> AbilityKind {
        self.name
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn mp_cost(&self) -> f64 {
        self.mp_cost
    }

    pub fn skill_name(&self) -> &str {
        &self.skill_name
    }

    pub fn is_status_effect(&self) -> bool {
        self.is_status_effect
    }

    /// Turns the applied effect lasts; 0 for immediate abilities.
    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn description(&self) -> &'static str {
        self.name.description()
    }
}

/* ---------------- input definitions ---------------- */

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttributeDef {
    pub name: AttributeKind,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SpecialAbilityDef {
    pub name: AbilityKind,
    pub value: f64,
    #[serde(default, alias = "mpCost")]
    pub mp_cost: f64,
    #[serde(default, alias = "abilityName")]
    pub skill_name: String,
}

impl From<AttributeDef> for Attribute {
    fn from(def: AttributeDef) -> Self {
        Attribute::new(def.name, def.value)
    }
}

impl From<SpecialAbilityDef> for SpecialAbility {
    fn from(def: SpecialAbilityDef) -> Self {
        SpecialAbility::new(def.name, def.value, def.mp_cost, def.skill_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_effect_classification_follows_kind() {
        let poison = SpecialAbility::new(AbilityKind::Poison, 10.0, 100.0, "Venom");
        assert!(poison.is_status_effect());
        assert_eq!(poison.duration(), 3);

        let stun = SpecialAbility::new(AbilityKind::Stun, 2.0, 80.0, "Chidori");
        assert!(stun.is_status_effect());
        assert_eq!(stun.duration(), 1);

        let buff = SpecialAbility::new(AbilityKind::Buff, 50.0, 20.0, "Iron skin");
        assert!(!buff.is_status_effect());
        assert_eq!(buff.duration(), 0);
    }

    #[test]
    fn ability_names_accept_both_spellings() {
        let a: SpecialAbilityDef =
            serde_json::from_str(r#"{"name":"critical strike","value":3,"mpCost":100}"#).unwrap();
        let b: SpecialAbilityDef =
            serde_json::from_str(r#"{"name":"critical_strike","value":3,"mp_cost":100}"#).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn omitted_cost_means_a_free_ability() {
        let def: SpecialAbilityDef = serde_json::from_str(r#"{"name":"buff","value":50}"#).unwrap();
        assert_eq!(def.mp_cost, 0.0);
        assert_eq!(SpecialAbility::from(def).skill_name(), "");
    }

    #[test]
    fn unknown_ability_name_is_rejected() {
        let res: Result<SpecialAbilityDef, _> =
            serde_json::from_str(r#"{"name":"teleport","value":1,"mp_cost":1}"#);
        assert!(res.is_err());
    }
}
