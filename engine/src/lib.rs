pub mod api;
pub mod attribute;
pub mod battlefield;
pub mod character;
pub mod content;
pub mod error;
pub mod events;
pub mod handler;
pub mod rng;
pub mod status;
pub mod team;

pub use attribute::{AbilityKind, Attribute, AttributeKind, SpecialAbility};
pub use battlefield::{
    calculate_hp_armor_damage, ActionOutcome, AttackOutcome, AutoBattleField, TurnState,
    DEFAULT_MAX_TURNS, DEFAULT_MOVES_PER_TURN,
};
pub use character::{BattleRank, Character, CharacterDef};
pub use error::BattleError;
pub use events::{BattleEvent, Commentary};
pub use handler::{AbilityOutcome, SpecialAbilityHandler};
pub use rng::{Randomizer, ScriptedRandomizer, SeededRandomizer};
pub use status::{EffectKind, StatusEffect, StatusEffects};
pub use team::{Arena, CharacterId, Side, Team, TeamDef, TeamSetup};
