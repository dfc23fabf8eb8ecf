use thiserror::Error;

use crate::attribute::{AbilityKind, AttributeKind};
use crate::team::CharacterId;

/// Structural failures that abort a battle.
///
/// Running out of MP or running out of opponents are not errors; those are
/// reported through the commentary and an empty result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BattleError {
    #[error("{character} has no {attribute} attribute")]
    MissingAttribute {
        character: String,
        attribute: AttributeKind,
    },
    #[error("{character} has no special ability named {ability}")]
    AbilityNotFound {
        character: String,
        ability: AbilityKind,
    },
    #[error("no character with id {0:?}")]
    UnknownCharacter(CharacterId),
}
