use serde::Serialize;

use crate::attribute::{AbilityKind, AttributeKind, SpecialAbility};
use crate::error::BattleError;
use crate::events::{BattleEvent, Commentary};
use crate::status::{EffectKind, StatusEffects};
use crate::team::{Arena, CharacterId};

/// What a successfully cast ability did.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum AbilityOutcome {
    Evasion { duration: u32 },
    CriticalStrike { extra_damage: f64 },
    Poison { duration: u32, damage: f64 },
    Stun { duration: u32 },
    HealSelf { amount: f64 },
    HealOthers { recipient: Option<CharacterId>, amount: f64 },
    Buff { amount: f64 },
}

/// Battle state an ability may touch.
pub struct AbilityContext<'a> {
    pub arena: &'a mut Arena,
    /// The caster's current roster, caster included.
    pub allies: &'a [CharacterId],
    pub effects: &'a mut StatusEffects,
    pub commentary: &'a mut Commentary,
    pub turn: u32,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SpecialAbilityHandler;

impl SpecialAbilityHandler {
    pub fn new() -> Self {
        Self
    }

    /// Look up the caster's ability of kind `ability` and cast it.
    pub fn execute_named(
        &self,
        ability: AbilityKind,
        caster: CharacterId,
        target: CharacterId,
        ctx: &mut AbilityContext<'_>,
    ) -> Result<Option<AbilityOutcome>, BattleError> {
        let ability = ctx.arena.get(caster)?.get_special_ability(ability)?.clone();
        self.execute(&ability, caster, target, ctx)
    }

    /// Charge `ability`'s MP cost to the caster and resolve it. Returns `None`
    /// without touching anything when the caster cannot afford it.
    pub fn execute(
        &self,
        ability: &SpecialAbility,
        caster: CharacterId,
        target: CharacterId,
        ctx: &mut AbilityContext<'_>,
    ) -> Result<Option<AbilityOutcome>, BattleError> {
        let caster_char = ctx.arena.get_mut(caster)?;
        let mp = caster_char.require(AttributeKind::Mp)?;
        if mp < ability.mp_cost() {
            let event = BattleEvent::LacksMp {
                caster: caster_char.name().to_string(),
                ability: ability.name(),
                mp,
                mp_cost: ability.mp_cost(),
            };
            ctx.commentary.record(event);
            return Ok(None);
        }
        caster_char.modify_attribute(AttributeKind::Mp, mp - ability.mp_cost());

        let outcome = match ability.name() {
            AbilityKind::Evasion => self.evasion(ability, caster, ctx)?,
            AbilityKind::CriticalStrike => self.critical_strike(ability, caster, target, ctx)?,
            AbilityKind::Poison => self.poison(ability, caster, target, ctx)?,
            AbilityKind::Stun => self.stun(ability, caster, target, ctx)?,
            AbilityKind::HealSelf => self.heal_self(ability, caster, ctx)?,
            AbilityKind::HealOthers => self.heal_others(ability, caster, ctx)?,
            AbilityKind::Buff => self.buff(ability, caster, ctx)?,
        };
        Ok(Some(outcome))
    }

    fn evasion(
        &self,
        ability: &SpecialAbility,
        caster: CharacterId,
        ctx: &mut AbilityContext<'_>,
    ) -> Result<AbilityOutcome, BattleError> {
        let duration = ctx
            .effects
            .apply(EffectKind::Evasion, ability.value(), caster, ctx.turn)
            .duration;
        ctx.commentary.record(BattleEvent::EvasionActivated {
            caster: ctx.arena.get(caster)?.name().to_string(),
            ability: ability.name(),
            duration,
        });
        Ok(AbilityOutcome::Evasion { duration })
    }

    /// Direct damage that skips armor mitigation entirely.
    fn critical_strike(
        &self,
        ability: &SpecialAbility,
        caster: CharacterId,
        target: CharacterId,
        ctx: &mut AbilityContext<'_>,
    ) -> Result<AbilityOutcome, BattleError> {
        let caster_char = ctx.arena.get(caster)?;
        let extra_damage = caster_char.require(AttributeKind::Dmg)? * ability.value();
        let caster_name = caster_char.name().to_string();

        let target_char = ctx.arena.get_mut(target)?;
        let target_hp = target_char.take_damage(extra_damage)?;
        ctx.commentary.record(BattleEvent::CriticalStrike {
            caster: caster_name,
            target: target_char.name().to_string(),
            ability: ability.name(),
            extra_damage,
            target_hp,
        });
        Ok(AbilityOutcome::CriticalStrike { extra_damage })
    }

    fn poison(
        &self,
        ability: &SpecialAbility,
        caster: CharacterId,
        target: CharacterId,
        ctx: &mut AbilityContext<'_>,
    ) -> Result<AbilityOutcome, BattleError> {
        let applied = ctx
            .effects
            .apply(EffectKind::Poison, ability.value(), target, ctx.turn);
        let (duration, damage) = (applied.duration, applied.value);
        ctx.commentary.record(BattleEvent::Poisoned {
            caster: ctx.arena.get(caster)?.name().to_string(),
            target: ctx.arena.get(target)?.name().to_string(),
            ability: ability.name(),
            duration,
            damage,
        });
        Ok(AbilityOutcome::Poison { duration, damage })
    }

    fn stun(
        &self,
        ability: &SpecialAbility,
        caster: CharacterId,
        target: CharacterId,
        ctx: &mut AbilityContext<'_>,
    ) -> Result<AbilityOutcome, BattleError> {
        let duration = ctx
            .effects
            .apply(EffectKind::Stun, ability.value(), target, ctx.turn)
            .duration;
        ctx.commentary.record(BattleEvent::StunApplied {
            caster: ctx.arena.get(caster)?.name().to_string(),
            target: ctx.arena.get(target)?.name().to_string(),
            ability: ability.name(),
        });
        Ok(AbilityOutcome::Stun { duration })
    }

    fn heal_self(
        &self,
        ability: &SpecialAbility,
        caster: CharacterId,
        ctx: &mut AbilityContext<'_>,
    ) -> Result<AbilityOutcome, BattleError> {
        let amount = ability.value();
        let caster_char = ctx.arena.get_mut(caster)?;
        let hp = caster_char.raise(AttributeKind::Hp, amount)?;
        ctx.commentary.record(BattleEvent::HealedSelf {
            caster: caster_char.name().to_string(),
            ability: ability.name(),
            amount,
            hp,
        });
        Ok(AbilityOutcome::HealSelf { amount })
    }

    /// Heals the living teammate with the lowest hp; the first one in
    /// roster order wins ties.
    fn heal_others(
        &self,
        ability: &SpecialAbility,
        caster: CharacterId,
        ctx: &mut AbilityContext<'_>,
    ) -> Result<AbilityOutcome, BattleError> {
        let amount = ability.value();
        let caster_name = ctx.arena.get(caster)?.name().to_string();

        let mut weakest: Option<(CharacterId, f64)> = None;
        for &ally in ctx.allies.iter().filter(|&&a| a != caster) {
            let hp = ctx.arena.get(ally)?.require(AttributeKind::Hp)?;
            if weakest.is_none_or(|(_, low)| hp < low) {
                weakest = Some((ally, hp));
            }
        }

        let Some((recipient, _)) = weakest else {
            ctx.commentary.record(BattleEvent::NoAllyToHeal {
                caster: caster_name,
                ability: ability.name(),
            });
            return Ok(AbilityOutcome::HealOthers {
                recipient: None,
                amount,
            });
        };

        let ally = ctx.arena.get_mut(recipient)?;
        let hp = ally.raise(AttributeKind::Hp, amount)?;
        ctx.commentary.record(BattleEvent::HealedAlly {
            caster: caster_name,
            ally: ally.name().to_string(),
            ability: ability.name(),
            amount,
            hp,
        });
        Ok(AbilityOutcome::HealOthers {
            recipient: Some(recipient),
            amount,
        })
    }

    /// Permanent armor increase for the rest of the battle.
    fn buff(
        &self,
        ability: &SpecialAbility,
        caster: CharacterId,
        ctx: &mut AbilityContext<'_>,
    ) -> Result<AbilityOutcome, BattleError> {
        let amount = ability.value();
        let caster_char = ctx.arena.get_mut(caster)?;
        let armor = caster_char.raise(AttributeKind::Armor, amount)?;
        ctx.commentary.record(BattleEvent::Buffed {
            caster: caster_char.name().to_string(),
            ability: ability.name(),
            amount,
            armor,
        });
        Ok(AbilityOutcome::Buff { amount })
    }
}
