use serde::Serialize;

use crate::attribute::AttributeKind;
use crate::character::Character;
use crate::error::BattleError;
use crate::events::{BattleEvent, Commentary};
use crate::handler::{AbilityContext, AbilityOutcome, SpecialAbilityHandler};
use crate::rng::{Randomizer, SeededRandomizer};
use crate::status::{EffectKind, StatusEffects};
use crate::team::{Arena, CharacterId, Side, Team, TeamSetup};

pub const DEFAULT_MOVES_PER_TURN: usize = 3;
pub const DEFAULT_MAX_TURNS: u32 = 200;
pub const ABILITY_TURN_INTERVAL: u32 = 3;
pub const REFERENCE_MAX_STAMINA: f64 = 1000.0;
pub const ATTACK_STAMINA_COST: f64 = 4.0;
pub const ARMOR_WEAR: f64 = 0.3; // share of mitigated damage taken off armor

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TurnState {
    Team1Active,
    Team2Active,
}

impl TurnState {
    pub fn active(self) -> Side {
        match self {
            TurnState::Team1Active => Side::Team1,
            TurnState::Team2Active => Side::Team2,
        }
    }

    pub fn flip(self) -> TurnState {
        match self {
            TurnState::Team1Active => TurnState::Team2Active,
            TurnState::Team2Active => TurnState::Team1Active,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct AttackOutcome {
    pub hp_damage: f64,
    pub armor_damage: f64,
}

impl AttackOutcome {
    pub const NONE: AttackOutcome = AttackOutcome {
        hp_damage: 0.0,
        armor_damage: 0.0,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "action", content = "outcome", rename_all = "snake_case")]
pub enum ActionOutcome {
    Attack(AttackOutcome),
    Ability(Option<AbilityOutcome>),
}

/// Armor mitigation: `(hp_damage, armor_damage)` for a raw hit of `damage`
/// against `armor`, before speed scaling.
pub fn calculate_hp_armor_damage(damage: f64, armor: f64) -> (f64, f64) {
    if damage == 0.0 {
        return (0.0, 0.0);
    }
    let hp_damage = damage * 100.0 / (100.0 + armor);
    let armor_damage = (1.0 - hp_damage / damage) * armor * ARMOR_WEAR;
    (hp_damage, armor_damage)
}

pub struct AutoBattleField<R = SeededRandomizer> {
    arena: Arena,
    team1: Team,
    team2: Team,
    moves_per_turn: usize,
    turn_count: u32,
    state: TurnState,
    effects: StatusEffects,
    commentary: Commentary,
    handler: SpecialAbilityHandler,
    rng: R,
}

impl<R: Randomizer> AutoBattleField<R> {
    pub fn new(team1: TeamSetup, team2: TeamSetup, rng: R) -> Self {
        let mut arena = Arena::new();
        let ids1 = team1.members.into_iter().map(|c| arena.insert(c)).collect();
        let ids2 = team2.members.into_iter().map(|c| arena.insert(c)).collect();
        let team1 = Team::new(team1.name, ids1, &arena);
        let team2 = Team::new(team2.name, ids2, &arena);
        Self::from_arena(arena, team1, team2, rng)
    }

    pub fn from_arena(arena: Arena, team1: Team, team2: Team, rng: R) -> Self {
        Self {
            arena,
            team1,
            team2,
            moves_per_turn: DEFAULT_MOVES_PER_TURN,
            turn_count: 1,
            state: TurnState::Team1Active,
            effects: StatusEffects::new(),
            commentary: Commentary::new(),
            handler: SpecialAbilityHandler::new(),
            rng,
        }
    }

    pub fn with_moves_per_turn(mut self, moves_per_turn: usize) -> Self {
        self.moves_per_turn = moves_per_turn;
        self
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn character(&self, id: CharacterId) -> Result<&Character, BattleError> {
        self.arena.get(id)
    }

    pub fn character_mut(&mut self, id: CharacterId) -> Result<&mut Character, BattleError> {
        self.arena.get_mut(id)
    }

    pub fn team(&self, side: Side) -> &Team {
        match side {
            Side::Team1 => &self.team1,
            Side::Team2 => &self.team2,
        }
    }

    pub fn side_of(&self, id: CharacterId) -> Option<Side> {
        if self.team1.contains(id) {
            Some(Side::Team1)
        } else if self.team2.contains(id) {
            Some(Side::Team2)
        } else {
            None
        }
    }

    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    pub fn turn_state(&self) -> TurnState {
        self.state
    }

    pub fn moves_per_turn(&self) -> usize {
        self.moves_per_turn
    }

    pub fn effects(&self) -> &StatusEffects {
        &self.effects
    }

    pub fn effects_mut(&mut self) -> &mut StatusEffects {
        &mut self.effects
    }

    pub fn commentary(&self) -> &Commentary {
        &self.commentary
    }

    pub fn into_commentary(self) -> Commentary {
        self.commentary
    }

    /// Run turns until a roster is wiped or `max_turns` is reached. At the
    /// cap the higher-rated team wins; ties go to team 2.
    pub fn run_battle(&mut self, max_turns: u32) -> Result<Side, BattleError> {
        self.commentary.record(BattleEvent::BattleStarted);
        self.record_matchup();
        for side in [Side::Team1, Side::Team2] {
            let team = self.team(side);
            let members = team
                .members()
                .iter()
                .map(|&id| self.arena.get(id).map(|c| c.name().to_string()))
                .collect::<Result<Vec<_>, _>>()?;
            let event = BattleEvent::Roster {
                team: team.name().to_string(),
                members,
            };
            self.commentary.record(event);
        }

        let winner = loop {
            self.execute_turn()?;
            let team1_rating = self.team1.get_team_rating(&self.arena);
            let team2_rating = self.team2.get_team_rating(&self.arena);
            if self.check_team_status(Side::Team1) {
                break Side::Team2;
            }
            if self.check_team_status(Side::Team2) {
                break Side::Team1;
            }
            if self.turn_count >= max_turns {
                self.commentary.record(BattleEvent::TurnCapReached { max_turns });
                break if team1_rating > team2_rating {
                    Side::Team1
                } else {
                    Side::Team2
                };
            }
        };

        self.commentary.record(BattleEvent::BattleFinished {
            winner: self.team(winner).name().to_string(),
            team1: self.team1.name().to_string(),
            team1_rating: self.team1.get_team_rating(&self.arena),
            team2: self.team2.name().to_string(),
            team2_rating: self.team2.get_team_rating(&self.arena),
        });
        Ok(winner)
    }

    pub fn execute_turn(&mut self) -> Result<(), BattleError> {
        let active = self.state.active();
        for _ in 0..self.moves_per_turn {
            if self.team(active.other()).is_defeated() {
                let team = self.team(active).name().to_string();
                self.commentary.record(BattleEvent::NoOpponent { team });
                break;
            }
            let available = self.team(active).size();
            if available == 0 {
                break;
            }
            let pick = self.rng.pick(available);
            let actor = self.team(active).members()[pick];
            if self.initiate_player_action(actor)?.is_none() {
                break;
            }
        }
        self.next_turn()
    }

    /// One action by `character` against the weakest opponent. `None` means
    /// there was nobody left to act against.
    pub fn initiate_player_action(
        &mut self,
        character: CharacterId,
    ) -> Result<Option<ActionOutcome>, BattleError> {
        let Some(opponent) = self.pick_opponent()? else {
            return Ok(None);
        };
        let active = self.state.active();

        let abilities = self.arena.get(character)?.special_abilities();
        let outcome = if self.turn_count % ABILITY_TURN_INTERVAL == 0 && !abilities.is_empty() {
            let ability = abilities[self.rng.pick(abilities.len())].clone();
            let allies = self.team(active).members().to_vec();
            let mut ctx = AbilityContext {
                arena: &mut self.arena,
                allies: &allies,
                effects: &mut self.effects,
                commentary: &mut self.commentary,
                turn: self.turn_count,
            };
            ActionOutcome::Ability(self.handler.execute(&ability, character, opponent, &mut ctx)?)
        } else {
            ActionOutcome::Attack(self.attack(character, opponent)?)
        };

        self.check_player_status(opponent, active.other())?;
        Ok(Some(outcome))
    }

    /// Focus fire: the living opponent with the lowest `hp + armor / 2`,
    /// earliest in roster order on ties.
    pub fn pick_opponent(&self) -> Result<Option<CharacterId>, BattleError> {
        let opponents = self.team(self.state.active().other()).members();
        let mut scored = Vec::with_capacity(opponents.len());
        for &id in opponents {
            scored.push((self.vulnerability(id)?, id));
        }
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));
        Ok(scored.first().map(|&(_, id)| id))
    }

    pub fn vulnerability(&self, id: CharacterId) -> Result<f64, BattleError> {
        let c = self.arena.get(id)?;
        let hp = c.require(AttributeKind::Hp)?;
        let armor = c.require(AttributeKind::Armor)?;
        Ok(-(hp + armor * 0.5))
    }

    pub fn effective_speed(&self, id: CharacterId) -> Result<f64, BattleError> {
        let c = self.arena.get(id)?;
        let speed = c.require(AttributeKind::Speed)?;
        let stamina = c.require(AttributeKind::Stamina)?;
        Ok(speed * (stamina / REFERENCE_MAX_STAMINA))
    }

    /// Basic attack. A stunned attacker or an evading target spends its
    /// effect and the attack resolves to nothing, with no stamina cost.
    pub fn attack(
        &mut self,
        attacker: CharacterId,
        target: CharacterId,
    ) -> Result<AttackOutcome, BattleError> {
        if self.effects.consume(EffectKind::Stun, attacker) {
            let character = self.arena.get(attacker)?.name().to_string();
            self.commentary.record(BattleEvent::Stunned { character });
            return Ok(AttackOutcome::NONE);
        }

        let damage = self.arena.get(attacker)?.require(AttributeKind::Dmg)?;
        let target_armor = self.arena.get(target)?.require(AttributeKind::Armor)?;
        let (hp_damage, armor_damage) = calculate_hp_armor_damage(damage, target_armor);
        let attacker_speed = self.effective_speed(attacker)?;
        let target_speed = self.effective_speed(target)?;

        if self.effects.consume(EffectKind::Evasion, target) {
            let event = BattleEvent::Dodged {
                attacker: self.arena.get(attacker)?.name().to_string(),
                target: self.arena.get(target)?.name().to_string(),
            };
            self.commentary.record(event);
            return Ok(AttackOutcome::NONE);
        }

        let damage_factor = if target_speed == 0.0 {
            1.0
        } else {
            attacker_speed / target_speed
        };
        let hp_damage = (hp_damage * damage_factor).max(1.0);
        let armor_damage = armor_damage.max(0.0);

        let attacker_char = self.arena.get_mut(attacker)?;
        attacker_char.raise(AttributeKind::Stamina, -ATTACK_STAMINA_COST)?;
        let attacker_name = attacker_char.name().to_string();

        let target_char = self.arena.get_mut(target)?;
        target_char.raise(AttributeKind::Stamina, -ATTACK_STAMINA_COST)?;
        let target_hp = target_char.take_damage(hp_damage)?;
        let target_armor = target_char.raise(AttributeKind::Armor, -armor_damage)?;
        let event = BattleEvent::Attacked {
            attacker: attacker_name,
            target: target_char.name().to_string(),
            hp_damage,
            armor_damage,
            target_hp,
            target_armor,
        };
        self.commentary.record(event);

        Ok(AttackOutcome {
            hp_damage,
            armor_damage,
        })
    }

    pub fn next_turn(&mut self) -> Result<(), BattleError> {
        for expired in self.effects.expire_timed(self.turn_count) {
            let character = self.arena.get(expired.recipient)?.name().to_string();
            self.commentary.record(BattleEvent::EffectExpired {
                character,
                kind: expired.kind,
            });
        }
        self.state = self.state.flip();
        self.turn_count += 1;
        self.check_and_apply_poison_effects()?;
        self.commentary.record(BattleEvent::TurnStarted {
            turn: self.turn_count,
        });
        Ok(())
    }

    pub fn check_and_apply_poison_effects(&mut self) -> Result<(), BattleError> {
        let (team1, team2) = (&self.team1, &self.team2);
        let ticks = self
            .effects
            .tick_poison(|id| team1.contains(id) || team2.contains(id));

        for tick in ticks {
            let Some(side) = self.side_of(tick.recipient) else {
                continue;
            };
            let recipient = self.arena.get_mut(tick.recipient)?;
            recipient.take_damage(tick.damage)?;
            let event = BattleEvent::PoisonTick {
                character: recipient.name().to_string(),
                damage: tick.damage,
                remaining: tick.remaining,
            };
            self.commentary.record(event);
            self.check_player_status(tick.recipient, side)?;
        }
        Ok(())
    }

    /// Remove `character` from `side`'s roster if its hp is gone. Returns
    /// whether it was removed.
    pub fn check_player_status(
        &mut self,
        character: CharacterId,
        side: Side,
    ) -> Result<bool, BattleError> {
        let fallen = self.arena.get(character)?;
        if !fallen.is_down()? {
            return Ok(false);
        }
        let team = match side {
            Side::Team1 => &mut self.team1,
            Side::Team2 => &mut self.team2,
        };
        if !team.contains(character) {
            return Ok(false);
        }
        self.commentary.record(BattleEvent::Killed {
            character: fallen.name().to_string(),
        });
        team.remove_member(character, &self.arena);
        Ok(true)
    }

    pub fn check_team_status(&mut self, side: Side) -> bool {
        let team = self.team(side);
        if !team.is_defeated() {
            return false;
        }
        let team = team.name().to_string();
        self.commentary.record(BattleEvent::TeamDefeated { team });
        true
    }

    fn record_matchup(&mut self) {
        let event = BattleEvent::Matchup {
            team1: self.team1.name().to_string(),
            team1_rating: self.team1.get_team_rating(&self.arena),
            team2: self.team2.name().to_string(),
            team2_rating: self.team2.get_team_rating(&self.arena),
        };
        self.commentary.record(event);
    }
}
