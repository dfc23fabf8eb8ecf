//! Battle commentary.
//!
//! Every notable event is recorded as a structured [`BattleEvent`] so a
//! renderer can work from actors and amounts; `Display` gives the plain
//! text log line for each.

use std::fmt;

use serde::Serialize;

use crate::attribute::AbilityKind;
use crate::status::EffectKind;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BattleEvent {
    BattleStarted,
    Matchup {
        team1: String,
        team1_rating: f64,
        team2: String,
        team2_rating: f64,
    },
    Roster {
        team: String,
        members: Vec<String>,
    },
    TurnStarted {
        turn: u32,
    },
    Attacked {
        attacker: String,
        target: String,
        hp_damage: f64,
        armor_damage: f64,
        target_hp: f64,
        target_armor: f64,
    },
    Dodged {
        attacker: String,
        target: String,
    },
    Stunned {
        character: String,
    },
    LacksMp {
        caster: String,
        ability: AbilityKind,
        mp: f64,
        mp_cost: f64,
    },
    EvasionActivated {
        caster: String,
        ability: AbilityKind,
        duration: u32,
    },
    CriticalStrike {
        caster: String,
        target: String,
        ability: AbilityKind,
        extra_damage: f64,
        target_hp: f64,
    },
    Poisoned {
        caster: String,
        target: String,
        ability: AbilityKind,
        duration: u32,
        damage: f64,
    },
    StunApplied {
        caster: String,
        target: String,
        ability: AbilityKind,
    },
    HealedSelf {
        caster: String,
        ability: AbilityKind,
        amount: f64,
        hp: f64,
    },
    HealedAlly {
        caster: String,
        ally: String,
        ability: AbilityKind,
        amount: f64,
        hp: f64,
    },
    NoAllyToHeal {
        caster: String,
        ability: AbilityKind,
    },
    Buffed {
        caster: String,
        ability: AbilityKind,
        amount: f64,
        armor: f64,
    },
    PoisonTick {
        character: String,
        damage: f64,
        remaining: u32,
    },
    EffectExpired {
        character: String,
        kind: EffectKind,
    },
    Killed {
        character: String,
    },
    TeamDefeated {
        team: String,
    },
    NoOpponent {
        team: String,
    },
    TurnCapReached {
        max_turns: u32,
    },
    BattleFinished {
        winner: String,
        team1: String,
        team1_rating: f64,
        team2: String,
        team2_rating: f64,
    },
}

/// Rounded to two decimals; whole numbers print bare.
struct Amount(f64);

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = (self.0 * 100.0).round() / 100.0;
        if rounded.fract() == 0.0 {
            write!(f, "{:.0}", rounded)
        } else {
            write!(f, "{:.2}", rounded)
        }
    }
}

impl fmt::Display for BattleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use BattleEvent::*;
        match self {
            BattleStarted => f.write_str("Battle Started"),
            Matchup {
                team1,
                team1_rating,
                team2,
                team2_rating,
            } => write!(
                f,
                "{} {} VS {} {}",
                team1,
                Amount(*team1_rating),
                team2,
                Amount(*team2_rating)
            ),
            Roster { team, members } => write!(f, "{} members {}", team, members.join(",")),
            TurnStarted { turn } => write!(f, "Turn {}", turn),
            Attacked {
                attacker,
                target,
                hp_damage,
                armor_damage,
                target_hp,
                target_armor,
            } => write!(
                f,
                "{} attacks {}, dealing {} damage to HP and {} to armor. {} has {} hp and {} armor left",
                attacker,
                target,
                Amount(*hp_damage),
                Amount(*armor_damage),
                target,
                Amount(*target_hp),
                Amount(*target_armor)
            ),
            Dodged { attacker, target } => {
                write!(f, "{} attacks {}, {} dodges the attack", attacker, target, target)
            }
            Stunned { character } => write!(f, "{} is stunned and cannot attack", character),
            LacksMp { caster, ability, .. } => {
                write!(f, "{} lacks MP to activate {}", caster, ability)
            }
            EvasionActivated {
                caster,
                ability,
                duration,
            } => write!(f, "{} activates {} for {} turn(s)", caster, ability, duration),
            CriticalStrike {
                caster,
                target,
                ability,
                extra_damage,
                target_hp,
            } => write!(
                f,
                "{} uses {} on {} dealing an extra {} damage. {} has {} HP left",
                caster,
                ability,
                target,
                Amount(*extra_damage),
                target,
                Amount(*target_hp)
            ),
            Poisoned {
                caster,
                target,
                ability,
                duration,
                damage,
            } => write!(
                f,
                "{} uses {} on {} for {} turns (damage: {}/turn)",
                caster,
                ability,
                target,
                duration,
                Amount(*damage)
            ),
            StunApplied {
                caster,
                target,
                ability,
            } => write!(
                f,
                "{} uses {} on {} causing them to miss their next turn",
                caster, ability, target
            ),
            HealedSelf {
                caster,
                ability,
                amount,
                ..
            } => write!(f, "{} uses {} on self for {} HP", caster, ability, Amount(*amount)),
            HealedAlly {
                caster,
                ally,
                ability,
                amount,
                ..
            } => write!(f, "{} uses {} on {} for {} HP", caster, ability, ally, Amount(*amount)),
            NoAllyToHeal { caster, ability } => {
                write!(f, "{} uses {} but has no teammate to heal", caster, ability)
            }
            Buffed {
                caster,
                ability,
                amount,
                ..
            } => write!(
                f,
                "{} uses {} to buff their armor by {}",
                caster,
                ability,
                Amount(*amount)
            ),
            PoisonTick {
                character,
                damage,
                remaining,
            } => {
                if *remaining == 0 {
                    write!(f, "{} -{} hp, no longer poisoned", character, Amount(*damage))
                } else {
                    write!(
                        f,
                        "{} -{} hp, still poisoned for {} turn(s)",
                        character,
                        Amount(*damage),
                        remaining
                    )
                }
            }
            EffectExpired { character, kind } => {
                write!(f, "{}'s {} effect has worn off", character, kind)
            }
            Killed { character } => write!(f, "{} has been killed", character),
            TeamDefeated { team } => write!(f, "{} has been defeated", team),
            NoOpponent { team } => write!(f, "No opponent left for {}", team),
            TurnCapReached { .. } => f.write_str("Maximum number of turns reached"),
            BattleFinished {
                winner,
                team1,
                team1_rating,
                team2,
                team2_rating,
            } => write!(
                f,
                "Battle Simulation Finished. The winner is {}, team ratings: {}:: {} / {}:: {}",
                winner,
                team1,
                Amount(*team1_rating),
                team2,
                Amount(*team2_rating)
            ),
        }
    }
}

/// Append-only record of a battle.
#[derive(Debug, Clone, Default)]
pub struct Commentary {
    events: Vec<BattleEvent>,
}

impl Commentary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, event: BattleEvent) {
        match &event {
            BattleEvent::BattleStarted | BattleEvent::BattleFinished { .. } => {
                tracing::info!(target: "battle", "{}", event)
            }
            _ => tracing::debug!(target: "battle", "{}", event),
        }
        self.events.push(event);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    pub fn lines(&self) -> Vec<String> {
        self.events.iter().map(ToString::to_string).collect()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn into_events(self) -> Vec<BattleEvent> {
        self.events
    }
}
