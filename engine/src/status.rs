use std::fmt;

use serde::{Deserialize, Serialize};

use crate::team::CharacterId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectKind {
    Evasion,
    Poison,
    Stun,
}

impl EffectKind {
    pub fn default_duration(self) -> u32 {
        match self {
            EffectKind::Poison => 3,
            EffectKind::Evasion | EffectKind::Stun => 1,
        }
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EffectKind::Evasion => f.write_str("evasion"),
            EffectKind::Poison => f.write_str("poison"),
            EffectKind::Stun => f.write_str("stun"),
        }
    }
}

/// A timed modifier on a single recipient. The duration is driven by the
/// owning [`StatusEffects`] list, never by the effect itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusEffect {
    pub kind: EffectKind,
    pub value: f64,
    pub duration: u32,
    pub recipient: CharacterId,
    /// Turn in which the effect was applied.
    pub applied_turn: u32,
    active: bool,
}

impl StatusEffect {
    pub fn new(kind: EffectKind, value: f64, duration: u32, recipient: CharacterId, applied_turn: u32) -> Self {
        Self {
            kind,
            value,
            duration,
            recipient,
            applied_turn,
            active: false,
        }
    }

    pub fn activate(&mut self) {
        self.active = true;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// One poison tick, for the caller to apply to the recipient's hp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoisonTick {
    pub recipient: CharacterId,
    pub damage: f64,
    pub remaining: u32,
}

/// The battlefield's list of live effects, in application order.
#[derive(Debug, Clone, Default)]
pub struct StatusEffects {
    effects: Vec<StatusEffect>,
}

impl StatusEffects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, kind: EffectKind, value: f64, recipient: CharacterId, turn: u32) -> &StatusEffect {
        let mut effect = StatusEffect::new(kind, value, kind.default_duration(), recipient, turn);
        effect.activate();
        self.effects.push(effect);
        &self.effects[self.effects.len() - 1]
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn has_active(&self, kind: EffectKind, recipient: CharacterId) -> bool {
        self.effects
            .iter()
            .any(|e| e.is_active() && e.kind == kind && e.recipient == recipient)
    }

    /// Use up one matching effect. Evasion and stun block exactly one
    /// action each.
    pub fn consume(&mut self, kind: EffectKind, recipient: CharacterId) -> bool {
        match self
            .effects
            .iter()
            .position(|e| e.is_active() && e.kind == kind && e.recipient == recipient)
        {
            Some(idx) => {
                let mut spent = self.effects.remove(idx);
                spent.deactivate();
                true
            }
            None => false,
        }
    }

    /// Tick every poison once. Poison on recipients for which `alive`
    /// returns false is dropped without ticking.
    pub fn tick_poison(&mut self, mut alive: impl FnMut(CharacterId) -> bool) -> Vec<PoisonTick> {
        let mut ticks = Vec::new();
        self.effects.retain_mut(|e| {
            if e.kind != EffectKind::Poison {
                return true;
            }
            if !alive(e.recipient) {
                return false;
            }
            e.duration = e.duration.saturating_sub(1);
            ticks.push(PoisonTick {
                recipient: e.recipient,
                damage: e.value,
                remaining: e.duration,
            });
            if e.duration == 0 {
                e.deactivate();
                false
            } else {
                true
            }
        });
        ticks
    }

    /// Count down evasion and stun effects applied before `ending_turn`,
    /// returning those that ran out.
    pub fn expire_timed(&mut self, ending_turn: u32) -> Vec<StatusEffect> {
        let mut expired = Vec::new();
        self.effects.retain_mut(|e| {
            if e.kind == EffectKind::Poison || e.applied_turn >= ending_turn {
                return true;
            }
            e.duration = e.duration.saturating_sub(1);
            if e.duration == 0 {
                e.deactivate();
                expired.push(e.clone());
                false
            } else {
                true
            }
        });
        expired
    }
}
