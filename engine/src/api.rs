use std::{fs, path::Path};

use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::battlefield::{AutoBattleField, DEFAULT_MAX_TURNS, DEFAULT_MOVES_PER_TURN};
use crate::character::CharacterSummary;
use crate::content::builtin_rosters;
use crate::events::BattleEvent;
use crate::rng::SeededRandomizer;
use crate::team::{Side, TeamDef, TeamSetup};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Roster {
    pub team1: TeamDef,
    pub team2: TeamDef,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct BattleConfig {
    #[serde(default)]
    pub roster_id: Option<String>,
    #[serde(default)]
    pub roster_path: Option<String>,
    #[serde(default)]
    pub teams: Option<Roster>,
    #[serde(default)]
    pub seed: u64,
    #[serde(default = "default_moves_per_turn")]
    pub moves_per_turn: usize,
    #[serde(default = "default_max_turns")]
    pub max_turns: u32,
}

fn default_moves_per_turn() -> usize {
    DEFAULT_MOVES_PER_TURN
}

fn default_max_turns() -> u32 {
    DEFAULT_MAX_TURNS
}

impl BattleConfig {
    pub fn from_roster(teams: Roster, seed: u64) -> Self {
        Self {
            roster_id: None,
            roster_path: None,
            teams: Some(teams),
            seed,
            moves_per_turn: DEFAULT_MOVES_PER_TURN,
            max_turns: DEFAULT_MAX_TURNS,
        }
    }

    pub fn builtin(roster_id: impl Into<String>, seed: u64) -> Self {
        Self {
            roster_id: Some(roster_id.into()),
            roster_path: None,
            teams: None,
            seed,
            moves_per_turn: DEFAULT_MOVES_PER_TURN,
            max_turns: DEFAULT_MAX_TURNS,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Survivors {
    pub team1: Vec<String>,
    pub team2: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct BattleResult {
    pub winner: String,
    pub winner_side: Side,
    pub turns: u32,
    pub turn_cap_reached: bool,
    pub team1_rating: f64,
    pub team2_rating: f64,
    pub survivors: Survivors,
    pub log: Vec<String>,
    pub events: Vec<BattleEvent>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct BattleStats {
    pub samples: u32,
    pub team1_wins: u32,
    pub team2_wins: u32,
    pub turn_cap_battles: u32,
    pub avg_turns: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TeamSummary {
    pub name: String,
    pub rating: f64,
    pub members: Vec<CharacterSummary>,
}

pub fn simulate_battle(cfg: BattleConfig) -> Result<BattleResult> {
    let roster = resolve_roster(&cfg)?;
    run_roster(&roster, &cfg, cfg.seed)
}

/// Run `samples` battles over the same roster, trial `i` seeded with `seed + i`.
pub fn simulate_battle_many(cfg: BattleConfig, samples: u32) -> Result<BattleStats> {
    let roster = resolve_roster(&cfg)?;
    let mut stats = BattleStats {
        samples,
        team1_wins: 0,
        team2_wins: 0,
        turn_cap_battles: 0,
        avg_turns: 0.0,
    };
    let mut total_turns = 0u64;
    for i in 0..samples {
        let result = run_roster(&roster, &cfg, cfg.seed.wrapping_add(i as u64))?;
        match result.winner_side {
            Side::Team1 => stats.team1_wins += 1,
            Side::Team2 => stats.team2_wins += 1,
        }
        if result.turn_cap_reached {
            stats.turn_cap_battles += 1;
        }
        total_turns += result.turns as u64;
    }
    if samples > 0 {
        stats.avg_turns = total_turns as f64 / samples as f64;
    }
    Ok(stats)
}

pub fn describe_roster(roster: &Roster) -> Vec<TeamSummary> {
    [&roster.team1, &roster.team2]
        .into_iter()
        .map(|def| {
            let members: Vec<_> = def.members.iter().map(|m| m.build()).collect();
            TeamSummary {
                name: def.name.clone(),
                rating: members.iter().map(|m| m.char_rank()).sum(),
                members: members.iter().map(|m| m.summary()).collect(),
            }
        })
        .collect()
}

/// Parse roster text; YAML when `path` ends in `.yaml`/`.yml`, JSON otherwise.
pub fn parse_roster(text: &str, path: &str) -> Result<Roster> {
    let is_yaml = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));
    if is_yaml {
        serde_yaml::from_str(text).with_context(|| format!("failed to parse roster YAML: {}", path))
    } else {
        serde_json::from_str(text).with_context(|| format!("failed to parse roster JSON: {}", path))
    }
}

pub fn resolve_roster(cfg: &BattleConfig) -> Result<Roster> {
    let roster = if let Some(teams) = &cfg.teams {
        teams.clone()
    } else if let Some(id) = &cfg.roster_id {
        let builtins = builtin_rosters();
        let text = builtins
            .get(id.as_str())
            .ok_or_else(|| anyhow!("built-in roster '{}' not found", id))?;
        serde_json::from_str(text).with_context(|| format!("failed to parse built-in roster: {}", id))?
    } else if let Some(path) = &cfg.roster_path {
        load_roster(path)?
    } else {
        bail!("no roster given: set one of teams, roster_id or roster_path");
    };
    validate(&roster, cfg)?;
    Ok(roster)
}

fn load_roster(path: &str) -> Result<Roster> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read roster file: {}", path))?;
    parse_roster(&text, path)
}

fn validate(roster: &Roster, cfg: &BattleConfig) -> Result<()> {
    for team in [&roster.team1, &roster.team2] {
        if team.members.is_empty() {
            bail!("team '{}' has no members", team.name);
        }
    }
    if cfg.moves_per_turn == 0 {
        bail!("moves_per_turn must be at least 1");
    }
    Ok(())
}

fn run_roster(roster: &Roster, cfg: &BattleConfig, seed: u64) -> Result<BattleResult> {
    let mut field = AutoBattleField::new(
        TeamSetup::from(&roster.team1),
        TeamSetup::from(&roster.team2),
        SeededRandomizer::from_seed(seed),
    )
    .with_moves_per_turn(cfg.moves_per_turn);

    let winner_side = field.run_battle(cfg.max_turns)?;

    let names = |side: Side| -> Result<Vec<String>> {
        field
            .team(side)
            .members()
            .iter()
            .map(|&id| -> Result<String> { Ok(field.character(id)?.name().to_string()) })
            .collect()
    };
    let survivors = Survivors {
        team1: names(Side::Team1)?,
        team2: names(Side::Team2)?,
    };
    let winner = field.team(winner_side).name().to_string();
    let turns = field.turn_count();
    let team1_rating = field.team(Side::Team1).get_team_rating(field.arena());
    let team2_rating = field.team(Side::Team2).get_team_rating(field.arena());

    let commentary = field.into_commentary();
    let log = commentary.lines();
    let events = commentary.into_events();
    let turn_cap_reached = events
        .iter()
        .any(|e| matches!(e, BattleEvent::TurnCapReached { .. }));

    Ok(BattleResult {
        winner,
        winner_side,
        turns,
        turn_cap_reached,
        team1_rating,
        team2_rating,
        survivors,
        log,
        events,
    })
}
