use clap::Parser;
use encoding_rs::Encoding;
use shinzoku_engine::api::{self, BattleConfig};
use shinzoku_engine::{DEFAULT_MAX_TURNS, DEFAULT_MOVES_PER_TURN};
use std::{fs, path::PathBuf};

#[derive(Parser)]
#[command(name = "simulate-many")]
#[command(about = "Monte Carlo sim: many battles over one roster")]
struct Args {
    /// Built-in roster id
    #[arg(long, conflicts_with = "file")]
    builtin: Option<String>,

    /// Roster JSON/YAML file
    #[arg(long)]
    file: Option<PathBuf>,

    /// Number of trials
    #[arg(long, default_value_t = 1000)]
    trials: u32,

    /// Safety cap on turns per trial
    #[arg(long, default_value_t = DEFAULT_MAX_TURNS)]
    max_turns: u32,

    /// Actions per team per turn
    #[arg(long, default_value_t = DEFAULT_MOVES_PER_TURN)]
    moves: usize,

    /// RNG base seed (trial i uses seed+i)
    #[arg(long, default_value_t = 12345)]
    seed: u64,
}

fn read_text_auto(path: &std::path::Path) -> anyhow::Result<String> {
    let bytes = fs::read(path)?;
    if let Some((enc, bom_len)) = Encoding::for_bom(&bytes) {
        let (cow, _, _) = enc.decode(&bytes[bom_len..]);
        Ok(cow.into_owned())
    } else {
        Ok(String::from_utf8(bytes)?)
    }
}

fn percent(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut cfg = if let Some(path) = args.file.as_ref() {
        let text = read_text_auto(path)?;
        BattleConfig::from_roster(api::parse_roster(&text, &path.to_string_lossy())?, args.seed)
    } else {
        let id = args.builtin.clone().unwrap_or_else(|| "shinobi_duel".into());
        BattleConfig::builtin(id, args.seed)
    };
    cfg.max_turns = args.max_turns;
    cfg.moves_per_turn = args.moves;

    let roster = api::resolve_roster(&cfg)?;
    let stats = api::simulate_battle_many(cfg, args.trials)?;

    println!("simulate-many results");
    println!("---------------------");
    println!("trials:             {}", stats.samples);
    println!(
        "matchup:            {} vs {}",
        roster.team1.name, roster.team2.name
    );
    println!("moves per turn:     {}", args.moves);
    println!("turn cap:           {}", args.max_turns);
    println!();
    println!(
        "{:<20}{:.1}%",
        format!("{} wins:", roster.team1.name),
        percent(stats.team1_wins, stats.samples)
    );
    println!(
        "{:<20}{:.1}%",
        format!("{} wins:", roster.team2.name),
        percent(stats.team2_wins, stats.samples)
    );
    println!(
        "capped battles:     {:.1}%",
        percent(stats.turn_cap_battles, stats.samples)
    );
    println!("avg turns:          {:.2}", stats.avg_turns);

    Ok(())
}
