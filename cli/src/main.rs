use clap::{Args, Parser, Subcommand};
use encoding_rs::Encoding;
use shinzoku_engine::api::{self, BattleConfig};
use shinzoku_engine::content::builtin_rosters;
use shinzoku_engine::{DEFAULT_MAX_TURNS, DEFAULT_MOVES_PER_TURN};
use std::{fs, path::PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Args)]
struct RosterArgs {
    /// Built-in roster id (see `builtins`)
    #[arg(long, conflicts_with = "file")]
    builtin: Option<String>,
    /// Roster file; YAML when it ends in .yaml/.yml, JSON otherwise
    #[arg(long)]
    file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Cmd {
    /// Run one battle and print its commentary
    Battle {
        #[command(flatten)]
        roster: RosterArgs,
        /// RNG seed for determinism
        #[arg(long, default_value_t = 0)]
        seed: u64,
        /// Turn cap; the higher-rated team wins when it is hit
        #[arg(long, default_value_t = DEFAULT_MAX_TURNS)]
        max_turns: u32,
        /// Actions per team per turn
        #[arg(long, default_value_t = DEFAULT_MOVES_PER_TURN)]
        moves: usize,
        /// Print the full result as JSON instead of the log
        #[arg(long, default_value_t = false)]
        json: bool,
        /// Trace every battle event to stderr
        #[arg(long, short, default_value_t = false)]
        verbose: bool,
    },
    /// Print the teams of a roster with ranks and abilities (JSON)
    Roster {
        #[command(flatten)]
        roster: RosterArgs,
    },
    /// List the built-in roster ids
    Builtins,
}

#[derive(Parser)]
#[command(name = "shinzoku-cli")]
#[command(about = "Shinzoku auto-battle CLI harness")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "battle=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
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

fn to_config(roster: &RosterArgs, seed: u64) -> anyhow::Result<BattleConfig> {
    let cfg = if let Some(path) = roster.file.as_ref() {
        let text = read_text_auto(path)?;
        let teams = api::parse_roster(&text, &path.to_string_lossy())?;
        BattleConfig::from_roster(teams, seed)
    } else if let Some(id) = roster.builtin.as_ref() {
        BattleConfig::builtin(id.clone(), seed)
    } else {
        anyhow::bail!("pass --builtin <id> or --file <path>");
    };
    Ok(cfg)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Battle {
            roster,
            seed,
            max_turns,
            moves,
            json,
            verbose,
        } => {
            init_logging(verbose);
            let mut cfg = to_config(&roster, seed)?;
            cfg.max_turns = max_turns;
            cfg.moves_per_turn = moves;
            let res = api::simulate_battle(cfg)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&res)?);
            } else {
                for line in &res.log {
                    println!("{}", line);
                }
                println!();
                println!("winner: {} after {} turns", res.winner, res.turns);
            }
        }
        Cmd::Roster { roster } => {
            init_logging(false);
            let cfg = to_config(&roster, 0)?;
            let teams = api::describe_roster(&api::resolve_roster(&cfg)?);
            println!("{}", serde_json::to_string_pretty(&teams)?);
        }
        Cmd::Builtins => {
            let mut ids: Vec<_> = builtin_rosters().into_keys().collect();
            ids.sort_unstable();
            for id in ids {
                println!("{}", id);
            }
        }
    }
    Ok(())
}
