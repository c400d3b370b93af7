//! Command-line front end for the advisor.
//!
//! Usage:
//!   picklab-advisor recommend --snapshot handoff.json
//!   picklab-advisor recommend --snapshot handoff.json --own 2 --opponent-hp 40 --scenario aggressive
//!   picklab-advisor pool --snapshot handoff.json
//!   picklab-advisor matchup ice --species garchomp
//!   picklab-advisor move "Dragon Dance"
//!   picklab-advisor compile --out data/dex.bin

use clap::{Args, Parser, Subcommand};
use picklab_advisor::mcp_interface::{
    advice_json, display_advice, display_defensive_profile, display_matchup_header, display_move,
    display_pool, display_summary, display_type_matchup, parse_type,
};
use picklab_advisor::{
    AdvisorConfig, AdvisorError, AdvisorResult, Advisor, Dex, PokemonType, PolicyFlags, Scenario,
    Selection, Side, Snapshot,
};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "picklab-advisor", about = "Turn-by-turn action advice for a picked team")]
struct Cli {
    /// Directory holding pokedex.json, moves.json and the optional advisor.ron / setup_index.json
    #[arg(long, default_value = "data", global = true)]
    data: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank the actions available this turn
    Recommend(RecommendArgs),

    /// Summarize a hand-off snapshot and list both pools
    Pool {
        #[arg(long)]
        snapshot: PathBuf,
    },

    /// Type matchup of an attacking type against a species or explicit types
    Matchup {
        /// Attacking type, e.g. "ice"; omit to print the species' full defensive profile
        attack: Option<String>,
        #[arg(long, conflicts_with = "types")]
        species: Option<String>,
        /// Defending types, e.g. --types dragon --types ground
        #[arg(long)]
        types: Vec<String>,
    },

    /// Look up a move in the dex
    Move { name: String },

    /// Compile the JSON dex into a binary cache
    Compile {
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Args)]
struct RecommendArgs {
    #[arg(long)]
    snapshot: PathBuf,

    /// Our active slot, 1-6 (default: first of our pool)
    #[arg(long, value_parser = parse_slot)]
    own: Option<usize>,

    /// The opponent's active slot, 1-6 (default: first of their pool)
    #[arg(long, value_parser = parse_slot)]
    opponent: Option<usize>,

    /// Our active mon's health in percent
    #[arg(long)]
    own_hp: Option<f32>,

    /// The opponent's health in percent
    #[arg(long)]
    opponent_hp: Option<f32>,

    /// Health of a brought slot, e.g. --ally-hp 3=40 (repeatable)
    #[arg(long = "ally-hp", value_parser = parse_slot_health)]
    ally_hp: Vec<(usize, f32)>,

    /// aggressive (A) or safety-first (B)
    #[arg(long, default_value = "safety-first")]
    scenario: String,

    /// Ignore the opponent's setup potential
    #[arg(long)]
    ignore_setup: bool,

    /// Ignore whether anything can switch in safely
    #[arg(long)]
    ignore_no_switch: bool,

    /// Print the result as JSON instead of text
    #[arg(long)]
    json: bool,
}

/// 1-based slot number to a roster index.
fn parse_slot(value: &str) -> Result<usize, String> {
    match value.trim().parse::<usize>() {
        Ok(slot) if (1..=6).contains(&slot) => Ok(slot - 1),
        _ => Err(format!("expected a slot number from 1 to 6, got {:?}", value)),
    }
}

fn parse_slot_health(value: &str) -> Result<(usize, f32), String> {
    let (slot, health) = value
        .split_once('=')
        .ok_or_else(|| format!("expected SLOT=HP, got {:?}", value))?;
    let health = health
        .trim()
        .parse::<f32>()
        .map_err(|e| format!("bad health {:?}: {}", health, e))?;
    Ok((parse_slot(slot)?, health))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn recommend(data: &Path, args: RecommendArgs) -> AdvisorResult<()> {
    let dex = Dex::load(data)?;
    let config = AdvisorConfig::load_from_dir(data)?;
    let snapshot = Snapshot::load(&args.snapshot)?;

    let selection = Selection {
        own_active: args.own,
        opponent_active: args.opponent,
        own_health: args.own_hp,
        opponent_health: args.opponent_hp,
        ally_health: args.ally_hp.into_iter().collect::<BTreeMap<_, _>>(),
        flags: PolicyFlags {
            consider_setup: !args.ignore_setup,
            consider_no_switch: !args.ignore_no_switch,
            scenario: Scenario::parse_or_default(&args.scenario),
        },
    };
    let ctx = snapshot.context(&dex, &selection)?;
    let advice = Advisor::new(&dex, &config).advise(&ctx);

    if args.json {
        println!("{}", advice_json(&advice)?);
    } else {
        print!("{}", display_matchup_header(&dex, &ctx));
        print!("{}", display_advice(&advice));
    }
    Ok(())
}

fn matchup(
    data: &Path,
    attack: Option<String>,
    species: Option<String>,
    types: Vec<String>,
) -> AdvisorResult<()> {
    let dex = Dex::load(data)?;

    let defender: Vec<PokemonType> = match &species {
        Some(species) => dex.species_types(species),
        None => types
            .iter()
            .map(|name| parse_type(name))
            .collect::<AdvisorResult<_>>()?,
    };

    match (attack, species) {
        (None, Some(species)) => print!("{}", display_defensive_profile(&dex, &species)),
        (Some(attack), _) => print!("{}", display_type_matchup(parse_type(&attack)?, &defender)),
        (None, None) => {
            return Err(AdvisorError::InvalidInput(
                "give an attacking type, a species, or both".to_string(),
            ))
        }
    }
    Ok(())
}

fn run(cli: Cli) -> AdvisorResult<()> {
    match cli.command {
        Commands::Recommend(args) => recommend(&cli.data, args),
        Commands::Pool { snapshot } => {
            let dex = Dex::load(&cli.data)?;
            let snapshot = Snapshot::load(&snapshot)?;
            print!("{}", display_summary(&dex, &snapshot));
            println!();
            print!("{}", display_pool(&dex, &snapshot, Side::Own, false));
            println!();
            let hide = snapshot.app.ui.hide_right_picks;
            print!("{}", display_pool(&dex, &snapshot, Side::Opponent, hide));
            Ok(())
        }
        Commands::Matchup {
            attack,
            species,
            types,
        } => matchup(&cli.data, attack, species, types),
        Commands::Move { name } => {
            let dex = Dex::load(&cli.data)?;
            print!("{}", display_move(&dex, &name));
            Ok(())
        }
        Commands::Compile { out } => {
            let dex = Dex::load(&cli.data)?;
            let out = out.unwrap_or_else(|| cli.data.join(picklab_advisor::dex::COMPILED_FILE));
            dex.save_compiled(&out)?;
            println!(
                "Compiled {} species and {} moves into {}",
                dex.species_count(),
                dex.move_count(),
                out.display()
            );
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
