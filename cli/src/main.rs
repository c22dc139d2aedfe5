//! dice-odds: roll dice and print exact sum probabilities.
//!
//! Subcommands:
//! - roll   roll every die once and print faces and sum
//! - odds   probability that `VALUE OP sum` holds
//! - table  full histogram of sums

use std::process;

use clap::{Parser, Subcommand};
use dice_odds_core_rs::{
    Comparison, DiceEngine, DieSpec, EngineConfig, EngineError, EngineResult,
};

#[derive(Parser)]
#[command(name = "dice-odds", about = "Deterministic dice rolls and exact odds")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Roll every die once
    Roll {
        /// Seed string (default: current time)
        #[arg(long)]
        seed: Option<String>,
        /// Number of times to roll
        #[arg(long, default_value_t = 1)]
        times: usize,
        /// Dice: d4, d6, d20, d100, c, dN or dMAX/STEP
        #[arg(required = true)]
        dice: Vec<String>,
    },
    /// Probability that VALUE OP sum holds
    Odds {
        /// Comparison: GE, LE, GT, LT, EQ (or >=, <=, >, <, =)
        #[arg(long)]
        op: String,
        /// Threshold value
        #[arg(long, allow_negative_numbers = true)]
        value: f64,
        /// Decimal places in the percentage
        #[arg(long, default_value_t = 5)]
        precision: u8,
        #[arg(required = true)]
        dice: Vec<String>,
    },
    /// Print the histogram of sums
    Table {
        #[arg(required = true)]
        dice: Vec<String>,
    },
}

fn parse_dice(names: &[String]) -> EngineResult<Vec<DieSpec>> {
    names.iter().map(|name| name.parse()).collect()
}

fn engine_for(config: EngineConfig, names: &[String]) -> EngineResult<DiceEngine> {
    let mut engine = DiceEngine::new(config)?;
    engine.set_dice(parse_dice(names)?)?;
    Ok(engine)
}

fn cmd_roll(seed: Option<String>, times: usize, names: &[String]) -> EngineResult<()> {
    let config = EngineConfig {
        seed,
        ..EngineConfig::default()
    };
    let mut engine = engine_for(config, names)?;
    for _ in 0..times {
        let outcome = engine.roll_all();
        let faces: Vec<String> = outcome.faces.iter().map(u64::to_string).collect();
        match outcome.sum {
            Some(sum) => println!("{} = {}", faces.join(" + "), sum),
            None => println!("--"),
        }
    }
    Ok(())
}

fn cmd_odds(op: &str, value: f64, precision: u8, names: &[String]) -> EngineResult<()> {
    let cmp: Comparison = op.parse()?;
    let config = EngineConfig {
        seed: Some(String::new()),
        print_precision: precision,
        ..EngineConfig::default()
    };
    let mut engine = engine_for(config, names)?;
    let text = engine.chance_text(value, cmp);
    println!("{} {} sum: {}", value, cmp.symbol(), text);
    Ok(())
}

fn cmd_table(names: &[String]) -> EngineResult<()> {
    let mut engine = engine_for(EngineConfig::with_seed(""), names)?;
    let table = engine.setup()?;
    for (sum, count) in table.counts() {
        println!("{:>6}  {}", sum, count);
    }
    println!("total   {}", table.total());
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Roll { seed, times, dice } => cmd_roll(seed, times, &dice),
        Command::Odds {
            op,
            value,
            precision,
            dice,
        } => cmd_odds(&op, value, precision, &dice),
        Command::Table { dice } => cmd_table(&dice),
    };

    if let Err(err) = result {
        eprintln!("error: {}", err);
        let code = match err {
            EngineError::Type(_) | EngineError::Value(_) => 2,
            _ => 1,
        };
        process::exit(code);
    }
}
