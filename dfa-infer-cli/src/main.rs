//! Command-line front end for `dfa-infer`: runs Gold's algorithm over sample files, runs L* against a
//! reference DFA file, or checks two DFA files for language equivalence. Printing and file I/O live entirely
//! here; the subcommands are thin callers of the library's public API.

use clap::{Args, Parser, Subcommand};
use dfa_infer::dfa::Dfa;
use dfa_infer::equivalence::automaton_match;
use dfa_infer::gold::{gold, GoldOptions, GoldOutcome};
use dfa_infer::lstar::learner::Learner;
use dfa_infer::lstar::teacher::Teacher;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::rc::Rc;

#[derive(Debug, Parser)]
#[command(name = "dfa-infer", about = "Infer a minimal DFA with Gold's algorithm or Angluin's L*")]
struct DfaInferArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Infer a DFA from a positive-sample file and a negative-sample file (Gold's algorithm).
    Gold(GoldArgs),
    /// Infer a DFA by querying a reference DFA file as the Teacher (Angluin's L*).
    Lstar(LstarArgs),
    /// Check whether two DFA files recognize the same language.
    Equiv(EquivArgs),
}

#[derive(Debug, Args)]
struct GoldArgs {
    /// File with one positive sample word per line.
    s_plus: PathBuf,
    /// File with one negative sample word per line.
    s_minus: PathBuf,
    /// Alphabet symbols; defaults to the crate's built-in default alphabet when omitted.
    #[arg(long)]
    alphabet: Option<String>,
    /// Use the self-labeled/compatible-red synthesis mode instead of hole-filling.
    #[arg(long)]
    no_fill_holes: bool,
}

#[derive(Debug, Args)]
struct LstarArgs {
    /// DFA text file (see `dfa_infer::parser`) the Teacher is built from.
    reference: PathBuf,
}

#[derive(Debug, Args)]
struct EquivArgs {
    left: PathBuf,
    right: PathBuf,
}

fn load_dfa(path: &Path) -> Result<Dfa, String> {
    let text = fs::read_to_string(path).map_err(|e| format!("reading {}: {e}", path.display()))?;
    let parsed = dfa_infer::parser::dfa(&text).map_err(|e| format!("parsing {}: {e}", path.display()))?;
    parsed
        .try_into()
        .map_err(|e: dfa_infer::dfa::DfaParseError| format!("compiling {}: {e}", path.display()))
}

fn load_samples(path: &Path) -> Result<HashSet<String>, String> {
    let text = fs::read_to_string(path).map_err(|e| format!("reading {}: {e}", path.display()))?;
    Ok(text.lines().map(str::to_string).collect())
}

fn run_gold(args: GoldArgs) -> Result<(), String> {
    let s_plus = load_samples(&args.s_plus)?;
    let s_minus = load_samples(&args.s_minus)?;
    let mut options = GoldOptions {
        fill_holes: !args.no_fill_holes,
        ..Default::default()
    };
    if let Some(alphabet) = args.alphabet {
        options.alphabet = alphabet;
    }
    let outcome = gold(&s_plus, &s_minus, &options).map_err(|e| e.to_string())?;
    match outcome {
        GoldOutcome::Accepted(dfa) => {
            println!("Gold converged on a {}-state DFA:", dfa.num_states());
            println!("{}", dfa.to_table());
        }
        GoldOutcome::Rejected(pta) => {
            println!("Gold could not synthesize a DFA; falling back to the PTA of S+:");
            println!("{}", pta.to_table());
        }
    }
    Ok(())
}

fn run_lstar(args: LstarArgs) -> Result<(), String> {
    let reference = Rc::new(load_dfa(&args.reference)?);
    let teacher = Teacher::new(reference).map_err(|e| e.to_string())?;
    let learned = Learner::new(&teacher).learn();
    println!("L* converged on a {}-state DFA:", learned.num_states());
    println!("{}", learned.to_table());
    Ok(())
}

fn run_equiv(args: EquivArgs) -> Result<(), String> {
    let left = load_dfa(&args.left)?;
    let right = load_dfa(&args.right)?;
    match automaton_match(&left, &right) {
        None => println!("Equivalent"),
        Some(w) => println!("Not equivalent; distinguishing word: {w:?}"),
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = DfaInferArgs::parse();
    let result = match args.command {
        Command::Gold(args) => run_gold(args),
        Command::Lstar(args) => run_lstar(args),
        Command::Equiv(args) => run_equiv(args),
    };
    if let Err(e) = result {
        eprintln!("error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
