use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use cdclsat::error::LoadError;
use cdclsat::formula::lit_to_int;
use cdclsat::generator::{self, HARD_CLAUSE_TO_VARIABLE_RATIO};
use cdclsat::solver::{SolveOutcome, Solver};
use cdclsat::{load_dimacs, CnfFormula};

/// Exit codes follow the SAT-competition convention (10 = SAT, 20 = UNSAT);
/// UNKNOWN and input-error get their own codes so a caller can distinguish
/// all four outcomes without parsing stderr.
const EXIT_SAT: u8 = 10;
const EXIT_UNSAT: u8 = 20;
const EXIT_UNKNOWN: u8 = 30;
const EXIT_INPUT_ERROR: u8 = 1;

/// A small DPLL/CDCL SAT solver over DIMACS CNF.
#[derive(Parser, Debug)]
#[command(name = "cdclsat", version, about)]
struct Cli {
    /// Path to a DIMACS CNF file. If omitted, a random 3-SAT instance is
    /// generated instead (see --vars/--ratio/--seed).
    path: Option<PathBuf>,

    /// Maximum number of conflicts before giving up with RESULT:UNKNOWN.
    #[arg(long)]
    max_conflicts: Option<usize>,

    /// Number of variables for the generated instance (ignored if `path` is given).
    #[arg(long, default_value_t = 50)]
    vars: usize,

    /// Clause-to-variable ratio for the generated instance.
    #[arg(long, default_value_t = HARD_CLAUSE_TO_VARIABLE_RATIO)]
    ratio: f64,

    /// Seed for the generated instance, for reproducible runs.
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn load_formula(cli: &Cli) -> Result<CnfFormula, LoadError> {
    match &cli.path {
        Some(path) => {
            let contents = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
                path: path.clone(),
                source,
            })?;
            load_dimacs(&contents)
        }
        None => {
            if cli.vars < 3 {
                return Err(LoadError::TooFewVariables { vars: cli.vars });
            }

            info!(
                "no input file given, generating a random 3-SAT instance ({} vars, ratio {}, seed {})",
                cli.vars, cli.ratio, cli.seed
            );
            Ok(generator::generate(cli.vars, cli.ratio, cli.seed))
        }
    }
}

/// Print the result as exactly one of `RESULT:UNSAT`, `RESULT:SAT` +
/// `ASSIGNMENT:...`, or `RESULT:UNKNOWN`. Variables left unconstrained by the
/// formula are printed as `0`.
fn print_outcome(outcome: SolveOutcome, num_vars: usize) -> u8 {
    match outcome {
        SolveOutcome::Sat(assignment) => {
            println!("RESULT:SAT");

            let mut values = vec![0i8; num_vars];
            for literal in assignment.iter() {
                let signed = lit_to_int(literal);
                let idx = signed.unsigned_abs() as usize - 1;
                values[idx] = if signed > 0 { 1 } else { 0 };
            }

            let tokens: Vec<String> = values
                .iter()
                .enumerate()
                .map(|(idx, value)| format!("{}={}", idx + 1, value))
                .collect();
            println!("ASSIGNMENT:{}", tokens.join(" "));

            EXIT_SAT
        }
        SolveOutcome::Unsat => {
            println!("RESULT:UNSAT");
            EXIT_UNSAT
        }
        SolveOutcome::Unknown => {
            println!("RESULT:UNKNOWN");
            EXIT_UNKNOWN
        }
    }
}

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
}

fn main() -> ExitCode {
    init_logging();

    let cli = Cli::parse();

    let formula = match load_formula(&cli) {
        Ok(formula) => formula,
        Err(err) => {
            error!("{}", err);
            return ExitCode::from(EXIT_INPUT_ERROR);
        }
    };

    let num_vars = formula.num_variables();
    let solver = Solver::with_conflict_budget(formula, cli.max_conflicts);

    info!("starting solver...");
    let outcome = solver.solve();
    ExitCode::from(print_outcome(outcome, num_vars))
}
