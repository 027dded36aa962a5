use thiserror::Error;

/// Failures that can occur while loading a formula, before any solving begins.
///
/// Mirrors the variant-per-cause shape `varisat-dimacs::ParserError` uses: each
/// variant carries enough context (the offending literal or variable count) to
/// act on without re-parsing the input.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read input file {path:?}: {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse DIMACS input: {0}")]
    Parse(String),

    #[error("input declares a SAT-format instance, but only CNF is supported")]
    NotCnf,

    #[error("clause {clause_index} contains literal {literal} with magnitude 0 or greater than the declared variable count {num_vars}")]
    LiteralOutOfRange {
        clause_index: usize,
        literal: i64,
        num_vars: usize,
    },

    #[error("clause {clause_index} contains variable {variable} both positively and negatively")]
    ContradictoryClause { clause_index: usize, variable: i64 },

    #[error("clause {clause_index} contains variable {variable} more than once")]
    DuplicateLiteral { clause_index: usize, variable: i64 },

    #[error("the random 3-SAT generator needs at least 3 variables to place a clause, got {vars}")]
    TooFewVariables { vars: usize },
}
