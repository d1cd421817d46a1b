use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("unexpected token '{token}' at position {position} in '{input}'")]
    UnexpectedToken {
        token: char,
        position: usize,
        input: String,
    },
    #[error("branch closed at position {position} without a matching '('")]
    UnbalancedBranch { position: usize },
    #[error("branch opened at position {position} with no preceding atom")]
    BranchWithoutAtom { position: usize },
    #[error("ring label '{label}' at position {position} with no preceding atom")]
    RingWithoutAtom { label: char, position: usize },
    #[error("unclosed ring labels at end of input: {labels:?}")]
    UnclosedRings { labels: Vec<char> },
    #[error("atom {atom_index} is not part of bond {atoms:?}")]
    AtomNotInBond { atom_index: usize, atoms: [usize; 2] },
    #[error("atom {atom_index} ({symbol}) exceeds valence: {total} > {allowed}")]
    ValenceExceeded {
        atom_index: usize,
        symbol: String,
        total: u32,
        allowed: u32,
    },
    #[error("molecule not charge balanced: total charge {total}")]
    ChargeImbalance { total: i32 },
    #[error("{0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse float: {0}")]
    ParseFloatError(#[from] std::num::ParseFloatError),
    #[error("generic error: {0}")]
    GenericError(String),
}
