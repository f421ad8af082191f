use thiserror::Error;

#[derive(Error, Debug)]
pub enum NineError {
    #[error("Unsupported result file kind: '.{0}' (expected '.bel' or '.bco')")]
    UnsupportedKind(String),

    #[error("Numeric domain error: {0}")]
    NumericDomain(String),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("The result file has no header line")]
    MissingHeader,

    #[error("The result file has a header but no data records")]
    EmptyResultFile,

    #[error("Invalid record at line {line}: {reason}")]
    InvalidRecord { line: usize, reason: String },

    #[error("Time axis mismatch at timestep {timestep}: body {body} disagrees with the first body")]
    TimeAxisMismatch { timestep: usize, body: usize },

    #[error("Unknown quantity: {0}")]
    UnknownQuantity(String),

    #[error("Unknown time unit: {0}")]
    UnknownTimeUnit(String),

    #[error("Body not found: {0}")]
    BodyNotFound(String),

    #[error("Invalid load option: {0}")]
    InvalidLoadOption(String),

    #[error("Empty selection: {0}")]
    EmptySelection(String),
}

impl PartialEq for NineError {
    fn eq(&self, other: &Self) -> bool {
        use NineError::*;
        match (self, other) {
            (UnsupportedKind(a), UnsupportedKind(b)) => a == b,
            (NumericDomain(a), NumericDomain(b)) => a == b,

            // io::Error is not comparable: same variant is enough
            (IoError(_), IoError(_)) => true,

            (
                InvalidRecord {
                    line: la,
                    reason: ra,
                },
                InvalidRecord {
                    line: lb,
                    reason: rb,
                },
            ) => la == lb && ra == rb,
            (
                TimeAxisMismatch {
                    timestep: ta,
                    body: ba,
                },
                TimeAxisMismatch {
                    timestep: tb,
                    body: bb,
                },
            ) => ta == tb && ba == bb,
            (UnknownQuantity(a), UnknownQuantity(b)) => a == b,
            (UnknownTimeUnit(a), UnknownTimeUnit(b)) => a == b,
            (BodyNotFound(a), BodyNotFound(b)) => a == b,
            (InvalidLoadOption(a), InvalidLoadOption(b)) => a == b,
            (EmptySelection(a), EmptySelection(b)) => a == b,

            (MissingHeader, MissingHeader) => true,
            (EmptyResultFile, EmptyResultFile) => true,

            _ => false,
        }
    }
}
