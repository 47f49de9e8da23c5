use thiserror::Error;

#[derive(Error, Debug)]
pub enum SplineError {
    #[error("Not an ldspline file: {0}")]
    BadMagic(String),

    #[error("Unsupported ldspline version: {0}")]
    UnsupportedVersion(u16),

    #[error("Chromosome label is not valid UTF-8")]
    BadLabel,

    #[error("No chromosome at directory index {0}")]
    UnknownChromosome(usize),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
