use std::fmt;

/// A source name that appears more than once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateName {
    pub name: String,
    pub count: usize,
}

#[derive(Debug)]
pub enum MapperError {
    /// Source list repeats names and the policy is `reject`.
    DuplicateSource(Vec<DuplicateName>),
    /// Fuzzy cutoff outside `[0, 1]` (or NaN).
    InvalidCutoff(f64),
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config parsed but holds invalid values.
    ConfigValidation(String),
}

impl fmt::Display for MapperError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateSource(dups) => {
                write!(f, "duplicate source names:")?;
                for dup in dups {
                    write!(f, " {:?} x{}", dup.name, dup.count)?;
                }
                Ok(())
            }
            Self::InvalidCutoff(cutoff) => {
                write!(f, "cutoff must be between 0 and 1, got {cutoff}")
            }
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
        }
    }
}

impl std::error::Error for MapperError {}
