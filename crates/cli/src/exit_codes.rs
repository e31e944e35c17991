//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract — pipeline scripts rely on them.
//!
//! # Exit Codes
//!
//! | Code | Description                                        |
//! |------|----------------------------------------------------|
//! | 0    | Success                                            |
//! | 1    | General error (unspecified)                        |
//! | 2    | CLI usage error (missing or bad arguments)         |
//! | 3    | Input error (name list unreadable or not JSON)     |
//! | 4    | Duplicate source names rejected                    |
//! | 5    | Invalid config or option value                     |
//! | 6    | Output error (mapping or report not written)       |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into the relevant command's error handling

use rigmap_mapper::MapperError;

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
/// Raised when a mapping or report cannot be serialized.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - missing positional arguments, unknown flags.
pub const EXIT_USAGE: u8 = 2;

/// A source or target file is missing, unreadable, not JSON, or not an
/// array of strings.
pub const EXIT_INPUT: u8 = 3;

/// Source list repeats names and `--on-duplicate reject` is in effect.
pub const EXIT_DUPLICATE: u8 = 4;

/// Config file cannot be parsed or holds invalid values, or `--cutoff` is
/// out of range.
pub const EXIT_CONFIG: u8 = 5;

/// Mapping or explain report could not be written. Whatever this run
/// already wrote is removed.
pub const EXIT_OUTPUT: u8 = 6;

/// Map a mapper error to its exit code.
pub fn mapper_exit_code(err: &MapperError) -> u8 {
    match err {
        MapperError::DuplicateSource(_) => EXIT_DUPLICATE,
        MapperError::InvalidCutoff(_) => EXIT_CONFIG,
        MapperError::ConfigParse(_) | MapperError::ConfigValidation(_) => EXIT_CONFIG,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_distinct() {
        let codes = [
            EXIT_SUCCESS,
            EXIT_ERROR,
            EXIT_USAGE,
            EXIT_INPUT,
            EXIT_DUPLICATE,
            EXIT_CONFIG,
            EXIT_OUTPUT,
        ];
        let mut sorted = codes.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), codes.len());
    }

    #[test]
    fn mapper_errors_map_to_codes() {
        assert_eq!(mapper_exit_code(&MapperError::DuplicateSource(Vec::new())), EXIT_DUPLICATE);
        assert_eq!(mapper_exit_code(&MapperError::InvalidCutoff(2.0)), EXIT_CONFIG);
        assert_eq!(mapper_exit_code(&MapperError::ConfigParse("x".into())), EXIT_CONFIG);
    }
}
