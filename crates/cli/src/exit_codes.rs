//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract — scripts rely on them.
//!
//! | Code | Meaning                                           |
//! |------|---------------------------------------------------|
//! | 0    | Success                                           |
//! | 1    | Unmatched values found (only with `--strict`)     |
//! | 2    | CLI usage error (bad args)                        |
//! | 3    | Invalid recon config                              |
//! | 4    | Input file missing or unreadable                  |
//! | 5    | Malformed CSV or JSON                             |
//! | 6    | Configured column or JSON path absent             |

use topocheck_recon::ErrorKind;

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// `--strict` run found values on either side without a counterpart.
pub const EXIT_RECON_UNMATCHED: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

/// Config failed to parse or validate.
pub const EXIT_RECON_INVALID_CONFIG: u8 = 3;

/// Input file not found, or any other read failure.
pub const EXIT_RECON_INPUT: u8 = 4;

/// Input file is not valid CSV / JSON.
pub const EXIT_RECON_PARSE: u8 = 5;

/// Input is well-formed but lacks a configured column or path.
pub const EXIT_RECON_SCHEMA: u8 = 6;

/// Map an engine error class to its exit code.
pub fn recon_exit_code(kind: ErrorKind) -> u8 {
    match kind {
        ErrorKind::Config => EXIT_RECON_INVALID_CONFIG,
        ErrorKind::FileNotFound | ErrorKind::Io => EXIT_RECON_INPUT,
        ErrorKind::Parse => EXIT_RECON_PARSE,
        ErrorKind::Schema => EXIT_RECON_SCHEMA,
    }
}
