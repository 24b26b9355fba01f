//! CLI Exit Code Registry
//!
//! Single source of truth for `plotmerge` exit codes. Scripts rely on them.
//!
//! | Code | Meaning                                        |
//! |------|------------------------------------------------|
//! | 0    | Success (any number of matches, including 0)   |
//! | 1    | General error (write failure, other IO)        |
//! | 2    | Usage error (bad arguments; also clap's code)  |
//! | 3    | Input file not found                           |
//! | 4    | Input file malformed                           |
//! | 5    | Invalid `--config` file                        |
//! | 6    | Database error (upsert rolled back)            |

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

/// An input file does not exist. No output was written.
pub const EXIT_INPUT_NOT_FOUND: u8 = 3;

/// An input file is not valid JSON/CSV or has the wrong shape. No output was written.
pub const EXIT_INPUT_MALFORMED: u8 = 4;

/// The `--config` TOML failed to parse or validate.
pub const EXIT_INVALID_CONFIG: u8 = 5;

/// SQLite error during upsert; the transaction was rolled back.
pub const EXIT_DATABASE: u8 = 6;
