use std::fmt;

#[derive(Debug)]
pub enum MergeError {
    /// An input file does not exist.
    InputNotFound { path: String },
    /// An input file exists but is not valid JSON / CSV, or has the wrong shape.
    InputMalformed { path: String, reason: String },
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (empty column list, blank field name, etc.).
    ConfigValidation(String),
    /// IO error (read, write, serialize).
    Io(String),
}

impl MergeError {
    /// Attach a file path to a malformed-input reason.
    pub fn malformed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InputMalformed {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for MergeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InputNotFound { path } => write!(f, "input file not found: '{path}'"),
            Self::InputMalformed { path, reason } => {
                write!(f, "'{path}' is not valid input: {reason}")
            }
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for MergeError {}
