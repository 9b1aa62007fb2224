use std::error::Error;
use std::fmt;
use std::io;

#[derive(Debug)]
pub enum StackitError {
    Io(io::Error),
    Parse(String),
    MissingKey { key: &'static str, path: String },
    Config(String),
}

impl fmt::Display for StackitError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StackitError::Io(e) => write!(f, "IO error: {}", e),
            StackitError::Parse(msg) => write!(f, "Parse error: {}", msg),
            StackitError::MissingKey { key, path } => {
                write!(f, "Missing required configuration key '{}' in {}", key, path)
            }
            StackitError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl Error for StackitError {}

impl From<io::Error> for StackitError {
    fn from(error: io::Error) -> Self {
        StackitError::Io(error)
    }
}
