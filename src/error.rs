use std::{
    fmt::{self, Display, Formatter},
    path::PathBuf,
};

#[derive(Debug)]
pub enum Error {
    Request(reqwest::Error),
    Json(serde_json::Error),
    Io(std::io::Error),
    Url(url::ParseError),
    /// The configuration exists but breaks one of its invariants.
    Config(String),
    /// The config file is gone, e.g. deleted after startup.
    MissingConfig(PathBuf),
}

impl Error {
    pub fn config_error(msg: &str) -> Self {
        Self::Config(msg.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Json(e)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<url::ParseError> for Error {
    fn from(e: url::ParseError) -> Self {
        Error::Url(e)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Error::Request(e) => write!(f, "Request error: {}", e),
            Error::Json(e) => write!(f, "Json error: {}", e),
            Error::Io(e) => write!(f, "IO error: {}", e),
            Error::Url(e) => write!(f, "Url error: {}", e),
            Error::Config(msg) => write!(f, "Config error: {msg}"),
            Error::MissingConfig(p) => write!(f, "Config file {} does not exist", p.display()),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Request(e) => Some(e),
            Error::Json(e) => Some(e),
            Error::Io(e) => Some(e),
            Error::Url(e) => Some(e),
            Error::Config(_) | Error::MissingConfig(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
