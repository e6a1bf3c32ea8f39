use std::error::Error as StdError;
use std::fmt;
use std::io::Error as IoError;
use std::result::Result as StdResult;

use arff::Error as ArffError;
use serde_json::Error as JsonError;

pub type Result<T> = StdResult<T, Error>;

#[derive(Debug)]
pub enum Error {
    /// plan parameters are invalid for the data set they are applied to
    ConfigError(String),
    /// the data set is malformed or lacks something the operation needs (e.g. labels)
    DataError(String),
    IoError(IoError),
    JsonError(JsonError),
    ArffError(ArffError),
}

impl Error {
    pub(crate) fn config<S: Into<String>>(msg: S) -> Self {
        Error::ConfigError(msg.into())
    }

    pub(crate) fn data<S: Into<String>>(msg: S) -> Self {
        Error::DataError(msg.into())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ConfigError(msg) => write!(f, "invalid configuration: {}", msg),
            Error::DataError(msg) => write!(f, "invalid data: {}", msg),
            Error::IoError(e) => write!(f, "io error: {}", e),
            Error::JsonError(e) => write!(f, "json error: {}", e),
            Error::ArffError(e) => write!(f, "arff error: {:?}", e),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::IoError(e) => Some(e),
            Error::JsonError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<IoError> for Error {
    fn from(e: IoError) -> Self {
        Error::IoError(e)
    }
}

impl From<JsonError> for Error {
    fn from(e: JsonError) -> Self {
        Error::JsonError(e)
    }
}

impl From<ArffError> for Error {
    fn from(e: ArffError) -> Self {
        Error::ArffError(e)
    }
}
