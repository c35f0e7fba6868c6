use std::string::FromUtf8Error;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

/// Failures that abort the whole run. Nothing is reported once one of these
/// is raised.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("response from {url} is not valid UTF-8: {source}")]
    Decoding {
        url: String,
        #[source]
        source: FromUtf8Error,
    },

    #[error("line {line}: expected 5 fields, found {found}")]
    MalformedRecord { line: usize, found: usize },

    #[error("line {line}: {field} is not a valid integer: {value:?}")]
    FieldType {
        line: usize,
        field: &'static str,
        value: String,
    },
}
