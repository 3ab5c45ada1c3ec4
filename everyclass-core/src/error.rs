use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Malformed slot code '{code}': {reason}")]
    MalformedSlotCode { code: String, reason: &'static str },

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Date/time parsing failed: {0}")]
    DateTime(#[from] chrono::ParseError),

    #[error("Date {date} is outside semester {semester}")]
    OutOfSemester {
        date: chrono::NaiveDate,
        semester: String,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Upstream error: {endpoint} - {message}")]
    Upstream { endpoint: String, message: String },

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Network timeout")]
    Timeout,
}

pub type Result<T> = std::result::Result<T, Error>;
