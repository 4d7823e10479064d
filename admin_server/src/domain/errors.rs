use std::fmt;

// Domain-level errors for term catalog workflows.
#[derive(Debug, PartialEq)]
pub enum TermError {
    MissingField(&'static str),
    NotFound,
    StorageFailure(String),
}

impl fmt::Display for TermError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TermError::MissingField(field) => write!(f, "{field} is required"),
            TermError::NotFound => write!(f, "term not found"),
            TermError::StorageFailure(reason) => write!(f, "term storage error: {reason}"),
        }
    }
}

// Domain-level errors for the host PIN gate.
#[derive(Debug, PartialEq)]
pub enum HostError {
    InvalidPin,
    InvalidToken,
    SessionExpired,
    StorageFailure,
}

// Domain-level errors for image uploads.
#[derive(Debug, PartialEq)]
pub enum UploadError {
    MissingFile,
    NotAnImage,
    TooLarge { limit_bytes: usize },
    StorageFailure(String),
}

impl fmt::Display for UploadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadError::MissingFile => write!(f, "file not found"),
            UploadError::NotAnImage => write!(f, "only image files are accepted"),
            UploadError::TooLarge { limit_bytes } => {
                write!(f, "file must be smaller than {}MB", limit_bytes / (1024 * 1024))
            }
            UploadError::StorageFailure(_) => write!(f, "failed to store the uploaded file"),
        }
    }
}
