use thiserror::Error;
use unibridge_common::{CategorizedError, CommonError, ErrorCategory};

/// Error type for unibridge_apple
#[derive(Error, Debug)]
pub enum AppleError {
    #[error("Objective-C class '{0}' is not linked into this binary")]
    ClassNotFound(&'static str),

    #[error("[{0} sharedInstance] returned nil")]
    NilSingleton(&'static str),
}

impl CategorizedError for AppleError {
    fn category(&self) -> ErrorCategory {
        match self {
            AppleError::ClassNotFound(_) | AppleError::NilSingleton(_) => {
                ErrorCategory::Initialization
            }
        }
    }
}

impl From<AppleError> for CommonError {
    fn from(err: AppleError) -> Self {
        CommonError::Categorized {
            category: err.category(),
            message: err.to_string(),
        }
    }
}

/// Result type alias for unibridge_apple
pub type Result<T> = std::result::Result<T, AppleError>;
